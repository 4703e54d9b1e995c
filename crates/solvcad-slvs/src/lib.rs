//! Handle-based embedding API for the constraint solver (`spec.md` §6.1),
//! built directly on `solvcad-sketch`'s entity/constraint/param tables and
//! `solve_group`, bypassing the request/group-regeneration layer entirely.
//! Grounded on `solvcad-ids`'s handle-table style and on
//! `examples/original_source/src/sketch.h`'s `Slvs_System` surface: a caller
//! builds up params, entities, and constraints by handle, then solves one
//! group at a time.
//!
//! A [`System`] holds everything in one flat table, keyed by [`HGroup`], the
//! way the reference API treats `group` as a plain grouping tag rather than
//! the richer regeneration unit `solvcad-sketch::group::Group` is. Solving
//! group `g` treats every param owned by `g` as unknown and every other
//! param (from an earlier or later group) as a fixed constant — the same
//! per-group freezing `solvcad-sketch::sketch::Sketch::regenerate` uses, just
//! without a Sketch wrapped around it.

#![deny(clippy::all, rust_2018_idioms)]

use solvcad_ids::{IdTable, Owner};
use solvcad_sketch::config::SolveConfig;
use solvcad_sketch::constraint::{self, Constraint, ConstraintKind};
use solvcad_sketch::entity::{Entity, EntityKind};
use solvcad_sketch::param::ParamTable;
use solvcad_sketch::solver::{self, SolveOutcome};

pub use solvcad_ids::{HConstraint, HEntity, HGroup, HParam};
pub use solvcad_sketch::solver::SolveResult;

/// Result codes for a convenience-wrapper call that asserts argument kinds
/// (`Coincident`, `Distance`, ... ), distinct from [`SolveResult`] which
/// covers the solve itself.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlvsError {
    #[error("entity {0:?} is not a point")]
    NotAPoint(HEntity),
    #[error("entity {0:?} is not a line")]
    NotALine(HEntity),
    #[error("entity {0:?} is not a circle or arc")]
    NotACircleOrArc(HEntity),
    #[error("entities {0:?} and {1:?} have no supported coincidence relation")]
    NoCoincidenceRelation(HEntity, HEntity),
    #[error("entities {0:?} and {1:?} have no supported distance relation")]
    NoDistanceRelation(HEntity, HEntity),
    #[error("entities {0:?} and {1:?} have no supported equality relation")]
    NoEqualityRelation(HEntity, HEntity),
    #[error("`{0}` has no equivalent constraint in this solver")]
    Unsupported(&'static str),
}

/// The whole flat system: every param, entity, and constraint added so far,
/// across every group. Mirrors `Slvs_System`'s `param[]`/`entity[]`/
/// `constraint[]` triple plus its `dragged[4]`.
#[derive(Default)]
pub struct System {
    params: ParamTable,
    entities: IdTable<HEntity, Entity>,
    constraints: IdTable<HConstraint, Constraint>,
    dragged: [Option<HParam>; 4],
}

impl System {
    pub fn new() -> Self { System::default() }

    fn add_entity(&mut self, group: HGroup, kind: EntityKind) -> HEntity {
        self.entities.add(Owner::Group(group), |h| Entity::new(h, group, None, kind))
    }

    fn add_workplane_entity(&mut self, group: HGroup, workplane: HEntity, kind: EntityKind) -> HEntity {
        self.entities.add(Owner::Group(group), |h| Entity::new(h, group, Some(workplane), kind))
    }

    fn add_constraint(&mut self, group: HGroup, workplane: Option<HEntity>, kind: ConstraintKind) -> HConstraint {
        let handle = constraint::add_constraint(&mut self.constraints, group, workplane, kind);
        self.constraints
            .find_mut(handle)
            .expect("just inserted")
            .generate_params(&mut self.params, Owner::Group(group), &self.entities);
        handle
    }

    fn entity_kind(&self, h: HEntity) -> Option<&EntityKind> { self.entities.find(h).map(Entity::kind) }

    fn is_point(&self, h: HEntity) -> bool { self.entities.find(h).map(Entity::is_point).unwrap_or(false) }
    fn is_line(&self, h: HEntity) -> bool { matches!(self.entity_kind(h), Some(EntityKind::LineSegment { .. })) }
    fn is_circle_or_arc(&self, h: HEntity) -> bool {
        matches!(self.entity_kind(h), Some(EntityKind::Circle { .. }) | Some(EntityKind::ArcOfCircle { .. }))
    }
    fn is_workplane(&self, h: HEntity) -> bool { self.entities.find(h).map(Entity::is_workplane).unwrap_or(false) }

    // --- Constructors (§6.1: AddParam, AddPoint2D, ...) -----------------

    /// `AddParam(group, value)`: a fresh scalar unknown owned by `group`.
    pub fn add_param(&mut self, group: HGroup, value: f64) -> HParam { self.params.add(Owner::Group(group), value) }

    /// `AddPoint2D(group, workplane, u, v)`.
    pub fn add_point_2d(&mut self, group: HGroup, workplane: HEntity, u: HParam, v: HParam) -> HEntity {
        self.add_workplane_entity(group, workplane, EntityKind::PointIn2d { workplane, params: [u, v] })
    }

    /// `AddPoint3D(group, x, y, z)`.
    pub fn add_point_3d(&mut self, group: HGroup, x: HParam, y: HParam, z: HParam) -> HEntity {
        self.add_entity(group, EntityKind::PointIn3d { params: [x, y, z] })
    }

    /// `AddNormal2D(group, workplane)`: oriented by the workplane's own normal.
    pub fn add_normal_2d(&mut self, group: HGroup, workplane: HEntity) -> HEntity {
        self.add_workplane_entity(group, workplane, EntityKind::NormalIn2d { workplane })
    }

    /// `AddNormal3D(group, qw, qx, qy, qz)`.
    pub fn add_normal_3d(&mut self, group: HGroup, qw: HParam, qx: HParam, qy: HParam, qz: HParam) -> HEntity {
        self.add_entity(group, EntityKind::NormalIn3d { params: [qw, qx, qy, qz] })
    }

    /// `AddDistance(group, d)`.
    pub fn add_distance(&mut self, group: HGroup, d: HParam) -> HEntity {
        self.add_entity(group, EntityKind::Distance { param: d })
    }

    /// `AddLine2D(group, workplane, a, b)`. Fails if either endpoint isn't a point.
    pub fn add_line_2d(&mut self, group: HGroup, workplane: HEntity, a: HEntity, b: HEntity) -> Result<HEntity, SlvsError> {
        self.require_point(a)?;
        self.require_point(b)?;
        Ok(self.add_workplane_entity(group, workplane, EntityKind::LineSegment { points: [a, b] }))
    }

    /// `AddLine3D(group, a, b)`.
    pub fn add_line_3d(&mut self, group: HGroup, a: HEntity, b: HEntity) -> Result<HEntity, SlvsError> {
        self.require_point(a)?;
        self.require_point(b)?;
        Ok(self.add_entity(group, EntityKind::LineSegment { points: [a, b] }))
    }

    /// `AddCubic(group, workplane, p0, p1, p2, p3)`: a non-rational, non-periodic cubic Bezier.
    pub fn add_cubic(&mut self, group: HGroup, workplane: HEntity, control: [HEntity; 4]) -> Result<HEntity, SlvsError> {
        for p in control {
            self.require_point(p)?;
        }
        Ok(self.add_workplane_entity(group, workplane, EntityKind::Cubic { control, weights: None, periodic: false }))
    }

    /// `AddArc(group, workplane, normal, center, start, end)`.
    pub fn add_arc(&mut self, group: HGroup, workplane: HEntity, normal: HEntity, center: HEntity, start: HEntity, end: HEntity) -> Result<HEntity, SlvsError> {
        self.require_point(center)?;
        self.require_point(start)?;
        self.require_point(end)?;
        Ok(self.add_workplane_entity(group, workplane, EntityKind::ArcOfCircle { center, normal, start, end }))
    }

    /// `AddCircle(group, workplane, center, normal, radius)`.
    pub fn add_circle(&mut self, group: HGroup, workplane: HEntity, center: HEntity, normal: HEntity, radius: HEntity) -> Result<HEntity, SlvsError> {
        self.require_point(center)?;
        Ok(self.add_workplane_entity(group, workplane, EntityKind::Circle { center, normal, radius }))
    }

    /// `AddWorkplane(group, origin, normal)`: a free (non-workplane-owned) 3D entity.
    pub fn add_workplane(&mut self, group: HGroup, origin: HEntity, normal: HEntity) -> Result<HEntity, SlvsError> {
        self.require_point(origin)?;
        Ok(self.add_entity(group, EntityKind::Workplane { origin, normal }))
    }

    /// `Add2DBase(group, origin, normal_wxyz)`: the one-shot helper that
    /// creates an origin point-in-3D, a normal-in-3D, and the workplane
    /// entity tying them together, the way `RequestKind::Workplane`
    /// generates a sketch's reference planes.
    pub fn add_2d_base(&mut self, group: HGroup, origin: (f64, f64, f64), normal_wxyz: (f64, f64, f64, f64)) -> HEntity {
        let x = self.add_param(group, origin.0);
        let y = self.add_param(group, origin.1);
        let z = self.add_param(group, origin.2);
        let origin_pt = self.add_point_3d(group, x, y, z);
        let qw = self.add_param(group, normal_wxyz.0);
        let qx = self.add_param(group, normal_wxyz.1);
        let qy = self.add_param(group, normal_wxyz.2);
        let qz = self.add_param(group, normal_wxyz.3);
        let normal = self.add_normal_3d(group, qw, qx, qy, qz);
        self.add_entity(group, EntityKind::Workplane { origin: origin_pt, normal })
    }

    fn require_point(&self, h: HEntity) -> Result<(), SlvsError> {
        if self.is_point(h) { Ok(()) } else { Err(SlvsError::NotAPoint(h)) }
    }

    // --- Constraint convenience wrappers (§6.1) --------------------------

    /// `Coincident(group, a, b, workplane)`: dispatches to `PointsCoincident`,
    /// `PtOnLine`, or `PtOnCircle` depending on what `a`/`b` actually are.
    pub fn coincident(&mut self, group: HGroup, workplane: Option<HEntity>, a: HEntity, b: HEntity) -> Result<HConstraint, SlvsError> {
        let kind = if self.is_point(a) && self.is_point(b) {
            ConstraintKind::PointsCoincident { a, b }
        } else if self.is_point(a) && self.is_line(b) {
            ConstraintKind::PtOnLine { pt: a, line: b, t: None }
        } else if self.is_point(b) && self.is_line(a) {
            ConstraintKind::PtOnLine { pt: b, line: a, t: None }
        } else if self.is_point(a) && self.is_circle_or_arc(b) {
            ConstraintKind::PtOnCircle { pt: a, circle: b }
        } else if self.is_point(b) && self.is_circle_or_arc(a) {
            ConstraintKind::PtOnCircle { pt: b, circle: a }
        } else {
            return Err(SlvsError::NoCoincidenceRelation(a, b));
        };
        Ok(self.add_constraint(group, workplane, kind))
    }

    /// `Distance(group, a, b, value, workplane)`: dispatches to
    /// `PtPtDistance` or `PtPlaneDistance` depending on whether `b` is a
    /// point or a workplane.
    pub fn distance(&mut self, group: HGroup, workplane: Option<HEntity>, a: HEntity, b: HEntity, value: f64) -> Result<HConstraint, SlvsError> {
        let kind = if self.is_point(a) && self.is_point(b) {
            ConstraintKind::PtPtDistance { a, b, value }
        } else if self.is_point(a) && self.is_workplane(b) {
            ConstraintKind::PtPlaneDistance { pt: a, plane: b, value }
        } else if self.is_point(b) && self.is_workplane(a) {
            ConstraintKind::PtPlaneDistance { pt: b, plane: a, value }
        } else if self.is_point(a) && self.is_line(b) {
            ConstraintKind::PtLineDistance { pt: a, line: b, value }
        } else if self.is_point(b) && self.is_line(a) {
            ConstraintKind::PtLineDistance { pt: b, line: a, value }
        } else {
            return Err(SlvsError::NoDistanceRelation(a, b));
        };
        Ok(self.add_constraint(group, workplane, kind))
    }

    /// `Equal(group, a, b, workplane)`: `EqualLengthLines` for two lines,
    /// `EqualRadius` for two circles/arcs.
    pub fn equal(&mut self, group: HGroup, workplane: Option<HEntity>, a: HEntity, b: HEntity) -> Result<HConstraint, SlvsError> {
        let kind = if self.is_line(a) && self.is_line(b) {
            ConstraintKind::EqualLengthLines { a, b }
        } else if self.is_circle_or_arc(a) && self.is_circle_or_arc(b) {
            ConstraintKind::EqualRadius { a, b }
        } else {
            return Err(SlvsError::NoEqualityRelation(a, b));
        };
        Ok(self.add_constraint(group, workplane, kind))
    }

    /// `Parallel(group, a, b, workplane)`.
    pub fn parallel(&mut self, group: HGroup, workplane: Option<HEntity>, a: HEntity, b: HEntity) -> HConstraint {
        self.add_constraint(group, workplane, ConstraintKind::Parallel { a, b, axis: None })
    }

    /// `Perpendicular(group, a, b, workplane)`.
    pub fn perpendicular(&mut self, group: HGroup, workplane: Option<HEntity>, a: HEntity, b: HEntity) -> HConstraint {
        self.add_constraint(group, workplane, ConstraintKind::Perpendicular { a, b })
    }

    /// `Tangent(group, a, b, shared_point, workplane)`.
    pub fn tangent(&mut self, group: HGroup, workplane: Option<HEntity>, a: HEntity, b: HEntity, shared_point: HEntity) -> HConstraint {
        self.add_constraint(group, workplane, ConstraintKind::CurveCurveTangent { a, b, shared_point })
    }

    /// `Horizontal(group, line, workplane)`.
    pub fn horizontal(&mut self, group: HGroup, line: HEntity, workplane: HEntity) -> HConstraint {
        self.add_constraint(group, Some(workplane), ConstraintKind::Horizontal { line, workplane })
    }

    /// `Vertical(group, line, workplane)`.
    pub fn vertical(&mut self, group: HGroup, line: HEntity, workplane: HEntity) -> HConstraint {
        self.add_constraint(group, Some(workplane), ConstraintKind::Vertical { line, workplane })
    }

    /// `Midpoint(group, pt, line, workplane)`.
    pub fn midpoint(&mut self, group: HGroup, workplane: Option<HEntity>, pt: HEntity, line: HEntity) -> HConstraint {
        self.add_constraint(group, workplane, ConstraintKind::AtMidpoint { pt, line })
    }

    /// `Diameter(group, circle, value)`.
    pub fn diameter(&mut self, group: HGroup, circle: HEntity, value: f64) -> HConstraint {
        self.add_constraint(group, None, ConstraintKind::Diameter { circle, value })
    }

    /// `Symmetric(group, a, b, plane, workplane)`.
    pub fn symmetric(&mut self, group: HGroup, workplane: Option<HEntity>, a: HEntity, b: HEntity, plane: HEntity) -> HConstraint {
        self.add_constraint(group, workplane, ConstraintKind::Symmetric { a, b, plane })
    }

    /// `WhereDragged(group, pt)`: freezes `pt`'s current numeric value. Not
    /// to be confused with [`System::set_dragged_params`], which only
    /// lightens the Jacobian weighting of a column during an interactive
    /// drag and contributes no equation of its own.
    pub fn where_dragged(&mut self, group: HGroup, workplane: Option<HEntity>, pt: HEntity) -> Result<HConstraint, SlvsError> {
        self.require_point(pt)?;
        Ok(self.add_constraint(group, workplane, ConstraintKind::WhereDragged { pt }))
    }

    /// `EqualAngle` and `SameOrientation` have no equivalent equation in
    /// this solver (no angle-difference or quaternion-equality constraint
    /// kind is implemented); calling either of these reports
    /// [`SlvsError::Unsupported`] rather than silently doing nothing.
    pub fn equal_angle(&mut self) -> Result<HConstraint, SlvsError> { Err(SlvsError::Unsupported("equal_angle")) }
    pub fn same_orientation(&mut self) -> Result<HConstraint, SlvsError> { Err(SlvsError::Unsupported("same_orientation")) }

    /// A free-form comment, carrying no equation (`Slvs`'s `1000` type code).
    pub fn comment(&mut self, group: HGroup, text: impl Into<String>) -> HConstraint {
        self.add_constraint(group, None, ConstraintKind::Comment { text: text.into() })
    }

    // --- Solve (§6.1: SolveSketch, Solve) --------------------------------

    /// Up to 4 params the caller is actively dragging interactively; the
    /// solver weights those columns lightly so nearby free params absorb
    /// the motion instead of fighting it (§4.5 step 5). Matches `dragged[4]`
    /// on `Slvs_System`.
    pub fn set_dragged_params(&mut self, dragged: [Option<HParam>; 4]) {
        for p in self.dragged.into_iter().flatten() {
            if let Some(param) = self.params.get_mut(p) {
                param.set_dragged(false);
            }
        }
        self.dragged = dragged;
        for p in dragged.into_iter().flatten() {
            if let Some(param) = self.params.get_mut(p) {
                param.set_dragged(true);
            }
        }
    }

    /// `SolveSketch(group, &rank, &dof, &badCount, calculateFaileds)`: solves
    /// every constraint and entity owned by `group`, treating params owned
    /// by any other group as fixed constants.
    pub fn solve_sketch(&mut self, group: HGroup, config: SolveConfig, calculate_faileds: bool) -> SolveOutcome {
        solver::solve_group(
            group,
            &self.entities,
            &self.constraints,
            &mut self.params,
            |p| self.param_group(p) == Some(group),
            config,
            calculate_faileds,
        )
    }

    /// Every param this crate creates is owned by a group (never a
    /// request), since `solvcad-slvs` bypasses the request/regeneration
    /// layer entirely.
    fn param_group(&self, p: HParam) -> Option<HGroup> {
        match p.owner() {
            Owner::Group(g) => Some(g),
            Owner::Request(_) => None,
        }
    }

    pub fn params(&self) -> &ParamTable { &self.params }
    pub fn entities(&self) -> &IdTable<HEntity, Entity> { &self.entities }
    pub fn constraints(&self) -> &IdTable<HConstraint, Constraint> { &self.constraints }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_system() -> (System, HGroup) {
        let mut sys = System::new();
        let group = HGroup::from_index(1);
        let wp = sys.add_2d_base(group, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0, 0.0));

        let mut pts = Vec::new();
        let corners = [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)];
        for (u, v) in corners {
            let pu = sys.add_param(group, u);
            let pv = sys.add_param(group, v);
            pts.push(sys.add_point_2d(group, wp, pu, pv));
        }

        let mut lines = Vec::new();
        for i in 0..4 {
            lines.push(sys.add_line_2d(group, wp, pts[i], pts[(i + 1) % 4]).unwrap());
        }
        sys.horizontal(group, lines[0], wp);
        sys.vertical(group, lines[1], wp);
        sys.horizontal(group, lines[2], wp);
        sys.vertical(group, lines[3], wp);
        sys.distance(group, Some(wp), pts[0], pts[1], 4.0).unwrap();
        sys.distance(group, Some(wp), pts[1], pts[2], 3.0).unwrap();
        (sys, group)
    }

    #[test]
    fn solves_a_fully_constrained_rectangle() {
        let (mut sys, group) = square_system();
        let outcome = sys.solve_sketch(group, SolveConfig::default(), false);
        assert_eq!(outcome.result, SolveResult::Okay);
    }

    #[test]
    fn coincident_dispatches_by_entity_kind() {
        let mut sys = System::new();
        let group = HGroup::from_index(1);
        let wp = sys.add_2d_base(group, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0, 0.0));
        let pu = sys.add_param(group, 0.0);
        let pv = sys.add_param(group, 0.0);
        let p0 = sys.add_point_2d(group, wp, pu, pv);
        let au = sys.add_param(group, 1.0);
        let av = sys.add_param(group, 0.0);
        let a = sys.add_point_2d(group, wp, au, av);
        let bu = sys.add_param(group, 1.0);
        let bv = sys.add_param(group, 1.0);
        let b = sys.add_point_2d(group, wp, bu, bv);
        let line = sys.add_line_2d(group, wp, a, b).unwrap();

        let c = sys.coincident(group, Some(wp), p0, line).unwrap();
        assert!(matches!(sys.constraints().find(c).map(Constraint::kind), Some(ConstraintKind::PtOnLine { .. })));
    }

    #[test]
    fn equal_angle_is_unsupported() {
        let mut sys = System::new();
        assert_eq!(sys.equal_angle(), Err(SlvsError::Unsupported("equal_angle")));
    }

    #[test]
    fn add_line_2d_rejects_non_point_endpoints() {
        let mut sys = System::new();
        let group = HGroup::from_index(1);
        let wp = sys.add_2d_base(group, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0, 0.0));
        let err = sys.add_line_2d(group, wp, wp, wp).unwrap_err();
        assert_eq!(err, SlvsError::NotAPoint(wp));
    }
}
