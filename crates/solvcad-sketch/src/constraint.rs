//! Geometric constraints between entities (`spec.md` §3.2, §4.4).
//!
//! Each constraint kind contributes zero or more [`Expr`]s that must
//! evaluate to zero when the constraint is satisfied. Type codes are
//! grounded on `examples/original_source/src/constraint.h`'s real
//! `ConstraintBase::Type` enum, which is richer than `spec.md`'s summary
//! table but assigns the same numbers for every type the spec names.

use solvcad_expr::{Expr, ExprVector};
use solvcad_ids::{HConstraint, HEntity, HGroup, HParam, IdTable, Owner};

use crate::entity::Entity;
use crate::param::ParamTable;

/// Stable constraint type codes (§6.5), identical to the reference design
/// so that they round-trip through the `.slvs` file format unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u32)]
pub enum ConstraintTypeCode {
    PointsCoincident = 20,
    PtPtDistance = 30,
    PtPlaneDistance = 31,
    PtLineDistance = 32,
    PtInPlane = 41,
    PtOnLine = 42,
    EqualLengthLines = 50,
    Symmetric = 60,
    AtMidpoint = 70,
    Horizontal = 80,
    Vertical = 81,
    Diameter = 90,
    PtOnCircle = 100,
    Angle = 120,
    Parallel = 121,
    Perpendicular = 122,
    CurveCurveTangent = 125,
    EqualRadius = 130,
    WhereDragged = 200,
    Comment = 1000,
}

/// Kind-specific operands for one [`Constraint`]. Mirrors the generic
/// `ptA`/`ptB`/`entityA..D`/`other`/`other2` fields of the reference
/// design's `ConstraintBase`, but typed per-kind so callers can't pass the
/// wrong operand shape (§6.1's "asserts that argument kinds match").
#[derive(Clone, Debug)]
pub enum ConstraintKind {
    PointsCoincident { a: HEntity, b: HEntity },
    PtPtDistance { a: HEntity, b: HEntity, value: f64 },
    PtPlaneDistance { pt: HEntity, plane: HEntity, value: f64 },
    PtLineDistance { pt: HEntity, line: HEntity, value: f64 },
    PtInPlane { pt: HEntity, plane: HEntity },
    /// Introduces a lazily-created `t` param (§4.4, §8 S6).
    PtOnLine { pt: HEntity, line: HEntity, t: Option<HParam> },
    EqualLengthLines { a: HEntity, b: HEntity },
    /// `pt_a` and `pt_b` are symmetric about `plane`.
    Symmetric { a: HEntity, b: HEntity, plane: HEntity },
    AtMidpoint { pt: HEntity, line: HEntity },
    Horizontal { line: HEntity, workplane: HEntity },
    Vertical { line: HEntity, workplane: HEntity },
    Diameter { circle: HEntity, value: f64 },
    PtOnCircle { pt: HEntity, circle: HEntity },
    /// `supplement` toggles the direction-cosine equation's sign, matching
    /// the reference design's `other` flag on `ANGLE`.
    Angle { a: HEntity, b: HEntity, value_degrees: f64, supplement: bool },
    /// Introduces a lazily-created hairy-ball disambiguation param: which
    /// axis `a`'s direction is most aligned with, chosen once from the
    /// entities' initial geometry and held fixed afterward (§4.4, §8 S-series).
    Parallel { a: HEntity, b: HEntity, axis: Option<HParam> },
    Perpendicular { a: HEntity, b: HEntity },
    CurveCurveTangent { a: HEntity, b: HEntity, shared_point: HEntity },
    EqualRadius { a: HEntity, b: HEntity },
    /// Freezes each coordinate of `pt` to its current numeric value while
    /// the user drags it (1-3 equations depending on 2D/3D).
    WhereDragged { pt: HEntity },
    Comment { text: String },
}

/// A geometric relation between entities (§3.2, §4.4).
#[derive(Clone, Debug)]
pub struct Constraint {
    handle: HConstraint,
    group: HGroup,
    workplane: Option<HEntity>,
    kind: ConstraintKind,
    /// A reference dimension contributes no equations; `modify_to_satisfy`
    /// instead adjusts its stored value to match current geometry.
    reference: bool,
    label_offset: Option<ExprVector>,
}

impl Constraint {
    pub fn new(handle: HConstraint, group: HGroup, workplane: Option<HEntity>, kind: ConstraintKind) -> Self {
        Constraint { handle, group, workplane, kind, reference: false, label_offset: None }
    }

    pub fn handle(&self) -> HConstraint { self.handle }
    pub fn group(&self) -> HGroup { self.group }
    pub fn workplane(&self) -> Option<HEntity> { self.workplane }
    pub fn kind(&self) -> &ConstraintKind { &self.kind }
    pub fn kind_mut(&mut self) -> &mut ConstraintKind { &mut self.kind }
    pub fn reference(&self) -> bool { self.reference }
    pub fn set_reference(&mut self, r: bool) { self.reference = r; }
    pub fn label_offset(&self) -> Option<&ExprVector> { self.label_offset.as_ref() }
    pub fn set_label_offset(&mut self, offset: Option<ExprVector>) { self.label_offset = offset; }

    pub fn type_code(&self) -> ConstraintTypeCode {
        match &self.kind {
            ConstraintKind::PointsCoincident { .. } => ConstraintTypeCode::PointsCoincident,
            ConstraintKind::PtPtDistance { .. } => ConstraintTypeCode::PtPtDistance,
            ConstraintKind::PtPlaneDistance { .. } => ConstraintTypeCode::PtPlaneDistance,
            ConstraintKind::PtLineDistance { .. } => ConstraintTypeCode::PtLineDistance,
            ConstraintKind::PtInPlane { .. } => ConstraintTypeCode::PtInPlane,
            ConstraintKind::PtOnLine { .. } => ConstraintTypeCode::PtOnLine,
            ConstraintKind::EqualLengthLines { .. } => ConstraintTypeCode::EqualLengthLines,
            ConstraintKind::Symmetric { .. } => ConstraintTypeCode::Symmetric,
            ConstraintKind::AtMidpoint { .. } => ConstraintTypeCode::AtMidpoint,
            ConstraintKind::Horizontal { .. } => ConstraintTypeCode::Horizontal,
            ConstraintKind::Vertical { .. } => ConstraintTypeCode::Vertical,
            ConstraintKind::Diameter { .. } => ConstraintTypeCode::Diameter,
            ConstraintKind::PtOnCircle { .. } => ConstraintTypeCode::PtOnCircle,
            ConstraintKind::Angle { .. } => ConstraintTypeCode::Angle,
            ConstraintKind::Parallel { .. } => ConstraintTypeCode::Parallel,
            ConstraintKind::Perpendicular { .. } => ConstraintTypeCode::Perpendicular,
            ConstraintKind::CurveCurveTangent { .. } => ConstraintTypeCode::CurveCurveTangent,
            ConstraintKind::EqualRadius { .. } => ConstraintTypeCode::EqualRadius,
            ConstraintKind::WhereDragged { .. } => ConstraintTypeCode::WhereDragged,
            ConstraintKind::Comment { .. } => ConstraintTypeCode::Comment,
        }
    }

    /// Generates any params this constraint's equations need but that
    /// aren't backed by an entity (e.g. `PT_ON_LINE`'s `t`, `PARALLEL`'s
    /// hairy-ball disambiguator). Created lazily and stored on the
    /// constraint itself, matching `ConstraintBase::Generate` (§4.4).
    pub fn generate_params(&mut self, params: &mut ParamTable, owner: Owner, entities: &IdTable<HEntity, Entity>) {
        match &mut self.kind {
            ConstraintKind::PtOnLine { t, .. } => {
                if t.is_none() {
                    *t = Some(params.add(owner, 0.5));
                }
            }
            ConstraintKind::Parallel { a, axis, .. } => {
                if axis.is_none() {
                    let da = line_direction_exprs(entities, *a);
                    let v = (da.x.eval(params, &[]), da.y.eval(params, &[]), da.z.eval(params, &[]));
                    *axis = Some(params.add(owner, dominant_axis_index(v) as f64));
                }
            }
            _ => {}
        }
    }

    /// Symbolic equations that must all evaluate to zero when this
    /// constraint is satisfied. Empty for `COMMENT` and for any reference
    /// dimension (§4.4, §7).
    pub fn equations(&self, entities: &IdTable<HEntity, Entity>, params: &ParamTable) -> Vec<Expr> {
        if self.reference {
            return Vec::new();
        }
        match &self.kind {
            ConstraintKind::PointsCoincident { a, b } => {
                let pa = entities.expect(*a).point_get_exprs(entities);
                let pb = entities.expect(*b).point_get_exprs(entities);
                componentwise_in_workplane(self.workplane, entities, &pa.minus(&pb))
            }
            ConstraintKind::PtPtDistance { a, b, value } => {
                let pa = entities.expect(*a).point_get_exprs(entities);
                let pb = entities.expect(*b).point_get_exprs(entities);
                let d = pa.minus(&pb);
                vec![d.magnitude_squared().sub(Expr::constant(value * value))]
            }
            ConstraintKind::PtPlaneDistance { pt, plane, value } => {
                let (n, d) = entities.expect(*plane).workplane_plane_exprs(entities);
                let p = entities.expect(*pt).point_get_exprs(entities);
                vec![n.dot(&p).sub(d).sub(Expr::constant(*value))]
            }
            ConstraintKind::PtLineDistance { pt, line, value } => {
                vec![point_line_distance_expr(entities, *pt, *line, self.workplane).sub(Expr::constant(*value))]
            }
            ConstraintKind::PtInPlane { pt, plane } => {
                let (n, d) = entities.expect(*plane).workplane_plane_exprs(entities);
                let p = entities.expect(*pt).point_get_exprs(entities);
                vec![n.dot(&p).sub(d)]
            }
            ConstraintKind::PtOnLine { pt, line, t } => {
                let t = t.expect("PT_ON_LINE equations called before generate_params");
                let p = entities.expect(*pt).point_get_exprs(entities);
                let line_e = entities.expect(*line);
                let crate::entity::EntityKind::LineSegment { points } = line_e.kind() else {
                    panic!("PT_ON_LINE requires a line entity");
                };
                let a = entities.expect(points[0]).point_get_exprs(entities);
                let b = entities.expect(points[1]).point_get_exprs(entities);
                let param_pt = ExprVector::new(
                    a.x.clone().add(Expr::param(t).mul(b.x.sub(a.x))),
                    a.y.clone().add(Expr::param(t).mul(b.y.sub(a.y))),
                    a.z.clone().add(Expr::param(t).mul(b.z.sub(a.z))),
                );
                componentwise_in_workplane(self.workplane, entities, &p.minus(&param_pt))
            }
            ConstraintKind::EqualLengthLines { a, b } => {
                vec![line_length_squared(entities, *a).sub(line_length_squared(entities, *b))]
            }
            ConstraintKind::Symmetric { a, b, plane } => {
                // The midpoint of a,b lies on the plane, and (b - a) is
                // parallel to the plane's normal.
                let pa = entities.expect(*a).point_get_exprs(entities);
                let pb = entities.expect(*b).point_get_exprs(entities);
                let (n, d) = entities.expect(*plane).workplane_plane_exprs(entities);
                let mid = ExprVector::new(
                    pa.x.clone().add(pb.x.clone()).mul(Expr::constant(0.5)),
                    pa.y.clone().add(pb.y.clone()).mul(Expr::constant(0.5)),
                    pa.z.clone().add(pb.z.clone()).mul(Expr::constant(0.5)),
                );
                let on_plane = n.dot(&mid).sub(d);
                let diff = pb.minus(&pa);
                let cross = n.cross(&diff);
                vec![on_plane, cross.x, cross.y, cross.z]
            }
            ConstraintKind::AtMidpoint { pt, line } => {
                let line_e = entities.expect(*line);
                let crate::entity::EntityKind::LineSegment { points } = line_e.kind() else {
                    panic!("AT_MIDPOINT requires a line entity");
                };
                let a = entities.expect(points[0]).point_get_exprs(entities);
                let b = entities.expect(points[1]).point_get_exprs(entities);
                let mid = ExprVector::new(
                    a.x.clone().add(b.x.clone()).mul(Expr::constant(0.5)),
                    a.y.clone().add(b.y.clone()).mul(Expr::constant(0.5)),
                    a.z.clone().add(b.z.clone()).mul(Expr::constant(0.5)),
                );
                let p = entities.expect(*pt).point_get_exprs(entities);
                componentwise_in_workplane(self.workplane, entities, &p.minus(&mid))
            }
            ConstraintKind::Horizontal { line, workplane } => {
                let dir = line_direction_in_workplane(entities, *line, *workplane);
                vec![dir.1] // v-component (in-plane "y") is zero
            }
            ConstraintKind::Vertical { line, workplane } => {
                let dir = line_direction_in_workplane(entities, *line, *workplane);
                vec![dir.0] // u-component (in-plane "x") is zero
            }
            ConstraintKind::Diameter { circle, value } => {
                let r = circle_radius_expr(entities, *circle);
                vec![Expr::constant(2.0).mul(r).sub(Expr::constant(*value))]
            }
            ConstraintKind::PtOnCircle { pt, circle } => {
                let crate::entity::EntityKind::Circle { center, radius, .. } = entities.expect(*circle).kind() else {
                    panic!("PT_ON_CIRCLE requires a circle entity");
                };
                let p = entities.expect(*pt).point_get_exprs(entities);
                let c = entities.expect(*center).point_get_exprs(entities);
                let r = entities.expect(*radius).distance_get_expr();
                vec![p.minus(&c).magnitude_squared().sub(r.clone().mul(r))]
            }
            ConstraintKind::Angle { a, b, value_degrees, supplement } => {
                let da = line_direction_exprs(entities, *a);
                let db = line_direction_exprs(entities, *b);
                let cos_target = Expr::constant((value_degrees.to_radians()).cos());
                let dot = da.dot(&db);
                let mags = direction_magnitude_product_expr(&da, &db);
                let lhs = if *supplement { dot.negate() } else { dot };
                vec![lhs.sub(cos_target.mul(mags))]
            }
            ConstraintKind::Parallel { a, b, axis } => {
                let da = line_direction_exprs(entities, *a);
                let db = line_direction_exprs(entities, *b);
                let cross = da.cross(&db);
                // Three cross-product components are generically rank 2 (two
                // vectors pointing the same way is a codimension-2
                // condition), so emitting all three always reads as
                // REDUNDANT. Drop the component along whichever axis `a`'s
                // direction was most aligned with at constraint creation:
                // that's the one whose two small-magnitude terms make it the
                // ill-conditioned one of the three. No single choice of axis
                // works for every direction on the sphere (the hairy ball
                // theorem), hence the disambiguator is picked once and held
                // fixed rather than recomputed every solve.
                let axis = axis.expect("PARALLEL equations called before generate_params");
                match dominant_axis_index_f64(params.value(axis)) {
                    0 => vec![cross.y, cross.z],
                    1 => vec![cross.x, cross.z],
                    _ => vec![cross.x, cross.y],
                }
            }
            ConstraintKind::Perpendicular { a, b } => {
                let da = line_direction_exprs(entities, *a);
                let db = line_direction_exprs(entities, *b);
                vec![da.dot(&db)]
            }
            ConstraintKind::CurveCurveTangent { a, b, shared_point } => {
                let ta = curve_tangent_exprs(entities, *a, *shared_point);
                let tb = curve_tangent_exprs(entities, *b, *shared_point);
                let cross = ta.cross(&tb);
                vec![cross.x, cross.y, cross.z]
            }
            ConstraintKind::EqualRadius { a, b } => {
                let ra = circle_radius_expr(entities, *a);
                let rb = circle_radius_expr(entities, *b);
                vec![ra.sub(rb)]
            }
            ConstraintKind::WhereDragged { pt } => {
                let p = entities.expect(*pt).point_get_exprs(entities);
                let num = entities.expect(*pt).act_point();
                vec![
                    p.x.clone().sub(Expr::constant(num.x)),
                    p.y.clone().sub(Expr::constant(num.y)),
                    p.z.clone().sub(Expr::constant(num.z)),
                ]
            }
            ConstraintKind::Comment { .. } => Vec::new(),
        }
    }

    /// Adjusts a reference dimension's stored value to match current
    /// geometry (§4.4 `modify_to_satisfy`); used when the group has "all
    /// dimensions are reference" set, or on legacy-file upgrade.
    pub fn modify_to_satisfy(&mut self, entities: &IdTable<HEntity, Entity>, params: &mut ParamTable) {
        match &mut self.kind {
            ConstraintKind::PtPtDistance { a, b, value } => {
                let pa = entities.expect(*a).act_point();
                let pb = entities.expect(*b).act_point();
                *value = (pa - pb).magnitude();
            }
            ConstraintKind::Diameter { circle, value } => {
                let crate::entity::EntityKind::Circle { radius, .. } = entities.expect(*circle).kind() else {
                    return;
                };
                *value = 2.0 * entities.expect(*radius).act_distance();
            }
            ConstraintKind::PtOnLine { pt, line, t } => {
                let crate::entity::EntityKind::LineSegment { points } = entities.expect(*line).kind() else {
                    return;
                };
                let a = entities.expect(points[0]).act_point();
                let b = entities.expect(points[1]).act_point();
                let p = entities.expect(*pt).act_point();
                let ab = b - a;
                let denom = ab.magnitude2();
                let computed = if denom > 1e-12 { (p - a).dot(ab) / denom } else { 0.0 };
                if let Some(tp) = t {
                    if let Some(param) = params.get_mut(*tp) {
                        param.set_value(computed);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Index (0=x, 1=y, 2=z) of `v`'s largest-magnitude component.
fn dominant_axis_index(v: (f64, f64, f64)) -> u8 {
    let (ax, ay, az) = (v.0.abs(), v.1.abs(), v.2.abs());
    if ax >= ay && ax >= az { 0 } else if ay >= az { 1 } else { 2 }
}

fn dominant_axis_index_f64(stored: f64) -> u8 {
    stored.round().clamp(0.0, 2.0) as u8
}

fn componentwise_in_workplane(workplane: Option<HEntity>, entities: &IdTable<HEntity, Entity>, diff: &ExprVector) -> Vec<Expr> {
    match workplane {
        None => vec![diff.x.clone(), diff.y.clone(), diff.z.clone()],
        Some(wp) => {
            let wp_e = entities.expect(wp);
            let crate::entity::EntityKind::Workplane { normal, .. } = wp_e.kind() else {
                return vec![diff.x.clone(), diff.y.clone(), diff.z.clone()];
            };
            let n = entities.expect(*normal);
            let u = n.normal_u_exprs(entities);
            let v = n.normal_v_exprs(entities);
            vec![diff.dot(&u), diff.dot(&v)]
        }
    }
}

fn line_direction_exprs(entities: &IdTable<HEntity, Entity>, line: HEntity) -> ExprVector {
    let e = entities.expect(line);
    match e.kind() {
        crate::entity::EntityKind::LineSegment { points } => {
            let a = entities.expect(points[0]).point_get_exprs(entities);
            let b = entities.expect(points[1]).point_get_exprs(entities);
            b.minus(&a)
        }
        _ => panic!("line_direction_exprs requires a line entity"),
    }
}

fn line_direction_in_workplane(entities: &IdTable<HEntity, Entity>, line: HEntity, workplane: HEntity) -> (Expr, Expr) {
    let dir = line_direction_exprs(entities, line);
    let wp = entities.expect(workplane);
    let crate::entity::EntityKind::Workplane { normal, .. } = wp.kind() else {
        panic!("line_direction_in_workplane requires a workplane");
    };
    let n = entities.expect(*normal);
    let u = n.normal_u_exprs(entities);
    let v = n.normal_v_exprs(entities);
    (dir.dot(&u), dir.dot(&v))
}

fn line_length_squared(entities: &IdTable<HEntity, Entity>, line: HEntity) -> Expr {
    line_direction_exprs(entities, line).magnitude_squared()
}

fn point_line_distance_expr(entities: &IdTable<HEntity, Entity>, pt: HEntity, line: HEntity, workplane: Option<HEntity>) -> Expr {
    let p = entities.expect(pt).point_get_exprs(entities);
    let crate::entity::EntityKind::LineSegment { points } = entities.expect(line).kind() else {
        panic!("PT_LINE_DISTANCE requires a line entity");
    };
    let a = entities.expect(points[0]).point_get_exprs(entities);
    let b = entities.expect(points[1]).point_get_exprs(entities);
    let dir = b.minus(&a);
    let rel = p.minus(&a);
    match workplane {
        Some(_) => {
            // signed 2D perpendicular distance within the workplane
            let cross_z = dir.x.clone().mul(rel.y.clone()).sub(dir.y.clone().mul(rel.x.clone()));
            let len = dir.magnitude_squared().sqrt();
            cross_z.div(len)
        }
        None => {
            let cross = dir.cross(&rel);
            let len = dir.magnitude_squared().sqrt();
            cross.magnitude_squared().sqrt().div(len)
        }
    }
}

fn circle_radius_expr(entities: &IdTable<HEntity, Entity>, circle: HEntity) -> Expr {
    let crate::entity::EntityKind::Circle { radius, .. } = entities.expect(circle).kind() else {
        panic!("circle_radius_expr requires a circle entity");
    };
    entities.expect(*radius).distance_get_expr()
}

fn direction_magnitude_product_expr(a: &ExprVector, b: &ExprVector) -> Expr {
    a.magnitude_squared().sqrt().mul(b.magnitude_squared().sqrt())
}

/// Tangent direction of a curve entity at the point shared with another
/// curve (used by `CURVE_CURVE_TANGENT`); lines have a constant direction,
/// arcs a direction perpendicular to the radius at the shared point.
fn curve_tangent_exprs(entities: &IdTable<HEntity, Entity>, curve: HEntity, shared_point: HEntity) -> ExprVector {
    let e = entities.expect(curve);
    match e.kind() {
        crate::entity::EntityKind::LineSegment { .. } => line_direction_exprs(entities, curve),
        crate::entity::EntityKind::ArcOfCircle { center, normal, .. } => {
            let c = entities.expect(*center).point_get_exprs(entities);
            let p = entities.expect(shared_point).point_get_exprs(entities);
            let n = entities.expect(*normal).normal_n_exprs(entities);
            let radius_vec = p.minus(&c);
            n.cross(&radius_vec)
        }
        _ => panic!("curve_tangent_exprs requires a line or arc entity"),
    }
}

/// Adds a fresh constraint to `table`, auto-assigning the next sequential
/// handle. Constraints are numbered monotonically so equation handles stay
/// stable across regenerations when the sketch is unchanged (§5).
pub fn add_constraint(table: &mut IdTable<HConstraint, Constraint>, group: HGroup, workplane: Option<HEntity>, kind: ConstraintKind) -> HConstraint {
    table.add_sequential(|h| Constraint::new(h, group, workplane, kind))
}

use solvcad_base::cgmath64::InnerSpace;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{add_entity, EntityKind};
    use solvcad_ids::HGroup;

    fn setup_square() -> (IdTable<HEntity, Entity>, ParamTable, [HEntity; 4]) {
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        let owner = Owner::Group(HGroup::from_index(1));
        let g = HGroup::from_index(1);
        // Pure-3D points: equations tested here don't need a workplane.
        let mk3 = |entities: &mut IdTable<HEntity, Entity>, params: &mut ParamTable, x: f64, y: f64| {
            let px = params.add(owner, x);
            let py = params.add(owner, y);
            let pz = params.add(owner, 0.0);
            add_entity(entities, owner, g, None, EntityKind::PointIn3d { params: [px, py, pz] })
        };
        let a = mk3(&mut entities, &mut params, 0.0, 0.0);
        let b = mk3(&mut entities, &mut params, 1.0, 0.0);
        let c = mk3(&mut entities, &mut params, 1.0, 1.0);
        let d = mk3(&mut entities, &mut params, 0.0, 1.0);
        (entities, params, [a, b, c, d])
    }

    #[test]
    fn points_coincident_generates_zero_residual_when_equal() {
        let (entities, params, pts) = setup_square();
        let mut table = IdTable::new();
        let h = add_constraint(&mut table, HGroup::from_index(1), None, ConstraintKind::PointsCoincident { a: pts[0], b: pts[0] });
        let c = table.find(h).unwrap();
        for e in c.equations(&entities, &params) {
            assert_eq!(e.eval(&params, &[]), 0.0);
        }
    }

    #[test]
    fn pt_pt_distance_residual_matches_expected_length() {
        let (entities, params, pts) = setup_square();
        let mut table = IdTable::new();
        let h = add_constraint(&mut table, HGroup::from_index(1), None, ConstraintKind::PtPtDistance { a: pts[0], b: pts[1], value: 1.0 });
        let c = table.find(h).unwrap();
        let eqs = c.equations(&entities, &params);
        assert_eq!(eqs.len(), 1);
        assert!(eqs[0].eval(&params, &[]).abs() < 1e-12);
    }

    #[test]
    fn reference_constraint_contributes_no_equations() {
        let (entities, params, pts) = setup_square();
        let mut table = IdTable::new();
        let h = add_constraint(&mut table, HGroup::from_index(1), None, ConstraintKind::PtPtDistance { a: pts[0], b: pts[1], value: 5.0 });
        let c = table.find_mut(h).unwrap();
        c.set_reference(true);
        assert!(c.equations(&entities, &params).is_empty());
    }

    #[test]
    fn comment_has_no_equations() {
        let (entities, params, _pts) = setup_square();
        let mut table = IdTable::new();
        let h = add_constraint(&mut table, HGroup::from_index(1), None, ConstraintKind::Comment { text: "note".into() });
        assert!(table.find(h).unwrap().equations(&entities, &params).is_empty());
    }

    #[test]
    fn parallel_emits_two_well_conditioned_equations() {
        // a: (0,0)->(1,0) (horizontal), b: (0,1)->(2,1) (also horizontal,
        // already parallel). Two equations, both already zero, and not the
        // degenerate all-three-components form that the solver would flag
        // as rank-deficient.
        let (mut entities, mut params, pts) = setup_square();
        let owner = Owner::Group(HGroup::from_index(1));
        let g = HGroup::from_index(1);
        let line_a = add_entity(&mut entities, owner, g, None, EntityKind::LineSegment { points: [pts[0], pts[1]] });
        let e1 = {
            let px = params.add(owner, 0.0);
            let py = params.add(owner, 1.0);
            let pz = params.add(owner, 0.0);
            add_entity(&mut entities, owner, g, None, EntityKind::PointIn3d { params: [px, py, pz] })
        };
        let e2 = {
            let px = params.add(owner, 2.0);
            let py = params.add(owner, 1.0);
            let pz = params.add(owner, 0.0);
            add_entity(&mut entities, owner, g, None, EntityKind::PointIn3d { params: [px, py, pz] })
        };
        let line_b = add_entity(&mut entities, owner, g, None, EntityKind::LineSegment { points: [e1, e2] });

        let mut table = IdTable::new();
        let h = add_constraint(&mut table, g, None, ConstraintKind::Parallel { a: line_a, b: line_b, axis: None });
        let c = table.find_mut(h).unwrap();
        c.generate_params(&mut params, owner, &entities);
        let eqs = c.equations(&entities, &params);
        assert_eq!(eqs.len(), 2);
        for e in eqs {
            assert!(e.eval(&params, &[]).abs() < 1e-9);
        }
    }
}
