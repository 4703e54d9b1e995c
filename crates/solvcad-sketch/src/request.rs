//! A user's request for one primitive: "draw a line here", "draw a circle
//! there" (`spec.md` §3.2). Grounded on
//! `examples/original_source/src/request.h`.
//!
//! A [`Request`] carries no geometry itself; [`Request::generate`] is the
//! one-shot translator from request to the param/entity rows that back it,
//! called once per regeneration (§4.2) before any group's constraints run.

use solvcad_ids::{HEntity, HParam, HRequest, IdTable, Owner};

use crate::entity::{add_entity, Entity, EntityKind};
use crate::param::ParamTable;
use crate::style::HStyleId;

/// Stable request type codes (§6.5), identical to the reference design.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u32)]
pub enum RequestTypeCode {
    Workplane = 100,
    DatumPoint = 101,
    LineSegment = 200,
    Cubic = 300,
    CubicPeriodic = 301,
    Circle = 400,
    ArcOfCircle = 500,
    TtfText = 600,
    Image = 700,
}

/// What kind of primitive a request draws, and any type-specific data that
/// isn't geometry (font, text, image path). Point/param counts per type
/// come straight from `request.h`'s `Generate`.
#[derive(Clone, Debug)]
pub enum RequestKind {
    /// A new workplane, anchored at a point-in-3d origin with a
    /// normal-in-3d orientation; generates those two child entities.
    Workplane,
    /// A single free point (2D if `workplane` is `Some`, else 3D).
    DatumPoint,
    LineSegment,
    /// `extra_points` interior control points beyond the 2 endpoints
    /// (request.h's `extraPoints`); 0 for a plain cubic, up to 2 for the
    /// SolveSpace UI's click-to-extend cubic tool.
    Cubic { extra_points: u32 },
    CubicPeriodic { extra_points: u32 },
    Circle,
    ArcOfCircle,
    TtfText { text: String, font: String },
    Image { file: String },
}

/// One user-level request for a primitive (§3.2).
#[derive(Clone, Debug)]
pub struct Request {
    handle: HRequest,
    kind: RequestKind,
    /// `None` means `FREE_IN_3D`.
    workplane: Option<HEntity>,
    group: solvcad_ids::HGroup,
    style: Option<HStyleId>,
    construction: bool,
}

impl Request {
    pub fn new(handle: HRequest, group: solvcad_ids::HGroup, workplane: Option<HEntity>, kind: RequestKind) -> Self {
        Request { handle, kind, workplane, group, style: None, construction: false }
    }

    pub fn handle(&self) -> HRequest { self.handle }
    pub fn kind(&self) -> &RequestKind { &self.kind }
    pub fn workplane(&self) -> Option<HEntity> { self.workplane }
    pub fn group(&self) -> solvcad_ids::HGroup { self.group }
    pub fn construction(&self) -> bool { self.construction }
    pub fn set_construction(&mut self, c: bool) { self.construction = c; }
    pub fn style(&self) -> Option<HStyleId> { self.style }
    pub fn set_style(&mut self, s: Option<HStyleId>) { self.style = s; }

    pub fn type_code(&self) -> RequestTypeCode {
        match &self.kind {
            RequestKind::Workplane => RequestTypeCode::Workplane,
            RequestKind::DatumPoint => RequestTypeCode::DatumPoint,
            RequestKind::LineSegment => RequestTypeCode::LineSegment,
            RequestKind::Cubic { .. } => RequestTypeCode::Cubic,
            RequestKind::CubicPeriodic { .. } => RequestTypeCode::CubicPeriodic,
            RequestKind::Circle => RequestTypeCode::Circle,
            RequestKind::ArcOfCircle => RequestTypeCode::ArcOfCircle,
            RequestKind::TtfText { .. } => RequestTypeCode::TtfText,
            RequestKind::Image { .. } => RequestTypeCode::Image,
        }
    }

    /// Number of points this request's `Generate` creates, not counting the
    /// normal/origin of a workplane (request.h's `IndexOfPoint` table).
    pub fn point_count(&self) -> u32 {
        match &self.kind {
            RequestKind::Workplane => 1,
            RequestKind::DatumPoint => 1,
            RequestKind::LineSegment => 2,
            RequestKind::Cubic { extra_points } | RequestKind::CubicPeriodic { extra_points } => 4 + extra_points,
            RequestKind::Circle => 1,
            RequestKind::ArcOfCircle => 3,
            RequestKind::TtfText | RequestKind::Image => 1,
        }
    }

    /// Creates this request's params and entities (§4.2 step 1: "generate
    /// requests"). Matches `Request::Generate`'s point/normal/distance
    /// construction order so exported `.slvs` point indices stay stable.
    pub fn generate(&self, entities: &mut IdTable<HEntity, Entity>, params: &mut ParamTable, initial: &RequestInitialGeometry) {
        let owner = Owner::Request(self.handle);
        match &self.kind {
            RequestKind::Workplane => {
                let origin = new_point(entities, params, owner, self.group, None, initial.points.first().copied().unwrap_or_default());
                let normal = new_normal_3d(entities, params, owner, self.group, initial.normal_wxyz.unwrap_or((1.0, 0.0, 0.0, 0.0)));
                add_entity(entities, owner, self.group, None, EntityKind::Workplane { origin, normal });
            }
            RequestKind::DatumPoint => {
                let p = initial.points.first().copied().unwrap_or_default();
                new_point(entities, params, owner, self.group, self.workplane, p);
            }
            RequestKind::LineSegment => {
                let a = new_point(entities, params, owner, self.group, self.workplane, initial.points.first().copied().unwrap_or_default());
                let b = new_point(entities, params, owner, self.group, self.workplane, initial.points.get(1).copied().unwrap_or_default());
                add_entity(entities, owner, self.group, self.workplane, EntityKind::LineSegment { points: [a, b] });
            }
            RequestKind::Cubic { .. } | RequestKind::CubicPeriodic { .. } => {
                let periodic = matches!(self.kind, RequestKind::CubicPeriodic { .. });
                let mut ctrl = [HEntity(0); 4];
                for (i, slot) in ctrl.iter_mut().enumerate() {
                    *slot = new_point(entities, params, owner, self.group, self.workplane, initial.points.get(i).copied().unwrap_or_default());
                }
                add_entity(entities, owner, self.group, self.workplane, EntityKind::Cubic { control: ctrl, weights: None, periodic });
            }
            RequestKind::Circle => {
                let center = new_point(entities, params, owner, self.group, self.workplane, initial.points.first().copied().unwrap_or_default());
                let normal = match self.workplane {
                    Some(wp) => add_entity(entities, owner, self.group, self.workplane, EntityKind::NormalIn2d { workplane: wp }),
                    None => new_normal_3d(entities, params, owner, self.group, initial.normal_wxyz.unwrap_or((1.0, 0.0, 0.0, 0.0))),
                };
                let radius = new_distance(entities, params, owner, self.group, initial.radius.unwrap_or(1.0));
                add_entity(entities, owner, self.group, self.workplane, EntityKind::Circle { center, normal, radius });
            }
            RequestKind::ArcOfCircle => {
                let center = new_point(entities, params, owner, self.group, self.workplane, initial.points.first().copied().unwrap_or_default());
                let start = new_point(entities, params, owner, self.group, self.workplane, initial.points.get(1).copied().unwrap_or_default());
                let end = new_point(entities, params, owner, self.group, self.workplane, initial.points.get(2).copied().unwrap_or_default());
                let normal = match self.workplane {
                    Some(wp) => add_entity(entities, owner, self.group, self.workplane, EntityKind::NormalIn2d { workplane: wp }),
                    None => new_normal_3d(entities, params, owner, self.group, initial.normal_wxyz.unwrap_or((1.0, 0.0, 0.0, 0.0))),
                };
                add_entity(entities, owner, self.group, self.workplane, EntityKind::ArcOfCircle { center, normal, start, end });
            }
            RequestKind::TtfText { text, font } => {
                let origin = new_point(entities, params, owner, self.group, self.workplane, initial.points.first().copied().unwrap_or_default());
                let normal = match self.workplane {
                    Some(wp) => add_entity(entities, owner, self.group, self.workplane, EntityKind::NormalIn2d { workplane: wp }),
                    None => new_normal_3d(entities, params, owner, self.group, initial.normal_wxyz.unwrap_or((1.0, 0.0, 0.0, 0.0))),
                };
                add_entity(entities, owner, self.group, self.workplane, EntityKind::TtfText { origin, normal, text: text.clone(), font: font.clone() });
            }
            RequestKind::Image { file } => {
                let origin = new_point(entities, params, owner, self.group, self.workplane, initial.points.first().copied().unwrap_or_default());
                let normal = match self.workplane {
                    Some(wp) => add_entity(entities, owner, self.group, self.workplane, EntityKind::NormalIn2d { workplane: wp }),
                    None => new_normal_3d(entities, params, owner, self.group, initial.normal_wxyz.unwrap_or((1.0, 0.0, 0.0, 0.0))),
                };
                add_entity(entities, owner, self.group, self.workplane, EntityKind::Image { origin, normal, file: file.clone() });
            }
        }
    }
}

/// Numeric seed data a caller supplies for a request's points/normal/radius
/// before the solver has ever run, e.g. where the user clicked. Mirrors
/// `Request::Generate`'s defaults of "wherever the UI placed it".
#[derive(Clone, Debug, Default)]
pub struct RequestInitialGeometry {
    pub points: Vec<(f64, f64, f64)>,
    pub normal_wxyz: Option<(f64, f64, f64, f64)>,
    pub radius: Option<f64>,
}

fn new_point(
    entities: &mut IdTable<HEntity, Entity>,
    params: &mut ParamTable,
    owner: Owner,
    group: solvcad_ids::HGroup,
    workplane: Option<HEntity>,
    (x, y, z): (f64, f64, f64),
) -> HEntity {
    match workplane {
        Some(wp) => {
            let u = params.add(owner, x);
            let v = params.add(owner, y);
            add_entity(entities, owner, group, Some(wp), EntityKind::PointIn2d { workplane: wp, params: [u, v] })
        }
        None => {
            let px = params.add(owner, x);
            let py = params.add(owner, y);
            let pz = params.add(owner, z);
            add_entity(entities, owner, group, None, EntityKind::PointIn3d { params: [px, py, pz] })
        }
    }
}

fn new_normal_3d(
    entities: &mut IdTable<HEntity, Entity>,
    params: &mut ParamTable,
    owner: Owner,
    group: solvcad_ids::HGroup,
    (w, x, y, z): (f64, f64, f64, f64),
) -> HEntity {
    let pw: HParam = params.add(owner, w);
    let px = params.add(owner, x);
    let py = params.add(owner, y);
    let pz = params.add(owner, z);
    add_entity(entities, owner, group, None, EntityKind::NormalIn3d { params: [pw, px, py, pz] })
}

fn new_distance(entities: &mut IdTable<HEntity, Entity>, params: &mut ParamTable, owner: Owner, group: solvcad_ids::HGroup, value: f64) -> HEntity {
    let p = params.add(owner, value);
    add_entity(entities, owner, group, None, EntityKind::Distance { param: p })
}

/// Adds a fresh request to `table` under the next sequential [`HRequest`]
/// index (parallel to [`solvcad_ids::HGroup`]'s reserved-then-sequential
/// numbering: indices 1-3 are reserved for the `XY`/`YZ`/`ZX` reference
/// planes' generating requests).
pub fn add_request(table: &mut IdTable<HRequest, Request>, next_index: &mut u16, group: solvcad_ids::HGroup, workplane: Option<HEntity>, kind: RequestKind) -> HRequest {
    let h = HRequest::from_index(*next_index);
    *next_index += 1;
    table.add_and_keep_handle(h, Request::new(h, group, workplane, kind));
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_segment_generates_two_points_and_one_entity() {
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        let mut table = IdTable::new();
        let mut next = 4u16;
        let h = add_request(&mut table, &mut next, solvcad_ids::HGroup::from_index(4), None, RequestKind::LineSegment);
        let req = table.find(h).unwrap();
        let initial = RequestInitialGeometry {
            points: vec![(0.0, 0.0, 0.0), (1.0, 0.0, 0.0)],
            ..Default::default()
        };
        req.generate(&mut entities, &mut params, &initial);
        assert_eq!(entities.len(), 3); // 2 points + 1 line
        assert_eq!(params.len(), 6); // 3 coords each
    }

    #[test]
    fn circle_generates_center_normal_radius_and_entity() {
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        let mut table = IdTable::new();
        let mut next = 4u16;
        let h = add_request(&mut table, &mut next, solvcad_ids::HGroup::from_index(4), None, RequestKind::Circle);
        let req = table.find(h).unwrap();
        let initial = RequestInitialGeometry {
            points: vec![(0.0, 0.0, 0.0)],
            radius: Some(2.0),
            ..Default::default()
        };
        req.generate(&mut entities, &mut params, &initial);
        assert_eq!(entities.len(), 4); // point + normal + distance + circle
    }
}
