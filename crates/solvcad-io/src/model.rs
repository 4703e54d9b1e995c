//! Bidirectional conversion between [`solvcad_sketch::Sketch`] and the
//! `.slvs` record grammar (`record.rs`).
//!
//! What gets persisted, and what doesn't: a group's/request's/constraint's/
//! style's *declared* data round-trips exactly. A request's generated
//! entities and a param's *solved* value do not get their own records;
//! they're pure derived cache that [`solvcad_sketch::Sketch::regenerate`]
//! rebuilds deterministically from declared data (same requests in the same
//! order always mint the same [`solvcad_ids::HEntity`]/[`solvcad_ids::HParam`]
//! handles, since those are a pure function of owner + per-owner sequence,
//! per `solvcad-ids`'s bit-packing). A request does carry its *seed*
//! geometry (`initPointN`/`initNormal`/`initRadius`), since that's the one
//! piece of "solved" state a fully- or under-constrained sketch can't
//! re-derive from constraints alone — it's exactly
//! `examples/original_source/src/file.cpp`'s `SAVED_PARAM` table, reshaped
//! around this crate's request-indexed seed rather than a flat param list.
//!
//! Entity and Param records from the reference design are therefore not
//! reproduced here; see `DESIGN.md` for this as a recorded Open Question
//! decision.

use solvcad_ids::{HConstraint, HEntity, HGroup, HParam, HRequest, HStyle, Owner};
use solvcad_sketch::constraint::{Constraint, ConstraintKind, ConstraintTypeCode};
use solvcad_sketch::group::{BooleanOp, Group, GroupKind, RemapKind};
use solvcad_sketch::request::{Request, RequestInitialGeometry, RequestKind, RequestTypeCode};
use solvcad_sketch::style::Style;
use solvcad_sketch::Sketch;

use crate::record::{record, Document, RawRecord, RecordBuilder};
use crate::IoError;

/// Numeric codes for [`GroupKind`]'s variants. Not part of the reference
/// design (whose `Group::Type`/`Group::Subtype` split doesn't cover
/// `Helix`); assigned here since every other type code in this crate is
/// grounded on `spec.md` §6.5 and group kinds have no such table there.
fn group_kind_code(kind: &GroupKind) -> u32 {
    match kind {
        GroupKind::Drawing3d => 0,
        GroupKind::DrawingWorkplane { .. } => 1,
        GroupKind::Extrude { .. } => 2,
        GroupKind::Revolve { .. } => 3,
        GroupKind::Lathe { .. } => 4,
        GroupKind::Helix { .. } => 5,
        GroupKind::Translate { .. } => 6,
        GroupKind::Rotate { .. } => 7,
        GroupKind::Linked { .. } => 8,
    }
}

fn boolean_op_code(op: BooleanOp) -> u32 {
    match op {
        BooleanOp::None => 0,
        BooleanOp::Union => 1,
        BooleanOp::Difference => 2,
        BooleanOp::Intersection => 3,
    }
}

fn boolean_op_from_code(code: u32) -> BooleanOp {
    match code {
        1 => BooleanOp::Union,
        2 => BooleanOp::Difference,
        3 => BooleanOp::Intersection,
        _ => BooleanOp::None,
    }
}

/// Copy-number sentinels for [`RemapKind`] (§3.4), matching the reference
/// design's `sketch.h` enum (`REMAP_LAST = 1000` has no analog here since
/// this crate never emits a generic numbered copy, only named derivations).
fn remap_kind_code(kind: RemapKind) -> u32 {
    match kind {
        RemapKind::Top => 1001,
        RemapKind::Bottom => 1002,
        RemapKind::PtToLine => 1003,
        RemapKind::LineToFace => 1004,
        RemapKind::LatheStart => 1006,
        RemapKind::LatheEnd => 1007,
        RemapKind::PtToArc => 1008,
        RemapKind::PtToNormal => 1009,
    }
}

fn remap_kind_from_code(code: u32) -> Option<RemapKind> {
    match code {
        1001 => Some(RemapKind::Top),
        1002 => Some(RemapKind::Bottom),
        1003 => Some(RemapKind::PtToLine),
        1004 => Some(RemapKind::LineToFace),
        1006 => Some(RemapKind::LatheStart),
        1007 => Some(RemapKind::LatheEnd),
        1008 => Some(RemapKind::PtToArc),
        1009 => Some(RemapKind::PtToNormal),
        _ => None,
    }
}

fn group_record(group: &Group, order: u32) -> RawRecord {
    let mut b = RecordBuilder::new("Group")
        .hex("h", group.handle().0)
        .u32("kind", group_kind_code(group.kind()))
        .u32("order", order)
        .u32("combine", boolean_op_code(group.combine()))
        .bool_always("visible", group.visible())
        .bool("suppress", group.suppress());
    b = match group.kind() {
        GroupKind::Drawing3d => b,
        GroupKind::DrawingWorkplane { workplane } => b.hex("workplane", workplane.0),
        GroupKind::Extrude { profile_group, distance, symmetric } => {
            b.hex("profileGroup", profile_group.0).hex("distance", distance.0).bool("symmetric", *symmetric)
        }
        GroupKind::Revolve { profile_group, axis_origin, axis_normal, angle } => b
            .hex("profileGroup", profile_group.0)
            .hex("axisOrigin", axis_origin.0)
            .hex("axisNormal", axis_normal.0)
            .hex("angle", angle.0),
        GroupKind::Lathe { profile_group, axis_origin, axis_normal } => {
            b.hex("profileGroup", profile_group.0).hex("axisOrigin", axis_origin.0).hex("axisNormal", axis_normal.0)
        }
        GroupKind::Helix { profile_group, axis_origin, axis_normal, pitch, turns, steps } => b
            .hex("profileGroup", profile_group.0)
            .hex("axisOrigin", axis_origin.0)
            .hex("axisNormal", axis_normal.0)
            .hex("pitch", pitch.0)
            .hex("turns", turns.0)
            .u32("steps", *steps as u32),
        GroupKind::Translate { offset, copies } => {
            b.hex("offsetX", offset[0].0).hex("offsetY", offset[1].0).hex("offsetZ", offset[2].0).u32("copies", *copies)
        }
        GroupKind::Rotate { axis_origin, axis_normal, angle, copies } => {
            b.hex("axisOrigin", axis_origin.0).hex("axisNormal", axis_normal.0).hex("angle", angle.0).u32("copies", *copies)
        }
        GroupKind::Linked { path } => b.string("path", path),
    };
    let mut remap_entries: Vec<(HEntity, RemapKind, HEntity)> = group.remap_iter().collect();
    remap_entries.sort_by_key(|&(source, kind, target)| (target.local(), source.0, remap_kind_code(kind)));
    let remap_lines: Vec<String> = remap_entries
        .into_iter()
        .map(|(source, kind, target)| format!("{} {:08x} {}", target.local(), source.0, remap_kind_code(kind)))
        .collect();
    b = b.block("remap", remap_lines);
    record(b)
}

/// A group record's fields, decoded but not yet inserted into a [`Sketch`].
struct GroupFields {
    handle: HGroup,
    kind: GroupKind,
    order: u32,
    combine: BooleanOp,
    visible: bool,
    suppress: bool,
    /// `(destination local id, source hEntity, copy-number sentinel)`, one
    /// per line of the `M` block (§6.2), reconstructed into the group's
    /// remap table once its handle is known.
    remap: Vec<(u16, u32, u32)>,
}

fn group_from_record(r: &RawRecord) -> Result<GroupFields, IoError> {
    let handle = HGroup(r.get_hex("h")?);
    let order = r.get_u32_or("order", 0);
    let kind = match r.get_u32("kind")? {
        0 => GroupKind::Drawing3d,
        1 => GroupKind::DrawingWorkplane { workplane: HEntity(r.get_hex("workplane")?) },
        2 => GroupKind::Extrude {
            profile_group: HGroup(r.get_hex("profileGroup")?),
            distance: HParam(r.get_hex("distance")?),
            symmetric: r.get_bool("symmetric"),
        },
        3 => GroupKind::Revolve {
            profile_group: HGroup(r.get_hex("profileGroup")?),
            axis_origin: HEntity(r.get_hex("axisOrigin")?),
            axis_normal: HEntity(r.get_hex("axisNormal")?),
            angle: HParam(r.get_hex("angle")?),
        },
        4 => GroupKind::Lathe {
            profile_group: HGroup(r.get_hex("profileGroup")?),
            axis_origin: HEntity(r.get_hex("axisOrigin")?),
            axis_normal: HEntity(r.get_hex("axisNormal")?),
        },
        5 => GroupKind::Helix {
            profile_group: HGroup(r.get_hex("profileGroup")?),
            axis_origin: HEntity(r.get_hex("axisOrigin")?),
            axis_normal: HEntity(r.get_hex("axisNormal")?),
            pitch: HParam(r.get_hex("pitch")?),
            turns: HParam(r.get_hex("turns")?),
            steps: r.get_u32_or("steps", 1) as usize,
        },
        6 => GroupKind::Translate {
            offset: [HParam(r.get_hex("offsetX")?), HParam(r.get_hex("offsetY")?), HParam(r.get_hex("offsetZ")?)],
            copies: r.get_u32_or("copies", 1),
        },
        7 => GroupKind::Rotate {
            axis_origin: HEntity(r.get_hex("axisOrigin")?),
            axis_normal: HEntity(r.get_hex("axisNormal")?),
            angle: HParam(r.get_hex("angle")?),
            copies: r.get_u32_or("copies", 1),
        },
        8 => GroupKind::Linked { path: r.get_string("path") },
        other => return Err(IoError::UnknownTypeCode("Group".to_string(), other)),
    };
    let remap = r
        .get_block("remap")
        .iter()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let target_local: u16 = parts.next()?.parse().ok()?;
            let source_hex = u32::from_str_radix(parts.next()?, 16).ok()?;
            let code: u32 = parts.next()?.parse().ok()?;
            Some((target_local, source_hex, code))
        })
        .collect();
    Ok(GroupFields {
        handle,
        kind,
        order,
        combine: boolean_op_from_code(r.get_u32_or("combine", 0)),
        visible: r.get("visible").map(|_| r.get_bool("visible")).unwrap_or(true),
        suppress: r.get_bool("suppress"),
        remap,
    })
}

fn request_record(request: &Request, initial: &RequestInitialGeometry) -> RawRecord {
    let mut b = RecordBuilder::new("Request")
        .hex("h", request.handle().0)
        .u32("type", request.type_code() as u32)
        .hex("workplane", request.workplane().map(|w| w.0).unwrap_or(0))
        .hex("group", request.group().0)
        .bool("construction", request.construction())
        .hex("style", request.style().map(|s| s.0).unwrap_or(0));
    if let RequestKind::Cubic { extra_points } | RequestKind::CubicPeriodic { extra_points } = request.kind() {
        b = b.u32("extraPoints", *extra_points);
    }
    match request.kind() {
        RequestKind::TtfText { text, font } => {
            b = b.string("str", text).string("font", font);
        }
        RequestKind::Image { file } => {
            b = b.string("file", file);
        }
        _ => {}
    }
    for (i, &(x, y, z)) in initial.points.iter().enumerate() {
        b = b.f64(&format!("initPoint{i}.x"), x).f64(&format!("initPoint{i}.y"), y).f64(&format!("initPoint{i}.z"), z);
    }
    if let Some((w, x, y, z)) = initial.normal_wxyz {
        b = b.f64("initNormal.w", w).f64("initNormal.x", x).f64("initNormal.y", y).f64("initNormal.z", z);
    }
    if let Some(radius) = initial.radius {
        b = b.f64("initRadius", radius);
    }
    record(b)
}

fn request_from_record(r: &RawRecord) -> Result<(HRequest, Request, RequestInitialGeometry), IoError> {
    let handle = HRequest(r.get_hex("h")?);
    let group = HGroup(r.get_hex("group")?);
    let workplane = r.get_hex_opt("workplane").filter(|&v| v != 0).map(HEntity);
    let extra_points = r.get_u32_or("extraPoints", 0);
    let type_code = r.get_u32("type")?;
    let kind = match type_code {
        c if c == RequestTypeCode::Workplane as u32 => RequestKind::Workplane,
        c if c == RequestTypeCode::DatumPoint as u32 => RequestKind::DatumPoint,
        c if c == RequestTypeCode::LineSegment as u32 => RequestKind::LineSegment,
        c if c == RequestTypeCode::Cubic as u32 => RequestKind::Cubic { extra_points },
        c if c == RequestTypeCode::CubicPeriodic as u32 => RequestKind::CubicPeriodic { extra_points },
        c if c == RequestTypeCode::Circle as u32 => RequestKind::Circle,
        c if c == RequestTypeCode::ArcOfCircle as u32 => RequestKind::ArcOfCircle,
        c if c == RequestTypeCode::TtfText as u32 => RequestKind::TtfText { text: r.get_string("str"), font: r.get_string("font") },
        c if c == RequestTypeCode::Image as u32 => RequestKind::Image { file: r.get_string("file") },
        other => return Err(IoError::UnknownTypeCode("Request".to_string(), other)),
    };
    let mut request = Request::new(handle, group, workplane, kind);
    request.set_construction(r.get_bool("construction"));
    if let Some(style) = r.get_hex_opt("style").filter(|&v| v != 0) {
        request.set_style(Some(HStyle(style)));
    }

    let mut points = Vec::new();
    for i in 0.. {
        let key_x = format!("initPoint{i}.x");
        if r.get(&key_x).is_none() {
            break;
        }
        points.push((r.get_f64_or(&key_x, 0.0), r.get_f64_or(&format!("initPoint{i}.y"), 0.0), r.get_f64_or(&format!("initPoint{i}.z"), 0.0)));
    }
    let normal_wxyz = r
        .get("initNormal.w")
        .map(|_| (r.get_f64_or("initNormal.w", 1.0), r.get_f64_or("initNormal.x", 0.0), r.get_f64_or("initNormal.y", 0.0), r.get_f64_or("initNormal.z", 0.0)));
    let radius = r.get("initRadius").map(|_| r.get_f64_or("initRadius", 1.0));
    let initial = RequestInitialGeometry { points, normal_wxyz, radius };

    Ok((handle, request, initial))
}

/// The generic operand slots a constraint's equations read from, shared
/// across kinds the way `ConstraintBase`'s `ptA`/`ptB`/`entityA..D` are in
/// the reference design, but resolved to this crate's typed
/// [`ConstraintKind`] on load.
fn constraint_record(c: &Constraint) -> RawRecord {
    let mut b = RecordBuilder::new("Constraint")
        .hex("h", c.handle().0)
        .u32("type", c.type_code() as u32)
        .hex("group", c.group().0)
        .hex("workplane", c.workplane().map(|w| w.0).unwrap_or(0))
        .bool("reference", c.reference());
    b = match c.kind() {
        ConstraintKind::PointsCoincident { a, b: bb } => b.hex("ptA", a.0).hex("ptB", bb.0),
        ConstraintKind::PtPtDistance { a, b: bb, value } => b.hex("ptA", a.0).hex("ptB", bb.0).f64("valA", *value),
        ConstraintKind::PtPlaneDistance { pt, plane, value } => b.hex("ptA", pt.0).hex("entityA", plane.0).f64("valA", *value),
        ConstraintKind::PtLineDistance { pt, line, value } => b.hex("ptA", pt.0).hex("entityA", line.0).f64("valA", *value),
        ConstraintKind::PtInPlane { pt, plane } => b.hex("ptA", pt.0).hex("entityA", plane.0),
        ConstraintKind::PtOnLine { pt, line, t } => b.hex("ptA", pt.0).hex("entityA", line.0).hex("t", t.map(|p| p.0).unwrap_or(0)),
        ConstraintKind::EqualLengthLines { a, b: bb } => b.hex("entityA", a.0).hex("entityB", bb.0),
        ConstraintKind::Symmetric { a, b: bb, plane } => b.hex("ptA", a.0).hex("ptB", bb.0).hex("entityA", plane.0),
        ConstraintKind::AtMidpoint { pt, line } => b.hex("ptA", pt.0).hex("entityA", line.0),
        ConstraintKind::Horizontal { line, workplane } => b.hex("entityA", line.0).hex("entityB", workplane.0),
        ConstraintKind::Vertical { line, workplane } => b.hex("entityA", line.0).hex("entityB", workplane.0),
        ConstraintKind::Diameter { circle, value } => b.hex("entityA", circle.0).f64("valA", *value),
        ConstraintKind::PtOnCircle { pt, circle } => b.hex("ptA", pt.0).hex("entityA", circle.0),
        ConstraintKind::Angle { a, b: bb, value_degrees, supplement } => {
            b.hex("entityA", a.0).hex("entityB", bb.0).f64("valA", *value_degrees).bool("supplement", *supplement)
        }
        ConstraintKind::Parallel { a, b: bb, axis } => b.hex("entityA", a.0).hex("entityB", bb.0).hex("other", axis.map(|p| p.0).unwrap_or(0)),
        ConstraintKind::Perpendicular { a, b: bb } => b.hex("entityA", a.0).hex("entityB", bb.0),
        ConstraintKind::CurveCurveTangent { a, b: bb, shared_point } => b.hex("entityA", a.0).hex("entityB", bb.0).hex("ptA", shared_point.0),
        ConstraintKind::EqualRadius { a, b: bb } => b.hex("entityA", a.0).hex("entityB", bb.0),
        ConstraintKind::WhereDragged { pt } => b.hex("ptA", pt.0),
        ConstraintKind::Comment { text } => b.string("str", text),
    };
    record(b)
}

fn constraint_from_record(r: &RawRecord) -> Result<Constraint, IoError> {
    let handle = HConstraint(r.get_hex("h")?);
    let group = HGroup(r.get_hex("group")?);
    let workplane = r.get_hex_opt("workplane").filter(|&v| v != 0).map(HEntity);
    let pt_a = || HEntity(r.get_hex("ptA").unwrap_or(0));
    let pt_b = || HEntity(r.get_hex("ptB").unwrap_or(0));
    let entity_a = || HEntity(r.get_hex("entityA").unwrap_or(0));
    let entity_b = || HEntity(r.get_hex("entityB").unwrap_or(0));
    let val_a = || r.get_f64_or("valA", 0.0);

    let type_code = r.get_u32("type")?;
    let kind = match type_code {
        c if c == ConstraintTypeCode::PointsCoincident as u32 => ConstraintKind::PointsCoincident { a: pt_a(), b: pt_b() },
        c if c == ConstraintTypeCode::PtPtDistance as u32 => ConstraintKind::PtPtDistance { a: pt_a(), b: pt_b(), value: val_a() },
        c if c == ConstraintTypeCode::PtPlaneDistance as u32 => ConstraintKind::PtPlaneDistance { pt: pt_a(), plane: entity_a(), value: val_a() },
        c if c == ConstraintTypeCode::PtLineDistance as u32 => ConstraintKind::PtLineDistance { pt: pt_a(), line: entity_a(), value: val_a() },
        c if c == ConstraintTypeCode::PtInPlane as u32 => ConstraintKind::PtInPlane { pt: pt_a(), plane: entity_a() },
        c if c == ConstraintTypeCode::PtOnLine as u32 => {
            ConstraintKind::PtOnLine { pt: pt_a(), line: entity_a(), t: r.get_hex_opt("t").filter(|&v| v != 0).map(HParam) }
        }
        c if c == ConstraintTypeCode::EqualLengthLines as u32 => ConstraintKind::EqualLengthLines { a: entity_a(), b: entity_b() },
        c if c == ConstraintTypeCode::Symmetric as u32 => ConstraintKind::Symmetric { a: pt_a(), b: pt_b(), plane: entity_a() },
        c if c == ConstraintTypeCode::AtMidpoint as u32 => ConstraintKind::AtMidpoint { pt: pt_a(), line: entity_a() },
        c if c == ConstraintTypeCode::Horizontal as u32 => ConstraintKind::Horizontal { line: entity_a(), workplane: entity_b() },
        c if c == ConstraintTypeCode::Vertical as u32 => ConstraintKind::Vertical { line: entity_a(), workplane: entity_b() },
        c if c == ConstraintTypeCode::Diameter as u32 => ConstraintKind::Diameter { circle: entity_a(), value: val_a() },
        c if c == ConstraintTypeCode::PtOnCircle as u32 => ConstraintKind::PtOnCircle { pt: pt_a(), circle: entity_a() },
        c if c == ConstraintTypeCode::Angle as u32 => {
            ConstraintKind::Angle { a: entity_a(), b: entity_b(), value_degrees: val_a(), supplement: r.get_bool("supplement") }
        }
        c if c == ConstraintTypeCode::Parallel as u32 => {
            ConstraintKind::Parallel { a: entity_a(), b: entity_b(), axis: r.get_hex_opt("other").filter(|&v| v != 0).map(HParam) }
        }
        c if c == ConstraintTypeCode::Perpendicular as u32 => ConstraintKind::Perpendicular { a: entity_a(), b: entity_b() },
        c if c == ConstraintTypeCode::CurveCurveTangent as u32 => {
            ConstraintKind::CurveCurveTangent { a: entity_a(), b: entity_b(), shared_point: pt_a() }
        }
        c if c == ConstraintTypeCode::EqualRadius as u32 => ConstraintKind::EqualRadius { a: entity_a(), b: entity_b() },
        c if c == ConstraintTypeCode::WhereDragged as u32 => ConstraintKind::WhereDragged { pt: pt_a() },
        c if c == ConstraintTypeCode::Comment as u32 => ConstraintKind::Comment { text: r.get_string("str") },
        other => return Err(IoError::UnknownTypeCode("Constraint".to_string(), other)),
    };
    let mut constraint = Constraint::new(handle, group, workplane, kind);
    constraint.set_reference(r.get_bool("reference"));
    Ok(constraint)
}

fn style_record(s: &Style) -> RawRecord {
    record(
        RecordBuilder::new("Style")
            .hex("h", s.handle.0)
            .hex("color", s.color_rgba)
            .f64("lineWidth", s.line_width)
            .bool("dashed", s.dashed),
    )
}

fn style_from_record(r: &RawRecord) -> Result<Style, IoError> {
    let handle = HStyle(r.get_hex("h")?);
    let mut style = Style::new(handle, r.get_hex_opt("color").unwrap_or(0));
    style.line_width = r.get_f64_or("lineWidth", 1.0);
    style.dashed = r.get_bool("dashed");
    Ok(style)
}

/// Flattens a [`Sketch`] into a parsed [`Document`], in the same order the
/// sketch stores its tables so handle allocation on reload is deterministic.
pub fn sketch_to_document(sketch: &Sketch) -> Document {
    let mut doc = Document::default();
    for (i, &gh) in sketch.group_order.iter().enumerate() {
        let group = sketch.tables.groups.expect(gh);
        doc.groups.push(group_record(group, i as u32));
    }
    for (h, request) in sketch.tables.requests.iter() {
        let initial = sketch.request_initial(*h).cloned().unwrap_or_default();
        doc.requests.push(request_record(request, &initial));
    }
    for (_, c) in sketch.tables.constraints.iter() {
        doc.constraints.push(constraint_record(c));
    }
    for (_, s) in sketch.tables.styles.iter() {
        doc.styles.push(style_record(s));
    }
    doc
}

/// Rebuilds a [`Sketch`] from a parsed [`Document`]. The returned sketch has
/// not been regenerated; call [`Sketch::regenerate`] to materialize entities,
/// params, and solids before reading any derived geometry.
pub fn document_to_sketch(doc: &Document) -> Result<Sketch, IoError> {
    let mut sketch = Sketch::new();

    let mut groups: Vec<GroupFields> = doc.groups.iter().map(group_from_record).collect::<Result<_, _>>()?;
    groups.sort_by_key(|g| g.order);
    for g in groups {
        let handle = g.handle;
        sketch.add_group(handle, g.kind);
        let group = sketch.tables.groups.find_mut(handle).expect("just inserted");
        group.set_combine(g.combine);
        group.set_visible(g.visible);
        group.set_suppress(g.suppress);
        for (target_local, source_hex, code) in g.remap {
            if let Some(kind) = remap_kind_from_code(code) {
                group.remap_set(HEntity(source_hex), kind, HEntity::new(Owner::Group(handle), target_local));
            }
        }
    }

    for r in &doc.requests {
        let (handle, request, initial) = request_from_record(r)?;
        sketch.add_request_with_handle(handle, request, initial);
    }

    for r in &doc.constraints {
        let constraint = constraint_from_record(r)?;
        sketch.tables.constraints.add_and_keep_handle(constraint.handle(), constraint);
    }

    for r in &doc.styles {
        let style = style_from_record(r)?;
        sketch.tables.styles.add_and_keep_handle(style.handle, style);
    }

    Ok(sketch)
}
