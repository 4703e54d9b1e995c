//! Regeneration groups: sketch planes, sweeps, and step-and-repeats that
//! turn a flat bag of constrained entities into solids (`spec.md` §3.2,
//! §4.6). Grounded on the group-combine flow of
//! `examples/original_source/src/groupmesh.cpp` and built on top of
//! `solvcad-modeling::builder`'s sweep primitives and
//! `solvcad-shapeops`'s solid boolean operators.

use std::collections::HashMap;

use solvcad_base::cgmath64::{InnerSpace, Quaternion};
use solvcad_ids::{HEntity, HGroup, HParam, IdTable, Owner};
use solvcad_modeling::{builder, Edge, Face, Point3, Rad, Shell, Solid, Vector3, Vertex, Wire};
use solvcad_shapeops::{and, or};

use crate::entity::{add_entity, Entity, EntityKind};
use crate::param::ParamTable;

/// How a group's freshly-swept solid combines with the running assembly
/// produced by all earlier groups (SolveSpace's per-group "combine as").
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum BooleanOp {
    /// The new solid is kept standalone; nothing is combined.
    #[default]
    None,
    /// Union with the running assembly.
    Union,
    /// Subtract the new solid from the running assembly.
    Difference,
    /// Intersect the new solid with the running assembly.
    Intersection,
}

/// What a group's regeneration does (§3.2, §4.6).
#[derive(Clone, Debug)]
pub enum GroupKind {
    /// A sketch in free 3D space; contributes entities/constraints only, no
    /// solid.
    Drawing3d,
    /// A sketch confined to a workplane.
    DrawingWorkplane { workplane: HEntity },
    /// Extrudes the closed profile of `profile_group` along its workplane's
    /// normal by a signed distance param (`tsweep`). `symmetric` splits the
    /// distance evenly fore/aft of the sketch plane.
    Extrude { profile_group: HGroup, distance: HParam, symmetric: bool },
    /// Revolves the profile less than a full turn about an axis
    /// (`partial_rsweep`). Per `examples/original_source/src/groupmesh.cpp`'s
    /// angle convention, the solved angle param is one quarter of the swept
    /// angle in radians, so the sweep angle is always `4 * angle_param`.
    Revolve { profile_group: HGroup, axis_origin: HEntity, axis_normal: HEntity, angle: HParam },
    /// Revolves the profile through a full turn (`rsweep`).
    Lathe { profile_group: HGroup, axis_origin: HEntity, axis_normal: HEntity },
    /// Sweeps the profile along a helical path: `turns` full rotations about
    /// the axis while translating `pitch` per turn, approximated by
    /// alternating small rotate/translate steps stitched into one shell
    /// (there's no single-call helical primitive in the sweep toolkit).
    Helix { profile_group: HGroup, axis_origin: HEntity, axis_normal: HEntity, pitch: HParam, turns: HParam, steps: usize },
    /// Step-and-repeat by rigid translation of the running assembly.
    Translate { offset: [HParam; 3], copies: u32 },
    /// Step-and-repeat by rigid rotation of the running assembly.
    Rotate { axis_origin: HEntity, axis_normal: HEntity, angle: HParam, copies: u32 },
    /// An externally authored solid, merged in verbatim; the caller loads
    /// it and hands it to the regeneration pass out of band.
    Linked { path: String },
}

/// One entry in a group's entity remap table (§3.4): when a group derives
/// new entities from an existing one (e.g. extrude creating a translated
/// copy of every profile point), the derived handle is looked up by
/// `(source, kind)` so a later group can refer to, say, "the top face of
/// this extrusion" by a stable name instead of re-deriving it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum RemapKind {
    Top,
    Bottom,
    LineToFace,
    PtToLine,
    LatheStart,
    LatheEnd,
    PtToArc,
    PtToNormal,
}

/// A group's full state: its kind, its boolean-combine mode, and (after
/// regeneration) its remap table.
#[derive(Clone, Debug)]
pub struct Group {
    handle: HGroup,
    kind: GroupKind,
    combine: BooleanOp,
    visible: bool,
    suppress: bool,
    remap: HashMap<(HEntity, RemapKind), HEntity>,
}

impl Group {
    pub fn new(handle: HGroup, kind: GroupKind) -> Self {
        Group { handle, kind, combine: BooleanOp::default(), visible: true, suppress: false, remap: HashMap::new() }
    }

    pub fn handle(&self) -> HGroup { self.handle }
    pub fn kind(&self) -> &GroupKind { &self.kind }
    pub fn combine(&self) -> BooleanOp { self.combine }
    pub fn set_combine(&mut self, c: BooleanOp) { self.combine = c; }
    pub fn visible(&self) -> bool { self.visible }
    pub fn set_visible(&mut self, v: bool) { self.visible = v; }
    pub fn suppress(&self) -> bool { self.suppress }
    pub fn set_suppress(&mut self, s: bool) { self.suppress = s; }

    pub fn remap_get(&self, source: HEntity, kind: RemapKind) -> Option<HEntity> { self.remap.get(&(source, kind)).copied() }
    pub fn remap_set(&mut self, source: HEntity, kind: RemapKind, target: HEntity) { self.remap.insert((source, kind), target); }

    /// All remap entries, for persistence (§6.2's `M` field block).
    pub fn remap_iter(&self) -> impl Iterator<Item = (HEntity, RemapKind, HEntity)> + '_ {
        self.remap.iter().map(|(&(source, kind), &target)| (source, kind, target))
    }

    /// `true` for groups that emit a solid (everything but `Drawing3d`,
    /// `DrawingWorkplane`, and `Linked`).
    pub fn produces_solid(&self) -> bool {
        !matches!(self.kind, GroupKind::Drawing3d | GroupKind::DrawingWorkplane { .. } | GroupKind::Linked { .. })
    }
}

/// Builds a closed planar wire from an ordered, oriented loop of line/arc
/// entities (the output contract of the polyline assembler, §4.10): each
/// entity's endpoints must meet the next entity's start, tail to head.
fn wire_from_profile(entities: &IdTable<HEntity, Entity>, profile: &[HEntity]) -> Wire {
    // A whole circle is already closed on its own (`profile::assemble_profiles`
    // emits it as a single-entity profile); sweep one boundary vertex through
    // a full turn about the circle's normal rather than walking line/arc
    // endpoints.
    if let [h] = profile {
        if let EntityKind::Circle { center, normal, radius } = entities.expect(*h).kind() {
            let c = entities.expect(*center).act_point();
            let n = quaternion_axis(entities.expect(*normal).act_normal());
            let r = entities.expect(*radius).act_distance();
            let (u, _v) = quaternion_basis_uv(entities.expect(*normal).act_normal());
            let boundary = builder::vertex(c + u * r);
            return builder::rsweep(&boundary, c, n);
        }
    }
    let mut edges: Vec<Edge> = Vec::with_capacity(profile.len());
    let mut vertex_cache: HashMap<[u64; 3], Vertex> = HashMap::new();
    let key = |p: Point3| -> [u64; 3] { [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()] };
    let mut vertex_for = |p: Point3, cache: &mut HashMap<[u64; 3], Vertex>| -> Vertex {
        *cache.entry(key(p)).or_insert_with(|| builder::vertex(p))
    };
    for &h in profile {
        let e = entities.expect(h);
        match e.kind() {
            EntityKind::LineSegment { points } => {
                let a = entities.expect(points[0]).act_point();
                let b = entities.expect(points[1]).act_point();
                let va = vertex_for(a, &mut vertex_cache);
                let vb = vertex_for(b, &mut vertex_cache);
                edges.push(builder::line(&va, &vb));
            }
            EntityKind::ArcOfCircle { center, normal, start, end } => {
                let c = entities.expect(*center).act_point();
                let n = entities.expect(*normal).act_normal();
                let a = entities.expect(*start).act_point();
                let b = entities.expect(*end).act_point();
                let transit = arc_transit_point(c, n, a, b);
                let va = vertex_for(a, &mut vertex_cache);
                let vb = vertex_for(b, &mut vertex_cache);
                edges.push(builder::circle_arc(&va, &vb, transit));
            }
            _ => panic!("wire_from_profile: profile entity is not a line or arc"),
        }
    }
    edges.into()
}

/// The point on the arc (center `center`, orientation `normal`) halfway
/// between `start` and `end`, used as `builder::circle_arc`'s transit point.
/// Mirrors `Entity::generate_bezier_curves`'s own arc-midpoint construction.
fn arc_transit_point(center: Point3, normal: Quaternion, start: Point3, end: Point3) -> Point3 {
    let (u, v) = quaternion_basis_uv(normal);
    let ra = start - center;
    let theta_a = ra.dot(u).atan2(ra.dot(v));
    let rb = end - center;
    let theta_b = rb.dot(u).atan2(rb.dot(v));
    let mut dtheta = theta_b - theta_a;
    if dtheta <= 0.0 {
        dtheta += std::f64::consts::TAU;
    }
    let r = ra.magnitude();
    let mid_theta = theta_a + dtheta / 2.0;
    center + u * (r * mid_theta.sin()) + v * (r * mid_theta.cos())
}

fn quaternion_basis_uv(q: Quaternion) -> (Vector3, Vector3) {
    let rotate = |v: Vector3| -> Vector3 {
        let qv = Quaternion::new(0.0, v.x, v.y, v.z);
        let r = q * qv * q.conjugate();
        Vector3::new(r.v.x, r.v.y, r.v.z)
    };
    (rotate(Vector3::new(1.0, 0.0, 0.0)), rotate(Vector3::new(0.0, 1.0, 0.0)))
}

fn quaternion_axis(q: Quaternion) -> Vector3 {
    let qv = Quaternion::new(0.0, 0.0, 0.0, 1.0);
    let r = q * qv * q.conjugate();
    Vector3::new(r.v.x, r.v.y, r.v.z).normalize()
}

/// Builds the base planar face for a profile group: wire + `try_attach_plane`.
fn profile_face(entities: &IdTable<HEntity, Entity>, profile: &[HEntity]) -> Option<Face> {
    let wire = wire_from_profile(entities, profile);
    builder::try_attach_plane(&vec![wire])
}

/// Tags each swept side and the two end caps of an `EXTRUDE` group's profile
/// with a derived face identity (§3.4, §4.6 step 4), so a later group can
/// refer to "the top face of this extrusion" by a stable handle instead of
/// re-deriving it from the profile.
fn tag_extrude_remap(group: &mut Group, entities: &mut IdTable<HEntity, Entity>, profile: &[HEntity]) {
    let owner = Owner::Group(group.handle());
    let gh = group.handle();
    if let Some(wp) = entities.expect(profile[0]).workplane() {
        let top = add_entity(entities, owner, gh, None, EntityKind::Face { basis: wp });
        group.remap_set(wp, RemapKind::Top, top);
        let bottom = add_entity(entities, owner, gh, None, EntityKind::Face { basis: wp });
        group.remap_set(wp, RemapKind::Bottom, bottom);
    }
    for &h in profile {
        if matches!(entities.expect(h).kind(), EntityKind::LineSegment { .. }) {
            let face = add_entity(entities, owner, gh, None, EntityKind::Face { basis: h });
            group.remap_set(h, RemapKind::LineToFace, face);
        }
    }
}

/// Tags a `LATHE` group's axis origin with the start/end face identities a
/// later group's remap lookup expects (§4.6 step 4). A full revolution has
/// no distinct geometric seam, but the remap's job is stable naming rather
/// than asserting new geometry, so both ends key off the same axis point.
fn tag_lathe_remap(group: &mut Group, entities: &mut IdTable<HEntity, Entity>, axis_origin: HEntity) {
    let owner = Owner::Group(group.handle());
    let gh = group.handle();
    let start = add_entity(entities, owner, gh, None, EntityKind::Face { basis: axis_origin });
    group.remap_set(axis_origin, RemapKind::LatheStart, start);
    let end = add_entity(entities, owner, gh, None, EntityKind::Face { basis: axis_origin });
    group.remap_set(axis_origin, RemapKind::LatheEnd, end);
}

/// Regenerates one group's solid, given the already-solved numeric state of
/// its profile entities and (for derived groups) the previously accumulated
/// assembly solid to combine against. `profile` names the closed loop of
/// boundary entities belonging to the group's source sketch, already
/// ordered by the polyline assembler (§4.10); `running` is the solid
/// produced by every earlier group, or `None` before the first
/// solid-producing group.
pub fn regenerate(
    group: &mut Group,
    entities: &mut IdTable<HEntity, Entity>,
    params: &ParamTable,
    profile: &[HEntity],
    running: Option<&Solid>,
) -> Option<Solid> {
    // Cloned so `group` is free to take the mutable borrows `tag_*_remap`
    // below need while the match still inspects the kind it was created with.
    let kind = group.kind.clone();
    let fresh = match &kind {
        GroupKind::Drawing3d | GroupKind::DrawingWorkplane { .. } | GroupKind::Linked { .. } => return running.cloned(),
        GroupKind::Extrude { distance, symmetric, .. } => {
            let face = profile_face(entities, profile)?;
            let normal = extract_profile_normal(entities, profile);
            let d = params.value(*distance);
            let vector = normal * d;
            let solid = if *symmetric {
                let shifted = builder::translated(&face, normal * (-d / 2.0));
                builder::tsweep(&shifted, vector)
            } else {
                builder::tsweep(&face, vector)
            };
            tag_extrude_remap(group, entities, profile);
            solid
        }
        GroupKind::Lathe { axis_origin, axis_normal, .. } => {
            let face = profile_face(entities, profile)?;
            let origin = entities.expect(*axis_origin).act_point();
            let axis = quaternion_axis(entities.expect(*axis_normal).act_normal());
            let shell: Shell = builder::rsweep(&face, origin, axis);
            tag_lathe_remap(group, entities, *axis_origin);
            Solid::new(vec![shell])
        }
        GroupKind::Revolve { axis_origin, axis_normal, angle, .. } => {
            let face = profile_face(entities, profile)?;
            let origin = entities.expect(*axis_origin).act_point();
            let axis = quaternion_axis(entities.expect(*axis_normal).act_normal());
            let sweep_angle = Rad(4.0 * params.value(*angle));
            let shell: Shell = builder::partial_rsweep(&face, origin, axis, sweep_angle);
            Solid::new(vec![shell])
        }
        GroupKind::Helix { axis_origin, axis_normal, pitch, turns, steps, .. } => {
            let face = profile_face(entities, profile)?;
            let origin = entities.expect(*axis_origin).act_point();
            let axis = quaternion_axis(entities.expect(*axis_normal).act_normal());
            helix_sweep(&face, origin, axis, params.value(*turns), params.value(*pitch), *steps)
        }
        GroupKind::Translate { offset, copies } => {
            let base = running.cloned().expect("TRANSLATE group needs a preceding solid");
            let step = Vector3::new(params.value(offset[0]), params.value(offset[1]), params.value(offset[2]));
            return Some(step_and_repeat(base, *copies, move |s, i| builder::translated(s, step * i as f64)));
        }
        GroupKind::Rotate { axis_origin, axis_normal, angle, copies } => {
            let base = running.cloned().expect("ROTATE group needs a preceding solid");
            let origin = entities.expect(*axis_origin).act_point();
            let axis = quaternion_axis(entities.expect(*axis_normal).act_normal());
            let step_angle = params.value(*angle);
            return Some(step_and_repeat(base, *copies, move |s, i| builder::rotated(s, origin, axis, Rad(step_angle * i as f64))));
        }
    };
    Some(combine_with_running(group.combine, running, fresh))
}

/// Duplicates `base` into `copies` rigidly transformed instances (§4.6's
/// step-and-repeat), run concurrently since each copy's transform is
/// independent.
fn step_and_repeat<F: Fn(&Solid, u32) -> Solid + Sync>(base: Solid, copies: u32, transform: F) -> Solid {
    use rayon::prelude::*;
    let shells: Vec<Shell> = (0..copies.max(1))
        .into_par_iter()
        .flat_map_iter(|i| transform(&base, i).boundaries().clone())
        .collect();
    Solid::new(shells)
}

/// Builds a helical shell by alternating small rotate (`partial_rsweep`) and
/// translate (`tsweep`) steps and stitching the resulting shells together,
/// closing the ends with planar caps.
fn helix_sweep(face: &Face, origin: Point3, axis: Vector3, turns: f64, pitch: f64, steps: usize) -> Solid {
    let steps = steps.max(1);
    let dtheta = Rad(std::f64::consts::TAU * turns / steps as f64);
    let dz = axis * (pitch * turns / steps as f64);

    let mut shell: Shell = vec![face.clone()].into();
    let mut wire: Wire = face.boundaries()[0].clone();
    for _ in 0..steps {
        let rotated: Shell = builder::partial_rsweep(&wire, origin, axis, dtheta);
        let mut boundaries = rotated.extract_boundaries();
        let next_wire = boundaries.drain(..).find(|w| *w != wire).unwrap_or_else(|| wire.inverse());
        let mut bridge: Shell = builder::tsweep(&wire, dz);
        let mut rotated_owned = rotated;
        shell.append(&mut rotated_owned);
        shell.append(&mut bridge);
        wire = builder::translated(&next_wire, dz);
    }
    if let Some(cap) = builder::try_attach_plane(&vec![wire.inverse()]) {
        shell.push(cap);
    }
    Solid::new(vec![shell])
}

fn combine_with_running(op: BooleanOp, running: Option<&Solid>, fresh: Solid) -> Solid {
    match (op, running) {
        (BooleanOp::None, _) | (_, None) => fresh,
        (BooleanOp::Union, Some(r)) => or(r, &fresh, solvcad_base::tolerance::TOLERANCE).unwrap_or(fresh),
        (BooleanOp::Intersection, Some(r)) => and(r, &fresh, solvcad_base::tolerance::TOLERANCE).unwrap_or(fresh),
        (BooleanOp::Difference, Some(r)) => {
            let inverted = invert_solid(&fresh);
            and(r, &inverted, solvcad_base::tolerance::TOLERANCE).unwrap_or(fresh)
        }
    }
}

fn invert_solid(solid: &Solid) -> Solid {
    let shells: Vec<Shell> = solid
        .boundaries()
        .iter()
        .map(|shell| {
            let mut faces: Vec<Face> = shell.iter().cloned().collect();
            faces.iter_mut().for_each(|f| {
                f.invert();
            });
            Shell::from(faces)
        })
        .collect();
    Solid::new(shells)
}

fn extract_profile_normal(entities: &IdTable<HEntity, Entity>, profile: &[HEntity]) -> Vector3 {
    let first = entities.expect(profile[0]);
    let wp_normal = first.workplane().and_then(|h| {
        let e = entities.expect(h);
        if let EntityKind::Workplane { normal, .. } = e.kind() { Some(*normal) } else { None }
    });
    match wp_normal {
        Some(n) => quaternion_axis(entities.expect(n).act_normal()),
        None => Vector3::new(0.0, 0.0, 1.0),
    }
}
