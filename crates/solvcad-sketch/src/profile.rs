//! Polyline assembly and closed-profile classification for one group's
//! Bezier-curve output (`spec.md` §4.6 step 3, §4.10).
//!
//! Grounded on `solvcad_shapeops::polyline_construction::construct_polylines`'s
//! vertex-hash chaining (same `2*TOLERANCE` bucket key), extended here to
//! track the originating entity handle per edge, walk bidirectionally
//! (sketch entities aren't pre-oriented head to tail the way step-edges
//! are), and classify the assembled loop.

use std::collections::{HashMap, HashSet};

use solvcad_base::cgmath64::{EuclideanSpace, InnerSpace, Point3, Vector3};
use solvcad_base::tolerance::TOLERANCE;
use solvcad_ids::{HEntity, HGroup, IdTable};

use crate::entity::{Entity, EntityKind};

/// Outcome of assembling and checking one loop (§4.6 step 3).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProfileStatus {
    Good,
    NotClosed,
    NotCoplanar,
    SelfIntersecting,
    ZeroLenEdge,
}

/// One assembled boundary loop, in traversal order.
#[derive(Clone, Debug)]
pub struct Profile {
    pub entities: Vec<HEntity>,
    pub status: ProfileStatus,
}

fn vkey(p: Point3) -> [i64; 3] {
    let shifted = p + Vector3::new(TOLERANCE, TOLERANCE, TOLERANCE);
    let scaled = shifted / (2.0 * TOLERANCE);
    [scaled.x.floor() as i64, scaled.y.floor() as i64, scaled.z.floor() as i64]
}

/// The two endpoints of an edge-like entity, in whatever order its own
/// fields store them (loop traversal order is independent of this, since
/// `group::wire_from_profile` shares vertices by position).
fn endpoints(e: &Entity, entities: &IdTable<HEntity, Entity>) -> Option<(Point3, Point3)> {
    match e.kind() {
        EntityKind::LineSegment { points } => {
            Some((entities.expect(points[0]).act_point(), entities.expect(points[1]).act_point()))
        }
        EntityKind::ArcOfCircle { start, end, .. } => {
            Some((entities.expect(*start).act_point(), entities.expect(*end).act_point()))
        }
        EntityKind::Cubic { control, periodic: false, .. } => {
            Some((entities.expect(control[0]).act_point(), entities.expect(control[3]).act_point()))
        }
        _ => None,
    }
}

/// Assembles every visible, non-construction edge-like entity owned by
/// `group` into closed loops (plus whole circles, which are already
/// closed), classifying each assembled loop per §4.6 step 3.
pub fn assemble_profiles(entities: &IdTable<HEntity, Entity>, group: HGroup) -> Vec<Profile> {
    let mut profiles = Vec::new();
    let mut edges: Vec<(HEntity, Point3, Point3)> = Vec::new();

    for (h, e) in entities.iter() {
        if e.group() != group || e.construction() || !e.act_visible() {
            continue;
        }
        if e.is_circle() {
            let zero = matches!(e.kind(), EntityKind::Circle { radius, .. } if entities.expect(*radius).act_distance().abs() <= TOLERANCE);
            profiles.push(Profile { entities: vec![*h], status: if zero { ProfileStatus::ZeroLenEdge } else { ProfileStatus::Good } });
            continue;
        }
        if let Some((a, b)) = endpoints(e, entities) {
            edges.push((*h, a, b));
        }
    }

    let mut visited: HashSet<usize> = HashSet::new();
    let mut incident: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
    for (i, &(_, a, b)) in edges.iter().enumerate() {
        incident.entry(vkey(a)).or_default().push(i);
        incident.entry(vkey(b)).or_default().push(i);
    }

    for start_idx in 0..edges.len() {
        if visited.contains(&start_idx) {
            continue;
        }
        visited.insert(start_idx);
        let (h0, a0, b0) = edges[start_idx];
        let mut loop_entities = vec![h0];
        let mut zero_len = a0.distance2(b0) <= TOLERANCE * TOLERANCE;
        let loop_start = a0;
        let mut current = b0;
        let mut plane: Option<(Point3, Vector3)> = None;

        loop {
            let key = vkey(current);
            let candidates: Vec<usize> = incident
                .get(&key)
                .into_iter()
                .flatten()
                .copied()
                .filter(|i| !visited.contains(i))
                .collect();
            if candidates.is_empty() {
                break;
            }
            // Best-preserves-the-current-plane tie-break (§4.10 step 3):
            // once three non-collinear points fix a plane, prefer the
            // candidate whose far endpoint lies closest to it.
            let chosen = if candidates.len() == 1 {
                candidates[0]
            } else if let Some((origin, normal)) = plane {
                *candidates
                    .iter()
                    .min_by(|&&i, &&j| {
                        let far = |idx: usize| -> Point3 {
                            let (_, a, b) = edges[idx];
                            if vkey(a) == key { b } else { a }
                        };
                        let dist = |p: Point3| (p - origin).dot(normal).abs();
                        dist(far(i)).partial_cmp(&dist(far(j))).unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .unwrap()
            } else {
                candidates[0]
            };
            visited.insert(chosen);
            let (h, a, b) = edges[chosen];
            let far = if vkey(a) == key { b } else { a };
            if current.distance2(far) <= TOLERANCE * TOLERANCE {
                zero_len = true;
            }
            loop_entities.push(h);
            if plane.is_none() && loop_entities.len() >= 3 {
                plane = fit_plane(&loop_points(&loop_entities, entities));
            }
            current = far;
            if current.distance2(loop_start) <= TOLERANCE * TOLERANCE {
                break;
            }
        }

        let closed = current.distance2(loop_start) <= TOLERANCE * TOLERANCE;
        let points = loop_points(&loop_entities, entities);
        let status = if zero_len {
            ProfileStatus::ZeroLenEdge
        } else if !closed {
            ProfileStatus::NotClosed
        } else if !is_coplanar(&points) {
            ProfileStatus::NotCoplanar
        } else if self_intersects(&points) {
            ProfileStatus::SelfIntersecting
        } else {
            ProfileStatus::Good
        };
        profiles.push(Profile { entities: loop_entities, status });
    }

    profiles
}

fn loop_points(loop_entities: &[HEntity], entities: &IdTable<HEntity, Entity>) -> Vec<Point3> {
    let mut pts = Vec::with_capacity(loop_entities.len());
    for (i, &h) in loop_entities.iter().enumerate() {
        let e = entities.expect(h);
        if let Some((a, b)) = endpoints(e, entities) {
            if i == 0 {
                pts.push(a);
            }
            pts.push(b);
        }
    }
    pts
}

fn fit_plane(points: &[Point3]) -> Option<(Point3, Vector3)> {
    let p0 = *points.first()?;
    for i in 1..points.len().saturating_sub(1) {
        let u = points[i] - p0;
        let v = *points.get(i + 1)? - p0;
        let n = u.cross(v);
        if n.magnitude2() > TOLERANCE * TOLERANCE {
            return Some((p0, n.normalize()));
        }
    }
    None
}

fn is_coplanar(points: &[Point3]) -> bool {
    let Some((origin, normal)) = fit_plane(points) else { return true };
    points.iter().all(|&p| (p - origin).dot(normal).abs() <= TOLERANCE.sqrt())
}

/// 2D self-intersection test on the loop projected onto its own best-fit
/// plane: any two non-adjacent segments crossing flags the loop.
fn self_intersects(points: &[Point3]) -> bool {
    let Some((origin, normal)) = fit_plane(points) else { return false };
    let u = pick_in_plane_axis(normal);
    let v = normal.cross(u);
    let proj: Vec<(f64, f64)> = points.iter().map(|&p| { let d = p - origin; (d.dot(u), d.dot(v)) }).collect();
    let n = proj.len();
    if n < 4 {
        return false;
    }
    for i in 0..n - 1 {
        for j in i + 1..n - 1 {
            if j == i || j == i + 1 || (i == 0 && j == n - 2) {
                continue;
            }
            if segments_intersect(proj[i], proj[i + 1], proj[j], proj[j + 1]) {
                return true;
            }
        }
    }
    false
}

fn pick_in_plane_axis(normal: Vector3) -> Vector3 {
    let candidate = if normal.x.abs() < 0.9 { Vector3::new(1.0, 0.0, 0.0) } else { Vector3::new(0.0, 1.0, 0.0) };
    (candidate - normal * candidate.dot(normal)).normalize()
}

fn segments_intersect(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), p4: (f64, f64)) -> bool {
    let cross = |o: (f64, f64), a: (f64, f64), b: (f64, f64)| (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0);
    let d1 = cross(p3, p4, p1);
    let d2 = cross(p3, p4, p2);
    let d3 = cross(p1, p2, p3);
    let d4 = cross(p1, p2, p4);
    ((d1 > 0.0) != (d2 > 0.0)) && ((d3 > 0.0) != (d4 > 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::add_entity;
    use crate::param::ParamTable;
    use solvcad_ids::Owner;

    fn square_entities() -> (IdTable<HEntity, Entity>, HGroup) {
        let g = HGroup::from_index(4);
        let owner = Owner::Group(g);
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        let mut mk = |x: f64, y: f64| {
            let px = params.add(owner, x);
            let py = params.add(owner, y);
            let pz = params.add(owner, 0.0);
            let h = add_entity(&mut entities, owner, g, None, EntityKind::PointIn3d { params: [px, py, pz] });
            entities.find_mut(h).unwrap().set_act_point(Point3::new(x, y, 0.0));
            h
        };
        let a = mk(0.0, 0.0);
        let b = mk(2.0, 0.0);
        let c = mk(2.0, 2.0);
        let d = mk(0.0, 2.0);
        add_entity(&mut entities, owner, g, None, EntityKind::LineSegment { points: [a, b] });
        add_entity(&mut entities, owner, g, None, EntityKind::LineSegment { points: [c, b] });
        add_entity(&mut entities, owner, g, None, EntityKind::LineSegment { points: [c, d] });
        add_entity(&mut entities, owner, g, None, EntityKind::LineSegment { points: [d, a] });
        (entities, g)
    }

    #[test]
    fn closed_planar_square_is_good() {
        let (entities, g) = square_entities();
        let profiles = assemble_profiles(&entities, g);
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].status, ProfileStatus::Good);
        assert_eq!(profiles[0].entities.len(), 4);
    }

    #[test]
    fn open_chain_is_not_closed() {
        let (mut entities, g) = square_entities();
        // Drop the closing edge by construction-flagging it.
        let last = *entities.iter().filter(|(_, e)| matches!(e.kind(), EntityKind::LineSegment { .. })).last().unwrap().0;
        entities.find_mut(last).unwrap().set_construction(true);
        let profiles = assemble_profiles(&entities, g);
        assert!(profiles.iter().any(|p| p.status == ProfileStatus::NotClosed));
    }
}
