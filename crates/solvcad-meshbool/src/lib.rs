//! Binary Space Partition boolean operations on triangle meshes (`spec.md`
//! §4.8). Builds a BSP tree from one operand's triangles, classifies and
//! splits the other operand's triangles against it, then reassembles the
//! kept fragments of both operands into the result mesh.
//!
//! Grounded on `solvcad-polymesh::PolygonMesh`'s triangle-soup shape and
//! `solvcad-shapeops`'s boolean-operation API (`and`/`or`/`difference`
//! returning a `Result`-wrapped outcome rather than panicking on degenerate
//! input).

#![deny(clippy::all, rust_2018_idioms)]

pub mod rng;

use solvcad_base::cgmath64::{InnerSpace, Point3, Vector3};
use solvcad_polymesh::PolygonMesh;
use thiserror::Error;
use tracing::{debug, trace};

/// A single triangle, duplicated out of a [`PolygonMesh`] for BSP processing.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub vertices: [Point3; 3],
}

impl Triangle {
    pub fn new(a: Point3, b: Point3, c: Point3) -> Self { Triangle { vertices: [a, b, c] } }

    /// Outward-facing plane normal, unnormalized callers should normalize
    /// via [`Triangle::plane`].
    fn raw_normal(&self) -> Vector3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a)
    }

    /// The supporting plane of this triangle.
    fn plane(&self) -> Plane {
        let n = self.raw_normal();
        let n = n / n.magnitude().max(1e-12);
        Plane { normal: n, offset: n.dot(self.vertices[0].into()) }
    }

    fn flip(&self) -> Triangle { Triangle::new(self.vertices[2], self.vertices[1], self.vertices[0]) }
}

/// An oriented plane in Hessian normal form: `dot(normal, p) == offset`.
#[derive(Clone, Copy, Debug)]
struct Plane {
    normal: Vector3,
    offset: f64,
}

/// Tolerance below which a point's signed distance to a plane is considered
/// "on" the plane, per `solvcad_base::tolerance::TOLERANCE`.
const PLANE_EPS: f64 = 1e-6;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Front,
    Back,
    Coplanar,
}

impl Plane {
    fn signed_distance(&self, p: Point3) -> f64 { self.normal.dot(p.into()) - self.offset }

    fn classify_point(&self, p: Point3) -> Side {
        let d = self.signed_distance(p);
        if d > PLANE_EPS {
            Side::Front
        } else if d < -PLANE_EPS {
            Side::Back
        } else {
            Side::Coplanar
        }
    }

    /// Splits `tri` against this plane, classifying it as entirely `Front`,
    /// entirely `Back`, or `Straddling` (with both fragments produced by
    /// clipping along each edge that crosses the plane).
    fn split(&self, tri: &Triangle) -> SplitResult {
        let sides: Vec<Side> = tri.vertices.iter().map(|&p| self.classify_point(p)).collect();
        let any_front = sides.iter().any(|s| *s == Side::Front);
        let any_back = sides.iter().any(|s| *s == Side::Back);

        if !any_front && !any_back {
            return SplitResult::Coplanar;
        }
        if !any_back {
            return SplitResult::Front;
        }
        if !any_front {
            return SplitResult::Back;
        }

        // Straddling: walk the triangle's edges, emitting a front polygon
        // and a back polygon, then fan-triangulate each.
        let mut front_pts = Vec::with_capacity(4);
        let mut back_pts = Vec::with_capacity(4);
        for i in 0..3 {
            let a = tri.vertices[i];
            let b = tri.vertices[(i + 1) % 3];
            let sa = sides[i];
            let sb = sides[(i + 1) % 3];
            if sa != Side::Back {
                front_pts.push(a);
            }
            if sa != Side::Front {
                back_pts.push(a);
            }
            if (sa == Side::Front && sb == Side::Back) || (sa == Side::Back && sb == Side::Front) {
                let da = self.signed_distance(a);
                let db = self.signed_distance(b);
                let t = da / (da - db);
                let mid = a + (b - a) * t;
                front_pts.push(mid);
                back_pts.push(mid);
            }
        }

        SplitResult::Straddling {
            front: fan_triangulate(&front_pts),
            back: fan_triangulate(&back_pts),
        }
    }
}

fn fan_triangulate(pts: &[Point3]) -> Vec<Triangle> {
    if pts.len() < 3 {
        return Vec::new();
    }
    (1..pts.len() - 1).map(|i| Triangle::new(pts[0], pts[i], pts[i + 1])).collect()
}

enum SplitResult {
    Front,
    Back,
    Coplanar,
    Straddling { front: Vec<Triangle>, back: Vec<Triangle> },
}

/// A node of the BSP tree: one dividing plane (taken from the first triangle
/// in its bucket), the triangles lying exactly on it, and the front/back
/// subtrees.
struct BspNode {
    plane: Plane,
    coplanar: Vec<Triangle>,
    /// `SBsp2` (§4.8): a 2D BSP over the boundary of `coplanar`'s footprint
    /// in the plane, used to classify incoming coplanar triangles as inside
    /// or outside this node's face rather than resolving all of them the
    /// same way regardless of where they actually sit.
    coplanar_edges: Option<Bsp2Node>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

/// One edge of a coplanar face's boundary, in the plane's local 2D frame.
#[derive(Clone, Copy)]
struct Edge2 {
    a: (f64, f64),
    b: (f64, f64),
}

/// An oriented in-plane line, `dot(normal, p) == offset`, with `normal`
/// pointing away from the face interior — the 2D analog of [`Plane`]'s
/// outward-normal convention.
#[derive(Clone, Copy)]
struct Line2 {
    normal: (f64, f64),
    offset: f64,
}

impl Line2 {
    /// The supporting line of directed edge `a -> b`. For a
    /// counter-clockwise boundary this edge's outward normal is the
    /// direction rotated -90 degrees, matching [`Triangle::raw_normal`]'s
    /// right-hand convention one dimension down.
    fn through(a: (f64, f64), b: (f64, f64)) -> Self {
        let dir = (b.0 - a.0, b.1 - a.1);
        let len = (dir.0 * dir.0 + dir.1 * dir.1).sqrt().max(1e-12);
        let normal = (dir.1 / len, -dir.0 / len);
        let offset = normal.0 * a.0 + normal.1 * a.1;
        Line2 { normal, offset }
    }

    fn signed_distance(&self, p: (f64, f64)) -> f64 { self.normal.0 * p.0 + self.normal.1 * p.1 - self.offset }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side2 {
    Front,
    Back,
    Coplanar,
}

fn classify2(line: &Line2, p: (f64, f64)) -> Side2 {
    let d = line.signed_distance(p);
    if d > PLANE_EPS {
        Side2::Front
    } else if d < -PLANE_EPS {
        Side2::Back
    } else {
        Side2::Coplanar
    }
}

enum Edge2Split {
    Front,
    Back,
    Coplanar,
    Straddling { front: Edge2, back: Edge2 },
}

fn split_edge2(line: &Line2, e: Edge2) -> Edge2Split {
    let sa = classify2(line, e.a);
    let sb = classify2(line, e.b);
    match (sa, sb) {
        (Side2::Coplanar, Side2::Coplanar) => Edge2Split::Coplanar,
        (Side2::Front, Side2::Back) | (Side2::Back, Side2::Front) => {
            let da = line.signed_distance(e.a);
            let db = line.signed_distance(e.b);
            let t = da / (da - db);
            let mid = (e.a.0 + (e.b.0 - e.a.0) * t, e.a.1 + (e.b.1 - e.a.1) * t);
            if sa == Side2::Front {
                Edge2Split::Straddling { front: Edge2 { a: e.a, b: mid }, back: Edge2 { a: mid, b: e.b } }
            } else {
                Edge2Split::Straddling { front: Edge2 { a: mid, b: e.b }, back: Edge2 { a: e.a, b: mid } }
            }
        }
        _ if sa == Side2::Back || sb == Side2::Back => Edge2Split::Back,
        _ => Edge2Split::Front,
    }
}

/// `SBsp2` (§4.8): a 2D BSP over a coplanar face's boundary edges, built the
/// same way [`BspNode`] is built over 3D triangles — one edge per node as
/// the splitter, the rest bucketed by which side of its line they fall on.
struct Bsp2Node {
    line: Line2,
    front: Option<Box<Bsp2Node>>,
    back: Option<Box<Bsp2Node>>,
}

fn build_node2(mut edges: Vec<Edge2>, rng: &mut rng::Lcg) -> Option<Bsp2Node> {
    if edges.is_empty() {
        return None;
    }
    let pivot = rng.next_index(edges.len());
    let splitter = edges.swap_remove(pivot);
    let line = Line2::through(splitter.a, splitter.b);

    let mut front = Vec::new();
    let mut back = Vec::new();
    for e in edges {
        match split_edge2(&line, e) {
            Edge2Split::Front | Edge2Split::Coplanar => front.push(e),
            Edge2Split::Back => back.push(e),
            Edge2Split::Straddling { front: f, back: b } => {
                front.push(f);
                back.push(b);
            }
        }
    }

    Some(Bsp2Node { line, front: build_node2(front, rng).map(Box::new), back: build_node2(back, rng).map(Box::new) })
}

/// `true` iff `p` lies inside the face bounded by this edge tree, mirroring
/// [`node_contains`] one dimension down (back/coplanar resolve to the
/// interior, matching the outward-normal convention of [`Line2::through`]).
fn node_contains2(node: &Bsp2Node, p: (f64, f64)) -> bool {
    match classify2(&node.line, p) {
        Side2::Front => match &node.front {
            Some(n) => node_contains2(n, p),
            None => false,
        },
        Side2::Back | Side2::Coplanar => match &node.back {
            Some(n) => node_contains2(n, p),
            None => true,
        },
    }
}

/// An orthonormal 2D frame (origin + basis) within `plane`, used to project
/// coplanar 3D triangles down to the 2D edge BSP.
fn coplanar_frame(plane: &Plane) -> (Point3, Vector3, Vector3) {
    let n = plane.normal;
    let helper = if n.x.abs() < 0.9 { Vector3::new(1.0, 0.0, 0.0) } else { Vector3::new(0.0, 1.0, 0.0) };
    let u = n.cross(helper).normalize();
    let v = n.cross(u);
    let origin = Point3::new(n.x * plane.offset, n.y * plane.offset, n.z * plane.offset);
    (origin, u, v)
}

fn project2(frame: (Point3, Vector3, Vector3), p: Point3) -> (f64, f64) {
    let (origin, u, v) = frame;
    let d = p - origin;
    (d.dot(u), d.dot(v))
}

/// Builds the coplanar edge BSP for one [`BspNode`]'s face: projects every
/// triangle of `coplanar` into the plane, normalizes each one's winding to
/// the plane's own outward normal (a coplanar triangle contributed by the
/// other operand may be wound the opposite way), then cancels the interior
/// edges shared between adjacent triangles, leaving the face's outer
/// boundary to build the tree from.
fn build_coplanar_bsp(plane: &Plane, coplanar: &[Triangle], rng: &mut rng::Lcg) -> Option<Bsp2Node> {
    let frame = coplanar_frame(plane);
    let mut edges: Vec<Edge2> = Vec::new();
    for tri in coplanar {
        let mut pts: [(f64, f64); 3] = [project2(frame, tri.vertices[0]), project2(frame, tri.vertices[1]), project2(frame, tri.vertices[2])];
        let signed_area = pts[0].0 * (pts[1].1 - pts[2].1) + pts[1].0 * (pts[2].1 - pts[0].1) + pts[2].0 * (pts[0].1 - pts[1].1);
        if signed_area < 0.0 {
            pts.swap(1, 2);
        }
        for i in 0..3 {
            edges.push(Edge2 { a: pts[i], b: pts[(i + 1) % 3] });
        }
    }
    let key = |p: (f64, f64)| (p.0.to_bits(), p.1.to_bits());
    let mut keep = vec![true; edges.len()];
    for i in 0..edges.len() {
        if !keep[i] {
            continue;
        }
        for j in (i + 1)..edges.len() {
            if keep[j] && key(edges[j].a) == key(edges[i].b) && key(edges[j].b) == key(edges[i].a) {
                keep[i] = false;
                keep[j] = false;
                break;
            }
        }
    }
    let boundary: Vec<Edge2> = edges.into_iter().zip(keep).filter_map(|(e, k)| k.then_some(e)).collect();
    build_node2(boundary, rng)
}

/// A BSP tree over a set of triangles, used as one operand of a boolean op.
///
/// `SBsp3` in the reference design; triangles are chosen as splitting planes
/// in input order (no plane-selection heuristic), matching the reference's
/// preference for a simple, deterministic recursive partition over a
/// balanced-tree search.
pub struct Bsp3 {
    root: Option<BspNode>,
}

impl Bsp3 {
    /// Builds a tree from `triangles`. A [`rng::Lcg`] seeded at `0` perturbs
    /// the order in which coplanar groups are subdivided so that degenerate,
    /// exactly-coplanar input doesn't produce pathological recursion depth;
    /// it never perturbs geometry.
    pub fn build(triangles: Vec<Triangle>) -> Self {
        let mut rng = rng::Lcg::new(0);
        Bsp3 { root: build_node(triangles, &mut rng) }
    }

    /// `true` iff `p` lies in the back half-space (the "solid" side) of the
    /// tree, used to classify one operand's vertices against the other's
    /// volume.
    pub fn contains(&self, p: Point3) -> bool {
        match &self.root {
            None => false,
            Some(node) => node_contains(node, p),
        }
    }

    /// Clips `triangles` to the coplanar/front/back buckets of this tree,
    /// keeping only the triangles (and triangle fragments) that lie on the
    /// side selected by `keep_front`. Used to discard the portion of one
    /// operand inside (or outside) the other before assembling the result.
    pub fn clip_triangles(&self, triangles: Vec<Triangle>, keep_front: bool) -> ClipResult {
        match &self.root {
            None if keep_front => ClipResult { triangles, at_least_one_discarded: false },
            None => ClipResult { triangles: Vec::new(), at_least_one_discarded: false },
            Some(node) => {
                let mut at_least_one_discarded = false;
                let triangles = clip_node(node, triangles, keep_front, &mut at_least_one_discarded);
                ClipResult { triangles, at_least_one_discarded }
            }
        }
    }

    /// All triangles stored in the tree, front-to-back.
    pub fn all_triangles(&self) -> Vec<Triangle> {
        let mut out = Vec::new();
        if let Some(node) = &self.root {
            collect_node(node, &mut out);
        }
        out
    }

    /// Flips every plane and coplanar triangle, turning the tree's notion of
    /// "inside" into "outside". Used to implement difference as
    /// `a ∩ complement(b)`.
    pub fn invert(mut self) -> Self {
        if let Some(node) = &mut self.root {
            invert_node(node);
        }
        self
    }
}

fn build_node(mut triangles: Vec<Triangle>, rng: &mut rng::Lcg) -> Option<BspNode> {
    if triangles.is_empty() {
        return None;
    }
    let pivot = rng.next_index(triangles.len());
    let splitter = triangles.swap_remove(pivot);
    let plane = splitter.plane();

    let mut coplanar = vec![splitter];
    let mut front = Vec::new();
    let mut back = Vec::new();

    for tri in triangles {
        match plane.split(&tri) {
            SplitResult::Front => front.push(tri),
            SplitResult::Back => back.push(tri),
            SplitResult::Coplanar => coplanar.push(tri),
            SplitResult::Straddling { front: f, back: b } => {
                front.extend(f);
                back.extend(b);
            }
        }
    }

    trace!(coplanar = coplanar.len(), front = front.len(), back = back.len(), "bsp node split");

    let coplanar_edges = build_coplanar_bsp(&plane, &coplanar, rng);

    Some(BspNode {
        plane,
        coplanar,
        coplanar_edges,
        front: build_node(front, rng).map(Box::new),
        back: build_node(back, rng).map(Box::new),
    })
}

fn node_contains(node: &BspNode, p: Point3) -> bool {
    match node.plane.classify_point(p) {
        Side::Front => match &node.front {
            Some(n) => node_contains(n, p),
            None => false,
        },
        // Back and Coplanar both descend into the back subtree: a point
        // exactly on a dividing plane is resolved by whatever is behind it,
        // consistent with treating "back" as the solid half-space.
        Side::Back | Side::Coplanar => match &node.back {
            Some(n) => node_contains(n, p),
            None => true,
        },
    }
}

/// Result of [`Bsp3::clip_triangles`]: the kept triangles, plus whether any
/// coplanar triangle had to be discarded for landing ambiguously across a
/// face's boundary (the source's `atLeastOneDiscarded`, §4.8).
#[derive(Debug)]
pub struct ClipResult {
    pub triangles: Vec<Triangle>,
    pub at_least_one_discarded: bool,
}

fn clip_node(node: &BspNode, triangles: Vec<Triangle>, keep_front: bool, at_least_one_discarded: &mut bool) -> Vec<Triangle> {
    let mut front = Vec::new();
    let mut back = Vec::new();
    for tri in triangles {
        match node.plane.split(&tri) {
            SplitResult::Front => front.push(tri),
            SplitResult::Back => back.push(tri),
            SplitResult::Coplanar => classify_coplanar(node, tri, keep_front, &mut front, &mut back, at_least_one_discarded),
            SplitResult::Straddling { front: f, back: b } => {
                front.extend(f);
                back.extend(b);
            }
        }
    }

    let front = match &node.front {
        Some(n) => clip_node(n, front, keep_front, at_least_one_discarded),
        None if keep_front => front,
        None => Vec::new(),
    };
    let back = match &node.back {
        Some(n) => clip_node(n, back, keep_front, at_least_one_discarded),
        None if keep_front => Vec::new(),
        None => back,
    };

    let mut out = front;
    out.extend(back);
    out
}

/// Classifies a triangle lying exactly on `node`'s plane against its
/// coplanar edge BSP (§4.8): wholly inside or wholly outside the source
/// face resolves unambiguously and is bucketed the same way a `Front`/`Back`
/// triangle would be; a triangle whose vertices fall on both sides of the
/// face's own boundary is ambiguous and, when `keep_front` is false, is
/// discarded outright with `at_least_one_discarded` set so the caller can
/// diagnose it (mirrors the reference's own "discard when ambiguous and
/// `keepCoplanar` is false" rule).
fn classify_coplanar(node: &BspNode, tri: Triangle, keep_front: bool, front: &mut Vec<Triangle>, back: &mut Vec<Triangle>, at_least_one_discarded: &mut bool) {
    let Some(edge_bsp) = &node.coplanar_edges else {
        // No boundary to test against; let it through rather than invent a
        // side for it ("I suppose this actually is allowed to happen").
        if keep_front {
            front.push(tri);
        } else {
            back.push(tri);
        }
        return;
    };
    let frame = coplanar_frame(&node.plane);
    let inside: [bool; 3] = [
        node_contains2(edge_bsp, project2(frame, tri.vertices[0])),
        node_contains2(edge_bsp, project2(frame, tri.vertices[1])),
        node_contains2(edge_bsp, project2(frame, tri.vertices[2])),
    ];
    if inside.iter().all(|&b| b) || inside.iter().all(|&b| !b) {
        if keep_front {
            front.push(tri);
        } else {
            back.push(tri);
        }
    } else if keep_front {
        front.push(tri);
    } else {
        *at_least_one_discarded = true;
    }
}

fn collect_node(node: &BspNode, out: &mut Vec<Triangle>) {
    out.extend(node.coplanar.iter().copied());
    if let Some(n) = &node.front {
        collect_node(n, out);
    }
    if let Some(n) = &node.back {
        collect_node(n, out);
    }
}

fn invert_node(node: &mut BspNode) {
    node.plane.normal = -node.plane.normal;
    node.plane.offset = -node.plane.offset;
    for tri in &mut node.coplanar {
        *tri = tri.flip();
    }
    // The edge BSP's 2D frame is derived from the plane's normal, which just
    // flipped; rebuild it rather than leave it keyed to the old frame.
    node.coplanar_edges = build_coplanar_bsp(&node.plane, &node.coplanar, &mut rng::Lcg::new(0));
    if let Some(n) = &mut node.front {
        invert_node(n);
    }
    if let Some(n) = &mut node.back {
        invert_node(n);
    }
    std::mem::swap(&mut node.front, &mut node.back);
}

/// Errors raised while reducing a triangle set back into a [`PolygonMesh`].
#[derive(Debug, Error)]
pub enum MeshBoolError {
    /// One of the two operands had no triangles at all.
    #[error("operand mesh has no triangles")]
    EmptyOperand,
}

/// Boolean-combines two closed triangle meshes. Grounded on the
/// classify-then-clip-then-reassemble recipe: each operand's BSP tree clips
/// away the triangles of the other operand that fall on the discarded side,
/// then the two kept triangle sets are concatenated (and, for difference,
/// the kept half of `b` is flipped so both shells face outward).
pub fn boolean(a: &PolygonMesh, b: &PolygonMesh, op: BooleanOp) -> Result<PolygonMesh, MeshBoolError> {
    let tris_a = mesh_to_triangles(a);
    let tris_b = mesh_to_triangles(b);
    if tris_a.is_empty() || tris_b.is_empty() {
        return Err(MeshBoolError::EmptyOperand);
    }

    let bsp_a = Bsp3::build(tris_a.clone());
    let bsp_b = Bsp3::build(tris_b.clone());

    debug!(op = ?op, tris_a = tris_a.len(), tris_b = tris_b.len(), "mesh boolean");

    let (keep_a_outside_b, keep_b_outside_a, flip_b) = match op {
        BooleanOp::Union => (true, true, false),
        BooleanOp::Intersection => (false, false, false),
        BooleanOp::Difference => (true, false, true),
    };

    let a_clip = bsp_b.clip_triangles(tris_a, keep_a_outside_b);
    let b_clip = bsp_a.clip_triangles(tris_b, keep_b_outside_a);
    if a_clip.at_least_one_discarded || b_clip.at_least_one_discarded {
        debug!("mesh boolean discarded an ambiguous coplanar triangle");
    }
    let mut b_kept = b_clip.triangles;
    if flip_b {
        b_kept = b_kept.into_iter().map(|t| t.flip()).collect();
    }

    let mut out = a_clip.triangles;
    out.extend(b_kept);
    Ok(triangles_to_mesh(out))
}

/// Which of the three boolean combinations to perform.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BooleanOp {
    Union,
    Intersection,
    Difference,
}

fn mesh_to_triangles(mesh: &PolygonMesh) -> Vec<Triangle> {
    let positions = mesh.positions();
    mesh.tri_faces()
        .iter()
        .map(|face| {
            Triangle::new(
                positions[face[0].pos],
                positions[face[1].pos],
                positions[face[2].pos],
            )
        })
        .collect()
}

fn triangles_to_mesh(triangles: Vec<Triangle>) -> PolygonMesh {
    let mut positions = Vec::with_capacity(triangles.len() * 3);
    let mut tri_faces = Vec::with_capacity(triangles.len());
    for tri in triangles {
        let base = positions.len();
        positions.extend_from_slice(&tri.vertices);
        tri_faces.push([
            solvcad_polymesh::StandardVertex { pos: base, uv: None, nor: None },
            solvcad_polymesh::StandardVertex { pos: base + 1, uv: None, nor: None },
            solvcad_polymesh::StandardVertex { pos: base + 2, uv: None, nor: None },
        ]);
    }
    PolygonMesh::new(
        solvcad_polymesh::StandardAttributes { positions, uv_coords: Vec::new(), normals: Vec::new() },
        solvcad_polymesh::Faces::from_tri_and_quad_faces(tri_faces, Vec::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_triangles(min: Point3, max: Point3) -> Vec<Triangle> {
        let corners = [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ];
        let faces: [[usize; 4]; 6] = [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [1, 2, 6, 5],
            [3, 0, 4, 7],
        ];
        faces
            .iter()
            .flat_map(|f| {
                [
                    Triangle::new(corners[f[0]], corners[f[1]], corners[f[2]]),
                    Triangle::new(corners[f[0]], corners[f[2]], corners[f[3]]),
                ]
            })
            .collect()
    }

    #[test]
    fn bsp_contains_classifies_inside_and_outside_points() {
        let tris = cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let bsp = Bsp3::build(tris);
        assert!(bsp.contains(Point3::new(0.5, 0.5, 0.5)));
        assert!(!bsp.contains(Point3::new(5.0, 5.0, 5.0)));
    }

    #[test]
    fn invert_flips_containment() {
        let tris = cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let bsp = Bsp3::build(tris).invert();
        assert!(!bsp.contains(Point3::new(0.5, 0.5, 0.5)));
        assert!(bsp.contains(Point3::new(5.0, 5.0, 5.0)));
    }

    /// A flat z=0 square, as two triangles, spanning `(0,0)`..`(side,side)`.
    fn flat_square(side: f64) -> Vec<Triangle> {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(side, 0.0, 0.0);
        let c = Point3::new(side, side, 0.0);
        let d = Point3::new(0.0, side, 0.0);
        vec![Triangle::new(a, b, c), Triangle::new(a, c, d)]
    }

    #[test]
    fn coplanar_triangle_inside_face_is_kept_without_discard() {
        let bsp = Bsp3::build(flat_square(4.0));
        let inside = Triangle::new(
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        );
        let clip = bsp.clip_triangles(vec![inside], false);
        assert_eq!(clip.triangles.len(), 1);
        assert!(!clip.at_least_one_discarded);
    }

    #[test]
    fn coplanar_triangle_straddling_face_boundary_is_discarded() {
        let bsp = Bsp3::build(flat_square(4.0));
        let straddling = Triangle::new(
            Point3::new(3.0, 3.0, 0.0),
            Point3::new(5.0, 3.0, 0.0),
            Point3::new(3.0, 5.0, 0.0),
        );
        let clip = bsp.clip_triangles(vec![straddling], false);
        assert!(clip.triangles.is_empty());
        assert!(clip.at_least_one_discarded);
    }

    #[test]
    fn union_of_disjoint_cubes_keeps_every_triangle() {
        let a = triangles_to_mesh(cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)));
        let b = triangles_to_mesh(cube_triangles(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0)));
        let result = boolean(&a, &b, BooleanOp::Union).unwrap();
        assert_eq!(result.tri_faces().len(), 24);
    }

    #[test]
    fn intersection_of_disjoint_cubes_is_empty() {
        let a = triangles_to_mesh(cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)));
        let b = triangles_to_mesh(cube_triangles(Point3::new(5.0, 5.0, 5.0), Point3::new(6.0, 6.0, 6.0)));
        let result = boolean(&a, &b, BooleanOp::Intersection).unwrap();
        assert!(result.tri_faces().is_empty());
    }

    #[test]
    fn empty_operand_is_rejected() {
        let a = triangles_to_mesh(cube_triangles(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)));
        let empty = PolygonMesh::new(
            solvcad_polymesh::StandardAttributes::default(),
            solvcad_polymesh::Faces::from_tri_and_quad_faces(Vec::new(), Vec::new()),
        );
        assert!(matches!(boolean(&a, &empty, BooleanOp::Union), Err(MeshBoolError::EmptyOperand)));
    }
}
