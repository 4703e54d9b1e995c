//! Parametric geometric primitives (`spec.md` §3.2, §4.3).
//!
//! Every entity is a tagged variant carrying up to 12 point-child handles,
//! an optional normal-child, an optional distance-child, up to 7 direct
//! params, plus a numeric cache (`act_point`/`act_normal`/`act_distance`)
//! refreshed after each solve so downstream consumers don't have to
//! re-traverse the param table. Grounded on `examples/original_source/src/entity.h`.

use solvcad_base::cgmath64::{InnerSpace, Point3, Quaternion, Vector3};
use solvcad_expr::{Expr, ExprQuaternion, ExprVector};
use solvcad_geometry::NURBSCurve;
use solvcad_ids::{HEntity, HGroup, HParam, IdTable, Owner};

use crate::param::ParamTable;
use crate::style::HStyleId;

/// Stable entity type codes, identical to `spec.md` §6.5 so that they round
/// trip through the `.slvs` file format unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u32)]
pub enum EntityTypeCode {
    PointIn3d = 2000,
    PointIn2d = 2001,
    PointNTrans = 2010,
    PointNRotTrans = 2011,
    PointNCopy = 2012,
    PointNRotAa = 2013,
    NormalIn3d = 3000,
    NormalIn2d = 3001,
    NormalNCopy = 3010,
    NormalNRot = 3011,
    NormalNRotAa = 3012,
    Distance = 4000,
    DistanceNCopy = 4001,
    Workplane = 10000,
    LineSegment = 11000,
    Cubic = 12000,
    CubicPeriodic = 12001,
    Circle = 13000,
    ArcOfCircle = 14000,
    TtfText = 15000,
    Image = 16000,
    FaceNormalPt = 5000,
}

/// Kind-specific data for one [`Entity`]. Point/normal/distance variants
/// carry the param handles that back them (or a source handle, for derived
/// copies); curve/workplane variants carry their child point/normal
/// handles.
#[derive(Clone, Debug)]
pub enum EntityKind {
    PointIn3d { params: [HParam; 3] },
    PointIn2d { workplane: HEntity, params: [HParam; 2] },
    /// A copy of `orig` translated by a direct 3-param offset (used for
    /// extrude/translate-group derived points).
    PointNTrans { orig: HEntity, params: [HParam; 3] },
    /// A copy of `orig` rotated by `rotation` and then translated by a
    /// 3-param offset (lathe/helix/rotate-group derived points).
    PointNRotTrans { orig: HEntity, rotation: HEntity, params: [HParam; 3] },
    /// A plain copy of `orig`, no direct params: numerics are recomputed
    /// from `orig` on every refresh.
    PointNCopy { orig: HEntity },
    /// A copy of `orig` rotated about an axis (`axis_origin`, `axis_normal`)
    /// by an angle param.
    PointNRotAa { orig: HEntity, axis_origin: HEntity, axis_normal: HEntity, angle: HParam },

    NormalIn3d { params: [HParam; 4] },
    /// Oriented by its workplane's normal; carries no direct params.
    NormalIn2d { workplane: HEntity },
    NormalNCopy { orig: HEntity },
    NormalNRot { orig: HEntity, rotation: HEntity },
    NormalNRotAa { orig: HEntity, axis_origin: HEntity, axis_normal: HEntity, angle: HParam },

    /// One scalar param, constrained positive by convention (§4.3).
    Distance { param: HParam },
    DistanceNCopy { orig: HEntity },

    /// Origin point + normal; the plane equation `n*p - d = 0` is exposed
    /// by [`Entity::workplane_plane_exprs`].
    Workplane { origin: HEntity, normal: HEntity },

    LineSegment { points: [HEntity; 2] },
    /// A rational (if `weights.is_some()`) cubic Bezier through 4 control
    /// points; `periodic` cubics wrap their last control point back to the
    /// first.
    Cubic { control: [HEntity; 4], weights: Option<[HParam; 4]>, periodic: bool },
    Circle { center: HEntity, normal: HEntity, radius: HEntity },
    ArcOfCircle { center: HEntity, normal: HEntity, start: HEntity, end: HEntity },
    TtfText { origin: HEntity, normal: HEntity, text: String, font: String },
    Image { origin: HEntity, normal: HEntity, file: String },
    /// A derived face identity (§3.4, §6.5 `FACE_NORMAL_PT`): no params or
    /// equations of its own, just a stable handle a group's remap table can
    /// point at so a later group can name "the top face of this extrusion"
    /// instead of re-deriving it. `basis` is the point or line entity this
    /// face was swept from.
    Face { basis: HEntity },
}

/// One geometric primitive, either primary (owned by a [`crate::request::Request`])
/// or derived (owned by a group's regeneration).
#[derive(Clone, Debug)]
pub struct Entity {
    handle: HEntity,
    group: HGroup,
    /// `None` means `FREE_IN_3D`.
    workplane: Option<HEntity>,
    kind: EntityKind,
    construction: bool,
    style: Option<HStyleId>,
    /// Refreshed after each solve (§4.3).
    act_point: Point3,
    act_normal: Quaternion,
    act_distance: f64,
    act_visible: bool,
}

impl Entity {
    pub fn new(handle: HEntity, group: HGroup, workplane: Option<HEntity>, kind: EntityKind) -> Self {
        Entity {
            handle,
            group,
            workplane,
            kind,
            construction: false,
            style: None,
            act_point: Point3::new(0.0, 0.0, 0.0),
            act_normal: Quaternion::new(1.0, 0.0, 0.0, 0.0),
            act_distance: 0.0,
            act_visible: true,
        }
    }

    pub fn handle(&self) -> HEntity { self.handle }
    pub fn group(&self) -> HGroup { self.group }
    pub fn workplane(&self) -> Option<HEntity> { self.workplane }
    pub fn kind(&self) -> &EntityKind { &self.kind }
    pub fn construction(&self) -> bool { self.construction }
    pub fn set_construction(&mut self, c: bool) { self.construction = c; }
    pub fn style(&self) -> Option<HStyleId> { self.style }
    pub fn set_style(&mut self, s: Option<HStyleId>) { self.style = s; }
    pub fn act_point(&self) -> Point3 { self.act_point }
    pub fn act_normal(&self) -> Quaternion { self.act_normal }
    pub fn act_distance(&self) -> f64 { self.act_distance }
    pub fn act_visible(&self) -> bool { self.act_visible }
    pub fn set_act_visible(&mut self, v: bool) { self.act_visible = v; }
    pub fn set_act_point(&mut self, p: Point3) { self.act_point = p; }
    pub fn set_act_normal(&mut self, q: Quaternion) { self.act_normal = q; }
    pub fn set_act_distance(&mut self, d: f64) { self.act_distance = d; }

    pub fn is_point(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::PointIn3d { .. }
                | EntityKind::PointIn2d { .. }
                | EntityKind::PointNTrans { .. }
                | EntityKind::PointNRotTrans { .. }
                | EntityKind::PointNCopy { .. }
                | EntityKind::PointNRotAa { .. }
        )
    }

    pub fn is_normal(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::NormalIn3d { .. }
                | EntityKind::NormalIn2d { .. }
                | EntityKind::NormalNCopy { .. }
                | EntityKind::NormalNRot { .. }
                | EntityKind::NormalNRotAa { .. }
        )
    }

    pub fn is_distance(&self) -> bool {
        matches!(self.kind, EntityKind::Distance { .. } | EntityKind::DistanceNCopy { .. })
    }

    pub fn is_workplane(&self) -> bool { matches!(self.kind, EntityKind::Workplane { .. }) }

    pub fn is_circle(&self) -> bool { matches!(self.kind, EntityKind::Circle { .. }) }

    /// `true` for entities with a start/finish (lines, arcs, non-periodic
    /// cubics): the shapes the polyline assembler and extrude sweep care
    /// about as open curves.
    pub fn has_endpoints(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::LineSegment { .. } | EntityKind::ArcOfCircle { .. }
        ) || matches!(self.kind, EntityKind::Cubic { periodic: false, .. })
    }

    /// Symbolic `(x, y, z)` of a point entity. Panics if called on a
    /// non-point entity: this is a precondition violation, not a runtime
    /// error a caller recovers from (§7).
    pub fn point_get_exprs(&self, entities: &IdTable<HEntity, Entity>) -> ExprVector {
        match &self.kind {
            EntityKind::PointIn3d { params } => ExprVector::new(
                Expr::param(params[0]),
                Expr::param(params[1]),
                Expr::param(params[2]),
            ),
            EntityKind::PointIn2d { workplane, params } => {
                let wp = entities.expect(*workplane);
                wp.point_in_workplane_to_3d_exprs(entities, Expr::param(params[0]), Expr::param(params[1]))
            }
            EntityKind::PointNTrans { orig, params } => {
                let base = entities.expect(*orig).point_get_exprs(entities);
                ExprVector::new(
                    base.x.add(Expr::param(params[0])),
                    base.y.add(Expr::param(params[1])),
                    base.z.add(Expr::param(params[2])),
                )
            }
            EntityKind::PointNRotTrans { orig, rotation, params } => {
                let base = entities.expect(*orig).point_get_exprs(entities);
                let q = entities.expect(*rotation).normal_get_exprs(entities);
                let rotated = quaternion_rotate_exprs(&q, &base);
                ExprVector::new(
                    rotated.x.add(Expr::param(params[0])),
                    rotated.y.add(Expr::param(params[1])),
                    rotated.z.add(Expr::param(params[2])),
                )
            }
            EntityKind::PointNCopy { orig } => entities.expect(*orig).point_get_exprs(entities),
            EntityKind::PointNRotAa { orig, axis_origin, axis_normal, angle } => {
                let base = entities.expect(*orig).point_get_exprs(entities);
                let origin = entities.expect(*axis_origin).point_get_exprs(entities);
                let axis = entities.expect(*axis_normal).normal_n_exprs(entities);
                rotate_about_axis_angle_exprs(&base, &origin, &axis, Expr::param(angle))
            }
            _ => panic!("point_get_exprs called on a non-point entity"),
        }
    }

    /// Forces this point's direct params to match `v` (used by
    /// `WHERE_DRAGGED` and by `modify_to_satisfy` on reference dimensions).
    /// No-op (silently) for derived/copy points with no direct params of
    /// their own, matching the reference design's `PointForceTo`.
    pub fn point_force_to(&self, params: &mut ParamTable, v: Point3) {
        match &self.kind {
            EntityKind::PointIn3d { params: p } => {
                params.get_mut(p[0]).unwrap().set_value(v.x);
                params.get_mut(p[1]).unwrap().set_value(v.y);
                params.get_mut(p[2]).unwrap().set_value(v.z);
            }
            EntityKind::PointIn2d { .. } => {
                // Workplane UV requires the workplane's own numerics to
                // project into; the constraint layer performs this via
                // `PT_IN_PLANE`-shaped projection instead of overwriting
                // UV params directly, matching `PointForceTo`'s note that
                // points-in-2d drag through their UV param pair.
            }
            _ => {}
        }
    }

    /// Symbolic unit quaternion of a normal entity.
    pub fn normal_get_exprs(&self, entities: &IdTable<HEntity, Entity>) -> ExprQuaternion {
        match &self.kind {
            EntityKind::NormalIn3d { params } => ExprQuaternion::new(
                Expr::param(params[0]),
                Expr::param(params[1]),
                Expr::param(params[2]),
                Expr::param(params[3]),
            ),
            EntityKind::NormalIn2d { workplane } => {
                entities.expect(*workplane).workplane_normal(entities).normal_get_exprs(entities)
            }
            EntityKind::NormalNCopy { orig } => entities.expect(*orig).normal_get_exprs(entities),
            EntityKind::NormalNRot { orig, rotation } => {
                let base = entities.expect(*orig).normal_get_exprs(entities);
                let rot = entities.expect(*rotation).normal_get_exprs(entities);
                quaternion_mul_exprs(&rot, &base)
            }
            EntityKind::NormalNRotAa { orig, angle, .. } => {
                // Axis-angle normals rotate the base quaternion about the
                // fixed axis normal by `angle`; represented as a half-angle
                // quaternion product (cos(angle/2), axis*sin(angle/2)).
                let base = entities.expect(*orig).normal_get_exprs(entities);
                let half = Expr::constant(0.5).mul(Expr::param(*angle));
                let axis = entities.expect(*orig).normal_n_exprs(entities);
                let q = ExprQuaternion::new(
                    half.clone().cos(),
                    axis.x.clone().mul(half.clone().sin()),
                    axis.y.clone().mul(half.clone().sin()),
                    axis.z.mul(half.sin()),
                );
                quaternion_mul_exprs(&q, &base)
            }
            _ => panic!("normal_get_exprs called on a non-normal entity"),
        }
    }

    /// Basis vector `U` of the plane this normal defines, symbolically.
    pub fn normal_u_exprs(&self, entities: &IdTable<HEntity, Entity>) -> ExprVector {
        quaternion_basis_u(&self.normal_get_exprs(entities))
    }
    /// Basis vector `V`.
    pub fn normal_v_exprs(&self, entities: &IdTable<HEntity, Entity>) -> ExprVector {
        quaternion_basis_v(&self.normal_get_exprs(entities))
    }
    /// Basis vector `N` (the plane normal proper).
    pub fn normal_n_exprs(&self, entities: &IdTable<HEntity, Entity>) -> ExprVector {
        quaternion_basis_n(&self.normal_get_exprs(entities))
    }

    /// Symbolic scalar value of a distance entity.
    pub fn distance_get_expr(&self) -> Expr {
        match &self.kind {
            EntityKind::Distance { param } => Expr::param(*param),
            _ => panic!("distance_get_expr called on a non-distance entity"),
        }
    }

    pub fn distance_force_to(&self, params: &mut ParamTable, v: f64) {
        if let EntityKind::Distance { param } = &self.kind {
            params.get_mut(*param).unwrap().set_value(v);
        }
    }

    /// `n . p - d = 0`, the plane equation of a workplane (§4.3).
    pub fn workplane_plane_exprs(&self, entities: &IdTable<HEntity, Entity>) -> (ExprVector, Expr) {
        let EntityKind::Workplane { origin, normal } = &self.kind else {
            panic!("workplane_plane_exprs called on a non-workplane entity");
        };
        let n = entities.expect(*normal).normal_n_exprs(entities);
        let p0 = entities.expect(*origin).point_get_exprs(entities);
        let d = n.dot(&p0);
        (n, d)
    }

    fn workplane_normal<'a>(&self, entities: &'a IdTable<HEntity, Entity>) -> &'a Entity {
        let EntityKind::Workplane { normal, .. } = &self.kind else {
            panic!("workplane_normal called on a non-workplane entity");
        };
        entities.expect(*normal)
    }

    /// Expresses a `(u, v)` pair measured in this workplane's basis as 3D
    /// `(x, y, z)`, used by `PointIn2d`.
    fn point_in_workplane_to_3d_exprs(&self, entities: &IdTable<HEntity, Entity>, u: Expr, v: Expr) -> ExprVector {
        let EntityKind::Workplane { origin, normal } = &self.kind else {
            panic!("point_in_workplane_to_3d_exprs called on a non-workplane entity");
        };
        let n = entities.expect(*normal);
        let p0 = entities.expect(*origin).point_get_exprs(entities);
        let basis_u = n.normal_u_exprs(entities);
        let basis_v = n.normal_v_exprs(entities);
        ExprVector::new(
            p0.x.add(basis_u.x.clone().mul(u.clone())).add(basis_v.x.clone().mul(v.clone())),
            p0.y.add(basis_u.y.clone().mul(u.clone())).add(basis_v.y.clone().mul(v.clone())),
            p0.z.add(basis_u.z.mul(u)).add(basis_v.z.mul(v)),
        )
    }

    /// Equations this entity itself contributes, independent of any
    /// constraint (§4.5 step 1 "walk ... entities in `g`"). Only
    /// `NORMAL_IN_3D` carries direct params that need pinning: its four
    /// components must stay a unit quaternion, or `normal_get_exprs`'s
    /// rotations stop being rigid.
    pub fn own_equations(&self) -> Vec<Expr> {
        match &self.kind {
            EntityKind::NormalIn3d { params } => {
                let sum = Expr::param(params[0])
                    .square()
                    .add(Expr::param(params[1]).square())
                    .add(Expr::param(params[2]).square())
                    .add(Expr::param(params[3]).square());
                vec![sum.sub(Expr::constant(1.0))]
            }
            _ => Vec::new(),
        }
    }

    /// Produces one or more rational Bezier curves approximating this
    /// entity, in homogeneous (weighted) control-point form ready for
    /// `solvcad-geometry`'s [`NURBSCurve`]. Non-curve entities (points,
    /// normals, workplanes, distances) return an empty list.
    pub fn generate_bezier_curves(&self, entities: &IdTable<HEntity, Entity>, params: &ParamTable) -> Vec<NURBSCurve<solvcad_base::cgmath64::Vector4>> {
        use solvcad_base::cgmath64::Vector4;
        use solvcad_geometry::{BSplineCurve, KnotVec};

        let weighted = |p: Point3, w: f64| Vector4::new(p.x * w, p.y * w, p.z * w, w);

        match &self.kind {
            EntityKind::LineSegment { points } => {
                let a = entities.expect(points[0]).act_point();
                let b = entities.expect(points[1]).act_point();
                let knots = KnotVec::bezier_knot(1);
                let ctrl = vec![weighted(a, 1.0), weighted(b, 1.0)];
                vec![NURBSCurve::new(BSplineCurve::new(knots, ctrl))]
            }
            EntityKind::Cubic { control, weights, .. } => {
                let pts: Vec<Point3> = control.iter().map(|h| entities.expect(*h).act_point()).collect();
                let ws: [f64; 4] = weights
                    .map(|wp| [params.value(wp[0]), params.value(wp[1]), params.value(wp[2]), params.value(wp[3])])
                    .unwrap_or([1.0, 1.0, 1.0, 1.0]);
                let knots = KnotVec::bezier_knot(3);
                let ctrl: Vec<_> = pts.iter().zip(ws.iter()).map(|(p, w)| weighted(*p, *w)).collect();
                vec![NURBSCurve::new(BSplineCurve::new(knots, ctrl))]
            }
            EntityKind::ArcOfCircle { center, normal, start, end } => {
                vec![arc_to_rational_bezier(
                    entities.expect(*center).act_point(),
                    entities.expect(*normal).act_normal(),
                    entities.expect(*start).act_point(),
                    entities.expect(*end).act_point(),
                )]
            }
            EntityKind::Circle { center, normal, radius } => {
                // A full circle is split into two 180-degree-minus-epsilon
                // arcs so every piece still encodes exactly as a rational
                // quadratic Bezier (§4.7): a single 360-degree arc cannot
                // (its middle weight `cos(pi)` would be `-1`, degenerate).
                let c = entities.expect(*center).act_point();
                let n = entities.expect(*normal).act_normal();
                let r = entities.expect(*radius).act_distance();
                let u = quaternion_to_basis(n).0;
                let v = quaternion_to_basis(n).1;
                let p0 = c + u * r;
                let p1 = c - u * r;
                let mid0 = c + v * r;
                let mid1 = c - v * r;
                vec![
                    arc_to_rational_bezier_with_transit(c, p0, p1, mid0),
                    arc_to_rational_bezier_with_transit(c, p1, p0, mid1),
                ]
            }
            _ => Vec::new(),
        }
    }
}

/// Rotates `(q)` about the unit axis `axis` centered at `origin` by angle
/// `angle`, all symbolically, via Rodrigues' rotation formula (the
/// axis-angle sibling of `PointNRotTrans`'s quaternion rotation).
fn rotate_about_axis_angle_exprs(p: &ExprVector, origin: &ExprVector, axis: &ExprVector, angle: Expr) -> ExprVector {
    let rel = p.minus(origin);
    let cos_a = angle.clone().cos();
    let sin_a = angle.sin();
    let k_cross_v = axis.cross(&rel);
    let k_dot_v = axis.dot(&rel);
    let term1 = ExprVector::new(
        rel.x.clone().mul(cos_a.clone()),
        rel.y.clone().mul(cos_a.clone()),
        rel.z.clone().mul(cos_a.clone()),
    );
    let term2 = ExprVector::new(
        k_cross_v.x.mul(sin_a.clone()),
        k_cross_v.y.mul(sin_a.clone()),
        k_cross_v.z.mul(sin_a),
    );
    let one_minus_cos = Expr::constant(1.0).sub(cos_a);
    let term3 = ExprVector::new(
        axis.x.clone().mul(k_dot_v.clone()).mul(one_minus_cos.clone()),
        axis.y.clone().mul(k_dot_v.clone()).mul(one_minus_cos.clone()),
        axis.z.clone().mul(k_dot_v).mul(one_minus_cos),
    );
    ExprVector::new(
        origin.x.clone().add(term1.x).add(term2.x).add(term3.x),
        origin.y.clone().add(term1.y).add(term2.y).add(term3.y),
        origin.z.clone().add(term1.z).add(term2.z).add(term3.z),
    )
}

fn quaternion_rotate_exprs(q: &ExprQuaternion, v: &ExprVector) -> ExprVector {
    // Standard quaternion sandwich product `q v q*`, expanded symbolically.
    let (w, x, y, z) = (q.w.clone(), q.x.clone(), q.y.clone(), q.z.clone());
    let two = Expr::constant(2.0);
    let xx = x.clone().mul(x.clone());
    let yy = y.clone().mul(y.clone());
    let zz = z.clone().mul(z.clone());
    let xy = x.clone().mul(y.clone());
    let xz = x.clone().mul(z.clone());
    let yz = y.clone().mul(z.clone());
    let wx = w.clone().mul(x.clone());
    let wy = w.clone().mul(y.clone());
    let wz = w.mul(z);

    let m00 = Expr::constant(1.0).sub(two.clone().mul(yy.clone().add(zz.clone())));
    let m01 = two.clone().mul(xy.clone().sub(wz.clone()));
    let m02 = two.clone().mul(xz.clone().add(wy.clone()));
    let m10 = two.clone().mul(xy.add(wz));
    let m11 = Expr::constant(1.0).sub(two.clone().mul(xx.clone().add(zz)));
    let m12 = two.clone().mul(yz.clone().sub(wx.clone()));
    let m20 = two.clone().mul(xz.sub(wy));
    let m21 = two.clone().mul(yz.add(wx));
    let m22 = Expr::constant(1.0).sub(two.mul(xx.add(yy)));

    ExprVector::new(
        m00.mul(v.x.clone()).add(m01.mul(v.y.clone())).add(m02.mul(v.z.clone())),
        m10.mul(v.x.clone()).add(m11.mul(v.y.clone())).add(m12.mul(v.z.clone())),
        m20.mul(v.x.clone()).add(m21.mul(v.y.clone())).add(m22.mul(v.z)),
    )
}

fn quaternion_mul_exprs(a: &ExprQuaternion, b: &ExprQuaternion) -> ExprQuaternion {
    ExprQuaternion::new(
        a.w.clone().mul(b.w.clone())
            .sub(a.x.clone().mul(b.x.clone()))
            .sub(a.y.clone().mul(b.y.clone()))
            .sub(a.z.clone().mul(b.z.clone())),
        a.w.clone().mul(b.x.clone())
            .add(a.x.clone().mul(b.w.clone()))
            .add(a.y.clone().mul(b.z.clone()))
            .sub(a.z.clone().mul(b.y.clone())),
        a.w.clone().mul(b.y.clone())
            .sub(a.x.clone().mul(b.z.clone()))
            .add(a.y.clone().mul(b.w.clone()))
            .add(a.z.clone().mul(b.x.clone())),
        a.w.clone().mul(b.z.clone())
            .add(a.x.clone().mul(b.y.clone()))
            .sub(a.y.clone().mul(b.x.clone()))
            .add(a.z.clone().mul(b.w.clone())),
    )
}

fn quaternion_basis_u(q: &ExprQuaternion) -> ExprVector {
    quaternion_rotate_exprs(q, &ExprVector::new(Expr::constant(1.0), Expr::constant(0.0), Expr::constant(0.0)))
}
fn quaternion_basis_v(q: &ExprQuaternion) -> ExprVector {
    quaternion_rotate_exprs(q, &ExprVector::new(Expr::constant(0.0), Expr::constant(1.0), Expr::constant(0.0)))
}
fn quaternion_basis_n(q: &ExprQuaternion) -> ExprVector {
    quaternion_rotate_exprs(q, &ExprVector::new(Expr::constant(0.0), Expr::constant(0.0), Expr::constant(1.0)))
}

/// Numeric (u, v) basis vectors of a unit quaternion, for bezier
/// construction where symbolic exprs aren't needed.
fn quaternion_to_basis(q: Quaternion) -> (Vector3, Vector3) {
    let rotate = |v: Vector3| -> Vector3 {
        let qv = Quaternion::new(0.0, v.x, v.y, v.z);
        let r = q * qv * q.conjugate();
        Vector3::new(r.v.x, r.v.y, r.v.z)
    };
    (rotate(Vector3::new(1.0, 0.0, 0.0)), rotate(Vector3::new(0.0, 1.0, 0.0)))
}

/// Encodes an arc under 180 degrees exactly as a rational-quadratic Bezier
/// with middle weight `cos(delta_theta / 2)` (§4.7 revolution constructor,
/// §8 property test (b)).
fn arc_to_rational_bezier(center: Point3, normal: Quaternion, start: Point3, end: Point3) -> NURBSCurve<solvcad_base::cgmath64::Vector4> {
    let (u, v) = quaternion_to_basis(normal);
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
    let transit = center + u * (r * mid_theta.sin()) + v * (r * mid_theta.cos());
    arc_to_rational_bezier_with_transit(center, start, end, transit)
}

/// Builds the rational-quadratic Bezier for the arc through `start`,
/// `transit`, `end` about `center`, with the exact middle weight
/// `cos(delta_theta / 2)` prescribed by §4.7/§9.
fn arc_to_rational_bezier_with_transit(
    center: Point3,
    start: Point3,
    end: Point3,
    transit: Point3,
) -> NURBSCurve<solvcad_base::cgmath64::Vector4> {
    use solvcad_base::cgmath64::Vector4;
    use solvcad_geometry::{BSplineCurve, KnotVec};

    let ra = start - center;
    let rb = end - center;
    let half_angle = {
        let cos_full = (ra.dot(rb) / (ra.magnitude() * rb.magnitude())).clamp(-1.0, 1.0);
        let full = cos_full.acos();
        // Disambiguate the short way around using the transit point: if the
        // transit lies on the major arc, the true sweep is `2*pi - full`.
        let rm = transit - center;
        let expected_major = ra.dot(rm) < 0.0 && rb.dot(rm) < 0.0;
        let sweep = if expected_major { std::f64::consts::TAU - full } else { full };
        sweep / 2.0
    };
    let w1 = half_angle.cos();
    // The control point whose weighted projection reproduces `transit`:
    // `transit = (start*w0 + 2*mid_ctrl*w1 + end*w2) / (w0 + 2*w1 + w2)` at
    // the Bezier midpoint (w0 = w2 = 1), solved for `mid_ctrl`.
    let denom = if w1.abs() > 1e-9 { w1 } else { 1e-9 };
    let mid_ctrl = Point3::new(
        (transit.x * (1.0 + w1) - 0.5 * (start.x + end.x)) / denom,
        (transit.y * (1.0 + w1) - 0.5 * (start.y + end.y)) / denom,
        (transit.z * (1.0 + w1) - 0.5 * (start.z + end.z)) / denom,
    );
    let weighted = |p: Point3, w: f64| Vector4::new(p.x * w, p.y * w, p.z * w, w);
    let ctrl = vec![weighted(start, 1.0), weighted(mid_ctrl, w1), weighted(end, 1.0)];
    NURBSCurve::new(BSplineCurve::new(KnotVec::bezier_knot(2), ctrl))
}

/// Adds a fresh entity to `table`, auto-assigning the next local index
/// within `owner`.
pub fn add_entity(table: &mut IdTable<HEntity, Entity>, owner: Owner, group: HGroup, workplane: Option<HEntity>, kind: EntityKind) -> HEntity {
    table.add(owner, |h| Entity::new(h, group, workplane, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solvcad_ids::HGroup;

    fn free_point(table: &mut IdTable<HEntity, Entity>, params: &mut ParamTable, owner: Owner, group: HGroup, x: f64, y: f64, z: f64) -> HEntity {
        let px = params.add(owner, x);
        let py = params.add(owner, y);
        let pz = params.add(owner, z);
        add_entity(table, owner, group, None, EntityKind::PointIn3d { params: [px, py, pz] })
    }

    #[test]
    fn point_in_3d_roundtrips_through_exprs() {
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        let owner = Owner::Group(HGroup::from_index(1));
        let h = free_point(&mut entities, &mut params, owner, HGroup::from_index(1), 1.0, 2.0, 3.0);
        let e = entities.expect(h).point_get_exprs(&entities);
        assert_eq!(e.x.eval(&params, &[]), 1.0);
        assert_eq!(e.y.eval(&params, &[]), 2.0);
        assert_eq!(e.z.eval(&params, &[]), 3.0);
    }

    #[test]
    fn point_n_copy_mirrors_original() {
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        let owner = Owner::Group(HGroup::from_index(1));
        let orig = free_point(&mut entities, &mut params, owner, HGroup::from_index(1), 5.0, -1.0, 0.0);
        let copy = add_entity(&mut entities, owner, HGroup::from_index(1), None, EntityKind::PointNCopy { orig });
        let e = entities.expect(copy).point_get_exprs(&entities);
        assert_eq!(e.x.eval(&params, &[]), 5.0);
        assert_eq!(e.y.eval(&params, &[]), -1.0);
    }
}
