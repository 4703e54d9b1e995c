use std::ops::Bound;
use solvcad_base::cgmath64::*;

/// The range of parameter of a curve, in terms of `std::ops::Bound`.
///
/// `Bound::Unbounded` means the curve extends infinitely in that direction
/// (used by e.g. lines and hyperbolas).
pub type ParameterRange = (Bound<f64>, Bound<f64>);

/// Returns the parameter range as a plain `(f64, f64)` tuple, panicking if unbounded.
#[inline(always)]
pub fn presumed_bounds(range: ParameterRange) -> (f64, f64) {
    let lower = match range.0 {
        Bound::Included(x) | Bound::Excluded(x) => x,
        Bound::Unbounded => panic!("unbounded parameter range"),
    };
    let upper = match range.1 {
        Bound::Included(x) | Bound::Excluded(x) => x,
        Bound::Unbounded => panic!("unbounded parameter range"),
    };
    (lower, upper)
}

/// Parametrized curve, with an associated point and tangent vector space.
pub trait ParametricCurve: Clone {
    /// The type of the points on the curve.
    type Point;
    /// The type of the tangent vectors of the curve.
    type Vector;
    /// Substitutes the parameter `t` and returns the corresponding point.
    fn subs(&self, t: f64) -> Self::Point;
    /// Substitutes the parameter `t` and returns the first derivative.
    fn der(&self, t: f64) -> Self::Vector;
    /// Substitutes the parameter `t` and returns the second derivative.
    fn der2(&self, t: f64) -> Self::Vector;
    /// Substitutes the parameter `t` and returns the `n`-th derivative.
    ///
    /// The default implementation dispatches on `n` to `subs`/`der`/`der2` and
    /// panics for `n >= 3`; curves with closed-form higher derivatives should
    /// override it.
    fn der_n(&self, t: f64, n: usize) -> Self::Vector
    where Self::Vector: Zero {
        match n {
            0 => panic!("`der_n` with n = 0 is not defined: use `subs` instead"),
            1 => self.der(t),
            2 => self.der2(t),
            _ => unimplemented!("derivatives of order >= 3 are not implemented for this curve"),
        }
    }
    /// The range of the parameter of the curve.
    fn parameter_range(&self) -> ParameterRange;
    /// The period of the curve, if periodic.
    fn period(&self) -> Option<f64> { None }
    /// The front point of the curve, i.e. `self.subs` at the lower bound of `parameter_range`.
    fn front(&self) -> Self::Point {
        let (t0, _) = presumed_bounds(self.parameter_range());
        self.subs(t0)
    }
    /// The back point of the curve, i.e. `self.subs` at the upper bound of `parameter_range`.
    fn back(&self) -> Self::Point {
        let (_, t1) = presumed_bounds(self.parameter_range());
        self.subs(t1)
    }
}

/// A curve with a closed, finite parameter range.
pub trait BoundedCurve: ParametricCurve {}

/// A curve that can be split into two curves at a parameter.
pub trait Cut: ParametricCurve {
    /// Splits `self` at `t`: after the call, `self` is the part before `t` and
    /// the returned curve is the part from `t` onward.
    fn cut(&mut self, t: f64) -> Self;
}

/// A curve that can be concatenated to another curve of the same point type.
pub trait Concat<Rhs: ParametricCurve<Point = Self::Point>>: ParametricCurve {
    /// The concatenated curve type.
    type Output: ParametricCurve<Point = Self::Point>;
    /// Tries to concatenate `self` and `rhs`, failing if their endpoints do not meet.
    fn try_concat(&self, rhs: &Rhs) -> std::result::Result<Self::Output, ConcatError<Self::Point>>
    where Self::Point: std::fmt::Debug;
    /// Concatenates `self` and `rhs`, panicking on mismatched endpoints.
    fn concat(&self, rhs: &Rhs) -> Self::Output
    where Self::Point: std::fmt::Debug {
        self.try_concat(rhs).unwrap_or_else(|e| panic!("{e}"))
    }
}

/// Error in concatenating two curves whose endpoints do not meet.
#[derive(Clone, Copy, Debug, thiserror::Error)]
pub enum ConcatError<P: std::fmt::Debug> {
    /// the back of the first curve and the front of the second do not coincide
    #[error("The end of the first curve and the start of the second curve are different: {0:?} and {1:?}")]
    DisconnectedPoints(P, P),
}

/// Parametrized surface, with an associated point and tangent vector space.
pub trait ParametricSurface: Clone {
    /// The type of the points on the surface.
    type Point;
    /// The type of the tangent vectors of the surface.
    type Vector;
    /// Substitutes the parameters `(u, v)` and returns the corresponding point.
    fn subs(&self, u: f64, v: f64) -> Self::Point;
    /// The derivative along `u`.
    fn uder(&self, u: f64, v: f64) -> Self::Vector;
    /// The derivative along `v`.
    fn vder(&self, u: f64, v: f64) -> Self::Vector;
    /// The second derivative along `u`.
    fn uuder(&self, u: f64, v: f64) -> Self::Vector;
    /// The mixed second derivative.
    fn uvder(&self, u: f64, v: f64) -> Self::Vector;
    /// The second derivative along `v`.
    fn vvder(&self, u: f64, v: f64) -> Self::Vector;
}

/// A 3D parametric surface, with a well-defined unit normal.
pub trait ParametricSurface3D: ParametricSurface<Point = Point3, Vector = Vector3> {
    /// The unit normal vector at `(u, v)`.
    fn normal(&self, u: f64, v: f64) -> Vector3 { self.uder(u, v).cross(self.vder(u, v)).normalize() }
}

/// A surface with a closed, finite parameter range.
pub trait BoundedSurface: ParametricSurface {
    /// The range of the parameters `(u, v)`.
    fn parameter_range(&self) -> ((f64, f64), (f64, f64));
}

/// A surface on which a curve's image is included, enabling exact trimming.
pub trait IncludeCurve<C: ParametricCurve>: ParametricSurface<Point = C::Point> {
    /// Returns whether the image of `curve` lies on `self`.
    fn include(&self, curve: &C) -> bool;
}

/// Geometric elements that can be inverted (orientation reversed).
pub trait Invertible: Clone {
    /// Inverts `self` in place.
    fn invert(&mut self);
    /// Returns an inverted copy of `self`.
    fn inverse(&self) -> Self {
        let mut clone = self.clone();
        clone.invert();
        clone
    }
}

/// Geometric elements that can be affinely transformed.
pub trait Transformed<T>: Clone {
    /// Applies the transform `trans` to `self` in place.
    fn transform_by(&mut self, trans: T);
    /// Returns `self` transformed by `trans`.
    fn transformed(&self, trans: T) -> Self {
        let mut clone = self.clone();
        clone.transform_by(trans);
        clone
    }
}

/// A stopping criterion for the adaptive subdivision performed by
/// [`ParameterDivision1D`] / [`ParameterDivision2D`].
///
/// Implementors decide, for a given sub-interval, whether it must be split
/// further. The standard implementation, [`crate::algo::ChordTolerance`],
/// splits when the chord through the interval deviates from the true curve
/// or surface by more than a tolerance, and additionally stops refining once
/// an interval has shrunk below a minimum span (so a nearly-degenerate
/// patch cannot be subdivided forever).
pub trait TesselationSplitMethod: Copy {
    /// The chord tolerance this method is enforcing, for callers (such as
    /// circular arc subdivision) that need a scalar estimate rather than a
    /// per-cell yes/no split decision.
    fn tol(&self) -> f64;
    /// Returns whether the curve sub-interval `range` needs to be split.
    fn split_curve<C>(&self, curve: &C, range: (f64, f64)) -> bool
    where
        C: ParametricCurve,
        C::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>;
    /// Returns, independently for `u` and `v`, whether the surface patch
    /// `(urange, vrange)` needs to be split.
    fn split_surface<S>(&self, surface: &S, urange: (f64, f64), vrange: (f64, f64)) -> (bool, bool)
    where
        S: ParametricSurface,
        S::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>;
}

/// Adaptive piecewise-linear subdivision of a curve's parameter domain.
pub trait ParameterDivision1D {
    /// The point type produced while subdividing.
    type Point;
    /// Subdivides `range` so that the polyline through the returned points and
    /// parameters approximates the curve per the stopping criterion `split`.
    fn parameter_division<T: TesselationSplitMethod>(
        &self,
        range: (f64, f64),
        split: T,
    ) -> (Vec<f64>, Vec<Self::Point>);
}

/// Adaptive piecewise-linear subdivision of a surface's parameter domain.
pub trait ParameterDivision2D {
    /// Subdivides `(urange, vrange)` into a structured grid approximating the
    /// surface per the stopping criterion `split`.
    fn parameter_division<T: TesselationSplitMethod>(
        &self,
        range: ((f64, f64), (f64, f64)),
        split: T,
    ) -> (Vec<f64>, Vec<f64>);
}

/// A marker type tagging the dimension of a parameter space used in
/// [`SearchParameter`] / [`SearchNearestParameter`].
pub trait SPDimension {
    /// The number of parameters (1 for curves, 2 for surfaces).
    const DIM: usize;
    /// The type of a single parameter value.
    type Parameter: Clone + Copy + std::fmt::Debug;
    /// The hint type accepted to seed the search.
    type Hint: Default;
}

/// Dimension marker for curve parameter search.
#[derive(Clone, Copy, Debug)]
pub enum D1 {}
impl SPDimension for D1 {
    const DIM: usize = 1;
    type Parameter = f64;
    type Hint = SPHint1D;
}

/// Dimension marker for surface parameter search.
#[derive(Clone, Copy, Debug)]
pub enum D2 {}
impl SPDimension for D2 {
    const DIM: usize = 2;
    type Parameter = (f64, f64);
    type Hint = SPHint2D;
}

/// Hint for seeding a 1D (curve) parameter search.
#[derive(Clone, Copy, Debug, Default)]
pub enum SPHint1D {
    /// Start Newton's method from this parameter.
    Parameter(f64),
    /// Run a coarse grid presearch over this range first.
    Range(f64, f64),
    /// No hint: use the curve's own parameter range for a coarse presearch.
    #[default]
    None,
}

impl From<f64> for SPHint1D {
    fn from(t: f64) -> Self { Self::Parameter(t) }
}
impl From<(f64, f64)> for SPHint1D {
    fn from(range: (f64, f64)) -> Self { Self::Range(range.0, range.1) }
}
impl From<Option<f64>> for SPHint1D {
    fn from(hint: Option<f64>) -> Self {
        match hint {
            Some(t) => Self::Parameter(t),
            None => Self::None,
        }
    }
}

/// Hint for seeding a 2D (surface) parameter search.
#[derive(Clone, Copy, Debug, Default)]
pub enum SPHint2D {
    /// Start Newton's method from this `(u, v)`.
    Parameter(f64, f64),
    /// No hint: use the surface's own parameter range for a coarse presearch.
    #[default]
    None,
}

impl From<(f64, f64)> for SPHint2D {
    fn from(uv: (f64, f64)) -> Self { Self::Parameter(uv.0, uv.1) }
}
impl From<Option<(f64, f64)>> for SPHint2D {
    fn from(hint: Option<(f64, f64)>) -> Self {
        match hint {
            Some(uv) => Self::Parameter(uv.0, uv.1),
            None => Self::None,
        }
    }
}

/// Searches for the parameter at which a curve or surface passes exactly
/// through a given point.
pub trait SearchParameter<D: SPDimension> {
    /// The point type being searched for.
    type Point;
    /// Returns the parameter `t`/`(u, v)` such that `self.subs(..) == point`,
    /// or `None` if no such parameter is found within `trials` Newton
    /// iterations.
    fn search_parameter<H: Into<D::Hint>>(
        &self,
        point: Self::Point,
        hint: H,
        trials: usize,
    ) -> Option<D::Parameter>;
}

/// Searches for the parameter at which a curve or surface is nearest to a
/// given point (point inversion).
pub trait SearchNearestParameter<D: SPDimension> {
    /// The point type being searched for.
    type Point;
    /// Returns the parameter minimizing the distance from `self.subs(..)` to
    /// `point`, or `None` if Newton's method fails to converge within
    /// `trials` iterations.
    fn search_nearest_parameter<H: Into<D::Hint>>(
        &self,
        point: Self::Point,
        hint: H,
        trials: usize,
    ) -> Option<D::Parameter>;
}

impl<T: ParametricCurve> ParametricCurve for Box<T> {
    type Point = T::Point;
    type Vector = T::Vector;
    fn subs(&self, t: f64) -> Self::Point { (**self).subs(t) }
    fn der(&self, t: f64) -> Self::Vector { (**self).der(t) }
    fn der2(&self, t: f64) -> Self::Vector { (**self).der2(t) }
    fn parameter_range(&self) -> ParameterRange { (**self).parameter_range() }
    fn period(&self) -> Option<f64> { (**self).period() }
}
