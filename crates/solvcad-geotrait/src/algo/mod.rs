#![allow(clippy::many_single_char_names)]

use crate::traits::*;
use solvcad_base::{
    cgmath64::*,
    hash::HashGen,
    newton::{self, CalcOutput},
    tolerance::*,
};

/// curve algorithms
pub mod curve;
/// surface algorithms
pub mod surface;

/// The standard [`TesselationSplitMethod`]: split while the chord deviates
/// from the true geometry by more than `tol`, but never split an interval
/// once its span has shrunk below `min_span`.
///
/// `min_span` is normally `1.0 / max_segments` for some maximum segment
/// count, preventing runaway recursion on geometry that is genuinely hard
/// to approximate (e.g. near a cusp).
#[derive(Clone, Copy, Debug)]
pub struct ChordTolerance {
    /// maximum allowed chord deviation
    pub tol: f64,
    /// minimum parameter span a cell may be split down to
    pub min_span: f64,
}

impl ChordTolerance {
    /// Creates a chord-tolerance splitter with the default minimum span of
    /// `1.0 / 1000`.
    #[inline(always)]
    pub fn new(tol: f64) -> Self {
        Self {
            tol,
            min_span: 1.0 / 1000.0,
        }
    }
}

fn midpoint_deviation<P>(p0: P, p1: P, mid: P) -> f64
where P: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64> {
    let linear_mid = P::midpoint(p0, p1);
    mid.distance(linear_mid)
}

impl TesselationSplitMethod for ChordTolerance {
    fn tol(&self) -> f64 { self.tol }
    fn split_curve<C>(&self, curve: &C, (t0, t1): (f64, f64)) -> bool
    where
        C: ParametricCurve,
        C::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>,
    {
        if t1 - t0 < self.min_span {
            return false;
        }
        let mid = curve.subs((t0 + t1) / 2.0);
        midpoint_deviation(curve.subs(t0), curve.subs(t1), mid) > self.tol
    }
    fn split_surface<S>(
        &self,
        surface: &S,
        (u0, u1): (f64, f64),
        (v0, v1): (f64, f64),
    ) -> (bool, bool)
    where
        S: ParametricSurface,
        S::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>,
    {
        let (um, vm) = ((u0 + u1) / 2.0, (v0 + v1) / 2.0);
        let split_u = u1 - u0 >= self.min_span && {
            let mid = surface.subs(um, v0);
            midpoint_deviation(surface.subs(u0, v0), surface.subs(u1, v0), mid) > self.tol
                || {
                    let mid = surface.subs(um, v1);
                    midpoint_deviation(surface.subs(u0, v1), surface.subs(u1, v1), mid) > self.tol
                }
        };
        let split_v = v1 - v0 >= self.min_span && {
            let mid = surface.subs(u0, vm);
            midpoint_deviation(surface.subs(u0, v0), surface.subs(u0, v1), mid) > self.tol
                || {
                    let mid = surface.subs(u1, vm);
                    midpoint_deviation(surface.subs(u1, v0), surface.subs(u1, v1), mid) > self.tol
                }
        };
        (split_u, split_v)
    }
}
