use solvcad_base::cgmath64::*;
use solvcad_meshalgo::prelude::*;

#[derive(Debug, Clone)]
pub struct IntersectionCurve<P, S> {
	surface0: S,
	surface1: S,
	polyline: PolylineCurve<P>,
	tol: f64,
}


