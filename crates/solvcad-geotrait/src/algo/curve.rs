use super::*;

/// Divides the domain into equal parts, examines all the values, and returns `t` such that `curve.subs(t)` is closest to `point`.
/// This method is useful to get an efficient hint of `search_nearest_parameter`.
pub fn presearch<C>(curve: &C, point: C::Point, range: (f64, f64), division: usize) -> f64
where
    C: ParametricCurve,
    C::Point: MetricSpace<Metric = f64> + Copy, {
    let (t0, t1) = range;
    let mut res = t0;
    let mut min = std::f64::INFINITY;
    for i in 0..=division {
        let p = i as f64 / division as f64;
        let t = t0 * (1.0 - p) + t1 * p;
        let dist = curve.subs(t).distance2(point);
        if dist < min {
            min = dist;
            res = t;
        }
    }
    res
}

/// Searches the nearest parameter by Newton's method.
pub fn search_nearest_parameter<C>(
    curve: &C,
    point: C::Point,
    hint: f64,
    trials: usize,
) -> Option<f64>
where
    C: ParametricCurve,
    C::Point: EuclideanSpace<Scalar = f64, Diff = C::Vector>,
    C::Vector: InnerSpace<Scalar = f64> + Tolerance,
{
    let pt = curve.subs(hint);
    let der = curve.der(hint);
    let der2 = curve.der2(hint);
    let f = der.dot(pt - point);
    let fprime = der2.dot(pt - point) + der.magnitude2();
    if f.so_small2() || fprime.so_small() {
        return Some(hint);
    } else if trials == 0 {
        None
    } else {
        search_nearest_parameter(curve, point, hint - f / fprime, trials - 1)
    }
}

/// Adaptively subdivides `range` per the stopping criterion `split`, returning
/// the chosen parameters together with the corresponding points on `curve`.
pub fn parameter_division<C, T: TesselationSplitMethod>(
    curve: &C,
    range: (f64, f64),
    split: T,
) -> (Vec<f64>, Vec<C::Point>)
where
    C: ParametricCurve,
    C::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>,
{
    let mut division = vec![range.0, range.1];
    sub_parameter_division(curve, &mut division, split);
    let points = division.iter().map(|t| curve.subs(*t)).collect();
    (division, points)
}

fn sub_parameter_division<C, T: TesselationSplitMethod>(curve: &C, division: &mut Vec<f64>, split: T)
where
    C: ParametricCurve,
    C::Point: EuclideanSpace<Scalar = f64> + MetricSpace<Metric = f64>,
{
    let flags = division
        .windows(2)
        .map(|t| split.split_curve(curve, (t[0], t[1])))
        .collect::<Vec<_>>();
    if flags.iter().all(|b| !b) {
        return;
    }
    let mut new_division = vec![division[0]];
    for (t, b) in division.windows(2).zip(flags) {
        if b {
            new_division.push((t[0] + t[1]) / 2.0);
        }
        new_division.push(t[1]);
    }
    *division = new_division;
    sub_parameter_division(curve, division, split);
}
