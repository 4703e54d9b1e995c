//! Newton-least-squares solver with substitution, rank testing, and
//! redundancy isolation (`spec.md` §4.5). Grounded on
//! `examples/original_source/src/system.cpp`'s `Solve` pipeline; the linear
//! algebra itself is plain Gauss-Newton over `nalgebra` dynamic matrices
//! rather than `solvcad-base::newton`'s fixed-size `Matrix2/3/4` Jacobian,
//! since a sketch's unknown count is unbounded (up to [`MAX_UNKNOWNS`]).

use std::collections::{HashMap, HashSet};

use nalgebra::{DMatrix, DVector};
use solvcad_expr::{BinaryOp, Expr};
use solvcad_ids::{HConstraint, HEntity, HGroup, HParam, IdTable};
use tracing::{debug, trace};

use crate::constraint::{Constraint, ConstraintKind};
use crate::entity::Entity;
use crate::param::ParamTable;
use crate::config::SolveConfig;

/// Hard cap on unknowns in one group's solve (§4.5, §7); exceeding it
/// returns [`SolveResult::TooManyUnknowns`] before any Jacobian is
/// allocated.
pub const MAX_UNKNOWNS: usize = 1024;

/// Residual tolerance below which Newton-least-squares is considered
/// converged.
pub const CONVERGE_TOLERANCE: f64 = 1e-8;

/// Gram-Schmidt row-norm tolerance (squared against [`RANK_MAG_TOLERANCE`])
/// used by the rank test. Calibrated against human-scale (millimeter)
/// sketches; preserved literally per §9 — changing it changes which
/// constraint sets are called redundant.
pub const RANK_MAG_TOLERANCE: f64 = 1e-4;

/// Maximum Newton iterations before declaring non-convergence.
const MAX_ITERATIONS: usize = 50;

/// Column weight applied to a dragged param before forming `JᵀJ`, so nearby
/// free params absorb an interactive drag instead of fighting it.
const DRAG_WEIGHT: f64 = 1.0 / 20.0;

/// Outcome of solving one group (§4.5).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SolveResult {
    Okay,
    DidntConverge,
    RedundantOkay,
    RedundantDidntConverge,
    TooManyUnknowns,
}

/// The full result of a group solve: status, degree-of-freedom count, and
/// (if requested) the constraints whose removal would restore full rank.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    pub result: SolveResult,
    pub dof: usize,
    pub bad_constraints: Vec<HConstraint>,
}

/// Solves every constraint and entity owned by `group`, writing converged
/// values back into `params` in place. `is_unknown` decides which params in
/// the collected equations are free variables of this solve; every other
/// referenced param is treated as a known constant (the previous group's
/// already-solved geometry). `calculate_faileds` enables step 6's
/// redundancy isolation, which is otherwise skipped to save the extra rank
/// tests.
pub fn solve_group(
    group: HGroup,
    entities: &IdTable<HEntity, Entity>,
    constraints: &IdTable<HConstraint, Constraint>,
    params: &mut ParamTable,
    is_unknown: impl Fn(HParam) -> bool,
    config: SolveConfig,
    calculate_faileds: bool,
) -> SolveOutcome {
    // --- Step 1: collect equations, tagged by originating constraint.
    let mut tagged: Vec<(Option<HConstraint>, bool, Expr)> = Vec::new();
    for (h, c) in constraints.iter().filter(|(_, c)| c.group() == group) {
        if config.relax_constraints && !matches!(c.kind(), ConstraintKind::PointsCoincident { .. }) {
            continue;
        }
        let is_coincidence = matches!(c.kind(), ConstraintKind::PointsCoincident { .. });
        let reference_override = config.all_dimensions_reference && !is_coincidence;
        if reference_override {
            continue;
        }
        for eq in c.equations(entities, params) {
            tagged.push((Some(*h), is_coincidence, eq));
        }
    }
    for (_, e) in entities.iter().filter(|(_, e)| e.group() == group) {
        for eq in e.own_equations() {
            tagged.push((None, false, eq));
        }
    }

    let mut unknowns: Vec<HParam> = Vec::new();
    let mut seen: HashSet<HParam> = HashSet::new();
    for (_, _, eq) in &tagged {
        collect_params(eq, params, &is_unknown, &mut seen, &mut unknowns);
    }
    let initial_unknown_count = unknowns.len();

    debug!(group = ?group, equations = tagged.len(), unknowns = initial_unknown_count, "solve_group: collected");

    if initial_unknown_count > MAX_UNKNOWNS {
        return SolveOutcome { result: SolveResult::TooManyUnknowns, dof: 0, bad_constraints: Vec::new() };
    }

    let mut live: Vec<usize> = (0..tagged.len()).collect();
    let mut unknown_set: HashSet<HParam> = unknowns.iter().copied().collect();

    // --- Step 2: substitution (skipped when a full DOF check is forced).
    let mut substituted_count = 0usize;
    if !config.force_dof_check {
        substituted_count = substitute_coincidences(&mut tagged, &mut live, &mut unknown_set, params);
    }
    unknowns.retain(|p| unknown_set.contains(p));

    // --- Step 3: solve singletons.
    let singleton_count = solve_singletons(&tagged, &mut live, &mut unknown_set, params);
    unknowns.retain(|p| unknown_set.contains(p));

    // --- Step 4: linearize & rank-test.
    let m = live.len();
    let n = unknowns.len();
    let jacobian = build_jacobian(&tagged, &live, &unknowns, params);
    let rank = numerical_rank(&jacobian);
    let redundant = rank < m;

    // --- Step 5: Newton-least-squares over the remaining system.
    let converged = if n == 0 {
        m == 0
    } else {
        newton_least_squares(&tagged, &live, &unknowns, params)
    };

    let result = match (redundant, converged) {
        (false, true) => SolveResult::Okay,
        (false, false) => SolveResult::DidntConverge,
        (true, true) => SolveResult::RedundantOkay,
        (true, false) => SolveResult::RedundantDidntConverge,
    };

    // --- Step 6: redundancy isolation.
    let bad_constraints = if redundant && calculate_faileds {
        isolate_redundant(&tagged, &live, &unknowns, params)
    } else {
        Vec::new()
    };

    // --- Step 7: commit degree-of-freedom bookkeeping.
    let dof = initial_unknown_count.saturating_sub(substituted_count + singleton_count + rank);
    if config.force_dof_check {
        mark_free_params(&jacobian, &unknowns, params);
    }

    trace!(?result, dof, redundant_constraints = bad_constraints.len(), "solve_group: done");
    SolveOutcome { result, dof, bad_constraints }
}

fn collect_params(
    e: &Expr,
    params: &ParamTable,
    is_unknown: &impl Fn(HParam) -> bool,
    seen: &mut HashSet<HParam>,
    out: &mut Vec<HParam>,
) {
    match e {
        Expr::Constant(_) | Expr::ParamPtr(_) | Expr::Variable(_) => {}
        Expr::Param(p) => {
            if is_unknown(*p) && params.get(*p).map(|pp| !pp.is_substituted()).unwrap_or(true) && seen.insert(*p) {
                out.push(*p);
            }
        }
        Expr::Unary(_, a) => collect_params(a, params, is_unknown, seen, out),
        Expr::Binary(_, a, b) => {
            collect_params(a, params, is_unknown, seen, out);
            collect_params(b, params, is_unknown, seen, out);
        }
    }
}

/// Detects equations of the literal form `param_a - param_b` where both are
/// unknown and neither is dragged, unifies the pair (§4.5 step 2, §8
/// property 3), and rewrites every other live equation in place. Returns
/// the number of params eliminated this way.
fn substitute_coincidences(
    tagged: &mut [(Option<HConstraint>, bool, Expr)],
    live: &mut Vec<usize>,
    unknown_set: &mut HashSet<HParam>,
    params: &mut ParamTable,
) -> usize {
    let mut eliminated = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        let mut found: Option<(usize, HParam, HParam)> = None;
        for &i in live.iter() {
            if let Expr::Binary(BinaryOp::Sub, a, b) = &tagged[i].2 {
                if let (Expr::Param(pa), Expr::Param(pb)) = (a.as_ref(), b.as_ref()) {
                    if unknown_set.contains(pa) && unknown_set.contains(pb) && pa != pb {
                        let dragged_a = params.get(*pa).map(|p| p.dragged()).unwrap_or(false);
                        let dragged_b = params.get(*pb).map(|p| p.dragged()).unwrap_or(false);
                        if dragged_a && dragged_b {
                            continue;
                        }
                        // Dragged params are never eliminated: the non-dragged
                        // one is rewritten in terms of the dragged survivor.
                        let (elim, survivor) = if dragged_b { (*pa, *pb) } else { (*pb, *pa) };
                        found = Some((i, elim, survivor));
                        break;
                    }
                }
            }
        }
        let Some((eq_idx, elim, survivor)) = found else { break };
        live.retain(|&i| i != eq_idx);
        unknown_set.remove(&elim);
        if let Some(p) = params.get_mut(elim) {
            p.set_substituted_into(Some(survivor));
        }
        for &i in live.iter() {
            tagged[i].2 = substitute_param(&tagged[i].2, elim, survivor);
        }
        eliminated += 1;
        changed = true;
    }
    eliminated
}

fn substitute_param(e: &Expr, from: HParam, to: HParam) -> Expr {
    match e {
        Expr::Constant(v) => Expr::Constant(*v),
        Expr::Param(p) => Expr::Param(if *p == from { to } else { *p }),
        Expr::ParamPtr(c) => Expr::ParamPtr(c.clone()),
        Expr::Variable(i) => Expr::Variable(*i),
        Expr::Unary(op, a) => Expr::Unary(*op, Box::new(substitute_param(a, from, to))),
        Expr::Binary(op, a, b) => {
            Expr::Binary(*op, Box::new(substitute_param(a, from, to)), Box::new(substitute_param(b, from, to)))
        }
    }
}

/// Solves, in place, every live equation that references exactly one
/// remaining unknown (§4.5 step 3), via a small 1D Newton loop. Returns the
/// number of params pinned this way.
fn solve_singletons(
    tagged: &[(Option<HConstraint>, bool, Expr)],
    live: &mut Vec<usize>,
    unknown_set: &mut HashSet<HParam>,
    params: &mut ParamTable,
) -> usize {
    let mut solved = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        let mut found: Option<(usize, HParam)> = None;
        for &i in live.iter() {
            let eq = &tagged[i].2;
            let mut refs: Vec<HParam> = Vec::new();
            for &p in unknown_set.iter() {
                if eq.depends_on(p) {
                    refs.push(p);
                    if refs.len() > 1 {
                        break;
                    }
                }
            }
            if refs.len() == 1 {
                found = Some((i, refs[0]));
                break;
            }
        }
        let Some((eq_idx, p)) = found else { break };
        let eq = tagged[eq_idx].2.clone();
        if newton_1d(&eq, p, params) {
            solved += 1;
            unknown_set.remove(&p);
            live.retain(|&i| i != eq_idx);
            changed = true;
        } else {
            // Leave this equation for the full Newton pass; it will be
            // picked up there instead of looping forever on a value Newton
            // can't pin down with a 1x1 system (e.g. a degenerate dtheta/dx).
            break;
        }
    }
    solved
}

fn newton_1d(eq: &Expr, p: HParam, params: &mut ParamTable) -> bool {
    let deriv = eq.partial_wrt(p).fold_constants();
    let mut x = params.value(p);
    for _ in 0..MAX_ITERATIONS {
        let fx = eq.eval(params, &[]);
        if fx.abs() <= CONVERGE_TOLERANCE {
            params.get_mut(p).unwrap().set_value(x);
            return true;
        }
        let dfx = deriv.eval(params, &[]);
        if dfx.abs() < 1e-14 || !dfx.is_finite() {
            return false;
        }
        let next = x - fx / dfx;
        if !next.is_finite() {
            return false;
        }
        x = next;
        params.get_mut(p).unwrap().set_value(x);
    }
    eq.eval(params, &[]).abs() <= CONVERGE_TOLERANCE
}

fn build_jacobian(
    tagged: &[(Option<HConstraint>, bool, Expr)],
    live: &[usize],
    unknowns: &[HParam],
    params: &ParamTable,
) -> DMatrix<f64> {
    let m = live.len();
    let n = unknowns.len();
    let mut j = DMatrix::<f64>::zeros(m.max(1), n.max(1));
    for (row, &i) in live.iter().enumerate() {
        let eq = &tagged[i].2;
        for (col, &p) in unknowns.iter().enumerate() {
            if eq.depends_on(p) {
                j[(row, col)] = eq.partial_wrt(p).fold_constants().eval(params, &[]);
            }
        }
    }
    j
}

/// Gram-Schmidt row rank test with tolerance [`RANK_MAG_TOLERANCE`] squared
/// (§4.5 step 4).
fn numerical_rank(j: &DMatrix<f64>) -> usize {
    let tol2 = RANK_MAG_TOLERANCE * RANK_MAG_TOLERANCE;
    let mut basis: Vec<DVector<f64>> = Vec::new();
    let mut rank = 0;
    for r in 0..j.nrows() {
        let mut row = j.row(r).transpose().into_owned();
        for b in &basis {
            let proj = row.dot(b);
            row -= b * proj;
        }
        let norm2 = row.dot(&row);
        if norm2 > tol2 {
            row /= norm2.sqrt();
            basis.push(row);
            rank += 1;
        }
    }
    rank
}

/// Gauss-Newton with per-column drag weighting, iterating to
/// [`MAX_ITERATIONS`] or until every residual is within
/// [`CONVERGE_TOLERANCE`] (§4.5 step 5). A NaN anywhere is fatal
/// non-convergence.
fn newton_least_squares(
    tagged: &[(Option<HConstraint>, bool, Expr)],
    live: &[usize],
    unknowns: &[HParam],
    params: &mut ParamTable,
) -> bool {
    let m = live.len();
    let n = unknowns.len();
    if m == 0 || n == 0 {
        return m == 0;
    }
    let weights: Vec<f64> = unknowns
        .iter()
        .map(|p| if params.get(*p).map(|pp| pp.dragged()).unwrap_or(false) { DRAG_WEIGHT } else { 1.0 })
        .collect();

    for _iter in 0..MAX_ITERATIONS {
        let f = DVector::from_iterator(m, live.iter().map(|&i| tagged[i].2.eval(params, &[])));
        if f.iter().all(|v| v.abs() <= CONVERGE_TOLERANCE) {
            return true;
        }
        if f.iter().any(|v| !v.is_finite()) {
            return false;
        }
        let mut j = DMatrix::<f64>::zeros(m, n);
        for (row, &i) in live.iter().enumerate() {
            let eq = &tagged[i].2;
            for (col, &p) in unknowns.iter().enumerate() {
                if eq.depends_on(p) {
                    j[(row, col)] = eq.partial_wrt(p).fold_constants().eval(params, &[]) * weights[col];
                }
            }
        }
        let jt = j.transpose();
        let jtj = &jt * &j;
        let rhs = &jt * &f;
        // Small Tikhonov regularization keeps the normal equations solvable
        // across a singleton/substitution pass that left the system exactly
        // square-but-degenerate; a genuinely rank-deficient system is caught
        // separately by the Gram-Schmidt rank test in step 4.
        let regularized = jtj + DMatrix::<f64>::identity(n, n) * 1e-12;
        let Some(lu) = regularized.lu().solve(&rhs) else { return false };
        if lu.iter().any(|v| !v.is_finite()) {
            return false;
        }
        for (col, &p) in unknowns.iter().enumerate() {
            let dx = lu[col] * weights[col];
            if !dx.is_finite() {
                return false;
            }
            let cur = params.value(p);
            params.get_mut(p).unwrap().set_value(cur - dx);
        }
    }
    let f = DVector::from_iterator(m, live.iter().map(|&i| tagged[i].2.eval(params, &[])));
    f.iter().all(|v| v.abs() <= CONVERGE_TOLERANCE)
}

/// Re-runs the rank test omitting each non-coincidence constraint, then
/// each coincidence constraint, keeping the first rank-restoring constraint
/// found in each pass (§4.5 step 6; the two-fixed-pass, first-match policy
/// is carried over from `original_source/` per `SPEC_FULL.md` §2).
fn isolate_redundant(
    tagged: &[(Option<HConstraint>, bool, Expr)],
    live: &[usize],
    unknowns: &[HParam],
    params: &ParamTable,
) -> Vec<HConstraint> {
    let m = live.len();
    let mut by_constraint: HashMap<HConstraint, Vec<usize>> = HashMap::new();
    for &i in live {
        if let Some(c) = tagged[i].0 {
            by_constraint.entry(c).or_default().push(i);
        }
    }
    let mut order: Vec<(HConstraint, bool)> = Vec::new();
    for &i in live {
        if let Some(c) = tagged[i].0 {
            if !order.iter().any(|(h, _)| *h == c) {
                order.push((c, tagged[i].1));
            }
        }
    }

    let mut bad = Vec::new();
    for pass_coincidence in [false, true] {
        for &(c, is_coincidence) in &order {
            if is_coincidence != pass_coincidence {
                continue;
            }
            let omit = &by_constraint[&c];
            let reduced_live: Vec<usize> = live.iter().copied().filter(|i| !omit.contains(i)).collect();
            let reduced_m = m - omit.len();
            let j = build_jacobian(tagged, &reduced_live, unknowns, params);
            let rank = numerical_rank(&j);
            if rank == reduced_m {
                bad.push(c);
                break;
            }
        }
    }
    bad
}

/// Marks each unknown `free` iff its Jacobian column is (numerically) zero
/// against every live equation — nothing pins it down (used only when the
/// caller forces a full DOF check, §4.5 step 7).
fn mark_free_params(jacobian: &DMatrix<f64>, unknowns: &[HParam], params: &mut ParamTable) {
    for (col, &p) in unknowns.iter().enumerate() {
        let free = jacobian.column(col).iter().all(|v| v.abs() <= RANK_MAG_TOLERANCE);
        if let Some(param) = params.get_mut(p) {
            param.set_free(free);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::add_constraint;
    use crate::entity::{add_entity, EntityKind};
    use solvcad_ids::Owner;

    fn free_point(
        entities: &mut IdTable<HEntity, Entity>,
        params: &mut ParamTable,
        owner: Owner,
        group: HGroup,
        x: f64,
        y: f64,
        z: f64,
    ) -> HEntity {
        let px = params.add(owner, x);
        let py = params.add(owner, y);
        let pz = params.add(owner, z);
        add_entity(entities, owner, group, None, EntityKind::PointIn3d { params: [px, py, pz] })
    }

    /// Two points pinned together by `POINTS_COINCIDENT` plus one pinned by
    /// `PT_PT_DISTANCE`: a minimal system that exercises substitution (§4.5
    /// step 2) and Newton-least-squares (step 5) together.
    fn triangle_sketch() -> (IdTable<HEntity, Entity>, IdTable<HConstraint, Constraint>, ParamTable, HGroup) {
        let g = HGroup::from_index(4);
        let owner = Owner::Group(g);
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        let a = free_point(&mut entities, &mut params, owner, g, 0.05, 0.1, 0.0);
        let b = free_point(&mut entities, &mut params, owner, g, 3.1, -0.2, 0.0);
        let c = free_point(&mut entities, &mut params, owner, g, 1.0, 1.0, 0.0);
        let d = free_point(&mut entities, &mut params, owner, g, 1.1, 1.05, 0.0);

        let mut constraints = IdTable::new();
        add_constraint(&mut constraints, g, None, ConstraintKind::PtPtDistance { a, b, value: 3.0 });
        add_constraint(&mut constraints, g, None, ConstraintKind::PointsCoincident { a: c, b: d });
        (entities, constraints, params, g)
    }

    #[test]
    fn distance_constraint_converges() {
        let (entities, constraints, mut params, g) = triangle_sketch();
        let outcome = solve_group(g, &entities, &constraints, &mut params, |_| true, SolveConfig::default(), false);
        assert_eq!(outcome.result, SolveResult::Okay);
    }

    #[test]
    fn redundant_distance_is_flagged() {
        let (entities, mut constraints, mut params, g) = triangle_sketch();
        let a = entities.iter().next().unwrap().0;
        let b = entities.iter().nth(1).unwrap().0;
        // A second, identical PT_PT_DISTANCE between the same pair is
        // perfectly redundant with the first.
        add_constraint(&mut constraints, g, None, ConstraintKind::PtPtDistance { a: *a, b: *b, value: 3.0 });
        let outcome = solve_group(g, &entities, &constraints, &mut params, |_| true, SolveConfig::default(), true);
        assert!(matches!(outcome.result, SolveResult::RedundantOkay | SolveResult::RedundantDidntConverge));
        assert!(!outcome.bad_constraints.is_empty());
    }

    #[test]
    fn too_many_unknowns_short_circuits() {
        let g = HGroup::from_index(9);
        let owner = Owner::Group(g);
        let mut entities = IdTable::new();
        let mut params = ParamTable::new();
        for i in 0..(MAX_UNKNOWNS + 10) {
            free_point(&mut entities, &mut params, owner, g, i as f64, 0.0, 0.0);
        }
        let constraints: IdTable<HConstraint, Constraint> = IdTable::new();
        let outcome = solve_group(g, &entities, &constraints, &mut params, |_| true, SolveConfig::default(), false);
        assert_eq!(outcome.result, SolveResult::TooManyUnknowns);
    }
}
