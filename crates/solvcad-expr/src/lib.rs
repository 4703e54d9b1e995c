//! Symbolic expression algebra over named parameters (`spec.md` §3.5, §4.1).
//!
//! An [`Expr`] is a small immutable tree built from constants, named params,
//! and a fixed set of unary/binary operators. Expressions are cheap to build
//! and cheap to differentiate symbolically; the solver throws away an entire
//! arena of them after every solve (see `solvcad-sketch`'s per-solve arena).

#![deny(clippy::all, rust_2018_idioms)]

use solvcad_ids::HParam;
use std::cell::Cell;
use std::rc::Rc;

/// A cell holding one parameter's current numeric value, shared by every
/// [`Expr::ParamPtr`] that was rewritten from the same [`HParam`]. This is
/// the safe-Rust equivalent of the reference design's raw `Param*` pointer:
/// it lets a hot evaluation loop skip a handle lookup per reference without
/// introducing unchecked aliasing.
pub type ParamCell = Rc<Cell<f64>>;

/// An expression tree over constants, named params, and a free-variable
/// slot used before an expression is bound to a specific param table.
#[derive(Clone, Debug)]
pub enum Expr {
    /// A literal numeric constant.
    Constant(f64),
    /// A reference to a parameter, resolved by handle lookup at eval time.
    Param(HParam),
    /// A reference to a parameter, resolved through a shared cell. Produced
    /// by [`Expr::deep_copy_with_params_as_pointers`].
    ParamPtr(ParamCell),
    /// An unbound free variable, resolved by index into the `vars` slice
    /// passed to [`Expr::eval`].
    Variable(usize),
    /// Unary operator applied to a sub-expression.
    Unary(UnaryOp, Box<Expr>),
    /// Binary operator applied to two sub-expressions.
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// Unary operators over a single sub-expression.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UnaryOp {
    Negate,
    Sqrt,
    Square,
    Sin,
    Cos,
    Asin,
    Acos,
}

/// Binary operators over two sub-expressions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Magnitude used as the result of dividing by (approximately) zero. The
/// solver's NaN/divergence tests catch it; `eval` itself never panics or
/// raises an exception on ill-conditioned input (§4.1, §7).
pub const DIV_BY_ZERO_MAGNITUDE: f64 = 1e20;

/// Anything that can resolve an [`HParam`] to its current numeric value.
/// Implemented by `solvcad-sketch`'s param table; kept as a trait here so
/// `solvcad-expr` has no dependency on the sketch data model.
pub trait ParamLookup {
    /// Returns the current value of `p`, or `None` if `p` is unknown to the
    /// caller (a bug in the expression, never raised as an error — callers
    /// that build expressions from entity/constraint code never reference a
    /// param outside their own table).
    fn value(&self, p: HParam) -> Option<f64>;
}

impl Expr {
    /// A leaf constant.
    #[inline]
    pub fn constant(v: f64) -> Self { Expr::Constant(v) }
    /// A leaf param reference.
    #[inline]
    pub fn param(p: HParam) -> Self { Expr::Param(p) }

    /// `self + rhs`.
    pub fn add(self, rhs: Expr) -> Expr { Expr::Binary(BinaryOp::Add, Box::new(self), Box::new(rhs)) }
    /// `self - rhs`.
    pub fn sub(self, rhs: Expr) -> Expr { Expr::Binary(BinaryOp::Sub, Box::new(self), Box::new(rhs)) }
    /// `self * rhs`.
    pub fn mul(self, rhs: Expr) -> Expr { Expr::Binary(BinaryOp::Mul, Box::new(self), Box::new(rhs)) }
    /// `self / rhs`.
    pub fn div(self, rhs: Expr) -> Expr { Expr::Binary(BinaryOp::Div, Box::new(self), Box::new(rhs)) }
    /// `-self`.
    pub fn negate(self) -> Expr { Expr::Unary(UnaryOp::Negate, Box::new(self)) }
    /// `sqrt(self)`.
    pub fn sqrt(self) -> Expr { Expr::Unary(UnaryOp::Sqrt, Box::new(self)) }
    /// `self * self`.
    pub fn square(self) -> Expr { Expr::Unary(UnaryOp::Square, Box::new(self)) }
    /// `sin(self)`.
    pub fn sin(self) -> Expr { Expr::Unary(UnaryOp::Sin, Box::new(self)) }
    /// `cos(self)`.
    pub fn cos(self) -> Expr { Expr::Unary(UnaryOp::Cos, Box::new(self)) }
    /// `asin(self)`.
    pub fn asin(self) -> Expr { Expr::Unary(UnaryOp::Asin, Box::new(self)) }
    /// `acos(self)`.
    pub fn acos(self) -> Expr { Expr::Unary(UnaryOp::Acos, Box::new(self)) }

    /// Evaluates the expression. `vars` supplies values for any
    /// [`Expr::Variable`] leaves; pass `&[]` if the tree has none.
    ///
    /// Division by (near-)zero never panics: it returns a large finite
    /// value, signed to match the numerator, so that the solver's
    /// convergence tests (not Rust's arithmetic) are what catches it.
    pub fn eval(&self, params: &impl ParamLookup, vars: &[f64]) -> f64 {
        match self {
            Expr::Constant(v) => *v,
            Expr::Param(p) => params.value(*p).unwrap_or(0.0),
            Expr::ParamPtr(cell) => cell.get(),
            Expr::Variable(i) => vars.get(*i).copied().unwrap_or(0.0),
            Expr::Unary(op, a) => {
                let a = a.eval(params, vars);
                match op {
                    UnaryOp::Negate => -a,
                    UnaryOp::Sqrt => {
                        if a < 0.0 {
                            0.0
                        } else {
                            a.sqrt()
                        }
                    }
                    UnaryOp::Square => a * a,
                    UnaryOp::Sin => a.sin(),
                    UnaryOp::Cos => a.cos(),
                    UnaryOp::Asin => a.clamp(-1.0, 1.0).asin(),
                    UnaryOp::Acos => a.clamp(-1.0, 1.0).acos(),
                }
            }
            Expr::Binary(op, a, b) => {
                let a = a.eval(params, vars);
                let b = b.eval(params, vars);
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => {
                        if b.abs() < 1e-20 {
                            DIV_BY_ZERO_MAGNITUDE.copysign(if a == 0.0 { 1.0 } else { a })
                        } else {
                            a / b
                        }
                    }
                }
            }
        }
    }

    /// Symbolic partial derivative with respect to `p`. Any sub-tree whose
    /// param-set certainly excludes `p` (per [`Expr::depends_on`]) folds
    /// straight to `Constant(0.0)` without descending further.
    pub fn partial_wrt(&self, p: HParam) -> Expr {
        if !self.depends_on(p) {
            return Expr::Constant(0.0);
        }
        match self {
            Expr::Constant(_) | Expr::ParamPtr(_) | Expr::Variable(_) => Expr::Constant(0.0),
            Expr::Param(q) => {
                if *q == p {
                    Expr::Constant(1.0)
                } else {
                    Expr::Constant(0.0)
                }
            }
            Expr::Unary(op, a) => {
                let da = a.partial_wrt(p);
                match op {
                    UnaryOp::Negate => da.negate(),
                    UnaryOp::Sqrt => {
                        // d/dx sqrt(a) = a' / (2 sqrt(a))
                        da.div(Expr::Constant(2.0).mul((**a).clone().sqrt()))
                    }
                    UnaryOp::Square => Expr::Constant(2.0).mul((**a).clone()).mul(da),
                    UnaryOp::Sin => (**a).clone().cos().mul(da),
                    UnaryOp::Cos => (**a).clone().sin().mul(da).negate(),
                    UnaryOp::Asin => {
                        // 1 / sqrt(1 - a^2)
                        let denom = Expr::Constant(1.0).sub((**a).clone().square()).sqrt();
                        da.div(denom)
                    }
                    UnaryOp::Acos => {
                        let denom = Expr::Constant(1.0).sub((**a).clone().square()).sqrt();
                        da.div(denom).negate()
                    }
                }
            }
            Expr::Binary(op, a, b) => {
                let da = a.partial_wrt(p);
                let db = b.partial_wrt(p);
                match op {
                    BinaryOp::Add => da.add(db),
                    BinaryOp::Sub => da.sub(db),
                    BinaryOp::Mul => {
                        // product rule: a'b + ab'
                        da.mul((**b).clone()).add((**a).clone().mul(db))
                    }
                    BinaryOp::Div => {
                        // quotient rule: (a'b - ab') / b^2
                        let num = da.mul((**b).clone()).sub((**a).clone().mul(db));
                        num.div((**b).clone().square())
                    }
                }
            }
        }
    }

    /// Recursively scans whether this tree references `p`, short-circuited
    /// by a cheap hash check first: every node's set of referenced params is
    /// folded into a 61-bit bloom filter (`bit_for`), and a miss there
    /// proves the full scan would also miss.
    pub fn depends_on(&self, p: HParam) -> bool {
        let bit = bit_for(p);
        if self.param_mask() & bit == 0 {
            return false;
        }
        self.scan_for(p)
    }

    fn scan_for(&self, p: HParam) -> bool {
        match self {
            Expr::Constant(_) | Expr::ParamPtr(_) | Expr::Variable(_) => false,
            Expr::Param(q) => *q == p,
            Expr::Unary(_, a) => a.scan_for(p),
            Expr::Binary(_, a, b) => a.scan_for(p) || b.scan_for(p),
        }
    }

    /// The 61-bit bloom filter of every [`HParam`] referenced by this
    /// subtree. A zero bit at position `bit_for(p)` proves `p` is not
    /// referenced; a set bit is merely a (very likely correct) hint.
    pub fn param_mask(&self) -> u64 {
        match self {
            Expr::Constant(_) | Expr::ParamPtr(_) | Expr::Variable(_) => 0,
            Expr::Param(q) => bit_for(*q),
            Expr::Unary(_, a) => a.param_mask(),
            Expr::Binary(_, a, b) => a.param_mask() | b.param_mask(),
        }
    }

    /// Folds every constant-only sub-tree down to a single `Constant` leaf.
    /// Returns the receiver unchanged (structurally) when nothing folds.
    pub fn fold_constants(&self) -> Expr {
        match self {
            Expr::Constant(v) => Expr::Constant(*v),
            Expr::Param(p) => Expr::Param(*p),
            Expr::ParamPtr(c) => Expr::ParamPtr(c.clone()),
            Expr::Variable(i) => Expr::Variable(*i),
            Expr::Unary(op, a) => {
                let a = a.fold_constants();
                if let Expr::Constant(av) = a {
                    Expr::Constant(eval_unary(*op, av))
                } else {
                    Expr::Unary(*op, Box::new(a))
                }
            }
            Expr::Binary(op, a, b) => {
                let a = a.fold_constants();
                let b = b.fold_constants();
                if let (Expr::Constant(av), Expr::Constant(bv)) = (&a, &b) {
                    Expr::Constant(eval_binary(*op, *av, *bv))
                } else {
                    Expr::Binary(*op, Box::new(a), Box::new(b))
                }
            }
        }
    }

    /// Returns a copy of this tree in which every [`Expr::Param`] leaf is
    /// rewritten to an [`Expr::ParamPtr`] resolved through `cell_for`. This
    /// is the hot-path optimization of §4.1: once rewritten, repeated
    /// evaluation (e.g. inside a Newton iteration) touches a shared cell
    /// directly instead of performing a handle lookup per reference.
    pub fn deep_copy_with_params_as_pointers(&self, cell_for: &impl Fn(HParam) -> ParamCell) -> Expr {
        match self {
            Expr::Constant(v) => Expr::Constant(*v),
            Expr::Param(p) => Expr::ParamPtr(cell_for(*p)),
            Expr::ParamPtr(c) => Expr::ParamPtr(c.clone()),
            Expr::Variable(i) => Expr::Variable(*i),
            Expr::Unary(op, a) => {
                Expr::Unary(*op, Box::new(a.deep_copy_with_params_as_pointers(cell_for)))
            }
            Expr::Binary(op, a, b) => Expr::Binary(
                *op,
                Box::new(a.deep_copy_with_params_as_pointers(cell_for)),
                Box::new(b.deep_copy_with_params_as_pointers(cell_for)),
            ),
        }
    }
}

fn eval_unary(op: UnaryOp, a: f64) -> f64 {
    match op {
        UnaryOp::Negate => -a,
        UnaryOp::Sqrt => a.max(0.0).sqrt(),
        UnaryOp::Square => a * a,
        UnaryOp::Sin => a.sin(),
        UnaryOp::Cos => a.cos(),
        UnaryOp::Asin => a.clamp(-1.0, 1.0).asin(),
        UnaryOp::Acos => a.clamp(-1.0, 1.0).acos(),
    }
}

fn eval_binary(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b.abs() < 1e-20 {
                DIV_BY_ZERO_MAGNITUDE.copysign(if a == 0.0 { 1.0 } else { a })
            } else {
                a / b
            }
        }
    }
}

/// Maps a param handle to one of 61 bloom-filter bits. 61 rather than 64 so
/// the all-ones sentinel and a couple of guard bits stay free for future use
/// (mirroring the reference design's choice of word size minus a few bits).
fn bit_for(p: HParam) -> u64 {
    let h = p.0.wrapping_mul(2654435761);
    1u64 << (h % 61)
}

/// Three parallel [`Expr`]s, e.g. the `(x, y, z)` components of a point.
#[derive(Clone, Debug)]
pub struct ExprVector {
    pub x: Expr,
    pub y: Expr,
    pub z: Expr,
}

impl ExprVector {
    pub fn new(x: Expr, y: Expr, z: Expr) -> Self { ExprVector { x, y, z } }

    pub fn minus(&self, rhs: &ExprVector) -> ExprVector {
        ExprVector::new(
            self.x.clone().sub(rhs.x.clone()),
            self.y.clone().sub(rhs.y.clone()),
            self.z.clone().sub(rhs.z.clone()),
        )
    }

    pub fn dot(&self, rhs: &ExprVector) -> Expr {
        self.x.clone().mul(rhs.x.clone())
            .add(self.y.clone().mul(rhs.y.clone()))
            .add(self.z.clone().mul(rhs.z.clone()))
    }

    pub fn cross(&self, rhs: &ExprVector) -> ExprVector {
        ExprVector::new(
            self.y.clone().mul(rhs.z.clone()).sub(self.z.clone().mul(rhs.y.clone())),
            self.z.clone().mul(rhs.x.clone()).sub(self.x.clone().mul(rhs.z.clone())),
            self.x.clone().mul(rhs.y.clone()).sub(self.y.clone().mul(rhs.x.clone())),
        )
    }

    pub fn magnitude_squared(&self) -> Expr { self.dot(self) }

    pub fn components(&self) -> [&Expr; 3] { [&self.x, &self.y, &self.z] }
}

/// Four parallel [`Expr`]s, e.g. the `(w, x, y, z)` components of a
/// quaternion normal.
#[derive(Clone, Debug)]
pub struct ExprQuaternion {
    pub w: Expr,
    pub x: Expr,
    pub y: Expr,
    pub z: Expr,
}

impl ExprQuaternion {
    pub fn new(w: Expr, x: Expr, y: Expr, z: Expr) -> Self { ExprQuaternion { w, x, y, z } }
    pub fn components(&self) -> [&Expr; 4] { [&self.w, &self.x, &self.y, &self.z] }
}

struct ConstLookup;
impl ParamLookup for ConstLookup {
    fn value(&self, _p: HParam) -> Option<f64> { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Table(Vec<(HParam, f64)>);
    impl ParamLookup for Table {
        fn value(&self, p: HParam) -> Option<f64> {
            self.0.iter().find(|(h, _)| *h == p).map(|(_, v)| *v)
        }
    }

    #[test]
    fn eval_basic_arithmetic() {
        let e = Expr::constant(2.0).mul(Expr::constant(3.0)).add(Expr::constant(1.0));
        assert_eq!(e.eval(&ConstLookup, &[]), 7.0);
    }

    #[test]
    fn division_by_zero_does_not_panic() {
        let e = Expr::constant(5.0).div(Expr::constant(0.0));
        let v = e.eval(&ConstLookup, &[]);
        assert!(v.is_finite());
        assert!(v.abs() >= DIV_BY_ZERO_MAGNITUDE);
    }

    #[test]
    fn partial_derivative_of_square_is_2x() {
        let p = HParam(7);
        let e = Expr::param(p).square();
        let de = e.partial_wrt(p).fold_constants();
        let table = Table(vec![(p, 3.0)]);
        assert_eq!(de.eval(&table, &[]), 6.0);
    }

    #[test]
    fn partial_derivative_wrt_unrelated_param_is_zero() {
        let p = HParam(1);
        let q = HParam(2);
        let e = Expr::param(p).sin();
        let de = e.partial_wrt(q).fold_constants();
        assert!(matches!(de, Expr::Constant(v) if v == 0.0));
    }

    #[test]
    fn fold_constants_collapses_pure_constant_tree() {
        let e = Expr::constant(2.0).add(Expr::constant(3.0)).mul(Expr::constant(4.0));
        let folded = e.fold_constants();
        assert!(matches!(folded, Expr::Constant(v) if (v - 20.0).abs() < 1e-12));
    }

    #[test]
    fn deep_copy_with_pointers_tracks_mutation() {
        let p = HParam(9);
        let cell: ParamCell = Rc::new(Cell::new(1.0));
        let e = Expr::param(p).square();
        let copied = e.deep_copy_with_params_as_pointers(&|_| cell.clone());
        assert_eq!(copied.eval(&ConstLookup, &[]), 1.0);
        cell.set(4.0);
        assert_eq!(copied.eval(&ConstLookup, &[]), 16.0);
    }

    #[test]
    fn depends_on_matches_naive_scan() {
        let p = HParam(11);
        let q = HParam(12);
        let e = Expr::param(p).add(Expr::constant(3.0));
        assert!(e.depends_on(p));
        assert!(!e.depends_on(q));
    }

    #[test]
    fn expr_vector_cross_product_is_orthogonal_to_inputs() {
        let table = Table(vec![]);
        let a = ExprVector::new(Expr::constant(1.0), Expr::constant(0.0), Expr::constant(0.0));
        let b = ExprVector::new(Expr::constant(0.0), Expr::constant(1.0), Expr::constant(0.0));
        let c = a.cross(&b);
        assert_eq!(c.dot(&a).eval(&table, &[]), 0.0);
        assert_eq!(c.dot(&b).eval(&table, &[]), 0.0);
        assert_eq!(c.z.eval(&table, &[]), 1.0);
    }
}
