//! The canonical expression tree.
//!
//! [`Expr`] is a closed set of node kinds. Values of the payload types ([`Add`], [`Mul`],
//! [`Power`], [`Log`], [`Trig`] and [`Variable`]) can only be created by the smart constructors in
//! [`simplify`](crate::symbolic::simplify), which run the simplifiers to a fixpoint before
//! allocating a node. As a consequence, every [`Expr`] observable outside this crate satisfies
//! the canonical-form invariants:
//!
//! - [`Expr::Add`] has at least two terms, none of which is itself a sum. At most one term is
//! numeric, no term is `0`, and no two terms share the same symbolic factor.
//! - [`Expr::Mul`] has at least two factors, none of which is itself a product. The numeric part
//! is reduced to at most one integer and one reciprocal `d^-1` with `d > 1`, no two factors share
//! a base, and a lone integer is never paired with a sum (it is distributed instead).
//! - [`Expr::Power`] never has a product or power as its base, never has `0` or `1` as its
//! exponent, never has `1` as its base, and never has two integers as base and exponent, except
//! for the reciprocal `d^-1` of a non-negative integer `d`.
//! - Commutative children are sorted in descending order.
//!
//! # Ordering and equality
//!
//! [`PartialEq`], [`Eq`], [`PartialOrd`], [`Ord`] and [`Hash`] are all structural. Variants are
//! ranked in declaration order (`Constant < Variable < Log < Trig < Power < Mul < Add`), and two
//! expressions of the same variant are compared field by field. Since commutative children are
//! stored sorted, `add(a, b)` and `add(b, a)` produce identical trees.

mod fmt;
mod iter;
mod ops;
#[cfg(feature = "serde")]
mod serialize;

use iter::ExprIter;
use std::{collections::BTreeSet, str::FromStr, sync::Arc};

/// The name of the reserved symbol for Euler's number.
pub const EULER: &str = "e";

/// The name of the reserved symbol for pi.
pub const PI: &str = "pi";

/// Returns true if the given name is reserved for a mathematical constant.
pub fn is_reserved(name: &str) -> bool {
    name == EULER || name == PI
}

/// A canonical symbolic expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expr {
    /// An integer constant.
    Constant(i64),

    /// A variable, or one of the reserved symbols `e` and `pi`.
    Variable(Variable),

    /// A logarithm with an arbitrary base.
    Log(Log),

    /// A trigonometric function applied to an expression.
    Trig(Trig),

    /// An expression raised to the power of another expression. Division is represented as a
    /// power with exponent `-1`.
    Power(Power),

    /// A product of at least two factors.
    Mul(Mul),

    /// A sum of at least two terms.
    Add(Add),
}

/// A named variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    name: Arc<str>,
}

impl Variable {
    pub(crate) fn new_raw(name: &str) -> Self {
        Self { name: Arc::from(name) }
    }

    /// Returns the name of the variable.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if this is one of the reserved symbols `e` and `pi`.
    pub fn is_reserved(&self) -> bool {
        is_reserved(&self.name)
    }
}

/// A sum of terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Add {
    terms: Arc<[Expr]>,
}

impl Add {
    /// Allocates a sum from terms that are already canonical and sorted.
    pub(crate) fn new_raw(terms: Vec<Expr>) -> Self {
        debug_assert!(terms.len() >= 2);
        Self { terms: terms.into() }
    }

    /// Returns the terms of the sum, in descending order.
    pub fn terms(&self) -> &[Expr] {
        &self.terms
    }
}

/// A product of factors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mul {
    factors: Arc<[Expr]>,
}

impl Mul {
    /// Allocates a product from factors that are already canonical and sorted.
    pub(crate) fn new_raw(factors: Vec<Expr>) -> Self {
        debug_assert!(factors.len() >= 2);
        Self { factors: factors.into() }
    }

    /// Returns the factors of the product, in descending order.
    pub fn factors(&self) -> &[Expr] {
        &self.factors
    }
}

/// A base raised to an exponent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Power {
    base: Arc<Expr>,
    exponent: Arc<Expr>,
}

impl Power {
    pub(crate) fn new_raw(base: Expr, exponent: Expr) -> Self {
        Self {
            base: Arc::new(base),
            exponent: Arc::new(exponent),
        }
    }

    /// Returns the base of the power.
    pub fn base(&self) -> &Expr {
        &self.base
    }

    /// Returns the exponent of the power.
    pub fn exponent(&self) -> &Expr {
        &self.exponent
    }
}

/// A logarithm of an argument in some base.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Log {
    base: Arc<Expr>,
    argument: Arc<Expr>,
}

impl Log {
    pub(crate) fn new_raw(base: Expr, argument: Expr) -> Self {
        Self {
            base: Arc::new(base),
            argument: Arc::new(argument),
        }
    }

    /// Returns the base of the logarithm.
    pub fn base(&self) -> &Expr {
        &self.base
    }

    /// Returns the argument of the logarithm.
    pub fn argument(&self) -> &Expr {
        &self.argument
    }

    /// Returns true if this is a natural logarithm, i.e. its base is Euler's number.
    pub fn is_natural(&self) -> bool {
        self.base.is_euler()
    }
}

/// The supported trigonometric functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
    Csc,
    Sec,
    Cot,
}

impl TrigFn {
    /// All trigonometric functions, in declaration order.
    pub const ALL: [TrigFn; 6] = [
        TrigFn::Sin,
        TrigFn::Cos,
        TrigFn::Tan,
        TrigFn::Csc,
        TrigFn::Sec,
        TrigFn::Cot,
    ];

    /// Returns the name of the function, as written in source text.
    pub fn name(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
            TrigFn::Csc => "csc",
            TrigFn::Sec => "sec",
            TrigFn::Cot => "cot",
        }
    }

    /// Applies the function to a floating-point value.
    pub fn eval_f64(self, x: f64) -> f64 {
        match self {
            TrigFn::Sin => x.sin(),
            TrigFn::Cos => x.cos(),
            TrigFn::Tan => x.tan(),
            TrigFn::Csc => x.sin().recip(),
            TrigFn::Sec => x.cos().recip(),
            TrigFn::Cot => x.tan().recip(),
        }
    }
}

/// The error returned when parsing an unknown trigonometric function name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTrigFn(pub String);

impl std::fmt::Display for UnknownTrigFn {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "unknown trigonometric function `{}`", self.0)
    }
}

impl std::error::Error for UnknownTrigFn {}

impl FromStr for TrigFn {
    type Err = UnknownTrigFn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrigFn::ALL
            .into_iter()
            .find(|func| func.name() == s)
            .ok_or_else(|| UnknownTrigFn(s.to_owned()))
    }
}

/// A trigonometric function applied to an expression.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Trig {
    func: TrigFn,
    inside: Arc<Expr>,
}

impl Trig {
    pub(crate) fn new_raw(func: TrigFn, inside: Expr) -> Self {
        Self {
            func,
            inside: Arc::new(inside),
        }
    }

    /// Returns the trigonometric function.
    pub fn func(&self) -> TrigFn {
        self.func
    }

    /// Returns the expression the function is applied to.
    pub fn inside(&self) -> &Expr {
        &self.inside
    }
}

impl Expr {
    /// Returns the reserved symbol for Euler's number.
    pub fn euler() -> Self {
        Expr::Variable(Variable::new_raw(EULER))
    }

    /// Returns the reserved symbol for pi.
    pub fn pi() -> Self {
        Expr::Variable(Variable::new_raw(PI))
    }

    /// Returns true if the expression is the reserved symbol for Euler's number.
    pub fn is_euler(&self) -> bool {
        matches!(self, Expr::Variable(var) if var.name() == EULER)
    }

    /// Returns the value of the expression if it is an [`Expr::Constant`].
    pub fn as_constant(&self) -> Option<i64> {
        match self {
            Expr::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns true if the expression is an [`Expr::Constant`].
    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant(_))
    }

    /// Returns true if the expression is the additive identity.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Constant(0))
    }

    /// Returns true if the expression is the multiplicative identity.
    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Constant(1))
    }

    /// Returns the variable if the expression is an [`Expr::Variable`].
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Expr::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Returns the sum if the expression is an [`Expr::Add`].
    pub fn as_add(&self) -> Option<&Add> {
        match self {
            Expr::Add(add) => Some(add),
            _ => None,
        }
    }

    /// Returns true if the expression is an [`Expr::Add`].
    pub fn is_add(&self) -> bool {
        matches!(self, Expr::Add(_))
    }

    /// Returns the product if the expression is an [`Expr::Mul`].
    pub fn as_mul(&self) -> Option<&Mul> {
        match self {
            Expr::Mul(mul) => Some(mul),
            _ => None,
        }
    }

    /// Returns the power if the expression is an [`Expr::Power`].
    pub fn as_power(&self) -> Option<&Power> {
        match self {
            Expr::Power(power) => Some(power),
            _ => None,
        }
    }

    /// Returns the logarithm if the expression is an [`Expr::Log`].
    pub fn as_log(&self) -> Option<&Log> {
        match self {
            Expr::Log(log) => Some(log),
            _ => None,
        }
    }

    /// Returns the trigonometric function if the expression is an [`Expr::Trig`].
    pub fn as_trig(&self) -> Option<&Trig> {
        match self {
            Expr::Trig(trig) => Some(trig),
            _ => None,
        }
    }

    /// Returns true if the expression is the reciprocal `d^-1` of a non-zero integer `d`.
    pub fn is_reciprocal_constant(&self) -> bool {
        match self {
            Expr::Power(power) => {
                matches!(power.base(), Expr::Constant(d) if *d != 0)
                    && matches!(power.exponent(), Expr::Constant(-1))
            },
            _ => false,
        }
    }

    /// Views the expression as a power: a [`Expr::Power`] is split into its base and exponent,
    /// and anything else is treated as being raised to the power of `1`.
    pub fn base_and_exponent(&self) -> (&Expr, Expr) {
        match self {
            Expr::Power(power) => (power.base(), power.exponent().clone()),
            other => (other, Expr::Constant(1)),
        }
    }

    /// Returns the direct children of the expression, in storage order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Constant(_) | Expr::Variable(_) => Vec::new(),
            Expr::Log(log) => vec![log.base(), log.argument()],
            Expr::Trig(trig) => vec![trig.inside()],
            Expr::Power(power) => vec![power.base(), power.exponent()],
            Expr::Mul(mul) => mul.factors().iter().collect(),
            Expr::Add(add) => add.terms().iter().collect(),
        }
    }

    /// Returns an iterator that traverses the tree of expressions in left-to-right post-order
    /// (i.e. depth-first).
    pub fn post_order_iter(&self) -> ExprIter {
        ExprIter::new(self)
    }

    /// Returns the number of nodes in the expression tree.
    pub fn size(&self) -> usize {
        self.post_order_iter().count()
    }

    /// Returns the names of the variables in the expression, excluding the reserved symbols, in
    /// sorted order.
    pub fn free_variables(&self) -> BTreeSet<&str> {
        self.post_order_iter()
            .filter_map(Expr::as_variable)
            .filter(|var| !var.is_reserved())
            .map(Variable::name)
            .collect()
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Constant(value)
    }
}
