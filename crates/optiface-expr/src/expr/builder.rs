//! Mutable accumulator for affine and quadratic expressions.
//!
//! Terms are keyed by variable (or unordered variable pair) in insertion
//! order. Adding a key that is already present adds to its coefficient, so a
//! builder never holds duplicate keys.
//!
//! Zero policy: a term whose coefficient is exactly `0.0` is treated as
//! absent. Accessors and [`ExprBuilder::finalize`] never report it. The slot
//! is kept internally until the snapshot is taken so cancellation stays O(1).

use indexmap::IndexMap;

use crate::expr::affine::ScalarAffineFunction;
use crate::expr::constraint::{ConstraintExpr, ConstraintFunction, ConstraintSense};
use crate::expr::error::ExprError;
use crate::expr::quadratic::ScalarQuadraticFunction;
use crate::expr::sum::Summand;
use crate::ids::{VariableIndex, VariablePair};

#[derive(Debug, Clone, Default)]
pub struct ExprBuilder {
    constant: f64,
    affine: IndexMap<VariableIndex, f64>,
    quadratic: IndexMap<VariablePair, f64>,
}

impl ExprBuilder {
    // ── Constructors ────────────────────────────────────────

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_constant(constant: f64) -> Self {
        Self {
            constant,
            ..Self::default()
        }
    }

    /// Pre-size the term maps for bulk accumulation.
    pub fn with_capacity(affine_terms: usize, quadratic_terms: usize) -> Self {
        Self {
            constant: 0.0,
            affine: IndexMap::with_capacity(affine_terms),
            quadratic: IndexMap::with_capacity(quadratic_terms),
        }
    }

    // ── Accumulation ────────────────────────────────────────

    pub fn add_constant(&mut self, value: f64) -> &mut Self {
        self.constant += value;
        self
    }

    /// Add `coeff * var`, merging with an existing term for `var`.
    pub fn add_term(&mut self, var: VariableIndex, coeff: f64) -> &mut Self {
        if coeff != 0.0 {
            *self.affine.entry(var).or_insert(0.0) += coeff;
        }
        self
    }

    /// Add `coeff * a * b`, merging with an existing term for the pair.
    pub fn add_quadratic_term(
        &mut self,
        a: VariableIndex,
        b: VariableIndex,
        coeff: f64,
    ) -> &mut Self {
        if coeff != 0.0 {
            *self.quadratic.entry(VariablePair::new(a, b)).or_insert(0.0) += coeff;
        }
        self
    }

    pub fn add_affine(&mut self, function: &ScalarAffineFunction) -> &mut Self {
        self.add_affine_scaled(function, 1.0)
    }

    pub fn add_quadratic(&mut self, function: &ScalarQuadraticFunction) -> &mut Self {
        self.add_quadratic_scaled(function, 1.0)
    }

    pub fn add_builder(&mut self, other: &ExprBuilder) -> &mut Self {
        self.add_builder_scaled(other, 1.0)
    }

    /// Add any summand (handle, term, function, builder or constant).
    pub fn add<S: Summand>(&mut self, item: S) -> &mut Self {
        item.add_to(self, 1.0);
        self
    }

    /// Subtract any summand.
    pub fn sub<S: Summand>(&mut self, item: S) -> &mut Self {
        item.add_to(self, -1.0);
        self
    }

    /// Add the product of two affine functions as quadratic, affine and
    /// constant parts.
    pub fn add_product(
        &mut self,
        left: &ScalarAffineFunction,
        right: &ScalarAffineFunction,
    ) -> &mut Self {
        for (a, ca) in left.terms() {
            for (b, cb) in right.terms() {
                self.add_quadratic_term(*a, *b, ca * cb);
            }
        }
        let (left_constant, right_constant) = (left.constant(), right.constant());
        if right_constant != 0.0 {
            for (a, ca) in left.terms() {
                self.add_term(*a, ca * right_constant);
            }
        }
        if left_constant != 0.0 {
            for (b, cb) in right.terms() {
                self.add_term(*b, left_constant * cb);
            }
        }
        self.constant += left_constant * right_constant;
        self
    }

    /// Multiply every coefficient and the constant by `factor`.
    pub fn scale(&mut self, factor: f64) -> &mut Self {
        self.constant *= factor;
        for coeff in self.affine.values_mut() {
            *coeff *= factor;
        }
        for coeff in self.quadratic.values_mut() {
            *coeff *= factor;
        }
        self
    }

    pub(crate) fn add_affine_scaled(
        &mut self,
        function: &ScalarAffineFunction,
        factor: f64,
    ) -> &mut Self {
        self.affine.reserve(function.len());
        for (var, coeff) in function.terms() {
            self.add_term(*var, coeff * factor);
        }
        self.constant += function.constant() * factor;
        self
    }

    pub(crate) fn add_quadratic_scaled(
        &mut self,
        function: &ScalarQuadraticFunction,
        factor: f64,
    ) -> &mut Self {
        self.quadratic.reserve(function.len());
        for (pair, coeff) in function.terms() {
            self.add_quadratic_term(pair.first(), pair.second(), coeff * factor);
        }
        self.add_affine_scaled(function.affine_part(), factor)
    }

    pub(crate) fn add_builder_scaled(&mut self, other: &ExprBuilder, factor: f64) -> &mut Self {
        for (var, coeff) in other.affine_terms() {
            self.add_term(var, coeff * factor);
        }
        for (pair, coeff) in other.quadratic_terms() {
            self.add_quadratic_term(pair.first(), pair.second(), coeff * factor);
        }
        self.constant += other.constant * factor;
        self
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Coefficient of `var`, or `None` when absent or cancelled to zero.
    pub fn coefficient(&self, var: VariableIndex) -> Option<f64> {
        self.affine.get(&var).copied().filter(|c| *c != 0.0)
    }

    pub fn quadratic_coefficient(&self, a: VariableIndex, b: VariableIndex) -> Option<f64> {
        self.quadratic
            .get(&VariablePair::new(a, b))
            .copied()
            .filter(|c| *c != 0.0)
    }

    /// Non-zero linear terms in insertion order.
    pub fn affine_terms(&self) -> impl Iterator<Item = (VariableIndex, f64)> + '_ {
        self.affine
            .iter()
            .filter(|(_, c)| **c != 0.0)
            .map(|(v, c)| (*v, *c))
    }

    /// Non-zero quadratic terms in insertion order.
    pub fn quadratic_terms(&self) -> impl Iterator<Item = (VariablePair, f64)> + '_ {
        self.quadratic
            .iter()
            .filter(|(_, c)| **c != 0.0)
            .map(|(p, c)| (*p, *c))
    }

    pub fn num_affine_terms(&self) -> usize {
        self.affine_terms().count()
    }

    pub fn num_quadratic_terms(&self) -> usize {
        self.quadratic_terms().count()
    }

    /// Max degree of any non-zero term (0 = constant only).
    pub fn degree(&self) -> usize {
        if self.quadratic.values().any(|c| *c != 0.0) {
            2
        } else {
            usize::from(self.affine.values().any(|c| *c != 0.0))
        }
    }

    /// True when there are no non-zero terms and the constant is zero.
    pub fn is_empty(&self) -> bool {
        self.constant == 0.0 && self.degree() == 0
    }

    pub fn clear(&mut self) {
        self.constant = 0.0;
        self.affine.clear();
        self.quadratic.clear();
    }

    // ── Snapshots ───────────────────────────────────────────

    /// Immutable snapshot of the whole expression.
    pub fn finalize(&self) -> ScalarQuadraticFunction {
        ScalarQuadraticFunction::from_parts_unchecked(
            self.quadratic_terms().collect(),
            self.affine_snapshot(),
        )
    }

    /// Snapshot as an affine function; fails if quadratic terms remain.
    pub fn finalize_affine(&self) -> Result<ScalarAffineFunction, ExprError> {
        if self.degree() == 2 {
            return Err(ExprError::NotAffine);
        }
        Ok(self.affine_snapshot())
    }

    pub(crate) fn affine_snapshot(&self) -> ScalarAffineFunction {
        ScalarAffineFunction::from_parts_unchecked(self.affine_terms().collect(), self.constant)
    }

    /// Compare against a scalar, moving the constant to the right-hand side.
    pub fn compare(&self, sense: ConstraintSense, rhs: f64) -> ConstraintExpr {
        let rhs = rhs - self.constant;
        let affine = ScalarAffineFunction::from_parts_unchecked(self.affine_terms().collect(), 0.0);
        let function = if self.degree() == 2 {
            ConstraintFunction::Quadratic(ScalarQuadraticFunction::from_parts_unchecked(
                self.quadratic_terms().collect(),
                affine,
            ))
        } else {
            ConstraintFunction::Affine(affine)
        };
        ConstraintExpr::new(function, sense, rhs)
    }
}

impl From<VariableIndex> for ExprBuilder {
    fn from(var: VariableIndex) -> Self {
        let mut builder = Self::new();
        builder.add_term(var, 1.0);
        builder
    }
}

impl From<&ScalarAffineFunction> for ExprBuilder {
    fn from(function: &ScalarAffineFunction) -> Self {
        let mut builder = Self::with_capacity(function.len(), 0);
        builder.add_affine(function);
        builder
    }
}

impl From<ScalarAffineFunction> for ExprBuilder {
    fn from(function: ScalarAffineFunction) -> Self {
        Self::from(&function)
    }
}

impl From<&ScalarQuadraticFunction> for ExprBuilder {
    fn from(function: &ScalarQuadraticFunction) -> Self {
        let mut builder = Self::with_capacity(function.affine_part().len(), function.len());
        builder.add_quadratic(function);
        builder
    }
}

impl From<ScalarQuadraticFunction> for ExprBuilder {
    fn from(function: ScalarQuadraticFunction) -> Self {
        Self::from(&function)
    }
}

impl From<f64> for ExprBuilder {
    fn from(constant: f64) -> Self {
        Self::with_constant(constant)
    }
}
