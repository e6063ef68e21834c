//! Immutable affine function: unique variable terms plus a constant.

use serde::{Deserialize, Serialize};

use crate::expr::builder::ExprBuilder;
use crate::expr::constraint::{ConstraintExpr, ConstraintSense};
use crate::expr::error::ExprError;
use crate::ids::VariableIndex;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarAffineFunction {
    terms: Vec<(VariableIndex, f64)>,
    constant: f64,
}

impl ScalarAffineFunction {
    // ── Constructors ────────────────────────────────────────

    /// Build from raw terms; duplicates are merged and zeros dropped.
    pub fn new(terms: impl IntoIterator<Item = (VariableIndex, f64)>, constant: f64) -> Self {
        let mut builder = ExprBuilder::with_constant(constant);
        for (var, coeff) in terms {
            builder.add_term(var, coeff);
        }
        builder.affine_snapshot()
    }

    /// Build from parallel coefficient and variable slices.
    pub fn from_parallel(
        coefficients: &[f64],
        variables: &[VariableIndex],
        constant: f64,
    ) -> Result<Self, ExprError> {
        if coefficients.len() != variables.len() {
            return Err(ExprError::MismatchedLengths {
                variables: variables.len(),
                coefficients: coefficients.len(),
            });
        }
        Ok(Self::new(
            variables.iter().copied().zip(coefficients.iter().copied()),
            constant,
        ))
    }

    pub fn from_constant(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Single term `coeff * var`.
    pub fn term(var: VariableIndex, coeff: f64) -> Self {
        Self::new([(var, coeff)], 0.0)
    }

    pub fn var(var: VariableIndex) -> Self {
        Self::term(var, 1.0)
    }

    /// Caller guarantees unique, non-zero terms.
    pub(crate) fn from_parts_unchecked(terms: Vec<(VariableIndex, f64)>, constant: f64) -> Self {
        Self { terms, constant }
    }

    pub(crate) fn from_builder(builder: &ExprBuilder) -> Self {
        builder.affine_snapshot()
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn terms(&self) -> &[(VariableIndex, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// Number of variable terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn coefficient(&self, var: VariableIndex) -> Option<f64> {
        self.terms
            .iter()
            .find_map(|(v, c)| (*v == var).then_some(*c))
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableIndex> + '_ {
        self.terms.iter().map(|(v, _)| *v)
    }

    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.terms.iter().map(|(_, c)| *c)
    }

    /// Terms sorted by variable, for order-insensitive comparison.
    pub fn sorted_terms(&self) -> Vec<(VariableIndex, f64)> {
        let mut terms = self.terms.clone();
        terms.sort_by_key(|(v, _)| *v);
        terms
    }

    pub fn into_parts(self) -> (Vec<(VariableIndex, f64)>, f64) {
        (self.terms, self.constant)
    }

    /// Value of the function for the given variable assignment.
    pub fn evaluate(&self, value: impl Fn(VariableIndex) -> f64) -> f64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, (v, c)| acc + c * value(*v))
    }

    // ── Operations ──────────────────────────────────────────

    pub fn scale(&self, by: f64) -> Self {
        let mut builder = ExprBuilder::new();
        builder.add_affine_scaled(self, by);
        builder.affine_snapshot()
    }

    pub fn without_constant(&self) -> Self {
        Self {
            terms: self.terms.clone(),
            constant: 0.0,
        }
    }

    // ── Comparisons ─────────────────────────────────────────

    pub fn compare(&self, sense: ConstraintSense, rhs: f64) -> ConstraintExpr {
        ExprBuilder::from(self).compare(sense, rhs)
    }

    pub fn le(&self, rhs: f64) -> ConstraintExpr {
        self.compare(ConstraintSense::LessEqual, rhs)
    }

    pub fn ge(&self, rhs: f64) -> ConstraintExpr {
        self.compare(ConstraintSense::GreaterEqual, rhs)
    }

    pub fn eq_to(&self, rhs: f64) -> ConstraintExpr {
        self.compare(ConstraintSense::Equal, rhs)
    }
}
