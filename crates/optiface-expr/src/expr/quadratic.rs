//! Immutable quadratic function: unordered-pair terms plus an affine part.

use serde::{Deserialize, Serialize};

use crate::expr::affine::ScalarAffineFunction;
use crate::expr::builder::ExprBuilder;
use crate::expr::constraint::{ConstraintExpr, ConstraintSense};
use crate::ids::{VariableIndex, VariablePair};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarQuadraticFunction {
    terms: Vec<(VariablePair, f64)>,
    affine: ScalarAffineFunction,
}

impl ScalarQuadraticFunction {
    /// Build from raw `(a, b, coeff)` terms and an affine part; pairs are
    /// merged regardless of order and zeros dropped.
    pub fn new(
        terms: impl IntoIterator<Item = (VariableIndex, VariableIndex, f64)>,
        affine: ScalarAffineFunction,
    ) -> Self {
        let mut builder = ExprBuilder::from(&affine);
        for (a, b, coeff) in terms {
            builder.add_quadratic_term(a, b, coeff);
        }
        builder.finalize()
    }

    /// Single product `a * b`.
    pub fn product(a: VariableIndex, b: VariableIndex) -> Self {
        Self::new([(a, b, 1.0)], ScalarAffineFunction::default())
    }

    pub fn from_affine(affine: ScalarAffineFunction) -> Self {
        Self {
            terms: Vec::new(),
            affine,
        }
    }

    /// Caller guarantees unique, non-zero pairs.
    pub(crate) fn from_parts_unchecked(
        terms: Vec<(VariablePair, f64)>,
        affine: ScalarAffineFunction,
    ) -> Self {
        Self { terms, affine }
    }

    pub(crate) fn from_builder(builder: &ExprBuilder) -> Self {
        builder.finalize()
    }

    /// Quadratic terms only.
    pub fn terms(&self) -> &[(VariablePair, f64)] {
        &self.terms
    }

    pub fn affine_part(&self) -> &ScalarAffineFunction {
        &self.affine
    }

    pub fn constant(&self) -> f64 {
        self.affine.constant()
    }

    /// Number of quadratic terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.affine.is_empty()
    }

    pub fn coefficient(&self, a: VariableIndex, b: VariableIndex) -> Option<f64> {
        let key = VariablePair::new(a, b);
        self.terms
            .iter()
            .find_map(|(pair, c)| (*pair == key).then_some(*c))
    }

    pub fn into_parts(self) -> (Vec<(VariablePair, f64)>, ScalarAffineFunction) {
        (self.terms, self.affine)
    }

    pub fn evaluate(&self, value: impl Fn(VariableIndex) -> f64) -> f64 {
        let quadratic: f64 = self
            .terms
            .iter()
            .map(|(pair, c)| c * value(pair.first()) * value(pair.second()))
            .sum();
        quadratic + self.affine.evaluate(value)
    }

    pub fn scale(&self, by: f64) -> Self {
        let mut builder = ExprBuilder::new();
        builder.add_quadratic_scaled(self, by);
        builder.finalize()
    }

    pub fn without_constant(&self) -> Self {
        Self {
            terms: self.terms.clone(),
            affine: self.affine.without_constant(),
        }
    }

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

impl From<ScalarAffineFunction> for ScalarQuadraticFunction {
    fn from(affine: ScalarAffineFunction) -> Self {
        Self::from_affine(affine)
    }
}

impl From<VariableIndex> for ScalarQuadraticFunction {
    fn from(var: VariableIndex) -> Self {
        Self::from_affine(ScalarAffineFunction::var(var))
    }
}

impl From<&ExprBuilder> for ScalarQuadraticFunction {
    fn from(builder: &ExprBuilder) -> Self {
        builder.finalize()
    }
}

impl From<ExprBuilder> for ScalarQuadraticFunction {
    fn from(builder: ExprBuilder) -> Self {
        builder.finalize()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::expr::constraint::ConstraintFunction;

    fn x() -> VariableIndex {
        VariableIndex::new(1)
    }

    fn y() -> VariableIndex {
        VariableIndex::new(2)
    }

    #[test]
    fn reversed_pairs_merge() {
        let q = ScalarQuadraticFunction::new(
            [(x(), y(), 1.0), (y(), x(), 2.0), (x(), x(), 1.0)],
            ScalarAffineFunction::default(),
        );
        assert_eq!(q.len(), 2);
        assert_eq!(q.coefficient(y(), x()), Some(3.0));
        assert_eq!(q.coefficient(x(), x()), Some(1.0));
    }

    #[test]
    fn opposite_pairs_cancel() {
        let q = ScalarQuadraticFunction::new(
            [(x(), y(), 1.0), (y(), x(), -1.0)],
            ScalarAffineFunction::term(x(), 1.0),
        );
        assert!(q.terms().is_empty());
        assert_eq!(q.affine_part().len(), 1);
    }

    #[test]
    fn evaluate_includes_affine_part() {
        // x*y + 2x + 1 at x=2, y=3 -> 6 + 4 + 1
        let q = ScalarQuadraticFunction::new(
            [(x(), y(), 1.0)],
            ScalarAffineFunction::new([(x(), 2.0)], 1.0),
        );
        assert_eq!(q.evaluate(|v| if v == x() { 2.0 } else { 3.0 }), 11.0);
    }

    #[test]
    fn scale_applies_to_all_parts() {
        let q = ScalarQuadraticFunction::new(
            [(x(), x(), 2.0)],
            ScalarAffineFunction::new([(y(), 1.0)], 1.0),
        );
        let scaled = q.scale(3.0);
        assert_eq!(scaled.coefficient(x(), x()), Some(6.0));
        assert_eq!(scaled.affine_part().coefficient(y()), Some(3.0));
        assert_eq!(scaled.constant(), 3.0);
    }

    #[test]
    fn compare_keeps_quadratic_function() {
        let q = ScalarQuadraticFunction::product(x(), y());
        let constraint = q.le(4.0);
        assert!(matches!(
            constraint.function(),
            ConstraintFunction::Quadratic(_)
        ));
    }
}
