//! Summation of heterogeneous expression pieces into one builder.

use crate::expr::affine::ScalarAffineFunction;
use crate::expr::builder::ExprBuilder;
use crate::expr::quadratic::ScalarQuadraticFunction;
use crate::ids::VariableIndex;

/// Anything that can be accumulated into an [`ExprBuilder`] with a factor.
pub trait Summand {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64);
}

impl Summand for f64 {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_constant(self * factor);
    }
}

impl Summand for &f64 {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        (*self).add_to(builder, factor);
    }
}

impl Summand for VariableIndex {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_term(self, factor);
    }
}

impl Summand for &VariableIndex {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_term(*self, factor);
    }
}

/// `(var, coeff)` term.
impl Summand for (VariableIndex, f64) {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_term(self.0, self.1 * factor);
    }
}

impl Summand for &ScalarAffineFunction {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_affine_scaled(self, factor);
    }
}

impl Summand for ScalarAffineFunction {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_affine_scaled(&self, factor);
    }
}

impl Summand for &ScalarQuadraticFunction {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_quadratic_scaled(self, factor);
    }
}

impl Summand for ScalarQuadraticFunction {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_quadratic_scaled(&self, factor);
    }
}

impl Summand for &ExprBuilder {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_builder_scaled(self, factor);
    }
}

impl Summand for ExprBuilder {
    fn add_to(self, builder: &mut ExprBuilder, factor: f64) {
        builder.add_builder_scaled(&self, factor);
    }
}

/// Sum an iterator of summands into a fresh builder.
///
/// The result depends only on the multiset of items, never on their order,
/// apart from the insertion order of the resulting terms.
pub fn quicksum<I>(items: I) -> ExprBuilder
where
    I: IntoIterator,
    I::Item: Summand,
{
    let mut builder = ExprBuilder::new();
    quicksum_into(&mut builder, items);
    builder
}

/// Accumulate an iterator of summands into an existing builder.
pub fn quicksum_into<I>(builder: &mut ExprBuilder, items: I)
where
    I: IntoIterator,
    I::Item: Summand,
{
    for item in items {
        item.add_to(builder, 1.0);
    }
}
