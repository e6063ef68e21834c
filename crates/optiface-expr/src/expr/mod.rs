//! Expression types: builders, immutable functions and constraint expressions.

mod affine;
mod builder;
mod constraint;
mod error;
mod ops;
mod quadratic;
mod sum;

pub use affine::ScalarAffineFunction;
pub use builder::ExprBuilder;
pub use constraint::{ConstraintExpr, ConstraintFunction, ConstraintSense};
pub use error::ExprError;
pub use quadratic::ScalarQuadraticFunction;
pub use sum::{Summand, quicksum, quicksum_into};
