//! Sparse expression engine for optiface.
//!
//! - [`VariableIndex`] / [`ConstraintIndex`]: value handles issued by a model
//! - [`ExprBuilder`]: mutable accumulator with term merging
//! - [`ScalarAffineFunction`] / [`ScalarQuadraticFunction`]: immutable snapshots
//! - [`quicksum`] and [`TupleDict`]: bulk construction helpers

pub mod expr;
pub mod ids;
pub mod tupledict;

pub use expr::{
    ConstraintExpr, ConstraintFunction, ConstraintSense, ExprBuilder, ExprError,
    ScalarAffineFunction, ScalarQuadraticFunction, Summand, quicksum, quicksum_into,
};
pub use ids::{ConstraintIndex, ConstraintType, SosType, VariableIndex, VariablePair};
pub use tupledict::{TupleDict, TupleKey, product2, product3};
