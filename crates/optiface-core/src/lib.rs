//! Solver-agnostic model facade.
//!
//! - [`Backend`]: capability trait a wrapped solver implements
//! - [`Model`]: the facade users build and solve through
//! - [`Dispatch`] / [`AttributeTables`]: two-tier attribute handler lookup
//! - [`MipStart`]: deferred start-value cache

pub mod dispatch;
mod model;
mod standard;
mod start;
mod traits;

pub use dispatch::{
    AttributeTable, AttributeTables, ConstraintGetter, ConstraintSetter, Dispatch, ModelGetter,
    ModelSetter, Tier, VariableGetter, VariableSetter, resolve,
};
pub use model::Model;
pub use standard::standard_tables;
pub use start::{MipStart, StartState};
pub use traits::Backend;
