//! Canonical solver vocabulary shared by optiface backends.
//!
//! - [`VariableAttribute`], [`ModelAttribute`], [`ConstraintAttribute`]: attribute identifiers
//! - [`AttributeValue`]: dynamically typed attribute payload
//! - [`TerminationStatusCode`], [`ResultStatusCode`], [`StatusTable`]: status translation
//! - [`SolverError`]: error taxonomy for dispatch and backend calls
//! - [`SolverConfig`]: common solver settings
//! - [`EnvCell`]: lazily initialized default environment

mod attributes;
mod config;
mod env;
mod error;
pub mod logging;
mod status;

pub use attributes::{
    AttributeOperation, AttributeScope, AttributeValue, ConstraintAttribute, ModelAttribute,
    ObjectiveSense, VariableAttribute, VariableDomain,
};
pub use config::{RawParameter, SolverConfig};
pub use env::EnvCell;
pub use error::SolverError;
pub use logging::{LoggingError, enable_logging};
pub use status::{ResultStatusCode, StatusEntry, StatusTable, StatusTables, TerminationStatusCode};
