//! HiGHS backend for the optiface model facade.
//!
//! ```no_run
//! use optiface_highs::HighsModel;
//! use optiface_solver::{ObjectiveSense, VariableDomain};
//!
//! let mut model = HighsModel::new(optiface_highs::HighsBackend::new()?);
//! let x = model.add_variable(VariableDomain::Continuous, 0.0, 4.0, Some("x"))?;
//! model.set_objective(x * 2.0, ObjectiveSense::Maximize)?;
//! model.optimize()?;
//! # Ok::<(), optiface_solver::SolverError>(())
//! ```

mod attributes;
mod backend;
mod env;
mod ffi;
mod status;

pub use backend::HighsBackend;
pub use env::{HighsEnv, OPTIONS_FILE_ENV, default_env};

/// Model facade over HiGHS.
pub type HighsModel = optiface_core::Model<HighsBackend>;
