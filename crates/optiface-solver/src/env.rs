//! Process-wide, lazily initialized backend environment.
//!
//! Backends keep one `static EnvCell<TheirEnv>` for the environment used when
//! the caller does not pass one explicitly.

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::SolverError;

/// Single-initialization slot for a shared environment.
///
/// The first caller runs the initializer; every caller (including concurrent
/// ones that raced the first) observes the same outcome. A failed
/// initialization is cached, so a misconfigured environment keeps failing
/// instead of being retried.
pub struct EnvCell<E> {
    slot: OnceLock<Result<Arc<E>, SolverError>>,
}

impl<E> EnvCell<E> {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    pub fn get_or_init(
        &self,
        init: impl FnOnce() -> Result<E, SolverError>,
    ) -> Result<Arc<E>, SolverError> {
        self.slot
            .get_or_init(|| {
                let result = init().map(Arc::new);
                match &result {
                    Ok(_) => debug!(
                        component = "env",
                        operation = "init_default",
                        status = "success",
                        "Initialized default environment"
                    ),
                    Err(error) => warn!(
                        component = "env",
                        operation = "init_default",
                        status = "error",
                        error = %error,
                        "Default environment initialization failed"
                    ),
                }
                result
            })
            .clone()
    }

    /// Outcome of the initialization, if it has run.
    pub fn get(&self) -> Option<Result<Arc<E>, SolverError>> {
        self.slot.get().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

impl<E> Default for EnvCell<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EnvCell<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvCell")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
