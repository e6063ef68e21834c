//! HiGHS environment and the process-wide default instance.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use optiface_core::Model;
use optiface_solver::{EnvCell, SolverError};

use crate::backend::HighsBackend;

/// Environment variable naming a HiGHS options file loaded into every model.
pub const OPTIONS_FILE_ENV: &str = "OPTIFACE_HIGHS_OPTIONS_FILE";

static DEFAULT_ENV: EnvCell<HighsEnv> = EnvCell::new();

/// Settings shared by every HiGHS model created from it.
#[derive(Debug, Clone, Default)]
pub struct HighsEnv {
    options_file: Option<PathBuf>,
}

impl HighsEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read [`OPTIONS_FILE_ENV`] from the process environment.
    pub fn from_env() -> Result<Self, SolverError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SolverError> {
        match lookup(OPTIONS_FILE_ENV) {
            Some(path) if !path.is_empty() => Self::with_options_file(path),
            _ => Ok(Self::new()),
        }
    }

    /// Fails when `path` does not exist.
    pub fn with_options_file(path: impl Into<PathBuf>) -> Result<Self, SolverError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SolverError::BackendConfiguration {
                backend: "HiGHS",
                message: format!("options file {} does not exist", path.display()),
            });
        }
        Ok(Self {
            options_file: Some(path),
        })
    }

    pub fn options_file(&self) -> Option<&Path> {
        self.options_file.as_deref()
    }

    pub fn create_model(&self) -> Result<Model<HighsBackend>, SolverError> {
        Ok(Model::new(HighsBackend::with_env(self)?))
    }
}

/// Shared default environment, initialized from the process environment on
/// first use. Later calls return the same instance, or the same error.
pub fn default_env() -> Result<Arc<HighsEnv>, SolverError> {
    DEFAULT_ENV.get_or_init(HighsEnv::from_env)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name: &str| {
            vars.iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
        }
    }

    #[test]
    fn test_unset_variable_means_no_options_file() {
        let env = HighsEnv::from_lookup(lookup(&[])).unwrap();
        assert!(env.options_file().is_none());

        let env = HighsEnv::from_lookup(lookup(&[(OPTIONS_FILE_ENV, "")])).unwrap();
        assert!(env.options_file().is_none());
    }

    #[test]
    fn test_missing_options_file_is_configuration_error() {
        let err =
            HighsEnv::from_lookup(lookup(&[(OPTIONS_FILE_ENV, "/nonexistent/highs.opt")]))
                .unwrap_err();
        assert_eq!(err.code(), "BACKEND_CONFIGURATION");
        assert!(err.to_string().contains("/nonexistent/highs.opt"));
    }

    #[test]
    fn test_existing_options_file_is_kept() {
        let path = env::temp_dir().join(format!("optiface-highs-{}.opt", std::process::id()));
        std::fs::write(&path, "presolve = off\n").unwrap();
        let env = HighsEnv::with_options_file(&path).unwrap();
        assert_eq!(env.options_file(), Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();
    }
}
