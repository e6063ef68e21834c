//! Solver configuration applied to a model before solving.

/// Backend-native parameter value, passed through by name.
#[derive(Debug, Clone, PartialEq)]
pub enum RawParameter {
    Bool(bool),
    Int(i32),
    Float(f64),
    Text(String),
}

impl From<bool> for RawParameter {
    fn from(value: bool) -> Self {
        RawParameter::Bool(value)
    }
}

impl From<i32> for RawParameter {
    fn from(value: i32) -> Self {
        RawParameter::Int(value)
    }
}

impl From<f64> for RawParameter {
    fn from(value: f64) -> Self {
        RawParameter::Float(value)
    }
}

impl From<&str> for RawParameter {
    fn from(value: &str) -> Self {
        RawParameter::Text(value.to_string())
    }
}

impl From<String> for RawParameter {
    fn from(value: String) -> Self {
        RawParameter::Text(value)
    }
}

/// Common solver settings, translated by each backend into its own
/// parameter names.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Time limit in seconds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance. `None` uses solver default.
    pub mip_gap: Option<f64>,
    /// Suppress solver console output.
    pub silent: Option<bool>,
    /// Enable/disable presolve. `None` uses solver default.
    pub presolve: Option<bool>,
    /// Number of threads to use. `None` uses solver default.
    pub threads: Option<u32>,
    /// Primal feasibility tolerance. `None` uses solver default.
    pub tolerance: Option<f64>,
    /// Backend-specific parameters, applied after the common ones in order.
    pub raw_parameters: Vec<(String, RawParameter)>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = Some(enabled);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    /// Add a backend-native parameter; later entries win on repeated names.
    pub fn with_raw_parameter(
        mut self,
        name: impl Into<String>,
        value: impl Into<RawParameter>,
    ) -> Self {
        self.raw_parameters.push((name.into(), value.into()));
        self
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.time_limit.is_none()
            && self.mip_gap.is_none()
            && self.silent.is_none()
            && self.presolve.is_none()
            && self.threads.is_none()
            && self.tolerance.is_none()
            && self.raw_parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_is_empty() {
        assert!(SolverConfig::new().is_empty());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = SolverConfig::new()
            .with_time_limit(60.0)
            .with_mip_gap(0.01)
            .with_silent(true)
            .with_presolve(false)
            .with_threads(4)
            .with_tolerance(1e-6);

        assert!(!config.is_empty());
        assert_eq!(config.time_limit, Some(60.0));
        assert_eq!(config.mip_gap, Some(0.01));
        assert_eq!(config.silent, Some(true));
        assert_eq!(config.presolve, Some(false));
        assert_eq!(config.threads, Some(4));
        assert_eq!(config.tolerance, Some(1e-6));
    }

    #[test]
    fn test_config_raw_parameters_keep_order() {
        let config = SolverConfig::new()
            .with_raw_parameter("solver", "ipm")
            .with_raw_parameter("random_seed", 7)
            .with_raw_parameter("mip_heuristic_effort", 0.3);

        assert!(!config.is_empty());
        let names: Vec<&str> = config
            .raw_parameters
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, ["solver", "random_seed", "mip_heuristic_effort"]);
        assert_eq!(config.raw_parameters[1].1, RawParameter::Int(7));
    }
}
