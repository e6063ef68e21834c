//! Capability interface a wrapped solver provides to the model facade.

use std::ffi::c_void;

use optiface_expr::{
    ConstraintIndex, ConstraintSense, ConstraintType, ScalarAffineFunction,
    ScalarQuadraticFunction, SosType, VariableIndex,
};
use optiface_solver::{
    ObjectiveSense, RawParameter, SolverConfig, SolverError, StatusTables, VariableDomain,
};

use crate::dispatch::AttributeTables;

/// Trait for solver backends.
///
/// Every method is a direct, blocking call into backend state. Errors the
/// backend reports are returned as [`SolverError::BackendCall`] without
/// reinterpretation.
pub trait Backend {
    /// Name reported through `ModelAttribute::SolverName`.
    const SOLVER_NAME: &'static str;

    /// Raw integer attribute holding the number of variables.
    const VARIABLE_COUNT_ATTRIBUTE: &'static str;

    /// Raw integer attribute holding the number of constraints, per
    /// supported constraint type.
    const CONSTRAINT_COUNT_ATTRIBUTES: &'static [(ConstraintType, &'static str)];

    /// Raw status code tables for continuous and mixed-integer models.
    const STATUS_TABLES: StatusTables;

    // ── Raw attributes ──────────────────────────────────────

    /// Read a raw integer attribute by its backend-native name.
    fn raw_int_attribute(&self, name: &str) -> Result<i32, SolverError>;

    /// Write a raw integer attribute by its backend-native name.
    fn set_raw_int_attribute(&mut self, name: &str, value: i32) -> Result<(), SolverError>;

    /// Read a raw floating-point attribute by its backend-native name.
    fn raw_f64_attribute(&self, name: &str) -> Result<f64, SolverError>;

    /// Set a backend-native parameter.
    fn set_raw_parameter(&mut self, name: &str, value: &RawParameter) -> Result<(), SolverError>;

    // ── Variables ───────────────────────────────────────────

    fn add_variable(
        &mut self,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
        name: Option<&str>,
    ) -> Result<VariableIndex, SolverError>;

    fn variable_lower_bound(&self, var: VariableIndex) -> Result<f64, SolverError>;
    fn set_variable_lower_bound(&mut self, var: VariableIndex, value: f64)
    -> Result<(), SolverError>;
    fn variable_upper_bound(&self, var: VariableIndex) -> Result<f64, SolverError>;
    fn set_variable_upper_bound(&mut self, var: VariableIndex, value: f64)
    -> Result<(), SolverError>;
    fn variable_domain(&self, var: VariableIndex) -> Result<VariableDomain, SolverError>;
    fn set_variable_domain(
        &mut self,
        var: VariableIndex,
        domain: VariableDomain,
    ) -> Result<(), SolverError>;
    fn variable_name(&self, var: VariableIndex) -> Result<String, SolverError>;
    fn set_variable_name(&mut self, var: VariableIndex, name: &str) -> Result<(), SolverError>;

    /// Primal value of `var` in the current solution.
    fn variable_value(&self, var: VariableIndex) -> Result<f64, SolverError>;

    /// Remove `var` and its coefficients from the model. Handles issued to
    /// other variables stay valid.
    fn delete_variable(&mut self, var: VariableIndex) -> Result<(), SolverError>;

    /// False once `var` has been deleted, or for a handle never issued.
    fn is_variable_active(&self, var: VariableIndex) -> bool;

    // ── Constraints ─────────────────────────────────────────

    /// Add `function <sense> rhs`; the function's constant is already folded
    /// into `rhs` by the caller.
    fn add_linear_constraint(
        &mut self,
        function: &ScalarAffineFunction,
        sense: ConstraintSense,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError>;

    fn add_quadratic_constraint(
        &mut self,
        function: &ScalarQuadraticFunction,
        sense: ConstraintSense,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError>;

    /// Add a special ordered set over `variables`, ordered by `weights`.
    /// Both slices have the same length.
    fn add_sos_constraint(
        &mut self,
        variables: &[VariableIndex],
        weights: &[f64],
        sos_type: SosType,
    ) -> Result<ConstraintIndex, SolverError>;

    /// Remove a constraint. Handles issued to other constraints stay valid.
    fn delete_constraint(&mut self, constraint: ConstraintIndex) -> Result<(), SolverError>;

    fn is_constraint_active(&self, constraint: ConstraintIndex) -> bool;

    fn constraint_name(&self, constraint: ConstraintIndex) -> Result<String, SolverError>;
    fn set_constraint_name(
        &mut self,
        constraint: ConstraintIndex,
        name: &str,
    ) -> Result<(), SolverError>;

    /// Row activity of the constraint in the current solution.
    fn constraint_primal(&self, constraint: ConstraintIndex) -> Result<f64, SolverError>;

    /// Dual value (shadow price) of the constraint.
    fn constraint_dual(&self, constraint: ConstraintIndex) -> Result<f64, SolverError>;

    // ── Objective ───────────────────────────────────────────

    fn set_objective(
        &mut self,
        function: &ScalarQuadraticFunction,
        sense: ObjectiveSense,
    ) -> Result<(), SolverError>;
    fn objective_sense(&self) -> Result<ObjectiveSense, SolverError>;
    fn set_objective_sense(&mut self, sense: ObjectiveSense) -> Result<(), SolverError>;
    fn objective_value(&self) -> Result<f64, SolverError>;

    // ── Solve ───────────────────────────────────────────────

    /// Whether the model holds discrete variables; selects the status table.
    fn is_mip(&self) -> Result<bool, SolverError>;

    /// Raw status code of the last solve.
    fn raw_status(&self) -> Result<i32, SolverError>;

    fn has_primal_solution(&self) -> Result<bool, SolverError>;
    fn has_dual_solution(&self) -> Result<bool, SolverError>;

    /// Submit one batch of start values as parallel sequences.
    fn add_mip_start(
        &mut self,
        variables: &[VariableIndex],
        values: &[f64],
    ) -> Result<(), SolverError>;

    /// Blocking solve.
    fn optimize(&mut self) -> Result<(), SolverError>;

    fn silent(&self) -> Result<bool, SolverError>;
    fn set_silent(&mut self, silent: bool) -> Result<(), SolverError>;

    /// Map common settings onto backend parameters.
    fn apply_config(&mut self, config: &SolverConfig) -> Result<(), SolverError>;

    fn version(&self) -> String;

    /// Native model pointer for low-level interop.
    fn raw_model(&mut self) -> *mut c_void;

    /// Attributes whose raw representation differs from the standard
    /// handlers. Empty by default.
    fn attribute_overrides() -> AttributeTables<Self>
    where
        Self: Sized,
    {
        AttributeTables::new()
    }
}
