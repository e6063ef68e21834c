//! Model facade over a solver backend.
//!
//! # Module Organization
//!
//! - [`attributes`]: attribute get/set through the two-tier dispatch
//! - [`solve`]: optimize, MIP-start flush, counts and configuration

mod attributes;
mod solve;

use std::ffi::c_void;
use std::time::Duration;

use optiface_expr::{
    ConstraintExpr, ConstraintFunction, ConstraintIndex, ConstraintSense, ExprError,
    ScalarAffineFunction, ScalarQuadraticFunction, SosType, TupleDict, TupleKey, VariableIndex,
};
use optiface_solver::{ObjectiveSense, SolverError, StatusEntry, VariableDomain};
use tracing::{debug, trace};

use crate::dispatch::Dispatch;
use crate::standard::standard_tables;
use crate::start::MipStart;
use crate::traits::Backend;

/// A solver model: the backend plus the state this layer owns on top of it
/// (dispatch tables, deferred MIP start, last solve time).
///
/// Not safe for concurrent use; callers serialize access to one instance.
pub struct Model<B> {
    pub(crate) backend: B,
    pub(crate) mip_start: MipStart,
    pub(crate) dispatch: Dispatch<B>,
    pub(crate) solve_time: Option<Duration>,
}

impl<B: Backend> Model<B> {
    /// Wrap a backend, installing its override tier over the standard tier.
    pub fn new(backend: B) -> Self {
        debug!(
            component = "model",
            operation = "init",
            status = "success",
            solver = B::SOLVER_NAME,
            "Creating model"
        );
        Self {
            backend,
            mip_start: MipStart::new(),
            dispatch: Dispatch::new(B::attribute_overrides(), standard_tables::<B>()),
            solve_time: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Direct backend access; bypasses the deferred start cache.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn dispatch(&self) -> &Dispatch<B> {
        &self.dispatch
    }

    /// Native model pointer for low-level interop.
    pub fn raw_model(&mut self) -> *mut c_void {
        self.backend.raw_model()
    }

    // ── Entities ────────────────────────────────────────────

    pub fn add_variable(
        &mut self,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
        name: Option<&str>,
    ) -> Result<VariableIndex, SolverError> {
        let var = self.backend.add_variable(domain, lower, upper, name)?;
        trace!(
            component = "model",
            operation = "add_variable",
            status = "success",
            var = var.inner(),
            domain = domain.as_str(),
            lower,
            upper,
            "Added variable"
        );
        Ok(var)
    }

    /// Add one variable per key, in key order.
    pub fn add_variables<K: TupleKey>(
        &mut self,
        keys: impl IntoIterator<Item = K>,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
    ) -> Result<TupleDict<K, VariableIndex>, SolverError> {
        let vars = TupleDict::try_from_keys(keys, |_| {
            self.backend.add_variable(domain, lower, upper, None)
        })?;
        debug!(
            component = "model",
            operation = "add_variables",
            status = "success",
            count = vars.len(),
            domain = domain.as_str(),
            "Added variable block"
        );
        Ok(vars)
    }

    pub fn add_linear_constraint(
        &mut self,
        function: &ScalarAffineFunction,
        sense: ConstraintSense,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError> {
        // The backend sees `terms <sense> rhs - constant`.
        let constraint = self.backend.add_linear_constraint(
            &function.without_constant(),
            sense,
            rhs - function.constant(),
            name,
        )?;
        trace!(
            component = "model",
            operation = "add_linear_constraint",
            status = "success",
            terms = function.len(),
            sense = sense.as_str(),
            "Added linear constraint"
        );
        Ok(constraint)
    }

    pub fn add_quadratic_constraint(
        &mut self,
        function: &ScalarQuadraticFunction,
        sense: ConstraintSense,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError> {
        let constraint = self.backend.add_quadratic_constraint(
            &function.without_constant(),
            sense,
            rhs - function.constant(),
            name,
        )?;
        trace!(
            component = "model",
            operation = "add_quadratic_constraint",
            status = "success",
            terms = function.len(),
            sense = sense.as_str(),
            "Added quadratic constraint"
        );
        Ok(constraint)
    }

    /// Add a comparison built from an expression.
    pub fn add_constraint(
        &mut self,
        constraint: &ConstraintExpr,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError> {
        match constraint.function() {
            ConstraintFunction::Affine(function) => {
                self.add_linear_constraint(function, constraint.sense(), constraint.rhs(), name)
            }
            ConstraintFunction::Quadratic(function) => {
                self.add_quadratic_constraint(function, constraint.sense(), constraint.rhs(), name)
            }
        }
    }

    /// Add a special ordered set; `weights` give the order of `variables`.
    pub fn add_sos_constraint(
        &mut self,
        variables: &[VariableIndex],
        weights: &[f64],
        sos_type: SosType,
    ) -> Result<ConstraintIndex, SolverError> {
        if variables.len() != weights.len() {
            return Err(ExprError::MismatchedLengths {
                variables: variables.len(),
                coefficients: weights.len(),
            }
            .into());
        }
        let constraint = self.backend.add_sos_constraint(variables, weights, sos_type)?;
        trace!(
            component = "model",
            operation = "add_sos_constraint",
            status = "success",
            members = variables.len(),
            kind = constraint.kind().as_str(),
            "Added SOS constraint"
        );
        Ok(constraint)
    }

    /// Delete `var`, dropping any start value staged for it.
    pub fn delete_variable(&mut self, var: VariableIndex) -> Result<(), SolverError> {
        self.backend.delete_variable(var)?;
        let dropped_start = self.mip_start.remove(var).is_some();
        debug!(
            component = "model",
            operation = "delete_variable",
            status = "success",
            var = var.inner(),
            dropped_start,
            "Deleted variable"
        );
        Ok(())
    }

    pub fn delete_constraint(&mut self, constraint: ConstraintIndex) -> Result<(), SolverError> {
        self.backend.delete_constraint(constraint)?;
        debug!(
            component = "model",
            operation = "delete_constraint",
            status = "success",
            kind = constraint.kind().as_str(),
            index = constraint.inner(),
            "Deleted constraint"
        );
        Ok(())
    }

    pub fn is_variable_active(&self, var: VariableIndex) -> bool {
        self.backend.is_variable_active(var)
    }

    pub fn is_constraint_active(&self, constraint: ConstraintIndex) -> bool {
        self.backend.is_constraint_active(constraint)
    }

    pub fn set_objective(
        &mut self,
        function: impl Into<ScalarQuadraticFunction>,
        sense: ObjectiveSense,
    ) -> Result<(), SolverError> {
        let function = function.into();
        self.backend.set_objective(&function, sense)?;
        debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            affine_terms = function.affine_part().len(),
            quadratic_terms = function.len(),
            "Set objective"
        );
        Ok(())
    }

    // ── Solve state ─────────────────────────────────────────

    /// Staged start value for `var`, if any.
    pub fn staged_start(&self, var: VariableIndex) -> Option<f64> {
        self.mip_start.get(var)
    }

    pub fn solve_time(&self) -> Option<Duration> {
        self.solve_time
    }

    /// Translate the backend's raw status through the table matching the
    /// model class.
    pub fn status_entry(&self) -> Result<StatusEntry, SolverError> {
        let is_mip = self.backend.is_mip()?;
        let raw = self.backend.raw_status()?;
        B::STATUS_TABLES.select(is_mip).translate(raw)
    }
}

impl<B> std::fmt::Debug for Model<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("mip_start", &self.mip_start)
            .field("dispatch", &self.dispatch)
            .field("solve_time", &self.solve_time)
            .finish_non_exhaustive()
    }
}
