//! Solving, MIP-start submission and pass-through counts.

use std::time::Instant;

use optiface_expr::ConstraintType;
use optiface_solver::{SolverConfig, SolverError, TerminationStatusCode};
use tracing::{debug, warn};

use super::Model;
use crate::start::StartState;
use crate::traits::Backend;

impl<B: Backend> Model<B> {
    /// Submit any staged start values as one batch, then run the blocking
    /// solve.
    ///
    /// If the backend rejects the batch, the staged values are restored and
    /// the solve does not run.
    pub fn optimize(&mut self) -> Result<(), SolverError> {
        self.flush_mip_start()?;

        let started = Instant::now();
        let result = self.backend.optimize();
        let elapsed = started.elapsed();
        self.solve_time = Some(elapsed);

        match &result {
            Ok(()) => debug!(
                component = "model",
                operation = "optimize",
                status = "success",
                solver = B::SOLVER_NAME,
                duration_ms = elapsed.as_secs_f64() * 1000.0,
                "Solve finished"
            ),
            Err(error) => warn!(
                component = "model",
                operation = "optimize",
                status = "error",
                solver = B::SOLVER_NAME,
                code = error.code(),
                error = %error,
                "Solve failed"
            ),
        }
        result
    }

    fn flush_mip_start(&mut self) -> Result<(), SolverError> {
        let Some((variables, values)) = self.mip_start.flush() else {
            return Ok(());
        };
        if let Err(error) = self.backend.add_mip_start(&variables, &values) {
            warn!(
                component = "model",
                operation = "flush_mip_start",
                status = "error",
                count = variables.len(),
                error = %error,
                "Backend rejected MIP start; restoring staged values"
            );
            self.mip_start.restore(variables, values);
            return Err(error);
        }
        debug!(
            component = "model",
            operation = "flush_mip_start",
            status = "success",
            count = variables.len(),
            "Submitted MIP start"
        );
        Ok(())
    }

    pub fn mip_start_state(&self) -> StartState {
        self.mip_start.state()
    }

    pub fn is_mip(&self) -> Result<bool, SolverError> {
        self.backend.is_mip()
    }

    /// Canonical termination status of the last solve.
    pub fn termination_status(&self) -> Result<TerminationStatusCode, SolverError> {
        Ok(self.status_entry()?.termination)
    }

    pub fn number_of_variables(&self) -> Result<usize, SolverError> {
        let count = self.backend.raw_int_attribute(B::VARIABLE_COUNT_ATTRIBUTE)?;
        count_from_raw(B::VARIABLE_COUNT_ATTRIBUTE, count)
    }

    /// Count of constraints of `kind`; fails for types the backend does not
    /// count.
    pub fn number_of_constraints(&self, kind: ConstraintType) -> Result<usize, SolverError> {
        let name = B::CONSTRAINT_COUNT_ATTRIBUTES
            .iter()
            .find_map(|(k, name)| (*k == kind).then_some(*name))
            .ok_or_else(|| {
                warn!(
                    component = "model",
                    operation = "number_of_constraints",
                    status = "error",
                    kind = kind.as_str(),
                    solver = B::SOLVER_NAME,
                    "Constraint type has no count attribute"
                );
                SolverError::UnknownConstraintType {
                    kind,
                    solver: B::SOLVER_NAME,
                }
            })?;
        let count = self.backend.raw_int_attribute(name)?;
        count_from_raw(name, count)
    }

    pub fn apply_config(&mut self, config: &SolverConfig) -> Result<(), SolverError> {
        if config.is_empty() {
            return Ok(());
        }
        self.backend.apply_config(config)?;
        debug!(
            component = "model",
            operation = "apply_config",
            status = "success",
            raw_parameters = config.raw_parameters.len(),
            "Applied solver config"
        );
        Ok(())
    }
}

fn count_from_raw(attribute: &str, raw: i32) -> Result<usize, SolverError> {
    usize::try_from(raw).map_err(|_| {
        warn!(
            component = "model",
            operation = "count",
            status = "error",
            attribute,
            raw,
            "Backend reported a negative count"
        );
        SolverError::backend_call(raw, format!("{attribute} reported negative count {raw}"))
    })
}
