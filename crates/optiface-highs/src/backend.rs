//! [`Backend`] implementation over a HiGHS instance.

use std::ffi::c_void;

use highs_sys::HighsInt;
use optiface_core::{AttributeTables, Backend};
use optiface_expr::{
    ConstraintIndex, ConstraintSense, ConstraintType, ScalarAffineFunction,
    ScalarQuadraticFunction, SosType, VariableIndex, VariablePair,
};
use optiface_solver::{
    ObjectiveSense, RawParameter, SolverConfig, SolverError, StatusTables, VariableDomain,
};
use tracing::{debug, trace, warn};

use crate::attributes::highs_overrides;
use crate::env::{HighsEnv, default_env};
use crate::ffi::{
    HighsHandle, SolutionSnapshot, VAR_TYPE_CONTINUOUS, VAR_TYPE_INTEGER,
    VAR_TYPE_SEMI_CONTINUOUS, highs_version, to_highs_int,
};
use crate::status::HIGHS_STATUS_TABLES;

const SENSE_MINIMIZE: HighsInt = 1;
const SENSE_MAXIMIZE: HighsInt = -1;

/// Shadow entry for one issued variable handle. `position` is the current
/// HiGHS column, `None` once deleted.
#[derive(Debug, Clone)]
struct ColumnInfo {
    domain: VariableDomain,
    lower: f64,
    upper: f64,
    name: String,
    position: Option<usize>,
}

#[derive(Debug, Clone)]
struct RowInfo {
    name: String,
    position: Option<usize>,
}

/// Clear the deleted slot and shift every later position down by one.
fn remove_position<'a>(positions: impl Iterator<Item = &'a mut Option<usize>>, removed: usize) {
    for slot in positions {
        match *slot {
            Some(position) if position == removed => *slot = None,
            Some(position) if position > removed => *slot = Some(position - 1),
            _ => {}
        }
    }
}

/// HiGHS solves a model with integer or semi-continuous columns through its
/// MIP solver.
fn solved_as_mip(domain: VariableDomain) -> bool {
    domain.is_discrete() || domain == VariableDomain::SemiContinuous
}

pub(crate) fn sense_from_raw(raw: HighsInt) -> Result<ObjectiveSense, SolverError> {
    match raw {
        SENSE_MINIMIZE => Ok(ObjectiveSense::Minimize),
        SENSE_MAXIMIZE => Ok(ObjectiveSense::Maximize),
        other => Err(SolverError::backend_call(
            other,
            format!("HiGHS reported unknown objective sense {other}"),
        )),
    }
}

/// Start value for a column the caller did not stage: zero moved into the
/// column's bounds.
pub(crate) fn default_primal_value(lower: f64, upper: f64) -> f64 {
    0.0_f64.max(lower).min(upper)
}

/// Lower triangle of the Hessian of `terms` in compressed column form, with
/// variables mapped to columns by `column_of`.
///
/// HiGHS minimizes `0.5 x'Qx`, so an off-diagonal term `c x_i x_j` stores `c`
/// at `(j, i)` and a square term `c x_i^2` stores `2c` on the diagonal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Hessian {
    pub start: Vec<HighsInt>,
    pub index: Vec<HighsInt>,
    pub value: Vec<f64>,
}

pub(crate) fn hessian_lower_triangle(
    dim: usize,
    terms: &[(VariablePair, f64)],
    column_of: impl Fn(VariableIndex) -> Result<usize, SolverError>,
) -> Result<Hessian, SolverError> {
    let mut entries: Vec<(usize, usize, f64)> = Vec::with_capacity(terms.len());
    for (pair, coeff) in terms {
        let (a, b) = (column_of(pair.first())?, column_of(pair.second())?);
        let (col, row) = (a.min(b), a.max(b));
        if row >= dim {
            return Err(SolverError::InvalidVariable(pair.second()));
        }
        let value = if pair.is_square() { 2.0 * coeff } else { *coeff };
        entries.push((col, row, value));
    }
    entries.sort_by_key(|&(col, row, _)| (col, row));

    let mut hessian = Hessian {
        start: Vec::with_capacity(dim),
        index: Vec::with_capacity(entries.len()),
        value: Vec::with_capacity(entries.len()),
    };
    let mut next = entries.iter().peekable();
    for col in 0..dim {
        hessian.start.push(to_highs_int(hessian.index.len())?);
        while let Some(&(_, row, value)) = next.next_if(|(c, _, _)| *c == col) {
            hessian.index.push(to_highs_int(row)?);
            hessian.value.push(value);
        }
    }
    Ok(hessian)
}

/// A HiGHS model plus the per-column and per-row metadata HiGHS does not keep.
///
/// Handles index the shadow vectors and never change; deleting an entity
/// tombstones its slot and renumbers the HiGHS positions after it.
pub struct HighsBackend {
    handle: HighsHandle,
    columns: Vec<ColumnInfo>,
    rows: Vec<RowInfo>,
    has_hessian: bool,
    solution: Option<SolutionSnapshot>,
    submitted_start: Option<Vec<f64>>,
}

impl HighsBackend {
    /// Create a backend from the process-wide default environment.
    pub fn new() -> Result<Self, SolverError> {
        Self::with_env(&*default_env()?)
    }

    pub fn with_env(env: &HighsEnv) -> Result<Self, SolverError> {
        let mut handle = HighsHandle::new()?;
        if let Some(path) = env.options_file() {
            handle.read_options(path)?;
            debug!(
                component = "highs",
                operation = "read_options",
                status = "success",
                path = %path.display(),
                "Loaded HiGHS options file"
            );
        }
        Ok(Self {
            handle,
            columns: Vec::new(),
            rows: Vec::new(),
            has_hessian: false,
            solution: None,
            submitted_start: None,
        })
    }

    /// Current HiGHS column of `var`.
    fn position(&self, var: VariableIndex) -> Result<usize, SolverError> {
        self.columns
            .get(var.inner() as usize)
            .and_then(|info| info.position)
            .ok_or(SolverError::InvalidVariable(var))
    }

    fn col(&self, var: VariableIndex) -> Result<(HighsInt, &ColumnInfo), SolverError> {
        let position = self.position(var)?;
        Ok((to_highs_int(position)?, &self.columns[var.inner() as usize]))
    }

    fn col_mut(&mut self, var: VariableIndex) -> Result<&mut ColumnInfo, SolverError> {
        self.position(var)?;
        Ok(&mut self.columns[var.inner() as usize])
    }

    fn row_info(&self, constraint: ConstraintIndex) -> Result<&RowInfo, SolverError> {
        self.rows
            .get(constraint.inner() as usize)
            .filter(|info| constraint.kind() == ConstraintType::Linear && info.position.is_some())
            .ok_or(SolverError::InvalidConstraint(constraint))
    }

    /// Current HiGHS row of `constraint`.
    fn row(&self, constraint: ConstraintIndex) -> Result<usize, SolverError> {
        self.row_info(constraint)?
            .position
            .ok_or(SolverError::InvalidConstraint(constraint))
    }

    fn solved(&self) -> Result<&SolutionSnapshot, SolverError> {
        self.solution
            .as_ref()
            .ok_or_else(|| SolverError::backend_call(-1, "no solution available"))
    }

    fn invalidate_solution(&mut self) {
        self.solution = None;
    }

    fn set_bounds(&mut self, var: VariableIndex, lower: f64, upper: f64) -> Result<(), SolverError> {
        let (col, _) = self.col(var)?;
        self.handle.change_col_bounds(col, lower, upper)?;
        let info = self.col_mut(var)?;
        info.lower = lower;
        info.upper = upper;
        self.invalidate_solution();
        Ok(())
    }

    /// Column vector most recently passed to HiGHS as a start solution.
    pub fn submitted_start(&self) -> Option<&[f64]> {
        self.submitted_start.as_deref()
    }

    /// Node count of the last MIP solve.
    pub fn node_count(&self) -> Result<i64, SolverError> {
        self.handle.int64_info("mip_node_count")
    }

    fn sense_to_raw(sense: ObjectiveSense) -> HighsInt {
        match sense {
            ObjectiveSense::Minimize => SENSE_MINIMIZE,
            ObjectiveSense::Maximize => SENSE_MAXIMIZE,
        }
    }
}

impl Backend for HighsBackend {
    const SOLVER_NAME: &'static str = "HiGHS";
    const VARIABLE_COUNT_ATTRIBUTE: &'static str = "NumCol";
    const CONSTRAINT_COUNT_ATTRIBUTES: &'static [(ConstraintType, &'static str)] =
        &[(ConstraintType::Linear, "NumRow")];
    const STATUS_TABLES: StatusTables = HIGHS_STATUS_TABLES;

    // ── Raw attributes ──────────────────────────────────────

    fn raw_int_attribute(&self, name: &str) -> Result<i32, SolverError> {
        match name {
            "NumCol" => Ok(self.handle.num_col()),
            "NumRow" => Ok(self.handle.num_row()),
            "ModelStatus" => Ok(self.handle.model_status()),
            "ObjSense" => self.handle.objective_sense(),
            "IsMIP" => self.is_mip().map(i32::from),
            "HasPrimalSol" => Ok(i32::from(self.solution.is_some())),
            "HasDualSol" => self.has_dual_solution().map(i32::from),
            other => self
                .handle
                .int_info(other)
                .or_else(|_| self.handle.int_option(other))
                .or_else(|_| self.handle.bool_option(other).map(i32::from)),
        }
    }

    fn set_raw_int_attribute(&mut self, name: &str, value: i32) -> Result<(), SolverError> {
        match name {
            "ObjSense" => self.handle.change_objective_sense(value),
            other => self.handle.set_int_option(other, value),
        }
    }

    fn raw_f64_attribute(&self, name: &str) -> Result<f64, SolverError> {
        match name {
            "ObjVal" => self.objective_value(),
            other => self
                .handle
                .double_info(other)
                .or_else(|_| self.handle.double_option(other)),
        }
    }

    fn set_raw_parameter(&mut self, name: &str, value: &RawParameter) -> Result<(), SolverError> {
        trace!(
            component = "highs",
            operation = "set_raw_parameter",
            status = "success",
            name,
            ?value,
            "Setting HiGHS option"
        );
        match value {
            RawParameter::Bool(v) => self.handle.set_bool_option(name, *v),
            RawParameter::Int(v) => self.handle.set_int_option(name, *v),
            RawParameter::Float(v) => self.handle.set_double_option(name, *v),
            RawParameter::Text(v) => self.handle.set_string_option(name, v),
        }
    }

    // ── Variables ───────────────────────────────────────────

    fn add_variable(
        &mut self,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
        name: Option<&str>,
    ) -> Result<VariableIndex, SolverError> {
        let (lower, upper) = match domain {
            VariableDomain::Binary => (lower.max(0.0), upper.min(1.0)),
            _ => (lower, upper),
        };
        let col = self.handle.add_col(lower, upper)?;
        let integrality = match domain {
            VariableDomain::Continuous => VAR_TYPE_CONTINUOUS,
            VariableDomain::Integer | VariableDomain::Binary => VAR_TYPE_INTEGER,
            VariableDomain::SemiContinuous => VAR_TYPE_SEMI_CONTINUOUS,
        };
        if integrality != VAR_TYPE_CONTINUOUS {
            self.handle.change_col_integrality(col, integrality)?;
        }
        let position = usize::try_from(col)
            .map_err(|_| SolverError::backend_call(col, "HiGHS returned a negative column"))?;
        let index = u32::try_from(self.columns.len())
            .map_err(|_| SolverError::backend_call(-1, "variable handle space exhausted"))?;
        self.columns.push(ColumnInfo {
            domain,
            lower,
            upper,
            name: name.unwrap_or_default().to_string(),
            position: Some(position),
        });
        self.invalidate_solution();
        Ok(VariableIndex::new(index))
    }

    fn variable_lower_bound(&self, var: VariableIndex) -> Result<f64, SolverError> {
        Ok(self.col(var)?.1.lower)
    }

    fn set_variable_lower_bound(&mut self, var: VariableIndex, value: f64) -> Result<(), SolverError> {
        let upper = self.col(var)?.1.upper;
        self.set_bounds(var, value, upper)
    }

    fn variable_upper_bound(&self, var: VariableIndex) -> Result<f64, SolverError> {
        Ok(self.col(var)?.1.upper)
    }

    fn set_variable_upper_bound(&mut self, var: VariableIndex, value: f64) -> Result<(), SolverError> {
        let lower = self.col(var)?.1.lower;
        self.set_bounds(var, lower, value)
    }

    fn variable_domain(&self, var: VariableIndex) -> Result<VariableDomain, SolverError> {
        Ok(self.col(var)?.1.domain)
    }

    fn set_variable_domain(
        &mut self,
        var: VariableIndex,
        domain: VariableDomain,
    ) -> Result<(), SolverError> {
        let (col, _) = self.col(var)?;
        let integrality = match domain {
            VariableDomain::Continuous => VAR_TYPE_CONTINUOUS,
            VariableDomain::Integer | VariableDomain::Binary => VAR_TYPE_INTEGER,
            VariableDomain::SemiContinuous => VAR_TYPE_SEMI_CONTINUOUS,
        };
        self.handle.change_col_integrality(col, integrality)?;
        self.col_mut(var)?.domain = domain;
        self.invalidate_solution();
        if domain == VariableDomain::Binary {
            let info = self.col(var)?.1;
            let (lower, upper) = (info.lower.max(0.0), info.upper.min(1.0));
            self.set_bounds(var, lower, upper)?;
        }
        Ok(())
    }

    fn variable_name(&self, var: VariableIndex) -> Result<String, SolverError> {
        Ok(self.col(var)?.1.name.clone())
    }

    fn set_variable_name(&mut self, var: VariableIndex, name: &str) -> Result<(), SolverError> {
        self.col_mut(var)?.name = name.to_string();
        Ok(())
    }

    fn variable_value(&self, var: VariableIndex) -> Result<f64, SolverError> {
        let position = self.position(var)?;
        Ok(self.solved()?.col_values[position])
    }

    fn delete_variable(&mut self, var: VariableIndex) -> Result<(), SolverError> {
        let (col, _) = self.col(var)?;
        self.handle.delete_cols(&[col])?;
        let removed = self.position(var)?;
        remove_position(self.columns.iter_mut().map(|info| &mut info.position), removed);
        self.invalidate_solution();
        debug!(
            component = "highs",
            operation = "delete_variable",
            status = "success",
            var = var.inner(),
            column = removed,
            "Deleted HiGHS column"
        );
        Ok(())
    }

    fn is_variable_active(&self, var: VariableIndex) -> bool {
        self.position(var).is_ok()
    }

    // ── Constraints ─────────────────────────────────────────

    fn add_linear_constraint(
        &mut self,
        function: &ScalarAffineFunction,
        sense: ConstraintSense,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError> {
        let mut indices = Vec::with_capacity(function.len());
        for var in function.variables() {
            indices.push(self.col(var)?.0);
        }
        let values: Vec<f64> = function.coefficients().collect();
        let (lower, upper) = sense.bounds(rhs);
        let row = self.handle.add_row(lower, upper, &indices, &values)?;
        let position = usize::try_from(row)
            .map_err(|_| SolverError::backend_call(row, "HiGHS returned a negative row"))?;
        let index = u32::try_from(self.rows.len())
            .map_err(|_| SolverError::backend_call(-1, "constraint handle space exhausted"))?;
        self.rows.push(RowInfo {
            name: name.unwrap_or_default().to_string(),
            position: Some(position),
        });
        self.invalidate_solution();
        Ok(ConstraintIndex::new(ConstraintType::Linear, index))
    }

    fn add_quadratic_constraint(
        &mut self,
        _function: &ScalarQuadraticFunction,
        _sense: ConstraintSense,
        _rhs: f64,
        _name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError> {
        warn!(
            component = "highs",
            operation = "add_quadratic_constraint",
            status = "error",
            "HiGHS does not support quadratic constraints"
        );
        Err(SolverError::backend_call(
            -1,
            "HiGHS does not support quadratic constraints",
        ))
    }

    fn add_sos_constraint(
        &mut self,
        variables: &[VariableIndex],
        _weights: &[f64],
        sos_type: SosType,
    ) -> Result<ConstraintIndex, SolverError> {
        warn!(
            component = "highs",
            operation = "add_sos_constraint",
            status = "error",
            kind = sos_type.constraint_type().as_str(),
            members = variables.len(),
            "HiGHS does not support SOS constraints"
        );
        Err(SolverError::backend_call(
            -1,
            "HiGHS does not support SOS constraints",
        ))
    }

    fn delete_constraint(&mut self, constraint: ConstraintIndex) -> Result<(), SolverError> {
        let removed = self.row(constraint)?;
        self.handle.delete_rows(&[to_highs_int(removed)?])?;
        remove_position(self.rows.iter_mut().map(|info| &mut info.position), removed);
        self.invalidate_solution();
        debug!(
            component = "highs",
            operation = "delete_constraint",
            status = "success",
            index = constraint.inner(),
            row = removed,
            "Deleted HiGHS row"
        );
        Ok(())
    }

    fn is_constraint_active(&self, constraint: ConstraintIndex) -> bool {
        self.row_info(constraint).is_ok()
    }

    fn constraint_name(&self, constraint: ConstraintIndex) -> Result<String, SolverError> {
        Ok(self.row_info(constraint)?.name.clone())
    }

    fn set_constraint_name(
        &mut self,
        constraint: ConstraintIndex,
        name: &str,
    ) -> Result<(), SolverError> {
        self.row_info(constraint)?;
        self.rows[constraint.inner() as usize].name = name.to_string();
        Ok(())
    }

    fn constraint_primal(&self, constraint: ConstraintIndex) -> Result<f64, SolverError> {
        let row = self.row(constraint)?;
        Ok(self.solved()?.row_values[row])
    }

    fn constraint_dual(&self, constraint: ConstraintIndex) -> Result<f64, SolverError> {
        let row = self.row(constraint)?;
        let solution = self.solved()?;
        if !solution.has_dual {
            return Err(SolverError::backend_call(-1, "no dual solution available"));
        }
        Ok(solution.row_duals[row])
    }

    // ── Objective ───────────────────────────────────────────

    fn set_objective(
        &mut self,
        function: &ScalarQuadraticFunction,
        sense: ObjectiveSense,
    ) -> Result<(), SolverError> {
        let affine = function.affine_part();
        let dim = usize::try_from(self.handle.num_col()).unwrap_or_default();
        let mut costs = vec![0.0; dim];
        for &(var, coeff) in affine.terms() {
            costs[self.position(var)?] += coeff;
        }
        for (col, cost) in costs.into_iter().enumerate() {
            self.handle.change_col_cost(to_highs_int(col)?, cost)?;
        }
        self.handle.change_objective_offset(affine.constant())?;

        // An existing Hessian is replaced with an empty one when the new
        // objective has no quadratic terms.
        let quadratic = !function.terms().is_empty();
        if quadratic || self.has_hessian {
            let hessian = hessian_lower_triangle(dim, function.terms(), |var| self.position(var))?;
            self.handle.pass_hessian(
                to_highs_int(dim)?,
                &hessian.start,
                &hessian.index,
                &hessian.value,
            )?;
            self.has_hessian = quadratic;
        }
        self.handle.change_objective_sense(Self::sense_to_raw(sense))?;
        self.invalidate_solution();
        Ok(())
    }

    fn objective_sense(&self) -> Result<ObjectiveSense, SolverError> {
        sense_from_raw(self.handle.objective_sense()?)
    }

    fn set_objective_sense(&mut self, sense: ObjectiveSense) -> Result<(), SolverError> {
        self.handle.change_objective_sense(Self::sense_to_raw(sense))
    }

    fn objective_value(&self) -> Result<f64, SolverError> {
        self.solved()?;
        Ok(self.handle.objective_value())
    }

    // ── Solve ───────────────────────────────────────────────

    fn is_mip(&self) -> Result<bool, SolverError> {
        Ok(self
            .columns
            .iter()
            .any(|info| info.position.is_some() && solved_as_mip(info.domain)))
    }

    fn raw_status(&self) -> Result<i32, SolverError> {
        Ok(self.handle.model_status())
    }

    fn has_primal_solution(&self) -> Result<bool, SolverError> {
        Ok(self.solution.is_some())
    }

    fn has_dual_solution(&self) -> Result<bool, SolverError> {
        Ok(self.solution.as_ref().is_some_and(|s| s.has_dual))
    }

    fn add_mip_start(
        &mut self,
        variables: &[VariableIndex],
        values: &[f64],
    ) -> Result<(), SolverError> {
        // Positions grow with handle order, so active columns come out in
        // HiGHS column order.
        let mut col_values: Vec<f64> = self
            .columns
            .iter()
            .filter(|info| info.position.is_some())
            .map(|info| default_primal_value(info.lower, info.upper))
            .collect();
        for (&var, &value) in variables.iter().zip(values) {
            col_values[self.position(var)?] = value;
        }
        self.handle.set_solution(&col_values)?;
        debug!(
            component = "highs",
            operation = "add_mip_start",
            status = "success",
            staged = variables.len(),
            columns = col_values.len(),
            "Passed start solution to HiGHS"
        );
        self.submitted_start = Some(col_values);
        Ok(())
    }

    fn optimize(&mut self) -> Result<(), SolverError> {
        self.invalidate_solution();
        self.handle.run()?;
        self.solution = self.handle.solution()?;
        debug!(
            component = "highs",
            operation = "optimize",
            status = "success",
            model_status = self.handle.model_status(),
            has_solution = self.solution.is_some(),
            "HiGHS run finished"
        );
        Ok(())
    }

    fn silent(&self) -> Result<bool, SolverError> {
        Ok(!self.handle.bool_option("output_flag")?)
    }

    fn set_silent(&mut self, silent: bool) -> Result<(), SolverError> {
        self.handle.set_bool_option("output_flag", !silent)
    }

    fn apply_config(&mut self, config: &SolverConfig) -> Result<(), SolverError> {
        if let Some(limit) = config.time_limit {
            self.handle.set_double_option("time_limit", limit)?;
        }
        if let Some(gap) = config.mip_gap {
            self.handle.set_double_option("mip_rel_gap", gap)?;
        }
        if let Some(silent) = config.silent {
            self.set_silent(silent)?;
        }
        if let Some(presolve) = config.presolve {
            self.handle
                .set_string_option("presolve", if presolve { "on" } else { "off" })?;
        }
        if let Some(threads) = config.threads {
            let threads = HighsInt::try_from(threads).map_err(|_| {
                SolverError::backend_call(-1, format!("thread count {threads} out of range"))
            })?;
            self.handle.set_int_option("threads", threads)?;
        }
        if let Some(tolerance) = config.tolerance {
            self.handle
                .set_double_option("primal_feasibility_tolerance", tolerance)?;
            self.handle
                .set_double_option("dual_feasibility_tolerance", tolerance)?;
        }
        for (name, value) in &config.raw_parameters {
            self.set_raw_parameter(name, value)?;
        }
        Ok(())
    }

    fn version(&self) -> String {
        highs_version().unwrap_or_else(|| "unknown".to_string())
    }

    fn raw_model(&mut self) -> *mut c_void {
        self.handle.as_ptr()
    }

    fn attribute_overrides() -> AttributeTables<Self> {
        highs_overrides()
    }
}

impl std::fmt::Debug for HighsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighsBackend")
            .field("handle", &self.handle)
            .field("has_hessian", &self.has_hessian)
            .field("solved", &self.solution.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn v(i: u32) -> VariableIndex {
        VariableIndex::new(i)
    }

    fn identity(var: VariableIndex) -> Result<usize, SolverError> {
        Ok(var.inner() as usize)
    }

    fn quiet_backend() -> HighsBackend {
        let mut backend = HighsBackend::with_env(&HighsEnv::new()).unwrap();
        backend.set_silent(true).unwrap();
        backend
    }

    #[test]
    fn test_default_primal_value_respects_bounds() {
        assert_eq!(default_primal_value(-5.0, 5.0), 0.0);
        assert_eq!(default_primal_value(2.0, 8.0), 2.0);
        assert_eq!(default_primal_value(f64::NEG_INFINITY, -3.0), -3.0);
        assert_eq!(default_primal_value(f64::NEG_INFINITY, f64::INFINITY), 0.0);
    }

    #[test]
    fn test_hessian_doubles_diagonal() {
        // x0^2 + 3 x0 x2 + 0.5 x1^2
        let terms = [
            (VariablePair::new(v(2), v(0)), 3.0),
            (VariablePair::new(v(0), v(0)), 1.0),
            (VariablePair::new(v(1), v(1)), 0.5),
        ];
        let hessian = hessian_lower_triangle(3, &terms, identity).unwrap();
        assert_eq!(hessian.start, vec![0, 2, 3]);
        assert_eq!(hessian.index, vec![0, 2, 1]);
        assert_eq!(hessian.value, vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_hessian_empty_columns() {
        let hessian = hessian_lower_triangle(2, &[], identity).unwrap();
        assert_eq!(hessian.start, vec![0, 0]);
        assert!(hessian.index.is_empty());
    }

    #[test]
    fn test_hessian_rejects_unknown_column() {
        let terms = [(VariablePair::new(v(0), v(4)), 1.0)];
        assert_eq!(
            hessian_lower_triangle(2, &terms, identity).unwrap_err(),
            SolverError::InvalidVariable(v(4))
        );
    }

    #[test]
    fn test_hessian_follows_shifted_columns() {
        // After deleting column 1, handle 2 sits at column 1.
        let terms = [(VariablePair::new(v(0), v(2)), 4.0)];
        let shifted = |var: VariableIndex| Ok(if var == v(2) { 1 } else { 0 });
        let hessian = hessian_lower_triangle(2, &terms, shifted).unwrap();
        assert_eq!(hessian.start, vec![0, 1]);
        assert_eq!(hessian.index, vec![1]);
        assert_eq!(hessian.value, vec![4.0]);
    }

    #[test]
    fn test_remove_position_tombstones_and_shifts() {
        let mut positions = vec![Some(0), None, Some(1), Some(2)];
        remove_position(positions.iter_mut(), 1);
        assert_eq!(positions, vec![Some(0), None, None, Some(1)]);
    }

    #[test]
    fn test_raw_sense_must_be_known() {
        assert_eq!(sense_from_raw(1).unwrap(), ObjectiveSense::Minimize);
        assert_eq!(sense_from_raw(-1).unwrap(), ObjectiveSense::Maximize);
        let err = sense_from_raw(0).unwrap_err();
        assert_eq!(err.code(), "BACKEND_CALL");
        assert!(err.to_string().contains("unknown objective sense 0"));
    }

    #[test]
    fn test_semi_continuous_column_makes_model_mip() {
        let mut backend = quiet_backend();
        backend
            .add_variable(VariableDomain::Continuous, 0.0, 1.0, None)
            .unwrap();
        assert!(!backend.is_mip().unwrap());
        backend
            .add_variable(VariableDomain::SemiContinuous, 2.0, 5.0, None)
            .unwrap();
        assert!(backend.is_mip().unwrap());
    }

    #[test]
    fn test_affine_objective_passes_no_hessian() {
        let mut backend = quiet_backend();
        let x = backend
            .add_variable(VariableDomain::Continuous, 0.0, 1.0, None)
            .unwrap();
        let affine = ScalarQuadraticFunction::from(ScalarAffineFunction::term(x, 2.0));
        backend
            .set_objective(&affine, ObjectiveSense::Minimize)
            .unwrap();
        assert!(!backend.has_hessian);

        let square = ScalarQuadraticFunction::product(x, x);
        backend
            .set_objective(&square, ObjectiveSense::Minimize)
            .unwrap();
        assert!(backend.has_hessian);

        backend
            .set_objective(&affine, ObjectiveSense::Minimize)
            .unwrap();
        assert!(!backend.has_hessian);
    }

    #[test]
    fn test_deleted_column_keeps_other_handles() {
        let mut backend = quiet_backend();
        let vars: Vec<VariableIndex> = (0..3_i32)
            .map(|i| {
                backend
                    .add_variable(VariableDomain::Continuous, f64::from(i), 10.0, None)
                    .unwrap()
            })
            .collect();

        backend.delete_variable(vars[1]).unwrap();

        assert!(!backend.is_variable_active(vars[1]));
        assert_eq!(backend.raw_int_attribute("NumCol").unwrap(), 2);
        assert_eq!(backend.position(vars[2]).unwrap(), 1);
        assert_eq!(backend.variable_lower_bound(vars[2]).unwrap(), 2.0);
        assert_eq!(
            backend.variable_lower_bound(vars[1]).unwrap_err(),
            SolverError::InvalidVariable(vars[1])
        );
    }
}
