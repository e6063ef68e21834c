//! FFI bindings to the HiGHS C API.
//!
//! This module contains unsafe code for interacting with the C library. The
//! rest of the crate only sees the safe [`HighsHandle`] wrapper.
#![allow(unsafe_code)]

use std::ffi::{CStr, CString, c_void};
use std::path::Path;
use std::ptr;

use highs_sys::HighsInt;
use optiface_solver::SolverError;
use tracing::{debug, trace, warn};

/// HiGHS variable type codes accepted by `Highs_changeColIntegrality`.
pub(crate) const VAR_TYPE_CONTINUOUS: HighsInt = 0;
pub(crate) const VAR_TYPE_INTEGER: HighsInt = 1;
pub(crate) const VAR_TYPE_SEMI_CONTINUOUS: HighsInt = 2;

/// Lower-triangular column-wise Hessian storage.
pub(crate) const HESSIAN_FORMAT_TRIANGULAR: HighsInt = 1;

/// `primal_solution_status` / `dual_solution_status` value for a feasible point.
const SOLUTION_STATUS_FEASIBLE: HighsInt = 2;

/// Snapshot of primal and dual solution values.
#[derive(Debug, Clone, Default)]
pub(crate) struct SolutionSnapshot {
    pub col_values: Vec<f64>,
    pub col_duals: Vec<f64>,
    pub row_values: Vec<f64>,
    pub row_duals: Vec<f64>,
    pub has_dual: bool,
}

/// Owned HiGHS instance.
pub(crate) struct HighsHandle {
    ptr: *mut c_void,
}

// A HiGHS instance has no thread affinity; it only must not be shared.
unsafe impl Send for HighsHandle {}

fn c_name(name: &str) -> Result<CString, SolverError> {
    CString::new(name)
        .map_err(|_| SolverError::backend_call(-1, format!("name {name:?} contains a NUL byte")))
}

fn check(status: HighsInt, operation: &'static str) -> Result<(), SolverError> {
    if status == highs_sys::STATUS_OK {
        return Ok(());
    }
    if status == highs_sys::STATUS_WARNING {
        debug!(
            component = "highs",
            operation,
            status = "warn",
            status_code = status,
            "HiGHS returned a warning"
        );
        return Ok(());
    }
    warn!(
        component = "highs",
        operation,
        status = "error",
        status_code = status,
        "HiGHS call failed"
    );
    Err(SolverError::backend_call(
        status,
        format!("{operation} failed with HiGHS status {status}"),
    ))
}

pub(crate) fn to_highs_int(value: usize) -> Result<HighsInt, SolverError> {
    HighsInt::try_from(value)
        .map_err(|_| SolverError::backend_call(-1, format!("index {value} exceeds HighsInt range")))
}

impl HighsHandle {
    pub fn new() -> Result<Self, SolverError> {
        let ptr = unsafe { highs_sys::Highs_create() };
        if ptr.is_null() {
            return Err(SolverError::BackendConfiguration {
                backend: "HiGHS",
                message: "Highs_create returned a null instance".to_string(),
            });
        }
        debug!(
            component = "highs",
            operation = "init",
            status = "success",
            "Created HiGHS instance"
        );
        Ok(Self { ptr })
    }

    pub fn as_ptr(&mut self) -> *mut c_void {
        self.ptr
    }

    // ── Columns and rows ────────────────────────────────────

    pub fn add_col(&mut self, lower: f64, upper: f64) -> Result<HighsInt, SolverError> {
        let status = unsafe {
            highs_sys::Highs_addCol(self.ptr, 0.0, lower, upper, 0, ptr::null(), ptr::null())
        };
        check(status, "add_col")?;
        Ok(self.num_col() - 1)
    }

    pub fn change_col_integrality(
        &mut self,
        col: HighsInt,
        integrality: HighsInt,
    ) -> Result<(), SolverError> {
        let status = unsafe { highs_sys::Highs_changeColIntegrality(self.ptr, col, integrality) };
        check(status, "change_col_integrality")
    }

    pub fn change_col_bounds(
        &mut self,
        col: HighsInt,
        lower: f64,
        upper: f64,
    ) -> Result<(), SolverError> {
        let status = unsafe { highs_sys::Highs_changeColBounds(self.ptr, col, lower, upper) };
        check(status, "change_col_bounds")
    }

    pub fn change_col_cost(&mut self, col: HighsInt, cost: f64) -> Result<(), SolverError> {
        let status = unsafe { highs_sys::Highs_changeColCost(self.ptr, col, cost) };
        check(status, "change_col_cost")
    }

    pub fn add_row(
        &mut self,
        lower: f64,
        upper: f64,
        indices: &[HighsInt],
        values: &[f64],
    ) -> Result<HighsInt, SolverError> {
        let num_nz = to_highs_int(indices.len())?;
        trace!(
            component = "highs",
            operation = "add_row",
            status = "success",
            lower,
            upper,
            num_nz,
            "Adding row"
        );
        let status = unsafe {
            highs_sys::Highs_addRow(
                self.ptr,
                lower,
                upper,
                num_nz,
                indices.as_ptr(),
                values.as_ptr(),
            )
        };
        check(status, "add_row")?;
        Ok(self.num_row() - 1)
    }

    /// Delete the listed columns; later columns shift down.
    pub fn delete_cols(&mut self, cols: &[HighsInt]) -> Result<(), SolverError> {
        let num = to_highs_int(cols.len())?;
        let status = unsafe { highs_sys::Highs_deleteColsBySet(self.ptr, num, cols.as_ptr()) };
        check(status, "delete_cols")
    }

    /// Delete the listed rows; later rows shift down.
    pub fn delete_rows(&mut self, rows: &[HighsInt]) -> Result<(), SolverError> {
        let num = to_highs_int(rows.len())?;
        let status = unsafe { highs_sys::Highs_deleteRowsBySet(self.ptr, num, rows.as_ptr()) };
        check(status, "delete_rows")
    }

    pub fn num_col(&self) -> HighsInt {
        unsafe { highs_sys::Highs_getNumCol(self.ptr) }
    }

    pub fn num_row(&self) -> HighsInt {
        unsafe { highs_sys::Highs_getNumRow(self.ptr) }
    }

    // ── Objective ───────────────────────────────────────────

    pub fn change_objective_sense(&mut self, sense: HighsInt) -> Result<(), SolverError> {
        let status = unsafe { highs_sys::Highs_changeObjectiveSense(self.ptr, sense) };
        check(status, "change_objective_sense")
    }

    pub fn objective_sense(&self) -> Result<HighsInt, SolverError> {
        let mut sense: HighsInt = 0;
        let status = unsafe { highs_sys::Highs_getObjectiveSense(self.ptr, &raw mut sense) };
        check(status, "objective_sense")?;
        Ok(sense)
    }

    pub fn change_objective_offset(&mut self, offset: f64) -> Result<(), SolverError> {
        let status = unsafe { highs_sys::Highs_changeObjectiveOffset(self.ptr, offset) };
        check(status, "change_objective_offset")
    }

    pub fn pass_hessian(
        &mut self,
        dim: HighsInt,
        start: &[HighsInt],
        index: &[HighsInt],
        value: &[f64],
    ) -> Result<(), SolverError> {
        let num_nz = to_highs_int(index.len())?;
        let status = unsafe {
            highs_sys::Highs_passHessian(
                self.ptr,
                dim,
                num_nz,
                HESSIAN_FORMAT_TRIANGULAR,
                start.as_ptr(),
                index.as_ptr(),
                value.as_ptr(),
            )
        };
        check(status, "pass_hessian")
    }

    pub fn objective_value(&self) -> f64 {
        unsafe { highs_sys::Highs_getObjectiveValue(self.ptr) }
    }

    // ── Info and options ────────────────────────────────────

    pub fn model_status(&self) -> HighsInt {
        unsafe { highs_sys::Highs_getModelStatus(self.ptr) }
    }

    pub fn int_info(&self, name: &str) -> Result<HighsInt, SolverError> {
        let c_name = c_name(name)?;
        let mut value: HighsInt = 0;
        let status =
            unsafe { highs_sys::Highs_getIntInfoValue(self.ptr, c_name.as_ptr(), &raw mut value) };
        check(status, "int_info")?;
        Ok(value)
    }

    pub fn int64_info(&self, name: &str) -> Result<i64, SolverError> {
        let c_name = c_name(name)?;
        let mut value: i64 = 0;
        let status = unsafe {
            highs_sys::Highs_getInt64InfoValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        check(status, "int64_info")?;
        Ok(value)
    }

    pub fn double_info(&self, name: &str) -> Result<f64, SolverError> {
        let c_name = c_name(name)?;
        let mut value = 0.0;
        let status = unsafe {
            highs_sys::Highs_getDoubleInfoValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        check(status, "double_info")?;
        Ok(value)
    }

    pub fn bool_option(&self, name: &str) -> Result<bool, SolverError> {
        let c_name = c_name(name)?;
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getBoolOptionValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        check(status, "bool_option")?;
        Ok(value != 0)
    }

    pub fn int_option(&self, name: &str) -> Result<HighsInt, SolverError> {
        let c_name = c_name(name)?;
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntOptionValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        check(status, "int_option")?;
        Ok(value)
    }

    pub fn double_option(&self, name: &str) -> Result<f64, SolverError> {
        let c_name = c_name(name)?;
        let mut value = 0.0;
        let status = unsafe {
            highs_sys::Highs_getDoubleOptionValue(self.ptr, c_name.as_ptr(), &raw mut value)
        };
        check(status, "double_option")?;
        Ok(value)
    }

    pub fn set_bool_option(&mut self, name: &str, value: bool) -> Result<(), SolverError> {
        let c_name = c_name(name)?;
        let status = unsafe {
            highs_sys::Highs_setBoolOptionValue(self.ptr, c_name.as_ptr(), HighsInt::from(value))
        };
        check(status, "set_bool_option")
    }

    pub fn set_int_option(&mut self, name: &str, value: HighsInt) -> Result<(), SolverError> {
        let c_name = c_name(name)?;
        let status =
            unsafe { highs_sys::Highs_setIntOptionValue(self.ptr, c_name.as_ptr(), value) };
        check(status, "set_int_option")
    }

    pub fn set_double_option(&mut self, name: &str, value: f64) -> Result<(), SolverError> {
        let c_name = c_name(name)?;
        let status =
            unsafe { highs_sys::Highs_setDoubleOptionValue(self.ptr, c_name.as_ptr(), value) };
        check(status, "set_double_option")
    }

    pub fn set_string_option(&mut self, name: &str, value: &str) -> Result<(), SolverError> {
        let c_option = c_name(name)?;
        let c_value = c_name(value)?;
        let status = unsafe {
            highs_sys::Highs_setStringOptionValue(self.ptr, c_option.as_ptr(), c_value.as_ptr())
        };
        check(status, "set_string_option")
    }

    pub fn read_options(&mut self, path: &Path) -> Result<(), SolverError> {
        let c_path = c_name(&path.to_string_lossy())?;
        let status = unsafe { highs_sys::Highs_readOptions(self.ptr, c_path.as_ptr()) };
        check(status, "read_options")
    }

    // ── Solve ───────────────────────────────────────────────

    /// Pass a full column vector as the starting solution.
    pub fn set_solution(&mut self, col_values: &[f64]) -> Result<(), SolverError> {
        let status = unsafe {
            highs_sys::Highs_setSolution(
                self.ptr,
                col_values.as_ptr(),
                ptr::null(),
                ptr::null(),
                ptr::null(),
            )
        };
        check(status, "set_solution")
    }

    pub fn run(&mut self) -> Result<(), SolverError> {
        debug!(
            component = "highs",
            operation = "run",
            status = "success",
            num_col = self.num_col(),
            num_row = self.num_row(),
            "Running HiGHS"
        );
        let status = unsafe { highs_sys::Highs_run(self.ptr) };
        check(status, "run")
    }

    /// Primal/dual values after a solve, or `None` when HiGHS holds no
    /// feasible primal point.
    pub fn solution(&self) -> Result<Option<SolutionSnapshot>, SolverError> {
        if self.int_info("primal_solution_status")? != SOLUTION_STATUS_FEASIBLE {
            return Ok(None);
        }
        let has_dual = self.int_info("dual_solution_status")? == SOLUTION_STATUS_FEASIBLE;
        let num_col = usize::try_from(self.num_col()).unwrap_or(0);
        let num_row = usize::try_from(self.num_row()).unwrap_or(0);
        let mut snapshot = SolutionSnapshot {
            col_values: vec![0.0; num_col],
            col_duals: vec![0.0; num_col],
            row_values: vec![0.0; num_row],
            row_duals: vec![0.0; num_row],
            has_dual,
        };
        let status = unsafe {
            highs_sys::Highs_getSolution(
                self.ptr,
                snapshot.col_values.as_mut_ptr(),
                snapshot.col_duals.as_mut_ptr(),
                snapshot.row_values.as_mut_ptr(),
                snapshot.row_duals.as_mut_ptr(),
            )
        };
        check(status, "solution")?;
        Ok(Some(snapshot))
    }
}

impl Drop for HighsHandle {
    fn drop(&mut self) {
        unsafe { highs_sys::Highs_destroy(self.ptr) };
    }
}

impl std::fmt::Debug for HighsHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighsHandle")
            .field("num_col", &self.num_col())
            .field("num_row", &self.num_row())
            .finish_non_exhaustive()
    }
}

/// HiGHS library version string, if available.
pub(crate) fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(str::to_string)
        }
    }
}
