//! Standard attribute handlers shared by every backend.

use optiface_expr::{ConstraintIndex, VariableIndex};
use optiface_solver::{
    AttributeValue, ConstraintAttribute, ModelAttribute, ResultStatusCode, SolverError,
    VariableAttribute,
};

use crate::dispatch::AttributeTables;
use crate::model::Model;
use crate::traits::Backend;

/// Build the standard tier for backend `B`.
pub fn standard_tables<B: Backend>() -> AttributeTables<B> {
    let mut tables: AttributeTables<B> = AttributeTables::new();

    tables.variable_get = tables
        .variable_get
        .with(VariableAttribute::Value, get_value::<B>)
        .with(VariableAttribute::LowerBound, get_lower_bound::<B>)
        .with(VariableAttribute::UpperBound, get_upper_bound::<B>)
        .with(VariableAttribute::PrimalStart, get_primal_start::<B>)
        .with(VariableAttribute::Domain, get_domain::<B>)
        .with(VariableAttribute::Name, get_variable_name::<B>);

    tables.variable_set = tables
        .variable_set
        .with(VariableAttribute::LowerBound, set_lower_bound::<B>)
        .with(VariableAttribute::UpperBound, set_upper_bound::<B>)
        .with(VariableAttribute::PrimalStart, set_primal_start::<B>)
        .with(VariableAttribute::Domain, set_domain::<B>)
        .with(VariableAttribute::Name, set_variable_name::<B>);

    tables.model_get = tables
        .model_get
        .with(ModelAttribute::ObjectiveSense, get_objective_sense::<B>)
        .with(ModelAttribute::DualStatus, get_dual_status::<B>)
        .with(ModelAttribute::PrimalStatus, get_primal_status::<B>)
        .with(ModelAttribute::RawStatusString, get_raw_status_string::<B>)
        .with(ModelAttribute::TerminationStatus, get_termination_status::<B>)
        .with(ModelAttribute::Silent, get_silent::<B>)
        .with(ModelAttribute::SolverName, get_solver_name::<B>)
        .with(ModelAttribute::SolverVersion, get_solver_version::<B>)
        .with(ModelAttribute::ObjectiveValue, get_objective_value::<B>)
        .with(ModelAttribute::SolveTimeSec, get_solve_time::<B>);

    tables.model_set = tables
        .model_set
        .with(ModelAttribute::ObjectiveSense, set_objective_sense::<B>)
        .with(ModelAttribute::Silent, set_silent::<B>);

    tables.constraint_get = tables
        .constraint_get
        .with(ConstraintAttribute::Name, get_constraint_name::<B>)
        .with(ConstraintAttribute::Primal, get_constraint_primal::<B>)
        .with(ConstraintAttribute::Dual, get_constraint_dual::<B>);

    tables.constraint_set = tables
        .constraint_set
        .with(ConstraintAttribute::Name, set_constraint_name::<B>);

    tables
}

// ── Variable ────────────────────────────────────────────────

fn get_value<B: Backend>(model: &Model<B>, var: VariableIndex) -> Result<AttributeValue, SolverError> {
    model.backend().variable_value(var).map(AttributeValue::Float)
}

fn get_lower_bound<B: Backend>(
    model: &Model<B>,
    var: VariableIndex,
) -> Result<AttributeValue, SolverError> {
    model.backend().variable_lower_bound(var).map(AttributeValue::Float)
}

fn get_upper_bound<B: Backend>(
    model: &Model<B>,
    var: VariableIndex,
) -> Result<AttributeValue, SolverError> {
    model.backend().variable_upper_bound(var).map(AttributeValue::Float)
}

/// Reads the deferred cache, never the backend.
fn get_primal_start<B: Backend>(
    model: &Model<B>,
    var: VariableIndex,
) -> Result<AttributeValue, SolverError> {
    Ok(model.staged_start(var).into())
}

fn get_domain<B: Backend>(model: &Model<B>, var: VariableIndex) -> Result<AttributeValue, SolverError> {
    model.backend().variable_domain(var).map(AttributeValue::Domain)
}

fn get_variable_name<B: Backend>(
    model: &Model<B>,
    var: VariableIndex,
) -> Result<AttributeValue, SolverError> {
    model.backend().variable_name(var).map(AttributeValue::Text)
}

fn set_lower_bound<B: Backend>(
    model: &mut Model<B>,
    var: VariableIndex,
    value: &AttributeValue,
) -> Result<(), SolverError> {
    let bound = value.as_f64()?;
    model.backend_mut().set_variable_lower_bound(var, bound)
}

fn set_upper_bound<B: Backend>(
    model: &mut Model<B>,
    var: VariableIndex,
    value: &AttributeValue,
) -> Result<(), SolverError> {
    let bound = value.as_f64()?;
    model.backend_mut().set_variable_upper_bound(var, bound)
}

/// Stages into the deferred cache; `Unset` drops a staged value.
fn set_primal_start<B: Backend>(
    model: &mut Model<B>,
    var: VariableIndex,
    value: &AttributeValue,
) -> Result<(), SolverError> {
    if value.is_unset() {
        model.mip_start.remove(var);
    } else {
        let start = value.as_f64()?;
        model.mip_start.stage(var, start);
    }
    Ok(())
}

fn set_domain<B: Backend>(
    model: &mut Model<B>,
    var: VariableIndex,
    value: &AttributeValue,
) -> Result<(), SolverError> {
    let domain = value.as_domain()?;
    model.backend_mut().set_variable_domain(var, domain)
}

fn set_variable_name<B: Backend>(
    model: &mut Model<B>,
    var: VariableIndex,
    value: &AttributeValue,
) -> Result<(), SolverError> {
    let name = value.as_text()?;
    model.backend_mut().set_variable_name(var, name)
}

// ── Model ───────────────────────────────────────────────────

fn get_objective_sense<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    model.backend().objective_sense().map(AttributeValue::Sense)
}

/// MIP solves never report duals.
fn get_dual_status<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    let backend = model.backend();
    let available = !backend.is_mip()? && backend.has_dual_solution()?;
    Ok(ResultStatusCode::from_availability(available).into())
}

fn get_primal_status<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    let available = model.backend().has_primal_solution()?;
    Ok(ResultStatusCode::from_availability(available).into())
}

fn get_raw_status_string<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    let entry = model.status_entry()?;
    Ok(AttributeValue::Text(entry.description.to_string()))
}

fn get_termination_status<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    Ok(model.status_entry()?.termination.into())
}

fn get_silent<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    model.backend().silent().map(AttributeValue::Bool)
}

fn get_solver_name<B: Backend>(_model: &Model<B>) -> Result<AttributeValue, SolverError> {
    Ok(B::SOLVER_NAME.into())
}

fn get_solver_version<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    Ok(AttributeValue::Text(model.backend().version()))
}

fn get_objective_value<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    model.backend().objective_value().map(AttributeValue::Float)
}

fn get_solve_time<B: Backend>(model: &Model<B>) -> Result<AttributeValue, SolverError> {
    Ok(model.solve_time().map(|t| t.as_secs_f64()).into())
}

fn set_objective_sense<B: Backend>(
    model: &mut Model<B>,
    value: &AttributeValue,
) -> Result<(), SolverError> {
    let sense = value.as_sense()?;
    model.backend_mut().set_objective_sense(sense)
}

fn set_silent<B: Backend>(model: &mut Model<B>, value: &AttributeValue) -> Result<(), SolverError> {
    let silent = value.as_bool()?;
    model.backend_mut().set_silent(silent)
}

// ── Constraint ──────────────────────────────────────────────

fn get_constraint_name<B: Backend>(
    model: &Model<B>,
    constraint: ConstraintIndex,
) -> Result<AttributeValue, SolverError> {
    model.backend().constraint_name(constraint).map(AttributeValue::Text)
}

fn get_constraint_primal<B: Backend>(
    model: &Model<B>,
    constraint: ConstraintIndex,
) -> Result<AttributeValue, SolverError> {
    model.backend().constraint_primal(constraint).map(AttributeValue::Float)
}

fn get_constraint_dual<B: Backend>(
    model: &Model<B>,
    constraint: ConstraintIndex,
) -> Result<AttributeValue, SolverError> {
    model.backend().constraint_dual(constraint).map(AttributeValue::Float)
}

fn set_constraint_name<B: Backend>(
    model: &mut Model<B>,
    constraint: ConstraintIndex,
    value: &AttributeValue,
) -> Result<(), SolverError> {
    let name = value.as_text()?;
    model.backend_mut().set_constraint_name(constraint, name)
}
