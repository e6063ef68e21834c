//! Attributes whose HiGHS representation differs from the standard handlers.

use optiface_core::{AttributeTables, Backend, Model};
use optiface_solver::{
    AttributeValue, ModelAttribute, ObjectiveSense, RawParameter, SolverError,
};

use crate::backend::{HighsBackend, sense_from_raw};

type HighsModel = Model<HighsBackend>;

pub(crate) fn highs_overrides() -> AttributeTables<HighsBackend> {
    let mut tables: AttributeTables<HighsBackend> = AttributeTables::new();

    tables.model_get = tables
        .model_get
        .with(ModelAttribute::ObjectiveSense, get_objective_sense)
        .with(ModelAttribute::RelativeGap, get_relative_gap)
        .with(ModelAttribute::NodeCount, get_node_count)
        .with(ModelAttribute::SimplexIterations, get_simplex_iterations)
        .with(ModelAttribute::BarrierIterations, get_barrier_iterations)
        .with(ModelAttribute::TimeLimitSec, get_time_limit)
        .with(ModelAttribute::NumberOfThreads, get_threads);

    tables.model_set = tables
        .model_set
        .with(ModelAttribute::ObjectiveSense, set_objective_sense)
        .with(ModelAttribute::TimeLimitSec, set_time_limit)
        .with(ModelAttribute::NumberOfThreads, set_threads);

    tables
}

// HiGHS encodes the sense as 1 (minimize) / -1 (maximize).
fn get_objective_sense(model: &HighsModel) -> Result<AttributeValue, SolverError> {
    let raw = model.backend().raw_int_attribute("ObjSense")?;
    Ok(sense_from_raw(raw)?.into())
}

fn set_objective_sense(model: &mut HighsModel, value: &AttributeValue) -> Result<(), SolverError> {
    let raw = match value.as_sense()? {
        ObjectiveSense::Minimize => 1,
        ObjectiveSense::Maximize => -1,
    };
    model.backend_mut().set_raw_int_attribute("ObjSense", raw)
}

fn get_relative_gap(model: &HighsModel) -> Result<AttributeValue, SolverError> {
    model
        .backend()
        .raw_f64_attribute("mip_gap")
        .map(AttributeValue::Float)
}

fn get_node_count(model: &HighsModel) -> Result<AttributeValue, SolverError> {
    model.backend().node_count().map(AttributeValue::Int)
}

fn get_simplex_iterations(model: &HighsModel) -> Result<AttributeValue, SolverError> {
    let count = model.backend().raw_int_attribute("simplex_iteration_count")?;
    Ok(AttributeValue::Int(i64::from(count)))
}

fn get_barrier_iterations(model: &HighsModel) -> Result<AttributeValue, SolverError> {
    let count = model.backend().raw_int_attribute("ipm_iteration_count")?;
    Ok(AttributeValue::Int(i64::from(count)))
}

fn get_time_limit(model: &HighsModel) -> Result<AttributeValue, SolverError> {
    model
        .backend()
        .raw_f64_attribute("time_limit")
        .map(AttributeValue::Float)
}

fn set_time_limit(model: &mut HighsModel, value: &AttributeValue) -> Result<(), SolverError> {
    let seconds = value.as_f64()?;
    model
        .backend_mut()
        .set_raw_parameter("time_limit", &RawParameter::Float(seconds))
}

fn get_threads(model: &HighsModel) -> Result<AttributeValue, SolverError> {
    let threads = model.backend().raw_int_attribute("threads")?;
    Ok(AttributeValue::Int(i64::from(threads)))
}

fn set_threads(model: &mut HighsModel, value: &AttributeValue) -> Result<(), SolverError> {
    let requested = value.as_i64()?;
    let threads = i32::try_from(requested).map_err(|_| {
        SolverError::backend_call(-1, format!("thread count {requested} out of range"))
    })?;
    model
        .backend_mut()
        .set_raw_parameter("threads", &RawParameter::Int(threads))
}
