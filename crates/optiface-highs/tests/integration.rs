#![allow(clippy::float_cmp)]

use std::sync::Arc;

use optiface_core::Backend;
use optiface_expr::{
    ConstraintSense, ConstraintType, ScalarAffineFunction, SosType, VariableIndex, quicksum,
};
use optiface_highs::{HighsBackend, HighsEnv, HighsModel, default_env};
use optiface_solver::{
    AttributeOperation, AttributeValue, ConstraintAttribute, ModelAttribute, ObjectiveSense,
    ResultStatusCode, SolverConfig, SolverError, TerminationStatusCode, VariableAttribute,
    VariableDomain,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn quiet_model() -> HighsModel {
    init_tracing();
    let mut model = HighsEnv::new().create_model().expect("HiGHS model");
    model
        .set_model_attribute(ModelAttribute::Silent, true)
        .expect("silent");
    model
}

fn value(model: &HighsModel, var: VariableIndex) -> f64 {
    model
        .get_variable_attribute(var, VariableAttribute::Value)
        .unwrap()
        .as_f64()
        .unwrap()
}

/// minimize 2x + 3y subject to x + y >= 5, x, y >= 0
#[test]
fn test_simple_lp() {
    let mut model = quiet_model();
    let x = model
        .add_variable(VariableDomain::Continuous, 0.0, f64::INFINITY, Some("x"))
        .unwrap();
    let y = model
        .add_variable(VariableDomain::Continuous, 0.0, f64::INFINITY, Some("y"))
        .unwrap();
    let c = model.add_constraint(&(x + y).ge(5.0), Some("demand")).unwrap();
    model
        .set_objective(x * 2.0 + y * 3.0, ObjectiveSense::Minimize)
        .unwrap();

    model.optimize().unwrap();

    assert_eq!(
        model.termination_status().unwrap(),
        TerminationStatusCode::Optimal
    );
    let objective = model
        .get_model_attribute(ModelAttribute::ObjectiveValue)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((objective - 10.0).abs() < 1e-6, "objective {objective}");
    assert!((value(&model, x) - 5.0).abs() < 1e-6);

    assert_eq!(
        model.get_model_attribute(ModelAttribute::DualStatus).unwrap(),
        AttributeValue::Result(ResultStatusCode::FeasiblePoint)
    );
    let dual = model
        .get_constraint_attribute(c, ConstraintAttribute::Dual)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!(dual.is_finite());
    let activity = model
        .get_constraint_attribute(c, ConstraintAttribute::Primal)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((activity - 5.0).abs() < 1e-6);
    assert_eq!(
        model
            .get_model_attribute(ModelAttribute::RawStatusString)
            .unwrap(),
        AttributeValue::Text("optimal".to_string())
    );
}

/// maximize integer x subject to x <= 1.5
#[test]
fn test_integer_variable_solution() {
    let mut model = quiet_model();
    let x = model
        .add_variable(VariableDomain::Integer, 0.0, 10.0, None)
        .unwrap();
    model
        .add_linear_constraint(&ScalarAffineFunction::var(x), ConstraintSense::LessEqual, 1.5, None)
        .unwrap();
    model.set_objective(x, ObjectiveSense::Maximize).unwrap();

    model.optimize().unwrap();

    assert!(model.is_mip().unwrap());
    assert!((value(&model, x) - 1.0).abs() < 1e-6);
    assert_eq!(
        model.get_model_attribute(ModelAttribute::DualStatus).unwrap(),
        AttributeValue::Result(ResultStatusCode::NoSolution)
    );
    let gap = model
        .get_model_attribute(ModelAttribute::RelativeGap)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!(gap >= 0.0);
    assert!(
        model
            .get_model_attribute(ModelAttribute::NodeCount)
            .unwrap()
            .as_i64()
            .unwrap()
            >= 0
    );
}

#[test]
fn test_objective_sense_round_trip() {
    let mut model = quiet_model();
    model
        .set_model_attribute(ModelAttribute::ObjectiveSense, ObjectiveSense::Maximize)
        .unwrap();
    assert_eq!(model.backend().raw_int_attribute("ObjSense").unwrap(), -1);
    assert_eq!(
        model
            .get_model_attribute(ModelAttribute::ObjectiveSense)
            .unwrap(),
        AttributeValue::Sense(ObjectiveSense::Maximize)
    );
}

#[test]
fn test_mip_start_is_passed_before_solve() {
    let mut model = quiet_model();
    let vars = model
        .add_variables((0..3_u32).map(|i| (i,)), VariableDomain::Binary, 0.0, 1.0)
        .unwrap();
    let weights = [3.0, 4.0, 5.0];
    let capacity = quicksum(vars.iter().map(|(&(i,), &v)| (v, weights[i as usize])));
    model
        .add_constraint(&capacity.compare(ConstraintSense::LessEqual, 7.0), None)
        .unwrap();
    model
        .set_objective(quicksum(vars.values().copied()), ObjectiveSense::Maximize)
        .unwrap();

    let first = *vars.get(&(0,)).unwrap();
    let second = *vars.get(&(1,)).unwrap();
    model
        .set_variable_attribute(first, VariableAttribute::PrimalStart, 1.0)
        .unwrap();
    model
        .set_variable_attribute(second, VariableAttribute::PrimalStart, 1.0)
        .unwrap();
    assert_eq!(
        model
            .get_variable_attribute(first, VariableAttribute::PrimalStart)
            .unwrap(),
        AttributeValue::Float(1.0)
    );

    assert!(model.backend().submitted_start().is_none());

    model.optimize().unwrap();

    // Unstaged columns are padded with zero clamped into their bounds.
    assert_eq!(model.backend().submitted_start(), Some(&[1.0, 1.0, 0.0][..]));
    assert!(
        model
            .get_variable_attribute(first, VariableAttribute::PrimalStart)
            .unwrap()
            .is_unset()
    );
    let objective = model
        .get_model_attribute(ModelAttribute::ObjectiveValue)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((objective - 2.0).abs() < 1e-6);
}

#[test]
fn test_quadratic_objective() {
    // minimize (x - 2)^2 = x^2 - 4x + 4
    let mut model = quiet_model();
    let x = model
        .add_variable(VariableDomain::Continuous, -10.0, 10.0, None)
        .unwrap();
    model
        .set_objective(x * x - x * 4.0 + 4.0, ObjectiveSense::Minimize)
        .unwrap();
    model.optimize().unwrap();

    assert!((value(&model, x) - 2.0).abs() < 1e-5);
    let objective = model
        .get_model_attribute(ModelAttribute::ObjectiveValue)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!(objective.abs() < 1e-5);
}

#[test]
fn test_quadratic_constraint_is_rejected() {
    let mut model = quiet_model();
    let x = model
        .add_variable(VariableDomain::Continuous, 0.0, 1.0, None)
        .unwrap();
    let err = model.add_constraint(&(x * x).le(1.0), None).unwrap_err();
    assert_eq!(err.code(), "BACKEND_CALL");
    assert_eq!(model.number_of_constraints(ConstraintType::Linear).unwrap(), 0);
    assert!(matches!(
        model.number_of_constraints(ConstraintType::Quadratic),
        Err(SolverError::UnknownConstraintType { .. })
    ));
}

#[test]
fn test_sos_constraint_is_rejected() {
    let mut model = quiet_model();
    let vars = [
        model
            .add_variable(VariableDomain::Continuous, 0.0, 1.0, None)
            .unwrap(),
        model
            .add_variable(VariableDomain::Continuous, 0.0, 1.0, None)
            .unwrap(),
    ];
    let err = model
        .add_sos_constraint(&vars, &[1.0, 2.0], SosType::Sos1)
        .unwrap_err();
    assert_eq!(err.code(), "BACKEND_CALL");
    assert!(matches!(
        model.number_of_constraints(ConstraintType::Sos1),
        Err(SolverError::UnknownConstraintType { .. })
    ));
}

/// maximize x + 2y + 3z subject to x + y + z <= 4, y <= 1, all in [0, 3];
/// deleting y and the y <= 1 row leaves max x + 3z with x + z <= 4.
#[test]
fn test_deleted_entities_are_removed_from_solve() {
    let mut model = quiet_model();
    let x = model
        .add_variable(VariableDomain::Continuous, 0.0, 3.0, Some("x"))
        .unwrap();
    let y = model
        .add_variable(VariableDomain::Continuous, 0.0, 3.0, Some("y"))
        .unwrap();
    let z = model
        .add_variable(VariableDomain::Continuous, 0.0, 3.0, Some("z"))
        .unwrap();
    let total = model
        .add_constraint(&(x + y + z).le(4.0), Some("total"))
        .unwrap();
    let cap_y = model.add_constraint(&(y * 1.0).le(1.0), Some("cap_y")).unwrap();

    model.delete_variable(y).unwrap();
    model.delete_constraint(cap_y).unwrap();
    model
        .set_objective(x + z * 3.0, ObjectiveSense::Maximize)
        .unwrap();

    assert!(!model.is_variable_active(y));
    assert!(model.is_variable_active(z));
    assert!(!model.is_constraint_active(cap_y));
    assert!(model.is_constraint_active(total));
    assert_eq!(model.number_of_variables().unwrap(), 2);
    assert_eq!(model.number_of_constraints(ConstraintType::Linear).unwrap(), 1);

    model.optimize().unwrap();

    assert!((value(&model, x) - 1.0).abs() < 1e-6);
    assert!((value(&model, z) - 3.0).abs() < 1e-6);
    let activity = model
        .get_constraint_attribute(total, ConstraintAttribute::Primal)
        .unwrap()
        .as_f64()
        .unwrap();
    assert!((activity - 4.0).abs() < 1e-6);
    assert_eq!(
        model
            .get_variable_attribute(z, VariableAttribute::Name)
            .unwrap(),
        AttributeValue::Text("z".to_string())
    );
    assert!(model.get_variable_attribute(y, VariableAttribute::Value).is_err());
}

#[test]
fn test_infeasible_and_counts() {
    let mut model = quiet_model();
    let x = model
        .add_variable(VariableDomain::Continuous, 0.0, 10.0, None)
        .unwrap();
    model.add_constraint(&(x * 1.0).ge(10.0), None).unwrap();
    model.add_constraint(&(x * 1.0).le(5.0), None).unwrap();
    model.set_objective(x, ObjectiveSense::Minimize).unwrap();

    assert_eq!(model.number_of_variables().unwrap(), 1);
    assert_eq!(model.number_of_constraints(ConstraintType::Linear).unwrap(), 2);

    model.optimize().unwrap();
    let status = model.termination_status().unwrap();
    assert!(matches!(
        status,
        TerminationStatusCode::Infeasible | TerminationStatusCode::InfeasibleOrUnbounded
    ));
    assert_eq!(
        model
            .get_model_attribute(ModelAttribute::PrimalStatus)
            .unwrap(),
        AttributeValue::Result(ResultStatusCode::NoSolution)
    );
}

#[test]
fn test_time_limit_and_threads_overrides() {
    let mut model = quiet_model();
    model
        .set_model_attribute(ModelAttribute::TimeLimitSec, 12.5)
        .unwrap();
    assert_eq!(
        model
            .get_model_attribute(ModelAttribute::TimeLimitSec)
            .unwrap(),
        AttributeValue::Float(12.5)
    );
    model
        .set_model_attribute(ModelAttribute::NumberOfThreads, 1_i64)
        .unwrap();
    assert_eq!(
        model
            .get_model_attribute(ModelAttribute::NumberOfThreads)
            .unwrap(),
        AttributeValue::Int(1)
    );
    assert!(model.supports_model_attribute(ModelAttribute::RelativeGap, AttributeOperation::Get));
    assert!(!model.supports_model_attribute(ModelAttribute::RelativeGap, AttributeOperation::Set));
}

#[test]
fn test_unknown_attribute_is_reported() {
    let mut model = quiet_model();
    let err = model
        .set_model_attribute(ModelAttribute::SolverVersion, "1.0")
        .unwrap_err();
    assert_eq!(err.code(), "ATTRIBUTE_UNKNOWN");
    assert_eq!(
        model.get_model_attribute(ModelAttribute::SolverName).unwrap(),
        AttributeValue::Text("HiGHS".to_string())
    );
}

#[test]
fn test_apply_config() {
    let mut model = quiet_model();
    let config = SolverConfig::new()
        .with_time_limit(5.0)
        .with_mip_gap(0.01)
        .with_presolve(false)
        .with_threads(1);
    model.apply_config(&config).unwrap();
    assert_eq!(
        model
            .get_model_attribute(ModelAttribute::TimeLimitSec)
            .unwrap(),
        AttributeValue::Float(5.0)
    );
}

#[test]
fn test_default_env_is_shared() {
    init_tracing();
    let first = default_env().unwrap();
    let second = default_env().unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let mut model = HighsModel::new(HighsBackend::new().unwrap());
    assert!(!model.raw_model().is_null());
}
