use std::ffi::c_void;

use optiface_expr::{
    ConstraintIndex, ConstraintSense, ConstraintType, ScalarAffineFunction,
    ScalarQuadraticFunction, SosType, VariableIndex,
};
use optiface_solver::{
    AttributeValue, ModelAttribute, ObjectiveSense, RawParameter, SolverConfig, SolverError,
    StatusTable, StatusTables, TerminationStatusCode, VariableDomain,
};

use crate::dispatch::AttributeTables;
use crate::model::Model;
use crate::traits::Backend;

pub(super) const RAW_NOT_SOLVED: i32 = 0;
pub(super) const RAW_OPTIMAL: i32 = 1;
pub(super) const RAW_NODE_LIMIT: i32 = 4;
pub(super) const RAW_UNMAPPED: i32 = 99;

const LP_TABLE: &[(i32, TerminationStatusCode, &str)] = &[
    (0, TerminationStatusCode::OptimizeNotCalled, "not solved"),
    (1, TerminationStatusCode::Optimal, "optimal"),
    (2, TerminationStatusCode::Infeasible, "infeasible"),
    (3, TerminationStatusCode::TimeLimit, "time limit reached"),
];

const MIP_TABLE: &[(i32, TerminationStatusCode, &str)] = &[
    (0, TerminationStatusCode::OptimizeNotCalled, "not solved"),
    (1, TerminationStatusCode::Optimal, "optimal"),
    (2, TerminationStatusCode::Infeasible, "infeasible"),
    (3, TerminationStatusCode::TimeLimit, "time limit reached"),
    (4, TerminationStatusCode::NodeLimit, "node limit reached"),
];

#[derive(Debug, Clone)]
pub(crate) struct MockColumn {
    pub domain: VariableDomain,
    pub lower: f64,
    pub upper: f64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct MockRow {
    pub terms: Vec<(VariableIndex, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct MockQuadraticRow {
    pub function: ScalarQuadraticFunction,
    pub rhs: f64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct MockSos {
    pub variables: Vec<VariableIndex>,
    pub weights: Vec<f64>,
    pub sos_type: SosType,
    pub active: bool,
}

/// In-memory backend that records every call the facade makes.
#[derive(Debug, Default)]
pub(crate) struct MockBackend {
    pub columns: Vec<MockColumn>,
    pub rows: Vec<MockRow>,
    pub quadratic_rows: Vec<MockQuadraticRow>,
    pub sos: Vec<MockSos>,
    pub objective: ScalarQuadraticFunction,
    pub objective_sense: ObjectiveSense,
    pub silent: bool,
    pub raw_status: i32,
    pub solved: bool,
    /// Raw status the next `optimize` reports; `RAW_OPTIMAL` when unset.
    pub next_status: Option<i32>,
    pub node_count: i32,
    pub mip_start_batches: Vec<(Vec<VariableIndex>, Vec<f64>)>,
    pub reject_mip_start: bool,
    pub optimize_calls: usize,
    pub parameters: Vec<(String, RawParameter)>,
    pub raw_writes: usize,
    /// Replaces the variable count the backend reports.
    pub reported_variable_count: Option<i32>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn column(&self, var: VariableIndex) -> Result<&MockColumn, SolverError> {
        self.columns
            .get(var.inner() as usize)
            .filter(|column| column.active)
            .ok_or(SolverError::InvalidVariable(var))
    }

    fn column_mut(&mut self, var: VariableIndex) -> Result<&mut MockColumn, SolverError> {
        self.columns
            .get_mut(var.inner() as usize)
            .filter(|column| column.active)
            .ok_or(SolverError::InvalidVariable(var))
    }

    fn row(&self, constraint: ConstraintIndex) -> Result<&MockRow, SolverError> {
        self.rows
            .get(constraint.inner() as usize)
            .filter(|row| constraint.kind() == ConstraintType::Linear && row.active)
            .ok_or(SolverError::InvalidConstraint(constraint))
    }

    fn active_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.active).count()
    }

    fn solution_value(&self, var: VariableIndex) -> f64 {
        let column = &self.columns[var.inner() as usize];
        0.0_f64.max(column.lower).min(column.upper)
    }
}

fn next_index(len: usize) -> u32 {
    u32::try_from(len).expect("mock index fits in u32")
}

fn get_sense_raw(model: &Model<MockBackend>) -> Result<AttributeValue, SolverError> {
    let raw = model.backend().raw_int_attribute("ObjSense")?;
    Ok(if raw < 0 {
        ObjectiveSense::Maximize
    } else {
        ObjectiveSense::Minimize
    }
    .into())
}

fn set_sense_raw(model: &mut Model<MockBackend>, value: &AttributeValue) -> Result<(), SolverError> {
    let raw = match value.as_sense()? {
        ObjectiveSense::Minimize => 1,
        ObjectiveSense::Maximize => -1,
    };
    model.backend_mut().set_raw_int_attribute("ObjSense", raw)
}

fn get_node_count(model: &Model<MockBackend>) -> Result<AttributeValue, SolverError> {
    let count = model.backend().raw_int_attribute("NodeCount")?;
    Ok(AttributeValue::Int(i64::from(count)))
}

impl Backend for MockBackend {
    const SOLVER_NAME: &'static str = "Mock";
    const VARIABLE_COUNT_ATTRIBUTE: &'static str = "NumVars";
    const CONSTRAINT_COUNT_ATTRIBUTES: &'static [(ConstraintType, &'static str)] = &[
        (ConstraintType::Linear, "NumLinear"),
        (ConstraintType::Quadratic, "NumQuadratic"),
    ];
    const STATUS_TABLES: StatusTables = StatusTables::new(
        StatusTable::new("mock_lp", LP_TABLE),
        StatusTable::new("mock_mip", MIP_TABLE),
    );

    fn raw_int_attribute(&self, name: &str) -> Result<i32, SolverError> {
        let to_i32 = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
        match name {
            "NumVars" => Ok(self.reported_variable_count.unwrap_or_else(|| {
                to_i32(self.columns.iter().filter(|column| column.active).count())
            })),
            "NumLinear" => Ok(to_i32(self.active_rows())),
            "NumQuadratic" => Ok(to_i32(
                self.quadratic_rows.iter().filter(|row| row.active).count(),
            )),
            "ObjSense" => Ok(match self.objective_sense {
                ObjectiveSense::Minimize => 1,
                ObjectiveSense::Maximize => -1,
            }),
            "NodeCount" => Ok(self.node_count),
            other => Err(SolverError::backend_call(-1, format!("unknown raw attribute {other}"))),
        }
    }

    fn set_raw_int_attribute(&mut self, name: &str, value: i32) -> Result<(), SolverError> {
        self.raw_writes += 1;
        match name {
            "ObjSense" => {
                self.objective_sense = if value < 0 {
                    ObjectiveSense::Maximize
                } else {
                    ObjectiveSense::Minimize
                };
                Ok(())
            }
            other => Err(SolverError::backend_call(-1, format!("read-only raw attribute {other}"))),
        }
    }

    fn raw_f64_attribute(&self, name: &str) -> Result<f64, SolverError> {
        Err(SolverError::backend_call(-1, format!("unknown raw attribute {name}")))
    }

    fn set_raw_parameter(&mut self, name: &str, value: &RawParameter) -> Result<(), SolverError> {
        self.parameters.push((name.to_string(), value.clone()));
        Ok(())
    }

    fn add_variable(
        &mut self,
        domain: VariableDomain,
        lower: f64,
        upper: f64,
        name: Option<&str>,
    ) -> Result<VariableIndex, SolverError> {
        let var = VariableIndex::new(next_index(self.columns.len()));
        self.columns.push(MockColumn {
            domain,
            lower,
            upper,
            name: name.unwrap_or_default().to_string(),
            active: true,
        });
        Ok(var)
    }

    fn variable_lower_bound(&self, var: VariableIndex) -> Result<f64, SolverError> {
        Ok(self.column(var)?.lower)
    }

    fn set_variable_lower_bound(&mut self, var: VariableIndex, value: f64) -> Result<(), SolverError> {
        let column = self.column_mut(var)?;
        if value > column.upper {
            return Err(SolverError::backend_call(2, "lower bound exceeds upper bound"));
        }
        column.lower = value;
        Ok(())
    }

    fn variable_upper_bound(&self, var: VariableIndex) -> Result<f64, SolverError> {
        Ok(self.column(var)?.upper)
    }

    fn set_variable_upper_bound(&mut self, var: VariableIndex, value: f64) -> Result<(), SolverError> {
        self.column_mut(var)?.upper = value;
        Ok(())
    }

    fn variable_domain(&self, var: VariableIndex) -> Result<VariableDomain, SolverError> {
        Ok(self.column(var)?.domain)
    }

    fn set_variable_domain(
        &mut self,
        var: VariableIndex,
        domain: VariableDomain,
    ) -> Result<(), SolverError> {
        self.column_mut(var)?.domain = domain;
        Ok(())
    }

    fn variable_name(&self, var: VariableIndex) -> Result<String, SolverError> {
        Ok(self.column(var)?.name.clone())
    }

    fn set_variable_name(&mut self, var: VariableIndex, name: &str) -> Result<(), SolverError> {
        self.column_mut(var)?.name = name.to_string();
        Ok(())
    }

    fn variable_value(&self, var: VariableIndex) -> Result<f64, SolverError> {
        self.column(var)?;
        if !self.solved {
            return Err(SolverError::backend_call(3, "no solution available"));
        }
        Ok(self.solution_value(var))
    }

    fn delete_variable(&mut self, var: VariableIndex) -> Result<(), SolverError> {
        self.column_mut(var)?.active = false;
        for row in &mut self.rows {
            row.terms.retain(|(v, _)| *v != var);
        }
        Ok(())
    }

    fn is_variable_active(&self, var: VariableIndex) -> bool {
        self.column(var).is_ok()
    }

    fn add_linear_constraint(
        &mut self,
        function: &ScalarAffineFunction,
        sense: ConstraintSense,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError> {
        for var in function.variables() {
            self.column(var)?;
        }
        let index = ConstraintIndex::new(ConstraintType::Linear, next_index(self.rows.len()));
        self.rows.push(MockRow {
            terms: function.terms().to_vec(),
            sense,
            rhs,
            name: name.unwrap_or_default().to_string(),
            active: true,
        });
        Ok(index)
    }

    fn add_quadratic_constraint(
        &mut self,
        function: &ScalarQuadraticFunction,
        _sense: ConstraintSense,
        rhs: f64,
        name: Option<&str>,
    ) -> Result<ConstraintIndex, SolverError> {
        let index = ConstraintIndex::new(
            ConstraintType::Quadratic,
            next_index(self.quadratic_rows.len()),
        );
        self.quadratic_rows.push(MockQuadraticRow {
            function: function.clone(),
            rhs,
            name: name.unwrap_or_default().to_string(),
            active: true,
        });
        Ok(index)
    }

    fn add_sos_constraint(
        &mut self,
        variables: &[VariableIndex],
        weights: &[f64],
        sos_type: SosType,
    ) -> Result<ConstraintIndex, SolverError> {
        for var in variables {
            self.column(*var)?;
        }
        let index = ConstraintIndex::new(sos_type.constraint_type(), next_index(self.sos.len()));
        self.sos.push(MockSos {
            variables: variables.to_vec(),
            weights: weights.to_vec(),
            sos_type,
            active: true,
        });
        Ok(index)
    }

    fn delete_constraint(&mut self, constraint: ConstraintIndex) -> Result<(), SolverError> {
        let slot = constraint.inner() as usize;
        let active = match constraint.kind() {
            ConstraintType::Linear => self.rows.get_mut(slot).map(|row| &mut row.active),
            ConstraintType::Quadratic => {
                self.quadratic_rows.get_mut(slot).map(|row| &mut row.active)
            }
            ConstraintType::Sos1 | ConstraintType::Sos2 => self
                .sos
                .get_mut(slot)
                .filter(|sos| sos.sos_type.constraint_type() == constraint.kind())
                .map(|sos| &mut sos.active),
        };
        match active {
            Some(active) if *active => {
                *active = false;
                Ok(())
            }
            _ => Err(SolverError::InvalidConstraint(constraint)),
        }
    }

    fn is_constraint_active(&self, constraint: ConstraintIndex) -> bool {
        let slot = constraint.inner() as usize;
        match constraint.kind() {
            ConstraintType::Linear => self.rows.get(slot).is_some_and(|row| row.active),
            ConstraintType::Quadratic => {
                self.quadratic_rows.get(slot).is_some_and(|row| row.active)
            }
            ConstraintType::Sos1 | ConstraintType::Sos2 => self.sos.get(slot).is_some_and(|sos| {
                sos.active && sos.sos_type.constraint_type() == constraint.kind()
            }),
        }
    }

    fn constraint_name(&self, constraint: ConstraintIndex) -> Result<String, SolverError> {
        match constraint.kind() {
            ConstraintType::Quadratic => self
                .quadratic_rows
                .get(constraint.inner() as usize)
                .filter(|row| row.active)
                .map(|row| row.name.clone())
                .ok_or(SolverError::InvalidConstraint(constraint)),
            _ => Ok(self.row(constraint)?.name.clone()),
        }
    }

    fn set_constraint_name(
        &mut self,
        constraint: ConstraintIndex,
        name: &str,
    ) -> Result<(), SolverError> {
        self.row(constraint)?;
        self.rows[constraint.inner() as usize].name = name.to_string();
        Ok(())
    }

    fn constraint_primal(&self, constraint: ConstraintIndex) -> Result<f64, SolverError> {
        let row = self.row(constraint)?;
        Ok(row
            .terms
            .iter()
            .map(|(var, coeff)| coeff * self.solution_value(*var))
            .sum())
    }

    fn constraint_dual(&self, constraint: ConstraintIndex) -> Result<f64, SolverError> {
        self.row(constraint)?;
        Ok(0.0)
    }

    fn set_objective(
        &mut self,
        function: &ScalarQuadraticFunction,
        sense: ObjectiveSense,
    ) -> Result<(), SolverError> {
        self.objective = function.clone();
        self.objective_sense = sense;
        Ok(())
    }

    fn objective_sense(&self) -> Result<ObjectiveSense, SolverError> {
        Ok(self.objective_sense)
    }

    fn set_objective_sense(&mut self, sense: ObjectiveSense) -> Result<(), SolverError> {
        self.objective_sense = sense;
        Ok(())
    }

    fn objective_value(&self) -> Result<f64, SolverError> {
        Ok(self.objective.evaluate(|var| self.solution_value(var)))
    }

    fn is_mip(&self) -> Result<bool, SolverError> {
        Ok(self
            .columns
            .iter()
            .any(|column| column.active && column.domain.is_discrete()))
    }

    fn raw_status(&self) -> Result<i32, SolverError> {
        Ok(self.raw_status)
    }

    fn has_primal_solution(&self) -> Result<bool, SolverError> {
        Ok(self.solved)
    }

    fn has_dual_solution(&self) -> Result<bool, SolverError> {
        Ok(self.solved)
    }

    fn add_mip_start(
        &mut self,
        variables: &[VariableIndex],
        values: &[f64],
    ) -> Result<(), SolverError> {
        if self.reject_mip_start {
            return Err(SolverError::backend_call(4, "start rejected"));
        }
        self.mip_start_batches
            .push((variables.to_vec(), values.to_vec()));
        Ok(())
    }

    fn optimize(&mut self) -> Result<(), SolverError> {
        self.optimize_calls += 1;
        self.raw_status = self.next_status.unwrap_or(RAW_OPTIMAL);
        self.solved = self.raw_status == RAW_OPTIMAL;
        Ok(())
    }

    fn silent(&self) -> Result<bool, SolverError> {
        Ok(self.silent)
    }

    fn set_silent(&mut self, silent: bool) -> Result<(), SolverError> {
        self.silent = silent;
        Ok(())
    }

    fn apply_config(&mut self, config: &SolverConfig) -> Result<(), SolverError> {
        if let Some(limit) = config.time_limit {
            self.set_raw_parameter("time_limit", &RawParameter::Float(limit))?;
        }
        if let Some(silent) = config.silent {
            self.set_silent(silent)?;
        }
        for (name, value) in &config.raw_parameters {
            self.set_raw_parameter(name, value)?;
        }
        Ok(())
    }

    fn version(&self) -> String {
        "0.0.1".to_string()
    }

    fn raw_model(&mut self) -> *mut c_void {
        std::ptr::from_mut(self).cast()
    }

    fn attribute_overrides() -> AttributeTables<Self> {
        let mut tables = AttributeTables::new();
        tables.model_get = tables
            .model_get
            .with(ModelAttribute::ObjectiveSense, get_sense_raw as _)
            .with(ModelAttribute::NodeCount, get_node_count as _);
        tables.model_set = tables
            .model_set
            .with(ModelAttribute::ObjectiveSense, set_sense_raw as _);
        tables
    }
}

pub(super) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub(super) fn model_with_vars(domains: &[VariableDomain]) -> (Model<MockBackend>, Vec<VariableIndex>) {
    init_tracing();
    let mut model = Model::new(MockBackend::new());
    let vars = domains
        .iter()
        .map(|domain| model.add_variable(*domain, 0.0, 10.0, None).unwrap())
        .collect();
    (model, vars)
}
