//! Backend-independent attribute identifiers and the values they carry.

use serde::{Deserialize, Serialize};

use crate::SolverError;
use crate::status::{ResultStatusCode, TerminationStatusCode};

/// Per-variable attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum VariableAttribute {
    Value = 0,
    LowerBound = 1,
    UpperBound = 2,
    PrimalStart = 3,
    Domain = 4,
    Name = 5,
}

impl VariableAttribute {
    pub const ALL: [VariableAttribute; 6] = [
        VariableAttribute::Value,
        VariableAttribute::LowerBound,
        VariableAttribute::UpperBound,
        VariableAttribute::PrimalStart,
        VariableAttribute::Domain,
        VariableAttribute::Name,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VariableAttribute::Value => "Value",
            VariableAttribute::LowerBound => "LowerBound",
            VariableAttribute::UpperBound => "UpperBound",
            VariableAttribute::PrimalStart => "PrimalStart",
            VariableAttribute::Domain => "Domain",
            VariableAttribute::Name => "Name",
        }
    }
}

/// Model-wide attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ModelAttribute {
    ObjectiveSense = 0,
    DualStatus = 1,
    PrimalStatus = 2,
    RawStatusString = 3,
    TerminationStatus = 4,
    Silent = 5,
    SolverName = 6,
    SolverVersion = 7,
    ObjectiveValue = 8,
    SolveTimeSec = 9,
    RelativeGap = 10,
    NodeCount = 11,
    SimplexIterations = 12,
    BarrierIterations = 13,
    TimeLimitSec = 14,
    NumberOfThreads = 15,
}

impl ModelAttribute {
    pub const ALL: [ModelAttribute; 16] = [
        ModelAttribute::ObjectiveSense,
        ModelAttribute::DualStatus,
        ModelAttribute::PrimalStatus,
        ModelAttribute::RawStatusString,
        ModelAttribute::TerminationStatus,
        ModelAttribute::Silent,
        ModelAttribute::SolverName,
        ModelAttribute::SolverVersion,
        ModelAttribute::ObjectiveValue,
        ModelAttribute::SolveTimeSec,
        ModelAttribute::RelativeGap,
        ModelAttribute::NodeCount,
        ModelAttribute::SimplexIterations,
        ModelAttribute::BarrierIterations,
        ModelAttribute::TimeLimitSec,
        ModelAttribute::NumberOfThreads,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelAttribute::ObjectiveSense => "ObjectiveSense",
            ModelAttribute::DualStatus => "DualStatus",
            ModelAttribute::PrimalStatus => "PrimalStatus",
            ModelAttribute::RawStatusString => "RawStatusString",
            ModelAttribute::TerminationStatus => "TerminationStatus",
            ModelAttribute::Silent => "Silent",
            ModelAttribute::SolverName => "SolverName",
            ModelAttribute::SolverVersion => "SolverVersion",
            ModelAttribute::ObjectiveValue => "ObjectiveValue",
            ModelAttribute::SolveTimeSec => "SolveTimeSec",
            ModelAttribute::RelativeGap => "RelativeGap",
            ModelAttribute::NodeCount => "NodeCount",
            ModelAttribute::SimplexIterations => "SimplexIterations",
            ModelAttribute::BarrierIterations => "BarrierIterations",
            ModelAttribute::TimeLimitSec => "TimeLimitSec",
            ModelAttribute::NumberOfThreads => "NumberOfThreads",
        }
    }
}

/// Per-constraint attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConstraintAttribute {
    Name = 0,
    Primal = 1,
    Dual = 2,
}

impl ConstraintAttribute {
    pub const ALL: [ConstraintAttribute; 3] = [
        ConstraintAttribute::Name,
        ConstraintAttribute::Primal,
        ConstraintAttribute::Dual,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintAttribute::Name => "Name",
            ConstraintAttribute::Primal => "Primal",
            ConstraintAttribute::Dual => "Dual",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableDomain {
    #[default]
    Continuous,
    Integer,
    Binary,
    SemiContinuous,
}

impl VariableDomain {
    pub fn is_discrete(self) -> bool {
        matches!(self, VariableDomain::Integer | VariableDomain::Binary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VariableDomain::Continuous => "continuous",
            VariableDomain::Integer => "integer",
            VariableDomain::Binary => "binary",
            VariableDomain::SemiContinuous => "semi_continuous",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

impl ObjectiveSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectiveSense::Minimize => "minimize",
            ObjectiveSense::Maximize => "maximize",
        }
    }
}

/// Which attribute family a dispatch call addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeScope {
    Variable,
    Model,
    Constraint,
}

impl AttributeScope {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeScope::Variable => "variable",
            AttributeScope::Model => "model",
            AttributeScope::Constraint => "constraint",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeOperation {
    Get,
    Set,
}

impl AttributeOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            AttributeOperation::Get => "get",
            AttributeOperation::Set => "set",
        }
    }
}

/// Dynamically typed value passed through attribute get/set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Float(f64),
    Int(i64),
    Bool(bool),
    Text(String),
    Domain(VariableDomain),
    Sense(ObjectiveSense),
    Termination(TerminationStatusCode),
    Result(ResultStatusCode),
    /// No value; e.g. a primal start that was never staged.
    Unset,
}

impl AttributeValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AttributeValue::Float(_) => "float",
            AttributeValue::Int(_) => "int",
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Text(_) => "text",
            AttributeValue::Domain(_) => "domain",
            AttributeValue::Sense(_) => "sense",
            AttributeValue::Termination(_) => "termination",
            AttributeValue::Result(_) => "result",
            AttributeValue::Unset => "unset",
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, AttributeValue::Unset)
    }

    fn mismatch(&self, expected: &'static str) -> SolverError {
        SolverError::AttributeTypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    /// Float value; integers are widened.
    pub fn as_f64(&self) -> Result<f64, SolverError> {
        match self {
            AttributeValue::Float(value) => Ok(*value),
            AttributeValue::Int(value) => Ok(*value as f64),
            other => Err(other.mismatch("float")),
        }
    }

    pub fn as_i64(&self) -> Result<i64, SolverError> {
        match self {
            AttributeValue::Int(value) => Ok(*value),
            other => Err(other.mismatch("int")),
        }
    }

    pub fn as_bool(&self) -> Result<bool, SolverError> {
        match self {
            AttributeValue::Bool(value) => Ok(*value),
            other => Err(other.mismatch("bool")),
        }
    }

    pub fn as_text(&self) -> Result<&str, SolverError> {
        match self {
            AttributeValue::Text(value) => Ok(value),
            other => Err(other.mismatch("text")),
        }
    }

    pub fn as_domain(&self) -> Result<VariableDomain, SolverError> {
        match self {
            AttributeValue::Domain(value) => Ok(*value),
            other => Err(other.mismatch("domain")),
        }
    }

    pub fn as_sense(&self) -> Result<ObjectiveSense, SolverError> {
        match self {
            AttributeValue::Sense(value) => Ok(*value),
            other => Err(other.mismatch("sense")),
        }
    }

    pub fn as_termination(&self) -> Result<TerminationStatusCode, SolverError> {
        match self {
            AttributeValue::Termination(value) => Ok(*value),
            other => Err(other.mismatch("termination")),
        }
    }

    pub fn as_result_status(&self) -> Result<ResultStatusCode, SolverError> {
        match self {
            AttributeValue::Result(value) => Ok(*value),
            other => Err(other.mismatch("result")),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<VariableDomain> for AttributeValue {
    fn from(value: VariableDomain) -> Self {
        AttributeValue::Domain(value)
    }
}

impl From<ObjectiveSense> for AttributeValue {
    fn from(value: ObjectiveSense) -> Self {
        AttributeValue::Sense(value)
    }
}

impl From<TerminationStatusCode> for AttributeValue {
    fn from(value: TerminationStatusCode) -> Self {
        AttributeValue::Termination(value)
    }
}

impl From<ResultStatusCode> for AttributeValue {
    fn from(value: ResultStatusCode) -> Self {
        AttributeValue::Result(value)
    }
}

impl From<Option<f64>> for AttributeValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(AttributeValue::Unset, AttributeValue::Float)
    }
}
