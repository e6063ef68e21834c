//! Solver error types.

use optiface_expr::{ConstraintIndex, ConstraintType, ExprError, VariableIndex};

use crate::attributes::{AttributeOperation, AttributeScope};

/// Error type for dispatch, status translation and backend calls.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Attribute absent from both the override and the standard table.
    UnknownAttribute {
        scope: AttributeScope,
        operation: AttributeOperation,
        attribute: &'static str,
    },
    /// Raw backend status code absent from the translation table.
    UnknownRawStatus { raw: i32, table: &'static str },
    /// Backend has no count attribute for this constraint category.
    UnknownConstraintType {
        kind: ConstraintType,
        solver: &'static str,
    },
    /// Backend unavailable or misconfigured at environment initialization.
    BackendConfiguration {
        backend: &'static str,
        message: String,
    },
    /// Error reported by the underlying backend, passed through verbatim.
    BackendCall { code: i32, message: String },
    /// A setter received a value of the wrong kind.
    AttributeTypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Variable handle not known to the backend.
    InvalidVariable(VariableIndex),
    /// Constraint handle not known to the backend.
    InvalidConstraint(ConstraintIndex),
    /// Malformed expression or member list handed to the model.
    Expression(ExprError),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::UnknownAttribute { .. } => "ATTRIBUTE_UNKNOWN",
            SolverError::UnknownRawStatus { .. } => "STATUS_UNKNOWN_RAW",
            SolverError::UnknownConstraintType { .. } => "CONSTRAINT_TYPE_UNKNOWN",
            SolverError::BackendConfiguration { .. } => "BACKEND_CONFIGURATION",
            SolverError::BackendCall { .. } => "BACKEND_CALL",
            SolverError::AttributeTypeMismatch { .. } => "ATTRIBUTE_TYPE_MISMATCH",
            SolverError::InvalidVariable(_) => "VARIABLE_INVALID_ID",
            SolverError::InvalidConstraint(_) => "CONSTRAINT_INVALID_ID",
            SolverError::Expression(inner) => inner.code(),
        }
    }

    /// True for errors that point at an integration defect in the dispatch
    /// layer rather than at the model.
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            SolverError::UnknownAttribute { .. }
                | SolverError::UnknownRawStatus { .. }
                | SolverError::UnknownConstraintType { .. }
        )
    }

    pub fn backend_call(code: i32, message: impl Into<String>) -> Self {
        SolverError::BackendCall {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::UnknownAttribute {
                scope,
                operation,
                attribute,
            } => write!(
                f,
                "[{}] cannot {} {} attribute {}",
                self.code(),
                operation.as_str(),
                scope.as_str(),
                attribute
            ),
            SolverError::UnknownRawStatus { raw, table } => write!(
                f,
                "[{}] raw status {} is not mapped in table {}",
                self.code(),
                raw,
                table
            ),
            SolverError::UnknownConstraintType { kind, solver } => write!(
                f,
                "[{}] {} does not support {} constraints",
                self.code(),
                solver,
                kind
            ),
            SolverError::BackendConfiguration { backend, message } => {
                write!(f, "[{}] {}: {}", self.code(), backend, message)
            }
            SolverError::BackendCall { code, message } => {
                write!(f, "[{}] backend error {}: {}", self.code(), code, message)
            }
            SolverError::AttributeTypeMismatch { expected, found } => write!(
                f,
                "[{}] expected {} value, found {}",
                self.code(),
                expected,
                found
            ),
            SolverError::InvalidVariable(var) => {
                write!(f, "[{}] variable {} does not exist", self.code(), var.inner())
            }
            SolverError::InvalidConstraint(constraint) => write!(
                f,
                "[{}] {} constraint {} does not exist",
                self.code(),
                constraint.kind(),
                constraint.inner()
            ),
            SolverError::Expression(inner) => write!(f, "{inner}"),
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::Expression(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<ExprError> for SolverError {
    fn from(error: ExprError) -> Self {
        SolverError::Expression(error)
    }
}
