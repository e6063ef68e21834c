//! Constraint expressions: function with comparison sense and RHS.

use serde::{Deserialize, Serialize};

use crate::expr::affine::ScalarAffineFunction;
use crate::expr::quadratic::ScalarQuadraticFunction;
use crate::ids::ConstraintType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl ConstraintSense {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstraintSense::LessEqual => "le",
            ConstraintSense::GreaterEqual => "ge",
            ConstraintSense::Equal => "eq",
        }
    }

    /// Row bounds `(lower, upper)` equivalent to `f <sense> rhs`.
    pub fn bounds(self, rhs: f64) -> (f64, f64) {
        match self {
            ConstraintSense::LessEqual => (f64::NEG_INFINITY, rhs),
            ConstraintSense::GreaterEqual => (rhs, f64::INFINITY),
            ConstraintSense::Equal => (rhs, rhs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintFunction {
    Affine(ScalarAffineFunction),
    Quadratic(ScalarQuadraticFunction),
}

impl ConstraintFunction {
    pub fn constraint_type(&self) -> ConstraintType {
        match self {
            ConstraintFunction::Affine(_) => ConstraintType::Linear,
            ConstraintFunction::Quadratic(_) => ConstraintType::Quadratic,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintExpr {
    function: ConstraintFunction,
    sense: ConstraintSense,
    rhs: f64,
}

impl ConstraintExpr {
    pub fn new(function: ConstraintFunction, sense: ConstraintSense, rhs: f64) -> Self {
        Self {
            function,
            sense,
            rhs,
        }
    }

    pub fn function(&self) -> &ConstraintFunction {
        &self.function
    }

    pub fn sense(&self) -> ConstraintSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn into_parts(self) -> (ConstraintFunction, ConstraintSense, f64) {
        (self.function, self.sense, self.rhs)
    }
}
