//! Canonical termination/result codes and raw-status translation tables.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::SolverError;

/// Why a solve stopped, independent of the backend that ran it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerminationStatusCode {
    OptimizeNotCalled = 0,
    Optimal = 1,
    Infeasible = 2,
    DualInfeasible = 3,
    LocallySolved = 4,
    LocallyInfeasible = 5,
    InfeasibleOrUnbounded = 6,
    AlmostOptimal = 7,
    AlmostInfeasible = 8,
    AlmostDualInfeasible = 9,
    AlmostLocallySolved = 10,
    IterationLimit = 11,
    TimeLimit = 12,
    NodeLimit = 13,
    SolutionLimit = 14,
    MemoryLimit = 15,
    ObjectiveLimit = 16,
    NormLimit = 17,
    OtherLimit = 18,
    SlowProgress = 19,
    NumericalError = 20,
    InvalidModel = 21,
    InvalidOption = 22,
    Interrupted = 23,
    OtherError = 24,
}

impl TerminationStatusCode {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationStatusCode::OptimizeNotCalled => "optimize_not_called",
            TerminationStatusCode::Optimal => "optimal",
            TerminationStatusCode::Infeasible => "infeasible",
            TerminationStatusCode::DualInfeasible => "dual_infeasible",
            TerminationStatusCode::LocallySolved => "locally_solved",
            TerminationStatusCode::LocallyInfeasible => "locally_infeasible",
            TerminationStatusCode::InfeasibleOrUnbounded => "infeasible_or_unbounded",
            TerminationStatusCode::AlmostOptimal => "almost_optimal",
            TerminationStatusCode::AlmostInfeasible => "almost_infeasible",
            TerminationStatusCode::AlmostDualInfeasible => "almost_dual_infeasible",
            TerminationStatusCode::AlmostLocallySolved => "almost_locally_solved",
            TerminationStatusCode::IterationLimit => "iteration_limit",
            TerminationStatusCode::TimeLimit => "time_limit",
            TerminationStatusCode::NodeLimit => "node_limit",
            TerminationStatusCode::SolutionLimit => "solution_limit",
            TerminationStatusCode::MemoryLimit => "memory_limit",
            TerminationStatusCode::ObjectiveLimit => "objective_limit",
            TerminationStatusCode::NormLimit => "norm_limit",
            TerminationStatusCode::OtherLimit => "other_limit",
            TerminationStatusCode::SlowProgress => "slow_progress",
            TerminationStatusCode::NumericalError => "numerical_error",
            TerminationStatusCode::InvalidModel => "invalid_model",
            TerminationStatusCode::InvalidOption => "invalid_option",
            TerminationStatusCode::Interrupted => "interrupted",
            TerminationStatusCode::OtherError => "other_error",
        }
    }

    /// Solve stopped on a user-set or resource limit; an incumbent may exist.
    pub fn is_limit(self) -> bool {
        matches!(
            self,
            TerminationStatusCode::IterationLimit
                | TerminationStatusCode::TimeLimit
                | TerminationStatusCode::NodeLimit
                | TerminationStatusCode::SolutionLimit
                | TerminationStatusCode::MemoryLimit
                | TerminationStatusCode::ObjectiveLimit
                | TerminationStatusCode::NormLimit
                | TerminationStatusCode::OtherLimit
        )
    }

    pub fn is_optimal(self) -> bool {
        matches!(
            self,
            TerminationStatusCode::Optimal | TerminationStatusCode::LocallySolved
        )
    }
}

impl std::fmt::Display for TerminationStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a usable primal or dual solution is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ResultStatusCode {
    NoSolution = 0,
    FeasiblePoint = 1,
    NearlyFeasiblePoint = 2,
    InfeasiblePoint = 3,
    InfeasibilityCertificate = 4,
    NearlyInfeasibilityCertificate = 5,
    ReductionCertificate = 6,
    NearlyReductionCertificate = 7,
    UnknownResultStatus = 8,
    OtherResultStatus = 9,
}

impl ResultStatusCode {
    /// `FeasiblePoint` when the backend holds a solution, else `NoSolution`.
    pub fn from_availability(available: bool) -> Self {
        if available {
            ResultStatusCode::FeasiblePoint
        } else {
            ResultStatusCode::NoSolution
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResultStatusCode::NoSolution => "no_solution",
            ResultStatusCode::FeasiblePoint => "feasible_point",
            ResultStatusCode::NearlyFeasiblePoint => "nearly_feasible_point",
            ResultStatusCode::InfeasiblePoint => "infeasible_point",
            ResultStatusCode::InfeasibilityCertificate => "infeasibility_certificate",
            ResultStatusCode::NearlyInfeasibilityCertificate => {
                "nearly_infeasibility_certificate"
            }
            ResultStatusCode::ReductionCertificate => "reduction_certificate",
            ResultStatusCode::NearlyReductionCertificate => "nearly_reduction_certificate",
            ResultStatusCode::UnknownResultStatus => "unknown_result_status",
            ResultStatusCode::OtherResultStatus => "other_result_status",
        }
    }
}

impl std::fmt::Display for ResultStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of a status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub raw: i32,
    pub termination: TerminationStatusCode,
    pub description: &'static str,
}

/// Closed mapping from a backend's raw status code to a canonical code and
/// a human-readable description.
#[derive(Debug, Clone, Copy)]
pub struct StatusTable {
    name: &'static str,
    entries: &'static [(i32, TerminationStatusCode, &'static str)],
}

impl StatusTable {
    pub const fn new(
        name: &'static str,
        entries: &'static [(i32, TerminationStatusCode, &'static str)],
    ) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, raw: i32) -> Option<StatusEntry> {
        self.entries
            .iter()
            .find(|(code, _, _)| *code == raw)
            .map(|&(raw, termination, description)| StatusEntry {
                raw,
                termination,
                description,
            })
    }

    /// Translate a raw code; an unmapped code is an error, never a default.
    pub fn translate(&self, raw: i32) -> Result<StatusEntry, SolverError> {
        self.lookup(raw).ok_or_else(|| {
            warn!(
                component = "status",
                operation = "translate",
                status = "error",
                table = self.name,
                raw,
                "Raw status code is not in the translation table"
            );
            SolverError::UnknownRawStatus {
                raw,
                table: self.name,
            }
        })
    }
}

/// The pair of tables a backend declares: one for continuous models, one
/// for models with discrete variables.
#[derive(Debug, Clone, Copy)]
pub struct StatusTables {
    pub lp: StatusTable,
    pub mip: StatusTable,
}

impl StatusTables {
    pub const fn new(lp: StatusTable, mip: StatusTable) -> Self {
        Self { lp, mip }
    }

    pub fn select(&self, is_mip: bool) -> &StatusTable {
        if is_mip { &self.mip } else { &self.lp }
    }
}
