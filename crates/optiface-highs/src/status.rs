//! HiGHS model status translation.
//!
//! Raw codes are the values of `Highs_getModelStatus`. Code 16 is only
//! reported when a MIP solution or leaf limit stops the search, so the LP
//! table leaves it unmapped.

use optiface_solver::{StatusTable, StatusTables, TerminationStatusCode as T};

const LP: &[(i32, T, &str)] = &[
    (0, T::OptimizeNotCalled, "model status not set"),
    (1, T::OtherError, "error loading the model"),
    (2, T::InvalidModel, "model is invalid"),
    (3, T::OtherError, "presolve failed"),
    (4, T::OtherError, "solve failed"),
    (5, T::OtherError, "postsolve failed"),
    (6, T::InvalidModel, "model is empty"),
    (7, T::Optimal, "optimal"),
    (8, T::Infeasible, "infeasible"),
    (9, T::InfeasibleOrUnbounded, "unbounded or infeasible"),
    (10, T::DualInfeasible, "unbounded"),
    (11, T::ObjectiveLimit, "objective bound reached"),
    (12, T::ObjectiveLimit, "objective target reached"),
    (13, T::TimeLimit, "time limit reached"),
    (14, T::IterationLimit, "iteration limit reached"),
    (15, T::OtherError, "unknown"),
    (17, T::Interrupted, "interrupted by user"),
    (18, T::MemoryLimit, "memory limit reached"),
];

const MIP: &[(i32, T, &str)] = &[
    (0, T::OptimizeNotCalled, "model status not set"),
    (1, T::OtherError, "error loading the model"),
    (2, T::InvalidModel, "model is invalid"),
    (3, T::OtherError, "presolve failed"),
    (4, T::OtherError, "solve failed"),
    (5, T::OtherError, "postsolve failed"),
    (6, T::InvalidModel, "model is empty"),
    (7, T::Optimal, "optimal"),
    (8, T::Infeasible, "infeasible"),
    (9, T::InfeasibleOrUnbounded, "unbounded or infeasible"),
    (10, T::DualInfeasible, "unbounded"),
    (11, T::ObjectiveLimit, "objective bound reached"),
    (12, T::ObjectiveLimit, "objective target reached"),
    (13, T::TimeLimit, "time limit reached"),
    (14, T::IterationLimit, "iteration limit reached"),
    (15, T::OtherError, "unknown"),
    (16, T::SolutionLimit, "solution or node limit reached"),
    (17, T::Interrupted, "interrupted by user"),
    (18, T::MemoryLimit, "memory limit reached"),
];

pub(crate) const HIGHS_STATUS_TABLES: StatusTables =
    StatusTables::new(StatusTable::new("highs_lp", LP), StatusTable::new("highs_mip", MIP));
