use crate::activity::ActivityId;
use thiserror::Error;

/// Failures raised by the scheduling engine itself.
///
/// Dangling predecessor references and negative late starts are not errors:
/// the former are skipped and the latter are logged while computation goes on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("cannot compute a schedule for a network with no activities")]
    EmptyNetwork,
    #[error(
        "activity {id} has early finish {early_finish} before its early start {early_start}"
    )]
    InvariantViolation {
        id: ActivityId,
        early_start: f64,
        early_finish: f64,
    },
    #[error("dependency cycle detected involving activity {id}")]
    CycleDetected { id: ActivityId },
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
