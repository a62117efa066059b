use crate::error::{ScheduleError, ScheduleResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

const EPSILON: f64 = 1e-6;

/// Beyond this many decimals an `f64` carries no further information.
pub(crate) const MAX_PRECISION: u32 = 15;

/// Key of an activity within a network.
///
/// Input files may use either strings or integers for ids; both are
/// normalised to their string form so `1` and `"1"` name the same activity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawActivityId", into = "String")]
pub struct ActivityId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawActivityId {
    Int(i64),
    Text(String),
}

impl From<RawActivityId> for ActivityId {
    fn from(value: RawActivityId) -> Self {
        match value {
            RawActivityId::Int(id) => Self(id.to_string()),
            RawActivityId::Text(id) => Self(id),
        }
    }
}

impl From<ActivityId> for String {
    fn from(value: ActivityId) -> Self {
        value.0
    }
}

impl ActivityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ActivityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for ActivityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// One node of the activity network together with its CPM timings.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub name: String,
    pub duration: f64,
    pub predecessors: Vec<ActivityId>,
    pub(crate) successors: Vec<ActivityId>,
    pub(crate) early_start: f64,
    pub(crate) early_finish: f64,
    pub(crate) late_start: f64,
    pub(crate) late_finish: f64,
    pub(crate) is_critical: bool,
}

impl Activity {
    pub fn new(id: impl Into<ActivityId>, name: impl Into<String>, duration: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            predecessors: Vec::new(),
            successors: Vec::new(),
            early_start: 0.0,
            early_finish: 0.0,
            late_start: f64::INFINITY,
            late_finish: f64::INFINITY,
            is_critical: false,
        }
    }

    pub fn with_predecessors<I, P>(mut self, predecessors: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ActivityId>,
    {
        self.predecessors = predecessors.into_iter().map(Into::into).collect();
        self
    }

    /// Activities that list this one as a predecessor. Empty until the
    /// owning network has linked successors.
    pub fn successors(&self) -> &[ActivityId] {
        &self.successors
    }

    pub fn early_start(&self) -> f64 {
        self.early_start
    }

    pub fn early_finish(&self) -> f64 {
        self.early_finish
    }

    pub fn late_start(&self) -> f64 {
        self.late_start
    }

    pub fn late_finish(&self) -> f64 {
        self.late_finish
    }

    pub fn is_critical(&self) -> bool {
        self.is_critical
    }

    /// Total float, `LS - ES`.
    pub fn slack(&self) -> f64 {
        self.late_start - self.early_start
    }

    pub(crate) fn reset_timing(&mut self) {
        self.early_start = 0.0;
        self.early_finish = 0.0;
        self.late_start = f64::INFINITY;
        self.late_finish = f64::INFINITY;
        self.is_critical = false;
    }

    pub fn compute_early(&mut self, max_predecessor_ef: f64) -> ScheduleResult<()> {
        self.early_start = max_predecessor_ef;
        self.early_finish = self.early_start + self.duration;

        if !self.duration.is_finite() || self.early_finish < self.early_start {
            return Err(ScheduleError::InvariantViolation {
                id: self.id.clone(),
                early_start: self.early_start,
                early_finish: self.early_finish,
            });
        }
        Ok(())
    }

    /// Activities without successors finish at the project deadline; all
    /// others must finish by the earliest late start among their successors.
    pub fn compute_late(&mut self, min_successor_ls: f64, project_deadline: f64) {
        self.late_finish = if self.successors.is_empty() {
            project_deadline
        } else {
            min_successor_ls
        };
        self.late_start = self.late_finish - self.duration;

        if self.late_start < -EPSILON {
            warn!(
                activity = %self.id,
                late_start = self.late_start,
                "negative late start; check predecessor links"
            );
        }
    }

    pub fn compute_slack(&mut self, precision: u32) -> f64 {
        let total_float = self.slack();
        self.is_critical = rounds_to_zero(total_float, precision);
        total_float
    }
}

/// True when `value` is `0` once rounded to `precision` decimal places.
/// Precision is capped at [`MAX_PRECISION`].
pub(crate) fn rounds_to_zero(value: f64, precision: u32) -> bool {
    if !value.is_finite() {
        return false;
    }
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (value * scale).round() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_from_numbers_and_strings_coincide() {
        let from_int: ActivityId = serde_json::from_str("7").unwrap();
        let from_text: ActivityId = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_int, from_text);
        assert_eq!(serde_json::to_string(&from_int).unwrap(), "\"7\"");
    }

    #[test]
    fn new_activity_starts_with_unset_late_times() {
        let activity = Activity::new("A", "Design", 3.0);
        assert_eq!(activity.early_start(), 0.0);
        assert_eq!(activity.early_finish(), 0.0);
        assert!(activity.late_start().is_infinite());
        assert!(activity.late_finish().is_infinite());
        assert!(!activity.is_critical());
    }

    #[test]
    fn compute_early_adds_duration() {
        let mut activity = Activity::new("B", "Build", 2.5);
        activity.compute_early(4.0).unwrap();
        assert_eq!(activity.early_start(), 4.0);
        assert_eq!(activity.early_finish(), 6.5);
    }

    #[test]
    fn compute_early_rejects_negative_duration() {
        let mut activity = Activity::new("X", "Broken", -1.0);
        let err = activity.compute_early(0.0).unwrap_err();
        assert!(matches!(err, ScheduleError::InvariantViolation { .. }));
    }

    #[test]
    fn compute_early_rejects_nan_duration() {
        let mut activity = Activity::new("N", "Unknown", f64::NAN);
        let err = activity.compute_early(0.0).unwrap_err();
        assert!(matches!(err, ScheduleError::InvariantViolation { .. }));
    }

    #[test]
    fn compute_early_rejects_infinite_duration() {
        let mut activity = Activity::new("I", "Forever", f64::INFINITY);
        assert!(activity.compute_early(0.0).is_err());
    }

    #[test]
    fn compute_late_without_successors_uses_deadline() {
        let mut activity = Activity::new("D", "Deliver", 1.0);
        activity.compute_late(f64::INFINITY, 8.0);
        assert_eq!(activity.late_finish(), 8.0);
        assert_eq!(activity.late_start(), 7.0);
    }

    #[test]
    fn compute_late_with_successors_uses_their_minimum() {
        let mut activity = Activity::new("B", "Build", 2.0);
        activity.successors.push(ActivityId::from("D"));
        activity.compute_late(7.0, 8.0);
        assert_eq!(activity.late_finish(), 7.0);
        assert_eq!(activity.late_start(), 5.0);
    }

    #[test]
    fn slack_within_rounding_noise_is_critical() {
        let mut activity = Activity::new("A", "Alpha", 0.3);
        activity.compute_early(0.0).unwrap();
        activity.compute_late(f64::INFINITY, 0.1 + 0.2);
        let slack = activity.compute_slack(2);
        assert!(slack.abs() < 1e-9);
        assert!(activity.is_critical());
    }

    #[test]
    fn positive_slack_is_not_critical() {
        let mut activity = Activity::new("B", "Beta", 2.0);
        activity.compute_early(3.0).unwrap();
        activity.compute_late(f64::INFINITY, 7.0);
        assert_eq!(activity.compute_slack(2), 2.0);
        assert!(!activity.is_critical());
    }

    #[test]
    fn rounding_respects_precision() {
        assert!(rounds_to_zero(0.004, 2));
        assert!(!rounds_to_zero(0.004, 3));
        assert!(!rounds_to_zero(f64::INFINITY, 2));
    }

    #[test]
    fn huge_precision_still_treats_zero_as_zero() {
        assert!(rounds_to_zero(0.0, 400));
        assert!(rounds_to_zero(0.0, u32::MAX));
        assert!(!rounds_to_zero(1e-3, u32::MAX));
    }
}
