use super::{PersistenceError, PersistenceResult};
use crate::{
    activity::{Activity, ActivityId},
    config::SchedulerConfig,
    network::Network,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::path::Path;
use tracing::{info, warn};

/// One entry of an activity list as it appears in input files.
///
/// Only `id` and `duration` are strict. A `name` or `predecessors` value of
/// the wrong shape falls back to its default instead of rejecting the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: ActivityId,
    #[serde(
        default,
        deserialize_with = "lenient_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    pub duration: f64,
    #[serde(
        default,
        deserialize_with = "lenient_predecessors",
        skip_serializing_if = "Option::is_none"
    )]
    pub predecessors: Option<Vec<ActivityId>>,
}

fn lenient_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(name) => Some(name),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    })
}

/// Keeps the entries that are valid ids; `null` or anything other than an
/// array means "no predecessors".
fn lenient_predecessors<'de, D>(deserializer: D) -> Result<Option<Vec<ActivityId>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let ids = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<ActivityId>(item).ok())
        .collect();
    Ok(Some(ids))
}

impl ActivityRecord {
    fn validate(&self) -> Result<(), String> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(format!(
                "activity {} has invalid duration {}",
                self.id, self.duration
            ));
        }
        Ok(())
    }

    fn into_activity(self, default_name: &str) -> Activity {
        let name = self.name.unwrap_or_else(|| default_name.to_string());
        Activity::new(self.id, name, self.duration)
            .with_predecessors(self.predecessors.unwrap_or_default())
    }
}

/// Parses a JSON array of activity records.
///
/// Items lacking an `id` or a non-negative numeric `duration` are skipped
/// with a warning; only a document that is not an array is an error.
pub fn parse_activity_records(json: &str) -> PersistenceResult<Vec<ActivityRecord>> {
    let document: Value = serde_json::from_str(json)?;
    let Value::Array(items) = document else {
        return Err(PersistenceError::InvalidData(
            "activity list must be a JSON array".into(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let record = match serde_json::from_value::<ActivityRecord>(item) {
            Ok(record) => record,
            Err(err) => {
                warn!(item = idx, error = %err, "skipping malformed activity record");
                continue;
            }
        };
        if let Err(reason) = record.validate() {
            warn!(item = idx, "skipping malformed activity record: {reason}");
            continue;
        }
        records.push(record);
    }
    Ok(records)
}

pub fn load_activity_records_from_json<P: AsRef<Path>>(
    path: P,
) -> PersistenceResult<Vec<ActivityRecord>> {
    let contents = fs::read_to_string(path)?;
    parse_activity_records(&contents)
}

/// Creates a network from `records` and links successors. Records sharing
/// an id replace the earlier one.
pub fn build_network(records: Vec<ActivityRecord>, config: &SchedulerConfig) -> Network {
    let mut network = Network::with_config(config.clone());
    for record in records {
        network.add_activity(record.into_activity(&config.default_activity_name));
    }
    network.link_successors();
    network
}

/// Load, build, link and compute in one go.
///
/// An empty activity list yields an empty, unscheduled network rather than
/// an error so callers can report it as they see fit.
pub fn schedule_from_json<P: AsRef<Path>>(
    path: P,
    config: &SchedulerConfig,
) -> PersistenceResult<Network> {
    let path = path.as_ref();
    let records = load_activity_records_from_json(path)?;
    let mut network = build_network(records, config);
    if network.is_empty() {
        warn!(path = %path.display(), "no usable activities found");
        return Ok(network);
    }
    network.compute_schedule()?;
    info!(path = %path.display(), activities = network.len(), "network scheduled");
    Ok(network)
}

pub fn load_config_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<SchedulerConfig> {
    let file = File::open(path)?;
    let config: SchedulerConfig = serde_json::from_reader(file)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_get_defaults() {
        let records = parse_activity_records(r#"[{"id": 1, "duration": 2}]"#).unwrap();
        assert_eq!(records.len(), 1);

        let activity = records[0].clone().into_activity("N/A");
        assert_eq!(activity.name, "N/A");
        assert!(activity.predecessors.is_empty());
    }

    #[test]
    fn null_predecessors_are_treated_as_empty() {
        let records =
            parse_activity_records(r#"[{"id": "A", "duration": 1, "predecessors": null}]"#)
                .unwrap();
        assert_eq!(records[0].predecessors, None);
    }

    #[test]
    fn ill_typed_optional_fields_fall_back_to_defaults() {
        let records = parse_activity_records(
            r#"[
                {"id": "A", "duration": 1},
                {"id": "B", "name": 5, "duration": 2, "predecessors": [null, "A", {"x": 1}]},
                {"id": "C", "name": ["x"], "duration": 3, "predecessors": "A"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[1].name.as_deref(), Some("5"));
        assert_eq!(records[1].predecessors, Some(vec![ActivityId::from("A")]));

        let c = records[2].clone().into_activity("N/A");
        assert_eq!(c.name, "N/A");
        assert!(c.predecessors.is_empty());
    }

    #[test]
    fn negative_and_non_numeric_durations_are_skipped() {
        let records = parse_activity_records(
            r#"[
                {"id": "A", "duration": -1},
                {"id": "B", "duration": "three"},
                {"id": "C", "duration": 3}
            ]"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, ActivityId::from("C"));
    }

    #[test]
    fn non_array_document_is_rejected() {
        let err = parse_activity_records(r#"{"id": 1, "duration": 2}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::InvalidData(_)));
    }
}
