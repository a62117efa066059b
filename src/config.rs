use serde::{Deserialize, Serialize};

/// Placeholder label for activities loaded without a name.
pub const DEFAULT_ACTIVITY_NAME: &str = "N/A";

/// Tunables shared by the loader and the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Decimal places used when deciding whether an activity's slack is zero.
    pub critical_precision: u32,
    /// Name given to input records that omit one.
    pub default_activity_name: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            critical_precision: 2,
            default_activity_name: DEFAULT_ACTIVITY_NAME.to_string(),
        }
    }
}

impl SchedulerConfig {
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.critical_precision = precision;
        self
    }

    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_activity_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config: SchedulerConfig =
            serde_json::from_str(r#"{ "critical_precision": 4 }"#).unwrap();
        assert_eq!(config.critical_precision, 4);
        assert_eq!(config.default_activity_name, DEFAULT_ACTIVITY_NAME);
    }
}
