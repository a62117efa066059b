pub mod activity;
pub mod calculations;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod network;
pub mod persistence;
pub mod report;

pub use activity::{Activity, ActivityId};
pub use config::SchedulerConfig;
pub use error::{ScheduleError, ScheduleResult};
pub use network::{Network, NetworkState, ScheduleSummary};
pub use persistence::{
    ActivityRecord, PersistenceError, build_network, load_activity_records_from_json,
    load_config_from_json, parse_activity_records, schedule_from_json,
};
pub use report::{render_text_table, schedule_dataframe};
