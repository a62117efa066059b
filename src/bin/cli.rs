use clap::Parser;
use cpm_schedule::logging::{self, LogLevel};
use cpm_schedule::{
    SchedulerConfig, load_config_from_json, render_text_table, schedule_dataframe,
    schedule_from_json,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Compute the critical path schedule of an activity list.
#[derive(Debug, Parser)]
#[command(name = "cpm", version, about, long_about = None)]
struct CliArgs {
    /// JSON file holding an array of `{id, name, duration, predecessors}`.
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// JSON file with scheduler settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Decimal places used to decide whether slack is zero.
    #[arg(long, value_name = "N")]
    precision: Option<u32>,

    /// Name used for activities that have none.
    #[arg(long, value_name = "NAME")]
    default_name: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `CPM_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Print only the summary line, not the table.
    #[arg(long)]
    summary_only: bool,
}

fn resolve_config(args: &CliArgs) -> Result<SchedulerConfig, String> {
    let mut config = match &args.config {
        Some(path) => load_config_from_json(path)
            .map_err(|err| format!("Failed to read config {}: {err}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    if let Some(precision) = args.precision {
        config = config.with_precision(precision);
    }
    if let Some(name) = &args.default_name {
        config = config.with_default_name(name.clone());
    }
    Ok(config)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("Failed to initialise logging: {err}");
    }

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let network = match schedule_from_json(&args.input, &config) {
        Ok(network) => network,
        Err(err) => {
            eprintln!("Failed to build schedule: {err}");
            return ExitCode::FAILURE;
        }
    };

    let Some(summary) = network.summary() else {
        println!("No activities to schedule (input empty or every record malformed).");
        return ExitCode::FAILURE;
    };

    println!("Network built and scheduled.\n");
    if !args.summary_only {
        match schedule_dataframe(&network) {
            Ok(df) => println!("{}", render_text_table(&df)),
            Err(err) => {
                eprintln!("Failed to render schedule: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    println!("{}", summary.to_cli_summary());
    ExitCode::SUCCESS
}
