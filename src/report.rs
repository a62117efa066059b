//! Tabular views of a computed schedule.

use crate::network::Network;
use polars::prelude::PlSmallStr;
use polars::prelude::*;

/// Columns emitted by [`schedule_dataframe`], in order.
pub const REPORT_COLUMNS: [&str; 10] = [
    "id",
    "name",
    "duration",
    "predecessors",
    "early_start",
    "early_finish",
    "late_start",
    "late_finish",
    "slack",
    "is_critical",
];

/// One row per activity, in insertion order.
pub fn schedule_dataframe(network: &Network) -> PolarsResult<DataFrame> {
    let activities = network.activities();
    let height = activities.len();

    let mut ids: Vec<&str> = Vec::with_capacity(height);
    let mut names: Vec<&str> = Vec::with_capacity(height);
    let mut durations: Vec<f64> = Vec::with_capacity(height);
    let mut predecessors: Vec<String> = Vec::with_capacity(height);
    let mut early_starts: Vec<f64> = Vec::with_capacity(height);
    let mut early_finishes: Vec<f64> = Vec::with_capacity(height);
    let mut late_starts: Vec<f64> = Vec::with_capacity(height);
    let mut late_finishes: Vec<f64> = Vec::with_capacity(height);
    let mut slacks: Vec<f64> = Vec::with_capacity(height);
    let mut critical: Vec<bool> = Vec::with_capacity(height);

    for activity in activities {
        ids.push(activity.id.as_str());
        names.push(activity.name.as_str());
        durations.push(activity.duration);
        predecessors.push(
            activity
                .predecessors
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(","),
        );
        early_starts.push(activity.early_start());
        early_finishes.push(activity.early_finish());
        late_starts.push(activity.late_start());
        late_finishes.push(activity.late_finish());
        slacks.push(activity.slack());
        critical.push(activity.is_critical());
    }

    let columns: Vec<Column> = vec![
        Series::new(PlSmallStr::from_static("id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("name"), names).into_column(),
        Series::new(PlSmallStr::from_static("duration"), durations).into_column(),
        Series::new(PlSmallStr::from_static("predecessors"), predecessors).into_column(),
        Series::new(PlSmallStr::from_static("early_start"), early_starts).into_column(),
        Series::new(PlSmallStr::from_static("early_finish"), early_finishes).into_column(),
        Series::new(PlSmallStr::from_static("late_start"), late_starts).into_column(),
        Series::new(PlSmallStr::from_static("late_finish"), late_finishes).into_column(),
        Series::new(PlSmallStr::from_static("slack"), slacks).into_column(),
        Series::new(PlSmallStr::from_static("is_critical"), critical).into_column(),
    ];
    DataFrame::new(columns)
}

fn format_number(value: f64) -> String {
    if value.is_infinite() {
        let label = if value > 0.0 { "inf" } else { "-inf" };
        label.to_string()
    } else if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn format_cell(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::Float64(v) => format_number(*v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::Boolean(true) => "*".to_string(),
        AnyValue::Boolean(false) => String::new(),
        other => other.to_string(),
    }
}

/// Renders `df` as a bordered text table. Boolean cells show `*` when set,
/// so critical activities stand out.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let col_names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| {
                col.get(row_idx)
                    .map(|av| format_cell(&av))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        cells.push(row);
    }

    let mut widths: Vec<usize> = col_names.iter().map(|n| n.len()).collect();
    for row in &cells {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let push_row = |out: &mut String, row: &[String]| {
        out.push('|');
        for (ci, cell) in row.iter().enumerate() {
            out.push(' ');
            out.push_str(cell);
            let pad = widths[ci].saturating_sub(cell.chars().count());
            out.push_str(&" ".repeat(pad));
            out.push_str(" |");
        }
        out.push('\n');
    };

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &col_names);
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}
