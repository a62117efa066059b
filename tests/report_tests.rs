use cpm_schedule::report::REPORT_COLUMNS;
use cpm_schedule::{Activity, Network, render_text_table, schedule_dataframe};

fn scheduled_network() -> Network {
    let mut network = Network::new();
    network.add_activity(Activity::new("A", "Design", 3.0));
    network.add_activity(Activity::new("B", "Build", 2.0).with_predecessors(["A"]));
    network.add_activity(Activity::new("C", "Code", 4.0).with_predecessors(["A"]));
    network.add_activity(Activity::new("D", "Deploy", 1.0).with_predecessors(["B", "C"]));
    network.compute_schedule().unwrap();
    network
}

#[test]
fn dataframe_has_one_row_per_activity() {
    let network = scheduled_network();
    let df = schedule_dataframe(&network).unwrap();

    assert_eq!(df.height(), 4);
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    assert_eq!(names, REPORT_COLUMNS.to_vec());

    let slack = df.column("slack").unwrap().f64().unwrap();
    assert_eq!(slack.get(1), Some(2.0));
    let critical = df.column("is_critical").unwrap().bool().unwrap();
    let flags: Vec<Option<bool>> = critical.into_iter().collect();
    assert_eq!(flags, vec![Some(true), Some(false), Some(true), Some(true)]);
}

#[test]
fn text_table_marks_critical_rows() {
    let network = scheduled_network();
    let table = render_text_table(&schedule_dataframe(&network).unwrap());

    let lines: Vec<&str> = table.lines().collect();
    // border, header, border, 4 rows, border
    assert_eq!(lines.len(), 8);
    assert!(lines[1].contains("early_start"));

    let deploy = lines.iter().find(|l| l.contains("Deploy")).unwrap();
    assert!(deploy.contains("B,C"));
    let last_cell = deploy.trim_end().trim_end_matches('|').rsplit('|').next().unwrap();
    assert_eq!(last_cell.trim(), "*");

    let build = lines.iter().find(|l| l.contains("Build")).unwrap();
    assert!(!build.contains('*'));
}
