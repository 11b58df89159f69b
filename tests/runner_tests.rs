//! Integration tests for the workflow dispatcher
//!
//! End-to-end runs over real files: a document is parsed, executed against
//! a caller-owned output store, and both the report and the stored outputs
//! are inspected.

use std::fs;

use tabula::{NodeStatus, OutputStore, RunReport, Runner, Workflow};
use tempfile::TempDir;

/// Three-row CSV with one null score
fn write_scores_csv(dir: &TempDir) -> String {
    let path = dir.path().join("scores.csv");
    fs::write(&path, "name,score\nada,91\nbob,\ncarol,78\n").unwrap();
    path.to_str().unwrap().to_string()
}

fn run(yaml: &str) -> (RunReport, OutputStore) {
    let workflow = Workflow::parse(yaml).unwrap();
    let mut store = OutputStore::new();
    let report = Runner::new().run(&workflow, &mut store);
    (report, store)
}

#[test]
fn load_then_clean_threads_outputs_by_name() {
    let dir = TempDir::new().unwrap();
    let csv = write_scores_csv(&dir);

    let yaml = format!(
        r#"
nodes:
  load:
    function: read_csv
    params:
      path: "{csv}"
    vars: raw
  clean:
    function: drop_nans
    params:
      df: raw
    vars: cleaned
"#
    );
    let (report, store) = run(&yaml);

    assert!(report.is_clean(), "outcomes: {:?}", report.outcomes);
    assert_eq!(report.completed, 2);

    let raw = store.get("raw").unwrap().as_frame().unwrap();
    assert_eq!(raw.inner().height(), 3);
    let cleaned = store.get("cleaned").unwrap().as_frame().unwrap();
    assert_eq!(cleaned.inner().height(), 2);
}

#[test]
fn unknown_operation_is_skipped_and_the_run_continues() {
    let dir = TempDir::new().unwrap();
    let csv = write_scores_csv(&dir);

    let yaml = format!(
        r#"
nodes:
  train:
    function: random_forest_train
    params:
      df: raw
  load:
    function: read_csv
    params:
      path: "{csv}"
    vars: data
"#
    );
    let (report, store) = run(&yaml);

    assert_eq!(report.skipped, 1);
    assert_eq!(report.completed, 1);
    assert!(matches!(
        report.outcomes[0].status,
        NodeStatus::Skipped { .. }
    ));
    assert!(store.contains("data"));
}

#[test]
fn storing_under_an_existing_name_overwrites() {
    let dir = TempDir::new().unwrap();
    let csv = write_scores_csv(&dir);

    let yaml = format!(
        r#"
nodes:
  load:
    function: read_csv
    params:
      path: "{csv}"
    vars: data
  trim:
    function: head
    params:
      df: data
      n: 1
    vars: data
"#
    );
    let (report, store) = run(&yaml);

    assert!(report.is_clean());
    assert_eq!(store.len(), 1);
    let data = store.get("data").unwrap().as_frame().unwrap();
    assert_eq!(data.inner().height(), 1);
}

#[test]
fn failed_node_does_not_abort_later_nodes() {
    let dir = TempDir::new().unwrap();
    let csv = write_scores_csv(&dir);

    let yaml = format!(
        r#"
nodes:
  bad:
    function: read_csv
    params:
      path: "/no/such/file.csv"
    vars: ghost
  good:
    function: read_csv
    params:
      path: "{csv}"
    vars: data
"#
    );
    let (report, store) = run(&yaml);

    assert_eq!(report.failed, 1);
    assert_eq!(report.completed, 1);
    assert!(!store.contains("ghost"));
    assert!(store.contains("data"));
}

#[test]
fn node_without_vars_stores_nothing() {
    let dir = TempDir::new().unwrap();
    let csv = write_scores_csv(&dir);

    let yaml = format!(
        r#"
nodes:
  load:
    function: read_csv
    params:
      path: "{csv}"
"#
    );
    let (report, store) = run(&yaml);

    assert!(report.is_clean());
    assert!(report.outcomes[0].stored_as.is_none());
    assert!(store.is_empty());
}

#[test]
fn literal_frame_parameter_is_a_type_error_and_the_run_continues() {
    let dir = TempDir::new().unwrap();
    let csv = write_scores_csv(&dir);

    let yaml = format!(
        r#"
nodes:
  load:
    function: read_csv
    params:
      path: "{csv}"
    vars: left
  combine:
    function: merge
    params:
      df1: left
      df2: never_stored
      on: name
  trim:
    function: head
    params:
      df: left
    vars: peek
"#
    );
    let (report, store) = run(&yaml);

    assert_eq!(report.type_errors, 1);
    assert!(matches!(
        report.outcomes[1].status,
        NodeStatus::TypeError { .. }
    ));
    // the later node still ran and stored its output
    assert_eq!(report.outcomes[2].task_number, 3);
    assert!(store.contains("peek"));
}
