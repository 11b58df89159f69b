//! Writer/reader round-trips driven through whole workflows
//!
//! A CSV fixture is loaded, written back out in each supported format, and
//! re-read; the reloaded frame must keep the original column set and row
//! count.

use std::fs;

use tabula::{OutputStore, Runner, Tabular, Workflow};
use tempfile::TempDir;

fn write_fixture_csv(dir: &TempDir) -> String {
    let path = dir.path().join("cities.csv");
    fs::write(
        &path,
        "city,population\nreykjavik,139875\nvalletta,5827\nandorra,22873\n",
    )
    .unwrap();
    path.to_str().unwrap().to_string()
}

fn roundtrip(write_op: &str, read_op: &str, extension: &str) {
    let dir = TempDir::new().unwrap();
    let source = write_fixture_csv(&dir);
    let copy = dir
        .path()
        .join(format!("copy.{extension}"))
        .to_str()
        .unwrap()
        .to_string();

    let yaml = format!(
        r#"
nodes:
  load:
    function: read_csv
    params:
      path: "{source}"
    vars: original
  dump:
    function: {write_op}
    params:
      df: original
      path: "{copy}"
  reload:
    function: {read_op}
    params:
      path: "{copy}"
    vars: reloaded
"#
    );

    let workflow = Workflow::parse(&yaml).unwrap();
    let mut store = OutputStore::new();
    let report = Runner::new().run(&workflow, &mut store);
    assert!(report.is_clean(), "outcomes: {:?}", report.outcomes);

    let original = store.get("original").unwrap().as_frame().unwrap();
    let reloaded = store.get("reloaded").unwrap().as_frame().unwrap();

    assert_eq!(reloaded.height(), original.height());
    let mut original_columns = original.column_names();
    let mut reloaded_columns = reloaded.column_names();
    original_columns.sort();
    reloaded_columns.sort();
    assert_eq!(reloaded_columns, original_columns);
}

#[test]
fn csv_roundtrip_preserves_shape() {
    roundtrip("write_csv", "read_csv", "csv");
}

#[test]
fn parquet_roundtrip_preserves_shape() {
    roundtrip("write_parquet", "read_parquet", "parquet");
}

#[test]
fn json_roundtrip_preserves_shape() {
    roundtrip("write_json", "read_json", "json");
}

#[test]
fn csv_roundtrip_with_custom_separator() {
    let dir = TempDir::new().unwrap();
    let source = write_fixture_csv(&dir);
    let copy = dir.path().join("copy.tsv").to_str().unwrap().to_string();

    let yaml = format!(
        r#"
nodes:
  load:
    function: read_csv
    params:
      path: "{source}"
    vars: original
  dump:
    function: write_csv
    params:
      df: original
      path: "{copy}"
      separator: ";"
  reload:
    function: read_csv
    params:
      path: "{copy}"
      separator: ";"
    vars: reloaded
"#
    );

    let workflow = Workflow::parse(&yaml).unwrap();
    let mut store = OutputStore::new();
    let report = Runner::new().run(&workflow, &mut store);
    assert!(report.is_clean(), "outcomes: {:?}", report.outcomes);

    let reloaded = store.get("reloaded").unwrap().as_frame().unwrap();
    assert_eq!(reloaded.height(), 3);
    assert_eq!(reloaded.width(), 2);
}
