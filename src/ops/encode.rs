//! Encoding and scaling operations for model preparation

use crate::args::OpArgs;
use crate::error::TabulaError;
use crate::frame::Tabular;
use crate::value::OpValue;

/// One-hot encode categorical columns into indicator columns
pub fn one_hot(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let columns = args.str_list("columns")?;
    let drop_first = args.bool_or("drop_first", false)?;
    Ok(OpValue::Frame(frame.one_hot(&columns, drop_first)?))
}

/// Min-max scale numeric columns into [0, 1]
pub fn scale_numeric(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let columns = args.str_list("columns")?;
    Ok(OpValue::Frame(frame.scale_min_max(&columns)?))
}

/// Collapse categories below a frequency threshold into "Other"
pub fn merge_rare_categories(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let column = args.str("column")?;
    let threshold = args.f64("threshold")?;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(TabulaError::argument(
            "threshold",
            "expected a frequency in 0.0..=1.0",
        ));
    }
    Ok(OpValue::Frame(frame.merge_rare(column, threshold)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use polars::df;
    use polars::prelude::ChunkAgg;
    use serde_json::json;
    use std::collections::HashMap;

    fn with_frame(extra: Vec<(&str, serde_json::Value)>) -> OpArgs {
        let frame = Frame::new(
            df!(
                "cat" => &["a", "a", "a", "b"],
                "x" => &[0i64, 5, 10, 10],
            )
            .unwrap(),
        );
        let mut map: HashMap<String, OpValue> = HashMap::new();
        map.insert("df".to_string(), OpValue::Frame(frame));
        for (k, v) in extra {
            map.insert(k.to_string(), OpValue::Scalar(v));
        }
        OpArgs::new(map)
    }

    #[test]
    fn one_hot_expands_categories() {
        let out = one_hot(&with_frame(vec![("columns", json!("cat"))])).unwrap();
        let names = out.as_frame().unwrap().column_names();
        assert!(!names.contains(&"cat".to_string()));
        assert!(names.iter().any(|n| n.starts_with("cat")));
    }

    #[test]
    fn scale_numeric_bounds_to_unit_interval() {
        let out = scale_numeric(&with_frame(vec![("columns", json!("x"))])).unwrap();
        let col = out.as_frame().unwrap().column("x").unwrap();
        let ca = col.f64().unwrap();
        assert_eq!(ca.min(), Some(0.0));
        assert_eq!(ca.max(), Some(1.0));
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let err = merge_rare_categories(&with_frame(vec![
            ("column", json!("cat")),
            ("threshold", json!(1.5)),
        ]))
        .unwrap_err();
        assert!(matches!(err, TabulaError::Argument { .. }));
    }

    #[test]
    fn rare_categories_become_other() {
        let out = merge_rare_categories(&with_frame(vec![
            ("column", json!("cat")),
            ("threshold", json!(0.5)),
        ]))
        .unwrap();
        let col = out.as_frame().unwrap().column("cat").unwrap();
        assert_eq!(col.str().unwrap().get(3), Some("Other"));
    }
}
