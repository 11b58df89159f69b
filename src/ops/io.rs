//! Ingest and egress operations
//!
//! Readers return a frame; writers perform the side effect and return a
//! success flag. Format handling is delegated to the engine entirely.

use std::path::Path;

use crate::args::OpArgs;
use crate::error::TabulaError;
use crate::frame::Frame;
use crate::value::OpValue;

fn separator(args: &OpArgs) -> Result<u8, TabulaError> {
    match args.opt_str("separator")? {
        None => Ok(b','),
        Some(s) => {
            let mut bytes = s.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(b), None) => Ok(b),
                _ => Err(TabulaError::argument(
                    "separator",
                    "expected a single ASCII character",
                )),
            }
        }
    }
}

pub fn read_csv(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let path = args.str("path")?;
    let has_header = args.bool_or("has_header", true)?;
    let frame = Frame::read_csv(Path::new(path), separator(args)?, has_header)?;
    Ok(OpValue::Frame(frame))
}

pub fn read_parquet(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let path = args.str("path")?;
    Ok(OpValue::Frame(Frame::read_parquet(Path::new(path))?))
}

pub fn read_json(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let path = args.str("path")?;
    Ok(OpValue::Frame(Frame::read_json(Path::new(path))?))
}

pub fn write_csv(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let path = args.str("path")?;
    frame.write_csv(Path::new(path), separator(args)?)?;
    Ok(OpValue::Bool(true))
}

pub fn write_parquet(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let path = args.str("path")?;
    frame.write_parquet(Path::new(path))?;
    Ok(OpValue::Bool(true))
}

pub fn write_json(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let path = args.str("path")?;
    frame.write_json(Path::new(path))?;
    Ok(OpValue::Bool(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::OpValue;
    use polars::df;
    use serde_json::json;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn args(pairs: Vec<(&str, OpValue)>) -> OpArgs {
        OpArgs::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn read_csv_missing_file_is_an_error() {
        let a = args(vec![("path", OpValue::Scalar(json!("/no/such/file.csv")))]);
        assert!(read_csv(&a).is_err());
    }

    #[test]
    fn write_then_read_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let frame = Frame::new(df!("a" => &[1i64, 2], "b" => &["x", "y"]).unwrap());

        let wrote = write_csv(&args(vec![
            ("df", OpValue::Frame(frame)),
            ("path", OpValue::Scalar(json!(path.to_str().unwrap()))),
        ]))
        .unwrap();
        assert!(matches!(wrote, OpValue::Bool(true)));

        let read = read_csv(&args(vec![(
            "path",
            OpValue::Scalar(json!(path.to_str().unwrap())),
        )]))
        .unwrap();
        let frame = read.as_frame().unwrap();
        assert_eq!(frame.inner().height(), 2);
    }

    #[test]
    fn multi_char_separator_is_rejected() {
        let a = args(vec![
            ("path", OpValue::Scalar(json!("x.csv"))),
            ("separator", OpValue::Scalar(json!("||"))),
        ]);
        assert!(matches!(read_csv(&a), Err(TabulaError::Argument { .. })));
    }
}
