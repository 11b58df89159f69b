//! Cleaning operations: null handling, duplicates, renames

use crate::args::OpArgs;
use crate::error::TabulaError;
use crate::frame::{KeepRow, Tabular};
use crate::value::OpValue;

/// Drop rows containing nulls, optionally restricted to a column subset
pub fn drop_nans(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let subset = args.opt_str_list("subset")?;
    Ok(OpValue::Frame(frame.drop_nulls(subset.as_deref())?))
}

/// Fill nulls with a literal value, optionally restricted to a subset
pub fn fill_nans(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let value = args.scalar("value")?;
    let subset = args.opt_str_list("subset")?;
    Ok(OpValue::Frame(frame.fill_nulls(value, subset.as_deref())?))
}

pub fn drop_duplicates(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let subset = args.opt_str_list("subset")?;
    let keep: KeepRow = args
        .opt_str("keep")?
        .unwrap_or("first")
        .parse()
        .map_err(|e: String| TabulaError::argument("keep", e))?;
    Ok(OpValue::Frame(frame.drop_duplicates(subset.as_deref(), keep)?))
}

/// Per-column null counts as a one-row frame
pub fn null_counts(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    Ok(OpValue::Frame(frame.null_counts()))
}

/// Strict column rename: every source column must exist
pub fn rename(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let mapping = args.mapping("mapping")?;
    Ok(OpValue::Frame(frame.rename(&mapping)?))
}

pub fn head(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let n = args.opt_usize("n")?.unwrap_or(5);
    Ok(OpValue::Frame(frame.head(n)))
}
