//! Selection and transformation operations

use crate::args::OpArgs;
use crate::error::TabulaError;
use crate::frame::{AggKind, DtypeKind, FilterCmp, Tabular};
use crate::value::OpValue;

/// Pull a single column out of a frame
pub fn get_column(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let name = args.str("name")?;
    Ok(OpValue::Column(frame.column(name)?))
}

/// Read one cell by row index and column name
pub fn get_cell(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let row = args.usize("row")?;
    let column = args.str("column")?;
    Ok(OpValue::Scalar(frame.cell(row, column)?))
}

pub fn sort(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let by = args.str_list("by")?;
    let descending = args.bool_or("descending", false)?;
    Ok(OpValue::Frame(frame.sort_by(&by, descending)?))
}

pub fn sample(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let n = args.usize("n")?;
    let seed = args.opt_u64("seed")?;
    Ok(OpValue::Frame(frame.sample(n, seed)?))
}

pub fn cast(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let column = args.str("column")?;
    let dtype: DtypeKind = args
        .str("dtype")?
        .parse()
        .map_err(|e: String| TabulaError::argument("dtype", e))?;
    Ok(OpValue::Frame(frame.cast(column, dtype)?))
}

/// Keep rows where `column <op> value` holds
pub fn filter(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let column = args.str("column")?;
    let cmp: FilterCmp = args
        .str("op")?
        .parse()
        .map_err(|e: String| TabulaError::argument("op", e))?;
    let value = args.scalar("value")?;
    Ok(OpValue::Frame(frame.filter(column, cmp, value)?))
}

/// Group by key columns and aggregate one value column
pub fn group_agg(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let frame = args.frame("df")?;
    let by = args.str_list("by")?;
    let column = args.str("column")?;
    let agg: AggKind = args
        .str("agg")?
        .parse()
        .map_err(|e: String| TabulaError::argument("agg", e))?;
    Ok(OpValue::Frame(frame.group_agg(&by, column, agg)?))
}
