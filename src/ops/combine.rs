//! Combining operations over two frames

use crate::args::OpArgs;
use crate::error::TabulaError;
use crate::frame::{JoinKind, Tabular};
use crate::value::OpValue;

/// Join two frames on key columns. `how` defaults to an inner join; a
/// cross join ignores `on` entirely.
pub fn merge(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let left = args.frame("df1")?;
    let right = args.frame("df2")?;
    let how: JoinKind = args
        .opt_str("how")?
        .unwrap_or("inner")
        .parse()
        .map_err(|e: String| TabulaError::argument("how", e))?;
    let on = if how == JoinKind::Cross {
        Vec::new()
    } else {
        args.str_list("on")?
    };
    Ok(OpValue::Frame(left.join(right, &on, how)?))
}

/// Vertically stack two frames with matching schemas
pub fn concat(args: &OpArgs) -> Result<OpValue, TabulaError> {
    let first = args.frame("df1")?;
    let second = args.frame("df2")?;
    Ok(OpValue::Frame(first.vstack(second)?))
}
