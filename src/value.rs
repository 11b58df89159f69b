//! Values threaded between workflow nodes
//!
//! Every operation returns an [`OpValue`]: a transformed frame, a derived
//! value, or a success flag. The same type is what parameter references
//! resolve to when a node names a prior output.

use polars::prelude::Series;

use crate::frame::Frame;

/// A value produced by one operation and consumable by later nodes
#[derive(Debug, Clone)]
pub enum OpValue {
    /// A tabular frame
    Frame(Frame),
    /// A single column pulled out of a frame
    Column(Series),
    /// A plain scalar or structured literal
    Scalar(serde_json::Value),
    /// Success flag from a side-effecting operation (writers)
    Bool(bool),
}

impl OpValue {
    /// Short type tag for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            OpValue::Frame(_) => "frame",
            OpValue::Column(_) => "column",
            OpValue::Scalar(_) => "scalar",
            OpValue::Bool(_) => "bool",
        }
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match self {
            OpValue::Frame(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self, OpValue::Frame(_))
    }
}

impl From<Frame> for OpValue {
    fn from(frame: Frame) -> Self {
        OpValue::Frame(frame)
    }
}

impl From<bool> for OpValue {
    fn from(flag: bool) -> Self {
        OpValue::Bool(flag)
    }
}
