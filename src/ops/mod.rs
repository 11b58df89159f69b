//! The operation set behind the registry
//!
//! Each operation is a thin shim: pull typed arguments out of [`OpArgs`],
//! call one [`Tabular`] capability or IO constructor, wrap the result.

pub mod clean;
pub mod combine;
pub mod encode;
pub mod io;
pub mod select;

use crate::args::OpArgs;
use crate::error::TabulaError;
use crate::value::OpValue;

/// Signature every registered operation satisfies
pub type OpFn = fn(&OpArgs) -> Result<OpValue, TabulaError>;
