//! tabula - YAML-driven workflow runner for tabular data pipelines

pub mod args;
pub mod error;
pub mod frame;
pub mod ops;
pub mod outputs;
pub mod registry;
pub mod runner;
pub mod server;
pub mod value;
pub mod workflow;

pub use args::OpArgs;
pub use error::{FixSuggestion, TabulaError};
pub use frame::{Frame, Tabular};
pub use outputs::OutputStore;
pub use registry::Registry;
pub use runner::{NodeOutcome, NodeStatus, RunReport, Runner};
pub use value::OpValue;
pub use workflow::{Node, Workflow};
