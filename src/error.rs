//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid workflow document: {0}")]
    Format(String),

    #[error("unknown operation '{0}'")]
    OpNotFound(String),

    #[error("argument '{name}' must be a data frame, got {got}")]
    TypeArgument { name: String, got: String },

    #[error("missing required argument '{0}'")]
    MissingArgument(String),

    #[error("invalid argument '{name}': {detail}")]
    Argument { name: String, detail: String },

    #[error("frame operation failed: {0}")]
    Frame(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TabulaError {
    /// Shorthand for `Argument` with owned strings
    pub fn argument(name: impl Into<String>, detail: impl Into<String>) -> Self {
        TabulaError::Argument {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

impl FixSuggestion for TabulaError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            TabulaError::Yaml(_) => Some("Check YAML syntax: indentation and quoting"),
            TabulaError::Format(_) => {
                Some("The document needs a top-level 'nodes:' mapping of named tasks")
            }
            TabulaError::OpNotFound(_) => {
                Some("Run 'tabula serve' and GET /ops for the list of registered operations")
            }
            TabulaError::TypeArgument { .. } => {
                Some("Pass the output name of an earlier node that produced a frame")
            }
            TabulaError::MissingArgument(_) => {
                Some("Add the argument under the node's params: mapping")
            }
            TabulaError::Argument { .. } => None,
            TabulaError::Frame(_) => Some("Check column names and dtypes against the input frame"),
            TabulaError::Io(_) => Some("Check file path and permissions"),
        }
    }
}
