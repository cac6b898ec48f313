//! CLI-level errors (wraps config, tree and search errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::TreeError;
use crate::search::SearchError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Search(#[from] SearchError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Tree(_) => crate::exitcode::DATAERR,
            CliError::Search(e) => match e {
                SearchError::Tree(_) => crate::exitcode::DATAERR,
                SearchError::StartNodeUnset | SearchError::SetMaxSearchLevels(_) => {
                    crate::exitcode::USAGE
                }
            },
        }
    }
}
