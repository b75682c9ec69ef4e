//! Error types for taxo-cli

use thiserror::Error;

/// Result type alias for taxo-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in taxo-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the query layer, configuration or CSV handling
    #[error(transparent)]
    Core(#[from] taxo_core::Error),

    /// Writing results to the terminal failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl Error {
    /// Process exit code: 2 for malformed arguments, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Core(e) => e.exit_code(),
            Error::Output(_) => 1,
        }
    }
}
