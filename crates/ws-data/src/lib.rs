//! Dataset loading and filtering for the story viewer

pub mod filter;
pub mod observation;
pub mod store;

use thiserror::Error;

// Re-exports
pub use filter::{apply, FilterCriteria};
pub use observation::{IncomeTier, Observation};
pub use store::DatasetStore;

/// Errors that can occur while loading the dataset
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("Missing column '{0}' in header")]
    Schema(String),

    #[error("Join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
