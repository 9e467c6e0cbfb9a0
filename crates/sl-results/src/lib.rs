//! sl-results: named result history and export.

pub mod export;
pub mod store;
pub mod types;

pub use store::ResultStore;
pub use types::*;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid save name: {message}")]
    Validation { message: String },

    #[error("Result not found: {name}")]
    NotFound { name: String },

    #[error("Stored entry '{name}' is corrupt: {message}")]
    Corrupt { name: String, message: String },
}
