use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected user input from the add form. Nothing is written when one of
/// these comes back.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid year. Please enter a valid integer.")]
    InvalidYear { input: String },

    #[error("Invalid price. Please enter a valid positive number.")]
    InvalidPrice { input: String },

    #[error("Invalid price. Please enter a valid positive number. Price cannot be negative.")]
    NegativePrice { price: f64 },
}

/// Failures reading or writing the JSON backing store. A missing or corrupt
/// file is not an error here; see `store::Loaded`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access catalog file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize catalog")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write CSV to {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Everything `add_book` can fail with.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
