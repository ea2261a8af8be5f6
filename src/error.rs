//! Error types for the food share data layer

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FoodShareError>;

#[derive(Error, Debug)]
pub enum FoodShareError {
    #[error("Seed source '{source_name}' not found at {path}")]
    MissingInput { source_name: String, path: String },

    #[error("Provider not found: {id}")]
    UnknownProvider { id: i64 },

    #[error("Food listing not found: {id}")]
    UnknownListing { id: i64 },

    #[error("Receiver not found: {id}")]
    UnknownReceiver { id: i64 },

    #[error("Quantity model unavailable: could not be loaded from {path}")]
    ModelUnavailable { path: String },

    #[error("Invalid listing: {reason}")]
    InvalidListing { reason: String },

    #[error("Invalid {kind}: {value}")]
    InvalidCategory { kind: String, value: String },

    #[error("Failed to parse identifier: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Failed to parse date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store error: {message}")]
    Store { message: String },
}

impl From<anyhow::Error> for FoodShareError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<FoodShareError>() {
            Ok(inner) => return inner,
            Err(err) => err,
        };
        match err.downcast::<rusqlite::Error>() {
            Ok(db) => FoodShareError::Database(db),
            Err(err) => FoodShareError::Store {
                message: format!("{err:#}"),
            },
        }
    }
}

impl FoodShareError {
    /// True for failures caused by a caller-supplied identifier that does not exist.
    pub fn is_unknown_reference(&self) -> bool {
        matches!(
            self,
            FoodShareError::UnknownProvider { .. }
                | FoodShareError::UnknownListing { .. }
                | FoodShareError::UnknownReceiver { .. }
        )
    }
}

#[cfg(test)]
mod tests;
