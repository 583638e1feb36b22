//! Error types for physics-lab.
//!
//! The simulations themselves never fail; errors only arise where settings
//! are read from outside the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown demo: {0}")]
    UnknownDemo(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
