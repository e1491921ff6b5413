//! Error types and HTTP response mapping.
//!
//! - `DatasetError`: the dataset could not be read at startup (fatal)
//! - `ConfigError`: the config file could not be read, parsed or validated (fatal)
//! - `AppError`: request-level failures, converted by Axum's `IntoResponse`
//!   into JSON error bodies
//!
//! Error mappings:
//! - `StepNotFound`, `CommitNotFound` → 404
//! - `InvalidProgress`, `InvalidSelection` → 400
//! - `Internal` → 500

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Narrative step not found: {0}")]
    StepNotFound(usize),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Invalid progress: {0}")]
    InvalidProgress(f64),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::StepNotFound(_) | AppError::CommitNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidProgress(_) | AppError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
