//! Unified application error type.
//! All modules (models, api, cache, db, core, cli) return AppError so the
//! command dispatcher can report every failure the same way.

use std::io;
use thiserror::Error;

use crate::core::validation::ValidationError;
use crate::models::epoch::EpochError;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local database (cache + ui state)
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Epoch(#[from] EpochError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Form validation (never reaches the network)
    // ---------------------------
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ---------------------------
    // Remote API
    // ---------------------------
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Not logged in or session expired. Run `rtasks login <username>` first")]
    Unauthorized,

    #[error("GraphQL error: {0}")]
    Graphql(String),

    // ---------------------------
    // Task lookup
    // ---------------------------
    #[error("No task found for id '{0}'")]
    TaskNotFound(String),

    #[error("Task id prefix '{0}' matches more than one task")]
    AmbiguousTaskId(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,
}

impl From<serde_yaml::Error> for AppError {
    fn from(e: serde_yaml::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
