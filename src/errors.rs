//! Unified application error type.
//! All modules (db, core, cli, config) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("MySQL error: {0}")]
    Mysql(#[from] mysql::Error),

    // ---------------------------
    // Conversion errors
    // ---------------------------
    #[error("Invalid date value: {0}")]
    InvalidDate(String),

    #[error("Invalid datetime value: {0}")]
    InvalidDateTime(String),

    #[error("Cannot convert source value for {0}: {1}")]
    Conversion(String, String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
