//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
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
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid action kind: {0}")]
    InvalidActionKind(String),

    // ---------------------------
    // Directory errors
    // ---------------------------
    #[error("Ya existe una persona con la matrícula '{0}'")]
    DuplicateMatricula(String),

    #[error("Matrícula no encontrada: {0}")]
    MatriculaNotFound(String),

    #[error("Persona not found: id {0}")]
    PersonaNotFound(i64),

    #[error("Validation error: {0}")]
    Validation(String),

    // ---------------------------
    // Ledger errors
    // ---------------------------
    #[error("Registro not found: id {0}")]
    RegistroNotFound(i64),

    // ---------------------------
    // Report errors
    // ---------------------------
    #[error("Invalid report range: {0}")]
    InvalidRange(String),

    #[error("Report is empty: nothing to export")]
    EmptyReport,

    #[error("A report task is already running")]
    Busy,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;
