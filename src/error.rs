//! Unified error model for catalog traversal and virtual table handlers.
//! Errors raised by the external catalog are carried through unchanged in
//! meaning; the query engine maps them to its own protocol with the helpers below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CatalogError {
    #[error("{code}: {message}")]
    NotFound { code: String, message: String },
    #[error("{code}: {message}")]
    Collaborator { code: String, message: String },
    #[error("query_canceled: canceling statement due to user request")]
    Cancelled,
    #[error("{code}: {message}")]
    Config { code: String, message: String },
    #[error("{code}: {message}")]
    Internal { code: String, message: String },
}

impl CatalogError {
    pub fn code_str(&self) -> &str {
        match self {
            CatalogError::NotFound { code, .. }
            | CatalogError::Collaborator { code, .. }
            | CatalogError::Config { code, .. }
            | CatalogError::Internal { code, .. } => code.as_str(),
            CatalogError::Cancelled => "query_canceled",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CatalogError::NotFound { message, .. }
            | CatalogError::Collaborator { message, .. }
            | CatalogError::Config { message, .. }
            | CatalogError::Internal { message, .. } => message.as_str(),
            CatalogError::Cancelled => "canceling statement due to user request",
        }
    }

    pub fn not_found<S: Into<String>>(code: S, msg: S) -> Self { CatalogError::NotFound { code: code.into(), message: msg.into() } }
    pub fn collaborator<S: Into<String>>(code: S, msg: S) -> Self { CatalogError::Collaborator { code: code.into(), message: msg.into() } }
    pub fn config<S: Into<String>>(code: S, msg: S) -> Self { CatalogError::Config { code: code.into(), message: msg.into() } }
    pub fn internal<S: Into<String>>(code: S, msg: S) -> Self { CatalogError::Internal { code: code.into(), message: msg.into() } }

    pub fn database_not_found(name: &str) -> Self {
        CatalogError::not_found("database_not_found".to_string(), format!("database \"{}\" does not exist", name))
    }

    pub fn table_not_found(name: &str) -> Self {
        CatalogError::not_found("table_not_found".to_string(), format!("table \"{}\" does not exist", name))
    }

    pub fn is_not_found(&self) -> bool { matches!(self, CatalogError::NotFound { .. }) }

    /// Pgwire mapping: return (sqlstate, severity, message)
    pub fn pgwire_fields(&self) -> (&'static str, &'static str, String) {
        let msg = self.message().to_string();
        match self {
            CatalogError::NotFound { code, .. } if code == "database_not_found" => ("3D000", "ERROR", msg), // invalid_catalog_name
            CatalogError::NotFound { .. } => ("42P01", "ERROR", msg),      // undefined_table
            CatalogError::Cancelled => ("57014", "ERROR", msg),            // query_canceled
            CatalogError::Config { .. } => ("F0000", "FATAL", msg),        // config_file_error
            CatalogError::Collaborator { .. } => ("XX000", "ERROR", msg),  // internal_error
            CatalogError::Internal { .. } => ("XX000", "ERROR", msg),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Config { code: "invalid_json".into(), message: err.to_string() }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Config { code: "io_error".into(), message: err.to_string() }
    }
}

impl From<polars::prelude::PolarsError> for CatalogError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        CatalogError::Internal { code: "frame_build".into(), message: err.to_string() }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
