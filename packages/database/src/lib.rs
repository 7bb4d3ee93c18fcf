#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Database connection, schema, and queries for traffic volume data.
//!
//! Uses `switchy_database` over `SQLite` for all storage access. Every query
//! binds its inputs as `$n` parameters; optional filters are composed by
//! appending clauses and pushing the matching [`DatabaseValue`]s.
//!
//! [`DatabaseValue`]: switchy_database::DatabaseValue

pub mod crud;
pub mod db;
pub mod queries;

mod rows;

#[cfg(test)]
mod test_utils;

use traffic_map_traffic_models::{InvalidDateError, InvalidTimeError};

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// The database could not be opened.
    #[error("Connection error: {0}")]
    Connection(String),

    /// An I/O operation failed while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required parameter was missing or malformed.
    #[error("{message}")]
    Validation {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// The referenced entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: &'static str,
        /// The ID that was looked up.
        id: i64,
    },

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

impl DbError {
    /// Builds a [`DbError::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<InvalidDateError> for DbError {
    fn from(e: InvalidDateError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<InvalidTimeError> for DbError {
    fn from(e: InvalidTimeError) -> Self {
        Self::validation(e.to_string())
    }
}
