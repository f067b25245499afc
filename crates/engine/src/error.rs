//! The module contains the errors the engine can throw.
//!
//! - [`ParseError`] thrown when a message cannot be turned into a [`Record`].
//! - [`TemplateError`] thrown when a reply template cannot be loaded.
//!
//!  [`Record`]: super::Record
use std::path::PathBuf;

use thiserror::Error;

use crate::Field;

/// Failures of the entry parser. Each one is fatal for the message being
/// parsed and nothing else.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid amount: \"{0}\" is not an integer")]
    InvalidAmount(String),
    #[error("Invalid date: \"{0}\" is not in YYYY-MM-DD format")]
    InvalidDate(String),
    #[error("Missing {field}: expected on line {}", .line + 1)]
    MissingRequiredField { field: Field, line: usize },
    #[error("Malformed line \"{0}\": expected exactly one key:value pair")]
    MalformedPair(String),
}

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template {} not found", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
