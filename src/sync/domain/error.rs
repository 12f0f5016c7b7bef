//! Error types for domain parsing.

use thiserror::Error;

/// Error returned when a source due date cannot be interpreted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unrecognised due date '{0}'")]
pub struct DueDateError(pub String);
