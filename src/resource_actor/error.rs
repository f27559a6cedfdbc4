//! Error types for the Resource actor.

use thiserror::Error;

use crate::model::{ResourceId, ValidationError};

/// Errors that can occur during resource operations on the in-process store.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    /// The record failed the field rules.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A replacement tried to change the immutable id.
    #[error("Resource id cannot change: path {path}, body {body}")]
    IdMismatch { path: ResourceId, body: ResourceId },
}
