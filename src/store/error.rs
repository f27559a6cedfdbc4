//! Failures reported by a [`ResourceStore`](crate::store::ResourceStore).

use thiserror::Error;

use crate::model::ResourceId;

/// Why a store request did not succeed.
///
/// Input-layer validation failures never reach the store; they are
/// [`ValidationError`](crate::model::ValidationError)s.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The request never produced a response (connection refused, timeout, store gone).
    #[error("Network error: {0}")]
    Network(String),

    /// The store answered with a non-success status.
    #[error("Store responded with status {status}{}", detail(.message))]
    Status {
        status: u16,
        /// The `error` string of a JSON body, when one could be read.
        message: Option<String>,
    },

    /// A success response whose body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl StoreError {
    pub fn not_found(id: ResourceId) -> Self {
        StoreError::Status {
            status: 404,
            message: Some(format!("Resource {id} not found")),
        }
    }

    /// The human-readable message the store supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            StoreError::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            StoreError::Decode(e.to_string())
        } else {
            StoreError::Network(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_status_errors() {
        let taken = StoreError::Status {
            status: 409,
            message: Some("Title taken".into()),
        };
        assert_eq!(taken.server_message(), Some("Title taken"));
        assert_eq!(taken.to_string(), "Store responded with status 409: Title taken");

        let bare = StoreError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(bare.server_message(), None);
        assert_eq!(bare.to_string(), "Store responded with status 500");

        assert_eq!(StoreError::Network("refused".into()).server_message(), None);
    }
}
