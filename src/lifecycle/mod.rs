//! Startup, wiring and shutdown.
//!
//! - [`LocalBackend`] - runs the in-process Resource actor behind a [`LocalStore`](crate::store::LocalStore)
//! - [`setup_tracing`] - installs the log subscriber

pub mod local_backend;
pub mod tracing;

pub use local_backend::*;
pub use tracing::*;
