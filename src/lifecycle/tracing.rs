//! # Logging
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info resource-admin list
//!
//! # Request payloads and discarded late results
//! RUST_LOG=debug resource-admin --local edit 2 --rating 4
//! ```
//!
//! Store calls are wrapped in spans by `#[instrument]`, so a request line reads like
//! `replace{id=ResourceId(2)}: Sending request`. Views log with the record id as a field.
//! Failures the views keep to themselves (list loads, deletes) are logged at `error`;
//! submit and load failures of the edit view at `warn`.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
