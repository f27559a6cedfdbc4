//! Generic actor framework for record management.
//!
//! The building blocks for keeping a type-safe collection of records behind an actor
//! with create, read, list, update and delete operations.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that record types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the records
//! - [`ResourceClient`] - Typed, cloneable handle for sending requests to the actor
//! - [`ActorClient`] - Default `get`/`list`/`delete` for entity-specific clients
//! - [`FrameworkError`] - Errors raised by the plumbing
//!
//! # Concurrency Model
//!
//! Each actor runs in its own Tokio task and handles one request at a time, so the record
//! map is never shared and never locked.
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
