//! The seam between the views and the external record store.
//!
//! Views only ever talk to a [`ResourceStore`]. Three implementations ship:
//!
//! - [`HttpStore`] - the REST API (`/api/resources`)
//! - [`LocalStore`] - an in-process [`ResourceActor`](crate::framework::ResourceActor)
//! - [`MockStore`] - scripted answers for tests

pub mod error;
pub mod http;
pub mod local;
pub mod mock;

pub use error::StoreError;
pub use http::HttpStore;
pub use local::LocalStore;
pub use mock::{MockStore, StoreCall};

use async_trait::async_trait;
use std::sync::Arc;

use crate::model::{Resource, ResourceId};

/// Read, replace and delete access to the resource collection.
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    /// Every resource, in the order the store chooses.
    async fn list(&self) -> Result<Vec<Resource>, StoreError>;

    /// A single resource.
    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError>;

    /// Replaces the resource at `id` with `resource`, every field included.
    async fn replace(&self, id: ResourceId, resource: &Resource) -> Result<(), StoreError>;

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError>;
}

/// A store shared between views and the tasks they spawn.
pub type SharedStore = Arc<dyn ResourceStore>;
