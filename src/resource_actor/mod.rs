//! # Resource Actor
//!
//! The in-process record store: a [`ResourceActor`] keeping [`Resource`] entities.
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`Resource`]
//! - [`error`] - [`ResourceError`]
//! - [`new()`] - Factory for the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use resource_admin::model::ResourceCreate;
//! use resource_admin::resource_actor;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = resource_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create(ResourceCreate {
//!             title: "Dune".into(),
//!             author: "Frank Herbert".into(),
//!             kind: "Book".into(),
//!             rating: 5,
//!             comment: String::new(),
//!             date: "2024-03-01".into(),
//!         })
//!         .await
//!         .unwrap();
//!     assert_eq!(client.get(id).await.unwrap().unwrap().title, "Dune");
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::Resource;

/// Creates a new Resource actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Resource>, ResourceClient<Resource>) {
    ResourceActor::new(buffer_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::FrameworkError;
    use crate::model::{ResourceCreate, ResourceId, ValidationError};

    fn params(title: &str) -> ResourceCreate {
        ResourceCreate {
            title: title.into(),
            author: "Ursula K. Le Guin".into(),
            kind: "Book".into(),
            rating: 4,
            comment: "Slow start".into(),
            date: "2024-02-10".into(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        let first = client.create(params("The Dispossessed")).await.unwrap();
        client.delete(first).await.unwrap();
        let second = client.create(params("The Lathe of Heaven")).await.unwrap();

        assert_eq!(first, ResourceId(1));
        assert_eq!(second, ResourceId(2));
    }

    #[tokio::test]
    async fn test_invalid_replacement_leaves_record_untouched() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        let id = client.create(params("Earthsea")).await.unwrap();
        let original = client.get(id).await.unwrap().unwrap();

        let mut bad = original.clone();
        bad.title = String::new();
        let err = client.update(id, bad).await.unwrap_err();
        assert_eq!(
            err.entity_error::<ResourceError>(),
            Some(&ResourceError::Validation(ValidationError::MissingField("Title")))
        );

        let mut moved = original.clone();
        moved.id = ResourceId(99);
        let err = client.update(id, moved).await.unwrap_err();
        assert!(matches!(
            err.entity_error::<ResourceError>(),
            Some(ResourceError::IdMismatch { .. })
        ));

        assert_eq!(client.get(id).await.unwrap(), Some(original));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let (actor, client) = new(8);
        tokio::spawn(actor.run(()));

        for title in ["A", "B", "C"] {
            client.create(params(title)).await.unwrap();
        }
        client.delete(ResourceId(2)).await.unwrap();

        let titles: Vec<String> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["A", "C"]);

        assert!(matches!(
            client.delete(ResourceId(2)).await,
            Err(FrameworkError::NotFound(_))
        ));
    }
}
