//! # Local Store
//!
//! [`ResourceStore`] backed by an in-process
//! [`ResourceActor<Resource>`](crate::framework::ResourceActor). Statuses mirror what the
//! REST API would answer so views behave the same against either store.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{Resource, ResourceCreate, ResourceId};
use crate::resource_actor::ResourceError;
use crate::store::{ResourceStore, StoreError};

/// Client for the in-process Resource actor.
#[derive(Clone)]
pub struct LocalStore {
    inner: ResourceClient<Resource>,
}

impl LocalStore {
    pub fn new(inner: ResourceClient<Resource>) -> Self {
        Self { inner }
    }

    /// Adds a resource; the actor assigns the id.
    #[instrument(skip(self))]
    pub async fn create(&self, params: ResourceCreate) -> Result<ResourceId, StoreError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Resource> for LocalStore {
    type Error = StoreError;

    fn inner(&self) -> &ResourceClient<Resource> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> StoreError {
        let status = |status: u16, message: String| StoreError::Status {
            status,
            message: Some(message),
        };
        match &e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                StoreError::Network(e.to_string())
            }
            FrameworkError::NotFound(id) => status(404, format!("Resource {id} not found")),
            FrameworkError::IdsExhausted => status(500, e.to_string()),
            FrameworkError::EntityError(_) => match e.entity_error::<ResourceError>() {
                Some(err @ ResourceError::Validation(_)) => status(422, err.to_string()),
                Some(err @ ResourceError::IdMismatch { .. }) => status(400, err.to_string()),
                None => status(500, e.to_string()),
            },
        }
    }
}

#[async_trait]
impl ResourceStore for LocalStore {
    async fn list(&self) -> Result<Vec<Resource>, StoreError> {
        ActorClient::list(self).await
    }

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError> {
        ActorClient::get(self, id)
            .await?
            .ok_or_else(|| StoreError::not_found(id))
    }

    #[instrument(skip(self, resource))]
    async fn replace(&self, id: ResourceId, resource: &Resource) -> Result<(), StoreError> {
        debug!("Sending request");
        self.inner
            .update(id, resource.clone())
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError> {
        ActorClient::delete(self, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_update, MockClient};
    use crate::model::ValidationError;

    fn sample(id: u64) -> Resource {
        Resource {
            id: ResourceId(id),
            title: "Designing Data-Intensive Applications".into(),
            author: "Martin Kleppmann".into(),
            kind: "Book".into(),
            rating: 5,
            comment: String::new(),
            date: "2024-05-05".into(),
        }
    }

    #[tokio::test]
    async fn test_missing_record_maps_to_404() {
        let mut mock = MockClient::<Resource>::new();
        mock.expect_get(ResourceId(4)).return_ok(None);
        mock.expect_delete(ResourceId(4))
            .return_err(FrameworkError::NotFound("4".into()));

        let store = LocalStore::new(mock.client());
        let err = ResourceStore::get(&store, ResourceId(4)).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));
        let err = ResourceStore::delete(&store, ResourceId(4)).await.unwrap_err();
        assert!(matches!(err, StoreError::Status { status: 404, .. }));

        mock.verify();
    }

    #[tokio::test]
    async fn test_validation_failure_maps_to_422_with_message() {
        let (client, mut receiver) = create_mock_client::<Resource>(4);
        let store = LocalStore::new(client);

        let replace = tokio::spawn(async move {
            let resource = sample(2);
            store.replace(ResourceId(2), &resource).await
        });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, ResourceId(2));
        assert_eq!(update, sample(2));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ResourceError::Validation(ValidationError::MissingField("Author")),
            ))))
            .unwrap();

        let err = replace.await.unwrap().unwrap_err();
        assert_eq!(err.server_message(), Some("Author is required"));
        assert!(matches!(err, StoreError::Status { status: 422, .. }));
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_network_error() {
        let (client, receiver) = create_mock_client::<Resource>(1);
        drop(receiver);

        let store = LocalStore::new(client);
        let err = ResourceStore::list(&store).await.unwrap_err();
        assert!(matches!(err, StoreError::Network(_)));
    }

    #[tokio::test]
    async fn test_exhausted_ids_map_to_500() {
        let mut mock = MockClient::<Resource>::new();
        mock.expect_create().return_err(FrameworkError::IdsExhausted);

        let store = LocalStore::new(mock.client());
        let params = ResourceCreate {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            kind: "Book".into(),
            rating: 5,
            comment: String::new(),
            date: String::new(),
        };
        let err = store.create(params).await.unwrap_err();
        assert_eq!(
            err,
            StoreError::Status {
                status: 500,
                message: Some("No ids left to assign".into())
            }
        );
        mock.verify();
    }
}
