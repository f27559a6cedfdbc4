//! [`ActorEntity`] implementation that lets a [`ResourceActor`](crate::framework::ResourceActor)
//! keep [`Resource`] records.
//!
//! The store re-checks the field rules on create and on replace, so a record that skipped
//! the input layer is still refused.

use crate::framework::ActorEntity;
use crate::model::{Resource, ResourceCreate, ResourceId};
use crate::resource_actor::ResourceError;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Resource {
    type Id = ResourceId;
    type Create = ResourceCreate;
    type Update = Resource;
    type Context = ();
    type Error = ResourceError;

    fn from_create_params(id: ResourceId, params: ResourceCreate) -> Result<Self, ResourceError> {
        params.validate()?;
        Ok(params.into_resource(id))
    }

    /// Replaces every field. The replacement must carry the stored id.
    async fn on_update(&mut self, replacement: Resource, _ctx: &()) -> Result<(), ResourceError> {
        if replacement.id != self.id {
            return Err(ResourceError::IdMismatch {
                path: self.id,
                body: replacement.id,
            });
        }
        replacement.validate()?;
        *self = replacement;
        Ok(())
    }
}
