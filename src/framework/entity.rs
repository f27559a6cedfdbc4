//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract a record type implements to be kept by the
//! generic [`ResourceActor`](crate::framework::ResourceActor). It names the id, the
//! creation and replacement payloads, the injected context and the error type, and
//! provides lifecycle hooks (`on_create`, `on_update`, `on_delete`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`. Only `on_update` must be implemented.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record must implement to be managed by a `ResourceActor`.
///
/// # Async & Context
/// The hooks are `#[async_trait]` so they may await other clients. The `Context` type is
/// injected into every hook when the actor loop starts (`run(context)`), not when the
/// actor is constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier. Converted from the actor's `u32` counter.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context injected into the actor. Use `()` if nothing is needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per entity rather than one per message: clients match on a single
    /// error type for every operation of the actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the assigned id and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after the entity is constructed, before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received for this entity.
    ///
    /// On error the stored entity must be left as it was.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
