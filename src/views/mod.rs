//! # Views
//!
//! The list and edit views of the admin dashboard, as view models.
//!
//! Each mounted view is a small actor: it runs in its own Tokio task, owns its state and
//! handles one intent at a time. Hosts talk to it through a cloneable handle
//! ([`ListViewHandle`], [`EditViewHandle`]).
//!
//! Store requests run in spawned tasks and report back to the view through a weak sender
//! on the view's own channel. Once a view is unmounted that channel is gone, so a late
//! result has nowhere to land and is dropped.
//!
//! Navigation is never performed directly. Operations return [`Effect`]s for the host.

pub mod confirm;
pub mod edit;
pub mod effect;
pub mod list;
pub mod render;

pub use confirm::{Confirm, DeleteIntent, DELETE_PROMPT};
pub use edit::{EditPhase, EditSnapshot, EditView, EditViewHandle, FieldEdit, SubmitOutcome};
pub use effect::{Effect, Route};
pub use list::{DeleteOutcome, ListView, ListViewHandle, LoadOutcome};
pub use render::ResourceRow;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Failures talking to a view rather than to the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    /// The view has been unmounted.
    #[error("View is no longer mounted")]
    Closed,

    /// The operation needs a loaded draft.
    #[error("View is not ready (phase: {0:?})")]
    NotReady(EditPhase),
}

/// Hands a store result back to the view that asked for it, unless that view is gone.
pub(crate) async fn deliver<M>(view: &mpsc::WeakSender<M>, message: M) {
    let Some(sender) = view.upgrade() else {
        debug!("View unmounted, result discarded");
        return;
    };
    if sender.send(message).await.is_err() {
        debug!("View unmounted, result discarded");
    }
}
