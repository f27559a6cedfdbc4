//! # Resource List View
//!
//! Holds the full collection as last returned by the store and offers edit and delete
//! actions per item.
//!
//! Loads are stamped with a generation number. A result is applied only when it is
//! newer than the last one applied, so an older response that arrives late cannot
//! overwrite a fresher list. Failed loads keep the previous list and are only logged.
//!
//! ```ignore
//! let (view, handle) = ListView::mount(store, confirm, 32);
//! tokio::spawn(view.run());
//!
//! handle.mounted().await?;
//! for row in handle.rows().await? {
//!     println!("{row}");
//! }
//! ```

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info};

use crate::model::{Resource, ResourceId};
use crate::store::{SharedStore, StoreError};
use crate::views::confirm::{Confirm, DeleteIntent};
use crate::views::effect::{Effect, Route};
use crate::views::render::ResourceRow;
use crate::views::{deliver, ViewError};

/// What became of a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The list now holds exactly the `count` records the store returned.
    Applied { count: usize },
    /// A newer load had already been applied; this result was discarded.
    Superseded,
    /// The store failed. The previous list is kept.
    Failed(StoreError),
}

/// What became of a delete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user did not confirm. Nothing was sent.
    Declined,
    /// The store deleted the record and the follow-up reload has settled.
    Deleted { effects: Vec<Effect> },
    /// The store refused or could not be reached. The list is left as it was.
    Failed(StoreError),
}

enum ListMessage {
    Mounted {
        respond_to: oneshot::Sender<LoadOutcome>,
    },
    Load {
        respond_to: oneshot::Sender<LoadOutcome>,
    },
    Resources {
        respond_to: oneshot::Sender<Vec<Resource>>,
    },
    RequestDelete {
        id: ResourceId,
        respond_to: oneshot::Sender<DeleteOutcome>,
    },
    Unmount {
        respond_to: oneshot::Sender<()>,
    },
    Loaded {
        generation: u64,
        result: Result<Vec<Resource>, StoreError>,
    },
    Deleted {
        id: ResourceId,
        result: Result<(), StoreError>,
        respond_to: oneshot::Sender<DeleteOutcome>,
    },
}

/// Who is waiting for a given load to settle.
enum LoadWaiter {
    Mount,
    Load(oneshot::Sender<LoadOutcome>),
    Delete(oneshot::Sender<DeleteOutcome>),
}

/// The list view's state and event loop. Drive it with [`ListView::run`].
pub struct ListView {
    receiver: mpsc::Receiver<ListMessage>,
    results: mpsc::WeakSender<ListMessage>,
    store: SharedStore,
    confirm: Arc<dyn Confirm>,
    resources: Vec<Resource>,
    issued: u64,
    applied: u64,
    waiting: HashMap<u64, LoadWaiter>,
    initial: Option<LoadOutcome>,
    mount_waiters: Vec<oneshot::Sender<LoadOutcome>>,
}

impl ListView {
    /// Creates the view and its handle. Nothing is requested until [`run`](Self::run)
    /// starts.
    pub fn mount(
        store: SharedStore,
        confirm: Arc<dyn Confirm>,
        buffer_size: usize,
    ) -> (Self, ListViewHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let view = Self {
            receiver,
            results: sender.downgrade(),
            store,
            confirm,
            resources: Vec::new(),
            issued: 0,
            applied: 0,
            waiting: HashMap::new(),
            initial: None,
            mount_waiters: Vec::new(),
        };
        (view, ListViewHandle { sender })
    }

    /// Issues the initial load, then handles messages until unmounted or every handle
    /// has been dropped.
    pub async fn run(mut self) {
        info!("List view mounted");
        self.issue_load(LoadWaiter::Mount);

        while let Some(msg) = self.receiver.recv().await {
            if self.handle(msg).await.is_break() {
                break;
            }
        }

        info!(
            size = self.resources.len(),
            pending = self.waiting.len(),
            "List view unmounted"
        );
    }

    async fn handle(&mut self, msg: ListMessage) -> ControlFlow<()> {
        match msg {
            ListMessage::Mounted { respond_to } => match &self.initial {
                Some(outcome) => {
                    let _ = respond_to.send(outcome.clone());
                }
                None => self.mount_waiters.push(respond_to),
            },
            ListMessage::Load { respond_to } => self.issue_load(LoadWaiter::Load(respond_to)),
            ListMessage::Resources { respond_to } => {
                let _ = respond_to.send(self.resources.clone());
            }
            ListMessage::RequestDelete { id, respond_to } => {
                self.request_delete(id, respond_to).await;
            }
            ListMessage::Unmount { respond_to } => {
                let _ = respond_to.send(());
                return ControlFlow::Break(());
            }
            ListMessage::Loaded { generation, result } => self.settle_load(generation, result),
            ListMessage::Deleted {
                id,
                result,
                respond_to,
            } => match result {
                Ok(()) => {
                    info!(%id, "Resource deleted");
                    self.issue_load(LoadWaiter::Delete(respond_to));
                }
                Err(e) => {
                    error!(%id, error = %e, "Error deleting resource");
                    let _ = respond_to.send(DeleteOutcome::Failed(e));
                }
            },
        }
        ControlFlow::Continue(())
    }

    fn issue_load(&mut self, waiter: LoadWaiter) {
        self.issued += 1;
        let generation = self.issued;
        self.waiting.insert(generation, waiter);
        debug!(generation, "Loading resources");

        let store = self.store.clone();
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = store.list().await;
            deliver(&results, ListMessage::Loaded { generation, result }).await;
        });
    }

    fn settle_load(&mut self, generation: u64, result: Result<Vec<Resource>, StoreError>) {
        let outcome = match result {
            Ok(resources) if generation > self.applied => {
                self.applied = generation;
                self.resources = resources;
                info!(generation, size = self.resources.len(), "Resources loaded");
                LoadOutcome::Applied {
                    count: self.resources.len(),
                }
            }
            Ok(_) => {
                debug!(generation, applied = self.applied, "Stale list discarded");
                LoadOutcome::Superseded
            }
            Err(e) => {
                error!(generation, error = %e, "Error fetching resources");
                LoadOutcome::Failed(e)
            }
        };

        match self.waiting.remove(&generation) {
            Some(LoadWaiter::Mount) => {
                for waiter in self.mount_waiters.drain(..) {
                    let _ = waiter.send(outcome.clone());
                }
                self.initial = Some(outcome);
            }
            Some(LoadWaiter::Load(respond_to)) => {
                let _ = respond_to.send(outcome);
            }
            Some(LoadWaiter::Delete(respond_to)) => {
                let _ = respond_to.send(DeleteOutcome::Deleted {
                    effects: vec![Effect::RefreshPage],
                });
            }
            None => {}
        }
    }

    async fn request_delete(&mut self, id: ResourceId, respond_to: oneshot::Sender<DeleteOutcome>) {
        let intent = DeleteIntent {
            id,
            title: self
                .resources
                .iter()
                .find(|r| r.id == id)
                .map(|r| r.title.clone()),
        };
        if !self.confirm.confirm(&intent).await {
            debug!(%id, "Delete declined");
            let _ = respond_to.send(DeleteOutcome::Declined);
            return;
        }

        info!(%id, "Deleting resource");
        let store = self.store.clone();
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = store.delete(id).await;
            deliver(
                &results,
                ListMessage::Deleted {
                    id,
                    result,
                    respond_to,
                },
            )
            .await;
        });
    }
}

/// Cloneable handle to a mounted [`ListView`].
#[derive(Clone)]
pub struct ListViewHandle {
    sender: mpsc::Sender<ListMessage>,
}

impl ListViewHandle {
    async fn request<R>(
        &self,
        make: impl FnOnce(oneshot::Sender<R>) -> ListMessage,
    ) -> Result<R, ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| ViewError::Closed)?;
        response.await.map_err(|_| ViewError::Closed)
    }

    /// Waits for the load issued on mount to settle.
    pub async fn mounted(&self) -> Result<LoadOutcome, ViewError> {
        self.request(|respond_to| ListMessage::Mounted { respond_to })
            .await
    }

    /// Refetches the whole collection.
    pub async fn load(&self) -> Result<LoadOutcome, ViewError> {
        self.request(|respond_to| ListMessage::Load { respond_to })
            .await
    }

    /// The records currently held, in store order.
    pub async fn resources(&self) -> Result<Vec<Resource>, ViewError> {
        self.request(|respond_to| ListMessage::Resources { respond_to })
            .await
    }

    pub async fn rows(&self) -> Result<Vec<ResourceRow>, ViewError> {
        let resources = self.resources().await?;
        Ok(resources.iter().map(ResourceRow::from).collect())
    }

    /// Asks for confirmation and deletes `id`. On success the answer arrives once the
    /// follow-up reload has settled.
    pub async fn request_delete(&self, id: ResourceId) -> Result<DeleteOutcome, ViewError> {
        self.request(|respond_to| ListMessage::RequestDelete { id, respond_to })
            .await
    }

    /// Navigation to the edit page for `id`. No request is made.
    pub fn request_edit(&self, id: ResourceId) -> Effect {
        Effect::NavigateTo(Route::EditResource(id))
    }

    pub async fn unmount(&self) -> Result<(), ViewError> {
        self.request(|respond_to| ListMessage::Unmount { respond_to })
            .await
    }

    pub fn is_mounted(&self) -> bool {
        !self.sender.is_closed()
    }
}
