//! # Resource Edit View
//!
//! Loads one record, keeps an editable copy of it (the draft) and submits the whole draft
//! back as a replace.
//!
//! ```text
//! Loading ──ok──▶ Ready ──submit──▶ Submitting ──ok──▶ (closed, navigate to dashboard)
//!    │              ▲                    │
//!    │              └──────failed────────┘
//!    └──failed──▶ LoadFailed
//! ```
//!
//! `LoadFailed` is final. A submit that arrives while another is in flight is dropped,
//! never queued. The view closes itself after a successful save or a cancel.

use std::ops::ControlFlow;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::model::{Resource, ResourceId, TypeOptions, ValidationError};
use crate::store::{SharedStore, StoreError};
use crate::views::effect::{Effect, Route};
use crate::views::{deliver, ViewError};

/// Shown when the record could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load resource";

/// Shown when a submit fails and the store gave no message of its own.
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update resource";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Loading,
    Ready,
    Submitting,
    LoadFailed,
}

/// Everything a host needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSnapshot {
    pub phase: EditPhase,
    /// `None` until the record has loaded.
    pub draft: Option<Resource>,
    /// Load error or last submit error.
    pub error: Option<String>,
    /// Choices for the `type` field.
    pub type_options: Vec<String>,
}

/// A change to one field of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Title(String),
    Author(String),
    Type(String),
    Rating(i64),
    Comment(String),
}

impl FieldEdit {
    fn apply(self, draft: &mut Resource) {
        match self {
            FieldEdit::Title(title) => draft.title = title,
            FieldEdit::Author(author) => draft.author = author,
            FieldEdit::Type(kind) => draft.kind = kind,
            FieldEdit::Rating(rating) => draft.rating = rating,
            FieldEdit::Comment(comment) => draft.comment = comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored. The view has closed.
    Saved { effects: Vec<Effect> },
    /// The draft failed the field checks. Nothing was sent.
    Invalid(ValidationError),
    /// The store refused. The view is `Ready` again with the draft untouched.
    Failed { message: String },
    /// Another submit was already in flight.
    Dropped,
}

enum EditMessage {
    Mounted {
        respond_to: oneshot::Sender<EditSnapshot>,
    },
    Snapshot {
        respond_to: oneshot::Sender<EditSnapshot>,
    },
    Edit {
        edit: FieldEdit,
        respond_to: oneshot::Sender<Result<(), ViewError>>,
    },
    Submit {
        respond_to: oneshot::Sender<Result<SubmitOutcome, ViewError>>,
    },
    Cancel {
        respond_to: oneshot::Sender<Result<Effect, ViewError>>,
    },
    Unmount {
        respond_to: oneshot::Sender<()>,
    },
    Loaded {
        result: Result<Resource, StoreError>,
    },
    Submitted {
        result: Result<(), StoreError>,
        respond_to: oneshot::Sender<Result<SubmitOutcome, ViewError>>,
    },
}

/// The edit view's state and event loop. Drive it with [`EditView::run`].
pub struct EditView {
    receiver: mpsc::Receiver<EditMessage>,
    results: mpsc::WeakSender<EditMessage>,
    store: SharedStore,
    id: ResourceId,
    phase: EditPhase,
    draft: Option<Resource>,
    error: Option<String>,
    type_options: TypeOptions,
    mount_waiters: Vec<oneshot::Sender<EditSnapshot>>,
}

impl EditView {
    pub fn mount(
        store: SharedStore,
        id: ResourceId,
        type_options: TypeOptions,
        buffer_size: usize,
    ) -> (Self, EditViewHandle) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let view = Self {
            receiver,
            results: sender.downgrade(),
            store,
            id,
            phase: EditPhase::Loading,
            draft: None,
            error: None,
            type_options,
            mount_waiters: Vec::new(),
        };
        (view, EditViewHandle { sender })
    }

    /// Requests the record, then handles messages until the view closes.
    pub async fn run(mut self) {
        let id = self.id;
        info!(%id, "Edit view mounted");

        let store = self.store.clone();
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = store.get(id).await;
            deliver(&results, EditMessage::Loaded { result }).await;
        });

        while let Some(msg) = self.receiver.recv().await {
            if self.handle(msg).is_break() {
                break;
            }
        }

        info!(%id, phase = ?self.phase, "Edit view closed");
    }

    fn snapshot(&self) -> EditSnapshot {
        EditSnapshot {
            phase: self.phase,
            draft: self.draft.clone(),
            error: self.error.clone(),
            type_options: self.type_options.options(),
        }
    }

    fn handle(&mut self, msg: EditMessage) -> ControlFlow<()> {
        match msg {
            EditMessage::Mounted { respond_to } => {
                if self.phase == EditPhase::Loading {
                    self.mount_waiters.push(respond_to);
                } else {
                    let _ = respond_to.send(self.snapshot());
                }
            }
            EditMessage::Snapshot { respond_to } => {
                let _ = respond_to.send(self.snapshot());
            }
            EditMessage::Edit { edit, respond_to } => {
                let _ = respond_to.send(self.edit(edit));
            }
            EditMessage::Submit { respond_to } => self.submit(respond_to),
            EditMessage::Cancel { respond_to } => {
                if self.phase != EditPhase::Ready {
                    let _ = respond_to.send(Err(ViewError::NotReady(self.phase)));
                    return ControlFlow::Continue(());
                }
                debug!(id = %self.id, "Edit cancelled");
                self.draft = None;
                let _ = respond_to.send(Ok(Effect::Back));
                return ControlFlow::Break(());
            }
            EditMessage::Unmount { respond_to } => {
                let _ = respond_to.send(());
                return ControlFlow::Break(());
            }
            EditMessage::Loaded { result } => self.settle_load(result),
            EditMessage::Submitted { result, respond_to } => {
                return self.settle_submit(result, respond_to);
            }
        }
        ControlFlow::Continue(())
    }

    fn settle_load(&mut self, result: Result<Resource, StoreError>) {
        match result {
            Ok(resource) => {
                debug!(id = %self.id, ?resource, "Resource loaded");
                self.draft = Some(resource);
                self.phase = EditPhase::Ready;
            }
            Err(e) => {
                warn!(id = %self.id, error = %e, "Failed to load resource");
                self.error = Some(LOAD_FAILED_MESSAGE.to_string());
                self.phase = EditPhase::LoadFailed;
            }
        }
        let snapshot = self.snapshot();
        for waiter in self.mount_waiters.drain(..) {
            let _ = waiter.send(snapshot.clone());
        }
    }

    fn edit(&mut self, edit: FieldEdit) -> Result<(), ViewError> {
        let Some(draft) = self.draft.as_mut() else {
            return Err(ViewError::NotReady(self.phase));
        };
        if let FieldEdit::Type(label) = &edit {
            if let Ok(true) = self.type_options.add(label) {
                debug!(label = %label, "New type label");
            }
        }
        edit.apply(draft);
        Ok(())
    }

    fn submit(&mut self, respond_to: oneshot::Sender<Result<SubmitOutcome, ViewError>>) {
        match self.phase {
            EditPhase::Ready => {}
            EditPhase::Submitting => {
                debug!(id = %self.id, "Submit already in flight, dropped");
                let _ = respond_to.send(Ok(SubmitOutcome::Dropped));
                return;
            }
            phase => {
                let _ = respond_to.send(Err(ViewError::NotReady(phase)));
                return;
            }
        }
        let Some(draft) = self.draft.clone() else {
            let _ = respond_to.send(Err(ViewError::NotReady(self.phase)));
            return;
        };

        self.error = None;
        if let Err(e) = draft.validate() {
            debug!(id = %self.id, error = %e, "Draft rejected");
            self.error = Some(e.to_string());
            let _ = respond_to.send(Ok(SubmitOutcome::Invalid(e)));
            return;
        }

        self.phase = EditPhase::Submitting;
        info!(id = %self.id, "Submitting resource");

        let id = self.id;
        let store = self.store.clone();
        let results = self.results.clone();
        tokio::spawn(async move {
            let result = store.replace(id, &draft).await;
            deliver(&results, EditMessage::Submitted { result, respond_to }).await;
        });
    }

    fn settle_submit(
        &mut self,
        result: Result<(), StoreError>,
        respond_to: oneshot::Sender<Result<SubmitOutcome, ViewError>>,
    ) -> ControlFlow<()> {
        match result {
            Ok(()) => {
                info!(id = %self.id, "Resource updated");
                self.draft = None;
                let _ = respond_to.send(Ok(SubmitOutcome::Saved {
                    effects: vec![Effect::NavigateTo(Route::Dashboard), Effect::RefreshPage],
                }));
                ControlFlow::Break(())
            }
            Err(e) => {
                let message = e
                    .server_message()
                    .unwrap_or(UPDATE_FAILED_MESSAGE)
                    .to_string();
                warn!(id = %self.id, error = %e, "Failed to update resource");
                self.error = Some(message.clone());
                self.phase = EditPhase::Ready;
                let _ = respond_to.send(Ok(SubmitOutcome::Failed { message }));
                ControlFlow::Continue(())
            }
        }
    }
}

/// Cloneable handle to a mounted [`EditView`].
#[derive(Clone)]
pub struct EditViewHandle {
    sender: mpsc::Sender<EditMessage>,
}

impl EditViewHandle {
    async fn request<R>(
        &self,
        make: impl FnOnce(oneshot::Sender<R>) -> EditMessage,
    ) -> Result<R, ViewError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| ViewError::Closed)?;
        response.await.map_err(|_| ViewError::Closed)
    }

    /// Waits until the record has loaded or failed to load.
    pub async fn mounted(&self) -> Result<EditSnapshot, ViewError> {
        self.request(|respond_to| EditMessage::Mounted { respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<EditSnapshot, ViewError> {
        self.request(|respond_to| EditMessage::Snapshot { respond_to })
            .await
    }

    /// Applies `edit` to the draft.
    pub async fn edit(&self, edit: FieldEdit) -> Result<(), ViewError> {
        self.request(|respond_to| EditMessage::Edit { edit, respond_to })
            .await?
    }

    /// Validates the draft and sends it to the store. Resolves once the store has
    /// answered, or at once if the submit was rejected or dropped.
    pub async fn submit(&self) -> Result<SubmitOutcome, ViewError> {
        self.request(|respond_to| EditMessage::Submit { respond_to })
            .await?
    }

    /// Discards the draft and closes the view. Only allowed in `Ready`.
    pub async fn cancel(&self) -> Result<Effect, ViewError> {
        self.request(|respond_to| EditMessage::Cancel { respond_to })
            .await?
    }

    pub async fn unmount(&self) -> Result<(), ViewError> {
        self.request(|respond_to| EditMessage::Unmount { respond_to })
            .await
    }

    pub fn is_mounted(&self) -> bool {
        !self.sender.is_closed()
    }
}
