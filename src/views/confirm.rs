//! User affirmation for destructive actions.

use async_trait::async_trait;

use crate::model::ResourceId;

/// Prompt shown before a resource is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this resource?";

/// What the user is asked to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteIntent {
    pub id: ResourceId,
    /// Title of the record as currently displayed, if the list holds it.
    pub title: Option<String>,
}

impl DeleteIntent {
    pub fn prompt(&self) -> &'static str {
        DELETE_PROMPT
    }
}

/// Asks the user whether a delete may go ahead.
///
/// Any `Fn(&DeleteIntent) -> bool` is a `Confirm`, so tests can pass a closure.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, intent: &DeleteIntent) -> bool;
}

#[async_trait]
impl<F> Confirm for F
where
    F: Fn(&DeleteIntent) -> bool + Send + Sync,
{
    async fn confirm(&self, intent: &DeleteIntent) -> bool {
        (self)(intent)
    }
}
