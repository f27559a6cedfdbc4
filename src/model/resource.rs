use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::model::validation::{validate_fields, ValidationError};

/// Store-assigned identifier of a [`Resource`].
///
/// Serialized as a bare JSON number and displayed the same way, so it can be dropped
/// straight into an API path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u64);

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        Self(u64::from(id))
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reading or viewing recommendation managed from the admin dashboard.
///
/// # Wire Format
/// ```json
/// { "id": 7, "title": "Dune", "author": "Frank Herbert", "type": "Book",
///   "rating": 5, "comment": "", "date": "2024-03-01" }
/// ```
///
/// `date` is carried as opaque text and never interpreted.
///
/// # Actor Framework
/// Implements [`ActorEntity`](crate::framework::ActorEntity) (see
/// [`resource_actor`](crate::resource_actor)) so an in-process store can keep it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: String,
}

impl Resource {
    /// Checks the fields a record needs before it may be submitted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, &self.author, self.rating)
    }

    /// Whether there is a comment worth showing.
    pub fn has_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }
}

/// Payload for creating a new resource. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCreate {
    pub title: String,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: String,
}

impl ResourceCreate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(&self.title, &self.author, self.rating)
    }

    /// Builds the full record once an id has been assigned.
    pub fn into_resource(self, id: ResourceId) -> Resource {
        Resource {
            id,
            title: self.title,
            author: self.author,
            kind: self.kind,
            rating: self.rating,
            comment: self.comment,
            date: self.date,
        }
    }
}
