//! Plain data types: the [`Resource`] record, its field rules and the `type` labels.

pub mod resource;
pub mod resource_type;
pub mod validation;

pub use resource::*;
pub use resource_type::*;
pub use validation::*;
