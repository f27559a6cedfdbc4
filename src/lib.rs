//! # Resource Admin
//!
//! The data side of an admin dashboard for resource recommendations (books, articles,
//! videos, courses): a record type, a store abstraction over the REST API, and the list
//! and edit views as testable view models.
//!
//! ## Layers
//!
//! ### 1. Records ([`model`])
//! [`Resource`](model::Resource), its field rules and the open set of `type` labels.
//!
//! ### 2. Stores ([`store`])
//! The [`ResourceStore`](store::ResourceStore) trait is the only way views reach data.
//! [`HttpStore`](store::HttpStore) talks to `/api/resources`. [`LocalStore`](store::LocalStore)
//! keeps records in-process in a [`ResourceActor`](framework::ResourceActor) from the
//! generic [`framework`].
//!
//! ### 3. Views ([`views`])
//! [`ListView`](views::ListView) and [`EditView`](views::EditView) each run as their own
//! task and own their state. They return navigation as [`Effect`](views::Effect) values
//! and drop store results that arrive after they were unmounted.
//!
//! ### 4. Wiring ([`lifecycle`], [`config`])
//! Logging setup, the local backend, and environment configuration.
//!
//! ## Example
//!
//! ```ignore
//! let store: SharedStore = Arc::new(HttpStore::new("http://localhost:3000"));
//! let confirm: Arc<dyn Confirm> = Arc::new(|_: &DeleteIntent| true);
//!
//! let (view, list) = ListView::mount(store, confirm, 32);
//! tokio::spawn(view.run());
//! list.mounted().await?;
//! for row in list.rows().await? {
//!     println!("{row}");
//! }
//! ```

pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod resource_actor;
pub mod store;
pub mod views;
