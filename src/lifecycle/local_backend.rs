use tracing::{error, info};

use crate::model::ResourceCreate;
use crate::store::{LocalStore, StoreError};

/// An in-process resource store: a Resource actor running in its own task, reached
/// through [`LocalStore`].
///
/// # Example
///
/// ```ignore
/// let backend = LocalBackend::seeded(32, sample_resources()).await?;
/// let store: SharedStore = Arc::new(backend.store.clone());
/// // ... mount views on `store` ...
/// backend.shutdown().await?;
/// ```
pub struct LocalBackend {
    pub store: LocalStore,
    handle: tokio::task::JoinHandle<()>,
}

impl LocalBackend {
    /// Spawns an empty store.
    pub fn start(buffer_size: usize) -> Self {
        let (actor, client) = crate::resource_actor::new(buffer_size);
        let handle = tokio::spawn(actor.run(()));
        Self {
            store: LocalStore::new(client),
            handle,
        }
    }

    /// Spawns a store and creates `seed` in order, so the first record gets id 1.
    pub async fn seeded(
        buffer_size: usize,
        seed: impl IntoIterator<Item = ResourceCreate>,
    ) -> Result<Self, StoreError> {
        let backend = Self::start(buffer_size);
        let mut count = 0;
        for params in seed {
            backend.store.create(params).await?;
            count += 1;
        }
        info!(count, "Local store seeded");
        Ok(backend)
    }

    /// Stops the actor and waits for its task to end.
    ///
    /// Every clone of [`store`](Self::store) handed out (for example to a mounted view)
    /// must be dropped first, otherwise the actor keeps running and this never returns.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down local store...");
        drop(self.store);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(format!("Actor task failed: {:?}", e));
        }

        info!("Local store shutdown complete.");
        Ok(())
    }
}

/// A few records to browse in `--local` mode.
pub fn sample_resources() -> Vec<ResourceCreate> {
    let resource = |title: &str, author: &str, kind: &str, rating: i64, comment: &str, date: &str| {
        ResourceCreate {
            title: title.into(),
            author: author.into(),
            kind: kind.into(),
            rating,
            comment: comment.into(),
            date: date.into(),
        }
    };
    vec![
        resource(
            "The Rust Programming Language",
            "Steve Klabnik and Carol Nichols",
            "Book",
            5,
            "The place to start. Ownership finally clicks around chapter 4, and the chapters on \
             traits and lifetimes reward a second read.",
            "2024-01-15",
        ),
        resource(
            "Designing Data-Intensive Applications",
            "Martin Kleppmann",
            "Book",
            5,
            "",
            "2024-02-03",
        ),
        resource(
            "Fearless Concurrency",
            "Aaron Turon",
            "Article",
            4,
            "Short and sharp.",
            "2024-03-21",
        ),
        resource("Crust of Rust: Lifetimes", "Jon Gjengset", "Video", 4, "", "2024-04-09"),
    ]
}
