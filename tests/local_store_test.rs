//! The in-process store end to end: real Resource actor, real `LocalStore`.

use resource_admin::lifecycle::{sample_resources, LocalBackend};
use resource_admin::model::{ResourceCreate, ResourceId};
use resource_admin::store::{ResourceStore, StoreError};

fn podcast() -> ResourceCreate {
    ResourceCreate {
        title: "Rustacean Station".into(),
        author: "Community".into(),
        kind: "Podcast".into(),
        rating: 4,
        comment: String::new(),
        date: "2024-08-12".into(),
    }
}

#[tokio::test]
async fn test_full_local_store_lifecycle() {
    let backend = LocalBackend::seeded(8, sample_resources())
        .await
        .expect("Failed to seed store");
    let store = &backend.store;

    // Replace every field of record 3
    let mut record = store.get(ResourceId(3)).await.expect("Record 3 not found");
    record.rating = 2;
    record.comment = "Dated now".into();
    store
        .replace(ResourceId(3), &record)
        .await
        .expect("Failed to replace");
    assert_eq!(store.get(ResourceId(3)).await.unwrap(), record);

    // Delete, then make sure the id is gone and never handed out again
    store.delete(ResourceId(4)).await.expect("Failed to delete");
    assert!(matches!(
        store.get(ResourceId(4)).await,
        Err(StoreError::Status { status: 404, .. })
    ));
    let id = store.create(podcast()).await.expect("Failed to create");
    assert_eq!(id, ResourceId(5));

    let ids: Vec<ResourceId> = store.list().await.unwrap().iter().map(|r| r.id).collect();
    assert_eq!(
        ids,
        vec![ResourceId(1), ResourceId(2), ResourceId(3), ResourceId(5)]
    );

    backend.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_store_refuses_invalid_replacements() {
    let backend = LocalBackend::seeded(8, sample_resources()).await.unwrap();
    let store = &backend.store;
    let original = store.get(ResourceId(1)).await.unwrap();

    let mut blank = original.clone();
    blank.title = "   ".into();
    assert_eq!(
        store.replace(ResourceId(1), &blank).await,
        Err(StoreError::Status {
            status: 422,
            message: Some("Title is required".into())
        })
    );

    let mut moved = original.clone();
    moved.id = ResourceId(2);
    assert!(matches!(
        store.replace(ResourceId(1), &moved).await,
        Err(StoreError::Status { status: 400, .. })
    ));

    assert!(matches!(
        store.replace(ResourceId(40), &original).await,
        Err(StoreError::Status { status: 404, .. })
    ));

    assert_eq!(store.get(ResourceId(1)).await.unwrap(), original);
    backend.shutdown().await.unwrap();
}
