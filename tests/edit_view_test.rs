use std::sync::Arc;
use tokio::sync::Notify;

use resource_admin::model::{MemoryLabelStore, Resource, ResourceId, TypeOptions, ValidationError};
use resource_admin::store::{MockStore, StoreCall, StoreError};
use resource_admin::views::{
    EditPhase, EditView, EditViewHandle, Effect, FieldEdit, Route, SubmitOutcome, ViewError,
};

fn dune() -> Resource {
    Resource {
        id: ResourceId(7),
        title: "Dune".into(),
        author: "Frank Herbert".into(),
        kind: "Book".into(),
        rating: 5,
        comment: "Spice must flow".into(),
        date: "2024-03-01".into(),
    }
}

fn mount(store: &MockStore, id: ResourceId) -> EditViewHandle {
    let options = TypeOptions::new(Arc::new(MemoryLabelStore::new()));
    let (view, handle) = EditView::mount(Arc::new(store.clone()), id, options, 8);
    tokio::spawn(view.run());
    handle
}

async fn ready(store: &MockStore) -> EditViewHandle {
    store.expect_get(ResourceId(7)).return_ok(dune());
    let handle = mount(store, ResourceId(7));
    let snapshot = handle.mounted().await.unwrap();
    assert_eq!(snapshot.phase, EditPhase::Ready);
    handle
}

fn saved() -> SubmitOutcome {
    SubmitOutcome::Saved {
        effects: vec![Effect::NavigateTo(Route::Dashboard), Effect::RefreshPage],
    }
}

#[tokio::test]
async fn test_unchanged_draft_round_trips() {
    let store = MockStore::new();
    let handle = ready(&store).await;
    store.expect_replace(ResourceId(7)).return_ok(());

    assert_eq!(handle.submit().await.unwrap(), saved());
    assert_eq!(
        store.calls(),
        vec![
            StoreCall::Get(ResourceId(7)),
            StoreCall::Replace(ResourceId(7), dune())
        ]
    );
    store.verify();
}

#[tokio::test]
async fn test_view_closes_after_save() {
    let store = MockStore::new();
    let handle = ready(&store).await;
    store.expect_replace(ResourceId(7)).return_ok(());

    assert!(handle.is_mounted());
    handle.submit().await.unwrap();
    assert_eq!(handle.snapshot().await, Err(ViewError::Closed));
    assert!(!handle.is_mounted());
}

#[tokio::test]
async fn test_empty_title_rejected_before_any_request() {
    let store = MockStore::new();
    let handle = ready(&store).await;

    handle.edit(FieldEdit::Title(String::new())).await.unwrap();
    assert_eq!(
        handle.submit().await.unwrap(),
        SubmitOutcome::Invalid(ValidationError::MissingField("Title"))
    );
    assert_eq!(store.calls(), vec![StoreCall::Get(ResourceId(7))]);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, EditPhase::Ready);
    assert_eq!(snapshot.error.as_deref(), Some("Title is required"));
    store.verify();
}

#[tokio::test]
async fn test_store_message_is_shown_and_draft_kept() {
    let store = MockStore::new();
    let handle = ready(&store).await;
    store
        .expect_replace(ResourceId(7))
        .return_err(StoreError::Status {
            status: 409,
            message: Some("Title taken".into()),
        });

    handle
        .edit(FieldEdit::Title("Dune Messiah".into()))
        .await
        .unwrap();
    assert_eq!(
        handle.submit().await.unwrap(),
        SubmitOutcome::Failed {
            message: "Title taken".into()
        }
    );

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.phase, EditPhase::Ready);
    assert_eq!(snapshot.error.as_deref(), Some("Title taken"));
    let draft = snapshot.draft.unwrap();
    assert_eq!(draft.title, "Dune Messiah");
    assert_eq!(draft.author, "Frank Herbert");
    store.verify();
}

#[tokio::test]
async fn test_failure_without_message_uses_fallback() {
    let store = MockStore::new();
    let handle = ready(&store).await;
    store
        .expect_replace(ResourceId(7))
        .return_err(StoreError::Status {
            status: 500,
            message: None,
        });
    store
        .expect_replace(ResourceId(7))
        .return_err(StoreError::Network("connection reset".into()));

    for _ in 0..2 {
        assert_eq!(
            handle.submit().await.unwrap(),
            SubmitOutcome::Failed {
                message: "Failed to update resource".into()
            }
        );
    }
    store.verify();
}

#[tokio::test]
async fn test_retry_after_failure() {
    let store = MockStore::new();
    let handle = ready(&store).await;
    store
        .expect_replace(ResourceId(7))
        .return_err(StoreError::Network("timeout".into()));
    store.expect_replace(ResourceId(7)).return_ok(());

    assert!(matches!(
        handle.submit().await.unwrap(),
        SubmitOutcome::Failed { .. }
    ));
    assert_eq!(handle.submit().await.unwrap(), saved());
    assert_eq!(store.replace_count(), 2);
    store.verify();
}

#[tokio::test]
async fn test_second_submit_while_in_flight_is_dropped() {
    let store = MockStore::new();
    let handle = ready(&store).await;
    let gate = Arc::new(Notify::new());
    store
        .expect_replace(ResourceId(7))
        .held(gate.clone())
        .return_ok(());

    let first = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.submit().await })
    };
    store.wait_for_calls(2).await;

    assert_eq!(handle.submit().await.unwrap(), SubmitOutcome::Dropped);
    assert_eq!(
        handle.snapshot().await.unwrap().phase,
        EditPhase::Submitting
    );

    gate.notify_one();
    assert_eq!(first.await.unwrap().unwrap(), saved());
    assert_eq!(store.replace_count(), 1);
    store.verify();
}

#[tokio::test]
async fn test_load_failure_is_permanent() {
    let store = MockStore::new();
    store.expect_get(ResourceId(7)).return_err(StoreError::Status {
        status: 404,
        message: Some("Resource 7 not found".into()),
    });

    let handle = mount(&store, ResourceId(7));
    let snapshot = handle.mounted().await.unwrap();
    assert_eq!(snapshot.phase, EditPhase::LoadFailed);
    assert_eq!(snapshot.error.as_deref(), Some("Failed to load resource"));
    assert_eq!(snapshot.draft, None);

    assert_eq!(
        handle.cancel().await,
        Err(ViewError::NotReady(EditPhase::LoadFailed))
    );
    assert_eq!(
        handle.snapshot().await.unwrap().phase,
        EditPhase::LoadFailed
    );
    store.verify();
}

#[tokio::test]
async fn test_cancel_navigates_back_without_saving() {
    let store = MockStore::new();
    let handle = ready(&store).await;

    handle.edit(FieldEdit::Rating(2)).await.unwrap();
    assert_eq!(handle.cancel().await, Ok(Effect::Back));
    assert_eq!(store.replace_count(), 0);
    assert_eq!(handle.snapshot().await, Err(ViewError::Closed));
    store.verify();
}

#[tokio::test]
async fn test_late_load_after_unmount_is_discarded() {
    let store = MockStore::new();
    let gate = Arc::new(Notify::new());
    store
        .expect_get(ResourceId(7))
        .held(gate.clone())
        .return_ok(dune());

    let handle = mount(&store, ResourceId(7));
    store.wait_for_calls(1).await;
    handle.unmount().await.unwrap();
    gate.notify_one();

    assert_eq!(handle.mounted().await, Err(ViewError::Closed));
    store.verify();
}

#[tokio::test]
async fn test_late_submit_after_unmount_is_discarded() {
    let store = MockStore::new();
    let handle = ready(&store).await;
    let gate = Arc::new(Notify::new());
    store
        .expect_replace(ResourceId(7))
        .held(gate.clone())
        .return_ok(());

    let pending = {
        let handle = handle.clone();
        tokio::spawn(async move { handle.submit().await })
    };
    store.wait_for_calls(2).await;
    handle.unmount().await.unwrap();
    gate.notify_one();

    assert_eq!(pending.await.unwrap(), Err(ViewError::Closed));
    store.verify();
}
