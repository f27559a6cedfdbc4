//! # Mock Store
//!
//! A [`ResourceStore`] that answers from a queue of expectations and records every call,
//! so view tests can count requests and inject failures.
//!
//! ```ignore
//! let store = MockStore::new();
//! store.expect_get(ResourceId(7)).return_ok(resource.clone());
//! store.expect_replace(ResourceId(7)).return_err(StoreError::Status {
//!     status: 409,
//!     message: Some("Title taken".into()),
//! });
//! // ... drive a view ...
//! assert_eq!(store.calls(), vec![StoreCall::Get(ResourceId(7)), StoreCall::Replace(ResourceId(7), resource)]);
//! store.verify();
//! ```
//!
//! A call that does not match the next expectation is answered with
//! `StoreError::Network` and makes [`MockStore::verify`] panic.
//!
//! An expectation can be [`held`](ReplyBuilder::held) on a [`Notify`]: the call is
//! recorded at once but only answered after `notify_one()`. This keeps a request in
//! flight for as long as a test needs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::model::{Resource, ResourceId};
use crate::store::{ResourceStore, StoreError};

/// A request the mock received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    List,
    Get(ResourceId),
    Replace(ResourceId, Resource),
    Delete(ResourceId),
}

enum Reply {
    List(Result<Vec<Resource>, StoreError>),
    Get(ResourceId, Result<Resource, StoreError>),
    Replace(ResourceId, Result<(), StoreError>),
    Delete(ResourceId, Result<(), StoreError>),
}

struct Expectation {
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

#[derive(Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    calls: Vec<StoreCall>,
    unexpected: Vec<StoreCall>,
}

/// Scripted [`ResourceStore`]. Clones share the same script and call log.
#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
    call_made: Arc<Notify>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_list(&self) -> ReplyBuilder<Vec<Resource>> {
        ReplyBuilder::new(self.state.clone(), Reply::List)
    }

    pub fn expect_get(&self, id: ResourceId) -> ReplyBuilder<Resource> {
        ReplyBuilder::new(self.state.clone(), move |r| Reply::Get(id, r))
    }

    pub fn expect_replace(&self, id: ResourceId) -> ReplyBuilder<()> {
        ReplyBuilder::new(self.state.clone(), move |r| Reply::Replace(id, r))
    }

    pub fn expect_delete(&self, id: ResourceId) -> ReplyBuilder<()> {
        ReplyBuilder::new(self.state.clone(), move |r| Reply::Delete(id, r))
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    /// Number of `replace` calls received so far.
    pub fn replace_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, StoreCall::Replace(..)))
            .count()
    }

    /// Waits until at least `count` calls have been received.
    pub async fn wait_for_calls(&self, count: usize) {
        loop {
            let notified = self.call_made.notified();
            if self.call_count() >= count {
                return;
            }
            notified.await;
        }
    }

    /// Panics if an expectation is left over or an unexpected call arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected store calls: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    /// Records `call`, pops the next expectation and waits on its gate if it has one.
    async fn answer(&self, call: StoreCall) -> Option<Reply> {
        let expectation = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call.clone());
            let matches = match (state.expectations.front(), &call) {
                (Some(Expectation { reply: Reply::List(_), .. }), StoreCall::List) => true,
                (Some(Expectation { reply: Reply::Get(id, _), .. }), StoreCall::Get(got)) => id == got,
                (Some(Expectation { reply: Reply::Replace(id, _), .. }), StoreCall::Replace(got, _)) => {
                    id == got
                }
                (Some(Expectation { reply: Reply::Delete(id, _), .. }), StoreCall::Delete(got)) => {
                    id == got
                }
                _ => false,
            };
            if matches {
                state.expectations.pop_front()
            } else {
                state.unexpected.push(call);
                None
            }
        };
        self.call_made.notify_waiters();

        let expectation = expectation?;
        if let Some(gate) = expectation.gate {
            gate.notified().await;
        }
        Some(expectation.reply)
    }
}

fn unexpected<T>() -> Result<T, StoreError> {
    Err(StoreError::Network("unexpected call to mock store".into()))
}

#[async_trait]
impl ResourceStore for MockStore {
    async fn list(&self) -> Result<Vec<Resource>, StoreError> {
        match self.answer(StoreCall::List).await {
            Some(Reply::List(result)) => result,
            _ => unexpected(),
        }
    }

    async fn get(&self, id: ResourceId) -> Result<Resource, StoreError> {
        match self.answer(StoreCall::Get(id)).await {
            Some(Reply::Get(_, result)) => result,
            _ => unexpected(),
        }
    }

    async fn replace(&self, id: ResourceId, resource: &Resource) -> Result<(), StoreError> {
        match self.answer(StoreCall::Replace(id, resource.clone())).await {
            Some(Reply::Replace(_, result)) => result,
            _ => unexpected(),
        }
    }

    async fn delete(&self, id: ResourceId) -> Result<(), StoreError> {
        match self.answer(StoreCall::Delete(id)).await {
            Some(Reply::Delete(_, result)) => result,
            _ => unexpected(),
        }
    }
}

type BuildReply<R> = Box<dyn FnOnce(Result<R, StoreError>) -> Reply + Send>;

/// Finishes an expectation with the answer it should produce.
pub struct ReplyBuilder<R> {
    state: Arc<Mutex<MockState>>,
    build: BuildReply<R>,
    gate: Option<Arc<Notify>>,
}

impl<R> ReplyBuilder<R> {
    fn new(
        state: Arc<Mutex<MockState>>,
        build: impl FnOnce(Result<R, StoreError>) -> Reply + Send + 'static,
    ) -> Self {
        Self {
            state,
            build: Box::new(build),
            gate: None,
        }
    }

    /// Holds the answer until `gate.notify_one()` is called.
    pub fn held(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, result: Result<R, StoreError>) {
        let expectation = Expectation {
            reply: (self.build)(result),
            gate: self.gate,
        };
        self.state.lock().unwrap().expectations.push_back(expectation);
    }
}
