use async_trait::async_trait;
use shield_core::session::{Session, SessionAction, SessionGateway, SessionStatus};
use shield_core::{Result, ShieldError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

pub(crate) fn session(id: &str, status: SessionStatus) -> Session {
    Session::new(id, status)
}

pub(crate) fn pending(id: &str) -> Session {
    session(id, SessionStatus::Pending)
}

/// In-memory gateway: every fetch returns the configured result.
///
/// A gated mock makes each fetch wait for one permit on the returned
/// semaphore before answering.
pub(crate) struct MockSessionGateway {
    fetch_result: Mutex<Result<Vec<Session>>>,
    action_result: Mutex<Result<()>>,
    fetch_gate: Option<Arc<Semaphore>>,
    fetch_calls: AtomicUsize,
    actions: Mutex<Vec<(String, SessionAction)>>,
}

impl MockSessionGateway {
    pub(crate) fn returning(snapshot: Vec<Session>) -> Self {
        Self {
            fetch_result: Mutex::new(Ok(snapshot)),
            action_result: Mutex::new(Ok(())),
            fetch_gate: None,
            fetch_calls: AtomicUsize::new(0),
            actions: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(error: ShieldError) -> Self {
        let gateway = Self::returning(Vec::new());
        gateway.set_fetch_result(Err(error));
        gateway
    }

    pub(crate) fn gated(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.fetch_gate = Some(gate.clone());
        (self, gate)
    }

    pub(crate) fn set_fetch_result(&self, result: Result<Vec<Session>>) {
        *self.fetch_result.lock().unwrap() = result;
    }

    pub(crate) fn set_action_result(&self, result: Result<()>) {
        *self.action_result.lock().unwrap() = result;
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn recorded_actions(&self) -> Vec<(String, SessionAction)> {
        self.actions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionGateway for MockSessionGateway {
    async fn fetch_sessions(&self) -> Result<Vec<Session>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.fetch_gate {
            gate.acquire()
                .await
                .map_err(|e| ShieldError::transport(e.to_string()))?
                .forget();
        }
        self.fetch_result.lock().unwrap().clone()
    }

    async fn submit_action(&self, session_id: &str, action: SessionAction) -> Result<()> {
        self.actions
            .lock()
            .unwrap()
            .push((session_id.to_string(), action));
        self.action_result.lock().unwrap().clone()
    }
}
