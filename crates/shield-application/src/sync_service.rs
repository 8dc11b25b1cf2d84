//! Session synchronization service.
//!
//! Owns the console state for one operator view and serializes the two
//! transitions that mutate it: poll reconciliation and the optimistic
//! overlay after a successful action. Network calls never run while the
//! state lock is held, so each transition is applied as a single step.

use shield_core::session::{SessionAction, SessionGateway, SessionStatus};
use shield_core::sync::{ConsoleState, OverlayReport, ReconcileReport, Selection};
use shield_core::{Result, ShieldError};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

/// Observable outcome of sync activity, for renderers and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A snapshot was reconciled into the held state.
    Reconciled(ReconcileReport),
    /// A poll tick failed; held state is unchanged.
    PollFailed { message: String },
    /// The backend accepted an action and the overlay was applied.
    ActionApplied {
        session_id: String,
        status: SessionStatus,
    },
    /// The backend refused an action, or it could not be delivered.
    ActionFailed {
        session_id: String,
        action: SessionAction,
        message: String,
    },
}

/// Result of one poll tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Applied(ReconcileReport),
    Failed(ShieldError),
    /// The tick was cancelled before its snapshot could be applied.
    Cancelled,
}

/// Holds console state and reconciles it with the backend.
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct SessionSyncService {
    gateway: Arc<dyn SessionGateway>,
    state: Arc<Mutex<ConsoleState>>,
    events: Option<mpsc::UnboundedSender<SyncEvent>>,
}

impl SessionSyncService {
    pub fn new(gateway: Arc<dyn SessionGateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(ConsoleState::new())),
            events: None,
        }
    }

    /// Publishes [`SyncEvent`]s to `sender`.
    pub fn with_events(mut self, sender: mpsc::UnboundedSender<SyncEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Copy of the current held state.
    pub async fn state(&self) -> ConsoleState {
        self.state.lock().await.clone()
    }

    /// Runs one poll tick outside of any schedule.
    pub async fn poll_once(&self) -> PollOutcome {
        self.poll_until_cancelled(&CancellationToken::new()).await
    }

    /// Runs one poll tick that is abandoned once `token` is cancelled.
    ///
    /// Cancellation is checked again under the state lock, so nothing is
    /// applied after the token fires.
    pub async fn poll_until_cancelled(&self, token: &CancellationToken) -> PollOutcome {
        let fetched = tokio::select! {
            _ = token.cancelled() => return PollOutcome::Cancelled,
            result = self.gateway.fetch_sessions() => result,
        };

        let mut state = self.state.lock().await;
        if token.is_cancelled() {
            tracing::debug!("[SessionSync] Dropping snapshot from cancelled tick");
            return PollOutcome::Cancelled;
        }

        match fetched {
            Ok(snapshot) => {
                let report = state.apply_snapshot(&snapshot);
                drop(state);

                tracing::debug!(
                    "[SessionSync] Reconciled {} sessions: visible={:?}, selection={:?} ({})",
                    snapshot.len(),
                    report.visible_ids,
                    report.selection_id,
                    report.transition.as_str()
                );
                self.emit(SyncEvent::Reconciled(report.clone()));
                PollOutcome::Applied(report)
            }
            Err(e) => {
                state.mark_synced();
                drop(state);

                tracing::warn!("[SessionSync] Poll failed, keeping previous state: {}", e);
                self.emit(SyncEvent::PollFailed {
                    message: e.to_string(),
                });
                PollOutcome::Failed(e)
            }
        }
    }

    /// Submits `action` for `session_id` and overlays the result on success.
    ///
    /// The request goes out even if the held copy already looks resolved;
    /// the backend decides whether a repeated transition is accepted.
    ///
    /// # Errors
    ///
    /// - `ShieldError::InvalidInput` for an empty id (nothing is sent)
    /// - Whatever the gateway returns; held state is left untouched
    pub async fn apply_action(&self, session_id: &str, action: SessionAction) -> Result<OverlayReport> {
        if session_id.is_empty() {
            return Err(ShieldError::invalid_input("session id must not be empty"));
        }

        match self.gateway.submit_action(session_id, action).await {
            Ok(()) => {
                let report = self
                    .state
                    .lock()
                    .await
                    .apply_action_result(session_id, action);

                tracing::info!(
                    "[SessionSync] {} accepted for session {} (visible={}, selected={})",
                    action,
                    session_id,
                    report.in_visible,
                    report.in_selection
                );
                self.emit(SyncEvent::ActionApplied {
                    session_id: session_id.to_string(),
                    status: action.resulting_status(),
                });
                Ok(report)
            }
            Err(e) => {
                tracing::error!("[SessionSync] Failed to {} session {}: {}", action, session_id, e);
                self.emit(SyncEvent::ActionFailed {
                    session_id: session_id.to_string(),
                    action,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Explicit operator selection of a visible session.
    pub async fn select(&self, session_id: &str) -> Result<Selection> {
        let mut state = self.state.lock().await;
        let selection = state.select(session_id)?.clone();
        tracing::debug!("[SessionSync] Operator selected {}", session_id);
        Ok(selection)
    }

    /// Waits until no transition is in progress.
    pub(crate) async fn quiesce(&self) {
        drop(self.state.lock().await);
    }

    fn emit(&self, event: SyncEvent) {
        if let Some(sender) = &self.events {
            // Receiver gone means nobody is rendering; that is fine.
            let _ = sender.send(event);
        }
    }
}
