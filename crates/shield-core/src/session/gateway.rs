//! Session gateway trait.
//!
//! Defines the interface to the backend session store.

use super::model::{Session, SessionAction};
use crate::error::Result;
use async_trait::async_trait;

/// Access to the backend that owns incident sessions.
///
/// This trait decouples the sync core from the transport (HTTP in
/// production, in-memory in tests).
///
/// # Implementation Notes
///
/// - `fetch_sessions` must return the backend order unchanged (oldest first).
/// - Neither call retries; failures are reported and left to the caller.
/// - No timeout is added beyond what the transport itself applies.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Fetches every session known to the backend.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Session>)`: Snapshot in backend order
    /// - `Err(ShieldError::Transport)`: Network error, non-2xx, or undecodable body
    async fn fetch_sessions(&self) -> Result<Vec<Session>>;

    /// Submits an operator decision for a session.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Opaque id of the target session
    /// * `action` - Approve or reject
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Backend answered 2xx
    /// - `Err(ShieldError::ActionRejected)`: Backend answered non-2xx
    /// - `Err(ShieldError::Transport)`: Request could not be delivered
    async fn submit_action(&self, session_id: &str, action: SessionAction) -> Result<()>;
}
