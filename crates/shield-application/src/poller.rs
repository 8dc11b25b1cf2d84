//! Recurring snapshot poller.
//!
//! Fetches once on start and then every [`POLL_INTERVAL`]. Each tick is
//! spawned independently, so a slow or hung request never delays the next
//! one and responses are not coalesced.

use crate::sync_service::SessionSyncService;
use shield_core::sync::POLL_INTERVAL;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Builds the recurring poll for a [`SessionSyncService`].
pub struct Poller {
    service: SessionSyncService,
}

impl Poller {
    pub fn new(service: SessionSyncService) -> Self {
        Self { service }
    }

    /// Starts polling and returns the handle that owns the schedule.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(self) -> PollHandle {
        let token = CancellationToken::new();
        let service = self.service.clone();
        let loop_token = token.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_INTERVAL);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => break,
                    _ = ticker.tick() => {
                        let service = service.clone();
                        let tick_token = loop_token.child_token();
                        tokio::spawn(async move {
                            service.poll_until_cancelled(&tick_token).await;
                        });
                    }
                }
            }
            tracing::debug!("[Poller] Schedule loop exited");
        });

        tracing::info!("[Poller] Started, interval={}ms", POLL_INTERVAL.as_millis());
        PollHandle {
            token,
            task: Some(task),
            service: self.service,
        }
    }
}

/// Owned, cancellable handle on a running poll schedule.
///
/// Dropping the handle cancels the schedule; [`PollHandle::stop`] also waits
/// until no snapshot can be applied any more.
pub struct PollHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
    service: SessionSyncService,
}

impl PollHandle {
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Runs one extra tick outside the schedule.
    ///
    /// The tick is tied to this handle, so [`PollHandle::stop`] discards it
    /// like a scheduled one. Does nothing once the handle is stopped.
    pub fn refresh(&self) {
        if self.token.is_cancelled() {
            return;
        }
        let service = self.service.clone();
        let tick_token = self.token.child_token();
        tokio::spawn(async move {
            service.poll_until_cancelled(&tick_token).await;
        });
    }

    /// Cancels the schedule and in-flight ticks.
    ///
    /// When this returns, the held state will not receive any further
    /// snapshot from this poller.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::warn!("[Poller] Schedule task ended abnormally: {}", e);
        }
        // In-flight ticks check the token under the state lock.
        self.service.quiesce().await;
        tracing::info!("[Poller] Stopped");
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
