//! Application layer for the Crowd Shield console.
//!
//! Wires the pure sync core to a backend gateway: `SessionSyncService` owns
//! the held console state, and `Poller` drives it on the fixed schedule.

pub mod poller;
pub mod sync_service;

#[cfg(test)]
mod test_support;

pub use poller::{PollHandle, Poller};
pub use sync_service::{PollOutcome, SessionSyncService, SyncEvent};
