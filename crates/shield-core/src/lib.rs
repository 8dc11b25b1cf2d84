//! Domain layer for the Crowd Shield operator console.
//!
//! Holds the session model, the backend gateway contract and the pure
//! synchronization core that reconciles polled snapshots with console state.

pub mod config;
pub mod error;
pub mod session;
pub mod sync;

// Re-export common error type
pub use error::{Result, ShieldError};
