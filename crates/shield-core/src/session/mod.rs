//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Core session types (`Session`, `SessionStatus`, `Severity`, `SessionAction`)
//! - `gateway`: Trait for reaching the backend session store
//!
//! # Usage
//!
//! ```ignore
//! use shield_core::session::{Session, SessionStatus, SessionAction, SessionGateway};
//! ```

mod gateway;
mod lenient;
mod model;

// Re-export public API
pub use gateway::SessionGateway;
pub use model::{Session, SessionAction, SessionStatus, Severity};
