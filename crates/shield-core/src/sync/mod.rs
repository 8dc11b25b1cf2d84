//! Client-side session synchronization.
//!
//! Reconciles polled backend snapshots with state held by the console:
//! the visible set, the operator's selection and optimistic status overlays.
//!
//! # Module Structure
//!
//! - `visible`: Pure derivation of the visible set from a snapshot
//! - `selection`: Selection policy as an explicit state machine
//! - `overlay`: Optimistic status merge after a successful action
//! - `state`: `ConsoleState`, the held state both paths mutate

mod overlay;
mod selection;
mod state;
mod visible;

use std::time::Duration;

pub use overlay::{OverlayReport, overlay_status};
pub use selection::{
    Selection, SelectionOrigin, SelectionOutcome, SelectionTransition, reconcile_selection,
};
pub use state::{ConsoleState, ReconcileReport};
pub use visible::visible_set;

/// Maximum number of sessions in the visible set.
pub const VISIBLE_SET_CAP: usize = 4;

/// Period between two poll ticks.
pub const POLL_INTERVAL: Duration = Duration::from_millis(3000);
