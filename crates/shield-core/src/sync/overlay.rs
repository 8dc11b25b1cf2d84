//! Optimistic status overlay.
//!
//! Applied after the backend accepts an action, ahead of the next poll.

use super::selection::Selection;
use crate::session::{Session, SessionStatus};
use serde::Serialize;

/// Where an overlay landed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OverlayReport {
    /// A visible session with the target id was updated.
    pub in_visible: bool,
    /// The held selection had the target id and was updated.
    pub in_selection: bool,
}

impl OverlayReport {
    pub fn is_noop(&self) -> bool {
        !self.in_visible && !self.in_selection
    }
}

/// Overwrites `status` on every held copy of `session_id`.
///
/// Touches the visible set and the selection only; membership and order of
/// the visible set are left for the next reconciliation.
pub fn overlay_status(
    visible: &mut [Session],
    selection: Option<&mut Selection>,
    session_id: &str,
    status: &SessionStatus,
) -> OverlayReport {
    let mut report = OverlayReport::default();

    for session in visible.iter_mut().filter(|s| s.session_id == session_id) {
        session.status = status.clone();
        report.in_visible = true;
    }

    if let Some(selection) = selection
        && selection.session_id() == session_id
    {
        selection.session.status = status.clone();
        report.in_selection = true;
    }

    report
}
