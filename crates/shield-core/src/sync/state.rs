//! Held console state and its two transition paths.

use super::overlay::{OverlayReport, overlay_status};
use super::selection::{Selection, SelectionTransition, reconcile_selection};
use super::visible::visible_set;
use crate::error::{Result, ShieldError};
use crate::session::{Session, SessionAction};
use serde::Serialize;

/// Summary of one poll reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub previous_visible_ids: Vec<String>,
    pub visible_ids: Vec<String>,
    pub previous_selection_id: Option<String>,
    pub selection_id: Option<String>,
    pub transition: SelectionTransition,
}

impl ReconcileReport {
    /// True when the operator would see a different list or selection.
    pub fn changed(&self) -> bool {
        self.previous_visible_ids != self.visible_ids
            || self.previous_selection_id != self.selection_id
    }
}

/// State held by one operator's console.
///
/// Two paths mutate it, each in one step: [`ConsoleState::apply_snapshot`]
/// (poll reconciliation) and [`ConsoleState::apply_action_result`]
/// (optimistic overlay). User selection goes through [`ConsoleState::select`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsoleState {
    visible: Vec<Session>,
    selection: Option<Selection>,
    synced: bool,
}

impl ConsoleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visible set, newest first.
    pub fn visible(&self) -> &[Session] {
        &self.visible
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn selected_session(&self) -> Option<&Session> {
        self.selection.as_ref().map(|selection| &selection.session)
    }

    /// False until the first poll tick has completed, successfully or not.
    pub fn is_loading(&self) -> bool {
        !self.synced
    }

    /// Records that a poll tick finished without touching session state.
    pub fn mark_synced(&mut self) {
        self.synced = true;
    }

    /// Replaces the visible set from `snapshot` and runs the selection policy.
    pub fn apply_snapshot(&mut self, snapshot: &[Session]) -> ReconcileReport {
        let previous_visible_ids = ids(&self.visible);
        let previous_selection_id = self.selection.as_ref().map(|s| s.session_id().to_string());

        let visible = visible_set(snapshot);
        let outcome = reconcile_selection(self.selection.take(), &visible);

        self.visible = visible;
        self.selection = outcome.selection;
        self.synced = true;

        ReconcileReport {
            previous_visible_ids,
            visible_ids: ids(&self.visible),
            previous_selection_id,
            selection_id: self.selection.as_ref().map(|s| s.session_id().to_string()),
            transition: outcome.transition,
        }
    }

    /// Overlays the status produced by a successful `action`.
    pub fn apply_action_result(&mut self, session_id: &str, action: SessionAction) -> OverlayReport {
        overlay_status(
            &mut self.visible,
            self.selection.as_mut(),
            session_id,
            &action.resulting_status(),
        )
    }

    /// Explicit operator selection of a visible session.
    ///
    /// # Errors
    ///
    /// `ShieldError::NotFound` when no visible session has `session_id`.
    pub fn select(&mut self, session_id: &str) -> Result<&Selection> {
        let session = self
            .visible
            .iter()
            .find(|session| session.session_id == session_id)
            .cloned()
            .ok_or_else(|| ShieldError::not_found("Session", session_id))?;

        Ok(&*self.selection.insert(Selection::user(session)))
    }
}

fn ids(sessions: &[Session]) -> Vec<String> {
    sessions.iter().map(|s| s.session_id.clone()).collect()
}
