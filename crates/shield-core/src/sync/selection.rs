//! Selection state machine.
//!
//! The selection is the one session the operator is reviewing. Across polls
//! it is kept by identity while it stays pending and visible, and otherwise
//! falls back to the newest visible session.

use crate::session::Session;
use serde::Serialize;

/// How the current selection came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrigin {
    /// Assigned by reconciliation.
    Auto,
    /// Picked explicitly by the operator.
    User,
}

/// Held copy of the selected session.
///
/// The copy is what the policy inspects: a local optimistic status overlay
/// resolves it even before the backend reflects the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub session: Session,
    pub origin: SelectionOrigin,
}

impl Selection {
    pub fn auto(session: Session) -> Self {
        Self {
            session,
            origin: SelectionOrigin::Auto,
        }
    }

    pub fn user(session: Session) -> Self {
        Self {
            session,
            origin: SelectionOrigin::User,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session.session_id
    }

    pub fn is_pending(&self) -> bool {
        self.session.is_pending()
    }
}

/// Which rule of the selection policy fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionTransition {
    /// Nothing was selected; the newest visible session is taken.
    Initial,
    /// The held selection is no longer pending; fall back to the newest.
    Resolved,
    /// The held selection is pending and still visible; it is kept as is.
    Retained,
    /// The held selection is pending but dropped out of the visible set.
    Displaced,
}

impl SelectionTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Resolved => "resolved",
            Self::Retained => "retained",
            Self::Displaced => "displaced",
        }
    }
}

/// Result of running the selection policy against a new visible set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionOutcome {
    pub selection: Option<Selection>,
    pub transition: SelectionTransition,
}

/// Applies the selection policy.
///
/// Rules are evaluated in order: `Initial`, `Resolved`, then `Retained` or
/// `Displaced`. Every rule except `Retained` selects `visible[0]`, or nothing
/// when the visible set is empty. `Retained` returns `previous` untouched,
/// origin included, rather than the same-id entry of the new snapshot.
pub fn reconcile_selection(previous: Option<Selection>, visible: &[Session]) -> SelectionOutcome {
    let newest = || visible.first().cloned().map(Selection::auto);

    let Some(previous) = previous else {
        return SelectionOutcome {
            selection: newest(),
            transition: SelectionTransition::Initial,
        };
    };

    if !previous.is_pending() {
        return SelectionOutcome {
            selection: newest(),
            transition: SelectionTransition::Resolved,
        };
    }

    if visible
        .iter()
        .any(|session| session.session_id == previous.session_id())
    {
        SelectionOutcome {
            selection: Some(previous),
            transition: SelectionTransition::Retained,
        }
    } else {
        SelectionOutcome {
            selection: newest(),
            transition: SelectionTransition::Displaced,
        }
    }
}
