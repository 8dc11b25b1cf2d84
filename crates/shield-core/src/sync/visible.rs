//! Derivation of the visible set from a raw backend snapshot.

use super::VISIBLE_SET_CAP;
use crate::session::Session;

/// Derives the visible set: newest first, pending only, at most
/// [`VISIBLE_SET_CAP`] entries.
///
/// The backend returns sessions oldest first, so reversing the snapshot is
/// the whole ordering step. Timestamps are never consulted.
pub fn visible_set(snapshot: &[Session]) -> Vec<Session> {
    snapshot
        .iter()
        .rev()
        .filter(|session| session.is_pending())
        .take(VISIBLE_SET_CAP)
        .cloned()
        .collect()
}
