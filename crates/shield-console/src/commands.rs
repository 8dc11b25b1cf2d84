//! Operator command parsing and target resolution.

use shield_core::session::{Session, SessionAction};
use shield_core::sync::ConsoleState;

/// Reference to a visible session as typed by the operator.
///
/// A number within the card range picks that card; anything else is
/// matched against session ids, so numeric ids stay reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(String);

impl Target {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zero-based card position, when the target is a card number on screen.
    fn card_index(&self, visible_len: usize) -> Option<usize> {
        self.0
            .parse::<usize>()
            .ok()
            .filter(|index| (1..=visible_len).contains(index))
            .map(|index| index - 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show,
    Select(Target),
    Act(SessionAction, Option<Target>),
    Refresh,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let Some(head) = parts.next() else {
            return Self::Empty;
        };
        let arg = parts.next().map(Target::new);

        match head.to_lowercase().as_str() {
            "list" | "ls" => Self::List,
            "show" => Self::Show,
            "select" | "sel" => match arg {
                Some(target) => Self::Select(target),
                None => Self::Unknown("select needs a card number or session id".to_string()),
            },
            "approve" | "confirm" => Self::Act(SessionAction::Approve, arg),
            "reject" => Self::Act(SessionAction::Reject, arg),
            "refresh" => Self::Refresh,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => Self::Unknown(format!("Unknown command: {}", other)),
        }
    }
}

pub const COMMAND_NAMES: &[&str] = &[
    "list", "show", "select", "approve", "reject", "refresh", "help", "quit",
];

pub const HELP: &str = "\
Commands:
  list | ls              Show the visible alerts
  show                   Show the selected incident
  select <n|id>          Select card n (1-4) or a session id prefix
  approve [n|id]         Confirm the incident (defaults to the selection)
  reject [n|id]          Mark the alert as a false alarm (defaults to the selection)
  refresh                Poll the backend now
  help                   Show this help
  quit | exit            Leave the console";

/// Finds the session a target points at within the visible set.
///
/// Without a target the current selection is used. Otherwise a card number
/// wins, then an exact id, then a unique id prefix.
pub fn resolve_target(state: &ConsoleState, target: Option<&Target>) -> Result<Session, String> {
    let visible = state.visible();

    match target {
        None => state
            .selected_session()
            .cloned()
            .ok_or_else(|| "No incident selected".to_string()),
        Some(target) => {
            if let Some(index) = target.card_index(visible.len()) {
                return Ok(visible[index].clone());
            }

            let id = target.as_str();
            if let Some(exact) = visible.iter().find(|s| s.session_id == id) {
                return Ok(exact.clone());
            }
            let matches: Vec<&Session> = visible
                .iter()
                .filter(|s| s.session_id.starts_with(id))
                .collect();
            match matches.as_slice() {
                [single] => Ok((*single).clone()),
                [] => Err(format!(
                    "No alert card or visible session matches '{}' (cards: {})",
                    id,
                    visible.len()
                )),
                _ => Err(format!("Session id prefix '{}' is ambiguous", id)),
            }
        }
    }
}

/// Resolves the target of an action and refuses sessions already resolved.
pub fn action_target(state: &ConsoleState, target: Option<&Target>) -> Result<Session, String> {
    let session = resolve_target(state, target)?;
    if session.is_pending() {
        Ok(session)
    } else {
        Err(format!(
            "Session {} is already {}",
            session.short_id(),
            session.status
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shield_core::session::SessionStatus;

    fn state_with(ids: &[&str]) -> ConsoleState {
        let snapshot: Vec<Session> = ids
            .iter()
            .map(|id| Session::new(*id, SessionStatus::Pending))
            .collect();
        let mut state = ConsoleState::new();
        state.apply_snapshot(&snapshot);
        state
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  "), Command::Empty);
        assert_eq!(Command::parse("ls"), Command::List);
        assert_eq!(Command::parse("SELECT 2"), Command::Select(Target::new("2")));
        assert_eq!(
            Command::parse("select abc"),
            Command::Select(Target::new("abc"))
        );
        assert_eq!(
            Command::parse("approve"),
            Command::Act(SessionAction::Approve, None)
        );
        assert_eq!(
            Command::parse("reject 1"),
            Command::Act(SessionAction::Reject, Some(Target::new("1")))
        );
        assert_eq!(Command::parse("exit"), Command::Quit);
        assert!(matches!(Command::parse("select"), Command::Unknown(_)));
        assert!(matches!(Command::parse("dance"), Command::Unknown(_)));
    }

    #[test]
    fn test_resolve_by_index_follows_card_order() {
        // Snapshot is oldest first, cards are newest first.
        let state = state_with(&["old", "mid", "new"]);
        assert_eq!(
            resolve_target(&state, Some(&Target::new("1"))).unwrap().session_id,
            "new"
        );
        assert_eq!(
            resolve_target(&state, Some(&Target::new("3"))).unwrap().session_id,
            "old"
        );
        assert!(resolve_target(&state, Some(&Target::new("0"))).is_err());
        assert!(resolve_target(&state, Some(&Target::new("4"))).is_err());
    }

    #[test]
    fn test_resolve_by_id_prefers_exact_then_unique_prefix() {
        let state = state_with(&["abc", "abcd", "xyz"]);
        let exact = resolve_target(&state, Some(&Target::new("abc"))).unwrap();
        assert_eq!(exact.session_id, "abc");

        let prefix = resolve_target(&state, Some(&Target::new("xy"))).unwrap();
        assert_eq!(prefix.session_id, "xyz");

        let ambiguous = resolve_target(&state, Some(&Target::new("ab")));
        assert!(ambiguous.unwrap_err().contains("ambiguous"));
    }

    #[test]
    fn test_resolve_numeric_id_outside_card_range() {
        let state = state_with(&["42", "7"]);
        let by_id = resolve_target(&state, Some(&Target::new("42"))).unwrap();
        assert_eq!(by_id.session_id, "42");

        // Within the card range the number still means a card.
        let by_card = resolve_target(&state, Some(&Target::new("2"))).unwrap();
        assert_eq!(by_card.session_id, "42");

        let by_prefix = resolve_target(&state, Some(&Target::new("4"))).unwrap();
        assert_eq!(by_prefix.session_id, "42");
    }

    #[test]
    fn test_resolve_defaults_to_selection() {
        let state = state_with(&["a", "b"]);
        assert_eq!(resolve_target(&state, None).unwrap().session_id, "b");
        assert!(resolve_target(&ConsoleState::new(), None).is_err());
    }

    #[test]
    fn test_action_target_refuses_resolved_sessions() {
        let mut state = state_with(&["a"]);
        assert!(action_target(&state, None).is_ok());

        state.apply_action_result("a", SessionAction::Reject);
        let err = action_target(&state, None).unwrap_err();
        assert!(err.contains("already rejected"));
    }
}
