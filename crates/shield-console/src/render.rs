//! Text rendering of the console state.
//!
//! View structs hold the derived display values; the `render_*` functions
//! turn them into colored lines.

use colored::{ColoredString, Colorize};
use shield_core::config::ConsoleConfig;
use shield_core::session::{Session, SessionStatus, Severity};
use shield_core::sync::{ConsoleState, SelectionOrigin};

/// Incident category guessed from the session description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentKind {
    Fire,
    Violence,
    Stampede,
    Alert,
}

impl IncidentKind {
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("fire") {
            Self::Fire
        } else if lower.contains("violence") || lower.contains("weapon") {
            Self::Violence
        } else if lower.contains("crowd") || lower.contains("stampede") {
            Self::Stampede
        } else {
            Self::Alert
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Fire => "FIRE",
            Self::Violence => "VIOLENCE",
            Self::Stampede => "STAMPEDE",
            Self::Alert => "ALERT",
        }
    }
}

/// Time-of-day part of a `YYYY-MM-DD HH:MM:SS` timestamp.
fn time_of_day(created_at: &str) -> Option<&str> {
    created_at.split(' ').nth(1).filter(|t| !t.is_empty())
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.is_empty())
}

/// One alert card in the visible list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub index: usize,
    pub short_id: String,
    pub kind: IncidentKind,
    pub title: String,
    pub camera: String,
    pub time: String,
    pub severity: Severity,
    pub confidence: String,
    pub status: SessionStatus,
    pub selected: bool,
}

impl CardView {
    pub fn new(index: usize, session: &Session, selected: bool) -> Self {
        let title = session
            .description
            .split(':')
            .next()
            .and_then(non_empty)
            .unwrap_or("Alert");

        Self {
            index,
            short_id: session.short_id().to_string(),
            kind: IncidentKind::classify(&session.description),
            title: title.to_string(),
            camera: session.camera_id.clone(),
            time: time_of_day(&session.created_at).unwrap_or("00:00").to_string(),
            severity: session.severity,
            confidence: non_empty(&session.confidence).unwrap_or("N/A").to_string(),
            status: session.status.clone(),
            selected,
        }
    }
}

/// Detail pane for the selected session or the default camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub short_id: Option<String>,
    pub kind: Option<IncidentKind>,
    pub headline: String,
    pub severity: Severity,
    pub time: String,
    pub confidence: String,
    pub camera: String,
    pub live_feed_url: String,
    pub clip_url: Option<String>,
    pub status: Option<SessionStatus>,
    pub origin: Option<SelectionOrigin>,
}

impl DetailView {
    pub fn from_state(state: &ConsoleState, config: &ConsoleConfig) -> Self {
        let Some(selection) = state.selection() else {
            return Self {
                short_id: None,
                kind: None,
                headline: "No Incident Selected".to_string(),
                severity: Severity::Normal,
                time: "--:--".to_string(),
                confidence: "--%".to_string(),
                camera: config.default_camera_id.clone(),
                live_feed_url: config.live_feed_url.clone(),
                clip_url: None,
                status: None,
                origin: None,
            };
        };

        let session = &selection.session;
        Self {
            short_id: Some(session.short_id().to_string()),
            kind: Some(IncidentKind::classify(&session.description)),
            headline: non_empty(&session.description)
                .unwrap_or("No Incident Selected")
                .to_string(),
            severity: session.severity,
            time: time_of_day(&session.created_at).unwrap_or("--:--").to_string(),
            confidence: non_empty(&session.confidence).unwrap_or("--%").to_string(),
            camera: non_empty(&session.camera_id)
                .unwrap_or(&config.default_camera_id)
                .to_string(),
            live_feed_url: non_empty(&session.live_url)
                .unwrap_or(&config.live_feed_url)
                .to_string(),
            clip_url: non_empty(&session.video_url).map(str::to_string),
            status: Some(session.status.clone()),
            origin: Some(selection.origin),
        }
    }
}

fn severity_badge(severity: Severity) -> ColoredString {
    let label = format!(" {} ", severity.as_str().to_uppercase());
    match severity {
        Severity::Critical => label.white().on_red().bold(),
        Severity::Warning => label.black().on_yellow().bold(),
        Severity::Informational => label.white().on_blue().bold(),
        Severity::Normal => label.white().on_bright_black(),
    }
}

fn kind_label(kind: IncidentKind) -> ColoredString {
    match kind {
        IncidentKind::Fire => kind.label().bright_red(),
        IncidentKind::Violence => kind.label().red(),
        IncidentKind::Stampede => kind.label().yellow(),
        IncidentKind::Alert => kind.label().bright_black(),
    }
}

fn status_label(status: &SessionStatus) -> ColoredString {
    match status {
        SessionStatus::Pending => "PENDING".bright_white(),
        SessionStatus::Approved => "APPROVED".green(),
        SessionStatus::Rejected => "REJECTED".red(),
        SessionStatus::Other(raw) => raw.to_uppercase().bright_black(),
    }
}

pub fn render_header(state: &ConsoleState) -> String {
    let critical = state
        .visible()
        .iter()
        .filter(|s| s.severity == Severity::Critical)
        .count();

    format!(
        "{}  {}  {}",
        "CROWD SHIELD".bright_blue().bold(),
        "SAFETY MONITOR".bright_black(),
        format!("CRITICAL ALERTS ({})", critical).red().bold()
    )
}

pub fn render_card(card: &CardView) -> String {
    let marker = if card.selected { ">" } else { " " };
    format!(
        "{} [{}] {} {:<9} {}  {} - {} UTC  {}  confidence {}  {}",
        marker.bright_cyan().bold(),
        card.index,
        card.short_id.bright_black(),
        kind_label(card.kind),
        card.title.bold(),
        card.camera,
        card.time,
        severity_badge(card.severity),
        card.confidence,
        status_label(&card.status)
    )
}

/// Header plus one line per visible session.
pub fn render_cards(state: &ConsoleState) -> Vec<String> {
    if state.is_loading() {
        return vec!["Loading sessions...".bright_black().to_string()];
    }

    let selected_id = state.selection().map(|s| s.session_id().to_string());
    let mut lines = vec![render_header(state)];

    if state.visible().is_empty() {
        lines.push("  No pending incidents.".bright_black().to_string());
        return lines;
    }

    lines.extend(state.visible().iter().enumerate().map(|(i, session)| {
        let selected = selected_id.as_deref() == Some(session.session_id.as_str());
        render_card(&CardView::new(i + 1, session, selected))
    }));
    lines
}

pub fn render_detail(view: &DetailView) -> Vec<String> {
    let mut lines = Vec::new();

    match &view.short_id {
        Some(short_id) => lines.push(format!(
            "{} #{}  {}",
            "INCIDENT".bright_red().bold(),
            short_id,
            view.headline.bold()
        )),
        None => lines.push(format!(
            "{}  {}",
            "LIVE MONITORING".green().bold(),
            view.headline.bright_black()
        )),
    }

    if view.short_id.is_some() {
        lines.push(format!(
            "  AI detected patterns consistent with {} activity.",
            view.severity
        ));
    }

    lines.push(format!(
        "  Time {} UTC | Confidence {} | Camera {} (Static)",
        view.time, view.confidence, view.camera
    ));
    lines.push(format!("  Live feed: {}", view.live_feed_url));
    lines.push(match &view.clip_url {
        Some(url) => format!("  Recording: {}", url),
        None => format!("  Recording: {}", "No recorded clip available".bright_black()),
    });

    if let Some(status) = &view.status {
        let actions = match status {
            SessionStatus::Pending => format!(
                "{}  {}",
                "[approve] CONFIRM INCIDENT".green(),
                "[reject] REJECT ALERT".red()
            ),
            SessionStatus::Approved => "INCIDENT RESOLVED".green().bold().to_string(),
            SessionStatus::Rejected => "MARKED FALSE ALARM".red().bold().to_string(),
            SessionStatus::Other(raw) => format!("No actions ({})", raw).bright_black().to_string(),
        };
        let origin = match view.origin {
            Some(SelectionOrigin::User) => " (pinned)",
            _ => "",
        };
        lines.push(format!("  Actions: {}{}", actions, origin.bright_black()));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() {
        colored::control::set_override(false);
    }

    fn session(id: &str, description: &str) -> Session {
        Session {
            description: description.to_string(),
            ..Session::new(id, SessionStatus::Pending)
        }
    }

    #[test]
    fn test_classify_incident_kind() {
        assert_eq!(IncidentKind::classify("Security Alert: Fire detected!"), IncidentKind::Fire);
        assert_eq!(IncidentKind::classify("Weapon spotted"), IncidentKind::Violence);
        assert_eq!(IncidentKind::classify("VIOLENCE in hall"), IncidentKind::Violence);
        assert_eq!(IncidentKind::classify("Stampede risk"), IncidentKind::Stampede);
        assert_eq!(IncidentKind::classify("Crowd forming"), IncidentKind::Stampede);
        assert_eq!(IncidentKind::classify("Something odd"), IncidentKind::Alert);
    }

    #[test]
    fn test_card_view_fallbacks() {
        let card = CardView::new(1, &session("abcdefghij", ""), false);
        assert_eq!(card.title, "Alert");
        assert_eq!(card.time, "00:00");
        assert_eq!(card.confidence, "N/A");
        assert_eq!(card.short_id, "abcdefgh");
        assert_eq!(card.severity, Severity::Normal);
    }

    #[test]
    fn test_card_view_uses_description_and_timestamp() {
        let mut s = session("a", "Security Alert: Fire detected!");
        s.created_at = "2025-01-31 14:02:11".to_string();
        s.confidence = "92%".to_string();
        s.camera_id = "cam1".to_string();

        let card = CardView::new(2, &s, true);
        assert_eq!(card.title, "Security Alert");
        assert_eq!(card.time, "14:02:11");
        assert_eq!(card.kind, IncidentKind::Fire);
        assert!(card.selected);
    }

    #[test]
    fn test_detail_without_selection_uses_default_feed() {
        let config = ConsoleConfig::default();
        let view = DetailView::from_state(&ConsoleState::new(), &config);
        assert_eq!(view.headline, "No Incident Selected");
        assert_eq!(view.live_feed_url, config.live_feed_url);
        assert_eq!(view.camera, "cam1");
        assert!(view.clip_url.is_none());
        assert!(view.status.is_none());
    }

    #[test]
    fn test_detail_for_selected_session() {
        let mut s = session("abc", "Fight: violence detected");
        s.live_url = "http://cams/cam3".to_string();
        s.video_url = "http://clips/abc.mp4".to_string();
        s.camera_id = "cam3".to_string();
        let mut state = ConsoleState::new();
        state.apply_snapshot(&[s]);

        let view = DetailView::from_state(&state, &ConsoleConfig::default());
        assert_eq!(view.short_id.as_deref(), Some("abc"));
        assert_eq!(view.live_feed_url, "http://cams/cam3");
        assert_eq!(view.clip_url.as_deref(), Some("http://clips/abc.mp4"));
        assert_eq!(view.time, "--:--");
        assert_eq!(view.origin, Some(SelectionOrigin::Auto));
    }

    #[test]
    fn test_render_cards_marks_selection_and_counts_critical() {
        plain();
        let mut a = session("a", "Fire");
        a.severity = Severity::Critical;
        let b = session("b", "Crowd");
        let mut state = ConsoleState::new();
        state.apply_snapshot(&[a, b]);

        let lines = render_cards(&state);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("CRITICAL ALERTS (1)"));
        assert!(lines[1].starts_with("> [1] b"));
        assert!(lines[2].starts_with("  [2] a"));
        assert!(lines[2].contains("CRITICAL"));
    }

    #[test]
    fn test_render_cards_while_loading_and_empty() {
        plain();
        let mut state = ConsoleState::new();
        assert_eq!(render_cards(&state), vec!["Loading sessions...".to_string()]);

        state.apply_snapshot(&[]);
        let lines = render_cards(&state);
        assert!(lines[1].contains("No pending incidents."));
    }

    #[test]
    fn test_render_detail_action_labels() {
        plain();
        let mut state = ConsoleState::new();
        state.apply_snapshot(&[session("a", "Fire")]);
        let config = ConsoleConfig::default();

        let pending = render_detail(&DetailView::from_state(&state, &config)).join("\n");
        assert!(pending.contains("CONFIRM INCIDENT"));

        state.apply_action_result("a", shield_core::session::SessionAction::Approve);
        let resolved = render_detail(&DetailView::from_state(&state, &config)).join("\n");
        assert!(resolved.contains("INCIDENT RESOLVED"));
        assert!(resolved.contains("No recorded clip available"));
    }
}
