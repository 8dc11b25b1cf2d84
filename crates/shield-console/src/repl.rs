//! Interactive operator console.
//!
//! The readline loop runs on the main task. Poll results and action outcomes
//! arrive as [`SyncEvent`]s and are printed by a separate event task.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use shield_application::{PollHandle, Poller, SessionSyncService, SyncEvent};
use shield_core::config::ConsoleConfig;
use shield_core::session::SessionStatus;
use shield_core::sync::ConsoleState;
use tokio::sync::mpsc;

use crate::commands::{COMMAND_NAMES, Command, HELP, action_target, resolve_target};
use crate::render::{DetailView, render_cards, render_detail};

#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_NAMES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let head = line.split_whitespace().next().unwrap_or_default();
        if self.commands.iter().any(|cmd| cmd == head) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.is_empty() || line.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Tracks whether the backend answered the latest poll.
///
/// Only transitions produce a notice, so a long outage prints once.
#[derive(Debug, Default)]
pub struct BackendLink {
    online: Option<bool>,
}

impl BackendLink {
    pub fn observe(&mut self, event: &SyncEvent) -> Option<String> {
        let (online, notice) = match event {
            SyncEvent::Reconciled(_) => (true, "Backend online".to_string()),
            SyncEvent::PollFailed { message } => {
                (false, format!("Backend unreachable, showing last known alerts: {}", message))
            }
            _ => return None,
        };

        let previous = self.online.replace(online);
        match previous {
            Some(was) if was == online => None,
            None if online => None,
            _ => Some(notice),
        }
    }
}

pub fn print_state(state: &ConsoleState, config: &ConsoleConfig) {
    for line in render_cards(state) {
        println!("{}", line);
    }
    if !state.is_loading() {
        println!();
        for line in render_detail(&DetailView::from_state(state, config)) {
            println!("{}", line);
        }
    }
}

fn print_event(event: &SyncEvent) {
    match event {
        SyncEvent::ActionApplied { session_id, status } => {
            let message = match status {
                SessionStatus::Approved => format!("Incident {} confirmed", session_id).green(),
                SessionStatus::Rejected => {
                    format!("Alert {} marked as false alarm", session_id).yellow()
                }
                other => format!("Session {} is now {}", session_id, other).normal(),
            };
            println!("{}", message);
        }
        SyncEvent::ActionFailed {
            session_id,
            action,
            message,
        } => {
            eprintln!(
                "{}",
                format!("Failed to {} session {}: {}", action, session_id, message).red()
            );
        }
        _ => {}
    }
}

/// Prints events until the task is aborted.
async fn event_printer(
    mut events: mpsc::UnboundedReceiver<SyncEvent>,
    service: SessionSyncService,
    config: ConsoleConfig,
) {
    let mut link = BackendLink::default();
    let mut rendered = false;

    while let Some(event) = events.recv().await {
        if let Some(notice) = link.observe(&event) {
            match &event {
                SyncEvent::PollFailed { .. } => println!("{}", notice.yellow()),
                _ => println!("{}", notice.green()),
            }
        }

        match &event {
            SyncEvent::Reconciled(report) if report.changed() || !rendered => {
                rendered = true;
                println!();
                print_state(&service.state().await, &config);
            }
            SyncEvent::ActionApplied { .. } => {
                print_event(&event);
                print_state(&service.state().await, &config);
            }
            _ => print_event(&event),
        }
    }
}

/// Runs the poller and the readline loop until the operator quits.
pub async fn run(
    service: SessionSyncService,
    events: mpsc::UnboundedReceiver<SyncEvent>,
    config: ConsoleConfig,
) -> Result<()> {
    let printer = tokio::spawn(event_printer(events, service.clone(), config.clone()));
    let poll_handle = Poller::new(service.clone()).start();

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Crowd Shield Operator Console ===".bright_blue().bold());
    println!("{}", format!("Backend: {}", config.backend_url).bright_black());
    println!("{}", "Type 'help' for commands, 'quit' to exit.".bright_black());
    println!("{}", "Loading sessions...".bright_black());
    println!();

    loop {
        match rl.readline("shield> ") {
            Ok(line) => {
                let command = Command::parse(&line);
                if command != Command::Empty {
                    let _ = rl.add_history_entry(line.trim());
                }
                if command == Command::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                handle(&service, &poll_handle, &config, command).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    poll_handle.stop().await;
    printer.abort();
    let _ = printer.await;
    Ok(())
}

async fn handle(
    service: &SessionSyncService,
    poll_handle: &PollHandle,
    config: &ConsoleConfig,
    command: Command,
) {
    match command {
        Command::Empty | Command::Quit => {}
        Command::Help => println!("{}", HELP),
        Command::List | Command::Show => print_state(&service.state().await, config),
        Command::Refresh => poll_handle.refresh(),
        Command::Select(target) => {
            let state = service.state().await;
            let selected = match resolve_target(&state, Some(&target)) {
                Ok(session) => service
                    .select(&session.session_id)
                    .await
                    .map_err(|e| e.to_string()),
                Err(message) => Err(message),
            };
            match selected {
                Ok(_) => print_state(&service.state().await, config),
                Err(message) => eprintln!("{}", message.red()),
            }
        }
        Command::Act(action, target) => {
            let state = service.state().await;
            match action_target(&state, target.as_ref()) {
                Ok(session) => {
                    println!(
                        "{}",
                        format!("Submitting {} for {}...", action, session.short_id()).bright_black()
                    );
                    let service = service.clone();
                    // Outcome is reported through the event channel.
                    tokio::spawn(async move {
                        let _ = service.apply_action(&session.session_id, action).await;
                    });
                }
                Err(message) => eprintln!("{}", message.red()),
            }
        }
        Command::Unknown(message) => {
            println!("{}", message.bright_black());
            println!("{}", "Type 'help' for commands.".bright_black());
        }
    }
}
