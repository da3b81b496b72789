//! Interactive triage loop.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tracing::warn;

use assist_application::{SelectOutcome, SuggestionFetch, TriageSession};
use assist_core::queue::{QueueSnapshot, QueueState};
use assist_core::suggestion::SuggestedResponse;
use assist_core::ticket::Ticket;

const COMMANDS: [&str; 4] = ["/help", "/log", "/reset", "/quit"];

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Pick the suggestion at this zero-based index.
    Choose(usize),
    /// Empty line: fetch suggestions again if the last attempt failed.
    Retry,
    Help,
    Log,
    Reset,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed {
            "" => Self::Retry,
            "/help" | "?" => Self::Help,
            "/log" => Self::Log,
            "/reset" => Self::Reset,
            "/quit" | "/exit" | "quit" | "exit" => Self::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Self::Choose(n - 1),
                _ => Self::Unknown(other.to_string()),
            },
        }
    }
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
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

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

/// Suggestions currently on screen.
struct Presented {
    ticket_id: String,
    responses: Vec<SuggestedResponse>,
}

/// Runs the REPL until `/quit` or end of input.
pub async fn run(session: TriageSession) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== Agent Assist: ticket triage ===".bright_magenta().bold());
    println!(
        "{}",
        "Pick a response by number. /help lists the commands.".bright_black()
    );
    println!();

    let mut presented: Option<Presented> = None;
    let mut announced_done = false;

    loop {
        let snapshot = session.snapshot().await;
        let moved_on = match (&presented, &snapshot.current_ticket) {
            (Some(p), Some(ticket)) => p.ticket_id != ticket.id,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if moved_on {
            presented = None;
        }
        if presented.is_none() && !(snapshot.state.is_exhausted() && announced_done) {
            presented = present(&session, &snapshot).await;
            announced_done = snapshot.state.is_exhausted();
        }

        let line = match rl.readline(&prompt(&snapshot)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };
        if !line.trim().is_empty() {
            let _ = rl.add_history_entry(line.as_str());
        }

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::Log => print_log(&session).await,
            // The next iteration fetches again when nothing is presented.
            ReplCommand::Retry => {}
            ReplCommand::Reset => match session.reset().await {
                Ok(_) => {
                    println!("{}", "Queue reset; selection log cleared.".bright_green());
                    presented = None;
                    announced_done = false;
                }
                Err(e) => eprintln!("{}", format!("Reset failed: {}", e).red()),
            },
            ReplCommand::Choose(index) => {
                let Some(current) = &presented else {
                    println!("{}", "No suggestions to choose from.".bright_black());
                    continue;
                };
                let Some(response) = current.responses.get(index) else {
                    println!(
                        "{}",
                        format!("Choose between 1 and {}.", current.responses.len()).yellow()
                    );
                    continue;
                };
                if choose(&session, response).await {
                    presented = None;
                }
            }
            ReplCommand::Unknown(input) => {
                println!("{}", format!("Unknown input: {}", input).bright_black());
            }
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

/// Prints the presented ticket and fetches its suggestions.
///
/// Returns `None` when nothing can be chosen right now.
async fn present(session: &TriageSession, snapshot: &QueueSnapshot) -> Option<Presented> {
    let ticket = match (&snapshot.state, &snapshot.current_ticket) {
        (QueueState::Active { .. }, Some(ticket)) => ticket,
        (QueueState::Exhausted, _) => {
            println!(
                "{}",
                format!(
                    "All {} tickets processed. /log shows the selections, /reset starts over.",
                    snapshot.total
                )
                .bright_green()
            );
            return None;
        }
        _ => return None,
    };

    print_ticket(ticket, snapshot);
    println!("{}", "Generating suggestions...".bright_black());

    match session.suggestions().await {
        Ok(SuggestionFetch::Ready {
            ticket_id,
            responses,
        }) => {
            for (i, response) in responses.iter().enumerate() {
                println!(
                    "  {} {} {}",
                    format!("[{}]", i + 1).bright_white().bold(),
                    format!("({})", response.tone).cyan(),
                    response.text
                );
            }
            Some(Presented {
                ticket_id,
                responses,
            })
        }
        Ok(SuggestionFetch::Stale) | Ok(SuggestionFetch::Unavailable { .. }) => None,
        Err(e) => {
            warn!(error = %e, "suggestion fetch failed");
            eprintln!(
                "{}",
                format!("Could not generate suggestions: {}. Press Enter to retry.", e).red()
            );
            None
        }
    }
}

/// Commits `response` and waits for the queue to settle. Returns true if it was recorded.
async fn choose(session: &TriageSession, response: &SuggestedResponse) -> bool {
    match session.select_response(response).await {
        Ok(SelectOutcome::Committed { selection, .. }) => {
            println!(
                "{}",
                format!("Recorded {} reply for {}.", selection.tone, selection.ticket_id)
                    .green()
            );
            let mut rx = session.subscribe();
            if rx.wait_for(|s| !s.state.is_transitioning()).await.is_err() {
                warn!("session closed while settling");
            }
            println!();
            true
        }
        Ok(SelectOutcome::Ignored { reason }) => {
            println!("{}", format!("Ignored: {}.", reason).yellow());
            false
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!("Selection not saved, still on this ticket: {}", e).red()
            );
            false
        }
    }
}

fn prompt(snapshot: &QueueSnapshot) -> String {
    match snapshot.state {
        QueueState::Exhausted => "done> ".to_string(),
        _ => format!("[{}/{}]> ", snapshot.processed + 1, snapshot.total),
    }
}

fn print_ticket(ticket: &Ticket, snapshot: &QueueSnapshot) {
    println!(
        "{} {}",
        format!("Ticket {}/{}", snapshot.processed + 1, snapshot.total)
            .bright_magenta()
            .bold(),
        ticket.id.bright_black()
    );
    println!("  {} {}", "Customer:".bold(), ticket.customer_name);
    println!("  {} {}", "Issue:".bold(), ticket.issue_summary);
    let mood = if ticket.emotion.is_empty() {
        ticket.sentiment.to_string()
    } else {
        format!("{} ({})", ticket.sentiment, ticket.emotion)
    };
    let tier = format!("tier {}", ticket.tier);
    let tier = if ticket.tier > 0 { tier.red() } else { tier.normal() };
    println!("  {} {}  {}", "Mood:".bold(), mood, tier);
}

async fn print_log(session: &TriageSession) {
    let selections = session.selections().await;
    if selections.is_empty() {
        println!("{}", "No selections recorded.".bright_black());
        return;
    }
    for (i, selection) in selections.iter().enumerate() {
        let at = selection
            .selected_at
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}. {} {} {}",
            i + 1,
            selection.ticket_id.bright_white(),
            format!("({})", selection.tone).cyan(),
            at.bright_black()
        );
        println!("     {}", selection.text);
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}      choose suggestion n", "<n>".bright_cyan());
    println!("  {}  retry a failed suggestion fetch", "<Enter>".bright_cyan());
    println!("  {}    list recorded selections", "/log".bright_cyan());
    println!("  {}  clear the log and start over", "/reset".bright_cyan());
    println!("  {}   exit", "/quit".bright_cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers_are_one_based() {
        assert_eq!(ReplCommand::parse("1"), ReplCommand::Choose(0));
        assert_eq!(ReplCommand::parse(" 3 "), ReplCommand::Choose(2));
        assert_eq!(ReplCommand::parse("0"), ReplCommand::Unknown("0".to_string()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("/log"), ReplCommand::Log);
        assert_eq!(ReplCommand::parse("/reset"), ReplCommand::Reset);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse(""), ReplCommand::Retry);
        assert_eq!(
            ReplCommand::parse("/nope"),
            ReplCommand::Unknown("/nope".to_string())
        );
    }

    #[test]
    fn test_prompt_shows_progress() {
        let snapshot = QueueSnapshot {
            state: QueueState::Active { cursor: 1 },
            current_ticket: None,
            processed: 1,
            total: 8,
            selections: 1,
            generation: 1,
        };
        assert_eq!(prompt(&snapshot), "[2/8]> ");
    }
}
