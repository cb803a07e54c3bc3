//! REPL (Read-Eval-Print Loop) for moderating a meeting

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use colored::Colorize;
use roundtable_application::{
    LlmGateway, MeetingProgressNotifier, MeetingSession, RoundReport, SessionError,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::{debug, warn};

/// A slash command typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Participants,
    Notes,
    Transcript,
    Retry,
    Discard,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for a plain message.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let name = line.split_whitespace().next().unwrap_or(line);
        Some(match name {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/participants" | "/p" => ReplCommand::Participants,
            "/notes" | "/n" => ReplCommand::Notes,
            "/transcript" | "/t" => ReplCommand::Transcript,
            "/retry" => ReplCommand::Retry,
            "/discard" => ReplCommand::Discard,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Tracks whether leaving with an unsaved round has been warned about.
///
/// The first `/quit` with a pending round only warns; a second one leaves.
/// Clearing the pending round re-arms the warning.
#[derive(Debug, Default)]
struct QuitGuard {
    warned: bool,
}

impl QuitGuard {
    /// Returns true when the meeting may end now.
    fn allow(&mut self, pending: Option<u32>) -> bool {
        if pending.is_some() && !self.warned {
            self.warned = true;
            return false;
        }
        true
    }

    fn reset(&mut self) {
        self.warned = false;
    }
}

/// Interactive meeting REPL
pub struct MeetingRepl<G: LlmGateway + 'static> {
    session: MeetingSession<G>,
    config: ReplConfig,
    quit_guard: QuitGuard,
}

impl<G: LlmGateway + 'static> MeetingRepl<G> {
    pub fn new(session: MeetingSession<G>) -> Self {
        Self {
            session,
            config: ReplConfig::default(),
            quit_guard: QuitGuard::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL until `/quit` or Ctrl-D
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_file.clone();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let progress: Box<dyn MeetingProgressNotifier> = if self.config.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        };

        self.print_welcome();

        loop {
            let readline = rl.readline("moderator> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command, progress.as_ref()).await {
                            break;
                        }
                        continue;
                    }

                    self.run_round(line, progress.as_ref()).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C (type /quit to leave the meeting)");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    if self.confirm_quit() {
                        break;
                    }
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        self.session.close();

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        let meeting = self.session.meeting();
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Roundtable - Meeting             │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("{} {}", "Title:".cyan().bold(), meeting.title());
        println!("{} {}", "Meeting:".cyan().bold(), meeting.id());
        if !meeting.rounds().is_empty() {
            println!(
                "{} {} rounds so far, continuing at round {}",
                "Resumed:".cyan().bold(),
                meeting.rounds().len(),
                meeting.next_round_index()
            );
        }
        println!();
        print!("{}", ConsoleFormatter::format_participants(meeting.roster()));
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Type a message to open a round. Ctrl-C interrupts a running round.");
        println!();
        println!("Commands:");
        println!("  /help, /h, /?        - Show this help");
        println!("  /participants, /p    - Show the roster");
        println!("  /notes, /n           - Show the notes of every round");
        println!("  /transcript, /t      - Show the full transcript");
        println!("  /retry               - Save a round that failed to save");
        println!("  /discard             - Drop a round that failed to save");
        println!("  /quit, /exit, /q     - Leave the meeting");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(
        &mut self,
        command: ReplCommand,
        progress: &dyn MeetingProgressNotifier,
    ) -> bool {
        match command {
            ReplCommand::Quit => return self.confirm_quit(),
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Participants => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_participants(self.session.meeting().roster())
                );
            }
            ReplCommand::Notes => {
                print!("{}", ConsoleFormatter::format_all_notes(self.session.meeting()));
            }
            ReplCommand::Transcript => {
                print!("{}", ConsoleFormatter::format_transcript(self.session.meeting()));
            }
            ReplCommand::Retry => match self.session.retry_persist(progress).await {
                Ok(report) => {
                    self.quit_guard.reset();
                    Self::print_report(&report);
                }
                Err(e) => Self::print_error(&e),
            },
            ReplCommand::Discard => match self.session.discard_pending() {
                Ok(round) => {
                    self.quit_guard.reset();
                    println!(
                        "{} round {} discarded",
                        "Warning:".yellow().bold(),
                        round.index
                    );
                }
                Err(e) => Self::print_error(&e),
            },
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    /// Returns true when the meeting should end now.
    ///
    /// A round that failed to save blocks leaving until it is retried or
    /// discarded, unless `/quit` is given a second time.
    fn confirm_quit(&mut self) -> bool {
        let pending = self.session.pending_round();
        if !self.quit_guard.allow(pending) {
            if let Some(index) = pending {
                println!(
                    "{} round {} is not saved. Use /retry or /discard, or /quit again to drop it.",
                    "Warning:".yellow().bold(),
                    index
                );
            }
            return false;
        }
        println!("Bye!");
        true
    }

    async fn run_round(&mut self, message: &str, progress: &dyn MeetingProgressNotifier) {
        let control = self.session.control();
        let result = {
            let round = self.session.submit_message(message, progress);
            tokio::pin!(round);

            loop {
                tokio::select! {
                    result = &mut round => break result,
                    signal = tokio::signal::ctrl_c() => {
                        if let Err(e) = signal {
                            warn!("Could not listen for Ctrl-C: {}", e);
                            break (&mut round).await;
                        }
                        if control.cancel_current_round() {
                            println!("\n{}", "Interrupting round...".yellow());
                        } else {
                            debug!("Ctrl-C outside an active round");
                        }
                    }
                }
            }
        };

        match result {
            Ok(report) => Self::print_report(&report),
            Err(SessionError::Persistence(e)) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                if let Some(index) = self.session.pending_round() {
                    println!(
                        "Round {} was not saved. Use /retry to try again or /discard to drop it.",
                        index
                    );
                }
            }
            Err(e) => Self::print_error(&e),
        }
        println!();
    }

    fn print_report(report: &RoundReport) {
        println!();
        print!("{}", ConsoleFormatter::format_report(report));
    }

    fn print_error(error: &SessionError) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }
}
