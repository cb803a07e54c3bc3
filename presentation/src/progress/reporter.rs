//! Progress reporting for meeting rounds
//!
//! Both reporters print the round as it unfolds: votes, the speaking order,
//! each turn and the notes. [`ProgressReporter`] adds a spinner while a
//! participant is thinking.

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use roundtable_application::{MeetingProgressNotifier, SkipReason};
use roundtable_domain::{MeetingPhase, Participant, RelevanceVote, Summary, Turn};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with indicatif spinners
pub struct ProgressReporter {
    multi: MultiProgress,
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, prefix: &str, message: String) {
        self.finish_spinner();
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix.to_string());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn finish_spinner(&self) {
        if let Some(pb) = self
            .spinner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            pb.finish_and_clear();
        }
    }

    /// Print a line without tearing the active spinner
    fn println(&self, line: &str) {
        self.multi.suspend(|| println!("{}", line));
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingProgressNotifier for ProgressReporter {
    fn on_phase(&self, phase: MeetingPhase) {
        match phase {
            MeetingPhase::Summarizing => {
                self.start_spinner("Notes", "summarizing the round...".to_string())
            }
            MeetingPhase::Polling | MeetingPhase::Scheduling => {}
            _ => self.finish_spinner(),
        }
    }

    fn on_round_start(&self, index: u32, participant_count: usize) {
        self.println(&format!("\n{}", format!("Round {}", index).cyan().bold()));
        self.start_spinner(
            "Relevance",
            format!("asking {} participants...", participant_count),
        );
    }

    fn on_vote(&self, participant: &Participant, vote: &RelevanceVote) {
        self.println(&ConsoleFormatter::format_vote(participant, vote));
    }

    fn on_speaking_order(&self, order: &[&Participant]) {
        self.finish_spinner();
        println!("{}", ConsoleFormatter::format_speaking_order(order));
    }

    fn on_turn_start(&self, participant: &Participant) {
        self.start_spinner(&participant.name, "is thinking...".to_string());
    }

    fn on_turn_complete(&self, turn: &Turn) {
        self.finish_spinner();
        print!("{}", ConsoleFormatter::format_turn(turn));
    }

    fn on_turn_skipped(&self, participant: &Participant, reason: &SkipReason) {
        self.finish_spinner();
        println!("{}", ConsoleFormatter::format_skipped(&participant.name, reason));
    }

    fn on_summary(&self, index: u32, summary: &Summary) {
        self.finish_spinner();
        print!("{}", ConsoleFormatter::format_notes(index, summary));
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl MeetingProgressNotifier for SimpleProgress {
    fn on_round_start(&self, index: u32, _participant_count: usize) {
        println!("\n{} {}", "->".cyan(), format!("Round {}", index).bold());
    }

    fn on_vote(&self, participant: &Participant, vote: &RelevanceVote) {
        println!("{}", ConsoleFormatter::format_vote(participant, vote));
    }

    fn on_speaking_order(&self, order: &[&Participant]) {
        println!("{}", ConsoleFormatter::format_speaking_order(order));
    }

    fn on_turn_complete(&self, turn: &Turn) {
        print!("{}", ConsoleFormatter::format_turn(turn));
    }

    fn on_turn_skipped(&self, participant: &Participant, reason: &SkipReason) {
        println!("{}", ConsoleFormatter::format_skipped(&participant.name, reason));
    }

    fn on_summary(&self, index: u32, summary: &Summary) {
        print!("{}", ConsoleFormatter::format_notes(index, summary));
    }
}
