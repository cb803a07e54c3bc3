//! Console output formatter for meetings

use colored::Colorize;
use roundtable_application::{MeetingListing, RoundReport, SkipReason};
use roundtable_domain::{
    MODERATOR, Meeting, Participant, ParticipantRoster, RelevanceVote, Round, Summary, Turn,
    util::preview,
};

const WIDTH: usize = 60;

/// Formats meetings, rounds and listings for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a complete meeting transcript
    pub fn format_transcript(meeting: &Meeting) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(meeting.title()));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Meeting:".cyan().bold(), meeting.id()));
        output.push_str(&format!(
            "{} {}\n",
            "Participants:".cyan().bold(),
            meeting
                .roster()
                .list()
                .iter()
                .map(|p| p.label())
                .collect::<Vec<_>>()
                .join(", ")
        ));

        if meeting.rounds().is_empty() {
            output.push_str(&format!("\n{}\n", "No rounds yet.".dimmed()));
        }

        for round in meeting.rounds() {
            output.push_str(&Self::format_round(round));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format one closed round: the moderator message, every turn and the notes
    pub fn format_round(round: &Round) -> String {
        let mut output = Self::section_header(&format!("Round {}", round.index));
        output.push_str(&format!(
            "\n{}\n{}\n",
            format!("── {} ──", MODERATOR).green().bold(),
            round.human_message
        ));

        for turn in &round.turns {
            output.push_str(&Self::format_turn(turn));
        }

        if round.is_interrupted() {
            output.push_str(&format!("\n{}\n", "(round interrupted)".yellow()));
        }

        if let Some(summary) = &round.summary {
            output.push_str(&format!("\n{}\n", "Notes:".cyan().bold()));
            output.push_str(&Self::indent(summary.as_str(), "  "));
            output.push('\n');
        }

        output
    }

    pub fn format_turn(turn: &Turn) -> String {
        format!(
            "\n{}\n{}\n",
            format!("── {} ──", turn.participant).yellow().bold(),
            turn.text
        )
    }

    /// One line per relevance vote, e.g. `  YES  Ada: I have a point.`
    pub fn format_vote(participant: &Participant, vote: &RelevanceVote) -> String {
        let tag = match vote {
            RelevanceVote::WantsToSpeak { .. } => vote.tag().green().bold(),
            RelevanceVote::Declines { .. } => vote.tag().dimmed(),
            RelevanceVote::TimedOut => vote.tag().red(),
        };
        format!("  {:<7} {}: {}", tag, participant.name, preview(vote.note(), 80))
    }

    pub fn format_speaking_order(order: &[&Participant]) -> String {
        if order.is_empty() {
            return format!("{}", "Nobody wants to speak this round.".dimmed());
        }
        format!(
            "{} {}",
            "Speaking order:".cyan().bold(),
            order
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(" → ")
        )
    }

    pub fn format_notes(index: u32, summary: &Summary) -> String {
        format!(
            "\n{}\n{}\n",
            format!("Notes for round {}:", index).cyan().bold(),
            Self::indent(summary.as_str(), "  ")
        )
    }

    /// Closing line for a round, preceded by its warnings
    pub fn format_report(report: &RoundReport) -> String {
        let mut output = String::new();

        for warning in &report.warnings {
            output.push_str(&format!("{} {}\n", "Warning:".yellow().bold(), warning));
        }

        let status = if report.is_interrupted() {
            format!("Round {} interrupted and saved", report.round.index).yellow()
        } else {
            format!("Round {} saved", report.round.index).green()
        };
        output.push_str(&format!(
            "{} ({} turn{})\n",
            status,
            report.round.turns.len(),
            if report.round.turns.len() == 1 { "" } else { "s" }
        ));
        output
    }

    pub fn format_skipped(participant: &str, reason: &SkipReason) -> String {
        format!("  {} {} skipped: {}", "x".red(), participant, reason)
    }

    /// Roster with roles, models and priorities
    pub fn format_participants(roster: &ParticipantRoster) -> String {
        let mut output = format!("{}\n", "Participants:".cyan().bold());
        for p in roster.list() {
            output.push_str(&format!(
                "  {} {} [{}] priority {}\n",
                "*".cyan(),
                p.label().bold(),
                p.model,
                p.priority
            ));
            if !p.description.is_empty() {
                output.push_str(&format!("    {}\n", p.description.dimmed()));
            }
        }
        output
    }

    /// All round notes of a meeting so far
    pub fn format_all_notes(meeting: &Meeting) -> String {
        let notes: Vec<String> = meeting
            .summaries()
            .map(|(index, summary)| Self::format_notes(index, summary))
            .collect();
        if notes.is_empty() {
            return format!("{}\n", "No notes yet.".dimmed());
        }
        notes.concat()
    }

    pub fn format_listing(listings: &[MeetingListing]) -> String {
        if listings.is_empty() {
            return format!("{}\n", "No saved meetings.".dimmed());
        }

        let mut output = format!("{}\n", "Saved meetings:".cyan().bold());
        for listing in listings {
            output.push_str(&format!(
                "  {}  {}  ({} rounds, {} turns, updated {})\n",
                listing.id.as_str().bold(),
                listing.title,
                listing.round_count,
                listing.turn_count,
                listing.updated_at
            ));
        }
        output
    }

    /// Format a meeting as JSON
    pub fn format_transcript_json(meeting: &Meeting) -> String {
        serde_json::to_string_pretty(meeting).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_listing_json(listings: &[MeetingListing]) -> String {
        serde_json::to_string_pretty(listings).unwrap_or_else(|_| "[]".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(WIDTH);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(WIDTH).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_application::SkippedTurn;
    use roundtable_domain::{MeetingConfig, MeetingId, Model, OpenRound, RoundOutcome};

    fn participant(name: &str, priority: u32) -> Participant {
        Participant::new(name, "Engineer", "calm", Model::new("gpt-4o"), priority)
    }

    fn meeting_with_round() -> Meeting {
        let roster = ParticipantRoster::new(vec![participant("Ada", 1), participant("Linus", 2)])
            .unwrap();
        let mut meeting = Meeting::new(
            MeetingId::new("meeting_1"),
            "Design review",
            MeetingConfig::default(),
            roster,
        )
        .unwrap();
        let mut open = meeting.open_round("What should we build?");
        open.push_turn("Ada", "A parser.");
        meeting
            .push_round(open.close(RoundOutcome::Completed, Some(Summary::new("Build a parser."))))
            .unwrap();
        meeting
    }

    // ==================== Transcript ====================

    #[test]
    fn test_transcript_contains_rounds_and_notes() {
        let text = ConsoleFormatter::format_transcript(&meeting_with_round());
        assert!(text.contains("Design review"));
        assert!(text.contains("meeting_1"));
        assert!(text.contains("Round 1"));
        assert!(text.contains("What should we build?"));
        assert!(text.contains("A parser."));
        assert!(text.contains("  Build a parser."));
    }

    #[test]
    fn test_interrupted_round_is_marked() {
        let mut open = OpenRound::new(2, "Next");
        open.push_turn("Ada", "Half a thought");
        let round = open.close(RoundOutcome::Interrupted, None);
        let text = ConsoleFormatter::format_round(&round);
        assert!(text.contains("(round interrupted)"));
        assert!(!text.contains("Notes:"));
    }

    #[test]
    fn test_transcript_json_is_valid() {
        let json = ConsoleFormatter::format_transcript_json(&meeting_with_round());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.is_object());
    }

    // ==================== Round display ====================

    #[test]
    fn test_vote_line() {
        let line = ConsoleFormatter::format_vote(
            &participant("Ada", 1),
            &RelevanceVote::WantsToSpeak {
                summary: "I have a point.".to_string(),
            },
        );
        assert!(line.contains("Ada: I have a point."));
    }

    #[test]
    fn test_empty_speaking_order() {
        let text = ConsoleFormatter::format_speaking_order(&[]);
        assert!(text.contains("Nobody wants to speak"));
    }

    #[test]
    fn test_skipped_line() {
        let line = ConsoleFormatter::format_skipped("Linus", &SkipReason::EmptyResponse);
        assert!(line.contains("Linus skipped"));
    }

    #[test]
    fn test_report_lists_warnings() {
        let mut open = OpenRound::new(3, "Go");
        open.push_turn("Ada", "Done");
        let report = RoundReport {
            round: open.close(RoundOutcome::Completed, None),
            warnings: vec![roundtable_application::SessionWarning::SummaryUnavailable(
                "timed out".to_string(),
            )],
            skipped: vec![SkippedTurn {
                participant: "Linus".to_string(),
                reason: SkipReason::TimedOut,
            }],
        };
        let text = ConsoleFormatter::format_report(&report);
        assert!(text.contains("summary unavailable: timed out"));
        assert!(text.contains("Round 3 saved"));
        assert!(text.contains("(1 turn)"));
    }

    // ==================== Listings ====================

    #[test]
    fn test_empty_listing() {
        assert!(ConsoleFormatter::format_listing(&[]).contains("No saved meetings"));
        assert_eq!(ConsoleFormatter::format_listing_json(&[]), "[]");
    }

    #[test]
    fn test_listing_rows() {
        let listing = MeetingListing {
            id: MeetingId::new("meeting_1"),
            title: "Design review".to_string(),
            created_at: "2025-01-01T09:00:00+00:00".to_string(),
            updated_at: "2025-01-01T10:00:00+00:00".to_string(),
            round_count: 2,
            turn_count: 5,
        };
        let text = ConsoleFormatter::format_listing(&[listing]);
        assert!(text.contains("Design review"));
        assert!(text.contains("(2 rounds, 5 turns"));
    }

    #[test]
    fn test_all_notes_when_none() {
        let roster = ParticipantRoster::new(vec![participant("Ada", 1), participant("Linus", 2)])
            .unwrap();
        let meeting =
            Meeting::new(MeetingId::new("m"), "t", MeetingConfig::default(), roster).unwrap();
        assert!(ConsoleFormatter::format_all_notes(&meeting).contains("No notes yet"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "> "), "> a\n> b");
    }
}
