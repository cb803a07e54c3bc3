//! Relevance reply parsing.
//!
//! Participants answer the relevance check in a two-line format:
//!
//! ```text
//! DECISION: YES
//! SUMMARY: <one-sentence summary of what I want to say>
//! ```
//!
//! Parsing is lenient about case and surrounding chatter but conservative:
//! a reply without an explicit `YES` declines.

use super::vote::RelevanceVote;

const DECISION_KEY: &str = "DECISION:";
const SUMMARY_KEY: &str = "SUMMARY:";

/// Find `key` (case-insensitive) in `line` and return the trimmed remainder.
fn value_after<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let upper = line.to_ascii_uppercase();
    upper
        .find(key)
        .map(|idx| line[idx + key.len()..].trim())
}

/// Parse a participant's relevance reply into a vote.
///
/// The first `DECISION:` line decides; the first `SUMMARY:` line supplies
/// the summary or reason, falling back to the whole trimmed reply.
pub fn parse_relevance_reply(reply: &str) -> RelevanceVote {
    let decision = reply.lines().find_map(|l| value_after(l, DECISION_KEY));
    let summary = reply
        .lines()
        .find_map(|l| value_after(l, SUMMARY_KEY))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| reply.trim())
        .to_string();

    let wants = decision.is_some_and(|d| {
        d.split_whitespace()
            .next()
            .map(|w| w.trim_matches(|c: char| !c.is_ascii_alphabetic()))
            .is_some_and(|w| w.eq_ignore_ascii_case("YES"))
    });

    if wants {
        RelevanceVote::WantsToSpeak { summary }
    } else {
        RelevanceVote::Declines { reason: summary }
    }
}
