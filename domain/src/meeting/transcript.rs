//! Rendering of the transcript-so-far.
//!
//! Every participant invocation receives an immutable text snapshot built
//! here, so no reader ever sees a half-written turn.

use super::round::{OpenRound, Round, Turn};

/// Author label used for the human moderator's messages.
pub const MODERATOR: &str = "Moderator";

fn push_line(out: &mut String, author: &str, text: &str) {
    out.push('[');
    out.push_str(author);
    out.push_str("]: ");
    out.push_str(text.trim());
    out.push_str("\n\n");
}

fn push_exchange(out: &mut String, human_message: &str, turns: &[Turn]) {
    push_line(out, MODERATOR, human_message);
    for turn in turns {
        push_line(out, &turn.participant, &turn.text);
    }
}

/// Render closed rounds followed by the open round, including turns already
/// produced in it.
pub fn render_transcript(closed: &[Round], current: &OpenRound) -> String {
    let mut out = String::new();
    for round in closed {
        out.push_str(&format!("=== Round {} ===\n", round.index));
        push_exchange(&mut out, &round.human_message, &round.turns);
        if round.is_interrupted() {
            out.push_str("(round interrupted by the moderator)\n\n");
        }
    }
    out.push_str(&format!("=== Round {} (current) ===\n", current.index()));
    push_exchange(&mut out, current.human_message(), current.turns());
    out.trim_end().to_string()
}

/// Render a single round's exchange, used as input for notes.
pub fn render_round(round: &Round) -> String {
    let mut out = String::new();
    push_exchange(&mut out, &round.human_message, &round.turns);
    out.trim_end().to_string()
}
