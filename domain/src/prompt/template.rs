//! Prompt templates for the meeting flow

use crate::participant::entities::Participant;

/// Templates for generating prompts at each stage of a round
pub struct PromptTemplate;

/// Instructions for the two-line relevance reply format.
const RELEVANCE_FORMAT: &str = r#"You MUST respond in EXACTLY this format (two lines only):
DECISION: YES
SUMMARY: <one-sentence summary of what you want to say>

Or:
DECISION: NO
SUMMARY: <one-sentence reason you are passing>"#;

impl PromptTemplate {
    /// System prompt that puts a participant in character
    pub fn participant_system(participant: &Participant, meeting_title: &str) -> String {
        let mut prompt = format!(
            "You are {}, a participant in the meeting: \"{}\".\n\nRole: {}\nPersonality: {}\n",
            participant.name, meeting_title, participant.role, participant.personality
        );
        if !participant.description.is_empty() {
            prompt.push_str(&format!("Responsibility: {}\n", participant.description));
        }
        prompt.push_str(
            r#"
Guidelines:
- Stay in character at all times.
- Address other participants by name when responding to them.
- Be concise and focused. This is a multi-person meeting; keep your responses to 2-4 paragraphs unless the topic demands more detail.
- If you have nothing meaningful to add, say so briefly.
"#,
        );
        prompt
    }

    /// User prompt asking whether a participant wants to speak this round
    pub fn relevance_check(participant_name: &str, transcript: &str) -> String {
        format!(
            r#"Meeting transcript so far:

"""
{}
"""

{}, do you have something meaningful to contribute in response to the latest message? Consider whether your expertise is relevant and whether you can add a new perspective.

{}"#,
            transcript, participant_name, RELEVANCE_FORMAT
        )
    }

    /// User prompt asking a participant for its full contribution
    pub fn full_response(participant_name: &str, transcript: &str) -> String {
        format!(
            r#"Meeting transcript so far:

"""
{}
"""

It is now your turn to speak, {}. Respond to the discussion in character. Do not prefix your reply with your name."#,
            transcript, participant_name
        )
    }

    /// System prompt for the notes summarizer
    pub fn notes_system() -> &'static str {
        r#"You are a meeting notes assistant. You write short, factual notes about a meeting exchange.
Focus on decisions made, key arguments, action items, and open questions."#
    }

    /// User prompt for summarizing one round
    pub fn notes_prompt(meeting_title: &str, conversation_block: &str) -> String {
        format!(
            r#"Meeting: "{}"

Summarize the following meeting exchange into 3-5 concise bullet points.

Conversation:
"""
{}
"""

Respond with bullet points only, no preamble."#,
            meeting_title, conversation_block
        )
    }
}
