//! Participant entity

use crate::core::model::Model;
use serde::{Deserialize, Serialize};

/// An AI participant in a meeting (Entity)
///
/// Identified by `name`. Created during meeting setup and never mutated
/// while the meeting runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Display name, unique within a roster
    pub name: String,
    /// Role in the meeting (e.g., "Product Manager")
    pub role: String,
    /// Personality traits that shape the participant's voice
    pub personality: String,
    /// Responsibility description
    #[serde(default)]
    pub description: String,
    /// Backing model
    pub model: Model,
    /// Speaking priority; lower speaks first among interested participants
    pub priority: u32,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        personality: impl Into<String>,
        model: Model,
        priority: u32,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            personality: personality.into(),
            description: String::new(),
            model,
            priority,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Label used in listings, e.g. "Alice (Architect)"
    pub fn label(&self) -> String {
        if self.role.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.role)
        }
    }
}
