//! Transcript model: the append-only message log of one simulation run.
//!
//! The transcript is owned by a single running simulation session. Ordering
//! is insertion order and is never reordered or mutated after append; the
//! whole log is cleared only when a simulation (re)starts.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::persona::{ModelProvider, Persona};

/// Kind of a transcript message.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Seed prompt or other engine-generated framing
    System,
    /// Injected by the human user
    User,
    /// Generated on behalf of a persona
    Agent,
}

/// A single message in a simulation transcript.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Message {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Message kind
    pub kind: MessageKind,
    /// Authoring persona id (set when kind is Agent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<String>,
    /// Authoring persona display name (set when kind is Agent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    /// Message text
    pub text: String,
    /// Timestamp when the message was appended (ISO 8601 format)
    pub timestamp: String,
    /// Provider that produced the reply (set when kind is Agent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelProvider>,
    /// Whether the reply came from a live model call (false for fallbacks)
    pub live: bool,
}

impl Message {
    /// Creates a system message (seed prompts, notices).
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: MessageKind::System,
            author_id: None,
            author_name: None,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            model: None,
            live: true,
        }
    }

    /// Creates a user-injected message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: MessageKind::User,
            author_id: None,
            author_name: None,
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            model: None,
            live: true,
        }
    }

    /// Creates an agent message attributed to `persona`.
    ///
    /// `live` records whether the text came from a live model call or a
    /// locally generated fallback.
    pub fn agent(persona: &Persona, text: impl Into<String>, live: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: MessageKind::Agent,
            author_id: Some(persona.id.clone()),
            author_name: Some(persona.name.clone()),
            text: text.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            model: Some(persona.provider),
            live,
        }
    }
}

/// Append-only ordered log of messages.
///
/// The single mutation operation is [`Transcript::push`]; [`Transcript::clear`]
/// is invoked only on simulation (re)start. All appends are serialized through
/// the turn engine's mutual exclusion, so no further writer protection exists
/// here.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message to the end of the log.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Clears the log. Used only when a new simulation starts.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// All messages, in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Number of messages in the log.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The non-system messages, in order: the conversation history as model
    /// adapters see it.
    pub fn conversation(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| m.kind != MessageKind::System)
    }

    /// The agent messages, in order.
    pub fn agent_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages
            .iter()
            .filter(|m| m.kind == MessageKind::Agent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{ModelProvider, PersonaSource};

    fn persona(name: &str) -> Persona {
        Persona {
            id: format!("{name}-id"),
            name: name.to_string(),
            provider: ModelProvider::Simulated,
            role: "Speaker".to_string(),
            traits: Vec::new(),
            knowledge: String::new(),
            attachments: Vec::new(),
            source: PersonaSource::User,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.push(Message::system("seed"));
        transcript.push(Message::agent(&persona("Ada"), "first", true));
        transcript.push(Message::user("a question"));
        transcript.push(Message::agent(&persona("Brin"), "second", false));

        let texts: Vec<&str> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["seed", "first", "a question", "second"]);
    }

    #[test]
    fn test_conversation_excludes_system_messages() {
        let mut transcript = Transcript::new();
        transcript.push(Message::system("seed"));
        transcript.push(Message::user("hello"));
        transcript.push(Message::agent(&persona("Ada"), "hi", true));

        assert_eq!(transcript.conversation().count(), 2);
        assert_eq!(transcript.agent_messages().count(), 1);
    }

    #[test]
    fn test_agent_message_attribution() {
        let p = persona("Ada");
        let message = Message::agent(&p, "hello", false);
        assert_eq!(message.kind, MessageKind::Agent);
        assert_eq!(message.author_id.as_deref(), Some("Ada-id"));
        assert_eq!(message.author_name.as_deref(), Some("Ada"));
        assert_eq!(message.model, Some(ModelProvider::Simulated));
        assert!(!message.live);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut transcript = Transcript::new();
        transcript.push(Message::system("seed"));
        transcript.clear();
        assert!(transcript.is_empty());
    }
}
