//! SimulatedAdapter - offline provider producing canned in-character replies.
//!
//! Makes no network calls. Doubles as the source of fallback text when a
//! live provider call fails: the turn engine keeps one per participant.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use conclave_core::persona::{ModelProvider, Persona};

use crate::adapter::{AdapterError, ModelAdapter, TurnRequest};

/// Generic in-character filler lines. `{name}` and `{role}` are substituted
/// with the persona's fields; the exact wording is cosmetic.
const FILLER_TEMPLATES: [&str; 5] = [
    "{name} nods thoughtfully. \"As {role}, I see this a little differently.\"",
    "{name} considers the point. \"That lines up with what I've seen as {role}.\"",
    "{name} leans in. \"Let me push back on that for a moment, speaking as {role}.\"",
    "{name} takes a breath. \"There's more to this than it seems, and my work as {role} tells me so.\"",
    "{name} pauses before replying. \"I'd want to look at that more closely, given my experience as {role}.\"",
];

/// Adapter that fabricates replies locally instead of calling a provider.
#[derive(Clone)]
pub struct SimulatedAdapter {
    name: String,
    role: String,
}

impl SimulatedAdapter {
    /// Creates an adapter speaking for the named persona.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }

    /// Convenience constructor from a persona record.
    pub fn for_persona(persona: &Persona) -> Self {
        Self::new(persona.name.clone(), persona.role.clone())
    }

    fn render(&self, template: &str) -> String {
        template
            .replace("{name}", &self.name)
            .replace("{role}", &self.role)
    }
}

#[async_trait]
impl ModelAdapter for SimulatedAdapter {
    fn provider(&self) -> ModelProvider {
        ModelProvider::Simulated
    }

    async fn generate_reply(&self, _request: &TurnRequest) -> Result<String, AdapterError> {
        let template = FILLER_TEMPLATES
            .choose(&mut rand::thread_rng())
            .unwrap_or(&FILLER_TEMPLATES[0]);
        Ok(self.render(template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_references_persona() {
        let adapter = SimulatedAdapter::new("Ada", "a mathematician");
        let reply = adapter
            .generate_reply(&TurnRequest::new("sys", Vec::new()))
            .await
            .unwrap();

        assert!(reply.contains("Ada"));
        assert!(reply.contains("a mathematician"));
    }

    #[test]
    fn test_every_template_references_name_and_role() {
        for template in FILLER_TEMPLATES {
            assert!(template.contains("{name}"), "template missing name: {template}");
            assert!(template.contains("{role}"), "template missing role: {template}");
        }
    }
}
