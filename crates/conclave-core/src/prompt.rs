//! System prompt construction for personas.
//!
//! Pure string assembly, no I/O. The output is the `system` instruction sent
//! alongside every model request for a persona.

use crate::persona::Persona;

/// Builds the model-ready system instruction for a persona.
///
/// Renders, in order: an identity line, the trait block (one
/// "<adverb> <trait>" entry per assignment), the knowledge block verbatim,
/// and a closing character-adherence instruction. Sections without content
/// are omitted entirely, headers included.
pub fn build_system_prompt(persona: &Persona) -> String {
    let mut prompt = format!("You are {}, {}.", persona.name, persona.role);

    if !persona.traits.is_empty() {
        prompt.push_str("\n\nYour personality traits:\n");
        for assignment in &persona.traits {
            prompt.push_str(&format!(
                "- You are {} {}.\n",
                assignment.intensity.adverb(),
                assignment.name.to_lowercase()
            ));
        }
    }

    let knowledge = persona.knowledge.trim();
    if !knowledge.is_empty() {
        prompt.push_str("\n\nYour background and knowledge:\n");
        prompt.push_str(knowledge);
    }

    prompt.push_str(
        "\n\nStay in character at all times. Speak only as this persona would, \
         in the first person, and never mention that you are an AI model.",
    );

    prompt
}
