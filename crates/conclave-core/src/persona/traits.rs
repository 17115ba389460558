//! Fixed trait taxonomy for persona authoring.
//!
//! The taxonomy is known at build time: six categories, six trait names each.
//! A persona carries an ordered set of trait assignments, at most one
//! intensity per (category, trait) pair.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The six trait categories available to persona authors.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    /// Emotional baseline and reactivity
    Temperament,
    /// How the persona relates to others
    Sociability,
    /// Thinking and reasoning style
    Cognition,
    /// How the persona phrases things
    Expression,
    /// What the persona holds important
    Values,
    /// General outlook on the world
    Disposition,
}

impl TraitCategory {
    /// Returns the six trait names defined for this category.
    pub fn trait_names(self) -> [&'static str; 6] {
        match self {
            TraitCategory::Temperament => {
                ["calm", "excitable", "patient", "impulsive", "stoic", "anxious"]
            }
            TraitCategory::Sociability => {
                ["outgoing", "reserved", "empathetic", "blunt", "charming", "aloof"]
            }
            TraitCategory::Cognition => {
                ["analytical", "intuitive", "curious", "skeptical", "imaginative", "methodical"]
            }
            TraitCategory::Expression => {
                ["verbose", "concise", "formal", "playful", "poetic", "direct"]
            }
            TraitCategory::Values => {
                ["honest", "loyal", "ambitious", "cautious", "idealistic", "pragmatic"]
            }
            TraitCategory::Disposition => {
                ["optimistic", "cynical", "humorous", "serious", "agreeable", "contrarian"]
            }
        }
    }

    /// Whether `name` is a known trait in this category (case-insensitive).
    pub fn contains(self, name: &str) -> bool {
        self.trait_names()
            .iter()
            .any(|t| t.eq_ignore_ascii_case(name))
    }
}

/// How strongly a trait applies to a persona.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TraitIntensity {
    Weak,
    Neutral,
    Strong,
}

impl Default for TraitIntensity {
    fn default() -> Self {
        TraitIntensity::Neutral
    }
}

impl TraitIntensity {
    /// The adverb used when rendering this intensity into a system prompt.
    pub fn adverb(self) -> &'static str {
        match self {
            TraitIntensity::Weak => "slightly",
            TraitIntensity::Neutral => "moderately",
            TraitIntensity::Strong => "very",
        }
    }
}

/// A single trait selection on a persona.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TraitAssignment {
    /// Category the trait belongs to
    pub category: TraitCategory,
    /// Trait name within the category
    pub name: String,
    /// Assigned intensity; missing values fall back to `Neutral`
    #[serde(default)]
    pub intensity: TraitIntensity,
}

impl TraitAssignment {
    /// Creates an assignment with an explicit intensity.
    pub fn new(category: TraitCategory, name: impl Into<String>, intensity: TraitIntensity) -> Self {
        Self {
            category,
            name: name.into(),
            intensity,
        }
    }
}
