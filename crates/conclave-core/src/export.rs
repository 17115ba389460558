//! Transcript export.
//!
//! Produces a self-contained snapshot of an environment plus its transcript,
//! suitable for writing to a downloadable JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::Result;
use crate::transcript::{Message, Transcript};

/// A portable snapshot of one simulation run.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TranscriptExport {
    /// Environment name
    pub environment: String,
    /// Ordered participant display names
    pub participants: Vec<String>,
    /// The full ordered message list
    pub messages: Vec<Message>,
    /// Export timestamp (ISO 8601 format)
    pub exported_at: String,
}

/// Snapshots `environment` and `transcript` into an export document.
///
/// Always succeeds given an in-memory transcript; there is no partial or
/// streaming form.
pub fn export_transcript(environment: &Environment, transcript: &Transcript) -> TranscriptExport {
    TranscriptExport {
        environment: environment.name.clone(),
        participants: environment.participant_names(),
        messages: transcript.messages().to_vec(),
        exported_at: chrono::Utc::now().to_rfc3339(),
    }
}

impl TranscriptExport {
    /// Serializes the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Suggested download file name: the slugged environment name plus the
    /// export timestamp, e.g. `debate-night-20260807T101500Z.json`.
    pub fn suggested_file_name(&self) -> String {
        let slug: String = self
            .environment
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect::<String>()
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");

        let stamp: String = self
            .exported_at
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        format!("{slug}-{stamp}.json")
    }

    /// Writes the document as JSON to `path`.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
