//! Conclave core domain.
//!
//! Domain models for personas, environments, and transcripts; the prompt
//! builder; transcript export; and the trait seams for the external
//! collaborators (persona/environment/credential stores, identity provider).
//!
//! The simulation engine itself lives in `conclave-engine`, the model
//! adapter layer in `conclave-interaction`. This crate holds everything both
//! of them agree on.

pub mod environment;
pub mod error;
pub mod export;
pub mod persona;
pub mod prompt;
pub mod store;
pub mod transcript;
pub mod user;

// Re-export common error type
pub use error::{ConclaveError, Result};
