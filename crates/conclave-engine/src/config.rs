//! Engine configuration.

use std::time::Duration;

/// Default number of auto-loop rounds.
pub const DEFAULT_ROUNDS: u32 = 5;

/// Default pacing delay between consecutive turns.
pub const DEFAULT_TURN_DELAY: Duration = Duration::from_millis(1500);

/// Tunables for the auto-loop scheduler.
///
/// The defaults match the product behavior (5 rounds, 1.5 s between turns).
/// Tests typically shrink the delay to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of rounds an uninterrupted auto-loop runs
    pub rounds: u32,
    /// Pacing delay between consecutive turns
    pub turn_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
            turn_delay: DEFAULT_TURN_DELAY,
        }
    }
}

impl EngineConfig {
    /// Overrides the round budget.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Overrides the pacing delay.
    pub fn with_turn_delay(mut self, turn_delay: Duration) -> Self {
        self.turn_delay = turn_delay;
        self
    }
}
