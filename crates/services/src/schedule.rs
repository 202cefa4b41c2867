//! Delayed commands handed back to the runtime for later delivery.
//!
//! Sessions never sleep themselves. They return a [`ScheduledTask`] tagged
//! with the round it belongs to; the runtime waits out the delay and feeds
//! the task back through `Trainer::fire`, which drops anything whose round
//! has since ended.

use std::time::Duration;

/// Monotonic identifier for one session round. Bumped whenever a round ends
/// or the active section changes, invalidating in-flight tasks.
pub type RoundId = u64;

pub const VOCALIZE_DELAY: Duration = Duration::from_millis(500);
pub const ADVANCE_DELAY: Duration = Duration::from_millis(2000);
pub const RETURN_HOME_DELAY: Duration = Duration::from_millis(3000);

/// What to do when the delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelayedCommand {
    /// Speak the given text.
    Vocalize(String),
    /// Move the active challenge to its next question or summary.
    Advance,
    /// Leave the finished session and return to the home section.
    ReturnHome,
}

/// A command due after `delay`, valid only while `round` is current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    pub round: RoundId,
    pub delay: Duration,
    pub command: DelayedCommand,
}

impl ScheduledTask {
    #[must_use]
    pub fn new(round: RoundId, delay: Duration, command: DelayedCommand) -> Self {
        Self {
            round,
            delay,
            command,
        }
    }
}
