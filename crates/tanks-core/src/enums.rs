//! Enumeration types used throughout the match engine.

use serde::{Deserialize, Serialize};

use crate::types::RosterId;

/// Who drives a roster's tanks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Human,
    #[default]
    Ai,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Human => "Human",
            Category::Ai => "AI",
        }
    }
}

/// Coarse phase of the match loop, as published to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Start options are shown; waiting for "continue" before round 1.
    #[default]
    Briefing,
    Starting,
    Playing,
    Ending,
    /// Post-match pause after cleanup.
    Intermission,
}

/// Outcome of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Winner(RosterId),
    Draw,
}

impl RoundOutcome {
    pub fn winner(&self) -> Option<RosterId> {
        match self {
            RoundOutcome::Winner(id) => Some(*id),
            RoundOutcome::Draw => None,
        }
    }
}

/// Outcome of a whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(RosterId),
    Draw,
}

impl MatchOutcome {
    pub fn winner(&self) -> Option<RosterId> {
        match self {
            MatchOutcome::Winner(id) => Some(*id),
            MatchOutcome::Draw => None,
        }
    }
}

/// How the Ending phase is left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum RoundEndMode {
    /// Wait indefinitely for a "continue" event.
    #[default]
    Acknowledge,
    /// Leave automatically after a fixed hold.
    AutoAfter { secs: f64 },
}

/// When a round in Playing is over, besides the timer running out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalRule {
    /// Any roster has no live tank left.
    #[default]
    AnyRosterEliminated,
    /// At most one live tank remains across all rosters.
    LastTankStanding,
}

/// Who earns kill-proportional credit in a round without a clean sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartialCredit {
    /// Every roster earns credit for the opponents it destroyed.
    #[default]
    Symmetric,
    /// Only the first registered roster earns partial credit.
    FirstRosterOnly,
}

/// Alert severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}
