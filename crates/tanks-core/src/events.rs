//! Events emitted by the match controller for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{RosterId, TankId};

/// Presentation events, drained into every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PresentationEvent {
    /// Rosters were built for a new match.
    MatchSetup { match_number: u32, title: String },
    /// "Round n/N" banner shown while the round is starting.
    RoundBanner { round: u32, text: String },
    /// Controls were enabled; the round is live.
    RoundStarted { round: u32 },
    /// A tank's health reached zero.
    TankDestroyed { tank: TankId },
    /// A roster's live count changed.
    TallyChanged {
        roster: RosterId,
        left: u32,
        tally: String,
    },
    /// The round reached its terminal condition and was scored.
    RoundEnded {
        round: u32,
        outcome: RoundOutcome,
        message: String,
    },
    /// The match was finalized and cleaned up.
    MatchEnded {
        match_number: u32,
        outcome: MatchOutcome,
    },
}

/// Alert for the UI alert queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
