//! Commands sent from the host to the match controller.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::{RosterId, TankId};

/// All inputs the match controller accepts from outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchCommand {
    // --- Flow ---
    /// The discrete "continue" acknowledgement (start match, next round).
    Continue,

    // --- Combat collaborator ---
    /// A shell hit a tank for `amount` health.
    DamageTank { tank: TankId, amount: f32 },

    // --- Start options (honoured between matches only) ---
    SetNumOfRounds { rounds: u32 },
    SetMinutesPerRound { minutes: f64 },
    /// Resize a fixed-size roster.
    SetRosterSize { roster: RosterId, size: u32 },
    SetTeamNumber { roster: RosterId, team: u8 },
}

impl MatchCommand {
    /// Whether this command edits match options rather than driving play.
    pub fn is_option(&self) -> bool {
        matches!(
            self,
            MatchCommand::SetNumOfRounds { .. }
                | MatchCommand::SetMinutesPerRound { .. }
                | MatchCommand::SetRosterSize { .. }
                | MatchCommand::SetTeamNumber { .. }
        )
    }
}
