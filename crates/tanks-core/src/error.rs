//! Configuration validation errors.

use thiserror::Error;

use crate::types::RosterId;

/// A match configuration that cannot be played.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("a match needs at least two rosters, got {0}")]
    TooFewRosters(usize),
    #[error("at most 255 rosters are supported, got {0}")]
    TooManyRosters(usize),
    #[error("{0} has no tanks")]
    EmptyRoster(RosterId),
    #[error("number of rounds must be at least 1")]
    ZeroRounds,
    #[error("at most {max} rounds per match, got {rounds}")]
    TooManyRounds { rounds: u32, max: u32 },
    #[error("round duration must be above 0 and at most {max} s, got {secs} s")]
    InvalidRoundDuration { secs: f64, max: f64 },
    #[error("{name} must be a finite, non-negative number of seconds, got {value}")]
    InvalidDelay { name: &'static str, value: f64 },
    #[error("{roster} has {size} tanks, at most {max} are supported")]
    RosterTooLarge { roster: RosterId, size: usize, max: usize },
    #[error("starting health must be positive, got {0}")]
    InvalidStartingHealth(f32),
    #[error("team number {team} of {roster} is outside 1..={max}")]
    TeamNumberOutOfRange { roster: RosterId, team: u8, max: u8 },
    #[error("points per win must be positive, got {0}")]
    InvalidPointsPerWin(f32),
    #[error("round wins needed to take the match must be at least 1")]
    ZeroWinsToWin,
    #[error("{0} does not exist")]
    UnknownRoster(RosterId),
    #[error("{0} is made of player input maps and cannot be resized")]
    NotResizable(RosterId),
}
