//! Error types for match setup, roster bookkeeping, the ledger and export.

use thiserror::Error;

use tanks_core::error::ConfigError;
use tanks_core::types::RosterId;

/// Fatal errors raised while setting up a match or a round.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("spawn surface has no valid placement")]
    DegenerateSpawnSurface,
    #[error("spawn provider returned {got} placements for {roster}, expected {expected}")]
    PlacementCount {
        roster: RosterId,
        expected: usize,
        got: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RosterError {
    #[error("round index {index} is outside the {len} rounds of {roster}")]
    RoundOutOfRange {
        roster: RosterId,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("the result ledger has no records")]
    Empty,
    #[error("no match record at index {0}")]
    UnknownIndex(usize),
    #[error("match record {index} has {expected} teams, got {got} scores")]
    TeamCountMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
}

/// Non-fatal errors of the export sink.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("export serialization: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid export configuration: {0}")]
    InvalidConfig(String),
    #[error("export timestamp: {0}")]
    Timestamp(String),
}

/// Anything that stops the match controller from advancing.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("match setup failed: {0}")]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
