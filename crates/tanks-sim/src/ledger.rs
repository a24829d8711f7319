//! Result ledger: one mutable record per match, addressed by a stable index.
//!
//! A record is appended when a match is set up, then amended in place as
//! rounds finish (elapsed time) and once more when the match concludes
//! (final points). Records are never removed or reordered.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LedgerError;

/// A side as registered when the match begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    pub label: String,
    pub number: u8,
    pub size: u32,
}

/// Final standing of a side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub accumulated_points: f32,
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub label: String,
    pub number: u8,
    pub size: u32,
    pub accumulated_points: f32,
    pub wins: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub index: usize,
    pub match_number: u32,
    pub teams: Vec<TeamRecord>,
    pub num_of_rounds: u32,
    pub rounds_played: u32,
    pub accumulated_secs: f64,
    /// Final points have been written.
    pub finalized: bool,
    /// Closed early because a later round could not be set up.
    #[serde(default)]
    pub abandoned: bool,
}

impl MatchRecord {
    pub fn accumulated_minutes(&self) -> f64 {
        self.accumulated_secs / 60.0
    }
}

/// Append-only store of match records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultLedger {
    records: Vec<MatchRecord>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a match that is starting. Returns its index.
    pub fn add_result(&mut self, match_number: u32, teams: &[TeamEntry], num_of_rounds: u32) -> usize {
        let index = self.records.len();
        self.records.push(MatchRecord {
            index,
            match_number,
            teams: teams
                .iter()
                .map(|t| TeamRecord {
                    label: t.label.clone(),
                    number: t.number,
                    size: t.size,
                    accumulated_points: 0.0,
                    wins: 0,
                })
                .collect(),
            num_of_rounds,
            rounds_played: 0,
            accumulated_secs: 0.0,
            finalized: false,
            abandoned: false,
        });
        debug!(index, match_number, "ledger record added");
        index
    }

    /// Add `delta` seconds to a record's running time (the last record if
    /// `index` is `None`). Returns the new total.
    pub fn accumulate_time(&mut self, delta: f64, index: Option<usize>) -> Result<f64, LedgerError> {
        let record = self.record_mut(index)?;
        record.accumulated_secs += delta.max(0.0);
        Ok(record.accumulated_secs)
    }

    /// Overwrite a record's final standings (the last record if `index` is `None`).
    pub fn amend_final_score(
        &mut self,
        scores: &[TeamScore],
        rounds_played: u32,
        index: Option<usize>,
    ) -> Result<(), LedgerError> {
        let record = self.record_mut(index)?;
        if scores.len() != record.teams.len() {
            return Err(LedgerError::TeamCountMismatch {
                index: record.index,
                expected: record.teams.len(),
                got: scores.len(),
            });
        }
        for (team, score) in record.teams.iter_mut().zip(scores) {
            team.accumulated_points = score.accumulated_points;
            team.wins = score.wins;
        }
        record.rounds_played = rounds_played;
        record.finalized = true;
        Ok(())
    }

    /// Close a record whose match stopped before its last round, keeping
    /// the standings reached so far.
    pub fn abandon(
        &mut self,
        scores: &[TeamScore],
        rounds_played: u32,
        index: Option<usize>,
    ) -> Result<(), LedgerError> {
        self.amend_final_score(scores, rounds_played, index)?;
        let record = self.record_mut(index)?;
        record.abandoned = true;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&MatchRecord> {
        self.records.get(index)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.records.len().checked_sub(1)
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record_mut(&mut self, index: Option<usize>) -> Result<&mut MatchRecord, LedgerError> {
        let index = match index {
            Some(i) => i,
            None => self.last_index().ok_or(LedgerError::Empty)?,
        };
        self.records
            .get_mut(index)
            .ok_or(LedgerError::UnknownIndex(index))
    }
}
