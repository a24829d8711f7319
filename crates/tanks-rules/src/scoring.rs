//! Round and match scoring strategies.
//!
//! The match controller is parametrized with one `RoundScoring` strategy,
//! built from the configured `ScoringPolicy`. Strategies see only plain
//! per-roster counts and standings, listed in registration order. Where a
//! strategy has to pick one roster among several candidates, the first in
//! registration order wins the tie.

use tanks_core::config::ScoringPolicy;
use tanks_core::enums::{MatchOutcome, PartialCredit, RoundOutcome};
use tanks_core::types::RosterId;

/// Point totals closer than this are level. Totals are sums of `f32`
/// fractions, so equal records can differ in the last bits.
const TIE_TOLERANCE: f32 = 1e-4;

/// Live count of one roster at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterTally {
    pub roster: RosterId,
    pub size: u32,
    pub left: u32,
}

impl RosterTally {
    pub fn destroyed(&self) -> u32 {
        self.size.saturating_sub(self.left)
    }
}

/// Match standing of one roster after the current round was recorded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standing {
    pub roster: RosterId,
    pub accumulated_points: f32,
    pub wins: u32,
}

/// What a round is worth to each roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResolution {
    pub outcome: RoundOutcome,
    /// Points per roster, aligned with the tallies passed in.
    /// `None` when the policy does not score rounds with points.
    pub points: Option<Vec<f32>>,
}

/// A round/match scoring strategy.
pub trait RoundScoring: Send {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Decide the round from freshly recomputed counts.
    fn resolve_round(&self, tallies: &[RosterTally]) -> RoundResolution;

    /// Decide whether the match is over after `round` of `num_of_rounds`.
    fn match_outcome(
        &self,
        standings: &[Standing],
        round: u32,
        num_of_rounds: u32,
    ) -> Option<MatchOutcome>;
}

/// Build the strategy for a configured policy.
pub fn scoring_for(policy: &ScoringPolicy) -> Box<dyn RoundScoring> {
    match *policy {
        ScoringPolicy::PointsProportional {
            points_per_win,
            partial_credit,
        } => Box::new(PointsProportional {
            points_per_win,
            partial_credit,
        }),
        ScoringPolicy::WinnerTakesRound { wins_to_win } => {
            Box::new(WinnerTakesRound { wins_to_win })
        }
    }
}

/// The only roster with live tanks, if exactly one remains.
fn sole_survivor(tallies: &[RosterTally]) -> Option<RosterId> {
    let mut alive = tallies.iter().filter(|t| t.left > 0);
    match (alive.next(), alive.next()) {
        (Some(t), None) => Some(t.roster),
        _ => None,
    }
}

/// Points accumulate over a fixed number of rounds.
///
/// A roster that leaves every opponent without a live tank earns the full
/// `points_per_win` and the round win. Every other roster eligible for
/// partial credit earns `points_per_win * destroyed / opponents`, counted
/// over all of its opponents. When no roster has a live tank the round is
/// a draw and nobody earns the win.
#[derive(Debug, Clone, Copy)]
pub struct PointsProportional {
    pub points_per_win: f32,
    pub partial_credit: PartialCredit,
}

impl PointsProportional {
    fn partial(&self, index: usize, tallies: &[RosterTally]) -> f32 {
        if self.partial_credit == PartialCredit::FirstRosterOnly && index != 0 {
            return 0.0;
        }
        let (destroyed, size) = tallies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != index)
            .fold((0u32, 0u32), |(d, s), (_, t)| (d + t.destroyed(), s + t.size));
        if size == 0 {
            return 0.0;
        }
        self.points_per_win * destroyed as f32 / size as f32
    }
}

impl RoundScoring for PointsProportional {
    fn name(&self) -> &'static str {
        "points-proportional"
    }

    fn resolve_round(&self, tallies: &[RosterTally]) -> RoundResolution {
        let winner = sole_survivor(tallies);
        let points = tallies
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if Some(t.roster) == winner {
                    self.points_per_win
                } else {
                    self.partial(i, tallies)
                }
            })
            .collect();
        RoundResolution {
            outcome: winner.map_or(RoundOutcome::Draw, RoundOutcome::Winner),
            points: Some(points),
        }
    }

    /// Decided only after the last round. The roster whose accumulated
    /// points exceed every other total by at least `TIE_TOLERANCE` wins;
    /// totals within the tolerance of the best count as level, so the
    /// match is then a draw.
    fn match_outcome(
        &self,
        standings: &[Standing],
        round: u32,
        num_of_rounds: u32,
    ) -> Option<MatchOutcome> {
        if round < num_of_rounds {
            return None;
        }
        Some(strictly_greatest(standings, |s| s.accumulated_points))
    }
}

/// The surviving roster takes the round; rounds carry no points.
///
/// The match ends as soon as a roster reaches `wins_to_win`, and at the
/// latest after `num_of_rounds`, where the strictly greatest win count
/// takes the match.
#[derive(Debug, Clone, Copy)]
pub struct WinnerTakesRound {
    pub wins_to_win: Option<u32>,
}

impl RoundScoring for WinnerTakesRound {
    fn name(&self) -> &'static str {
        "winner-takes-round"
    }

    fn resolve_round(&self, tallies: &[RosterTally]) -> RoundResolution {
        let outcome = tallies
            .iter()
            .find(|t| t.left > 0)
            .map_or(RoundOutcome::Draw, |t| RoundOutcome::Winner(t.roster));
        RoundResolution {
            outcome,
            points: None,
        }
    }

    fn match_outcome(
        &self,
        standings: &[Standing],
        round: u32,
        num_of_rounds: u32,
    ) -> Option<MatchOutcome> {
        if let Some(target) = self.wins_to_win {
            if let Some(s) = standings.iter().find(|s| s.wins >= target) {
                return Some(MatchOutcome::Winner(s.roster));
            }
        }
        if round < num_of_rounds {
            return None;
        }
        Some(strictly_greatest(standings, |s| s.wins as f32))
    }
}

/// The single roster whose key is strictly greater than every other, else a draw.
fn strictly_greatest(standings: &[Standing], key: impl Fn(&Standing) -> f32) -> MatchOutcome {
    let Some(best) = standings
        .iter()
        .map(&key)
        .fold(None, |acc: Option<f32>, v| Some(acc.map_or(v, |a| a.max(v))))
    else {
        return MatchOutcome::Draw;
    };
    let mut leaders = standings
        .iter()
        .filter(|s| (key(s) - best).abs() < TIE_TOLERANCE);
    match (leaders.next(), leaders.next()) {
        (Some(s), None) => MatchOutcome::Winner(s.roster),
        _ => MatchOutcome::Draw,
    }
}
