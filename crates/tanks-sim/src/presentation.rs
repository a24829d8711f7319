//! Text for the presentation layer: banners, tallies and result messages.

use tanks_core::constants::{GLYPH_ALIVE, GLYPH_DESTROYED};
use tanks_core::enums::{MatchOutcome, RoundOutcome};
use tanks_core::types::RosterId;

use crate::roster::Roster;

/// How round results are worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// Points and wins per roster.
    Points,
    /// Win counts only, shouted.
    Knockout,
}

pub fn round_banner(round: u32, num_of_rounds: u32) -> String {
    format!("Round {round}/{num_of_rounds}")
}

/// `Match n` followed by the pairing, e.g. `Human Team 1 vs AI Team 2`.
pub fn match_title(match_number: u32, rosters: &[Roster]) -> String {
    let pairing = rosters
        .iter()
        .map(|r| format!("{} Team {}", r.label(), r.team_number()))
        .collect::<Vec<_>>()
        .join(" vs ");
    format!("Match {match_number}\n{pairing}")
}

/// One skull per destroyed tank, one fuel pump per live tank, then the label.
pub fn tally_line(roster: &Roster) -> String {
    let left = roster.count_left().min(roster.size());
    let destroyed = roster.size() - left;
    let mut line: String = std::iter::repeat(GLYPH_DESTROYED)
        .take(destroyed as usize)
        .chain(std::iter::repeat(GLYPH_ALIVE).take(left as usize))
        .collect();
    line.push(' ');
    line.push_str(roster.label());
    line
}

fn label_of(rosters: &[Roster], id: RosterId) -> &str {
    rosters
        .get(id.index())
        .map(|r| r.label())
        .unwrap_or("?")
}

/// Message shown when round `round` ends, including the match result when
/// this round decided it.
pub fn round_end_message(
    style: MessageStyle,
    rosters: &[Roster],
    round: u32,
    outcome: RoundOutcome,
    match_outcome: Option<MatchOutcome>,
) -> String {
    match style {
        MessageStyle::Points => points_message(rosters, round, outcome, match_outcome),
        MessageStyle::Knockout => knockout_message(rosters, outcome, match_outcome),
    }
}

fn points_message(
    rosters: &[Roster],
    round: u32,
    outcome: RoundOutcome,
    match_outcome: Option<MatchOutcome>,
) -> String {
    let mut message = match (match_outcome, outcome) {
        (Some(MatchOutcome::Winner(id)), _) => {
            format!("{} Wins the Match\nafter {round} Rounds!", label_of(rosters, id))
        }
        (Some(MatchOutcome::Draw), _) => format!("Game Over!\nIt's a Draw after {round} Rounds!"),
        (None, RoundOutcome::Winner(id)) => format!("{} Wins Round {round}!", label_of(rosters, id)),
        (None, RoundOutcome::Draw) => format!("Round {round} is a Draw!"),
    };

    let index = round.saturating_sub(1) as usize;
    let round_points = rosters
        .iter()
        .map(|r| {
            let pts = r.round_points().get(index).copied().unwrap_or(0.0);
            format!("{}:  {pts}  Pts", r.label())
        })
        .collect::<Vec<_>>()
        .join("\t");
    message.push_str("\n\n");
    message.push_str(&round_points);
    message.push('\n');
    for r in rosters {
        message.push_str(&format!(
            "\n{} Acc. Score:  {}  Pts / {}  Wins",
            r.label(),
            r.accumulated_points(),
            r.wins()
        ));
    }
    message
}

fn knockout_message(
    rosters: &[Roster],
    outcome: RoundOutcome,
    match_outcome: Option<MatchOutcome>,
) -> String {
    let mut message = match (match_outcome, outcome) {
        (Some(MatchOutcome::Winner(id)), _) => format!("{} WINS THE GAME!", label_of(rosters, id)),
        (Some(MatchOutcome::Draw), _) => "GAME OVER!\nIT'S A DRAW!".to_string(),
        (_, RoundOutcome::Winner(id)) => format!("{} WINS THE ROUND!", label_of(rosters, id)),
        (_, RoundOutcome::Draw) => "DRAW!".to_string(),
    };
    message.push_str("\n\n");
    for r in rosters {
        message.push_str(&format!("\n{}: {} WINS", r.label(), r.wins()));
    }
    message
}
