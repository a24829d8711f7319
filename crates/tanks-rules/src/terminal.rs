//! Round terminal conditions.

use tanks_core::enums::TerminalRule;

use crate::scoring::RosterTally;

/// Whether the live counts end the round under `rule`.
///
/// Counts must be freshly recomputed; the timer is handled by the phase machine.
pub fn terminal_reached(rule: TerminalRule, tallies: &[RosterTally]) -> bool {
    match rule {
        TerminalRule::AnyRosterEliminated => tallies.iter().any(|t| t.left == 0),
        // For single-tank rosters this is "at most one tank left".
        TerminalRule::LastTankStanding => tallies.iter().filter(|t| t.left > 0).count() <= 1,
    }
}
