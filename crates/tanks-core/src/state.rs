//! Snapshot types published after every controller tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{Alert, PresentationEvent};
use crate::types::{Framing, RosterId, SimTime, TankId};

/// Complete view of the match after one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: PhaseKind,
    /// 1-based count of matches begun since start-up.
    pub match_number: u32,
    /// 1-based round of the current match, 0 between matches.
    pub round_number: u32,
    pub num_of_rounds: u32,
    pub timer: Option<TimerView>,
    pub rosters: Vec<RosterView>,
    pub tanks: Vec<TankView>,
    pub framing: Option<Framing>,
    /// Centre-screen message (banner, round result, match title).
    pub info_text: String,
    pub last_round: Option<RoundOutcome>,
    pub match_outcome: Option<MatchOutcome>,
    pub events: Vec<PresentationEvent>,
    pub alerts: Vec<Alert>,
    /// The export sink is misconfigured or failed on the last match.
    pub export_error: bool,
}

/// Round countdown as shown on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    /// `mm:ss`, floored.
    pub text: String,
    pub remaining_secs: f64,
    pub critical: bool,
}

/// One roster's standing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterView {
    pub id: RosterId,
    pub label: String,
    pub category: Category,
    pub team_number: u8,
    pub color_hex: String,
    pub size: u32,
    pub left: u32,
    pub round_points: Vec<f32>,
    pub accumulated_points: f32,
    pub wins: u32,
    pub tally: String,
}

/// One tank's state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub id: TankId,
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub health: f32,
    pub max_health: f32,
    pub active: bool,
    pub controls_enabled: bool,
}
