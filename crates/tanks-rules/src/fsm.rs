//! Round phase finite state machine.
//!
//! `advance` is a pure transition function from the current phase and the
//! inputs of one scheduling tick to the next phase. The match controller
//! owns the side effects that run when a phase is entered or left.

use serde::{Deserialize, Serialize};

use tanks_core::config::MatchConfig;
use tanks_core::enums::{PhaseKind, RoundEndMode};

/// The phase of the match loop, carrying only the data that phase needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Between matches: start options are editable.
    Briefing,
    /// Round setup done, holding before controls are enabled.
    Starting { delay_left: f64 },
    /// Round is live. `time_left` is `None` for untimed rounds.
    Playing { time_left: Option<f64>, elapsed: f64 },
    /// Round is scored. `hold_left` is `None` when waiting for "continue".
    Ending {
        round_elapsed: f64,
        hold_left: Option<f64>,
    },
    /// Short pause after match cleanup.
    Intermission { delay_left: f64 },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Briefing => PhaseKind::Briefing,
            Phase::Starting { .. } => PhaseKind::Starting,
            Phase::Playing { .. } => PhaseKind::Playing,
            Phase::Ending { .. } => PhaseKind::Ending,
            Phase::Intermission { .. } => PhaseKind::Intermission,
        }
    }
}

/// Phase durations, taken from the match configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseTiming {
    pub round_start_delay_secs: f64,
    pub round_duration_secs: Option<f64>,
    pub round_end: RoundEndMode,
    pub intermission_secs: f64,
    pub await_start: bool,
}

impl From<&MatchConfig> for PhaseTiming {
    fn from(config: &MatchConfig) -> Self {
        Self {
            round_start_delay_secs: config.round_start_delay_secs,
            round_duration_secs: config.round_duration_secs,
            round_end: config.round_end,
            intermission_secs: config.intermission_secs,
            await_start: config.await_start,
        }
    }
}

impl PhaseTiming {
    pub fn starting(&self) -> Phase {
        Phase::Starting {
            delay_left: self.round_start_delay_secs,
        }
    }

    pub fn playing(&self) -> Phase {
        Phase::Playing {
            time_left: self.round_duration_secs,
            elapsed: 0.0,
        }
    }

    pub fn ending(&self, round_elapsed: f64) -> Phase {
        let hold_left = match self.round_end {
            RoundEndMode::Acknowledge => None,
            RoundEndMode::AutoAfter { secs } => Some(secs),
        };
        Phase::Ending {
            round_elapsed,
            hold_left,
        }
    }

    pub fn intermission(&self) -> Phase {
        Phase::Intermission {
            delay_left: self.intermission_secs,
        }
    }
}

/// Inputs observed during one scheduling tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseInput {
    /// Seconds since the previous tick.
    pub dt: f64,
    /// A "continue" event arrived this tick.
    pub continue_pressed: bool,
    /// The round's terminal condition holds on freshly recomputed counts.
    pub terminal_reached: bool,
    /// The round just scored decided the match.
    pub match_over: bool,
}

/// Result of advancing the FSM by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseStatus {
    /// Stay in the same phase (with updated timers).
    Continue(Phase),
    /// Enter a new phase; entry hooks must run.
    Transition(Phase),
}

impl PhaseStatus {
    pub fn phase(&self) -> Phase {
        match self {
            PhaseStatus::Continue(p) | PhaseStatus::Transition(p) => *p,
        }
    }

    pub fn is_transition(&self) -> bool {
        matches!(self, PhaseStatus::Transition(_))
    }
}

/// Advance the phase machine by one tick.
pub fn advance(phase: &Phase, input: &PhaseInput, timing: &PhaseTiming) -> PhaseStatus {
    match *phase {
        Phase::Briefing => {
            if input.continue_pressed || !timing.await_start {
                PhaseStatus::Transition(timing.starting())
            } else {
                PhaseStatus::Continue(Phase::Briefing)
            }
        }
        Phase::Starting { delay_left } => {
            let delay_left = delay_left - input.dt;
            if delay_left <= 0.0 {
                PhaseStatus::Transition(timing.playing())
            } else {
                PhaseStatus::Continue(Phase::Starting { delay_left })
            }
        }
        Phase::Playing { time_left, elapsed } => advance_playing(time_left, elapsed, input, timing),
        Phase::Ending {
            round_elapsed,
            hold_left,
        } => {
            let done = match hold_left {
                None => input.continue_pressed,
                Some(left) => left - input.dt <= 0.0,
            };
            if done {
                if input.match_over {
                    PhaseStatus::Transition(timing.intermission())
                } else {
                    PhaseStatus::Transition(timing.starting())
                }
            } else {
                PhaseStatus::Continue(Phase::Ending {
                    round_elapsed,
                    hold_left: hold_left.map(|left| left - input.dt),
                })
            }
        }
        Phase::Intermission { delay_left } => {
            let delay_left = delay_left - input.dt;
            if delay_left <= 0.0 {
                PhaseStatus::Transition(Phase::Briefing)
            } else {
                PhaseStatus::Continue(Phase::Intermission { delay_left })
            }
        }
    }
}

fn advance_playing(
    time_left: Option<f64>,
    elapsed: f64,
    input: &PhaseInput,
    timing: &PhaseTiming,
) -> PhaseStatus {
    let time_left = time_left.map(|t| (t - input.dt).max(0.0));
    let elapsed = match timing.round_duration_secs {
        Some(duration) => (elapsed + input.dt).min(duration),
        None => elapsed + input.dt,
    };
    let expired = time_left.is_some_and(|t| t <= 0.0);

    if input.terminal_reached || expired {
        PhaseStatus::Transition(timing.ending(elapsed))
    } else {
        PhaseStatus::Continue(Phase::Playing { time_left, elapsed })
    }
}
