//! Match configuration: timing, scoring policy, terminal rule and rosters.
//!
//! One `MatchConfig` parametrizes the single match controller for every
//! game variant. The presets reproduce the platoon battle, the duel and
//! the free-for-all.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::*;
use crate::error::ConfigError;
use crate::types::{Rgb, RosterId};

/// How round winners and scores are decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy")]
pub enum ScoringPolicy {
    /// Points accumulate over a fixed number of rounds; the highest total wins.
    PointsProportional {
        points_per_win: f32,
        #[serde(default)]
        partial_credit: PartialCredit,
    },
    /// The surviving roster takes the round; first to `wins_to_win` takes the match.
    WinnerTakesRound { wins_to_win: Option<u32> },
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        ScoringPolicy::PointsProportional {
            points_per_win: DEFAULT_POINTS_PER_WIN,
            partial_credit: PartialCredit::default(),
        }
    }
}

/// How a roster's tanks are constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RosterMembers {
    /// A fixed number of computer-driven tanks.
    Fixed { size: u32 },
    /// One tank per configured input action map.
    Players { action_maps: Vec<String> },
}

impl RosterMembers {
    pub fn len(&self) -> usize {
        match self {
            RosterMembers::Fixed { size } => *size as usize,
            RosterMembers::Players { action_maps } => action_maps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configuration of one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    pub label: String,
    pub category: Category,
    pub color: Rgb,
    pub team_number: u8,
    pub members: RosterMembers,
}

impl RosterConfig {
    pub fn ai_platoon(label: &str, team_number: u8, size: u32, color: Rgb) -> Self {
        Self {
            label: label.to_string(),
            category: Category::Ai,
            color,
            team_number,
            members: RosterMembers::Fixed { size },
        }
    }

    pub fn players(label: &str, team_number: u8, action_maps: &[&str], color: Rgb) -> Self {
        Self {
            label: label.to_string(),
            category: Category::Human,
            color,
            team_number,
            members: RosterMembers::Players {
                action_maps: action_maps.iter().map(|m| m.to_string()).collect(),
            },
        }
    }
}

/// Everything the match controller needs to run matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub num_of_rounds: u32,
    /// `None` for untimed rounds.
    pub round_duration_secs: Option<f64>,
    pub critical_secs: f64,
    pub round_start_delay_secs: f64,
    pub round_end: RoundEndMode,
    pub intermission_secs: f64,
    /// Show start options and wait for "continue" before each match.
    pub await_start: bool,
    pub scoring: ScoringPolicy,
    pub terminal: TerminalRule,
    pub starting_health: f32,
    pub max_team_number: u8,
    /// Viewport aspect ratio used for framing.
    pub aspect: f32,
    pub seed: u64,
    pub rosters: Vec<RosterConfig>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::platoon_battle()
    }
}

const HUMAN_BLUE: Rgb = Rgb(42, 100, 178);
const AI_RED: Rgb = Rgb(229, 46, 40);

/// Distinct tints handed out to free-for-all players.
const PLAYER_TINTS: [Rgb; 4] = [HUMAN_BLUE, AI_RED, Rgb(74, 168, 60), Rgb(230, 180, 30)];

impl MatchConfig {
    /// A human platoon against an AI platoon, points accumulated over timed rounds.
    pub fn platoon_battle() -> Self {
        Self {
            num_of_rounds: DEFAULT_NUM_OF_ROUNDS,
            round_duration_secs: Some(DEFAULT_MINUTES_PER_ROUND * 60.0),
            critical_secs: DEFAULT_CRITICAL_SECS,
            round_start_delay_secs: DEFAULT_ROUND_START_DELAY_SECS,
            round_end: RoundEndMode::Acknowledge,
            intermission_secs: DEFAULT_INTERMISSION_SECS,
            await_start: true,
            scoring: ScoringPolicy::default(),
            terminal: TerminalRule::AnyRosterEliminated,
            starting_health: STARTING_HEALTH,
            max_team_number: MAX_TEAM_NUMBER,
            aspect: DEFAULT_ASPECT,
            seed: 42,
            rosters: vec![
                RosterConfig::players("Human", 1, &["Player1"], HUMAN_BLUE),
                RosterConfig::ai_platoon("AI", 2, DEFAULT_PLATOON_SIZE, AI_RED),
            ],
        }
    }

    /// Two players, untimed rounds, first to five round wins.
    pub fn duel() -> Self {
        Self {
            num_of_rounds: DUEL_MAX_ROUNDS,
            round_duration_secs: None,
            round_start_delay_secs: KNOCKOUT_START_DELAY_SECS,
            round_end: RoundEndMode::AutoAfter {
                secs: KNOCKOUT_END_DELAY_SECS,
            },
            await_start: false,
            scoring: ScoringPolicy::WinnerTakesRound {
                wins_to_win: Some(DUEL_ROUNDS_TO_WIN),
            },
            terminal: TerminalRule::LastTankStanding,
            rosters: vec![
                RosterConfig::players("Player 1", 1, &["Player1"], HUMAN_BLUE),
                RosterConfig::players("Player 2", 2, &["Player2"], AI_RED),
            ],
            ..Self::platoon_battle()
        }
    }

    /// `players` single-tank rosters, last tank standing takes each round.
    pub fn free_for_all(players: usize) -> Self {
        let rosters = (0..players)
            .map(|i| {
                let map = format!("Player{}", i + 1);
                RosterConfig::players(
                    &format!("Player {}", i + 1),
                    (i + 1).min(u8::MAX as usize) as u8,
                    &[map.as_str()],
                    PLAYER_TINTS[i % PLAYER_TINTS.len()],
                )
            })
            .collect();
        Self {
            num_of_rounds: FREE_FOR_ALL_ROUNDS,
            round_duration_secs: None,
            round_start_delay_secs: KNOCKOUT_START_DELAY_SECS,
            round_end: RoundEndMode::AutoAfter {
                secs: KNOCKOUT_END_DELAY_SECS,
            },
            await_start: false,
            scoring: ScoringPolicy::WinnerTakesRound { wins_to_win: None },
            terminal: TerminalRule::LastTankStanding,
            rosters,
            ..Self::platoon_battle()
        }
    }

    pub fn with_num_of_rounds(mut self, rounds: u32) -> Self {
        self.num_of_rounds = rounds;
        self
    }

    pub fn with_minutes_per_round(mut self, minutes: f64) -> Self {
        self.round_duration_secs = Some(minutes * 60.0);
        self
    }

    pub fn with_untimed_rounds(mut self) -> Self {
        self.round_duration_secs = None;
        self
    }

    pub fn with_round_start_delay(mut self, secs: f64) -> Self {
        self.round_start_delay_secs = secs;
        self
    }

    pub fn with_round_end(mut self, round_end: RoundEndMode) -> Self {
        self.round_end = round_end;
        self
    }

    pub fn with_intermission(mut self, secs: f64) -> Self {
        self.intermission_secs = secs;
        self
    }

    pub fn with_await_start(mut self, await_start: bool) -> Self {
        self.await_start = await_start;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn with_terminal(mut self, terminal: TerminalRule) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_rosters(mut self, rosters: Vec<RosterConfig>) -> Self {
        self.rosters = rosters;
        self
    }

    /// Resize every fixed-size roster.
    pub fn with_platoon_size(mut self, size: u32) -> Self {
        for roster in &mut self.rosters {
            if let RosterMembers::Fixed { size: s } = &mut roster.members {
                *s = size;
            }
        }
        self
    }

    pub fn round_duration_minutes(&self) -> Option<f64> {
        self.round_duration_secs.map(|s| s / 60.0)
    }

    /// Check everything that would make a match unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rosters.len() < 2 {
            return Err(ConfigError::TooFewRosters(self.rosters.len()));
        }
        if self.rosters.len() > u8::MAX as usize {
            return Err(ConfigError::TooManyRosters(self.rosters.len()));
        }
        if self.num_of_rounds == 0 {
            return Err(ConfigError::ZeroRounds);
        }
        if self.num_of_rounds > MAX_NUM_OF_ROUNDS {
            return Err(ConfigError::TooManyRounds {
                rounds: self.num_of_rounds,
                max: MAX_NUM_OF_ROUNDS,
            });
        }
        if let Some(secs) = self.round_duration_secs {
            let max = MAX_MINUTES_PER_ROUND * 60.0;
            if !secs.is_finite() || secs <= 0.0 || secs > max {
                return Err(ConfigError::InvalidRoundDuration { secs, max });
            }
        }
        let hold = match self.round_end {
            RoundEndMode::AutoAfter { secs } => secs,
            RoundEndMode::Acknowledge => 0.0,
        };
        for (name, value) in [
            ("round start delay", self.round_start_delay_secs),
            ("intermission", self.intermission_secs),
            ("critical time", self.critical_secs),
            ("round end hold", hold),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidDelay { name, value });
            }
        }
        if !self.starting_health.is_finite() || self.starting_health <= 0.0 {
            return Err(ConfigError::InvalidStartingHealth(self.starting_health));
        }
        match self.scoring {
            ScoringPolicy::PointsProportional { points_per_win, .. }
                if !points_per_win.is_finite() || points_per_win <= 0.0 =>
            {
                return Err(ConfigError::InvalidPointsPerWin(points_per_win));
            }
            ScoringPolicy::WinnerTakesRound {
                wins_to_win: Some(0),
            } => return Err(ConfigError::ZeroWinsToWin),
            _ => {}
        }
        for (i, roster) in self.rosters.iter().enumerate() {
            let id = RosterId(i as u8);
            if roster.members.is_empty() {
                return Err(ConfigError::EmptyRoster(id));
            }
            if roster.members.len() > MAX_ROSTER_SIZE {
                return Err(ConfigError::RosterTooLarge {
                    roster: id,
                    size: roster.members.len(),
                    max: MAX_ROSTER_SIZE,
                });
            }
            if roster.team_number == 0 || roster.team_number > self.max_team_number {
                return Err(ConfigError::TeamNumberOutOfRange {
                    roster: id,
                    team: roster.team_number,
                    max: self.max_team_number,
                });
            }
        }
        Ok(())
    }
}
