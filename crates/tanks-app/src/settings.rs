//! Host settings.
//!
//! Settings can be built programmatically with [`AppSettings::new()`] and
//! the `with_*` builders, or read from environment variables with
//! [`AppSettings::from_env()`].
//!
//! # Environment Variables
//!
//! - `TANKS_VARIANT`: `platoon` (default), `duel`, or `ffa:<players>`
//! - `TANKS_ROUNDS`: number of rounds per match
//! - `TANKS_MINUTES_PER_ROUND`: length of a timed round
//! - `TANKS_AI_TANKS`: size of every AI platoon
//! - `TANKS_SEED`: RNG seed
//! - `TANKS_LOG_FILE`: `true` to log to a timestamped file instead of stderr
//! - `TANKS_EXPORT_CONFIG`: path of the export configuration JSON
//! - `TANKS_AUTO_CONTINUE`: `true` to acknowledge every round end automatically
//! - `TANKS_SKIRMISH`: `true` (default) to let the built-in skirmish deal damage

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context};

use tanks_core::config::MatchConfig;

/// Which preset the match configuration starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    PlatoonBattle,
    Duel,
    FreeForAll(usize),
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "platoon" | "platoon-battle" => Ok(Variant::PlatoonBattle),
            "duel" => Ok(Variant::Duel),
            other => match other.strip_prefix("ffa:") {
                Some(n) => {
                    let players: usize = n.parse().with_context(|| format!("bad player count in {s:?}"))?;
                    Ok(Variant::FreeForAll(players))
                }
                None => bail!("unknown variant {s:?}"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub variant: Variant,
    pub rounds: Option<u32>,
    pub minutes_per_round: Option<f64>,
    pub ai_tanks: Option<u32>,
    pub seed: Option<u64>,
    pub log_to_file: bool,
    pub export_config: Option<PathBuf>,
    pub auto_continue: bool,
    pub skirmish: bool,
    /// Full `MatchConfig` JSON replacing the preset.
    pub config_file: Option<PathBuf>,
}

impl AppSettings {
    pub fn new() -> Self {
        Self {
            variant: Variant::PlatoonBattle,
            rounds: None,
            minutes_per_round: None,
            ai_tanks: None,
            seed: None,
            log_to_file: false,
            export_config: None,
            auto_continue: false,
            skirmish: true,
            config_file: None,
        }
    }

    /// Read settings from `TANKS_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        fn get_env_parsed<T>(var: &str) -> anyhow::Result<Option<T>>
        where
            T: FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            match std::env::var(var) {
                Ok(val) => Ok(Some(
                    val.trim()
                        .parse()
                        .with_context(|| format!("{var}={val:?} is not valid"))?,
                )),
                Err(_) => Ok(None),
            }
        }

        let variant = match std::env::var("TANKS_VARIANT") {
            Ok(val) => val.parse()?,
            Err(_) => Variant::PlatoonBattle,
        };

        Ok(Self {
            variant,
            rounds: get_env_parsed("TANKS_ROUNDS")?,
            minutes_per_round: get_env_parsed("TANKS_MINUTES_PER_ROUND")?,
            ai_tanks: get_env_parsed("TANKS_AI_TANKS")?,
            seed: get_env_parsed("TANKS_SEED")?,
            log_to_file: get_env_flag("TANKS_LOG_FILE", false),
            export_config: std::env::var_os("TANKS_EXPORT_CONFIG").map(PathBuf::from),
            auto_continue: get_env_flag("TANKS_AUTO_CONTINUE", false),
            skirmish: get_env_flag("TANKS_SKIRMISH", true),
            config_file: None,
        })
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    pub fn with_minutes_per_round(mut self, minutes: f64) -> Self {
        self.minutes_per_round = Some(minutes);
        self
    }

    pub fn with_ai_tanks(mut self, tanks: u32) -> Self {
        self.ai_tanks = Some(tanks);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_auto_continue(mut self, value: bool) -> Self {
        self.auto_continue = value;
        self
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// The match configuration: the config file if given, else the preset,
    /// then the individual overrides.
    pub fn match_config(&self) -> anyhow::Result<MatchConfig> {
        let mut config = match &self.config_file {
            Some(path) => load_config(path)?,
            None => match self.variant {
                Variant::PlatoonBattle => MatchConfig::platoon_battle(),
                Variant::Duel => MatchConfig::duel(),
                Variant::FreeForAll(players) => MatchConfig::free_for_all(players),
            },
        };
        if let Some(rounds) = self.rounds {
            config = config.with_num_of_rounds(rounds);
        }
        if let Some(minutes) = self.minutes_per_round {
            config = config.with_minutes_per_round(minutes);
        }
        if let Some(tanks) = self.ai_tanks {
            config = config.with_platoon_size(tanks);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config.validate().context("invalid match configuration")?;
        Ok(config)
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::new()
    }
}

fn load_config(path: &Path) -> anyhow::Result<MatchConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading match config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing match config {}", path.display()))
}
