//! Stand-in combat for headless runs.
//!
//! While a round is playing, each tick has a fixed chance of one random live
//! tank taking a hit. Seeded so a run can be replayed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tanks_core::commands::MatchCommand;
use tanks_core::enums::PhaseKind;
use tanks_core::state::MatchSnapshot;

/// Chance per tick that a shot lands somewhere.
/// Shell explosions deal up to `MAX_DAMAGE`, less the further off centre.
const HIT_CHANCE: f64 = 0.15;
const MIN_DAMAGE: f32 = 2.5;
const MAX_DAMAGE: f32 = 12.5;

pub struct Skirmish {
    rng: ChaCha8Rng,
    hit_chance: f64,
}

impl Skirmish {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            hit_chance: HIT_CHANCE,
        }
    }

    pub fn with_hit_chance(mut self, chance: f64) -> Self {
        self.hit_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Commands to queue before the next tick, given the latest snapshot.
    pub fn commands(&mut self, snapshot: &MatchSnapshot) -> Vec<MatchCommand> {
        if snapshot.phase != PhaseKind::Playing || !self.rng.gen_bool(self.hit_chance) {
            return Vec::new();
        }
        let live: Vec<_> = snapshot.tanks.iter().filter(|t| t.active).map(|t| t.id).collect();
        match live.choose(&mut self.rng) {
            Some(&tank) => vec![MatchCommand::DamageTank {
                tank,
                amount: self.rng.gen_range(MIN_DAMAGE..=MAX_DAMAGE),
            }],
            None => Vec::new(),
        }
    }
}
