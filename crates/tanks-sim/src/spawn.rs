//! Spawn providers: where tanks are placed at setup and every round start.
//!
//! `SpawnSurface` samples uniformly, with replacement, from a fixed set of
//! valid ground points and gives every placement a random heading.

use glam::Vec3;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use tanks_core::constants::{SPAWN_GRID_STEP, SPAWN_MAX_DIM, SPAWN_MAX_HEIGHT};
use tanks_core::types::{Placement, RosterId};

use crate::error::SetupError;

/// Supplies world placements for a roster's tanks.
pub trait SpawnProvider: Send {
    /// Return exactly `count` placements for `roster`.
    fn placements(&mut self, roster: RosterId, count: usize) -> Result<Vec<Placement>, SetupError>;
}

/// A set of candidate ground points with a seeded sampler.
pub struct SpawnSurface {
    points: Vec<Vec3>,
    rng: ChaCha8Rng,
}

impl SpawnSurface {
    /// Keep the vertices inside the square `|x|, |z| < max_dim` that lie
    /// below `max_height`. Fails if none remain.
    pub fn from_vertices(
        vertices: impl IntoIterator<Item = Vec3>,
        max_dim: f32,
        max_height: f32,
        seed: u64,
    ) -> Result<Self, SetupError> {
        let points: Vec<Vec3> = vertices
            .into_iter()
            .filter(|v| v.x.abs() < max_dim && v.z.abs() < max_dim && v.y < max_height)
            .collect();
        if points.is_empty() {
            return Err(SetupError::DegenerateSpawnSurface);
        }
        debug!(points = points.len(), "spawn surface built");
        Ok(Self {
            points,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// A flat grid of ground points spaced `step` apart.
    pub fn flat_grid(half_extent: f32, step: f32, seed: u64) -> Result<Self, SetupError> {
        if step.is_nan() || step <= 0.0 || !half_extent.is_finite() {
            return Err(SetupError::DegenerateSpawnSurface);
        }
        let cells = (half_extent / step).floor() as i32;
        let vertices = (-cells..=cells).flat_map(|i| {
            (-cells..=cells).map(move |j| Vec3::new(i as f32 * step, 0.0, j as f32 * step))
        });
        Self::from_vertices(vertices, half_extent, SPAWN_MAX_HEIGHT, seed)
    }

    /// The default arena: a flat grid over the standard spawn area.
    pub fn arena(seed: u64) -> Result<Self, SetupError> {
        Self::flat_grid(SPAWN_MAX_DIM, SPAWN_GRID_STEP, seed)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl SpawnProvider for SpawnSurface {
    fn placements(&mut self, _roster: RosterId, count: usize) -> Result<Vec<Placement>, SetupError> {
        (0..count)
            .map(|_| {
                let point = *self
                    .points
                    .choose(&mut self.rng)
                    .ok_or(SetupError::DegenerateSpawnSurface)?;
                let yaw = self.rng.gen_range(0.0..360.0);
                Ok(Placement::new(point, yaw))
            })
            .collect()
    }
}
