//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems and rosters, not components.

use serde::{Deserialize, Serialize};

use crate::types::{Rgb, TankId};

/// Marks an entity as a tank and records its identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tank {
    pub id: TankId,
}

/// Hit points of a tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
    /// Set once when `current` first drops to zero; cleared on revival.
    pub dead: bool,
}

/// Whether the backing actor is active in the world.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Activation {
    pub active: bool,
}

/// Input responsiveness of a tank.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Controls {
    pub movement: bool,
    pub firing: bool,
    /// World-space health bar and markers attached to the tank.
    pub overlay: bool,
}

/// Visual tint applied to every renderer of the tank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tint {
    pub color: Rgb,
}

/// Input action map that drives a human-controlled tank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputBinding {
    pub action_map: String,
}
