//! Fundamental identifier, geometric and time types.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Identifies one roster by its registration order (0 = first registered).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RosterId(pub u8);

impl RosterId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RosterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "roster-{}", self.0)
    }
}

/// Identifies one tank: its roster and its stable slot within that roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TankId {
    pub roster: RosterId,
    pub slot: u16,
}

impl TankId {
    pub fn new(roster: RosterId, slot: u16) -> Self {
        Self { roster, slot }
    }
}

impl fmt::Display for TankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/tank-{}", self.roster, self.slot)
    }
}

/// A world placement on the ground plane: position plus heading.
/// x = East, y = Up, z = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    /// Heading around the up axis, in degrees [0, 360).
    pub yaw_degrees: f32,
}

impl Placement {
    pub fn new(position: Vec3, yaw_degrees: f32) -> Self {
        Self {
            position,
            yaw_degrees: yaw_degrees.rem_euclid(360.0),
        }
    }
}

/// Camera framing of a group of tanks: the point to look at and the
/// orthographic half-size needed to keep every tank on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Framing {
    pub center: Vec3,
    pub size: f32,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed time in seconds since the controller was created.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// 24-bit tint, rendered as an uppercase hex string for presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}
