//! Snapshot system: reads the world and rosters into published views.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use tanks_core::components::*;
use tanks_core::state::{RosterView, TankView};
use tanks_core::types::Placement;

use crate::presentation::tally_line;
use crate::roster::Roster;

/// Every tank, ordered by roster then slot.
pub fn build_tanks(world: &World) -> Vec<TankView> {
    let mut tanks: Vec<TankView> = world
        .query::<(&Tank, &Placement, &Health, &Activation, &Controls)>()
        .iter()
        .map(|(_, (tank, placement, health, activation, controls))| TankView {
            id: tank.id,
            position: placement.position,
            yaw_degrees: placement.yaw_degrees,
            health: health.current,
            max_health: health.max,
            active: activation.active,
            controls_enabled: controls.movement,
        })
        .collect();
    tanks.sort_by_key(|t| t.id);
    tanks
}

pub fn build_rosters(rosters: &[Roster]) -> Vec<RosterView> {
    rosters
        .iter()
        .map(|r| RosterView {
            id: r.id(),
            label: r.label().to_string(),
            category: r.category(),
            team_number: r.team_number(),
            color_hex: r.color().hex(),
            size: r.size(),
            left: r.count_left(),
            round_points: r.round_points().to_vec(),
            accumulated_points: r.accumulated_points(),
            wins: r.wins(),
            tally: tally_line(r),
        })
        .collect()
}
