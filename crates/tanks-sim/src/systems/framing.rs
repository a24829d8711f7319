//! Camera framing of all active tanks.

use glam::Vec3;
use hecs::World;

use tanks_core::components::{Activation, Tank};
use tanks_core::constants::{CAMERA_EDGE_BUFFER, CAMERA_MIN_SIZE};
use tanks_core::types::{Framing, Placement};

/// Centre on the mean position of the active tanks and size the view so
/// the farthest one stays inside it. `None` when no tank is active.
pub fn compute(world: &World, aspect: f32) -> Option<Framing> {
    let positions: Vec<Vec3> = world
        .query::<(&Tank, &Placement, &Activation)>()
        .iter()
        .filter(|(_, (_, _, activation))| activation.active)
        .map(|(_, (_, placement, _))| placement.position)
        .collect();
    if positions.is_empty() {
        return None;
    }

    let center = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
    let aspect = if aspect > 0.0 { aspect } else { 1.0 };
    let size = positions
        .iter()
        .map(|p| {
            let offset = *p - center;
            offset.z.abs().max(offset.x.abs() / aspect)
        })
        .fold(0.0f32, f32::max);

    Some(Framing {
        center,
        size: (size + CAMERA_EDGE_BUFFER).max(CAMERA_MIN_SIZE),
    })
}
