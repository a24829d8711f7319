//! Damage system: applies shell hits reported by the combat collaborator.

use hecs::World;
use tracing::debug;

use tanks_core::components::{Activation, Controls, Health, Tank};
use tanks_core::types::TankId;

/// What a hit did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Unknown tank, inactive tank, or a non-positive amount.
    Ignored,
    Damaged { health: f32 },
    /// Health reached zero on this hit.
    Destroyed,
}

/// Take `amount` health from `tank`. A tank reaching zero health dies exactly
/// once: it is deactivated and its controls are switched off.
pub fn apply(world: &mut World, tank: TankId, amount: f32) -> DamageOutcome {
    if amount.is_nan() || amount <= 0.0 {
        return DamageOutcome::Ignored;
    }
    for (_entity, (t, health, activation, controls)) in
        world.query_mut::<(&Tank, &mut Health, &mut Activation, &mut Controls)>()
    {
        if t.id != tank {
            continue;
        }
        if !activation.active || health.dead {
            return DamageOutcome::Ignored;
        }
        health.current -= amount;
        if health.current <= 0.0 {
            health.current = 0.0;
            health.dead = true;
            activation.active = false;
            *controls = Controls::default();
            debug!(%tank, "tank destroyed");
            return DamageOutcome::Destroyed;
        }
        return DamageOutcome::Damaged {
            health: health.current,
        };
    }
    DamageOutcome::Ignored
}
