//! Rosters: the ordered set of tanks fighting for one side, plus that
//! side's round scores and win count.
//!
//! A roster owns the handles of its tanks. The backing entities live in the
//! controller's hecs world and are only touched through the operations here.

use hecs::{Entity, EntityBuilder, World};
use tracing::{debug, instrument, trace};

use tanks_core::components::*;
use tanks_core::config::{RosterConfig, RosterMembers};
use tanks_core::enums::Category;
use tanks_core::types::{Placement, Rgb, RosterId, TankId};

use crate::error::{RosterError, SetupError};
use crate::spawn::SpawnProvider;

/// The roster's record of one tank.
#[derive(Debug, Clone)]
pub struct TankHandle {
    pub id: TankId,
    pub entity: Entity,
    pub action_map: Option<String>,
}

/// Receives "count changed" notifications from `Roster::recompute_live_count`.
pub trait TallyObserver {
    fn count_changed(&mut self, roster: &Roster);
}

/// Observer that ignores notifications.
pub struct NoTally;

impl TallyObserver for NoTally {
    fn count_changed(&mut self, _roster: &Roster) {}
}

#[derive(Debug)]
pub struct Roster {
    id: RosterId,
    label: String,
    category: Category,
    color: Rgb,
    team_number: u8,
    handles: Vec<TankHandle>,
    count_left: u32,
    /// Count last reported to an observer; `None` forces the next report.
    reported_left: Option<u32>,
    round_points: Vec<f32>,
    accumulated_points: f32,
    wins: u32,
}

impl Roster {
    /// An empty roster carrying the configured identity.
    pub fn new(id: RosterId, config: &RosterConfig) -> Self {
        Self {
            id,
            label: config.label.clone(),
            category: config.category,
            color: config.color,
            team_number: config.team_number,
            handles: Vec::new(),
            count_left: 0,
            reported_left: None,
            round_points: Vec::new(),
            accumulated_points: 0.0,
            wins: 0,
        }
    }

    /// Refresh label, tint and team number from edited options.
    pub fn configure(&mut self, config: &RosterConfig) {
        self.label = config.label.clone();
        self.category = config.category;
        self.color = config.color;
        self.team_number = config.team_number;
    }

    /// Build the roster for a new match: reset scores to `num_of_rounds`
    /// empty slots and spawn one tank per configured member.
    #[instrument(skip_all, fields(roster = %self.id))]
    pub fn initialize(
        &mut self,
        config: &RosterConfig,
        num_of_rounds: u32,
        starting_health: f32,
        world: &mut World,
        spawner: &mut dyn SpawnProvider,
    ) -> Result<(), SetupError> {
        self.clear(world);
        self.configure(config);
        self.round_points = vec![0.0; num_of_rounds as usize];
        self.accumulated_points = 0.0;
        self.wins = 0;

        let action_maps: Vec<Option<String>> = match &config.members {
            RosterMembers::Fixed { size } => vec![None; *size as usize],
            RosterMembers::Players { action_maps } => {
                action_maps.iter().cloned().map(Some).collect()
            }
        };
        let placements = checked_placements(spawner, self.id, action_maps.len())?;

        for (slot, (action_map, placement)) in action_maps.into_iter().zip(placements).enumerate() {
            let id = TankId::new(self.id, slot as u16);
            let mut builder = EntityBuilder::new();
            builder
                .add(Tank { id })
                .add(placement)
                .add(Health {
                    current: starting_health,
                    max: starting_health,
                    dead: false,
                })
                .add(Activation { active: true })
                .add(Controls::default())
                .add(Tint { color: self.color });
            if let Some(map) = &action_map {
                builder.add(InputBinding {
                    action_map: map.clone(),
                });
            }
            let entity = world.spawn(builder.build());
            self.handles.push(TankHandle {
                id,
                entity,
                action_map,
            });
        }

        self.count_left = self.size();
        self.reported_left = None;
        debug!(tanks = self.handles.len(), label = %self.label, "roster initialized");
        Ok(())
    }

    /// Count the active tanks and notify `observer` if the count differs
    /// from the last one reported.
    ///
    /// Observers hear about changes only, not every call, so this can run
    /// every tick. `initialize`, `reset_all` and `clear` forget the last
    /// report, which makes the next call notify unconditionally.
    pub fn recompute_live_count(&mut self, world: &World, observer: &mut dyn TallyObserver) -> u32 {
        let left = self
            .handles
            .iter()
            .filter(|h| {
                world
                    .get::<&Activation>(h.entity)
                    .map(|a| a.active)
                    .unwrap_or(false)
            })
            .count() as u32;
        self.count_left = left;
        if self.reported_left != Some(left) {
            self.reported_left = Some(left);
            trace!(roster = %self.id, left, "live count changed");
            observer.count_changed(self);
        }
        left
    }

    /// Move every tank to a fresh spawn point, restore full health and reactivate it.
    pub fn reset_all(
        &mut self,
        world: &mut World,
        spawner: &mut dyn SpawnProvider,
    ) -> Result<(), SetupError> {
        let placements = checked_placements(spawner, self.id, self.handles.len())?;
        for (handle, fresh) in self.handles.iter().zip(placements) {
            if let Ok((placement, health, activation)) =
                world.query_one_mut::<(&mut Placement, &mut Health, &mut Activation)>(handle.entity)
            {
                *placement = fresh;
                health.current = health.max;
                health.dead = false;
                activation.active = true;
            }
        }
        self.count_left = self.size();
        self.reported_left = None;
        Ok(())
    }

    pub fn enable_controls(&self, world: &mut World) {
        self.set_controls(world, true);
    }

    pub fn disable_controls(&self, world: &mut World) {
        self.set_controls(world, false);
    }

    fn set_controls(&self, world: &mut World, enabled: bool) {
        for handle in &self.handles {
            if let Ok(controls) = world.query_one_mut::<&mut Controls>(handle.entity) {
                controls.movement = enabled;
                controls.firing = enabled;
                controls.overlay = enabled;
            }
        }
    }

    /// Despawn every tank and forget the handles. Standings are kept for display.
    pub fn clear(&mut self, world: &mut World) {
        for handle in self.handles.drain(..) {
            let _ = world.despawn(handle.entity);
        }
        self.count_left = 0;
        self.reported_left = None;
    }

    /// Write the points of round `index` (0-based) and refresh the total.
    pub fn record_round_points(&mut self, index: usize, points: f32) -> Result<(), RosterError> {
        let len = self.round_points.len();
        let slot = self
            .round_points
            .get_mut(index)
            .ok_or(RosterError::RoundOutOfRange {
                roster: self.id,
                index,
                len,
            })?;
        *slot = points;
        self.accumulated_points = self.round_points.iter().sum();
        Ok(())
    }

    pub fn record_win(&mut self) {
        self.wins += 1;
    }

    pub fn id(&self) -> RosterId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn team_number(&self) -> u8 {
        self.team_number
    }

    pub fn size(&self) -> u32 {
        self.handles.len() as u32
    }

    /// Live count as of the last recomputation.
    pub fn count_left(&self) -> u32 {
        self.count_left
    }

    pub fn handles(&self) -> &[TankHandle] {
        &self.handles
    }

    pub fn round_points(&self) -> &[f32] {
        &self.round_points
    }

    pub fn accumulated_points(&self) -> f32 {
        self.accumulated_points
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }
}

fn checked_placements(
    spawner: &mut dyn SpawnProvider,
    roster: RosterId,
    expected: usize,
) -> Result<Vec<Placement>, SetupError> {
    let placements = spawner.placements(roster, expected)?;
    if placements.len() != expected {
        return Err(SetupError::PlacementCount {
            roster,
            expected,
            got: placements.len(),
        });
    }
    Ok(placements)
}
