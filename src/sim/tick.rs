//! Per-frame simulation tick
//!
//! Advances the world by the measured frame time. Order is fixed: player,
//! enemies, boss, projectiles, then collision resolution.

use super::boss::{update_boss, update_projectiles};
use super::combat::resolve_collisions;
use super::physics::{patrol_enemies, step_player};
use super::state::{GameEvent, World};
use crate::tuning::Tuning;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump was pressed since the last frame
    pub jump: bool,
}

/// Advance the world by `dt` seconds and return what happened.
///
/// Completion (all coins or boss defeated) is left to the caller, which
/// checks it after rendering.
pub fn tick(world: &mut World, input: &TickInput, dt: f32, tuning: &Tuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    world.time += dt;

    step_player(world, input, dt, tuning, &mut events);
    patrol_enemies(world, dt, tuning);
    update_boss(world, dt, tuning);
    update_projectiles(world, dt);
    resolve_collisions(world, tuning, &mut events);

    events
}
