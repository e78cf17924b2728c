//! Authored level data
//!
//! Levels are trusted, hand-written data. Numeric fields of coins, enemies
//! and bosses are optional and fall back to defaults when the level is
//! loaded into the simulation (see `sim::state`), so the loader never rejects
//! a level for omitting them.

pub mod campaign;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::*;
use crate::error::LevelError;
use crate::geom::Rect;

pub use campaign::{boss_level, campaign, initial_level, level2};

/// A point in playfield coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// A static platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl PlatformDef {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color: None,
        }
    }

    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A coin; unset fields take the coin defaults
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinDef {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub color: Option<Color>,
    /// Cosmetic tier: 0 gold, 1 silver, 2 bronze
    pub tier: Option<u8>,
}

impl CoinDef {
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: None,
            height: None,
            color: None,
            tier: None,
        }
    }

    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A patrolling enemy; unset fields take the enemy defaults
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyDef {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Patrol speed and initial direction (units/s)
    pub velocity_x: Option<f32>,
    pub color: Option<Color>,
}

impl EnemyDef {
    pub const fn new(x: f32, y: f32, size: f32, velocity_x: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(size),
            height: Some(size),
            velocity_x: Some(velocity_x),
            color: None,
        }
    }

    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// The level boss; unset fields take the boss defaults
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BossDef {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub velocity_x: Option<f32>,
    pub velocity_y: Option<f32>,
    pub health: Option<i32>,
    pub color: Option<Color>,
    pub phase: Option<u8>,
    /// Base seconds between attacks (divided by the phase)
    pub attack_cooldown: Option<f32>,
}

/// Containment box for the boss plus where the player respawns after boss
/// or projectile damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossArena {
    pub bounds: Rect,
    pub respawn: Point,
}

impl BossArena {
    /// The arena used by boss levels that don't author one: the strip right
    /// of x=700 between y=100 and y=300
    pub fn default_for_width(canvas_width: f32) -> Self {
        Self {
            bounds: Rect::new(
                ARENA_LEFT,
                ARENA_TOP,
                (canvas_width - ARENA_LEFT).max(0.0),
                ARENA_BOTTOM - ARENA_TOP,
            ),
            respawn: Point::new(ARENA_RESPAWN_X, ARENA_RESPAWN_Y),
        }
    }
}

/// A complete playable level
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    pub player_start: Point,
    #[serde(default)]
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub coins: Vec<CoinDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<BossDef>,
    #[serde(default)]
    pub is_boss_level: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_arena: Option<BossArena>,
}

impl Level {
    pub fn from_json_str(s: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The boss descriptor, only when this level is flagged as a boss level
    pub fn active_boss(&self) -> Option<&BossDef> {
        if self.is_boss_level {
            self.boss.as_ref()
        } else {
            None
        }
    }

    /// Authored arena, or the default arena for the given playfield width
    pub fn arena_or_default(&self, canvas_width: f32) -> BossArena {
        self.boss_arena
            .unwrap_or_else(|| BossArena::default_for_width(canvas_width))
    }
}
