//! Rhythm Jumper - platformer mini-game engine
//!
//! Core modules:
//! - `level`: Authored level data and the built-in campaign
//! - `sim`: Frame simulation (physics, enemy AI, boss combat, collisions)
//! - `engine`: Frame loop orchestration and host callbacks
//! - `renderer`: Canvas 2D render pass
//! - `platform`: Frame scheduling and keyboard input abstraction
//! - `tuning`: Data-driven physics and AI constants
//! - `session`: Host-side score/lives bookkeeping

pub mod color;
pub mod engine;
pub mod error;
pub mod geom;
pub mod input;
pub mod level;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use engine::{Callbacks, EngineHandle, GameEngine};
pub use error::{EngineError, LevelError, TuningError};
pub use geom::Rect;
pub use level::Level;
pub use tuning::Tuning;

/// Playfield and entity defaults
pub mod consts {
    use crate::color::Color;

    /// Logical playfield size; level coordinates live in this space
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 450.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_COLOR: Color = Color::rgb(0x34, 0x98, 0xdb);

    pub const PLATFORM_COLOR: Color = Color::rgb(0x2e, 0xcc, 0x71);

    /// Coin defaults
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_COLOR: Color = Color::rgb(0xf1, 0xc4, 0x0f);

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 30.0;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const ENEMY_COLOR: Color = Color::rgb(0xe7, 0x4c, 0x3c);

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 80.0;
    pub const BOSS_HEALTH: i32 = 5;
    pub const BOSS_SPEED: f32 = 2.0;
    pub const BOSS_ATTACK_COOLDOWN: f32 = 2.0;
    pub const BOSS_COLOR: Color = Color::rgb(0x8b, 0x5c, 0xf6);
    /// Boss colors once phase 2 / phase 3 are reached
    pub const BOSS_ANGRY_COLOR: Color = Color::rgb(0xd9, 0x46, 0xef);
    pub const BOSS_ENRAGED_COLOR: Color = Color::rgb(0xf9, 0x73, 0x16);
    pub const MAX_BOSS_PHASE: u8 = 3;

    /// Default boss arena (used when a boss level doesn't author one)
    pub const ARENA_LEFT: f32 = 700.0;
    pub const ARENA_TOP: f32 = 100.0;
    pub const ARENA_BOTTOM: f32 = 300.0;
    pub const ARENA_RESPAWN_X: f32 = 700.0;
    pub const ARENA_RESPAWN_Y: f32 = 250.0;

    pub const PROJECTILE_COLOR: Color = Color::rgb(0xd9, 0x46, 0xef);
}
