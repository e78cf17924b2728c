//! Frame simulation
//!
//! All gameplay logic lives here. Nothing in this module touches a canvas,
//! a clock or a keyboard:
//! - Variable timestep, driven by the caller's measured dt
//! - Stable iteration order (level order)
//! - Events are returned, never dispatched

pub mod boss;
pub mod collision;
pub mod combat;
pub mod physics;
pub mod state;
pub mod tick;

pub use boss::attack_pattern;
pub use collision::{Contact, find_support};
pub use state::{
    Boss, BossSprite, Coin, Enemy, EnemySprite, GameEvent, Platform, Player, PlayerSprite,
    Projectile, World,
};
pub use tick::{TickInput, tick};
