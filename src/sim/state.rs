//! Entity model and world state
//!
//! Live entities are built from authored `Level` data when a level is
//! (re)loaded. Everything the render pass reads lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::*;
use crate::geom::Rect;
use crate::level::{BossArena, BossDef, CoinDef, EnemyDef, Level, PlatformDef};

/// Raw events produced by a frame; the host turns them into score, lives, etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// A coin was picked up, or an enemy was stomped (bonus points)
    CoinCollected,
    /// The player fell out of the world or took damage
    LifeLost,
    LevelComplete,
    PlayerJumped,
    PlayerLanded,
    /// The boss took a stomp
    BossHit,
    /// Boss health reached zero (fires once per level)
    BossDefeated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerSprite {
    #[default]
    Idle,
    Walk,
    Jump,
    Fall,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    pub color: Color,
    pub vel: Vec2,
    pub on_ground: bool,
    pub sprite: PlayerSprite,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            rect: Rect::new(start.x, start.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            color: PLAYER_COLOR,
            vel: Vec2::ZERO,
            on_ground: false,
            sprite: PlayerSprite::Idle,
        }
    }

    /// Teleport to `pos` with zero velocity
    pub fn respawn(&mut self, pos: Vec2) {
        self.rect.set_pos(pos);
        self.vel = Vec2::ZERO;
    }

    /// Pick the sprite from the current motion
    pub fn update_sprite(&mut self) {
        self.sprite = if self.on_ground {
            if self.vel.x != 0.0 {
                PlayerSprite::Walk
            } else {
                PlayerSprite::Idle
            }
        } else if self.vel.y < 0.0 {
            PlayerSprite::Jump
        } else {
            PlayerSprite::Fall
        };
    }
}

/// A static collision surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    pub color: Color,
}

impl From<&PlatformDef> for Platform {
    fn from(def: &PlatformDef) -> Self {
        Self {
            rect: Rect::new(def.x, def.y, def.width, def.height),
            color: def.color.unwrap_or(PLATFORM_COLOR),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub rect: Rect,
    pub color: Color,
    pub collected: bool,
    /// Cosmetic tier: 0 gold, 1 silver, 2 bronze
    pub tier: u8,
}

impl From<&CoinDef> for Coin {
    fn from(def: &CoinDef) -> Self {
        Self {
            rect: Rect::new(
                def.x.unwrap_or(0.0),
                def.y.unwrap_or(0.0),
                def.width.unwrap_or(COIN_SIZE),
                def.height.unwrap_or(COIN_SIZE),
            ),
            color: def.color.unwrap_or(COIN_COLOR),
            collected: false,
            tier: def.tier.unwrap_or(0).min(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemySprite {
    #[default]
    Idle,
    Walk,
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub color: Color,
    /// Patrol velocity (units/s); the sign is the walking direction
    pub velocity_x: f32,
    pub sprite: EnemySprite,
}

impl From<&EnemyDef> for Enemy {
    fn from(def: &EnemyDef) -> Self {
        let velocity_x = def.velocity_x.unwrap_or(ENEMY_SPEED);
        Self {
            rect: Rect::new(
                def.x.unwrap_or(0.0),
                def.y.unwrap_or(0.0),
                def.width.unwrap_or(ENEMY_SIZE),
                def.height.unwrap_or(ENEMY_SIZE),
            ),
            color: def.color.unwrap_or(ENEMY_COLOR),
            velocity_x,
            sprite: if velocity_x != 0.0 {
                EnemySprite::Walk
            } else {
                EnemySprite::Idle
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BossSprite {
    /// Dormant, waiting for the player
    #[default]
    Idle,
    Active,
    Angry,
    Enraged,
}

/// The level boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub rect: Rect,
    pub color: Color,
    /// Only ever decreases
    pub health: i32,
    /// Health at level load, for the health bar
    pub max_health: i32,
    pub vel: Vec2,
    /// 1..=3, only ever increases
    pub phase: u8,
    /// Woken by player proximity; never goes back to sleep
    pub active: bool,
    /// Base seconds between attacks
    pub attack_cooldown: f32,
    /// Seconds until the next attack
    pub attack_timer: f32,
    pub sprite: BossSprite,
}

impl From<&BossDef> for Boss {
    fn from(def: &BossDef) -> Self {
        let health = def.health.unwrap_or(BOSS_HEALTH).max(1);
        Self {
            rect: Rect::new(
                def.x.unwrap_or(0.0),
                def.y.unwrap_or(0.0),
                def.width.unwrap_or(BOSS_SIZE),
                def.height.unwrap_or(BOSS_SIZE),
            ),
            color: def.color.unwrap_or(BOSS_COLOR),
            health,
            max_health: health,
            vel: Vec2::new(
                def.velocity_x.unwrap_or(BOSS_SPEED),
                def.velocity_y.unwrap_or(0.0),
            ),
            phase: def.phase.unwrap_or(1).clamp(1, MAX_BOSS_PHASE),
            active: false,
            attack_cooldown: def
                .attack_cooldown
                .filter(|c| *c > 0.0)
                .unwrap_or(BOSS_ATTACK_COOLDOWN),
            attack_timer: 0.0,
            sprite: BossSprite::Idle,
        }
    }
}

impl Boss {
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Raise the phase to at least `phase`; lower values are ignored.
    /// Returns true if the phase changed.
    pub fn escalate_to(&mut self, phase: u8) -> bool {
        let phase = phase.min(MAX_BOSS_PHASE);
        if phase <= self.phase {
            return false;
        }
        self.phase = phase;
        self.color = match phase {
            2 => BOSS_ANGRY_COLOR,
            _ => BOSS_ENRAGED_COLOR,
        };
        self.update_sprite();
        true
    }

    pub fn update_sprite(&mut self) {
        self.sprite = match (self.active, self.phase) {
            (false, _) => BossSprite::Idle,
            (true, 1) => BossSprite::Active,
            (true, 2) => BossSprite::Angry,
            (true, _) => BossSprite::Enraged,
        };
    }
}

/// A boss shot; flies in a straight line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub color: Color,
    pub vel: Vec2,
}

/// All live simulation state for the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Playfield size
    pub bounds: Vec2,
    pub player_start: Vec2,
    /// Boss containment and respawn point (present only with a boss)
    pub arena: Option<BossArena>,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    /// Seconds simulated since the level was loaded (drives boss motion)
    pub time: f32,
    /// A jump is in progress (set on jump, cleared on landing)
    pub jumping: bool,
}

impl World {
    /// Build a world for `level` on a playfield of `bounds`
    pub fn new(level: &Level, bounds: Vec2) -> Self {
        let start: Vec2 = level.player_start.into();
        let mut world = Self {
            bounds,
            player_start: start,
            arena: None,
            player: Player::new(start),
            platforms: Vec::new(),
            coins: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            time: 0.0,
            jumping: false,
        };
        world.load_level(level);
        world
    }

    /// Replace all level entities and put the player back at the start
    pub fn load_level(&mut self, level: &Level) {
        self.player_start = level.player_start.into();
        self.player.respawn(self.player_start);
        self.player.on_ground = false;
        self.player.sprite = PlayerSprite::Idle;
        self.jumping = false;
        self.time = 0.0;

        self.platforms = level.platforms.iter().map(Platform::from).collect();
        self.coins = level.coins.iter().map(Coin::from).collect();
        self.enemies = level.enemies.iter().map(Enemy::from).collect();
        self.boss = level.active_boss().map(Boss::from);
        self.arena = self
            .boss
            .as_ref()
            .map(|_| level.arena_or_default(self.bounds.x));
        self.projectiles.clear();
    }

    /// Where the player reappears after boss or projectile damage
    pub fn hazard_respawn(&self) -> Vec2 {
        match (&self.boss, &self.arena) {
            (Some(_), Some(arena)) => arena.respawn.into(),
            _ => self.player_start,
        }
    }

    pub fn remaining_coins(&self) -> usize {
        self.coins.iter().filter(|c| !c.collected).count()
    }
}
