//! Host-side game session: score, lives and campaign progress
//!
//! The engine only reports events. Turning them into points, lives and
//! level changes is the host's job; this is the bookkeeping both hosts in
//! `main.rs` use.

use serde::{Deserialize, Serialize};

use crate::level::Level;
use crate::sim::GameEvent;

pub const STARTING_LIVES: u32 = 3;
/// Points per coin (stomped enemies count as coins)
pub const COIN_POINTS: u32 = 10;

/// What the host should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing beyond refreshing the HUD
    Continue,
    ScoreChanged(u32),
    /// Load the campaign level at this index and start it
    NextLevel(usize),
    GameOver,
    Victory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub is_running: bool,
    pub score: u32,
    /// 1-based campaign level
    pub level: usize,
    pub lives: u32,
    pub game_over: bool,
    pub victory: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            is_running: false,
            score: 0,
            level: 1,
            lives: STARTING_LIVES,
            game_over: false,
            victory: false,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_over(&self) -> bool {
        self.game_over || self.victory
    }

    /// 0-based index of the current level in the campaign
    pub fn level_index(&self) -> usize {
        self.level.saturating_sub(1)
    }

    pub fn current_level<'a>(&self, campaign: &'a [Level]) -> Option<&'a Level> {
        campaign.get(self.level_index())
    }

    /// Apply one engine event. `level_count` is the campaign length.
    /// Events after the game has ended are ignored.
    pub fn apply(&mut self, event: GameEvent, level_count: usize) -> Outcome {
        if self.is_over() {
            return Outcome::Continue;
        }

        match event {
            GameEvent::CoinCollected => {
                self.score += COIN_POINTS;
                Outcome::ScoreChanged(self.score)
            }
            GameEvent::LifeLost => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.game_over = true;
                    self.is_running = false;
                    log::info!("Game over with {} points", self.score);
                    Outcome::GameOver
                } else {
                    Outcome::Continue
                }
            }
            GameEvent::LevelComplete => {
                if self.level >= level_count {
                    self.victory = true;
                    self.is_running = false;
                    log::info!("Victory with {} points", self.score);
                    Outcome::Victory
                } else {
                    self.level += 1;
                    log::info!("Advancing to level {}", self.level);
                    Outcome::NextLevel(self.level_index())
                }
            }
            GameEvent::PlayerJumped
            | GameEvent::PlayerLanded
            | GameEvent::BossHit
            | GameEvent::BossDefeated => Outcome::Continue,
        }
    }

    /// Back to level 1 with full lives and no score, running
    pub fn restart(&mut self) {
        *self = Self {
            is_running: true,
            ..Self::default()
        };
    }
}
