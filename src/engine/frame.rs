//! Frame body: simulate, draw, then check for level completion

use glam::Vec2;

use crate::error::EngineError;
use crate::level::Level;
use crate::renderer::{Canvas2d, Surface, render};
use crate::sim::{GameEvent, TickInput, World, tick};
use crate::tuning::Tuning;

/// How a frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Keep looping
    Running,
    /// Every coin collected on a level without a boss
    LevelComplete,
    /// The boss just went down; level completion follows after a delay
    BossDefeated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// In the order they happened, completion last
    pub events: Vec<GameEvent>,
    pub completion: Completion,
}

/// Simulation state plus its drawing context, without any scheduling
pub struct EngineCore {
    pub world: World,
    pub tuning: Tuning,
    canvas: Box<dyn Canvas2d>,
    boss_defeated: bool,
    /// Timestamp (ms) of the previous frame, or of `start`
    last_frame_time: f64,
}

impl EngineCore {
    pub fn new(surface: &dyn Surface, level: &Level, tuning: Tuning) -> Result<Self, EngineError> {
        let size = surface.size();
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            return Err(EngineError::InvalidSurfaceSize {
                width: size.x,
                height: size.y,
            });
        }
        let canvas = surface.context_2d().ok_or(EngineError::MissingContext)?;

        let mut core = Self {
            world: World::new(level, size),
            tuning,
            canvas,
            boss_defeated: false,
            last_frame_time: 0.0,
        };
        core.reset_level(level);
        Ok(core)
    }

    /// Swap in `level` and draw its first frame
    pub fn reset_level(&mut self, level: &Level) {
        self.world.load_level(level);
        self.boss_defeated = false;
        log::info!(
            "Level loaded: {:?} ({} platforms, {} coins, {} enemies, boss: {})",
            level.name,
            self.world.platforms.len(),
            self.world.coins.len(),
            self.world.enemies.len(),
            self.world.boss.is_some()
        );
        self.draw();
    }

    pub fn draw(&mut self) {
        render(&self.world, &self.tuning, self.canvas.as_mut());
    }

    /// Measure dt from `now` on the next frame
    pub fn anchor_clock(&mut self, now: f64) {
        self.last_frame_time = now;
    }

    pub fn playfield(&self) -> Vec2 {
        self.world.bounds
    }

    /// Run one frame at `timestamp` (ms)
    pub fn frame(&mut self, timestamp: f64, input: TickInput) -> FrameReport {
        let dt = self.frame_dt(timestamp);
        let mut events = tick(&mut self.world, &input, dt, &self.tuning);
        self.draw();

        let completion = self.check_completion();
        match completion {
            Completion::Running => {}
            Completion::LevelComplete => events.push(GameEvent::LevelComplete),
            Completion::BossDefeated => events.push(GameEvent::BossDefeated),
        }
        FrameReport { events, completion }
    }

    fn frame_dt(&mut self, timestamp: f64) -> f32 {
        let raw = ((timestamp - self.last_frame_time) / 1000.0) as f32;
        self.last_frame_time = timestamp;

        let max = self.tuning.max_frame_dt;
        if raw > max {
            log::warn!("Frame took {:.0}ms, clamping dt to {:.3}s", raw * 1000.0, max);
            max
        } else {
            // Also catches NaN and timestamps that run backwards
            raw.max(0.0)
        }
    }

    fn check_completion(&mut self) -> Completion {
        if let Some(boss) = &self.world.boss {
            if !self.boss_defeated && boss.is_defeated() {
                self.boss_defeated = true;
                log::info!("Boss defeated");
                return Completion::BossDefeated;
            }
            return Completion::Running;
        }

        if self.world.remaining_coins() == 0 {
            log::info!("All coins collected");
            Completion::LevelComplete
        } else {
            Completion::Running
        }
    }
}
