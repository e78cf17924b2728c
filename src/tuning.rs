//! Data-driven game balance
//!
//! Every physics and AI constant the simulation uses. Defaults reproduce the
//! shipped game; a JSON file can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Boss motion for one phase: `vx = amp_x * sin(t * freq_x)`,
/// `vy = amp_y * cos(t * freq_y)` with `t` in seconds since level reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseMotion {
    pub amp_x: f32,
    pub freq_x: f32,
    pub amp_y: f32,
    pub freq_y: f32,
}

impl PhaseMotion {
    pub const fn new(amp_x: f32, freq_x: f32, amp_y: f32, freq_y: f32) -> Self {
        Self {
            amp_x,
            freq_x,
            amp_y,
            freq_y,
        }
    }
}

/// Physics and AI tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Downward acceleration (units/s²), applied every frame
    pub gravity: f32,
    /// Horizontal speed while a direction key is held (units/s)
    pub move_speed: f32,
    /// Per-frame velocity multiplier with no direction held
    pub friction: f32,
    /// Horizontal speed below which friction snaps to zero
    pub friction_epsilon: f32,
    /// Upward speed given by a jump (units/s)
    pub jump_speed: f32,
    /// Upward speed after stomping an enemy
    pub stomp_bounce: f32,
    /// Upward speed after stomping the boss (stronger than a jump bounce)
    pub boss_bounce: f32,
    /// How far below a platform top the player's feet may sink and still land
    pub ground_tolerance: f32,

    // === Enemies ===
    /// How far below a platform top an enemy's feet may be to patrol it
    pub patrol_tolerance: f32,

    // === Boss ===
    /// Horizontal distance at which a dormant boss wakes up
    pub boss_activation_range: f32,
    /// Motion per phase (index 0 = phase 1)
    pub phase_motion: [PhaseMotion; 3],
    /// Speed of aimed shots (units/s)
    pub aimed_shot_speed: f32,
    /// Speed of phase 3 burst shots (units/s)
    pub burst_shot_speed: f32,
    /// Projectile edge length
    pub projectile_size: f32,
    /// Angle between phase 2 spread shots (degrees)
    pub spread_degrees: f32,
    /// Angle between phase 3 burst shots (degrees)
    pub burst_step_degrees: f32,
    /// Boss health at or below which phase 2 starts
    pub phase2_health: i32,
    /// Boss health at or below which phase 3 starts
    pub phase3_health: i32,
    /// Distance at which the "boss ahead" warning is drawn
    pub boss_warning_range: f32,

    // === Loop ===
    /// Gap between "boss defeated" and "level complete" (ms)
    pub level_complete_delay_ms: f64,
    /// Upper bound on a single frame's dt (seconds)
    pub max_frame_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            move_speed: 200.0,
            friction: 0.8,
            friction_epsilon: 0.1,
            jump_speed: 500.0,
            stomp_bounce: 300.0,
            boss_bounce: 400.0,
            ground_tolerance: 20.0,
            patrol_tolerance: 10.0,
            boss_activation_range: 300.0,
            phase_motion: [
                PhaseMotion::new(100.0, 1.0, 0.0, 0.0),
                PhaseMotion::new(150.0, 2.0, 50.0, 4.0 / 3.0),
                PhaseMotion::new(200.0, 10.0 / 3.0, 100.0, 2.5),
            ],
            aimed_shot_speed: 300.0,
            burst_shot_speed: 200.0,
            projectile_size: 5.0,
            spread_degrees: 20.0,
            burst_step_degrees: 45.0,
            phase2_health: 3,
            phase3_health: 1,
            boss_warning_range: 400.0,
            level_complete_delay_ms: 500.0,
            max_frame_dt: 0.1,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; missing fields keep their defaults
    pub fn from_json_str(s: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Motion parameters for a boss phase (clamped to 1..=3)
    pub fn motion_for_phase(&self, phase: u8) -> PhaseMotion {
        let index = usize::from(phase.clamp(1, 3)) - 1;
        self.phase_motion[index]
    }

    /// Phase a boss at `health` must have reached at least
    pub fn phase_floor_for_health(&self, health: i32) -> u8 {
        if health <= self.phase3_health {
            3
        } else if health <= self.phase2_health {
            2
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "gravity": 500.0, "jump_speed": 320 }"#).unwrap();
        assert_eq!(tuning.gravity, 500.0);
        assert_eq!(tuning.jump_speed, 320.0);
        assert_eq!(tuning.move_speed, 200.0);
        assert_eq!(tuning.level_complete_delay_ms, 500.0);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json_string_pretty().unwrap();
        assert_eq!(Tuning::from_json_str(&json).unwrap(), tuning);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Tuning::from_json_str("{ gravity: }").is_err());
    }

    #[test]
    fn test_phase_floor_thresholds() {
        let tuning = Tuning::default();
        assert_eq!(tuning.phase_floor_for_health(5), 1);
        assert_eq!(tuning.phase_floor_for_health(4), 1);
        assert_eq!(tuning.phase_floor_for_health(3), 2);
        assert_eq!(tuning.phase_floor_for_health(2), 2);
        assert_eq!(tuning.phase_floor_for_health(1), 3);
        assert_eq!(tuning.phase_floor_for_health(-2), 3);
    }

    #[test]
    fn test_motion_for_phase_clamps() {
        let tuning = Tuning::default();
        assert_eq!(tuning.motion_for_phase(0), tuning.phase_motion[0]);
        assert_eq!(tuning.motion_for_phase(7), tuning.phase_motion[2]);
    }
}
