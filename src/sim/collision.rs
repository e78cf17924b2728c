//! Collision tests between the player and the level
//!
//! All checks are axis-aligned; the response (snapping, bouncing, damage)
//! happens in the physics and combat steps.

use glam::Vec2;

use super::state::{Platform, Player};
use crate::geom::Rect;

/// Does `platform` hold the player up this frame?
///
/// The player must be falling or at rest vertically, with feet at or at most
/// `tolerance` below the platform top, and overlapping it horizontally.
pub fn supports(player: &Player, platform: &Platform, tolerance: f32) -> bool {
    let feet = player.rect.bottom();
    let top = platform.rect.y;

    player.vel.y >= 0.0
        && feet >= top
        && feet <= top + tolerance
        && player.rect.overlaps_x(&platform.rect)
}

/// First platform (in level order) that supports the player
pub fn find_support<'a>(
    player: &Player,
    platforms: &'a [Platform],
    tolerance: f32,
) -> Option<&'a Platform> {
    platforms.iter().find(|p| supports(player, p, tolerance))
}

/// Player state at the start of combat resolution, so that every hostile
/// contact in a frame is judged against the same momentum
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub rect: Rect,
    pub vel: Vec2,
}

impl Contact {
    pub fn of(player: &Player) -> Self {
        Self {
            rect: player.rect,
            vel: player.vel,
        }
    }

    /// Overlapping `target` while falling with feet above its vertical midpoint
    pub fn is_stomp(&self, target: &Rect) -> bool {
        self.rect.overlaps(target) && self.vel.y > 0.0 && self.rect.bottom() < target.center().y
    }
}
