//! Player movement and enemy patrol
//!
//! Explicit Euler integration with the measured frame dt. Gravity is applied
//! every frame, grounded or not; platform support then snaps the player
//! back onto the surface.

use super::collision::find_support;
use super::state::{EnemySprite, GameEvent, World};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Advance the player one frame: input, gravity, integration, bounds and
/// platform support
pub fn step_player(
    world: &mut World,
    input: &TickInput,
    dt: f32,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    let start = world.player_start;
    let bounds = world.bounds;
    let player = &mut world.player;

    // Horizontal: instant speed while held, exponential friction otherwise
    if input.left {
        player.vel.x = -tuning.move_speed;
    } else if input.right {
        player.vel.x = tuning.move_speed;
    } else {
        player.vel.x *= tuning.friction;
        if player.vel.x.abs() < tuning.friction_epsilon {
            player.vel.x = 0.0;
        }
    }

    if input.jump && player.on_ground {
        player.vel.y = -tuning.jump_speed;
        player.on_ground = false;
        if !world.jumping {
            world.jumping = true;
            events.push(GameEvent::PlayerJumped);
        }
    }

    player.vel.y += tuning.gravity * dt;

    let pos = player.rect.pos() + player.vel * dt;
    player.rect.set_pos(pos);

    // No leaving the playfield sideways
    let max_x = (bounds.x - player.rect.width).max(0.0);
    player.rect.x = player.rect.x.clamp(0.0, max_x);

    if player.rect.y > bounds.y {
        log::debug!("Player fell out of the world at x={:.0}", player.rect.x);
        events.push(GameEvent::LifeLost);
        player.respawn(start);
    }

    let was_on_ground = player.on_ground;
    player.on_ground = false;

    if let Some(platform) = find_support(player, &world.platforms, tuning.ground_tolerance) {
        player.on_ground = true;
        player.vel.y = 0.0;
        player.rect.y = platform.rect.y - player.rect.height;

        if !was_on_ground && world.jumping {
            world.jumping = false;
            events.push(GameEvent::PlayerLanded);
        }
    }

    player.update_sprite();
}

/// Walk enemies back and forth along the platform under their feet
pub fn patrol_enemies(world: &mut World, dt: f32, tuning: &Tuning) {
    for enemy in &mut world.enemies {
        enemy.rect.x += enemy.velocity_x * dt;

        let feet = enemy.rect.bottom();
        let footing = world.platforms.iter().find(|p| {
            feet >= p.rect.y
                && feet <= p.rect.y + tuning.patrol_tolerance
                && enemy.rect.x >= p.rect.x - enemy.rect.width
                && enemy.rect.x <= p.rect.right()
        });

        // Turn back toward the platform; only flip when heading outward so an
        // enemy past the edge doesn't jitter in place
        if let Some(platform) = footing {
            if enemy.rect.x <= platform.rect.x && enemy.velocity_x < 0.0 {
                enemy.velocity_x = -enemy.velocity_x;
            } else if enemy.rect.right() >= platform.rect.right() && enemy.velocity_x > 0.0 {
                enemy.velocity_x = -enemy.velocity_x;
            }
        }

        enemy.sprite = if enemy.velocity_x != 0.0 {
            EnemySprite::Walk
        } else {
            EnemySprite::Idle
        };
    }
}
