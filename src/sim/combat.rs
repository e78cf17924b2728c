//! Combat resolution
//!
//! Runs after everything has moved. Order within a frame is fixed: coins,
//! boss, enemies, projectiles. Hostile contacts are judged against the
//! player's momentum at the start of resolution, so stomping the boss and
//! an enemy in the same frame counts both. The first damaging contact
//! respawns the player and ends resolution for the frame.

use super::collision::Contact;
use super::state::{GameEvent, World};
use crate::tuning::Tuning;

/// What a resolution pass did to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unharmed,
    Damaged,
}

/// Resolve every player contact for this frame
pub fn resolve_collisions(world: &mut World, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    collect_coins(world, events);

    let contact = Contact::of(&world.player);
    if resolve_boss(world, &contact, tuning, events) == Outcome::Damaged {
        return;
    }
    if resolve_enemies(world, &contact, tuning, events) == Outcome::Damaged {
        return;
    }
    resolve_projectiles(world, events);
}

fn collect_coins(world: &mut World, events: &mut Vec<GameEvent>) {
    let player = world.player.rect;
    for coin in world.coins.iter_mut().filter(|c| !c.collected) {
        if player.overlaps(&coin.rect) {
            coin.collected = true;
            events.push(GameEvent::CoinCollected);
        }
    }
}

fn resolve_boss(
    world: &mut World,
    contact: &Contact,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    let respawn = world.hazard_respawn();
    let Some(boss) = world.boss.as_mut() else {
        return Outcome::Unharmed;
    };
    // Dormant and defeated bosses are harmless
    if !boss.active || boss.is_defeated() || !contact.rect.overlaps(&boss.rect) {
        return Outcome::Unharmed;
    }

    if contact.is_stomp(&boss.rect) {
        boss.health -= 1;
        world.player.vel.y = -tuning.boss_bounce;
        if boss.escalate_to(tuning.phase_floor_for_health(boss.health)) {
            log::info!("Boss enters phase {} at health {}", boss.phase, boss.health);
        }
        events.push(GameEvent::BossHit);
        Outcome::Unharmed
    } else {
        log::debug!("Player hit by boss");
        events.push(GameEvent::LifeLost);
        world.player.respawn(respawn);
        Outcome::Damaged
    }
}

fn resolve_enemies(
    world: &mut World,
    contact: &Contact,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) -> Outcome {
    let mut stomped = 0;
    let mut damaged = false;
    world.enemies.retain(|enemy| {
        if damaged || !contact.rect.overlaps(&enemy.rect) {
            return true;
        }
        if contact.is_stomp(&enemy.rect) {
            stomped += 1;
            false
        } else {
            damaged = true;
            true
        }
    });

    for _ in 0..stomped {
        // Keep the stronger bounce if the boss was stomped this frame too
        world.player.vel.y = world.player.vel.y.min(-tuning.stomp_bounce);
        // Stomps award points like a coin
        events.push(GameEvent::CoinCollected);
    }

    if damaged {
        log::debug!("Player hit by enemy");
        events.push(GameEvent::LifeLost);
        world.player.respawn(world.player_start);
        Outcome::Damaged
    } else {
        Outcome::Unharmed
    }
}

fn resolve_projectiles(world: &mut World, events: &mut Vec<GameEvent>) {
    let player = world.player.rect;
    // Projectiles always hurt, whatever direction the player is moving
    if let Some(index) = world
        .projectiles
        .iter()
        .position(|p| player.overlaps(&p.rect))
    {
        world.projectiles.remove(index);
        log::debug!("Player hit by projectile");
        events.push(GameEvent::LifeLost);
        let respawn = world.hazard_respawn();
        world.player.respawn(respawn);
    }
}
