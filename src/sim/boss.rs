//! Boss AI and projectiles
//!
//! The boss sleeps until the player comes within range, then oscillates
//! inside its arena and fires patterns that get denser with each phase.

use glam::Vec2;

use super::state::{Boss, Projectile, World};
use crate::consts::PROJECTILE_COLOR;
use crate::geom::Rect;
use crate::tuning::Tuning;

/// Wake, move and fire the boss (no-op without a boss)
pub fn update_boss(world: &mut World, dt: f32, tuning: &Tuning) {
    let Some(boss) = world.boss.as_mut() else {
        return;
    };
    let player = world.player.rect;

    if !boss.active && (player.x - boss.rect.x).abs() < tuning.boss_activation_range {
        boss.active = true;
        boss.update_sprite();
        log::info!("Boss awakened (health {}, phase {})", boss.health, boss.phase);
    }
    // A defeated boss no longer moves or attacks
    if !boss.active || boss.is_defeated() {
        return;
    }

    let motion = tuning.motion_for_phase(boss.phase);
    let t = world.time;
    boss.vel = Vec2::new(
        motion.amp_x * (t * motion.freq_x).sin(),
        motion.amp_y * (t * motion.freq_y).cos(),
    );

    let pos = boss.rect.pos() + boss.vel * dt;
    boss.rect.set_pos(pos);
    if let Some(arena) = &world.arena {
        boss.rect.contain_within(&arena.bounds);
    }

    boss.attack_timer -= dt;
    if boss.attack_timer <= 0.0 {
        world
            .projectiles
            .extend(attack_pattern(boss, player.pos(), tuning));
        // Later phases attack faster
        boss.attack_timer = boss.attack_cooldown / f32::from(boss.phase);
    }
}

/// Projectiles for one attack at the boss's current phase.
///
/// Phase 1 fires one shot at `target`, phase 2 a three-shot spread around
/// it, phase 3 a full ring.
pub fn attack_pattern(boss: &Boss, target: Vec2, tuning: &Tuning) -> Vec<Projectile> {
    let aimed = |offset_degrees: f32| {
        let to_target = target - boss.rect.pos();
        let dir = Vec2::from_angle(offset_degrees.to_radians())
            .rotate(to_target)
            .try_normalize()
            .unwrap_or(Vec2::Y);
        spawn(&boss.rect, dir * tuning.aimed_shot_speed, tuning.projectile_size)
    };

    match boss.phase {
        1 => vec![aimed(0.0)],
        2 => vec![
            aimed(-tuning.spread_degrees),
            aimed(0.0),
            aimed(tuning.spread_degrees),
        ],
        _ => {
            let step = tuning.burst_step_degrees.max(1.0);
            let count = (360.0 / step).floor() as usize;
            (0..count)
                .map(|i| {
                    let dir = Vec2::from_angle((i as f32 * step).to_radians());
                    spawn(&boss.rect, dir * tuning.burst_shot_speed, tuning.projectile_size)
                })
                .collect()
        }
    }
}

/// A projectile centered on `source`
fn spawn(source: &Rect, vel: Vec2, size: f32) -> Projectile {
    let center = source.center();
    Projectile {
        rect: Rect::new(center.x - size / 2.0, center.y - size / 2.0, size, size),
        color: PROJECTILE_COLOR,
        vel,
    }
}

/// Move projectiles and drop those that left the playfield
pub fn update_projectiles(world: &mut World, dt: f32) {
    let bounds = world.bounds;
    world.projectiles.retain_mut(|p| {
        let pos = p.rect.pos() + p.vel * dt;
        p.rect.set_pos(pos);
        pos.x >= 0.0 && pos.x <= bounds.x && pos.y >= 0.0 && pos.y <= bounds.y
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::level::{self, BossArena, BossDef, Level, Point};
    use crate::sim::state::BossSprite;

    const DT: f32 = 1.0 / 60.0;

    fn boss_world() -> World {
        World::new(&level::boss_level(), Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }

    fn close_to_boss(world: &mut World) {
        world.player.respawn(Vec2::new(770.0, 250.0));
    }

    #[test]
    fn test_dormant_until_player_is_near() {
        let mut world = boss_world();
        let tuning = Tuning::default();

        update_boss(&mut world, DT, &tuning);
        let boss = world.boss.as_ref().unwrap();
        assert!(!boss.active);
        assert_eq!(boss.rect.pos(), Vec2::new(1050.0, 230.0));
        assert!(world.projectiles.is_empty());

        close_to_boss(&mut world);
        update_boss(&mut world, DT, &tuning);
        let boss = world.boss.as_ref().unwrap();
        assert!(boss.active);
        assert_eq!(boss.sprite, BossSprite::Active);
        // Timer starts at zero, so the first active frame attacks
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(boss.attack_timer, 2.0);

        // Activation is one-way
        world.player.respawn(Vec2::new(0.0, 350.0));
        update_boss(&mut world, DT, &tuning);
        assert!(world.boss.as_ref().unwrap().active);
    }

    #[test]
    fn test_defeated_boss_is_inert() {
        let mut world = boss_world();
        let tuning = Tuning::default();
        close_to_boss(&mut world);
        update_boss(&mut world, DT, &tuning);
        world.projectiles.clear();

        world.boss.as_mut().unwrap().health = 0;
        let pos = world.boss.as_ref().unwrap().rect.pos();
        for _ in 0..200 {
            world.time += DT;
            update_boss(&mut world, DT, &tuning);
        }
        assert!(world.projectiles.is_empty());
        assert_eq!(world.boss.as_ref().unwrap().rect.pos(), pos);
    }

    #[test]
    fn test_stays_inside_arena() {
        let mut world = boss_world();
        let tuning = Tuning::default();
        close_to_boss(&mut world);

        let arena = world.arena.unwrap().bounds;
        for phase in 1..=3 {
            world.boss.as_mut().unwrap().escalate_to(phase);
            for _ in 0..300 {
                world.time += DT;
                update_boss(&mut world, DT, &tuning);
                let r = world.boss.as_ref().unwrap().rect;
                assert!(r.x >= arena.x && r.right() <= arena.right() + 1e-3);
                assert!(r.y >= arena.y && r.bottom() <= arena.bottom() + 1e-3);
            }
        }
    }

    #[test]
    fn test_stays_inside_authored_arena() {
        let arena = Rect::new(250.0, 120.0, 200.0, 150.0);
        let level = Level {
            player_start: Point::new(260.0, 60.0),
            boss: Some(BossDef {
                x: Some(300.0),
                y: Some(150.0),
                ..Default::default()
            }),
            is_boss_level: true,
            boss_arena: Some(BossArena {
                bounds: arena,
                respawn: Point::new(260.0, 60.0),
            }),
            ..Default::default()
        };
        let mut world = World::new(&level, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        let tuning = Tuning::default();
        assert_eq!(world.arena.unwrap().bounds, arena);

        for phase in 1..=3 {
            world.boss.as_mut().unwrap().escalate_to(phase);
            for _ in 0..300 {
                world.time += DT;
                update_boss(&mut world, DT, &tuning);
                let r = world.boss.as_ref().unwrap().rect;
                assert!(r.x >= arena.x && r.right() <= arena.right() + 1e-3);
                assert!(r.y >= arena.y && r.bottom() <= arena.bottom() + 1e-3);
            }
        }
        assert!(world.boss.as_ref().unwrap().active);
    }

    #[test]
    fn test_phase_motion() {
        let mut world = boss_world();
        let tuning = Tuning::default();
        close_to_boss(&mut world);

        world.time = std::f32::consts::FRAC_PI_2;
        update_boss(&mut world, 0.0, &tuning);
        let vel = world.boss.as_ref().unwrap().vel;
        assert!((vel.x - 100.0).abs() < 1e-3);
        assert_eq!(vel.y, 0.0);

        world.boss.as_mut().unwrap().escalate_to(3);
        world.time = 0.0;
        update_boss(&mut world, 0.0, &tuning);
        let vel = world.boss.as_ref().unwrap().vel;
        assert_eq!(vel.x, 0.0);
        assert!((vel.y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_attack_cooldown_shrinks_with_phase() {
        let mut world = boss_world();
        let tuning = Tuning::default();
        close_to_boss(&mut world);
        world.boss.as_mut().unwrap().escalate_to(2);

        update_boss(&mut world, DT, &tuning);
        assert_eq!(world.projectiles.len(), 3);
        assert_eq!(world.boss.as_ref().unwrap().attack_timer, 1.0);

        // Not yet
        update_boss(&mut world, 0.5, &tuning);
        assert_eq!(world.projectiles.len(), 3);

        world.boss.as_mut().unwrap().escalate_to(3);
        update_boss(&mut world, 0.5, &tuning);
        assert_eq!(world.projectiles.len(), 3 + 8);
        let timer = world.boss.as_ref().unwrap().attack_timer;
        assert!((timer - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_aimed_shot_targets_player_at_fire_time() {
        let level = Level {
            boss: Some(BossDef {
                x: Some(700.0),
                y: Some(100.0),
                ..Default::default()
            }),
            is_boss_level: true,
            ..Default::default()
        };
        let world = World::new(&level, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        let boss = world.boss.as_ref().unwrap();
        let tuning = Tuning::default();

        let shots = attack_pattern(boss, Vec2::new(700.0, 400.0), &tuning);
        assert_eq!(shots.len(), 1);
        let shot = &shots[0];
        assert!((shot.vel - Vec2::new(0.0, 300.0)).length() < 1e-3);
        // Spawned centered on the boss
        assert_eq!(shot.rect.center(), boss.rect.center());
        assert_eq!(shot.rect.size(), Vec2::splat(5.0));
    }

    #[test]
    fn test_spread_is_symmetric() {
        let level = Level {
            boss: Some(BossDef {
                phase: Some(2),
                ..Default::default()
            }),
            is_boss_level: true,
            ..Default::default()
        };
        let world = World::new(&level, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        let shots = attack_pattern(
            world.boss.as_ref().unwrap(),
            Vec2::new(300.0, 0.0),
            &Tuning::default(),
        );
        assert_eq!(shots.len(), 3);
        let center = shots[1].vel;
        assert!((center - Vec2::new(300.0, 0.0)).length() < 1e-3);
        for side in [&shots[0], &shots[2]] {
            assert!((side.vel.length() - 300.0).abs() < 1e-3);
            let angle = side.vel.angle_to(center).to_degrees().abs();
            assert!((angle - 20.0).abs() < 1e-2);
        }
    }

    #[test]
    fn test_burst_covers_full_circle() {
        let level = Level {
            player_start: Point::new(0.0, 0.0),
            boss: Some(BossDef {
                phase: Some(3),
                ..Default::default()
            }),
            is_boss_level: true,
            ..Default::default()
        };
        let world = World::new(&level, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT));
        let shots = attack_pattern(
            world.boss.as_ref().unwrap(),
            Vec2::ZERO,
            &Tuning::default(),
        );
        assert_eq!(shots.len(), 8);
        let sum: Vec2 = shots.iter().map(|s| s.vel).sum();
        assert!(sum.length() < 1e-2);
        assert!(shots.iter().all(|s| (s.vel.length() - 200.0).abs() < 1e-3));
    }

    #[test]
    fn test_projectiles_leave_playfield() {
        let mut world = boss_world();
        world.projectiles.push(spawn(
            &Rect::new(10.0, 10.0, 0.0, 0.0),
            Vec2::new(-300.0, 0.0),
            5.0,
        ));
        world.projectiles.push(spawn(
            &Rect::new(400.0, 200.0, 0.0, 0.0),
            Vec2::new(0.0, 10.0),
            5.0,
        ));

        update_projectiles(&mut world, 0.1);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].rect.pos(), Vec2::new(397.5, 198.5));
    }
}
