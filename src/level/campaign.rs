//! Built-in three-level campaign
//!
//! Level 1 is a gentle introduction, level 2 adds gaps in the ground, level 3
//! ends in the boss arena.

use super::{BossDef, CoinDef, EnemyDef, Level, PlatformDef, Point};
use crate::color::Color;

const GREEN: Color = Color::rgb(0x2e, 0xcc, 0x71);
const BLUE: Color = Color::rgb(0x34, 0x98, 0xdb);
const PURPLE: Color = Color::rgb(0x9b, 0x59, 0xb6);
const GOLD: Color = Color::rgb(0xf1, 0xc4, 0x0f);
const ORANGE: Color = Color::rgb(0xf3, 0x9c, 0x12);
const RED: Color = Color::rgb(0xe7, 0x4c, 0x3c);
const DARK_RED: Color = Color::rgb(0xc0, 0x39, 0x2b);

/// All campaign levels in play order
pub fn campaign() -> Vec<Level> {
    vec![initial_level(), level2(), boss_level()]
}

pub fn initial_level() -> Level {
    let platform = |x, y, w, h| PlatformDef::new(x, y, w, h).with_color(GREEN);
    let coin = |x, y| CoinDef::at(x, y).with_color(GOLD);
    let enemy = |x, y, vx| EnemyDef::new(x, y, 30.0, vx).with_color(RED);

    Level {
        name: "Warm Up".into(),
        player_start: Point::new(50.0, 350.0),
        platforms: vec![
            // Ground
            platform(0.0, 400.0, 800.0, 50.0),
            // Floating staircase
            platform(200.0, 300.0, 100.0, 20.0),
            platform(350.0, 250.0, 100.0, 20.0),
            platform(500.0, 200.0, 100.0, 20.0),
            platform(650.0, 150.0, 100.0, 20.0),
            // Small steps
            platform(100.0, 350.0, 50.0, 20.0),
            platform(300.0, 320.0, 30.0, 20.0),
        ],
        coins: vec![
            // On platforms
            coin(230.0, 270.0),
            coin(380.0, 220.0),
            coin(530.0, 170.0),
            coin(680.0, 120.0),
            // Mid-air
            coin(150.0, 300.0),
            coin(280.0, 250.0),
            coin(430.0, 200.0),
            coin(600.0, 150.0),
        ],
        enemies: vec![
            enemy(300.0, 370.0, 2.0),
            enemy(500.0, 370.0, -1.5),
            enemy(220.0, 270.0, 1.0),
        ],
        boss: None,
        is_boss_level: false,
        boss_arena: None,
    }
}

pub fn level2() -> Level {
    let platform = |x, y, w, h| PlatformDef::new(x, y, w, h).with_color(BLUE);
    let coin = |x, y| CoinDef::at(x, y).with_color(ORANGE);

    Level {
        name: "Mind the Gap".into(),
        player_start: Point::new(50.0, 350.0),
        platforms: vec![
            // Ground with gaps
            platform(0.0, 400.0, 200.0, 50.0),
            platform(300.0, 400.0, 200.0, 50.0),
            platform(600.0, 400.0, 200.0, 50.0),
            // Floating
            platform(150.0, 300.0, 80.0, 20.0),
            platform(300.0, 250.0, 80.0, 20.0),
            platform(450.0, 300.0, 80.0, 20.0),
            platform(600.0, 250.0, 80.0, 20.0),
            // High
            platform(200.0, 180.0, 60.0, 20.0),
            platform(400.0, 150.0, 60.0, 20.0),
            platform(600.0, 120.0, 60.0, 20.0),
        ],
        coins: vec![
            // Over the gaps
            coin(240.0, 350.0),
            coin(540.0, 350.0),
            // On platforms
            coin(170.0, 270.0),
            coin(320.0, 220.0),
            coin(470.0, 270.0),
            coin(620.0, 220.0),
            // High
            coin(210.0, 150.0),
            coin(410.0, 120.0),
            coin(610.0, 90.0),
        ],
        enemies: vec![
            EnemyDef::new(50.0, 370.0, 30.0, 1.5).with_color(RED),
            EnemyDef::new(350.0, 370.0, 30.0, 2.0).with_color(RED),
            EnemyDef::new(650.0, 370.0, 30.0, 1.5).with_color(RED),
            EnemyDef::new(160.0, 270.0, 30.0, 1.0).with_color(DARK_RED),
            EnemyDef::new(460.0, 270.0, 30.0, 1.0).with_color(DARK_RED),
        ],
        boss: None,
        is_boss_level: false,
        boss_arena: None,
    }
}

/// Final level; the boss waits in the default arena on the right
pub fn boss_level() -> Level {
    let platform = |x, y, w, h| PlatformDef::new(x, y, w, h).with_color(PURPLE);
    let coin = |x, y| CoinDef::at(x, y).with_color(GOLD);

    Level {
        name: "Boss Arena".into(),
        player_start: Point::new(50.0, 350.0),
        platforms: vec![
            // Start
            platform(0.0, 400.0, 150.0, 50.0),
            // Stepping stones
            platform(200.0, 400.0, 60.0, 20.0),
            platform(300.0, 350.0, 60.0, 20.0),
            platform(400.0, 300.0, 60.0, 20.0),
            platform(500.0, 250.0, 60.0, 20.0),
            platform(600.0, 200.0, 60.0, 20.0),
            // Arena floor
            platform(700.0, 300.0, 700.0, 20.0),
            // Alternative path
            platform(150.0, 300.0, 40.0, 20.0),
            platform(250.0, 230.0, 40.0, 20.0),
            platform(350.0, 180.0, 40.0, 20.0),
            platform(450.0, 130.0, 40.0, 20.0),
            platform(580.0, 100.0, 40.0, 20.0),
        ],
        coins: vec![
            // Main path
            coin(210.0, 370.0),
            coin(310.0, 320.0),
            coin(410.0, 270.0),
            coin(510.0, 220.0),
            coin(610.0, 170.0),
            // Alternative path bonus
            coin(160.0, 270.0),
            coin(260.0, 200.0),
            coin(360.0, 150.0),
            coin(460.0, 100.0),
            coin(590.0, 70.0),
        ],
        enemies: vec![
            // Guards
            EnemyDef::new(220.0, 370.0, 30.0, 0.5).with_color(RED),
            EnemyDef::new(420.0, 270.0, 30.0, 0.7).with_color(RED),
            EnemyDef::new(620.0, 170.0, 30.0, 1.0).with_color(RED),
            // Bigger ones
            EnemyDef::new(100.0, 370.0, 40.0, 1.2).with_color(DARK_RED),
            EnemyDef::new(300.0, 320.0, 35.0, 1.5).with_color(DARK_RED),
        ],
        boss: Some(BossDef {
            x: Some(1050.0),
            y: Some(230.0),
            width: Some(80.0),
            height: Some(80.0),
            velocity_x: Some(0.0),
            velocity_y: Some(0.0),
            health: Some(5),
            color: Some(Color::rgb(0x8b, 0x5c, 0xf6)),
            phase: Some(1),
            attack_cooldown: Some(2.0),
        }),
        is_boss_level: true,
        boss_arena: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_shape() {
        let levels = campaign();
        assert_eq!(levels.len(), 3);
        assert!(levels[..2].iter().all(|l| l.active_boss().is_none()));
        assert!(levels[2].active_boss().is_some());
        assert!(levels.iter().all(|l| !l.platforms.is_empty()));
    }

    #[test]
    fn test_non_boss_levels_have_coins() {
        for level in campaign().iter().filter(|l| !l.is_boss_level) {
            assert!(!level.coins.is_empty(), "{} would be an instant win", level.name);
        }
    }
}
