//! Canvas 2D rendering
//!
//! One immediate-mode pass per frame over the whole world, back to front:
//! sky, platforms, coins, enemies, boss, projectiles, player, then the
//! warning overlay for a sleeping boss.

pub mod recording;

use std::f32::consts::PI;

use glam::Vec2;

use crate::color::Color;
use crate::geom::Rect;
use crate::sim::{Boss, Enemy, Player, World};
use crate::tuning::Tuning;

pub use recording::{DrawCommand, RecordingCanvas, RecordingSurface};

pub const SKY_COLOR: Color = Color::rgb(0x87, 0xce, 0xeb);
pub const PLATFORM_EDGE_COLOR: Color = Color::rgb(0x27, 0xae, 0x60);
/// Coin centers by tier: gold, silver, bronze
pub const COIN_INNER_COLORS: [Color; 3] = [
    Color::rgb(0xf3, 0x9c, 0x12),
    Color::rgb(0xbd, 0xc3, 0xc7),
    Color::rgb(0xcd, 0x7f, 0x32),
];
pub const HEALTH_BAR_BG: Color = Color::rgb(0xe7, 0x4c, 0x3c);
pub const HEALTH_BAR_FG: Color = Color::rgb(0x2e, 0xcc, 0x71);
pub const WARNING_ZONE_COLOR: Color = Color::rgba(0xff, 0x00, 0x00, 0x33);

const PLATFORM_EDGE_HEIGHT: f32 = 5.0;
const HEALTH_BAR_WIDTH: f32 = 80.0;
const HEALTH_BAR_HEIGHT: f32 = 10.0;

/// Line style for outlines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// The drawing operations the game needs from a 2D context.
///
/// Text is horizontally centered on `pos`.
pub trait Canvas2d {
    /// Clear the whole surface
    fn clear(&mut self, size: Vec2);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Arc from `start` to `end` radians, clockwise in screen space
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, stroke: Stroke);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke);
    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: Color);
}

/// Something the engine can draw on
pub trait Surface {
    /// Pixel size; also the playfield size
    fn size(&self) -> Vec2;
    /// A 2D drawing context, if the surface can provide one
    fn context_2d(&self) -> Option<Box<dyn Canvas2d>>;
}

/// Draw one frame of `world`
pub fn render(world: &World, tuning: &Tuning, canvas: &mut dyn Canvas2d) {
    let size = world.bounds;
    canvas.clear(size);
    canvas.fill_rect(Rect::new(0.0, 0.0, size.x, size.y), SKY_COLOR);

    for platform in &world.platforms {
        let r = platform.rect;
        canvas.fill_rect(r, platform.color);
        canvas.fill_rect(
            Rect::new(r.x, r.y, r.width, PLATFORM_EDGE_HEIGHT.min(r.height)),
            PLATFORM_EDGE_COLOR,
        );
    }

    for coin in world.coins.iter().filter(|c| !c.collected) {
        let center = coin.rect.center();
        canvas.fill_circle(center, coin.rect.width / 2.0, coin.color);
        let inner = COIN_INNER_COLORS[usize::from(coin.tier).min(COIN_INNER_COLORS.len() - 1)];
        canvas.fill_circle(center, coin.rect.width / 4.0, inner);
    }

    for enemy in &world.enemies {
        draw_enemy(enemy, canvas);
    }

    if let Some(boss) = world.boss.as_ref().filter(|b| b.active) {
        draw_boss(boss, canvas);
    }

    for projectile in &world.projectiles {
        let r = projectile.rect;
        canvas.fill_circle(r.center(), r.width / 2.0, projectile.color);
    }

    draw_player(&world.player, canvas);
    draw_boss_warning(world, tuning, canvas);
}

fn draw_enemy(enemy: &Enemy, canvas: &mut dyn Canvas2d) {
    let r = enemy.rect;
    canvas.fill_rect(r, enemy.color);
    canvas.fill_circle(Vec2::new(r.x + 10.0, r.y + 10.0), 3.0, Color::WHITE);
    canvas.fill_circle(Vec2::new(r.right() - 10.0, r.y + 10.0), 3.0, Color::WHITE);
    canvas.stroke_line(
        Vec2::new(r.x + 10.0, r.y + 25.0),
        Vec2::new(r.right() - 10.0, r.y + 25.0),
        Stroke::new(Color::WHITE, 2.0),
    );
}

fn draw_boss(boss: &Boss, canvas: &mut dyn Canvas2d) {
    let r = boss.rect;
    let face = Stroke::new(Color::WHITE, 3.0);

    canvas.fill_rect(r, boss.color);
    // Eyes
    canvas.fill_circle(Vec2::new(r.x + 20.0, r.y + 20.0), 6.0, Color::WHITE);
    canvas.fill_circle(Vec2::new(r.right() - 20.0, r.y + 20.0), 6.0, Color::WHITE);
    // Angry brows
    canvas.stroke_line(
        Vec2::new(r.x + 10.0, r.y + 10.0),
        Vec2::new(r.x + 30.0, r.y + 20.0),
        face,
    );
    canvas.stroke_line(
        Vec2::new(r.right() - 10.0, r.y + 10.0),
        Vec2::new(r.right() - 30.0, r.y + 20.0),
        face,
    );
    // Mouth
    canvas.stroke_line(
        Vec2::new(r.x + 20.0, r.y + 60.0),
        Vec2::new(r.right() - 20.0, r.y + 60.0),
        face,
    );

    let bar = Rect::new(
        r.x + (r.width - HEALTH_BAR_WIDTH) / 2.0,
        r.y - 20.0,
        HEALTH_BAR_WIDTH,
        HEALTH_BAR_HEIGHT,
    );
    let fraction = if boss.max_health > 0 {
        (boss.health as f32 / boss.max_health as f32).clamp(0.0, 1.0)
    } else {
        0.0
    };
    canvas.fill_rect(bar, HEALTH_BAR_BG);
    canvas.fill_rect(
        Rect::new(bar.x, bar.y, bar.width * fraction, bar.height),
        HEALTH_BAR_FG,
    );
    canvas.stroke_rect(bar, Stroke::new(Color::WHITE, 2.0));

    canvas.fill_text(
        &format!("Phase {}", boss.phase),
        Vec2::new(r.center().x, r.y - 25.0),
        14.0,
        Color::WHITE,
    );
}

fn draw_player(player: &Player, canvas: &mut dyn Canvas2d) {
    let r = player.rect;
    canvas.fill_rect(r, player.color);
    canvas.fill_circle(Vec2::new(r.x + 10.0, r.y + 15.0), 3.0, Color::WHITE);
    canvas.fill_circle(Vec2::new(r.right() - 10.0, r.y + 15.0), 3.0, Color::WHITE);
    // Smile
    canvas.stroke_arc(
        Vec2::new(r.center().x, r.y + 25.0),
        5.0,
        0.0,
        PI,
        Stroke::new(Color::WHITE, 2.0),
    );
}

/// Tint the arena while the player approaches a sleeping boss
fn draw_boss_warning(world: &World, tuning: &Tuning, canvas: &mut dyn Canvas2d) {
    let (Some(boss), Some(arena)) = (&world.boss, &world.arena) else {
        return;
    };
    if boss.active || (world.player.rect.x - boss.rect.x).abs() >= tuning.boss_warning_range {
        return;
    }

    let zone = Rect::new(arena.bounds.x, 0.0, arena.bounds.width, world.bounds.y);
    canvas.fill_rect(zone, WARNING_ZONE_COLOR);
    canvas.fill_text(
        "BOSS AHEAD",
        Vec2::new(zone.center().x, arena.bounds.y),
        20.0,
        Color::WHITE,
    );
}
