//! Game engine: owns the world and drives it from the host's frame clock
//!
//! The loop is `stopped -> running -> stopped`. `start` requests a frame,
//! each frame requests the next, and `stop` (or level completion) cancels
//! the pending request. Frame callbacks hold only a weak reference, so a
//! dropped engine simply stops receiving frames.

pub mod callbacks;
pub mod frame;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

pub use callbacks::Callbacks;
pub use frame::{Completion, EngineCore, FrameReport};

use crate::error::EngineError;
use crate::input::KeyState;
use crate::level::Level;
use crate::platform::{FrameHandle, Host, ListenerId};
use crate::renderer::Surface;
use crate::sim::World;
use crate::tuning::Tuning;

struct Shared {
    core: RefCell<EngineCore>,
    callbacks: Rc<Callbacks>,
    host: Host,
    keys: Rc<RefCell<KeyState>>,
    listener: Cell<Option<ListenerId>>,
    frame: Cell<Option<FrameHandle>>,
    running: Cell<bool>,
}

impl Shared {
    fn start(self: &Rc<Self>) {
        if self.running.get() {
            return;
        }
        self.running.set(true);
        self.core
            .borrow_mut()
            .anchor_clock(self.host.scheduler.now());
        log::debug!("Frame loop started");
        self.request_frame();
    }

    fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(handle) = self.frame.take() {
            self.host.scheduler.cancel_frame(handle);
        }
        log::debug!("Frame loop stopped");
    }

    fn request_frame(self: &Rc<Self>) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let handle = self.host.scheduler.request_frame(Box::new(move |timestamp| {
            if let Some(shared) = weak.upgrade() {
                shared.run_frame(timestamp);
            }
        }));
        if handle.is_none() && self.running.replace(false) {
            log::warn!("Frame request refused, loop stopped");
        }
        self.frame.set(handle);
    }

    fn run_frame(self: &Rc<Self>, timestamp: f64) {
        self.frame.set(None);
        if !self.running.get() {
            return;
        }

        let input = self.keys.borrow_mut().snapshot();
        let report = self.core.borrow_mut().frame(timestamp, input);

        match report.completion {
            Completion::Running => self.request_frame(),
            Completion::LevelComplete => self.stop(),
            Completion::BossDefeated => {
                self.stop();
                self.schedule_level_complete();
            }
        }

        // No borrows held: hooks may call back into the engine
        for event in report.events {
            self.callbacks.dispatch(event);
        }
    }

    /// Level completion after a boss fight arrives on a timer, independent
    /// of the frame loop
    fn schedule_level_complete(&self) {
        let delay = self.core.borrow().tuning.level_complete_delay_ms;
        let callbacks = Rc::clone(&self.callbacks);
        self.host.scheduler.set_timeout(
            delay,
            Box::new(move || {
                if let Some(hook) = &callbacks.on_level_complete {
                    hook();
                }
            }),
        );
    }

    fn reset_level(&self, level: &Level) {
        self.core.borrow_mut().reset_level(level);
    }

    fn teardown(&self) {
        self.stop();
        if let Some(id) = self.listener.take() {
            self.host.keys.detach(id);
        }
        log::debug!("Engine cleaned up");
    }
}

/// The platformer engine.
///
/// Construction loads the level, draws it once and starts listening for
/// keys; the loop itself waits for [`start`](Self::start).
pub struct GameEngine {
    shared: Rc<Shared>,
}

impl GameEngine {
    pub fn new(
        surface: &dyn Surface,
        level: &Level,
        callbacks: Callbacks,
        host: Host,
    ) -> Result<Self, EngineError> {
        Self::with_tuning(surface, level, callbacks, host, Tuning::default())
    }

    pub fn with_tuning(
        surface: &dyn Surface,
        level: &Level,
        callbacks: Callbacks,
        host: Host,
        tuning: Tuning,
    ) -> Result<Self, EngineError> {
        let core = EngineCore::new(surface, level, tuning)?;
        let keys = Rc::new(RefCell::new(KeyState::new()));
        let listener = host.keys.attach(Rc::clone(&keys));

        Ok(Self {
            shared: Rc::new(Shared {
                core: RefCell::new(core),
                callbacks: Rc::new(callbacks),
                host,
                keys,
                listener: Cell::new(Some(listener)),
                frame: Cell::new(None),
                running: Cell::new(false),
            }),
        })
    }

    /// Replace the current level. Works whether or not the loop is running.
    pub fn reset_level(&self, level: &Level) {
        self.shared.reset_level(level);
    }

    /// Start the frame loop; no-op if already running
    pub fn start(&self) {
        self.shared.start();
    }

    /// Stop the frame loop, keeping all state; no-op if stopped
    pub fn stop(&self) {
        self.shared.stop();
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }

    /// Stop the loop and remove the key listeners. Dropping the engine does
    /// the same.
    pub fn cleanup(self) {
        drop(self);
    }

    /// A weak handle for use inside callbacks
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Read access to the entity model
    pub fn with_world<R>(&self, f: impl FnOnce(&World) -> R) -> R {
        f(&self.shared.core.borrow().world)
    }

    /// Mutable access to the entity model, for tools and tests. Changes show
    /// up on the next frame.
    pub fn with_world_mut<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        f(&mut self.shared.core.borrow_mut().world)
    }
}

impl Drop for GameEngine {
    fn drop(&mut self) {
        self.shared.teardown();
    }
}

/// Weak reference to a [`GameEngine`]. Every method is a no-op once the
/// engine is gone.
#[derive(Clone)]
pub struct EngineHandle {
    shared: Weak<Shared>,
}

impl EngineHandle {
    pub fn is_alive(&self) -> bool {
        self.shared.strong_count() > 0
    }

    pub fn is_running(&self) -> bool {
        self.shared.upgrade().is_some_and(|s| s.running.get())
    }

    pub fn reset_level(&self, level: &Level) {
        if let Some(shared) = self.shared.upgrade() {
            shared.reset_level(level);
        }
    }

    pub fn start(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.start();
        }
    }

    pub fn stop(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::consts::*;
    use crate::input::Key;
    use crate::level::{self, BossDef, CoinDef, PlatformDef, Point};
    use crate::platform::{ManualKeys, ManualScheduler, Scheduler};
    use crate::renderer::RecordingSurface;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct Rig {
        scheduler: Rc<ManualScheduler>,
        keys: Rc<ManualKeys>,
        surface: RecordingSurface,
        log: Log,
    }

    impl Rig {
        fn new() -> Self {
            Self::with_scheduler(ManualScheduler::new())
        }

        fn with_scheduler(scheduler: ManualScheduler) -> Self {
            Self {
                scheduler: Rc::new(scheduler),
                keys: Rc::new(ManualKeys::new()),
                surface: RecordingSurface::new(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
                log: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn host(&self) -> Host {
            Host::new(self.scheduler.clone(), self.keys.clone())
        }

        fn callbacks(&self) -> Callbacks {
            let hook = |name: &'static str| {
                let log = self.log.clone();
                move || log.borrow_mut().push(name)
            };
            Callbacks::new()
                .on_life_lost(hook("life_lost"))
                .on_coin_collect(hook("coin"))
                .on_level_complete(hook("level_complete"))
                .on_player_jump(hook("jump"))
                .on_player_land(hook("land"))
                .on_boss_hit(hook("boss_hit"))
                .on_boss_defeated(hook("boss_defeated"))
        }

        fn engine(&self, level: &Level) -> GameEngine {
            GameEngine::new(&self.surface, level, self.callbacks(), self.host()).unwrap()
        }

        fn frames(&self, n: usize) {
            for _ in 0..n {
                self.scheduler.step();
            }
        }

        fn count(&self, name: &str) -> usize {
            self.log.borrow().iter().filter(|n| **n == name).count()
        }
    }

    /// Floor plus one out-of-reach coin so the level never completes
    fn floor_level() -> Level {
        Level {
            player_start: Point::new(50.0, 350.0),
            platforms: vec![PlatformDef::new(0.0, 400.0, 800.0, 50.0)],
            coins: vec![CoinDef::at(700.0, 50.0)],
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_context() {
        let rig = Rig::new();
        let surface = RecordingSurface::without_context(Vec2::new(800.0, 450.0));
        let result = GameEngine::new(&surface, &floor_level(), Callbacks::new(), rig.host());
        assert!(matches!(result, Err(EngineError::MissingContext)));
        assert_eq!(rig.keys.listener_count(), 0);
    }

    #[test]
    fn test_construct_listens_but_does_not_run() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());
        assert_eq!(rig.keys.listener_count(), 1);
        assert!(!engine.is_running());
        assert_eq!(rig.scheduler.pending_frames(), 0);
        assert!(!rig.surface.commands().is_empty());
    }

    #[test]
    fn test_start_and_stop_are_idempotent() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());

        engine.start();
        engine.start();
        assert!(engine.is_running());
        assert_eq!(rig.scheduler.pending_frames(), 1);

        rig.frames(3);
        assert_eq!(rig.scheduler.pending_frames(), 1);

        engine.stop();
        engine.stop();
        assert!(!engine.is_running());
        assert_eq!(rig.scheduler.pending_frames(), 0);
    }

    #[test]
    fn test_refused_frame_stops_the_loop() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());

        rig.scheduler.set_refuse_frames(true);
        engine.start();
        assert!(!engine.is_running());

        // Recovers once frames are available again
        rig.scheduler.set_refuse_frames(false);
        engine.start();
        assert!(engine.is_running());
        rig.frames(2);

        // Refused while running: the loop ends instead of hanging
        rig.scheduler.set_refuse_frames(true);
        rig.frames(1);
        assert!(!engine.is_running());
        assert_eq!(rig.scheduler.pending_frames(), 0);

        rig.scheduler.set_refuse_frames(false);
        engine.start();
        assert!(engine.is_running());
        assert_eq!(rig.scheduler.pending_frames(), 1);
    }

    #[test]
    fn test_settles_on_floor() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());
        engine.start();
        rig.frames(120);

        engine.with_world(|world| {
            assert_eq!(world.player.rect.y, 350.0);
            assert!(world.player.on_ground);
        });
        assert!(rig.log.borrow().is_empty());
    }

    #[test]
    fn test_keys_drive_the_player() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());
        engine.start();
        rig.frames(2);

        rig.keys.press(Key::Right);
        rig.frames(1);
        assert_eq!(engine.with_world(|w| w.player.vel.x), 200.0);
        rig.keys.release(Key::Right);

        rig.keys.tap(Key::Jump);
        rig.frames(120);
        assert_eq!(rig.count("jump"), 1);
        assert_eq!(rig.count("land"), 1);
    }

    #[test]
    fn test_stop_keeps_state_and_start_reanchors_clock() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());
        engine.start();
        rig.keys.press(Key::Right);
        rig.frames(10);
        engine.stop();

        let x = engine.with_world(|w| w.player.rect.x);
        rig.scheduler.advance(5000.0);
        assert_eq!(engine.with_world(|w| w.player.rect.x), x);

        engine.start();
        rig.frames(1);
        let moved = engine.with_world(|w| w.player.rect.x) - x;
        let expected = 200.0 * (rig.scheduler.frame_ms() / 1000.0) as f32;
        assert!((moved - expected).abs() < 1e-2);
    }

    #[test]
    fn test_long_frame_does_not_tunnel() {
        let rig = Rig::with_scheduler(ManualScheduler::with_frame_ms(1000.0));
        let engine = rig.engine(&floor_level());
        engine.start();
        rig.frames(3);
        assert!(engine.with_world(|w| w.player.on_ground));
        assert_eq!(rig.count("life_lost"), 0);
    }

    #[test]
    fn test_empty_level_wins_on_first_frame() {
        let rig = Rig::new();
        let mut level = floor_level();
        level.coins.clear();
        let engine = rig.engine(&level);
        engine.start();
        rig.frames(1);

        assert_eq!(*rig.log.borrow(), vec!["level_complete"]);
        assert!(!engine.is_running());
        assert_eq!(rig.scheduler.pending_frames(), 0);

        // The engine never advances on its own
        rig.frames(5);
        assert_eq!(rig.count("level_complete"), 1);
    }

    #[test]
    fn test_last_coin_completes_level() {
        let rig = Rig::new();
        let mut level = floor_level();
        level.coins = vec![CoinDef::at(55.0, 360.0), CoinDef::at(120.0, 360.0)];
        let engine = rig.engine(&level);
        engine.start();
        rig.keys.press(Key::Right);

        rig.frames(1);
        assert_eq!(*rig.log.borrow(), vec!["coin"]);
        assert!(engine.is_running());

        rig.frames(60);
        assert_eq!(*rig.log.borrow(), vec!["coin", "coin", "level_complete"]);
        assert!(!engine.is_running());
    }

    /// Boss parked in the default arena, already within reach
    fn arena_level() -> Level {
        Level {
            name: "Arena".into(),
            player_start: Point::new(50.0, 350.0),
            platforms: vec![PlatformDef::new(0.0, 400.0, 800.0, 50.0)],
            boss: Some(BossDef {
                x: Some(720.0),
                y: Some(220.0),
                ..Default::default()
            }),
            is_boss_level: true,
            ..Default::default()
        }
    }

    /// Put the player just above the boss, falling, with no shots in flight
    fn line_up_stomp(engine: &GameEngine) {
        engine.with_world_mut(|world| {
            let boss = world.boss.as_ref().unwrap().rect;
            world.player.respawn(Vec2::new(boss.x + 10.0, boss.y - 45.0));
            world.player.vel.y = 120.0;
            world.projectiles.clear();
        });
    }

    #[test]
    fn test_five_stomps_defeat_boss_then_complete_after_delay() {
        let rig = Rig::new();
        let engine = rig.engine(&arena_level());
        engine.start();

        let expected = [(4, 1), (3, 2), (2, 2), (1, 3), (0, 3)];
        for (health, phase) in expected {
            line_up_stomp(&engine);
            rig.frames(1);
            let (h, p) = engine.with_world(|w| {
                let boss = w.boss.as_ref().unwrap();
                (boss.health, boss.phase)
            });
            assert_eq!((h, p), (health, phase));
        }

        assert_eq!(rig.count("boss_hit"), 5);
        assert_eq!(rig.count("boss_defeated"), 1);
        assert_eq!(rig.count("level_complete"), 0);
        assert!(!engine.is_running());
        assert_eq!(rig.scheduler.pending_timeouts(), 1);

        rig.scheduler.advance(499.0);
        assert_eq!(rig.count("level_complete"), 0);
        rig.scheduler.advance(2.0);
        assert_eq!(rig.count("level_complete"), 1);

        // Restarting without a reset never re-announces the defeat
        engine.start();
        rig.frames(30);
        assert_eq!(rig.count("boss_defeated"), 1);
        assert_eq!(rig.count("level_complete"), 1);
    }

    #[test]
    fn test_delayed_completion_survives_cleanup() {
        let rig = Rig::new();
        let engine = rig.engine(&arena_level());
        engine.with_world_mut(|w| w.boss.as_mut().unwrap().health = 0);
        engine.start();
        rig.frames(1);
        assert_eq!(rig.count("boss_defeated"), 1);

        engine.cleanup();
        rig.scheduler.advance(600.0);
        assert_eq!(rig.count("level_complete"), 1);
    }

    #[test]
    fn test_hooks_can_reenter_engine() {
        let rig = Rig::new();
        let slot: Rc<RefCell<Option<EngineHandle>>> = Rc::new(RefCell::new(None));

        let mut first = floor_level();
        first.coins = vec![CoinDef::at(55.0, 360.0)];

        let s = slot.clone();
        let callbacks = Callbacks::new().on_level_complete(move || {
            if let Some(handle) = s.borrow().as_ref() {
                handle.reset_level(&level::initial_level());
                handle.start();
            }
        });
        let engine = GameEngine::new(&rig.surface, &first, callbacks, rig.host()).unwrap();
        *slot.borrow_mut() = Some(engine.handle());

        engine.start();
        rig.frames(1);

        assert!(engine.is_running());
        assert_eq!(rig.scheduler.pending_frames(), 1);
        assert_eq!(engine.with_world(|w| w.remaining_coins()), 8);
    }

    #[test]
    fn test_cleanup_detaches_everything() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());
        let handle = engine.handle();
        engine.start();
        assert!(handle.is_running());

        engine.cleanup();
        assert_eq!(rig.keys.listener_count(), 0);
        assert_eq!(rig.scheduler.pending_frames(), 0);
        assert!(!handle.is_alive());
        assert!(!handle.is_running());

        // Stale handles are harmless
        handle.start();
        handle.reset_level(&floor_level());
        rig.frames(2);
        assert!(rig.log.borrow().is_empty());
    }

    #[test]
    fn test_reset_level_mid_game() {
        let rig = Rig::new();
        let engine = rig.engine(&floor_level());
        engine.start();
        rig.keys.press(Key::Right);
        rig.frames(20);

        engine.reset_level(&level::boss_level());
        assert!(engine.is_running());
        engine.with_world(|w| {
            assert_eq!(w.player.rect.pos(), Vec2::new(50.0, 350.0));
            assert_eq!(w.player.vel, Vec2::ZERO);
            assert!(w.boss.is_some());
            assert!(w.projectiles.is_empty());
        });
        assert!(rig.scheduler.now() > 0.0);
    }
}
