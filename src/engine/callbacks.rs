//! Host notification hooks

use crate::sim::GameEvent;

type Hook = Box<dyn Fn()>;

/// Optional hooks the engine calls as things happen. Unset hooks are
/// skipped.
///
/// Hooks run after the engine has finished with the frame, so they may call
/// back into it through an [`EngineHandle`](super::EngineHandle).
#[derive(Default)]
pub struct Callbacks {
    /// Part of the host contract; the engine keeps no score and never calls
    /// it. Hosts that track score (see `session`) call it themselves.
    pub on_score_change: Option<Box<dyn Fn(u32)>>,
    pub on_life_lost: Option<Hook>,
    pub on_coin_collect: Option<Hook>,
    pub on_level_complete: Option<Hook>,
    pub on_player_jump: Option<Hook>,
    pub on_player_land: Option<Hook>,
    pub on_boss_hit: Option<Hook>,
    pub on_boss_defeated: Option<Hook>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_score_change(mut self, f: impl Fn(u32) + 'static) -> Self {
        self.on_score_change = Some(Box::new(f));
        self
    }

    pub fn on_life_lost(mut self, f: impl Fn() + 'static) -> Self {
        self.on_life_lost = Some(Box::new(f));
        self
    }

    pub fn on_coin_collect(mut self, f: impl Fn() + 'static) -> Self {
        self.on_coin_collect = Some(Box::new(f));
        self
    }

    pub fn on_level_complete(mut self, f: impl Fn() + 'static) -> Self {
        self.on_level_complete = Some(Box::new(f));
        self
    }

    pub fn on_player_jump(mut self, f: impl Fn() + 'static) -> Self {
        self.on_player_jump = Some(Box::new(f));
        self
    }

    pub fn on_player_land(mut self, f: impl Fn() + 'static) -> Self {
        self.on_player_land = Some(Box::new(f));
        self
    }

    pub fn on_boss_hit(mut self, f: impl Fn() + 'static) -> Self {
        self.on_boss_hit = Some(Box::new(f));
        self
    }

    pub fn on_boss_defeated(mut self, f: impl Fn() + 'static) -> Self {
        self.on_boss_defeated = Some(Box::new(f));
        self
    }

    /// Report a score to the host's score hook, if any
    pub fn score_changed(&self, score: u32) {
        if let Some(hook) = &self.on_score_change {
            hook(score);
        }
    }

    /// Call the hook for `event`
    pub fn dispatch(&self, event: GameEvent) {
        let hook = match event {
            GameEvent::CoinCollected => &self.on_coin_collect,
            GameEvent::LifeLost => &self.on_life_lost,
            GameEvent::LevelComplete => &self.on_level_complete,
            GameEvent::PlayerJumped => &self.on_player_jump,
            GameEvent::PlayerLanded => &self.on_player_land,
            GameEvent::BossHit => &self.on_boss_hit,
            GameEvent::BossDefeated => &self.on_boss_defeated,
        };
        if let Some(hook) = hook {
            hook();
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_score_change", &self.on_score_change.is_some())
            .field("on_life_lost", &self.on_life_lost.is_some())
            .field("on_coin_collect", &self.on_coin_collect.is_some())
            .field("on_level_complete", &self.on_level_complete.is_some())
            .field("on_player_jump", &self.on_player_jump.is_some())
            .field("on_player_land", &self.on_player_land.is_some())
            .field("on_boss_hit", &self.on_boss_hit.is_some())
            .field("on_boss_defeated", &self.on_boss_defeated.is_some())
            .finish()
    }
}
