//! Platform abstraction layer
//!
//! Handles browser/headless differences for:
//! - Frame timing and timers (`Scheduler`)
//! - Keyboard input (`KeySource`)
//! - The drawing surface (`renderer::Surface`, implemented in `web` for canvases)

pub mod keys;
pub mod scheduler;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::rc::Rc;

pub use keys::{KeySource, ListenerId, ManualKeys};
pub use scheduler::{FrameHandle, ManualScheduler, Scheduler};

/// Everything the engine needs from its environment besides the surface
#[derive(Clone)]
pub struct Host {
    pub scheduler: Rc<dyn Scheduler>,
    pub keys: Rc<dyn KeySource>,
}

impl Host {
    pub fn new(scheduler: Rc<dyn Scheduler>, keys: Rc<dyn KeySource>) -> Self {
        Self { scheduler, keys }
    }

    /// Browser window: `requestAnimationFrame` and window key listeners
    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Option<Self> {
        let scheduler = web::BrowserScheduler::new()?;
        let keys = web::WindowKeys::new()?;
        Some(Self::new(Rc::new(scheduler), Rc::new(keys)))
    }
}
