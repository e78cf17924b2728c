//! Frame and timer scheduling
//!
//! The engine never owns a clock or an event loop. It asks a [`Scheduler`]
//! for the next display frame and for one-shot timers, which lets the same
//! loop run under `requestAnimationFrame` or a virtual clock.

use std::cell::RefCell;

/// Called with the frame timestamp in milliseconds
pub type FrameCallback = Box<dyn FnOnce(f64)>;
pub type TimeoutCallback = Box<dyn FnOnce()>;

/// Identifies a pending frame request so it can be cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub trait Scheduler {
    /// Current time in milliseconds, on the same clock as frame timestamps
    fn now(&self) -> f64;
    /// Run `callback` once on the next display frame. `None` means the
    /// request was refused and `callback` will never run.
    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle>;
    /// Drop a pending frame request; unknown handles are ignored
    fn cancel_frame(&self, handle: FrameHandle);
    /// Run `callback` once after `delay_ms`
    fn set_timeout(&self, delay_ms: f64, callback: TimeoutCallback);
}

/// Display refresh used by [`ManualScheduler`] unless overridden
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

struct Timer {
    due: f64,
    callback: TimeoutCallback,
}

struct ManualState {
    now: f64,
    frame_ms: f64,
    next_handle: i32,
    refuse_frames: bool,
    frames: Vec<(FrameHandle, FrameCallback)>,
    timers: Vec<Timer>,
}

/// A virtual clock for headless runs and tests.
///
/// Nothing happens until the owner calls [`step`](Self::step) or
/// [`advance`](Self::advance). Callbacks run with no internal borrow held,
/// so they may schedule more work.
pub struct ManualScheduler {
    state: RefCell<ManualState>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::with_frame_ms(DEFAULT_FRAME_MS)
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock whose display refreshes every `frame_ms`
    pub fn with_frame_ms(frame_ms: f64) -> Self {
        Self {
            state: RefCell::new(ManualState {
                now: 0.0,
                frame_ms: frame_ms.max(f64::EPSILON),
                next_handle: 1,
                refuse_frames: false,
                frames: Vec::new(),
                timers: Vec::new(),
            }),
        }
    }

    pub fn frame_ms(&self) -> f64 {
        self.state.borrow().frame_ms
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().frames.len()
    }

    pub fn pending_timeouts(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// While set, frame requests fail the way a broken
    /// `requestAnimationFrame` does
    pub fn set_refuse_frames(&self, refuse: bool) {
        self.state.borrow_mut().refuse_frames = refuse;
    }

    /// Move the clock forward one display frame, fire due timers, then run
    /// the frame callbacks that were pending before the step
    pub fn step(&self) {
        let now = {
            let mut state = self.state.borrow_mut();
            state.now += state.frame_ms;
            state.now
        };
        self.fire_due_timers();

        let frames = std::mem::take(&mut self.state.borrow_mut().frames);
        for (_, callback) in frames {
            callback(now);
        }
    }

    /// Step whole frames covering `ms`, then move the clock to exactly
    /// `now + ms` and fire any timers due by then
    pub fn advance(&self, ms: f64) {
        let target = self.now() + ms.max(0.0);
        while self.now() + self.frame_ms() <= target {
            self.step();
        }
        self.state.borrow_mut().now = target;
        self.fire_due_timers();
    }

    fn fire_due_timers(&self) {
        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                let now = state.now;
                let earliest = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= now)
                    .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due))
                    .map(|(i, _)| i);
                earliest.map(|i| state.timers.remove(i))
            };
            match next {
                Some(timer) => (timer.callback)(),
                None => break,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.state.borrow().now
    }

    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let mut state = self.state.borrow_mut();
        if state.refuse_frames {
            return None;
        }
        let handle = FrameHandle(state.next_handle);
        state.next_handle = state.next_handle.wrapping_add(1);
        state.frames.push((handle, callback));
        Some(handle)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.state.borrow_mut().frames.retain(|(h, _)| *h != handle);
    }

    fn set_timeout(&self, delay_ms: f64, callback: TimeoutCallback) {
        let mut state = self.state.borrow_mut();
        let due = state.now + delay_ms.max(0.0);
        state.timers.push(Timer { due, callback });
    }
}
