//! Keyboard event sources

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::input::{Key, KeyState};

/// Identifies one attached key state so it can be detached later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u32);

/// Feeds key events into a shared [`KeyState`]
pub trait KeySource {
    /// Start writing events into `keys`
    fn attach(&self, keys: Rc<RefCell<KeyState>>) -> ListenerId;
    /// Stop writing events for `id`; unknown ids are ignored
    fn detach(&self, id: ListenerId);
}

/// Key events injected by hand, for headless runs and tests
#[derive(Default)]
pub struct ManualKeys {
    listeners: RefCell<Vec<(ListenerId, Rc<RefCell<KeyState>>)>>,
    next_id: Cell<u32>,
}

impl ManualKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        for (_, keys) in self.listeners.borrow().iter() {
            keys.borrow_mut().press(key, false);
        }
    }

    pub fn release(&self, key: Key) {
        for (_, keys) in self.listeners.borrow().iter() {
            keys.borrow_mut().release(key);
        }
    }

    /// The window lost focus: every attached state forgets its keys
    pub fn blur(&self) {
        for (_, keys) in self.listeners.borrow().iter() {
            keys.borrow_mut().clear();
        }
    }

    /// Press and release before the next frame
    pub fn tap(&self, key: Key) {
        self.press(key);
        self.release(key);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl KeySource for ManualKeys {
    fn attach(&self, keys: Rc<RefCell<KeyState>>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));
        self.listeners.borrow_mut().push((id, keys));
        id
    }

    fn detach(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(l, _)| *l != id);
    }
}
