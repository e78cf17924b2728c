//! Browser implementations of the platform traits (wasm32 only)

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Event, HtmlCanvasElement, KeyboardEvent, Performance, Window,
};

use super::keys::{KeySource, ListenerId};
use super::scheduler::{FrameCallback, FrameHandle, Scheduler, TimeoutCallback};
use crate::color::Color;
use crate::geom::Rect;
use crate::input::{Key, KeyState};
use crate::renderer::{Canvas2d, Stroke, Surface};

/// `requestAnimationFrame` + `setTimeout` on the window, timed by
/// `performance.now()`
pub struct BrowserScheduler {
    window: Window,
    performance: Performance,
}

impl BrowserScheduler {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let performance = window.performance()?;
        Some(Self {
            window,
            performance,
        })
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        self.performance.now()
    }

    fn request_frame(&self, callback: FrameCallback) -> Option<FrameHandle> {
        let closure = Closure::once_into_js(move |time: f64| callback(time));
        match self.window.request_animation_frame(closure.unchecked_ref()) {
            Ok(id) => Some(FrameHandle(id)),
            Err(err) => {
                log::error!("requestAnimationFrame failed: {:?}", err);
                None
            }
        }
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }

    fn set_timeout(&self, delay_ms: f64, callback: TimeoutCallback) {
        let closure = Closure::once_into_js(move || callback());
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.unchecked_ref(),
                delay_ms.round() as i32,
            )
        {
            log::error!("setTimeout failed: {:?}", err);
        }
    }
}

struct Listener {
    id: ListenerId,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    blur: Closure<dyn FnMut(Event)>,
}

/// `keydown`/`keyup`/`blur` listeners on the window
pub struct WindowKeys {
    window: Window,
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u32>,
}

impl WindowKeys {
    pub fn new() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        })
    }

    fn remove(&self, listener: &Listener) {
        let _ = self.window.remove_event_listener_with_callback(
            "keydown",
            listener.keydown.as_ref().unchecked_ref(),
        );
        let _ = self
            .window
            .remove_event_listener_with_callback("keyup", listener.keyup.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("blur", listener.blur.as_ref().unchecked_ref());
    }
}

impl KeySource for WindowKeys {
    fn attach(&self, keys: Rc<RefCell<KeyState>>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));

        let down_keys = keys.clone();
        let keydown = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom_key(&event.key()) {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                down_keys.borrow_mut().press(key, event.repeat());
            }
        });
        let up_keys = keys.clone();
        let keyup = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(key) = Key::from_dom_key(&event.key()) {
                up_keys.borrow_mut().release(key);
            }
        });
        // Keys held while switching away would otherwise stay down
        let blur = Closure::<dyn FnMut(_)>::new(move |_: Event| {
            keys.borrow_mut().clear();
        });

        let _ = self
            .window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        let _ = self
            .window
            .add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
        let _ = self
            .window
            .add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());

        self.listeners.borrow_mut().push(Listener {
            id,
            keydown,
            keyup,
            blur,
        });
        id
    }

    fn detach(&self, id: ListenerId) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(index) = listeners.iter().position(|l| l.id == id) {
            let listener = listeners.remove(index);
            self.remove(&listener);
        }
    }
}

impl Drop for WindowKeys {
    fn drop(&mut self) {
        for listener in self.listeners.borrow_mut().drain(..) {
            self.remove(&listener);
        }
    }
}

/// An `HtmlCanvasElement` as a drawing surface
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }

    /// Look up a `<canvas>` by element id
    pub fn by_id(id: &str) -> Option<Self> {
        let canvas = web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        Some(Self::new(canvas))
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn context_2d(&self) -> Option<Box<dyn Canvas2d>> {
        let ctx = self
            .canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Box::new(WebCanvas { ctx }))
    }
}

struct WebCanvas {
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    fn set_stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(f64::from(stroke.width));
    }
}

impl Canvas2d for WebCanvas {
    fn clear(&mut self, size: Vec2) {
        self.ctx
            .clear_rect(0.0, 0.0, f64::from(size.x), f64::from(size.y));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.set_stroke(stroke);
        self.ctx.stroke_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            0.0,
            TAU,
        );
        self.ctx.fill();
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, stroke: Stroke) {
        self.set_stroke(stroke);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius),
            f64::from(start),
            f64::from(end),
        );
        self.ctx.stroke();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.set_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(from.x), f64::from(from.y));
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
        self.ctx.stroke();
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{}px Arial", font_px));
        self.ctx.set_text_align("center");
        let _ = self
            .ctx
            .fill_text(text, f64::from(pos.x), f64::from(pos.y));
    }
}
