//! Headless drawing surface
//!
//! Records draw calls instead of rasterizing them. The buffer holds the most
//! recent frame only: `clear` starts it over.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use super::{Canvas2d, Stroke, Surface};
use crate::color::Color;
use crate::geom::Rect;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Vec2,
    },
    FillRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeArc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        stroke: Stroke,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        stroke: Stroke,
    },
    FillText {
        text: String,
        pos: Vec2,
        font_px: f32,
        color: Color,
    },
}

type Commands = Rc<RefCell<Vec<DrawCommand>>>;

/// A 2D context that appends every call to a shared buffer
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Commands,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.borrow().clone()
    }

    fn push(&self, command: DrawCommand) {
        self.commands.borrow_mut().push(command);
    }
}

impl Canvas2d for RecordingCanvas {
    fn clear(&mut self, size: Vec2) {
        let mut commands = self.commands.borrow_mut();
        commands.clear();
        commands.push(DrawCommand::Clear { size });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.push(DrawCommand::StrokeRect { rect, stroke });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, stroke: Stroke) {
        self.push(DrawCommand::StrokeArc {
            center,
            radius,
            start,
            end,
            stroke,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: Stroke) {
        self.push(DrawCommand::StrokeLine { from, to, stroke });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, font_px: f32, color: Color) {
        self.push(DrawCommand::FillText {
            text: text.to_string(),
            pos,
            font_px,
            color,
        });
    }
}

/// A fixed-size surface whose contexts all record into one buffer
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Vec2,
    canvas: Option<RecordingCanvas>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            canvas: Some(RecordingCanvas::new()),
        }
    }

    /// A surface that cannot provide a 2D context
    pub fn without_context(size: Vec2) -> Self {
        Self { size, canvas: None }
    }

    /// Commands of the last drawn frame
    pub fn commands(&self) -> Vec<DrawCommand> {
        self.canvas
            .as_ref()
            .map(RecordingCanvas::commands)
            .unwrap_or_default()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn context_2d(&self) -> Option<Box<dyn Canvas2d>> {
        self.canvas
            .clone()
            .map(|canvas| Box::new(canvas) as Box<dyn Canvas2d>)
    }
}
