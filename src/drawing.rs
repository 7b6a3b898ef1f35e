//! Drawing state machine.
//!
//! Driven once per frame by the classified pose. `step` only decides: it
//! updates the machine's own bookkeeping (mode, anchor, previous cursor) and
//! returns the canvas operations to apply plus an optional live preview. The
//! caller applies the operations, so decisions are testable without a canvas.

use tracing::debug;

use crate::canvas::SurfaceOp;
use crate::pose::Pose;
use crate::types::{Color, Point, ShapeMode};

pub const DEFAULT_ERASER_RADIUS: f32 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    /// `anchor` is the cursor at the instant the pinch started.
    Drawing { shape: ShapeMode, anchor: Point },
    Erasing,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Drawing { .. } => "DRAW",
            Self::Erasing => "ERASE",
        }
    }
}

/// Transient, dashed outline of the shape being dragged out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Preview {
    Circle { center: Point, radius: f32, color: Color },
    Rect { corner: Point, opposite: Point, color: Color },
}

/// Outcome of one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Step {
    pub ops: Vec<SurfaceOp>,
    pub preview: Option<Preview>,
}

#[derive(Debug, Clone)]
pub struct DrawingMachine {
    mode: Mode,
    last: Option<Point>, // previous cursor of the current freehand stroke
    eraser_radius: f32,
}

impl DrawingMachine {
    pub fn new(eraser_radius: f32) -> Self {
        Self { mode: Mode::Idle, last: None, eraser_radius }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Drop mode, anchor and stroke continuity. Any pending shape is discarded.
    pub fn reset(&mut self) {
        self.mode = Mode::Idle;
        self.last = None;
    }

    /// Advance one frame.
    pub fn step(&mut self, pose: Pose, cursor: Point, shape: ShapeMode, color: Color) -> Step {
        let mut out = Step::default();

        match pose {
            Pose::OpenPalm => {
                // Erasing wins outright; an unfinished shape is dropped, not committed.
                if let Mode::Drawing { shape, .. } = self.mode {
                    if shape != ShapeMode::Freehand {
                        debug!(shape = shape.as_str(), "shape preview discarded by eraser");
                    }
                }
                self.enter(Mode::Erasing);
                self.last = None;
                out.ops.push(SurfaceOp::Erase { center: cursor, radius: self.eraser_radius });
            }
            Pose::Pinch => {
                let (shape, anchor) = match self.mode {
                    // The stroke keeps the shape it started with.
                    Mode::Drawing { shape, anchor } => (shape, anchor),
                    _ => {
                        self.enter(Mode::Drawing { shape, anchor: cursor });
                        self.last = None;
                        (shape, cursor)
                    }
                };
                self.draw_frame(shape, anchor, cursor, color, &mut out);
                self.last = Some(cursor);
            }
            Pose::Neutral => {
                if let Mode::Drawing { shape, anchor } = self.mode {
                    if let Some(op) = shape_op(shape, anchor, cursor, color) {
                        debug!(shape = shape.as_str(), "shape committed");
                        out.ops.push(op);
                    }
                }
                self.enter(Mode::Idle);
                self.last = None;
            }
        }

        out
    }

    fn draw_frame(&self, shape: ShapeMode, anchor: Point, cursor: Point, color: Color, out: &mut Step) {
        match shape {
            ShapeMode::Freehand => {
                if let Some(from) = self.last {
                    out.ops.push(SurfaceOp::Segment { from, to: cursor, color });
                }
            }
            ShapeMode::Circle => {
                out.preview = Some(Preview::Circle { center: anchor, radius: anchor.distance(cursor), color });
            }
            ShapeMode::Rectangle => {
                out.preview = Some(Preview::Rect { corner: anchor, opposite: cursor, color });
            }
        }
    }

    fn enter(&mut self, next: Mode) {
        if std::mem::discriminant(&self.mode) != std::mem::discriminant(&next) {
            debug!(from = self.mode.as_str(), to = next.as_str(), "mode change");
        }
        self.mode = next;
    }
}

impl Default for DrawingMachine {
    fn default() -> Self {
        Self::new(DEFAULT_ERASER_RADIUS)
    }
}

/// The permanent op for a finished non-freehand stroke.
fn shape_op(shape: ShapeMode, anchor: Point, cursor: Point, color: Color) -> Option<SurfaceOp> {
    match shape {
        ShapeMode::Freehand => None,
        ShapeMode::Circle => Some(SurfaceOp::Circle { center: anchor, radius: anchor.distance(cursor), color }),
        ShapeMode::Rectangle => Some(SurfaceOp::Rect { corner: anchor, opposite: cursor, color }),
    }
}
