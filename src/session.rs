//! One drawing session: every piece of per-run state in a single context.
//!
//! `process_frame` runs the whole read-decide-mutate sequence for one tracker
//! result: raw target -> smoother -> hover -> pose -> state machine -> canvas.
//! Frames are handled strictly one after another; nothing here blocks.

use tracing::{debug, info, trace};

use crate::canvas::Canvas;
use crate::config::Config;
use crate::drawing::{DrawingMachine, Mode, Preview};
use crate::hover::{HoverSelector, HoverTarget, Selection};
use crate::landmarks::LandmarkSet;
use crate::pose::{Pose, PoseClassifier};
use crate::smoother::Smoother;
use crate::types::{Color, Point, ShapeMode};

/// What happened this frame, for the compositor and the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Smoothed cursor in canvas pixels; `None` when no hand was seen.
    pub cursor: Option<Point>,
    pub pose: Option<Pose>,
    pub mode: Mode,
    /// Hovered target index and its dwell progress in [0, 1].
    pub hovered: Option<(usize, f32)>,
    pub selection: Option<Selection>,
    pub preview: Option<Preview>,
    /// Number of canvas mutations applied.
    pub ops_applied: usize,
}

impl FrameReport {
    /// A frame in which nothing was tracked or changed.
    pub fn idle(mode: Mode) -> Self {
        Self {
            cursor: None,
            pose: None,
            mode,
            hovered: None,
            selection: None,
            preview: None,
            ops_applied: 0,
        }
    }
}

pub struct Session {
    config: Config,
    classifier: PoseClassifier,
    smoother: Smoother,
    hover: HoverSelector,
    machine: DrawingMachine,
    canvas: Canvas,
    color: Color,
    shape: ShapeMode,
    frames: u64,
}

impl Session {
    /// A fresh session with a transparent canvas of `width` x `height` pixels.
    pub fn new(config: Config, width: usize, height: usize) -> Self {
        let shape = config.shape_mode();
        info!(width, height, shape = shape.as_str(), color = %config.initial_color, "session started");
        Self {
            classifier: PoseClassifier::new(config.pinch_threshold),
            smoother: Smoother::new(config.smoothing_factor),
            hover: HoverSelector::new(config.hover_threshold),
            machine: DrawingMachine::new(config.eraser_radius),
            canvas: Canvas::new(width, height),
            color: config.initial_color,
            shape,
            frames: 0,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn targets(&self) -> &[HoverTarget] {
        &self.config.targets
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn shape(&self) -> ShapeMode {
        self.shape
    }

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    pub fn cursor(&self) -> Option<Point> {
        self.smoother.cursor()
    }

    /// Takes effect for the next stroke; a stroke in progress keeps its shape.
    pub fn set_shape(&mut self, shape: ShapeMode) {
        if shape != self.shape {
            info!(shape = shape.as_str(), "shape mode changed");
            self.shape = shape;
        }
    }

    /// Wipe all ink. Transient state is untouched.
    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        info!("canvas cleared");
    }

    /// End the run: drop dwell, mode, anchor and cursor. The canvas survives.
    pub fn stop(&mut self) {
        self.smoother.reset();
        self.hover.reset();
        self.machine.reset();
        info!(frames = self.frames, "session stopped");
    }

    /// Handle one tracker result. `hand` is the primary hand, if any.
    pub fn process_frame(&mut self, hand: Option<&LandmarkSet>) -> FrameReport {
        self.frames += 1;
        match hand {
            Some(hand) => self.process_hand(hand),
            None => self.process_no_hand(),
        }
    }

    fn process_hand(&mut self, hand: &LandmarkSet) -> FrameReport {
        let tip = hand.index_tip();
        let target = Point::new(tip.x * self.canvas.width() as f32, tip.y * self.canvas.height() as f32);
        let cursor = self.smoother.update(target);

        let hover = self.hover.update(cursor, &self.config.targets);
        if let Some(sel) = &hover.selection {
            info!(target = %sel.label, color = %sel.color, "colour selected");
            self.color = sel.color;
        }

        let pose = self.classifier.classify(hand);
        trace!(x = cursor.x, y = cursor.y, pose = pose.as_str(), "frame");

        let step = self.machine.step(pose, cursor, self.shape, self.color);
        for op in &step.ops {
            self.canvas.apply(op, self.config.line_width);
        }

        FrameReport {
            cursor: Some(cursor),
            pose: Some(pose),
            mode: self.machine.mode(),
            hovered: hover.hovered,
            selection: hover.selection,
            preview: step.preview,
            ops_applied: step.ops.len(),
        }
    }

    /// No hand: the cursor and dwell stay where they were, and the state
    /// machine sees a release at the last cursor.
    fn process_no_hand(&mut self) -> FrameReport {
        let mut ops_applied = 0;
        if let Some(cursor) = self.smoother.cursor() {
            let step = self.machine.step(Pose::Neutral, cursor, self.shape, self.color);
            for op in &step.ops {
                self.canvas.apply(op, self.config.line_width);
            }
            ops_applied = step.ops.len();
            if ops_applied > 0 {
                debug!("hand lost mid-stroke; pending shape committed");
            }
        }

        FrameReport { ops_applied, ..FrameReport::idle(self.machine.mode()) }
    }
}
