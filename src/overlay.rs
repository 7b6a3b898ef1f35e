// Builds the frame you actually see:
// live camera -> persistent ink -> transient UI (buttons, dwell ring, preview, cursor, HUD).
// Nothing in here mutates the session; the ink layer is only read.

use std::f32::consts::TAU;

use crate::canvas::Canvas;
use crate::draw::{circle_path, dashed_polyline, draw_text_5x7, fill_disc, rect_path, stroke_arc};
use crate::drawing::{Mode, Preview};
use crate::gamma::GammaLut;
use crate::session::{FrameReport, Session};
use crate::types::{Color, FrameBuffer};

const TARGET_ALPHA: f32 = 0.5;
const RING_GAP: f32 = 5.0;
const RING_WIDTH: f32 = 4.0;
const ERASER_RING_ALPHA: f32 = 0.7;
const DASH: f32 = 5.0;
const DRAW_POINTER_RADIUS: f32 = 8.0;
const IDLE_POINTER_RADIUS: f32 = 10.0;

pub struct Compositor {
    lut: GammaLut,
}

impl Compositor {
    pub fn new() -> Self {
        Self { lut: GammaLut::new() }
    }

    /// Compose one output frame. `hud` is an extra status string (FPS etc).
    pub fn compose(
        &self,
        live: &FrameBuffer,
        session: &Session,
        report: &FrameReport,
        hud: Option<&str>,
    ) -> FrameBuffer {
        let canvas = session.canvas();
        let mut screen = live.resized(canvas.width(), canvas.height());

        self.blend_canvas(&mut screen, canvas);
        self.draw_targets(&mut screen, session, report);

        if let Some(preview) = &report.preview {
            let width = session.config().preview_line_width;
            match *preview {
                Preview::Circle { center, radius, color } => {
                    dashed_polyline(&mut screen, &circle_path(center, radius), true, DASH, DASH, width, color.to_rgb_u32());
                }
                Preview::Rect { corner, opposite, color } => {
                    dashed_polyline(&mut screen, &rect_path(corner, opposite), true, DASH, DASH, width, color.to_rgb_u32());
                }
            }
        }

        if let Some(c) = report.cursor {
            match report.mode {
                Mode::Erasing => stroke_arc(
                    &mut screen,
                    c,
                    session.config().eraser_radius,
                    TAU,
                    RING_WIDTH,
                    Color::RED.to_rgb_u32(),
                    ERASER_RING_ALPHA,
                    &self.lut,
                ),
                Mode::Drawing { .. } => {
                    fill_disc(&mut screen, c, DRAW_POINTER_RADIUS, Color::WHITE.to_rgb_u32(), 1.0, &self.lut)
                }
                Mode::Idle => {
                    fill_disc(&mut screen, c, IDLE_POINTER_RADIUS, session.color().to_rgb_u32(), 1.0, &self.lut)
                }
            }
        }

        let status = format!(
            "{} | {} | {}{}",
            report.mode.as_str(),
            session.shape().as_str(),
            session.color(),
            hud.map(|h| format!(" | {h}")).unwrap_or_default(),
        );
        let hud_y = screen.height as i32 - 14;
        draw_text_5x7(&mut screen, 8, hud_y, &status, 0x00_FF_FF_FF);

        screen
    }

    /// Source-over of the ink layer onto the live frame.
    fn blend_canvas(&self, screen: &mut FrameBuffer, canvas: &Canvas) {
        for (dst, &src) in screen.pixels.iter_mut().zip(canvas.pixels()) {
            let a = src >> 24;
            if a == 0 {
                continue;
            }
            *dst = if a == 0xFF {
                src & 0x00FF_FFFF
            } else {
                self.lut.blend(*dst, src, a as f32 / 255.0)
            };
        }
    }

    fn draw_targets(&self, screen: &mut FrameBuffer, session: &Session, report: &FrameReport) {
        for (i, t) in session.targets().iter().enumerate() {
            fill_disc(screen, t.center(), t.radius, t.color.to_rgb_u32(), TARGET_ALPHA, &self.lut);
            if let Some((hovered, progress)) = report.hovered {
                if hovered == i {
                    stroke_arc(
                        screen,
                        t.center(),
                        t.radius + RING_GAP,
                        progress * TAU,
                        RING_WIDTH,
                        Color::WHITE.to_rgb_u32(),
                        1.0,
                        &self.lut,
                    );
                }
            }
        }
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}
