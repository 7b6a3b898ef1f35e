// The on-screen window plus a mouse-driven stand-in for the hand tracker.
// Visual: the composited frame appears here; keys drive the session.

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::error::Error;
use crate::landmarks::synth::{self, Gesture};
use crate::landmarks::{HandFrame, LandmarkSource};
use crate::types::{FrameBuffer, Point};

pub struct Drawer {
    window: Window, // the on-screen window you see
    width: usize,
    height: usize,
}

impl Drawer {
    /// Create a window sized to the canvas.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window, width, height })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Mouse position in window pixels, `None` when the pointer is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn mouse_down(&self, button: MouseButton) -> bool {
        self.window.get_mouse_down(button)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Fakes a tracked hand from the mouse so the app runs without a model.
/// Left button = pinch, right button = open palm, neither = neutral,
/// pointer outside the window = no hand.
pub struct MouseHand<'a> {
    drawer: &'a Drawer,
}

impl<'a> MouseHand<'a> {
    pub fn new(drawer: &'a Drawer) -> Self {
        Self { drawer }
    }
}

impl LandmarkSource for MouseHand<'_> {
    fn next_frame(&mut self) -> crate::error::Result<Option<HandFrame>> {
        let Some((mx, my)) = self.drawer.mouse_pos() else {
            return Ok(Some(Vec::new()));
        };
        let (w, h) = self.drawer.size();
        let tip = Point::new(mx / w.max(1) as f32, my / h.max(1) as f32);
        let gesture = if self.drawer.mouse_down(MouseButton::Right) {
            Gesture::OpenPalm
        } else if self.drawer.mouse_down(MouseButton::Left) {
            Gesture::Pinch
        } else {
            Gesture::Neutral
        };
        Ok(Some(vec![synth::hand(tip, gesture)]))
    }
}
