// Core value types shared by the gesture core, the canvas and the compositor.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A frame filled with one colour (used as a backdrop when no camera is attached).
    pub fn solid(width: usize, height: usize, rgb: u32) -> Self {
        Self { width, height, pixels: vec![rgb & 0x00FF_FFFF; width * height] }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Nearest-neighbour resample; returns a clone when the size already matches.
    pub fn resized(&self, width: usize, height: usize) -> FrameBuffer {
        if self.width == width && self.height == height {
            return self.clone();
        }
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = if self.height == 0 { 0 } else { y * self.height / height.max(1) };
            for x in 0..width {
                let sx = if self.width == 0 { 0 } else { x * self.width / width.max(1) };
                pixels.push(self.get(sx, sy).unwrap_or(0));
            }
        }
        FrameBuffer { width, height, pixels }
    }
}

/// A 2D position. Landmarks use it in normalized [0,1] space, the cursor in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;
    fn mul(self, k: f32) -> Point {
        Point::new(self.x * k, self.y * k)
    }
}

/// Opaque ink colour. Written as `#RRGGBB` in config files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::Config(format!("invalid colour {s:?}, expected #RRGGBB")));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|e| Error::Config(format!("invalid colour {s:?}: {e}")));
        Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }

    /// Packed 0x00RRGGBB, the frame buffer layout.
    #[inline]
    pub const fn to_rgb_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Packed fully-opaque 0xFFRRGGBB, the canvas layout.
    #[inline]
    pub const fn to_argb_u32(self) -> u32 {
        0xFF00_0000 | self.to_rgb_u32()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;
    fn try_from(s: String) -> Result<Self, Error> {
        Color::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> String {
        c.to_string()
    }
}

/// Which figure a pinch stroke produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShapeMode {
    #[default]
    Freehand,
    Circle,
    Rectangle,
}

impl ShapeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Freehand => "freehand",
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
        }
    }
}

impl std::str::FromStr for ShapeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "freehand" | "line" | "pen" => Ok(Self::Freehand),
            "circle" => Ok(Self::Circle),
            "rectangle" | "rect" | "square" => Ok(Self::Rectangle),
            other => Err(Error::Config(format!("unknown shape mode {other:?}"))),
        }
    }
}
