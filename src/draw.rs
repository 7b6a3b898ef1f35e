// Software drawing on the output frame.
// Visual effects provided here:
// 1) Solid and translucent discs, rings and partial rings (hover buttons, dwell progress).
// 2) Dashed outlines for the shape preview.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the video.

use std::f32::consts::TAU;

use crate::gamma::GammaLut;
use crate::types::{FrameBuffer, Point};

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
/// Visual: the exact pixel at (x,y) changes color.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Translucent variant of `put_pixel`.
#[inline]
fn blend_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32, alpha: f32, lut: &GammaLut) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = lut.blend(fb.pixels[idx], color, alpha);
}

/// Filled disc, blended with `alpha` (1.0 = opaque).
/// Visual: hover buttons and the cursor dot.
pub fn fill_disc(fb: &mut FrameBuffer, c: Point, radius: f32, color: u32, alpha: f32, lut: &GammaLut) {
    if radius <= 0.0 {
        return;
    }
    let r = radius.ceil() as i32;
    let (cx, cy) = (c.x.floor() as i32, c.y.floor() as i32);
    for y in (cy - r - 1)..=(cy + r + 1) {
        for x in (cx - r - 1)..=(cx + r + 1) {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if p.distance(c) <= radius {
                blend_pixel(fb, x, y, color, alpha, lut);
            }
        }
    }
}

/// Ring of thickness `width` swept clockwise (screen space) from 3 o'clock
/// through `sweep` radians. `sweep >= TAU` draws the full ring.
/// Visual: the dwell-progress ring filling up around a hover button.
pub fn stroke_arc(
    fb: &mut FrameBuffer,
    c: Point,
    radius: f32,
    sweep: f32,
    width: f32,
    color: u32,
    alpha: f32,
    lut: &GammaLut,
) {
    if sweep <= 0.0 || radius <= 0.0 {
        return;
    }
    let hw = width * 0.5;
    let reach = (radius + hw).ceil() as i32 + 1;
    let (cx, cy) = (c.x.floor() as i32, c.y.floor() as i32);
    for y in (cy - reach)..=(cy + reach) {
        for x in (cx - reach)..=(cx + reach) {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if (p.distance(c) - radius).abs() > hw {
                continue;
            }
            // y grows downward, so atan2 already runs clockwise on screen.
            let angle = (p.y - c.y).atan2(p.x - c.x).rem_euclid(TAU);
            if sweep >= TAU || angle <= sweep {
                blend_pixel(fb, x, y, color, alpha, lut);
            }
        }
    }
}

/// Stamps a small square brush along a polyline, skipping the "off" parts of
/// a `dash`-on / `gap`-off pattern measured along the path.
/// Visual: the dotted outline of a circle or rectangle still being dragged.
pub fn dashed_polyline(
    fb: &mut FrameBuffer,
    points: &[Point],
    closed: bool,
    dash: f32,
    gap: f32,
    width: f32,
    color: u32,
) {
    if points.len() < 2 {
        return;
    }
    let period = (dash + gap).max(1.0);
    let half = (width * 0.5).max(0.5);
    let mut travelled = 0.0f32;

    let mut segs: Vec<(Point, Point)> = points.windows(2).map(|w| (w[0], w[1])).collect();
    if closed {
        segs.push((points[points.len() - 1], points[0]));
    }

    for (a, b) in segs {
        let len = a.distance(b);
        let steps = len.ceil().max(1.0) as i32; // one stamp per pixel of path
        for i in 0..steps {
            let t = i as f32 / steps as f32;
            if (travelled + len * t).rem_euclid(period) < dash {
                let p = a + (b - a) * t;
                let (x0, y0) = ((p.x - half).round() as i32, (p.y - half).round() as i32);
                let (x1, y1) = ((p.x + half).round() as i32, (p.y + half).round() as i32);
                for y in y0..y1.max(y0 + 1) {
                    for x in x0..x1.max(x0 + 1) {
                        put_pixel(fb, x, y, color);
                    }
                }
            }
        }
        travelled += len;
    }
}

/// Corner points of an axis-aligned rectangle, any corner order.
pub fn rect_path(corner: Point, opposite: Point) -> [Point; 4] {
    [
        corner,
        Point::new(opposite.x, corner.y),
        opposite,
        Point::new(corner.x, opposite.y),
    ]
}

/// Polygon approximating a circle, one vertex every ~4 px of circumference.
pub fn circle_path(c: Point, radius: f32) -> Vec<Point> {
    let n = ((TAU * radius) / 4.0).ceil().clamp(12.0, 720.0) as usize;
    (0..n)
        .map(|i| {
            let a = TAU * i as f32 / n as f32;
            Point::new(c.x + radius * a.cos(), c.y + radius * a.sin())
        })
        .collect()
}

/* ---------- 5x7 bitmap font (digits, A-Z, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps onto uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y).
/// Visual: a tiny glyph appears with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (pass_color, off) in [(0x00000000, 1), (color, 0)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx + off, y + ry as i32 + off, pass_color);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Visual: a compact HUD string appears; each glyph is 5x7 with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}
