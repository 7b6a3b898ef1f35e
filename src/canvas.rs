// The persistent ink layer.
// Visual: everything you have drawn so far, floating above the live camera.
// Pixels are 0xAARRGGBB; alpha 0 means "show the camera through here".

use crate::types::{Color, Point};

/// One permanent change to the canvas, decided by the drawing state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    /// Freehand piece from the previous cursor to the current one.
    Segment { from: Point, to: Point, color: Color },
    /// Outline centred on `center`.
    Circle { center: Point, radius: f32, color: Color },
    /// Axis-aligned outline between two opposite corners.
    Rect { corner: Point, opposite: Point, color: Color },
    /// Punch a fully transparent hole.
    Erase { center: Point, radius: f32 },
}

#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u32>, // length = width * height
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn is_inked(&self, x: usize, y: usize) -> bool {
        self.pixel(x, y) >> 24 != 0
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p >> 24 == 0)
    }

    /// Wipe everything back to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn apply(&mut self, op: &SurfaceOp, line_width: f32) {
        match *op {
            SurfaceOp::Segment { from, to, color } => self.stroke_segment(from, to, color, line_width),
            SurfaceOp::Circle { center, radius, color } => {
                self.stroke_circle(center, radius, color, line_width)
            }
            SurfaceOp::Rect { corner, opposite, color } => {
                self.stroke_rect(corner, opposite, color, line_width)
            }
            SurfaceOp::Erase { center, radius } => self.erase_disc(center, radius),
        }
    }

    /// Thick line with round caps.
    pub fn stroke_segment(&mut self, a: Point, b: Point, color: Color, width: f32) {
        let hw = width * 0.5;
        let ink = color.to_argb_u32();
        self.fill_where(
            a.x.min(b.x) - hw,
            a.y.min(b.y) - hw,
            a.x.max(b.x) + hw,
            a.y.max(b.y) + hw,
            |p| distance_to_segment(p, a, b) <= hw,
            ink,
        );
    }

    /// Ring of thickness `width` centred on the circle's path.
    pub fn stroke_circle(&mut self, center: Point, radius: f32, color: Color, width: f32) {
        let hw = width * 0.5;
        let reach = radius + hw;
        self.fill_where(
            center.x - reach,
            center.y - reach,
            center.x + reach,
            center.y + reach,
            |p| (p.distance(center) - radius).abs() <= hw,
            color.to_argb_u32(),
        );
    }

    /// Four edges with round joins. Works for any corner order.
    pub fn stroke_rect(&mut self, corner: Point, opposite: Point, color: Color, width: f32) {
        let b = Point::new(opposite.x, corner.y);
        let d = Point::new(corner.x, opposite.y);
        self.stroke_segment(corner, b, color, width);
        self.stroke_segment(b, opposite, color, width);
        self.stroke_segment(opposite, d, color, width);
        self.stroke_segment(d, corner, color, width);
    }

    /// Destination-out disc: pixels inside become fully transparent, whatever they held.
    pub fn erase_disc(&mut self, center: Point, radius: f32) {
        self.fill_where(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
            |p| p.distance(center) <= radius,
            0,
        );
    }

    /// Write `value` to every pixel in the box whose centre passes `inside`.
    fn fill_where(
        &mut self,
        x0: f32, y0: f32,
        x1: f32, y1: f32,
        inside: impl Fn(Point) -> bool,
        value: u32,
    ) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        // Scan just the bounding box, clamped to the canvas.
        let clamp_x = |v: f32| v.floor().clamp(0.0, (self.width - 1) as f32) as usize;
        let clamp_y = |v: f32| v.floor().clamp(0.0, (self.height - 1) as f32) as usize;
        if x1 < 0.0 || y1 < 0.0 || x0 >= self.width as f32 || y0 >= self.height as f32 {
            return;
        }
        let (xa, xb) = (clamp_x(x0), clamp_x(x1));
        let (ya, yb) = (clamp_y(y0), clamp_y(y1));

        for y in ya..=yb {
            let row = y * self.width;
            for x in xa..=xb {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if inside(centre) {
                    self.pixels[row + x] = value;
                }
            }
        }
    }
}

/// Shortest distance from `p` to the segment `a..b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: Color = Color::rgb(0, 255, 0);
    const BLUE: Color = Color::rgb(0, 0, 255);

    #[test]
    fn test_new_canvas_is_blank() {
        let c = Canvas::new(64, 48);
        assert!(c.is_blank());
        assert_eq!(c.pixels().len(), 64 * 48);
    }

    #[test]
    fn test_segment_stays_in_its_region() {
        let mut c = Canvas::new(100, 100);
        let (a, b) = (Point::new(10.0, 10.0), Point::new(60.0, 10.0));
        c.stroke_segment(a, b, GREEN, 6.0);
        assert!(!c.is_blank());
        for y in 0..100 {
            for x in 0..100 {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                assert_eq!(c.is_inked(x, y), distance_to_segment(p, a, b) <= 3.0);
            }
        }
    }

    #[test]
    fn test_second_segment_does_not_touch_first_outside_union() {
        let mut c = Canvas::new(80, 80);
        let a = (Point::new(5.0, 5.0), Point::new(70.0, 5.0));
        let b = (Point::new(5.0, 60.0), Point::new(70.0, 20.0));
        c.stroke_segment(a.0, a.1, GREEN, 6.0);
        let after_a = c.pixels().to_vec();
        c.stroke_segment(b.0, b.1, BLUE, 6.0);
        for y in 0..80 {
            for x in 0..80 {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(p, b.0, b.1) > 3.0 {
                    assert_eq!(c.pixel(x, y), after_a[y * 80 + x]);
                }
            }
        }
    }

    #[test]
    fn test_erase_removes_everything_within_radius() {
        let mut c = Canvas::new(120, 120);
        c.stroke_segment(Point::new(0.0, 60.0), Point::new(120.0, 60.0), GREEN, 6.0);
        c.stroke_circle(Point::new(60.0, 60.0), 20.0, BLUE, 6.0);
        let center = Point::new(60.0, 60.0);
        c.erase_disc(center, 30.0);
        for y in 0..120 {
            for x in 0..120 {
                let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                if p.distance(center) <= 30.0 {
                    assert_eq!(c.pixel(x, y), 0);
                }
            }
        }
        // ink beyond the disc survives
        assert!(c.is_inked(5, 60));
    }

    #[test]
    fn test_circle_ring() {
        let mut c = Canvas::new(200, 200);
        c.stroke_circle(Point::new(100.0, 100.0), 50.0, GREEN, 6.0);
        assert!(c.is_inked(149, 99)); // on the ring
        assert!(!c.is_inked(100, 100)); // hollow centre
        assert!(!c.is_inked(160, 100));
        assert_eq!(c.pixel(149, 99), GREEN.to_argb_u32());
    }

    #[test]
    fn test_rect_negative_extent() {
        let mut a = Canvas::new(100, 100);
        let mut b = Canvas::new(100, 100);
        a.stroke_rect(Point::new(20.0, 20.0), Point::new(80.0, 70.0), GREEN, 4.0);
        b.stroke_rect(Point::new(80.0, 70.0), Point::new(20.0, 20.0), GREEN, 4.0);
        assert_eq!(a.pixels(), b.pixels());
        assert!(a.is_inked(50, 20));
        assert!(!a.is_inked(50, 45));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut c = Canvas::new(50, 50);
        c.stroke_segment(Point::new(0.0, 0.0), Point::new(49.0, 49.0), GREEN, 6.0);
        c.clear();
        let once = c.pixels().to_vec();
        c.clear();
        assert!(c.is_blank());
        assert_eq!(c.pixels(), once.as_slice());
    }

    #[test]
    fn test_offscreen_ops_are_ignored() {
        let mut c = Canvas::new(30, 30);
        c.stroke_segment(Point::new(-100.0, -100.0), Point::new(-50.0, -60.0), GREEN, 6.0);
        c.erase_disc(Point::new(500.0, 500.0), 80.0);
        assert!(c.is_blank());
    }
}
