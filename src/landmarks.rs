//! Hand landmarks as delivered by the external tracker.
//!
//! The tracker is a black box: it hands us, once per frame, zero or more hands
//! made of 21 normalized (x, y) points in a y-down image space.

use std::io::BufRead;

use serde::Deserialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::types::Point;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// One detected hand: exactly 21 normalized points.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSet {
    points: [Point; LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Validate tracker output. Anything but 21 finite points is rejected here
    /// so the gesture core never sees a partial hand.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(Error::Landmarks(format!(
                "expected {LANDMARK_COUNT} points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(Error::Landmarks(format!("point {i} is not finite")));
        }
        let mut out = [Point::default(); LANDMARK_COUNT];
        out.copy_from_slice(points);
        Ok(Self { points: out })
    }

    pub fn from_array(points: [Point; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Point {
        self.points[index]
    }

    pub fn points(&self) -> &[Point; LANDMARK_COUNT] {
        &self.points
    }

    pub fn index_tip(&self) -> Point {
        self.points[INDEX_TIP]
    }
}

/// Every hand the tracker reported for one frame (empty = nothing detected).
pub type HandFrame = Vec<LandmarkSet>;

/// The single hand the core acts on. Multi-hand input is reduced to the first hand.
pub fn primary_hand(frame: &HandFrame) -> Option<&LandmarkSet> {
    if frame.len() > 1 {
        trace!(hands = frame.len(), "ignoring extra hands");
    }
    frame.first()
}

/// Anything that can deliver tracker results frame by frame.
pub trait LandmarkSource {
    /// `Ok(None)` once the stream has ended.
    fn next_frame(&mut self) -> Result<Option<HandFrame>>;
}

#[derive(Deserialize)]
struct JsonFrame {
    #[serde(default)]
    hands: Option<Vec<Vec<[f32; 2]>>>,
}

/// Replays (or follows a pipe of) newline-delimited JSON frames:
/// `{"hands": [[[x, y], ... 21 pairs]]}`. `{"hands": null}` or `{}` is a frame
/// without a hand.
pub struct JsonLinesSource<R> {
    reader: R,
    line: String,
    line_no: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), line_no: 0 }
    }

    fn parse_line(&self) -> Result<HandFrame> {
        let frame: JsonFrame = serde_json::from_str(self.line.trim())?;
        frame
            .hands
            .unwrap_or_default()
            .iter()
            .map(|hand| {
                let pts: Vec<Point> = hand.iter().map(|[x, y]| Point::new(*x, *y)).collect();
                LandmarkSet::from_points(&pts)
                    .map_err(|e| Error::Landmarks(format!("line {}: {e}", self.line_no)))
            })
            .collect()
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<HandFrame>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            if self.line.trim().is_empty() {
                continue;
            }
            return self.parse_line().map(Some);
        }
    }
}

/// Build a plausible hand around an index-tip position. Used by the mouse
/// driven source and by tests.
pub mod synth {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Gesture {
        Pinch,
        OpenPalm,
        Neutral,
    }

    /// A hand whose index tip sits at `tip` (normalized) posed as `gesture`.
    pub fn hand(tip: Point, gesture: Gesture) -> LandmarkSet {
        let mut p = [Point::default(); LANDMARK_COUNT];
        let at = |dx: f32, dy: f32| Point::new(tip.x + dx, tip.y + dy);

        p[WRIST] = at(0.02, 0.30);
        p[THUMB_CMC] = at(-0.04, 0.25);
        p[THUMB_MCP] = at(-0.07, 0.20);
        p[THUMB_IP] = at(-0.09, 0.15);
        p[INDEX_MCP] = at(0.0, 0.16);
        p[INDEX_PIP] = at(0.0, 0.10);
        p[INDEX_DIP] = at(0.0, 0.05);
        p[INDEX_TIP] = tip;
        p[MIDDLE_MCP] = at(0.04, 0.16);
        p[RING_MCP] = at(0.07, 0.17);
        p[PINKY_MCP] = at(0.10, 0.19);

        // Joints sit in the same place for every pose; only the tips move.
        p[MIDDLE_PIP] = at(0.04, 0.10);
        p[MIDDLE_DIP] = at(0.04, 0.07);
        p[RING_PIP] = at(0.07, 0.11);
        p[RING_DIP] = at(0.07, 0.08);
        p[PINKY_PIP] = at(0.10, 0.14);
        p[PINKY_DIP] = at(0.10, 0.12);

        let raised = gesture == Gesture::OpenPalm;
        // Raised tips above their PIP joints, curled tips below them.
        p[MIDDLE_TIP] = if raised { at(0.04, 0.0) } else { at(0.04, 0.14) };
        p[RING_TIP] = if raised { at(0.07, 0.02) } else { at(0.07, 0.15) };
        p[PINKY_TIP] = if raised { at(0.10, 0.06) } else { at(0.10, 0.17) };

        p[THUMB_TIP] = match gesture {
            Gesture::Pinch => at(-0.01, 0.01),
            _ => at(-0.12, 0.10),
        };

        LandmarkSet::from_array(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn json_hand(x: f32, y: f32) -> String {
        let pts: Vec<String> = (0..LANDMARK_COUNT).map(|_| format!("[{x},{y}]")).collect();
        format!("[{}]", pts.join(","))
    }

    #[test]
    fn test_rejects_short_hand() {
        let pts = vec![Point::new(0.5, 0.5); 20];
        assert!(matches!(LandmarkSet::from_points(&pts), Err(Error::Landmarks(_))));
    }

    #[test]
    fn test_rejects_nan() {
        let mut pts = vec![Point::new(0.5, 0.5); LANDMARK_COUNT];
        pts[7].y = f32::NAN;
        assert!(LandmarkSet::from_points(&pts).is_err());
    }

    #[test]
    fn test_json_lines_source() {
        let text = format!(
            "{{\"hands\": [{}]}}\n\n{{\"hands\": null}}\n{{}}\n",
            json_hand(0.25, 0.75)
        );
        let mut src = JsonLinesSource::new(Cursor::new(text));

        let first = src.next_frame().unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].index_tip(), Point::new(0.25, 0.75));

        assert!(src.next_frame().unwrap().unwrap().is_empty());
        assert!(src.next_frame().unwrap().unwrap().is_empty());
        assert!(src.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_json_lines_bad_hand() {
        let mut src = JsonLinesSource::new(Cursor::new("{\"hands\": [[[0.1,0.1]]]}\n"));
        assert!(matches!(src.next_frame(), Err(Error::Landmarks(_))));
    }

    #[test]
    fn test_primary_hand_takes_first() {
        let a = synth::hand(Point::new(0.2, 0.5), synth::Gesture::Neutral);
        let b = synth::hand(Point::new(0.8, 0.5), synth::Gesture::Neutral);
        let frame = vec![a.clone(), b];
        assert_eq!(primary_hand(&frame), Some(&a));
        assert_eq!(primary_hand(&Vec::new()), None);
    }
}
