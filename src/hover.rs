//! Hover-to-select colour targets.
//!
//! Holding the cursor inside a target for `threshold` consecutive frames fires
//! a selection. Leaving every target resets the dwell.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::{Color, Point};

pub const DEFAULT_HOVER_THRESHOLD: u32 = 30;

/// A round on-screen button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverTarget {
    pub label: String,
    pub color: Color,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl HoverTarget {
    pub fn new(label: &str, color: Color, x: f32, y: f32, radius: f32) -> Self {
        Self { label: label.to_string(), color, x, y, radius }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.distance(self.center()) < self.radius
    }

    pub fn overlaps(&self, other: &HoverTarget) -> bool {
        self.center().distance(other.center()) < self.radius + other.radius
    }
}

/// Green, blue and red buttons along the top edge.
pub fn default_targets() -> Vec<HoverTarget> {
    vec![
        HoverTarget::new("Green", Color::rgb(0x00, 0xFF, 0x00), 100.0, 60.0, 30.0),
        HoverTarget::new("Blue", Color::rgb(0x00, 0x00, 0xFF), 200.0, 60.0, 30.0),
        HoverTarget::new("Red", Color::rgb(0xFF, 0x00, 0x00), 300.0, 60.0, 30.0),
    ]
}

/// Log every overlapping pair. Overlaps are tolerated: the earlier target wins.
pub fn warn_overlaps(targets: &[HoverTarget]) -> usize {
    let mut count = 0;
    for (i, a) in targets.iter().enumerate() {
        for b in &targets[i + 1..] {
            if a.overlaps(b) {
                warn!(first = %a.label, second = %b.label, "hover targets overlap; first one wins");
                count += 1;
            }
        }
    }
    count
}

/// Fired when a dwell completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub label: String,
    pub color: Color,
}

/// Per-frame hover result, for presentation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoverUpdate {
    /// Index of the hovered target and its dwell progress in [0, 1].
    pub hovered: Option<(usize, f32)>,
    pub selection: Option<Selection>,
}

#[derive(Debug, Clone)]
pub struct HoverSelector {
    threshold: u32,
    counter: u32,
    active: Option<usize>,
}

impl HoverSelector {
    pub fn new(threshold: u32) -> Self {
        Self { threshold: threshold.max(1), counter: 0, active: None }
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn reset(&mut self) {
        self.counter = 0;
        self.active = None;
    }

    /// Advance one frame with the cursor at `cursor`.
    pub fn update(&mut self, cursor: Point, targets: &[HoverTarget]) -> HoverUpdate {
        // First target in configuration order wins on overlap.
        let Some(index) = targets.iter().position(|t| t.contains(cursor)) else {
            self.reset();
            return HoverUpdate::default();
        };

        // Dwell never carries over from a different target.
        if self.active != Some(index) {
            self.counter = 0;
            self.active = Some(index);
        }

        self.counter += 1;
        let progress = (self.counter as f32 / self.threshold as f32).clamp(0.0, 1.0);

        let selection = if self.counter >= self.threshold {
            self.counter = 0;
            let t = &targets[index];
            Some(Selection { index, label: t.label.clone(), color: t.color })
        } else {
            None
        };

        HoverUpdate { hovered: Some((index, progress)), selection }
    }
}

impl Default for HoverSelector {
    fn default() -> Self {
        Self::new(DEFAULT_HOVER_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_threshold() {
        let targets = default_targets();
        let mut h = HoverSelector::new(3);
        let on_green = Point::new(100.0, 60.0);

        assert!(h.update(on_green, &targets).selection.is_none());
        let second = h.update(on_green, &targets);
        assert!(second.selection.is_none());
        assert_eq!(second.hovered, Some((0, 2.0 / 3.0)));

        let third = h.update(on_green, &targets);
        let sel = third.selection.expect("dwell should fire");
        assert_eq!(sel.label, "Green");
        assert_eq!(sel.color, Color::rgb(0, 255, 0));
        assert_eq!(third.hovered, Some((0, 1.0)));
        assert_eq!(h.counter(), 0);
    }

    #[test]
    fn test_counter_bounded_by_threshold() {
        let targets = default_targets();
        let mut h = HoverSelector::new(5);
        let mut fired = 0;
        for _ in 0..23 {
            let u = h.update(Point::new(200.0, 60.0), &targets);
            assert!(h.counter() < h.threshold());
            if u.selection.is_some() {
                fired += 1;
                assert_eq!(h.counter(), 0);
            }
        }
        assert_eq!(fired, 4);
    }

    #[test]
    fn test_leaving_resets() {
        let targets = default_targets();
        let mut h = HoverSelector::new(4);
        h.update(Point::new(300.0, 60.0), &targets);
        h.update(Point::new(300.0, 60.0), &targets);
        assert_eq!(h.counter(), 2);

        let away = h.update(Point::new(600.0, 400.0), &targets);
        assert_eq!(away, HoverUpdate::default());
        assert_eq!(h.counter(), 0);
    }

    #[test]
    fn test_switching_targets_restarts_dwell() {
        let targets = default_targets();
        let mut h = HoverSelector::new(3);
        h.update(Point::new(100.0, 60.0), &targets);
        h.update(Point::new(100.0, 60.0), &targets);
        let u = h.update(Point::new(200.0, 60.0), &targets);
        assert!(u.selection.is_none());
        assert_eq!(h.counter(), 1);
    }

    #[test]
    fn test_edge_is_outside() {
        let targets = default_targets();
        let mut h = HoverSelector::new(3);
        assert!(h.update(Point::new(130.0, 60.0), &targets).hovered.is_none());
        assert!(h.update(Point::new(129.0, 60.0), &targets).hovered.is_some());
    }

    #[test]
    fn test_overlap_prefers_first() {
        let targets = vec![
            HoverTarget::new("A", Color::rgb(1, 1, 1), 100.0, 100.0, 50.0),
            HoverTarget::new("B", Color::rgb(2, 2, 2), 120.0, 100.0, 50.0),
        ];
        assert_eq!(warn_overlaps(&targets), 1);
        let mut h = HoverSelector::new(1);
        let u = h.update(Point::new(110.0, 100.0), &targets);
        assert_eq!(u.selection.map(|s| s.label), Some("A".to_string()));
        assert_eq!(warn_overlaps(&default_targets()), 0);
    }
}
