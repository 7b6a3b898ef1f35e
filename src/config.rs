//! Tunable parameters, optionally loaded from a JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::drawing::DEFAULT_ERASER_RADIUS;
use crate::error::{Error, Result};
use crate::hover::{self, DEFAULT_HOVER_THRESHOLD, HoverTarget};
use crate::pose::DEFAULT_PINCH_THRESHOLD;
use crate::smoother::DEFAULT_SMOOTHING;
use crate::types::{Color, ShapeMode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Share of the distance to the raw fingertip covered each frame.
    pub smoothing_factor: f32,
    /// Frames of dwell before a hover target fires.
    pub hover_threshold: u32,
    /// Eraser disc radius in pixels.
    pub eraser_radius: f32,
    /// Thumb-index distance (normalized) that counts as a pinch.
    pub pinch_threshold: f32,
    /// Ink stroke width in pixels.
    pub line_width: f32,
    /// Width of the dashed shape preview.
    pub preview_line_width: f32,
    /// "freehand" | "circle" | "rectangle" (also "line" / "square").
    pub shape: String,
    pub initial_color: Color,
    pub targets: Vec<HoverTarget>,
    /// Where snapshots are written.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            smoothing_factor: DEFAULT_SMOOTHING,
            hover_threshold: DEFAULT_HOVER_THRESHOLD,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
            line_width: 6.0,
            preview_line_width: 2.0,
            shape: ShapeMode::Freehand.as_str().to_string(),
            initial_color: Color::rgb(0x00, 0xFF, 0x00),
            targets: hover::default_targets(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Read and validate a JSON config. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the core cannot run with. Overlapping targets are only
    /// warned about: the first one in the list wins.
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor < 1.0) {
            return Err(Error::Config(format!(
                "smoothing_factor must be in (0, 1), got {}",
                self.smoothing_factor
            )));
        }
        if self.hover_threshold == 0 {
            return Err(Error::Config("hover_threshold must be at least 1".into()));
        }
        for (name, v) in [
            ("eraser_radius", self.eraser_radius),
            ("pinch_threshold", self.pinch_threshold),
            ("line_width", self.line_width),
            ("preview_line_width", self.preview_line_width),
        ] {
            if !(v > 0.0 && v.is_finite()) {
                return Err(Error::Config(format!("{name} must be positive, got {v}")));
            }
        }
        if let Some(t) = self.targets.iter().find(|t| !(t.radius > 0.0)) {
            return Err(Error::Config(format!("target {:?} needs a positive radius", t.label)));
        }
        hover::warn_overlaps(&self.targets);
        Ok(())
    }

    /// Configured shape, falling back to freehand for names we do not know.
    pub fn shape_mode(&self) -> ShapeMode {
        self.shape.parse().unwrap_or_else(|e| {
            warn!(shape = %self.shape, error = %e, "falling back to freehand");
            ShapeMode::Freehand
        })
    }
}
