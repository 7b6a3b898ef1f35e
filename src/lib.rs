//! Hand-gesture doodling on top of a live camera feed.
//!
//! A hand tracker (any external model) supplies 21 landmarks per frame. The
//! session smooths the index fingertip into a cursor, classifies the pose
//! (pinch = draw, open palm = erase), runs hover-to-pick colour buttons, and
//! keeps a persistent ink canvas that the compositor lays over the camera.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod drawing;
pub mod error;
pub mod export;
pub mod gamma;
pub mod hover;
pub mod landmarks;
pub mod overlay;
pub mod pose;
pub mod session;
pub mod smoother;
pub mod types;

#[cfg(feature = "app")]
pub mod camera;
#[cfg(feature = "app")]
pub mod window;

pub use config::Config;
pub use error::{Error, Result};
pub use session::{FrameReport, Session};
pub use types::{Color, FrameBuffer, Point, ShapeMode};
