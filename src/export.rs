// Snapshot of the composited frame to a PNG file.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{ImageBuffer, Rgb, RgbImage};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::FrameBuffer;

/// Unpack 0x00RRGGBB pixels into an `image` buffer.
pub fn to_rgb_image(frame: &FrameBuffer) -> Result<RgbImage> {
    let (w, h) = (frame.width as u32, frame.height as u32);
    if frame.pixels.len() != frame.width * frame.height {
        return Err(Error::Export(format!(
            "frame has {} pixels, expected {}x{}",
            frame.pixels.len(),
            w,
            h
        )));
    }
    Ok(ImageBuffer::from_fn(w, h, |x, y| {
        let px = frame.pixels[y as usize * frame.width + x as usize];
        Rgb([(px >> 16) as u8, (px >> 8) as u8, px as u8])
    }))
}

/// Write `frame` as `doodle-<unix millis>.png` inside `dir`.
pub fn save_png(frame: &FrameBuffer, dir: &Path) -> Result<PathBuf> {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(format!("doodle-{millis}.png"));
    save_png_as(frame, &path)?;
    Ok(path)
}

pub fn save_png_as(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let img = to_rgb_image(frame)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Error::Export(format!("write {}: {e}", path.display())))?;
    info!(path = %path.display(), "snapshot saved");
    Ok(())
}
