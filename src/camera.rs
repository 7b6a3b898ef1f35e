// Opens a camera and converts frames into a buffer suitable for the window.
// Visual expectation: `next_frame()` gives a FrameBuffer of 0x00RRGGBB pixels,
// ready to be drawn over and pushed to the screen.

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};
use tracing::{info, warn};

use crate::error::Error;
use crate::types::FrameBuffer;

pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` near the requested resolution (the driver may pick another).
    pub fn new(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,                // target FPS
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(index), req)
            .map_err(|e| Error::CameraInit(format!("Create camera {index}: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        let actual = cam.resolution();
        if actual.width() != width || actual.height() != height {
            warn!(
                requested = %format!("{width}x{height}"),
                actual = %format!("{}x{}", actual.width(), actual.height()),
                "camera picked a different resolution"
            );
        }
        info!(index, width = actual.width(), height = actual.height(), "camera streaming");

        Ok(Self { cam, width: actual.width(), height: actual.height() })
    }

    /// Grab one frame (blocks until the driver delivers it).
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;

        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();

        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    /// The resolution the camera is actually delivering.
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
