// What you SEE:
// • Live camera is the base image, your ink floats on top.
// • Pinch (or hold Left Mouse) to draw, open palm (or hold Right Mouse) to erase.
// • Hover a colour button for ~1 s to pick that colour.
// • 1/2/3 switch freehand/circle/rectangle, C clears, S saves a PNG,
//   Space pauses/resumes, ESC quits.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use minifb::Key;
use tracing::{error, info, warn};

use air_doodle::camera::CameraCapture;
use air_doodle::export;
use air_doodle::landmarks::{self, JsonLinesSource, LandmarkSource};
use air_doodle::overlay::Compositor;
use air_doodle::window::{Drawer, MouseHand};
use air_doodle::{Config, Error, FrameBuffer, FrameReport, Session, ShapeMode};

#[derive(Parser, Debug)]
#[command(name = "air-doodle", about = "Draw in the air with hand gestures")]
struct Args {
    /// JSON config file (missing fields use defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Camera index
    #[arg(long, default_value_t = 0)]
    camera: u32,

    /// Requested capture width
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Requested capture height
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Newline-delimited JSON landmark frames ("-" for stdin); default is the mouse
    #[arg(long)]
    landmarks: Option<String>,

    /// Use a plain backdrop instead of the camera
    #[arg(long)]
    no_camera: bool,

    /// Start in this shape mode (freehand, circle, rectangle)
    #[arg(long)]
    shape: Option<String>,
}

const BACKDROP: u32 = 0x00_18_18_20;

fn open_landmarks(source: &str) -> Result<JsonLinesSource<Box<dyn BufRead>>, Error> {
    let reader: Box<dyn BufRead> = if source == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(source)?))
    };
    info!(source, "reading landmarks");
    Ok(JsonLinesSource::new(reader))
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "air_doodle=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(shape) = args.shape {
        config.shape = shape;
    }
    let output_dir = config.output_dir.clone();

    /* --- Camera + window setup ---
       Visual: window opens with the live camera feed (or a dark backdrop). */
    let mut cam = if args.no_camera {
        None
    } else {
        Some(CameraCapture::new(args.camera, args.width, args.height)?)
    };
    let (w, h) = cam
        .as_ref()
        .map(|c| c.resolution())
        .unwrap_or((args.width, args.height));
    let (w, h) = (w as usize, h as usize);
    let mut drawer = Drawer::new("Air Doodle", w, h)?;
    let backdrop = FrameBuffer::solid(w, h, BACKDROP);

    let mut replay = args.landmarks.as_deref().map(open_landmarks).transpose()?;
    let mut replay_done = false;

    let mut session = Session::new(config, w, h);
    let compositor = Compositor::new();
    let mut paused = false;
    let mut last_screen: Option<FrameBuffer> = None;

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Keys */
        if drawer.pressed_once(Key::C) {
            session.clear_canvas();
        }
        if drawer.pressed_once(Key::Key1) { session.set_shape(ShapeMode::Freehand); }
        if drawer.pressed_once(Key::Key2) { session.set_shape(ShapeMode::Circle); }
        if drawer.pressed_once(Key::Key3) { session.set_shape(ShapeMode::Rectangle); }
        if drawer.pressed_once(Key::Space) {
            paused = !paused;
            if paused {
                session.stop();
            } else {
                info!("session resumed");
            }
        }
        if drawer.pressed_once(Key::S) {
            if let Some(screen) = &last_screen {
                if let Err(e) = export::save_png(screen, &output_dir) {
                    error!(error = %e, "snapshot failed");
                }
            }
        }

        /* 2) Live frame */
        let live = match cam.as_mut() {
            Some(c) => c.next_frame()?,
            None => backdrop.clone(),
        };

        /* 3) One tracker result, processed to completion */
        let hands = if paused {
            None
        } else {
            let next = match replay.as_mut() {
                Some(src) if !replay_done => src.next_frame(),
                Some(_) => Ok(Some(Vec::new())),
                None => MouseHand::new(&drawer).next_frame(),
            };
            match next {
                Ok(Some(frame)) => Some(frame),
                Ok(None) => {
                    if !replay_done {
                        info!("landmark stream ended");
                        replay_done = true;
                    }
                    Some(Vec::new())
                }
                Err(e @ Error::Landmarks(_)) | Err(e @ Error::Json(_)) => {
                    // a bad frame is skipped, never fatal
                    warn!(error = %e, "dropping malformed landmark frame");
                    Some(Vec::new())
                }
                Err(e) => return Err(e),
            }
        };

        let report = match &hands {
            Some(frame) => session.process_frame(landmarks::primary_hand(frame)),
            None => FrameReport::idle(session.mode()),
        };

        /* 4) Compose and present */
        let hud = if paused { format!("PAUSED | {hud_fps_text}") } else { hud_fps_text.clone() };
        let screen = compositor.compose(&live, &session, &report, Some(&hud));
        drawer.present(&screen)?;
        last_screen = Some(screen);

        /* 5) FPS counter (log + HUD once per second) */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            info!(fps = %format!("{fps:.1}"), "frame rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    session.stop();
    Ok(())
}
