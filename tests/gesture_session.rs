use air_doodle::canvas::Canvas;
use air_doodle::drawing::Mode;
use air_doodle::landmarks::synth::{Gesture, hand};
use air_doodle::landmarks::{
    INDEX_TIP, JsonLinesSource, LandmarkSet, LandmarkSource, THUMB_TIP, primary_hand,
};
use air_doodle::{Color, Config, Point, Session, ShapeMode};

const W: usize = 640;
const H: usize = 480;

fn half_step(config: Config) -> Session {
    Session::new(Config { smoothing_factor: 0.5, ..config }, W, H)
}

fn at(x: f32, y: f32, g: Gesture) -> LandmarkSet {
    hand(Point::new(x / W as f32, y / H as f32), g)
}

/// Raw target that moves a factor-0.5 cursor onto (x, y) in one frame.
fn aim(s: &Session, x: f32, y: f32, g: Gesture) -> LandmarkSet {
    match s.cursor() {
        Some(c) => at(2.0 * x - c.x, 2.0 * y - c.y, g),
        None => at(x, y, g),
    }
}

fn move_to(s: &mut Session, x: f32, y: f32, g: Gesture) {
    let next = aim(s, x, y, g);
    s.process_frame(Some(&next));
}

#[test]
fn test_circle_is_committed_once_per_release() {
    // 800x800 keeps every coordinate below exactly representable after normalization
    let mut s = Session::new(Config { smoothing_factor: 0.5, ..Config::default() }, 800, 800);
    s.set_shape(ShapeMode::Circle);
    let px = |x: f32, y: f32, g| hand(Point::new(x / 800.0, y / 800.0), g);

    let mut ops = s.process_frame(Some(&px(100.0, 100.0, Gesture::Pinch))).ops_applied;
    // 200 pulls the half-step cursor from 100 to 150; after that it holds at 150
    let r = s.process_frame(Some(&px(200.0, 100.0, Gesture::Pinch)));
    assert_eq!(s.cursor(), Some(Point::new(150.0, 100.0)));
    ops += r.ops_applied;
    for _ in 0..4 {
        let r = s.process_frame(Some(&px(150.0, 100.0, Gesture::Pinch)));
        assert!(r.preview.is_some());
        ops += r.ops_applied;
    }
    assert_eq!(ops, 0, "nothing permanent while previewing");
    assert!(s.canvas().is_blank());

    let release = s.process_frame(Some(&px(150.0, 100.0, Gesture::Neutral)));
    assert_eq!(release.ops_applied, 1);
    assert_eq!(release.mode, Mode::Idle);

    let mut expected = Canvas::new(800, 800);
    expected.stroke_circle(Point::new(100.0, 100.0), 50.0, Color::rgb(0, 255, 0), 6.0);
    assert_eq!(s.canvas().pixels(), expected.pixels());

    let idle = s.process_frame(Some(&px(150.0, 100.0, Gesture::Neutral)));
    assert_eq!(idle.ops_applied, 0);
}

#[test]
fn test_open_palm_beats_pinch() {
    let mut pts = *at(320.0, 240.0, Gesture::OpenPalm).points();
    pts[THUMB_TIP] = Point::new(pts[INDEX_TIP].x + 0.02, pts[INDEX_TIP].y);
    let both = LandmarkSet::from_array(pts);

    let mut s = half_step(Config::default());
    let r = s.process_frame(Some(&both));
    assert_eq!(r.mode, Mode::Erasing);
}

#[test]
fn test_erase_clears_all_ink_within_radius() {
    let mut s = half_step(Config::default());
    // a long stroke and a rectangle
    s.process_frame(Some(&at(200.0, 240.0, Gesture::Pinch)));
    move_to(&mut s, 400.0, 240.0, Gesture::Pinch);
    move_to(&mut s, 400.0, 240.0, Gesture::Neutral);
    s.set_shape(ShapeMode::Rectangle);
    move_to(&mut s, 280.0, 200.0, Gesture::Pinch);
    move_to(&mut s, 360.0, 280.0, Gesture::Pinch);
    move_to(&mut s, 360.0, 280.0, Gesture::Neutral);
    assert!(!s.canvas().is_blank());

    move_to(&mut s, 320.0, 240.0, Gesture::OpenPalm);
    let center = s.cursor().unwrap();
    assert!(center.distance(Point::new(320.0, 240.0)) < 1e-2);
    let canvas = s.canvas();
    for y in 0..H {
        for x in 0..W {
            let p = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            if p.distance(center) <= 80.0 {
                assert!(!canvas.is_inked(x, y), "pixel ({x},{y}) survived the eraser");
            }
        }
    }
    // the stroke's left end is outside the eraser
    assert!(canvas.is_inked(205, 240));
    assert!(canvas.is_inked(235, 240));
}

#[test]
fn test_dwell_then_draw_uses_new_colour() {
    let mut s = half_step(Config { hover_threshold: 4, ..Config::default() });
    for _ in 0..4 {
        s.process_frame(Some(&at(200.0, 60.0, Gesture::Neutral)));
    }
    assert_eq!(s.color(), Color::rgb(0, 0, 255));

    move_to(&mut s, 260.0, 200.0, Gesture::Neutral);
    move_to(&mut s, 300.0, 300.0, Gesture::Pinch);
    move_to(&mut s, 340.0, 300.0, Gesture::Pinch);
    assert_eq!(s.canvas().pixel(320, 300), Color::rgb(0, 0, 255).to_argb_u32());
}

#[test]
fn test_dwell_resets_when_hand_leaves_targets() {
    let mut s = half_step(Config { hover_threshold: 3, ..Config::default() });
    s.process_frame(Some(&at(100.0, 60.0, Gesture::Neutral)));
    s.process_frame(Some(&at(100.0, 60.0, Gesture::Neutral)));
    move_to(&mut s, 100.0, 200.0, Gesture::Neutral);
    // the cursor eases back: 130, 95, then 77.5 which is inside the button again
    let mut hovered = false;
    for _ in 0..3 {
        let r = s.process_frame(Some(&at(100.0, 60.0, Gesture::Neutral)));
        assert!(r.selection.is_none());
        hovered = r.hovered.is_some();
    }
    assert!(hovered);
    assert_eq!(s.color(), Color::rgb(0, 255, 0));
}

#[test]
fn test_smoothed_cursor_lags_behind_jumps() {
    let mut s = Session::new(Config::default(), W, H);
    let first = s.process_frame(Some(&at(100.0, 400.0, Gesture::Neutral))).cursor.unwrap();
    assert!((first.x - 100.0).abs() < 1e-3);
    let second = s.process_frame(Some(&at(500.0, 400.0, Gesture::Neutral))).cursor.unwrap();
    assert!((second.x - (100.0 + 400.0 * 0.35)).abs() < 1e-2);
}

#[test]
fn test_replayed_landmarks_drive_a_stroke() {
    fn line(tip: Point, gesture: Gesture) -> String {
        let pts: Vec<String> = hand(tip, gesture)
            .points()
            .iter()
            .map(|p| format!("[{},{}]", p.x, p.y))
            .collect();
        format!("{{\"hands\": [[{}]]}}", pts.join(","))
    }
    let text = [
        line(Point::new(0.25, 0.5), Gesture::Pinch),
        line(Point::new(0.5, 0.5), Gesture::Pinch),
        "{\"hands\": []}".to_string(),
    ]
    .join("\n");

    let mut src = JsonLinesSource::new(std::io::Cursor::new(text));
    let mut s = half_step(Config::default());
    while let Some(frame) = src.next_frame().unwrap() {
        s.process_frame(primary_hand(&frame));
    }
    // cursor goes 160 -> 240 along y = 240
    assert!(s.canvas().is_inked(200, 240));
    assert_eq!(s.mode(), Mode::Idle);
}
