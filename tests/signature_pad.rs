use signature_pad::{
    Color, PadConfig, PadPhase, Point, Segment, SignatureAction, SignaturePad, SignatureState,
};

fn pad(width: u32, height: u32) -> SignaturePad {
    SignaturePad::new(PadConfig { width, height, ..PadConfig::default() })
}

fn stroke(pad: &mut SignaturePad, pts: &[(f32, f32)]) {
    let (x, y) = pts[0];
    pad.pointer_down(Point::new(x, y));
    for &(x, y) in &pts[1..] {
        pad.pointer_move(Point::new(x, y));
    }
    pad.pointer_up();
}

#[test]
fn three_points_make_two_segments_then_clear() {
    let mut pad = pad(100, 100);
    stroke(&mut pad, &[(0.0, 0.0), (10.0, 10.0), (20.0, 5.0)]);

    assert_eq!(
        pad.state().segments(),
        &[
            Segment::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)),
            Segment::new(Point::new(10.0, 10.0), Point::new(20.0, 5.0)),
        ]
    );

    pad.handle_action(SignatureAction::Clear);
    assert_eq!(pad.state().len(), 0);
    assert_eq!(pad.phase(), PadPhase::Empty);
}

#[test]
fn drawn_path_shows_up_in_the_image() {
    let mut pad = pad(200, 100);
    stroke(&mut pad, &[(20.0, 50.0), (60.0, 50.0), (100.0, 70.0), (180.0, 30.0)]);
    assert!(!pad.is_empty());

    let img = pad.complete().expect("non-empty pad completes with an image");
    assert!(!img.is_blank());
    // A point on the first segment and one on the last.
    assert_eq!(img.pixel(40, 50).map(|c| c.a), Some(255));
    assert_eq!(img.pixel(140, 50).map(|c| c.a), Some(255));
    // A corner far from every segment is untouched.
    assert_eq!(img.pixel(195, 95), Some(Color::TRANSPARENT));
}

#[test]
fn tap_then_complete_is_none() {
    let mut pad = pad(100, 100);
    stroke(&mut pad, &[(50.0, 50.0)]);
    assert!(pad.state().is_empty());
    assert!(pad.complete().is_none());
}

#[test]
fn clear_twice_equals_clear_once() {
    let mut once = SignatureState::new();
    let mut twice = SignatureState::new();
    for s in [&mut once, &mut twice] {
        s.append(Segment::new(Point::new(1.0, 1.0), Point::new(2.0, 2.0)));
    }
    once.clear();
    twice.clear();
    twice.clear();
    assert!(once.is_empty() && twice.is_empty());
    assert_eq!(once.revision(), twice.revision());
    assert_eq!(once.segments(), twice.segments());
}

#[test]
fn strokes_survive_a_save_restore_boundary() {
    let mut pad = pad(120, 80);
    stroke(&mut pad, &[(1.5, 2.7), (100.123, 70.456), (33.3, 11.1)]);
    let json = pad.state().to_json().unwrap();

    let restored = SignatureState::from_json(&json).unwrap();
    assert_eq!(restored.segments(), pad.state().segments());

    // The image is recomputed lazily and matches the original pixel for pixel.
    let original = pad.complete().unwrap();
    let again = SignaturePad::with_state(pad.config().clone(), restored).complete().unwrap();
    assert_eq!(original, again);
}

#[test]
fn render_is_pure_over_state_and_style() {
    let mut a = pad(80, 80);
    let mut b = pad(80, 80);
    stroke(&mut a, &[(10.0, 10.0), (70.0, 70.0)]);
    stroke(&mut b, &[(70.0, 10.0), (10.0, 70.0)]);
    b.clear();
    stroke(&mut b, &[(10.0, 10.0), (70.0, 70.0)]);
    assert_eq!(a.complete(), b.complete());
}

#[test]
fn bundled_demo_config_loads() {
    let config = PadConfig::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/pad.toml")).unwrap();
    assert_eq!((config.width, config.height), (640, 260));
    assert!(!config.has_alpha);
    assert_eq!(config.guideline.dash_intervals, vec![12.0, 8.0]);

    let mut pad = SignaturePad::new(config);
    stroke(&mut pad, &[(100.0, 100.0), (300.0, 120.0)]);
    let img = pad.complete().unwrap();
    assert_eq!(img.pixel(5, 5), Some(Color::rgb(0xFA, 0xFA, 0xFA)));
}

#[test]
fn non_finite_press_keeps_saved_strokes_restorable() {
    let mut pad = pad(40, 40);
    pad.pointer_down(Point::new(f32::NAN, 1.0));
    pad.pointer_move(Point::new(5.0, 5.0));
    pad.pointer_up();
    assert!(pad.is_empty());

    stroke(&mut pad, &[(5.0, 5.0), (30.0, 30.0)]);
    let json = pad.state().to_json().unwrap();
    let restored = SignatureState::from_json(&json).unwrap();
    assert_eq!(restored.segments(), pad.state().segments());
}

#[test]
fn adopted_state_is_previewed_with_the_new_config() {
    let mut state = SignatureState::new();
    state.append(Segment::new(Point::new(5.0, 20.0), Point::new(35.0, 20.0)));
    let ink = PadConfig { width: 40, height: 40, signature_color: Color::BLACK, ..PadConfig::default() };
    state.refresh(40, 40, &ink.preview_options());

    let red = Color::rgb(255, 0, 0);
    let mut pad = SignaturePad::with_state(PadConfig { signature_color: red, ..ink }, state);
    assert_eq!(pad.preview().pixel(20, 20), Some(red));
}
