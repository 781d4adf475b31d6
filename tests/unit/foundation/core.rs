use super::*;

#[test]
fn fps_interval_for_thirty() {
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-12);
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn canvas_center_and_degenerate() {
    let c = Canvas::new(200, 100);
    assert_eq!(c.center(), Point::new(100.0, 50.0));
    assert_eq!(c.min_side(), 100.0);
    assert!(!c.is_degenerate());
    assert!(Canvas::new(0, 100).is_degenerate());
    assert!(Canvas::new(100, 0).is_degenerate());
}

#[test]
fn rgba_alpha_and_premultiply() {
    let c = Rgba8::with_alpha_f(58, 109, 240, 0.8);
    assert_eq!(c.a, 204);
    assert_eq!(Rgba8::new(255, 0, 0, 128).premultiplied(), [128, 0, 0, 128]);
    assert_eq!(Rgba8::new(10, 20, 30, 255).premultiplied(), [10, 20, 30, 255]);
    assert_eq!(Rgba8::new(10, 20, 30, 200).fade(0.5).a, 100);
}
