use super::*;

use crate::{config::AnimationConfig, pulse::RngSource};

fn surface(canvas: Canvas) -> CpuSurface {
    CpuSurface::new(canvas).with_fontdb(Arc::new(usvg::fontdb::Database::new()))
}

fn scene(canvas: Canvas) -> Scene {
    Scene::new(canvas, AnimationConfig::default())
}

fn opaque_pixels(frame: &FrameRGBA) -> usize {
    frame.data.chunks_exact(4).filter(|px| px[3] != 0).count()
}

#[test]
fn renders_non_empty_frame() {
    let canvas = Canvas::new(160, 120);
    let frame = surface(canvas).render(&scene(canvas)).unwrap();
    assert_eq!((frame.width, frame.height), (160, 120));
    assert_eq!(frame.data.len(), 160 * 120 * 4);
    assert!(frame.premultiplied);
    assert!(opaque_pixels(&frame) > 0);
}

#[test]
fn same_seed_renders_same_pixels() {
    let canvas = Canvas::new(200, 150);
    let run = |seed| {
        let mut sc = scene(canvas);
        let mut rng = RngSource::seeded(seed);
        for _ in 0..40 {
            sc.tick(&mut rng);
        }
        surface(canvas).render(&sc).unwrap()
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn processor_centre_is_painted() {
    let canvas = Canvas::new(200, 200);
    let sc = scene(canvas);
    let frame = surface(canvas).render(&sc).unwrap();

    let c = sc.layout().center;
    let idx = ((c.y as usize) * 200 + c.x as usize) * 4;
    assert!(frame.data[idx + 3] > 200);
}

#[test]
fn degenerate_canvas_gives_empty_frame() {
    for canvas in [Canvas::new(0, 100), Canvas::new(100, 0)] {
        let frame = surface(canvas).render(&scene(canvas)).unwrap();
        assert!(frame.data.is_empty());
    }
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let canvas = Canvas::new(70_000, 10);
    let err = surface(canvas).render(&scene(canvas)).unwrap_err();
    assert!(matches!(err, ChipflowError::Render(_)));
}

#[test]
fn resize_changes_output_but_keeps_layout() {
    let small = Canvas::new(120, 120);
    let mut sc = scene(small);
    let before = sc.layout().clone();

    let mut s = surface(small);
    s.resize(Canvas::new(240, 180)).unwrap();
    s.draw(&sc).unwrap();

    let frame = s.frame().unwrap();
    assert_eq!((frame.width, frame.height), (240, 180));
    assert_eq!(sc.layout_mut().pins.len(), before.pins.len());
    assert_eq!(sc.layout().paths.len(), before.paths.len());
    assert_eq!(sc.layout().canvas, small);
}

#[test]
fn glow_adds_coverage() {
    let canvas = Canvas::new(160, 160);
    let with = surface(canvas).render(&scene(canvas)).unwrap();

    let cfg = AnimationConfig {
        glow: false,
        ..AnimationConfig::default()
    };
    let without = surface(canvas).render(&Scene::new(canvas, cfg)).unwrap();

    assert!(opaque_pixels(&with) > opaque_pixels(&without));
}

#[test]
fn background_fills_every_pixel() {
    let canvas = Canvas::new(64, 64);
    let cfg = AnimationConfig {
        background: Some(Rgba8::new(10, 20, 30, 255)),
        ..AnimationConfig::default()
    };
    let frame = surface(canvas).render(&Scene::new(canvas, cfg)).unwrap();
    assert_eq!(opaque_pixels(&frame), 64 * 64);
    assert_eq!(&frame.data[..4], &[10, 20, 30, 255]);
}

#[test]
fn draw_counts_frames() {
    let canvas = Canvas::new(100, 100);
    let sc = scene(canvas);
    let mut s = surface(canvas);
    assert!(s.frame().is_none());
    s.draw(&sc).unwrap();
    s.draw(&sc).unwrap();
    assert_eq!(s.frames_drawn(), 2);
}
