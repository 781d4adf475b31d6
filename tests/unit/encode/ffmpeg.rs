use super::*;

#[test]
fn stream_validation_catches_bad_shapes() {
    let fps = Fps::default();
    assert!(EncodeConfig::validate_stream(Canvas::new(0, 10), fps).is_err());
    assert!(EncodeConfig::validate_stream(Canvas::new(11, 10), fps).is_err());
    assert!(EncodeConfig::validate_stream(Canvas::new(10, 10), Fps { num: 0, den: 1 }).is_err());
    EncodeConfig::validate_stream(Canvas::new(640, 360), fps).unwrap();
}

#[test]
fn flatten_premul_over_black() {
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(&mut dst, &[128, 0, 0, 128], true, Rgba8::new(0, 0, 0, 255)).unwrap();
    assert_eq!(dst, vec![128, 0, 0, 255]);
}

#[test]
fn flatten_straight_over_white() {
    let mut dst = vec![0u8; 4];
    flatten_to_opaque_rgba8(
        &mut dst,
        &[0, 0, 0, 128],
        false,
        Rgba8::new(255, 255, 255, 255),
    )
    .unwrap();
    assert_eq!(dst, vec![127, 127, 127, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0; 4], true, Rgba8::transparent()).is_err());
}

#[test]
fn sink_requires_begin() {
    let mut sink = FfmpegSink::new(EncodeConfig::new("target/never.mp4"));
    let frame = FrameRGBA::empty(Canvas::new(2, 2));
    assert!(matches!(sink.push_frame(&frame), Err(ChipflowError::Encode(_))));
    assert!(sink.end().is_err());
    assert_eq!(sink.frames_written(), 0);
}

#[test]
fn begin_rejects_odd_canvas_before_spawning() {
    let mut sink = FfmpegSink::new(EncodeConfig::new("target/never.mp4"));
    let err = sink.begin(Canvas::new(31, 20), Fps::default()).unwrap_err();
    assert!(matches!(err, ChipflowError::Validation(_)));
}
