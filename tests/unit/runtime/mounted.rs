use super::*;

use crate::{foundation::core::Canvas, pulse::ReplaySource, runtime::OfflineHost};

#[derive(Default)]
struct CountingSurface {
    canvas: Option<Canvas>,
    resizes: usize,
    draws: usize,
    fail_draws: bool,
}

impl Surface for CountingSurface {
    fn resize(&mut self, canvas: Canvas) -> ChipflowResult<()> {
        self.canvas = Some(canvas);
        self.resizes += 1;
        Ok(())
    }

    fn draw(&mut self, _scene: &Scene) -> ChipflowResult<()> {
        if self.fail_draws {
            return Err(ChipflowError::render("boom"));
        }
        self.draws += 1;
        Ok(())
    }
}

fn quiet_rng() -> ReplaySource {
    ReplaySource::new(vec![0.9])
}

#[test]
fn mount_sizes_surface_and_starts_loop() {
    let mut host = OfflineHost::new(Canvas::new(300, 200));
    let anim = mount(
        &mut host,
        CountingSurface::default(),
        AnimationConfig::default(),
        quiet_rng(),
    )
    .unwrap();

    assert_eq!(anim.surface().canvas, Some(Canvas::new(300, 200)));
    assert_eq!(anim.scene().layout().canvas, Canvas::new(300, 200));
    assert!(anim.pending_request().is_some());
    assert_eq!(anim.host().listeners().len(), 1);
    assert_eq!(anim.host().requests_made(), 1);
}

#[test]
fn mount_without_container_fails_cleanly() {
    let mut host = OfflineHost::detached();
    let err = mount(
        &mut host,
        CountingSurface::default(),
        AnimationConfig::default(),
        quiet_rng(),
    )
    .err()
    .unwrap();

    assert!(matches!(err, ChipflowError::Validation(_)));
    assert_eq!(host.requests_made(), 0);
    assert!(host.listeners().is_empty());
}

#[test]
fn invalid_config_is_rejected() {
    let mut host = OfflineHost::new(Canvas::new(100, 100));
    let cfg = AnimationConfig {
        processor_fraction: 0.7,
        ..AnimationConfig::default()
    };
    assert!(mount(&mut host, CountingSurface::default(), cfg, quiet_rng()).is_err());
    assert_eq!(host.requests_made(), 0);
}

#[test]
fn frames_are_paced_and_always_rerequested() {
    let mut host = OfflineHost::new(Canvas::new(200, 200));
    let mut anim = mount(
        &mut host,
        CountingSurface::default(),
        AnimationConfig::default(),
        quiet_rng(),
    )
    .unwrap();

    assert_eq!(anim.on_frame(16.0).unwrap(), FrameOutcome::Skipped);
    assert_eq!(anim.host().requests_made(), 2);
    assert_eq!(anim.surface().draws, 0);
    assert_eq!(anim.scene().ticks(), 0);

    assert!(anim.on_frame(34.0).unwrap().is_drawn());
    assert_eq!(anim.surface().draws, 1);
    assert_eq!(anim.scene().ticks(), 1);

    assert_eq!(anim.on_frame(50.0).unwrap(), FrameOutcome::Skipped);
    assert!(anim.on_frame(68.0).unwrap().is_drawn());
    assert_eq!(anim.host().requests_made(), 5);
    assert_eq!(anim.surface().draws, 2);
}

#[test]
fn failed_draw_still_requests_next_frame() {
    let mut host = OfflineHost::new(Canvas::new(200, 200));
    let surface = CountingSurface {
        fail_draws: true,
        ..CountingSurface::default()
    };
    let mut anim = mount(&mut host, surface, AnimationConfig::default(), quiet_rng()).unwrap();

    assert!(anim.on_frame(40.0).is_err());
    assert!(anim.pending_request().is_some());
    assert_eq!(anim.host().requests_made(), 2);
}

#[test]
fn resize_follows_container_but_keeps_layout() {
    let mut host = OfflineHost::new(Canvas::new(200, 200));
    let mut anim = mount(
        &mut host,
        CountingSurface::default(),
        AnimationConfig::default(),
        quiet_rng(),
    )
    .unwrap();
    let paths_before = anim.scene().layout().paths.clone();

    anim.host_mut().set_container(Some(Canvas::new(640, 480)));
    anim.on_resize().unwrap();
    assert_eq!(anim.surface().canvas, Some(Canvas::new(640, 480)));
    assert_eq!(anim.surface().resizes, 2);
    assert_eq!(anim.scene().layout().canvas, Canvas::new(200, 200));
    assert_eq!(anim.scene().layout().paths.len(), paths_before.len());
    assert_eq!(anim.scene().layout().paths[0].points, paths_before[0].points);

    anim.host_mut().set_container(None);
    anim.on_resize().unwrap();
    assert_eq!(anim.surface().canvas, Some(Canvas::new(640, 480)));
}

#[test]
fn drop_releases_frame_and_listener_once() {
    let mut host = OfflineHost::new(Canvas::new(200, 200));
    let (pending, listener) = {
        let mut anim = mount(
            &mut host,
            CountingSurface::default(),
            AnimationConfig::default(),
            quiet_rng(),
        )
        .unwrap();
        anim.on_frame(40.0).unwrap();
        (anim.pending_request().unwrap(), anim.host().listeners()[0])
    };

    assert_eq!(host.cancelled(), &[pending]);
    assert_eq!(host.removed_listeners(), &[listener]);
    assert!(host.listeners().is_empty());
    assert_eq!(host.outstanding_request(), None);
    assert_eq!(host.requests_made(), 2);
}

#[test]
fn unmount_is_teardown() {
    let mut host = OfflineHost::new(Canvas::new(120, 120));
    let anim = mount(
        &mut host,
        CountingSurface::default(),
        AnimationConfig::default(),
        quiet_rng(),
    )
    .unwrap();
    anim.unmount();

    assert_eq!(host.cancelled().len(), 1);
    assert_eq!(host.removed_listeners().len(), 1);
}
