use super::*;
use crate::{
    config::AnimationConfig,
    foundation::core::Canvas,
    layout::generate_layout,
};

fn layout() -> Layout {
    generate_layout(Canvas::new(640, 480), &AnimationConfig::default())
}

fn sim() -> PulseSimulator {
    PulseSimulator::new(PulseConfig::default())
}

#[test]
fn spawn_uses_roll_then_path_then_speed() {
    let mut layout = layout();
    let n = layout.paths.len();
    let mut rng = ReplaySource::new(vec![0.05, 0.5, 0.5]);

    let idx = sim().spawn(&mut layout.paths, &mut rng).unwrap();
    assert_eq!(idx, n / 2);
    assert_eq!(rng.draws(), 3);

    let pulse = layout.paths[idx].pulses[0];
    assert_eq!(pulse.progress, 0.0);
    assert!((pulse.speed - 0.005).abs() < 1e-12);
}

#[test]
fn failed_roll_spawns_nothing() {
    let mut layout = layout();
    let mut rng = ReplaySource::new(vec![0.2]);
    assert_eq!(sim().spawn(&mut layout.paths, &mut rng), None);
    assert_eq!(rng.draws(), 1);
    assert_eq!(layout.active_pulses(), 0);
}

#[test]
fn roll_at_probability_still_spawns() {
    let mut layout = layout();
    let mut rng = ReplaySource::new(vec![0.1, 0.0, 0.0]);
    assert_eq!(sim().spawn(&mut layout.paths, &mut rng), Some(0));
}

#[test]
fn full_cap_draws_nothing() {
    let mut layout = layout();
    for i in 0..8 {
        layout.paths[i].pulses.push(Pulse::new(0.3, 0.005));
    }
    let mut rng = ReplaySource::new(vec![0.0]);
    assert_eq!(sim().spawn(&mut layout.paths, &mut rng), None);
    assert_eq!(rng.draws(), 0);
}

#[test]
fn empty_layout_never_spawns() {
    let mut layout = generate_layout(Canvas::new(0, 0), &AnimationConfig::default());
    let mut rng = ReplaySource::new(vec![0.0]);
    let report = sim().tick(&mut layout, &mut rng);
    assert_eq!(report, TickReport::default());
}

#[test]
fn progress_is_monotonic_and_removal_happens_on_first_overshoot() {
    let mut layout = layout();
    layout.paths[0].pulses.push(Pulse::new(0.0, 0.25));
    let s = sim();

    let mut last = 0.0;
    for step in 1..=4 {
        assert_eq!(s.advance(&mut layout.paths), 0, "step {step}");
        let p = layout.paths[0].pulses[0].progress;
        assert!(p >= last);
        last = p;
    }
    // Exactly 1.0 is still on the path.
    assert_eq!(layout.paths[0].pulses[0].progress, 1.0);

    assert_eq!(s.advance(&mut layout.paths), 1);
    assert!(layout.paths[0].pulses.is_empty());
}

#[test]
fn removal_keeps_the_order_of_survivors() {
    let mut layout = layout();
    layout.paths[2].pulses = vec![
        Pulse::new(0.999, 0.01),
        Pulse::new(0.1, 0.01),
        Pulse::new(0.995, 0.01),
        Pulse::new(0.2, 0.01),
    ];
    assert_eq!(sim().advance(&mut layout.paths), 2);
    let left: Vec<f64> = layout.paths[2].pulses.iter().map(|p| p.progress).collect();
    assert!((left[0] - 0.11).abs() < 1e-12);
    assert!((left[1] - 0.21).abs() < 1e-12);
}

#[test]
fn cap_holds_after_every_tick() {
    let cfg = PulseConfig {
        spawn_probability: 1.0,
        ..PulseConfig::default()
    };
    let s = PulseSimulator::new(cfg);
    let mut layout = layout();
    let mut rng = RngSource::seeded(7);

    let mut saw_cap = false;
    for _ in 0..2_000 {
        let report = s.tick(&mut layout, &mut rng);
        assert!(report.active <= 8);
        saw_cap |= report.active == 8;
    }
    assert!(saw_cap);
}

#[test]
fn seeded_runs_are_reproducible() {
    let run = |seed| {
        let mut layout = layout();
        let mut rng = RngSource::seeded(seed);
        (0..500)
            .map(|_| sim().tick(&mut layout, &mut rng))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(42), run(42));
    assert!(run(42).iter().any(|r| r.spawned_on.is_some()));
}

#[test]
fn spawned_pulse_is_advanced_in_the_same_tick() {
    let mut layout = layout();
    let mut rng = ReplaySource::new(vec![0.0, 0.0, 0.0]);
    let report = sim().tick(&mut layout, &mut rng);
    assert_eq!(report.spawned_on, Some(0));
    assert!((layout.paths[0].pulses[0].progress - 0.004).abs() < 1e-12);
}

#[test]
fn position_follows_the_path() {
    let layout = layout();
    let path = &layout.paths[0];
    assert_eq!(Pulse::new(0.0, 0.0).position_on(path), Some(path.start()));
    let end = Pulse::new(1.0, 0.0).position_on(path).unwrap();
    assert!(end.distance(path.end()) < 1e-9);
}
