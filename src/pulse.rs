//! Travelling markers on circuit paths.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    config::PulseConfig,
    foundation::core::Point,
    layout::{CircuitPath, Layout, geometry::point_along},
};

/// Source of uniform draws in `[0, 1)`.
///
/// Spawning goes through this trait so spawn sequences can be replayed in tests.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

/// Adapter from any [`rand::Rng`].
#[derive(Clone, Debug)]
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ReplaySource {
    values: Vec<f64>,
    cursor: usize,
}

impl ReplaySource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ReplaySource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Pulse {
    /// Fraction of the owning path's length covered so far.
    pub progress: f64,
    /// Progress added per tick.
    pub speed: f64,
}

impl Pulse {
    pub fn new(progress: f64, speed: f64) -> Self {
        Self { progress, speed }
    }

    pub fn step(&mut self) {
        self.progress += self.speed;
    }

    pub fn is_finished(&self) -> bool {
        self.progress > 1.0
    }

    /// Screen position on `path`, or `None` once it has run off the end.
    pub fn position_on(&self, path: &CircuitPath) -> Option<Point> {
        point_along(&path.points, path.length, self.progress)
    }
}

/// What one simulation tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Path that received a new pulse, if any.
    pub spawned_on: Option<usize>,
    pub retired: usize,
    /// Pulses alive after the tick.
    pub active: usize,
}

/// Spawns, advances and retires pulses.
#[derive(Clone, Debug)]
pub struct PulseSimulator {
    cfg: PulseConfig,
}

impl PulseSimulator {
    pub fn new(cfg: PulseConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &PulseConfig {
        &self.cfg
    }

    /// Maybe add one pulse at progress 0 on a uniformly chosen path.
    ///
    /// Nothing is drawn from `rng` while the cap is reached. Draw order otherwise: spawn roll,
    /// path pick, speed.
    pub fn spawn(&self, paths: &mut [CircuitPath], rng: &mut dyn RandomSource) -> Option<usize> {
        let active: usize = paths.iter().map(|p| p.pulses.len()).sum();
        if active >= self.cfg.cap || paths.is_empty() {
            return None;
        }
        if rng.next_unit() > self.cfg.spawn_probability {
            return None;
        }

        let idx = ((rng.next_unit() * paths.len() as f64).floor() as usize).min(paths.len() - 1);
        let speed = self.cfg.speed_min + rng.next_unit() * self.cfg.speed_jitter;
        paths[idx].pulses.push(Pulse::new(0.0, speed));
        tracing::trace!(path = idx, speed, "pulse spawned");
        Some(idx)
    }

    /// Step every pulse and drop the ones past the end. Returns how many were dropped.
    ///
    /// Finished pulses are collected during the pass over a path and removed afterwards, so the
    /// pass never observes a shifting list.
    pub fn advance(&self, paths: &mut [CircuitPath]) -> usize {
        let mut retired = 0;
        let mut finished = Vec::new();
        for path in paths.iter_mut() {
            finished.clear();
            for (i, pulse) in path.pulses.iter_mut().enumerate() {
                pulse.step();
                if pulse.is_finished() {
                    finished.push(i);
                }
            }
            for &i in finished.iter().rev() {
                path.pulses.remove(i);
            }
            retired += finished.len();
        }
        retired
    }

    /// One drawn frame's worth of simulation: spawn, then advance.
    pub fn tick(&self, layout: &mut Layout, rng: &mut dyn RandomSource) -> TickReport {
        let spawned_on = self.spawn(&mut layout.paths, rng);
        let retired = self.advance(&mut layout.paths);
        TickReport {
            spawned_on,
            retired,
            active: layout.active_pulses(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/pulse.rs"]
mod tests;
