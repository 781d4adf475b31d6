use crate::{
    config::AnimationConfig,
    foundation::core::Canvas,
    layout::{Layout, generate_layout},
    pulse::{PulseSimulator, RandomSource, TickReport},
};

/// Everything one mounted animation draws: the static layout, live pulses and the config they
/// were built from.
#[derive(Clone, Debug)]
pub struct Scene {
    cfg: AnimationConfig,
    layout: Layout,
    simulator: PulseSimulator,
    ticks: u64,
}

impl Scene {
    /// Generate the layout for `canvas`. The layout is kept for the scene's lifetime.
    pub fn new(canvas: Canvas, cfg: AnimationConfig) -> Self {
        let layout = generate_layout(canvas, &cfg);
        let simulator = PulseSimulator::new(cfg.pulse);
        Self {
            cfg,
            layout,
            simulator,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.cfg
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// Simulation ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick(&mut self, rng: &mut dyn RandomSource) -> TickReport {
        self.ticks += 1;
        self.simulator.tick(&mut self.layout, rng)
    }

    pub fn pin_highlights(&self) -> Vec<bool> {
        self.layout
            .pin_highlights(self.simulator.config().highlight_below)
    }
}
