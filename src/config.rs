use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::{Fps, Rgba8},
    error::{ChipflowError, ChipflowResult},
};

/// Tunables for the processor animation.
///
/// Every field has a default matching the hero-section animation, so a config file only needs to
/// name what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Inset (px) of the safe region that generated path points are clamped into.
    pub safe_margin: f64,
    /// Processor half-size as a fraction of the smaller canvas side.
    pub processor_fraction: f64,
    pub pins_per_side: PinsPerSide,
    pub pulse: PulseConfig,
    /// Target drawn-frame rate.
    pub fps: Fps,
    /// Blurred glow layer under paths, pulses and the processor.
    pub glow: bool,
    /// Clear colour; transparent when unset.
    pub background: Option<Rgba8>,
    pub palette: Palette,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            safe_margin: 30.0,
            processor_fraction: 0.15,
            pins_per_side: PinsPerSide::default(),
            pulse: PulseConfig::default(),
            fps: Fps::default(),
            glow: true,
            background: None,
            palette: Palette::default(),
        }
    }
}

impl AnimationConfig {
    pub fn validate(&self) -> ChipflowResult<()> {
        if !self.safe_margin.is_finite() || self.safe_margin < 0.0 {
            return Err(ChipflowError::validation(
                "safe_margin must be finite and >= 0",
            ));
        }
        if !self.processor_fraction.is_finite()
            || self.processor_fraction <= 0.0
            || self.processor_fraction >= 0.5
        {
            return Err(ChipflowError::validation(
                "processor_fraction must be in (0, 0.5)",
            ));
        }
        self.pulse.validate()?;
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }

    /// Load a JSON config file and validate it.
    pub fn from_json_file(path: &Path) -> ChipflowResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read animation config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Smallest canvas side for which the pin ring sits fully inside the safe region.
    pub fn min_layout_extent(&self) -> f64 {
        // Pins sit at center +- fraction*min; need min/2 - fraction*min >= margin.
        (self.safe_margin / (0.5 - self.processor_fraction)).ceil()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PinsPerSide {
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
    pub left: usize,
}

impl Default for PinsPerSide {
    fn default() -> Self {
        Self::uniform(8)
    }
}

impl PinsPerSide {
    pub fn uniform(n: usize) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    pub fn total(&self) -> usize {
        self.top + self.right + self.bottom + self.left
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Maximum number of pulses alive across all paths.
    pub cap: usize,
    /// Chance per tick that a pulse is spawned (when under the cap).
    pub spawn_probability: f64,
    /// Lowest per-tick progress increment.
    pub speed_min: f64,
    /// Random extra speed on top of `speed_min`, drawn uniformly from `[0, speed_jitter)`.
    pub speed_jitter: f64,
    /// Pins light up while a pulse on their path is below this progress.
    pub highlight_below: f64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            cap: 8,
            spawn_probability: 0.1,
            speed_min: 0.004,
            speed_jitter: 0.002,
            highlight_below: 0.1,
        }
    }
}

impl PulseConfig {
    pub fn validate(&self) -> ChipflowResult<()> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ChipflowError::validation(
                "pulse.spawn_probability must be in [0, 1]",
            ));
        }
        if !self.speed_min.is_finite() || self.speed_min <= 0.0 {
            return Err(ChipflowError::validation("pulse.speed_min must be > 0"));
        }
        if !self.speed_jitter.is_finite() || self.speed_jitter < 0.0 {
            return Err(ChipflowError::validation("pulse.speed_jitter must be >= 0"));
        }
        if !self.highlight_below.is_finite() {
            return Err(ChipflowError::validation(
                "pulse.highlight_below must be finite",
            ));
        }
        Ok(())
    }
}

/// Colours for one path heading: line, pulse and glow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tone {
    pub normal: Rgba8,
    pub bright: Rgba8,
    pub glow: Rgba8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Outbound paths, top/left pins.
    pub blue: Tone,
    /// Inbound paths, right/bottom pins.
    pub orange: Tone,
    pub processor_bg: Rgba8,
    pub processor_border: Rgba8,
    pub processor_text: Rgba8,
    pub processor_shadow: Rgba8,
    pub pin_idle: Rgba8,
    pub endpoint_core: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            blue: Tone {
                normal: Rgba8::with_alpha_f(58, 109, 240, 0.8),
                bright: Rgba8::new(58, 109, 240, 255),
                glow: Rgba8::with_alpha_f(58, 109, 240, 0.3),
            },
            orange: Tone {
                normal: Rgba8::with_alpha_f(255, 77, 28, 0.8),
                bright: Rgba8::new(255, 77, 28, 255),
                glow: Rgba8::with_alpha_f(255, 77, 28, 0.3),
            },
            processor_bg: Rgba8::with_alpha_f(20, 20, 35, 0.85),
            processor_border: Rgba8::with_alpha_f(58, 109, 240, 0.9),
            processor_text: Rgba8::new(65, 185, 255, 255),
            processor_shadow: Rgba8::with_alpha_f(0, 150, 255, 0.4),
            pin_idle: Rgba8::with_alpha_f(100, 100, 100, 0.5),
            endpoint_core: Rgba8::with_alpha_f(255, 255, 255, 0.9),
        }
    }
}
