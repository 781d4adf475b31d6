use crate::{
    config::AnimationConfig,
    foundation::core::{Canvas, Point, Rect},
    layout::{
        geometry::SafeArea,
        path::{CircuitPath, Heading, Router},
        pin::{Pin, Side, place_side},
    },
};

/// Static geometry of one mount: the processor block, its pins and the paths leaving them.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Layout {
    pub canvas: Canvas,
    pub center: Point,
    /// Half the processor block's side length.
    pub processor_half: f64,
    pub safe_area: SafeArea,
    pub pins: Vec<Pin>,
    pub paths: Vec<CircuitPath>,
}

impl Layout {
    fn empty(canvas: Canvas, safe_area: SafeArea) -> Self {
        Self {
            canvas,
            center: canvas.center(),
            processor_half: 0.0,
            safe_area,
            pins: Vec::new(),
            paths: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty() && self.paths.is_empty()
    }

    pub fn processor_rect(&self) -> Rect {
        Rect::from_center_size(
            self.center,
            (self.processor_half * 2.0, self.processor_half * 2.0),
        )
    }

    pub fn pins_on(&self, side: Side) -> impl Iterator<Item = &Pin> + '_ {
        self.pins.iter().filter(move |p| p.side == side)
    }

    /// Total pulses alive across all paths.
    pub fn active_pulses(&self) -> usize {
        self.paths.iter().map(|p| p.pulses.len()).sum()
    }

    /// Per-pin highlight flags: a pin lights up while a pulse on one of its paths is still below
    /// `threshold` progress.
    pub fn pin_highlights(&self, threshold: f64) -> Vec<bool> {
        let mut lit = vec![false; self.pins.len()];
        for path in &self.paths {
            if path.pulses.iter().any(|p| p.progress < threshold) {
                lit[path.pin] = true;
            }
        }
        lit
    }
}

/// Outbound flag for the straight and elbow archetypes.
fn side_is_outbound(side: Side) -> bool {
    matches!(side, Side::Top | Side::Bottom)
}

/// Build the pin ring and route one path from every pin.
///
/// Archetypes are assigned in three passes: one straight path from the middle pin of each side,
/// elbows for about 40% of each side's remaining pins (sampled by index stride), and zigzags for
/// every pin still unclaimed. A zero-sized canvas yields an empty layout.
#[tracing::instrument(skip(cfg))]
pub fn generate_layout(canvas: Canvas, cfg: &AnimationConfig) -> Layout {
    let safe_area = SafeArea::new(canvas, cfg.safe_margin);
    if canvas.is_degenerate() {
        tracing::debug!("degenerate canvas, empty layout");
        return Layout::empty(canvas, safe_area);
    }

    let center = canvas.center();
    let half = canvas.min_side() * cfg.processor_fraction;

    let counts = cfg.pins_per_side;
    let mut pins = Vec::with_capacity(counts.total());
    for side in Side::ALL {
        let n = match side {
            Side::Top => counts.top,
            Side::Right => counts.right,
            Side::Bottom => counts.bottom,
            Side::Left => counts.left,
        };
        pins.extend(place_side(side, n, center, half));
    }

    let router = Router {
        center,
        half,
        area: safe_area,
    };
    let mut paths = Vec::with_capacity(pins.len());

    let unclaimed_on = |pins: &[Pin], side: Side| -> Vec<usize> {
        pins.iter()
            .enumerate()
            .filter(|(_, p)| p.side == side && !p.used_by_path)
            .map(|(i, _)| i)
            .collect()
    };

    for side in Side::ALL {
        let candidates = unclaimed_on(&pins, side);
        if candidates.is_empty() {
            continue;
        }
        let idx = candidates[candidates.len() / 2];
        let heading = Heading::from_outbound(side_is_outbound(side));
        paths.push(router.straight(idx, &mut pins[idx], heading));
    }

    for side in Side::ALL {
        let candidates = unclaimed_on(&pins, side);
        let n = candidates.len();
        let count = (n as f64 * 0.4).floor() as usize;
        let step = n as f64 / count.max(1) as f64;
        let heading = Heading::from_outbound(side_is_outbound(side));

        for i in 0..count {
            let k = (i as f64 * step).floor() as usize;
            if let Some(&idx) = candidates.get(k)
                && !pins[idx].used_by_path
            {
                paths.push(router.elbow(idx, &mut pins[idx], heading));
            }
        }
    }

    let remaining: Vec<usize> = (0..pins.len()).filter(|&i| !pins[i].used_by_path).collect();
    for (i, idx) in remaining.into_iter().enumerate() {
        let heading = Heading::from_outbound(i % 2 == 0);
        paths.push(router.zigzag(idx, &mut pins[idx], heading));
    }

    tracing::debug!(pins = pins.len(), paths = paths.len(), "layout generated");

    Layout {
        canvas,
        center,
        processor_half: half,
        safe_area,
        pins,
        paths,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/generate.rs"]
mod tests;
