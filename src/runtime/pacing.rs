use crate::foundation::core::Fps;

/// Drops host frames that arrive sooner than the target interval after the last drawn one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePacer {
    interval_ms: f64,
    last_drawn_ms: f64,
}

impl FramePacer {
    pub fn new(fps: Fps) -> Self {
        Self {
            interval_ms: fps.frame_interval_ms(),
            last_drawn_ms: 0.0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn last_drawn_ms(&self) -> f64 {
        self.last_drawn_ms
    }

    /// Whether a frame at `timestamp_ms` should be drawn. Admitting records it as the last drawn.
    pub fn admit(&mut self, timestamp_ms: f64) -> bool {
        if timestamp_ms - self.last_drawn_ms < self.interval_ms {
            return false;
        }
        self.last_drawn_ms = timestamp_ms;
        true
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(Fps::default())
    }
}
