use crate::foundation::core::{Canvas, Point};

/// The canvas rectangle inset by the safe margin.
///
/// On a canvas narrower than twice the margin the region is inverted and
/// [`constrain`](Self::constrain) lands on the far edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SafeArea {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl SafeArea {
    pub fn new(canvas: Canvas, margin: f64) -> Self {
        Self {
            min_x: margin,
            min_y: margin,
            max_x: f64::from(canvas.width) - margin,
            max_y: f64::from(canvas.height) - margin,
        }
    }

    pub fn constrain(&self, p: Point) -> Point {
        Point::new(
            self.max_x.min(self.min_x.max(p.x)),
            self.max_y.min(self.min_y.max(p.y)),
        )
    }

    pub fn contains(&self, p: Point) -> bool {
        self.min_x <= p.x && p.x <= self.max_x && self.min_y <= p.y && p.y <= self.max_y
    }
}

/// Sum of the Euclidean lengths of consecutive segments.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Map `progress` in `[0, 1]` onto a polyline whose total length is `total`.
///
/// Walks segments, subtracting each length, until the remaining distance fits inside the current
/// segment, then interpolates linearly. A zero `total` is treated as 1. Returns `None` when the
/// distance runs past the last segment.
pub fn point_along(points: &[Point], total: f64, progress: f64) -> Option<Point> {
    let total = if total == 0.0 { 1.0 } else { total };
    let mut remaining = progress * total;

    for w in points.windows(2) {
        let (p1, p2) = (w[0], w[1]);
        let seg = p1.distance(p2);
        if remaining <= seg {
            if seg == 0.0 {
                return Some(p1);
            }
            return Some(p1.lerp(p2, remaining / seg));
        }
        remaining -= seg;
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
