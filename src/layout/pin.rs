use crate::foundation::core::{Point, Vec2};

/// Side of the processor block a pin sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    /// Placement order used by the layout generator.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Unit vector pointing away from the processor.
    pub fn outward(self) -> Vec2 {
        match self {
            Side::Top => Vec2::new(0.0, -1.0),
            Side::Right => Vec2::new(1.0, 0.0),
            Side::Bottom => Vec2::new(0.0, 1.0),
            Side::Left => Vec2::new(-1.0, 0.0),
        }
    }

    /// `true` for sides whose pins run along the x axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }

    /// Unit vector perpendicular to `outward`, pointing away from the centre line through `center`.
    pub fn away_from_center(self, pin: Point, center: Point) -> Vec2 {
        if self.is_horizontal() {
            Vec2::new(if pin.x < center.x { -1.0 } else { 1.0 }, 0.0)
        } else {
            Vec2::new(0.0, if pin.y < center.y { -1.0 } else { 1.0 })
        }
    }
}

/// Connector point on the processor edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Pin {
    pub position: Point,
    pub side: Side,
    /// Set once a path has been routed from this pin.
    pub used_by_path: bool,
}

/// Evenly space `count` pins along one side of a block of half-size `half` centred on `center`.
///
/// Pins keep `0.2 * half` clear of each corner. A single pin sits in the middle of the side.
pub(super) fn place_side(side: Side, count: usize, center: Point, half: f64) -> Vec<Pin> {
    let pin_margin = half * 0.2;
    let span = half * 2.0 - pin_margin * 2.0;

    (0..count)
        .map(|i| {
            let offset = if count == 1 {
                half
            } else {
                pin_margin + i as f64 * (span / (count - 1) as f64)
            };

            let position = match side {
                Side::Top => Point::new(center.x - half + offset, center.y - half),
                Side::Right => Point::new(center.x + half, center.y - half + offset),
                Side::Bottom => Point::new(center.x - half + offset, center.y + half),
                Side::Left => Point::new(center.x - half, center.y - half + offset),
            };

            Pin {
                position,
                side,
                used_by_path: false,
            }
        })
        .collect()
}
