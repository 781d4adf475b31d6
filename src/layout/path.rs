use crate::{
    config::{Palette, Tone},
    foundation::core::Point,
    layout::{
        geometry::{SafeArea, polyline_length},
        pin::Pin,
    },
    pulse::Pulse,
};

/// Path archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    /// Pin straight out to the edge.
    Straight,
    /// One bend ("L").
    Elbow,
    /// Two bends ("Z").
    Zigzag,
}

/// Which way data notionally flows along the path; selects the colour pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    Outbound,
    Inbound,
}

impl Heading {
    pub fn from_outbound(outbound: bool) -> Self {
        if outbound {
            Heading::Outbound
        } else {
            Heading::Inbound
        }
    }

    pub fn tone(self, palette: &Palette) -> Tone {
        match self {
            Heading::Outbound => palette.blue,
            Heading::Inbound => palette.orange,
        }
    }
}

/// A polyline from a pin toward the canvas edge, plus the pulses currently travelling on it.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CircuitPath {
    /// Index into [`Layout::pins`](crate::layout::Layout::pins) of the starting pin.
    pub pin: usize,
    pub kind: PathKind,
    pub heading: Heading,
    /// 2-4 points; the first is the pin position.
    pub points: Vec<Point>,
    /// Total Euclidean length, fixed at creation.
    pub length: f64,
    #[serde(skip)]
    pub pulses: Vec<Pulse>,
}

impl CircuitPath {
    fn new(pin: usize, kind: PathKind, heading: Heading, points: Vec<Point>) -> Self {
        let length = polyline_length(&points);
        Self {
            pin,
            kind,
            heading,
            points,
            length,
            pulses: Vec::new(),
        }
    }

    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Interior bend points, where junction dots are drawn.
    pub fn junctions(&self) -> &[Point] {
        match self.points.len() {
            0..=2 => &[],
            n => &self.points[1..n - 1],
        }
    }
}

/// Shared inputs for building paths from pins.
pub(super) struct Router {
    pub center: Point,
    pub half: f64,
    pub area: SafeArea,
}

impl Router {
    /// Straight out from the pin; pins further from the centre reach further.
    pub fn straight(&self, index: usize, pin: &mut Pin, heading: Heading) -> CircuitPath {
        pin.used_by_path = true;
        let origin = pin.position;
        let dir = pin.side.outward();

        let manhattan = (origin.x - self.center.x).abs() + (origin.y - self.center.y).abs();
        let reach = self.half * 1.5 + manhattan * 0.5;
        let end = self.area.constrain(origin + dir * reach);

        CircuitPath::new(index, PathKind::Straight, heading, vec![origin, end])
    }

    /// Out from the pin, then one turn away from the centre line.
    pub fn elbow(&self, index: usize, pin: &mut Pin, heading: Heading) -> CircuitPath {
        pin.used_by_path = true;
        let origin = pin.position;
        let dir = pin.side.outward();
        let turn = pin.side.away_from_center(origin, self.center);

        let p2 = self.area.constrain(origin + dir * (self.half * 1.2));
        let p3 = self.area.constrain(p2 + turn * self.half);

        CircuitPath::new(index, PathKind::Elbow, heading, vec![origin, p2, p3])
    }

    /// Out, sideways, then out again.
    pub fn zigzag(&self, index: usize, pin: &mut Pin, heading: Heading) -> CircuitPath {
        pin.used_by_path = true;
        let origin = pin.position;
        let dir = pin.side.outward();
        let turn = pin.side.away_from_center(origin, self.center);

        let p2 = self.area.constrain(origin + dir * (self.half * 0.8));
        let p3 = self.area.constrain(p2 + turn * (self.half * 0.6));
        let p4 = self.area.constrain(p3 + dir * (self.half * 0.8));

        CircuitPath::new(index, PathKind::Zigzag, heading, vec![origin, p2, p3, p4])
    }
}
