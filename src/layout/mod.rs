//! Pin ring and circuit path generation around the processor block.
//!
//! Geometry is computed once per mount from the measured canvas and never reshaped afterwards;
//! only the per-path pulse lists change from frame to frame.

pub mod geometry;

mod generate;
mod path;
mod pin;

pub use generate::{Layout, generate_layout};
pub use geometry::SafeArea;
pub use path::{CircuitPath, Heading, PathKind};
pub use pin::{Pin, Side};
