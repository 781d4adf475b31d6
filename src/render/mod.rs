//! Drawing the scene.
//!
//! The runtime only sees the [`Surface`] trait; [`CpuSurface`] is the built-in raster
//! implementation backed by `vello_cpu`.

pub mod cpu;
pub mod glow;
pub mod label;

use crate::{
    foundation::{core::Canvas, error::ChipflowResult},
    scene::Scene,
};

pub use cpu::CpuSurface;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: Vec::new(),
            premultiplied: true,
        }
    }

    /// Un-premultiply into straight alpha, for PNG output.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// The drawing surface a mounted animation owns.
pub trait Surface {
    /// Match backing dimensions to the measured container.
    fn resize(&mut self, canvas: Canvas) -> ChipflowResult<()>;

    /// Clear and redraw one frame from the scene's current state.
    fn draw(&mut self, scene: &Scene) -> ChipflowResult<()>;
}
