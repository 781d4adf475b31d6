use crate::{
    foundation::{
        core::{Canvas, Fps},
        error::{ChipflowError, ChipflowResult},
    },
    render::FrameRGBA,
};

/// Consumer of a rendered frame sequence.
///
/// Call order is `begin`, any number of `push_frame`, then `end`.
pub trait FrameSink {
    fn begin(&mut self, canvas: Canvas, fps: Fps) -> ChipflowResult<()>;

    fn push_frame(&mut self, frame: &FrameRGBA) -> ChipflowResult<()>;

    fn end(&mut self) -> ChipflowResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    canvas: Option<Canvas>,
    fps: Option<Fps>,
    frames: Vec<FrameRGBA>,
    ended: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[FrameRGBA] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<FrameRGBA> {
        self.frames
    }

    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    pub fn fps(&self) -> Option<Fps> {
        self.fps
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, canvas: Canvas, fps: Fps) -> ChipflowResult<()> {
        if self.canvas.is_some() {
            return Err(ChipflowError::encode("sink already started"));
        }
        self.canvas = Some(canvas);
        self.fps = Some(fps);
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> ChipflowResult<()> {
        let Some(canvas) = self.canvas else {
            return Err(ChipflowError::encode("push_frame before begin"));
        };
        if self.ended {
            return Err(ChipflowError::encode("push_frame after end"));
        }
        if frame.width != canvas.width || frame.height != canvas.height {
            return Err(ChipflowError::encode(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, canvas.width, canvas.height
            )));
        }
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> ChipflowResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
