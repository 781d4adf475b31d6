use crate::{
    encode::FrameSink,
    foundation::{
        core::{Canvas, FrameIndex},
        error::{ChipflowError, ChipflowResult},
    },
    pulse::RandomSource,
    render::{CpuSurface, FrameRGBA},
    runtime::{FrameHost, FrameRequestId, MountedAnimation, ResizeListenerId},
};

/// Headless host with a fixed container that records every registration.
///
/// Serves a single animation: a new frame request supersedes the previous one, which counts as
/// fired.
#[derive(Clone, Debug, Default)]
pub struct OfflineHost {
    container: Option<Canvas>,
    next_id: u64,
    outstanding: Option<FrameRequestId>,
    requests_made: u64,
    cancelled: Vec<FrameRequestId>,
    listeners: Vec<ResizeListenerId>,
    removed_listeners: Vec<ResizeListenerId>,
}

impl OfflineHost {
    pub fn new(container: Canvas) -> Self {
        Self {
            container: Some(container),
            ..Self::default()
        }
    }

    /// A host with nothing to mount into.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set_container(&mut self, container: Option<Canvas>) {
        self.container = container;
    }

    pub fn outstanding_request(&self) -> Option<FrameRequestId> {
        self.outstanding
    }

    pub fn requests_made(&self) -> u64 {
        self.requests_made
    }

    pub fn cancelled(&self) -> &[FrameRequestId] {
        &self.cancelled
    }

    /// Listeners currently registered.
    pub fn listeners(&self) -> &[ResizeListenerId] {
        &self.listeners
    }

    pub fn removed_listeners(&self) -> &[ResizeListenerId] {
        &self.removed_listeners
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl FrameHost for OfflineHost {
    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next_id());
        self.outstanding = Some(id);
        self.requests_made += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        if self.outstanding == Some(id) {
            self.outstanding = None;
        }
        self.cancelled.push(id);
    }

    fn add_resize_listener(&mut self) -> ResizeListenerId {
        let id = ResizeListenerId(self.next_id());
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ResizeListenerId) {
        self.listeners.retain(|&l| l != id);
        self.removed_listeners.push(id);
    }

    fn container_size(&self) -> Option<Canvas> {
        self.container
    }
}

/// Fire frames at whole-millisecond steps of at least one pacing interval until `frames` have
/// been drawn, handing each drawn frame to `on_drawn`.
pub fn drive<H, R, F>(
    anim: &mut MountedAnimation<H, CpuSurface, R>,
    frames: u64,
    mut on_drawn: F,
) -> ChipflowResult<()>
where
    H: FrameHost,
    R: RandomSource,
    F: FnMut(FrameIndex, &FrameRGBA) -> ChipflowResult<()>,
{
    let step = anim.pacer().interval_ms().ceil();
    let mut ts = anim.pacer().last_drawn_ms();
    let mut drawn = 0;
    while drawn < frames {
        ts += step;
        if !anim.on_frame(ts)?.is_drawn() {
            continue;
        }
        let frame = anim
            .surface()
            .frame()
            .ok_or_else(|| ChipflowError::render("surface reported a draw but holds no frame"))?;
        on_drawn(FrameIndex(drawn), frame)?;
        drawn += 1;
    }
    Ok(())
}

/// Render `frames` drawn frames of a mounted animation into `sink`.
#[tracing::instrument(skip(anim, sink))]
pub fn render_sequence<H, R>(
    anim: &mut MountedAnimation<H, CpuSurface, R>,
    frames: u64,
    sink: &mut dyn FrameSink,
) -> ChipflowResult<()>
where
    H: FrameHost,
    R: RandomSource,
{
    let canvas = anim.surface().canvas();
    let fps = anim.scene().config().fps;
    sink.begin(canvas, fps)?;
    drive(anim, frames, |_, frame| sink.push_frame(frame))?;
    sink.end()
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/offline.rs"]
mod tests;
