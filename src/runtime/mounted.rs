use crate::{
    config::AnimationConfig,
    foundation::error::{ChipflowError, ChipflowResult},
    pulse::{RandomSource, TickReport},
    render::Surface,
    runtime::{FrameHost, FramePacer, FrameRequestId, ResizeListenerId},
    scene::Scene,
};

/// What a host frame callback did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The pacer admitted the frame; the scene ticked and the surface was redrawn.
    Drawn(TickReport),
    /// Too soon after the last drawn frame.
    Skipped,
}

impl FrameOutcome {
    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn(_))
    }
}

/// A scene bound to a host and a surface.
///
/// Holds one pending frame request and one resize listener at a time. Both are released when
/// the value is dropped.
pub struct MountedAnimation<H: FrameHost, S: Surface, R: RandomSource> {
    host: H,
    surface: S,
    scene: Scene,
    rng: R,
    pacer: FramePacer,
    pending: Option<FrameRequestId>,
    listener: Option<ResizeListenerId>,
}

/// Measure the container, size the surface, lay out the scene and start the frame loop.
#[tracing::instrument(skip_all)]
pub fn mount<H, S, R>(
    mut host: H,
    mut surface: S,
    cfg: AnimationConfig,
    rng: R,
) -> ChipflowResult<MountedAnimation<H, S, R>>
where
    H: FrameHost,
    S: Surface,
    R: RandomSource,
{
    cfg.validate()?;
    let canvas = host
        .container_size()
        .ok_or_else(|| ChipflowError::validation("host has no container to mount into"))?;

    surface.resize(canvas)?;
    let pacer = FramePacer::new(cfg.fps);
    let scene = Scene::new(canvas, cfg);

    let listener = host.add_resize_listener();
    let pending = host.request_frame();
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        paths = scene.layout().paths.len(),
        "mounted"
    );

    Ok(MountedAnimation {
        host,
        surface,
        scene,
        rng,
        pacer,
        pending: Some(pending),
        listener: Some(listener),
    })
}

impl<H: FrameHost, S: Surface, R: RandomSource> MountedAnimation<H, S, R> {
    /// Host frame callback. The next frame is requested whether or not this one was drawn.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> ChipflowResult<FrameOutcome> {
        self.pending = None;

        let outcome = if self.pacer.admit(timestamp_ms) {
            let report = self.scene.tick(&mut self.rng);
            self.surface.draw(&self.scene).map(|()| FrameOutcome::Drawn(report))
        } else {
            Ok(FrameOutcome::Skipped)
        };

        self.pending = Some(self.host.request_frame());
        outcome
    }

    /// Host resize callback. Only the surface follows the container; the layout stays as mounted.
    pub fn on_resize(&mut self) -> ChipflowResult<()> {
        match self.host.container_size() {
            Some(canvas) => self.surface.resize(canvas),
            None => {
                tracing::warn!("container vanished; keeping current surface size");
                Ok(())
            }
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.pending
    }

    /// Stop the animation now. Same as dropping it.
    pub fn unmount(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        if let Some(id) = self.pending.take() {
            self.host.cancel_frame(id);
        }
        if let Some(id) = self.listener.take() {
            self.host.remove_resize_listener(id);
        }
    }
}

impl<H: FrameHost, S: Surface, R: RandomSource> Drop for MountedAnimation<H, S, R> {
    fn drop(&mut self) {
        self.teardown();
        tracing::debug!("unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/mounted.rs"]
mod tests;
