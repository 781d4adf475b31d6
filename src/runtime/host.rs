use crate::foundation::core::Canvas;

/// Handle for one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameRequestId(pub u64);

/// Handle for a registered resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResizeListenerId(pub u64);

/// The event loop a mounted animation lives in.
///
/// The host calls back into [`MountedAnimation::on_frame`](super::MountedAnimation::on_frame)
/// for each granted request and [`on_resize`](super::MountedAnimation::on_resize) after the
/// container changes size.
pub trait FrameHost {
    fn request_frame(&mut self) -> FrameRequestId;

    fn cancel_frame(&mut self, id: FrameRequestId);

    fn add_resize_listener(&mut self) -> ResizeListenerId;

    fn remove_resize_listener(&mut self, id: ResizeListenerId);

    /// Current size of the element the surface fills, or `None` when there is no container.
    fn container_size(&self) -> Option<Canvas>;
}

impl<H: FrameHost + ?Sized> FrameHost for &mut H {
    fn request_frame(&mut self) -> FrameRequestId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        (**self).cancel_frame(id)
    }

    fn add_resize_listener(&mut self) -> ResizeListenerId {
        (**self).add_resize_listener()
    }

    fn remove_resize_listener(&mut self, id: ResizeListenerId) {
        (**self).remove_resize_listener(id)
    }

    fn container_size(&self) -> Option<Canvas> {
        (**self).container_size()
    }
}
