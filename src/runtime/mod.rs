//! Driving a scene from a host's frame callbacks.
//!
//! A host (a browser-like event loop, or [`OfflineHost`] for headless use) hands out frame
//! requests and resize notifications. [`mount`] wires a scene and a surface to it and returns a
//! [`MountedAnimation`] that releases both registrations when dropped.

mod host;
mod mounted;
mod offline;
mod pacing;

pub use host::{FrameHost, FrameRequestId, ResizeListenerId};
pub use mounted::{FrameOutcome, MountedAnimation, mount};
pub use offline::{OfflineHost, drive, render_sequence};
pub use pacing::FramePacer;
