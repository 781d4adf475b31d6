#![forbid(unsafe_code)]

pub mod config;
pub mod contact;
pub mod encode;
pub mod foundation;
pub mod layout;
pub mod pulse;
pub mod render;
pub mod runtime;
pub mod scene;
pub mod widgets;

pub use config::{AnimationConfig, Palette, PinsPerSide, PulseConfig};
pub use contact::{ContactConfig, ContactFields, ContactForm, FormState, ReqwestTransport};
pub use encode::{EncodeConfig, FfmpegSink, FrameSink, InMemorySink};
pub use foundation::core::{Canvas, Fps, FrameIndex, Rgba8};
pub use foundation::error::{ChipflowError, ChipflowResult};
pub use layout::{Layout, generate_layout};
pub use pulse::{PulseSimulator, RandomSource, RngSource};
pub use render::{CpuSurface, FrameRGBA, Surface};
pub use runtime::{FrameHost, MountedAnimation, OfflineHost, mount, render_sequence};
pub use scene::Scene;
