//! Frame sinks: where rendered frames go once drawn.

mod ffmpeg;
mod sink;

pub use ffmpeg::{EncodeConfig, FfmpegSink, ensure_parent_dir, is_ffmpeg_on_path};
pub use sink::{FrameSink, InMemorySink};
