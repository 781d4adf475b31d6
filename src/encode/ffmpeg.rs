use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::{
    encode::FrameSink,
    foundation::{
        core::{Canvas, Fps, Rgba8},
        error::{ChipflowError, ChipflowResult},
    },
    render::FrameRGBA,
};

/// Where and how an MP4 is written. Dimensions and rate come from [`FrameSink::begin`].
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Colour transparent pixels are flattened onto; yuv420p has no alpha.
    pub background: Rgba8,
}

impl EncodeConfig {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::new(0, 0, 0, 255),
        }
    }

    /// Check a stream shape against what libx264/yuv420p accepts.
    pub fn validate_stream(canvas: Canvas, fps: Fps) -> ChipflowResult<()> {
        if canvas.is_degenerate() {
            return Err(ChipflowError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if fps.num == 0 || fps.den == 0 {
            return Err(ChipflowError::validation("encode fps must be non-zero"));
        }
        if !canvas.width.is_multiple_of(2) || !canvas.height.is_multiple_of(2) {
            return Err(ChipflowError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

pub fn ensure_parent_dir(path: &Path) -> ChipflowResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams frames to the system `ffmpeg` as raw RGBA on stdin.
pub struct FfmpegSink {
    cfg: EncodeConfig,
    stream: Option<Stream>,
    frames_written: u64,
}

struct Stream {
    canvas: Canvas,
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegSink {
    pub fn new(cfg: EncodeConfig) -> Self {
        Self {
            cfg,
            stream: None,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn spawn(&self, canvas: Canvas, fps: Fps) -> ChipflowResult<Child> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if self.cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", canvas.width, canvas.height),
            "-r",
            &format!("{}/{}", fps.num, fps.den),
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&self.cfg.out_path);

        cmd.spawn().map_err(|e| {
            ChipflowError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })
    }
}

impl FrameSink for FfmpegSink {
    #[tracing::instrument(skip(self), fields(out = %self.cfg.out_path.display()))]
    fn begin(&mut self, canvas: Canvas, fps: Fps) -> ChipflowResult<()> {
        if self.stream.is_some() {
            return Err(ChipflowError::encode("ffmpeg sink already started"));
        }
        EncodeConfig::validate_stream(canvas, fps)?;
        ensure_parent_dir(&self.cfg.out_path)?;

        if !self.cfg.overwrite && self.cfg.out_path.exists() {
            return Err(ChipflowError::validation(format!(
                "output file '{}' already exists",
                self.cfg.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(ChipflowError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let mut child = self.spawn(canvas, fps)?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ChipflowError::encode("failed to open ffmpeg stdin"))?;

        self.stream = Some(Stream {
            canvas,
            child,
            stdin: Some(stdin),
            scratch: vec![0u8; canvas.width as usize * canvas.height as usize * 4],
        });
        tracing::debug!("ffmpeg started");
        Ok(())
    }

    fn push_frame(&mut self, frame: &FrameRGBA) -> ChipflowResult<()> {
        let Some(stream) = self.stream.as_mut() else {
            return Err(ChipflowError::encode("push_frame before begin"));
        };
        if frame.width != stream.canvas.width || frame.height != stream.canvas.height {
            return Err(ChipflowError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, stream.canvas.width, stream.canvas.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut stream.scratch,
            &frame.data,
            frame.premultiplied,
            self.cfg.background,
        )?;

        let Some(stdin) = stream.stdin.as_mut() else {
            return Err(ChipflowError::encode("ffmpeg sink is already finalized"));
        };
        stdin.write_all(&stream.scratch).map_err(|e| {
            ChipflowError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> ChipflowResult<()> {
        let Some(mut stream) = self.stream.take() else {
            return Err(ChipflowError::encode("end before begin"));
        };
        drop(stream.stdin.take());

        let output = stream.child.wait_with_output().map_err(|e| {
            ChipflowError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChipflowError::encode(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!(frames = self.frames_written, "mp4 written");
        Ok(())
    }
}

/// Composite RGBA8 over an opaque background. Output alpha is always 255.
fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg: Rgba8,
) -> ChipflowResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(ChipflowError::validation(
            "frame data length does not match width*height*4",
        ));
    }

    let bg = [u16::from(bg.r), u16::from(bg.g), u16::from(bg.b)];
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
