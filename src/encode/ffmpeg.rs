use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Rgba8};
use crate::foundation::error::{VizError, VizResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::FrameRGBA;

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Replace an existing file at `out_path`.
    pub overwrite: bool,
    /// Color the premultiplied frames are flattened over.
    pub background: Rgba8,
}

impl FfmpegSinkOpts {
    /// Options writing an MP4 to `out_path` over a white background.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: Rgba8::rgb(255, 255, 255),
        }
    }

    /// Same options with a different flatten background.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }
}

/// A running `ffmpeg` reading rawvideo on stdin. Stderr is collected on a side thread so a
/// chatty encoder never blocks on a full pipe.
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl Encoder {
    fn spawn(mut cmd: Command) -> VizResult<Self> {
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| VizError::encode(format!("cannot start ffmpeg: {e}")))?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut buf = Vec::new();
                pipe.read_to_end(&mut buf)?;
                Ok(buf)
            })
        });
        if stdin.is_none() {
            let _ = child.kill();
            let _ = child.wait();
            return Err(VizError::encode("ffmpeg stdin is not piped"));
        }
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> VizResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| VizError::encode("ffmpeg stdin already closed"))?;
        stdin
            .write_all(bytes)
            .map_err(|e| VizError::encode(format!("writing a frame to ffmpeg failed: {e}")))
    }

    fn collect_stderr(&mut self) -> String {
        let bytes = self
            .stderr
            .take()
            .and_then(|h| h.join().ok())
            .and_then(Result::ok)
            .unwrap_or_default();
        String::from_utf8_lossy(&bytes).trim().to_owned()
    }

    /// Close stdin and wait for the file to be written.
    fn finish(mut self) -> VizResult<()> {
        drop(self.stdin.take());
        let status = self
            .child
            .wait()
            .map_err(|e| VizError::encode(format!("waiting for ffmpeg failed: {e}")))?;
        let log = self.collect_stderr();
        if status.success() {
            if !log.is_empty() {
                tracing::debug!(%log, "ffmpeg stderr");
            }
            Ok(())
        } else {
            Err(VizError::encode(format!("ffmpeg exited with {status}: {log}")))
        }
    }

    /// Stop without finishing the file.
    fn kill(mut self) {
        drop(self.stdin.take());
        let _ = self.child.kill();
        let _ = self.child.wait();
        let _ = self.collect_stderr();
    }
}

/// Sink that spawns the system `ffmpeg` and streams flattened RGBA frames to it.
///
/// Dropping a sink that was started but never ended kills the encoder and removes the partial
/// output file.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
    cfg: Option<SinkConfig>,
    scratch: Vec<u8>,
    last_idx: Option<FrameIndex>,
}

impl FfmpegSink {
    /// Create a sink; `ffmpeg` is not spawned until `begin`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
            cfg: None,
            scratch: Vec::new(),
            last_idx: None,
        }
    }

    fn command(&self, cfg: &SinkConfig) -> Command {
        let mut cmd = Command::new("ffmpeg");
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" });
        cmd.args(["-loglevel", "error", "-f", "rawvideo", "-pix_fmt", "rgba"]);
        cmd.arg("-s").arg(format!("{}x{}", cfg.width, cfg.height));
        cmd.arg("-r").arg(fps_arg(cfg.fps));
        cmd.args(["-i", "pipe:0", "-an", "-c:v", "libx264", "-pix_fmt", "yuv420p"]);
        cmd.args(["-movflags", "+faststart"]);
        cmd.arg(&self.opts.out_path);
        cmd
    }
}

fn check_dimensions(cfg: &SinkConfig) -> VizResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(VizError::validation("fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(VizError::validation("video width and height must be non-zero"));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(VizError::validation(format!(
            "yuv420p video needs even dimensions, got {}x{}",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

/// `-r` placed before `-i` sets the rawvideo input rate.
fn fps_arg(fps: Fps) -> String {
    format!("{}/{}", fps.num, fps.den)
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> VizResult<()> {
        check_dimensions(&cfg)?;
        if self.encoder.is_some() {
            return Err(VizError::encode("ffmpeg sink already started"));
        }
        let out = &self.opts.out_path;
        ensure_parent_dir(out)?;
        if !self.opts.overwrite && out.exists() {
            return Err(VizError::validation(format!(
                "'{}' exists and overwrite is off",
                out.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(VizError::encode("MP4 output needs ffmpeg on PATH"));
        }

        self.encoder = Some(Encoder::spawn(self.command(&cfg))?);
        tracing::debug!(
            out = %out.display(),
            width = cfg.width,
            height = cfg.height,
            "ffmpeg started"
        );
        self.scratch = vec![0u8; cfg.width as usize * cfg.height as usize * 4];
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> VizResult<()> {
        let (Some(cfg), Some(encoder)) = (self.cfg.as_ref(), self.encoder.as_mut()) else {
            return Err(VizError::encode("ffmpeg sink is not running"));
        };
        if self.last_idx.is_some_and(|last| idx.0 <= last.0) {
            return Err(VizError::encode(format!(
                "frame {} arrived after frame {}",
                idx.0,
                self.last_idx.map_or(0, |l| l.0)
            )));
        }
        if (frame.width, frame.height) != (cfg.width, cfg.height) {
            return Err(VizError::validation(format!(
                "frame is {}x{}, video is {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if !flatten_premul_over_bg(&mut self.scratch, &frame.data, self.opts.background.to_array())
        {
            return Err(VizError::validation(
                "frame buffer length does not match its dimensions",
            ));
        }
        encoder.write(&self.scratch)?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> VizResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| VizError::encode("ffmpeg sink is not running"))?;
        self.cfg = None;
        encoder.finish()
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            tracing::warn!(
                out = %self.opts.out_path.display(),
                "ffmpeg sink dropped before end; discarding partial video"
            );
            encoder.kill();
            let _ = std::fs::remove_file(&self.opts.out_path);
        }
    }
}

/// Create the parent directory of `path` when it is missing.
pub fn ensure_parent_dir(path: &Path) -> VizResult<()> {
    use anyhow::Context as _;
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .with_context(|| format!("create output directory '{}'", dir.display()))
            .map_err(Into::into),
        _ => Ok(()),
    }
}

/// Whether `ffmpeg -version` runs successfully.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
