use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Rgba8};
use crate::foundation::error::{VizError, VizResult};
use crate::foundation::math::flatten_premul_over_bg;
use crate::render::FrameRGBA;

/// Write `frame` as an opaque PNG, flattening premultiplied pixels over `background`.
pub fn write_png(path: &Path, frame: &FrameRGBA, background: Rgba8) -> VizResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(VizError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    let pixels = if frame.premultiplied {
        let mut out = vec![0u8; expected];
        flatten_premul_over_bg(&mut out, &frame.data, background.to_array());
        out
    } else {
        frame.data.clone()
    };

    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &pixels,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// File name of frame `idx` inside a PNG sequence directory.
pub fn sequence_file_name(idx: FrameIndex) -> String {
    format!("frame_{:04}.png", idx.0)
}

/// Sink writing `frame_0000.png`, `frame_0001.png`, … into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    background: Rgba8,
    written: u64,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            background: Rgba8::rgb(255, 255, 255),
            written: 0,
        }
    }

    /// Same sink with a different flatten background.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> VizResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create frames directory '{}'", self.dir.display()))?;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> VizResult<()> {
        write_png(&self.dir.join(sequence_file_name(idx)), frame, self.background)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> VizResult<()> {
        tracing::debug!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
