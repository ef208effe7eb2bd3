use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{VizError, VizResult};
use crate::render::FrameRGBA;

/// Append-only frame stream in front of a [`FrameSink`].
///
/// Assigns strictly increasing frame indices, begins the sink on the first frame and refuses to
/// finalize an empty stream, so a video with no frames never produces an output file.
pub struct VideoAssembler<S: FrameSink> {
    sink: S,
    cfg: SinkConfig,
    next: u64,
    started: bool,
}

impl<S: FrameSink> VideoAssembler<S> {
    /// Assembler writing `cfg`-sized frames into `sink`.
    pub fn new(sink: S, cfg: SinkConfig) -> Self {
        Self {
            sink,
            cfg,
            next: 0,
            started: false,
        }
    }

    /// Frames appended so far.
    pub fn frames_written(&self) -> u64 {
        self.next
    }

    /// Sink configuration.
    pub fn config(&self) -> SinkConfig {
        self.cfg
    }

    /// Append one frame and return its index.
    pub fn push(&mut self, frame: &FrameRGBA) -> VizResult<FrameIndex> {
        if frame.width != self.cfg.width || frame.height != self.cfg.height {
            return Err(VizError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }
        if !self.started {
            self.sink.begin(self.cfg)?;
            self.started = true;
        }
        let idx = FrameIndex(self.next);
        self.sink.push_frame(idx, frame)?;
        self.next += 1;
        Ok(idx)
    }

    /// Append the same frame `count` times.
    pub fn push_repeated(&mut self, frame: &FrameRGBA, count: u64) -> VizResult<()> {
        for _ in 0..count {
            self.push(frame)?;
        }
        Ok(())
    }

    /// Close the stream and hand the sink back. Fails when no frame was appended.
    pub fn finish(mut self) -> VizResult<S> {
        if self.next == 0 {
            return Err(VizError::encode("cannot finalize a video with zero frames"));
        }
        self.sink.end()?;
        tracing::debug!(frames = self.next, "video finalized");
        Ok(self.sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/assembler.rs"]
mod tests;
