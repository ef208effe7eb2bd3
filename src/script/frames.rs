use std::path::Path;

use crate::foundation::error::{VizError, VizResult};
use crate::model::frame::Frame;

/// Frame-by-frame script: an optional code listing and the frames to show in order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameScript {
    /// Source listing for the code panel.
    #[serde(default)]
    pub code: Option<String>,
    /// Frames in display order.
    pub frames: Vec<Frame>,
}

impl FrameScript {
    /// Parse and validate a JSON frame script.
    pub fn from_reader<R: std::io::Read>(r: R) -> VizResult<Self> {
        let script: Self = serde_json::from_reader(r)?;
        script.validate()?;
        Ok(script)
    }

    /// Read, parse and validate a JSON frame script file.
    pub fn from_path(path: impl AsRef<Path>) -> VizResult<Self> {
        use anyhow::Context as _;
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("open frame script '{}'", path.display()))?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// At least one frame, and no negative or non-finite timing.
    pub fn validate(&self) -> VizResult<()> {
        if self.frames.is_empty() {
            return Err(VizError::validation("frame script has no frames"));
        }
        for (k, f) in self.frames.iter().enumerate() {
            for (what, v) in [
                ("duration", f.duration),
                ("pre_duration", f.pre_duration),
                ("post_duration", f.post_duration),
            ] {
                if !v.is_finite() || v < 0.0 {
                    return Err(VizError::validation(format!(
                        "frame {k}: {what} must be a non-negative number of seconds, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/frames.rs"]
mod tests;
