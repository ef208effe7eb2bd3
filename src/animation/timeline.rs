use std::ops::Range;

use crate::foundation::core::Fps;
use crate::model::frame::Frame;

/// Output frames during which one script frame's caption is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionWindow {
    /// Script frame that owns the caption.
    pub frame: usize,
    /// Output frames, clamped to the timeline.
    pub range: Range<u64>,
}

/// Run of output frames that all show the same structures and the same caption.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Script frame whose structures are drawn.
    pub frame: usize,
    /// Script frame whose caption is drawn, if any.
    pub caption: Option<usize>,
    /// Output frames covered.
    pub range: Range<u64>,
}

impl Segment {
    /// Number of output frames.
    pub fn len(&self) -> u64 {
        self.range.end - self.range.start
    }

    /// `true` when the segment covers no frame.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Frame script expanded onto a fixed-fps output timeline.
///
/// Script frame `k` is held for `floor(duration_k * fps)` output frames starting where frame
/// `k - 1` ended. Its caption is visible from `pre_duration` before that start until
/// `post_duration` after it; where windows overlap the later frame wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Timeline {
    spans: Vec<Range<u64>>,
    captions: Vec<CaptionWindow>,
    total: u64,
}

impl Timeline {
    /// Expand `frames` at `fps`.
    pub fn build(frames: &[Frame], fps: Fps) -> Self {
        let mut spans = Vec::with_capacity(frames.len());
        let mut cursor = 0u64;
        for f in frames {
            let len = fps.secs_to_frames_floor(f.duration);
            spans.push(cursor..cursor + len);
            cursor += len;
        }
        let total = cursor;

        let captions = frames
            .iter()
            .zip(&spans)
            .enumerate()
            .filter(|(_, (f, _))| f.text.as_deref().is_some_and(|t| !t.trim().is_empty()))
            .map(|(k, (f, span))| {
                let pre = fps.secs_to_frames_floor(f.pre_duration);
                let post = fps.secs_to_frames_floor(f.post_duration);
                let start = span.start.saturating_sub(pre).min(total);
                let end = span.start.saturating_add(post).min(total);
                CaptionWindow {
                    frame: k,
                    range: start..end,
                }
            })
            .filter(|w| !w.range.is_empty())
            .collect();

        Self {
            spans,
            captions,
            total,
        }
    }

    /// Total number of output frames.
    pub fn total_frames(&self) -> u64 {
        self.total
    }

    /// Output frames of script frame `k`.
    pub fn span(&self, k: usize) -> Option<Range<u64>> {
        self.spans.get(k).cloned()
    }

    /// Caption windows in script order.
    pub fn caption_windows(&self) -> &[CaptionWindow] {
        &self.captions
    }

    /// Script frame whose structures show at output frame `t`.
    pub fn frame_at(&self, t: u64) -> Option<usize> {
        self.spans.iter().position(|s| s.contains(&t))
    }

    /// Script frame whose caption shows at output frame `t`.
    pub fn caption_at(&self, t: u64) -> Option<usize> {
        self.captions
            .iter()
            .rev()
            .find(|w| w.range.contains(&t))
            .map(|w| w.frame)
    }

    /// Maximal runs of output frames with identical content, in output order.
    pub fn segments(&self) -> Vec<Segment> {
        let mut cuts: Vec<u64> = self
            .spans
            .iter()
            .map(|s| s.start)
            .chain(self.captions.iter().flat_map(|w| [w.range.start, w.range.end]))
            .chain([self.total])
            .filter(|&c| c <= self.total)
            .collect();
        cuts.sort_unstable();
        cuts.dedup();

        let mut out: Vec<Segment> = Vec::new();
        for pair in cuts.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let Some(frame) = self.frame_at(start) else {
                continue;
            };
            let caption = self.caption_at(start);
            match out.last_mut() {
                Some(prev)
                    if prev.frame == frame && prev.caption == caption && prev.range.end == start =>
                {
                    prev.range.end = end;
                }
                _ => out.push(Segment {
                    frame,
                    caption,
                    range: start..end,
                }),
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
