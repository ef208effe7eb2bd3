use std::collections::{BTreeMap, BTreeSet};

use crate::animation::ease::Ease;
use crate::animation::ops::Operation;
use crate::animation::state::DataStructureState;
use crate::animation::timeline::Timeline;
use crate::config::RenderConfig;
use crate::encode::assembler::VideoAssembler;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, Point, Rgba8};
use crate::foundation::error::{VizError, VizResult};
use crate::layout::LayoutParams;
use crate::layout::linear::row_metrics;
use crate::model::frame::Frame;
use crate::model::structure::StructureKind;
use crate::model::value::ElementValue;
use crate::render::FrameRGBA;
use crate::render::compose::{Compositor, Overlay, TrackView};
use crate::render::cpu::CpuRasterizer;
use crate::render::fingerprint::{SceneFingerprint, fingerprint_scene};
use crate::render::panels::CodeListing;
use crate::render::scene::Scene;
use crate::script::command::{CommandAction, CommandScript, StateSpec, VisualizationCommand};

/// Vertical distance between the default rows of a command session.
const ROW_OFFSET: f64 = 200.0;
/// Hold after a swap so the settled order is readable.
const SETTLE_SECS: f64 = 0.5;

/// Frame counters of a finished session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames handed to the sink.
    pub frames_total: u64,
    /// Frames that were rasterized.
    pub frames_rasterized: u64,
    /// Frames that repeated the previous raster because the scene did not change.
    pub frames_reused: u64,
}

#[derive(Clone, Copy, Debug)]
enum Placement {
    /// Row centered horizontally, vertically centered on `y`.
    Centered { y: f64 },
    /// Explicit top-left corner of the first cell.
    TopLeft { x: f64, y: f64 },
}

#[derive(Clone, Debug)]
struct Track {
    name: String,
    kind: StructureKind,
    state: DataStructureState,
    params: LayoutParams,
    cell_size: f64,
    color: Rgba8,
    placement: Placement,
}

impl Track {
    /// Cell side and slot positions for a row of `n` elements.
    fn slots(&self, n: usize) -> (f64, BTreeMap<usize, (i32, i32)>) {
        let rm = row_metrics(n, self.kind, &self.params);
        let (start_x, top) = match self.placement {
            Placement::Centered { y } => (
                (self.params.canvas_width - rm.total_width) / 2.0,
                y - rm.size / 2.0,
            ),
            Placement::TopLeft { x, y } => (x, y),
        };
        let positions = (0..n)
            .map(|i| (i, (rm.cell_x(start_x, i).round() as i32, top.round() as i32)))
            .collect();
        (rm.size, positions)
    }

    fn anchor(&self) -> Point {
        match self.placement {
            Placement::Centered { y } => Point::new(self.params.canvas_width / 2.0, y),
            Placement::TopLeft { x, y } => Point::new(x, y + self.cell_size / 2.0),
        }
    }

    fn settled(&self, elements: Vec<ElementValue>) -> (f64, DataStructureState) {
        let (size, positions) = self.slots(elements.len());
        let state = DataStructureState {
            elements,
            positions,
            highlighted: BTreeSet::new(),
            arrows: Vec::new(),
        };
        (size, state)
    }
}

/// Drives frames into a [`VideoAssembler`]: whole frame scripts, or named rows animated step by
/// step.
///
/// The sequencer owns every piece of cross-frame state (row states, code listing, caption and
/// the last raster). Consecutive identical scenes are rasterized once.
pub struct AnimationSequencer<S: FrameSink> {
    compositor: Compositor,
    raster: CpuRasterizer,
    assembler: VideoAssembler<S>,
    fps: Fps,
    ease: Ease,
    code: Option<CodeListing>,
    line: Option<usize>,
    caption: Option<String>,
    tracks: Vec<Track>,
    last: Option<(SceneFingerprint, FrameRGBA)>,
    stats: RenderStats,
}

impl<S: FrameSink> AnimationSequencer<S> {
    /// Sequencer rendering `cfg` into `sink`, using the font `cfg` resolves to.
    pub fn new(cfg: &RenderConfig, sink: S) -> VizResult<Self> {
        cfg.validate()?;
        let raster = CpuRasterizer::new(cfg)?;
        Ok(Self::build(cfg, sink, raster))
    }

    /// Sequencer with a caller-supplied rasterizer.
    pub fn with_rasterizer(cfg: &RenderConfig, sink: S, raster: CpuRasterizer) -> VizResult<Self> {
        cfg.validate()?;
        Ok(Self::build(cfg, sink, raster))
    }

    fn build(cfg: &RenderConfig, sink: S, raster: CpuRasterizer) -> Self {
        let sink_cfg = SinkConfig {
            width: cfg.canvas.width,
            height: cfg.canvas.height,
            fps: cfg.fps,
        };
        Self {
            compositor: Compositor::new(cfg),
            raster,
            assembler: VideoAssembler::new(sink, sink_cfg),
            fps: cfg.fps,
            ease: cfg.transition_ease,
            code: None,
            line: None,
            caption: None,
            tracks: Vec::new(),
            last: None,
            stats: RenderStats::default(),
        }
    }

    /// Show `source` in the code panel; `None` hides it.
    pub fn set_code(&mut self, source: Option<&str>) {
        self.code = source.map(CodeListing::from_source);
        self.line = None;
    }

    /// Highlight a 1-based code line; out-of-range lines draw no band.
    pub fn set_line(&mut self, line: Option<usize>) {
        self.line = line;
    }

    /// Caption shown under the rows of a command session.
    pub fn set_caption(&mut self, text: Option<&str>) {
        self.caption = text.map(str::to_owned);
    }

    /// Inline comment after a code line. Returns `false` when there is no such line.
    pub fn set_comment(&mut self, line: usize, comment: impl Into<String>) -> bool {
        self.code
            .as_mut()
            .is_some_and(|code| code.set_comment(line, comment))
    }

    /// Output frames emitted so far.
    pub fn frames_emitted(&self) -> u64 {
        self.assembler.frames_written()
    }

    /// Register an animated row. Only arrays and linked lists animate step by step; dicts, sets
    /// and trees are rejected with a validation error and belong in a frame script.
    ///
    /// Without `position` the first row is centered at the structures offset and each further
    /// row sits 200 px lower. Rows other than `main` use the secondary color; every row after the
    /// first uses half the cell size.
    pub fn add_structure<I, V>(
        &mut self,
        name: &str,
        kind: StructureKind,
        elements: I,
        position: Option<(i32, i32)>,
    ) -> VizResult<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<ElementValue>,
    {
        if self.track_index(name).is_ok() {
            return Err(VizError::validation(format!(
                "structure '{name}' is already registered"
            )));
        }
        if !kind.is_sequence() {
            return Err(VizError::validation(format!(
                "structure '{name}': {kind} cannot be animated step by step; use a frame script"
            )));
        }
        let metrics = self.compositor.metrics();
        let placement = match position {
            Some((x, y)) => Placement::TopLeft {
                x: f64::from(x),
                y: f64::from(y),
            },
            None => Placement::Centered {
                y: metrics.structures_y + ROW_OFFSET * self.tracks.len() as f64,
            },
        };
        let mut params = *self.compositor.layout_params();
        if !self.tracks.is_empty() {
            params = params.with_element_size(params.element_size / 2.0);
        }
        let colors = self.compositor.palette();
        let color = if name == "main" {
            colors.element
        } else {
            colors.secondary_element
        };

        let mut track = Track {
            name: name.to_owned(),
            kind,
            state: DataStructureState::default(),
            params,
            cell_size: params.element_size,
            color,
            placement,
        };
        let (size, state) = track.settled(elements.into_iter().map(Into::into).collect());
        track.cell_size = size;
        track.state = state;
        tracing::debug!(name, %kind, len = track.state.elements.len(), "structure registered");
        self.tracks.push(track);
        Ok(())
    }

    /// Current state of a registered row.
    pub fn state(&self, name: &str) -> Option<&DataStructureState> {
        self.tracks.iter().find(|t| t.name == name).map(|t| &t.state)
    }

    /// Laid-out state `spec` describes for row `name`.
    pub fn target_state(&self, name: &str, spec: &StateSpec) -> VizResult<DataStructureState> {
        let track = &self.tracks[self.track_index(name)?];
        let (_, mut state) = track.settled(spec.elements.clone());
        state.highlighted = spec.highlighted.clone();
        state.arrows = spec.arrows.clone();
        Ok(state)
    }

    /// Move row `name` to `spec` over `secs`. Returns the number of frames emitted.
    ///
    /// Frame `k` of `n` shows progress `ease((k + 1) / n)`, so the last frame is the target.
    /// A duration shorter than one frame switches to the target without emitting.
    #[tracing::instrument(skip(self, spec), fields(elements = spec.elements.len()))]
    pub fn animate_to_state(&mut self, name: &str, spec: &StateSpec, secs: f64) -> VizResult<u64> {
        let idx = self.track_index(name)?;
        let target = self.target_state(name, spec)?;
        let start = self.tracks[idx].state.clone();
        self.transition(idx, &start, target, secs)
    }

    /// Repeat the current rows for `secs`. Returns the number of frames emitted.
    pub fn hold(&mut self, secs: f64) -> VizResult<u64> {
        let count = self.fps.secs_to_frames_floor(secs);
        let scene = self.compose_tracks();
        self.present(&scene, count)?;
        Ok(count)
    }

    /// Animate one array operation on row `name`. Returns the number of frames emitted.
    ///
    /// Swaps hold the two cells highlighted and connected, move them into each other's slots and
    /// then settle. Highlight and compare are holds that leave the row unchanged. Inserts and
    /// deletes slide the surviving elements to their new slots.
    #[tracing::instrument(skip(self, op), fields(op = %op))]
    pub fn apply_operation(&mut self, name: &str, op: &Operation, secs: f64) -> VizResult<u64> {
        let idx = self.track_index(name)?;
        let current = self.tracks[idx].state.clone();
        let elements = op.apply(&current.elements)?;

        let emitted = match op {
            Operation::Swap { i, j } => {
                let (i, j) = (*i, *j);
                let mut held = current.clone();
                held.highlighted = BTreeSet::from([i, j]);
                held.arrows = vec![(i, j), (j, i)];
                let mut n = self.emphasize(idx, held, secs)?;

                let (_, mut target) = self.tracks[idx].settled(elements);
                target.highlighted = BTreeSet::from([i, j]);
                let start = reindexed(&current, target.elements.len(), |t| {
                    Some(if t == i {
                        j
                    } else if t == j {
                        i
                    } else {
                        t
                    })
                });
                n += self.transition(idx, &start, target, secs)?;

                let settle = self.fps.secs_to_frames_floor(SETTLE_SECS).max(1);
                let track = &mut self.tracks[idx];
                track.state.highlighted.clear();
                let scene = self.compose_tracks();
                self.present(&scene, settle)?;
                n + settle
            }
            Operation::Highlight { indices } => {
                let mut held = current;
                held.highlighted = indices.iter().copied().collect();
                held.arrows.clear();
                self.emphasize(idx, held, secs)?
            }
            Operation::Compare { i, j } => {
                let mut held = current;
                held.highlighted = BTreeSet::from([*i, *j]);
                held.arrows = vec![(*i, *j), (*j, *i)];
                self.emphasize(idx, held, secs)?
            }
            Operation::Insert { index, .. } => {
                let index = *index;
                let (_, target) = self.tracks[idx].settled(elements);
                let start = reindexed(&current, target.elements.len(), |t| match t {
                    t if t < index => Some(t),
                    t if t == index => None,
                    t => Some(t - 1),
                });
                self.transition(idx, &start, target, secs)?
            }
            Operation::Delete { index } => {
                let index = *index;
                let (_, target) = self.tracks[idx].settled(elements);
                let start = reindexed(&current, target.elements.len(), |t| {
                    Some(if t < index { t } else { t + 1 })
                });
                self.transition(idx, &start, target, secs)?
            }
        };
        tracing::debug!(frames = emitted, "operation animated");
        Ok(emitted)
    }

    /// Run one script command: update caption and code line, then animate its target.
    pub fn process_command(&mut self, cmd: &VisualizationCommand) -> VizResult<u64> {
        let secs = cmd.duration_secs()?;
        let action = cmd.resolve()?;
        self.track_index(&cmd.target)?;
        if let Some(text) = &cmd.text {
            self.caption = Some(text.clone());
        }
        if cmd.line.is_some() {
            self.line = cmd.line;
        }
        match action {
            CommandAction::State(spec) => self.animate_to_state(&cmd.target, &spec, secs),
            CommandAction::Operation(op) => self.apply_operation(&cmd.target, &op, secs),
        }
    }

    /// Register a command script's structures and run its commands in order.
    pub fn play_commands(&mut self, script: &CommandScript) -> VizResult<u64> {
        script.validate()?;
        if script.code.is_some() {
            self.set_code(script.code.as_deref());
        }
        for decl in &script.structures {
            self.add_structure(
                &decl.name,
                decl.kind,
                decl.elements.iter().cloned(),
                decl.position,
            )?;
        }
        let mut emitted = 0;
        for cmd in &script.commands {
            emitted += self.process_command(cmd)?;
        }
        Ok(emitted)
    }

    /// Hold one frame for its full duration with its caption shown throughout.
    pub fn show_frame(&mut self, frame: &Frame) -> VizResult<u64> {
        let count = self.fps.secs_to_frames_floor(frame.duration);
        let scene = self.compose_frame(frame, frame.line, frame.text.as_deref())?;
        self.present(&scene, count)?;
        Ok(count)
    }

    /// Play a frame script: each frame held for its duration, captions on their own windows.
    #[tracing::instrument(skip(self, frames), fields(frames = frames.len()))]
    pub fn play_frames(&mut self, frames: &[Frame]) -> VizResult<u64> {
        let timeline = Timeline::build(frames, self.fps);
        for seg in timeline.segments() {
            let frame = &frames[seg.frame];
            let caption = seg.caption.and_then(|c| frames[c].text.as_deref());
            let scene = self.compose_frame(frame, frame.line, caption)?;
            self.present(&scene, seg.len())?;
        }
        tracing::debug!(frames = timeline.total_frames(), "frame script played");
        Ok(timeline.total_frames())
    }

    /// Finalize the output. Fails when nothing was emitted.
    #[tracing::instrument(skip(self))]
    pub fn finish(self) -> VizResult<(RenderStats, S)> {
        let sink = self.assembler.finish()?;
        tracing::debug!(
            total = self.stats.frames_total,
            rasterized = self.stats.frames_rasterized,
            reused = self.stats.frames_reused,
            "session finished"
        );
        Ok((self.stats, sink))
    }

    fn track_index(&self, name: &str) -> VizResult<usize> {
        self.tracks
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| VizError::validation(format!("unknown structure '{name}'")))
    }

    /// Hold `held` for `secs`, then restore the row.
    fn emphasize(&mut self, idx: usize, held: DataStructureState, secs: f64) -> VizResult<u64> {
        let saved = std::mem::replace(&mut self.tracks[idx].state, held);
        let emitted = self.hold(secs);
        self.tracks[idx].state = saved;
        emitted
    }

    fn transition(
        &mut self,
        idx: usize,
        start: &DataStructureState,
        target: DataStructureState,
        secs: f64,
    ) -> VizResult<u64> {
        let n = self.fps.secs_to_frames_floor(secs);
        let (size, _) = self.tracks[idx].slots(target.elements.len());
        self.tracks[idx].cell_size = size;
        for k in 0..n {
            let progress = self.ease.apply((k + 1) as f64 / n as f64);
            self.tracks[idx].state = start.interpolate(&target, progress);
            let scene = self.compose_tracks();
            self.present(&scene, 1)?;
        }
        tracing::debug!(frames = n, "transition finished");
        self.tracks[idx].state = target;
        Ok(n)
    }

    fn compose_tracks(&self) -> Scene {
        let views: Vec<TrackView<'_>> = self
            .tracks
            .iter()
            .map(|t| TrackView {
                kind: t.kind,
                state: &t.state,
                cell_size: t.cell_size,
                color: t.color,
                anchor: t.anchor(),
            })
            .collect();
        let overlay = Overlay {
            code: self.code.as_ref(),
            line: self.line,
            caption: self.caption.as_deref(),
        };
        self.compositor.compose_tracks(&views, &overlay)
    }

    fn compose_frame(
        &self,
        frame: &Frame,
        line: Option<usize>,
        caption: Option<&str>,
    ) -> VizResult<Scene> {
        let overlay = Overlay {
            code: self.code.as_ref(),
            line,
            caption,
        };
        self.compositor.compose_frame(frame, &overlay)
    }

    /// Append `count` copies of `scene`, rasterizing only when it differs from the last one.
    fn present(&mut self, scene: &Scene, count: u64) -> VizResult<()> {
        if count == 0 {
            return Ok(());
        }
        let fp = fingerprint_scene(scene);
        let (frame, rasterized) = match self.last.take() {
            Some((prev, frame)) if prev == fp => (frame, 0),
            _ => (self.raster.render(scene)?, 1),
        };
        self.assembler.push_repeated(&frame, count)?;
        self.last = Some((fp, frame));
        self.stats.frames_total += count;
        self.stats.frames_rasterized += rasterized;
        self.stats.frames_reused += count - rasterized;
        Ok(())
    }
}

/// Start state for a transition whose target has `len` elements: target index `t` starts where
/// old index `source(t)` was; `None` marks an element that has no previous slot.
fn reindexed(
    current: &DataStructureState,
    len: usize,
    source: impl Fn(usize) -> Option<usize>,
) -> DataStructureState {
    let positions = (0..len)
        .filter_map(|t| {
            let pos = current.positions.get(&source(t)?)?;
            Some((t, *pos))
        })
        .collect();
    DataStructureState {
        positions,
        ..current.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/sequencer.rs"]
mod tests;
