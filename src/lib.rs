//! dsviz renders step-by-step animations of data structures (arrays, linked lists, dicts, sets
//! and binary trees) to raster frames and MP4 video.
//!
//! Two ways in:
//!
//! - A frame script: a list of fully described [`Frame`]s, each held for its duration, played
//!   with [`AnimationSequencer::play_frames`].
//! - A command script: named array and linked-list rows registered with
//!   [`AnimationSequencer::add_structure`] and moved
//!   one [`VisualizationCommand`] at a time.
//!
//! Frames are composed into a [`Scene`] display list, rasterized on the CPU and handed to a
//! [`FrameSink`] (ffmpeg, a PNG sequence, or memory).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Runtime configuration.
pub mod config;
/// Frame sinks and the append-only video assembler.
pub mod encode;
pub(crate) mod geometry;
pub(crate) mod layout;
pub(crate) mod model;
/// Scene composition and CPU rasterization.
pub mod render;
pub(crate) mod script;
pub(crate) mod session;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{VizError, VizResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::ops::Operation;
pub use crate::animation::state::DataStructureState;
pub use crate::animation::timeline::{CaptionWindow, Segment, Timeline};
pub use crate::config::{
    ArrowConfig, LayoutConfig, Metrics, Palette, PanelConfig, RenderConfig,
};
pub use crate::encode::assembler::VideoAssembler;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::{PngSequenceSink, write_png};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::geometry::arrow::{
    ArrowGeometry, ArrowHead, Connector, arrowhead, curved_arrow, pointer_arrow, self_arrow,
    straight_arrow,
};
pub use crate::geometry::edge::{anchored_segment, edge_anchor};
pub use crate::layout::linear::{RowMetrics, row_metrics};
pub use crate::layout::{LayoutParams, Mark, StructureLayout, layout_structure};
pub use crate::model::cell::{Cell, CellGraph};
pub use crate::model::frame::Frame;
pub use crate::model::named::NamedMap;
pub use crate::model::structure::{DataStructure, StructureKind};
pub use crate::model::value::ElementValue;
pub use crate::render::FrameRGBA;
pub use crate::render::compose::{Compositor, Overlay, TrackView};
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::fingerprint::{SceneFingerprint, fingerprint_scene};
pub use crate::render::panels::CodeListing;
pub use crate::render::scene::{DrawOp, Role, Scene, SceneItem, TextAlign};
pub use crate::script::command::{
    CommandAction, CommandScript, DEFAULT_COMMAND_SECS, StateSpec, StructureDecl,
    VisualizationCommand,
};
pub use crate::script::duration::{DurationValue, parse_duration};
pub use crate::script::frames::FrameScript;
pub use crate::session::sequencer::{AnimationSequencer, RenderStats};
