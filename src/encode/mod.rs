//! Output sinks and the append-only video assembler.
//!
//! Sinks consume rendered frames in emission order. [`assembler::VideoAssembler`] owns the frame
//! counter and is the only writer to a sink.

/// Frame counter and lazy sink lifecycle.
pub mod assembler;
/// `ffmpeg`-based MP4 sink.
pub mod ffmpeg;
/// PNG image and PNG-sequence output.
pub mod png;
/// Sink trait and the in-memory sink.
pub mod sink;
