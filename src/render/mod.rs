//! Frame compositing and rasterization.
//!
//! [`compose::Compositor`] turns a frame (or the animated rows of a command session) into a
//! [`scene::Scene`]; [`cpu::CpuRasterizer`] turns a scene into pixels.

/// Frame and track compositing.
pub mod compose;
/// CPU rasterizer.
pub mod cpu;
/// Scene fingerprints for raster reuse.
pub mod fingerprint;
/// Code, caption and variables overlays.
pub mod panels;
/// Display list types.
pub mod scene;
pub(crate) mod text;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}
