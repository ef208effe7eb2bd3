//! Point/vector helpers for connectors: edge anchoring, quadratic Bézier sampling, arrowheads.
//!
//! Everything here stays in `f64`; rounding to pixels happens only in the rasterizer.

pub(crate) mod arrow;
pub(crate) mod bezier;
pub(crate) mod edge;
