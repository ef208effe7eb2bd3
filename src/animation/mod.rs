//! Motion over time: ease curves, state interpolation, array operations and frame-script
//! timing.

pub(crate) mod ease;
pub(crate) mod ops;
pub(crate) mod state;
pub(crate) mod timeline;
