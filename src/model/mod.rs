//! Value objects describing what a frame shows: element values, typed structures, frames and
//! the per-render cell projection.

pub(crate) mod cell;
pub(crate) mod frame;
pub(crate) mod named;
pub(crate) mod structure;
pub(crate) mod value;
