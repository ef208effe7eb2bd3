//! Script boundary: JSON frame scripts, command scripts and timing strings.

pub(crate) mod command;
pub(crate) mod duration;
pub(crate) mod frames;
