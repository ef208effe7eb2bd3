//! Stateful driver turning frame scripts and command scripts into output frames.

pub(crate) mod sequencer;
