//! The session-oriented playback engine.

pub(crate) mod config;
pub(crate) mod playback_engine;
pub(crate) mod target;
