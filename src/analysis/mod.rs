/// Persisted document shape.
pub(crate) mod model;
/// Playback-ready view of a document.
pub(crate) mod snapshot;
