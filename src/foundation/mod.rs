/// Wall-clock abstraction for pause-scene countdowns.
pub(crate) mod clock;
/// Geometry re-exports and time windows.
pub(crate) mod core;
/// Error taxonomy and result alias.
pub(crate) mod error;
