//! Persistence of edited analyses.

/// The save seam and its file and in-memory implementations.
pub(crate) mod analysis_store;
