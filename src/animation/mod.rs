//! Time-driven pose computation: easing, keyframes, fades and smoothing.

pub(crate) mod ease;
pub(crate) mod fade;
pub(crate) mod keyframe;
pub(crate) mod smoothing;
