//! Telestrator is a playback engine for annotated sports video review.
//!
//! An analyst authors overlays (text, circles, spotlights, lines, arrows, polygons) against a
//! fixed canvas and a video timeline. During review the engine turns media time into smoothly
//! animated, display-scaled render descriptors, and halts playback at "pause scenes" for a
//! countdown before resuming.
//!
//! # Session overview
//!
//! 1. **Load**: `AnalysisDocument -> AnalysisSnapshot` (keyframes sorted, windows checked)
//! 2. **Create**: [`PlaybackEngine::create`] with a [`MediaController`] and a [`Clock`]
//! 3. **Drive**: forward media/layout events and call [`PlaybackEngine::animate`] once per frame
//! 4. **Paint**: hand the returned [`RenderDescriptor`]s to a [`DrawSurface`] via [`paint`]
//!
//! The key constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No IO in the engine**: persistence happens through the [`AnalysisStore`] seam and the
//!   media player through [`MediaController`].
//! - **Never fails per tick**: malformed annotations are simply not shown.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod analysis;
mod animation;
mod engine;
mod foundation;
mod playback;
mod render;
mod store;

/// Authored-space to display-space mapping.
pub mod transform;

pub use analysis::model::{AnalysisDocument, Annotation, AnnotationKind, AnnotationShape, Clip};
pub use analysis::snapshot::AnalysisSnapshot;
pub use animation::ease::smootherstep;
pub use animation::fade::{fade_factor, is_visibility_candidate, target_opacity};
pub use animation::keyframe::{Keyframe, KeyframePose, interpolate, sort_keyframes};
pub use animation::smoothing::{SmoothedState, SmoothingFilter};
pub use engine::config::EngineConfig;
pub use engine::playback_engine::PlaybackEngine;
pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::core::{Point, Size, TimeWindow, Vec2};
pub use foundation::error::{TelestratorError, TelestratorResult};
pub use playback::media::{MediaController, SimulatedPlayer};
pub use playback::pause_scene::{
    ActivePauseScene, PauseSceneSession, PauseState, PlaybackDirective,
};
pub use render::descriptor::{
    Geometry, PathGeometry, RenderDescriptor, RoundGeometry, TextGeometry, resolve_descriptor,
};
pub use render::surface::{DrawSurface, paint};
pub use store::analysis_store::{AnalysisStore, JsonFileStore, MemoryStore};
pub use transform::viewport::{DisplayScale, ScaleChange, Viewport, fit_display};
