use crate::{
    analysis::model::Annotation,
    animation::fade::{is_visibility_candidate, target_opacity},
    animation::keyframe::interpolate,
    animation::smoothing::SmoothedState,
    engine::config::EngineConfig,
    foundation::core::{Point, Vec2},
};

/// Unsmoothed authored-space pose of `ann` at media time `t`.
///
/// `None` when `t` is outside the annotation's window plus fade margin. Missing keyframes, or
/// keyframes that leave rotation/scale undefined, fall back to the static authored values.
pub(crate) fn target_state(ann: &Annotation, t: f64, cfg: &EngineConfig) -> Option<SmoothedState> {
    if !is_visibility_candidate(ann.window(), t, cfg.fade_margin) {
        return None;
    }

    let pose = interpolate(&ann.keyframes, t);
    let position = pose.map_or(Point::new(ann.x, ann.y), |p| p.position);
    let rotation = pose.and_then(|p| p.rotation).unwrap_or(ann.rotation);
    let scale_x = pose.and_then(|p| p.scale_x).unwrap_or(ann.scale_x);
    let scale_y = pose.and_then(|p| p.scale_y).unwrap_or(ann.scale_y);

    Some(SmoothedState {
        position,
        opacity: target_opacity(ann.opacity, ann.window(), t, cfg.fade_duration),
        rotation,
        scale: Vec2::new(scale_x, scale_y),
    })
}
