use crate::{animation::ease::smootherstep, foundation::core::TimeWindow};

/// `true` while `t` lies within the authored window grown by `margin` on both sides.
///
/// Inverted windows (`start > end`) are never candidates.
pub fn is_visibility_candidate(window: TimeWindow, t: f64, margin: f64) -> bool {
    window.expand(margin).contains(t)
}

/// Fade multiplier in `[0, 1]` for time `t`.
///
/// Zero before the start and after the end, eased in over the first `duration` seconds, eased
/// out over the last `duration` seconds, and 1 in between. When the window is shorter than
/// `duration` the fade-in branch takes precedence.
pub fn fade_factor(window: TimeWindow, t: f64, duration: f64) -> f64 {
    if window.is_empty() || !t.is_finite() || t < window.start || t > window.end {
        return 0.0;
    }
    if duration <= 0.0 {
        return 1.0;
    }
    if t < window.start + duration {
        return smootherstep((t - window.start) / duration);
    }
    if t > window.end - duration {
        return smootherstep(((window.end - t) / duration).max(0.0));
    }
    1.0
}

/// Target opacity: authored base opacity times [`fade_factor`], clamped to `[0, 1]`.
pub fn target_opacity(base: f64, window: TimeWindow, t: f64, duration: f64) -> f64 {
    (base * fade_factor(window, t, duration)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/fade.rs"]
mod tests;
