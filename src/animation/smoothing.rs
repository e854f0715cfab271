use std::collections::HashMap;

use crate::foundation::core::{Point, Vec2};

/// Pose of one annotation in authored space.
///
/// Used both as the per-tick target (keyframes + fade) and as the converging smoothed state.
/// Display scaling is never applied to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothedState {
    /// Authored-space position.
    pub position: Point,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Annotation's own scale (not the display scale).
    pub scale: Vec2,
}

impl SmoothedState {
    /// Move every field a fraction of the way toward `target`.
    pub fn approach(&mut self, target: &Self, alpha: f64, opacity_alpha: f64) {
        fn step(v: f64, to: f64, a: f64) -> f64 {
            v + (to - v) * a
        }

        self.position = Point::new(
            step(self.position.x, target.position.x, alpha),
            step(self.position.y, target.position.y, alpha),
        );
        self.rotation = step(self.rotation, target.rotation, alpha);
        self.scale = Vec2::new(
            step(self.scale.x, target.scale.x, alpha),
            step(self.scale.y, target.scale.y, alpha),
        );
        self.opacity = step(self.opacity, target.opacity, opacity_alpha);
    }
}

/// First-order low-pass filter applied independently to every scalar of every annotation.
#[derive(Clone, Debug)]
pub struct SmoothingFilter {
    alpha: f64,
    opacity_alpha: f64,
    states: HashMap<String, SmoothedState>,
}

impl SmoothingFilter {
    /// Filter with the given convergence factors.
    pub fn new(alpha: f64, opacity_alpha: f64) -> Self {
        Self {
            alpha,
            opacity_alpha,
            states: HashMap::new(),
        }
    }

    /// Advance `id` toward `target` and return the new state.
    ///
    /// The first update for an id adopts the target directly.
    pub fn update(&mut self, id: &str, target: SmoothedState) -> SmoothedState {
        match self.states.get_mut(id) {
            Some(state) => {
                state.approach(&target, self.alpha, self.opacity_alpha);
                *state
            }
            None => {
                self.states.insert(id.to_owned(), target);
                target
            }
        }
    }

    /// Current state for `id`, if it has been seen.
    pub fn get(&self, id: &str) -> Option<&SmoothedState> {
        self.states.get(id)
    }

    /// Drop states whose id fails `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.states.retain(|id, _| keep(id));
    }

    /// Forget one annotation.
    pub fn remove(&mut self, id: &str) -> Option<SmoothedState> {
        self.states.remove(id)
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        self.states.clear();
    }

    /// Number of tracked annotations.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// `true` when no annotation is tracked.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/smoothing.rs"]
mod tests;
