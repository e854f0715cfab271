/// Quintic ease `t³(t(6t − 15) + 10)` with zero first and second derivatives at both ends.
///
/// Input is clamped to `[0, 1]`, so callers may pass raw progress ratios.
pub fn smootherstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (6.0 * t - 15.0) + 10.0)
}

/// Weighted blend that reproduces `a` at `t = 0` and `b` at `t = 1` exactly.
#[inline]
pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
