pub use kurbo::{Point, Size, Vec2};

/// A closed time window in seconds, `[start, end]`.
///
/// Authored windows are not validated upstream: `start > end` is representable and treated as an
/// empty window by every query.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TimeWindow {
    /// Window start in seconds.
    pub start: f64,
    /// Window end in seconds (inclusive).
    pub end: f64,
}

impl TimeWindow {
    /// Build a window without validating ordering.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// `true` when the window can never contain a time (`start > end` or non-finite bounds).
    pub fn is_empty(self) -> bool {
        !(self.start.is_finite() && self.end.is_finite()) || self.start > self.end
    }

    /// Window length in seconds; zero for empty windows.
    pub fn duration(self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.end - self.start
        }
    }

    /// Inclusive containment. Always `false` for empty windows.
    pub fn contains(self, t: f64) -> bool {
        !self.is_empty() && self.start <= t && t <= self.end
    }

    /// Grow both edges by `margin` seconds. Empty windows stay empty.
    pub fn expand(self, margin: f64) -> Self {
        if self.is_empty() {
            return self;
        }
        Self {
            start: self.start - margin,
            end: self.end + margin,
        }
    }
}

/// Size with both extents finite and strictly positive.
pub(crate) fn is_usable_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
