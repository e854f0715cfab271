//! Authored-space to display-space mapping.

use crate::foundation::core::{Point, Size, is_usable_size};

/// Largest size with the video's aspect ratio that fits inside `container`.
///
/// Wider-than-video containers fit to height, everything else fits to width. Returns `None`
/// when either size is degenerate.
pub fn fit_display(container: Size, video: Size) -> Option<Size> {
    if !is_usable_size(container) || !is_usable_size(video) {
        return None;
    }
    let container_aspect = container.width / container.height;
    let video_aspect = video.width / video.height;
    if container_aspect > video_aspect {
        Some(Size::new(container.height * video_aspect, container.height))
    } else {
        Some(Size::new(container.width, container.width / video_aspect))
    }
}

/// Per-axis factors from authored canvas pixels to display pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DisplayScale {
    /// Horizontal factor.
    pub x: f64,
    /// Vertical factor.
    pub y: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DisplayScale {
    /// No rescaling.
    pub const IDENTITY: Self = Self { x: 1.0, y: 1.0 };

    /// Factors mapping `canvas` onto `display`; `None` when either is degenerate.
    pub fn from_display(display: Size, canvas: Size) -> Option<Self> {
        if !is_usable_size(display) || !is_usable_size(canvas) {
            return None;
        }
        Some(Self {
            x: display.width / canvas.width,
            y: display.height / canvas.height,
        })
    }

    /// Factor for isotropic magnitudes (radius, stroke width, font size, blur).
    pub fn uniform(self) -> f64 {
        self.x.min(self.y)
    }

    /// Scale a position axis by axis.
    pub fn point(self, p: Point) -> Point {
        Point::new(p.x * self.x, p.y * self.y)
    }

    /// Scale a flat `[x0, y0, x1, y1, ...]` list: even indices by `x`, odd by `y`.
    pub fn points(self, flat: &[f64]) -> Vec<f64> {
        flat.iter()
            .enumerate()
            .map(|(i, v)| if i % 2 == 0 { v * self.x } else { v * self.y })
            .collect()
    }

    /// `true` when either axis moved by more than `threshold`.
    pub fn differs_from(self, other: Self, threshold: f64) -> bool {
        (self.x - other.x).abs() > threshold || (self.y - other.y).abs() > threshold
    }
}

/// Geometry inputs that determine the current [`DisplayScale`].
///
/// Each input arrives independently (container resize, media metadata, canvas size from the
/// loaded document); the scale is recomputed from whatever is known and held at its previous
/// value until all three are usable.
#[derive(Clone, Copy, Debug, Default)]
pub struct Viewport {
    container: Option<Size>,
    video: Option<Size>,
    canvas: Option<Size>,
    scale: DisplayScale,
}

/// Scale before and after a geometry update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleChange {
    /// Scale in effect before the update.
    pub previous: DisplayScale,
    /// Scale in effect after the update.
    pub current: DisplayScale,
}

impl Viewport {
    /// Viewport with a known authored canvas.
    pub fn with_canvas(canvas: Size) -> Self {
        Self {
            canvas: Some(canvas),
            ..Self::default()
        }
    }

    /// Current scale factors.
    pub fn scale(&self) -> DisplayScale {
        self.scale
    }

    /// Fitted display size, once container and video are known.
    pub fn display(&self) -> Option<Size> {
        fit_display(self.container?, self.video?)
    }

    /// Container was resized.
    pub fn set_container(&mut self, size: Size) -> ScaleChange {
        self.container = Some(size);
        self.recompute()
    }

    /// Media metadata (natural video size) loaded.
    pub fn set_video(&mut self, size: Size) -> ScaleChange {
        self.video = Some(size);
        self.recompute()
    }

    /// Authored canvas became known or changed.
    pub fn set_canvas(&mut self, size: Size) -> ScaleChange {
        self.canvas = Some(size);
        self.recompute()
    }

    fn recompute(&mut self) -> ScaleChange {
        let previous = self.scale;
        if let Some(scale) = self
            .display()
            .zip(self.canvas)
            .and_then(|(display, canvas)| DisplayScale::from_display(display, canvas))
        {
            self.scale = scale;
        }
        ScaleChange {
            previous,
            current: self.scale,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/viewport.rs"]
mod tests;
