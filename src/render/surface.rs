use crate::{
    foundation::error::TelestratorResult,
    render::descriptor::{Geometry, PathGeometry, RenderDescriptor, RoundGeometry, TextGeometry},
};

/// A drawing layer that knows how to put each primitive on screen.
///
/// The engine never draws. Hosts implement this trait for their canvas and hand a frame's
/// descriptors to [`paint`], which dispatches on the geometry variant.
pub trait DrawSurface {
    /// Draw a text label.
    fn text(&mut self, d: &RenderDescriptor, g: &TextGeometry) -> TelestratorResult<()>;

    /// Draw a circle.
    fn circle(&mut self, d: &RenderDescriptor, g: &RoundGeometry) -> TelestratorResult<()>;

    /// Draw a spotlight.
    fn spotlight(&mut self, d: &RenderDescriptor, g: &RoundGeometry) -> TelestratorResult<()>;

    /// Draw a polyline.
    fn line(&mut self, d: &RenderDescriptor, g: &PathGeometry) -> TelestratorResult<()>;

    /// Draw an arrow.
    fn arrow(&mut self, d: &RenderDescriptor, g: &PathGeometry) -> TelestratorResult<()>;

    /// Draw a closed polygon.
    fn polygon(&mut self, d: &RenderDescriptor, g: &PathGeometry) -> TelestratorResult<()>;
}

/// Draw `descriptors` in order, stopping at the first surface error.
pub fn paint<S: DrawSurface + ?Sized>(
    surface: &mut S,
    descriptors: &[RenderDescriptor],
) -> TelestratorResult<()> {
    for d in descriptors {
        match &d.geometry {
            Geometry::Text(g) => surface.text(d, g)?,
            Geometry::Circle(g) => surface.circle(d, g)?,
            Geometry::Spotlight(g) => surface.spotlight(d, g)?,
            Geometry::Line(g) => surface.line(d, g)?,
            Geometry::Arrow(g) => surface.arrow(d, g)?,
            Geometry::Polygon(g) => surface.polygon(d, g)?,
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
