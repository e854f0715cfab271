use crate::{
    analysis::model::{Annotation, AnnotationKind, AnnotationShape},
    animation::smoothing::SmoothedState,
    foundation::core::{Point, Vec2},
    transform::viewport::DisplayScale,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// One overlay ready to draw, in display space.
pub struct RenderDescriptor {
    /// Source annotation id.
    pub id: String,
    /// Display-space position.
    pub position: Point,
    /// Smoothed opacity; always above the engine's epsilon.
    pub opacity: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Annotation's own scale (display scaling is already folded into the geometry).
    pub scale: Vec2,
    /// Shape-specific, display-scaled fields.
    #[serde(flatten)]
    pub geometry: Geometry,
}

impl RenderDescriptor {
    /// Shape discriminant.
    pub fn kind(&self) -> AnnotationKind {
        self.geometry.kind()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
/// Display-scaled geometry, tagged by annotation type.
pub enum Geometry {
    /// Text label.
    Text(TextGeometry),
    /// Circle.
    Circle(RoundGeometry),
    /// Spotlight.
    Spotlight(RoundGeometry),
    /// Polyline.
    Line(PathGeometry),
    /// Arrow.
    Arrow(PathGeometry),
    /// Closed polygon.
    Polygon(PathGeometry),
}

impl Geometry {
    /// Shape discriminant.
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Text(_) => AnnotationKind::Text,
            Self::Circle(_) => AnnotationKind::Circle,
            Self::Spotlight(_) => AnnotationKind::Spotlight,
            Self::Line(_) => AnnotationKind::Line,
            Self::Arrow(_) => AnnotationKind::Arrow,
            Self::Polygon(_) => AnnotationKind::Polygon,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Text label geometry.
pub struct TextGeometry {
    /// Label contents.
    pub text: String,
    /// Font size, uniformly scaled.
    pub font_size: f64,
    /// Wrap width, horizontally scaled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Box height, vertically scaled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Glow blur, uniformly scaled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Circle and spotlight geometry.
pub struct RoundGeometry {
    /// Radius, uniformly scaled.
    pub radius: f64,
    /// Fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width, uniformly scaled.
    pub stroke_width: f64,
    /// Glow blur, uniformly scaled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_blur: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Line, arrow and polygon geometry.
pub struct PathGeometry {
    /// Flat point list, scaled by axis parity.
    pub points: Vec<f64>,
    /// Fill color (polygons only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Stroke color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Stroke width, uniformly scaled.
    pub stroke_width: f64,
}

/// Map a smoothed, authored-space pose onto the display.
///
/// Positions and point lists scale per axis; radius, stroke width, font size and blur scale by
/// [`DisplayScale::uniform`] so round shapes stay round.
pub fn resolve_descriptor(
    annotation: &Annotation,
    state: &SmoothedState,
    scale: DisplayScale,
) -> RenderDescriptor {
    let u = scale.uniform();
    let geometry = match &annotation.shape {
        AnnotationShape::Text {
            text,
            font_size,
            width,
            height,
            fill,
            shadow_blur,
        } => Geometry::Text(TextGeometry {
            text: text.clone(),
            font_size: font_size * u,
            width: width.map(|w| w * scale.x),
            height: height.map(|h| h * scale.y),
            fill: fill.clone(),
            shadow_blur: shadow_blur.map(|b| b * u),
        }),
        AnnotationShape::Circle {
            radius,
            fill,
            stroke,
            stroke_width,
            shadow_blur,
        } => Geometry::Circle(RoundGeometry {
            radius: radius * u,
            fill: fill.clone(),
            stroke: stroke.clone(),
            stroke_width: stroke_width * u,
            shadow_blur: shadow_blur.map(|b| b * u),
        }),
        AnnotationShape::Spotlight {
            radius,
            fill,
            stroke,
            stroke_width,
            shadow_blur,
        } => Geometry::Spotlight(RoundGeometry {
            radius: radius * u,
            fill: fill.clone(),
            stroke: stroke.clone(),
            stroke_width: stroke_width * u,
            shadow_blur: shadow_blur.map(|b| b * u),
        }),
        AnnotationShape::Line {
            points,
            stroke,
            stroke_width,
        } => Geometry::Line(PathGeometry {
            points: scale.points(points),
            fill: None,
            stroke: stroke.clone(),
            stroke_width: stroke_width * u,
        }),
        AnnotationShape::Arrow {
            points,
            stroke,
            stroke_width,
        } => Geometry::Arrow(PathGeometry {
            points: scale.points(points),
            fill: None,
            stroke: stroke.clone(),
            stroke_width: stroke_width * u,
        }),
        AnnotationShape::Polygon {
            points,
            fill,
            stroke,
            stroke_width,
        } => Geometry::Polygon(PathGeometry {
            points: scale.points(points),
            fill: fill.clone(),
            stroke: stroke.clone(),
            stroke_width: stroke_width * u,
        }),
    };

    RenderDescriptor {
        id: annotation.id.clone(),
        position: scale.point(state.position),
        opacity: state.opacity,
        rotation: state.rotation,
        scale: state.scale,
        geometry,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/descriptor.rs"]
mod tests;
