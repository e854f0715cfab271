use std::collections::BTreeSet;

use crate::{
    animation::keyframe::Keyframe,
    foundation::core::{Size, TimeWindow},
    foundation::error::{TelestratorError, TelestratorResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A persisted match analysis: clips plus the overlays authored against a fixed canvas.
///
/// This is the document shape the external store loads and saves. The playback engine only ever
/// reads it through an [`crate::AnalysisSnapshot`].
pub struct AnalysisDocument {
    /// Document identifier used when saving.
    pub id: String,
    /// Named ranges of the source video.
    #[serde(default)]
    pub clips: Vec<Clip>,
    /// Authored overlays, in authoring order (which is also pause-scene scan order).
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Width of the canvas annotations were authored on.
    #[serde(default)]
    pub canvas_width: f64,
    /// Height of the canvas annotations were authored on.
    #[serde(default)]
    pub canvas_height: f64,
}

impl AnalysisDocument {
    /// Authored canvas size. May be zero-sized when the document predates canvas tracking.
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// Check identifiers, times and canvas size.
    ///
    /// Inverted annotation windows (`startTime > endTime`) are accepted: playback renders them
    /// invisible instead of rejecting the whole document.
    pub fn validate(&self) -> TelestratorResult<()> {
        if self.id.trim().is_empty() {
            return Err(TelestratorError::validation("analysis id must be non-empty"));
        }
        if !(self.canvas_width.is_finite() && self.canvas_height.is_finite())
            || self.canvas_width < 0.0
            || self.canvas_height < 0.0
        {
            return Err(TelestratorError::validation(
                "canvas dimensions must be finite and >= 0",
            ));
        }

        let mut clip_ids = BTreeSet::new();
        for clip in &self.clips {
            if clip.id.trim().is_empty() {
                return Err(TelestratorError::validation("clip id must be non-empty"));
            }
            if !clip_ids.insert(clip.id.as_str()) {
                return Err(TelestratorError::validation(format!(
                    "duplicate clip id '{}'",
                    clip.id
                )));
            }
        }

        let mut ann_ids = BTreeSet::new();
        for ann in &self.annotations {
            if ann.id.trim().is_empty() {
                return Err(TelestratorError::validation("annotation id must be non-empty"));
            }
            if !ann_ids.insert(ann.id.as_str()) {
                return Err(TelestratorError::validation(format!(
                    "duplicate annotation id '{}'",
                    ann.id
                )));
            }
            if !(ann.start_time.is_finite() && ann.end_time.is_finite()) {
                return Err(TelestratorError::validation(format!(
                    "annotation '{}' has non-finite times",
                    ann.id
                )));
            }
            if ann.keyframes.iter().any(|k| !k.time.is_finite()) {
                return Err(TelestratorError::validation(format!(
                    "annotation '{}' has a keyframe with non-finite time",
                    ann.id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// A named range of the source video. Read-only context for annotations.
pub struct Clip {
    /// Clip identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Start in seconds.
    pub start_time: f64,
    /// End in seconds.
    pub end_time: f64,
}

fn one() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// An authored, timed overlay.
pub struct Annotation {
    /// Annotation identifier.
    pub id: String,
    /// Shape variant and its shape-specific fields (`type` tag in JSON).
    #[serde(flatten)]
    pub shape: AnnotationShape,
    /// Weak reference to a [`Clip`]; may dangle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
    /// First second the annotation is shown.
    pub start_time: f64,
    /// Last second the annotation is shown.
    pub end_time: f64,
    /// Static authored x, used when there are no keyframes.
    #[serde(default)]
    pub x: f64,
    /// Static authored y, used when there are no keyframes.
    #[serde(default)]
    pub y: f64,
    /// Base opacity before fades.
    #[serde(default = "one")]
    pub opacity: f64,
    /// Static rotation in degrees.
    #[serde(default)]
    pub rotation: f64,
    /// Static horizontal scale.
    #[serde(default = "one")]
    pub scale_x: f64,
    /// Static vertical scale.
    #[serde(default = "one")]
    pub scale_y: f64,
    /// Motion path; sorted by time when the snapshot is built.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyframes: Vec<Keyframe>,
    /// Halts playback when reached.
    #[serde(default)]
    pub is_pause_scene: bool,
    /// Authored hold length in seconds, shown in pause-scene listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_scene_duration: Option<f64>,
}

impl Annotation {
    /// Build an annotation with default pose, full opacity and no keyframes.
    pub fn new(id: impl Into<String>, shape: AnnotationShape, start: f64, end: f64) -> Self {
        Self {
            id: id.into(),
            shape,
            clip_id: None,
            start_time: start,
            end_time: end,
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            keyframes: Vec::new(),
            is_pause_scene: false,
            pause_scene_duration: None,
        }
    }

    /// Authored time window.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }

    /// Shape discriminant.
    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }

    /// Whole seconds a pause scene holds playback: `ceil(endTime - startTime)`, zero for
    /// inverted windows.
    pub fn pause_countdown_secs(&self) -> u32 {
        let secs = self.window().duration().ceil();
        if secs >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            secs as u32
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Field-less discriminant of [`AnnotationShape`].
pub enum AnnotationKind {
    /// Text label.
    Text,
    /// Circle outline or disc.
    Circle,
    /// Highlighted spot with glow.
    Spotlight,
    /// Polyline.
    Line,
    /// Polyline with an arrow head.
    Arrow,
    /// Closed polygon.
    Polygon,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
/// Shape-specific authored fields, tagged by `type`.
///
/// Point lists are flat `[x0, y0, x1, y1, ...]` in authored space, relative to the annotation's
/// position.
pub enum AnnotationShape {
    /// Text label.
    Text {
        /// Label contents.
        #[serde(default)]
        text: String,
        /// Font size in authored pixels.
        #[serde(default = "default_font_size")]
        font_size: f64,
        /// Optional wrap width.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<f64>,
        /// Optional box height.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<f64>,
        /// Fill color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        /// Glow/shadow blur radius.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shadow_blur: Option<f64>,
    },
    /// Circle.
    Circle {
        /// Radius in authored pixels.
        #[serde(default)]
        radius: f64,
        /// Fill color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        /// Stroke color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Stroke width in authored pixels.
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
        /// Glow/shadow blur radius.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shadow_blur: Option<f64>,
    },
    /// Spotlight.
    Spotlight {
        /// Radius in authored pixels.
        #[serde(default)]
        radius: f64,
        /// Fill color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        /// Stroke color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Stroke width in authored pixels.
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
        /// Glow blur radius.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shadow_blur: Option<f64>,
    },
    /// Polyline.
    Line {
        /// Flat point list.
        #[serde(default)]
        points: Vec<f64>,
        /// Stroke color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Stroke width in authored pixels.
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
    },
    /// Arrow.
    Arrow {
        /// Flat point list; the head sits on the last point.
        #[serde(default)]
        points: Vec<f64>,
        /// Stroke color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Stroke width in authored pixels.
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
    },
    /// Polygon.
    Polygon {
        /// Flat point list; implicitly closed.
        #[serde(default)]
        points: Vec<f64>,
        /// Fill color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        /// Stroke color.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stroke: Option<String>,
        /// Stroke width in authored pixels.
        #[serde(default = "default_stroke_width")]
        stroke_width: f64,
    },
}

fn default_font_size() -> f64 {
    24.0
}

fn default_stroke_width() -> f64 {
    2.0
}

impl AnnotationShape {
    /// Shape discriminant.
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Text { .. } => AnnotationKind::Text,
            Self::Circle { .. } => AnnotationKind::Circle,
            Self::Spotlight { .. } => AnnotationKind::Spotlight,
            Self::Line { .. } => AnnotationKind::Line,
            Self::Arrow { .. } => AnnotationKind::Arrow,
            Self::Polygon { .. } => AnnotationKind::Polygon,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/model.rs"]
mod tests;
