use crate::{
    analysis::model::{AnalysisDocument, Annotation, Clip},
    animation::keyframe::sort_keyframes,
    foundation::{core::Size, error::TelestratorResult},
};

/// Read-only, playback-ready view of an [`AnalysisDocument`].
///
/// Building a snapshot sorts every keyframe sequence (stable, ascending by time) so the
/// interpolator can assume sorted input. Annotation order is preserved; it is the scan order
/// used for pause-scene triggering.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisSnapshot {
    id: String,
    clips: Vec<Clip>,
    annotations: Vec<Annotation>,
    canvas: Size,
}

impl AnalysisSnapshot {
    /// Validate a document and normalize it into a snapshot.
    ///
    /// Fails with a validation error on duplicate or empty ids, non-finite times or an invalid
    /// canvas. Inverted windows are accepted and logged.
    #[tracing::instrument(skip(doc), fields(id = %doc.id, annotations = doc.annotations.len()))]
    pub fn new(doc: AnalysisDocument) -> TelestratorResult<Self> {
        doc.validate()?;
        let canvas = doc.canvas_size();
        let AnalysisDocument {
            id,
            clips,
            mut annotations,
            ..
        } = doc;

        for ann in &mut annotations {
            if ann.window().is_empty() {
                tracing::warn!(
                    annotation = %ann.id,
                    start = ann.start_time,
                    end = ann.end_time,
                    "annotation window is empty; it will never be shown"
                );
            }
            sort_keyframes(&mut ann.keyframes);
        }

        Ok(Self {
            id,
            clips,
            annotations,
            canvas,
        })
    }

    /// Analysis document id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Authored canvas size.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    /// All clips.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// All annotations in scan order.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Look up an annotation by id.
    pub fn annotation(&self, id: &str) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id == id)
    }

    /// Look up a clip by id.
    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Resolve an annotation's weak clip reference. Dangling references resolve to `None`.
    pub fn clip_for(&self, annotation: &Annotation) -> Option<&Clip> {
        annotation.clip_id.as_deref().and_then(|id| self.clip(id))
    }

    /// Annotations attached to `clip_id`, in scan order.
    pub fn annotations_in_clip<'a>(
        &'a self,
        clip_id: &'a str,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.annotations
            .iter()
            .filter(move |a| a.clip_id.as_deref() == Some(clip_id))
    }

    /// Pause-scene annotations ordered by start time (ties keep scan order).
    pub fn pause_scenes(&self) -> Vec<&Annotation> {
        let mut scenes: Vec<&Annotation> =
            self.annotations.iter().filter(|a| a.is_pause_scene).collect();
        scenes.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
        scenes
    }

    pub(crate) fn set_canvas(&mut self, canvas: Size) {
        self.canvas = canvas;
    }

    pub(crate) fn remove_annotation(&mut self, id: &str) -> Option<Annotation> {
        let idx = self.annotations.iter().position(|a| a.id == id)?;
        Some(self.annotations.remove(idx))
    }

    /// Rebuild a persistable document from the current state.
    pub fn to_document(&self) -> AnalysisDocument {
        AnalysisDocument {
            id: self.id.clone(),
            clips: self.clips.clone(),
            annotations: self.annotations.clone(),
            canvas_width: self.canvas.width,
            canvas_height: self.canvas.height,
        }
    }
}

impl TryFrom<AnalysisDocument> for AnalysisSnapshot {
    type Error = crate::foundation::error::TelestratorError;

    fn try_from(doc: AnalysisDocument) -> TelestratorResult<Self> {
        Self::new(doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/snapshot.rs"]
mod tests;
