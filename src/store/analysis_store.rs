use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::{
    analysis::model::{AnalysisDocument, Annotation, Clip},
    foundation::core::Size,
    foundation::error::{TelestratorError, TelestratorResult},
};

/// Save collaborator for analysis edits.
///
/// Called with the full post-mutation state; implementations replace whatever they stored before.
pub trait AnalysisStore {
    /// Persist `clips` and `annotations` for `analysis_id`, authored on `canvas`.
    fn save(
        &mut self,
        analysis_id: &str,
        clips: &[Clip],
        annotations: &[Annotation],
        canvas: Size,
    ) -> TelestratorResult<()>;
}

impl<S: AnalysisStore + ?Sized> AnalysisStore for &mut S {
    fn save(
        &mut self,
        analysis_id: &str,
        clips: &[Clip],
        annotations: &[Annotation],
        canvas: Size,
    ) -> TelestratorResult<()> {
        (**self).save(analysis_id, clips, annotations, canvas)
    }
}

fn document(
    analysis_id: &str,
    clips: &[Clip],
    annotations: &[Annotation],
    canvas: Size,
) -> AnalysisDocument {
    AnalysisDocument {
        id: analysis_id.to_owned(),
        clips: clips.to_vec(),
        annotations: annotations.to_vec(),
        canvas_width: canvas.width,
        canvas_height: canvas.height,
    }
}

/// Analysis document stored as pretty-printed JSON on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `path`. Nothing is read or written until asked.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the stored document.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> TelestratorResult<AnalysisDocument> {
        let f = File::open(&self.path).map_err(|e| {
            TelestratorError::persistence(format!(
                "open analysis JSON '{}': {e}",
                self.path.display()
            ))
        })?;
        let doc: AnalysisDocument = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            TelestratorError::serde(format!(
                "parse analysis JSON '{}': {e}",
                self.path.display()
            ))
        })?;
        doc.validate()?;
        tracing::debug!(
            clips = doc.clips.len(),
            annotations = doc.annotations.len(),
            "analysis loaded"
        );
        Ok(doc)
    }
}

impl AnalysisStore for JsonFileStore {
    #[tracing::instrument(skip(self, clips, annotations), fields(path = %self.path.display()))]
    fn save(
        &mut self,
        analysis_id: &str,
        clips: &[Clip],
        annotations: &[Annotation],
        canvas: Size,
    ) -> TelestratorResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                TelestratorError::persistence(format!(
                    "create analysis directory '{}': {e}",
                    parent.display()
                ))
            })?;
        }

        let doc = document(analysis_id, clips, annotations, canvas);
        let mut bytes = serde_json::to_vec_pretty(&doc)?;
        bytes.push(b'\n');
        std::fs::write(&self.path, bytes).map_err(|e| {
            TelestratorError::persistence(format!(
                "write analysis JSON '{}': {e}",
                self.path.display()
            ))
        })?;
        tracing::debug!(annotations = annotations.len(), "analysis saved");
        Ok(())
    }
}

/// Store that keeps every saved document in memory, newest last.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    saved: Vec<AnalysisDocument>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every document saved so far.
    pub fn saved(&self) -> &[AnalysisDocument] {
        &self.saved
    }

    /// Most recently saved document.
    pub fn latest(&self) -> Option<&AnalysisDocument> {
        self.saved.last()
    }
}

impl AnalysisStore for MemoryStore {
    fn save(
        &mut self,
        analysis_id: &str,
        clips: &[Clip],
        annotations: &[Annotation],
        canvas: Size,
    ) -> TelestratorResult<()> {
        self.saved.push(document(analysis_id, clips, annotations, canvas));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/analysis_store.rs"]
mod tests;
