// src/classifier/resources.rs

use bevy::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::candidates::list_candidate_dirs;
use crate::settings::ClassifierSettings;

/// Where candidates come from, where they go, and the buckets in between.
#[derive(Debug, Clone, PartialEq)]
pub struct SortLayout {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub categories: Vec<String>,
}

impl SortLayout {
    pub fn from_settings(settings: &ClassifierSettings) -> Self {
        Self {
            source_root: settings.source_folder.clone(),
            destination_root: settings.destination_folder.clone(),
            categories: settings.categories.clone(),
        }
    }

    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.destination_root.join(category)
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

/// Position in the candidate listing. The listing is taken once per scan, so
/// `index` only ever moves forward until the next rescan.
#[derive(Debug, Clone, Default)]
pub struct CandidateCursor {
    pub dirs: Vec<PathBuf>,
    pub index: usize,
}

impl CandidateCursor {
    pub fn scan(root: &Path, start_index: usize) -> std::io::Result<Self> {
        let dirs = list_candidate_dirs(root)?;
        let index = start_index.min(dirs.len());
        Ok(Self { dirs, index })
    }

    /// Hands out the directory under the cursor and steps past it.
    pub fn next_dir(&mut self) -> Option<PathBuf> {
        let dir = self.dirs.get(self.index)?.clone();
        self.index += 1;
        Some(dir)
    }

    pub fn total(&self) -> usize {
        self.dirs.len()
    }
}

/// The candidate currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentCandidate {
    pub dir: PathBuf,
    pub mesh_file: PathBuf,
    /// Listing position of `dir`, kept for resuming.
    pub index: usize,
    pub diagonal: f32,
}

impl CurrentCandidate {
    pub fn file_name(&self) -> String {
        self.mesh_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("File system operation error: {0}")]
    FsExtra(String),
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Candidate folder does not exist: {0}")]
    SourceDoesNotExist(PathBuf),
    #[error("Could not remove previous copy at {path}: {source}")]
    RemoveStale {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Copied mesh file missing at {0}")]
    CopiedMeshMissing(PathBuf),
}

impl From<fs_extra::error::Error> for ClassifyError {
    fn from(err: fs_extra::error::Error) -> Self {
        ClassifyError::FsExtra(err.to_string())
    }
}

/// Main resource holding the state of the classification session.
#[derive(Resource, Debug)]
pub struct ClassifierState {
    pub layout: SortLayout,
    pub cursor: CandidateCursor,
    pub current: Option<CurrentCandidate>,
    pub status: String,
    pub status_is_error: bool,
    pub finished: bool,
}

impl ClassifierState {
    pub fn new(layout: SortLayout) -> Self {
        Self {
            layout,
            cursor: CandidateCursor::default(),
            current: None,
            status: "Idle".to_string(),
            status_is_error: false,
            finished: false,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_is_error = true;
    }

    /// The candidate a category would sort. Nothing once the listing has run out,
    /// even though the last mesh stays on screen.
    pub fn classifiable(&self) -> Option<&CurrentCandidate> {
        self.current.as_ref().filter(|_| !self.finished)
    }

    /// Index to reopen at on the next launch: the candidate on screen, or
    /// wherever the cursor stopped once the listing ran out.
    pub fn resume_index(&self) -> usize {
        match &self.current {
            Some(current) if !self.finished => current.index,
            _ => self.cursor.index,
        }
    }

    pub fn to_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            source_folder: self.layout.source_root.clone(),
            destination_folder: self.layout.destination_root.clone(),
            categories: self.layout.categories.clone(),
            start_index: self.resume_index(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn scan_clamps_start_index() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        fs::create_dir(root.path().join("b")).unwrap();

        let cursor = CandidateCursor::scan(root.path(), 7).unwrap();
        assert_eq!(cursor.total(), 2);
        assert_eq!(cursor.index, 2);
        assert_eq!(cursor.clone().next_dir(), None);
    }

    #[test]
    fn next_dir_steps_once_per_call() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("a")).unwrap();
        fs::create_dir(root.path().join("b")).unwrap();

        let mut cursor = CandidateCursor::scan(root.path(), 0).unwrap();
        assert_eq!(cursor.next_dir().unwrap().file_name().unwrap(), "a");
        assert_eq!(cursor.index, 1);
        assert_eq!(cursor.next_dir().unwrap().file_name().unwrap(), "b");
        assert!(cursor.next_dir().is_none());
        assert_eq!(cursor.index, 2);
    }

    #[test]
    fn resume_points_at_candidate_on_screen() {
        let mut state = ClassifierState::new(SortLayout::from_settings(&ClassifierSettings::default()));
        state.cursor = CandidateCursor {
            dirs: vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")],
            index: 2,
        };
        assert_eq!(state.to_settings().start_index, 2);

        state.current = Some(CurrentCandidate {
            dir: PathBuf::from("b"),
            mesh_file: PathBuf::from("b/part.obj"),
            index: 1,
            diagonal: 1.0,
        });
        let settings = state.to_settings();
        assert_eq!(settings.start_index, 1);
        assert_eq!(settings.categories, ClassifierSettings::default().categories);

        state.cursor.index = 3;
        state.finished = true;
        assert_eq!(state.to_settings().start_index, 3);
    }

    #[test]
    fn nothing_is_classifiable_after_the_last_candidate() {
        let mut state = ClassifierState::new(SortLayout::from_settings(&ClassifierSettings::default()));
        assert!(state.classifiable().is_none());

        state.current = Some(CurrentCandidate {
            dir: PathBuf::from("a"),
            mesh_file: PathBuf::from("a/part.obj"),
            index: 0,
            diagonal: 1.0,
        });
        assert_eq!(state.classifiable().map(|c| c.index), Some(0));

        state.finished = true;
        assert!(state.classifiable().is_none());
        assert!(state.current.is_some());
    }

    #[test]
    fn layout_knows_its_categories() {
        let layout = SortLayout {
            source_root: PathBuf::from("src"),
            destination_root: PathBuf::from("dest"),
            categories: vec!["螺丝".to_string(), "螺母".to_string()],
        };
        assert!(layout.has_category("螺母"));
        assert!(!layout.has_category("异形件"));
        assert_eq!(layout.category_dir("螺丝"), PathBuf::from("dest").join("螺丝"));
    }
}
