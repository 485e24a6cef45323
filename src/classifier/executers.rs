// src/classifier/executers.rs

use bevy::prelude::*;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use super::candidates::{classified_name, find_mesh_file};
use super::resources::{CandidateCursor, ClassifyError, CurrentCandidate, SortLayout};
use crate::mesh::{load_obj, LoadedMesh};

/// A candidate that made it through loading, ready to be shown.
#[derive(Debug)]
pub(crate) struct LoadedCandidate {
    pub candidate: CurrentCandidate,
    pub mesh: LoadedMesh,
}

/// Creates the destination root and one folder per category.
pub(crate) fn prepare_destination(layout: &SortLayout) -> std::io::Result<()> {
    fs::create_dir_all(&layout.destination_root)?;
    for category in &layout.categories {
        fs::create_dir_all(layout.category_dir(category))?;
    }
    Ok(())
}

/// Walks the cursor forward until a candidate loads, skipping folders with no
/// `.obj` and meshes that fail to parse. Each examined folder moves the cursor
/// by exactly one. Returns `None` once the listing is exhausted.
pub(crate) fn advance_to_next_candidate(cursor: &mut CandidateCursor) -> Option<LoadedCandidate> {
    while let Some(dir) = cursor.next_dir() {
        let index = cursor.index - 1;

        let mesh_file = match find_mesh_file(&dir) {
            Ok(Some(file)) => file,
            Ok(None) => {
                info!("No .obj file found in {}. Skipping...", dir.display());
                continue;
            }
            Err(e) => {
                warn!("Classifier: Could not read {}: {}. Skipping...", dir.display(), e);
                continue;
            }
        };

        let mesh = match load_obj(&mesh_file) {
            Ok(mesh) => mesh,
            Err(e) => {
                error!("Failed to load 3D model from {}: {}", mesh_file.display(), e);
                continue;
            }
        };
        info!("Loaded 3D model from {}", mesh_file.display());

        let diagonal = mesh.diagonal();
        info!(
            target: "mesh_sorter::diagonal",
            "Diagonal length of the 3D model: {:.2} m",
            diagonal / 1000.0
        );

        return Some(LoadedCandidate {
            candidate: CurrentCandidate { dir, mesh_file, index, diagonal },
            mesh,
        });
    }
    None
}

/// Copies `candidate` into `<dest>/<category>/<prefix>_<folder>` and renames its
/// mesh to match the folder. Any earlier copy of the same candidate, in any
/// category, is removed first. The source folder is only read.
pub(crate) fn execute_classification(
    layout: &SortLayout,
    candidate: &CurrentCandidate,
    category: &str,
) -> Result<PathBuf, ClassifyError> {
    if !layout.has_category(category) {
        return Err(ClassifyError::UnknownCategory(category.to_string()));
    }
    if !candidate.dir.is_dir() {
        return Err(ClassifyError::SourceDoesNotExist(candidate.dir.clone()));
    }

    let new_name = classified_name(&layout.source_root, &candidate.dir);
    debug!(
        "Classifier: Copying {} -> {}/{} as {}",
        candidate.dir.display(),
        layout.destination_root.display(),
        category,
        new_name
    );

    for existing in &layout.categories {
        remove_previous_copy(&layout.category_dir(existing).join(&new_name))?;
    }

    let target = layout.category_dir(category).join(&new_name);
    fs::create_dir_all(&target)?;

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;
    fs_extra::dir::copy(&candidate.dir, &target, &options)?;

    let mesh_name = candidate
        .mesh_file
        .file_name()
        .ok_or_else(|| ClassifyError::CopiedMeshMissing(candidate.mesh_file.clone()))?;
    let copied_mesh = target.join(mesh_name);
    let renamed_mesh = target.join(format!("{}.obj", new_name));
    if !copied_mesh.is_file() {
        return Err(ClassifyError::CopiedMeshMissing(copied_mesh));
    }
    if copied_mesh != renamed_mesh {
        fs::rename(&copied_mesh, &renamed_mesh)?;
    }

    Ok(target)
}

fn remove_previous_copy(path: &Path) -> Result<(), ClassifyError> {
    if path.exists() {
        debug!("Classifier: Removing previous copy at {}", path.display());
        fs::remove_dir_all(path).map_err(|source| ClassifyError::RemoveStale {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Status line text for a finished classification.
pub(crate) fn classification_message(candidate: &CurrentCandidate, category: &str) -> String {
    format!(
        "{} classified as {} at {}",
        candidate.file_name(),
        category,
        Local::now().format("%H:%M:%S")
    )
}
