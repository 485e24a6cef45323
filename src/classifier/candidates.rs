// src/classifier/candidates.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

const MESH_EXTENSION: &str = "obj";

/// Immediate subdirectories of `root`, sorted by name. Each one is a candidate.
pub fn list_candidate_dirs(root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("source folder {} is not a directory", root.display()),
        ));
    }

    let mut dirs = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        }
    }
    Ok(dirs)
}

/// First `.obj` file in `dir` by name, if any. Nested folders are not searched.
pub fn find_mesh_file(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut meshes: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map_or(false, |ext| ext.eq_ignore_ascii_case(MESH_EXTENSION))
        })
        .collect();
    meshes.sort();
    Ok(meshes.into_iter().next())
}

/// First two `_`-separated tokens of the source root's name: `abc_0002_obj_v00` gives `abc_0002`.
pub fn source_prefix(source_root: &Path) -> String {
    let name = source_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tokens: Vec<&str> = name.split('_').collect();
    if tokens.len() >= 2 {
        format!("{}_{}", tokens[0], tokens[1])
    } else {
        name
    }
}

/// Folder (and mesh stem) name a candidate is stored under once classified.
pub fn classified_name(source_root: &Path, candidate_dir: &Path) -> String {
    let folder = candidate_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}_{}", source_prefix(source_root), folder)
}
