// src/mesh/loader.rs

use std::path::{Path, PathBuf};

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use thiserror::Error;

use super::metrics::{height_gradient_colors, BoundingBox};

#[derive(Error, Debug)]
pub enum MeshLoadError {
    #[error("OBJ parse error in {path}: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("{0} contains no triangles")]
    EmptyMesh(PathBuf),
}

/// Triangle soup read from an OBJ file, all models merged. Positions stay in
/// the file's own frame (Z up).
#[derive(Debug, Clone)]
pub struct LoadedMesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
    pub bounds: BoundingBox,
}

/// Loads every model in `path` into a single triangle list. Materials are ignored.
pub fn load_obj(path: &Path) -> Result<LoadedMesh, MeshLoadError> {
    let options = tobj::LoadOptions {
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options).map_err(|source| MeshLoadError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let offset = positions.len() as u32;
        positions.extend(mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
        indices.extend(mesh.indices.iter().map(|i| i + offset));
    }

    if indices.len() < 3 {
        return Err(MeshLoadError::EmptyMesh(path.to_path_buf()));
    }
    let bounds =
        BoundingBox::from_positions(&positions).ok_or_else(|| MeshLoadError::EmptyMesh(path.to_path_buf()))?;

    debug!(
        "Mesh: read {} models, {} vertices, {} triangles from {}",
        models.len(),
        positions.len(),
        indices.len() / 3,
        path.display()
    );

    Ok(LoadedMesh { positions, indices, bounds })
}

impl LoadedMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn diagonal(&self) -> f32 {
        self.bounds.diagonal()
    }

    /// Builds the display mesh: centered on the bounding box, OBJ Z-up turned
    /// into Bevy Y-up, vertex colors from the height gradient.
    pub fn to_bevy_mesh(&self) -> Mesh {
        let [cx, cy, cz] = self.bounds.center();
        let display_positions: Vec<[f32; 3]> = self
            .positions
            .iter()
            .map(|p| [p[0] - cx, p[2] - cz, -(p[1] - cy)])
            .collect();
        let colors = height_gradient_colors(&self.positions);

        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, display_positions);
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh.compute_normals();
        mesh
    }
}
