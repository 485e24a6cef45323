// src/mesh/metrics.rs

/// Axis-aligned bounding box over OBJ-space positions (Z up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    /// Returns `None` for an empty position list.
    pub fn from_positions(positions: &[[f32; 3]]) -> Option<Self> {
        let first = *positions.first()?;
        let mut bounds = BoundingBox { min: first, max: first };
        for p in &positions[1..] {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }

    pub fn extent(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    /// Euclidean norm of the extent. Only used as a display metric.
    pub fn diagonal(&self) -> f32 {
        let [x, y, z] = self.extent();
        (x * x + y * y + z * z).sqrt()
    }
}

/// Per-vertex RGBA colors from normalized height: `[h, 0.5, 1 - h, 1]`.
///
/// `h` is the vertex Z mapped onto `[0, 1]` across the mesh, so low vertices
/// come out blue and high vertices red. A mesh with no Z spread maps every
/// vertex to `h = 0`.
pub fn height_gradient_colors(positions: &[[f32; 3]]) -> Vec<[f32; 4]> {
    let (min_z, max_z) = positions
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[2]), hi.max(p[2]))
        });
    let span = max_z - min_z;

    positions
        .iter()
        .map(|p| {
            let h = if span > f32::EPSILON { (p[2] - min_z) / span } else { 0.0 };
            [h, 0.5, 1.0 - h, 1.0]
        })
        .collect()
}
