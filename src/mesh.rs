//! Triangulated surface handed over by a model loader.

use crate::float::Float;
use crate::vec::{Vec2, Vec3};
use alloc::vec::Vec as AllocVec;

/// A triangle soup as produced by a model loader.
///
/// `positions`, `texcoords` and `normals` are per loaded vertex; the
/// attribute arrays may be empty. `indices` holds three entries per triangle.
#[derive(Clone, Debug, Default)]
pub struct SurfaceMesh<F: Float> {
    pub positions: AllocVec<Vec3<F>>,
    pub texcoords: AllocVec<Vec2<F>>,
    pub normals: AllocVec<Vec3<F>>,
    pub indices: AllocVec<usize>,
}

impl<F: Float> SurfaceMesh<F> {
    /// A mesh with positions and triangles only.
    pub fn new(positions: AllocVec<Vec3<F>>, indices: AllocVec<usize>) -> Self {
        SurfaceMesh {
            positions,
            texcoords: AllocVec::new(),
            normals: AllocVec::new(),
            indices,
        }
    }

    pub fn with_texcoords(mut self, texcoords: AllocVec<Vec2<F>>) -> Self {
        self.texcoords = texcoords;
        self
    }

    pub fn with_normals(mut self, normals: AllocVec<Vec3<F>>) -> Self {
        self.normals = normals;
        self
    }

    /// A flat `cols` x `rows` vertex grid in the XZ plane at height `y`,
    /// two triangles per cell.
    ///
    /// Vertex (col, row) has index `row * cols + col`. Texture coordinates
    /// span [0, 1] and normals point up.
    pub fn grid(cols: usize, rows: usize, spacing: F, y: F) -> Self {
        let cols = cols.max(2);
        let rows = rows.max(2);
        let mut positions = AllocVec::with_capacity(cols * rows);
        let mut texcoords = AllocVec::with_capacity(cols * rows);
        let mut normals = AllocVec::with_capacity(cols * rows);

        let u_step = F::one() / F::from_f32((cols - 1) as f32);
        let v_step = F::one() / F::from_f32((rows - 1) as f32);
        for row in 0..rows {
            for col in 0..cols {
                let c = F::from_f32(col as f32);
                let r = F::from_f32(row as f32);
                positions.push(Vec3::new(c * spacing, y, r * spacing));
                texcoords.push(Vec2::new(c * u_step, r * v_step));
                normals.push(Vec3::from_f32(0.0, 1.0, 0.0));
            }
        }

        let mut indices = AllocVec::with_capacity((cols - 1) * (rows - 1) * 6);
        for row in 0..(rows - 1) {
            for col in 0..(cols - 1) {
                let tl = row * cols + col;
                let tr = tl + 1;
                let bl = tl + cols;
                let br = bl + 1;
                indices.extend_from_slice(&[tl, bl, tr]);
                indices.extend_from_slice(&[tr, bl, br]);
            }
        }

        SurfaceMesh { positions, texcoords, normals, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
