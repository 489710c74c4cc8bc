//! Text export of the deformed mesh, and a reader for the same format.
//!
//! ```text
//! V <x> <y> <z>
//! Vt <u> <v>
//! Vn <x> <y> <z>
//! f <p>/<t>/<n> <p>/<t>/<n> <p>/<t>/<n>
//! ```
//!
//! All `V` lines come first, then `Vt`, then `Vn`, then one `f` line per
//! triangle. Indices are 0-based. Sub-meshes are concatenated and their
//! indices offset by the particles written before them.

use crate::cloth::Cloth;
use crate::error::ClothError;
use crate::float::Float;
use crate::mesh::SurfaceMesh;
use crate::scene::Scene;
use crate::vec::{Vec2, Vec3};
use alloc::vec::Vec as AllocVec;
use core::fmt::{self, Write};
use core::str::SplitWhitespace;

/// One `p/t/n` record of a face line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceRecord {
    pub position: usize,
    pub texcoord: usize,
    pub normal: usize,
}

/// Contents of an exported mesh.
#[derive(Clone, Debug, Default)]
pub struct ExportedMesh<F: Float> {
    pub positions: AllocVec<Vec3<F>>,
    pub texcoords: AllocVec<Vec2<F>>,
    pub normals: AllocVec<Vec3<F>>,
    pub faces: AllocVec<AllocVec<FaceRecord>>,
}

impl<F: Float> ExportedMesh<F> {
    /// Rebuild a loader mesh from the exported data. Position indices of
    /// each face become the triangle indices.
    pub fn to_surface_mesh(&self) -> SurfaceMesh<F> {
        let indices = self
            .faces
            .iter()
            .flat_map(|face| face.iter().map(|r| r.position))
            .collect();
        SurfaceMesh {
            positions: self.positions.clone(),
            texcoords: self.texcoords.clone(),
            normals: self.normals.clone(),
            indices,
        }
    }
}

/// Write every sub-mesh of `scene`.
pub fn write_scene<F: Float, W: Write>(scene: &Scene<F>, out: &mut W) -> fmt::Result {
    write_cloths(scene.cloths(), out)
}

/// Write one cloth.
pub fn write_cloth<F: Float, W: Write>(cloth: &Cloth<F>, out: &mut W) -> fmt::Result {
    write_cloths(core::slice::from_ref(cloth), out)
}

fn write_cloths<F: Float, W: Write>(cloths: &[Cloth<F>], out: &mut W) -> fmt::Result {
    for cloth in cloths {
        for p in cloth.store().iter() {
            writeln!(out, "V {} {} {}", p.pos.x, p.pos.y, p.pos.z)?;
        }
    }
    for cloth in cloths {
        for t in cloth.topology().texcoords() {
            writeln!(out, "Vt {} {}", t.x, t.y)?;
        }
    }
    for cloth in cloths {
        for n in cloth.topology().normals() {
            writeln!(out, "Vn {} {} {}", n.x, n.y, n.z)?;
        }
    }
    let mut offset = 0;
    for cloth in cloths {
        for tri in cloth.topology().triangles() {
            out.write_str("f")?;
            for &v in tri {
                let i = v + offset;
                write!(out, " {}/{}/{}", i, i, i)?;
            }
            out.write_str("\n")?;
        }
        offset += cloth.particle_count();
    }
    Ok(())
}

/// Parse text written by [`write_scene`].
pub fn parse<F: Float>(text: &str) -> Result<ExportedMesh<F>, ClothError> {
    let mut mesh = ExportedMesh {
        positions: AllocVec::new(),
        texcoords: AllocVec::new(),
        normals: AllocVec::new(),
        faces: AllocVec::new(),
    };

    for (i, line) in text.lines().enumerate() {
        let line_no = i + 1;
        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else { continue };
        match tag {
            "V" => {
                let [x, y, z] = scalars(&mut tokens, line_no)?;
                mesh.positions.push(Vec3::new(x, y, z));
            }
            "Vt" => {
                let [u, v] = scalars(&mut tokens, line_no)?;
                mesh.texcoords.push(Vec2::new(u, v));
            }
            "Vn" => {
                let [x, y, z] = scalars(&mut tokens, line_no)?;
                mesh.normals.push(Vec3::new(x, y, z));
            }
            "f" => {
                let face = tokens
                    .map(|t| face_record(t, line_no))
                    .collect::<Result<AllocVec<_>, _>>()?;
                if face.is_empty() {
                    return Err(malformed(line_no, "face line without records"));
                }
                mesh.faces.push(face);
            }
            _ => return Err(malformed(line_no, "unknown line tag")),
        }
    }

    Ok(mesh)
}

fn malformed(line: usize, reason: &'static str) -> ClothError {
    ClothError::MalformedExport { line, reason }
}

fn scalars<F: Float, const N: usize>(
    tokens: &mut SplitWhitespace<'_>,
    line: usize,
) -> Result<[F; N], ClothError> {
    let mut values = [F::zero(); N];
    for value in values.iter_mut() {
        let token = tokens.next().ok_or_else(|| malformed(line, "missing component"))?;
        *value = token.parse().map_err(|_| malformed(line, "invalid number"))?;
    }
    if tokens.next().is_some() {
        return Err(malformed(line, "trailing component"));
    }
    Ok(values)
}

fn face_record(token: &str, line: usize) -> Result<FaceRecord, ClothError> {
    let mut parts = token.split('/');
    let mut index = || -> Result<usize, ClothError> {
        parts
            .next()
            .ok_or_else(|| malformed(line, "face record needs p/t/n"))?
            .parse()
            .map_err(|_| malformed(line, "invalid face index"))
    };
    let record = FaceRecord { position: index()?, texcoord: index()?, normal: index()? };
    if parts.next().is_some() {
        return Err(malformed(line, "face record needs p/t/n"));
    }
    Ok(record)
}
