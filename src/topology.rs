//! Spring topology derived from a triangle soup: deduplicated vertices,
//! unique edges and bending diagonals.

use crate::error::ClothError;
use crate::float::Float;
use crate::mesh::SurfaceMesh;
use crate::store::StorageRemap;
use crate::vec::{Vec2, Vec3};
use alloc::collections::BTreeMap;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, warn};

/// Unordered pair of particle indices, normalized so `a <= b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(i: usize, j: usize) -> Self {
        if i <= j { Edge { a: i, b: j } } else { Edge { a: j, b: i } }
    }

    pub fn contains(&self, v: usize) -> bool {
        self.a == v || self.b == v
    }
}

/// Bending connection between the apexes of two adjacent triangles.
pub type Diagonal = Edge;

/// Two triangles sharing `shared`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AdjacentPair {
    pub first: usize,
    pub second: usize,
    pub shared: Edge,
}

/// A triangle edge tagged with its owning triangle.
#[derive(Copy, Clone, Debug)]
struct AdjacencyEntry {
    edge: Edge,
    face: usize,
}

/// Deduplicated mesh connectivity, built once before simulation.
#[derive(Clone, Debug)]
pub struct Topology<F: Float> {
    positions: AllocVec<Vec3<F>>,
    texcoords: AllocVec<Vec2<F>>,
    normals: AllocVec<Vec3<F>>,
    triangles: AllocVec<[usize; 3]>,
    edges: AllocVec<Edge>,
    diagonals: AllocVec<Diagonal>,
    adjacent: AllocVec<AdjacentPair>,
    vertex_remap: AllocVec<usize>,
}

impl<F: Float> Topology<F> {
    /// Build topology from a loaded mesh.
    ///
    /// Vertices are merged by exact position equality in first-seen order.
    /// Each distinct undirected edge is kept once. The first two triangles
    /// found on an edge form an adjacent pair and produce one diagonal; any
    /// further triangles on that edge are ignored.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(vertices = mesh.positions.len(), triangles = mesh.indices.len() / 3)
    )]
    pub fn build(mesh: &SurfaceMesh<F>) -> Result<Self, ClothError> {
        validate(mesh)?;

        // 1. Deduplicate by position.
        let mut ids: BTreeMap<[u64; 3], usize> = BTreeMap::new();
        let mut positions = AllocVec::new();
        let mut texcoords = AllocVec::new();
        let mut normals = AllocVec::new();
        let mut vertex_remap = AllocVec::with_capacity(mesh.positions.len());
        for (i, &pos) in mesh.positions.iter().enumerate() {
            let next = positions.len();
            let id = *ids.entry(pos.key()).or_insert(next);
            if id == next {
                positions.push(pos);
                texcoords.push(mesh.texcoords.get(i).copied().unwrap_or_default());
                normals.push(mesh.normals.get(i).copied().unwrap_or_default());
            }
            vertex_remap.push(id);
        }

        let triangles: AllocVec<[usize; 3]> = mesh
            .indices
            .chunks_exact(3)
            .map(|t| [vertex_remap[t[0]], vertex_remap[t[1]], vertex_remap[t[2]]])
            .collect();

        // 2. Tagged, normalized triangle edges.
        let mut entries = AllocVec::with_capacity(triangles.len() * 3);
        let mut degenerate = 0usize;
        for (face, tri) in triangles.iter().enumerate() {
            for (i, j) in [(0, 1), (1, 2), (2, 0)] {
                if tri[i] == tri[j] {
                    degenerate += 1;
                    continue;
                }
                entries.push(AdjacencyEntry { edge: Edge::new(tri[i], tri[j]), face });
            }
        }
        if degenerate > 0 {
            warn!(degenerate, "skipped collapsed triangle edges");
        }

        // 3. Sort, then 4. scan runs of equal edges.
        entries.sort_by_key(|e| e.edge);

        let mut edges = AllocVec::new();
        let mut adjacent = AllocVec::new();
        let mut non_manifold = 0usize;
        for run in entries.chunk_by(|x, y| x.edge == y.edge) {
            let shared = run[0].edge;
            edges.push(shared);
            if run.len() >= 2 && run[0].face != run[1].face {
                adjacent.push(AdjacentPair { first: run[0].face, second: run[1].face, shared });
            }
            if run.len() > 2 {
                non_manifold += 1;
            }
        }
        if non_manifold > 0 {
            warn!(non_manifold, "edges shared by more than two triangles; extra triangles not linked");
        }

        // 5. Diagonals between apex vertices.
        let mut diagonals = AllocVec::with_capacity(adjacent.len());
        for pair in &adjacent {
            let first = apex(&triangles[pair.first], pair.shared);
            let second = apex(&triangles[pair.second], pair.shared);
            match (first, second) {
                (Some(p), Some(q)) if p != q => diagonals.push(Diagonal::new(p, q)),
                _ => warn!(
                    first = pair.first,
                    second = pair.second,
                    "adjacent triangles have no distinct apexes; no diagonal"
                ),
            }
        }

        debug!(
            particles = positions.len(),
            edges = edges.len(),
            diagonals = diagonals.len(),
            "topology built"
        );

        Ok(Topology {
            positions,
            texcoords,
            normals,
            triangles,
            edges,
            diagonals,
            adjacent,
            vertex_remap,
        })
    }

    /// Re-index everything after particle storage was rebuilt.
    pub fn remap(&mut self, remap: &StorageRemap) {
        self.positions = remap.permute(&self.positions);
        self.texcoords = remap.permute(&self.texcoords);
        self.normals = remap.permute(&self.normals);
        for tri in self.triangles.iter_mut() {
            for v in tri.iter_mut() {
                *v = remap.new_index(*v);
            }
        }
        let remap_edge = |e: &mut Edge| *e = Edge::new(remap.new_index(e.a), remap.new_index(e.b));
        self.edges.iter_mut().for_each(remap_edge);
        self.diagonals.iter_mut().for_each(remap_edge);
        for pair in self.adjacent.iter_mut() {
            remap_edge(&mut pair.shared);
        }
        for v in self.vertex_remap.iter_mut() {
            *v = remap.new_index(*v);
        }
    }

    /// Positions at setup time, one per particle.
    pub fn rest_positions(&self) -> &[Vec3<F>] { &self.positions }
    pub fn texcoords(&self) -> &[Vec2<F>] { &self.texcoords }
    pub fn normals(&self) -> &[Vec3<F>] { &self.normals }
    pub fn triangles(&self) -> &[[usize; 3]] { &self.triangles }
    pub fn edges(&self) -> &[Edge] { &self.edges }
    pub fn diagonals(&self) -> &[Diagonal] { &self.diagonals }
    pub fn adjacent_pairs(&self) -> &[AdjacentPair] { &self.adjacent }
    /// Loaded vertex index to particle index.
    pub fn vertex_remap(&self) -> &[usize] { &self.vertex_remap }
    pub fn vertex_count(&self) -> usize { self.positions.len() }
}

fn validate<F: Float>(mesh: &SurfaceMesh<F>) -> Result<(), ClothError> {
    if mesh.indices.len() % 3 != 0 {
        return Err(ClothError::IncompleteTriangle { len: mesh.indices.len() });
    }
    let count = mesh.positions.len();
    if let Some((slot, &index)) = mesh.indices.iter().enumerate().find(|&(_, &i)| i >= count) {
        return Err(ClothError::VertexOutOfBounds { triangle: slot / 3, index, count });
    }
    if let Some(index) = mesh.positions.iter().position(|p| !p.is_finite()) {
        return Err(ClothError::NonFinitePosition { index });
    }
    Ok(())
}

/// The vertex of `tri` not on `shared`.
fn apex(tri: &[usize; 3], shared: Edge) -> Option<usize> {
    tri.iter().copied().find(|&v| !shared.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn quad() -> SurfaceMesh<f32> {
        // 0 --- 1
        // |   / |
        // 2 --- 3
        SurfaceMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            vec![0, 2, 1, 1, 2, 3],
        )
    }

    #[test]
    fn quad_has_five_edges_and_one_diagonal() {
        let topo = Topology::build(&quad()).unwrap();
        assert_eq!(topo.edges().len(), 5);
        assert_eq!(topo.diagonals(), &[Edge::new(0, 3)]);
        assert_eq!(topo.adjacent_pairs().len(), 1);
        assert_eq!(topo.adjacent_pairs()[0].shared, Edge::new(1, 2));
    }

    #[test]
    fn edges_are_sorted_and_unique() {
        let topo = Topology::build(&quad()).unwrap();
        let edges = topo.edges();
        for w in edges.windows(2) {
            assert!(w[0] < w[1]);
        }
        for e in edges {
            assert!(e.a < e.b);
        }
    }

    #[test]
    fn duplicated_positions_are_merged() {
        // Two triangles sharing an edge, loaded as six separate vertices.
        let mesh = SurfaceMesh::new(
            vec![
                Vec3::new(0.0f32, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
            ],
            vec![0, 1, 2, 3, 4, 5],
        );
        let topo = Topology::build(&mesh).unwrap();
        assert_eq!(topo.vertex_count(), 4);
        assert_eq!(topo.vertex_remap(), &[0, 1, 2, 2, 1, 3]);
        assert_eq!(topo.triangles(), &[[0, 1, 2], [2, 1, 3]]);
        assert_eq!(topo.edges().len(), 5);
        assert_eq!(topo.diagonals(), &[Edge::new(0, 3)]);
    }

    #[test]
    fn first_seen_attributes_survive_merge() {
        let mesh = SurfaceMesh::new(
            vec![Vec3::new(0.0f32, 0.0, 0.0), Vec3::new(-0.0, 0.0, 0.0)],
            vec![],
        )
        .with_texcoords(vec![Vec2::new(0.25, 0.5), Vec2::new(0.75, 0.5)]);
        let topo = Topology::build(&mesh).unwrap();
        assert_eq!(topo.vertex_count(), 1);
        assert_eq!(topo.texcoords(), &[Vec2::new(0.25, 0.5)]);
        assert_eq!(topo.normals(), &[Vec3::zero()]);
    }

    #[test]
    fn non_manifold_edge_links_first_pair_only() {
        // Three triangles fan around edge (0, 1).
        let mesh = SurfaceMesh::new(
            vec![
                Vec3::new(0.0f32, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.5, 1.0, 0.0),
                Vec3::new(0.5, -1.0, 0.0),
                Vec3::new(0.5, 0.0, 1.0),
            ],
            vec![0, 1, 2, 1, 0, 3, 0, 1, 4],
        );
        let topo = Topology::build(&mesh).unwrap();
        // (0,1) + two spokes for each of the three apexes.
        assert_eq!(topo.edges().len(), 7);
        assert_eq!(topo.adjacent_pairs().len(), 1);
        assert_eq!(topo.adjacent_pairs()[0].first, 0);
        assert_eq!(topo.adjacent_pairs()[0].second, 1);
        assert_eq!(topo.diagonals(), &[Edge::new(2, 3)]);
    }

    #[test]
    fn degenerate_triangle_edges_are_skipped() {
        let mesh = SurfaceMesh::new(
            vec![Vec3::new(0.0f32, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)],
            vec![0, 0, 1],
        );
        let topo = Topology::build(&mesh).unwrap();
        // (0,1) appears twice within the same collapsed triangle.
        assert_eq!(topo.edges(), &[Edge::new(0, 1)]);
        assert!(topo.adjacent_pairs().is_empty());
        assert!(topo.diagonals().is_empty());
    }

    #[test]
    fn rejects_out_of_bounds_index() {
        let mut mesh = quad();
        mesh.indices[4] = 9;
        assert_eq!(
            Topology::build(&mesh).unwrap_err(),
            ClothError::VertexOutOfBounds { triangle: 1, index: 9, count: 4 },
        );
    }

    #[test]
    fn rejects_partial_triangle() {
        let mut mesh = quad();
        mesh.indices.pop();
        assert_eq!(
            Topology::build(&mesh).unwrap_err(),
            ClothError::IncompleteTriangle { len: 5 },
        );
    }

    #[test]
    fn rejects_nan_position() {
        let mut mesh = quad();
        mesh.positions[3].y = f32::NAN;
        assert_eq!(
            Topology::build(&mesh).unwrap_err(),
            ClothError::NonFinitePosition { index: 3 },
        );
    }
}
