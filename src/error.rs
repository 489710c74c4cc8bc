//! Error types for cloth setup and export.

use thiserror::Error;

/// Errors that can occur while building or exporting a cloth.
///
/// Numeric hazards during a step (zero-length springs, contact directions or
/// tangents) are guarded in place and never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClothError {
    /// The triangle index list does not hold whole triangles.
    #[error("triangle index list has {len} entries, not a multiple of 3")]
    IncompleteTriangle { len: usize },
    /// A triangle references a vertex outside the position array.
    #[error("triangle {triangle} references vertex {index} (vertex count: {count})")]
    VertexOutOfBounds { triangle: usize, index: usize, count: usize },
    /// A loaded vertex position is NaN or infinite.
    #[error("vertex {index} has a non-finite position")]
    NonFinitePosition { index: usize },
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Particle index is out of bounds.
    #[error("particle index {index} out of bounds (count: {count})")]
    ParticleOutOfBounds { index: usize, count: usize },
    /// A storage reorder was not a permutation of the particle indices.
    #[error("storage order is not a permutation of {count} particles")]
    InvalidPermutation { count: usize },
    /// Springs are bound to an older particle storage and must be relinked.
    #[error("springs bound to storage generation {bound}, storage is at {current}")]
    StaleBinding { bound: u32, current: u32 },
    /// Exported mesh text could not be parsed.
    #[error("malformed export at line {line}: {reason}")]
    MalformedExport { line: usize, reason: &'static str },
}
