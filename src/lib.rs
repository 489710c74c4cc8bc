//! Mass-spring cloth simulation over triangulated meshes.
//!
//! `clothy` turns a triangle soup into a network of damped springs and steps
//! it with an explicit-velocity, Verlet-displacement integrator. Collision
//! response covers a floor plane and a ball, with friction against the ball.
//!
//! # Features
//!
//! - **Topology extraction**: vertex deduplication, unique edges and bending
//!   diagonals from an unstructured triangle list
//! - **Spring network**: structural and bending springs addressed by stable
//!   particle indices, relinked when storage is rebuilt
//! - **Forces**: gravity and optional wind
//! - **Collisions**: banded plane and sphere response, friction, corner pinning
//! - **Export**: plain-text mesh dump and reader
//! - **Observable**: Monitor step phases via the `StepObserver` trait
//! - **`no_std` compatible**: Needs only `alloc`

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod particle;
pub mod store;
pub mod mesh;
pub mod topology;
pub mod spring;
pub mod force;
pub mod integrator;
pub mod collision;
pub mod cloth;
pub mod scene;
pub mod export;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec2, Vec3};
pub use particle::Particle;
pub use store::{ParticleStore, StorageRemap};
pub use mesh::SurfaceMesh;
pub use topology::{AdjacentPair, Diagonal, Edge, Topology};
pub use spring::{Spring, SpringKind, SpringNetwork, SpringSource};
pub use collision::{Colliders, ContactState, Plane, Sphere};
pub use cloth::Cloth;
pub use scene::Scene;
pub use export::{ExportedMesh, FaceRecord};
pub use config::{ContactConfig, Features, SimulationConfig};
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::ClothError;
