//! Damped structural and bending springs built from mesh topology.

use crate::config::SimulationConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::store::{ParticleStore, StorageRemap};
use crate::topology::{Edge, Topology};
use crate::vec::{direction_epsilon, Vec3};
use alloc::vec::Vec as AllocVec;
use tracing::debug;

/// What a spring resists.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringKind {
    /// Along a mesh edge: stretch and compression.
    Structural,
    /// Across two adjacent triangles: folding.
    Bending,
}

/// Stable topology entry a spring was built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpringSource {
    Edge(usize),
    Diagonal(usize),
}

/// A damped spring between two particles, addressed by arena index.
#[derive(Clone, Debug)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    pub damping: F,
    pub kind: SpringKind,
    pub source: SpringSource,
}

impl<F: Float> Spring<F> {
    /// Create a spring whose rest length is the current endpoint distance.
    pub fn from_particles(
        edge: Edge,
        store: &ParticleStore<F>,
        stiffness: F,
        damping: F,
        kind: SpringKind,
        source: SpringSource,
    ) -> Self {
        let rest_length = store.particle(edge.a).pos.distance(store.particle(edge.b).pos);
        Spring { a: edge.a, b: edge.b, rest_length, stiffness, damping, kind, source }
    }

    /// Force on endpoint `a`; endpoint `b` receives the negation.
    ///
    /// `F = (k (L - rest) + c (dv . d)) d` with `d` the unit direction from
    /// `a` to `b`, so a stretched spring pulls `a` toward `b`. Coincident
    /// endpoints produce no force.
    pub fn force_on_a(&self, particles: &[Particle<F>]) -> Vec3<F> {
        let pa = &particles[self.a];
        let pb = &particles[self.b];
        let delta = pb.pos - pa.pos;
        let length = delta.length();
        if length.is_near_zero(direction_epsilon()) {
            return Vec3::zero();
        }
        let dir = delta.scale(F::one() / length);
        let relative_velocity = pb.velocity - pa.velocity;
        let magnitude = self.stiffness * (length - self.rest_length)
            + self.damping * relative_velocity.dot(dir);
        dir.scale(magnitude)
    }
}

/// Every spring of one cloth, bound to one particle storage generation.
#[derive(Clone, Debug)]
pub struct SpringNetwork<F: Float> {
    springs: AllocVec<Spring<F>>,
    generation: u32,
}

impl<F: Float> SpringNetwork<F> {
    /// One structural spring per edge, then one bending spring per diagonal.
    pub fn build(topology: &Topology<F>, store: &ParticleStore<F>, config: &SimulationConfig<F>) -> Self {
        let mut springs = AllocVec::with_capacity(topology.edges().len() + topology.diagonals().len());

        for (i, &edge) in topology.edges().iter().enumerate() {
            springs.push(Spring::from_particles(
                edge,
                store,
                config.structural_stiffness,
                config.damping,
                SpringKind::Structural,
                SpringSource::Edge(i),
            ));
        }

        for (i, &diagonal) in topology.diagonals().iter().enumerate() {
            springs.push(Spring::from_particles(
                diagonal,
                store,
                config.bending_stiffness,
                config.damping,
                SpringKind::Bending,
                SpringSource::Diagonal(i),
            ));
        }

        debug!(
            structural = topology.edges().len(),
            bending = topology.diagonals().len(),
            "spring network built"
        );

        SpringNetwork { springs, generation: store.generation() }
    }

    /// Add every spring's force into its endpoints' force buffers.
    ///
    /// Fails if the storage was rebuilt since the last `relink`.
    pub fn apply_forces(&self, store: &mut ParticleStore<F>) -> Result<(), ClothError> {
        self.check_binding(store)?;
        let particles = store.particles_mut();
        for spring in &self.springs {
            let force = spring.force_on_a(particles);
            particles[spring.a].apply_force(force);
            particles[spring.b].apply_force(-force);
        }
        Ok(())
    }

    /// Fails if `store` is not the generation these springs are bound to.
    pub fn check_binding(&self, store: &ParticleStore<F>) -> Result<(), ClothError> {
        if store.generation() != self.generation {
            return Err(ClothError::StaleBinding { bound: self.generation, current: store.generation() });
        }
        Ok(())
    }

    /// Re-read endpoints from the (already remapped) topology and bind to
    /// the remap's generation.
    pub fn relink(&mut self, topology: &Topology<F>, remap: &StorageRemap) {
        for spring in self.springs.iter_mut() {
            let edge = match spring.source {
                SpringSource::Edge(i) => topology.edges()[i],
                SpringSource::Diagonal(i) => topology.diagonals()[i],
            };
            spring.a = edge.a;
            spring.b = edge.b;
        }
        self.generation = remap.generation();
        debug!(generation = self.generation, springs = self.springs.len(), "springs relinked");
    }

    pub fn springs(&self) -> &[Spring<F>] { &self.springs }
    pub fn len(&self) -> usize { self.springs.len() }
    pub fn is_empty(&self) -> bool { self.springs.is_empty() }
    pub fn generation(&self) -> u32 { self.generation }

    pub fn structural_count(&self) -> usize {
        self.springs.iter().filter(|s| s.kind == SpringKind::Structural).count()
    }

    pub fn bending_count(&self) -> usize {
        self.springs.iter().filter(|s| s.kind == SpringKind::Bending).count()
    }
}
