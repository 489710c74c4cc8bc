//! Fixed-size particle arena with generation tracking.

use crate::error::ClothError;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Index mapping produced when particle storage is rebuilt.
///
/// Anything holding particle indices (topology, springs) must be passed
/// through the remap before touching the rebuilt storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageRemap {
    /// `order[new] = old`
    order: AllocVec<usize>,
    /// `old_to_new[old] = new`
    old_to_new: AllocVec<usize>,
    generation: u32,
}

impl StorageRemap {
    fn from_order(order: AllocVec<usize>, generation: u32) -> Self {
        let mut old_to_new = alloc::vec![0; order.len()];
        for (new, &old) in order.iter().enumerate() {
            old_to_new[old] = new;
        }
        StorageRemap { order, old_to_new, generation }
    }

    /// New index of the particle previously stored at `old`.
    pub fn new_index(&self, old: usize) -> usize {
        self.old_to_new[old]
    }

    /// Storage generation this remap leads to.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.order.iter().enumerate().all(|(new, &old)| new == old)
    }

    /// Reorder per-particle data from the old layout into the new one.
    pub fn permute<T: Clone>(&self, items: &[T]) -> AllocVec<T> {
        self.order.iter().map(|&old| items[old].clone()).collect()
    }
}

/// Owns every particle of one cloth.
///
/// The particle count is fixed at construction. Storage may be reallocated or
/// reordered, which bumps the generation.
#[derive(Clone, Debug)]
pub struct ParticleStore<F: Float> {
    particles: AllocVec<Particle<F>>,
    generation: u32,
}

impl<F: Float> ParticleStore<F> {
    /// Create one resting particle of `mass` per position.
    pub fn from_positions(positions: &[Vec3<F>], mass: F) -> Result<Self, ClothError> {
        if !(mass > F::zero()) || !mass.is_finite() {
            return Err(ClothError::InvalidMass);
        }
        let particles = positions.iter().map(|&pos| Particle::new(pos, mass)).collect();
        Ok(ParticleStore { particles, generation: 0 })
    }

    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
    pub fn generation(&self) -> u32 { self.generation }

    pub fn particle(&self, index: usize) -> &Particle<F> { &self.particles[index] }
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> { &mut self.particles[index] }
    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn particles_mut(&mut self) -> &mut [Particle<F>] { &mut self.particles }

    pub fn iter(&self) -> core::slice::Iter<'_, Particle<F>> { self.particles.iter() }
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Particle<F>> { self.particles.iter_mut() }

    /// Current positions, in storage order.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.particles.iter().map(|p| p.pos).collect()
    }

    /// Pin the particle at `index`.
    pub fn pin(&mut self, index: usize) -> Result<(), ClothError> {
        let count = self.particles.len();
        let particle = self
            .particles
            .get_mut(index)
            .ok_or(ClothError::ParticleOutOfBounds { index, count })?;
        particle.pin();
        Ok(())
    }

    /// Reallocate storage in place order. Indices are unchanged but any
    /// binding to the previous generation is invalidated.
    pub fn rebuild(&mut self) -> StorageRemap {
        let order = (0..self.particles.len()).collect();
        self.apply_order(order)
    }

    /// Rebuild storage in a new order, where `order[new] = old`.
    pub fn reorder(&mut self, order: &[usize]) -> Result<StorageRemap, ClothError> {
        let count = self.particles.len();
        let mut seen = alloc::vec![false; count];
        if order.len() != count {
            return Err(ClothError::InvalidPermutation { count });
        }
        for &old in order {
            if old >= count || seen[old] {
                return Err(ClothError::InvalidPermutation { count });
            }
            seen[old] = true;
        }
        Ok(self.apply_order(order.to_vec()))
    }

    fn apply_order(&mut self, order: AllocVec<usize>) -> StorageRemap {
        let mut rebuilt = AllocVec::with_capacity(self.particles.len());
        rebuilt.extend(order.iter().map(|&old| self.particles[old].clone()));
        self.particles = rebuilt;
        self.generation = self.generation.wrapping_add(1);
        StorageRemap::from_order(order, self.generation)
    }
}
