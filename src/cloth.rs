//! A single simulated cloth built from one triangulated sub-mesh.

use crate::collision::{self, Colliders, ContactState};
use crate::config::SimulationConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::force;
use crate::integrator;
use crate::mesh::SurfaceMesh;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::spring::SpringNetwork;
use crate::store::{ParticleStore, StorageRemap};
use crate::topology::Topology;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, trace};

/// Particles, topology and springs of one sub-mesh.
#[derive(Clone, Debug)]
pub struct Cloth<F: Float> {
    topology: Topology<F>,
    store: ParticleStore<F>,
    springs: SpringNetwork<F>,
}

impl<F: Float> Cloth<F> {
    /// Build topology, particles and springs from a loaded mesh.
    pub fn from_mesh(mesh: &SurfaceMesh<F>, config: &SimulationConfig<F>) -> Result<Self, ClothError> {
        let topology = Topology::build(mesh)?;
        let store = ParticleStore::from_positions(topology.rest_positions(), config.particle_mass)?;
        let springs = SpringNetwork::build(&topology, &store, config);
        Ok(Cloth { topology, store, springs })
    }

    /// Advance one step.
    ///
    /// Order: forces (gravity, optional wind), springs, plane collision,
    /// optional friction, optional sphere collision, optional pinning of
    /// `corners`, integration. Preconditions are checked before anything
    /// mutates, so a failed step leaves the cloth untouched.
    ///
    /// `contact` is shared by every cloth of a scene: a sphere contact in one
    /// sub-mesh enables friction in all of them.
    pub fn step<O: StepObserver>(
        &mut self,
        dt: F,
        config: &SimulationConfig<F>,
        colliders: &Colliders<F>,
        contact: &mut ContactState,
        corners: Option<(usize, usize)>,
        observer: &mut O,
    ) -> Result<(), ClothError> {
        self.springs.check_binding(&self.store)?;
        if let Some((first, second)) = corners {
            self.check_index(first)?;
            self.check_index(second)?;
        }
        let features = config.features;

        force::reset_and_accumulate(&mut self.store, config, features.wind);
        observer.on_forces();

        self.springs.apply_forces(&mut self.store)?;
        observer.on_springs();

        collision::collide_plane(&mut self.store, &colliders.plane, &config.contact);
        if features.friction {
            collision::apply_friction(&mut self.store, &colliders.sphere, config, contact);
        }
        if features.sphere_collision {
            collision::collide_sphere(&mut self.store, &colliders.sphere, &config.contact, contact);
        }
        observer.on_collisions(contact.rotating);

        if let Some((first, second)) = corners {
            self.store.pin(first)?;
            self.store.pin(second)?;
            observer.on_pinning();
        }

        integrator::integrate(&mut self.store, dt);
        observer.on_integrate();

        trace!(particles = self.store.len(), rotating = contact.rotating, "cloth stepped");
        Ok(())
    }

    /// Pin one particle. Pinned particles are never unpinned.
    pub fn pin(&mut self, index: usize) -> Result<(), ClothError> {
        self.store.pin(index)?;
        debug!(index, "particle pinned");
        Ok(())
    }

    /// Reallocate particle storage, then remap topology and relink springs.
    pub fn rebuild_storage(&mut self) -> StorageRemap {
        let remap = self.store.rebuild();
        self.relink(&remap);
        remap
    }

    /// Rebuild particle storage in a new order (`order[new] = old`), then
    /// remap topology and relink springs.
    pub fn reorder_storage(&mut self, order: &[usize]) -> Result<StorageRemap, ClothError> {
        let remap = self.store.reorder(order)?;
        self.relink(&remap);
        Ok(remap)
    }

    fn relink(&mut self, remap: &StorageRemap) {
        self.topology.remap(remap);
        self.springs.relink(&self.topology, remap);
    }

    pub(crate) fn check_index(&self, index: usize) -> Result<(), ClothError> {
        let count = self.store.len();
        if index < count {
            Ok(())
        } else {
            Err(ClothError::ParticleOutOfBounds { index, count })
        }
    }

    /// Current particle positions, for rendering.
    pub fn positions(&self) -> AllocVec<Vec3<F>> { self.store.positions() }
    pub fn particle(&self, index: usize) -> &Particle<F> { self.store.particle(index) }
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> { self.store.particle_mut(index) }
    pub fn particle_count(&self) -> usize { self.store.len() }
    pub fn store(&self) -> &ParticleStore<F> { &self.store }
    pub fn topology(&self) -> &Topology<F> { &self.topology }
    pub fn springs(&self) -> &SpringNetwork<F> { &self.springs }
}
