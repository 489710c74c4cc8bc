//! A scene of cloth sub-meshes sharing colliders and configuration.

use crate::cloth::Cloth;
use crate::collision::{Colliders, ContactState};
use crate::config::SimulationConfig;
use crate::error::ClothError;
use crate::float::Float;
use crate::mesh::SurfaceMesh;
use crate::observer::StepObserver;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
use tracing::debug;

/// Every sub-mesh of a loaded model, stepped together.
#[derive(Clone, Debug)]
pub struct Scene<F: Float> {
    cloths: AllocVec<Cloth<F>>,
    colliders: Colliders<F>,
    contact: ContactState,
}

impl<F: Float> Scene<F> {
    pub fn new(cloths: AllocVec<Cloth<F>>, colliders: Colliders<F>) -> Self {
        Scene { cloths, colliders, contact: ContactState::default() }
    }

    /// Build one cloth per sub-mesh with the default colliders.
    pub fn from_meshes(meshes: &[SurfaceMesh<F>], config: &SimulationConfig<F>) -> Result<Self, ClothError> {
        let cloths = meshes
            .iter()
            .map(|mesh| Cloth::from_mesh(mesh, config))
            .collect::<Result<AllocVec<_>, _>>()?;
        debug!(sub_meshes = cloths.len(), "scene built");
        Ok(Scene { cloths, colliders: Colliders::default(), contact: ContactState::default() })
    }

    pub fn with_colliders(mut self, colliders: Colliders<F>) -> Self {
        self.colliders = colliders;
        self
    }

    /// Advance every sub-mesh by `dt`.
    ///
    /// With corner pinning enabled, `config.corners` must be valid in every
    /// sub-mesh; otherwise nothing is stepped.
    ///
    /// The contact state is scene-wide. Friction in every sub-mesh sees the
    /// state from the start of the step; a sphere contact in any sub-mesh
    /// latches it for the next step.
    pub fn step<O: StepObserver>(
        &mut self,
        dt: F,
        config: &SimulationConfig<F>,
        observer: &mut O,
    ) -> Result<(), ClothError> {
        let corners = if config.features.corner_pinning {
            self.check_corners(config.corners)?;
            Some(config.corners)
        } else {
            None
        };
        for cloth in &self.cloths {
            cloth.springs().check_binding(cloth.store())?;
        }
        let start = self.contact;
        for cloth in self.cloths.iter_mut() {
            let mut contact = start;
            cloth.step(dt, config, &self.colliders, &mut contact, corners, observer)?;
            self.contact.rotating |= contact.rotating;
        }
        observer.on_step_complete();
        Ok(())
    }

    /// Advance by `config.time_step`.
    pub fn step_fixed<O: StepObserver>(
        &mut self,
        config: &SimulationConfig<F>,
        observer: &mut O,
    ) -> Result<(), ClothError> {
        self.step(config.time_step, config, observer)
    }

    /// Pin the particles at `first` and `second` in every sub-mesh.
    ///
    /// The same absolute indices are used for each sub-mesh. Both indices are
    /// validated against every sub-mesh before anything is pinned.
    pub fn pin_corners(&mut self, first: usize, second: usize) -> Result<(), ClothError> {
        self.check_corners((first, second))?;
        for cloth in self.cloths.iter_mut() {
            cloth.pin(first)?;
            cloth.pin(second)?;
        }
        Ok(())
    }

    fn check_corners(&self, (first, second): (usize, usize)) -> Result<(), ClothError> {
        for cloth in &self.cloths {
            cloth.check_index(first)?;
            cloth.check_index(second)?;
        }
        Ok(())
    }

    /// Current positions of every sub-mesh, for rendering.
    pub fn positions(&self) -> AllocVec<AllocVec<Vec3<F>>> {
        self.cloths.iter().map(|c| c.positions()).collect()
    }

    pub fn cloths(&self) -> &[Cloth<F>] { &self.cloths }
    pub fn cloths_mut(&mut self) -> &mut [Cloth<F>] { &mut self.cloths }
    pub fn cloth(&self, index: usize) -> &Cloth<F> { &self.cloths[index] }
    pub fn cloth_mut(&mut self, index: usize) -> &mut Cloth<F> { &mut self.cloths[index] }
    pub fn colliders(&self) -> &Colliders<F> { &self.colliders }
    pub fn colliders_mut(&mut self) -> &mut Colliders<F> { &mut self.colliders }
    pub fn contact_state(&self) -> ContactState { self.contact }
}
