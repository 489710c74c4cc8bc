//! Mass points with explicit velocity and Verlet-style displacement.

use crate::float::Float;
use crate::vec::Vec3;

/// A simulated mass point corresponding to one deduplicated mesh vertex.
#[derive(Clone, Debug)]
pub struct Particle<F: Float> {
    pub pos: Vec3<F>,
    pub prev_pos: Vec3<F>,
    pub velocity: Vec3<F>,
    /// Derived from force and mass on each integration.
    pub acceleration: Vec3<F>,
    pub force: Vec3<F>,
    mass: F,
    pinned: bool,
}

impl<F: Float> Particle<F> {
    /// Create a particle at rest. The caller guarantees `mass` is positive.
    pub fn new(pos: Vec3<F>, mass: F) -> Self {
        Particle {
            pos,
            prev_pos: pos,
            velocity: Vec3::zero(),
            acceleration: Vec3::zero(),
            force: Vec3::zero(),
            mass,
            pinned: false,
        }
    }

    pub fn mass(&self) -> F { self.mass }

    pub fn is_pinned(&self) -> bool { self.pinned }

    /// Pin the particle. Pinning is never undone.
    pub fn pin(&mut self) {
        self.pinned = true;
    }

    pub fn apply_force(&mut self, force: Vec3<F>) {
        self.force += force;
    }

    pub fn clear_force(&mut self) {
        self.force = Vec3::zero();
    }

    /// Advance one step.
    ///
    /// Velocity is integrated explicitly from force, while position advances by
    /// the previous-position difference plus the velocity term. Pinned particles
    /// are left untouched, force buffer included.
    pub fn integrate(&mut self, dt: F) {
        if self.pinned {
            return;
        }
        self.acceleration = self.force.scale(F::one() / self.mass);
        self.velocity += self.acceleration.scale(dt);
        let displacement = (self.pos - self.prev_pos) + self.velocity.scale(dt);
        self.prev_pos = self.pos;
        self.pos += displacement;
        self.clear_force();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_uses_hybrid_displacement() {
        let mut p = Particle::new(Vec3::new(0.0f64, 0.0, 0.0), 2.0);
        p.prev_pos = Vec3::new(-1.0, 0.0, 0.0);
        p.apply_force(Vec3::new(0.0, 4.0, 0.0));
        p.integrate(0.5);

        // a = (0, 2, 0), v = (0, 1, 0), displacement = (1, 0, 0) + (0, 0.5, 0)
        assert_eq!(p.acceleration, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(p.velocity, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(p.pos, Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(p.prev_pos, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(p.force, Vec3::zero());
    }

    #[test]
    fn pinned_particle_keeps_force_buffer() {
        let mut p = Particle::new(Vec3::new(1.0f32, 1.0, 1.0), 1.0);
        p.pin();
        p.apply_force(Vec3::new(10.0, 0.0, 0.0));
        p.integrate(1.0);
        assert_eq!(p.pos, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p.force, Vec3::new(10.0, 0.0, 0.0));
    }
}
