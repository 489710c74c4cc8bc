//! Advances particle kinematics from accumulated force.

use crate::float::Float;
use crate::store::ParticleStore;

/// Integrate every non-pinned particle by `dt` and clear its force.
///
/// Velocity gets an explicit Euler update from `force / mass`; position moves
/// by `(pos - prev_pos) + velocity * dt`. Pinned particles are skipped, so
/// their force buffers keep whatever was accumulated this step.
pub fn integrate<F: Float>(store: &mut ParticleStore<F>, dt: F) {
    for p in store.iter_mut() {
        p.integrate(dt);
    }
}
