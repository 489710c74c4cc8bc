//! External forces: gravity and wind.

use crate::config::SimulationConfig;
use crate::float::Float;
use crate::store::ParticleStore;

/// Zero every force buffer.
pub fn reset<F: Float>(store: &mut ParticleStore<F>) {
    for p in store.iter_mut() {
        p.clear_force();
    }
}

/// Add `mass * gravity * gravity_scale` to every particle.
pub fn apply_gravity<F: Float>(store: &mut ParticleStore<F>, config: &SimulationConfig<F>) {
    let g = config.gravity.scale(config.gravity_scale);
    for p in store.iter_mut() {
        let force = g.scale(p.mass());
        p.apply_force(force);
    }
}

/// Add `wind * mass * wind_scale` to every particle.
pub fn apply_wind<F: Float>(store: &mut ParticleStore<F>, config: &SimulationConfig<F>) {
    for p in store.iter_mut() {
        let force = config.wind.scale(p.mass() * config.wind_scale);
        p.apply_force(force);
    }
}

/// Start a step: clear forces, then accumulate gravity and optionally wind.
/// Spring forces are added afterwards by the spring network.
pub fn reset_and_accumulate<F: Float>(
    store: &mut ParticleStore<F>,
    config: &SimulationConfig<F>,
    wind_enabled: bool,
) {
    reset(store);
    if wind_enabled {
        apply_wind(store, config);
    }
    apply_gravity(store, config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec::Vec3;

    fn store() -> ParticleStore<f64> {
        ParticleStore::from_positions(&[Vec3::zero(), Vec3::new(1.0, 0.0, 0.0)], 2.0).unwrap()
    }

    #[test]
    fn gravity_scales_with_mass() {
        let mut s = store();
        let config = SimulationConfig::new()
            .with_gravity(Vec3::new(0.0, -1.0, 0.0))
            .with_gravity_scale(3.0);
        reset_and_accumulate(&mut s, &config, false);
        assert_eq!(s.particle(0).force, Vec3::new(0.0, -6.0, 0.0));
    }

    #[test]
    fn wind_only_when_enabled() {
        let config = SimulationConfig::new()
            .with_gravity(Vec3::zero())
            .with_wind_vector(Vec3::new(1.0, 0.0, 0.0), 2.5);
        let mut s = store();
        reset_and_accumulate(&mut s, &config, false);
        assert_eq!(s.particle(1).force, Vec3::zero());
        reset_and_accumulate(&mut s, &config, true);
        assert_eq!(s.particle(1).force, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn reset_discards_previous_forces() {
        let mut s = store();
        s.particle_mut(0).apply_force(Vec3::new(100.0, 0.0, 0.0));
        s.particle_mut(0).pin();
        let config = SimulationConfig::new().with_gravity(Vec3::zero());
        reset_and_accumulate(&mut s, &config, false);
        assert_eq!(s.particle(0).force, Vec3::zero());
    }
}
