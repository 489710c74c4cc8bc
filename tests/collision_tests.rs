use clothy::collision::{apply_friction, collide_plane, collide_sphere};
use clothy::{Colliders, ContactConfig, ContactState, ParticleStore, SimulationConfig, Vec3};

fn single(pos: Vec3<f32>, velocity: Vec3<f32>) -> ParticleStore<f32> {
    let mut store = ParticleStore::from_positions(&[pos], 1.0).unwrap();
    store.particle_mut(0).velocity = velocity;
    store
}

#[test]
fn plane_ignores_distant_particles() {
    let colliders = Colliders::<f32>::default();
    let pos = colliders.plane.point + Vec3::new(0.0, 2.0, 0.0);
    let velocity = Vec3::new(0.1, -1.0, 0.0);
    let mut store = single(pos, velocity);

    let touched = collide_plane(&mut store, &colliders.plane, &ContactConfig::default());
    assert_eq!(touched, 0);
    assert_eq!(store.particle(0).pos, pos);
    assert_eq!(store.particle(0).velocity, velocity);
}

#[test]
fn plane_stops_and_pushes_penetrating_particle() {
    let colliders = Colliders::<f32>::default();
    let pos = colliders.plane.point + Vec3::new(0.0, 0.01, 0.0);
    let mut store = single(pos, Vec3::new(0.0, -3.0, 0.5));

    let touched = collide_plane(&mut store, &colliders.plane, &ContactConfig::default());
    assert_eq!(touched, 1);
    let p = store.particle(0);
    assert_eq!(p.velocity, Vec3::zero());
    assert!((p.pos.y - (pos.y + 0.005)).abs() < 1e-5, "got {:?}", p.pos);
}

#[test]
fn plane_resting_band_zeroes_velocity() {
    let colliders = Colliders::<f32>::default();
    let pos = colliders.plane.point + Vec3::new(0.0, 1.0, 0.0);
    let mut store = single(pos, Vec3::new(4.0, -2.0, 1.0));

    collide_plane(&mut store, &colliders.plane, &ContactConfig::default());
    assert_eq!(store.particle(0).velocity, Vec3::zero());
    assert_eq!(store.particle(0).pos, pos);
}

#[test]
fn sphere_band_contact_pushes_outward() {
    let colliders = Colliders::<f32>::default();
    let pos = colliders.sphere.center + Vec3::new(0.0, 0.75, 0.0);
    let mut store = single(pos, Vec3::new(0.0, -1.0, 0.0));
    let mut state = ContactState::default();

    let touched = collide_sphere(&mut store, &colliders.sphere, &ContactConfig::default(), &mut state);
    assert_eq!(touched, 1);
    assert!(state.rotating);
    let distance = (store.particle(0).pos - colliders.sphere.center).length();
    assert!((distance - 0.755).abs() < 1e-5, "got {}", distance);
}

#[test]
fn sphere_ignores_distant_particles() {
    let colliders = Colliders::<f32>::default();
    let pos = colliders.sphere.center + Vec3::new(0.0, 5.0, 0.0);
    let velocity = Vec3::new(0.0, -1.0, 0.0);
    let mut store = single(pos, velocity);
    let mut state = ContactState::default();

    let touched = collide_sphere(&mut store, &colliders.sphere, &ContactConfig::default(), &mut state);
    assert_eq!(touched, 0);
    assert!(!state.rotating);
    assert_eq!(store.particle(0).pos, pos);
    assert_eq!(store.particle(0).velocity, velocity);
}

#[test]
fn friction_waits_for_first_sphere_contact() {
    let colliders = Colliders::<f32>::default();
    let config = SimulationConfig::new();
    // Close to the equator of the ball, where the static limit is small.
    let pos = colliders.sphere.center + Vec3::new(1.0, -0.2, 0.0);
    let mut store = single(pos, Vec3::zero());

    apply_friction(&mut store, &colliders.sphere, &config, &ContactState::default());
    assert_eq!(store.particle(0).velocity, Vec3::zero());

    apply_friction(&mut store, &colliders.sphere, &config, &ContactState { rotating: true });
    let v = store.particle(0).velocity;
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 0.0);
    assert!(v.z != 0.0, "tangent impulse expected, got {:?}", v);
}
