//! Plane and sphere collision response, and friction against the sphere.
//!
//! Distances are measured from the collider's anchor point (plane point or
//! sphere center) to each particle, and the contact normal is recomputed per
//! particle as the direction from the anchor to the particle.

use crate::config::{ContactConfig, SimulationConfig};
use crate::float::Float;
use crate::particle::Particle;
use crate::store::ParticleStore;
use crate::vec::{direction_epsilon, Vec3};

/// Static plane collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane<F: Float> {
    pub point: Vec3<F>,
    /// Reported to callers (e.g. for drawing). The response uses the local
    /// per-particle normal instead.
    pub normal: Vec3<F>,
}

impl<F: Float> Plane<F> {
    pub fn new(point: Vec3<F>, normal: Vec3<F>) -> Self {
        Plane { point, normal }
    }
}

/// Static sphere collider.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sphere<F: Float> {
    pub center: Vec3<F>,
    /// Reported to callers. Contact bands come from `ContactConfig`.
    pub radius: F,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Self {
        Sphere { center, radius }
    }
}

/// The static colliders of a scene.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Colliders<F: Float> {
    pub plane: Plane<F>,
    pub sphere: Sphere<F>,
}

impl<F: Float> Default for Colliders<F> {
    /// Floor anchored at (-5, -10.5, 5) and a ball centered at (0, -9.5, 0).
    fn default() -> Self {
        Colliders {
            plane: Plane::new(Vec3::from_f32(-5.0, -10.5, 5.0), Vec3::from_f32(0.0, 1.0, 0.0)),
            sphere: Sphere::new(Vec3::from_f32(0.0, -9.5, 0.0), F::from_f32(0.8)),
        }
    }
}

/// Contact state carried across steps.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactState {
    /// Set by the first sphere contact and never cleared. Enables friction.
    pub rotating: bool,
}

/// A particle measured against a collider anchor.
struct Contact<F: Float> {
    distance: F,
    /// Unit direction from the anchor to the particle, zero if they coincide.
    normal: Vec3<F>,
    /// Velocity after the restitution/tangential blend.
    blended: Vec3<F>,
}

impl<F: Float> Contact<F> {
    fn measure(p: &Particle<F>, anchor: Vec3<F>, contact: &ContactConfig<F>) -> Self {
        let offset = p.pos - anchor;
        let distance = offset.length();
        let normal = if distance.is_near_zero(direction_epsilon()) {
            Vec3::zero()
        } else {
            offset.scale(F::one() / distance)
        };

        let v = p.velocity;
        let vn = normal.scale(v.dot(normal));
        // Tangential part subtracts the normal itself, not the projection.
        let vt = v - normal;
        let vt_len = vt.length();
        let ratio = if vt_len.is_near_zero(direction_epsilon()) {
            F::zero()
        } else {
            vn.length() / vt_len
        };
        let a = (F::one() - contact.tangential_damping * contact.restitution_factor * ratio).max(F::zero());
        let blended = vn.scale(contact.normal_response) + vt.scale(a);

        Contact { distance, normal, blended }
    }
}

/// Resolve every particle against `plane`. Returns the number of particles
/// inside any response band.
///
/// - `contact_min <= d <= contact_max`: velocity zeroed.
/// - `d < contact_min`: velocity zeroed and the particle pushed outward.
pub fn collide_plane<F: Float>(
    store: &mut ParticleStore<F>,
    plane: &Plane<F>,
    contact: &ContactConfig<F>,
) -> usize {
    let mut touched = 0;
    for p in store.iter_mut() {
        let c = Contact::measure(p, plane.point, contact);
        if c.distance >= contact.plane_contact_min && c.distance <= contact.plane_contact_max {
            // The blended response is computed but discarded in this band.
            p.velocity = c.blended;
            p.velocity = Vec3::zero();
            touched += 1;
        } else if c.distance < contact.plane_contact_min {
            p.velocity = Vec3::zero();
            p.pos += c.normal.scale(contact.push_distance);
            touched += 1;
        }
    }
    touched
}

/// Resolve every particle against `sphere`. Particles within either contact
/// band take the blended velocity and are pushed outward; any contact sets
/// `state.rotating`. Returns the number of particles in contact.
pub fn collide_sphere<F: Float>(
    store: &mut ParticleStore<F>,
    sphere: &Sphere<F>,
    contact: &ContactConfig<F>,
    state: &mut ContactState,
) -> usize {
    let mut touched = 0;
    for p in store.iter_mut() {
        let c = Contact::measure(p, sphere.center, contact);
        let outer_band = c.distance > contact.sphere_middle && c.distance < contact.sphere_outer;
        let inner_band = c.distance > contact.sphere_inner && c.distance <= contact.sphere_middle;
        if outer_band || inner_band {
            p.velocity = c.blended;
            state.rotating = true;
            p.pos += c.normal.scale(contact.push_distance);
            touched += 1;
        }
    }
    touched
}

/// Dynamic friction impulse against the sphere, active only while
/// `state.rotating` is set.
///
/// The friction demand is the constant `ball_acceleration`. When it exceeds
/// `static_friction * |g cos(theta)|` and the particle is within
/// `friction_range` of the center, velocity gains
/// `dynamic_friction * |g cos(theta)| * friction_impulse_scale` along the
/// tangent `(pos - center) x g`. The impulse is not scaled by the time step.
pub fn apply_friction<F: Float>(
    store: &mut ParticleStore<F>,
    sphere: &Sphere<F>,
    config: &SimulationConfig<F>,
    state: &ContactState,
) {
    if !state.rotating {
        return;
    }
    let down = Vec3::from_f32(0.0, -1.0, 0.0);
    for p in store.iter_mut() {
        let offset = p.pos - sphere.center;
        let distance = offset.length();
        let cos_theta = offset.normalize().dot(down);
        let target = config.gravity.scale(cos_theta).length();
        let max_static = config.static_friction * target;
        let tangent = offset.cross(config.gravity).normalize();

        let current = config.ball_acceleration;
        if current > max_static && distance < config.friction_range {
            let impulse = config.dynamic_friction * target * config.friction_impulse_scale;
            p.velocity += tangent.scale(impulse);
        }
    }
}
