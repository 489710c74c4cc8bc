//! Configuration types for the cloth simulation.

use crate::float::Float;
use crate::vec::Vec3;

/// Optional simulation steps. Disabled steps are skipped entirely.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Features {
    pub wind: bool,
    pub friction: bool,
    pub sphere_collision: bool,
    pub corner_pinning: bool,
}

/// Collision band thresholds and response constants.
///
/// All distances are measured from the collider's anchor point (plane point or
/// sphere center) to the particle.
#[derive(Clone, Debug)]
pub struct ContactConfig<F: Float> {
    /// Plane: below this distance a particle is pushed out. Default: 0.025.
    pub plane_contact_min: F,
    /// Plane: upper edge of the resting band. Default: 1.55.
    pub plane_contact_max: F,
    /// Sphere: lower edge of the inner band (exclusive). Default: 0.7.
    pub sphere_inner: F,
    /// Sphere: boundary between the inner and outer bands. Default: 0.725.
    pub sphere_middle: F,
    /// Sphere: upper edge of the outer band (exclusive). Default: 0.775.
    pub sphere_outer: F,
    /// Outward displacement applied on contact. Default: 0.005.
    pub push_distance: F,
    /// Tangential damping factor in the velocity blend. Default: 0.3.
    pub tangential_damping: F,
    /// Multiplier on the normal-to-tangential ratio. Default: 1.2.
    pub restitution_factor: F,
    /// Scale applied to the reflected normal velocity. Default: -0.2.
    pub normal_response: F,
}

impl<F: Float> Default for ContactConfig<F> {
    fn default() -> Self {
        ContactConfig {
            plane_contact_min: F::from_f32(0.025),
            plane_contact_max: F::from_f32(1.55),
            sphere_inner: F::from_f32(0.7),
            sphere_middle: F::from_f32(0.725),
            sphere_outer: F::from_f32(0.775),
            push_distance: F::from_f32(0.005),
            tangential_damping: F::from_f32(0.3),
            restitution_factor: F::from_f32(1.2),
            normal_response: F::from_f32(-0.2),
        }
    }
}

/// Configuration for the cloth simulation, passed into every step.
///
/// # Builder Pattern
/// ```
/// use clothy::config::SimulationConfig;
/// use clothy::vec::Vec3;
///
/// let config: SimulationConfig<f32> = SimulationConfig::new()
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_stiffness(800.0, 300.0)
///     .with_wind(true)
///     .with_time_step(1.0 / 600.0);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationConfig<F: Float> {
    /// Gravity vector. Default: (0, -0.98, 0).
    pub gravity: Vec3<F>,
    /// Multiplier applied to gravity force. Default: 20.
    pub gravity_scale: F,
    /// Wind vector. Default: (0, 10, 0).
    pub wind: Vec3<F>,
    /// Multiplier applied to wind force. Default: 2.5.
    pub wind_scale: F,
    /// Stiffness of springs along mesh edges (`Ks`). Default: 1000.
    pub structural_stiffness: F,
    /// Stiffness of springs across adjacent triangles (`Kb`). Default: 400.
    pub bending_stiffness: F,
    /// Damping shared by every spring (`Kd`). Default: 1.
    pub damping: F,
    /// Mass given to every particle at setup. Default: 1.
    pub particle_mass: F,
    /// Static friction coefficient. Default: 0.6.
    pub static_friction: F,
    /// Dynamic friction coefficient. Default: 0.3.
    pub dynamic_friction: F,
    /// Constant friction demand compared against static friction. Default: 0.2.
    pub ball_acceleration: F,
    /// Friction only acts within this distance of the sphere. Default: 7.5.
    pub friction_range: F,
    /// Multiplier on the dynamic friction impulse. Default: 7.5.
    pub friction_impulse_scale: F,
    /// Integration time step used by `Scene::step_fixed`. Default: 0.0016.
    pub time_step: F,
    /// Particle indices pinned by corner pinning. Default: (100, 120).
    pub corners: (usize, usize),
    /// Optional steps. Default: all off.
    pub features: Features,
    pub contact: ContactConfig<F>,
}

impl<F: Float> SimulationConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimulationConfig {
            gravity: Vec3::from_f32(0.0, -0.98, 0.0),
            gravity_scale: F::from_f32(20.0),
            wind: Vec3::from_f32(0.0, 10.0, 0.0),
            wind_scale: F::from_f32(2.5),
            structural_stiffness: F::from_f32(1000.0),
            bending_stiffness: F::from_f32(400.0),
            damping: F::one(),
            particle_mass: F::one(),
            static_friction: F::from_f32(0.6),
            dynamic_friction: F::from_f32(0.3),
            ball_acceleration: F::from_f32(0.2),
            friction_range: F::from_f32(7.5),
            friction_impulse_scale: F::from_f32(7.5),
            time_step: F::from_f32(0.0016),
            corners: (100, 120),
            features: Features::default(),
            contact: ContactConfig::default(),
        }
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_gravity_scale(mut self, scale: F) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set the wind vector and its scale.
    pub fn with_wind_vector(mut self, wind: Vec3<F>, scale: F) -> Self {
        self.wind = wind;
        self.wind_scale = scale;
        self
    }

    /// Set structural and bending stiffness.
    pub fn with_stiffness(mut self, structural: F, bending: F) -> Self {
        self.structural_stiffness = structural;
        self.bending_stiffness = bending;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_particle_mass(mut self, mass: F) -> Self {
        self.particle_mass = mass;
        self
    }

    /// Set static and dynamic friction coefficients.
    pub fn with_friction(mut self, static_coeff: F, dynamic_coeff: F) -> Self {
        self.static_friction = static_coeff;
        self.dynamic_friction = dynamic_coeff;
        self
    }

    pub fn with_time_step(mut self, dt: F) -> Self {
        self.time_step = dt;
        self
    }

    /// Set the two particle indices pinned by corner pinning.
    pub fn with_corners(mut self, first: usize, second: usize) -> Self {
        self.corners = (first, second);
        self
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_wind(mut self, enabled: bool) -> Self {
        self.features.wind = enabled;
        self
    }

    pub fn with_friction_enabled(mut self, enabled: bool) -> Self {
        self.features.friction = enabled;
        self
    }

    pub fn with_sphere_collision(mut self, enabled: bool) -> Self {
        self.features.sphere_collision = enabled;
        self
    }

    pub fn with_corner_pinning(mut self, enabled: bool) -> Self {
        self.features.corner_pinning = enabled;
        self
    }

    pub fn with_contact(mut self, contact: ContactConfig<F>) -> Self {
        self.contact = contact;
        self
    }
}

impl<F: Float> Default for SimulationConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
