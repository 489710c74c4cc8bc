//! Step observer trait for monitoring cloth simulation progress.

/// Trait for observing the phases of a cloth step.
///
/// Implement this trait to time or visualize individual phases. Hooks are
/// called once per sub-mesh per phase, in step order. All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after forces were reset and gravity/wind accumulated.
    fn on_forces(&mut self) {}

    /// Called after spring forces were applied.
    fn on_springs(&mut self) {}

    /// Called after plane collision, friction and sphere collision ran.
    /// `rotating` is the contact state after the sphere pass.
    fn on_collisions(&mut self, _rotating: bool) {}

    /// Called after corner pinning ran (only when enabled).
    fn on_pinning(&mut self) {}

    /// Called after all particles have been integrated.
    fn on_integrate(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
