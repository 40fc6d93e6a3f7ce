//! Two-phase clocking contract.
//!
//! Every clocked component splits a cycle into two calls:
//! 1. **`update`:** Compute next-state and next outputs from the inputs written last
//!    cycle and the outputs committed last cycle. Internal arrays may change here.
//! 2. **`commit`:** Publish the computed outputs.
//!
//! The driver calls `update` on every component before any `commit`, so no component
//! can observe another's outputs from the same cycle.

/// A component advanced once per clock with separate compute and commit phases.
pub trait Clocked {
    /// Computes the next state and next output ports.
    fn update(&mut self);

    /// Makes the ports computed by `update` visible.
    fn commit(&mut self);
}
