//! Solver drivers and the factory that picks one.
//!
//! | Strategy | Chosen when | Working storage |
//! |----------|-------------|-----------------|
//! | [`Planar`] | 2D input | two planar surfaces |
//! | [`VolumetricDirect`] | 3D input, device writes volumes | two volumetric surfaces |
//! | [`VolumetricLinear`] | 3D input, no volume writes | two flat 3-component buffers |
//!
//! Every driver allocates a working pair in the negotiated format, seeds
//! the first buffer from the input, runs the step kernel through a
//! [`PingPong`](gvf_arena::PingPong) schedule, and materializes the
//! buffer holding the last result into a fresh output field. Working
//! buffers are leases and are released when the driver returns, on
//! success or failure.

mod linearized;
mod planar;
mod surface;
mod volumetric;

pub use linearized::VolumetricLinear;
pub use planar::Planar;
pub use volumetric::VolumetricDirect;

use std::fmt;

use gvf_arena::Slot;
use gvf_core::{Dimensionality, StorageFormat, VectorField};
use gvf_device::{Capabilities, Device};

use crate::error::GvfError;
use crate::metrics::{StrategyKind, TransferKind};

/// Inputs to one driver run, already validated and resolved.
#[derive(Clone, Copy, Debug)]
pub struct Job<'a> {
    /// Read-only input; also the edge term of every step.
    pub input: &'a VectorField,
    /// Negotiated working-buffer format.
    pub format: StorageFormat,
    /// Resolved step count.
    pub iterations: u32,
    /// Regularization weight.
    pub mu: f32,
}

/// What a driver produced, plus what it observed while doing so.
#[derive(Clone, Debug)]
pub struct Outcome {
    /// Freshly allocated output with the input's shape and format.
    pub field: VectorField,
    /// Steps committed.
    pub steps: u32,
    /// Slot the output was read from.
    pub result_slot: Slot,
    /// How the seed buffer was filled.
    pub seed: TransferKind,
    /// How the output was filled.
    pub materialize: TransferKind,
    /// Allocation and seeding, in microseconds.
    pub seed_us: u64,
    /// Iteration loop, in microseconds.
    pub iterate_us: u64,
    /// Materialization, in microseconds.
    pub materialize_us: u64,
}

/// One way of running the GVF iteration on a device.
pub trait SolverStrategy: fmt::Debug + Send + Sync {
    /// Which driver this is.
    fn kind(&self) -> StrategyKind;

    /// Seed, iterate, and materialize.
    ///
    /// # Errors
    ///
    /// [`GvfError::Device`] if an allocation or kernel fails. All working
    /// storage is released before the error is returned.
    fn solve(&self, device: &dyn Device, job: &Job<'_>) -> Result<Outcome, GvfError>;
}

/// Pick the driver for a `dims` grid on a device with `caps`.
pub fn select_strategy<C>(dims: Dimensionality, caps: &C) -> Box<dyn SolverStrategy>
where
    C: Capabilities + ?Sized,
{
    match dims {
        Dimensionality::Two => Box::new(Planar),
        Dimensionality::Three if caps.supports_direct_volume_write() => Box::new(VolumetricDirect),
        Dimensionality::Three => Box::new(VolumetricLinear),
    }
}
