//! The explicit-Euler GVF solver.
//!
//! A call runs, in order:
//!
//! 1. [`validate`]: input shape and parameters, before any allocation
//! 2. [`negotiate`]: the working-buffer format for this device
//! 3. [`resolve_iterations`]: `Auto` becomes the longest grid axis
//! 4. [`select_strategy`]: planar, volumetric-direct, or volumetric-linear
//! 5. the strategy seeds, iterates, and materializes a fresh output
//!
//! The device is an explicit argument; the solver keeps no device state
//! between calls, so one `EulerGvf` can run against any number of devices.

use std::time::Instant;

use crossbeam_channel::Sender;
use gvf_core::{IterationCount, Precision, SolverParams, ValidationError, VectorField};
use gvf_device::Device;

use crate::error::GvfError;
use crate::events::{emit, SolverEvent};
use crate::iterations::resolve_iterations;
use crate::metrics::{micros_since, SolveMetrics};
use crate::negotiate::negotiate;
use crate::strategy::{select_strategy, Job};
use crate::validate::validate;

/// Diffused field plus the metrics of the call that produced it.
#[derive(Clone, Debug)]
pub struct SolveResult {
    /// Output with the input's extent, component count, and format.
    pub field: VectorField,
    /// What the call decided and how long it took.
    pub metrics: SolveMetrics,
}

/// Explicit-Euler gradient vector flow.
///
/// # Examples
///
/// ```
/// use gvf_core::{ElementType, Extent, VectorField};
/// use gvf_device::CpuDevice;
/// use gvf_solver::EulerGvf;
///
/// let extent = Extent::planar(8, 8).unwrap();
/// let input = VectorField::zeros(extent, 2, ElementType::Float32).unwrap();
/// let solver = EulerGvf::builder().mu(0.1).iterations(4).build().unwrap();
///
/// let result = solver.run(&CpuDevice::new(), &input).unwrap();
/// assert_eq!(result.field.extent(), extent);
/// assert_eq!(result.metrics.steps, 4);
/// ```
#[derive(Clone, Debug)]
pub struct EulerGvf {
    params: SolverParams,
    events: Option<Sender<SolverEvent>>,
}

impl EulerGvf {
    /// Start building a solver from the defaults.
    pub fn builder() -> EulerGvfBuilder {
        EulerGvfBuilder::default()
    }

    /// A solver with `params` and no event channel.
    ///
    /// # Errors
    ///
    /// Returns the first parameter invariant `params` violates.
    pub fn new(params: SolverParams) -> Result<Self, ValidationError> {
        params.validate()?;
        Ok(Self { params, events: None })
    }

    /// Full parameter record.
    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Regularization weight.
    pub fn mu(&self) -> f32 {
        self.params.mu
    }

    /// Requested iteration count, possibly `Auto`.
    pub fn iterations(&self) -> IterationCount {
        self.params.iterations
    }

    /// Preferred working-buffer precision.
    pub fn precision(&self) -> Precision {
        self.params.precision
    }

    /// Diffuse `input` on `device` into a freshly allocated field.
    ///
    /// `input` is never modified and never aliased by the output.
    ///
    /// # Errors
    ///
    /// - [`GvfError::Validation`] if `input` or the parameters violate a
    ///   precondition; nothing is allocated in that case
    /// - [`GvfError::UnsupportedConfiguration`] if the device supports no
    ///   candidate working format
    /// - [`GvfError::Device`] if an allocation or kernel fails
    pub fn run<D: Device>(&self, device: &D, input: &VectorField) -> Result<SolveResult, GvfError> {
        let start = Instant::now();
        validate(input, &self.params)?;

        let dims = input.dims();
        let precision = self.params.precision;
        let negotiated = negotiate(device, precision, dims)?;
        emit(
            self.events.as_ref(),
            SolverEvent::FormatSelected {
                dims,
                requested: precision,
                format: negotiated.format,
                fallback: negotiated.fallback,
            },
        );

        let extent = input.extent();
        let iterations = resolve_iterations(self.params.iterations, &extent);
        let strategy = select_strategy(dims, device);
        log::debug!(
            "GVF {extent}: {} strategy, {iterations} iterations, mu {}",
            strategy.kind(),
            self.params.mu
        );

        let job = Job {
            input,
            format: negotiated.format,
            iterations,
            mu: self.params.mu,
        };
        let outcome = strategy.solve(device, &job)?;

        let metrics = SolveMetrics {
            strategy: strategy.kind(),
            format: negotiated.format,
            fallback: negotiated.fallback,
            iterations,
            steps: outcome.steps,
            result_slot: outcome.result_slot,
            seed: outcome.seed,
            materialize: outcome.materialize,
            seed_us: outcome.seed_us,
            iterate_us: outcome.iterate_us,
            materialize_us: outcome.materialize_us,
            total_us: micros_since(start),
        };
        emit(
            self.events.as_ref(),
            SolverEvent::Completed {
                strategy: metrics.strategy,
                steps: metrics.steps,
                total_us: metrics.total_us,
            },
        );

        Ok(SolveResult {
            field: outcome.field,
            metrics,
        })
    }
}

impl Default for EulerGvf {
    fn default() -> Self {
        Self {
            params: SolverParams::default(),
            events: None,
        }
    }
}

/// Builder for [`EulerGvf`].
///
/// Defaults: `mu = 0.05`, `Auto` iterations, 16-bit storage preferred,
/// no event channel.
#[derive(Clone, Debug, Default)]
pub struct EulerGvfBuilder {
    params: SolverParams,
    events: Option<Sender<SolverEvent>>,
}

impl EulerGvfBuilder {
    /// Regularization weight, `0 < mu <= 0.2`.
    pub fn mu(mut self, mu: f32) -> Self {
        self.params.mu = mu;
        self
    }

    /// Run exactly `n` steps. Zero is rejected by [`build`](Self::build).
    pub fn iterations(mut self, n: u32) -> Self {
        self.params.iterations = IterationCount::Fixed(n);
        self
    }

    /// Run one step per cell along the longest grid axis.
    pub fn auto_iterations(mut self) -> Self {
        self.params.iterations = IterationCount::Auto;
        self
    }

    /// Preferred working-buffer precision.
    pub fn precision(mut self, precision: Precision) -> Self {
        self.params.precision = precision;
        self
    }

    /// Prefer 16-bit normalized storage.
    pub fn storage_16bit(self) -> Self {
        self.precision(Precision::Bits16)
    }

    /// Use 32-bit float storage.
    pub fn storage_32bit(self) -> Self {
        self.precision(Precision::Bits32)
    }

    /// Send [`SolverEvent`]s to `tx` during every call.
    pub fn events(mut self, tx: Sender<SolverEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Validate the parameters and build the solver.
    ///
    /// # Errors
    ///
    /// Returns the first parameter invariant violated.
    pub fn build(self) -> Result<EulerGvf, ValidationError> {
        self.params.validate()?;
        Ok(EulerGvf {
            params: self.params,
            events: self.events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gvf_core::ElementType;
    use gvf_device::CpuDevice;
    use gvf_test_utils::{constant_field, planar};

    #[test]
    fn builder_defaults_match_params_default() {
        let s = EulerGvf::builder().build().unwrap();
        assert_eq!(s.mu(), SolverParams::DEFAULT_MU);
        assert_eq!(s.iterations(), IterationCount::Auto);
        assert_eq!(s.precision(), Precision::Bits16);
    }

    #[test]
    fn builder_rejects_bad_mu() {
        assert_eq!(
            EulerGvf::builder().mu(0.0).build().unwrap_err(),
            ValidationError::MuOutOfRange { mu: 0.0 }
        );
        assert!(EulerGvf::builder().mu(0.25).build().is_err());
    }

    #[test]
    fn builder_rejects_zero_iterations_but_not_auto() {
        assert_eq!(
            EulerGvf::builder().iterations(0).build().unwrap_err(),
            ValidationError::ZeroIterations
        );
        let s = EulerGvf::builder().iterations(0).auto_iterations().build().unwrap();
        assert_eq!(s.iterations(), IterationCount::Auto);
    }

    #[test]
    fn new_validates() {
        let bad = SolverParams {
            mu: f32::NAN,
            ..SolverParams::default()
        };
        assert!(EulerGvf::new(bad).is_err());
        assert!(EulerGvf::new(SolverParams::default()).is_ok());
    }

    #[test]
    fn events_are_reported_in_order() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let solver = EulerGvf::builder().iterations(3).storage_32bit().events(tx).build().unwrap();
        let input = constant_field(planar(4, 4), ElementType::Float32, &[0.1, 0.2]);
        solver.run(&CpuDevice::new(), &input).unwrap();

        let events: Vec<SolverEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            SolverEvent::FormatSelected { fallback: false, .. }
        ));
        assert!(matches!(events[1], SolverEvent::Completed { steps: 3, .. }));
    }
}
