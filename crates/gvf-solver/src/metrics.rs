//! Per-call metrics for the GVF solver.
//!
//! [`SolveMetrics`] records what a call decided (strategy, format,
//! iteration count) and how long each phase took, for telemetry and for
//! tests that check scheduling decisions.

use std::fmt;
use std::time::Instant;

use gvf_arena::Slot;
use gvf_core::StorageFormat;

/// Which solver driver ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Addressable planar surfaces.
    Planar,
    /// Addressable volumetric surfaces written directly by the step kernel.
    VolumetricDirect,
    /// Flat buffers with init, iterate, and finish stages.
    VolumetricLinear,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planar => write!(f, "planar"),
            Self::VolumetricDirect => write!(f, "volumetric-direct"),
            Self::VolumetricLinear => write!(f, "volumetric-linear"),
        }
    }
}

/// How data moved between the caller's field and the working buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransferKind {
    /// Raw copy; formats matched exactly.
    Copy,
    /// Elementwise conversion pass.
    Convert,
}

/// Decisions and timings for one solver call.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveMetrics {
    /// Driver that ran.
    pub strategy: StrategyKind,
    /// Negotiated working-buffer format.
    pub format: StorageFormat,
    /// True if the preferred precision was unavailable.
    pub fallback: bool,
    /// Resolved iteration count.
    pub iterations: u32,
    /// Steps actually committed.
    pub steps: u32,
    /// Working-buffer slot the output was materialized from.
    pub result_slot: Slot,
    /// How the seed buffer was filled.
    pub seed: TransferKind,
    /// How the output field was filled.
    pub materialize: TransferKind,
    /// Allocation and seeding.
    pub seed_us: u64,
    /// The iteration loop.
    pub iterate_us: u64,
    /// Materialization into the output field.
    pub materialize_us: u64,
    /// Whole call, validation included.
    pub total_us: u64,
}

pub(crate) fn micros_since(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_display() {
        assert_eq!(StrategyKind::Planar.to_string(), "planar");
        assert_eq!(StrategyKind::VolumetricDirect.to_string(), "volumetric-direct");
        assert_eq!(StrategyKind::VolumetricLinear.to_string(), "volumetric-linear");
    }
}
