//! Gradient vector flow diffusion on pluggable accelerators.
//!
//! GVF spreads an edge-derived vector field into homogeneous regions
//! while keeping strong edge vectors in place, widening the capture range
//! of deformable models. [`EulerGvf`] runs a fixed number of explicit
//! Euler steps of
//!
//! ```text
//! v' = v + mu * lap(v) - (v - f) * |f|^2
//! ```
//!
//! against any [`Device`](gvf_device::Device). Per call it validates the
//! input, negotiates a storage format the device supports, picks one of
//! three [`strategy`] drivers, and returns the diffused field with its
//! [`SolveMetrics`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod euler;
pub mod events;
pub mod iterations;
pub mod metrics;
pub mod negotiate;
pub mod strategy;
pub mod validate;

pub use error::GvfError;
pub use euler::{EulerGvf, EulerGvfBuilder, SolveResult};
pub use events::SolverEvent;
pub use iterations::resolve_iterations;
pub use metrics::{SolveMetrics, StrategyKind, TransferKind};
pub use negotiate::{candidates, negotiate, Negotiated};
pub use strategy::{select_strategy, SolverStrategy};
pub use validate::validate;
