//! GVF: gradient vector flow diffusion for deformable-model fitting.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the GVF sub-crates. For most users, adding `gvf` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gvf::prelude::*;
//!
//! // A 32x32 edge map with a single strong edge vector in the middle.
//! let extent = Extent::planar(32, 32).unwrap();
//! let mut edges = VectorField::zeros(extent, 2, ElementType::Float32).unwrap();
//! edges.set_vector(extent.index(16, 16, 0), &[0.6, 0.8]);
//!
//! let solver = EulerGvf::builder().mu(0.1).iterations(20).build().unwrap();
//! let result = solver.run(&CpuDevice::new(), &edges).unwrap();
//!
//! assert_eq!(result.field.extent(), extent);
//! assert!(result.field.magnitude(extent.index(18, 16, 0)) > 0.0);
//! assert_eq!(result.metrics.strategy, StrategyKind::Planar);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gvf-core` | Extents, storage formats, vector fields, parameters |
//! | [`arena`] | `gvf-arena` | Ping-pong working-buffer scheduling |
//! | [`device`] | `gvf-device` | Capability and kernel traits, CPU reference device |
//! | [`solver`] | `gvf-solver` | Negotiation, strategies, the Euler solver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`gvf-core`).
///
/// Grid extents, storage formats and SNORM16 quantization, vector
/// fields, [`types::SolverParams`], and the validation errors.
pub use gvf_core as types;

/// Ping-pong buffer scheduling (`gvf-arena`).
pub use gvf_arena as arena;

/// Accelerator boundary (`gvf-device`).
///
/// Implement [`device::Capabilities`] and [`device::Kernels`] to run the
/// solver on a new accelerator; [`device::CpuDevice`] is the reference.
pub use gvf_device as device;

/// The GVF solver (`gvf-solver`).
///
/// [`solver::EulerGvf`] is the entry point; [`solver::negotiate`] and
/// [`solver::select_strategy`] are exposed for callers that want to
/// inspect decisions before running.
pub use gvf_solver as solver;

/// Common imports for typical GVF usage.
///
/// ```rust
/// use gvf::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use gvf_core::{
        Dimensionality, ElementType, Extent, IterationCount, Precision, SolverParams, StorageFormat,
        VectorField,
    };

    // Devices
    pub use gvf_device::{Capabilities, CapabilitySet, CpuDevice, Device, Kernels};

    // Solver
    pub use gvf_solver::{EulerGvf, SolveMetrics, SolveResult, SolverEvent, StrategyKind};

    // Errors
    pub use gvf_core::{FieldError, ValidationError};
    pub use gvf_device::DeviceError;
    pub use gvf_solver::GvfError;
}
