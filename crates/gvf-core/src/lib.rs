//! Core types for gradient vector flow (GVF) diffusion.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: grid extents,
//! storage formats and their quantization, vector fields, solver
//! parameters, and the validation error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod format;
pub mod params;
pub mod quantize;

pub use error::{FieldError, ValidationError};
pub use field::{Dimensionality, Extent, Surface, SurfaceData, VectorField};
pub use format::{ChannelLayout, ElementType, Precision, StorageFormat};
pub use params::{IterationCount, SolverParams};
