//! Accelerator boundary for GVF diffusion.
//!
//! The solver never touches an accelerator directly. It asks a
//! [`Capabilities`] implementation which storage formats exist and
//! whether volumetric surfaces can be written from kernels, and it drives
//! the work through the [`Kernels`] entry points. Anything implementing
//! both is a [`Device`] and is passed explicitly into every call.
//!
//! [`CpuDevice`] is the reference accelerator: every kernel partitions
//! its work per cell and runs data-parallel on the host, and every
//! allocation is tracked so callers can check that working storage is
//! released.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffers;
pub mod capability;
pub mod cpu;
pub mod error;
pub mod kernels;
pub mod stencil;
pub mod tracker;

pub use buffers::LinearBuffer;
pub use capability::{Capabilities, CapabilitySet};
pub use cpu::CpuDevice;
pub use error::DeviceError;
pub use kernels::{Device, Kernels};
pub use tracker::{AllocationTracker, Lease, Leased};
