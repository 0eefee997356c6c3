//! Device-level error types.

use std::error::Error;
use std::fmt;

use gvf_core::{Dimensionality, Extent, StorageFormat};

/// Errors reported by a device when a kernel or allocation is handed
/// buffers it cannot accept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeviceError {
    /// The device has no surfaces of this format for this dimensionality.
    UnsupportedFormat {
        /// The requested format.
        format: StorageFormat,
        /// Dimensionality of the requested surface.
        dims: Dimensionality,
    },
    /// Kernels cannot write arbitrary locations of volumetric surfaces.
    VolumeWriteUnsupported,
    /// Two buffers that must share a format do not.
    FormatMismatch {
        /// Format the kernel required.
        expected: StorageFormat,
        /// Format it was given.
        actual: StorageFormat,
    },
    /// Two buffers that must share extents do not.
    ExtentMismatch {
        /// Extent the kernel required.
        expected: Extent,
        /// Extent it was given.
        actual: Extent,
    },
    /// A kernel was dispatched over a grid of the wrong dimensionality.
    WrongDimensionality {
        /// Dimensionality the kernel handles.
        expected: Dimensionality,
        /// Dimensionality of the grid it was given.
        actual: Dimensionality,
    },
    /// A linear buffer has the wrong cell or component count.
    LayoutMismatch {
        /// Description of the mismatch.
        reason: String,
    },
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { format, dims } => {
                write!(f, "device has no {dims} surfaces in format {format}")
            }
            Self::VolumeWriteUnsupported => {
                write!(f, "device cannot write volumetric surfaces from kernels")
            }
            Self::FormatMismatch { expected, actual } => {
                write!(f, "format mismatch: expected {expected}, got {actual}")
            }
            Self::ExtentMismatch { expected, actual } => {
                write!(f, "extent mismatch: expected {expected}, got {actual}")
            }
            Self::WrongDimensionality { expected, actual } => {
                write!(f, "kernel handles {expected} grids, got a {actual} grid")
            }
            Self::LayoutMismatch { reason } => write!(f, "buffer layout mismatch: {reason}"),
        }
    }
}

impl Error for DeviceError {}
