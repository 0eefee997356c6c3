//! Error types for a solver call.

use std::error::Error;
use std::fmt;

use gvf_core::{Dimensionality, Precision, StorageFormat, ValidationError};
use gvf_device::DeviceError;

/// Everything a solver call can fail with.
#[derive(Clone, Debug, PartialEq)]
pub enum GvfError {
    /// Input or parameters violate a precondition. Nothing was allocated.
    Validation(ValidationError),
    /// None of the candidate working formats is supported by the device.
    UnsupportedConfiguration {
        /// Grid dimensionality of the input.
        dims: Dimensionality,
        /// Requested precision.
        precision: Precision,
        /// Every format that was asked for, in preference order.
        tried: Vec<StorageFormat>,
    },
    /// A device kernel or allocation failed.
    Device(DeviceError),
}

impl fmt::Display for GvfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "invalid input: {e}"),
            Self::UnsupportedConfiguration {
                dims,
                precision,
                tried,
            } => {
                write!(f, "no supported {dims} storage format for {precision} precision (tried ")?;
                for (i, format) in tried.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{format}")?;
                }
                write!(f, ")")
            }
            Self::Device(e) => write!(f, "device error: {e}"),
        }
    }
}

impl Error for GvfError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::UnsupportedConfiguration { .. } => None,
        }
    }
}

impl From<ValidationError> for GvfError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DeviceError> for GvfError {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}
