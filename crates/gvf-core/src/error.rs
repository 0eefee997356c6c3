//! Error types for field construction and parameter validation.

use std::error::Error;
use std::fmt;

use crate::field::Dimensionality;

/// Errors arising when constructing a [`Surface`](crate::Surface) or
/// [`VectorField`](crate::VectorField).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// One of the grid axes has zero length.
    EmptyExtent,
    /// The backing data does not hold exactly `cells * channels` elements.
    DataLengthMismatch {
        /// Element count the extent and format require.
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },
    /// The backing data's element type disagrees with the declared format.
    ElementMismatch,
    /// The component count has no channel layout that can hold it.
    UnsupportedComponents {
        /// The offending component count.
        components: u32,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyExtent => write!(f, "every grid axis must have at least one cell"),
            Self::DataLengthMismatch { expected, actual } => {
                write!(f, "data length mismatch: expected {expected} elements, got {actual}")
            }
            Self::ElementMismatch => {
                write!(f, "data element type does not match the declared storage format")
            }
            Self::UnsupportedComponents { components } => {
                write!(f, "no channel layout holds {components} components (1 to 4 allowed)")
            }
        }
    }
}

impl Error for FieldError {}

/// Precondition failures detected before a solver call acquires any
/// accelerator resources.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// The field's component count does not equal its dimensionality.
    ComponentMismatch {
        /// Dimensionality of the grid.
        dims: Dimensionality,
        /// Number of components per cell in the field.
        components: u32,
    },
    /// `mu` is outside `(0, 0.2]` or not finite.
    MuOutOfRange {
        /// The rejected value.
        mu: f32,
    },
    /// The iteration count was explicitly set to zero.
    ZeroIterations,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComponentMismatch { dims, components } => write!(
                f,
                "input must be a vector field with {} components for a {dims} grid, got {components}",
                dims.components()
            ),
            Self::MuOutOfRange { mu } => {
                write!(f, "mu must be larger than 0 and at most 0.2, got {mu}")
            }
            Self::ZeroIterations => write!(f, "number of iterations can't be zero"),
        }
    }
}

impl Error for ValidationError {}
