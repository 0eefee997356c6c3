//! Working-buffer format negotiation.
//!
//! Each `(dims, precision)` pair has a fixed preference chain. The first
//! format in the chain the device supports wins; if none is supported the
//! call fails with [`GvfError::UnsupportedConfiguration`].
//!
//! | dims | precision | chain |
//! |------|-----------|-------|
//! | 2D | 16-bit | RG/SNORM16, RGBA/SNORM16, RG/F32, RGBA/F32 |
//! | 2D | 32-bit | RG/F32, RGBA/F32 |
//! | 3D | 16-bit | RGBA/SNORM16, RGBA/F32 |
//! | 3D | 32-bit | RGBA/F32 |
//!
//! Volumetric surfaces only come in four-channel layouts.

use gvf_core::{Dimensionality, ElementType, Precision, StorageFormat};
use gvf_device::Capabilities;
use smallvec::SmallVec;

use crate::error::GvfError;

const PLANAR_16: [StorageFormat; 4] = [
    StorageFormat::RG_SNORM16,
    StorageFormat::RGBA_SNORM16,
    StorageFormat::RG_F32,
    StorageFormat::RGBA_F32,
];
const PLANAR_32: [StorageFormat; 2] = [StorageFormat::RG_F32, StorageFormat::RGBA_F32];
const VOLUME_16: [StorageFormat; 2] = [StorageFormat::RGBA_SNORM16, StorageFormat::RGBA_F32];
const VOLUME_32: [StorageFormat; 1] = [StorageFormat::RGBA_F32];

/// Candidate formats for `dims` and `precision`, most preferred first.
pub fn candidates(dims: Dimensionality, precision: Precision) -> SmallVec<[StorageFormat; 4]> {
    let chain: &[StorageFormat] = match (dims, precision) {
        (Dimensionality::Two, Precision::Bits16) => &PLANAR_16,
        (Dimensionality::Two, Precision::Bits32) => &PLANAR_32,
        (Dimensionality::Three, Precision::Bits16) => &VOLUME_16,
        (Dimensionality::Three, Precision::Bits32) => &VOLUME_32,
    };
    SmallVec::from_slice(chain)
}

/// Outcome of a successful negotiation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Negotiated {
    /// Format for the working buffers.
    pub format: StorageFormat,
    /// True if a 16-bit preference had to fall back to 32-bit storage.
    pub fallback: bool,
}

/// Pick the working-buffer format for a `dims` grid.
///
/// The choice is logged at `info` level, or at `warn` level when the
/// preferred precision is not available.
///
/// # Errors
///
/// [`GvfError::UnsupportedConfiguration`] if no candidate is supported.
pub fn negotiate<C>(caps: &C, precision: Precision, dims: Dimensionality) -> Result<Negotiated, GvfError>
where
    C: Capabilities + ?Sized,
{
    let chain = candidates(dims, precision);
    let Some(format) = chain.iter().copied().find(|&f| caps.supports(f, dims)) else {
        log::error!("no {dims} storage format available for {precision} precision");
        return Err(GvfError::UnsupportedConfiguration {
            dims,
            precision,
            tried: chain.into_vec(),
        });
    };

    let fallback = precision == Precision::Bits16 && format.element != ElementType::Snorm16;
    if fallback {
        log::warn!("{dims} GVF: 16-bit storage unsupported, using {format}");
    } else {
        log::info!("{dims} GVF: using {format} storage");
    }
    Ok(Negotiated { format, fallback })
}
