//! Device capability queries.
//!
//! Storage-format support and kernel writes into volumetric surfaces
//! vary between accelerators. The solver resolves both once per call
//! through [`Capabilities`] instead of branching on device identity.

use gvf_core::{ChannelLayout, Dimensionality, ElementType, StorageFormat};
use indexmap::IndexSet;

/// What a device can do, as far as GVF diffusion cares.
pub trait Capabilities {
    /// Whether read/write surfaces of `format` exist for `dims` grids.
    fn supports(&self, format: StorageFormat, dims: Dimensionality) -> bool;

    /// Whether kernels may write arbitrary cells of a volumetric surface.
    fn supports_direct_volume_write(&self) -> bool;
}

/// An explicit, ordered list of supported `(format, dims)` pairs plus the
/// volume-write flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilitySet {
    formats: IndexSet<(StorageFormat, Dimensionality)>,
    volume_write: bool,
}

const LAYOUTS: [ChannelLayout; 3] = [ChannelLayout::R, ChannelLayout::Rg, ChannelLayout::Rgba];
const DIMS: [Dimensionality; 2] = [Dimensionality::Two, Dimensionality::Three];

impl CapabilitySet {
    /// Nothing supported, no volume writes.
    pub fn empty() -> Self {
        Self {
            formats: IndexSet::new(),
            volume_write: false,
        }
    }

    /// Every layout in both element types for both dimensionalities,
    /// with volume writes.
    pub fn all() -> Self {
        let mut set = Self::empty().with_volume_write(true);
        for dims in DIMS {
            for element in [ElementType::Snorm16, ElementType::Float32] {
                for layout in LAYOUTS {
                    set.formats.insert((StorageFormat::new(layout, element), dims));
                }
            }
        }
        set
    }

    /// Only 32-bit float layouts, with volume writes. Models devices
    /// where 16-bit normalized surfaces are an absent optional extension.
    pub fn float_only() -> Self {
        let mut set = Self::empty().with_volume_write(true);
        for dims in DIMS {
            for layout in LAYOUTS {
                set.formats
                    .insert((StorageFormat::new(layout, ElementType::Float32), dims));
            }
        }
        set
    }

    /// Add a supported pair.
    pub fn with(mut self, format: StorageFormat, dims: Dimensionality) -> Self {
        self.formats.insert((format, dims));
        self
    }

    /// Remove a supported pair.
    pub fn without(mut self, format: StorageFormat, dims: Dimensionality) -> Self {
        self.formats.shift_remove(&(format, dims));
        self
    }

    /// Set whether kernels may write volumetric surfaces.
    pub fn with_volume_write(mut self, enabled: bool) -> Self {
        self.volume_write = enabled;
        self
    }

    /// Supported pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(StorageFormat, Dimensionality)> {
        self.formats.iter()
    }

    /// Number of supported pairs.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// True if no format is supported.
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        Self::all()
    }
}

impl Capabilities for CapabilitySet {
    fn supports(&self, format: StorageFormat, dims: Dimensionality) -> bool {
        self.formats.contains(&(format, dims))
    }

    fn supports_direct_volume_write(&self) -> bool {
        self.volume_write
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_supports_every_candidate() {
        let caps = CapabilitySet::all();
        assert_eq!(caps.len(), 12);
        for f in [
            StorageFormat::RG_SNORM16,
            StorageFormat::RGBA_SNORM16,
            StorageFormat::RG_F32,
            StorageFormat::RGBA_F32,
        ] {
            assert!(caps.supports(f, Dimensionality::Two));
            assert!(caps.supports(f, Dimensionality::Three));
        }
        assert!(caps.supports_direct_volume_write());
    }

    #[test]
    fn float_only_lacks_snorm() {
        let caps = CapabilitySet::float_only();
        assert!(!caps.supports(StorageFormat::RG_SNORM16, Dimensionality::Two));
        assert!(!caps.supports(StorageFormat::RGBA_SNORM16, Dimensionality::Three));
        assert!(caps.supports(StorageFormat::RGBA_F32, Dimensionality::Three));
    }

    #[test]
    fn without_removes_single_pair() {
        let caps = CapabilitySet::all().without(StorageFormat::RG_SNORM16, Dimensionality::Two);
        assert!(!caps.supports(StorageFormat::RG_SNORM16, Dimensionality::Two));
        assert!(caps.supports(StorageFormat::RG_SNORM16, Dimensionality::Three));
    }

    #[test]
    fn empty_supports_nothing() {
        let caps = CapabilitySet::empty();
        assert!(caps.is_empty());
        assert!(!caps.supports(StorageFormat::RGBA_F32, Dimensionality::Two));
        assert!(!caps.supports_direct_volume_write());
    }
}
