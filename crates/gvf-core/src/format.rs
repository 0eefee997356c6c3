//! Storage formats: channel layout, element precision, and the caller's
//! precision preference.

use std::fmt;

/// Number and arrangement of channels stored per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// One channel.
    R,
    /// Two channels.
    Rg,
    /// Four channels.
    Rgba,
}

impl ChannelLayout {
    /// Number of channels stored per cell.
    pub fn channels(self) -> usize {
        match self {
            Self::R => 1,
            Self::Rg => 2,
            Self::Rgba => 4,
        }
    }

    /// Smallest layout that can hold `components` values per cell.
    pub fn for_components(components: u32) -> Option<Self> {
        match components {
            1 => Some(Self::R),
            2 => Some(Self::Rg),
            3 | 4 => Some(Self::Rgba),
            _ => None,
        }
    }
}

/// Element representation of a single channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Signed 16-bit normalized: `[-1, 1]` mapped onto `i16`.
    Snorm16,
    /// IEEE 754 single precision.
    Float32,
}

impl ElementType {
    /// Size of one channel in bytes.
    pub fn bytes(self) -> usize {
        match self {
            Self::Snorm16 => 2,
            Self::Float32 => 4,
        }
    }
}

/// A resolved `(channel layout, element type)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StorageFormat {
    /// Channels per cell.
    pub layout: ChannelLayout,
    /// Representation of each channel.
    pub element: ElementType,
}

impl StorageFormat {
    /// Two 16-bit normalized channels.
    pub const RG_SNORM16: Self = Self::new(ChannelLayout::Rg, ElementType::Snorm16);
    /// Four 16-bit normalized channels.
    pub const RGBA_SNORM16: Self = Self::new(ChannelLayout::Rgba, ElementType::Snorm16);
    /// Two 32-bit float channels.
    pub const RG_F32: Self = Self::new(ChannelLayout::Rg, ElementType::Float32);
    /// Four 32-bit float channels.
    pub const RGBA_F32: Self = Self::new(ChannelLayout::Rgba, ElementType::Float32);

    /// Create a format from its parts.
    pub const fn new(layout: ChannelLayout, element: ElementType) -> Self {
        Self { layout, element }
    }

    /// Channels per cell.
    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    /// Bytes per cell.
    pub fn bytes_per_cell(&self) -> usize {
        self.channels() * self.element.bytes()
    }
}

impl fmt::Display for StorageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = match self.layout {
            ChannelLayout::R => "R",
            ChannelLayout::Rg => "RG",
            ChannelLayout::Rgba => "RGBA",
        };
        let element = match self.element {
            ElementType::Snorm16 => "SNORM16",
            ElementType::Float32 => "F32",
        };
        write!(f, "{layout}/{element}")
    }
}

/// Caller's preferred storage precision for the working buffers.
///
/// A preference, not a guarantee: 16-bit normalized formats are an
/// optional device feature and negotiation falls back to 32-bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 16-bit normalized storage (half the memory traffic, values clamped to `[-1, 1]`).
    #[default]
    Bits16,
    /// 32-bit float storage.
    Bits32,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits16 => write!(f, "16-bit"),
            Self::Bits32 => write!(f, "32-bit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_channels() {
        assert_eq!(ChannelLayout::R.channels(), 1);
        assert_eq!(ChannelLayout::Rg.channels(), 2);
        assert_eq!(ChannelLayout::Rgba.channels(), 4);
    }

    #[test]
    fn three_components_pad_to_rgba() {
        assert_eq!(ChannelLayout::for_components(3), Some(ChannelLayout::Rgba));
        assert_eq!(ChannelLayout::for_components(0), None);
        assert_eq!(ChannelLayout::for_components(5), None);
    }

    #[test]
    fn bytes_per_cell() {
        assert_eq!(StorageFormat::RG_SNORM16.bytes_per_cell(), 4);
        assert_eq!(StorageFormat::RGBA_F32.bytes_per_cell(), 16);
    }

    #[test]
    fn display_names() {
        assert_eq!(StorageFormat::RG_SNORM16.to_string(), "RG/SNORM16");
        assert_eq!(StorageFormat::RGBA_F32.to_string(), "RGBA/F32");
    }

    #[test]
    fn default_precision_is_16bit() {
        assert_eq!(Precision::default(), Precision::Bits16);
    }
}
