//! Grids, surfaces, and vector fields.
//!
//! A [`Surface`] is an addressable grid of cells stored in one
//! [`StorageFormat`]. A [`VectorField`] wraps a surface with an explicit
//! component count; the count is kept separately from the layout because
//! volumetric 3-vectors live in four-channel surfaces.
//!
//! Cells are ordered row-major: `x + width * (y + height * z)`.

use std::fmt;

use crate::error::FieldError;
use crate::format::{ChannelLayout, ElementType, StorageFormat};
use crate::quantize::{decode_snorm16, encode_snorm16};

/// Number of spatial axes of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimensionality {
    /// Planar grid (width × height).
    Two,
    /// Volumetric grid (width × height × depth).
    Three,
}

impl Dimensionality {
    /// Components a GVF field over this grid must carry.
    pub fn components(self) -> u32 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Two => write!(f, "2D"),
            Self::Three => write!(f, "3D"),
        }
    }
}

/// Grid extents. `depth` is `None` for planar grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    width: u32,
    height: u32,
    depth: Option<u32>,
}

impl Extent {
    /// A planar `width × height` grid.
    ///
    /// Returns `Err(FieldError::EmptyExtent)` if either axis is zero.
    pub fn planar(width: u32, height: u32) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::EmptyExtent);
        }
        Ok(Self {
            width,
            height,
            depth: None,
        })
    }

    /// A volumetric `width × height × depth` grid.
    ///
    /// A depth of one is still volumetric.
    pub fn volume(width: u32, height: u32, depth: u32) -> Result<Self, FieldError> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(FieldError::EmptyExtent);
        }
        Ok(Self {
            width,
            height,
            depth: Some(depth),
        })
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Depth in cells, `None` for planar grids.
    pub fn depth(&self) -> Option<u32> {
        self.depth
    }

    /// Depth in cells, treating planar grids as one slice deep.
    pub fn depth_or_one(&self) -> u32 {
        self.depth.unwrap_or(1)
    }

    /// Planar or volumetric.
    pub fn dims(&self) -> Dimensionality {
        match self.depth {
            Some(_) => Dimensionality::Three,
            None => Dimensionality::Two,
        }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth_or_one() as usize
    }

    /// Length of the longest axis.
    pub fn max_axis(&self) -> u32 {
        self.width.max(self.height).max(self.depth_or_one())
    }

    /// Flat cell index of `(x, y, z)`.
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        x as usize + self.width as usize * (y as usize + self.height as usize * z as usize)
    }

    /// Inverse of [`Extent::index`].
    pub fn coords(&self, cell: usize) -> (u32, u32, u32) {
        let w = self.width as usize;
        let h = self.height as usize;
        ((cell % w) as u32, ((cell / w) % h) as u32, (cell / (w * h)) as u32)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.depth {
            Some(d) => write!(f, "{}x{}x{}", self.width, self.height, d),
            None => write!(f, "{}x{}", self.width, self.height),
        }
    }
}

/// Backing storage of a surface or linear buffer, channels interleaved.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceData {
    /// SNORM16 channels.
    Snorm16(Vec<i16>),
    /// `f32` channels.
    Float32(Vec<f32>),
}

impl SurfaceData {
    /// Zero-filled storage of `len` channels.
    pub fn zeros(element: ElementType, len: usize) -> Self {
        match element {
            ElementType::Snorm16 => Self::Snorm16(vec![0; len]),
            ElementType::Float32 => Self::Float32(vec![0.0; len]),
        }
    }

    /// Element type of the storage.
    pub fn element(&self) -> ElementType {
        match self {
            Self::Snorm16(_) => ElementType::Snorm16,
            Self::Float32(_) => ElementType::Float32,
        }
    }

    /// Number of stored channels (not cells).
    pub fn len(&self) -> usize {
        match self {
            Self::Snorm16(v) => v.len(),
            Self::Float32(v) => v.len(),
        }
    }

    /// True if no channels are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode `channels` values of `cell` into `f32`; unused lanes are zero.
    pub fn load(&self, cell: usize, channels: usize) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        let base = cell * channels;
        match self {
            Self::Snorm16(v) => {
                for (c, slot) in out.iter_mut().take(channels).enumerate() {
                    *slot = decode_snorm16(v[base + c]);
                }
            }
            Self::Float32(v) => {
                out[..channels].copy_from_slice(&v[base..base + channels]);
            }
        }
        out
    }

    /// Encode the first `channels` lanes of `value` into `cell`.
    pub fn store(&mut self, cell: usize, channels: usize, value: &[f32; 4]) {
        let base = cell * channels;
        match self {
            Self::Snorm16(v) => {
                for c in 0..channels {
                    v[base + c] = encode_snorm16(value[c]);
                }
            }
            Self::Float32(v) => {
                v[base..base + channels].copy_from_slice(&value[..channels]);
            }
        }
    }
}

/// An addressable grid stored in a single [`StorageFormat`].
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    extent: Extent,
    format: StorageFormat,
    data: SurfaceData,
}

impl Surface {
    /// Wrap existing data, checking element type and length.
    pub fn new(extent: Extent, format: StorageFormat, data: SurfaceData) -> Result<Self, FieldError> {
        if data.element() != format.element {
            return Err(FieldError::ElementMismatch);
        }
        let expected = extent.cell_count() * format.channels();
        if data.len() != expected {
            return Err(FieldError::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            extent,
            format,
            data,
        })
    }

    /// A zero-filled surface.
    pub fn zeros(extent: Extent, format: StorageFormat) -> Self {
        let data = SurfaceData::zeros(format.element, extent.cell_count() * format.channels());
        Self {
            extent,
            format,
            data,
        }
    }

    /// Grid extents.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Storage format.
    pub fn format(&self) -> StorageFormat {
        self.format
    }

    /// Raw backing storage.
    pub fn data(&self) -> &SurfaceData {
        &self.data
    }

    /// Mutable raw backing storage. Length and element type are fixed.
    pub fn data_mut(&mut self) -> &mut SurfaceData {
        &mut self.data
    }

    /// Decode one cell.
    pub fn load(&self, cell: usize) -> [f32; 4] {
        self.data.load(cell, self.format.channels())
    }

    /// Encode one cell.
    pub fn store(&mut self, cell: usize, value: &[f32; 4]) {
        let channels = self.format.channels();
        self.data.store(cell, channels, value);
    }

    /// Size of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.extent.cell_count() * self.format.bytes_per_cell()
    }
}

/// A grid of 1–4 component vectors, as handed to and returned from the solver.
///
/// A valid GVF input carries as many components as its grid has axes;
/// that is checked by the solver, not here, so malformed inputs can be
/// represented and rejected with a descriptive error.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorField {
    surface: Surface,
    components: u32,
}

impl VectorField {
    /// Wrap a surface holding `components` values per cell.
    pub fn from_surface(surface: Surface, components: u32) -> Result<Self, FieldError> {
        if components == 0 || components as usize > surface.format().channels() {
            return Err(FieldError::UnsupportedComponents { components });
        }
        Ok(Self {
            surface,
            components,
        })
    }

    /// Build a field from tightly packed `f32` components, stored as `element`.
    ///
    /// `values.len()` must be `cells * components`. Padding channels are zero.
    pub fn from_components(
        extent: Extent,
        components: u32,
        element: ElementType,
        values: &[f32],
    ) -> Result<Self, FieldError> {
        let layout = ChannelLayout::for_components(components)
            .ok_or(FieldError::UnsupportedComponents { components })?;
        let n = components as usize;
        let expected = extent.cell_count() * n;
        if values.len() != expected {
            return Err(FieldError::DataLengthMismatch {
                expected,
                actual: values.len(),
            });
        }
        let mut surface = Surface::zeros(extent, StorageFormat::new(layout, element));
        for (cell, chunk) in values.chunks_exact(n).enumerate() {
            let mut v = [0.0f32; 4];
            v[..n].copy_from_slice(chunk);
            surface.store(cell, &v);
        }
        Ok(Self {
            surface,
            components,
        })
    }

    /// A zero field with `components` values per cell.
    pub fn zeros(extent: Extent, components: u32, element: ElementType) -> Result<Self, FieldError> {
        let layout = ChannelLayout::for_components(components)
            .ok_or(FieldError::UnsupportedComponents { components })?;
        Ok(Self {
            surface: Surface::zeros(extent, StorageFormat::new(layout, element)),
            components,
        })
    }

    /// A zero field with the same extent, components, and format as `other`.
    pub fn zeros_like(other: &Self) -> Self {
        Self {
            surface: Surface::zeros(other.extent(), other.format()),
            components: other.components,
        }
    }

    /// Grid extents.
    pub fn extent(&self) -> Extent {
        self.surface.extent()
    }

    /// Planar or volumetric.
    pub fn dims(&self) -> Dimensionality {
        self.surface.extent().dims()
    }

    /// Components per cell.
    pub fn components(&self) -> u32 {
        self.components
    }

    /// Native storage format of the field.
    pub fn format(&self) -> StorageFormat {
        self.surface.format()
    }

    /// The underlying surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The underlying surface, mutably.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Decoded vector at `cell`; lanes past `components()` are zero.
    pub fn vector(&self, cell: usize) -> [f32; 4] {
        let mut v = self.surface.load(cell);
        for lane in v.iter_mut().skip(self.components as usize) {
            *lane = 0.0;
        }
        v
    }

    /// Decoded vector at `(x, y, z)`. Use `z = 0` for planar fields.
    pub fn vector_at(&self, x: u32, y: u32, z: u32) -> [f32; 4] {
        self.vector(self.extent().index(x, y, z))
    }

    /// Overwrite the vector at `cell`, requantizing to the field's format.
    pub fn set_vector(&mut self, cell: usize, value: &[f32]) {
        let mut v = [0.0f32; 4];
        let n = value.len().min(self.components as usize);
        v[..n].copy_from_slice(&value[..n]);
        self.surface.store(cell, &v);
    }

    /// Euclidean length of the vector at `cell`.
    pub fn magnitude(&self, cell: usize) -> f32 {
        self.vector(cell).iter().map(|c| c * c).sum::<f32>().sqrt()
    }

    /// All components decoded and tightly packed, `cells * components` long.
    pub fn to_components(&self) -> Vec<f32> {
        let n = self.components as usize;
        let cells = self.extent().cell_count();
        let mut out = Vec::with_capacity(cells * n);
        for cell in 0..cells {
            out.extend_from_slice(&self.surface.load(cell)[..n]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_axis_rejected() {
        assert_eq!(Extent::planar(0, 4), Err(FieldError::EmptyExtent));
        assert_eq!(Extent::volume(4, 4, 0), Err(FieldError::EmptyExtent));
    }

    #[test]
    fn extent_queries() {
        let e = Extent::volume(4, 3, 2).unwrap();
        assert_eq!(e.dims(), Dimensionality::Three);
        assert_eq!(e.cell_count(), 24);
        assert_eq!(e.max_axis(), 4);
        assert_eq!(e.to_string(), "4x3x2");

        let p = Extent::planar(64, 48).unwrap();
        assert_eq!(p.dims(), Dimensionality::Two);
        assert_eq!(p.depth(), None);
        assert_eq!(p.max_axis(), 64);
    }

    #[test]
    fn index_and_coords_agree() {
        let e = Extent::volume(5, 4, 3).unwrap();
        for cell in 0..e.cell_count() {
            let (x, y, z) = e.coords(cell);
            assert_eq!(e.index(x, y, z), cell);
        }
    }

    #[test]
    fn surface_rejects_wrong_length() {
        let e = Extent::planar(2, 2).unwrap();
        let err = Surface::new(e, StorageFormat::RG_F32, SurfaceData::Float32(vec![0.0; 7]));
        assert_eq!(
            err,
            Err(FieldError::DataLengthMismatch {
                expected: 8,
                actual: 7
            })
        );
    }

    #[test]
    fn surface_rejects_wrong_element() {
        let e = Extent::planar(2, 2).unwrap();
        let err = Surface::new(e, StorageFormat::RG_F32, SurfaceData::Snorm16(vec![0; 8]));
        assert_eq!(err, Err(FieldError::ElementMismatch));
    }

    #[test]
    fn three_component_field_is_padded() {
        let e = Extent::volume(2, 1, 1).unwrap();
        let f = VectorField::from_components(
            e,
            3,
            ElementType::Float32,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();
        assert_eq!(f.format(), StorageFormat::RGBA_F32);
        assert_eq!(f.vector(1), [4.0, 5.0, 6.0, 0.0]);
        assert_eq!(f.to_components(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn snorm_field_quantizes() {
        let e = Extent::planar(1, 1).unwrap();
        let f = VectorField::from_components(e, 2, ElementType::Snorm16, &[2.0, -0.5]).unwrap();
        let v = f.vector(0);
        assert_eq!(v[0], 1.0);
        assert!((v[1] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn zeros_like_copies_shape_not_data() {
        let e = Extent::planar(3, 2).unwrap();
        let f = VectorField::from_components(e, 2, ElementType::Float32, &[0.25; 12]).unwrap();
        let z = VectorField::zeros_like(&f);
        assert_eq!(z.extent(), f.extent());
        assert_eq!(z.components(), 2);
        assert_eq!(z.format(), f.format());
        assert!(z.to_components().iter().all(|&c| c == 0.0));
    }

    #[test]
    fn component_count_bounds() {
        let e = Extent::planar(1, 1).unwrap();
        assert_eq!(
            VectorField::zeros(e, 5, ElementType::Float32),
            Err(FieldError::UnsupportedComponents { components: 5 })
        );
        let s = Surface::zeros(e, StorageFormat::RG_F32);
        assert!(VectorField::from_surface(s, 3).is_err());
    }

    #[test]
    fn magnitude_of_three_four() {
        let e = Extent::planar(1, 1).unwrap();
        let f = VectorField::from_components(e, 2, ElementType::Float32, &[3.0, 4.0]).unwrap();
        assert!((f.magnitude(0) - 5.0).abs() < 1e-6);
    }
}
