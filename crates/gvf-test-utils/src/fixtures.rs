//! Reusable input fields.
//!
//! - [`constant_field`]: the same vector in every cell.
//! - [`impulse_field`]: zero everywhere except one cell.

use gvf_core::{ElementType, Extent, VectorField};

/// A planar extent. Panics on zero axes.
pub fn planar(width: u32, height: u32) -> Extent {
    Extent::planar(width, height).expect("non-empty planar extent")
}

/// A volumetric extent. Panics on zero axes.
pub fn volume(width: u32, height: u32, depth: u32) -> Extent {
    Extent::volume(width, height, depth).expect("non-empty volumetric extent")
}

/// Every cell holds `value`; the component count is `value.len()`.
pub fn constant_field(extent: Extent, element: ElementType, value: &[f32]) -> VectorField {
    let values: Vec<f32> = (0..extent.cell_count())
        .flat_map(|_| value.iter().copied())
        .collect();
    VectorField::from_components(extent, value.len() as u32, element, &values)
        .expect("constant field fixture")
}

/// Zero everywhere except `value` at `(x, y, z)`.
///
/// The component count follows the extent's dimensionality.
pub fn impulse_field(extent: Extent, element: ElementType, at: (u32, u32, u32), value: &[f32]) -> VectorField {
    let components = extent.dims().components();
    let mut field = VectorField::zeros(extent, components, element).expect("impulse field fixture");
    field.set_vector(extent.index(at.0, at.1, at.2), value);
    field
}
