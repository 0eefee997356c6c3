//! Benchmark profiles for the GVF solver.
//!
//! - [`ring_edges`]: synthetic edge map of a ring, the usual GVF test image
//! - [`planar_profile`]: 256x256 ring, 32 iterations
//! - [`volume_profile`]: 48x48x48 spherical shell, 16 iterations

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use gvf_core::{ElementType, Extent, VectorField};
use gvf_solver::EulerGvf;

/// Edge vectors of a ring (2D) or spherical shell (3D) centred in `extent`.
///
/// Cells within one unit of radius `extent.max_axis() / 4` point radially
/// outward with length 0.9; every other cell is zero.
pub fn ring_edges(extent: Extent, element: ElementType) -> VectorField {
    let components = extent.dims().components();
    let mut field = VectorField::zeros(extent, components, element).expect("ring fixture");
    let centre = [
        extent.width() as f32 / 2.0,
        extent.height() as f32 / 2.0,
        extent.depth_or_one() as f32 / 2.0,
    ];
    let radius = extent.max_axis() as f32 / 4.0;

    for cell in 0..extent.cell_count() {
        let (x, y, z) = extent.coords(cell);
        let mut d = [x as f32 + 0.5 - centre[0], y as f32 + 0.5 - centre[1], 0.0];
        if components == 3 {
            d[2] = z as f32 + 0.5 - centre[2];
        }
        let r = d.iter().map(|c| c * c).sum::<f32>().sqrt();
        if (r - radius).abs() <= 1.0 && r > 0.0 {
            let v: Vec<f32> = d[..components as usize].iter().map(|c| 0.9 * c / r).collect();
            field.set_vector(cell, &v);
        }
    }
    field
}

/// 256x256 ring, 16-bit storage, 32 iterations.
pub fn planar_profile() -> (VectorField, EulerGvf) {
    let extent = Extent::planar(256, 256).expect("planar profile extent");
    let solver = EulerGvf::builder().mu(0.1).iterations(32).build().expect("planar profile params");
    (ring_edges(extent, ElementType::Float32), solver)
}

/// 48x48x48 spherical shell, 16-bit storage, 16 iterations.
pub fn volume_profile() -> (VectorField, EulerGvf) {
    let extent = Extent::volume(48, 48, 48).expect("volume profile extent");
    let solver = EulerGvf::builder().mu(0.1).iterations(16).build().expect("volume profile params");
    (ring_edges(extent, ElementType::Float32), solver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_has_unit_scaled_edges() {
        let extent = Extent::planar(32, 32).unwrap();
        let field = ring_edges(extent, ElementType::Float32);
        let nonzero: Vec<usize> = (0..extent.cell_count()).filter(|&c| field.magnitude(c) > 0.0).collect();
        assert!(!nonzero.is_empty());
        for c in nonzero {
            assert!((field.magnitude(c) - 0.9).abs() < 1e-5);
        }
        assert_eq!(field.magnitude(extent.index(16, 16, 0)), 0.0);
    }

    #[test]
    fn profiles_are_valid_inputs() {
        let (field, solver) = planar_profile();
        assert!(gvf_solver::validate(&field, solver.params()).is_ok());
        let (field, solver) = volume_profile();
        assert!(gvf_solver::validate(&field, solver.params()).is_ok());
    }
}
