//! Explicit-Euler GVF update and its neighbourhood stencil.
//!
//! Per cell, with `v` the current vector and `f` the original edge field:
//!
//! ```text
//! v' = v + mu * lap(v) - (v - f) * |f|^2
//! ```
//!
//! `lap` is the 4-neighbour (2D) or 6-neighbour (3D) Laplacian. Borders
//! are zero-flux: an out-of-range neighbour resolves to the border cell
//! itself. All arithmetic is `f32` regardless of storage format.

use gvf_core::{Dimensionality, Extent};
use smallvec::SmallVec;

const OFFSETS_2D: [(i64, i64, i64); 4] = [(-1, 0, 0), (1, 0, 0), (0, -1, 0), (0, 1, 0)];
const OFFSETS_3D: [(i64, i64, i64); 6] = [
    (-1, 0, 0),
    (1, 0, 0),
    (0, -1, 0),
    (0, 1, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Clamp a coordinate onto `[0, len)`.
pub(crate) fn clamp_axis(val: i64, len: u32) -> u32 {
    val.clamp(0, len as i64 - 1) as u32
}

/// Flat indices of the stencil neighbours of `cell`, border-clamped.
///
/// Always returns 4 entries for planar grids and 6 for volumetric ones;
/// clamped entries may repeat `cell`.
pub fn neighbours(extent: &Extent, cell: usize) -> SmallVec<[usize; 6]> {
    let (x, y, z) = extent.coords(cell);
    let offsets: &[(i64, i64, i64)] = match extent.dims() {
        Dimensionality::Two => &OFFSETS_2D,
        Dimensionality::Three => &OFFSETS_3D,
    };
    let mut out = SmallVec::new();
    for &(dx, dy, dz) in offsets {
        let nx = clamp_axis(x as i64 + dx, extent.width());
        let ny = clamp_axis(y as i64 + dy, extent.height());
        let nz = clamp_axis(z as i64 + dz, extent.depth_or_one());
        out.push(extent.index(nx, ny, nz));
    }
    out
}

/// One explicit-Euler GVF step for a single cell.
///
/// `load` decodes the current value of any cell in the read buffer;
/// `init` is the original vector at `cell`. Only the first `components`
/// lanes are computed, the rest of the result is zero.
pub fn gvf_cell<L>(extent: &Extent, cell: usize, components: usize, mu: f32, init: [f32; 4], load: L) -> [f32; 4]
where
    L: Fn(usize) -> [f32; 4],
{
    let v = load(cell);
    let nbs = neighbours(extent, cell);

    // Summed as differences so a uniform neighbourhood gives exactly zero.
    let mut laplacian = [0.0f32; 4];
    for &n in &nbs {
        let nv = load(n);
        for c in 0..components {
            laplacian[c] += nv[c] - v[c];
        }
    }

    let sqr_mag: f32 = init[..components].iter().map(|c| c * c).sum();

    let mut out = [0.0f32; 4];
    for c in 0..components {
        out[c] = v[c] + mu * laplacian[c] - (v[c] - init[c]) * sqr_mag;
    }
    out
}
