//! Resolution of the caller's iteration request.

use gvf_core::{Extent, IterationCount};

/// Concrete step count for `count` on a grid of `extent`.
///
/// `Auto` runs one step per cell along the longest axis, so influence can
/// reach across the whole grid. `Fixed(n)` is returned as is; zero is
/// rejected earlier, during validation.
pub fn resolve_iterations(count: IterationCount, extent: &Extent) -> u32 {
    match count {
        IterationCount::Fixed(n) => n,
        IterationCount::Auto => extent.max_axis(),
    }
}
