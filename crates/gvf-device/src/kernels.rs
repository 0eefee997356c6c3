//! Kernel entry points a device exposes to the solver.
//!
//! The contract is purely about shapes and formats: given buffers of the
//! declared shape and format, a kernel fills its output completely. Every
//! kernel checks its arguments and reports a [`DeviceError`] rather than
//! writing a partial result.
//!
//! Kernels are synchronous: when one returns, all of its writes are
//! visible to the next dispatch.

use gvf_core::{ElementType, Extent, StorageFormat, Surface};

use crate::buffers::LinearBuffer;
use crate::capability::Capabilities;
use crate::error::DeviceError;
use crate::tracker::Leased;

/// Allocation and compute entry points of an accelerator.
pub trait Kernels {
    /// Allocate a zeroed read/write surface.
    fn alloc_surface(&self, extent: Extent, format: StorageFormat) -> Result<Leased<Surface>, DeviceError>;

    /// Allocate a zeroed flat buffer of `cells * components` channels.
    fn alloc_linear(
        &self,
        cells: usize,
        components: usize,
        element: ElementType,
    ) -> Result<Leased<LinearBuffer>, DeviceError>;

    /// Raw surface-to-surface copy. Extents and formats must match exactly.
    fn copy_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError>;

    /// Elementwise conversion between formats of the same extent:
    /// requantizes precision and drops or zero-fills channels.
    fn convert_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError>;

    /// One GVF step over a planar grid: reads `read` and `init`, writes every cell of `write`.
    fn iterate_planar(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError>;

    /// One GVF step over a volumetric grid, writing a volumetric surface directly.
    fn iterate_volume(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError>;

    /// Flatten a volumetric surface into raw 3-component vectors.
    fn linear_init(&self, input: &Surface, out: &mut LinearBuffer) -> Result<(), DeviceError>;

    /// One GVF step over flat 3-component buffers; `init` supplies the
    /// grid shape and the edge term.
    fn linear_iterate(
        &self,
        init: &Surface,
        read: &LinearBuffer,
        write: &mut LinearBuffer,
        mu: f32,
    ) -> Result<(), DeviceError>;

    /// Repack flat 3-component vectors into 4-channel cells, converting
    /// to `dst`'s element type.
    fn linear_finish(&self, src: &LinearBuffer, dst: &mut LinearBuffer) -> Result<(), DeviceError>;

    /// Raw copy of a flat buffer into a surface whose layout it matches.
    fn copy_linear_to_surface(&self, src: &LinearBuffer, dst: &mut Surface) -> Result<(), DeviceError>;
}

/// A complete accelerator: capability queries plus kernels.
///
/// Implemented for every type that provides both.
pub trait Device: Capabilities + Kernels + Sync {}

impl<T: Capabilities + Kernels + Sync + ?Sized> Device for T {}
