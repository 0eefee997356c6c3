//! CPU reference accelerator.
//!
//! Kernels split their output into per-cell chunks and run them on the
//! rayon pool. A lane only reads the kernel's inputs and only writes its
//! own cell, so no two lanes race. The parallel iterator completes
//! before the kernel returns, which is the barrier between dispatches.

use std::sync::Arc;

use gvf_core::{Dimensionality, ElementType, Extent, StorageFormat, Surface, SurfaceData};
use gvf_core::quantize::encode_snorm16;
use rayon::prelude::*;

use crate::buffers::LinearBuffer;
use crate::capability::{Capabilities, CapabilitySet};
use crate::error::DeviceError;
use crate::kernels::Kernels;
use crate::stencil::gvf_cell;
use crate::tracker::{AllocationTracker, Leased};

/// Host-memory device with a configurable capability set.
///
/// # Examples
///
/// ```
/// use gvf_core::{Dimensionality, StorageFormat};
/// use gvf_device::{Capabilities, CapabilitySet, CpuDevice};
///
/// let device = CpuDevice::with_capabilities(CapabilitySet::float_only());
/// assert!(!device.supports(StorageFormat::RG_SNORM16, Dimensionality::Two));
/// assert!(device.supports(StorageFormat::RG_F32, Dimensionality::Two));
/// assert_eq!(device.live_allocations(), 0);
/// ```
#[derive(Debug)]
pub struct CpuDevice {
    caps: CapabilitySet,
    tracker: Arc<AllocationTracker>,
}

impl CpuDevice {
    /// A device supporting every format, with volume writes.
    pub fn new() -> Self {
        Self::with_capabilities(CapabilitySet::all())
    }

    /// A device limited to `caps`.
    pub fn with_capabilities(caps: CapabilitySet) -> Self {
        Self {
            caps,
            tracker: AllocationTracker::new(),
        }
    }

    /// The capability set this device reports.
    pub fn capabilities(&self) -> &CapabilitySet {
        &self.caps
    }

    /// Allocation counters shared with every outstanding lease.
    pub fn tracker(&self) -> &Arc<AllocationTracker> {
        &self.tracker
    }

    /// Buffers allocated and not yet dropped.
    pub fn live_allocations(&self) -> usize {
        self.tracker.live()
    }

    /// Buffers ever allocated by this device.
    pub fn total_allocations(&self) -> usize {
        self.tracker.total()
    }

    fn require_volume_write(&self, extent: Extent) -> Result<(), DeviceError> {
        if extent.dims() == Dimensionality::Three && !self.caps.supports_direct_volume_write() {
            log::warn!("kernel write into {extent} volume refused: device has no volume writes");
            return Err(DeviceError::VolumeWriteUnsupported);
        }
        Ok(())
    }

    fn iterate_surface(
        &self,
        dims: Dimensionality,
        init: &Surface,
        read: &Surface,
        write: &mut Surface,
        mu: f32,
    ) -> Result<(), DeviceError> {
        let extent = init.extent();
        expect_dims(dims, extent)?;
        expect_extent(extent, read.extent())?;
        expect_extent(extent, write.extent())?;
        expect_format(read.format(), write.format())?;
        self.require_volume_write(extent)?;

        let components = dims.components() as usize;
        let channels = write.format().channels();
        dispatch(write.data_mut(), channels, |cell| {
            gvf_cell(&extent, cell, components, mu, init.load(cell), |n| read.load(n))
        });
        Ok(())
    }
}

impl Default for CpuDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Capabilities for CpuDevice {
    fn supports(&self, format: StorageFormat, dims: Dimensionality) -> bool {
        self.caps.supports(format, dims)
    }

    fn supports_direct_volume_write(&self) -> bool {
        self.caps.supports_direct_volume_write()
    }
}

impl Kernels for CpuDevice {
    fn alloc_surface(&self, extent: Extent, format: StorageFormat) -> Result<Leased<Surface>, DeviceError> {
        let dims = extent.dims();
        if !self.caps.supports(format, dims) {
            return Err(DeviceError::UnsupportedFormat { format, dims });
        }
        let surface = Surface::zeros(extent, format);
        log::trace!("alloc {format:?} surface {extent} ({} bytes)", surface.memory_bytes());
        let lease = AllocationTracker::acquire(&self.tracker, surface.memory_bytes());
        Ok(Leased::new(surface, lease))
    }

    fn alloc_linear(
        &self,
        cells: usize,
        components: usize,
        element: ElementType,
    ) -> Result<Leased<LinearBuffer>, DeviceError> {
        let buffer = LinearBuffer::zeros(cells, components, element);
        log::trace!("alloc linear buffer {cells}x{components} {element:?}");
        let lease = AllocationTracker::acquire(&self.tracker, buffer.memory_bytes());
        Ok(Leased::new(buffer, lease))
    }

    fn copy_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError> {
        expect_extent(src.extent(), dst.extent())?;
        expect_format(src.format(), dst.format())?;
        dst.data_mut().clone_from(src.data());
        Ok(())
    }

    fn convert_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError> {
        expect_extent(src.extent(), dst.extent())?;
        self.require_volume_write(dst.extent())?;
        let channels = dst.format().channels();
        dispatch(dst.data_mut(), channels, |cell| src.load(cell));
        Ok(())
    }

    fn iterate_planar(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError> {
        self.iterate_surface(Dimensionality::Two, init, read, write, mu)
    }

    fn iterate_volume(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError> {
        self.iterate_surface(Dimensionality::Three, init, read, write, mu)
    }

    fn linear_init(&self, input: &Surface, out: &mut LinearBuffer) -> Result<(), DeviceError> {
        let extent = input.extent();
        expect_dims(Dimensionality::Three, extent)?;
        expect_linear(out, extent.cell_count(), 3)?;
        dispatch(out.data_mut(), 3, |cell| input.load(cell));
        Ok(())
    }

    fn linear_iterate(
        &self,
        init: &Surface,
        read: &LinearBuffer,
        write: &mut LinearBuffer,
        mu: f32,
    ) -> Result<(), DeviceError> {
        let extent = init.extent();
        expect_dims(Dimensionality::Three, extent)?;
        expect_linear(read, extent.cell_count(), 3)?;
        expect_linear(write, extent.cell_count(), 3)?;
        if read.element() != write.element() {
            return Err(DeviceError::LayoutMismatch {
                reason: format!(
                    "read buffer is {:?} but write buffer is {:?}",
                    read.element(),
                    write.element()
                ),
            });
        }
        dispatch(write.data_mut(), 3, |cell| {
            gvf_cell(&extent, cell, 3, mu, init.load(cell), |n| read.load(n))
        });
        Ok(())
    }

    fn linear_finish(&self, src: &LinearBuffer, dst: &mut LinearBuffer) -> Result<(), DeviceError> {
        expect_linear(src, dst.cells(), 3)?;
        expect_linear(dst, src.cells(), 4)?;
        dispatch(dst.data_mut(), 4, |cell| {
            let mut v = src.load(cell);
            v[3] = 0.0;
            v
        });
        Ok(())
    }

    fn copy_linear_to_surface(&self, src: &LinearBuffer, dst: &mut Surface) -> Result<(), DeviceError> {
        expect_linear(src, dst.extent().cell_count(), dst.format().channels())?;
        if src.element() != dst.format().element {
            return Err(DeviceError::LayoutMismatch {
                reason: format!(
                    "buffer holds {:?} but surface is {}",
                    src.element(),
                    dst.format()
                ),
            });
        }
        dst.data_mut().clone_from(src.data());
        Ok(())
    }
}

/// Run `kernel` once per cell of `data`, storing its first `channels`
/// lanes into that cell.
fn dispatch<K>(data: &mut SurfaceData, channels: usize, kernel: K)
where
    K: Fn(usize) -> [f32; 4] + Sync + Send,
{
    match data {
        SurfaceData::Float32(v) => {
            v.par_chunks_mut(channels).enumerate().for_each(|(cell, out)| {
                let value = kernel(cell);
                out.copy_from_slice(&value[..channels]);
            });
        }
        SurfaceData::Snorm16(v) => {
            v.par_chunks_mut(channels).enumerate().for_each(|(cell, out)| {
                let value = kernel(cell);
                for (slot, x) in out.iter_mut().zip(value.iter()) {
                    *slot = encode_snorm16(*x);
                }
            });
        }
    }
}

fn expect_dims(expected: Dimensionality, extent: Extent) -> Result<(), DeviceError> {
    if extent.dims() != expected {
        return Err(DeviceError::WrongDimensionality {
            expected,
            actual: extent.dims(),
        });
    }
    Ok(())
}

fn expect_extent(expected: Extent, actual: Extent) -> Result<(), DeviceError> {
    if expected != actual {
        return Err(DeviceError::ExtentMismatch { expected, actual });
    }
    Ok(())
}

fn expect_format(expected: StorageFormat, actual: StorageFormat) -> Result<(), DeviceError> {
    if expected != actual {
        return Err(DeviceError::FormatMismatch { expected, actual });
    }
    Ok(())
}

fn expect_linear(buffer: &LinearBuffer, cells: usize, components: usize) -> Result<(), DeviceError> {
    if buffer.cells() != cells || buffer.components() != components {
        return Err(DeviceError::LayoutMismatch {
            reason: format!(
                "expected {cells} cells x {components} components, got {} x {}",
                buffer.cells(),
                buffer.components()
            ),
        });
    }
    Ok(())
}
