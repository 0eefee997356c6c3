//! A device that fails deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};

use gvf_core::{Dimensionality, ElementType, Extent, StorageFormat, Surface};
use gvf_device::{Capabilities, DeviceError, Kernels, Leased, LinearBuffer};

/// Wraps a device and fails every step kernel after the first
/// `ok_steps` succeed.
///
/// Allocations and transfers are forwarded untouched, so a solver call
/// fails mid-iteration with its working buffers live.
pub struct FaultyDevice<D> {
    inner: D,
    ok_steps: usize,
    steps: AtomicUsize,
}

impl<D> FaultyDevice<D> {
    pub fn new(inner: D, ok_steps: usize) -> Self {
        Self {
            inner,
            ok_steps,
            steps: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Step kernels attempted so far, failed ones included.
    pub fn attempted_steps(&self) -> usize {
        self.steps.load(Ordering::Relaxed)
    }

    fn check_step(&self) -> Result<(), DeviceError> {
        let n = self.steps.fetch_add(1, Ordering::Relaxed);
        if n >= self.ok_steps {
            return Err(DeviceError::LayoutMismatch {
                reason: format!("injected fault at step {n}"),
            });
        }
        Ok(())
    }
}

impl<D: Capabilities> Capabilities for FaultyDevice<D> {
    fn supports(&self, format: StorageFormat, dims: Dimensionality) -> bool {
        self.inner.supports(format, dims)
    }

    fn supports_direct_volume_write(&self) -> bool {
        self.inner.supports_direct_volume_write()
    }
}

impl<D: Kernels> Kernels for FaultyDevice<D> {
    fn alloc_surface(&self, extent: Extent, format: StorageFormat) -> Result<Leased<Surface>, DeviceError> {
        self.inner.alloc_surface(extent, format)
    }

    fn alloc_linear(
        &self,
        cells: usize,
        components: usize,
        element: ElementType,
    ) -> Result<Leased<LinearBuffer>, DeviceError> {
        self.inner.alloc_linear(cells, components, element)
    }

    fn copy_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError> {
        self.inner.copy_surface(src, dst)
    }

    fn convert_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError> {
        self.inner.convert_surface(src, dst)
    }

    fn iterate_planar(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError> {
        self.check_step()?;
        self.inner.iterate_planar(init, read, write, mu)
    }

    fn iterate_volume(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError> {
        self.check_step()?;
        self.inner.iterate_volume(init, read, write, mu)
    }

    fn linear_init(&self, input: &Surface, out: &mut LinearBuffer) -> Result<(), DeviceError> {
        self.inner.linear_init(input, out)
    }

    fn linear_iterate(
        &self,
        init: &Surface,
        read: &LinearBuffer,
        write: &mut LinearBuffer,
        mu: f32,
    ) -> Result<(), DeviceError> {
        self.check_step()?;
        self.inner.linear_iterate(init, read, write, mu)
    }

    fn linear_finish(&self, src: &LinearBuffer, dst: &mut LinearBuffer) -> Result<(), DeviceError> {
        self.inner.linear_finish(src, dst)
    }

    fn copy_linear_to_surface(&self, src: &LinearBuffer, dst: &mut Surface) -> Result<(), DeviceError> {
        self.inner.copy_linear_to_surface(src, dst)
    }
}
