//! A device wrapper that records kernel dispatches.

use std::sync::Mutex;

use gvf_core::{Dimensionality, ElementType, Extent, StorageFormat, Surface};
use gvf_device::{Capabilities, DeviceError, Kernels, Leased, LinearBuffer};

/// One recorded dispatch.
///
/// Transfer and iteration calls carry the addresses of their source and
/// destination buffers so tests can follow data through the working pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KernelCall {
    AllocSurface { format: StorageFormat },
    AllocLinear { components: usize, element: ElementType },
    CopySurface { src: usize, dst: usize },
    ConvertSurface { from: StorageFormat, to: StorageFormat, src: usize, dst: usize },
    IteratePlanar { read: usize, write: usize },
    IterateVolume { read: usize, write: usize },
    LinearInit { dst: usize },
    LinearIterate { read: usize, write: usize },
    LinearFinish { src: usize },
    CopyLinearToSurface,
}

impl KernelCall {
    /// True for the per-step kernels.
    pub fn is_step(&self) -> bool {
        matches!(
            self,
            Self::IteratePlanar { .. } | Self::IterateVolume { .. } | Self::LinearIterate { .. }
        )
    }

    /// `(source, destination)` addresses of a transfer. Linear init and
    /// finish report only the working-buffer side; the other is 0.
    pub fn transfer_buffers(&self) -> Option<(usize, usize)> {
        match *self {
            Self::CopySurface { src, dst } | Self::ConvertSurface { src, dst, .. } => Some((src, dst)),
            Self::LinearInit { dst } => Some((0, dst)),
            Self::LinearFinish { src } => Some((src, 0)),
            _ => None,
        }
    }

    /// `(read, write)` addresses of a step call.
    pub fn step_buffers(&self) -> Option<(usize, usize)> {
        match *self {
            Self::IteratePlanar { read, write }
            | Self::IterateVolume { read, write }
            | Self::LinearIterate { read, write } => Some((read, write)),
            _ => None,
        }
    }
}

fn addr<T>(value: &T) -> usize {
    value as *const T as usize
}

/// Wraps a device, forwarding every call and logging it.
pub struct RecordingDevice<D> {
    inner: D,
    calls: Mutex<Vec<KernelCall>>,
}

impl<D> RecordingDevice<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The wrapped device.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Every call recorded so far, in dispatch order.
    pub fn calls(&self) -> Vec<KernelCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of step kernels dispatched.
    pub fn step_count(&self) -> usize {
        self.calls().iter().filter(|c| c.is_step()).count()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn record(&self, call: KernelCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

impl<D: Capabilities> Capabilities for RecordingDevice<D> {
    fn supports(&self, format: StorageFormat, dims: Dimensionality) -> bool {
        self.inner.supports(format, dims)
    }

    fn supports_direct_volume_write(&self) -> bool {
        self.inner.supports_direct_volume_write()
    }
}

impl<D: Kernels> Kernels for RecordingDevice<D> {
    fn alloc_surface(&self, extent: Extent, format: StorageFormat) -> Result<Leased<Surface>, DeviceError> {
        self.record(KernelCall::AllocSurface { format });
        self.inner.alloc_surface(extent, format)
    }

    fn alloc_linear(
        &self,
        cells: usize,
        components: usize,
        element: ElementType,
    ) -> Result<Leased<LinearBuffer>, DeviceError> {
        self.record(KernelCall::AllocLinear { components, element });
        self.inner.alloc_linear(cells, components, element)
    }

    fn copy_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError> {
        self.record(KernelCall::CopySurface {
            src: addr(src),
            dst: addr(&*dst),
        });
        self.inner.copy_surface(src, dst)
    }

    fn convert_surface(&self, src: &Surface, dst: &mut Surface) -> Result<(), DeviceError> {
        self.record(KernelCall::ConvertSurface {
            from: src.format(),
            to: dst.format(),
            src: addr(src),
            dst: addr(&*dst),
        });
        self.inner.convert_surface(src, dst)
    }

    fn iterate_planar(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError> {
        self.record(KernelCall::IteratePlanar {
            read: addr(read),
            write: addr(&*write),
        });
        self.inner.iterate_planar(init, read, write, mu)
    }

    fn iterate_volume(&self, init: &Surface, read: &Surface, write: &mut Surface, mu: f32) -> Result<(), DeviceError> {
        self.record(KernelCall::IterateVolume {
            read: addr(read),
            write: addr(&*write),
        });
        self.inner.iterate_volume(init, read, write, mu)
    }

    fn linear_init(&self, input: &Surface, out: &mut LinearBuffer) -> Result<(), DeviceError> {
        self.record(KernelCall::LinearInit { dst: addr(&*out) });
        self.inner.linear_init(input, out)
    }

    fn linear_iterate(
        &self,
        init: &Surface,
        read: &LinearBuffer,
        write: &mut LinearBuffer,
        mu: f32,
    ) -> Result<(), DeviceError> {
        self.record(KernelCall::LinearIterate {
            read: addr(read),
            write: addr(&*write),
        });
        self.inner.linear_iterate(init, read, write, mu)
    }

    fn linear_finish(&self, src: &LinearBuffer, dst: &mut LinearBuffer) -> Result<(), DeviceError> {
        self.record(KernelCall::LinearFinish { src: addr(src) });
        self.inner.linear_finish(src, dst)
    }

    fn copy_linear_to_surface(&self, src: &LinearBuffer, dst: &mut Surface) -> Result<(), DeviceError> {
        self.record(KernelCall::CopyLinearToSurface);
        self.inner.copy_linear_to_surface(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{constant_field, planar};
    use gvf_device::CpuDevice;

    #[test]
    fn forwards_and_records() {
        let dev = RecordingDevice::new(CpuDevice::new());
        let f = constant_field(planar(2, 2), ElementType::Float32, &[0.1, 0.2]);
        let mut out = dev.alloc_surface(f.extent(), f.format()).unwrap();
        dev.iterate_planar(f.surface(), f.surface(), &mut out, 0.1).unwrap();

        let calls = dev.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], KernelCall::AllocSurface { format: f.format() });
        assert!(calls[1].is_step());
        assert_eq!(dev.step_count(), 1);
        assert_eq!(dev.inner().live_allocations(), 1);

        dev.clear();
        assert!(dev.calls().is_empty());
    }
}
