//! Shared driver for strategies that iterate on addressable surfaces.

use std::time::Instant;

use gvf_arena::PingPong;
use gvf_core::{Surface, VectorField};
use gvf_device::{Device, DeviceError};

use super::{Job, Outcome};
use crate::error::GvfError;
use crate::metrics::{micros_since, TransferKind};

/// A single GVF step kernel: `(device, init, read, write, mu)`.
pub(super) type StepKernel = fn(&dyn Device, &Surface, &Surface, &mut Surface, f32) -> Result<(), DeviceError>;

pub(super) fn drive(device: &dyn Device, job: &Job<'_>, kernel: StepKernel) -> Result<Outcome, GvfError> {
    let input = job.input;
    let init = input.surface();
    let extent = input.extent();

    let seed_start = Instant::now();
    let first = device.alloc_surface(extent, job.format)?;
    let second = device.alloc_surface(extent, job.format)?;
    let mut buffers = PingPong::new(first, second);
    let seed = transfer(device, init, buffers.seed_mut())?;
    let seed_us = micros_since(seed_start);

    let iterate_start = Instant::now();
    for step in 0..job.iterations {
        buffers.step(|read, write| kernel(device, init, read, write, job.mu))?;
        log::trace!(
            "step {}/{} done, result in {:?}",
            step + 1,
            job.iterations,
            buffers.result_slot()
        );
    }
    let iterate_us = micros_since(iterate_start);

    let materialize_start = Instant::now();
    let mut field = VectorField::zeros_like(input);
    let materialize = transfer(device, buffers.result(), field.surface_mut())?;
    let materialize_us = micros_since(materialize_start);

    Ok(Outcome {
        field,
        steps: buffers.steps_completed(),
        result_slot: buffers.result_slot(),
        seed,
        materialize,
        seed_us,
        iterate_us,
        materialize_us,
    })
}

/// Copy when the formats match bit for bit, convert otherwise.
fn transfer(device: &dyn Device, src: &Surface, dst: &mut Surface) -> Result<TransferKind, DeviceError> {
    if src.format() == dst.format() {
        device.copy_surface(src, dst)?;
        Ok(TransferKind::Copy)
    } else {
        device.convert_surface(src, dst)?;
        Ok(TransferKind::Convert)
    }
}
