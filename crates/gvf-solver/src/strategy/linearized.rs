//! Fallback for devices that cannot write volumetric surfaces.
//!
//! Stages:
//!
//! 1. init: flatten the input volume into raw 3-component vectors
//! 2. iterate: the GVF step over flat buffers
//! 3. finish: repack into four channels in the output's element type,
//!    then copy into the output surface
//!
//! Only the final copy touches a volumetric surface, and that is a plain
//! buffer-to-image transfer rather than a kernel write.

use std::time::Instant;

use gvf_arena::PingPong;
use gvf_core::VectorField;
use gvf_device::Device;

use super::{Job, Outcome, SolverStrategy};
use crate::error::GvfError;
use crate::metrics::{micros_since, StrategyKind, TransferKind};

const FLAT_COMPONENTS: usize = 3;
const PACKED_CHANNELS: usize = 4;

/// Driver for 3D fields over flat linear buffers.
#[derive(Clone, Copy, Debug, Default)]
pub struct VolumetricLinear;

impl SolverStrategy for VolumetricLinear {
    fn kind(&self) -> StrategyKind {
        StrategyKind::VolumetricLinear
    }

    fn solve(&self, device: &dyn Device, job: &Job<'_>) -> Result<Outcome, GvfError> {
        let input = job.input;
        let init = input.surface();
        let cells = input.extent().cell_count();
        let element = job.format.element;

        let seed_start = Instant::now();
        let first = device.alloc_linear(cells, FLAT_COMPONENTS, element)?;
        let second = device.alloc_linear(cells, FLAT_COMPONENTS, element)?;
        let mut buffers = PingPong::new(first, second);
        device.linear_init(init, buffers.seed_mut())?;
        let seed_us = micros_since(seed_start);

        let iterate_start = Instant::now();
        for step in 0..job.iterations {
            buffers.step(|read, write| device.linear_iterate(init, read, write, job.mu))?;
            log::trace!(
                "linear step {}/{} done, result in {:?}",
                step + 1,
                job.iterations,
                buffers.result_slot()
            );
        }
        let iterate_us = micros_since(iterate_start);

        let materialize_start = Instant::now();
        let mut field = VectorField::zeros_like(input);
        let mut packed = device.alloc_linear(cells, PACKED_CHANNELS, field.format().element)?;
        device.linear_finish(buffers.result(), &mut packed)?;
        device.copy_linear_to_surface(&packed, field.surface_mut())?;
        let materialize_us = micros_since(materialize_start);

        Ok(Outcome {
            field,
            steps: buffers.steps_completed(),
            result_slot: buffers.result_slot(),
            seed: TransferKind::Convert,
            materialize: TransferKind::Convert,
            seed_us,
            iterate_us,
            materialize_us,
        })
    }
}
