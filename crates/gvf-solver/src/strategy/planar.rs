use gvf_device::Device;

use super::{surface, Job, Outcome, SolverStrategy};
use crate::error::GvfError;
use crate::metrics::StrategyKind;

/// Driver for 2D fields on addressable planar surfaces.
#[derive(Clone, Copy, Debug, Default)]
pub struct Planar;

impl SolverStrategy for Planar {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Planar
    }

    fn solve(&self, device: &dyn Device, job: &Job<'_>) -> Result<Outcome, GvfError> {
        surface::drive(device, job, |device, init, read, write, mu| {
            device.iterate_planar(init, read, write, mu)
        })
    }
}
