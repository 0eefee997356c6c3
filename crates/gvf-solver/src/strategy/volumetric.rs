use gvf_device::Device;

use super::{surface, Job, Outcome, SolverStrategy};
use crate::error::GvfError;
use crate::metrics::StrategyKind;

/// Driver for 3D fields on devices whose kernels can write volumetric
/// surfaces. Same shape as [`Planar`](super::Planar) with a third axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct VolumetricDirect;

impl SolverStrategy for VolumetricDirect {
    fn kind(&self) -> StrategyKind {
        StrategyKind::VolumetricDirect
    }

    fn solve(&self, device: &dyn Device, job: &Job<'_>) -> Result<Outcome, GvfError> {
        surface::drive(device, job, |device, init, read, write, mu| {
            device.iterate_volume(init, read, write, mu)
        })
    }
}
