//! Structured events emitted by a solver call.
//!
//! Delivery is best effort: events go out with a non-blocking
//! `try_send`, and a full or disconnected channel never affects the
//! call.

use crossbeam_channel::Sender;
use gvf_core::{Dimensionality, Precision, StorageFormat};

use crate::metrics::StrategyKind;

/// An informational event from one solver call.
#[derive(Clone, Debug, PartialEq)]
pub enum SolverEvent {
    /// Format negotiation finished.
    FormatSelected {
        /// Grid dimensionality of the input.
        dims: Dimensionality,
        /// Requested precision.
        requested: Precision,
        /// Format the working buffers use.
        format: StorageFormat,
        /// True if the requested precision could not be honoured.
        fallback: bool,
    },
    /// The call finished and the output is materialized.
    Completed {
        /// Strategy that ran.
        strategy: StrategyKind,
        /// Steps executed.
        steps: u32,
        /// Wall-clock time for the whole call, in microseconds.
        total_us: u64,
    },
}

pub(crate) fn emit(events: Option<&Sender<SolverEvent>>, event: SolverEvent) {
    if let Some(tx) = events {
        if tx.try_send(event).is_err() {
            log::debug!("solver event dropped: channel full or disconnected");
        }
    }
}
