//! Test utilities for GVF development.
//!
//! Provides field fixtures ([`constant_field`], [`impulse_field`]) and two
//! device wrappers around any [`Device`](gvf_device::Device):
//!
//! - [`RecordingDevice`] logs every kernel dispatch, so tests can count
//!   steps and follow data through the working buffers.
//! - [`FaultyDevice`] fails step kernels after a fixed budget.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod faulty;
pub mod fixtures;
pub mod recording;

pub use faulty::FaultyDevice;
pub use fixtures::{constant_field, impulse_field, planar, volume};
pub use recording::{KernelCall, RecordingDevice};
