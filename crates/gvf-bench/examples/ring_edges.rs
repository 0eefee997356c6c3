//! Diffuse a synthetic ring edge map and report how far the field reached.
//!
//! Run with: `cargo run --example ring_edges -p gvf-bench`

use gvf_bench::ring_edges;
use gvf_core::{ElementType, Extent};
use gvf_device::{CapabilitySet, CpuDevice};
use gvf_solver::{EulerGvf, SolverEvent};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let extent = Extent::planar(128, 128)?;
    let edges = ring_edges(extent, ElementType::Float32);
    let (tx, rx) = crossbeam_channel::unbounded();

    let solver = EulerGvf::builder()
        .mu(0.2)
        .auto_iterations()
        .events(tx)
        .build()?;

    for (label, caps) in [
        ("full device", CapabilitySet::all()),
        ("float-only device", CapabilitySet::float_only()),
    ] {
        let result = solver.run(&CpuDevice::with_capabilities(caps), &edges)?;
        let m = &result.metrics;
        let reached = (0..extent.cell_count())
            .filter(|&c| result.field.magnitude(c) > 1e-3)
            .count();
        println!(
            "{label}: {} via {} storage{} in {} steps, {:.1} ms; {reached}/{} cells above 1e-3",
            m.strategy,
            m.format,
            if m.fallback { " (fallback)" } else { "" },
            m.steps,
            m.total_us as f64 / 1000.0,
            extent.cell_count(),
        );
    }

    for event in rx.try_iter() {
        if let SolverEvent::FormatSelected { format, fallback, .. } = event {
            println!("event: format {format} selected (fallback: {fallback})");
        }
    }
    Ok(())
}
