//! End-to-end properties of `EulerGvf::run` on the CPU device.

use gvf_arena::Slot;
use gvf_core::quantize::SNORM16_SCALE;
use gvf_core::{Dimensionality, ElementType, Extent, IterationCount, Precision, StorageFormat, ValidationError, VectorField};
use gvf_device::{CapabilitySet, CpuDevice};
use gvf_solver::{EulerGvf, GvfError, StrategyKind};
use gvf_test_utils::{constant_field, impulse_field, planar, KernelCall, RecordingDevice};
use proptest::prelude::*;

fn arb_extent() -> impl Strategy<Value = Extent> {
    prop_oneof![
        (1u32..10, 1u32..10).prop_map(|(w, h)| planar(w, h)),
        (1u32..6, 1u32..6, 1u32..6).prop_map(|(w, h, d)| Extent::volume(w, h, d).unwrap()),
    ]
}

fn arb_field() -> impl Strategy<Value = VectorField> {
    (arb_extent(), prop_oneof![Just(ElementType::Float32), Just(ElementType::Snorm16)]).prop_flat_map(
        |(extent, element)| {
            let n = extent.cell_count() * extent.dims().components() as usize;
            prop::collection::vec(-0.5f32..=0.5, n).prop_map(move |values| {
                VectorField::from_components(extent, extent.dims().components(), element, &values).unwrap()
            })
        },
    )
}

fn arb_precision() -> impl Strategy<Value = Precision> {
    prop_oneof![Just(Precision::Bits16), Just(Precision::Bits32)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn output_shape_matches_input(
        input in arb_field(),
        precision in arb_precision(),
        iterations in 1u32..6,
        volume_write in any::<bool>(),
    ) {
        let dev = CpuDevice::with_capabilities(CapabilitySet::all().with_volume_write(volume_write));
        let solver = EulerGvf::builder()
            .mu(0.15)
            .iterations(iterations)
            .precision(precision)
            .build()
            .unwrap();
        let before = input.clone();
        let out = solver.run(&dev, &input).unwrap().field;

        prop_assert_eq!(out.extent(), input.extent());
        prop_assert_eq!(out.components(), input.components());
        prop_assert_eq!(out.format(), input.format());
        prop_assert_eq!(&input, &before);
        prop_assert_eq!(dev.live_allocations(), 0);
    }

    #[test]
    fn constant_field_is_unchanged_at_32_bit(
        extent in arb_extent(),
        value in prop::array::uniform3(-1.0f32..=1.0),
        mu in 0.0001f32..=0.2,
        iterations in 1u32..12,
    ) {
        let components = extent.dims().components() as usize;
        let input = constant_field(extent, ElementType::Float32, &value[..components]);
        let solver = EulerGvf::builder().mu(mu).iterations(iterations).storage_32bit().build().unwrap();
        let out = solver.run(&CpuDevice::new(), &input).unwrap().field;
        prop_assert_eq!(out, input);
    }

    #[test]
    fn constant_field_stays_within_a_quantization_step_at_16_bit(
        extent in arb_extent(),
        value in prop::array::uniform3(-0.5f32..=0.5),
        mu in 0.0001f32..=0.2,
        iterations in 1u32..12,
    ) {
        let components = extent.dims().components() as usize;
        let input = constant_field(extent, ElementType::Float32, &value[..components]);
        let solver = EulerGvf::builder().mu(mu).iterations(iterations).storage_16bit().build().unwrap();
        let out = solver.run(&CpuDevice::new(), &input).unwrap().field;
        let tolerance = 2.0 / SNORM16_SCALE;
        for (got, want) in out.to_components().iter().zip(input.to_components()) {
            prop_assert!((got - want).abs() <= tolerance, "{got} vs {want}");
        }
    }
}

#[test]
fn mu_outside_range_fails_before_allocating() {
    let dev = CpuDevice::new();
    let input = constant_field(planar(4, 4), ElementType::Float32, &[0.1, 0.1]);
    for mu in [0.0, 0.25] {
        let solver = EulerGvf::default();
        let mut params = *solver.params();
        params.mu = mu;
        assert!(EulerGvf::new(params).is_err(), "mu = {mu} accepted");
    }
    for mu in [0.2, 0.0001] {
        let solver = EulerGvf::builder().mu(mu).iterations(2).build().unwrap();
        assert!(solver.run(&dev, &input).is_ok(), "mu = {mu} rejected");
    }
}

#[test]
fn component_mismatch_fails_before_allocating() {
    let dev = CpuDevice::new();
    let input = constant_field(planar(4, 4), ElementType::Float32, &[0.1, 0.1, 0.1]);
    let err = EulerGvf::default().run(&dev, &input).unwrap_err();
    assert_eq!(
        err,
        GvfError::Validation(ValidationError::ComponentMismatch {
            dims: Dimensionality::Two,
            components: 3,
        })
    );
    assert_eq!(dev.total_allocations(), 0);
}

#[test]
fn zero_iterations_rejected_auto_resolves_to_longest_axis() {
    assert_eq!(
        EulerGvf::builder().iterations(0).build().unwrap_err(),
        ValidationError::ZeroIterations
    );

    let dev = RecordingDevice::new(CpuDevice::new());
    let input = constant_field(planar(64, 48), ElementType::Float32, &[0.0, 0.0]);
    let solver = EulerGvf::builder().auto_iterations().build().unwrap();
    let result = solver.run(&dev, &input).unwrap();

    assert_eq!(dev.step_count(), 64);
    assert_eq!(result.metrics.iterations, 64);
    assert_eq!(result.metrics.steps, 64);
    assert_eq!(solver.iterations(), IterationCount::Auto);
}

/// Follows the seed buffer through the recorded dispatches and checks which
/// buffer the output was read from.
fn materialized_from_seed(iterations: u32) -> (bool, Slot) {
    let dev = RecordingDevice::new(CpuDevice::new());
    let input = constant_field(planar(5, 3), ElementType::Float32, &[0.2, -0.1]);
    let solver = EulerGvf::builder().iterations(iterations).build().unwrap();
    let result = solver.run(&dev, &input).unwrap();

    let calls = dev.calls();
    let transfers: Vec<(usize, usize)> = calls.iter().filter_map(KernelCall::transfer_buffers).collect();
    assert_eq!(transfers.len(), 2, "{calls:?}");
    let (_, seed) = transfers[0];
    let (source, _) = transfers[1];

    let steps: Vec<(usize, usize)> = calls.iter().filter_map(KernelCall::step_buffers).collect();
    assert_eq!(steps.len(), iterations as usize);
    assert_eq!(steps[0].0, seed);
    for pair in steps.windows(2) {
        assert_ne!(pair[0].0, pair[0].1);
        assert_eq!(pair[0].1, pair[1].0);
    }
    assert_eq!(steps[steps.len() - 1].1, source);

    (source == seed, result.metrics.result_slot)
}

#[test]
fn odd_counts_materialize_from_the_other_buffer() {
    for n in [1, 3, 7] {
        assert_eq!(materialized_from_seed(n), (false, Slot::Second), "n = {n}");
    }
}

#[test]
fn even_counts_materialize_from_the_seed_buffer() {
    for n in [2, 4, 10] {
        assert_eq!(materialized_from_seed(n), (true, Slot::First), "n = {n}");
    }
}

#[test]
fn impulse_spreads_monotonically() {
    let extent = planar(21, 21);
    let input = impulse_field(extent, ElementType::Float32, (10, 10, 0), &[0.3, 0.4]);
    let dev = CpuDevice::new();

    let spread: Vec<usize> = [1, 10, 100]
        .iter()
        .map(|&n| {
            let solver = EulerGvf::builder().mu(0.1).iterations(n).storage_32bit().build().unwrap();
            let out = solver.run(&dev, &input).unwrap().field;
            (0..extent.cell_count()).filter(|&c| out.magnitude(c) > 0.0).count()
        })
        .collect();

    // Diamond of radius n around the impulse, clipped to the grid.
    assert_eq!(spread, vec![5, 221, 441]);
    assert!(spread.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn edge_vectors_are_retained() {
    let extent = planar(9, 9);
    let input = impulse_field(extent, ElementType::Float32, (4, 4, 0), &[0.6, 0.8]);
    let solver = EulerGvf::builder().mu(0.2).iterations(50).storage_32bit().build().unwrap();
    let out = solver.run(&CpuDevice::new(), &input).unwrap().field;

    let center = out.vector_at(4, 4, 0);
    assert!(out.magnitude(extent.index(4, 4, 0)) > 0.5, "edge vector washed out: {center:?}");
    assert!((center[1] / center[0] - 4.0 / 3.0).abs() < 1e-4, "direction changed: {center:?}");
    assert!(out.magnitude(extent.index(4, 4, 0)) > out.magnitude(extent.index(0, 0, 0)));
}

#[test]
fn format_fallback_is_reported() {
    let dev = CpuDevice::with_capabilities(CapabilitySet::float_only());
    let input = constant_field(planar(3, 3), ElementType::Float32, &[0.1, 0.2]);
    let result = EulerGvf::builder().iterations(1).build().unwrap().run(&dev, &input).unwrap();
    assert_eq!(result.metrics.format, StorageFormat::RG_F32);
    assert!(result.metrics.fallback);
    assert_eq!(result.metrics.strategy, StrategyKind::Planar);
}

#[test]
fn unsupported_device_fails_without_allocating() {
    let dev = CpuDevice::with_capabilities(CapabilitySet::empty());
    let input = constant_field(planar(3, 3), ElementType::Float32, &[0.1, 0.2]);
    let err = EulerGvf::default().run(&dev, &input).unwrap_err();
    assert!(matches!(
        err,
        GvfError::UnsupportedConfiguration { ref tried, .. } if tried.len() == 4
    ));
    assert_eq!(dev.total_allocations(), 0);
}
