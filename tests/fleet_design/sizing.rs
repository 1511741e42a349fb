use rstest::rstest;

use caravel::dynamics::{PhasingMode, TwoImpulse};
use caravel::md::{size_carrier, SizingError, SizingOpts};

use super::{kickstage, ring, FixedCostModel};

#[rstest]
#[case(55.0, 5)] // feasible at 5, infeasible at 6: the exact crossover
#[case(9.9, 0)] // cannot even service the queue head
#[case(200.0, 10)] // budget covers the whole prefix
fn capacity_matches_crafted_crossover(#[case] propellant_kg: f64, #[case] expected: usize) {
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    let constellation = ring(10);
    let sizing = size_carrier(
        &model,
        &kickstage(propellant_kg),
        0,
        &constellation.satellites,
        SizingOpts::default(),
    )
    .unwrap();

    assert_eq!(sizing.capacity, expected);
    assert_eq!(sizing.carrier.manifest.len(), expected);
    assert!(sizing.carrier.is_feasible());
    assert!(sizing.carrier.converged);
}

#[test]
fn probe_count_is_logarithmic() {
    // capacity 20 out of a 64-satellite prefix
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    let constellation = ring(64);
    let sizing = size_carrier(
        &model,
        &kickstage(205.0),
        0,
        &constellation.satellites,
        SizingOpts::default(),
    )
    .unwrap();

    assert_eq!(sizing.capacity, 20);
    // ceil(log2(64)) + 1 simulations at most
    assert!(sizing.probes <= 7, "took {} probes", sizing.probes);
}

#[test]
fn exhausted_iteration_budget_is_an_error() {
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    // One iteration only moves the bracket to [5; 10], far from collapse
    let constellation = ring(10);
    let result = size_carrier(
        &model,
        &kickstage(55.0),
        0,
        &constellation.satellites,
        SizingOpts::builder().max_iterations(1).build(),
    );

    match result {
        Err(SizingError::NonConvergence {
            iterations,
            low,
            high,
        }) => {
            assert_eq!(iterations, 1);
            assert!(low < high, "bracket [{low}; {high}] already collapsed");
        }
        other => panic!("expected NonConvergence, got {other:?}"),
    }
}

#[test]
fn remaining_propellant_monotone_in_prefix_length() {
    let _ = pretty_env_logger::try_init();
    let model = TwoImpulse::default();
    let constellation = ring(6);
    let design = kickstage(800.0);

    let mut previous = f64::INFINITY;
    for count in 1..=constellation.len() {
        let mut carrier = design
            .instantiate(0)
            .with_manifest(constellation.satellites[..count].to_vec());
        let report = carrier.simulate(&model, PhasingMode::Impulsive).unwrap();
        assert!(
            report.propellant_remaining_kg <= previous,
            "prefix {count} left more propellant than prefix {}",
            count - 1
        );
        previous = report.propellant_remaining_kg;
    }
}

#[test]
fn phasing_refinement_never_costs_margin() {
    let model = TwoImpulse::default();
    let constellation = ring(8);

    let plain = size_carrier(
        &model,
        &kickstage(900.0),
        0,
        &constellation.satellites,
        SizingOpts::default(),
    )
    .unwrap();
    let refined = size_carrier(
        &model,
        &kickstage(900.0),
        0,
        &constellation.satellites,
        SizingOpts::builder().refine_phasing(true).build(),
    )
    .unwrap();

    assert_eq!(plain.capacity, refined.capacity);
    assert!(
        refined.carrier.remaining_propellant_kg() >= plain.carrier.remaining_propellant_kg(),
        "refinement reduced the margin"
    );
}
