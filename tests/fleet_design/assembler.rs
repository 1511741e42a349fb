use std::collections::HashSet;

use caravel::dynamics::TwoImpulse;
use caravel::md::{AssemblyOpts, FleetAssembler, SatelliteQueue};
use caravel::{Constellation, FleetError};

use super::{kickstage, ring, FixedCostModel};

#[test]
fn drains_queue_into_disjoint_manifests() {
    let _ = pretty_env_logger::try_init();
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    // capacity 3 per carrier, 7 satellites: expect manifests of 3, 3 and 1
    let constellation = ring(7);
    let fleet = FleetAssembler::new(&model, kickstage(30.0))
        .assemble(&constellation)
        .unwrap();

    assert!(fleet.is_complete());
    let sizes: Vec<usize> = fleet.carriers.iter().map(|c| c.manifest.len()).collect();
    assert_eq!(sizes, vec![3, 3, 1]);

    // Pairwise disjoint manifests whose union is the original set
    let mut seen = HashSet::new();
    for carrier in &fleet.carriers {
        assert!(carrier.is_feasible(), "{carrier} overran its budget");
        assert!(carrier.converged);
        for sat in &carrier.manifest {
            assert!(seen.insert(sat.name.clone()), "{} assigned twice", sat.name);
        }
    }
    let original: HashSet<String> = constellation
        .satellites
        .iter()
        .map(|s| s.name.clone())
        .collect();
    assert_eq!(seen, original);
}

#[test]
fn execution_limit_yields_partial_fleet() {
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    // capacity 1 per carrier, 4 satellites, limit 3: one satellite left over
    let constellation = ring(4);
    let opts = AssemblyOpts::builder().execution_limit(3).build();
    let fleet = FleetAssembler::with_opts(&model, kickstage(15.0), opts)
        .assemble(&constellation)
        .unwrap();

    assert!(!fleet.is_complete());
    assert_eq!(fleet.carriers.len(), 3);
    assert_eq!(fleet.assigned_count(), 3);
    assert_eq!(fleet.unassigned.len(), 1);
    // The remainder plus the manifests still cover the original set
    assert_eq!(fleet.assigned_count() + fleet.unassigned.len(), 4);
}

#[test]
fn committed_carriers_never_negative_with_physical_model() {
    use caravel::cosmic::{Orbit, OrbitSet, Satellite};

    let model = TwoImpulse::default();
    // String of pearls in a single plane, slightly staggered in altitude, so
    // the physical model yields cheap legs and a non-trivial capacity.
    let sats = (0..6)
        .map(|i| {
            Satellite::new(
                format!("pearl-{i}"),
                100.0,
                0.8,
                OrbitSet::single(Orbit::circular(
                    550.0 + 10.0 * i as f64,
                    53.0,
                    0.0,
                    60.0 * i as f64,
                )),
            )
        })
        .collect();
    let constellation = Constellation::new("pearls", sats);

    let fleet = FleetAssembler::new(&model, kickstage(1200.0))
        .assemble(&constellation)
        .unwrap();

    assert!(fleet.is_complete());
    assert!(!fleet.carriers.is_empty());
    for carrier in &fleet.carriers {
        assert!(
            carrier.remaining_propellant_kg() >= 0.0,
            "{carrier} committed with a propellant deficit"
        );
    }
    assert_eq!(
        fleet.assigned_count() + fleet.unassigned.len(),
        constellation.len()
    );
}

#[test]
fn empty_constellation_is_a_caller_error() {
    let model = TwoImpulse::default();
    let result = FleetAssembler::new(&model, kickstage(800.0)).assemble(&Constellation::default());
    assert!(matches!(result, Err(FleetError::EmptySatelliteSet)));
}

#[test]
fn empty_queue_is_a_caller_error() {
    let model = TwoImpulse::default();
    let result = FleetAssembler::new(&model, kickstage(800.0))
        .assemble_ordered(SatelliteQueue::from_order(Vec::new()));
    assert!(matches!(result, Err(FleetError::EmptySatelliteSet)));
}
