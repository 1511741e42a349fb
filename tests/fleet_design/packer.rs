use caravel::cosmic::Orbit;
use caravel::md::{AdrPacker, AssemblyOpts, CarrierKind, PackingStrategy};
use caravel::{Constellation, FleetError};

use super::{leo_sat, servicer, upper_stage, FixedCostModel};

fn debris_field(count: usize) -> Constellation {
    let sats = (0..count)
        .map(|i| {
            let mut sat = leo_sat(&format!("junk-{i}"), 360.0 * i as f64 / count as f64, 0.0);
            sat.orbits = sat
                .orbits
                .with_disposal(Orbit::circular(300.0, 53.0, 0.0, 0.0));
            sat
        })
        .collect();
    Constellation::new("debris", sats)
}

#[test]
fn rollback_caps_servicers_at_parent_budget() {
    let _ = pretty_env_logger::try_init();
    // Parent budget 35 kg at 10 kg per leg: exactly 3 servicers fit, the
    // fourth addition overruns and must be rolled back.
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    let packer = AdrPacker::new(
        &model,
        upper_stage(35.0),
        servicer(),
        PackingStrategy::SinglePicker,
    )
    .unwrap()
    .with_opts(AssemblyOpts::builder().execution_limit(1).build());

    let fleet = packer.pack(&debris_field(5)).unwrap();

    let parents: Vec<_> = fleet
        .carriers
        .iter()
        .filter(|c| c.design.kind == CarrierKind::UpperStage)
        .collect();
    let servicers: Vec<_> = fleet
        .carriers
        .iter()
        .filter(|c| c.design.kind == CarrierKind::Servicer)
        .collect();

    assert_eq!(parents.len(), 1);
    assert!(parents[0].is_feasible());
    assert_eq!(servicers.len(), 3);
    for svc in &servicers {
        assert_eq!(svc.manifest.len(), 1, "one satellite per servicer");
        assert!(svc.is_feasible());
    }
    // Two targets remain for the next iteration
    assert_eq!(fleet.unassigned.len(), 2);
}

#[test]
fn pack_drains_the_field_across_parents() {
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    let packer = AdrPacker::new(
        &model,
        upper_stage(35.0),
        servicer(),
        PackingStrategy::SinglePicker,
    )
    .unwrap();

    let fleet = packer.pack(&debris_field(5)).unwrap();
    assert!(fleet.is_complete());

    let parent_count = fleet
        .carriers
        .iter()
        .filter(|c| c.design.kind == CarrierKind::UpperStage)
        .count();
    let servicer_count = fleet
        .carriers
        .iter()
        .filter(|c| c.design.kind == CarrierKind::Servicer)
        .count();
    assert_eq!(parent_count, 2, "3 + 2 targets across two parents");
    assert_eq!(servicer_count, 5);
    assert_eq!(fleet.assigned_count(), 5);
}

#[test]
fn whole_queue_fits_one_parent() {
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    let packer = AdrPacker::new(
        &model,
        upper_stage(100.0),
        servicer(),
        PackingStrategy::SinglePicker,
    )
    .unwrap();

    let fleet = packer.pack(&debris_field(4)).unwrap();
    assert!(fleet.is_complete());
    assert_eq!(
        fleet
            .carriers
            .iter()
            .filter(|c| c.design.kind == CarrierKind::UpperStage)
            .count(),
        1
    );
}

#[test]
fn multi_picker_fails_fast() {
    let model = FixedCostModel {
        cost_per_leg_kg: 10.0,
    };
    let result = AdrPacker::new(
        &model,
        upper_stage(35.0),
        servicer(),
        PackingStrategy::MultiPicker,
    );
    assert!(matches!(
        result,
        Err(FleetError::UnsupportedStrategy {
            strategy: PackingStrategy::MultiPicker
        })
    ));
}
