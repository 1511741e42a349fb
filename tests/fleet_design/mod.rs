mod assembler;
mod packer;
mod sequencer;
mod sizing;

use caravel::cosmic::{Orbit, OrbitSet, Satellite};
use caravel::dynamics::{ManeuverError, ManeuverModel, PhasingMode, Thruster, TransferCost};
use caravel::linalg::Vector3;
use caravel::md::{CarrierDesign, CarrierKind};
use caravel::time::Unit;
use caravel::Constellation;

/// A synthetic maneuver cost oracle: every leg burns the same propellant mass,
/// regardless of geometry. Lets tests craft exact capacity crossover points.
pub struct FixedCostModel {
    pub cost_per_leg_kg: f64,
}

impl ManeuverModel for FixedCostModel {
    fn nodal_precession_rate_deg_day(&self, _orbit: &Orbit) -> f64 {
        -5.0
    }

    fn transfer_cost(
        &self,
        _from: &Orbit,
        _to: &Orbit,
        _wet_mass_kg: f64,
        _thruster: &Thruster,
        _phasing: PhasingMode,
    ) -> Result<TransferCost, ManeuverError> {
        Ok(TransferCost {
            delta_v_km_s: 0.1,
            dv_rtn_km_s: Vector3::new(0.0, 0.1, 0.0),
            propellant_kg: self.cost_per_leg_kg,
            duration: 1.0 * Unit::Hour,
        })
    }
}

pub fn leo_sat(name: &str, raan_deg: f64, ta_deg: f64) -> Satellite {
    Satellite::new(
        name,
        100.0,
        0.8,
        OrbitSet::single(Orbit::circular(550.0, 53.0, raan_deg, ta_deg)),
    )
}

/// A ring of `count` satellites spread evenly in RAAN.
pub fn ring(count: usize) -> Constellation {
    let sats = (0..count)
        .map(|i| {
            leo_sat(
                &format!("sat-{i:02}"),
                360.0 * i as f64 / count as f64,
                0.0,
            )
        })
        .collect();
    Constellation::new("ring", sats)
}

pub fn kickstage(propellant_mass_kg: f64) -> CarrierDesign {
    CarrierDesign::builder()
        .name("otv")
        .dry_mass_kg(350.0)
        .propellant_mass_kg(propellant_mass_kg)
        .thruster(Thruster {
            thrust_N: 400.0,
            isp_s: 320.0,
        })
        .insertion_orbit(Orbit::circular(500.0, 53.0, 0.0, 0.0))
        .build()
}

pub fn upper_stage(propellant_mass_kg: f64) -> CarrierDesign {
    CarrierDesign::builder()
        .kind(CarrierKind::UpperStage)
        .name("hauler")
        .dry_mass_kg(900.0)
        .propellant_mass_kg(propellant_mass_kg)
        .thruster(Thruster {
            thrust_N: 2000.0,
            isp_s: 330.0,
        })
        .insertion_orbit(Orbit::circular(500.0, 53.0, 0.0, 0.0))
        .build()
}

pub fn servicer() -> CarrierDesign {
    CarrierDesign::builder()
        .kind(CarrierKind::Servicer)
        .name("svc")
        .dry_mass_kg(40.0)
        .propellant_mass_kg(25.0)
        .thruster(Thruster {
            thrust_N: 20.0,
            isp_s: 220.0,
        })
        .insertion_orbit(Orbit::circular(550.0, 53.0, 0.0, 0.0))
        .build()
}
