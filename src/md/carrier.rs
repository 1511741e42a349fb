/*
    Caravel, orbital carrier fleet design
    Copyright (C) 2026 Caravel Developers

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

use std::fmt;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::cosmic::{Orbit, SatState, Satellite};
use crate::dynamics::{ManeuverError, ManeuverModel, PhasingMode, Thruster};
use crate::io::ConfigRepr;
use crate::time::Duration;

/// The roles a carrier vehicle can fill.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarrierKind {
    /// Direct-injection vehicle deploying satellites one drop-off at a time
    Kickstage,
    /// Parent vehicle ferrying disposable servicers to removal targets
    UpperStage,
    /// Single-target vehicle riding on an upper stage
    Servicer,
}

/// The reusable definition of a carrier: dry mass, propellant budget, thruster
/// and insertion orbit. Acts as the carrier factory, every sizing attempt
/// instantiates a fresh [`Carrier`] from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(doc)]
pub struct CarrierDesign {
    #[builder(default = CarrierKind::Kickstage)]
    pub kind: CarrierKind,
    #[builder(setter(into))]
    pub name: String,
    pub dry_mass_kg: f64,
    pub propellant_mass_kg: f64,
    pub thruster: Thruster,
    pub insertion_orbit: Orbit,
}

impl ConfigRepr for CarrierDesign {}

impl CarrierDesign {
    /// Dry mass plus the full propellant budget, in kg.
    pub fn wet_mass_kg(&self) -> f64 {
        self.dry_mass_kg + self.propellant_mass_kg
    }

    /// Instantiates a fresh carrier with an empty manifest and an untouched
    /// propellant budget.
    pub fn instantiate(&self, id: usize) -> Carrier {
        Carrier {
            design: self.clone(),
            id,
            manifest: Vec::new(),
            report: SimReport::untouched(self.propellant_mass_kg),
            converged: false,
        }
    }
}

/// A carrier instance: a design, an identity, an ordered manifest of assigned
/// satellites and the simulation report for that manifest.
///
/// A carrier is never updated incrementally. Because plane-change costs depend
/// on the visiting order, the total cost of a manifest is not the sum of
/// per-satellite costs, so any change to the candidate manifest requires a full
/// re-simulation.
#[derive(Clone, Debug)]
pub struct Carrier {
    pub design: CarrierDesign,
    pub id: usize,
    pub manifest: Vec<Satellite>,
    pub report: SimReport,
    /// Set once the sizing or packing search has locked in this design
    pub converged: bool,
}

impl Carrier {
    /// Replaces the manifest. The previous simulation report becomes stale and
    /// must be refreshed with [`Carrier::simulate`].
    pub fn with_manifest(mut self, manifest: Vec<Satellite>) -> Self {
        self.manifest = manifest;
        self.report = SimReport::untouched(self.design.propellant_mass_kg);
        self
    }

    /// Re-simulates this carrier against its full manifest, in manifest order:
    /// transfer to each satellite's default orbit, release it, continue from
    /// there. The report's remaining propellant is signed, a deficit marks the
    /// manifest infeasible rather than raising an error.
    pub fn simulate(
        &mut self,
        model: &dyn ManeuverModel,
        phasing: PhasingMode,
    ) -> Result<&SimReport, ManeuverError> {
        let stops: Vec<Stop> = self
            .manifest
            .iter()
            .map(|sat| Stop {
                orbit: *sat.default_orbit(),
                release_mass_kg: sat.mass_kg,
                label: sat.name.clone(),
            })
            .collect();
        self.report = simulate_stops(&self.design, &stops, model, phasing)?;
        Ok(&self.report)
    }

    /// Marks every satellite of the manifest as assigned. Called exactly once,
    /// when the carrier is committed to a fleet.
    pub(crate) fn mark_assigned(&mut self) {
        for sat in &mut self.manifest {
            sat.state = SatState::Assigned;
        }
    }

    pub fn remaining_propellant_kg(&self) -> f64 {
        self.report.propellant_remaining_kg
    }

    pub fn is_feasible(&self) -> bool {
        self.report.propellant_remaining_kg >= 0.0
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:?} {} #{}: {} satellites, {:.1} kg propellant margin",
            self.design.kind,
            self.design.name,
            self.id,
            self.manifest.len(),
            self.report.propellant_remaining_kg
        )
    }
}

/// One waypoint of a carrier simulation: an orbit to reach and the payload mass
/// released there. Deployment releases the satellite itself; packing releases a
/// whole servicer.
#[derive(Clone, Debug)]
pub(crate) struct Stop {
    pub orbit: Orbit,
    pub release_mass_kg: f64,
    pub label: String,
}

/// Outcome of one leg of a carrier simulation.
#[derive(Clone, Debug)]
pub struct LegOutcome {
    pub target: String,
    pub delta_v_km_s: f64,
    pub propellant_kg: f64,
    pub duration: Duration,
    /// False when the propellant budget ran out before or on this leg
    pub reached: bool,
}

/// Full simulation report of a carrier against an ordered manifest.
#[derive(Clone, Debug)]
pub struct SimReport {
    /// Signed: negative means the manifest overruns the budget by that much
    pub propellant_remaining_kg: f64,
    pub delta_v_km_s: f64,
    pub duration: Duration,
    pub legs: Vec<LegOutcome>,
}

impl SimReport {
    /// The report of a carrier that has not flown: full budget, no legs.
    pub fn untouched(propellant_budget_kg: f64) -> Self {
        Self {
            propellant_remaining_kg: propellant_budget_kg,
            delta_v_km_s: 0.0,
            duration: Duration::ZERO,
            legs: Vec::new(),
        }
    }
}

impl fmt::Display for SimReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} legs, dv = {:.4} km/s, remaining propellant = {:.2} kg, duration = {}",
            self.legs.len(),
            self.delta_v_km_s,
            self.propellant_remaining_kg,
            self.duration
        )
    }
}

/// Simulates a carrier design against an ordered list of stops. Pure function
/// of its arguments; the payload at departure is the sum of all release masses,
/// and each stop sheds its release mass once reached.
///
/// For a fixed stop order, remaining propellant is non-increasing in the number
/// of stops: an extra stop adds both a leg and departure payload for all prior
/// legs. The capacity sizer's binary search relies on this monotonicity.
pub(crate) fn simulate_stops(
    design: &CarrierDesign,
    stops: &[Stop],
    model: &dyn ManeuverModel,
    phasing: PhasingMode,
) -> Result<SimReport, ManeuverError> {
    let mut report = SimReport::untouched(design.propellant_mass_kg);
    let mut payload_kg: f64 = stops.iter().map(|stop| stop.release_mass_kg).sum();
    let mut current = design.insertion_orbit;

    for stop in stops {
        if report.propellant_remaining_kg < 0.0 {
            // Already in deficit, the remaining stops are unreachable
            report.legs.push(LegOutcome {
                target: stop.label.clone(),
                delta_v_km_s: 0.0,
                propellant_kg: 0.0,
                duration: Duration::ZERO,
                reached: false,
            });
            continue;
        }

        let wet_mass_kg = design.dry_mass_kg + report.propellant_remaining_kg + payload_kg;
        let cost = model.transfer_cost(&current, &stop.orbit, wet_mass_kg, &design.thruster, phasing)?;

        report.propellant_remaining_kg -= cost.propellant_kg;
        report.delta_v_km_s += cost.delta_v_km_s;
        report.duration += cost.duration;
        report.legs.push(LegOutcome {
            target: stop.label.clone(),
            delta_v_km_s: cost.delta_v_km_s,
            propellant_kg: cost.propellant_kg,
            duration: cost.duration,
            reached: report.propellant_remaining_kg >= 0.0,
        });

        payload_kg -= stop.release_mass_kg;
        current = stop.orbit;
    }

    Ok(report)
}

#[test]
fn test_design_serde() {
    let design = CarrierDesign::builder()
        .name("otv-a")
        .dry_mass_kg(350.0)
        .propellant_mass_kg(800.0)
        .thruster(Thruster {
            thrust_N: 400.0,
            isp_s: 320.0,
        })
        .insertion_orbit(Orbit::circular(500.0, 53.0, 0.0, 0.0))
        .build();

    let serialized = serde_yaml::to_string(&design).unwrap();
    let deser: CarrierDesign = serde_yaml::from_str(&serialized).unwrap();
    assert_eq!(design, deser);
    assert_eq!(design.wet_mass_kg(), 1150.0);
    assert_eq!(design.kind, CarrierKind::Kickstage);
}
