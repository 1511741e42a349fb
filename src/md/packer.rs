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

use serde::{Deserialize, Serialize};
use snafu::{ensure, ResultExt};

use super::assembler::{AssemblyOpts, Fleet};
use super::carrier::{simulate_stops, Carrier, CarrierDesign, SimReport, Stop};
use super::queue::SatelliteQueue;
use super::sequencer::sequence;
use super::{FleetError, ManeuverEvalSnafu, UnsupportedStrategySnafu};
use crate::cosmic::{Constellation, SatState, Satellite};
use crate::dynamics::{ManeuverModel, PhasingMode};

/// How removal missions distribute servicers across parent carriers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingStrategy {
    /// One parent carrier grown to capacity per iteration
    SinglePicker,
    /// Several parents filled concurrently; not implemented
    MultiPicker,
}

/// Greedy packer for removal missions where every target needs its own
/// disposable servicer riding on a shared parent upper stage.
///
/// Per iteration, a parent's servicer count is grown one at a time, with a full
/// parent re-simulation after each addition; the first addition that drives the
/// parent's propellant negative is rolled back, and the parent is locked in by
/// one more re-simulation at the converged count.
pub struct AdrPacker<'a> {
    model: &'a dyn ManeuverModel,
    parent: CarrierDesign,
    servicer: CarrierDesign,
    opts: AssemblyOpts,
}

impl<'a> AdrPacker<'a> {
    /// Builds a packer. Selecting [`PackingStrategy::MultiPicker`] fails here,
    /// at construction, rather than degrading to single-parent behavior.
    pub fn new(
        model: &'a dyn ManeuverModel,
        parent: CarrierDesign,
        servicer: CarrierDesign,
        strategy: PackingStrategy,
    ) -> Result<Self, FleetError> {
        ensure!(
            strategy == PackingStrategy::SinglePicker,
            UnsupportedStrategySnafu { strategy }
        );
        Ok(Self {
            model,
            parent,
            servicer,
            opts: AssemblyOpts::default(),
        })
    }

    pub fn with_opts(mut self, opts: AssemblyOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Sequences the target set and packs parent carriers until it drains or
    /// the execution limit trips, in which case the fleet is partial.
    pub fn pack(&self, constellation: &Constellation) -> Result<Fleet, FleetError> {
        let order = sequence(self.model, constellation, &self.parent.insertion_orbit)?;
        let mut queue = SatelliteQueue::from_order(order);
        let mut fleet = Fleet::default();
        let mut iterations = 0usize;

        while !queue.is_empty() {
            if iterations >= self.opts.execution_limit {
                warn!(
                    "execution limit of {} reached with {} targets unassigned",
                    self.opts.execution_limit,
                    queue.remaining()
                );
                fleet.unassigned = queue.into_remainder();
                return Ok(fleet);
            }

            let targets = queue.front(queue.remaining());

            // Grow the candidate servicer manifest until the parent overruns
            // its budget (roll the last addition back) or the queue is covered.
            let mut count = 0usize;
            loop {
                let candidate = count + 1;
                let report = self.simulate_parent(&targets[..candidate])?;
                if report.propellant_remaining_kg < 0.0 {
                    break;
                }
                count = candidate;
                if count == targets.len() {
                    break;
                }
            }

            if count == 0 {
                warn!(
                    "upper stage {} cannot ferry a single servicer to {}",
                    self.parent.name, targets[0].name
                );
                iterations += 1;
                continue;
            }

            // Lock in the converged design with one final re-simulation
            let parent_report = self.simulate_parent(&targets[..count])?;
            let mut parent = self.parent.instantiate(fleet.carriers.len());
            parent.report = parent_report;
            parent.converged = true;
            info!(
                "committed {:?} {} #{} ferrying {} servicers ({})",
                parent.design.kind, parent.design.name, parent.id, count, parent.report
            );
            fleet.carriers.push(parent);

            // One satellite per servicer, from the queue front
            for sat in queue.commit_front(count) {
                let servicer = self.commit_servicer(sat, fleet.carriers.len())?;
                fleet.carriers.push(servicer);
            }

            iterations += 1;
        }

        info!("packing finished: {fleet}");
        Ok(fleet)
    }

    /// Re-simulates the parent against a candidate manifest of servicers, one
    /// per target: the parent hauls every servicer's wet mass, releases one at
    /// each target orbit.
    fn simulate_parent(&self, targets: &[Satellite]) -> Result<SimReport, FleetError> {
        let stops: Vec<Stop> = targets
            .iter()
            .map(|sat| Stop {
                orbit: *sat.default_orbit(),
                release_mass_kg: self.servicer.wet_mass_kg(),
                label: sat.name.clone(),
            })
            .collect();
        simulate_stops(&self.parent, &stops, self.model, PhasingMode::Impulsive)
            .context(ManeuverEvalSnafu)
    }

    /// Builds the committed servicer for one satellite: released at the target
    /// orbit, it tows the target to its disposal orbit when one is defined.
    fn commit_servicer(
        &self,
        mut sat: Satellite,
        carrier_id: usize,
    ) -> Result<Carrier, FleetError> {
        let mut design = self.servicer.clone();
        design.name = format!("{}-{}", self.servicer.name, sat.name);
        design.insertion_orbit = *sat.default_orbit();

        let report = match sat.orbits.disposal {
            Some(disposal) => {
                let stop = Stop {
                    orbit: disposal,
                    release_mass_kg: sat.mass_kg,
                    label: format!("{} disposal", sat.name),
                };
                simulate_stops(&design, &[stop], self.model, PhasingMode::Impulsive)
                    .context(ManeuverEvalSnafu)?
            }
            None => SimReport::untouched(design.propellant_mass_kg),
        };

        sat.state = SatState::Assigned;
        let mut servicer = design.instantiate(carrier_id);
        servicer.manifest = vec![sat];
        servicer.report = report;
        servicer.converged = true;
        Ok(servicer)
    }
}
