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

use snafu::{ensure, ResultExt};
use typed_builder::TypedBuilder;

use super::carrier::{Carrier, CarrierDesign};
use super::queue::SatelliteQueue;
use super::sequencer::sequence;
use super::sizing::{size_carrier, CarrierSizing, SizingOpts};
use super::{CarrierSizingSnafu, EmptySatelliteSetSnafu, FleetError};
use crate::cosmic::{Constellation, Satellite};
use crate::dynamics::ManeuverModel;

/// Options shared by the fleet assembler and the ADR packer.
#[derive(Copy, Clone, Debug, TypedBuilder)]
#[builder(doc)]
pub struct AssemblyOpts {
    /// Outer iteration budget: the sole guard against a design that never
    /// drains the queue. Hitting it yields a partial fleet, not an error.
    #[builder(default = 100)]
    pub execution_limit: usize,
    #[builder(default)]
    pub sizing: SizingOpts,
}

impl Default for AssemblyOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// The assembler's control states. `Done` and `Failed` are terminal; `Failed`
/// still produces a fleet, carrying the unassigned remainder.
#[derive(Clone, Debug)]
pub enum AssemblyState {
    AwaitingQueue,
    SizingCarrier,
    CommittingCarrier(CarrierSizing),
    Done,
    Failed,
}

/// An assembled fleet: the committed carriers in commit order, plus whatever
/// the assembly could not place. Frozen once assembly terminates.
#[derive(Clone, Debug, Default)]
pub struct Fleet {
    pub carriers: Vec<Carrier>,
    pub unassigned: Vec<Satellite>,
}

impl Fleet {
    /// Whether every satellite of the original set was assigned to a carrier.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Total number of satellites across all committed manifests.
    pub fn assigned_count(&self) -> usize {
        self.carriers.iter().map(|c| c.manifest.len()).sum()
    }
}

impl fmt::Display for Fleet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "fleet of {} carriers, {} satellites assigned, {} unassigned",
            self.carriers.len(),
            self.assigned_count(),
            self.unassigned.len()
        )
    }
}

/// Builds a deployment fleet one carrier at a time: sequence the constellation
/// once, then repeatedly size a fresh carrier against the front of the queue
/// and commit it, until the queue drains or the execution limit trips.
///
/// Carriers are strictly sequential: each sizing run depends on the queue state
/// left by every previously committed carrier.
pub struct FleetAssembler<'a> {
    model: &'a dyn ManeuverModel,
    design: CarrierDesign,
    opts: AssemblyOpts,
}

impl<'a> FleetAssembler<'a> {
    pub fn new(model: &'a dyn ManeuverModel, design: CarrierDesign) -> Self {
        Self::with_opts(model, design, AssemblyOpts::default())
    }

    pub fn with_opts(
        model: &'a dyn ManeuverModel,
        design: CarrierDesign,
        opts: AssemblyOpts,
    ) -> Self {
        Self {
            model,
            design,
            opts,
        }
    }

    /// Sequences the constellation's standby satellites and assembles the
    /// fleet. Fails immediately on an empty satellite set.
    pub fn assemble(&self, constellation: &Constellation) -> Result<Fleet, FleetError> {
        let order = sequence(self.model, constellation, &self.design.insertion_orbit)?;
        self.assemble_ordered(SatelliteQueue::from_order(order))
    }

    /// Assembles against an already-sequenced queue. The queue must hold the
    /// canonical order: the sizer's binary search is only valid against it.
    /// An empty queue is a caller error, same as an empty constellation.
    pub fn assemble_ordered(&self, mut queue: SatelliteQueue) -> Result<Fleet, FleetError> {
        ensure!(!queue.is_empty(), EmptySatelliteSetSnafu);

        let mut fleet = Fleet::default();
        let mut iterations = 0usize;
        let mut state = AssemblyState::AwaitingQueue;

        loop {
            state = match state {
                AssemblyState::AwaitingQueue => {
                    if queue.is_empty() {
                        AssemblyState::Done
                    } else if iterations >= self.opts.execution_limit {
                        warn!(
                            "execution limit of {} reached with {} satellites unassigned",
                            self.opts.execution_limit,
                            queue.remaining()
                        );
                        AssemblyState::Failed
                    } else {
                        AssemblyState::SizingCarrier
                    }
                }
                AssemblyState::SizingCarrier => {
                    let prefix = queue.front(queue.remaining());
                    let sized = size_carrier(
                        self.model,
                        &self.design,
                        fleet.carriers.len(),
                        &prefix,
                        self.opts.sizing,
                    )
                    .context(CarrierSizingSnafu)?;
                    AssemblyState::CommittingCarrier(sized)
                }
                AssemblyState::CommittingCarrier(sized) => {
                    if sized.capacity == 0 {
                        // The design cannot even service the queue head; count
                        // the iteration so the execution limit eventually trips.
                        warn!(
                            "carrier {} cannot service {}, skipping commit",
                            self.design.name,
                            queue.front(1)[0].name
                        );
                    } else {
                        let mut carrier = sized.carrier;
                        queue.commit_front(sized.capacity);
                        carrier.mark_assigned();
                        info!(
                            "committed {} after {} probes ({})",
                            carrier, sized.probes, carrier.report
                        );
                        fleet.carriers.push(carrier);
                    }
                    iterations += 1;
                    AssemblyState::AwaitingQueue
                }
                AssemblyState::Done => break,
                AssemblyState::Failed => {
                    fleet.unassigned = queue.into_remainder();
                    break;
                }
            };
        }

        info!("assembly finished: {fleet}");
        Ok(fleet)
    }
}
