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

use snafu::Snafu;

use crate::dynamics::ManeuverError;

mod assembler;
mod carrier;
mod packer;
mod queue;
mod sequencer;
mod sizing;

pub use assembler::{AssemblyOpts, AssemblyState, Fleet, FleetAssembler};
pub use carrier::{Carrier, CarrierDesign, CarrierKind, LegOutcome, SimReport};
pub use packer::{AdrPacker, PackingStrategy};
pub use queue::SatelliteQueue;
pub use sequencer::{drift_cost, sequence, DriftDirection};
pub use sizing::{size_carrier, CarrierSizing, SizingOpts};

/// Errors raised by fleet sequencing, assembly and packing.
///
/// An exhausted outer iteration budget is deliberately *not* here: it yields a
/// partial [`Fleet`] carrying the unassigned remainder, so the caller can retry
/// with different carrier parameters.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum FleetError {
    #[snafu(display("cannot sequence or assemble an empty satellite set"))]
    EmptySatelliteSet,
    #[snafu(display("carrier capacity sizing failed: {source}"))]
    CarrierSizing { source: SizingError },
    #[snafu(display("packing strategy {strategy:?} is not implemented"))]
    UnsupportedStrategy { strategy: PackingStrategy },
    #[snafu(display("maneuver evaluation failed: {source}"))]
    ManeuverEval { source: ManeuverError },
}

/// Errors raised by the carrier capacity sizer.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SizingError {
    #[snafu(display(
        "capacity search did not converge within {iterations} iterations (bracket [{low}; {high}])"
    ))]
    NonConvergence {
        iterations: usize,
        low: usize,
        high: usize,
    },
    #[snafu(display("maneuver evaluation failed during capacity probe: {source}"))]
    ProbeManeuver { source: ManeuverError },
}
