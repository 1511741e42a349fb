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

/*! # caravel

Caravel sizes and sequences fleets of orbital carrier vehicles (kickstages,
upper stages, servicers) tasked with deploying a constellation or removing a
set of debris targets, under a hard propellant budget per carrier.

The engine is built around three cooperating pieces:

- a precession-aware sequencer that orders the satellite set to minimize
  cumulative orbital-plane drift cost,
- a capacity sizer that finds, by bounded binary search, how many satellites
  from the front of that order a single carrier can service,
- fleet assemblers (one-shot deployment and servicer-per-target removal) that
  commit carriers one at a time until the queue drains or an iteration budget
  runs out, in which case a partial fleet is returned rather than an error.

All maneuver costs flow through the [`dynamics::ManeuverModel`] trait, so the
engine itself never propagates an orbit.
*/

#[macro_use]
extern crate log;
extern crate nalgebra as na;

/// Satellites, orbits, constellations and the physical constants they rely on.
pub mod cosmic;

/// Thrusters, maneuver costing, and the analytic two-impulse transfer model.
pub mod dynamics;

/// Loading of carrier and constellation definitions from YAML files.
pub mod io;

/// The fleet design engine: sequencing, capacity sizing, assembly, packing.
pub mod md;

/// Utility functions shared by different modules.
pub mod utils;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

pub use self::cosmic::{Constellation, Orbit, Satellite};
pub use self::md::{Carrier, CarrierDesign, Fleet, FleetError};
