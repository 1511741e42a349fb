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
use snafu::Snafu;

use crate::cosmic::{Orbit, STD_GRAVITY};
use crate::linalg::Vector3;
use crate::time::Duration;

mod twoimpulse;
pub use twoimpulse::TwoImpulse;

/// Defines a thruster with a maximum isp and a maximum thrust.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thruster {
    /// The thrust is to be provided in Newtons
    pub thrust_N: f64,
    /// The Isp is to be provided in seconds
    pub isp_s: f64,
}

impl Thruster {
    /// Returns the exhaust velocity v_e in meters per second
    pub fn exhaust_velocity_m_s(&self) -> f64 {
        self.isp_s * STD_GRAVITY
    }
}

/// Whether a transfer may trade wall-clock time against plane-change propellant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhasingMode {
    /// Burn for the full plane change, no waiting
    #[default]
    Impulsive,
    /// Coast until differential nodal precession closes the RAAN gap, then burn
    NodalDrift,
}

/// The outcome of a single carrier transfer between two orbits.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TransferCost {
    pub delta_v_km_s: f64,
    /// Aggregate delta-v in the RTN frame (radial, along-track, cross-track), in km/s
    pub dv_rtn_km_s: Vector3<f64>,
    pub propellant_kg: f64,
    pub duration: Duration,
}

impl fmt::Display for TransferCost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "dv = {:.4} km/s  propellant = {:.2} kg  duration = {}",
            self.delta_v_km_s, self.propellant_kg, self.duration
        )
    }
}

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ManeuverError {
    #[snafu(display("orbit lies at or below the central body surface: sma = {sma_km:.3} km"))]
    SubsurfaceOrbit { sma_km: f64 },
    #[snafu(display(
        "transfer cost between {from} and {to} is not finite, check the orbit elements"
    ))]
    NonFiniteCost { from: Orbit, to: Orbit },
}

/// The maneuver cost oracle: everything the fleet design engine knows about
/// orbital mechanics flows through this seam.
///
/// Implementations must be deterministic, and `transfer_cost` must not depend
/// on any state other than its arguments: carrier simulation is a pure function
/// of (design, ordered manifest) and relies on re-evaluating the oracle from
/// scratch on every candidate manifest.
pub trait ManeuverModel: Send + Sync {
    /// Signed secular drift rate of the orbital plane's RAAN, in degrees per day.
    fn nodal_precession_rate_deg_day(&self, orbit: &Orbit) -> f64;

    /// Propellant, delta-v and duration for transferring a carrier of the given
    /// wet mass from one orbit to another.
    fn transfer_cost(
        &self,
        from: &Orbit,
        to: &Orbit,
        wet_mass_kg: f64,
        thruster: &Thruster,
        phasing: PhasingMode,
    ) -> Result<TransferCost, ManeuverError>;
}

/// Rocket equation: propellant consumed by a vehicle of the provided wet mass
/// to achieve the provided delta-v.
pub fn propellant_for_dv_kg(wet_mass_kg: f64, delta_v_km_s: f64, thruster: &Thruster) -> f64 {
    let ve_m_s = thruster.exhaust_velocity_m_s();
    wet_mass_kg * (1.0 - (-delta_v_km_s * 1e3 / ve_m_s).exp())
}
