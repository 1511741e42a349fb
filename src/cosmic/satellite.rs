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

use super::Orbit;
use crate::utils::between_0_360;

/// Lifecycle state of a satellite with respect to fleet assembly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatState {
    /// Awaiting assignment to a carrier
    #[default]
    Standby,
    /// Assigned to exactly one carrier's manifest
    Assigned,
    /// Deployed or deorbited, no longer serviceable
    Disposed,
    /// Unresponsive, excluded from sequencing
    Failed,
}

/// The named orbits of a satellite.
///
/// Deployment candidates carry an operational orbit and optionally an insertion
/// and a disposal orbit; removal targets are built with [`OrbitSet::single`],
/// where the only known orbit doubles as the default.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrbitSet {
    /// The orbit the satellite operates (or drifts) in
    pub operational: Orbit,
    /// Orbit the carrier drops the satellite in, when distinct from operational
    #[serde(default)]
    pub insertion: Option<Orbit>,
    /// End-of-life orbit, required for servicer deorbit legs
    #[serde(default)]
    pub disposal: Option<Orbit>,
}

impl OrbitSet {
    /// Builds an orbit set from a single known orbit, the removal-target case.
    pub fn single(orbit: Orbit) -> Self {
        Self {
            operational: orbit,
            insertion: None,
            disposal: None,
        }
    }

    /// Adds a disposal orbit.
    pub fn with_disposal(mut self, orbit: Orbit) -> Self {
        self.disposal = Some(orbit);
        self
    }

    /// The orbit a carrier must reach to service this satellite: the insertion
    /// orbit when one is defined, the operational orbit otherwise.
    pub fn default_orbit(&self) -> &Orbit {
        self.insertion.as_ref().unwrap_or(&self.operational)
    }

    /// Returns a copy of this set with every defined orbit offset in RAAN and
    /// true anomaly. Used by constellation population.
    pub fn with_plane_offset(&self, raan_offset_deg: f64, ta_offset_deg: f64) -> Self {
        let shift = |orbit: &Orbit| {
            let mut shifted = *orbit;
            shifted.raan_deg = between_0_360(shifted.raan_deg + raan_offset_deg);
            shifted.ta_deg = between_0_360(shifted.ta_deg + ta_offset_deg);
            shifted
        };
        Self {
            operational: shift(&self.operational),
            insertion: self.insertion.as_ref().map(shift),
            disposal: self.disposal.as_ref().map(shift),
        }
    }
}

/// A satellite to be deployed or removed. Orbital elements are immutable once
/// created; only the state tag changes, and only through assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub name: String,
    pub mass_kg: f64,
    #[serde(default)]
    pub volume_m3: f64,
    pub orbits: OrbitSet,
    #[serde(default)]
    pub state: SatState,
}

impl Satellite {
    pub fn new<S: Into<String>>(name: S, mass_kg: f64, volume_m3: f64, orbits: OrbitSet) -> Self {
        Self {
            name: name.into(),
            mass_kg,
            volume_m3,
            orbits,
            state: SatState::Standby,
        }
    }

    /// The orbit a carrier must reach to service this satellite.
    pub fn default_orbit(&self) -> &Orbit {
        self.orbits.default_orbit()
    }

    pub fn is_standby(&self) -> bool {
        self.state == SatState::Standby
    }
}

impl fmt::Display for Satellite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} ({:.1} kg, {:?}) @ {}",
            self.name,
            self.mass_kg,
            self.state,
            self.default_orbit()
        )
    }
}

#[test]
fn test_default_orbit_resolution() {
    let operational = Orbit::circular(550.0, 53.0, 10.0, 0.0);
    let insertion = Orbit::circular(300.0, 53.0, 10.0, 0.0);

    let single = Satellite::new("tgt", 120.0, 0.8, OrbitSet::single(operational));
    assert_eq!(single.default_orbit(), &operational);

    let mut orbits = OrbitSet::single(operational);
    orbits.insertion = Some(insertion);
    let staged = Satellite::new("sat", 120.0, 0.8, orbits);
    assert_eq!(staged.default_orbit(), &insertion);
}
