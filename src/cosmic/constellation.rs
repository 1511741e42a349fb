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

use super::{Orbit, OrbitSet, Satellite};
use crate::io::ConfigRepr;

/// A named collection of satellites, the work unit of fleet assembly.
#[derive(Clone, Debug, Default)]
pub struct Constellation {
    pub name: String,
    pub satellites: Vec<Satellite>,
}

impl Constellation {
    pub fn new<S: Into<String>>(name: S, satellites: Vec<Satellite>) -> Self {
        Self {
            name: name.into(),
            satellites,
        }
    }

    /// Populates a Walker-style constellation by cloning a reference satellite
    /// into `num_planes` planes of `sats_per_plane` slots each. Every clone is
    /// an independent value, offset in RAAN per plane and in true anomaly per
    /// slot (plus the inter-plane phasing).
    pub fn walker(
        name: &str,
        reference: &Satellite,
        num_planes: usize,
        sats_per_plane: usize,
        raan_spread_deg: f64,
        phasing_deg: f64,
    ) -> Self {
        let raan_step = raan_spread_deg / num_planes.max(1) as f64;
        let ta_step = 360.0 / sats_per_plane.max(1) as f64;

        let mut satellites = Vec::with_capacity(num_planes * sats_per_plane);
        for plane in 0..num_planes {
            for slot in 0..sats_per_plane {
                let mut sat = reference.clone();
                sat.name = format!("{}-{:02}-{:02}", name, plane + 1, slot + 1);
                sat.orbits = reference.orbits.with_plane_offset(
                    plane as f64 * raan_step,
                    slot as f64 * ta_step + plane as f64 * phasing_deg,
                );
                satellites.push(sat);
            }
        }

        Self::new(name, satellites)
    }

    /// Iterates over the satellites still awaiting assignment.
    pub fn standby(&self) -> impl Iterator<Item = &Satellite> {
        self.satellites.iter().filter(|sat| sat.is_standby())
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}

impl fmt::Display for Constellation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} satellites ({} standby)",
            self.name,
            self.satellites.len(),
            self.standby().count()
        )
    }
}

/// YAML-loadable definition of a Walker constellation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConstellationConfig {
    pub name: String,
    pub planes: usize,
    pub sats_per_plane: usize,
    pub altitude_km: f64,
    pub inclination_deg: f64,
    /// RAAN spread across planes, defaults to a full 360 degree (Walker delta) pattern
    #[serde(default = "default_raan_spread")]
    pub raan_spread_deg: f64,
    /// Inter-plane phasing, in degrees of true anomaly
    #[serde(default)]
    pub phasing_deg: f64,
    pub sat_mass_kg: f64,
    #[serde(default)]
    pub sat_volume_m3: f64,
    /// When set, every satellite also carries a circular disposal orbit at this altitude
    #[serde(default)]
    pub disposal_altitude_km: Option<f64>,
}

fn default_raan_spread() -> f64 {
    360.0
}

impl ConfigRepr for ConstellationConfig {}

impl ConstellationConfig {
    /// Builds the constellation this configuration describes.
    pub fn build(&self) -> Constellation {
        let operational = Orbit::circular(self.altitude_km, self.inclination_deg, 0.0, 0.0);
        let mut orbits = OrbitSet::single(operational);
        if let Some(disposal_alt) = self.disposal_altitude_km {
            orbits = orbits.with_disposal(Orbit::circular(
                disposal_alt,
                self.inclination_deg,
                0.0,
                0.0,
            ));
        }
        let reference = Satellite::new("ref", self.sat_mass_kg, self.sat_volume_m3, orbits);
        Constellation::walker(
            &self.name,
            &reference,
            self.planes,
            self.sats_per_plane,
            self.raan_spread_deg,
            self.phasing_deg,
        )
    }
}

#[test]
fn test_walker_population() {
    let reference = Satellite::new(
        "ref",
        150.0,
        1.2,
        OrbitSet::single(Orbit::circular(550.0, 53.0, 0.0, 0.0)),
    );
    let constellation = Constellation::walker("demo", &reference, 3, 4, 360.0, 5.0);
    assert_eq!(constellation.len(), 12);
    // Planes are 120 degrees apart in RAAN
    let raan_plane_2 = constellation.satellites[4].default_orbit().raan_deg;
    assert!((raan_plane_2 - 120.0).abs() < 1e-12);
    // Slots are 90 degrees apart in true anomaly, plus the phasing per plane
    let ta_p2_s2 = constellation.satellites[5].default_orbit().ta_deg;
    assert!((ta_p2_s2 - 95.0).abs() < 1e-12);
    // Clones share no state: renaming one does not touch its siblings
    assert_ne!(
        constellation.satellites[0].name,
        constellation.satellites[1].name
    );
}

#[test]
fn test_config() {
    let s = r#"
name: ring
planes: 2
sats_per_plane: 3
altitude_km: 550.0
inclination_deg: 53.0
sat_mass_kg: 120.0
disposal_altitude_km: 300.0
"#;
    let cfg = ConstellationConfig::loads(s).unwrap();
    assert_eq!(cfg.raan_spread_deg, 360.0);
    let constellation = cfg.build();
    assert_eq!(constellation.len(), 6);
    assert!(constellation.satellites[0].orbits.disposal.is_some());
}
