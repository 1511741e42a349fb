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

use std::f64::consts::TAU;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EARTH_EQ_RADIUS_KM, MU_EARTH_KM3_S2};
use crate::time::{Duration, Unit};
use crate::utils::between_0_360;

/// A Keplerian orbit, the mean elements a carrier designs its transfers against.
///
/// Once attached to a satellite, an orbit is never mutated: carriers compute the
/// cost of reaching it, they do not propagate it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Semi-major axis, in km
    pub sma_km: f64,
    /// Eccentricity, dimensionless
    #[serde(default)]
    pub ecc: f64,
    /// Inclination, in degrees
    pub inc_deg: f64,
    /// Right ascension of the ascending node, in degrees
    pub raan_deg: f64,
    /// Argument of periapsis, in degrees
    #[serde(default)]
    pub aop_deg: f64,
    /// True anomaly, in degrees
    #[serde(default)]
    pub ta_deg: f64,
}

impl Orbit {
    /// Creates a new orbit from its six Keplerian elements. Angles are bounded
    /// to [0; 360), except the inclination which is folded into its physical
    /// [0; 180] range.
    pub fn keplerian(
        sma_km: f64,
        ecc: f64,
        inc_deg: f64,
        raan_deg: f64,
        aop_deg: f64,
        ta_deg: f64,
    ) -> Self {
        let inc_deg = between_0_360(inc_deg);
        Self {
            sma_km,
            ecc,
            inc_deg: if inc_deg > 180.0 {
                360.0 - inc_deg
            } else {
                inc_deg
            },
            raan_deg: between_0_360(raan_deg),
            aop_deg: between_0_360(aop_deg),
            ta_deg: between_0_360(ta_deg),
        }
    }

    /// Creates a circular orbit at the provided altitude above the Earth equatorial radius.
    pub fn circular(altitude_km: f64, inc_deg: f64, raan_deg: f64, ta_deg: f64) -> Self {
        Self::keplerian(
            EARTH_EQ_RADIUS_KM + altitude_km,
            0.0,
            inc_deg,
            raan_deg,
            0.0,
            ta_deg,
        )
    }

    /// Altitude above the Earth equatorial radius, in km.
    pub fn altitude_km(&self) -> f64 {
        self.sma_km - EARTH_EQ_RADIUS_KM
    }

    /// Semi-latus rectum `a (1 - e^2)`, in km.
    pub fn semi_parameter_km(&self) -> f64 {
        self.sma_km * (1.0 - self.ecc.powi(2))
    }

    /// Mean motion, in rad/s.
    pub fn mean_motion_rad_s(&self) -> f64 {
        (MU_EARTH_KM3_S2 / self.sma_km.powi(3)).sqrt()
    }

    /// Orbital period.
    pub fn period(&self) -> Duration {
        (TAU / self.mean_motion_rad_s()) * Unit::Second
    }

    /// Circular orbital velocity at the semi-major axis, in km/s.
    pub fn circular_velocity_km_s(&self) -> f64 {
        (MU_EARTH_KM3_S2 / self.sma_km).sqrt()
    }
}

impl fmt::Display for Orbit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let prec = f.precision().unwrap_or(3);
        write!(
            f,
            "sma = {:.*} km  ecc = {:.*}  inc = {:.*} deg  raan = {:.*} deg  aop = {:.*} deg  ta = {:.*} deg",
            prec, self.sma_km, prec, self.ecc, prec, self.inc_deg, prec, self.raan_deg, prec, self.aop_deg, prec, self.ta_deg
        )
    }
}

#[test]
fn test_serde() {
    let orbit = Orbit::circular(550.0, 53.0, 120.0, 45.0);

    let serialized = serde_yaml::to_string(&orbit).unwrap();
    let deser: Orbit = serde_yaml::from_str(&serialized).unwrap();
    assert_eq!(orbit, deser);

    // Eccentricity, argument of periapsis and true anomaly may be omitted entirely.
    let s = r#"
sma_km: 6928.0
inc_deg: 53.0
raan_deg: 120.0
"#;
    let deser: Orbit = serde_yaml::from_str(s).unwrap();
    assert_eq!(deser, Orbit::keplerian(6928.0, 0.0, 53.0, 120.0, 0.0, 0.0));
}

#[test]
fn test_inclination_fold() {
    // -10 deg and 190 deg fold back into [0; 180], preserving the plane tilt
    assert_eq!(Orbit::circular(550.0, -10.0, 0.0, 0.0).inc_deg, 10.0);
    let retro = Orbit::keplerian(7000.0, 0.0, 190.0, 0.0, 0.0, 0.0);
    assert_eq!(retro.inc_deg, 170.0);
    assert!(retro.inc_deg.to_radians().cos() < 0.0);
}

#[test]
fn test_period() {
    // ISS-like orbit, period just over 90 minutes
    let orbit = Orbit::circular(420.0, 51.6, 0.0, 0.0);
    let minutes = orbit.period().to_seconds() / 60.0;
    assert!((92.0..94.0).contains(&minutes), "period = {minutes} min");
}
