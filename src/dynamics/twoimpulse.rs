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

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use snafu::ensure;

use super::{
    propellant_for_dv_kg, ManeuverError, ManeuverModel, NonFiniteCostSnafu, PhasingMode,
    SubsurfaceOrbitSnafu, Thruster, TransferCost,
};
use crate::cosmic::{Orbit, EARTH_EQ_RADIUS_KM, EARTH_J2, MU_EARTH_KM3_S2};
use crate::linalg::Vector3;
use crate::time::{Duration, Unit};
use crate::utils::between_pm_180;

/// Analytic two-impulse maneuver model: a Hohmann transfer between the two
/// semi-major axes with the full plane change (inclination and RAAN, spherical
/// law of cosines) folded into the second burn, where the velocity is lowest.
///
/// With [`PhasingMode::NodalDrift`], the RAAN change is not burned for at all:
/// the carrier coasts in its departure orbit until differential J2 nodal
/// precession closes the node gap, which costs transfer duration instead of
/// propellant. When both planes precess at the same rate the model falls back
/// to the impulsive RAAN change.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TwoImpulse {
    pub mu_km3_s2: f64,
    pub eq_radius_km: f64,
    pub j2: f64,
}

impl Default for TwoImpulse {
    /// Earth GM, equatorial radius and J2
    fn default() -> Self {
        Self {
            mu_km3_s2: MU_EARTH_KM3_S2,
            eq_radius_km: EARTH_EQ_RADIUS_KM,
            j2: EARTH_J2,
        }
    }
}

impl ManeuverModel for TwoImpulse {
    fn nodal_precession_rate_deg_day(&self, orbit: &Orbit) -> f64 {
        let n = (self.mu_km3_s2 / orbit.sma_km.powi(3)).sqrt();
        let p = orbit.semi_parameter_km();
        let rate_rad_s =
            -1.5 * self.j2 * n * (self.eq_radius_km / p).powi(2) * orbit.inc_deg.to_radians().cos();
        rate_rad_s.to_degrees() * 86_400.0
    }

    fn transfer_cost(
        &self,
        from: &Orbit,
        to: &Orbit,
        wet_mass_kg: f64,
        thruster: &Thruster,
        phasing: PhasingMode,
    ) -> Result<TransferCost, ManeuverError> {
        for orbit in [from, to] {
            ensure!(
                orbit.sma_km > self.eq_radius_km,
                SubsurfaceOrbitSnafu {
                    sma_km: orbit.sma_km
                }
            );
        }

        let r1 = from.sma_km;
        let r2 = to.sma_km;
        let at = 0.5 * (r1 + r2);

        let v1 = (self.mu_km3_s2 / r1).sqrt();
        let v2 = (self.mu_km3_s2 / r2).sqrt();
        let vt1 = (self.mu_km3_s2 * (2.0 / r1 - 1.0 / at)).sqrt();
        let vt2 = (self.mu_km3_s2 * (2.0 / r2 - 1.0 / at)).sqrt();

        // First burn is tangential, raising (or lowering) the apsis
        let dv1 = (vt1 - v1).abs();

        let raan_gap_deg = between_pm_180(to.raan_deg - from.raan_deg);
        let (burned_raan_deg, wait) = match phasing {
            PhasingMode::Impulsive => (raan_gap_deg, Duration::ZERO),
            PhasingMode::NodalDrift => {
                let closing_rate = self.nodal_precession_rate_deg_day(from)
                    - self.nodal_precession_rate_deg_day(to);
                if closing_rate.abs() < 1e-9 {
                    (raan_gap_deg, Duration::ZERO)
                } else {
                    // First epoch at which the node gap closes, never negative
                    let wait_days =
                        (raan_gap_deg / closing_rate).rem_euclid(360.0 / closing_rate.abs());
                    (0.0, wait_days * Unit::Day)
                }
            }
        };

        // Total plane rotation between the two orbit normals
        let i1 = from.inc_deg.to_radians();
        let i2 = to.inc_deg.to_radians();
        let d_raan = burned_raan_deg.to_radians();
        let cos_theta = (i1.cos() * i2.cos() + i1.sin() * i2.sin() * d_raan.cos()).clamp(-1.0, 1.0);

        // Second burn combines circularization and the plane change
        let dv2 = (v2.powi(2) + vt2.powi(2) - 2.0 * v2 * vt2 * cos_theta).sqrt();

        let delta_v_km_s = dv1 + dv2;
        let sin_theta = (1.0 - cos_theta.powi(2)).max(0.0).sqrt();
        let dv_rtn_km_s = Vector3::new(
            0.0,
            dv1 + (v2 - vt2 * cos_theta),
            -vt2 * sin_theta,
        );
        let transfer_time = PI * (at.powi(3) / self.mu_km3_s2).sqrt() * Unit::Second;
        let cost = TransferCost {
            delta_v_km_s,
            dv_rtn_km_s,
            propellant_kg: propellant_for_dv_kg(wet_mass_kg, delta_v_km_s, thruster),
            duration: transfer_time + wait,
        };

        ensure!(
            cost.delta_v_km_s.is_finite() && cost.propellant_kg.is_finite(),
            NonFiniteCostSnafu {
                from: *from,
                to: *to
            }
        );

        Ok(cost)
    }
}
