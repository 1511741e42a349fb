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

use rayon::prelude::*;
use snafu::ensure;

use super::{EmptySatelliteSetSnafu, FleetError};
use crate::cosmic::{Constellation, Orbit, Satellite};
use crate::dynamics::ManeuverModel;

/// The orbital-plane drift directions governing a deployment campaign, computed
/// once per sequencing run and passed explicitly wherever needed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DriftDirection {
    /// Sign (+1.0 or -1.0) of the summed per-satellite nodal precession signs.
    /// An exact tie resolves to +1 by convention.
    pub global: f64,
    /// Sign of (carrier insertion plane rate - representative satellite rate)
    pub relative: f64,
}

impl DriftDirection {
    /// Computes both directions from the standby satellite set and the carrier
    /// insertion orbit, querying the precession oracle per orbit.
    pub fn compute(
        model: &dyn ManeuverModel,
        sats: &[Satellite],
        insertion: &Orbit,
    ) -> Result<Self, FleetError> {
        ensure!(!sats.is_empty(), EmptySatelliteSetSnafu);

        let summed_signs: f64 = sats
            .iter()
            .map(|sat| {
                let rate = model.nodal_precession_rate_deg_day(sat.default_orbit());
                // A plane that does not precess casts no vote
                if rate == 0.0 {
                    0.0
                } else {
                    rate.signum()
                }
            })
            .sum();
        let global = if summed_signs >= 0.0 { 1.0 } else { -1.0 };

        let relative_rate = model.nodal_precession_rate_deg_day(insertion)
            - model.nodal_precession_rate_deg_day(sats[0].default_orbit());
        let relative = if relative_rate >= 0.0 { 1.0 } else { -1.0 };

        Ok(Self { global, relative })
    }
}

/// Accumulated drift cost of visiting the provided satellites in order: the sum
/// of absolute RAAN deltas between consecutive satellites, where any delta
/// fighting the global precession direction is replaced by the wrap the other
/// way around the circle (catching up against the spin is cheaper by going
/// around).
pub fn drift_cost(sats: &[Satellite], global_direction: f64) -> f64 {
    sats.windows(2)
        .map(|pair| {
            let delta = pair[1].default_orbit().raan_deg - pair[0].default_orbit().raan_deg;
            wrapped_raan_delta(delta, global_direction).abs()
        })
        .sum()
}

fn wrapped_raan_delta(delta_deg: f64, direction: f64) -> f64 {
    if delta_deg == 0.0 || delta_deg.signum() == direction.signum() {
        delta_deg
    } else {
        -delta_deg.signum() * (360.0 - delta_deg.abs())
    }
}

/// Drift and altitude cost of the cyclic rotation starting at `rot`.
fn rotation_cost(sats: &[Satellite], rot: usize, global_direction: f64) -> (f64, f64) {
    let n = sats.len();
    let mut drift = 0.0;
    for i in 0..n - 1 {
        let from = sats[(rot + i) % n].default_orbit().raan_deg;
        let to = sats[(rot + i + 1) % n].default_orbit().raan_deg;
        drift += wrapped_raan_delta(to - from, global_direction).abs();
    }
    let altitude: f64 = sats.iter().map(|sat| sat.default_orbit().sma_km).sum();
    (drift, altitude)
}

/// Computes the canonical visiting order over the constellation's standby
/// satellites for a carrier inserted on the provided orbit.
///
/// The satellites are sorted by (relative drift direction x RAAN, true anomaly)
/// and every cyclic rotation of that order is scored on (drift cost, summed
/// semi-major axes), keeping the lexicographic minimum, earliest rotation on
/// ties. The rotation scan is O(N^2) in the satellite count of one mission,
/// which is the accepted cost of not guessing where the cycle should start.
///
/// The order is only valid while the satellite orbits are left untouched; any
/// mutation requires re-sequencing.
pub fn sequence(
    model: &dyn ManeuverModel,
    constellation: &Constellation,
    insertion: &Orbit,
) -> Result<Vec<Satellite>, FleetError> {
    let mut sats: Vec<Satellite> = constellation.standby().cloned().collect();
    ensure!(!sats.is_empty(), EmptySatelliteSetSnafu);

    if sats.len() == 1 {
        return Ok(sats);
    }

    let direction = DriftDirection::compute(model, &sats, insertion)?;

    sats.sort_by(|a, b| {
        let key_a = (
            direction.relative * a.default_orbit().raan_deg,
            a.default_orbit().ta_deg,
        );
        let key_b = (
            direction.relative * b.default_orbit().raan_deg,
            b.default_orbit().ta_deg,
        );
        key_a
            .0
            .total_cmp(&key_b.0)
            .then(key_a.1.total_cmp(&key_b.1))
    });

    // Rotation costs are independent of each other; the selection below stays
    // strictly deterministic (lexicographic minimum, earliest index).
    let costs: Vec<(f64, f64)> = (0..sats.len())
        .into_par_iter()
        .map(|rot| rotation_cost(&sats, rot, direction.global))
        .collect();

    let mut winner = 0;
    for (rot, cost) in costs.iter().enumerate().skip(1) {
        if *cost < costs[winner] {
            winner = rot;
        }
    }

    debug!(
        "sequenced {} satellites: rotation {} of {} wins with drift cost {:.3} deg (direction {:+.0}/{:+.0})",
        sats.len(),
        winner,
        costs.len(),
        costs[winner].0,
        direction.global,
        direction.relative,
    );

    sats.rotate_left(winner);
    Ok(sats)
}
