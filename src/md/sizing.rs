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

use snafu::{ensure, ResultExt};
use typed_builder::TypedBuilder;

use super::carrier::{Carrier, CarrierDesign};
use super::{NonConvergenceSnafu, ProbeManeuverSnafu, SizingError};
use crate::cosmic::Satellite;
use crate::dynamics::{ManeuverModel, PhasingMode};

/// Options of the carrier capacity sizer.
#[derive(Copy, Clone, Debug, TypedBuilder)]
#[builder(doc)]
pub struct SizingOpts {
    /// Iteration budget of the binary search. The bracket halves every
    /// iteration, so the default covers any realistic prefix length.
    #[builder(default = 30)]
    pub max_iterations: usize,
    /// After convergence, re-simulate the final manifest allowing nodal-drift
    /// phasing, trading transfer duration for plane-change propellant. Order
    /// preserving; kept only when it does not reduce the propellant margin.
    #[builder(default = false)]
    pub refine_phasing: bool,
}

impl Default for SizingOpts {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A converged capacity search: the capacity, the carrier fully simulated at
/// that capacity, and how many simulations the search needed.
#[derive(Clone, Debug)]
pub struct CarrierSizing {
    /// Maximum prefix length the carrier services with non-negative propellant
    pub capacity: usize,
    pub carrier: Carrier,
    pub probes: usize,
}

/// Finds the longest prefix of `prefix` a fresh instance of `design` can
/// service without exhausting its propellant, by bounded binary search.
///
/// Each probe is a full re-simulation of the carrier against the candidate
/// prefix (transfer costs are order dependent, so there is no incremental
/// update), which is why the search is logarithmic rather than a linear scan.
/// The search requires remaining propellant to be non-increasing in prefix
/// length for the fixed order, which holds for any prefix of the canonical
/// queue; callers must not re-order the prefix between probes.
pub fn size_carrier(
    model: &dyn ManeuverModel,
    design: &CarrierDesign,
    carrier_id: usize,
    prefix: &[Satellite],
    opts: SizingOpts,
) -> Result<CarrierSizing, SizingError> {
    let mut low = 0usize;
    let mut high = prefix.len();

    // An empty manifest leaves the full budget untouched, so low = 0 is
    // feasible by construction. The terminal collapse below leans on this.
    let mut low_confirmed = false;
    let mut best = design.instantiate(carrier_id);
    let mut probes = 0usize;
    let mut converged = false;

    for _ in 0..opts.max_iterations {
        if high - low <= 1 {
            if high > low {
                let probe = probe_capacity(model, design, carrier_id, prefix, high)?;
                probes += 1;
                if probe.is_feasible() {
                    low = high;
                    best = probe;
                } else {
                    debug_assert!(
                        low_confirmed || low == 0,
                        "terminal collapse onto an unconfirmed lower bound"
                    );
                    high = low;
                }
            }
            converged = true;
            break;
        }

        // Ceiling midpoint, so the bracket always shrinks
        let mid = (low + high + 1) / 2;
        let probe = probe_capacity(model, design, carrier_id, prefix, mid)?;
        probes += 1;
        debug!(
            "capacity probe #{}: {} of {} satellites leaves {:.2} kg",
            probes,
            mid,
            prefix.len(),
            probe.remaining_propellant_kg()
        );

        if probe.is_feasible() {
            low = mid;
            low_confirmed = true;
            best = probe;
        } else {
            high = mid;
        }
    }

    ensure!(
        converged,
        NonConvergenceSnafu {
            iterations: opts.max_iterations,
            low,
            high,
        }
    );

    if opts.refine_phasing && low > 0 {
        let mut refined = best.clone();
        refined
            .simulate(model, PhasingMode::NodalDrift)
            .context(ProbeManeuverSnafu)?;
        if refined.report.propellant_remaining_kg >= best.report.propellant_remaining_kg {
            debug!(
                "phasing refinement keeps {:.2} kg more propellant",
                refined.report.propellant_remaining_kg - best.report.propellant_remaining_kg
            );
            best = refined;
        }
    }

    best.converged = true;
    Ok(CarrierSizing {
        capacity: low,
        carrier: best,
        probes,
    })
}

fn probe_capacity(
    model: &dyn ManeuverModel,
    design: &CarrierDesign,
    carrier_id: usize,
    prefix: &[Satellite],
    count: usize,
) -> Result<Carrier, SizingError> {
    let mut carrier = design
        .instantiate(carrier_id)
        .with_manifest(prefix[..count].to_vec());
    carrier
        .simulate(model, PhasingMode::Impulsive)
        .context(ProbeManeuverSnafu)?;
    Ok(carrier)
}
