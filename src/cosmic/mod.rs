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

mod constellation;
mod orbit;
mod satellite;

pub use constellation::{Constellation, ConstellationConfig};
pub use orbit::Orbit;
pub use satellite::{OrbitSet, SatState, Satellite};

/// Earth gravitational parameter, in km^3/s^2.
pub const MU_EARTH_KM3_S2: f64 = 398_600.4418;

/// Earth equatorial radius, in km.
pub const EARTH_EQ_RADIUS_KM: f64 = 6_378.1363;

/// Earth second zonal harmonic (oblateness), dimensionless.
pub const EARTH_J2: f64 = 1.082_626_68e-3;

/// Standard gravity, in m/s^2.
pub const STD_GRAVITY: f64 = 9.806_65;
