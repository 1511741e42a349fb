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

/// Returns the provided angle bounded between 0.0 and 360.0 degrees.
pub fn between_0_360(angle_deg: f64) -> f64 {
    let mut bounded = angle_deg % 360.0;
    if bounded < 0.0 {
        bounded += 360.0;
    }
    bounded
}

/// Returns the provided angle difference bounded between -180.0 (exclusive) and 180.0 degrees.
pub fn between_pm_180(angle_deg: f64) -> f64 {
    let mut bounded = angle_deg % 360.0;
    if bounded > 180.0 {
        bounded -= 360.0;
    } else if bounded <= -180.0 {
        bounded += 360.0;
    }
    bounded
}
