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

use std::collections::VecDeque;

use crate::cosmic::{SatState, Satellite};

/// The ordered queue of satellites awaiting assignment, consumed strictly
/// front-to-back by the assemblers. Holds the canonical order produced by the
/// sequencer; a satellite leaves the queue exactly when a committed carrier
/// takes it on its manifest.
#[derive(Clone, Debug, Default)]
pub struct SatelliteQueue {
    inner: VecDeque<Satellite>,
}

impl SatelliteQueue {
    /// Builds the queue from an already-sequenced order.
    pub fn from_order(order: Vec<Satellite>) -> Self {
        Self {
            inner: order.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Clones up to the first `count` satellites without removing them.
    pub fn front(&self, count: usize) -> Vec<Satellite> {
        self.inner.iter().take(count).cloned().collect()
    }

    /// Removes the first `count` satellites, marking each as assigned.
    pub fn commit_front(&mut self, count: usize) -> Vec<Satellite> {
        let mut committed = Vec::with_capacity(count.min(self.inner.len()));
        for _ in 0..count {
            match self.inner.pop_front() {
                Some(mut sat) => {
                    sat.state = SatState::Assigned;
                    committed.push(sat);
                }
                None => break,
            }
        }
        committed
    }

    /// Consumes the queue, returning whatever was never assigned.
    pub fn into_remainder(self) -> Vec<Satellite> {
        self.inner.into()
    }
}
