/*
combo.rs

Copyright 2025 Hervé Quatremain

This file is part of Findit.

Findit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Findit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Findit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Manage the combo multiplier.

use log::debug;
use std::time::{Duration, Instant};

/// The player has three seconds after a find to chain the next one.
const COMBO_TIMEOUT: Duration = Duration::from_secs(3);

/// Highest multiplier.
const MAX_MULTIPLIER: f64 = 2.0;

/// Manage the combo counter and its score multiplier.
#[derive(Debug, Clone)]
pub struct Combo {
    // Number of chained finds.
    count: usize,

    // Current multiplier.
    multiplier: f64,

    // Time of the last find, used to detect the end of the chain.
    last_find: Option<Instant>,
}

impl Default for Combo {
    fn default() -> Self {
        Self::new()
    }
}

impl Combo {
    /// Create a [`Combo`] object.
    pub fn new() -> Self {
        Self {
            count: 0,
            multiplier: 1.0,
            last_find: None,
        }
    }

    /// Reset the object.
    pub fn reset(&mut self) {
        self.count = 0;
        self.multiplier = 1.0;
        self.last_find = None;
    }

    /// Return the number of chained finds.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Return the current multiplier.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Register a find now and return the new multiplier.
    pub fn register_find(&mut self) -> f64 {
        self.register_find_at(Instant::now())
    }

    /// Register a find at the given time and return the new multiplier.
    ///
    /// A find more than three seconds after the previous one starts a new chain.
    pub fn register_find_at(&mut self, now: Instant) -> f64 {
        if let Some(last) = self.last_find
            && now.saturating_duration_since(last) > COMBO_TIMEOUT
        {
            debug!("Combo of {} expired", self.count);
            self.count = 0;
            self.multiplier = 1.0;
        }

        self.count += 1;
        self.last_find = Some(now);
        self.multiplier = match self.count {
            1 => 1.0,
            2 => 1.2,
            3 => 1.4,
            4 => 1.6,
            5 => 1.8,
            _ => (self.multiplier + 0.1).min(MAX_MULTIPLIER),
        };
        debug!("Combo {}: multiplier {:.1}", self.count, self.multiplier);
        self.multiplier
    }

    /// Reset the chain if the last find is older than the timeout.
    pub fn expire(&mut self, now: Instant) {
        if let Some(last) = self.last_find
            && now.saturating_duration_since(last) > COMBO_TIMEOUT
        {
            self.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_grows_with_chain() {
        let mut combo = Combo::new();
        let start = Instant::now();
        let expected = [1.0, 1.2, 1.4, 1.6, 1.8, 1.9, 2.0, 2.0];
        for (i, e) in expected.iter().enumerate() {
            let m = combo.register_find_at(start + Duration::from_secs(i as u64));
            assert!((m - e).abs() < 1e-9, "find {i}: {m} != {e}");
        }
        assert_eq!(combo.count(), 8);
    }

    #[test]
    fn slow_find_restarts_chain() {
        let mut combo = Combo::new();
        let start = Instant::now();
        combo.register_find_at(start);
        combo.register_find_at(start + Duration::from_secs(2));
        assert_eq!(combo.count(), 2);
        let m = combo.register_find_at(start + Duration::from_secs(6));
        assert_eq!(combo.count(), 1);
        assert_eq!(m, 1.0);
    }

    #[test]
    fn expire_resets_after_timeout() {
        let mut combo = Combo::new();
        let start = Instant::now();
        combo.register_find_at(start);
        combo.register_find_at(start + Duration::from_secs(1));
        combo.expire(start + Duration::from_secs(3));
        assert_eq!(combo.count(), 2);
        combo.expire(start + Duration::from_secs(5));
        assert_eq!(combo.count(), 0);
        assert_eq!(combo.multiplier(), 1.0);
    }
}
