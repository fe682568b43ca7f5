/*
score.rs

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

//! Round scoring.
//!
//! Each find earns a bonus that depends on how much time is left, multiplied by the combo
//! multiplier.
//! When the round is won, the seconds left are worth [`TIME_BONUS_PER_SEC`] points each.

use serde::{Deserialize, Serialize};

/// Points per remaining second at the end of a won round.
pub const TIME_BONUS_PER_SEC: u32 = 3;

/// Return the base bonus of a find.
pub fn difference_bonus(remaining_secs: u32, total_secs: u32) -> u32 {
    if total_secs == 0 {
        return 0;
    }
    let percent_left: f64 = f64::from(remaining_secs) / f64::from(total_secs) * 100.0;
    match percent_left {
        p if p >= 90.0 => 10,
        p if p >= 75.0 => 8,
        p if p >= 50.0 => 5,
        p if p >= 25.0 => 3,
        _ => 1,
    }
}

/// Return the bonus of a find with the combo multiplier applied.
pub fn with_combo(base: u32, multiplier: f64) -> u32 {
    (f64::from(base) * multiplier).floor() as u32
}

/// Score breakdown of a round.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    /// Find bonuses, without the combo part.
    pub difference_bonuses: u32,

    /// Extra points earned with the combo multiplier.
    pub combo_bonus: u32,

    /// Points for the seconds left.
    pub time_bonus: u32,

    /// Round total.
    pub total: u32,

    /// Seconds left when the round ended.
    pub time_remaining: u32,
}

impl FinalScore {
    /// Compute the breakdown from the accumulated find bonuses.
    ///
    /// `difference_bonuses` includes the combo part, which is given separately in
    /// `combo_bonus`.
    pub fn new(difference_bonuses: u32, combo_bonus: u32, time_remaining: u32) -> Self {
        let time_bonus: u32 = time_remaining.saturating_mul(TIME_BONUS_PER_SEC);
        Self {
            difference_bonuses: difference_bonuses.saturating_sub(combo_bonus),
            combo_bonus,
            time_bonus,
            total: difference_bonuses.saturating_add(time_bonus),
            time_remaining,
        }
    }
}
