/*
round.rs

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

//! Manage the status of a round in progress.
//!
//! A [`RoundState`] is created for each new round from a [`GeneratedRound`] and dropped when the
//! next round starts.

use log::debug;
use std::time::{Duration, Instant};

use crate::combo::Combo;
use crate::generator::GeneratedRound;
use crate::generator::board::{Board, Panel};
use crate::generator::random_source::RandomSource;
use crate::score::{self, FinalScore};

/// Manage the status of the round in progress.
#[derive(Debug)]
pub struct RoundState {
    /// Panels, parameters, and differences of the round.
    round: GeneratedRound,

    /// Differences found by the player, in the order they were found.
    found: Vec<usize>,

    /// Differences revealed by hints.
    hinted: Vec<usize>,

    /// Combo multiplier.
    combo: Combo,

    /// Find bonuses so far, combo part included.
    difference_bonuses: u32,

    /// Combo part of the find bonuses.
    combo_bonus: u32,

    /// Whether the player paused the round.
    pub paused: bool,

    /// Time when the round started. Used to compute the remaining time.
    start_time: Instant,

    /// The elapsed time when the player paused the round.
    pause_duration: Option<Duration>,
}

impl RoundState {
    /// Create a [`RoundState`] object and start the countdown.
    pub fn new(round: GeneratedRound) -> Self {
        Self {
            round,
            found: Vec::new(),
            hinted: Vec::new(),
            combo: Combo::new(),
            difference_bonuses: 0,
            combo_bonus: 0,
            paused: false,
            start_time: Instant::now(),
            pause_duration: None,
        }
    }

    /// Return the generated round.
    pub fn round(&self) -> &GeneratedRound {
        &self.round
    }

    /// Return the panels.
    pub fn board(&self) -> &Board {
        &self.round.board
    }

    /// Return the indexes of the differences, in slot order.
    pub fn differences(&self) -> &[usize] {
        &self.round.injection.accepted
    }

    /// Return the number of differences to find.
    ///
    /// This is the number of differences actually placed, which can be lower than the number
    /// requested by the difficulty.
    pub fn total_differences(&self) -> usize {
        self.round.injection.achieved()
    }

    /// Return the differences found so far.
    pub fn found(&self) -> &[usize] {
        &self.found
    }

    /// Return the differences revealed by hints.
    pub fn hinted(&self) -> &[usize] {
        &self.hinted
    }

    /// Return the combo state.
    pub fn combo(&self) -> &Combo {
        &self.combo
    }

    /// Drop the combo if the last find is older than the combo timeout, and return the
    /// remaining combo count.
    ///
    /// Call it periodically, so that the displayed multiplier decays between finds.
    pub fn expire_combo(&mut self, now: Instant) -> usize {
        self.combo.expire(now);
        self.combo.count()
    }

    /// Whether all the differences are found.
    pub fn is_won(&self) -> bool {
        self.found.len() == self.total_differences()
    }

    /// Whether the countdown reached zero.
    pub fn is_time_up(&self) -> bool {
        self.remaining_secs() == 0
    }

    /// Whether the round still accepts clicks.
    pub fn is_active(&self) -> bool {
        !self.paused && !self.is_won() && !self.is_time_up()
    }

    /// Return the time played so far, pauses excluded.
    pub fn elapsed(&self) -> Duration {
        match self.pause_duration {
            Some(d) => d,
            None => self.start_time.elapsed(),
        }
    }

    /// Return the number of seconds left.
    pub fn remaining_secs(&self) -> u32 {
        let elapsed: u64 = self.elapsed().as_secs();
        let total: u64 = u64::from(self.round.parameters.duration_secs);
        total.saturating_sub(elapsed) as u32
    }

    /// Pause the round.
    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        // Store the played time so far, so that the pause time can be deduced when the
        // player resumes the round.
        self.pause_duration = Some(self.start_time.elapsed());
        self.paused = true;
    }

    /// Resume the round.
    pub fn resume(&mut self) {
        if let Some(d) = self.pause_duration {
            self.start_time += self.start_time.elapsed() - d;
            self.pause_duration = None;
        }
        self.paused = false;
    }

    /// Whether a click on the given panel hits the not-yet-found difference at `index`.
    pub fn hit_test(&self, panel: Panel, x: f64, y: f64, index: usize) -> bool {
        !self.found.contains(&index) && self.round.board.hit_test(panel, x, y, index)
    }

    /// Process a click on the given panel and return the differences it found.
    ///
    /// Each found difference earns a bonus, multiplied by the combo multiplier.
    pub fn click(&mut self, panel: Panel, x: f64, y: f64) -> Vec<usize> {
        let mut newly_found: Vec<usize> = Vec::new();
        if !self.is_active() {
            return newly_found;
        }

        let remaining: u32 = self.remaining_secs();
        let total: u32 = self.round.parameters.duration_secs;

        for index in 0..self.round.board.len() {
            if !self.hit_test(panel, x, y, index) {
                continue;
            }
            self.found.push(index);
            newly_found.push(index);

            let multiplier: f64 = self.combo.register_find();
            let base: u32 = score::difference_bonus(remaining, total);
            let bonus: u32 = score::with_combo(base, multiplier);
            self.difference_bonuses += bonus;
            self.combo_bonus += bonus.saturating_sub(base);
            debug!(
                "Found difference {index} ({}/{}): +{bonus}",
                self.found.len(),
                self.total_differences()
            );
        }
        newly_found
    }

    /// Reveal a difference that is neither found nor already revealed, and return its index.
    ///
    /// Return None when there is nothing left to reveal.
    pub fn reveal_hint<R: RandomSource>(&mut self, rng: &mut R) -> Option<usize> {
        let candidates: Vec<usize> = self
            .round
            .injection
            .accepted
            .iter()
            .filter(|i| !self.found.contains(i) && !self.hinted.contains(i))
            .copied()
            .collect();
        let index: usize = *rng.pick(&candidates)?;
        self.hinted.push(index);
        debug!("Hint revealed difference {index}");
        Some(index)
    }

    /// Return the score breakdown of the round.
    pub fn final_score(&self) -> FinalScore {
        FinalScore::new(
            self.difference_bonuses,
            self.combo_bonus,
            self.remaining_secs(),
        )
    }
}
