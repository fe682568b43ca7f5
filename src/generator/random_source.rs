/*
random_source.rs

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

//! Random sources for the round generator.
//!
//! Every random draw made while building a round goes through a [`RandomSource`].
//! Two implementations are provided:
//!
//! * [`EntropyRandom`] draws from the system entropy (through [`rand`]).
//!   Rounds are not reproducible.
//! * [`SeededRandom`] is a linear congruential generator.
//!   The same seed always produces the same sequence on every machine, which is what makes the
//!   daily challenge identical for all the players of a given day.
//!
//! The source is passed by mutable reference to the generation functions, so a source is owned
//! by one generation call at a time.

use chrono::{Local, NaiveDate};
use rand::Rng;
use rand::rngs::ThreadRng;

/// LCG multiplier.
const LCG_MULTIPLIER: u32 = 1_664_525;

/// LCG increment.
const LCG_INCREMENT: u32 = 1_013_904_223;

/// 2^32, used to scale the LCG state to [0, 1).
const LCG_MODULUS: f64 = 4_294_967_296.0;

/// Source of pseudo-random numbers.
pub trait RandomSource {
    /// Return a float in the [0, 1) range.
    fn next_f64(&mut self) -> f64;

    /// Return an integer between `min` and `max`, both included.
    ///
    /// If `max` is lower than `min`, then `min` is returned without drawing a number.
    fn int_between(&mut self, min: i32, max: i32) -> i32 {
        if max < min {
            return min;
        }
        let span: f64 = f64::from(max) - f64::from(min) + 1.0;
        (self.next_f64() * span).floor() as i32 + min
    }

    /// Return a random index for a sequence of the given length, or None if the sequence is
    /// empty.
    fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let max: i32 = i32::try_from(len - 1).unwrap_or(i32::MAX);
        Some(self.int_between(0, max) as usize)
    }

    /// Pick an element from the given slice, or None if the slice is empty.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).and_then(|i| items.get(i))
    }
}

/// Reproducible linear congruential generator.
///
/// `state = (state * 1664525 + 1013904223) mod 2^32` and the output is `state / 2^32`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: u32,
}

impl SeededRandom {
    /// Create a [`SeededRandom`] object.
    ///
    /// Negative seeds use their absolute value, and a zero seed is replaced by 1 so that the
    /// sequence does not depend on the sign of the input.
    pub fn new(seed: i64) -> Self {
        let seed: u64 = match seed.unsigned_abs() {
            0 => 1,
            s => s,
        };
        Self {
            state: (seed % (1 << 32)) as u32,
        }
    }

    /// Create a [`SeededRandom`] object for the daily challenge of the given date.
    pub fn for_date(date: NaiveDate) -> Self {
        Self::new(daily_seed(date))
    }

    /// Return the current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        f64::from(self.state) / LCG_MODULUS
    }
}

/// Non-reproducible source backed by a [`rand`] generator.
#[derive(Debug, Clone)]
pub struct EntropyRandom<R: Rng = ThreadRng> {
    rng: R,
}

impl Default for EntropyRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropyRandom {
    /// Create an [`EntropyRandom`] object that uses the thread-local generator.
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl<R: Rng> EntropyRandom<R> {
    /// Create an [`EntropyRandom`] object from any [`rand`] generator.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for EntropyRandom<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Return the date in the `YYYY-MM-DD` format.
///
/// This string is both the input of [`daily_seed`] and the key of the daily scoreboards.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Return the local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Compute the daily challenge seed for the given date.
///
/// The `YYYY-MM-DD` string is hashed with `hash = hash * 31 + char` on 32 bits with wraparound,
/// and the absolute value of the hash is the seed.
pub fn daily_seed(date: NaiveDate) -> i64 {
    let hash: i32 = date_key(date).chars().fold(0i32, |hash, c| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32)
    });
    i64::from(hash.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn lcg_state_sequence_for_seed_12345() {
        let mut rng = SeededRandom::new(12345);
        rng.next_f64();
        assert_eq!(rng.state(), 87_628_868);
        rng.next_f64();
        assert_eq!(rng.state(), 71_072_467);
        let v = rng.next_f64();
        assert_eq!(rng.state(), 2_332_836_374);
        assert!((v - 0.543_155_794_497_579_3).abs() < 1e-12);
    }

    #[test]
    fn zero_and_negative_seeds_do_not_degenerate() {
        let mut zero = SeededRandom::new(0);
        let mut one = SeededRandom::new(1);
        assert_eq!(zero.next_f64(), one.next_f64());

        let mut negative = SeededRandom::new(-7);
        let mut positive = SeededRandom::new(7);
        for _ in 0..10 {
            assert_eq!(negative.next_f64(), positive.next_f64());
        }
    }

    #[test]
    fn int_between_is_inclusive_and_bounded() {
        let mut rng = SeededRandom::new(99);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..2000 {
            let v = rng.int_between(-2, 2);
            assert!((-2..=2).contains(&v));
            seen_min |= v == -2;
            seen_max |= v == 2;
        }
        assert!(seen_min && seen_max);
        assert_eq!(rng.int_between(5, 5), 5);
    }

    #[test]
    fn int_between_matches_floor_formula() {
        let mut rng = SeededRandom::new(12345);
        let values: Vec<i32> = (0..5).map(|_| rng.int_between(1, 6)).collect();
        assert_eq!(values, vec![1, 1, 4, 4, 6]);
    }

    #[test]
    fn pick_on_empty_slice_returns_none() {
        let mut rng = SeededRandom::new(3);
        let empty: [u8; 0] = [];
        assert_eq!(rng.pick(&empty), None);
        assert_eq!(rng.pick(&[42]), Some(&42));
    }

    #[test]
    fn daily_seed_is_stable_for_a_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(date_key(date), "2024-01-01");
        assert_eq!(daily_seed(date), 613_341_632);
        assert_eq!(daily_seed(date), daily_seed(date));

        let other = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(daily_seed(other), 274_221_637);
    }

    #[test]
    fn entropy_source_stays_in_range() {
        let mut rng = EntropyRandom::from_rng(StdRng::seed_from_u64(5));
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
