/*
lib.rs

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

//! Findit is a "spot the difference" game.
//!
//! Two panels of random shapes are shown side by side, and the player must find the shapes that
//! differ on the right panel before the time runs out.
//!
//! * [`generator`] builds the panels and injects the differences.
//! * [`round`] tracks a round in progress: finds, hints, and the countdown.
//! * [`combo`] and [`score`] compute the points.
//! * [`highscores`] keeps the player statistics and the daily challenge scoreboards, which
//!   [`saver`] stores on disk with the player settings.

pub mod combo;
pub mod generator;
pub mod highscores;
pub mod round;
pub mod saver;
pub mod score;

pub use generator::{GeneratedRound, generate_round};
pub use round::RoundState;
