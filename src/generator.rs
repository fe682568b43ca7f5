/*
generator.rs

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

//! Generate the panels of a round and inject the differences.
//!
//! A round is built in three steps by [`generate_round`]:
//!
//! * The [`parameters::Settings`] chosen by the player, or the fixed daily challenge
//!   parameters, are resolved into [`parameters::RoundParameters`] with
//!   [`parameters::resolve`].
//!
//! * A [`board::Board`] of random shapes is generated.
//!   The shapes are built by the [`shapes::Catalog`] from the enabled kinds and colors.
//!   The right panel starts as a copy of the left panel.
//!
//! * The [`differences::DifferenceInjector`] modifies some shapes of the right panel.
//!   The [`collision`] module keeps the modified shapes apart from each other.
//!   If the shapes are too crowded, then fewer differences than requested are placed, and the
//!   achieved count is reported in the [`differences::Injection`] object.
//!
//! All the random draws go through the provided [`random_source::RandomSource`], so that a
//! [`random_source::SeededRandom`] source makes the whole round reproducible.

pub mod board;
pub mod collision;
pub mod differences;
pub mod parameters;
pub mod random_source;
pub mod shapes;

use log::info;
use serde::{Deserialize, Serialize};

use board::Board;
use differences::{DifferenceInjector, Injection};
use parameters::{GameMode, RoundParameters, Settings};
use random_source::RandomSource;
use shapes::Catalog;

/// Panels and differences of a new round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeneratedRound {
    /// Game mode the round was generated for.
    pub mode: GameMode,

    /// Resolved round parameters.
    pub parameters: RoundParameters,

    /// Original and modified shapes.
    pub board: Board,

    /// Injection report.
    pub injection: Injection,
}

/// Generate a round.
///
/// For the daily challenge, pass a [`random_source::SeededRandom`] created from the mode seed.
/// The daily challenge ignores the settings and uses all the kinds and colors.
pub fn generate_round<R: RandomSource>(
    mode: &GameMode,
    settings: &Settings,
    rng: &mut R,
) -> GeneratedRound {
    let parameters: RoundParameters = parameters::resolve(mode, settings);

    // The daily challenge must be the same for every player, whatever shapes they enabled.
    let catalog: Catalog = match mode {
        GameMode::Daily { .. } => Catalog::default(),
        GameMode::Normal => settings.catalog(),
    };

    let mut board: Board = Board::generate_at_least(
        rng,
        &catalog,
        mode,
        parameters.difference_count,
        parameters.width,
        parameters.height,
        parameters.difference_count,
    );

    let injection: Injection =
        DifferenceInjector::new(&catalog).inject(&mut board, parameters.difference_count, rng);

    info!(
        "{mode} round: {} shapes, {} of {} differences, {}x{}, {}s",
        board.len(),
        injection.achieved(),
        injection.requested,
        parameters.width,
        parameters.height,
        parameters.duration_secs
    );

    GeneratedRound {
        mode: *mode,
        parameters,
        board,
        injection,
    }
}
