/*
round_generation.rs

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

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;

use findit::generator::board::{Board, Panel};
use findit::generator::differences::{DifferenceInjector, MAX_ATTEMPTS, Mutation};
use findit::generator::parameters::{
    DifficultySetting, GameMode, MapSizePreset, MapSizeSetting, Settings,
};
use findit::generator::random_source::{EntropyRandom, SeededRandom, daily_seed};
use findit::generator::shapes::{Catalog, ColorKind, MARGIN, ShapeKind};
use findit::{RoundState, generate_round};

fn small_layout(seed: i64) -> (Board, SeededRandom) {
    let mut rng = SeededRandom::new(seed);
    let board = Board::generate(&mut rng, &Catalog::default(), 600, 400, 10);
    (board, rng)
}

#[test]
fn same_seed_gives_the_same_round() {
    let settings = Settings {
        difficulty: DifficultySetting::Level(8),
        map_size: MapSizeSetting::Preset(MapSizePreset::Large),
        ..Settings::default()
    };
    let a = generate_round(&GameMode::Normal, &settings, &mut SeededRandom::new(99));
    let b = generate_round(&GameMode::Normal, &settings, &mut SeededRandom::new(99));
    assert_eq!(a, b);

    let c = generate_round(&GameMode::Normal, &settings, &mut SeededRandom::new(100));
    assert_ne!(a.board, c.board);
}

#[test]
fn daily_round_is_the_same_for_everyone() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let seed = daily_seed(day);
    let mode = GameMode::Daily { seed };

    // The daily round ignores the player settings.
    let custom = Settings {
        difficulty: DifficultySetting::Level(40),
        shapes: vec![ShapeKind::Star],
        ..Settings::default()
    };
    let a = generate_round(&mode, &Settings::default(), &mut SeededRandom::new(seed));
    let b = generate_round(&mode, &custom, &mut SeededRandom::new(seed));
    assert_eq!(a.parameters, b.parameters);
    assert_eq!(a.parameters.difference_count, 10);
    assert_eq!(a.board.len(), 30);
    assert_eq!(a.injection, b.injection);
}

#[test]
fn panels_match_except_for_the_differences() {
    let mut rng = EntropyRandom::from_rng(StdRng::seed_from_u64(5));
    let round = generate_round(&GameMode::Normal, &Settings::default(), &mut rng);
    let board = &round.board;
    assert_eq!(board.original().len(), board.modified().len());
    assert!(board.len() >= round.parameters.difference_count);

    for (i, (original, modified)) in board.original().iter().zip(board.modified()).enumerate() {
        assert!(!original.is_modified);
        assert!(original.x >= MARGIN && original.x <= board.width - MARGIN);
        assert!(original.y >= MARGIN && original.y <= board.height - MARGIN);
        if round.injection.accepted.contains(&i) {
            assert!(modified.is_modified);
            assert_eq!(original.changed_attributes(modified).len(), 1);
        } else {
            assert_eq!(original, modified);
        }
    }
}

#[test]
fn crowded_layout_places_fewer_differences() {
    let (mut board, mut rng) = small_layout(12345);
    let catalog = Catalog::default();
    let injection = DifferenceInjector::new(&catalog).inject(&mut board, 5, &mut rng);

    assert_eq!(injection.accepted, vec![3, 4, 7, 2]);
    assert_eq!(
        injection.mutations,
        vec![
            Mutation::Position,
            Mutation::Color,
            Mutation::Position,
            Mutation::Size
        ]
    );
    assert_eq!(injection.attempts, 41);
    assert!(injection.attempts < MAX_ATTEMPTS);
    assert!(injection.is_degraded());

    // Same seed, same outcome.
    let (mut again, mut rng) = small_layout(12345);
    let replay = DifferenceInjector::new(&catalog).inject(&mut again, 5, &mut rng);
    assert_eq!(replay, injection);
    assert_eq!(again, board);
}

#[test]
fn roomy_layout_places_every_difference() {
    let (mut board, mut rng) = small_layout(7);
    let catalog = Catalog::default();
    let injection = DifferenceInjector::new(&catalog).inject(&mut board, 5, &mut rng);

    assert_eq!(injection.accepted, vec![4, 9, 6, 5, 7]);
    assert_eq!(
        injection.mutations,
        vec![
            Mutation::Color,
            Mutation::Position,
            Mutation::Kind,
            Mutation::Kind,
            Mutation::Color
        ]
    );
    assert_eq!(injection.attempts, 19);
    assert!(!injection.is_degraded());
    for (slot, &i) in injection.accepted.iter().enumerate() {
        assert_eq!(board.modified()[i].difference_slot, Some(slot));
    }
}

#[test]
fn single_color_rounds_have_visible_differences() {
    let settings = Settings {
        colors: vec![ColorKind::Blue],
        ..Settings::default()
    };
    for seed in 1..10 {
        let round = generate_round(&GameMode::Normal, &settings, &mut SeededRandom::new(seed));
        assert!(round.board.original().iter().all(|s| s.color == ColorKind::Blue));
        assert!(!round.injection.mutations.contains(&Mutation::Color));
        for &i in &round.injection.accepted {
            let changed = round.board.original()[i].changed_attributes(&round.board.modified()[i]);
            assert_eq!(changed.len(), 1);
        }
    }
}

#[test]
fn round_state_counts_placed_differences() {
    let settings = Settings {
        difficulty: DifficultySetting::Level(50),
        map_size: MapSizeSetting::Preset(MapSizePreset::Small),
        ..Settings::default()
    };
    let round = generate_round(&GameMode::Normal, &settings, &mut SeededRandom::new(3));
    let achieved = round.injection.achieved();
    let mut state = RoundState::new(round);
    assert_eq!(state.total_differences(), achieved);

    for index in state.differences().to_vec() {
        let shape = &state.board().panel(Panel::Right)[index];
        let (x, y) = (f64::from(shape.x), f64::from(shape.y));
        state.click(Panel::Right, x, y);
    }
    assert!(state.is_won());
}
