/*
board.rs

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

//! Generate the two panels of a round.
//!
//! A [`Board`] stores the original (left panel) and the modified (right panel) shape
//! collections.
//! Both collections always have the same length, and index `i` in one collection corresponds to
//! index `i` in the other.

use log::debug;
use serde::{Deserialize, Serialize};

use super::parameters::GameMode;
use super::random_source::RandomSource;
use super::shapes::{Catalog, Shape};

/// Number of shapes in daily challenge rounds.
pub const DAILY_SHAPE_COUNT: usize = 30;

/// Maximum number of shapes in normal rounds.
pub const MAX_SHAPE_COUNT: usize = 40;

/// Maximum number of full regenerations when the board has fewer shapes than required.
const MAX_REGENERATIONS: usize = 100;

/// Panel of the game.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    /// Left panel, which shows the original shapes.
    Left,

    /// Right panel, which shows the modified shapes.
    Right,
}

/// Original and modified shapes of a round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Board {
    /// Canvas width.
    pub width: i32,

    /// Canvas height.
    pub height: i32,

    /// Shapes of the left panel.
    original: Vec<Shape>,

    /// Shapes of the right panel.
    modified: Vec<Shape>,
}

impl Board {
    /// Generate a board of `shape_count` random shapes.
    ///
    /// The modified collection starts as a copy of the original collection.
    pub fn generate<R: RandomSource>(
        rng: &mut R,
        catalog: &Catalog,
        width: i32,
        height: i32,
        shape_count: usize,
    ) -> Self {
        let original: Vec<Shape> = (0..shape_count)
            .map(|_| catalog.create_shape(rng, width, height))
            .collect();
        let modified: Vec<Shape> = original.clone();

        debug!("Generated {shape_count} shapes for a {width}x{height} canvas");
        Self {
            width,
            height,
            original,
            modified,
        }
    }

    /// Generate a board that holds at least `min_shapes` shapes.
    ///
    /// The board is regenerated with a new shape count up to 100 times. If it is still too
    /// small, then the missing shapes are appended one by one, keeping the shapes already
    /// placed.
    pub fn generate_at_least<R: RandomSource>(
        rng: &mut R,
        catalog: &Catalog,
        mode: &GameMode,
        difficulty: usize,
        width: i32,
        height: i32,
        min_shapes: usize,
    ) -> Self {
        let count: usize = shape_count(rng, mode, difficulty);
        let mut board: Board = Self::generate(rng, catalog, width, height, count);

        let mut regenerations: usize = 0;
        while board.len() < min_shapes && regenerations < MAX_REGENERATIONS {
            let count: usize = shape_count(rng, mode, difficulty);
            board = Self::generate(rng, catalog, width, height, count);
            regenerations += 1;
        }

        if board.len() < min_shapes {
            debug!(
                "Board still has {} shapes after {regenerations} regenerations, appending {}",
                board.len(),
                min_shapes - board.len()
            );
            board.top_up(rng, catalog, min_shapes);
        }
        board
    }

    /// Append random shapes until the board has `min_shapes` shapes.
    pub fn top_up<R: RandomSource>(&mut self, rng: &mut R, catalog: &Catalog, min_shapes: usize) {
        while self.original.len() < min_shapes {
            let shape: Shape = catalog.create_shape(rng, self.width, self.height);
            self.modified.push(shape.clone());
            self.original.push(shape);
        }
    }

    /// Return the number of shapes per panel.
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Whether the board has no shapes.
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }

    /// Return the shapes of the left panel.
    pub fn original(&self) -> &[Shape] {
        &self.original
    }

    /// Return the shapes of the right panel.
    pub fn modified(&self) -> &[Shape] {
        &self.modified
    }

    /// Return the shapes of the given panel.
    pub fn panel(&self, panel: Panel) -> &[Shape] {
        match panel {
            Panel::Left => &self.original,
            Panel::Right => &self.modified,
        }
    }

    /// Replace the modified shape at the given index.
    pub(crate) fn set_modified(&mut self, index: usize, shape: Shape) {
        if let Some(s) = self.modified.get_mut(index) {
            *s = shape;
        }
    }

    /// Whether a click at the given coordinates, on the given panel, hits the shape at `index`.
    ///
    /// Only modified shapes can be hit. On the left panel, the click is tested against the
    /// original shape, so that the player can click the difference on either panel.
    pub fn hit_test(&self, panel: Panel, x: f64, y: f64, index: usize) -> bool {
        match self.modified.get(index) {
            Some(m) if m.is_modified => match self.panel(panel).get(index) {
                Some(s) => s.contains(x, y),
                None => false,
            },
            _ => false,
        }
    }
}

/// Return the number of shapes for a round.
///
/// Daily challenges always have [`DAILY_SHAPE_COUNT`] shapes. Normal rounds have
/// `min(40, difficulty * 3 + random(0, 5))` shapes.
pub fn shape_count<R: RandomSource>(rng: &mut R, mode: &GameMode, difficulty: usize) -> usize {
    match mode {
        GameMode::Daily { .. } => DAILY_SHAPE_COUNT,
        GameMode::Normal => {
            let extra: usize = rng.int_between(0, 5) as usize;
            MAX_SHAPE_COUNT.min(difficulty * 3 + extra)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::random_source::SeededRandom;
    use crate::generator::shapes::ColorKind;

    #[test]
    fn modified_is_an_independent_copy() {
        let mut rng = SeededRandom::new(7);
        let mut board = Board::generate(&mut rng, &Catalog::default(), 600, 400, 12);
        assert_eq!(board.len(), 12);
        assert_eq!(board.original(), board.modified());

        let mut changed = board.modified()[3].clone();
        changed.color = if changed.color == ColorKind::Red {
            ColorKind::Blue
        } else {
            ColorKind::Red
        };
        board.set_modified(3, changed.clone());
        assert_eq!(board.modified()[3], changed);
        assert_ne!(board.original()[3], changed);
    }

    #[test]
    fn shape_count_is_drawn_before_the_shapes() {
        let catalog = Catalog::default();
        let mode = GameMode::Daily { seed: 5 };

        let mut rng = SeededRandom::new(5);
        let board = Board::generate_at_least(&mut rng, &catalog, &mode, 10, 600, 400, 10);

        let mut replay = SeededRandom::new(5);
        let count = shape_count(&mut replay, &mode, 10);
        let expected = Board::generate(&mut replay, &catalog, 600, 400, count);
        assert_eq!(board, expected);
        assert_eq!(rng, replay);
    }

    #[test]
    fn small_boards_are_regenerated_or_topped_up() {
        let catalog = Catalog::default();
        let mut rng = SeededRandom::new(9);
        let mode = GameMode::Normal;
        let board = Board::generate_at_least(&mut rng, &catalog, &mode, 1, 600, 400, 20);
        assert!(board.len() >= 20);
        assert_eq!(board.original(), board.modified());
    }

    #[test]
    fn daily_rounds_have_thirty_shapes() {
        let mut rng = SeededRandom::new(1);
        let mode = GameMode::Daily { seed: 1 };
        for difficulty in [1, 10, 50] {
            assert_eq!(shape_count(&mut rng, &mode, difficulty), DAILY_SHAPE_COUNT);
        }
    }

    #[test]
    fn normal_shape_count_is_capped() {
        let mut rng = SeededRandom::new(11);
        for _ in 0..100 {
            let n = shape_count(&mut rng, &GameMode::Normal, 3);
            assert!((9..=14).contains(&n));
            assert_eq!(shape_count(&mut rng, &GameMode::Normal, 20), MAX_SHAPE_COUNT);
        }
    }

    #[test]
    fn large_difficulty_is_topped_up() {
        let mut rng = SeededRandom::new(5);
        let board = Board::generate_at_least(
            &mut rng,
            &Catalog::default(),
            &GameMode::Normal,
            45,
            600,
            400,
            45,
        );
        assert_eq!(board.len(), 45);
        assert_eq!(board.original(), board.modified());
    }

    #[test]
    fn top_up_keeps_existing_shapes() {
        let mut rng = SeededRandom::new(9);
        let catalog = Catalog::default();
        let mut board = Board::generate(&mut rng, &catalog, 600, 400, 4);
        let before: Vec<Shape> = board.original().to_vec();
        board.top_up(&mut rng, &catalog, 10);
        assert_eq!(board.len(), 10);
        assert_eq!(&board.original()[..4], &before[..]);
        assert_eq!(board.original(), board.modified());
    }

    #[test]
    fn unmodified_shapes_cannot_be_hit() {
        let mut rng = SeededRandom::new(3);
        let mut board = Board::generate(&mut rng, &Catalog::default(), 600, 400, 2);
        let s = board.original()[0].clone();
        let (x, y) = (f64::from(s.x), f64::from(s.y));
        assert!(!board.hit_test(Panel::Left, x, y, 0));

        let mut m = s.clone();
        m.is_modified = true;
        m.difference_slot = Some(0);
        board.set_modified(0, m);
        assert!(board.hit_test(Panel::Left, x, y, 0));
        assert!(board.hit_test(Panel::Right, x, y, 0));
        assert!(!board.hit_test(Panel::Right, x, y, 7));
    }
}
