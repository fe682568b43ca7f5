/*
differences.rs

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

//! Inject differences into the modified panel.
//!
//! The injector draws shapes from the modified collection, applies one [`Mutation`] to a copy
//! of each, and keeps the copy only if it does not overlap any shape already accepted as a
//! difference.
//! Mutated shapes can still overlap unmodified shapes.
//!
//! The search is bounded:
//!
//! * at most [`MAX_ATTEMPTS`] draws for the whole pass,
//! * a shape that still overlaps an accepted difference after [`MAX_OVERLAP_TOLERANCE`] draws is
//!   dropped from the candidates,
//! * a shape whose mutations keep overlapping is dropped after [`MAX_MODIFICATION_ATTEMPTS`]
//!   failures.
//!
//! When the budget runs out, the round gets fewer differences than requested.
//! The [`Injection`] report gives the achieved count, which is the only count the rest of the
//! game uses.

use log::{Level, debug, log_enabled, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use strum_macros::FromRepr;

use super::board::Board;
use super::collision;
use super::random_source::RandomSource;
use super::shapes::{Catalog, ColorKind, MARGIN, MAX_SIZE, MIN_SIZE, Shape, ShapeKind};

/// Maximum number of draws for a whole injection pass.
pub const MAX_ATTEMPTS: usize = 2000;

/// Number of failed mutations after which a shape is no longer a candidate.
pub const MAX_MODIFICATION_ATTEMPTS: usize = 100;

/// Number of draws a shape that already overlaps an accepted difference is given.
pub const MAX_OVERLAP_TOLERANCE: usize = 10;

/// Number of extra draws to find a color different from the current one.
pub const MAX_COLOR_RETRIES: usize = 20;

/// Largest position shift on each axis.
const MAX_SHIFT: i32 = 40;

/// Kind of change applied to a shape.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum Mutation {
    /// New color from the enabled palette.
    Color,

    /// Size scaled up or down by 15 to 35%.
    Size,

    /// Position shifted by up to 40 units on each axis.
    Position,

    /// Different kind from the full catalog.
    Kind,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mutation::Color => write!(f, "color"),
            Mutation::Size => write!(f, "size"),
            Mutation::Position => write!(f, "position"),
            Mutation::Kind => write!(f, "kind"),
        }
    }
}

/// Apply a random mutation to the shape and return the mutation kind.
///
/// The shape is flagged as modified. `width` and `height` are the canvas dimensions, used to
/// keep shifted shapes away from the edges.
///
/// The kind change draws from the full catalog, not only from the enabled kinds.
pub fn mutate<R: RandomSource>(
    shape: &mut Shape,
    catalog: &Catalog,
    width: i32,
    height: i32,
    rng: &mut R,
) -> Mutation {
    let mutation: Mutation =
        Mutation::from_repr(rng.int_between(0, 3) as usize).unwrap_or(Mutation::Color);

    match mutation {
        Mutation::Color => {
            let palette_len: usize = catalog.colors().len();
            let mut color: ColorKind = catalog.random_color(rng);
            let mut retries: usize = 0;
            // With a single enabled color there is nothing else to pick
            while color == shape.color && retries < MAX_COLOR_RETRIES && palette_len > 1 {
                color = catalog.random_color(rng);
                retries += 1;
            }
            shape.color = color;
        }

        Mutation::Size => {
            let change: f64 = 0.15 + rng.next_f64() * 0.20;
            let factor: f64 = if rng.next_f64() < 0.5 {
                1.0 + change
            } else {
                1.0 - change
            };
            shape.size = ((f64::from(shape.size) * factor).floor() as i32).clamp(MIN_SIZE, MAX_SIZE);
        }

        Mutation::Position => {
            let shift_x: i32 = rng.int_between(-MAX_SHIFT, MAX_SHIFT);
            let shift_y: i32 = rng.int_between(-MAX_SHIFT, MAX_SHIFT);
            shape.x = (shape.x + shift_x).clamp(MARGIN, (width - MARGIN).max(MARGIN));
            shape.y = (shape.y + shift_y).clamp(MARGIN, (height - MARGIN).max(MARGIN));
        }

        Mutation::Kind => {
            let others: Vec<ShapeKind> = ShapeKind::ALL
                .iter()
                .filter(|&&k| k != shape.kind)
                .copied()
                .collect();
            if let Some(kind) = rng.pick(&others) {
                shape.kind = *kind;
            }
        }
    }

    shape.is_modified = true;
    mutation
}

/// Result of an injection pass.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Injection {
    /// Number of differences that were requested.
    pub requested: usize,

    /// Indexes of the modified shapes, in difference slot order.
    pub accepted: Vec<usize>,

    /// Mutation applied to each accepted shape, in the same order as [`Injection::accepted`].
    pub mutations: Vec<Mutation>,

    /// Number of draws used.
    pub attempts: usize,
}

impl Injection {
    /// Return the number of differences actually placed.
    pub fn achieved(&self) -> usize {
        self.accepted.len()
    }

    /// Whether fewer differences than requested could be placed.
    pub fn is_degraded(&self) -> bool {
        self.accepted.len() < self.requested
    }
}

/// Difference injector.
pub struct DifferenceInjector<'a> {
    /// Enabled kinds and colors.
    catalog: &'a Catalog,

    /// Maximum number of draws for the pass.
    pub max_attempts: usize,

    /// Duration in seconds of the last injection pass.
    pub duration: f32,
}

impl<'a> DifferenceInjector<'a> {
    /// Create the object.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            max_attempts: MAX_ATTEMPTS,
            duration: 0.0,
        }
    }

    /// Inject up to `target` differences into the modified collection of the board.
    ///
    /// Accepted shapes get `is_modified` set and their difference slot assigned in acceptance
    /// order.
    pub fn inject<R: RandomSource>(
        &mut self,
        board: &mut Board,
        target: usize,
        rng: &mut R,
    ) -> Injection {
        let start: Instant = Instant::now();
        let mut available: Vec<usize> = (0..board.len()).collect();
        let mut accepted: Vec<usize> = Vec::with_capacity(target);
        let mut mutations: Vec<Mutation> = Vec::with_capacity(target);
        let mut attempts: usize = 0;

        while accepted.len() < target && !available.is_empty() && attempts < self.max_attempts {
            let slot: usize = accepted.len();
            let mut modification_attempts: usize = 0;
            let mut placed: bool = false;

            while !placed && !available.is_empty() && attempts < self.max_attempts {
                attempts += 1;

                let Some(position) = rng.index(available.len()) else {
                    break;
                };
                let index: usize = available[position];
                let current: &Shape = &board.modified()[index];

                // An unmodified shape that already overlaps a difference gets a few chances: the
                // mutation might move or shrink it away.
                if collision::overlaps_any(current, board.modified(), &accepted, Some(index)) {
                    if modification_attempts < MAX_OVERLAP_TOLERANCE {
                        modification_attempts += 1;
                    } else {
                        debug!("Shape {index} overlaps a difference, dropping it");
                        available.remove(position);
                        modification_attempts = 0;
                        continue;
                    }
                }

                let mut candidate: Shape = current.clone();
                let mutation: Mutation =
                    mutate(&mut candidate, self.catalog, board.width, board.height, rng);

                // A mutation can leave the shape unchanged (single enabled color, zero shift).
                // Such a shape would be an invisible difference.
                let unchanged: bool = board
                    .original()
                    .get(index)
                    .is_some_and(|o| o.changed_attributes(&candidate).is_empty());

                if !unchanged
                    && !collision::overlaps_any(
                        &candidate,
                        board.modified(),
                        &accepted,
                        Some(index),
                    )
                {
                    candidate.difference_slot = Some(slot);
                    board.set_modified(index, candidate);
                    available.remove(position);
                    accepted.push(index);
                    mutations.push(mutation);
                    placed = true;
                    debug!("Difference {slot}: shape {index}, {mutation} change");
                } else {
                    modification_attempts += 1;
                    if modification_attempts >= MAX_MODIFICATION_ATTEMPTS {
                        debug!("Shape {index} cannot be modified without overlap, dropping it");
                        available.remove(position);
                        modification_attempts = 0;
                    }
                }
            }
        }

        self.duration = start.elapsed().as_secs_f32();
        let injection: Injection = Injection {
            requested: target,
            accepted,
            mutations,
            attempts,
        };

        if injection.is_degraded() {
            warn!(
                "Only {} of {} differences placed ({} attempts, {} shapes)",
                injection.achieved(),
                target,
                attempts,
                board.len()
            );
        } else {
            debug!(
                "Placed {} differences in {} attempts ({}s)",
                injection.achieved(),
                attempts,
                self.duration
            );
        }
        if log_enabled!(Level::Debug) {
            debug!("    accepted = {:?}", injection.accepted);
            debug!("   mutations = {:?}", injection.mutations);
        }
        injection
    }
}
