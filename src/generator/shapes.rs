/*
shapes.rs

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

//! Shape catalog and shape factory.
//!
//! A [`Shape`] is one visual entity on a panel.
//! Its kind is a [`ShapeKind`] and its color a [`ColorKind`].
//! Everything that depends on the kind (bounding box and click geometry) is read from the
//! [`KindGeometry`] table returned by [`ShapeKind::geometry`].
//!
//! The [`Catalog`] holds the kinds and colors the player enabled, and builds random shapes from
//! them with [`Catalog::create_shape`].

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::FromRepr;

use super::differences::Mutation;
use super::random_source::RandomSource;

/// Minimum distance between a shape center and the canvas edges.
pub const MARGIN: i32 = 50;

/// Smallest size drawn for a new shape.
pub const MIN_INITIAL_SIZE: i32 = 30;

/// Largest size drawn for a new shape.
pub const MAX_INITIAL_SIZE: i32 = 80;

/// Smallest size after a size mutation.
pub const MIN_SIZE: i32 = 20;

/// Largest size after a size mutation.
pub const MAX_SIZE: i32 = 100;

/// Shape kinds.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    FromRepr,
)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum ShapeKind {
    Circle,
    Square,
    Star,
    Box,
    Triangle,
    Pentagon,
    Egg,
}

/// How a click is tested against a shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HitRule {
    /// The click must be within `size` of the shape center.
    Radial,

    /// The click must be inside the axis-aligned square of side `size` centered on the shape.
    Square,
}

/// Geometry capabilities of a shape kind.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KindGeometry {
    /// Click test.
    pub hit: HitRule,

    /// Half side of the bounding square, as a factor of the shape size.
    ///
    /// The bounding square is a spacing heuristic: it is the same for all kinds, even though
    /// an egg is much thinner than a star.
    pub bounds_factor: f64,
}

impl ShapeKind {
    /// All the kinds, in catalog order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Star,
        ShapeKind::Box,
        ShapeKind::Triangle,
        ShapeKind::Pentagon,
        ShapeKind::Egg,
    ];

    /// Return the geometry capabilities of the kind.
    pub const fn geometry(self) -> KindGeometry {
        match self {
            ShapeKind::Square | ShapeKind::Box => KindGeometry {
                hit: HitRule::Square,
                bounds_factor: 1.0,
            },
            ShapeKind::Circle
            | ShapeKind::Star
            | ShapeKind::Triangle
            | ShapeKind::Pentagon
            | ShapeKind::Egg => KindGeometry {
                hit: HitRule::Radial,
                bounds_factor: 1.0,
            },
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShapeKind::Circle => write!(f, "circle"),
            ShapeKind::Square => write!(f, "square"),
            ShapeKind::Star => write!(f, "star"),
            ShapeKind::Box => write!(f, "box"),
            ShapeKind::Triangle => write!(f, "triangle"),
            ShapeKind::Pentagon => write!(f, "pentagon"),
            ShapeKind::Egg => write!(f, "egg"),
        }
    }
}

/// Shape colors.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    ValueEnum,
    FromRepr,
)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum ColorKind {
    Red,
    Blue,
    Orange,
    Green,
    Purple,
    Black,
    Cyan,
    Lime,
    Brown,
}

impl ColorKind {
    /// All the colors, in palette order.
    pub const ALL: [ColorKind; 9] = [
        ColorKind::Red,
        ColorKind::Blue,
        ColorKind::Orange,
        ColorKind::Green,
        ColorKind::Purple,
        ColorKind::Black,
        ColorKind::Cyan,
        ColorKind::Lime,
        ColorKind::Brown,
    ];

    /// Return the color components (red, green, blue).
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorKind::Red => (0xFF, 0, 0),
            ColorKind::Blue => (0, 0, 0xFF),
            ColorKind::Orange => (0xFF, 0xA5, 0),
            ColorKind::Green => (0, 0x80, 0),
            ColorKind::Purple => (0x80, 0, 0x80),
            ColorKind::Black => (0, 0, 0),
            ColorKind::Cyan => (0, 0xFF, 0xFF),
            ColorKind::Lime => (0, 0xFF, 0),
            ColorKind::Brown => (0xA5, 0x2A, 0x2A),
        }
    }

    /// Return the CSS hexadecimal notation of the color.
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl fmt::Display for ColorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ColorKind::Red => write!(f, "red"),
            ColorKind::Blue => write!(f, "blue"),
            ColorKind::Orange => write!(f, "orange"),
            ColorKind::Green => write!(f, "green"),
            ColorKind::Purple => write!(f, "purple"),
            ColorKind::Black => write!(f, "black"),
            ColorKind::Cyan => write!(f, "cyan"),
            ColorKind::Lime => write!(f, "lime"),
            ColorKind::Brown => write!(f, "brown"),
        }
    }
}

/// One shape on a panel.
///
/// Shapes have no identity beyond their index in the [`super::board::Board`] collections.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Shape {
    /// Shape kind.
    pub kind: ShapeKind,

    /// Horizontal position of the center, within `[MARGIN, width - MARGIN]`.
    pub x: i32,

    /// Vertical position of the center, within `[MARGIN, height - MARGIN]`.
    pub y: i32,

    /// Shape size, within `[MIN_SIZE, MAX_SIZE]`.
    pub size: i32,

    /// Fill color.
    pub color: ColorKind,

    /// Whether the difference injector changed this shape.
    pub is_modified: bool,

    /// Position of the shape in the ordered list of the round differences.
    pub difference_slot: Option<usize>,
}

impl Shape {
    /// Whether the given point is on the shape, according to the kind's [`HitRule`].
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let dx: f64 = px - f64::from(self.x);
        let dy: f64 = py - f64::from(self.y);
        let size: f64 = f64::from(self.size);

        match self.kind.geometry().hit {
            HitRule::Radial => (dx * dx + dy * dy).sqrt() <= size,
            HitRule::Square => {
                let half: f64 = size / 2.0;
                dx.abs() <= half && dy.abs() <= half
            }
        }
    }

    /// Return the attributes that differ between the two shapes, as the [`Mutation`] that
    /// would produce each change.
    ///
    /// The position counts as one attribute, even if both coordinates differ.
    pub fn changed_attributes(&self, other: &Shape) -> Vec<Mutation> {
        let mut changed: Vec<Mutation> = Vec::with_capacity(4);
        if self.kind != other.kind {
            changed.push(Mutation::Kind);
        }
        if self.color != other.color {
            changed.push(Mutation::Color);
        }
        if self.size != other.size {
            changed.push(Mutation::Size);
        }
        if self.x != other.x || self.y != other.y {
            changed.push(Mutation::Position);
        }
        changed
    }
}

/// Kinds and colors enabled for the round.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Enabled kinds, in catalog order. Never empty.
    kinds: Vec<ShapeKind>,

    /// Enabled colors, in palette order. Never empty.
    colors: Vec<ColorKind>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(&[], &[])
    }
}

impl Catalog {
    /// Create a [`Catalog`] object.
    ///
    /// An empty list of kinds or colors enables the full catalog or palette.
    /// Duplicates are ignored and the lists are kept in catalog order, so that the random draws
    /// do not depend on the order in which the player listed them.
    pub fn new(kinds: &[ShapeKind], colors: &[ColorKind]) -> Self {
        let mut enabled_kinds: Vec<ShapeKind> = ShapeKind::ALL
            .iter()
            .filter(|k| kinds.contains(k))
            .copied()
            .collect();
        if enabled_kinds.is_empty() {
            enabled_kinds = ShapeKind::ALL.to_vec();
        }

        let mut enabled_colors: Vec<ColorKind> = ColorKind::ALL
            .iter()
            .filter(|c| colors.contains(c))
            .copied()
            .collect();
        if enabled_colors.is_empty() {
            enabled_colors = ColorKind::ALL.to_vec();
        }

        Self {
            kinds: enabled_kinds,
            colors: enabled_colors,
        }
    }

    /// Return the enabled kinds.
    pub fn kinds(&self) -> &[ShapeKind] {
        &self.kinds
    }

    /// Return the enabled colors.
    pub fn colors(&self) -> &[ColorKind] {
        &self.colors
    }

    /// Pick a random enabled kind.
    pub fn random_kind<R: RandomSource>(&self, rng: &mut R) -> ShapeKind {
        rng.pick(&self.kinds).copied().unwrap_or(ShapeKind::Circle)
    }

    /// Pick a random enabled color.
    pub fn random_color<R: RandomSource>(&self, rng: &mut R) -> ColorKind {
        rng.pick(&self.colors).copied().unwrap_or(ColorKind::Red)
    }

    /// Build a random shape for a canvas of the given dimensions.
    ///
    /// The kind is drawn first, then the position, the size, and the color. The order matters
    /// for seeded rounds.
    pub fn create_shape<R: RandomSource>(&self, rng: &mut R, width: i32, height: i32) -> Shape {
        let kind: ShapeKind = self.random_kind(rng);
        let x: i32 = rng.int_between(MARGIN, width - MARGIN);
        let y: i32 = rng.int_between(MARGIN, height - MARGIN);
        let size: i32 = rng.int_between(MIN_INITIAL_SIZE, MAX_INITIAL_SIZE);
        let color: ColorKind = self.random_color(rng);

        Shape {
            kind,
            x,
            y,
            size,
            color,
            is_modified: false,
            difference_slot: None,
        }
    }
}
