/*
collision.rs

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

//! Overlap detection between shapes.
//!
//! Shapes are approximated by a square of side `2 * size` centered on the shape position,
//! whatever their kind.

use super::shapes::Shape;

/// Default padding added around both bounding boxes.
pub const DEFAULT_PADDING: f64 = 20.0;

/// Axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Return the bounding box of the given shape.
    pub fn of(shape: &Shape) -> Self {
        let half: f64 = f64::from(shape.size) * shape.kind.geometry().bounds_factor;
        Self {
            x: f64::from(shape.x) - half,
            y: f64::from(shape.y) - half,
            width: half * 2.0,
            height: half * 2.0,
        }
    }

    /// Return the box grown by `padding` on all sides.
    pub fn padded(&self, padding: f64) -> Self {
        Self {
            x: self.x - padding,
            y: self.y - padding,
            width: self.width + padding * 2.0,
            height: self.height + padding * 2.0,
        }
    }

    /// Whether the two boxes intersect. Touching edges count as an intersection.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.x + self.width < other.x
            || other.x + other.width < self.x
            || self.y + self.height < other.y
            || other.y + other.height < self.y)
    }
}

/// Whether the padded bounding boxes of the two shapes intersect.
pub fn overlaps(a: &Shape, b: &Shape, padding: f64) -> bool {
    Bounds::of(a)
        .padded(padding)
        .intersects(&Bounds::of(b).padded(padding))
}

/// Whether `shape` overlaps any shape of `shapes` listed in `candidates`.
///
/// `own_index` is skipped so that a shape is never compared with its previous state.
pub fn overlaps_any(
    shape: &Shape,
    shapes: &[Shape],
    candidates: &[usize],
    own_index: Option<usize>,
) -> bool {
    candidates
        .iter()
        .filter(|&&i| Some(i) != own_index)
        .filter_map(|&i| shapes.get(i))
        .any(|other| overlaps(shape, other, DEFAULT_PADDING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::shapes::{ColorKind, ShapeKind};

    fn shape(x: i32, y: i32, size: i32) -> Shape {
        Shape {
            kind: ShapeKind::Egg,
            x,
            y,
            size,
            color: ColorKind::Green,
            is_modified: false,
            difference_slot: None,
        }
    }

    #[test]
    fn bounds_are_twice_the_size() {
        let b = Bounds::of(&shape(100, 200, 30));
        assert_eq!(
            b,
            Bounds {
                x: 70.0,
                y: 170.0,
                width: 60.0,
                height: 60.0
            }
        );
    }

    #[test]
    fn padding_separates_close_shapes() {
        // Boxes [70, 130] and [160, 220]: 30 units apart, closed by 2 * 20 padding.
        let a = shape(100, 100, 30);
        let b = shape(190, 100, 30);
        assert!(!overlaps(&a, &b, 0.0));
        assert!(overlaps(&a, &b, DEFAULT_PADDING));
    }

    #[test]
    fn touching_boxes_overlap() {
        // Padded boxes [50, 150] and [150, 250].
        let a = shape(100, 100, 30);
        let b = shape(200, 100, 30);
        assert!(overlaps(&a, &b, DEFAULT_PADDING));
        let c = shape(201, 100, 30);
        assert!(!overlaps(&a, &c, DEFAULT_PADDING));
    }

    #[test]
    fn separation_on_one_axis_is_enough() {
        let a = shape(100, 100, 30);
        let b = shape(100, 400, 30);
        assert!(!overlaps(&a, &b, DEFAULT_PADDING));
    }

    #[test]
    fn overlaps_any_skips_own_index_and_unlisted_shapes() {
        let shapes = vec![shape(100, 100, 30), shape(110, 100, 30), shape(500, 500, 30)];
        let probe = shape(105, 100, 30);
        assert!(overlaps_any(&probe, &shapes, &[0, 2], None));
        assert!(!overlaps_any(&probe, &shapes, &[0, 2], Some(0)));
        assert!(!overlaps_any(&probe, &shapes, &[2], None));
        assert!(!overlaps_any(&probe, &shapes, &[], None));
    }
}
