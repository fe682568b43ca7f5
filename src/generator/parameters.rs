/*
parameters.rs

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

//! Round settings and their resolution into round parameters.
//!
//! Player settings are never rejected: out-of-range or unparsable values are clamped or replaced
//! by defaults, so that a round can always start.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::shapes::{Catalog, ColorKind, ShapeKind};

/// Difficulty used when the custom value cannot be used.
pub const DEFAULT_DIFFICULTY: usize = 5;

/// Lowest difficulty.
pub const MIN_DIFFICULTY: usize = 1;

/// Highest difficulty.
pub const MAX_DIFFICULTY: usize = 50;

/// Default canvas width.
pub const DEFAULT_WIDTH: i32 = 600;

/// Default canvas height.
pub const DEFAULT_HEIGHT: i32 = 400;

/// Smallest custom canvas dimension.
pub const MIN_DIMENSION: i32 = 200;

/// Largest custom canvas dimension.
pub const MAX_DIMENSION: i32 = 2000;

/// Default round duration in seconds.
pub const DEFAULT_DURATION_SECS: u32 = 60;

/// Number of differences in daily challenges.
pub const DAILY_DIFFERENCES: usize = 10;

/// Game mode.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Round built from the player settings, with non-reproducible randomness.
    Normal,

    /// Daily challenge: fixed parameters and a seed derived from the date.
    Daily { seed: i64 },
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameMode::Normal => write!(f, "Normal"),
            GameMode::Daily { seed } => write!(f, "Daily challenge (seed {seed})"),
        }
    }
}

/// Difficulty setting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DifficultySetting {
    /// Predefined level.
    Level(i64),

    /// Free text typed by the player.
    Custom(String),
}

/// Predefined canvas sizes.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MapSizePreset {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl MapSizePreset {
    /// Return the canvas width and height.
    pub const fn dimensions(self) -> (i32, i32) {
        match self {
            MapSizePreset::Small => (400, 300),
            MapSizePreset::Medium => (600, 400),
            MapSizePreset::Large => (800, 600),
            MapSizePreset::Huge => (1000, 800),
        }
    }
}

/// Canvas size setting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MapSizeSetting {
    /// Predefined size.
    Preset(MapSizePreset),

    /// Free text typed by the player for each dimension.
    Custom { width: String, height: String },
}

/// Round duration setting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimerSetting {
    /// Predefined duration in seconds.
    Preset(i64),

    /// Free text typed by the player, such as `90`, `2m`, or `3 minutes`.
    Custom(String),
}

/// Player settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Difficulty: number of differences, and scale of the shape count.
    pub difficulty: DifficultySetting,

    /// Canvas size.
    pub map_size: MapSizeSetting,

    /// Round duration.
    pub timer: TimerSetting,

    /// Enabled shape kinds. Empty means all.
    pub shapes: Vec<ShapeKind>,

    /// Enabled colors. Empty means all.
    pub colors: Vec<ColorKind>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: DifficultySetting::Level(DEFAULT_DIFFICULTY as i64),
            map_size: MapSizeSetting::Preset(MapSizePreset::Medium),
            timer: TimerSetting::Preset(i64::from(DEFAULT_DURATION_SECS)),
            shapes: Vec::new(),
            colors: Vec::new(),
        }
    }
}

impl Settings {
    /// Return the catalog of the enabled kinds and colors.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(&self.shapes, &self.colors)
    }
}

/// Parameters of a round, after the settings have been resolved.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundParameters {
    /// Number of differences to inject.
    pub difference_count: usize,

    /// Canvas width.
    pub width: i32,

    /// Canvas height.
    pub height: i32,

    /// Round duration in seconds.
    pub duration_secs: u32,
}

/// Resolve the round parameters for the given mode.
///
/// The daily challenge ignores the player settings.
pub fn resolve(mode: &GameMode, settings: &Settings) -> RoundParameters {
    match mode {
        GameMode::Daily { .. } => RoundParameters {
            difference_count: DAILY_DIFFERENCES,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            duration_secs: DEFAULT_DURATION_SECS,
        },
        GameMode::Normal => {
            let (width, height) = resolve_map_size(&settings.map_size);
            RoundParameters {
                difference_count: resolve_difficulty(&settings.difficulty),
                width,
                height,
                duration_secs: resolve_timer(&settings.timer),
            }
        }
    }
}

/// Return the difficulty level.
///
/// Custom values that are not numbers, or are lower than 1, use the default difficulty.
pub fn resolve_difficulty(setting: &DifficultySetting) -> usize {
    let value: Option<i64> = match setting {
        DifficultySetting::Level(n) => Some(*n),
        DifficultySetting::Custom(text) => parse_leading_int(text),
    };
    match value {
        Some(n) if n >= MIN_DIFFICULTY as i64 => (n as usize).min(MAX_DIFFICULTY),
        _ => DEFAULT_DIFFICULTY,
    }
}

/// Return the canvas width and height.
pub fn resolve_map_size(setting: &MapSizeSetting) -> (i32, i32) {
    match setting {
        MapSizeSetting::Preset(preset) => preset.dimensions(),
        MapSizeSetting::Custom { width, height } => (
            resolve_dimension(width, DEFAULT_WIDTH),
            resolve_dimension(height, DEFAULT_HEIGHT),
        ),
    }
}

/// Return a custom canvas dimension, or `default` if the text is not a number or is too small.
fn resolve_dimension(text: &str, default: i32) -> i32 {
    match parse_leading_int(text) {
        Some(n) if n >= i64::from(MIN_DIMENSION) => n.min(i64::from(MAX_DIMENSION)) as i32,
        _ => default,
    }
}

/// Return the round duration in seconds.
pub fn resolve_timer(setting: &TimerSetting) -> u32 {
    match setting {
        TimerSetting::Preset(n) if *n > 0 => clamp_secs(*n),
        TimerSetting::Preset(_) => DEFAULT_DURATION_SECS,
        TimerSetting::Custom(text) => parse_timer_input(text),
    }
}

/// Parse a duration typed by the player.
///
/// Accepted inputs are a number of seconds (`90`) or a number of minutes followed by `m`, `min`,
/// `minute`, or `minutes` (`2 minutes`).
/// Empty or unparsable inputs give 60 seconds. The result is at least 1 second.
pub fn parse_timer_input(input: &str) -> u32 {
    let trimmed: String = input.trim().to_lowercase();
    if trimmed.is_empty() {
        return DEFAULT_DURATION_SECS;
    }

    let digits_end: usize = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end > 0 {
        let unit: &str = trimmed[digits_end..].trim_start();
        if matches!(unit, "m" | "min" | "minute" | "minutes") {
            let minutes: i64 = trimmed[..digits_end].parse().unwrap_or(i64::MAX);
            return clamp_secs(minutes.saturating_mul(60));
        }
    }

    match parse_leading_int(&trimmed) {
        Some(secs) => clamp_secs(secs),
        None => DEFAULT_DURATION_SECS,
    }
}

/// Clamp a number of seconds to the `[1, u32::MAX]` range.
fn clamp_secs(secs: i64) -> u32 {
    secs.clamp(1, i64::from(u32::MAX)) as u32
}

/// Parse the integer at the beginning of the text.
///
/// Leading whitespace and a sign are accepted, and everything after the digits is ignored, so
/// `" 12px"` gives 12. Return None when the text does not start with a number.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text: &str = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits_end: usize = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Values too large for i64 saturate, which is enough since every caller clamps.
    let value: i64 = rest[..digits_end].parse().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
