/*
cli_options.rs

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

//! Process command-line options.
//!
//! These options are intended for developers tuning the round generator.
//! Findit generates rounds and prints their parameters and differences, either as text or as
//! JSON.
//!
//! # Examples
//!
//! Generate the daily challenge of the day:
//!
//! ```
//! $ findit --daily
//! ```
//!
//! Generate 100 rounds with custom settings and print some statistics:
//!
//! ```
//! $ findit -c 100 --difficulty 25 --map-size small --shapes circle,star --summary
//! ```

use clap::Parser;
use log::{debug, warn};
use std::env;
use std::path::PathBuf;
use std::time::Instant;

use findit::generator::parameters::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, DifficultySetting, GameMode, MapSizePreset, MapSizeSetting,
    Settings, TimerSetting,
};
use findit::generator::random_source::{self, EntropyRandom, RandomSource, SeededRandom};
use findit::generator::shapes::{ColorKind, ShapeKind};
use findit::generator::{GeneratedRound, generate_round};
use findit::saver::settings::SaverSettings;

/// Generate Findit rounds for developers.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Generate the daily challenge
    #[arg(long, default_value_t = false)]
    daily: bool,

    /// Seed for reproducible rounds. With --daily, replaces the seed of the day
    #[arg(long)]
    seed: Option<i64>,

    /// Difficulty level, from 1 to 50, or free text as typed by a player
    #[arg(short = 'f', long)]
    difficulty: Option<String>,

    /// Predefined canvas size
    #[arg(value_enum, short, long)]
    map_size: Option<MapSizePreset>,

    /// Custom canvas width
    #[arg(long)]
    width: Option<String>,

    /// Custom canvas height
    #[arg(long)]
    height: Option<String>,

    /// Round duration, such as "90" or "2 minutes"
    #[arg(short, long)]
    timer: Option<String>,

    /// Enabled shape kinds
    #[arg(value_enum, long, value_delimiter = ',')]
    shapes: Vec<ShapeKind>,

    /// Enabled colors
    #[arg(value_enum, long, value_delimiter = ',')]
    colors: Vec<ColorKind>,

    /// Number of rounds to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print the rounds in JSON format
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print some statistics after generating the rounds
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Settings file to start from. Command-line options override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Statistics over the generated rounds.
#[derive(Default)]
struct Summary {
    rounds: usize,
    degraded: usize,
    attempts: usize,
    requested: usize,
    achieved: usize,
    total_time: f32,
    max_time: f32,
}

impl Summary {
    fn add(&mut self, round: &GeneratedRound, duration: f32) {
        self.rounds += 1;
        self.attempts += round.injection.attempts;
        self.requested += round.injection.requested;
        self.achieved += round.injection.achieved();
        if round.injection.is_degraded() {
            self.degraded += 1;
        }
        self.total_time += duration;
        if duration > self.max_time {
            self.max_time = duration;
        }
    }

    fn print(&self) {
        let rounds: usize = self.rounds.max(1);
        println!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
    average draws = {}
differences placed = {} of {}
   degraded rounds = {}",
            self.total_time,
            self.total_time / rounds as f32,
            self.max_time,
            self.attempts / rounds,
            self.achieved,
            self.requested,
            self.degraded
        );
    }
}

/// Build the settings from the settings file and the command-line options.
fn build_settings(args: &Args) -> Result<Settings, String> {
    let mut settings: Settings = match &args.config {
        Some(path) => match SaverSettings::from_file(path).get_settings() {
            Ok(Some(s)) => s,
            Ok(None) => {
                warn!("Settings file {path:?} does not exist, using the default settings");
                Settings::default()
            }
            Err(e) => return Err(format!("Cannot read settings file {path:?}: {e}")),
        },
        None => Settings::default(),
    };

    if let Some(difficulty) = &args.difficulty {
        settings.difficulty = match difficulty.trim().parse::<i64>() {
            Ok(n) => DifficultySetting::Level(n),
            Err(_) => DifficultySetting::Custom(difficulty.clone()),
        };
    }
    if let Some(preset) = args.map_size {
        settings.map_size = MapSizeSetting::Preset(preset);
    }
    if args.width.is_some() || args.height.is_some() {
        settings.map_size = MapSizeSetting::Custom {
            width: args.width.clone().unwrap_or(DEFAULT_WIDTH.to_string()),
            height: args.height.clone().unwrap_or(DEFAULT_HEIGHT.to_string()),
        };
    }
    if let Some(timer) = &args.timer {
        settings.timer = match timer.trim().parse::<i64>() {
            Ok(n) => TimerSetting::Preset(n),
            Err(_) => TimerSetting::Custom(timer.clone()),
        };
    }
    if !args.shapes.is_empty() {
        settings.shapes = args.shapes.clone();
    }
    if !args.colors.is_empty() {
        settings.colors = args.colors.clone();
    }
    Ok(settings)
}

/// Print a round in text format.
fn print_round(i: usize, round: &GeneratedRound) {
    let p = &round.parameters;
    println!("Round {}: {}", i + 1, round.mode);
    println!(
        "  {}x{}, {}s, {} shapes, {} of {} differences in {} draws",
        p.width,
        p.height,
        p.duration_secs,
        round.board.len(),
        round.injection.achieved(),
        round.injection.requested,
        round.injection.attempts
    );
    for (slot, (index, mutation)) in round
        .injection
        .accepted
        .iter()
        .zip(&round.injection.mutations)
        .enumerate()
    {
        let original = &round.board.original()[*index];
        let modified = &round.board.modified()[*index];
        let changed: Vec<String> = original
            .changed_attributes(modified)
            .iter()
            .map(|m| m.to_string())
            .collect();
        println!("  #{slot} shape {index}: {mutation} ({})", changed.join(", "));
    }
}

/// Generate and print the rounds.
fn run<R: RandomSource>(args: &Args, mode: &GameMode, settings: &Settings, rng: &mut R) -> u8 {
    let mut summary: Summary = Summary::default();
    let mut rounds: Vec<GeneratedRound> = Vec::with_capacity(args.count);

    for i in 0..args.count {
        debug!("Iteration {i}");
        let start: Instant = Instant::now();
        let round: GeneratedRound = generate_round(mode, settings, rng);
        summary.add(&round, start.elapsed().as_secs_f32());

        if round.injection.is_degraded() {
            warn!(
                "Round {}: only {} of {} differences placed",
                i + 1,
                round.injection.achieved(),
                round.injection.requested
            );
        }
        if args.json {
            rounds.push(round);
        } else {
            print_round(i, &round);
        }
    }

    if args.json {
        match serde_json::to_string_pretty(&rounds) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Cannot serialize the rounds: {e}");
                return 1;
            }
        }
    }

    if args.summary {
        summary.print();
    }
    0
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let settings: Settings = match build_settings(&args) {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("{msg}");
            return 1;
        }
    };

    if args.daily {
        let seed: i64 = args
            .seed
            .unwrap_or_else(|| random_source::daily_seed(random_source::today()));
        let mode: GameMode = GameMode::Daily { seed };
        return run(&args, &mode, &settings, &mut SeededRandom::new(seed));
    }

    match args.seed {
        Some(seed) => run(&args, &GameMode::Normal, &settings, &mut SeededRandom::new(seed)),
        None => run(&args, &GameMode::Normal, &settings, &mut EntropyRandom::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv: Vec<&str> = vec!["findit"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn options_override_settings() {
        let a = args(&[
            "--difficulty",
            "12",
            "--timer",
            "2 minutes",
            "--shapes",
            "circle,star",
            "--colors",
            "red",
        ]);
        let s = build_settings(&a).unwrap();
        assert_eq!(s.difficulty, DifficultySetting::Level(12));
        assert_eq!(s.timer, TimerSetting::Custom("2 minutes".to_string()));
        assert_eq!(s.shapes, vec![ShapeKind::Circle, ShapeKind::Star]);
        assert_eq!(s.colors, vec![ColorKind::Red]);
    }

    #[test]
    fn free_text_difficulty_and_numeric_timer() {
        let a = args(&["-f", "hard", "-t", "90", "--map-size", "huge"]);
        let s = build_settings(&a).unwrap();
        assert_eq!(s.difficulty, DifficultySetting::Custom("hard".to_string()));
        assert_eq!(s.timer, TimerSetting::Preset(90));
        assert_eq!(s.map_size, MapSizeSetting::Preset(MapSizePreset::Huge));
    }

    #[test]
    fn custom_dimension_fills_the_other() {
        let s = build_settings(&args(&["--width", "900"])).unwrap();
        assert_eq!(
            s.map_size,
            MapSizeSetting::Custom {
                width: "900".to_string(),
                height: "400".to_string()
            }
        );
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let a = args(&["--config", "/nonexistent/findit/settings.json"]);
        assert_eq!(build_settings(&a).unwrap(), Settings::default());
    }
}
