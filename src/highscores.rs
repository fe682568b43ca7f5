/*
highscores.rs

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

//! Manage player statistics and the daily challenge scoreboards.
//!
//! The main object, [`HighScores`], maintains the statistics of each player and, for each day, the
//! list of daily challenge scores.
//! This object is saved when the player wins a round, and is restored when Findit starts.
//! See the [`crate::saver::highscores`] module that saves and restores the [`HighScores`] object.

use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::generator::random_source::date_key;
use crate::score::FinalScore;

/// Current format version of the saved document.
pub const SAVE_VERSION: u32 = 2;

/// Player that always exists.
pub const GUEST: &str = "Guest";

/// Statistics of a player.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerStats {
    /// Sum of the scores of all the won rounds.
    pub total_score: u64,

    /// Best round score.
    pub highest_score: u32,

    /// Number of won rounds.
    pub games_played: u32,

    /// Most seconds left at the end of a won round.
    pub best_time_remaining: u32,

    /// Sum of the find bonuses, without the combo part.
    pub total_difference_bonuses: u64,
}

impl PlayerStats {
    /// Add the score of a won round.
    fn add(&mut self, score: &FinalScore) {
        self.total_score += u64::from(score.total);
        self.games_played += 1;
        self.total_difference_bonuses += u64::from(score.difference_bonuses);
        self.highest_score = self.highest_score.max(score.total);
        self.best_time_remaining = self.best_time_remaining.max(score.time_remaining);
    }
}

/// Entry of a daily challenge scoreboard.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DailyScore {
    pub player: String,
    pub score: u32,
}

/// Player statistics and daily scoreboards.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HighScores {
    /// Format version. Documents from before the version field are read with version 0.
    #[serde(default)]
    pub version: u32,

    /// Statistics indexed by player name.
    #[serde(default)]
    players: HashMap<String, PlayerStats>,

    /// Daily challenge scores indexed by date, in the "YYYY-MM-DD" format.
    #[serde(default)]
    daily_scores: HashMap<String, Vec<DailyScore>>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// Create a [`HighScores`] object.
    pub fn new() -> Self {
        let mut players: HashMap<String, PlayerStats> = HashMap::new();
        players.insert(GUEST.to_string(), PlayerStats::default());
        Self {
            version: SAVE_VERSION,
            players,
            daily_scores: HashMap::new(),
        }
    }

    /// Bring a restored document to the current format.
    ///
    /// Missing fields are already filled with their defaults during deserialization.
    /// Return whether the document was changed.
    pub fn migrate(&mut self) -> bool {
        if self.version >= SAVE_VERSION {
            return false;
        }
        debug!("Migrating high scores from version {}", self.version);
        self.players.entry(GUEST.to_string()).or_default();
        self.version = SAVE_VERSION;
        true
    }

    /// Record a won round for the given player.
    ///
    /// For a daily challenge round, pass the date of the challenge so that the score is also
    /// added to the scoreboard of that day.
    pub fn record_win(&mut self, player: &str, score: &FinalScore, daily_date: Option<NaiveDate>) {
        self.players.entry(player.to_string()).or_default().add(score);

        if let Some(date) = daily_date {
            self.daily_scores
                .entry(date_key(date))
                .or_default()
                .push(DailyScore {
                    player: player.to_string(),
                    score: score.total,
                });
        }
    }

    /// Return the statistics of a player.
    pub fn player(&self, name: &str) -> Option<&PlayerStats> {
        self.players.get(name)
    }

    /// Return the players sorted by highest score.
    pub fn ranking(&self) -> Vec<(&str, &PlayerStats)> {
        let mut ranking: Vec<(&str, &PlayerStats)> = self
            .players
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
            .collect();
        ranking.sort_by(|a, b| {
            b.1.highest_score
                .cmp(&a.1.highest_score)
                .then_with(|| a.0.cmp(b.0))
        });
        ranking
    }

    /// Return the scores of the daily challenge for the given day, best first.
    pub fn daily_scores(&self, date: NaiveDate) -> Vec<DailyScore> {
        let mut scores: Vec<DailyScore> = match self.daily_scores.get(&date_key(date)) {
            Some(s) => s.clone(),
            None => return Vec::new(),
        };
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
    }

    /// Return whether no round has been won yet.
    pub fn is_empty(&self) -> bool {
        self.players.values().all(|p| p.games_played == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(total_finds: u32, remaining: u32) -> FinalScore {
        FinalScore::new(total_finds, 0, remaining)
    }

    #[test]
    fn record_win_updates_stats() {
        let mut hs = HighScores::new();
        assert!(hs.is_empty());

        hs.record_win("alice", &score(50, 20), None);
        hs.record_win("alice", &score(30, 40), None);

        let alice = hs.player("alice").unwrap();
        assert_eq!(alice.games_played, 2);
        assert_eq!(alice.total_score, 110 + 150);
        assert_eq!(alice.highest_score, 150);
        assert_eq!(alice.best_time_remaining, 40);
        assert_eq!(alice.total_difference_bonuses, 80);
        assert!(!hs.is_empty());
    }

    #[test]
    fn ranking_by_highest_score_then_name() {
        let mut hs = HighScores::new();
        hs.record_win("bob", &score(10, 0), None);
        hs.record_win("alice", &score(10, 0), None);
        hs.record_win("carol", &score(90, 0), None);

        let names: Vec<&str> = hs.ranking().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["carol", "alice", "bob", GUEST]);
    }

    #[test]
    fn daily_scores_per_date() {
        let mut hs = HighScores::new();
        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let other = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        hs.record_win("alice", &score(10, 0), Some(day));
        hs.record_win("bob", &score(30, 0), Some(day));
        hs.record_win("bob", &score(20, 0), None);

        let scores = hs.daily_scores(day);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].player, "bob");
        assert_eq!(scores[0].score, 30);
        assert_eq!(scores[1].player, "alice");
        assert!(hs.daily_scores(other).is_empty());
    }

    #[test]
    fn unversioned_document_is_migrated() {
        let json = r#"{"players": {"alice": {"total_score": 12}}}"#;
        let mut hs: HighScores = serde_json::from_str(json).unwrap();
        assert_eq!(hs.version, 0);
        assert!(hs.migrate());
        assert_eq!(hs.version, SAVE_VERSION);

        let alice = hs.player("alice").unwrap();
        assert_eq!(alice.total_score, 12);
        assert_eq!(alice.games_played, 0);
        assert!(hs.player(GUEST).is_some());
        assert!(!hs.migrate());
    }
}
