use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Closed set of NFL team identities. Equality is by variant; display
/// strings stay with the raw source text on each game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamId {
    Washington,
    Philadelphia,
    Dallas,
    NyGiants,
    Detroit,
    GreenBay,
    Chicago,
    Minnesota,
    NewOrleans,
    TampaBay,
    Atlanta,
    Carolina,
    SanFrancisco,
    Arizona,
    LosAngeles,
    Seattle,
    NewEngland,
    NyJets,
    Buffalo,
    Miami,
    Cincinnati,
    Baltimore,
    Cleveland,
    Pittsburgh,
    Houston,
    Jacksonville,
    Tennessee,
    Indianapolis,
    Oakland,
    SanDiego,
    Denver,
    KansasCity,
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Season win-loss-tie record for one team. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Record { wins, losses, ties }
    }

    /// Standings points: a win is two, a tie is one (half a win).
    pub fn points(&self) -> i64 {
        2 * self.wins as i64 + self.ties as i64
    }

    /// Games played so far this season.
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

/// Season records for every team that appears in the week's slate.
pub type RecordsMap = HashMap<TeamId, Record>;

/// One game on the week's slate, names already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub favorite: TeamId,
    pub underdog: TeamId,
    /// Must be one of `favorite` / `underdog`.
    pub home_team: TeamId,
    /// Favorite's handicap, stored signed and non-positive
    /// (`-7` = favorite gives seven points).
    pub spread: Decimal,
    /// Over/under total; zero when the book has not posted one.
    pub total_points: Decimal,
    /// Original display strings, kept for console output.
    pub raw_favorite: String,
    pub raw_underdog: String,
}

impl Game {
    pub fn favorite_is_home(&self) -> bool {
        self.home_team == self.favorite
    }
}

/// A game with its pool-scoring weight, position 0 = most confident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPick {
    pub game: Game,
    pub confidence: u32,
}

/// One game as delivered by a lines source, names still free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGame {
    pub favorite_text: String,
    pub underdog_text: String,
    pub spread: Decimal,
    pub total_points: Decimal,
    pub home_is_favorite: bool,
}

/// One team's standings row as delivered by a records source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub team_text: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}
