//! Player matchup rows parsed from the daily slate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A tracked box-score statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stat {
    #[serde(rename = "PTS")]
    Points,
    #[serde(rename = "REB")]
    Rebounds,
    #[serde(rename = "AST")]
    Assists,
    #[serde(rename = "3PM")]
    ThreesMade,
    #[serde(rename = "STL")]
    Steals,
    #[serde(rename = "BLK")]
    Blocks,
}

impl Stat {
    /// All stats in table order.
    pub const ALL: [Stat; 6] = [
        Stat::Points,
        Stat::Rebounds,
        Stat::Assists,
        Stat::ThreesMade,
        Stat::Steals,
        Stat::Blocks,
    ];

    /// Column code used in the slate header and in query strings.
    pub fn code(&self) -> &'static str {
        match self {
            Stat::Points => "PTS",
            Stat::Rebounds => "REB",
            Stat::Assists => "AST",
            Stat::ThreesMade => "3PM",
            Stat::Steals => "STL",
            Stat::Blocks => "BLK",
        }
    }

    /// Header tooltip text.
    pub fn description(&self) -> &'static str {
        match self {
            Stat::Points => "Points per game above season average",
            Stat::Rebounds => "Rebounds per game above season average",
            Stat::Assists => "Assists per game above season average",
            Stat::ThreesMade => "Three-pointers made per game above season average",
            Stat::Steals => "Steals per game above season average",
            Stat::Blocks => "Blocks per game above season average",
        }
    }

    fn index(&self) -> usize {
        match self {
            Stat::Points => 0,
            Stat::Rebounds => 1,
            Stat::Assists => 2,
            Stat::ThreesMade => 3,
            Stat::Steals => 4,
            Stat::Blocks => 5,
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .into_iter()
            .find(|stat| stat.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown stat: {}", s))
    }
}

/// A matchup delta paired with the opponent's defence rank for that stat.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatLine {
    /// Average vs. this opponent minus season average.
    pub value: f64,
    /// Opponent defence rank, 1 (best) to 30. Zero when the slate had no rank.
    pub rank: u32,
}

impl StatLine {
    pub fn new(value: f64, rank: u32) -> Self {
        Self { value, rank }
    }
}

/// One player's history against tonight's opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerMatchupRow {
    pub player: String,
    pub opposing_team: String,
    pub games_played: u32,
    pub injury_note: Option<String>,
    stats: [StatLine; 6],
}

impl PlayerMatchupRow {
    pub fn new(
        player: impl Into<String>,
        opposing_team: impl Into<String>,
        games_played: u32,
        injury_note: Option<String>,
    ) -> Self {
        Self {
            player: player.into(),
            opposing_team: opposing_team.into(),
            games_played,
            injury_note: injury_note.filter(|note| !note.is_empty()),
            stats: [StatLine::default(); 6],
        }
    }

    /// Builder-style setter used by the slate loader and tests.
    pub fn with_stat(mut self, stat: Stat, line: StatLine) -> Self {
        self.stats[stat.index()] = line;
        self
    }

    pub fn stat(&self, stat: Stat) -> StatLine {
        self.stats[stat.index()]
    }

    /// (stat, line) pairs in table order.
    pub fn stat_lines(&self) -> impl Iterator<Item = (Stat, StatLine)> + '_ {
        Stat::ALL.into_iter().map(|stat| (stat, self.stat(stat)))
    }

    pub fn is_injured(&self) -> bool {
        self.injury_note.is_some()
    }
}
