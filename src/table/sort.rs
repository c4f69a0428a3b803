//! Sort state for the matchup table.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{PlayerMatchupRow, Stat};

/// A sortable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    GamesPlayed,
    Stat(Stat),
}

impl SortColumn {
    /// Sortable columns in header order.
    pub const ALL: [SortColumn; 7] = [
        SortColumn::GamesPlayed,
        SortColumn::Stat(Stat::Points),
        SortColumn::Stat(Stat::Rebounds),
        SortColumn::Stat(Stat::Assists),
        SortColumn::Stat(Stat::ThreesMade),
        SortColumn::Stat(Stat::Steals),
        SortColumn::Stat(Stat::Blocks),
    ];

    pub fn code(&self) -> &'static str {
        match self {
            SortColumn::GamesPlayed => "games_played",
            SortColumn::Stat(stat) => stat.code(),
        }
    }

    fn compare(&self, a: &PlayerMatchupRow, b: &PlayerMatchupRow) -> Ordering {
        match self {
            SortColumn::GamesPlayed => a.games_played.cmp(&b.games_played),
            SortColumn::Stat(stat) => a.stat(*stat).value.total_cmp(&b.stat(*stat).value),
        }
    }
}

impl Default for SortColumn {
    fn default() -> Self {
        SortColumn::Stat(Stat::Points)
    }
}

impl std::fmt::Display for SortColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("games_played") {
            return Ok(SortColumn::GamesPlayed);
        }
        s.parse::<Stat>()
            .map(SortColumn::Stat)
            .map_err(|_| format!("unknown sort column: {}", s))
    }
}

impl Serialize for SortColumn {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for SortColumn {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn code(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    pub fn reversed(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(format!("unknown sort direction: {}", s)),
        }
    }
}

/// Active sort column and direction. Defaults to PTS ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// State after a click on `column`'s header: the active column flips
    /// direction, any other column starts ascending.
    pub fn select(self, column: SortColumn) -> Self {
        if self.column == column {
            Self::new(column, self.direction.reversed())
        } else {
            Self::new(column, SortDirection::Ascending)
        }
    }

    /// Direction shown on `column`'s header arrow.
    pub fn direction_for(&self, column: SortColumn) -> Option<SortDirection> {
        (self.column == column).then_some(self.direction)
    }

    pub fn compare(&self, a: &PlayerMatchupRow, b: &PlayerMatchupRow) -> Ordering {
        let ord = self.column.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Rows ordered by `state`. The input is left untouched.
pub fn sort_rows<'a>(rows: &'a [PlayerMatchupRow], state: &SortState) -> Vec<&'a PlayerMatchupRow> {
    let mut sorted: Vec<&PlayerMatchupRow> = rows.iter().collect();
    sorted.sort_unstable_by(|a, b| state.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatLine;

    fn pts_row(player: &str, pts: f64) -> PlayerMatchupRow {
        PlayerMatchupRow::new(player, "BOS", 1, None).with_stat(Stat::Points, StatLine::new(pts, 1))
    }

    fn pts_order(rows: &[&PlayerMatchupRow]) -> Vec<f64> {
        rows.iter().map(|r| r.stat(Stat::Points).value).collect()
    }

    #[test]
    fn test_default_is_pts_ascending() {
        let state = SortState::default();
        assert_eq!(state.column, SortColumn::Stat(Stat::Points));
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_select_active_column_toggles() {
        let pts = SortColumn::Stat(Stat::Points);
        let state = SortState::default().select(pts);
        assert_eq!(state.direction, SortDirection::Descending);

        let state = state.select(pts);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_select_new_column_starts_ascending() {
        let state = SortState::new(SortColumn::Stat(Stat::Points), SortDirection::Descending)
            .select(SortColumn::GamesPlayed);

        assert_eq!(state.column, SortColumn::GamesPlayed);
        assert_eq!(state.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_sort_pts_ascending() {
        let rows = vec![pts_row("a", 3.0), pts_row("b", -1.0), pts_row("c", 5.0)];
        let sorted = sort_rows(&rows, &SortState::default());
        assert_eq!(pts_order(&sorted), vec![-1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_sort_pts_descending() {
        let rows = vec![pts_row("a", 3.0), pts_row("b", -1.0), pts_row("c", 5.0)];
        let state = SortState::new(SortColumn::Stat(Stat::Points), SortDirection::Descending);
        let sorted = sort_rows(&rows, &state);
        assert_eq!(pts_order(&sorted), vec![5.0, 3.0, -1.0]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let rows = vec![pts_row("a", 3.0), pts_row("b", -1.0)];
        let _ = sort_rows(&rows, &SortState::default());
        assert_eq!(rows[0].player, "a");
    }

    #[test]
    fn test_sort_by_games_played() {
        let rows = vec![
            PlayerMatchupRow::new("a", "BOS", 9, None),
            PlayerMatchupRow::new("b", "BOS", 2, None),
            PlayerMatchupRow::new("c", "BOS", 30, None),
        ];
        let state = SortState::new(SortColumn::GamesPlayed, SortDirection::Ascending);
        let players: Vec<&str> = sort_rows(&rows, &state).iter().map(|r| r.player.as_str()).collect();
        assert_eq!(players, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_column_parsing() {
        assert_eq!("games_played".parse::<SortColumn>().unwrap(), SortColumn::GamesPlayed);
        assert_eq!("3PM".parse::<SortColumn>().unwrap(), SortColumn::Stat(Stat::ThreesMade));
        assert!("player".parse::<SortColumn>().is_err());
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn test_sort_state_serialization() {
        let state = SortState::new(SortColumn::Stat(Stat::ThreesMade), SortDirection::Descending);
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(json, serde_json::json!({"column": "3PM", "direction": "desc"}));
    }
}
