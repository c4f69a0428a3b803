//! Daily slate loading.
//!
//! The slate is a CSV file produced offline with one row per player and a
//! header naming each column. Numeric fields are coerced leniently: a field
//! that does not start with a number becomes zero instead of failing the load.

use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{PlayerMatchupRow, Stat, StatLine};

/// Errors that can occur while loading a slate.
#[derive(Debug, Error)]
pub enum SlateError {
    #[error("failed to read slate {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SlateError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SlateError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Column positions resolved from the slate header.
#[derive(Debug, Default)]
struct SlateColumns {
    player: Option<usize>,
    opposing_team: Option<usize>,
    games_played: Option<usize>,
    injury_note: Option<usize>,
    values: [Option<usize>; 6],
    ranks: [Option<usize>; 6],
}

impl SlateColumns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let mut columns = Self {
            player: find("player"),
            opposing_team: find("opposing_team"),
            games_played: find("games_played"),
            injury_note: find("injury_note"),
            ..Self::default()
        };
        for (i, stat) in Stat::ALL.into_iter().enumerate() {
            columns.values[i] = find(stat.code());
            columns.ranks[i] = find(&format!("{}_rank", stat.code()));
        }
        columns
    }

    fn row(&self, record: &csv::StringRecord) -> PlayerMatchupRow {
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        let mut row = PlayerMatchupRow::new(
            field(self.player),
            field(self.opposing_team),
            lenient_u32(field(self.games_played)),
            Some(field(self.injury_note).to_string()),
        );
        for (i, stat) in Stat::ALL.into_iter().enumerate() {
            let line = StatLine::new(
                lenient_f64(field(self.values[i])),
                lenient_u32(field(self.ranks[i])),
            );
            row = row.with_stat(stat, line);
        }
        row
    }
}

/// Read and parse the slate file at `path`.
pub async fn load_slate(path: &Path) -> Result<Vec<PlayerMatchupRow>, SlateError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| SlateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_slate(bytes.as_slice())?;
    debug!("Loaded {} slate rows from {:?}", rows.len(), path);
    Ok(rows)
}

/// Parse slate CSV from any reader. Blank lines are skipped and short rows
/// are padded with empty fields.
pub fn parse_slate<R: Read>(rdr: R) -> Result<Vec<PlayerMatchupRow>, SlateError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let columns = SlateColumns::from_headers(reader.headers()?);

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => rows.push(columns.row(&record)),
            Err(e) => warn!("skipping undecodable slate row: {}", e),
        }
    }
    Ok(rows)
}

/// Longest numeric prefix after leading whitespace, if it has any digits.
fn leading_number(s: &str, fractional: bool) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let scan_digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = scan_digits(end);
    let mut digits = int_end - end;
    end = int_end;

    if fractional {
        if bytes.get(end) == Some(&b'.') {
            let frac_end = scan_digits(end + 1);
            let frac_digits = frac_end - (end + 1);
            if digits + frac_digits > 0 {
                digits += frac_digits;
                end = frac_end;
            }
        }
        if digits > 0 && matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp_start = end + 1;
            if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
                exp_start += 1;
            }
            let exp_end = scan_digits(exp_start);
            if exp_end > exp_start {
                end = exp_end;
            }
        }
    }

    (digits > 0).then(|| &s[..end])
}

/// Lenient float coercion: numeric prefix or 0.
pub fn lenient_f64(s: &str) -> f64 {
    let value = leading_number(s, true)
        .and_then(|n| n.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    // Fold -0.0 into 0.0.
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Lenient unsigned integer coercion: integer prefix or 0. Negative values
/// and values that overflow become 0.
pub fn lenient_u32(s: &str) -> u32 {
    leading_number(s, false)
        .and_then(|n| n.parse::<i64>().ok())
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}
