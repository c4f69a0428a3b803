use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{PlayerMatchupRow, Stat};
use crate::slate::load_slate;
use crate::table::{render_matchup_page, sort_rows, Shade, SortColumn, SortDirection, SortState};

/// `?sort=<column>&dir=asc|desc`. Missing values fall back to the default
/// state.
#[derive(Debug, Default, Deserialize)]
pub struct SortParams {
    pub sort: Option<String>,
    pub dir: Option<String>,
}

impl SortParams {
    pub fn into_state(self) -> Result<SortState, ApiError> {
        let column = match self.sort.as_deref() {
            Some(s) => s.parse::<SortColumn>().map_err(ApiError::BadRequest)?,
            None => SortColumn::default(),
        };
        let direction = match self.dir.as_deref() {
            Some(s) => s.parse::<SortDirection>().map_err(ApiError::BadRequest)?,
            None => SortDirection::default(),
        };
        Ok(SortState::new(column, direction))
    }
}

#[derive(Debug, Serialize)]
pub struct StatCell {
    pub value: f64,
    pub rank: u32,
    pub shade: Shade,
}

#[derive(Debug, Serialize)]
pub struct MatchupRowView {
    pub player: String,
    pub opposing_team: String,
    pub games_played: u32,
    pub injury_note: Option<String>,
    /// Keyed by stat code (`PTS`, `REB`, ...).
    pub stats: BTreeMap<Stat, StatCell>,
}

impl From<&PlayerMatchupRow> for MatchupRowView {
    fn from(row: &PlayerMatchupRow) -> Self {
        Self {
            player: row.player.clone(),
            opposing_team: row.opposing_team.clone(),
            games_played: row.games_played,
            injury_note: row.injury_note.clone(),
            stats: row
                .stat_lines()
                .map(|(stat, line)| {
                    let cell = StatCell {
                        value: line.value,
                        rank: line.rank,
                        shade: Shade::for_value(line.value),
                    };
                    (stat, cell)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchupsResponse {
    pub sort: SortState,
    pub total_rows: usize,
    pub rows: Vec<MatchupRowView>,
}

async fn load_rows(state: &AppState) -> Result<Vec<PlayerMatchupRow>, ApiError> {
    let path = state.slate.slate_path();
    load_slate(&path).await.map_err(|e| {
        if e.is_not_found() {
            ApiError::NotFound(format!("slate {}", path.display()))
        } else {
            error!("Failed to load slate: {}", e);
            ApiError::Internal(e.to_string())
        }
    })
}

/// Sorted, shaded slate as JSON.
pub async fn list_matchups(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<MatchupsResponse>, ApiError> {
    let sort = params.into_state()?;
    let rows = load_rows(&state).await?;

    let views: Vec<MatchupRowView> = sort_rows(&rows, &sort)
        .into_iter()
        .map(MatchupRowView::from)
        .collect();

    Ok(Json(MatchupsResponse {
        sort,
        total_rows: views.len(),
        rows: views,
    }))
}

/// The matchup table page.
pub async fn matchup_page(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Html<String>, ApiError> {
    let sort = params.into_state()?;
    let rows = load_rows(&state).await?;
    Ok(Html(render_matchup_page(&rows, &sort)))
}
