//! Team routes.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::services::team_summary::{self, TeamSummary};
use crate::AppState;

/// GET /api/teams/summary — the caller's teams and flow totals.
pub async fn summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<TeamSummary>, AppError> {
    let summary = team_summary::get_summary(state.store.as_ref(), user.id).await?;
    Ok(Json(summary))
}
