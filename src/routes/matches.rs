//! Match routes: statistics for the matches screen.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::middleware::auth::CurrentUser;
use crate::services::match_stats::{self, MatchStats};
use crate::AppState;

/// GET /api/matches/stats — confirmed, decided and success rate for the caller.
pub async fn stats(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MatchStats>, AppError> {
    let stats = match_stats::get_stats(state.store.as_ref(), state.features, user.id).await?;
    tracing::debug!(user_id = %user.id, ?stats, "Computed match stats");
    Ok(Json(stats))
}
