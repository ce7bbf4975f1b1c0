//! Team-data summary: the user's teams and overall flow totals.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::matching_flow::FlowStatus;
use crate::models::team::MemberTeam;
use crate::models::user::UserId;
use crate::services::match_stats::count_to_u64;
use crate::services::match_store::MatchStore;

/// Response of `GET /api/teams/summary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub teams: Vec<MemberTeam>,
    #[serde(flatten)]
    pub totals: FlowTotals,
}

/// Flow totals used by the client-side stats fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTotals {
    pub established_matches: u64,
    pub total_match_flows: u64,
}

pub async fn get_summary(store: &dyn MatchStore, user: UserId) -> Result<TeamSummary, AppError> {
    let (teams, established, total) = tokio::try_join!(
        store.member_teams(user),
        store.count_flows(user, Some(FlowStatus::Confirmed)),
        store.count_flows(user, None),
    )?;

    Ok(TeamSummary {
        teams,
        totals: FlowTotals {
            established_matches: count_to_u64(established, "established")?,
            total_match_flows: count_to_u64(total, "total")?,
        },
    })
}
