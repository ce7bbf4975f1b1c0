//! Match statistics for the matches screen: confirmed, decided and success rate.

use serde::{Deserialize, Serialize};

use crate::db::FeatureAvailability;
use crate::errors::AppError;
use crate::models::matching_flow::FlowStatus;
use crate::models::user::UserId;
use crate::services::match_store::MatchStore;

/// Statistics returned by `GET /api/matches/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStats {
    pub confirmed_count: u64,
    pub decided_count: u64,
    pub success_rate: u8,
}

impl MatchStats {
    pub const EMPTY: Self = Self {
        confirmed_count: 0,
        decided_count: 0,
        success_rate: 0,
    };
}

/// Compute statistics for `user`.
///
/// The three counts are independent reads and run concurrently. The decided
/// count depends on the optional `meeting_schedules` table and degrades to
/// zero when that table is absent or its query fails.
pub async fn get_stats(
    store: &dyn MatchStore,
    features: FeatureAvailability,
    user: UserId,
) -> Result<MatchStats, AppError> {
    let (confirmed, cancelled, decided) = tokio::try_join!(
        store.count_flows(user, Some(FlowStatus::Confirmed)),
        store.count_flows(user, Some(FlowStatus::Cancelled)),
        fetch_decided_or_zero(store, features, user),
    )?;

    let confirmed = count_to_u64(confirmed, "confirmed")?;
    let cancelled = count_to_u64(cancelled, "cancelled")?;
    let decided = count_to_u64(decided, "decided")?;

    Ok(MatchStats {
        confirmed_count: confirmed,
        decided_count: decided,
        success_rate: success_rate(decided, confirmed, cancelled),
    })
}

async fn fetch_decided_or_zero(
    store: &dyn MatchStore,
    features: FeatureAvailability,
    user: UserId,
) -> Result<i64, AppError> {
    if !features.meeting_schedules {
        return Ok(0);
    }

    match store.count_decided(user).await {
        Ok(count) => Ok(count),
        Err(e) => {
            tracing::warn!(
                user_id = %user,
                table = "meeting_schedules",
                error = %e,
                "Decided count unavailable; using 0"
            );
            Ok(0)
        }
    }
}

/// Convert a database count to `u64`; a negative count means corrupt data.
pub fn count_to_u64(raw: i64, label: &str) -> Result<u64, AppError> {
    u64::try_from(raw).map_err(|_| AppError::Internal(format!("negative {label} count: {raw}")))
}

/// Percentage of effective confirmed flows (confirmed minus cancelled) that
/// reached a confirmed meeting, rounded half-up and clamped to `0..=100`.
pub fn success_rate(decided: u64, confirmed: u64, cancelled: u64) -> u8 {
    let effective = confirmed.saturating_sub(cancelled);
    if effective == 0 {
        return 0;
    }

    let effective = u128::from(effective);
    let rate = (u128::from(decided) * 100 + effective / 2) / effective;
    rate.min(100) as u8
}
