//! Matching flows: the relationship between two teams after a like.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a matching flow, stored as an integer code.
///
/// Only `3` (confirmed) and `4` (cancelled) carry fixed meaning; every other
/// code is an in-progress stage (chatting, scheduling, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    InProgress(i32),
    Confirmed,
    Cancelled,
}

impl FlowStatus {
    pub const CONFIRMED_CODE: i32 = 3;
    pub const CANCELLED_CODE: i32 = 4;

    pub fn code(self) -> i32 {
        match self {
            Self::Confirmed => Self::CONFIRMED_CODE,
            Self::Cancelled => Self::CANCELLED_CODE,
            Self::InProgress(code) => code,
        }
    }
}

impl From<i32> for FlowStatus {
    fn from(code: i32) -> Self {
        match code {
            Self::CONFIRMED_CODE => Self::Confirmed,
            Self::CANCELLED_CODE => Self::Cancelled,
            other => Self::InProgress(other),
        }
    }
}

/// Full matching flow row from database.
#[derive(Debug, Clone, FromRow)]
pub struct MatchingFlow {
    pub id: Uuid,
    pub from_team_id: Uuid,
    pub to_team_id: Uuid,
    pub status: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MatchingFlow {
    pub fn flow_status(&self) -> FlowStatus {
        FlowStatus::from(self.status)
    }

    /// Whether `team_id` participates on either side.
    pub fn involves(&self, team_id: Uuid) -> bool {
        self.from_team_id == team_id || self.to_team_id == team_id
    }
}
