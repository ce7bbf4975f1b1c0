//! Teams and the membership rows linking users to them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::user::UserId;

/// Full team row from database.
#[derive(Debug, Clone, FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Membership row; a user may belong to many teams but only active rows grant access.
#[derive(Debug, Clone, FromRow)]
pub struct TeamMembership {
    pub team_id: Uuid,
    pub user_id: UserId,
    pub is_active: bool,
    pub joined_at: DateTime<Utc>,
}

/// A team as seen by one of its members.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeam {
    pub id: Uuid,
    pub name: String,
    pub is_active: bool,
}
