//! Read-side storage for matching flows, scoped to a user's active teams.
//!
//! `PgMatchStore` is the production backend. `InMemoryMatchStore` holds the
//! same rows in memory and is used by tests and local runs without Postgres.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::matching_flow::{FlowStatus, MatchingFlow};
use crate::models::meeting_schedule::{MeetingSchedule, ScheduleStatus};
use crate::models::team::{MemberTeam, Team, TeamMembership};
use crate::models::user::UserId;

/// Queries backing the match statistics and team summary endpoints.
///
/// Every count is over distinct flows where the user is an active member of
/// the `from` or `to` team.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Count flows, optionally restricted to one status.
    async fn count_flows(&self, user: UserId, status: Option<FlowStatus>) -> Result<i64, AppError>;

    /// Count confirmed flows that have a confirmed meeting schedule.
    async fn count_decided(&self, user: UserId) -> Result<i64, AppError>;

    /// Teams the user belongs to, active membership first.
    async fn member_teams(&self, user: UserId) -> Result<Vec<MemberTeam>, AppError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Postgres-backed [`MatchStore`].
#[derive(Debug, Clone)]
pub struct PgMatchStore {
    pool: PgPool,
}

impl PgMatchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for PgMatchStore {
    async fn count_flows(&self, user: UserId, status: Option<FlowStatus>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT f.id)
            FROM team_matching_flows f
            INNER JOIN team_members tm
                ON tm.team_id = f.from_team_id OR tm.team_id = f.to_team_id
            WHERE tm.user_id = $1
              AND tm.is_active = true
              AND ($2::int IS NULL OR f.status = $2)
            "#,
        )
        .bind(user)
        .bind(status.map(FlowStatus::code))
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_decided(&self, user: UserId) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT f.id)
            FROM team_matching_flows f
            INNER JOIN team_members tm
                ON tm.team_id = f.from_team_id OR tm.team_id = f.to_team_id
            INNER JOIN meeting_schedules ms
                ON ms.matching_flow_id = f.id
            WHERE tm.user_id = $1
              AND tm.is_active = true
              AND f.status = $2
              AND ms.status = $3
            "#,
        )
        .bind(user)
        .bind(FlowStatus::CONFIRMED_CODE)
        .bind(ScheduleStatus::CONFIRMED)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn member_teams(&self, user: UserId) -> Result<Vec<MemberTeam>, AppError> {
        let teams = sqlx::query_as::<_, MemberTeam>(
            r#"
            SELECT t.id, t.name, tm.is_active
            FROM teams t
            INNER JOIN team_members tm ON tm.team_id = t.id
            WHERE tm.user_id = $1
            ORDER BY tm.is_active DESC, tm.joined_at DESC
            "#,
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Tables {
    teams: Vec<Team>,
    members: Vec<TeamMembership>,
    flows: Vec<MatchingFlow>,
    schedules: Vec<MeetingSchedule>,
}

impl Tables {
    fn active_team_ids(&self, user: UserId) -> HashSet<Uuid> {
        self.members
            .iter()
            .filter(|m| m.user_id == user && m.is_active)
            .map(|m| m.team_id)
            .collect()
    }

    fn visible_flows(&self, user: UserId) -> impl Iterator<Item = &MatchingFlow> {
        let teams = self.active_team_ids(user);
        self.flows
            .iter()
            .filter(move |f| teams.contains(&f.from_team_id) || teams.contains(&f.to_team_id))
    }
}

/// In-memory [`MatchStore`] with switches to simulate a missing schedule table
/// or an unreachable database.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    tables: RwLock<Tables>,
    schedules_unavailable: bool,
    unreachable: bool,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `meeting_schedules` query fail.
    pub fn without_schedules(mut self) -> Self {
        self.schedules_unavailable = true;
        self
    }

    /// Make every query fail.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub async fn add_team(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.write().await.teams.push(Team {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        });
        id
    }

    pub async fn add_member(&self, team_id: Uuid, user_id: UserId, is_active: bool) {
        self.tables.write().await.members.push(TeamMembership {
            team_id,
            user_id,
            is_active,
            joined_at: Utc::now(),
        });
    }

    pub async fn add_flow(&self, from_team_id: Uuid, to_team_id: Uuid, status: FlowStatus) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.tables.write().await.flows.push(MatchingFlow {
            id,
            from_team_id,
            to_team_id,
            status: status.code(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub async fn add_schedule(&self, matching_flow_id: Uuid, status: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.write().await.schedules.push(MeetingSchedule {
            id,
            matching_flow_id,
            status: status.to_string(),
            scheduled_at: None,
            location: None,
            created_at: Utc::now(),
        });
        id
    }

    fn check_reachable(&self) -> Result<(), AppError> {
        if self.unreachable {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl MatchStore for InMemoryMatchStore {
    async fn count_flows(&self, user: UserId, status: Option<FlowStatus>) -> Result<i64, AppError> {
        self.check_reachable()?;
        let tables = self.tables.read().await;
        let count = tables
            .visible_flows(user)
            .filter(|f| status.map_or(true, |s| f.status == s.code()))
            .count();
        Ok(count as i64)
    }

    async fn count_decided(&self, user: UserId) -> Result<i64, AppError> {
        self.check_reachable()?;
        if self.schedules_unavailable {
            return Err(AppError::Internal(
                "relation \"meeting_schedules\" does not exist".to_string(),
            ));
        }
        let tables = self.tables.read().await;
        let count = tables
            .visible_flows(user)
            .filter(|f| f.flow_status() == FlowStatus::Confirmed)
            .filter(|f| {
                tables.schedules.iter().any(|s| {
                    s.matching_flow_id == f.id && s.schedule_status() == ScheduleStatus::Confirmed
                })
            })
            .count();
        Ok(count as i64)
    }

    async fn member_teams(&self, user: UserId) -> Result<Vec<MemberTeam>, AppError> {
        self.check_reachable()?;
        let tables = self.tables.read().await;
        let mut memberships: Vec<&TeamMembership> =
            tables.members.iter().filter(|m| m.user_id == user).collect();
        memberships.sort_by(|a, b| {
            b.is_active
                .cmp(&a.is_active)
                .then(b.joined_at.cmp(&a.joined_at))
        });

        let teams = memberships
            .into_iter()
            .filter_map(|m| {
                tables.teams.iter().find(|t| t.id == m.team_id).map(|t| MemberTeam {
                    id: t.id,
                    name: t.name.clone(),
                    is_active: m.is_active,
                })
            })
            .collect();
        Ok(teams)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check_reachable()
    }
}
