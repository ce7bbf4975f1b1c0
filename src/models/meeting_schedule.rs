//! Meeting schedules attached to matching flows (optional table).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Schedule status as stored in `meeting_schedules.status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleStatus {
    Confirmed,
    Other(String),
}

impl ScheduleStatus {
    pub const CONFIRMED: &'static str = "confirmed";

    pub fn as_str(&self) -> &str {
        match self {
            Self::Confirmed => Self::CONFIRMED,
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for ScheduleStatus {
    fn from(s: &str) -> Self {
        if s == Self::CONFIRMED {
            Self::Confirmed
        } else {
            Self::Other(s.to_string())
        }
    }
}

/// Full meeting schedule row from database.
#[derive(Debug, Clone, FromRow)]
pub struct MeetingSchedule {
    pub id: Uuid,
    pub matching_flow_id: Uuid,
    pub status: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MeetingSchedule {
    pub fn schedule_status(&self) -> ScheduleStatus {
        ScheduleStatus::from(self.status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_confirmed_exactly() {
        assert_eq!(ScheduleStatus::from("confirmed"), ScheduleStatus::Confirmed);
        assert_eq!(
            ScheduleStatus::from("Confirmed"),
            ScheduleStatus::Other("Confirmed".to_string())
        );
        assert_eq!(ScheduleStatus::from("pending").as_str(), "pending");
    }
}
