//! Database models and DTOs for teams, matching flows and meeting schedules.

pub mod matching_flow;
pub mod meeting_schedule;
pub mod team;
pub mod user;
