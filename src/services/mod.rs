//! Business logic services.

pub mod auth;
pub mod match_stats;
pub mod match_store;
pub mod team_summary;
