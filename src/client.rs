//! Consumer of the stats endpoint, with the locally derived fallback used when
//! the endpoint cannot be reached.
//!
//! The fallback rate is established matches over all flows, which differs from
//! the server's decided over (confirmed minus cancelled). Both are kept as-is.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};

use crate::services::match_stats::MatchStats;
use crate::services::team_summary::FlowTotals;

/// Errors from talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// Thin HTTP client for the matches screen.
#[derive(Debug, Clone)]
pub struct StatsClient {
    http: Client,
    base_url: String,
}

impl StatsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// GET /api/matches/stats
    pub async fn fetch_stats(&self, token: &str) -> Result<MatchStats, ClientError> {
        self.get_json("/api/matches/stats", token).await
    }

    /// GET /api/teams/summary, totals only.
    pub async fn fetch_flow_totals(&self, token: &str) -> Result<FlowTotals, ClientError> {
        self.get_json("/api/teams/summary", token).await
    }

    /// Fetch stats, or derive them locally when the endpoint fails.
    ///
    /// `totals` comes from a previously fetched team summary and
    /// `confirmed_meetings` is the number of confirmed meetings held locally.
    pub async fn stats_or_fallback(
        &self,
        token: &str,
        totals: FlowTotals,
        confirmed_meetings: u64,
    ) -> MatchStats {
        match self.fetch_stats(token).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "Stats endpoint failed; using local estimate");
                fallback_stats(totals, confirmed_meetings)
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{path}", self.base_url))
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ClientError::Status(resp.status()));
        }
        Ok(resp.json().await?)
    }
}

/// Stats estimated from the team summary when the server is unavailable.
pub fn fallback_stats(totals: FlowTotals, confirmed_meetings: u64) -> MatchStats {
    MatchStats {
        confirmed_count: totals.established_matches,
        decided_count: confirmed_meetings,
        success_rate: fallback_rate(totals),
    }
}

fn fallback_rate(totals: FlowTotals) -> u8 {
    if totals.total_match_flows == 0 {
        return 0;
    }
    let total = u128::from(totals.total_match_flows);
    let rate = (u128::from(totals.established_matches) * 100 + total / 2) / total;
    rate.min(100) as u8
}
