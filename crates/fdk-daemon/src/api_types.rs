//! Request and response types for all fdk-daemon HTTP endpoints.
//!
//! These types are `Serialize + Deserialize` so they can be JSON-encoded by
//! Axum and decoded by tests.  No business logic lives here.

use fdk_schemas::{HistoryRow, ProfileEntry, StateSnapshot};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// /v1/health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub version: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// /v1/users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub profiles: Vec<ProfileEntry>,
}

// ---------------------------------------------------------------------------
// /v1/status
// ---------------------------------------------------------------------------

/// Query selector shared by the per-user GET endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct UserQuery {
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub user: String,
    pub state: StateSnapshot,
    pub drawdown_micros: i64,
    /// Profit still required to finish the current phase.
    pub remaining_target_micros: i64,
    /// Hard ceiling on per-trade risk under the current config.
    pub max_safe_risk_micros: i64,
}

// ---------------------------------------------------------------------------
// /v1/history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub user: String,
    pub days: Vec<HistoryRow>,
}

// ---------------------------------------------------------------------------
// /v1/week
// ---------------------------------------------------------------------------

use fdk_schemas::DailyTradeRow;

#[derive(Debug, Clone, Deserialize)]
pub struct WeekQuery {
    pub user: String,
    /// Defaults to the session's current week.
    #[serde(default)]
    pub week: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekResponse {
    pub user: String,
    pub week_number: u32,
    pub days: Vec<DailyTradeRow>,
    /// Sum of the listed days' P/L.
    pub weekly_pl_micros: i64,
}

// ---------------------------------------------------------------------------
// /v1/challenge/submit
// ---------------------------------------------------------------------------

/// A day's results: either raw per-trade entries (parsed under the
/// configured input policy) or win/loss counts at the current risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub user: String,
    #[serde(default)]
    pub amounts: Option<Vec<String>>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub user: String,
    pub day_number: u32,
    pub daily_pl_micros: i64,
    /// Resulting status: "Ongoing" | "PendingPhaseAdvance" | "Pass" | "Fail"
    pub status: String,
    pub state: StateSnapshot,
}

// ---------------------------------------------------------------------------
// /v1/challenge/confirm-advance  /v1/challenge/reset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub user: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetRequest {
    pub user: String,
    /// Must be `true`; resets drop the user's entire history.
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    pub user: String,
    pub state: StateSnapshot,
}
