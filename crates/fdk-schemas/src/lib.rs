//! fdk-schemas
//!
//! Serialized shapes crossing process boundaries: history rows, state
//! snapshots, profile entries.  Monetary fields carry raw micros `i64`s
//! (field names say so) so no floating point enters any wire or storage
//! format; conversion to/from the core types lives here and nowhere else.

use chrono::{DateTime, Utc};
use fdk_challenge::{
    ChallengeState, ChallengeStatus, DailyRecord, Micros, Phase,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Decode errors
// ---------------------------------------------------------------------------

/// A stored row or snapshot failed to map back onto the core types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    BadStatus(String),
    BadPhase(i16),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::BadStatus(s) => write!(f, "unknown challenge status: {s:?}"),
            DecodeError::BadPhase(n) => write!(f, "phase out of range: {n}"),
        }
    }
}

impl std::error::Error for DecodeError {}

fn decode_status(s: &str) -> Result<ChallengeStatus, DecodeError> {
    ChallengeStatus::parse(s).ok_or_else(|| DecodeError::BadStatus(s.to_string()))
}

fn decode_phase(n: i16) -> Result<Phase, DecodeError> {
    u8::try_from(n)
        .ok()
        .and_then(Phase::from_u8)
        .ok_or(DecodeError::BadPhase(n))
}

// ---------------------------------------------------------------------------
// History rows
// ---------------------------------------------------------------------------

/// One `trading_history` row: a submitted day as stored remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: Uuid,
    pub created_at_utc: DateTime<Utc>,
    pub user_name: String,
    pub phase: i16,
    pub day_number: i32,
    pub week_number: i32,
    pub trade_amounts_micros: Vec<i64>,
    pub daily_pl_micros: i64,
    pub risk_used_micros: i64,
    pub balance_micros: i64,
    pub peak_balance_micros: i64,
    pub drawdown_micros: i64,
    /// "Ongoing" | "PendingPhaseAdvance" | "Pass" | "Fail"
    pub status: String,
}

impl HistoryRow {
    /// Wrap a freshly computed record for storage.
    pub fn from_record(user_name: &str, record: &DailyRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at_utc: Utc::now(),
            user_name: user_name.to_string(),
            phase: record.phase.as_u8() as i16,
            day_number: record.day_number as i32,
            week_number: record.week_number as i32,
            trade_amounts_micros: record.trade_amounts.iter().map(|m| m.raw()).collect(),
            daily_pl_micros: record.daily_pl.raw(),
            risk_used_micros: record.risk_used.raw(),
            balance_micros: record.balance.raw(),
            peak_balance_micros: record.peak_balance.raw(),
            drawdown_micros: record.drawdown.raw(),
            status: record.status.as_str().to_string(),
        }
    }

    /// Map a stored row back onto the core record type.
    pub fn to_record(&self) -> Result<DailyRecord, DecodeError> {
        Ok(DailyRecord {
            day_number: self.day_number as u32,
            week_number: self.week_number as u32,
            phase: decode_phase(self.phase)?,
            trade_amounts: self
                .trade_amounts_micros
                .iter()
                .map(|raw| Micros::new(*raw))
                .collect(),
            daily_pl: Micros::new(self.daily_pl_micros),
            risk_used: Micros::new(self.risk_used_micros),
            balance: Micros::new(self.balance_micros),
            peak_balance: Micros::new(self.peak_balance_micros),
            drawdown: Micros::new(self.drawdown_micros),
            status: decode_status(&self.status)?,
        })
    }
}

/// One `daily_trades` row: a single day inside a week grid, upserted on
/// `(user_name, week_number, day_of_week)` so a day can be edited and
/// resubmitted without duplicate rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTradeRow {
    pub user_name: String,
    pub week_number: i32,
    /// "Monday" … "Friday"
    pub day_of_week: String,
    pub trade_amounts_micros: Vec<i64>,
    pub daily_pl_micros: i64,
    pub updated_at_utc: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// State snapshot
// ---------------------------------------------------------------------------

/// Persisted form of [`ChallengeState`] (local store and status APIs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub balance_micros: i64,
    pub peak_balance_micros: i64,
    pub current_risk_micros: i64,
    pub day_number: u32,
    pub week_number: u32,
    pub phase: i16,
    pub status: String,
}

impl StateSnapshot {
    pub fn from_state(state: &ChallengeState) -> Self {
        Self {
            balance_micros: state.balance.raw(),
            peak_balance_micros: state.peak_balance.raw(),
            current_risk_micros: state.current_risk.raw(),
            day_number: state.day_number,
            week_number: state.week_number,
            phase: state.phase.as_u8() as i16,
            status: state.status.as_str().to_string(),
        }
    }

    pub fn to_state(&self) -> Result<ChallengeState, DecodeError> {
        Ok(ChallengeState {
            balance: Micros::new(self.balance_micros),
            peak_balance: Micros::new(self.peak_balance_micros),
            current_risk: Micros::new(self.current_risk_micros),
            day_number: self.day_number,
            week_number: self.week_number,
            phase: decode_phase(self.phase)?,
            status: decode_status(&self.status)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// A named user profile; selection of one is required before any state is
/// loaded or mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    pub name: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use fdk_challenge::{ChallengeConfig, DayInputs};

    fn sample_record() -> DailyRecord {
        let cfg = ChallengeConfig::sane_defaults();
        let state = ChallengeState::new(&cfg);
        let inputs = DayInputs::new(vec![
            Micros::from_dollars(240),
            Micros::from_dollars(-80),
        ]);
        fdk_challenge::submit(&cfg, &state, &inputs).unwrap().record
    }

    #[test]
    fn history_row_roundtrips_record() {
        let record = sample_record();
        let row = HistoryRow::from_record("nico", &record);
        assert_eq!(row.user_name, "nico");
        assert_eq!(row.to_record().unwrap(), record);
    }

    #[test]
    fn state_snapshot_roundtrips_state() {
        let cfg = ChallengeConfig::sane_defaults();
        let state = ChallengeState::new(&cfg);
        let snap = StateSnapshot::from_state(&state);
        assert_eq!(snap.to_state().unwrap(), state);
    }

    #[test]
    fn unknown_status_is_a_decode_error() {
        let mut snap = StateSnapshot::from_state(&ChallengeState::new(
            &ChallengeConfig::sane_defaults(),
        ));
        snap.status = "Paused".to_string();
        assert_eq!(
            snap.to_state().unwrap_err(),
            DecodeError::BadStatus("Paused".to_string())
        );
    }

    #[test]
    fn out_of_range_phase_is_a_decode_error() {
        let mut snap = StateSnapshot::from_state(&ChallengeState::new(
            &ChallengeConfig::sane_defaults(),
        ));
        snap.phase = 3;
        assert_eq!(snap.to_state().unwrap_err(), DecodeError::BadPhase(3));
    }
}
