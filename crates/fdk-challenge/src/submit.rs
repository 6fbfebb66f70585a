//! Trade submission and replay.
//!
//! `submit` is the single computation behind a submitted day: P/L, balance,
//! peak, drawdown, evaluator outcome, next risk, and the resulting
//! [`DailyRecord`].  It never mutates its input — callers write the record
//! to durable storage first and apply the returned state only when that
//! write succeeds (all-or-nothing).

use std::fmt;

use crate::evaluate::evaluate;
use crate::money::Micros;
use crate::risk::next_risk;
use crate::types::{
    drawdown_from, week_for_day, ChallengeConfig, ChallengeState, ChallengeStatus, DailyRecord,
    DayInputs, Phase,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a submission was refused before any computation took place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The challenge already ended; `Pass` and `Fail` are absorbing.
    ChallengeClosed(ChallengeStatus),
    /// The phase-one target was reached and the advance has not been
    /// confirmed yet; no trading is accepted in between.
    AwaitingPhaseConfirmation,
    /// The day's trade list does not fill the configured trade slots.
    WrongTradeCount { expected: u32, got: usize },
    /// `confirm_phase_advance` called while no advance was pending.
    NoPendingAdvance(ChallengeStatus),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::ChallengeClosed(s) => {
                write!(f, "challenge is closed (status {})", s.as_str())
            }
            SubmitError::AwaitingPhaseConfirmation => {
                write!(f, "phase advance pending confirmation; no trading accepted")
            }
            SubmitError::WrongTradeCount { expected, got } => {
                write!(f, "expected {expected} trade amounts, got {got}")
            }
            SubmitError::NoPendingAdvance(s) => {
                write!(f, "no phase advance pending (status {})", s.as_str())
            }
        }
    }
}

impl std::error::Error for SubmitError {}

/// Why a record sequence could not be replayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayError {
    Submit(SubmitError),
    /// Records must arrive in day order with no gaps.
    DayOutOfOrder { expected: u32, got: u32 },
    /// A record's stored P/L disagrees with the sum of its trade amounts.
    PlMismatch { day_number: u32 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::Submit(e) => write!(f, "replay stopped: {e}"),
            ReplayError::DayOutOfOrder { expected, got } => {
                write!(f, "record out of order: expected day {expected}, got {got}")
            }
            ReplayError::PlMismatch { day_number } => {
                write!(f, "day {day_number}: stored P/L != sum of trade amounts")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

impl From<SubmitError> for ReplayError {
    fn from(e: SubmitError) -> Self {
        ReplayError::Submit(e)
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Result of one submitted day: the successor state plus the record to
/// append.  The caller's input state is untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub state: ChallengeState,
    pub record: DailyRecord,
}

/// Compute one day's submission.
///
/// Refused when the challenge is closed, a phase advance is pending, or the
/// trade list does not fill the configured slots.  Otherwise pure: same
/// inputs, same outputs.
pub fn submit(
    cfg: &ChallengeConfig,
    state: &ChallengeState,
    inputs: &DayInputs,
) -> Result<Submission, SubmitError> {
    match state.status {
        ChallengeStatus::Ongoing => {}
        ChallengeStatus::PendingPhaseAdvance => {
            return Err(SubmitError::AwaitingPhaseConfirmation)
        }
        closed => return Err(SubmitError::ChallengeClosed(closed)),
    }
    if inputs.trade_amounts.len() != cfg.trades_per_day as usize {
        return Err(SubmitError::WrongTradeCount {
            expected: cfg.trades_per_day,
            got: inputs.trade_amounts.len(),
        });
    }

    let daily_pl = inputs.daily_pl();
    let balance = state.balance.saturating_add(daily_pl);
    let peak_balance = state.peak_balance.max(balance);
    let drawdown = drawdown_from(cfg, peak_balance, balance);

    let decision = evaluate(daily_pl, balance, drawdown, state.phase, cfg);
    let current_risk = next_risk(daily_pl, state.current_risk, cfg);

    let record = DailyRecord {
        day_number: state.day_number,
        week_number: state.week_number,
        phase: state.phase,
        trade_amounts: inputs.trade_amounts.clone(),
        daily_pl,
        risk_used: state.current_risk,
        balance,
        peak_balance,
        drawdown,
        status: decision.status,
    };

    let day_number = state.day_number + 1;
    let new_state = ChallengeState {
        balance,
        peak_balance,
        current_risk,
        day_number,
        week_number: week_for_day(day_number),
        phase: decision.phase,
        status: decision.status,
    };

    Ok(Submission {
        state: new_state,
        record,
    })
}

/// Confirm a pending phase advance: `PendingPhaseAdvance` → phase two,
/// `Ongoing`.  The only exit from the pending state.
pub fn confirm_phase_advance(state: &ChallengeState) -> Result<ChallengeState, SubmitError> {
    if state.status != ChallengeStatus::PendingPhaseAdvance {
        return Err(SubmitError::NoPendingAdvance(state.status));
    }
    let mut next = state.clone();
    next.phase = Phase::Two;
    next.status = ChallengeStatus::Ongoing;
    Ok(next)
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Re-derive the challenge state by replaying records in day order.
///
/// Each record's trade amounts are re-submitted from a fresh state, which
/// both rebuilds the state and cross-checks the stored P/L invariant.
/// A pending phase advance is auto-confirmed when a later record shows the
/// day was actually traded, since the confirmation must have happened for
/// that record to exist.  Replaying the same ordered records always yields
/// the same final state.
pub fn replay(cfg: &ChallengeConfig, records: &[DailyRecord]) -> Result<ChallengeState, ReplayError> {
    let mut state = ChallengeState::new(cfg);

    for rec in records {
        if state.status == ChallengeStatus::PendingPhaseAdvance {
            state = confirm_phase_advance(&state)?;
        }
        if rec.day_number != state.day_number {
            return Err(ReplayError::DayOutOfOrder {
                expected: state.day_number,
                got: rec.day_number,
            });
        }
        let inputs = DayInputs::new(rec.trade_amounts.clone());
        if inputs.daily_pl() != rec.daily_pl {
            return Err(ReplayError::PlMismatch {
                day_number: rec.day_number,
            });
        }
        state = submit(cfg, &state, &inputs)?.state;
    }

    Ok(state)
}

// ---------------------------------------------------------------------------
// Input parsing
// ---------------------------------------------------------------------------

/// How a raw trade entry failed to parse (under the `Reject` policy).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadEntry {
    /// Zero-based trade slot.
    pub index: usize,
    pub raw: String,
}

impl fmt::Display for BadEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "trade {} is not a number: {:?}", self.index + 1, self.raw)
    }
}

impl std::error::Error for BadEntry {}

/// Parse raw trade entries under the configured input policy.
///
/// `Coerce` turns unparsable entries into zero (a slot with no trade);
/// `Reject` refuses the whole submission, naming the first bad entry.
/// An empty entry is "no trade taken" and is zero under either policy.
pub fn parse_trade_amounts(
    raw: &[String],
    policy: crate::types::InputPolicy,
) -> Result<Vec<Micros>, BadEntry> {
    let mut out = Vec::with_capacity(raw.len());
    for (index, entry) in raw.iter().enumerate() {
        if entry.trim().is_empty() {
            out.push(Micros::ZERO);
            continue;
        }
        match Micros::parse_str(entry) {
            Some(v) => out.push(v),
            None => match policy {
                crate::types::InputPolicy::Coerce => out.push(Micros::ZERO),
                crate::types::InputPolicy::Reject => {
                    return Err(BadEntry {
                        index,
                        raw: entry.clone(),
                    })
                }
            },
        }
    }
    Ok(out)
}
