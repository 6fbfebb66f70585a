//! Multiplicative risk adjustment.
//!
//! The per-trade risk for tomorrow is derived from today's net P/L:
//! scale up 20% after a winning day, cut 25% after a losing day, hold on
//! break-even.  The result is clamped to the configured floor/cap band and
//! then to the hard safety ceiling `daily_loss_limit / trades_per_day`.
//!
//! Pure deterministic integer arithmetic.  No IO, no floats.

use crate::money::Micros;
use crate::types::ChallengeConfig;

/// Scale applied after a winning day (percent).
const WIN_STEP_PCT: i64 = 120;

/// Scale applied after a losing day (percent).
const LOSS_STEP_PCT: i64 = 75;

/// Compute the per-trade risk for the next day.
///
/// Total over all inputs: every path clamps, so the output is always within
/// `[risk_floor, risk_cap]` before the final safety ceiling is applied.
/// The safety ceiling wins over the floor — a full-loss day across all
/// trade slots must never breach the daily loss limit on its own.
pub fn next_risk(daily_pl: Micros, current_risk: Micros, cfg: &ChallengeConfig) -> Micros {
    let stepped = if daily_pl.is_positive() {
        current_risk.mul_pct(WIN_STEP_PCT)
    } else if daily_pl.is_negative() {
        current_risk.mul_pct(LOSS_STEP_PCT)
    } else {
        current_risk
    };

    let banded = stepped.max(cfg.risk_floor).min(cfg.risk_cap);
    banded.min(cfg.max_safe_risk())
}
