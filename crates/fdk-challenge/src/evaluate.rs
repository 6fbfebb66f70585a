//! Violation / progress evaluator.
//!
//! Given a day's net P/L and the post-submission balance and drawdown,
//! decide whether the challenge failed, advanced a phase, or passed.
//! Checks run in strict priority order — failure rules before progress
//! rules — so a day that simultaneously breaches a limit and reaches a
//! target always fails.
//!
//! Pure deterministic logic.  No IO, no clock.

use crate::money::Micros;
use crate::types::{ChallengeConfig, ChallengeStatus, Phase};

/// Why the evaluator decided what it decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReasonCode {
    /// No rule fired; the challenge continues unchanged.
    NoChange,
    /// The day's loss reached the daily loss limit.
    DailyLossLimitBreached,
    /// Drawdown reached the configured maximum.
    MaxDrawdownBreached,
    /// Phase-one profit target reached.
    Phase1TargetReached,
    /// Phase-two profit target reached; challenge complete.
    ChallengePassed,
}

/// Evaluator output: the resulting status and phase, plus the rule that fired.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EvalDecision {
    pub status: ChallengeStatus,
    pub phase: Phase,
    pub reason: ReasonCode,
}

/// Evaluate pass/fail/progress rules for one submitted day.
///
/// Priority order (first match wins):
/// 1. `daily_pl <= -daily_loss_limit`  → Fail
/// 2. `drawdown >= max_drawdown`       → Fail
/// 3. phase one, balance ≥ phase-one level → phase two (or a pending
///    advance when the confirmation gate is configured)
/// 4. phase two, balance ≥ pass level  → Pass
/// 5. otherwise                        → Ongoing, phase unchanged
pub fn evaluate(
    daily_pl: Micros,
    balance: Micros,
    drawdown: Micros,
    phase: Phase,
    cfg: &ChallengeConfig,
) -> EvalDecision {
    // 1) Daily loss limit — a breach fails regardless of where the balance
    //    landed, so this runs before any progress rule.
    if daily_pl <= -cfg.daily_loss_limit {
        return EvalDecision {
            status: ChallengeStatus::Fail,
            phase,
            reason: ReasonCode::DailyLossLimitBreached,
        };
    }

    // 2) Max drawdown.
    if drawdown >= cfg.max_drawdown {
        return EvalDecision {
            status: ChallengeStatus::Fail,
            phase,
            reason: ReasonCode::MaxDrawdownBreached,
        };
    }

    // 3) Phase-one target.
    if phase == Phase::One && balance >= cfg.phase1_level() {
        let status = if cfg.phase_advance_confirmation {
            // Park until the operator confirms; phase stays One so the
            // pending state is visible as "target hit, not yet advanced".
            ChallengeStatus::PendingPhaseAdvance
        } else {
            ChallengeStatus::Ongoing
        };
        let phase = if cfg.phase_advance_confirmation {
            Phase::One
        } else {
            Phase::Two
        };
        return EvalDecision {
            status,
            phase,
            reason: ReasonCode::Phase1TargetReached,
        };
    }

    // 4) Pass level.
    if phase == Phase::Two && balance >= cfg.pass_level() {
        return EvalDecision {
            status: ChallengeStatus::Pass,
            phase,
            reason: ReasonCode::ChallengePassed,
        };
    }

    // 5) Nothing fired.
    EvalDecision {
        status: ChallengeStatus::Ongoing,
        phase,
        reason: ReasonCode::NoChange,
    }
}
