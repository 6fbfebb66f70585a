use crate::money::Micros;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which reference balance the drawdown is measured against.
///
/// The two deployed variants of the product disagreed on this formula; it is
/// an explicit configuration choice here, never inferred or merged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawdownBasis {
    /// `drawdown = max(0, peak_balance − balance)` — trailing high-water mark.
    PeakBalance,
    /// `drawdown = max(0, starting_balance − balance)` — static floor.
    StartingBalance,
}

/// What to do with a trade entry that does not parse as a number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputPolicy {
    /// Treat the entry as zero (a day with no trade taken in that slot).
    Coerce,
    /// Refuse the submission, naming the offending entry.
    Reject,
}

/// Challenge configuration — immutable for the lifetime of one challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeConfig {
    /// Account balance the challenge starts from.
    pub starting_balance: Micros,
    /// Profit required above `starting_balance` to complete phase one.
    pub phase1_target: Micros,
    /// Additional profit required above the phase-one level to pass.
    pub phase2_target: Micros,
    /// A single day losing this much (or more) fails the challenge.
    pub daily_loss_limit: Micros,
    /// Drawdown reaching this fails the challenge.
    pub max_drawdown: Micros,
    /// Number of trade slots per submitted day.
    pub trades_per_day: u32,
    /// Reward multiple per winning trade, in percent (300 = 3R).
    pub reward_ratio_pct: i64,
    /// Per-trade risk on day one.
    pub initial_risk: Micros,
    /// Upper clamp for the adjusted risk.
    pub risk_cap: Micros,
    /// Lower clamp for the adjusted risk.
    pub risk_floor: Micros,
    /// Drawdown reference (see [`DrawdownBasis`]).
    pub drawdown_basis: DrawdownBasis,
    /// When set, reaching the phase-one target parks the challenge in
    /// [`ChallengeStatus::PendingPhaseAdvance`] until explicitly confirmed.
    pub phase_advance_confirmation: bool,
    /// Handling of non-numeric trade entries (see [`InputPolicy`]).
    pub input_policy: InputPolicy,
}

impl ChallengeConfig {
    /// The observed production defaults: a $6,000 account, 8% / 5% targets,
    /// 5% daily loss limit, 10% max drawdown.
    pub fn sane_defaults() -> Self {
        Self {
            starting_balance: Micros::from_dollars(6_000),
            phase1_target: Micros::from_dollars(480),
            phase2_target: Micros::from_dollars(300),
            daily_loss_limit: Micros::from_dollars(300),
            max_drawdown: Micros::from_dollars(600),
            trades_per_day: 2,
            reward_ratio_pct: 300,
            initial_risk: Micros::from_dollars(80),
            risk_cap: Micros::from_dollars(90),
            risk_floor: Micros::from_dollars(40),
            drawdown_basis: DrawdownBasis::PeakBalance,
            phase_advance_confirmation: false,
            input_policy: InputPolicy::Coerce,
        }
    }

    /// The hard ceiling on per-trade risk: a full-loss day across all trade
    /// slots must not be able to breach the daily loss limit on its own.
    pub fn max_safe_risk(&self) -> Micros {
        self.daily_loss_limit.div_count(self.trades_per_day.max(1) as i64)
    }

    /// Balance level that completes phase one.
    pub fn phase1_level(&self) -> Micros {
        self.starting_balance + self.phase1_target
    }

    /// Balance level that passes the challenge.
    pub fn pass_level(&self) -> Micros {
        self.starting_balance + self.phase1_target + self.phase2_target
    }
}

// ---------------------------------------------------------------------------
// Phase / status
// ---------------------------------------------------------------------------

/// Which profit milestone the challenge is currently working toward.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    One,
    Two,
}

impl Phase {
    pub fn as_u8(self) -> u8 {
        match self {
            Phase::One => 1,
            Phase::Two => 2,
        }
    }

    pub fn from_u8(n: u8) -> Option<Phase> {
        match n {
            1 => Some(Phase::One),
            2 => Some(Phase::Two),
            _ => None,
        }
    }
}

/// Top-level challenge state machine.
///
/// | From                 | To                                        |
/// |----------------------|-------------------------------------------|
/// | `Ongoing`            | `Ongoing`, `PendingPhaseAdvance`, `Pass`, `Fail` |
/// | `PendingPhaseAdvance`| `Ongoing` (explicit confirmation only)    |
/// | `Pass`               | — (absorbing)                             |
/// | `Fail`               | — (absorbing)                             |
///
/// Submissions are only accepted in `Ongoing`; `PendingPhaseAdvance` blocks
/// trading until the operator confirms the move to phase two.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChallengeStatus {
    Ongoing,
    PendingPhaseAdvance,
    Pass,
    Fail,
}

impl ChallengeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengeStatus::Ongoing => "Ongoing",
            ChallengeStatus::PendingPhaseAdvance => "PendingPhaseAdvance",
            ChallengeStatus::Pass => "Pass",
            ChallengeStatus::Fail => "Fail",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Ongoing" => Some(ChallengeStatus::Ongoing),
            "PendingPhaseAdvance" => Some(ChallengeStatus::PendingPhaseAdvance),
            "Pass" => Some(ChallengeStatus::Pass),
            "Fail" => Some(ChallengeStatus::Fail),
            _ => None,
        }
    }

    /// `true` once the challenge can never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ChallengeStatus::Pass | ChallengeStatus::Fail)
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Mutable challenge state, one instance per user.
///
/// Mutated only by applying a submission or confirming a phase advance;
/// derivable at any time by replaying the daily records in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeState {
    pub balance: Micros,
    /// High-water mark — monotonic non-decreasing.
    pub peak_balance: Micros,
    /// Per-trade risk for the next trading day.
    pub current_risk: Micros,
    /// Next day to be submitted, starting at 1.
    pub day_number: u32,
    /// `ceil(day_number / 5)` over a five-trading-day week.
    pub week_number: u32,
    pub phase: Phase,
    pub status: ChallengeStatus,
}

impl ChallengeState {
    /// Fresh state at challenge start.
    pub fn new(cfg: &ChallengeConfig) -> Self {
        Self {
            balance: cfg.starting_balance,
            peak_balance: cfg.starting_balance,
            current_risk: cfg.initial_risk,
            day_number: 1,
            week_number: 1,
            phase: Phase::One,
            status: ChallengeStatus::Ongoing,
        }
    }

    /// Current drawdown under the configured basis.
    pub fn drawdown(&self, cfg: &ChallengeConfig) -> Micros {
        drawdown_from(cfg, self.peak_balance, self.balance)
    }
}

/// `max(0, reference − balance)` with the reference picked by the basis.
pub fn drawdown_from(cfg: &ChallengeConfig, peak_balance: Micros, balance: Micros) -> Micros {
    let reference = match cfg.drawdown_basis {
        DrawdownBasis::PeakBalance => peak_balance,
        DrawdownBasis::StartingBalance => cfg.starting_balance,
    };
    reference.saturating_sub(balance).max(Micros::ZERO)
}

/// Week containing `day_number`, counting five trading days per week.
pub fn week_for_day(day_number: u32) -> u32 {
    day_number.max(1).div_ceil(5)
}

/// 1-based day-of-week slot within the five-day trading week.
pub fn day_of_week_slot(day_number: u32) -> u32 {
    (day_number.max(1) - 1) % 5 + 1
}

/// Trading-day name for a 1-based week slot.
pub fn day_of_week_name(slot: u32) -> &'static str {
    match slot {
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        _ => "Friday",
    }
}

// ---------------------------------------------------------------------------
// Inputs / records
// ---------------------------------------------------------------------------

/// One day of trade results: ordered signed amounts, one per trade slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayInputs {
    pub trade_amounts: Vec<Micros>,
}

impl DayInputs {
    pub fn new(trade_amounts: Vec<Micros>) -> Self {
        Self { trade_amounts }
    }

    /// Expand win/loss counts into per-trade amounts: each win pays the
    /// configured reward multiple of the risk, each loss costs the risk.
    ///
    /// Returns `None` when the counts do not fill the day's trade slots or
    /// an amount overflows.
    pub fn from_wins_losses(
        cfg: &ChallengeConfig,
        current_risk: Micros,
        wins: u32,
        losses: u32,
    ) -> Option<Self> {
        if wins + losses != cfg.trades_per_day {
            return None;
        }
        let win_amount = current_risk.mul_pct(cfg.reward_ratio_pct);
        let mut trade_amounts = Vec::with_capacity(cfg.trades_per_day as usize);
        for _ in 0..wins {
            trade_amounts.push(win_amount);
        }
        for _ in 0..losses {
            trade_amounts.push(-current_risk);
        }
        Some(Self { trade_amounts })
    }

    /// Net P/L for the day: the sum of its trade amounts.
    pub fn daily_pl(&self) -> Micros {
        self.trade_amounts
            .iter()
            .fold(Micros::ZERO, |acc, a| acc.saturating_add(*a))
    }
}

/// Append-only record of one submitted day.
///
/// `phase` and `risk_used` describe the day as it was traded; balance, peak,
/// drawdown, and status are the post-submission values.  Immutable once
/// created; the challenge state is derivable by replaying records in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyRecord {
    pub day_number: u32,
    pub week_number: u32,
    pub phase: Phase,
    pub trade_amounts: Vec<Micros>,
    /// Sum of `trade_amounts` (invariant, checked at replay).
    pub daily_pl: Micros,
    pub risk_used: Micros,
    pub balance: Micros,
    pub peak_balance: Micros,
    pub drawdown: Micros,
    pub status: ChallengeStatus,
}
