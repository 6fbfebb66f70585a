//! Typed challenge configuration: decode from merged JSON, validate
//! invariants, convert to the core type.
//!
//! Config files use whole-dollar integers; conversion to micros happens
//! here, at the single decode point.  Every observed deployment used
//! whole-dollar thresholds, so no fractional form is accepted.

use anyhow::{bail, Context, Result};
use fdk_challenge::{ChallengeConfig, DrawdownBasis, InputPolicy, Micros};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serialized challenge configuration (the `challenge` section of the
/// layered config).  Missing fields take the observed production defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChallengeConfigDto {
    #[serde(default = "d_starting_balance")]
    pub starting_balance: i64,
    #[serde(default = "d_phase1_target")]
    pub phase1_target: i64,
    #[serde(default = "d_phase2_target")]
    pub phase2_target: i64,
    #[serde(default = "d_daily_loss_limit")]
    pub daily_loss_limit: i64,
    #[serde(default = "d_max_drawdown")]
    pub max_drawdown: i64,
    #[serde(default = "d_trades_per_day")]
    pub trades_per_day: u32,
    /// Reward multiple per winning trade, percent form (300 = 3R).
    #[serde(default = "d_reward_ratio_pct")]
    pub reward_ratio_pct: i64,
    #[serde(default = "d_initial_risk")]
    pub initial_risk: i64,
    #[serde(default = "d_risk_cap")]
    pub risk_cap: i64,
    #[serde(default = "d_risk_floor")]
    pub risk_floor: i64,
    /// "peak_balance" (default) or "starting_balance".
    #[serde(default = "d_drawdown_basis")]
    pub drawdown_basis: String,
    #[serde(default)]
    pub phase_advance_confirmation: bool,
    /// "coerce" (default) or "reject".
    #[serde(default = "d_input_policy")]
    pub input_policy: String,
}

fn d_starting_balance() -> i64 {
    6_000
}
fn d_phase1_target() -> i64 {
    480
}
fn d_phase2_target() -> i64 {
    300
}
fn d_daily_loss_limit() -> i64 {
    300
}
fn d_max_drawdown() -> i64 {
    600
}
fn d_trades_per_day() -> u32 {
    2
}
fn d_reward_ratio_pct() -> i64 {
    300
}
fn d_initial_risk() -> i64 {
    80
}
fn d_risk_cap() -> i64 {
    90
}
fn d_risk_floor() -> i64 {
    40
}
fn d_drawdown_basis() -> String {
    "peak_balance".to_string()
}
fn d_input_policy() -> String {
    "coerce".to_string()
}

impl Default for ChallengeConfigDto {
    fn default() -> Self {
        Self {
            starting_balance: d_starting_balance(),
            phase1_target: d_phase1_target(),
            phase2_target: d_phase2_target(),
            daily_loss_limit: d_daily_loss_limit(),
            max_drawdown: d_max_drawdown(),
            trades_per_day: d_trades_per_day(),
            reward_ratio_pct: d_reward_ratio_pct(),
            initial_risk: d_initial_risk(),
            risk_cap: d_risk_cap(),
            risk_floor: d_risk_floor(),
            drawdown_basis: d_drawdown_basis(),
            phase_advance_confirmation: false,
            input_policy: d_input_policy(),
        }
    }
}

impl ChallengeConfigDto {
    /// Validate invariants and convert to the core config.
    pub fn into_config(self) -> Result<ChallengeConfig> {
        if self.starting_balance <= 0 {
            bail!("CONFIG_INVALID: starting_balance must be > 0");
        }
        if self.phase1_target <= 0 || self.phase2_target <= 0 {
            bail!("CONFIG_INVALID: phase targets must be > 0");
        }
        if self.daily_loss_limit <= 0 {
            bail!("CONFIG_INVALID: daily_loss_limit must be > 0");
        }
        if self.max_drawdown <= 0 {
            bail!("CONFIG_INVALID: max_drawdown must be > 0");
        }
        if self.trades_per_day < 1 {
            bail!("CONFIG_INVALID: trades_per_day must be >= 1");
        }
        if self.reward_ratio_pct <= 0 {
            bail!("CONFIG_INVALID: reward_ratio_pct must be > 0");
        }
        if self.risk_floor > self.risk_cap {
            bail!(
                "CONFIG_INVALID: risk_floor ({}) must be <= risk_cap ({})",
                self.risk_floor,
                self.risk_cap
            );
        }
        if self.initial_risk < self.risk_floor || self.initial_risk > self.risk_cap {
            bail!(
                "CONFIG_INVALID: initial_risk ({}) must lie within [{}, {}]",
                self.initial_risk,
                self.risk_floor,
                self.risk_cap
            );
        }

        let drawdown_basis = match self.drawdown_basis.as_str() {
            "peak_balance" => DrawdownBasis::PeakBalance,
            "starting_balance" => DrawdownBasis::StartingBalance,
            other => bail!(
                "CONFIG_INVALID: drawdown_basis must be \"peak_balance\" or \
                \"starting_balance\", got {other:?}"
            ),
        };
        let input_policy = match self.input_policy.as_str() {
            "coerce" => InputPolicy::Coerce,
            "reject" => InputPolicy::Reject,
            other => bail!(
                "CONFIG_INVALID: input_policy must be \"coerce\" or \"reject\", got {other:?}"
            ),
        };

        Ok(ChallengeConfig {
            starting_balance: Micros::from_dollars(self.starting_balance),
            phase1_target: Micros::from_dollars(self.phase1_target),
            phase2_target: Micros::from_dollars(self.phase2_target),
            daily_loss_limit: Micros::from_dollars(self.daily_loss_limit),
            max_drawdown: Micros::from_dollars(self.max_drawdown),
            trades_per_day: self.trades_per_day,
            reward_ratio_pct: self.reward_ratio_pct,
            initial_risk: Micros::from_dollars(self.initial_risk),
            risk_cap: Micros::from_dollars(self.risk_cap),
            risk_floor: Micros::from_dollars(self.risk_floor),
            drawdown_basis,
            phase_advance_confirmation: self.phase_advance_confirmation,
            input_policy,
        })
    }
}

/// Decode the `challenge` section of a merged config document.  An absent
/// section means "all defaults".
pub fn decode_challenge_config(config_json: &Value) -> Result<ChallengeConfig> {
    let dto: ChallengeConfigDto = match config_json.get("challenge") {
        Some(section) => serde_json::from_value(section.clone())
            .context("invalid /challenge config section")?,
        None => ChallengeConfigDto::default(),
    };
    dto.into_config()
}
