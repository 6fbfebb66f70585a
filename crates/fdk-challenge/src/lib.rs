//! fdk-challenge
//!
//! Funded-challenge decision core:
//! - Fixed-point money (micros)
//! - Challenge config / state / daily records
//! - Multiplicative risk adjustment
//! - Violation & progress evaluation (daily loss limit, max drawdown,
//!   phase targets)
//! - Trade submission computation and history replay
//!
//! Deterministic, pure logic. No IO, no time, no storage calls.

mod evaluate;
mod money;
mod risk;
mod submit;
mod types;

pub use evaluate::{evaluate, EvalDecision, ReasonCode};
pub use money::{Micros, MICROS_SCALE};
pub use risk::next_risk;
pub use submit::{
    confirm_phase_advance, parse_trade_amounts, replay, submit, BadEntry, ReplayError,
    SubmitError, Submission,
};
pub use types::*;
