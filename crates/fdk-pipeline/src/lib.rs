//! fdk-pipeline
//!
//! The submission pipeline: open a per-user session, turn raw trade entries
//! into a computed submission, record it remotely, then apply the new state
//! locally.
//!
//! Ordering is the whole point.  The remote write happens first and is
//! transactional; local state is only touched after it succeeds.  A failed
//! write therefore leaves the session exactly as it was — the user re-reads
//! the error and re-submits, nothing retries automatically.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};

use fdk_challenge::{
    confirm_phase_advance as confirm_state, day_of_week_name, day_of_week_slot,
    parse_trade_amounts, ChallengeConfig, ChallengeState, DailyRecord, DayInputs, Submission,
};
use fdk_schemas::{DailyTradeRow, HistoryRow};
use fdk_store::UserStore;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One user's live challenge session: the validated config plus the current
/// state, both loaded from that user's store.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
    pub config: ChallengeConfig,
    pub state: ChallengeState,
}

impl Session {
    /// Load a session from a user store.  A missing config means the
    /// production defaults; a missing state means a fresh challenge.
    pub fn open(store: &UserStore) -> Result<Session> {
        let config = store
            .load_config()
            .context("loading per-user config")?
            .unwrap_or_else(ChallengeConfig::sane_defaults);
        let state = match store.load_state().context("loading challenge state")? {
            Some(s) => s,
            None => ChallengeState::new(&config),
        };
        Ok(Session {
            user: store.user().to_string(),
            config,
            state,
        })
    }
}

// ---------------------------------------------------------------------------
// Prepare (pure)
// ---------------------------------------------------------------------------

/// Parse raw trade entries under the session's input policy and compute the
/// submission.  Nothing is persisted and the session is not mutated.
pub fn prepare(session: &Session, raw_amounts: &[String]) -> Result<Submission> {
    let amounts = parse_trade_amounts(raw_amounts, session.config.input_policy)
        .context("trade entries rejected")?;
    let inputs = DayInputs::new(amounts);
    let sub = fdk_challenge::submit(&session.config, &session.state, &inputs)
        .context("submission refused")?;
    Ok(sub)
}

/// Compute a submission from win/loss counts at the current risk.
pub fn prepare_counts(session: &Session, wins: u32, losses: u32) -> Result<Submission> {
    let inputs = DayInputs::from_wins_losses(
        &session.config,
        session.state.current_risk,
        wins,
        losses,
    )
    .with_context(|| {
        format!(
            "wins + losses must equal trades_per_day ({})",
            session.config.trades_per_day
        )
    })?;
    let sub = fdk_challenge::submit(&session.config, &session.state, &inputs)
        .context("submission refused")?;
    Ok(sub)
}

// ---------------------------------------------------------------------------
// Record + apply
// ---------------------------------------------------------------------------

/// Record a prepared submission remotely, then apply it to the session and
/// the local store.
///
/// The remote write (history append + weekly grid upsert, one transaction)
/// runs first; if it fails, the error propagates and neither the session
/// nor the local store has changed.
pub async fn record_and_apply(
    pool: &PgPool,
    store: &UserStore,
    session: &mut Session,
    sub: Submission,
) -> Result<DailyRecord> {
    let history = HistoryRow::from_record(&session.user, &sub.record);
    let week = weekly_row(&session.user, &sub.record);

    fdk_db::record_day(pool, &history, &week)
        .await
        .context("recording the day failed; state unchanged")?;

    store
        .save_state(&sub.state)
        .context("day recorded remotely but local state write failed")?;
    session.state = sub.state;

    info!(
        user = %session.user,
        day = sub.record.day_number,
        daily_pl = %sub.record.daily_pl,
        status = sub.record.status.as_str(),
        "day recorded"
    );
    Ok(sub.record)
}

/// Confirm a pending phase advance and persist the transition.
pub fn confirm_phase_advance(store: &UserStore, session: &mut Session) -> Result<()> {
    let next = confirm_state(&session.state).context("phase confirmation refused")?;
    store
        .save_state(&next)
        .context("persisting confirmed phase advance")?;
    session.state = next;
    info!(user = %session.user, "phase advance confirmed");
    Ok(())
}

/// Reset the challenge: drop the remote history, then the local state.
/// Destructive — callers gate this behind an explicit confirmation.
pub async fn reset(pool: &PgPool, store: &UserStore, session: &mut Session) -> Result<()> {
    let removed = fdk_db::delete_history(pool, &session.user)
        .await
        .context("deleting remote history")?;
    store.clear_state().context("clearing local state")?;
    session.state = ChallengeState::new(&session.config);
    info!(user = %session.user, removed_rows = removed, "challenge reset");
    Ok(())
}

// ---------------------------------------------------------------------------
// History reads
// ---------------------------------------------------------------------------

/// Load a user's history; a read failure is logged and surfaces as an empty
/// list so the session stays usable.
pub async fn history_or_empty(pool: &PgPool, user: &str) -> Vec<HistoryRow> {
    match fdk_db::fetch_history(pool, user).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(user, error = %err, "history load failed; showing empty history");
            Vec::new()
        }
    }
}

/// Load one week of a user's grid rows; same degrade-to-empty policy as
/// [`history_or_empty`].
pub async fn week_or_empty(pool: &PgPool, user: &str, week_number: u32) -> Vec<DailyTradeRow> {
    match fdk_db::fetch_week(pool, user, week_number as i32).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(user, week_number, error = %err, "week load failed; showing empty week");
            Vec::new()
        }
    }
}

fn weekly_row(user: &str, record: &DailyRecord) -> DailyTradeRow {
    DailyTradeRow {
        user_name: user.to_string(),
        week_number: record.week_number as i32,
        day_of_week: day_of_week_name(day_of_week_slot(record.day_number)).to_string(),
        trade_amounts_micros: record.trade_amounts.iter().map(|m| m.raw()).collect(),
        daily_pl_micros: record.daily_pl.raw(),
        updated_at_utc: Utc::now(),
    }
}
