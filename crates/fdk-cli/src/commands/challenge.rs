//! Challenge lifecycle commands: status, submit, confirm, reset, replay.
//!
//! Every command resolves the user against the profile registry first, then
//! opens that user's store — there is no default user and no ambient state.

use std::path::Path;

use anyhow::{bail, Context, Result};

use fdk_challenge::Phase;
use fdk_pipeline::Session;
use fdk_store::UserStore;

fn open_session(store_root: &str, profiles: &str, user: &str) -> Result<(UserStore, Session)> {
    let registry = fdk_config::load_profiles(profiles)?;
    fdk_config::require_profile(&registry, user)?;
    let store = UserStore::open(Path::new(store_root), user)?;
    let session = Session::open(&store)?;
    Ok((store, session))
}

fn print_state(session: &Session) {
    let st = &session.state;
    println!("user={}", session.user);
    println!(
        "day={} week={} phase={} status={}",
        st.day_number,
        st.week_number,
        st.phase.as_u8(),
        st.status.as_str()
    );
    println!("balance={}", st.balance);
    println!("peak_balance={}", st.peak_balance);
    println!("drawdown={}", st.drawdown(&session.config));
    println!("risk_next_day={}", st.current_risk);
    let level = match st.phase {
        Phase::One => session.config.phase1_level(),
        Phase::Two => session.config.pass_level(),
    };
    println!("next_target_balance={level}");
}

/// `fdk user list`
pub fn user_list(profiles: &str) -> Result<()> {
    let registry = fdk_config::load_profiles(profiles)?;
    for p in &registry.profiles {
        println!("{}\t{}", p.name, p.display_name);
    }
    Ok(())
}

/// `fdk challenge status --user X`
pub async fn status(store_root: &str, profiles: &str, user: &str) -> Result<()> {
    let (_, session) = open_session(store_root, profiles, user)?;
    print_state(&session);
    Ok(())
}

/// `fdk challenge submit --user X (--amounts "240,-80" | --wins N --losses N)`
pub async fn submit(
    store_root: &str,
    profiles: &str,
    user: &str,
    amounts: Option<&str>,
    wins: Option<u32>,
    losses: Option<u32>,
) -> Result<()> {
    let (store, mut session) = open_session(store_root, profiles, user)?;

    let sub = match (amounts, wins, losses) {
        (Some(csv), None, None) => {
            let raw: Vec<String> = csv.split(',').map(|s| s.trim().to_string()).collect();
            fdk_pipeline::prepare(&session, &raw)?
        }
        (None, Some(w), Some(l)) => fdk_pipeline::prepare_counts(&session, w, l)?,
        _ => bail!("provide either --amounts or --wins/--losses"),
    };

    let pool = fdk_db::connect_from_env().await?;
    let record = fdk_pipeline::record_and_apply(&pool, &store, &mut session, sub).await?;

    println!(
        "day {} recorded: daily_pl={} status={}",
        record.day_number,
        record.daily_pl,
        record.status.as_str()
    );
    print_state(&session);
    Ok(())
}

/// `fdk challenge confirm-advance --user X`
pub fn confirm_advance(store_root: &str, profiles: &str, user: &str) -> Result<()> {
    let (store, mut session) = open_session(store_root, profiles, user)?;
    fdk_pipeline::confirm_phase_advance(&store, &mut session)?;
    println!("phase advance confirmed");
    print_state(&session);
    Ok(())
}

/// `fdk challenge reset --user X --yes`
pub async fn reset(store_root: &str, profiles: &str, user: &str, yes: bool) -> Result<()> {
    if !yes {
        bail!("reset drops this user's entire history; re-run with --yes to acknowledge");
    }
    let (store, mut session) = open_session(store_root, profiles, user)?;
    let pool = fdk_db::connect_from_env().await?;
    fdk_pipeline::reset(&pool, &store, &mut session).await?;
    println!("challenge reset");
    print_state(&session);
    Ok(())
}

/// `fdk challenge week --user X [--week N]`
pub async fn week(store_root: &str, profiles: &str, user: &str, week: Option<u32>) -> Result<()> {
    let (_, session) = open_session(store_root, profiles, user)?;
    let week_number = week.unwrap_or(session.state.week_number);
    if week_number < 1 {
        bail!("week must be >= 1");
    }

    let pool = fdk_db::connect_from_env().await?;
    let days = fdk_pipeline::week_or_empty(&pool, user, week_number).await;

    println!("user={user} week={week_number}");
    let mut weekly_pl = fdk_challenge::Micros::ZERO;
    for day in &days {
        let pl = fdk_challenge::Micros::new(day.daily_pl_micros);
        weekly_pl = weekly_pl.saturating_add(pl);
        println!("{}\tdaily_pl={}", day.day_of_week, pl);
    }
    println!("days_submitted={}", days.len());
    println!("weekly_pl={weekly_pl}");
    Ok(())
}

/// `fdk challenge replay --user X [--write]`
///
/// Rebuild the state from the remote history and compare it with the local
/// copy; with --write the replayed state replaces the local one.
pub async fn replay(store_root: &str, profiles: &str, user: &str, write: bool) -> Result<()> {
    let (store, session) = open_session(store_root, profiles, user)?;
    let pool = fdk_db::connect_from_env().await?;

    let rows = fdk_db::fetch_history(&pool, user).await?;
    let records = rows
        .iter()
        .map(|r| r.to_record())
        .collect::<Result<Vec<_>, _>>()
        .context("stored history row failed to decode")?;

    let replayed = fdk_challenge::replay(&session.config, &records)?;
    println!("replayed {} day(s)", records.len());

    if replayed == session.state {
        println!("local state matches the remote history");
    } else {
        println!("local state DIVERGES from the remote history:");
        println!("  local:    day={} balance={}", session.state.day_number, session.state.balance);
        println!("  replayed: day={} balance={}", replayed.day_number, replayed.balance);
    }

    if write {
        store.save_state(&replayed)?;
        println!("replayed state written to the local store");
    }
    Ok(())
}
