//! fdk-db
//!
//! PostgreSQL persistence for challenge history:
//! - `trading_history` — append-only log, one row per submitted day,
//!   queried per user ordered by day number.
//! - `daily_trades` — weekly grid, one row per (user, week, day-of-week),
//!   insert-or-replace so a day can be edited and resubmitted.
//!
//! All monetary columns are raw micros bigints; decode back to the core
//! types happens in fdk-schemas, never here.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

use fdk_schemas::{DailyTradeRow, HistoryRow};

pub const ENV_DB_URL: &str = "FDK_DATABASE_URL";

/// Connect to Postgres using FDK_DATABASE_URL.
pub async fn connect_from_env() -> Result<PgPool> {
    let url =
        std::env::var(ENV_DB_URL).with_context(|| format!("missing env var {ENV_DB_URL}"))?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .context("failed to connect to Postgres")?;

    Ok(pool)
}

/// Lazily-connecting pool from FDK_DATABASE_URL: no IO happens until the
/// first query, so services can boot without the database and surface
/// per-request errors instead (reads degrade to an empty history).
pub fn connect_lazy_from_env() -> Result<PgPool> {
    let url =
        std::env::var(ENV_DB_URL).with_context(|| format!("missing env var {ENV_DB_URL}"))?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(&url)
        .context("invalid Postgres connection string")?;
    Ok(pool)
}

/// Pool for DB-backed integration tests (which are `#[ignore]`d and only
/// run when FDK_DATABASE_URL points at a disposable database).  Runs
/// migrations so every test starts from the current schema.
pub async fn testkit_db_pool() -> Result<PgPool> {
    let pool = connect_from_env().await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Run embedded SQLx migrations.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("db migrate failed")?;
    Ok(())
}

/// Simple status query (connectivity + schema presence).
pub async fn status(pool: &PgPool) -> Result<DbStatus> {
    let (one,): (i32,) = sqlx::query_as::<_, (i32,)>("select 1")
        .fetch_one(pool)
        .await
        .context("status connectivity query failed")?;
    let ok = one == 1;

    let (exists,): (bool,) = sqlx::query_as::<_, (bool,)>(
        r#"
        select exists (
            select 1
            from information_schema.tables
            where table_schema='public' and table_name='trading_history'
        )
        "#,
    )
    .fetch_one(pool)
    .await
    .context("status table-exists query failed")?;

    Ok(DbStatus {
        ok,
        has_history_table: exists,
    })
}

#[derive(Debug, Clone)]
pub struct DbStatus {
    pub ok: bool,
    pub has_history_table: bool,
}

/// Total rows in `trading_history`, 0 when the schema is absent.
/// Used by CLI guardrails to prevent casually migrating a database that
/// already holds challenge history.
pub async fn count_history_rows(pool: &PgPool) -> Result<i64> {
    let st = status(pool).await?;
    if !st.has_history_table {
        return Ok(0);
    }

    let (n,): (i64,) =
        sqlx::query_as::<_, (i64,)>("select count(*)::bigint from trading_history")
            .fetch_one(pool)
            .await
            .context("count_history_rows failed")?;
    Ok(n)
}

// ---------------------------------------------------------------------------
// trading_history — append-only
// ---------------------------------------------------------------------------

/// Append one submitted day.  The unique (user_name, day_number) constraint
/// makes an accidental double-submit a hard error rather than a silent
/// duplicate.
pub async fn insert_history_row<'e, E>(executor: E, row: &HistoryRow) -> Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        insert into trading_history (
          id, created_at_utc, user_name, phase, day_number, week_number,
          trade_amounts_micros, daily_pl_micros, risk_used_micros,
          balance_micros, peak_balance_micros, drawdown_micros, status
        ) values (
          $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13
        )
        "#,
    )
    .bind(row.id)
    .bind(row.created_at_utc)
    .bind(&row.user_name)
    .bind(row.phase)
    .bind(row.day_number)
    .bind(row.week_number)
    .bind(&row.trade_amounts_micros)
    .bind(row.daily_pl_micros)
    .bind(row.risk_used_micros)
    .bind(row.balance_micros)
    .bind(row.peak_balance_micros)
    .bind(row.drawdown_micros)
    .bind(&row.status)
    .execute(executor)
    .await
    .context("insert_history_row failed")?;

    Ok(())
}

/// All of one user's submitted days, ordered by day number ascending.
pub async fn fetch_history(pool: &PgPool, user_name: &str) -> Result<Vec<HistoryRow>> {
    let rows = sqlx::query(
        r#"
        select id, created_at_utc, user_name, phase, day_number, week_number,
               trade_amounts_micros, daily_pl_micros, risk_used_micros,
               balance_micros, peak_balance_micros, drawdown_micros, status
        from trading_history
        where user_name = $1
        order by day_number asc
        "#,
    )
    .bind(user_name)
    .fetch_all(pool)
    .await
    .context("fetch_history failed")?;

    let mut out = Vec::with_capacity(rows.len());
    for r in rows {
        out.push(HistoryRow {
            id: r.try_get("id")?,
            created_at_utc: r.try_get("created_at_utc")?,
            user_name: r.try_get("user_name")?,
            phase: r.try_get("phase")?,
            day_number: r.try_get("day_number")?,
            week_number: r.try_get("week_number")?,
            trade_amounts_micros: r.try_get("trade_amounts_micros")?,
            daily_pl_micros: r.try_get("daily_pl_micros")?,
            risk_used_micros: r.try_get("risk_used_micros")?,
            balance_micros: r.try_get("balance_micros")?,
            peak_balance_micros: r.try_get("peak_balance_micros")?,
            drawdown_micros: r.try_get("drawdown_micros")?,
            status: r.try_get("status")?,
        });
    }
    Ok(out)
}

/// Delete one user's history (challenge reset).  Destructive; callers gate
/// this behind an explicit confirmation.
pub async fn delete_history(pool: &PgPool, user_name: &str) -> Result<u64> {
    let res = sqlx::query("delete from trading_history where user_name = $1")
        .bind(user_name)
        .execute(pool)
        .await
        .context("delete_history failed")?;
    let res2 = sqlx::query("delete from daily_trades where user_name = $1")
        .bind(user_name)
        .execute(pool)
        .await
        .context("delete_history (daily_trades) failed")?;
    Ok(res.rows_affected() + res2.rows_affected())
}

// ---------------------------------------------------------------------------
// daily_trades — weekly grid upsert
// ---------------------------------------------------------------------------

/// Insert-or-replace one day inside a week grid, keyed on
/// (user_name, week_number, day_of_week).  Resubmitting a day replaces its
/// amounts instead of growing the table.
pub async fn upsert_daily_trade<'e, E>(executor: E, row: &DailyTradeRow) -> Result<()>
where
    E: sqlx::PgExecutor<'e>,
{
    sqlx::query(
        r#"
        insert into daily_trades (
          user_name, week_number, day_of_week,
          trade_amounts_micros, daily_pl_micros, updated_at_utc
        ) values ($1, $2, $3, $4, $5, $6)
        on conflict (user_name, week_number, day_of_week) do update set
          trade_amounts_micros = excluded.trade_amounts_micros,
          daily_pl_micros = excluded.daily_pl_micros,
          updated_at_utc = excluded.updated_at_utc
        "#,
    )
    .bind(&row.user_name)
    .bind(row.week_number)
    .bind(&row.day_of_week)
    .bind(&row.trade_amounts_micros)
    .bind(row.daily_pl_micros)
    .bind(row.updated_at_utc)
    .execute(executor)
    .await
    .context("upsert_daily_trade failed")?;

    Ok(())
}

/// Record one submitted day atomically: append the history row and upsert
/// the weekly grid row inside a single transaction.  Either both land or
/// neither does — the caller applies local state only after this returns Ok.
pub async fn record_day(pool: &PgPool, history: &HistoryRow, week: &DailyTradeRow) -> Result<()> {
    let mut tx = pool.begin().await.context("record_day: begin failed")?;
    insert_history_row(&mut *tx, history).await?;
    upsert_daily_trade(&mut *tx, week).await?;
    tx.commit().await.context("record_day: commit failed")?;
    Ok(())
}

/// One user's grid rows for a given week, in trading-day order.
pub async fn fetch_week(
    pool: &PgPool,
    user_name: &str,
    week_number: i32,
) -> Result<Vec<DailyTradeRow>> {
    let rows = sqlx::query(
        r#"
        select user_name, week_number, day_of_week,
               trade_amounts_micros, daily_pl_micros, updated_at_utc
        from daily_trades
        where user_name = $1 and week_number = $2
        order by array_position(
          array['Monday','Tuesday','Wednesday','Thursday','Friday'],
          day_of_week
        )
        "#,
    )
    .bind(user_name)
    .bind(week_number)
    .fetch_all(pool)
    .await
    .context("fetch_week failed")?;

    let mut out = Vec::with_capacity(rows.len());
    for r in rows {
        out.push(DailyTradeRow {
            user_name: r.try_get("user_name")?,
            week_number: r.try_get("week_number")?,
            day_of_week: r.try_get("day_of_week")?,
            trade_amounts_micros: r.try_get("trade_amounts_micros")?,
            daily_pl_micros: r.try_get("daily_pl_micros")?,
            updated_at_utc: r.try_get("updated_at_utc")?,
        });
    }
    Ok(out)
}
