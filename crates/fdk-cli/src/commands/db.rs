use anyhow::{bail, Result};

/// `fdk db status`
pub async fn status() -> Result<()> {
    let pool = fdk_db::connect_from_env().await?;
    let st = fdk_db::status(&pool).await?;
    println!("db_ok={}", st.ok);
    println!("has_history_table={}", st.has_history_table);
    if st.has_history_table {
        let rows = fdk_db::count_history_rows(&pool).await?;
        println!("history_rows={rows}");
    }
    Ok(())
}

/// `fdk db migrate [--yes]`
///
/// Refuses to touch a database that already holds challenge history unless
/// the operator acknowledges with --yes.
pub async fn migrate(yes: bool) -> Result<()> {
    let pool = fdk_db::connect_from_env().await?;

    let rows = fdk_db::count_history_rows(&pool).await?;
    if rows > 0 && !yes {
        bail!(
            "refusing to migrate: trading_history holds {rows} row(s). \
            Re-run with --yes to acknowledge."
        );
    }

    fdk_db::migrate(&pool).await?;
    println!("migrations applied");
    Ok(())
}
