//! Shared runtime state for fdk-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum.  Sessions are not
//! cached in memory: every request reloads the user's store so the daemon
//! and the CLI can operate on the same files without going stale.  What IS
//! held here is one async mutex per user, serializing the mutating
//! endpoints — submissions are not reentrant.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use fdk_config::ProfileRegistry;
use sqlx::PgPool;
use tokio::sync::Mutex;

/// Static build metadata included in health responses.
#[derive(Clone, Debug)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

/// Cloneable (Arc) handle shared across all Axum handlers.
pub struct AppState {
    pub build: BuildInfo,
    pub profiles: ProfileRegistry,
    /// Root directory for the per-user local stores.
    pub store_root: PathBuf,
    pub pool: PgPool,
    /// Per-user submission locks (see module docs).
    user_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl AppState {
    pub fn new(profiles: ProfileRegistry, store_root: PathBuf, pool: PgPool) -> Self {
        Self {
            build: BuildInfo {
                service: "fdk-daemon",
                version: env!("CARGO_PKG_VERSION"),
            },
            profiles,
            store_root,
            pool,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The submission lock for one user; created on first use.
    pub async fn user_lock(&self, user: &str) -> Arc<Mutex<()>> {
        let mut locks = self.user_locks.lock().await;
        locks
            .entry(user.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
