//! fdk-store
//!
//! Per-user local state store: one directory per user under a common root,
//! holding `state.json` (the challenge state snapshot) and `config.json`
//! (the per-user challenge configuration).
//!
//! The store is an explicit handle scoped to exactly one user and passed to
//! the submission pipeline — there is no ambient global keyed by user name
//! anywhere.  Opening a handle requires a non-empty user name.

use anyhow::{bail, Context, Result};
use fdk_challenge::{ChallengeConfig, ChallengeState};
use fdk_config::ChallengeConfigDto;
use fdk_schemas::StateSnapshot;
use std::fs;
use std::path::{Path, PathBuf};

const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";

/// Handle to one user's local store.
#[derive(Debug, Clone)]
pub struct UserStore {
    user: String,
    dir: PathBuf,
}

impl UserStore {
    /// Open (creating if needed) the store directory for `user`.
    ///
    /// User names key directories on disk, so they must be non-empty and
    /// path-safe; anything else is refused here, before any IO.
    pub fn open(root: &Path, user: &str) -> Result<UserStore> {
        let user = user.trim();
        if user.is_empty() {
            bail!("STORE_USER_REQUIRED: cannot open a store without a user");
        }
        if user
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        {
            bail!("STORE_USER_INVALID: user name {user:?} is not path-safe");
        }

        let dir = root.join(user);
        fs::create_dir_all(&dir)
            .with_context(|| format!("create user store dir failed: {}", dir.display()))?;
        Ok(UserStore {
            user: user.to_string(),
            dir,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    /// Load the persisted challenge state, or `None` before the first save.
    pub fn load_state(&self) -> Result<Option<ChallengeState>> {
        let path = self.dir.join(STATE_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read state failed: {}", path.display()))?;
        let snap: StateSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("decode state failed: {}", path.display()))?;
        let state = snap
            .to_state()
            .with_context(|| format!("state snapshot invalid: {}", path.display()))?;
        Ok(Some(state))
    }

    /// Persist the challenge state, replacing any previous snapshot.
    pub fn save_state(&self, state: &ChallengeState) -> Result<()> {
        let snap = StateSnapshot::from_state(state);
        let json = serde_json::to_string_pretty(&snap).context("serialize state failed")?;
        let path = self.dir.join(STATE_FILE);
        fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("write state failed: {}", path.display()))?;
        Ok(())
    }

    /// Remove the persisted state (challenge reset).  The configuration is
    /// left in place.
    pub fn clear_state(&self) -> Result<()> {
        let path = self.dir.join(STATE_FILE);
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("remove state failed: {}", path.display()))?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Per-user configuration
    // -----------------------------------------------------------------------

    /// Load and validate the per-user challenge config, or `None` when the
    /// user has never saved one.
    pub fn load_config(&self) -> Result<Option<ChallengeConfig>> {
        let path = self.dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("read config failed: {}", path.display()))?;
        let dto: ChallengeConfigDto = serde_json::from_str(&raw)
            .with_context(|| format!("decode config failed: {}", path.display()))?;
        let cfg = dto
            .into_config()
            .with_context(|| format!("stored config invalid: {}", path.display()))?;
        Ok(Some(cfg))
    }

    /// Persist the per-user challenge config.  Validated before the write so
    /// an invalid config can never land on disk.
    pub fn save_config_dto(&self, dto: &ChallengeConfigDto) -> Result<()> {
        dto.clone().into_config().context("refusing to save invalid config")?;
        let json = serde_json::to_string_pretty(dto).context("serialize config failed")?;
        let path = self.dir.join(CONFIG_FILE);
        fs::write(&path, format!("{json}\n"))
            .with_context(|| format!("write config failed: {}", path.display()))?;
        Ok(())
    }
}
