//! User-profile registry.
//!
//! A challenge session always belongs to exactly one named profile; every
//! state-loading or state-mutating path requires a profile from this
//! registry first.

use anyhow::{bail, Context, Result};
use fdk_schemas::ProfileEntry;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRegistry {
    pub profiles: Vec<ProfileEntry>,
}

impl ProfileRegistry {
    pub fn find(&self, name: &str) -> Option<&ProfileEntry> {
        self.profiles.iter().find(|p| p.name == name)
    }
}

/// Load the profile registry from a YAML file.
///
/// The registry must be non-empty and names must be unique and non-empty —
/// profile names key the per-user stores and the remote history.
pub fn load_profiles(path: &str) -> Result<ProfileRegistry> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read profiles: {path}"))?;
    let reg: ProfileRegistry =
        serde_yaml::from_str(&raw).with_context(|| format!("invalid profiles yaml: {path}"))?;
    validate(&reg)?;
    Ok(reg)
}

/// Resolve a selected user name against the registry; an empty or unknown
/// name is an error, never a silent default.
pub fn require_profile<'a>(reg: &'a ProfileRegistry, name: &str) -> Result<&'a ProfileEntry> {
    if name.trim().is_empty() {
        bail!("PROFILE_REQUIRED: no user selected");
    }
    reg.find(name)
        .with_context(|| format!("PROFILE_UNKNOWN: no profile named {name:?}"))
}

fn validate(reg: &ProfileRegistry) -> Result<()> {
    if reg.profiles.is_empty() {
        bail!("PROFILE_REQUIRED: profile registry is empty");
    }
    let mut seen = std::collections::BTreeSet::new();
    for p in &reg.profiles {
        if p.name.trim().is_empty() {
            bail!("PROFILE_INVALID: empty profile name");
        }
        if !seen.insert(p.name.as_str()) {
            bail!("PROFILE_INVALID: duplicate profile name {:?}", p.name);
        }
    }
    Ok(())
}
