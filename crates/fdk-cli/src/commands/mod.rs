use anyhow::Result;

pub mod challenge;
pub mod db;

/// `fdk config-hash <paths...>` — merge layered YAML in order and print the
/// canonical JSON plus its sha256.
pub fn config_hash(paths: &[String]) -> Result<()> {
    let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = fdk_config::load_layered_yaml(&path_refs)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}
