use fdk_config::load_layered_yaml_from_strings;

const BASE: &str = r#"
challenge:
  starting_balance: 6000
  phase1_target: 480
  daily_loss_limit: 300
"#;

const OVERRIDE: &str = r#"
challenge:
  daily_loss_limit: 250
"#;

#[test]
fn same_layers_same_hash() {
    let a = load_layered_yaml_from_strings(&[BASE, OVERRIDE]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE, OVERRIDE]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn later_layer_overrides_earlier() {
    let merged = load_layered_yaml_from_strings(&[BASE, OVERRIDE]).unwrap();
    assert_eq!(
        merged.config_json["challenge"]["daily_loss_limit"],
        serde_json::json!(250)
    );
    // Untouched keys survive the merge.
    assert_eq!(
        merged.config_json["challenge"]["phase1_target"],
        serde_json::json!(480)
    );
}

#[test]
fn different_layers_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE, OVERRIDE]).unwrap();
    assert_ne!(a.config_hash, b.config_hash);
}
