use std::collections::BTreeMap;
use std::fs;

use launcher_search::{initialize, Config, LauncherError};

#[test]
fn missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.max_results, 50);
    assert_eq!(config.recents_limit, 8);
}

#[test]
fn loads_prefixes_and_disabled_providers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
max_results = 25
disabled = ["contacts"]

[prefixes]
web = ["s", "g"]
files = ["f", "م"]
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.max_results, 25);

    let engine = initialize(&config);
    let registry = engine.registry();
    assert_eq!(registry.prefixes_for("web"), vec!["s", "g"]);
    assert_eq!(registry.find_by_prefix("م").map(|p| p.id.clone()), Some("files".into()));
    assert!(registry.find_by_prefix("c").is_none());
    assert_eq!(engine.max_results(), 25);
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "max_results = [").unwrap();

    assert!(matches!(Config::load(&path), Err(LauncherError::ConfigParse(_))));
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(matches!(
        Config::from_toml_str("max_resluts = 10"),
        Err(LauncherError::ConfigParse(_))
    ));
}

#[test]
fn out_of_range_values_fail_validation() {
    assert!(matches!(
        Config::from_toml_str("max_results = 0"),
        Err(LauncherError::Config(_))
    ));
    assert!(matches!(
        Config::from_toml_str("recents_limit = 1000"),
        Err(LauncherError::Config(_))
    ));
}

#[test]
fn whitespace_and_empty_prefixes_are_dropped() {
    let config = Config::from_toml_str(
        r#"
[prefixes]
web = ["s", "", "g g", "s", "G"]
"#,
    )
    .unwrap();

    let prefixes = config.prefix_configuration();
    assert_eq!(prefixes.configured("web"), Some(&["s".to_string(), "G".to_string()][..]));
}

#[test]
fn flat_map_configuration() {
    let mut map = BTreeMap::new();
    map.insert("prefix.web".to_string(), "s, ddg".to_string());
    map.insert("disabled".to_string(), "video, contacts".to_string());
    map.insert("recents_limit".to_string(), "3".to_string());
    map.insert("trace_level".to_string(), "debug".to_string());

    let config = Config::from_map(&map);
    assert_eq!(config.recents_limit, 3);
    assert_eq!(config.trace_level.as_deref(), Some("debug"));
    assert_eq!(config.disabled, vec!["video", "contacts"]);

    let engine = initialize(&config);
    assert_eq!(engine.registry().prefixes_for("web"), vec!["s", "ddg"]);
    assert!(engine.registry().prefixes_for("video").is_empty());
}
