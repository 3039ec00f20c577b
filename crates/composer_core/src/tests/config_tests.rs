use super::{apply_env_overrides, apply_file_overrides, load_settings, AppPaths, Settings};

use std::{collections::HashMap, fs, path::PathBuf, time::Duration};

#[test]
fn defaults_match_documented_values() {
    let settings = Settings::default();
    assert_eq!(settings.thumbnail_max_dimension, 240);
    assert_eq!(settings.resize_debounce(), Duration::from_millis(250));
    assert_eq!(settings.log_filter, "info");
    assert!(settings.data_dir.is_none());
}

#[test]
fn file_overrides_accept_strings_and_numbers() {
    let mut settings = Settings::default();
    apply_file_overrides(
        &mut settings,
        r#"
data_dir = "/tmp/composer"
thumbnail_max_dimension = 128
resize_debounce_ms = "90"
log_filter = "composer_core=debug"
"#,
    );

    assert_eq!(settings.data_dir, Some(PathBuf::from("/tmp/composer")));
    assert_eq!(settings.thumbnail_max_dimension, 128);
    assert_eq!(settings.resize_debounce_ms, 90);
    assert_eq!(settings.log_filter, "composer_core=debug");
}

#[test]
fn malformed_file_and_bad_numbers_are_ignored() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "this is = = not toml");
    apply_file_overrides(&mut settings, "thumbnail_max_dimension = \"huge\"");
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_win_over_file() {
    let mut settings = Settings::default();
    apply_file_overrides(&mut settings, "thumbnail_max_dimension = 128");

    let env = HashMap::from([
        ("APP__THUMBNAIL_MAX_DIMENSION", "64"),
        ("APP__DATA_DIR", "  "),
        ("APP__LOG_FILTER", "warn"),
    ]);
    apply_env_overrides(&mut settings, |name| env.get(name).map(|v| v.to_string()));

    assert_eq!(settings.thumbnail_max_dimension, 64);
    assert!(settings.data_dir.is_none());
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn explicit_config_path_is_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("custom.toml");
    fs::write(&path, "resize_debounce_ms = 1000").expect("write config");

    let settings = load_settings(Some(&path));
    assert_eq!(settings.resize_debounce_ms, 1000);
}

#[test]
fn app_paths_use_configured_data_dir() {
    let settings = Settings {
        data_dir: Some(PathBuf::from("/srv/composer")),
        ..Settings::default()
    };
    let paths = AppPaths::resolve(&settings).expect("paths");
    assert_eq!(paths.data_root, PathBuf::from("/srv/composer"));
    assert_eq!(paths.settings_path, PathBuf::from("/srv/composer/settings.json"));
}
