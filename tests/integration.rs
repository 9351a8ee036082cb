// SPDX-License-Identifier: MPL-2.0
use gallery_lens::config::{self, Config, DEFAULT_REFRESH_INTERVAL_SECS};
use gallery_lens::i18n::fluent::I18n;
use gallery_lens::ui::theming::ThemeMode;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut english = Config::default();
    english.general.language = Some("en-US".to_string());
    config::save_to_path(&english, &path).expect("Failed to write initial config file");

    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    let mut french = Config::default();
    french.general.language = Some("fr".to_string());
    config::save_to_path(&french, &path).expect("Failed to write french config file");

    let loaded = config::load_from_path(&path).expect("Failed to load french config");
    let i18n_fr = I18n::new(None, &loaded);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");
    assert_eq!(i18n_fr.tr("toolbar-refresh"), "Actualiser");
}

#[test]
fn cli_language_beats_config() {
    let mut config = Config::default();
    config.general.language = Some("fr".to_string());

    let i18n = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn server_section_round_trips() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.general.theme_mode = ThemeMode::Dark;
    config.server.base_url = Some("https://gallery.example.org/".to_string());
    config.server.refresh_interval_secs = Some(120);
    config::save_to_path(&config, &path).expect("save");

    let loaded = config::load_from_path(&path).expect("load");
    assert_eq!(loaded, config);
    assert_eq!(loaded.server.base_url(), "https://gallery.example.org/");
    assert_eq!(loaded.server.refresh_interval(), Duration::from_secs(120));
}

#[test]
fn invalid_toml_falls_back_to_defaults_with_warning() {
    let dir = tempdir().expect("temp dir");
    std::fs::write(dir.path().join("settings.toml"), "[server\nbase_url = ")
        .expect("write broken config");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));

    assert_eq!(config, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    assert_eq!(
        config.server.refresh_interval(),
        Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS)
    );
}
