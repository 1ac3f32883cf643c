use std::fs;

use rentbook_config::{Config, ConfigError, ConfigManager};
use tempfile::tempdir;

#[test]
fn manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.currency = "GBP".to_string();
    cfg.last_opened_book = Some("harbour".to_string());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.last_opened_book.as_deref(), Some("harbour"));
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.currency, Config::default().currency);
}

#[test]
fn with_base_dir_lays_out_directories() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("layout");

    assert!(manager.backups_dir().exists());
    assert!(manager
        .config_path()
        .to_string_lossy()
        .ends_with("config/config.json"));
}

#[test]
fn backup_and_restore_round_trip() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.default_horizon_months = 6;
    let name = manager.backup(&cfg, Some("Before reset!")).expect("backup");
    assert!(name.starts_with("config-"));
    assert!(name.ends_with("-before-reset.json"));

    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.default_horizon_months, 6);

    let listed = manager.list_backups().expect("list");
    assert_eq!(listed, vec![name]);
}

#[test]
fn backups_list_newest_first() {
    let dir = tempdir().expect("tempdir");
    let backups = dir.path().join("backups");
    let manager = ConfigManager::new(dir.path().join("config.json"), backups.clone());
    fs::create_dir_all(&backups).expect("backup dir");

    for name in [
        "config-20240101T0900.json",
        "config-20250101T0900-note.json",
        "config-20230601T1200.json",
        "not-a-backup.txt",
    ] {
        fs::write(backups.join(name), "{}").expect("write backup file");
    }

    let listed = manager.list_backups().expect("list");
    assert_eq!(
        listed,
        vec![
            "config-20250101T0900-note.json",
            "config-20240101T0900.json",
            "config-20230601T1200.json",
        ]
    );
}

#[test]
fn restoring_unknown_backup_fails() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));
    let result = manager.restore("config-20200101T0000.json");
    assert!(matches!(result, Err(ConfigError::BackupNotFound(_))));
}
