use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use ezeatin::storage::{SledStore, SqliteStore};

#[allow(dead_code)]
pub fn create_temp_sled() -> (SledStore, TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("lists.sled");
    let store = SledStore::open(&db_path).expect("failed to open sled store");
    (store, tmp, db_path)
}

#[allow(dead_code)]
pub fn create_temp_sqlite() -> (SqliteStore, TempDir, PathBuf) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("lists.db");
    let store = SqliteStore::new_with_path(&db_path).expect("failed to create sqlite store");
    (store, tmp, db_path)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}
