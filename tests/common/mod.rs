#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use once_cell::sync::Lazy;
use tally::{config::ConfigManager, storage::JsonFileStore, LedgerStore};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn ledger_path(base: &Path) -> PathBuf {
    base.join("ledger.json")
}

pub fn open_store(base: &Path) -> LedgerStore {
    let storage = JsonFileStore::new(ledger_path(base)).expect("create json store");
    LedgerStore::open(Box::new(storage))
}

/// Isolated store and config manager sharing one base directory.
pub fn setup_test_env() -> (LedgerStore, ConfigManager, PathBuf) {
    let base = temp_base();
    let store = open_store(&base);
    let config = ConfigManager::with_base_dir(base.clone()).expect("create config manager");
    (store, config, base)
}
