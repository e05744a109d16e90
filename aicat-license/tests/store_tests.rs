use aicat_license::{FileLicenseStore, LicenseKey, LicenseStore, MemoryLicenseStore};
use std::fs;
use tempfile::TempDir;

fn key() -> LicenseKey {
    LicenseKey::parse("sk-test0123456789abcdef").unwrap()
}

fn file_store(dir: &TempDir) -> FileLicenseStore {
    FileLicenseStore::at_path(dir.path().join("aicat").join("license.json"))
}

// ── MemoryLicenseStore ───────────────────────────────────────────

#[test]
fn memory_store_starts_empty() {
    let store = MemoryLicenseStore::new();
    assert!(store.stored_key().is_none());
}

#[test]
fn memory_store_save_and_load() {
    let store = MemoryLicenseStore::new();
    store.save(&key()).unwrap();
    assert_eq!(store.stored_key(), Some(key()));
}

#[test]
fn memory_store_clear() {
    let store = MemoryLicenseStore::with_key(key());
    store.clear().unwrap();
    assert!(store.stored_key().is_none());
}

// ── FileLicenseStore ─────────────────────────────────────────────

#[test]
fn file_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    store.save(&key()).unwrap();
    assert_eq!(store.stored_key(), Some(key()));
}

#[test]
fn file_store_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    store.save(&key()).unwrap();
    assert!(store.path().exists());
}

#[test]
fn missing_file_reads_as_no_key() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    assert!(store.stored_key().is_none());
}

#[test]
fn corrupt_file_reads_as_no_key() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(store.path(), "not json {").unwrap();

    assert!(store.stored_key().is_none());
}

#[test]
fn invalid_stored_key_reads_as_no_key() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    fs::write(
        store.path(),
        r#"{"key":"too-short","saved_at":"2026-08-31T00:00:00Z"}"#,
    )
    .unwrap();

    assert!(store.stored_key().is_none());
}

#[test]
fn file_store_clear_removes_file() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    store.save(&key()).unwrap();
    store.clear().unwrap();
    assert!(!store.path().exists());
    assert!(store.stored_key().is_none());
}

#[test]
fn clearing_absent_key_is_ok() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    store.clear().unwrap();
}

#[test]
fn save_replaces_previous_key() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);

    store.save(&key()).unwrap();
    let newer = LicenseKey::parse("sk-newer0123456789abcdef").unwrap();
    store.save(&newer).unwrap();

    assert_eq!(store.stored_key(), Some(newer));
}
