//! Tests for the state store

use super::*;
use crate::env::RealFileEnv;
use std::fs;
use tempfile::TempDir;

fn state_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join(STATE_FILE_NAME)
}

#[test]
fn test_missing_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = StateStore::load(state_path(&temp_dir));

    assert!(store.is_empty());
    assert_eq!(store.path(), state_path(&temp_dir));
}

#[test]
fn test_state_persistence() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);

    {
        let mut store = StateStore::load(&path);
        store.insert("/data/tmp/b.txt", 20.5);
        store.insert("/data/tmp/a.txt", 10.0);
        store.save().unwrap();
    }

    let store = StateStore::load(&path);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get("/data/tmp/a.txt"), Some(10.0));
    assert_eq!(store.get("/data/tmp/b.txt"), Some(20.5));
}

#[test]
fn test_saved_document_shape() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);

    let mut store = StateStore::empty(&path);
    store.insert("/z", 2.0);
    store.insert("/a", 1.5);
    store.save().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.ends_with("}\n"));
    assert!(contents.find("\"/a\"").unwrap() < contents.find("\"/z\"").unwrap());

    let doc: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(doc[FILES_KEY]["/a"], serde_json::json!(1.5));
    assert_eq!(doc[FILES_KEY]["/z"], serde_json::json!(2.0));
}

#[test]
fn test_save_creates_parent_dirs_and_leaves_no_temp_files() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("deeper").join(STATE_FILE_NAME);

    let mut store = StateStore::empty(&path);
    store.insert("/x", 1.0);
    store.save().unwrap();

    let entries: Vec<_> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from(STATE_FILE_NAME)]);
}

#[test]
fn test_malformed_documents_load_empty() {
    let cases = [
        "not json at all",
        "[1, 2, 3]",
        r#"{"other": {}}"#,
        r#"{"files": []}"#,
        r#"{"files": "nope"}"#,
    ];

    for contents in cases {
        let temp_dir = TempDir::new().unwrap();
        let path = state_path(&temp_dir);
        fs::write(&path, contents).unwrap();

        let store = StateStore::load(&path);
        assert!(store.is_empty(), "contents: {contents}");
        assert!(store.is_malformed(), "contents: {contents}");
    }
}

#[test]
fn test_malformed_document_is_backed_up() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);
    fs::write(&path, "{ broken").unwrap();

    let mut store = StateStore::load(&path);
    assert!(store.is_empty());
    assert!(path.exists(), "loading must leave the document in place");

    let backup = store.backup_malformed().unwrap();
    assert!(!path.exists());
    assert_eq!(fs::read_to_string(&backup).unwrap(), "{ broken");
    assert!(!store.is_malformed());
    assert!(store.backup_malformed().is_none());

    let backups: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("state.json.corrupted."))
        .collect();
    assert_eq!(backups.len(), 1);
}

#[test]
fn test_well_formed_document_is_not_backed_up() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);
    fs::write(&path, r#"{"files": {"/ok": 5}}"#).unwrap();

    let mut store = StateStore::load(&path);
    assert!(!store.is_malformed());
    assert!(store.backup_malformed().is_none());
    assert!(path.exists());
}

#[test]
fn test_non_numeric_entries_are_dropped() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);
    fs::write(&path, r#"{"files": {"/ok": 5, "/bad": "yesterday"}}"#).unwrap();

    let store = StateStore::load(&path);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("/ok"), Some(5.0));
    assert!(store.get("/bad").is_none());
}

#[test]
fn test_unknown_top_level_keys_survive_save() {
    let temp_dir = TempDir::new().unwrap();
    let path = state_path(&temp_dir);
    fs::write(&path, r#"{"files": {}, "note": "hand edited"}"#).unwrap();

    let store = StateStore::load(&path);
    store.save().unwrap();

    let doc: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["note"], serde_json::json!("hand edited"));
    assert_eq!(doc[FILES_KEY], serde_json::json!({}));
}

#[test]
fn test_prune_missing_drops_vanished_paths() {
    let temp_dir = TempDir::new().unwrap();
    let kept = temp_dir.path().join("kept.txt");
    fs::write(&kept, "x").unwrap();
    let gone = temp_dir.path().join("gone.txt");

    let mut store = StateStore::empty(state_path(&temp_dir));
    store.insert(kept.to_str().unwrap(), 1.0);
    store.insert(gone.to_str().unwrap(), 2.0);

    let pruned = store.prune_missing(&RealFileEnv::new());

    assert_eq!(pruned, 1);
    assert!(store.get(kept.to_str().unwrap()).is_some());
    assert!(store.get(gone.to_str().unwrap()).is_none());
}

#[cfg(unix)]
#[test]
fn test_prune_missing_understands_raw_keys() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let kept = temp_dir.path().join(OsStr::from_bytes(b"kept\xFF.txt"));
    let gone = temp_dir.path().join(OsStr::from_bytes(b"gone\xFF.txt"));
    // Some filesystems refuse non-UTF-8 names.
    if fs::write(&kept, "x").is_err() {
        return;
    }

    let mut store = StateStore::empty(state_path(&temp_dir));
    store.insert(path_to_key(&kept), 1.0);
    store.insert(path_to_key(&gone), 2.0);

    assert_eq!(store.prune_missing(&RealFileEnv::new()), 1);
    assert_eq!(store.get(&path_to_key(&kept)), Some(1.0));
    assert!(store.get(&path_to_key(&gone)).is_none());
}

#[test]
fn test_remove_returns_previous_value() {
    let mut store = StateStore::empty("/unused/state.json");
    store.insert("/a", 3.0);

    assert_eq!(store.remove("/a"), Some(3.0));
    assert_eq!(store.remove("/a"), None);
}
