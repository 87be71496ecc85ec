//! Integration tests for the settings-writer context

use super::test_utils::Observed;
use scoped_with::resource::{SettingsExt, SettingsWriter};
use scoped_with::{try_with, with, ContextError, ScopeExt};
use tempfile::TempDir;

/// Both pairs are present and flushed once the runner returns
#[test]
fn test_two_pairs_written_and_flushed() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("settings");

    with(Some(SettingsWriter::new(&store)), |w| {
        w.write("SomeKey1", "SomeValue1")?;
        w.write("SomeKey2", "SomeValue2")?;
        Ok(())
    });

    let db = sled::open(&store).unwrap();
    assert_eq!(
        db.read_setting::<String>("SomeKey1").unwrap().as_deref(),
        Some("SomeValue1")
    );
    assert_eq!(
        db.read_setting::<String>("SomeKey2").unwrap().as_deref(),
        Some("SomeValue2")
    );
}

/// A block failing after one write still gets that write flushed,
/// and exit receives the same failure the block raised
#[test]
fn test_partial_write_flushed_on_failure() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("settings");

    let mut observed = Observed::new(SettingsWriter::new(&store));
    with(Some(&mut observed), |o| {
        o.inner.write("SomeKey1", "SomeValue1")?;
        Err(ContextError::block("disk quota reached"))
    });

    assert_eq!(observed.entered, 1);
    assert_eq!(
        observed.exits,
        vec![Some(ContextError::block("disk quota reached").to_string())]
    );
    assert_eq!(observed.inner.written(), 1);
    assert!(!observed.inner.is_active());

    let db = sled::open(&store).unwrap();
    assert_eq!(
        db.read_setting::<String>("SomeKey1").unwrap().as_deref(),
        Some("SomeValue1")
    );
    assert!(db.read_setting::<String>("SomeKey2").unwrap().is_none());
}

/// try_scoped hands the block failure back after flushing
#[test]
fn test_try_scoped_returns_block_failure() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("settings");

    let mut writer = SettingsWriter::new(&store);
    let result = (&mut writer).try_scoped(|w| {
        w.write("retries", &3)?;
        Err::<(), _>(ContextError::block("stop"))
    });

    assert!(matches!(result, Err(ContextError::Block(ref msg)) if msg == "stop"));
    assert_eq!(writer.written(), 1);
    let db = sled::open(&store).unwrap();
    assert_eq!(db.read_setting::<u32>("retries").unwrap(), Some(3));
}

/// Values keep their dynamic JSON type
#[test]
fn test_dynamic_values_round_trip_types() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("settings");

    try_with(Some(SettingsWriter::new(&store)), |w| {
        w.write("name", "scoped")?;
        w.write("ratio", &0.5)?;
        w.write("tags", &vec!["a", "b"])?;
        Ok(())
    })
    .unwrap();

    let db = sled::open(&store).unwrap();
    let settings = db.settings().unwrap();
    let keys: Vec<&str> = settings.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["name", "ratio", "tags"]);
    assert_eq!(settings[1].1, serde_json::json!(0.5));
    assert_eq!(settings[2].1, serde_json::json!(["a", "b"]));
}

/// A store path that cannot be opened fails at enter; the block never runs
#[test]
fn test_enter_failure_skips_block() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("file");
    std::fs::write(&blocker, "not a directory").unwrap();

    let mut observed = Observed::new(SettingsWriter::new(blocker.join("settings")));
    let mut block_ran = false;
    let result = try_with(Some(&mut observed), |_| {
        block_ran = true;
        Ok(())
    });

    assert!(result.is_err());
    assert!(!block_ran);
    assert_eq!(observed.exits.len(), 1);
    assert!(observed.exits[0].is_some());
}
