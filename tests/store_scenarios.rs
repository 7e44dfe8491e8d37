//! Task store integration tests
//!
//! Exercises the store against the real JSON file adapter: restart
//! behaviour, id allocation across deletes, and concurrent creators.

use std::sync::Arc;
use std::thread;

use taskpad::error::Result;
use taskpad::storage::{JsonFileStorage, Persistence};
use taskpad::store::{TaskRecord, TaskStore};
use tempfile::TempDir;

fn record(id: u64, task: &str, done: bool) -> TaskRecord {
    TaskRecord {
        id,
        task: task.to_string(),
        done,
    }
}

/// Integration test: the full create/toggle/delete/restart walkthrough
#[test]
fn test_walkthrough_survives_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("tasks.json");

    {
        let store = TaskStore::open(JsonFileStorage::new(&path));

        let milk = store.create("buy milk")?;
        assert_eq!(milk, record(1, "buy milk", false));

        let dog = store.create("walk dog")?;
        assert_eq!(dog.id, 2);

        store.toggle(1)?;
        assert_eq!(
            store.list()?,
            vec![record(1, "buy milk", true), record(2, "walk dog", false)]
        );

        store.delete(1)?;
        assert_eq!(store.list()?, vec![record(2, "walk dog", false)]);
    }

    // Restart
    let store = TaskStore::open(JsonFileStorage::new(&path));
    assert_eq!(store.list()?, vec![record(2, "walk dog", false)]);

    let next = store.create("feed cat")?;
    assert_eq!(next.id, 3);

    Ok(())
}

/// Integration test: ids strictly increase across interleaved deletes
#[test]
fn test_ids_strictly_increase_with_deletes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskStore::open(JsonFileStorage::new(temp_dir.path().join("tasks.json")));

    let mut last = 0;
    for round in 0..20 {
        let created = store.create(&format!("task {}", round))?;
        assert!(created.id > last, "id {} not greater than {}", created.id, last);
        last = created.id;

        if round % 3 == 0 {
            store.delete(created.id)?;
        }
    }

    Ok(())
}

/// Integration test: a no-op delete leaves the file's content unchanged
#[test]
fn test_missing_delete_does_not_rewrite_snapshot() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("tasks.json");
    let store = TaskStore::open(JsonFileStorage::new(&path));
    store.create("one")?;

    // Replace the file to detect any rewrite
    std::fs::write(&path, b"sentinel")?;

    store.delete(99)?;
    store.toggle(99)?;
    assert_eq!(std::fs::read(&path)?, b"sentinel");

    Ok(())
}

/// Integration test: reloading reproduces the in-memory list exactly
#[test]
fn test_reload_round_trip() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("tasks.json");
    let store = TaskStore::open(JsonFileStorage::new(&path));

    for name in ["a", "b", "c", "d", "e"] {
        store.create(name)?;
    }
    store.toggle(2)?;
    store.delete(3)?;
    store.toggle(5)?;
    store.create("f")?;
    store.delete(1)?;

    let expected = store.list()?;
    let reloaded = JsonFileStorage::new(&path).load()?;
    assert_eq!(reloaded, expected);

    let reopened = TaskStore::open(JsonFileStorage::new(&path));
    assert_eq!(reopened.list()?, expected);
    assert_eq!(reopened.next_id()?, store.next_id()?);

    Ok(())
}

/// Integration test: a corrupt file is treated as a fresh install
#[test]
fn test_corrupt_snapshot_starts_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("tasks.json");
    std::fs::write(&path, "[{\"ID\": 1, \"Task\":")?;

    let store = TaskStore::open(JsonFileStorage::new(&path));
    assert!(store.is_empty()?);
    assert_eq!(store.create("fresh")?.id, 1);

    Ok(())
}

/// Integration test: N concurrent creators produce N distinct contiguous ids
#[test]
fn test_concurrent_creates() -> Result<()> {
    const THREADS: u64 = 32;

    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("tasks.json");
    let store = Arc::new(TaskStore::open(JsonFileStorage::new(&path)));

    let handles: Vec<_> = (0..THREADS)
        .map(|n| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create(&format!("worker {}", n)))
        })
        .collect();

    for handle in handles {
        handle.join().expect("worker panicked")?;
    }

    let list = store.list()?;
    assert_eq!(list.len() as u64, THREADS);

    let mut ids: Vec<u64> = list.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=THREADS).collect::<Vec<_>>());

    let mut names: Vec<&str> = list.iter().map(|r| r.task.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len() as u64, THREADS);

    // The file holds the final committed state
    assert_eq!(JsonFileStorage::new(&path).load()?, list);

    Ok(())
}

/// Integration test: concurrent toggles on one id are applied in a total order
#[test]
fn test_concurrent_toggles_are_serialized() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = Arc::new(TaskStore::open(JsonFileStorage::new(temp_dir.path().join("tasks.json"))));
    store.create("flip me")?;
    store.create("leave me")?;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.toggle(1))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("worker panicked")?);
    }

    // An even number of flips returns to the original value
    let list = store.list()?;
    assert!(!list[0].done);
    assert!(!list[1].done);

    Ok(())
}

/// Integration test: a snapshot whose largest id leaves no room starts empty
#[test]
fn test_max_id_snapshot_starts_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("tasks.json");
    std::fs::write(&path, r#"[{"ID":18446744073709551615,"Task":"x","Done":false}]"#)?;

    let store = TaskStore::open(JsonFileStorage::new(&path));
    assert!(store.is_empty()?);
    assert_eq!(store.create("fresh")?.id, 1);

    Ok(())
}

/// Integration test: zero or duplicate ids on disk are not loaded
#[test]
fn test_inconsistent_snapshot_starts_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("tasks.json");
    std::fs::write(
        &path,
        r#"[{"ID":0,"Task":"z","Done":false},{"ID":2,"Task":"a","Done":false},{"ID":2,"Task":"b","Done":false}]"#,
    )?;

    let store = TaskStore::open(JsonFileStorage::new(&path));
    assert!(!store.toggle(2)?);
    assert!(store.is_empty()?);

    // The next commit replaces the bad file with a consistent snapshot
    store.create("fresh")?;
    assert_eq!(JsonFileStorage::new(&path).load()?, vec![record(1, "fresh", false)]);

    Ok(())
}
