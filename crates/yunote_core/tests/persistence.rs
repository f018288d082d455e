use yunote_core::{
    AppStore, EntityCollection, MemoryStorage, Note, PersistQueue, SqliteStorage, StorageBackend,
};

#[test]
fn sqlite_backend_get_set_overwrite_remove() {
    let storage = SqliteStorage::open_in_memory().unwrap();

    assert_eq!(storage.get("k").unwrap(), None);

    storage.set("k", "[1]").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1]"));

    storage.set("k", "[1,2]").unwrap();
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1,2]"));

    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
    // Removing an absent key is not an error.
    storage.remove("k").unwrap();
}

#[test]
fn store_state_survives_reopening_a_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("yunote.db");

    let note = Note::new("durable", "still here", "Personal");
    let expected = note.clone();
    {
        let storage = SqliteStorage::open(&db_path).unwrap();
        let mut store = AppStore::open(storage).unwrap();
        store.notes_mut().add(note);
        store.flush().unwrap();
    }

    let storage = SqliteStorage::open(&db_path).unwrap();
    let mut store = AppStore::open(storage).unwrap();
    store.load();
    assert_eq!(store.notes().notes(), [expected]);
}

#[test]
fn rapid_writes_coalesce_to_the_final_state() {
    let storage = MemoryStorage::new();
    let queue = PersistQueue::spawn(storage.clone()).unwrap();
    let handle = queue.handle();

    for i in 0..100 {
        handle.write("k", format!("[{i}]"));
    }
    queue.flush().unwrap();

    assert_eq!(storage.get("k").unwrap().as_deref(), Some("[99]"));
    assert_eq!(queue.write_failures(), 0);
}

#[test]
fn reads_observe_all_earlier_writes() {
    let storage = MemoryStorage::new();
    let queue = PersistQueue::spawn(storage).unwrap();
    let handle = queue.handle();

    handle.write("k", "[1]".to_string());
    handle.write("k", "[2]".to_string());
    // No flush: the read itself must be serialized behind the writes.
    assert_eq!(handle.read("k").unwrap().as_deref(), Some("[2]"));
}

#[test]
fn dropping_the_queue_flushes_queued_writes() {
    let storage = MemoryStorage::new();
    {
        let queue = PersistQueue::spawn(storage.clone()).unwrap();
        queue.handle().write("k", "[7]".to_string());
    }
    assert_eq!(storage.get("k").unwrap().as_deref(), Some("[7]"));
}

#[test]
fn write_failure_leaves_memory_authoritative_and_is_counted() {
    let storage = MemoryStorage::new();
    let mut store = AppStore::with_namespace(storage.clone(), "@test").unwrap();

    let healthy = Note::new("saved", "before outage", "Personal");
    store.notes_mut().add(healthy);
    store.flush().unwrap();
    assert_eq!(store.write_failures(), 0);

    storage.set_fail_writes(true);
    store.notes_mut().add(Note::new("lost", "during outage", "Work"));
    store.flush().unwrap();

    // In-memory has both notes; the persisted blob still has one.
    assert_eq!(store.notes().notes().len(), 2);
    assert!(store.write_failures() > 0);
    let blob = storage.get("@test:notes").unwrap().unwrap();
    let persisted: Vec<Note> = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted.len(), 1);

    // The next successful write converges persisted state again.
    storage.set_fail_writes(false);
    store.notes_mut().add(Note::new("recovered", "after outage", "Other"));
    store.flush().unwrap();
    let blob = storage.get("@test:notes").unwrap().unwrap();
    let persisted: Vec<Note> = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted.len(), 3);
}

#[test]
fn generic_collection_replace_all_persists_the_new_state() {
    let storage = MemoryStorage::new();
    let queue = PersistQueue::spawn(storage.clone()).unwrap();
    let mut collection: EntityCollection<Note> =
        EntityCollection::new("@test:scratch", queue.handle());

    collection.add(Note::new("old", "gone after replace", "Personal"));
    let replacement = vec![
        Note::new("a", "one", "Work"),
        Note::new("b", "two", "Other"),
    ];
    collection.replace_all(replacement.clone());
    queue.flush().unwrap();

    assert_eq!(collection.items(), replacement.as_slice());
    assert_eq!(collection.len(), 2);
    let blob = storage.get("@test:scratch").unwrap().unwrap();
    assert_eq!(blob, serde_json::to_string(&replacement).unwrap());
}

#[test]
fn note_and_todo_blobs_live_under_separate_keys() {
    let storage = MemoryStorage::new();
    let mut store = AppStore::with_namespace(storage.clone(), "@test").unwrap();

    store.notes_mut().add(Note::new("n", "c", "Personal"));
    store.notes_mut().add_custom_category("Travel");
    store.todos_mut().add_custom_category("Errands");
    store.flush().unwrap();

    assert!(storage.get("@test:notes").unwrap().is_some());
    assert_eq!(
        storage.get("@test:noteCustomCategories").unwrap().as_deref(),
        Some("[\"Travel\"]")
    );
    assert_eq!(
        storage.get("@test:todoCustomCategories").unwrap().as_deref(),
        Some("[\"Errands\"]")
    );
}
