use yunote_core::{AppStore, MemoryStorage, Note, StorageBackend};

fn open_store(storage: MemoryStorage) -> AppStore {
    AppStore::with_namespace(storage, "@test").unwrap()
}

#[test]
fn add_update_delete_replay_yields_expected_collection() {
    let mut store = open_store(MemoryStorage::new());

    let a = Note::new("a", "first", "Personal");
    let b = Note::new("b", "second", "Work");
    let a_id = a.id.clone();
    let b_id = b.id.clone();

    store.notes_mut().add(a);
    store.notes_mut().add(b);

    let mut edited = store.notes().get(&b_id).unwrap().clone();
    edited.content = "second, edited".to_string();
    assert!(store.notes_mut().update(edited));

    assert!(store.notes_mut().delete(&a_id));

    let notes = store.notes().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, b_id);
    assert_eq!(notes[0].content, "second, edited");
}

#[test]
fn update_with_unknown_id_is_a_silent_no_op() {
    let mut store = open_store(MemoryStorage::new());
    store.notes_mut().add(Note::new("kept", "body", "Personal"));

    let stranger = Note::new("stranger", "never stored", "Work");
    assert!(!store.notes_mut().update(stranger));

    assert_eq!(store.notes().notes().len(), 1);
    assert_eq!(store.notes().notes()[0].title, "kept");
}

#[test]
fn update_refreshes_the_edit_timestamp() {
    let mut store = open_store(MemoryStorage::new());
    let note = Note::new("t", "v1", "Personal");
    let id = note.id.clone();
    let created_at = note.created_at;
    store.notes_mut().add(note);

    let mut edited = store.notes().get(&id).unwrap().clone();
    edited.content = "v2".to_string();
    store.notes_mut().update(edited);

    let stored = store.notes().get(&id).unwrap();
    assert!(stored.updated_at > created_at);
    assert_eq!(stored.created_at, created_at);
}

#[test]
fn delete_twice_is_idempotent() {
    let mut store = open_store(MemoryStorage::new());
    let note = Note::new("t", "c", "Personal");
    let id = note.id.clone();
    store.notes_mut().add(note);

    assert!(store.notes_mut().delete(&id));
    assert!(!store.notes_mut().delete(&id));
    assert!(store.notes().notes().is_empty());
}

#[test]
fn custom_category_add_is_idempotent_and_defaults_are_protected() {
    let mut store = open_store(MemoryStorage::new());

    assert!(store.notes_mut().add_custom_category("Fitness"));
    assert!(!store.notes_mut().add_custom_category("Fitness"));
    assert_eq!(store.notes().categories().custom(), ["Fitness"]);

    assert!(!store.notes_mut().add_custom_category("Work"));
    assert!(!store.notes_mut().remove_custom_category("Work"));
    assert_eq!(store.notes().categories().custom(), ["Fitness"]);
}

#[test]
fn removing_a_category_leaves_referencing_notes_untouched() {
    let mut store = open_store(MemoryStorage::new());
    store.notes_mut().add_custom_category("Travel");

    let note = Note::new("trip", "pack bags", "Travel");
    let id = note.id.clone();
    store.notes_mut().add(note);

    assert!(store.notes_mut().remove_custom_category("Travel"));
    // The note keeps the now-dangling category value.
    assert_eq!(store.notes().get(&id).unwrap().category, "Travel");
}

#[test]
fn persisted_blob_tracks_the_final_collection() {
    let storage = MemoryStorage::new();
    let mut store = open_store(storage.clone());

    let a = Note::new("a", "first", "Personal");
    let b = Note::new("b", "second", "Work");
    let a_id = a.id.clone();
    let b_expected = b.clone();

    store.notes_mut().add(a);
    store.notes_mut().add(b);
    store.notes_mut().delete(&a_id);
    store.flush().unwrap();

    let blob = storage.get("@test:notes").unwrap().unwrap();
    assert_eq!(blob, serde_json::to_string(&vec![b_expected]).unwrap());
}

#[test]
fn load_reproduces_the_persisted_collection_field_for_field() {
    let storage = MemoryStorage::new();
    let mut first = open_store(storage.clone());

    let mut note = Note::new("title", "content", "Education");
    note.attachments.push(yunote_core::Attachment::new(
        yunote_core::AttachmentKind::Image,
        "file:///photo.png",
        "photo",
    ));
    let expected = note.clone();
    first.notes_mut().add(note);
    first.notes_mut().add_custom_category("Travel");
    first.flush().unwrap();
    drop(first);

    let mut second = open_store(storage);
    second.load();
    assert_eq!(second.notes().notes(), [expected]);
    assert_eq!(second.notes().categories().custom(), ["Travel"]);
    assert!(second.notes().load_error().is_none());
}

#[test]
fn corrupt_blob_sets_the_error_flag_and_leaves_the_collection_empty() {
    let storage = MemoryStorage::new();
    storage.set("@test:notes", "this is not json").unwrap();

    let mut store = open_store(storage);
    store.load();

    assert!(store.notes().load_error().is_some());
    assert!(store.notes().notes().is_empty());

    // A fresh mutation still works and repairs the blob on the next write.
    store.notes_mut().add(Note::new("t", "c", "Personal"));
    assert_eq!(store.notes().notes().len(), 1);
}
