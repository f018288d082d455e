//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `yunote_core` wiring end to end
//!   without a UI runtime.
//! - Keep output deterministic for quick local sanity checks.

use yunote_core::{AppStore, MemoryStorage, Note, SubTodo, Todo};

fn main() {
    println!("yunote_core version={}", yunote_core::core_version());

    let storage = MemoryStorage::new();
    let mut store = match AppStore::open(storage) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            std::process::exit(1);
        }
    };
    store.load();

    store
        .notes_mut()
        .add(Note::new("smoke note", "created by yunote_cli", "Personal"));

    let todo = Todo::new("smoke task", "Work");
    let todo_id = todo.id.clone();
    store.todos_mut().add(todo);
    store.todos_mut().add_subtask(&todo_id, SubTodo::new("first step"));

    if let Err(err) = store.flush() {
        eprintln!("flush failed: {err}");
        std::process::exit(1);
    }

    println!(
        "notes={} todos={} write_failures={}",
        store.notes().notes().len(),
        store.todos().todos().len(),
        store.write_failures()
    );
}
