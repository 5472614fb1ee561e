use tempfile::tempdir;
use waterlog::{
    core::UserManager,
    journal::{Entry, User},
    storage::{JsonStorage, StorageBackend},
};

#[test]
fn user_file_roundtrip_preserves_insertion_order() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();

    let mut user = User::new();
    let first = user.push_entry(Entry::new(8.0, None));
    let second = user.push_entry(Entry::new(17.0, None));
    storage.save(&user).expect("save user");

    let loaded = storage.load_user().expect("load").expect("user present");
    assert_eq!(loaded.entries.len(), 2);
    assert_eq!(loaded.entries[0].id, first);
    assert_eq!(loaded.entries[1].id, second);
    // The rebuilt index answers id lookups after the reload.
    assert!(loaded.contains(second));
}

#[test]
fn at_most_one_user_record_exists() {
    let temp = tempdir().unwrap();
    let mut manager = UserManager::new(Box::new(
        JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap(),
    ));
    let id = manager.user().expect("user").id;

    // A fresh manager over the same directory adopts the existing record
    // instead of creating a second one.
    let mut other = UserManager::new(Box::new(
        JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap(),
    ));
    other.add_entry(8.0, None).expect("add entry");
    assert_eq!(other.user().expect("user").id, id);
}

#[test]
fn every_overwrite_leaves_a_backup() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(5)).unwrap();

    let mut user = User::new();
    storage.save(&user).expect("initial save");
    assert!(storage.list_backups().expect("list").is_empty());

    user.push_entry(Entry::new(8.0, None));
    storage.save(&user).expect("second save");
    let backups = storage.list_backups().expect("list");
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("user_"));
    assert!(backups[0].ends_with(".json"));
}
