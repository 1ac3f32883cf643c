use std::fs;

use rentbook_core::storage::BookStorage;
use rentbook_domain::{Book, Owner, Property};
use rentbook_storage_json::{JsonBookStorage, StoragePaths};
use tempfile::tempdir;

fn sample_book() -> Book {
    let mut book = Book::new("Harbour Flats");
    let owner_id = book.add_owner(Owner::new("Alice"));
    book.add_property(Property::new(owner_id, "Flat 1", "1 Harbour Rd"));
    book
}

#[test]
fn saves_and_loads_a_book() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(StoragePaths {
        book_root: dir.path().join("books"),
        backup_root: dir.path().join("backups"),
    })
    .expect("create storage");

    let book = sample_book();
    storage.save_book("harbour", &book).expect("save book");
    let loaded = storage.load_book("harbour").expect("load book");

    assert_eq!(loaded.name, "Harbour Flats");
    assert_eq!(loaded.properties.len(), 1);
    let path = storage.book_path("harbour");
    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("json"));
    assert!(path.exists());
}

#[test]
fn lists_books_sorted_by_slug() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(StoragePaths {
        book_root: dir.path().join("books"),
        backup_root: dir.path().join("backups"),
    })
    .expect("create storage");

    let book = sample_book();
    storage.save_book("Zeta Book", &book).expect("save");
    storage.save_book("Alpha Book", &book).expect("save");

    let names = storage.list_books().expect("list");
    assert_eq!(names, vec!["alpha_book", "zeta_book"]);
}

#[test]
fn creates_and_restores_backups() {
    let dir = tempdir().expect("tempdir");
    let backup_root = dir.path().join("backups");
    let storage = JsonBookStorage::new(StoragePaths {
        book_root: dir.path().join("books"),
        backup_root: backup_root.clone(),
    })
    .expect("create storage");

    let book = sample_book();
    storage.save_book("harbour", &book).expect("save book");
    let info = storage
        .backup_book("harbour", &book, Some("before import"))
        .expect("create backup");

    assert!(info.id.contains("before-import"));
    assert!(info.path.starts_with(backup_root.join("harbour")));

    let backups = storage.list_backups("harbour").expect("list backups");
    assert!(backups.iter().any(|entry| entry.id == info.id));

    let restored = storage.restore_backup(&info).expect("restore backup");
    assert_eq!(restored.name, book.name);
}

#[test]
fn overwriting_a_book_backs_up_the_previous_file() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(StoragePaths {
        book_root: dir.path().join("books"),
        backup_root: dir.path().join("backups"),
    })
    .expect("create storage");

    let mut book = sample_book();
    storage.save_book("harbour", &book).expect("first save");
    book.name = "Harbour Flats v2".into();
    storage.save_book("harbour", &book).expect("second save");

    let backups = storage.list_backups("harbour").expect("list backups");
    assert_eq!(backups.len(), 1);
    let loaded = storage.load_book("harbour").expect("load");
    assert_eq!(loaded.name, "Harbour Flats v2");
}

#[test]
fn prunes_backups_beyond_retention() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::with_retention(
        StoragePaths {
            book_root: dir.path().join("books"),
            backup_root: dir.path().join("backups"),
        },
        2,
    )
    .expect("create storage");

    let book = sample_book();
    // Same-minute timestamps need distinct notes to produce distinct files.
    for note in ["one", "two", "three", "four"] {
        storage
            .backup_book("harbour", &book, Some(note))
            .expect("create backup");
    }

    let backups = storage.list_backups("harbour").expect("list backups");
    assert!(backups.len() <= 2, "retention should cap backups at 2");
}

#[test]
fn book_metadata_counts_entities() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(StoragePaths {
        book_root: dir.path().join("books"),
        backup_root: dir.path().join("backups"),
    })
    .expect("create storage");

    storage
        .save_book("harbour", &sample_book())
        .expect("save book");

    let rows = storage.list_book_metadata().expect("metadata");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Harbour Flats");
    assert_eq!(rows[0].owner_count, 1);
    assert_eq!(rows[0].property_count, 1);
    assert_eq!(rows[0].payment_count, 0);
}

#[test]
fn delete_book_removes_the_file() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(StoragePaths {
        book_root: dir.path().join("books"),
        backup_root: dir.path().join("backups"),
    })
    .expect("create storage");

    storage
        .save_book("harbour", &sample_book())
        .expect("save book");
    storage.delete_book("harbour").expect("delete");
    assert!(!storage.book_path("harbour").exists());
    assert!(storage.list_books().expect("list").is_empty());
}

#[test]
fn loads_books_written_by_hand() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonBookStorage::new(StoragePaths {
        book_root: dir.path().join("books"),
        backup_root: dir.path().join("backups"),
    })
    .expect("create storage");

    let book = sample_book();
    let path = storage.book_path("manual");
    fs::write(&path, serde_json::to_string(&book).expect("serialize")).expect("write");

    let loaded = storage.load_book("manual").expect("load");
    assert_eq!(loaded.name, book.name);
}
