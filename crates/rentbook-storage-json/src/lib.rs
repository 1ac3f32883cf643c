//! Filesystem-backed JSON persistence for books and their backups.
//!
//! Books live as one pretty-printed JSON document per book under the book
//! root; backups are timestamped copies under a per-book directory in the
//! backup root, pruned to a fixed retention count.

use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use rentbook_core::{
    storage::{BookBackupInfo, BookStorage},
    CoreError,
};
use rentbook_domain::Book;

const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const DEFAULT_RETENTION: usize = 5;

/// Root directories the storage writes under.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub book_root: PathBuf,
    pub backup_root: PathBuf,
}

#[derive(Clone)]
pub struct JsonBookStorage {
    paths: StoragePaths,
    retention: usize,
}

impl JsonBookStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.book_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            paths,
            retention: retention.max(1),
        })
    }

    /// Canonical on-disk location for a book name.
    pub fn book_path(&self, name: &str) -> PathBuf {
        self.paths
            .book_root
            .join(format!("{}.{}", canonical_name(name), FILE_EXTENSION))
    }

    pub fn backup_path(&self, name: &str, backup_id: &str) -> PathBuf {
        self.backup_dir(name).join(backup_id)
    }

    /// Loads every stored book and reports a summary row per book, sorted
    /// by display name.
    pub fn list_book_metadata(&self) -> Result<Vec<BookMetadata>, CoreError> {
        let mut entries = Vec::new();
        for slug in self.list_books()? {
            let book = self.load_book(&slug)?;
            entries.push(BookMetadata {
                slug: slug.clone(),
                name: book.name.clone(),
                path: self.book_path(&slug),
                created_at: book.created_at,
                updated_at: book.updated_at,
                owner_count: book.owners.len(),
                property_count: book.properties.len(),
                tenant_count: book.tenants.len(),
                rental_count: book.rentals.len(),
                fee_definition_count: book.fee_definitions.len(),
                payment_count: book.payments.len(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    pub fn list_backup_metadata(&self, name: &str) -> Result<Vec<BackupMetadata>, CoreError> {
        let mut rows = Vec::new();
        for entry in self.list_backups(name)? {
            let size_bytes = fs::metadata(&entry.path)
                .map(|meta| meta.len())
                .unwrap_or(0);
            rows.push(BackupMetadata {
                name: entry.id.clone(),
                created_at: parse_backup_timestamp(&entry.id),
                size_bytes,
                path: entry.path.clone(),
            });
        }
        rows.sort_by_key(|meta| Reverse(meta.created_at));
        Ok(rows)
    }

    pub fn delete_backup(&self, name: &str, backup_id: &str) -> Result<(), CoreError> {
        let path = self.backup_path(name, backup_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.paths.backup_root.join(canonical_name(name))
    }

    fn write_backup_file(
        &self,
        book: &Book,
        name: &str,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", canonical_name(name), timestamp);
        if let Some(label) = note.and_then(note_slug) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = format!("{}.{}", stem, FILE_EXTENSION);
        let path = dir.join(&file_name);
        write_json(&path, &serialize_book(book)?)?;
        self.prune_backups(name)?;
        Ok(BookBackupInfo {
            book: canonical_name(name),
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    /// Copies the current on-disk file into the backup directory before it
    /// gets overwritten or replaced.
    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let file_name = format!("{}_{}.{}", canonical_name(name), timestamp, FILE_EXTENSION);
        fs::copy(path, dir.join(&file_name))?;
        self.prune_backups(name)?;
        Ok(())
    }

    fn prune_backups(&self, name: &str) -> Result<(), CoreError> {
        let mut entries = self.list_backups(name)?;
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl BookStorage for JsonBookStorage {
    fn save_book(&self, name: &str, book: &Book) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        write_book_to_path(book, &path)
    }

    fn load_book(&self, name: &str) -> Result<Book, CoreError> {
        read_book_from_path(&self.book_path(name))
    }

    fn list_books(&self) -> Result<Vec<String>, CoreError> {
        if !self.paths.book_root.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.paths.book_root)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_book(&self, name: &str) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn save_book_to_path(&self, book: &Book, path: &Path) -> Result<(), CoreError> {
        if path.starts_with(&self.paths.book_root) {
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                self.backup_existing_file(stem, path)?;
            }
        }
        write_book_to_path(book, path)
    }

    fn load_book_from_path(&self, path: &Path) -> Result<Book, CoreError> {
        read_book_from_path(path)
    }

    fn backup_book(
        &self,
        name: &str,
        book: &Book,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        self.write_backup_file(book, name, note)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<BookBackupInfo>, CoreError> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let slug = canonical_name(name);
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BookBackupInfo {
                    book: slug.clone(),
                    id: file_name.to_string(),
                    created_at: file_name.to_string(),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        Ok(entries)
    }

    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<Book, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let target = self.book_path(&backup.book);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&backup.path, &target)?;
        read_book_from_path(&target)
    }
}

/// Saves a book to an arbitrary path on disk.
pub fn write_book_to_path(book: &Book, path: &Path) -> Result<(), CoreError> {
    write_json(path, &serialize_book(book)?)
}

/// Loads a book from the provided filesystem path.
pub fn read_book_from_path(path: &Path) -> Result<Book, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Summary row for one stored book file.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub slug: String,
    pub name: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner_count: usize,
    pub property_count: usize,
    pub tenant_count: usize,
    pub rental_count: usize,
    pub fee_definition_count: usize,
    pub payment_count: usize,
}

#[derive(Debug, Clone)]
pub struct BackupMetadata {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub size_bytes: u64,
    pub path: PathBuf,
}

/// Lowercase slug used for filenames. Anything outside `[a-z0-9]` collapses
/// to underscores; a name with no usable characters falls back to "book".
fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "book".into()
    } else {
        sanitized
    }
}

/// Reduces a free-form backup note to a dash-separated slug usable in a
/// file name.
fn note_slug(note: &str) -> Option<String> {
    let mapped: String = note
        .to_ascii_lowercase()
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { ' ' })
        .collect();
    let slug = mapped.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Recovers the creation time from a backup file name of the form
/// `<slug>_<date>_<time>[_<note>].json`. The slug itself may contain
/// underscores, so the name is scanned for the date/time pair.
fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", FILE_EXTENSION))?;
    let segments: Vec<&str> = stem.split('_').collect();
    segments
        .windows(2)
        .rev()
        .find_map(|pair| {
            let (date, time) = (pair[0], pair[1]);
            if date.len() == 8
                && time.len() == 4
                && date.bytes().chain(time.bytes()).all(|b| b.is_ascii_digit())
            {
                NaiveDateTime::parse_from_str(&format!("{}{}", date, time), "%Y%m%d%H%M").ok()
            } else {
                None
            }
        })
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Writes through a sibling tmp file and renames it into place, so a failed
/// write never truncates the previous file.
fn write_json(path: &Path, json: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension(format!("{}.tmp", FILE_EXTENSION));
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn serialize_book(book: &Book) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}
