use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use tracing::warn;

use rentbook_domain::Book;

use crate::CoreError;

/// Describes a persisted backup artifact for a book.
#[derive(Debug, Clone)]
pub struct BookBackupInfo {
    pub book: String,
    pub id: String,
    pub created_at: String,
    pub path: PathBuf,
}

/// Abstraction over persistence backends capable of storing books and
/// backups.
pub trait BookStorage: Send + Sync {
    fn save_book(&self, name: &str, book: &Book) -> Result<(), CoreError>;
    fn load_book(&self, name: &str) -> Result<Book, CoreError>;
    fn list_books(&self) -> Result<Vec<String>, CoreError>;
    fn delete_book(&self, name: &str) -> Result<(), CoreError>;
    fn save_book_to_path(&self, book: &Book, path: &Path) -> Result<(), CoreError>;
    fn load_book_from_path(&self, path: &Path) -> Result<Book, CoreError>;
    fn backup_book(
        &self,
        name: &str,
        book: &Book,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError>;
    fn list_backups(&self, name: &str) -> Result<Vec<BookBackupInfo>, CoreError>;
    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<Book, CoreError>;
}

/// Detects dangling references within a book snapshot, typically after a
/// file was edited or restored by hand. Emits a warning per anomaly and
/// returns them for display.
pub fn book_warnings(book: &Book) -> Vec<String> {
    let owner_ids: HashSet<_> = book.owners.iter().map(|o| o.id).collect();
    let property_ids: HashSet<_> = book.properties.iter().map(|p| p.id).collect();
    let tenant_ids: HashSet<_> = book.tenants.iter().map(|t| t.id).collect();
    let fee_ids: HashSet<_> = book.fee_definitions.iter().map(|f| f.id).collect();
    let mut warnings = Vec::new();

    for property in &book.properties {
        if !owner_ids.contains(&property.owner_id) {
            warnings.push(format!(
                "property {} references unknown owner {}",
                property.id, property.owner_id
            ));
        }
    }
    for fee in &book.fee_definitions {
        if !property_ids.contains(&fee.property_id) {
            warnings.push(format!(
                "fee definition {} references unknown property {}",
                fee.id, fee.property_id
            ));
        }
    }
    for rental in &book.rentals {
        if !property_ids.contains(&rental.property_id) {
            warnings.push(format!(
                "rental {} references unknown property {}",
                rental.id, rental.property_id
            ));
        }
        if !tenant_ids.contains(&rental.tenant_id) {
            warnings.push(format!(
                "rental {} references unknown tenant {}",
                rental.id, rental.tenant_id
            ));
        }
    }
    for payment in &book.payments {
        if !property_ids.contains(&payment.property_id) {
            warnings.push(format!(
                "payment {} references unknown property {}",
                payment.id, payment.property_id
            ));
        }
        if let Some(fee_id) = payment.fee_definition_id {
            if !fee_ids.contains(&fee_id) {
                warnings.push(format!(
                    "payment {} references missing fee definition {}",
                    payment.id, fee_id
                ));
            }
        }
    }

    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings
}
