use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// User-configurable preferences and session metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Months of lookahead used by the default upcoming-fees projection.
    #[serde(default = "Config::default_horizon_months_value")]
    pub default_horizon_months: u32,
    /// Days ahead a pending payment counts as "due soon".
    #[serde(default = "Config::default_upcoming_window_days_value")]
    pub upcoming_window_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_book: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for books. Defaults to `~/Documents/Rentbook/books`.
    pub default_book_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root directory for backups. Defaults to `~/Documents/Rentbook/backups`.
    pub default_backup_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "EUR".into(),
            default_horizon_months: Self::default_horizon_months_value(),
            upcoming_window_days: Self::default_upcoming_window_days_value(),
            last_opened_book: None,
            default_book_root: None,
            default_backup_root: None,
        }
    }
}

impl Config {
    pub fn default_horizon_months_value() -> u32 {
        3
    }

    pub fn default_upcoming_window_days_value() -> i64 {
        14
    }

    pub fn resolve_default_book_root(&self) -> PathBuf {
        if let Some(path) = &self.default_book_root {
            return path.clone();
        }
        Self::documents_base().join("Rentbook").join("books")
    }

    pub fn resolve_default_backup_root(&self) -> PathBuf {
        if let Some(path) = &self.default_backup_root {
            return path.clone();
        }
        Self::documents_base().join("Rentbook").join("backups")
    }

    fn documents_base() -> PathBuf {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
