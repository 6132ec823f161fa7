//! # Bot Configuration Module
//!
//! Runtime configuration for the library bot, loaded from the environment.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use teloxide::types::UserId;

// Defaults for optional settings
pub const DEFAULT_CATALOG_PATH: &str = "book_info.txt";
pub const DEFAULT_BOOKS_DIR: &str = "books";

/// Configuration for the library bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// The single operator allowed to add or delete books
    pub admin_id: UserId,
    /// Path of the flat record file holding the catalog
    pub catalog_path: PathBuf,
    /// Directory holding the book files, keyed by `<title>.pdf`
    pub books_dir: PathBuf,
}

impl BotConfig {
    /// Load configuration from the environment.
    ///
    /// `ADMIN_USER_ID` is required; `CATALOG_PATH` and `BOOKS_DIR` fall back
    /// to defaults next to the working directory.
    pub fn from_env() -> Result<Self> {
        let admin_id = env::var("ADMIN_USER_ID")
            .context("ADMIN_USER_ID must be set")?
            .parse::<u64>()
            .context("ADMIN_USER_ID must be a numeric Telegram user id")?;

        let catalog_path = env::var("CATALOG_PATH")
            .unwrap_or_else(|_| DEFAULT_CATALOG_PATH.to_string())
            .into();

        let books_dir = env::var("BOOKS_DIR")
            .unwrap_or_else(|_| DEFAULT_BOOKS_DIR.to_string())
            .into();

        Ok(Self {
            admin_id: UserId(admin_id),
            catalog_path,
            books_dir,
        })
    }

    /// Path of the stored file for a catalog title.
    pub fn book_path(&self, file_name: &str) -> PathBuf {
        self.books_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_path_joins_books_dir() {
        let config = BotConfig {
            admin_id: UserId(1),
            catalog_path: PathBuf::from("book_info.txt"),
            books_dir: PathBuf::from("books"),
        };
        assert_eq!(config.book_path("Dune.pdf"), PathBuf::from("books/Dune.pdf"));
    }
}
