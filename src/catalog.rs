//! Book catalog: in-memory records plus the flat-file persistence layer.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Field delimiter in the persisted record file.
pub const RECORD_DELIMITER: char = '|';

/// Custom error types for catalog operations
#[derive(Debug)]
pub enum CatalogError {
    /// Title not present in the catalog
    NotFound(String),
    /// A persisted line did not have exactly three delimited fields
    Malformed { line: usize, content: String },
    /// A field contained the record delimiter
    InvalidField(String),
    /// File I/O failure on load or save
    Io(std::io::Error),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::NotFound(title) => write!(f, "book not found: {title}"),
            CatalogError::Malformed { line, content } => {
                write!(f, "malformed record on line {line}: {content:?}")
            }
            CatalogError::InvalidField(field) => {
                write!(f, "field contains the record delimiter: {field:?}")
            }
            CatalogError::Io(err) => write!(f, "catalog I/O error: {err}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

/// Author and genre of a single book, keyed by title in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub author: String,
    pub genre: String,
}

/// The in-memory book catalog.
///
/// Genres and authors are derived on demand from the record map, so they can
/// never go stale or keep orphaned values after a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    books: BTreeMap<String, BookRecord>,
}

impl Catalog {
    /// Parse the persisted record format: one `title|author|genre` line per book.
    ///
    /// Any line without exactly three fields aborts the whole parse; a partial
    /// catalog is worse than a loud failure here.
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        let mut books = BTreeMap::new();
        for (idx, line) in content.lines().enumerate() {
            // Tolerate CRLF files and stray whitespace around a record
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(RECORD_DELIMITER);
            let (Some(title), Some(author), Some(genre), None) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(CatalogError::Malformed {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            books.insert(
                title.to_string(),
                BookRecord {
                    author: author.to_string(),
                    genre: genre.to_string(),
                },
            );
        }
        Ok(Catalog { books })
    }

    /// Serialize to the persisted record format, one line per book in title order.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (title, record) in &self.books {
            out.push_str(title);
            out.push(RECORD_DELIMITER);
            out.push_str(&record.author);
            out.push(RECORD_DELIMITER);
            out.push_str(&record.genre);
            out.push('\n');
        }
        out
    }

    /// Insert or overwrite the record for `title`.
    pub fn insert(
        &mut self,
        title: &str,
        author: &str,
        genre: &str,
    ) -> Result<(), CatalogError> {
        for field in [title, author, genre] {
            if field.contains(RECORD_DELIMITER) {
                return Err(CatalogError::InvalidField(field.to_string()));
            }
        }
        self.books.insert(
            title.to_string(),
            BookRecord {
                author: author.to_string(),
                genre: genre.to_string(),
            },
        );
        Ok(())
    }

    /// Remove the record for `title`, returning it if present.
    pub fn remove(&mut self, title: &str) -> Option<BookRecord> {
        self.books.remove(title)
    }

    pub fn get(&self, title: &str) -> Option<&BookRecord> {
        self.books.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.books.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Iterate over `(title, record)` pairs in title order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BookRecord)> {
        self.books.iter()
    }

    /// Distinct genres currently referenced by at least one book.
    pub fn genres(&self) -> BTreeSet<&str> {
        self.books.values().map(|r| r.genre.as_str()).collect()
    }

    /// Distinct authors currently referenced by at least one book.
    pub fn authors(&self) -> BTreeSet<&str> {
        self.books.values().map(|r| r.author.as_str()).collect()
    }
}

/// Owner of the shared catalog state.
///
/// All mutation happens under the internal mutex and is written through to
/// disk before the call returns, so memory and file never diverge after a
/// successful `add` or `remove`.
pub struct CatalogStore {
    path: PathBuf,
    catalog: Mutex<Catalog>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: Mutex::new(Catalog::default()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the record file, replacing the in-memory catalog.
    ///
    /// A missing file means an empty library, not an error.
    pub async fn reload(&self) -> Result<Catalog, CatalogError> {
        let catalog = load_from_path(&self.path)?;
        debug!(books = catalog.len(), "Catalog reloaded from file");
        let mut guard = self.catalog.lock().await;
        *guard = catalog.clone();
        Ok(catalog)
    }

    /// Insert or overwrite a record and persist immediately.
    pub async fn add(&self, title: &str, author: &str, genre: &str) -> Result<(), CatalogError> {
        let mut guard = self.catalog.lock().await;
        guard.insert(title, author, genre)?;
        save_to_path(&self.path, &guard)?;
        info!(title, author, genre, "Book added to catalog");
        Ok(())
    }

    /// Remove a record and persist immediately, returning the removed record.
    pub async fn remove(&self, title: &str) -> Result<BookRecord, CatalogError> {
        let mut guard = self.catalog.lock().await;
        let Some(record) = guard.remove(title) else {
            return Err(CatalogError::NotFound(title.to_string()));
        };
        save_to_path(&self.path, &guard)?;
        info!(title, "Book removed from catalog");
        Ok(record)
    }
}

/// Read a catalog from `path`; absent file yields an empty catalog.
pub fn load_from_path(path: &Path) -> Result<Catalog, CatalogError> {
    match fs::read_to_string(path) {
        Ok(content) => Catalog::parse(&content),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "No catalog file found, starting empty");
            Ok(Catalog::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Write the catalog to `path` via a temp file and atomic rename, so a crash
/// mid-write can never leave a truncated catalog behind.
pub fn save_to_path(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut temp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };
    temp.write_all(catalog.serialize().as_bytes())?;
    temp.persist(path).map_err(|e| CatalogError::Io(e.error))?;
    Ok(())
}
