//! Library dialogue module for handling conversation state with users.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// File extension accepted for uploaded books.
pub const BOOK_EXTENSION: &str = ".pdf";

/// Represents which multi-turn input is currently expected from a chat.
///
/// A new command issued mid-flow silently overwrites the pending state; there
/// is no queueing and no cancellation confirmation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum LibraryDialogueState {
    #[default]
    Start,
    AwaitingSearchKeyword,
    AwaitingUploadFile,
    AwaitingBookMetadata {
        pending_file_name: String,
    },
    AwaitingDeleteTitle,
}

/// Type alias for our library dialogue
pub type LibraryDialogue = Dialogue<LibraryDialogueState, InMemStorage<LibraryDialogueState>>;

/// Parsed `name|author|genre` metadata for a freshly uploaded book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMetadata {
    pub title: String,
    pub author: String,
    pub genre: String,
}

/// Validates the metadata text supplied after a book upload.
///
/// The first field has the book extension stripped to become the catalog
/// title, matching the file naming convention in the books directory.
pub fn parse_book_metadata(input: &str) -> Result<BookMetadata, &'static str> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    let mut fields = trimmed.split('|');
    let (Some(name), Some(author), Some(genre), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err("format");
    };

    let title = strip_book_extension(name.trim());
    let author = author.trim();
    let genre = genre.trim();

    if title.is_empty() || author.is_empty() || genre.is_empty() {
        return Err("empty_field");
    }

    Ok(BookMetadata {
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
    })
}

/// Validates the name of an uploaded document.
pub fn validate_document_name(name: &str) -> Result<(), &'static str> {
    if !name.ends_with(BOOK_EXTENSION) {
        return Err("extension");
    }
    // The name becomes a path component inside the books directory.
    if name.contains('/') || name.contains('\\') {
        return Err("path");
    }
    if name.len() == BOOK_EXTENSION.len() {
        return Err("empty");
    }
    Ok(())
}

/// Strip the accepted book extension from a name, if present.
pub fn strip_book_extension(name: &str) -> &str {
    name.strip_suffix(BOOK_EXTENSION).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_parsing() {
        let meta = parse_book_metadata("Dune|Frank Herbert|Sci-Fi").unwrap();
        assert_eq!(meta.title, "Dune");
        assert_eq!(meta.author, "Frank Herbert");
        assert_eq!(meta.genre, "Sci-Fi");

        // Extension in the name field is stripped to get the title
        let meta = parse_book_metadata("Dune.pdf|Frank Herbert|Sci-Fi").unwrap();
        assert_eq!(meta.title, "Dune");

        assert!(parse_book_metadata("").is_err());
        assert!(parse_book_metadata("just a title").is_err());
        assert!(parse_book_metadata("too|many|fields|here").is_err());
        assert!(parse_book_metadata("a|b").is_err());
        assert!(parse_book_metadata("|author|genre").is_err());
    }

    #[test]
    fn test_document_name_validation() {
        assert!(validate_document_name("book.pdf").is_ok());
        assert_eq!(validate_document_name("notes.txt"), Err("extension"));
        assert_eq!(validate_document_name("../../etc/passwd.pdf"), Err("path"));
        assert_eq!(validate_document_name(".pdf"), Err("empty"));
    }

    #[test]
    fn test_strip_book_extension() {
        assert_eq!(strip_book_extension("book.pdf"), "book");
        assert_eq!(strip_book_extension("book"), "book");
        assert_eq!(strip_book_extension("archive.tar"), "archive.tar");
    }
}
