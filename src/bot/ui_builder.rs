//! UI Builder module for creating keyboards and formatting callback payloads

use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
};

use crate::dialogue::BOOK_EXTENSION;
use crate::localization::t_lang;

// Callback payload markers for the browse surface
pub const GENRES_PAYLOAD: &str = "genres";
pub const AUTHORS_PAYLOAD: &str = "authors";
pub const GENRE_PREFIX: &str = "genre_";
pub const AUTHOR_PREFIX: &str = "author_";

/// Which facet a browse callback refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseFacet {
    Genre,
    Author,
}

impl BrowseFacet {
    /// Localization key for the facet name used in result messages.
    pub fn message_key(self) -> &'static str {
        match self {
            BrowseFacet::Genre => "filter-genre",
            BrowseFacet::Author => "filter-author",
        }
    }
}

/// Parse a `genre_<value>` / `author_<value>` callback payload.
pub fn parse_facet_payload(data: &str) -> Option<(BrowseFacet, &str)> {
    if let Some(value) = data.strip_prefix(GENRE_PREFIX) {
        Some((BrowseFacet::Genre, value))
    } else if let Some(value) = data.strip_prefix(AUTHOR_PREFIX) {
        Some((BrowseFacet::Author, value))
    } else {
        None
    }
}

/// Book-download payloads carry the stored file name.
pub fn is_book_payload(data: &str) -> bool {
    data.ends_with(BOOK_EXTENSION) && data.len() > BOOK_EXTENSION.len()
}

/// File name stored in the books directory for a catalog title.
pub fn book_file_name(title: &str) -> String {
    format!("{title}{BOOK_EXTENSION}")
}

/// Reply keyboard offered on /start; admin commands only for the admin.
pub fn create_main_keyboard(is_admin: bool) -> KeyboardMarkup {
    let mut rows = vec![
        vec![KeyboardButton::new("/menu")],
        vec![KeyboardButton::new("/search")],
        vec![KeyboardButton::new("/help")],
    ];

    if is_admin {
        rows.push(vec![KeyboardButton::new("/add")]);
        rows.push(vec![KeyboardButton::new("/delete")]);
    }

    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Inline keyboard for the /menu command: browse by genre or by author.
pub fn create_menu_keyboard(language_code: Option<&str>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            t_lang("menu-genres", language_code),
            GENRES_PAYLOAD,
        )],
        vec![InlineKeyboardButton::callback(
            t_lang("menu-authors", language_code),
            AUTHORS_PAYLOAD,
        )],
    ])
}

/// One button per facet value, payload `<prefix><value>`.
pub fn create_facet_keyboard<'a>(
    values: impl IntoIterator<Item = &'a str>,
    prefix: &str,
) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = values
        .into_iter()
        .map(|value| {
            vec![InlineKeyboardButton::callback(
                value,
                format!("{prefix}{value}"),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

/// One button per matching title, payload `<title>.pdf` for the download step.
pub fn create_book_list_keyboard(titles: &[String]) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = titles
        .iter()
        .map(|title| {
            vec![InlineKeyboardButton::callback(
                title.clone(),
                book_file_name(title),
            )]
        })
        .collect();

    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_payload_round_trip() {
        assert_eq!(
            parse_facet_payload("genre_Sci-Fi"),
            Some((BrowseFacet::Genre, "Sci-Fi"))
        );
        assert_eq!(
            parse_facet_payload("author_Mary Beard"),
            Some((BrowseFacet::Author, "Mary Beard"))
        );
        assert_eq!(parse_facet_payload("genres"), None);
        assert_eq!(parse_facet_payload("Dune.pdf"), None);
    }

    #[test]
    fn test_book_payload_detection() {
        assert!(is_book_payload("Dune.pdf"));
        assert!(!is_book_payload(".pdf"));
        assert!(!is_book_payload("genres"));
        assert!(!is_book_payload("genre_Sci-Fi"));
    }

    #[test]
    fn test_book_file_name() {
        assert_eq!(book_file_name("Dune"), "Dune.pdf");
    }
}
