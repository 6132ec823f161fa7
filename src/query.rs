//! Pure query functions over a loaded catalog.

use crate::catalog::Catalog;

/// Titles whose genre exactly equals `genre`.
pub fn filter_by_genre(catalog: &Catalog, genre: &str) -> Vec<String> {
    catalog
        .iter()
        .filter(|(_, record)| record.genre == genre)
        .map(|(title, _)| title.clone())
        .collect()
}

/// Titles whose author exactly equals `author`.
pub fn filter_by_author(catalog: &Catalog, author: &str) -> Vec<String> {
    catalog
        .iter()
        .filter(|(_, record)| record.author == author)
        .map(|(title, _)| title.clone())
        .collect()
}

/// Titles where `keyword` is a case-insensitive substring of the title,
/// author, or genre. An empty result is a valid outcome, not an error.
pub fn search_keyword(catalog: &Catalog, keyword: &str) -> Vec<String> {
    let keyword = keyword.to_lowercase();
    catalog
        .iter()
        .filter(|(title, record)| {
            title.to_lowercase().contains(&keyword)
                || record.author.to_lowercase().contains(&keyword)
                || record.genre.to_lowercase().contains(&keyword)
        })
        .map(|(title, _)| title.clone())
        .collect()
}
