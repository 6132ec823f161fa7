use bookshelf::catalog::Catalog;
use bookshelf::query::{filter_by_author, filter_by_genre, search_keyword};

fn library() -> Catalog {
    let mut catalog = Catalog::default();
    catalog.insert("Dune", "Frank Herbert", "Sci-Fi").unwrap();
    catalog
        .insert("Hyperion", "Dan Simmons", "Sci-Fi")
        .unwrap();
    catalog.insert("SPQR", "Mary Beard", "History").unwrap();
    catalog.insert("Ariel", "Sylvia Plath", "Poetry").unwrap();
    catalog
}

/// Filters assert membership only; the catalog does not promise an order.
#[test]
fn test_filter_by_genre_membership() {
    let catalog = library();

    let scifi = filter_by_genre(&catalog, "Sci-Fi");
    assert_eq!(scifi.len(), 2);
    assert!(scifi.contains(&"Dune".to_string()));
    assert!(scifi.contains(&"Hyperion".to_string()));

    assert_eq!(filter_by_genre(&catalog, "Poetry"), vec!["Ariel"]);
    assert!(filter_by_genre(&catalog, "Cooking").is_empty());
}

#[test]
fn test_filter_by_author_is_exact() {
    let catalog = library();

    assert_eq!(filter_by_author(&catalog, "Mary Beard"), vec!["SPQR"]);
    assert!(filter_by_author(&catalog, "mary beard").is_empty());
    assert!(filter_by_author(&catalog, "Beard").is_empty());
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let catalog = library();

    // "hist" matches the History genre regardless of case
    assert_eq!(search_keyword(&catalog, "hist"), vec!["SPQR"]);
    assert_eq!(search_keyword(&catalog, "HIST"), vec!["SPQR"]);

    // Substring of a title
    assert_eq!(search_keyword(&catalog, "yper"), vec!["Hyperion"]);

    // Substring of an author
    assert_eq!(search_keyword(&catalog, "plath"), vec!["Ariel"]);
}

#[test]
fn test_search_across_all_fields() {
    let catalog = library();

    let scifi = search_keyword(&catalog, "sci-fi");
    assert_eq!(scifi.len(), 2);
    assert!(scifi.contains(&"Dune".to_string()));
    assert!(scifi.contains(&"Hyperion".to_string()));
}

#[test]
fn test_search_no_matches_is_empty_not_error() {
    let catalog = library();
    assert!(search_keyword(&catalog, "gardening").is_empty());

    let empty = Catalog::default();
    assert!(search_keyword(&empty, "anything").is_empty());
}
