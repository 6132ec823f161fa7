use bookshelf::localization::{init_localization, t_args_lang, t_lang};

fn setup_localization() {
    let _ = init_localization();
}

/// All keys used by the handlers must resolve to real messages
#[test]
fn test_handler_keys_resolve() {
    setup_localization();

    let keys = [
        "welcome-message",
        "menu-prompt",
        "menu-genres",
        "menu-authors",
        "genres-list",
        "authors-list",
        "genres-empty",
        "authors-empty",
        "filter-genre",
        "filter-author",
        "book-unavailable",
        "search-prompt",
        "search-results",
        "search-empty",
        "help-message",
        "help-admin",
        "add-prompt-file",
        "add-not-document",
        "add-bad-extension",
        "add-download-failed",
        "add-prompt-metadata",
        "add-bad-metadata",
        "delete-prompt",
        "delete-not-found",
        "permission-denied",
        "error-persistence",
        "error-catalog-load",
        "usage-hint",
    ];

    for key in keys {
        let message = t_lang(key, None);
        assert!(
            !message.starts_with("Missing translation"),
            "key {key} did not resolve: {message}"
        );
        assert!(!message.is_empty(), "key {key} resolved to empty text");
    }
}

/// Arguments are interpolated into confirmation messages
#[test]
fn test_argument_interpolation() {
    setup_localization();

    let message = t_args_lang(
        "add-complete",
        &[("title", "Dune"), ("author", "Frank Herbert"), ("genre", "Sci-Fi")],
        None,
    );
    assert!(message.contains("Dune"));
    assert!(message.contains("Frank Herbert"));
    assert!(message.contains("Sci-Fi"));

    let message = t_args_lang(
        "delete-complete",
        &[
            ("title", "Dune"),
            ("author", "Frank Herbert"),
            ("genre", "Sci-Fi"),
        ],
        None,
    );
    assert!(message.contains("Dune"));
    assert!(message.contains("Sci-Fi"));
    assert!(message.contains("deleted"));
}

/// Unknown languages fall back to the default locale
#[test]
fn test_unknown_language_falls_back() {
    setup_localization();

    let fallback = t_lang("welcome-message", Some("zz"));
    let default = t_lang("welcome-message", None);
    assert_eq!(fallback, default);
}

/// Unknown keys are reported, not panicked on
#[test]
fn test_missing_key_is_reported() {
    setup_localization();

    let message = t_lang("no-such-key", None);
    assert!(message.contains("no-such-key"));
}
