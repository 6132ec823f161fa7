use bookshelf::bot::message_handler::{command_dialogue_state, fallback_message_key, Command};
use bookshelf::bot::ui_builder::{
    book_file_name, create_book_list_keyboard, create_facet_keyboard, create_main_keyboard,
    is_book_payload, parse_facet_payload, BrowseFacet, AUTHOR_PREFIX, GENRE_PREFIX,
};
use bookshelf::dialogue::LibraryDialogueState;

#[cfg(test)]
mod tests {
    use super::*;

    /// Browse callbacks round-trip through the payload helpers
    #[test]
    fn test_facet_payload_parsing() {
        assert_eq!(
            parse_facet_payload("genre_History"),
            Some((BrowseFacet::Genre, "History"))
        );
        assert_eq!(
            parse_facet_payload("author_Frank Herbert"),
            Some((BrowseFacet::Author, "Frank Herbert"))
        );

        // Top-level menu payloads and book payloads are not facets
        assert_eq!(parse_facet_payload("genres"), None);
        assert_eq!(parse_facet_payload("authors"), None);
        assert_eq!(parse_facet_payload("Dune.pdf"), None);
    }

    /// Book-download payloads are exactly the stored file names
    #[test]
    fn test_book_payload_matches_file_name() {
        let payload = book_file_name("Dune");
        assert_eq!(payload, "Dune.pdf");
        assert!(is_book_payload(&payload));

        assert!(!is_book_payload("genre_Sci-Fi"));
        assert!(!is_book_payload(".pdf"));
    }

    /// The facet keyboard carries one row per value with the right payloads
    #[test]
    fn test_facet_keyboard_payloads() {
        let keyboard = create_facet_keyboard(["History", "Sci-Fi"], GENRE_PREFIX);
        assert_eq!(keyboard.inline_keyboard.len(), 2);

        let payloads: Vec<String> = keyboard
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                    Some(data.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(payloads, vec!["genre_History", "genre_Sci-Fi"]);

        let keyboard = create_facet_keyboard(["Mary Beard"], AUTHOR_PREFIX);
        match &keyboard.inline_keyboard[0][0].kind {
            teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                assert_eq!(data, "author_Mary Beard");
            }
            other => panic!("unexpected button kind: {other:?}"),
        }
    }

    /// Every book button leads to its download payload
    #[test]
    fn test_book_list_keyboard_payloads() {
        let titles = vec!["Dune".to_string(), "SPQR".to_string()];
        let keyboard = create_book_list_keyboard(&titles);
        assert_eq!(keyboard.inline_keyboard.len(), 2);

        match &keyboard.inline_keyboard[1][0].kind {
            teloxide::types::InlineKeyboardButtonKind::CallbackData(data) => {
                assert_eq!(data, "SPQR.pdf");
            }
            other => panic!("unexpected button kind: {other:?}"),
        }
    }

    /// Command parsing tolerates bot-mention suffixes and trailing arguments
    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/start@LibraryBot"), Some(Command::Start));
        assert_eq!(Command::parse("/search dune"), Some(Command::Search));
        assert_eq!(Command::parse("/delete@LibraryBot Dune"), Some(Command::Delete));

        assert_eq!(Command::parse("/unknown"), None);
        assert_eq!(Command::parse("plain text"), None);
        assert_eq!(Command::parse(""), None);
    }

    /// Any command issued mid-flow overwrites the pending dialogue state, so
    /// reading the help text while a delete is pending cannot leave the next
    /// message to be consumed as a title to delete
    #[test]
    fn test_commands_supersede_pending_flow() {
        assert!(matches!(
            command_dialogue_state(Some(Command::Help), true),
            LibraryDialogueState::Start
        ));
        assert!(matches!(
            command_dialogue_state(Some(Command::Start), false),
            LibraryDialogueState::Start
        ));
        assert!(matches!(
            command_dialogue_state(Some(Command::Menu), true),
            LibraryDialogueState::Start
        ));
        // Unrecognized commands clear the pending flow too
        assert!(matches!(
            command_dialogue_state(None, true),
            LibraryDialogueState::Start
        ));

        // Only the flow-starting commands leave a non-idle state
        assert!(matches!(
            command_dialogue_state(Some(Command::Search), false),
            LibraryDialogueState::AwaitingSearchKeyword
        ));
        assert!(matches!(
            command_dialogue_state(Some(Command::Add), true),
            LibraryDialogueState::AwaitingUploadFile
        ));
        assert!(matches!(
            command_dialogue_state(Some(Command::Delete), true),
            LibraryDialogueState::AwaitingDeleteTitle
        ));

        // Admin-only commands leave no pending flow for other users
        assert!(matches!(
            command_dialogue_state(Some(Command::Add), false),
            LibraryDialogueState::Start
        ));
        assert!(matches!(
            command_dialogue_state(Some(Command::Delete), false),
            LibraryDialogueState::Start
        ));
    }

    /// A non-document message during the upload step re-prompts for the file
    #[test]
    fn test_fallback_message_follows_upload_state() {
        assert_eq!(
            fallback_message_key(Some(&LibraryDialogueState::AwaitingUploadFile)),
            "add-not-document"
        );
        assert_eq!(
            fallback_message_key(Some(&LibraryDialogueState::Start)),
            "usage-hint"
        );
        assert_eq!(
            fallback_message_key(Some(&LibraryDialogueState::AwaitingDeleteTitle)),
            "usage-hint"
        );
        assert_eq!(fallback_message_key(None), "usage-hint");
    }

    /// Admin commands only appear on the admin's reply keyboard
    #[test]
    fn test_main_keyboard_gates_admin_commands() {
        let user_keyboard = create_main_keyboard(false);
        assert_eq!(user_keyboard.keyboard.len(), 3);

        let admin_keyboard = create_main_keyboard(true);
        assert_eq!(admin_keyboard.keyboard.len(), 5);

        let labels: Vec<&str> = admin_keyboard
            .keyboard
            .iter()
            .flatten()
            .map(|button| button.text.as_str())
            .collect();
        assert!(labels.contains(&"/add"));
        assert!(labels.contains(&"/delete"));
    }
}
