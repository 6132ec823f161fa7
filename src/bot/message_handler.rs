//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::Document;
use tracing::{debug, error, info, warn};

use crate::catalog::CatalogStore;
use crate::config::BotConfig;
use crate::dialogue::{validate_document_name, LibraryDialogue, LibraryDialogueState};
use crate::localization::t_lang;

use super::dialogue_manager::{
    handle_book_metadata_input, handle_delete_title_input, handle_search_keyword_input,
};
use super::ui_builder::{create_main_keyboard, create_menu_keyboard};

/// Whether the sender is the single privileged operator.
pub fn is_admin(msg: &Message, config: &BotConfig) -> bool {
    msg.from
        .as_ref()
        .map(|user| user.id == config.admin_id)
        .unwrap_or(false)
}

/// Commands understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Menu,
    Search,
    Help,
    Add,
    Delete,
}

impl Command {
    /// Parse the leading command token of a message, tolerating a bot-mention
    /// suffix and trailing arguments (`/start@LibraryBot`, `/search dune`).
    pub fn parse(text: &str) -> Option<Command> {
        let first_token = text.split_whitespace().next()?;
        let name = first_token.split('@').next().unwrap_or(first_token);
        match name {
            "/start" => Some(Command::Start),
            "/menu" => Some(Command::Menu),
            "/search" => Some(Command::Search),
            "/help" => Some(Command::Help),
            "/add" => Some(Command::Add),
            "/delete" => Some(Command::Delete),
            _ => None,
        }
    }
}

/// The dialogue state a command leaves behind.
///
/// Every command, recognized or not, supersedes whatever flow was pending.
/// Only the flow-starting commands leave a non-idle state, and the admin-only
/// ones do so only for the admin.
pub fn command_dialogue_state(
    command: Option<Command>,
    is_admin: bool,
) -> LibraryDialogueState {
    match command {
        Some(Command::Search) => LibraryDialogueState::AwaitingSearchKeyword,
        Some(Command::Add) if is_admin => LibraryDialogueState::AwaitingUploadFile,
        Some(Command::Delete) if is_admin => LibraryDialogueState::AwaitingDeleteTitle,
        _ => LibraryDialogueState::Start,
    }
}

/// Message key for input that no flow handler claims.
///
/// While an upload is expected, anything that is not a document re-prompts
/// for the file instead of falling back to the generic usage hint.
pub fn fallback_message_key(state: Option<&LibraryDialogueState>) -> &'static str {
    match state {
        Some(LibraryDialogueState::AwaitingUploadFile) => "add-not-document",
        _ => "usage-hint",
    }
}

fn language_code(msg: &Message) -> Option<&str> {
    msg.from
        .as_ref()
        .and_then(|user| user.language_code.as_ref())
        .map(|s| s.as_str())
}

/// Download an uploaded book into the books directory.
///
/// The bytes go to a temp file in the same directory first and are renamed
/// into place, so a failed transfer never leaves a partial book behind. The
/// flow only advances to metadata entry after this returns, which is what
/// keeps the catalog from referencing a file that was never written.
pub async fn download_book_file(
    bot: &Bot,
    file_id: teloxide::types::FileId,
    dest: &Path,
) -> Result<()> {
    let file = bot.get_file(file_id).await?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let response = reqwest::get(&url).await?;
    let bytes = response.bytes().await?;

    let dir = dest
        .parent()
        .ok_or_else(|| anyhow::anyhow!("book destination has no parent directory"))?;
    let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
    temp_file.as_file_mut().write_all(&bytes)?;
    temp_file.persist(dest)?;

    debug!(dest = %dest.display(), bytes = bytes.len(), "Book file stored");
    Ok(())
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
    store: Arc<CatalogStore>,
    config: Arc<BotConfig>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let language_code = language_code(msg);

    debug!(user_id = %msg.chat.id, message_length = text.len(), "Received text message from user");

    // Commands silently supersede whatever flow was pending
    if text.starts_with('/') {
        return handle_command(bot, msg, dialogue, store, config, text, language_code).await;
    }

    match dialogue.get().await? {
        Some(LibraryDialogueState::AwaitingSearchKeyword) => {
            handle_search_keyword_input(bot, msg, dialogue, store, text, language_code).await
        }
        Some(LibraryDialogueState::AwaitingBookMetadata { pending_file_name }) => {
            handle_book_metadata_input(
                bot,
                msg,
                dialogue,
                store,
                text,
                &pending_file_name,
                language_code,
            )
            .await
        }
        Some(LibraryDialogueState::AwaitingDeleteTitle) => {
            handle_delete_title_input(bot, msg, dialogue, store, config, text, language_code).await
        }
        Some(LibraryDialogueState::AwaitingUploadFile) => {
            // Waiting for a document, got plain text instead
            bot.send_message(msg.chat.id, t_lang("add-not-document", language_code))
                .await?;
            Ok(())
        }
        Some(LibraryDialogueState::Start) | None => {
            bot.send_message(msg.chat.id, t_lang("usage-hint", language_code))
                .await?;
            Ok(())
        }
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_command(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
    store: Arc<CatalogStore>,
    config: Arc<BotConfig>,
    text: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let command = Command::parse(text);
    let admin = is_admin(msg, &config);

    // Every command silently overwrites a pending flow before it replies
    dialogue
        .update(command_dialogue_state(command, admin))
        .await?;

    match command {
        Some(Command::Start) => {
            bot.send_message(msg.chat.id, t_lang("welcome-message", language_code))
                .reply_markup(create_main_keyboard(admin))
                .await?;
        }
        Some(Command::Menu) => {
            if let Err(e) = store.reload().await {
                error!(error = %e, "Failed to reload catalog for menu");
                bot.send_message(msg.chat.id, t_lang("error-catalog-load", language_code))
                    .await?;
                return Err(e.into());
            }
            bot.send_message(msg.chat.id, t_lang("menu-prompt", language_code))
                .reply_markup(create_menu_keyboard(language_code))
                .await?;
        }
        Some(Command::Search) => {
            bot.send_message(msg.chat.id, t_lang("search-prompt", language_code))
                .await?;
        }
        Some(Command::Help) => {
            let mut help_message = t_lang("help-message", language_code);
            if admin {
                help_message.push_str("\n\n");
                help_message.push_str(&t_lang("help-admin", language_code));
            }
            bot.send_message(msg.chat.id, help_message).await?;
        }
        Some(Command::Add) => {
            if !admin {
                warn!(user_id = %msg.chat.id, "Non-admin attempted /add");
                bot.send_message(msg.chat.id, t_lang("permission-denied", language_code))
                    .await?;
                return Ok(());
            }
            bot.send_message(msg.chat.id, t_lang("add-prompt-file", language_code))
                .await?;
        }
        Some(Command::Delete) => {
            if !admin {
                warn!(user_id = %msg.chat.id, "Non-admin attempted /delete");
                bot.send_message(msg.chat.id, t_lang("permission-denied", language_code))
                    .await?;
                return Ok(());
            }
            if let Err(e) = store.reload().await {
                error!(error = %e, "Failed to reload catalog for delete");
                dialogue.update(LibraryDialogueState::Start).await?;
                bot.send_message(msg.chat.id, t_lang("error-catalog-load", language_code))
                    .await?;
                return Err(e.into());
            }
            bot.send_message(msg.chat.id, t_lang("delete-prompt", language_code))
                .await?;
        }
        None => {
            bot.send_message(msg.chat.id, t_lang("usage-hint", language_code))
                .await?;
        }
    }

    Ok(())
}

/// Handle an uploaded document during the add flow.
///
/// The document name must carry the book extension; anything else keeps the
/// dialogue waiting for a valid upload. The download is awaited before the
/// metadata prompt goes out.
async fn handle_upload_document(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
    config: Arc<BotConfig>,
    doc: &Document,
    language_code: Option<&str>,
) -> Result<()> {
    let Some(file_name) = doc.file_name.as_deref() else {
        bot.send_message(msg.chat.id, t_lang("add-bad-extension", language_code))
            .await?;
        return Ok(());
    };

    if let Err(reason) = validate_document_name(file_name) {
        warn!(user_id = %msg.chat.id, file_name, reason, "Rejected uploaded document");
        bot.send_message(msg.chat.id, t_lang("add-bad-extension", language_code))
            .await?;
        // Stay in the upload state, admin can try again
        return Ok(());
    }

    let dest = config.book_path(file_name);
    if let Err(e) = download_book_file(bot, doc.file.id.clone(), &dest).await {
        error!(user_id = %msg.chat.id, file_name, error = %e, "Book download failed");
        bot.send_message(msg.chat.id, t_lang("add-download-failed", language_code))
            .await?;
        return Ok(());
    }

    info!(user_id = %msg.chat.id, file_name, "Book file uploaded and stored");

    bot.send_message(msg.chat.id, t_lang("add-prompt-metadata", language_code))
        .await?;
    dialogue
        .update(LibraryDialogueState::AwaitingBookMetadata {
            pending_file_name: file_name.to_string(),
        })
        .await?;

    Ok(())
}

async fn handle_document_message(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
    config: Arc<BotConfig>,
) -> Result<()> {
    let language_code = language_code(msg);

    let Some(doc) = msg.document() else {
        return Ok(());
    };

    match dialogue.get().await? {
        Some(LibraryDialogueState::AwaitingUploadFile) => {
            handle_upload_document(bot, msg, dialogue, config, doc, language_code).await
        }
        _ => {
            debug!(user_id = %msg.chat.id, "Received document outside the add flow");
            bot.send_message(msg.chat.id, t_lang("usage-hint", language_code))
                .await?;
            Ok(())
        }
    }
}

async fn handle_unsupported_message(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
) -> Result<()> {
    let language_code = language_code(msg);

    debug!(user_id = %msg.chat.id, "Received unsupported message type from user");

    let state = dialogue.get().await?;
    bot.send_message(
        msg.chat.id,
        t_lang(fallback_message_key(state.as_ref()), language_code),
    )
    .await?;
    Ok(())
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: LibraryDialogue,
    store: Arc<CatalogStore>,
    config: Arc<BotConfig>,
) -> Result<()> {
    if msg.text().is_some() {
        handle_text_message(&bot, &msg, dialogue, store, config).await?;
    } else if msg.document().is_some() {
        handle_document_message(&bot, &msg, dialogue, config).await?;
    } else {
        handle_unsupported_message(&bot, &msg, dialogue).await?;
    }

    Ok(())
}
