//! Dialogue Manager module for handling multi-turn flow input

use anyhow::Result;
use std::fs;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info, warn};

use crate::catalog::{CatalogError, CatalogStore};
use crate::config::BotConfig;
use crate::dialogue::{parse_book_metadata, LibraryDialogue};
use crate::localization::{t_args_lang, t_lang};
use crate::query::search_keyword;

use super::ui_builder::{book_file_name, create_book_list_keyboard};

/// Handle the keyword supplied after /search.
///
/// Always completes the flow: an empty result set is a normal outcome.
pub async fn handle_search_keyword_input(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
    store: Arc<CatalogStore>,
    keyword: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let catalog = match store.reload().await {
        Ok(catalog) => catalog,
        Err(e) => {
            error!(error = %e, "Failed to reload catalog for search");
            bot.send_message(msg.chat.id, t_lang("error-catalog-load", language_code))
                .await?;
            dialogue.exit().await?;
            return Err(e.into());
        }
    };

    let matches = search_keyword(&catalog, keyword);
    info!(user_id = %msg.chat.id, keyword, matches = matches.len(), "Keyword search completed");

    if matches.is_empty() {
        bot.send_message(msg.chat.id, t_lang("search-empty", language_code))
            .await?;
    } else {
        bot.send_message(msg.chat.id, t_lang("search-results", language_code))
            .reply_markup(create_book_list_keyboard(&matches))
            .await?;
    }

    dialogue.exit().await?;
    Ok(())
}

/// Handle the `name|author|genre` text supplied after a book upload.
///
/// Invalid input keeps the dialogue in the metadata state so the admin can
/// try again; the stored file referenced by `pending_file_name` is untouched
/// either way.
pub async fn handle_book_metadata_input(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
    store: Arc<CatalogStore>,
    metadata_input: &str,
    pending_file_name: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let metadata = match parse_book_metadata(metadata_input) {
        Ok(metadata) => metadata,
        Err(reason) => {
            warn!(user_id = %msg.chat.id, reason, "Rejected book metadata input");
            bot.send_message(msg.chat.id, t_lang("add-bad-metadata", language_code))
                .await?;
            // Stay in the metadata state, admin can try again
            return Ok(());
        }
    };

    if let Err(e) = store
        .add(&metadata.title, &metadata.author, &metadata.genre)
        .await
    {
        error!(error = %e, title = %metadata.title, "Failed to persist new book");
        bot.send_message(msg.chat.id, t_lang("error-persistence", language_code))
            .await?;
        dialogue.exit().await?;
        return Err(e.into());
    }

    info!(
        user_id = %msg.chat.id,
        title = %metadata.title,
        file_name = pending_file_name,
        "Book added via upload flow"
    );

    let confirmation = t_args_lang(
        "add-complete",
        &[
            ("title", &metadata.title),
            ("author", &metadata.author),
            ("genre", &metadata.genre),
        ],
        language_code,
    );
    bot.send_message(msg.chat.id, confirmation).await?;

    dialogue.exit().await?;
    Ok(())
}

/// Handle the title supplied after /delete.
///
/// An unknown title keeps the dialogue waiting for another attempt. On
/// success the backing file is removed too; its absence is not an error.
pub async fn handle_delete_title_input(
    bot: &Bot,
    msg: &Message,
    dialogue: LibraryDialogue,
    store: Arc<CatalogStore>,
    config: Arc<BotConfig>,
    title_input: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let title = title_input.trim();

    let record = match store.remove(title).await {
        Ok(record) => record,
        Err(CatalogError::NotFound(_)) => {
            bot.send_message(msg.chat.id, t_lang("delete-not-found", language_code))
                .await?;
            // Stay in the delete state, admin can try again
            return Ok(());
        }
        Err(e) => {
            error!(error = %e, title, "Failed to persist book removal");
            bot.send_message(msg.chat.id, t_lang("error-persistence", language_code))
                .await?;
            dialogue.exit().await?;
            return Err(e.into());
        }
    };

    let book_path = config.book_path(&book_file_name(title));
    match fs::remove_file(&book_path) {
        Ok(()) => info!(path = %book_path.display(), "Removed book file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %book_path.display(), "No book file to remove")
        }
        Err(e) => error!(path = %book_path.display(), error = %e, "Failed to remove book file"),
    }

    info!(user_id = %msg.chat.id, title, "Book deleted via delete flow");

    let confirmation = t_args_lang(
        "delete-complete",
        &[
            ("title", title),
            ("author", &record.author),
            ("genre", &record.genre),
        ],
        language_code,
    );
    bot.send_message(msg.chat.id, confirmation).await?;

    dialogue.exit().await?;
    Ok(())
}
