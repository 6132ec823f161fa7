//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use tracing::{debug, error, info};

use crate::catalog::{Catalog, CatalogStore};
use crate::config::BotConfig;
use crate::localization::{t_args_lang, t_lang};
use crate::query::{filter_by_author, filter_by_genre};

use super::ui_builder::{
    create_book_list_keyboard, create_facet_keyboard, is_book_payload, parse_facet_payload,
    BrowseFacet, AUTHORS_PAYLOAD, AUTHOR_PREFIX, GENRES_PAYLOAD, GENRE_PREFIX,
};

/// Handle callback queries from the browse and search keyboards.
pub async fn callback_handler(
    bot: Bot,
    q: teloxide::types::CallbackQuery,
    store: Arc<CatalogStore>,
    config: Arc<BotConfig>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    let language_code = q.from.language_code.as_deref();
    let data = q.data.as_deref().unwrap_or("");

    if let Some(msg) = &q.message {
        let chat_id = msg.chat().id;

        if data == GENRES_PAYLOAD || data == AUTHORS_PAYLOAD {
            let catalog = reload_catalog(&bot, chat_id, &store, language_code).await?;
            handle_facet_list(&bot, chat_id, &catalog, data, language_code).await?;
        } else if let Some((facet, value)) = parse_facet_payload(data) {
            let catalog = reload_catalog(&bot, chat_id, &store, language_code).await?;
            handle_facet_filter(&bot, chat_id, &catalog, facet, value, language_code).await?;
        } else if is_book_payload(data) {
            handle_book_download(&bot, chat_id, &config, data, language_code).await?;
        } else {
            debug!(user_id = %q.from.id, data, "Ignoring unknown callback payload");
        }
    }

    // Answer the callback query to remove the loading state
    bot.answer_callback_query(q.id).await?;

    Ok(())
}

async fn reload_catalog(
    bot: &Bot,
    chat_id: ChatId,
    store: &CatalogStore,
    language_code: Option<&str>,
) -> Result<Catalog> {
    match store.reload().await {
        Ok(catalog) => Ok(catalog),
        Err(e) => {
            error!(error = %e, "Failed to reload catalog for browse");
            bot.send_message(chat_id, t_lang("error-catalog-load", language_code))
                .await?;
            Err(e.into())
        }
    }
}

/// Present one button per distinct genre or author.
async fn handle_facet_list(
    bot: &Bot,
    chat_id: ChatId,
    catalog: &Catalog,
    payload: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let (values, prefix, list_key, empty_key) = if payload == GENRES_PAYLOAD {
        (catalog.genres(), GENRE_PREFIX, "genres-list", "genres-empty")
    } else {
        (
            catalog.authors(),
            AUTHOR_PREFIX,
            "authors-list",
            "authors-empty",
        )
    };

    if values.is_empty() {
        bot.send_message(chat_id, t_lang(empty_key, language_code))
            .await?;
        return Ok(());
    }

    bot.send_message(chat_id, t_lang(list_key, language_code))
        .reply_markup(create_facet_keyboard(values, prefix))
        .await?;
    Ok(())
}

/// Present the books matching a selected genre or author.
async fn handle_facet_filter(
    bot: &Bot,
    chat_id: ChatId,
    catalog: &Catalog,
    facet: BrowseFacet,
    value: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let titles = match facet {
        BrowseFacet::Genre => filter_by_genre(catalog, value),
        BrowseFacet::Author => filter_by_author(catalog, value),
    };

    let facet_name = t_lang(facet.message_key(), language_code);
    let args = [("filter", facet_name.as_str()), ("value", value)];

    if titles.is_empty() {
        bot.send_message(chat_id, t_args_lang("filter-empty", &args, language_code))
            .await?;
        return Ok(());
    }

    bot.send_message(chat_id, t_args_lang("filter-results", &args, language_code))
        .reply_markup(create_book_list_keyboard(&titles))
        .await?;
    Ok(())
}

/// Send the selected book file, if it exists in the books directory.
async fn handle_book_download(
    bot: &Bot,
    chat_id: ChatId,
    config: &BotConfig,
    file_name: &str,
    language_code: Option<&str>,
) -> Result<()> {
    let path = config.book_path(file_name);
    if path.is_file() {
        info!(file_name, "Sending book file");
        bot.send_document(chat_id, InputFile::file(path)).await?;
    } else {
        debug!(file_name, "Requested book file is missing");
        bot.send_message(chat_id, t_lang("book-unavailable", language_code))
            .await?;
    }
    Ok(())
}
