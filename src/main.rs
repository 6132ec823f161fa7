use std::env;
use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bookshelf::bot;
use bookshelf::catalog::CatalogStore;
use bookshelf::config::BotConfig;
use bookshelf::dialogue::LibraryDialogueState;
use bookshelf::localization::init_localization;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Bookshelf Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Get bot token from environment
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN must be set")?;

    let config = Arc::new(BotConfig::from_env()?);

    init_localization()?;

    // Make sure the book storage directory exists before any upload
    fs::create_dir_all(&config.books_dir).with_context(|| {
        format!(
            "failed to create books directory {}",
            config.books_dir.display()
        )
    })?;

    // Load the catalog once up front; any I/O error beyond a missing file is fatal
    let store = Arc::new(CatalogStore::new(&config.catalog_path));
    let catalog = store.reload().await?;
    info!(
        books = catalog.len(),
        path = %config.catalog_path.display(),
        "Catalog loaded"
    );

    // Initialize the bot
    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<LibraryDialogueState>, LibraryDialogueState>()
                .endpoint(bot::message_handler),
        )
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<LibraryDialogueState>::new(),
            store,
            config
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
