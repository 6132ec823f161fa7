//! # Bookshelf Telegram Bot
//!
//! A Telegram bot front end for a small digital library: users browse and
//! download books by genre or author, search by keyword, and a single admin
//! uploads or removes books. The catalog persists as a flat delimited file.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod dialogue;
pub mod localization;
pub mod query;
