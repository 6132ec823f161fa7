//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules for better organization:
//! - `message_handler`: Handles incoming commands, flow input, and uploads
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and callback payloads
//! - `dialogue_manager`: Handles the multi-turn search/add/delete flows

pub mod callback_handler;
pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

// Re-export main handler functions for use in main.rs
pub use callback_handler::callback_handler;
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use message_handler::{
    command_dialogue_state, download_book_file, fallback_message_key, is_admin, Command,
};
pub use ui_builder::{book_file_name, is_book_payload, parse_facet_payload, BrowseFacet};
