//! Terminal chat window

pub mod chat;
pub mod commands;
pub mod composer;
pub mod transcript;
pub mod tui;

pub use chat::{ChatAction, ChatView};
