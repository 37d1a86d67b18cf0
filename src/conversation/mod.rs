//! Scripted conversation engine

pub mod engine;
pub mod message;
pub mod policy;
pub mod sampler;
pub mod transcript;

pub use engine::ConversationEngine;
pub use message::{Message, Prompt};
pub use policy::ReplyPolicy;
