use serde::{Deserialize, Serialize};
use strum::Display;

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn icon(&self) -> &'static str {
        match self {
            Sender::User => "👤",
            Sender::Bot => "🤖",
        }
    }
}

/// Events the rendering surface feeds into the conversation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Free text typed by the user
    Submit(String),

    /// A quick-reply option was clicked
    SelectOption(String),

    /// The user answered a "was this helpful?" prompt
    RecordFeedback(bool),
}

impl ChatEvent {
    pub fn describe(&self) -> &'static str {
        match self {
            ChatEvent::Submit(_) => "submit",
            ChatEvent::SelectOption(_) => "select-option",
            ChatEvent::RecordFeedback(_) => "record-feedback",
        }
    }
}
