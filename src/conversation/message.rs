use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Sender;

/// Interactive attachment carried by a bot message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Prompt {
    /// Clickable quick-reply options
    Options { choices: Vec<String>, selected: bool },
    /// "Was this response helpful?" yes/no prompt
    Feedback { answered: bool },
}

/// A single transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<Prompt>,
}

impl Message {
    pub fn options(&self) -> Option<&[String]> {
        match &self.prompt {
            Some(Prompt::Options { choices, .. }) => Some(choices),
            _ => None,
        }
    }

    /// Whether the option set or feedback prompt has already been used
    pub fn is_settled(&self) -> bool {
        match self.prompt {
            Some(Prompt::Options { selected, .. }) => selected,
            Some(Prompt::Feedback { answered }) => answered,
            None => false,
        }
    }
}

/// A message waiting to be appended; the transcript assigns id and time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub sender: Sender,
    pub text: String,
    pub prompt: Option<Prompt>,
}

impl MessageDraft {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            prompt: None,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            prompt: None,
        }
    }

    pub fn with_options<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt = Some(Prompt::Options {
            choices: choices.into_iter().map(Into::into).collect(),
            selected: false,
        });
        self
    }

    pub fn with_feedback(mut self) -> Self {
        self.prompt = Some(Prompt::Feedback { answered: false });
        self
    }
}
