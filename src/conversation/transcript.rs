use crate::conversation::message::{Message, MessageDraft, Prompt};

/// Ordered, append-only list of messages for one session
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, assigning the next id
    pub fn push(&mut self, draft: MessageDraft) -> u64 {
        let id = self.messages.len() as u64 + 1;
        self.messages.push(Message {
            id,
            sender: draft.sender,
            text: draft.text,
            timestamp: chrono::Utc::now(),
            prompt: draft.prompt,
        });
        id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Only the latest message may have live controls
    pub fn is_actionable(&self, id: u64) -> bool {
        self.last().is_some_and(|last| last.id == id)
    }

    /// Mark every option set in the transcript as used
    pub fn mark_options_selected(&mut self) {
        for message in &mut self.messages {
            if let Some(Prompt::Options { selected, .. }) = &mut message.prompt {
                *selected = true;
            }
        }
    }

    /// Mark every feedback prompt in the transcript as answered
    pub fn mark_feedback_answered(&mut self) {
        for message in &mut self.messages {
            if let Some(Prompt::Feedback { answered }) = &mut message.prompt {
                *answered = true;
            }
        }
    }
}
