use std::time::Duration;

use crate::catalog::{BOT_RESPONSES, FEEDBACK_PROMPT, INITIAL_QUESTIONS};
use crate::conversation::message::MessageDraft;
use crate::conversation::sampler::Sampler;

/// How the bot answers an accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPolicy {
    /// One random reply followed by a feedback prompt
    SingleWithFeedback,
    /// Two distinct replies a delay apart, the second revealing new options
    StaggeredWithOptions,
    /// Like `SingleWithFeedback`, seeded with the fixed question menu
    MenuWithFeedback,
}

/// Messages that land together once `after` has elapsed since the previous step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyStep {
    pub after: Duration,
    pub messages: Vec<MessageDraft>,
}

impl ReplyPolicy {
    /// Options attached to the seed question message
    pub fn seed_options(self, sampler: &mut Sampler) -> Vec<String> {
        match self {
            ReplyPolicy::MenuWithFeedback => {
                INITIAL_QUESTIONS.iter().map(|q| q.to_string()).collect()
            }
            ReplyPolicy::SingleWithFeedback | ReplyPolicy::StaggeredWithOptions => {
                sampler.random_options()
            }
        }
    }

    /// Build the reply schedule for one submission
    pub fn plan(self, sampler: &mut Sampler, delay: Duration) -> Vec<ReplyStep> {
        match self {
            ReplyPolicy::SingleWithFeedback | ReplyPolicy::MenuWithFeedback => {
                let mut messages = Vec::with_capacity(2);
                if let Some(reply) = sampler.pick(&BOT_RESPONSES) {
                    messages.push(MessageDraft::bot(reply));
                }
                messages.push(MessageDraft::bot(FEEDBACK_PROMPT).with_feedback());
                vec![ReplyStep { after: delay, messages }]
            }
            ReplyPolicy::StaggeredWithOptions => {
                let replies = sampler.random_responses();
                let options = sampler.random_options();
                let last = replies.len().saturating_sub(1);
                replies
                    .into_iter()
                    .enumerate()
                    .map(|(index, reply)| {
                        let mut draft = MessageDraft::bot(reply);
                        if index == last {
                            draft = draft.with_options(options.clone());
                        }
                        ReplyStep {
                            after: delay,
                            messages: vec![draft],
                        }
                    })
                    .collect()
            }
        }
    }

    pub fn bot_messages_per_turn(self) -> usize {
        2
    }
}
