use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::catalog::{self, FOLLOW_UP_HEADER, MENU_HEADER, WELCOME};
use crate::conversation::message::{Message, MessageDraft, Prompt};
use crate::conversation::policy::{ReplyPolicy, ReplyStep};
use crate::conversation::sampler::Sampler;
use crate::conversation::transcript::Conversation;
use crate::events::ChatEvent;
use crate::theme::ThemeConfig;

/// A batch of scheduled bot messages that reached its landing time
#[derive(Debug)]
struct Landing {
    messages: Vec<MessageDraft>,
    /// Final batch of its submission
    last: bool,
}

/// Owns the transcript and plays the scripted bot
pub struct ConversationEngine {
    conversation: Conversation,
    pending_input: String,
    policy: ReplyPolicy,
    sampler: Sampler,
    delay: Duration,
    landing_tx: mpsc::UnboundedSender<Landing>,
    landing_rx: mpsc::UnboundedReceiver<Landing>,
    in_flight: usize,
}

impl ConversationEngine {
    /// Start a session seeded with the welcome text and first question set
    pub fn new(theme: &ThemeConfig, delay: Duration, seed: Option<u64>) -> Self {
        let policy = theme.reply_policy();
        let mut sampler = Sampler::new(seed);
        let (landing_tx, landing_rx) = mpsc::unbounded_channel();

        let mut conversation = Conversation::new();
        conversation.push(MessageDraft::bot(WELCOME));
        let seed_options = policy.seed_options(&mut sampler);
        conversation.push(MessageDraft::bot(MENU_HEADER).with_options(seed_options));

        debug!(?policy, delay_ms = delay.as_millis() as u64, "conversation started");

        Self {
            conversation,
            pending_input: String::new(),
            policy,
            sampler,
            delay,
            landing_tx,
            landing_rx,
            in_flight: 0,
        }
    }

    /// Route a view event to the matching operation
    pub fn apply(&mut self, event: ChatEvent) {
        trace!("applying {} event", event.describe());
        match event {
            ChatEvent::Submit(text) => {
                self.submit(&text);
            }
            ChatEvent::SelectOption(option) => {
                self.select_option(&option);
            }
            ChatEvent::RecordFeedback(is_helpful) => self.record_feedback(is_helpful),
        }
    }

    /// Append the user's text and schedule the bot's answer.
    ///
    /// Blank input is ignored and returns `false`.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            trace!("ignoring blank input");
            return false;
        }

        self.conversation.push(MessageDraft::user(text));
        self.pending_input.clear();
        self.schedule_reply();
        true
    }

    /// Use a quick-reply option as if it had been typed
    pub fn select_option(&mut self, option: &str) -> bool {
        self.conversation.mark_options_selected();
        self.submit(option)
    }

    /// Answer a feedback prompt and offer follow-up questions
    pub fn record_feedback(&mut self, is_helpful: bool) {
        self.conversation.mark_feedback_answered();
        let follow_ups = catalog::follow_ups(is_helpful).iter().copied();
        self.conversation.push(MessageDraft::user(catalog::feedback_ack(is_helpful)));
        self.conversation.push(MessageDraft::bot(FOLLOW_UP_HEADER).with_options(follow_ups));
        debug!(is_helpful, "feedback recorded");
    }

    fn schedule_reply(&mut self) {
        let steps: Vec<ReplyStep> = self.policy.plan(&mut self.sampler, self.delay);
        if steps.is_empty() {
            return;
        }

        self.in_flight += 1;
        debug!(
            steps = steps.len(),
            messages = self.policy.bot_messages_per_turn(),
            in_flight = self.in_flight,
            "reply scheduled"
        );

        let landing_tx = self.landing_tx.clone();
        tokio::spawn(async move {
            let count = steps.len();
            for (index, step) in steps.into_iter().enumerate() {
                tokio::time::sleep(step.after).await;
                let landing = Landing {
                    messages: step.messages,
                    last: index + 1 == count,
                };
                if landing_tx.send(landing).is_err() {
                    // Engine dropped; the session is over
                    return;
                }
            }
        });
    }

    fn land(&mut self, landing: Landing) {
        for draft in landing.messages {
            self.conversation.push(draft);
        }
        if landing.last {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        debug!(len = self.conversation.len(), in_flight = self.in_flight, "reply landed");
    }

    /// Append every reply that has landed so far without waiting
    pub fn process_landed_replies(&mut self) -> usize {
        let mut landed = 0;
        while let Ok(landing) = self.landing_rx.try_recv() {
            self.land(landing);
            landed += 1;
        }
        landed
    }

    /// Wait for the next scheduled batch; `false` when nothing is pending
    pub async fn wait_for_reply(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.landing_rx.recv().await {
            Some(landing) => {
                self.land(landing);
                true
            }
            None => false,
        }
    }

    /// Wait until every scheduled reply has landed
    pub async fn wait_idle(&mut self) {
        while self.wait_for_reply().await {}
    }

    pub fn has_pending_replies(&self) -> bool {
        self.in_flight > 0
    }

    pub fn transcript(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Prompt of the latest message, the only one that accepts input
    pub fn actionable_prompt(&self) -> Option<&Prompt> {
        self.conversation.last().and_then(|m| m.prompt.as_ref())
    }

    pub fn policy(&self) -> ReplyPolicy {
        self.policy
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BOT_RESPONSES, FEEDBACK_PROMPT, INITIAL_QUESTIONS, QUICK_REPLY_POOL};
    use crate::events::Sender;
    use crate::theme::ThemeName;
    use tokio::time::{Instant, timeout};

    const DELAY: Duration = Duration::from_millis(1000);

    fn engine(theme: ThemeName) -> ConversationEngine {
        ConversationEngine::new(&theme.config(), DELAY, Some(17))
    }

    fn texts(engine: &ConversationEngine) -> Vec<&str> {
        engine.transcript().iter().map(|m| m.text.as_str()).collect()
    }

    fn is_feedback_prompt(message: &Message) -> bool {
        matches!(message.prompt, Some(Prompt::Feedback { .. }))
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_session_shows_welcome_and_menu() {
        let engine = engine(ThemeName::Teal);
        let transcript = engine.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].text, WELCOME);
        assert_eq!(transcript[0].sender, Sender::Bot);
        assert_eq!(transcript[1].text, MENU_HEADER);
        let menu = INITIAL_QUESTIONS.map(String::from);
        assert_eq!(transcript[1].options().unwrap(), menu.as_slice());
        assert!(engine.conversation().is_actionable(2));
        assert!(!engine.conversation().is_actionable(1));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_changes_nothing() {
        let mut engine = engine(ThemeName::Teal);
        engine.set_pending_input("   ");
        assert!(!engine.submit(""));
        assert!(!engine.submit("   "));
        assert!(!engine.submit("\t\n"));
        assert_eq!(engine.transcript().len(), 2);
        assert_eq!(engine.pending_input(), "   ");
        assert!(!engine.has_pending_replies());
        assert!(!engine.wait_for_reply().await);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_appends_user_message_then_reply_after_delay() {
        let mut engine = engine(ThemeName::Floating);
        engine.set_pending_input("Do you ship to Canada?");
        let start = Instant::now();

        assert!(engine.submit("Do you ship to Canada?"));
        assert_eq!(engine.pending_input(), "");
        let last = engine.transcript().last().unwrap();
        assert_eq!(last.sender, Sender::User);
        assert_eq!(last.text, "Do you ship to Canada?");
        assert_eq!(engine.process_landed_replies(), 0);

        assert!(timeout(Duration::from_millis(999), engine.wait_for_reply()).await.is_err());
        assert_eq!(engine.transcript().len(), 3);

        assert!(engine.wait_for_reply().await);
        assert!(start.elapsed() >= DELAY);
        let transcript = engine.transcript();
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript[3].sender, Sender::Bot);
        assert!(BOT_RESPONSES.contains(&transcript[3].text.as_str()));
        assert_eq!(transcript[4].text, FEEDBACK_PROMPT);
        assert!(is_feedback_prompt(&transcript[4]));
        assert!(!engine.has_pending_replies());
    }

    #[tokio::test(start_paused = true)]
    async fn staggered_policy_lands_two_replies_a_second_apart() {
        let mut engine = engine(ThemeName::Slate);
        let start = Instant::now();
        assert!(engine.submit("hi"));

        assert!(engine.wait_for_reply().await);
        let first_at = start.elapsed();
        assert!(first_at >= DELAY && first_at < DELAY * 2);
        assert_eq!(engine.transcript().len(), 4);
        assert!(engine.transcript()[3].prompt.is_none());
        assert!(engine.has_pending_replies());

        assert!(engine.wait_for_reply().await);
        assert!(start.elapsed() >= DELAY * 2);
        let transcript = engine.transcript();
        assert_eq!(transcript.len(), 5);
        assert_ne!(transcript[3].text, transcript[4].text);
        let options = transcript[4].options().unwrap();
        assert_eq!(options.len(), 3);
        assert!(options.iter().all(|o| QUICK_REPLY_POOL.contains(&o.as_str())));
        assert!(engine.conversation().is_actionable(transcript[4].id));
        assert!(!engine.has_pending_replies());
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_option_three_plays_the_scripted_turn() {
        let mut engine = engine(ThemeName::Teal);
        let option = engine.transcript()[1].options().unwrap()[2].clone();
        assert_eq!(option, "Do you provide training for beginners?");

        engine.apply(ChatEvent::SelectOption(option.clone()));
        assert!(engine.transcript()[1].is_settled());
        assert_eq!(texts(&engine)[2], option);
        assert!(!engine.conversation().is_actionable(2));

        engine.wait_idle().await;
        let transcript = engine.transcript();
        assert_eq!(transcript.len(), 5);
        assert!(BOT_RESPONSES.contains(&transcript[3].text.as_str()));
        assert!(is_feedback_prompt(&transcript[4]));
        assert!(matches!(engine.actionable_prompt(), Some(Prompt::Feedback { answered: false })));
    }

    #[tokio::test(start_paused = true)]
    async fn selecting_an_option_invalidates_every_option_set() {
        let mut engine = engine(ThemeName::Teal);
        engine.record_feedback(true);
        engine.select_option("What software is compatible with your 3D printers?");
        assert!(
            engine
                .transcript()
                .iter()
                .filter(|m| m.options().is_some())
                .all(|m| m.is_settled())
        );
        engine.wait_idle().await;
    }

    #[tokio::test(start_paused = true)]
    async fn helpful_feedback_offers_quality_questions() {
        let mut engine = engine(ThemeName::Teal);
        engine.submit("hello");
        engine.wait_idle().await;

        engine.apply(ChatEvent::RecordFeedback(true));
        let transcript = engine.transcript();
        let n = transcript.len();
        assert!(transcript[n - 3].is_settled());
        assert_eq!(transcript[n - 2].sender, Sender::User);
        assert_eq!(transcript[n - 2].text, "Yes, that was helpful");
        assert_eq!(transcript[n - 1].text, FOLLOW_UP_HEADER);
        assert_eq!(
            transcript[n - 1].options().unwrap(),
            [
                "Can you tell me more about the print quality of your 3D printers?",
                "What software is compatible with your 3D printers?",
                "How long does it typically take to print a small object?",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unhelpful_feedback_offers_maintenance_questions() {
        let mut engine = engine(ThemeName::Floating);
        engine.submit("hello");
        engine.wait_idle().await;

        engine.record_feedback(false);
        let last = engine.transcript().last().unwrap();
        assert_eq!(
            last.options().unwrap(),
            [
                "Can you explain the difference between FDM and SLA printers?",
                "What are the maintenance requirements for your 3D printers?",
                "Do you offer any bundle deals for beginners?",
            ]
        );
        let transcript = engine.transcript();
        assert_eq!(transcript[transcript.len() - 2].text, "No, I need more information");
        assert!(transcript.iter().filter(|m| is_feedback_prompt(m)).all(|m| m.is_settled()));
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_submissions_all_land() {
        let mut engine = engine(ThemeName::Floating);
        engine.submit("first");
        tokio::time::sleep(Duration::from_millis(500)).await;
        engine.submit("second");
        assert_eq!(engine.transcript().len(), 4);

        engine.wait_idle().await;
        let transcript = engine.transcript();
        assert_eq!(transcript.len(), 8);
        assert_eq!(transcript.iter().filter(|m| is_feedback_prompt(m)).count(), 2);
        let ids: Vec<u64> = transcript.iter().map(|m| m.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test(start_paused = true)]
    async fn landed_replies_are_drained_without_waiting() {
        let mut engine = engine(ThemeName::Teal);
        engine.submit("hello");
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(engine.process_landed_replies(), 1);
        assert_eq!(engine.transcript().len(), 5);
        assert!(!engine.has_pending_replies());
    }
}
