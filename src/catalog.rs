//! Canned text for the Jone Jones storefront bot.

pub const WELCOME: &str = "Welcome to Jone Jones 3D Printers! How can I assist you today?";

pub const MENU_HEADER: &str = "Here are some questions you might be interested in:";

pub const FEEDBACK_PROMPT: &str = "Was this response helpful?";

pub const FOLLOW_UP_HEADER: &str = "Here are some follow-up questions:";

pub const HELPFUL_ACK: &str = "Yes, that was helpful";

pub const UNHELPFUL_ACK: &str = "No, I need more information";

pub const INITIAL_QUESTIONS: [&str; 5] = [
    "What types of 3D printers do you offer?",
    "How much does a basic 3D printer cost?",
    "Do you provide training for beginners?",
    "What materials can your 3D printers use?",
    "Do you offer customer support?",
];

pub const BOT_RESPONSES: [&str; 5] = [
    "Our 3D printers range from entry-level desktop models to industrial-grade machines. We offer FDM, SLA, and SLS technologies to suit various needs.",
    "Our basic 3D printer models start at $299 for hobbyists, while professional-grade printers can range from $2,000 to $10,000+.",
    "Yes, we provide comprehensive training for beginners. This includes online tutorials, live webinars, and in-person workshops at select locations.",
    "Our 3D printers support a wide range of materials including PLA, ABS, PETG, TPU, nylon, and various composite filaments. Some high-end models also work with metal powders.",
    "We offer 24/7 customer support via phone, email, and live chat. Our team of experts is always ready to assist you with any questions or issues.",
];

pub const HELPFUL_FOLLOW_UPS: [&str; 3] = [
    "Can you tell me more about the print quality of your 3D printers?",
    "What software is compatible with your 3D printers?",
    "How long does it typically take to print a small object?",
];

pub const UNHELPFUL_FOLLOW_UPS: [&str; 3] = [
    "Can you explain the difference between FDM and SLA printers?",
    "What are the maintenance requirements for your 3D printers?",
    "Do you offer any bundle deals for beginners?",
];

/// Pool the sampled quick replies are drawn from: the menu plus both
/// follow-up sets.
pub const QUICK_REPLY_POOL: [&str; 11] = [
    INITIAL_QUESTIONS[0],
    INITIAL_QUESTIONS[1],
    INITIAL_QUESTIONS[2],
    INITIAL_QUESTIONS[3],
    INITIAL_QUESTIONS[4],
    HELPFUL_FOLLOW_UPS[0],
    HELPFUL_FOLLOW_UPS[1],
    HELPFUL_FOLLOW_UPS[2],
    UNHELPFUL_FOLLOW_UPS[0],
    UNHELPFUL_FOLLOW_UPS[1],
    UNHELPFUL_FOLLOW_UPS[2],
];

/// Acknowledgment the user "says" after answering a feedback prompt
pub fn feedback_ack(is_helpful: bool) -> &'static str {
    if is_helpful { HELPFUL_ACK } else { UNHELPFUL_ACK }
}

/// Follow-up questions offered after a feedback answer
pub fn follow_ups(is_helpful: bool) -> &'static [&'static str] {
    if is_helpful {
        &HELPFUL_FOLLOW_UPS
    } else {
        &UNHELPFUL_FOLLOW_UPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn quick_reply_pool_has_no_duplicates() {
        let unique: HashSet<_> = QUICK_REPLY_POOL.iter().collect();
        assert_eq!(unique.len(), QUICK_REPLY_POOL.len());
    }

    #[test]
    fn follow_ups_follow_the_answer() {
        assert_eq!(follow_ups(true)[0], "Can you tell me more about the print quality of your 3D printers?");
        assert_eq!(follow_ups(false)[2], "Do you offer any bundle deals for beginners?");
        assert_eq!(feedback_ack(false), "No, I need more information");
    }
}
