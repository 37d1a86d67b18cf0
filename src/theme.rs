use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

use crate::conversation::ReplyPolicy;

/// Built-in chat themes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
    EnumString, EnumIter, AsRefStr, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ThemeName {
    /// Full-page teal window with the initial question menu
    #[default]
    Teal,
    /// Floating window with sampled quick questions
    Floating,
    /// Support panel with staggered replies and no feedback prompts
    Slate,
}

/// Where the quick-question option sets come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionPoolStrategy {
    /// The fixed five-entry initial question menu
    FixedMenu,
    /// A fresh shuffle of the quick-reply pool
    Sampled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub accent: Color,
    pub user_text: Color,
    pub bot_text: Color,
    pub muted: Color,
}

/// Everything that differs between the chat variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConfig {
    pub name: ThemeName,
    pub title: &'static str,
    pub colors: ThemeColors,
    pub feedback_enabled: bool,
    pub option_pool_strategy: OptionPoolStrategy,
}

impl ThemeName {
    pub fn config(self) -> ThemeConfig {
        match self {
            ThemeName::Teal => ThemeConfig {
                name: self,
                title: "Jone Jones 3D Printers Chat",
                colors: ThemeColors {
                    accent: Color::Rgb(0x00, 0x98, 0xa0),
                    user_text: Color::Rgb(0x00, 0x98, 0xa0),
                    bot_text: Color::Gray,
                    muted: Color::DarkGray,
                },
                feedback_enabled: true,
                option_pool_strategy: OptionPoolStrategy::FixedMenu,
            },
            ThemeName::Floating => ThemeConfig {
                name: self,
                title: "Jone Jones 3D Printers",
                colors: ThemeColors {
                    accent: Color::Rgb(0x00, 0x83, 0x8f),
                    user_text: Color::Rgb(0x00, 0x83, 0x8f),
                    bot_text: Color::White,
                    muted: Color::DarkGray,
                },
                feedback_enabled: true,
                option_pool_strategy: OptionPoolStrategy::Sampled,
            },
            ThemeName::Slate => ThemeConfig {
                name: self,
                title: "Jone Jones Support",
                colors: ThemeColors {
                    accent: Color::Rgb(0x45, 0x5a, 0x64),
                    user_text: Color::LightBlue,
                    bot_text: Color::White,
                    muted: Color::DarkGray,
                },
                feedback_enabled: false,
                option_pool_strategy: OptionPoolStrategy::Sampled,
            },
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ThemeName::Teal => "question menu, one reply, feedback prompt",
            ThemeName::Floating => "sampled quick questions, one reply, feedback prompt",
            ThemeName::Slate => "sampled quick questions, two staggered replies, follow-up options",
        }
    }
}

impl ThemeConfig {
    /// Reply policy implied by the feedback and option pool settings
    pub fn reply_policy(&self) -> ReplyPolicy {
        match (self.feedback_enabled, self.option_pool_strategy) {
            (true, OptionPoolStrategy::FixedMenu) => ReplyPolicy::MenuWithFeedback,
            (true, OptionPoolStrategy::Sampled) => ReplyPolicy::SingleWithFeedback,
            (false, _) => ReplyPolicy::StaggeredWithOptions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn every_theme_maps_to_a_distinct_policy() {
        let policies: Vec<_> = ThemeName::iter().map(|t| t.config().reply_policy()).collect();
        assert_eq!(
            policies,
            vec![
                ReplyPolicy::MenuWithFeedback,
                ReplyPolicy::SingleWithFeedback,
                ReplyPolicy::StaggeredWithOptions,
            ]
        );
    }

    #[test]
    fn theme_names_parse_case_insensitively() {
        assert_eq!(ThemeName::from_str("Floating").unwrap(), ThemeName::Floating);
        assert_eq!(ThemeName::from_str("slate").unwrap(), ThemeName::Slate);
        assert!(ThemeName::from_str("neon").is_err());
        let name: &'static str = ThemeName::Teal.into();
        assert_eq!(name, "teal");
    }
}
