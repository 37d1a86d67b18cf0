use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use tracing::debug;

use crate::config::Config;
use crate::conversation::ConversationEngine;
use crate::events::ChatEvent;
use crate::theme::ThemeConfig;
use crate::ui::commands::{SlashCommand, get_help_text};
use crate::ui::composer::{ComposerResult, ConversationComposer};
use crate::ui::transcript::{Control, TranscriptView, controls};

/// Actions that can be requested by the chat view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    None,
    Exit,
}

/// Wires the composer and transcript to the conversation engine
pub struct ChatView {
    engine: ConversationEngine,
    composer: ConversationComposer,
    theme: ThemeConfig,
    show_timestamps: bool,
    show_help: bool,
    /// Highlighted control of the latest message
    highlight: usize,
}

impl ChatView {
    pub fn new(config: &Config) -> Self {
        let theme = config.theme();
        let engine = ConversationEngine::new(&theme, config.reply_delay(), config.seed);
        Self {
            composer: ConversationComposer::new(theme.colors.accent),
            engine,
            theme,
            show_timestamps: config.ui.show_timestamps,
            show_help: false,
            highlight: 0,
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> ChatAction {
        let result = self.composer.handle_key(key);
        self.engine.set_pending_input(self.composer.content());

        match result {
            ComposerResult::Submitted(text) => {
                self.dispatch(ChatEvent::Submit(text));
            }
            ComposerResult::Activate => {
                if let Some(control) = self.highlighted_control() {
                    let event = match control {
                        Control::Option(text) => ChatEvent::SelectOption(text),
                        Control::Helpful(is_helpful) => ChatEvent::RecordFeedback(is_helpful),
                    };
                    self.dispatch(event);
                }
            }
            ComposerResult::MoveSelection(delta) => self.move_highlight(delta),
            ComposerResult::Command(SlashCommand::Help) => self.show_help = !self.show_help,
            ComposerResult::Command(SlashCommand::Quit) | ComposerResult::Exit => {
                return ChatAction::Exit;
            }
            ComposerResult::None => {}
        }

        ChatAction::None
    }

    fn dispatch(&mut self, event: ChatEvent) {
        debug!(event = event.describe(), "chat event");
        let before = self.engine.transcript().len();
        self.engine.apply(event);
        if self.engine.transcript().len() != before {
            self.highlight = 0;
        }
    }

    /// Pull in replies whose delay has elapsed (called every tick)
    pub fn on_tick(&mut self) {
        if self.engine.process_landed_replies() > 0 {
            self.highlight = 0;
        }
    }

    fn active_controls(&self) -> Vec<Control> {
        self.engine.actionable_prompt().map(controls).unwrap_or_default()
    }

    fn highlighted_control(&self) -> Option<Control> {
        self.active_controls().into_iter().nth(self.highlight)
    }

    fn move_highlight(&mut self, delta: isize) {
        let count = self.active_controls().len() as isize;
        if count == 0 {
            return;
        }
        self.highlight = (self.highlight as isize + delta).rem_euclid(count) as usize;
    }

    pub fn engine(&self) -> &ConversationEngine {
        &self.engine
    }
}

impl Widget for &ChatView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(5),    // Transcript
                Constraint::Length(1), // Hints
                Constraint::Length(3), // Composer
            ])
            .split(area);

        let highlight = (!self.active_controls().is_empty()).then_some(self.highlight);
        TranscriptView::new(self.engine.conversation(), &self.theme)
            .highlight(highlight)
            .show_timestamps(self.show_timestamps)
            .typing(self.engine.has_pending_replies())
            .render(chunks[0], buf);

        let hint = if self.show_help {
            get_help_text()
        } else {
            "/help for keys".to_string()
        };
        let hint_style = Style::default().fg(self.theme.colors.muted);
        let hint_line = Line::from(vec![Span::styled(hint, hint_style)]);
        buf.set_line(chunks[1].x, chunks[1].y, &hint_line, chunks[1].width);

        self.composer.render(chunks[2], buf);
    }
}
