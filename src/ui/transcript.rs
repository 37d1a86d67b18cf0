//! Transcript display component

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::conversation::transcript::Conversation;
use crate::conversation::{Message, Prompt};
use crate::events::Sender;
use crate::theme::ThemeConfig;

/// A clickable element attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Option(String),
    Helpful(bool),
}

impl Control {
    pub fn label(&self) -> &str {
        match self {
            Control::Option(text) => text,
            Control::Helpful(true) => "👍 Yes",
            Control::Helpful(false) => "👎 No",
        }
    }
}

/// Controls a prompt renders, in display order
pub fn controls(prompt: &Prompt) -> Vec<Control> {
    match prompt {
        Prompt::Options { choices, .. } => choices.iter().cloned().map(Control::Option).collect(),
        Prompt::Feedback { .. } => vec![Control::Helpful(true), Control::Helpful(false)],
    }
}

/// Renders the transcript, newest lines at the bottom
pub struct TranscriptView<'a> {
    conversation: &'a Conversation,
    theme: &'a ThemeConfig,
    highlight: Option<usize>,
    show_timestamps: bool,
    typing: bool,
}

impl<'a> TranscriptView<'a> {
    pub fn new(conversation: &'a Conversation, theme: &'a ThemeConfig) -> Self {
        Self {
            conversation,
            theme,
            highlight: None,
            show_timestamps: true,
            typing: false,
        }
    }

    /// Highlighted control of the latest message
    pub fn highlight(mut self, highlight: Option<usize>) -> Self {
        self.highlight = highlight;
        self
    }

    pub fn show_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }

    /// Show the "typing" indicator while replies are pending
    pub fn typing(mut self, typing: bool) -> Self {
        self.typing = typing;
        self
    }

    fn render_message(&self, message: &Message, width: u16, actionable: bool) -> Vec<Line<'a>> {
        let colors = &self.theme.colors;
        let mut lines = Vec::new();

        let mut header = format!("{} {}", message.sender.icon(), message.sender);
        if self.show_timestamps {
            header.push(' ');
            header.push_str(&message.timestamp.format("%H:%M:%S").to_string());
        }
        lines.push(Line::from(vec![Span::styled(header, Style::default().fg(colors.muted))]));

        let text_style = match message.sender {
            Sender::User => Style::default().fg(colors.user_text),
            Sender::Bot => Style::default().fg(colors.bot_text),
        };
        for content_line in wrap_text(&message.text, width.saturating_sub(2) as usize) {
            lines.push(Line::from(vec![Span::raw("  "), Span::styled(content_line, text_style)]));
        }

        if let Some(prompt) = &message.prompt {
            for (index, control) in controls(prompt).iter().enumerate() {
                let style = if !actionable {
                    Style::default().fg(colors.muted)
                } else if self.highlight == Some(index) {
                    Style::default()
                        .fg(colors.accent)
                        .add_modifier(Modifier::REVERSED | Modifier::BOLD)
                } else {
                    Style::default().fg(colors.accent)
                };
                let label = match control {
                    Control::Option(text) => format!("[{}] {}", index + 1, text),
                    Control::Helpful(_) => format!("[{}]", control.label()),
                };
                let wrapped_label = wrap_text(&label, width.saturating_sub(4) as usize);
                for (i, wrapped) in wrapped_label.into_iter().enumerate() {
                    let indent = if i == 0 { "    " } else { "        " };
                    lines.push(Line::from(vec![Span::raw(indent), Span::styled(wrapped, style)]));
                }
            }
        }

        lines
    }
}

impl Widget for TranscriptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.colors.accent))
            .title(format!(" {} ", self.theme.title));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let mut all_lines: Vec<Line> = Vec::new();
        for message in self.conversation.messages() {
            let actionable = self.conversation.is_actionable(message.id);
            all_lines.extend(self.render_message(message, inner_area.width, actionable));
            all_lines.push(Line::from(""));
        }

        if self.typing {
            all_lines.push(Line::from(vec![Span::styled(
                "🤖 typing...",
                Style::default().fg(self.theme.colors.muted).add_modifier(Modifier::ITALIC),
            )]));
        }

        // Keep the newest lines in view
        let height = inner_area.height as usize;
        let start = all_lines.len().saturating_sub(height);
        for (i, line) in all_lines[start..].iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
        }
    }
}

/// Wrap text to fit within the given width
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let current_width = current_line.chars().count();
        if current_width + word.chars().count() < width {
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        } else {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
            }
            current_line.push_str(word);
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
