use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::ui::commands::{SlashCommand, parse_slash_command};

pub const PLACEHOLDER: &str = "Type your message...";

/// Result returned when the user interacts with the composer
#[derive(Debug, PartialEq)]
pub enum ComposerResult {
    Submitted(String),
    Command(SlashCommand),
    /// Enter on an empty composer: use the highlighted control
    Activate,
    /// Move the control highlight by the given offset
    MoveSelection(isize),
    Exit,
    None,
}

/// Single-line input at the bottom of the chat window
#[derive(Debug, Clone)]
pub struct ConversationComposer {
    content: String,
    /// Cursor position in characters
    cursor: usize,
    accent: Color,
}

impl ConversationComposer {
    pub fn new(accent: Color) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            accent,
        }
    }

    /// Handle key input
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerResult {
        if key.kind != KeyEventKind::Press {
            return ComposerResult::None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                ComposerResult::Exit
            }
            KeyCode::Esc => ComposerResult::Exit,
            KeyCode::Enter => {
                if self.content.trim().is_empty() {
                    return ComposerResult::Activate;
                }
                let content = std::mem::take(&mut self.content);
                self.cursor = 0;
                match parse_slash_command(&content) {
                    Some(command) => ComposerResult::Command(command),
                    None => ComposerResult::Submitted(content),
                }
            }
            KeyCode::Up => ComposerResult::MoveSelection(-1),
            KeyCode::Down => ComposerResult::MoveSelection(1),
            KeyCode::Char(c) => {
                self.insert_char(c);
                ComposerResult::None
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.content.remove(at);
                }
                ComposerResult::None
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_offset(self.cursor);
                    self.content.remove(at);
                }
                ComposerResult::None
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                ComposerResult::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_count());
                ComposerResult::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                ComposerResult::None
            }
            KeyCode::End => {
                self.cursor = self.char_count();
                ComposerResult::None
            }
            _ => ComposerResult::None,
        }
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map_or(self.content.len(), |(i, _)| i)
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Widget for &ConversationComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(" Send ↵ ");

        let inner_area = block.inner(area);
        block.render(area, buf);

        let line = if self.content.is_empty() {
            Line::from(vec![Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray))])
        } else {
            let mut content = self.content.clone();
            content.insert(self.byte_offset(self.cursor), '▌');
            Line::from(vec![Span::raw(content)])
        };
        buf.set_line(inner_area.x, inner_area.y, &line, inner_area.width);
    }
}
