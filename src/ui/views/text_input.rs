//! Single-line text input with an optional masked echo

use crate::frame;
use crate::text;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use unicode_segmentation::UnicodeSegmentation;

const MASK: char = '•';

pub type Validator = fn(&str) -> Result<(), String>;

#[derive(Debug, Clone)]
pub struct TextInput {
    value: String,
    /// Cursor position in graphemes
    cursor: usize,
    pub placeholder: String,
    pub masked: bool,
    pub focused: bool,
    /// Visible width in columns
    pub width: usize,
    validator: Option<Validator>,
    error: Option<String>,
}

impl TextInput {
    pub fn new(width: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: String::new(),
            masked: false,
            focused: false,
            width,
            validator: None,
            error: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = placeholder.to_string();
        self
    }

    pub fn with_mask(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.len();
        self.validate();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_mask(&mut self) {
        self.masked = !self.masked;
    }

    fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    fn byte_offset(&self, grapheme: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(grapheme)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn validate(&mut self) {
        self.error = self.validator.and_then(|v| v(&self.value).err());
    }

    /// Apply an editing key. Returns whether the key was used.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let start = self.byte_offset(self.cursor - 1);
                let end = self.byte_offset(self.cursor);
                self.value.replace_range(start..end, "");
                self.cursor -= 1;
            }
            KeyCode::Delete if self.cursor < self.len() => {
                let start = self.byte_offset(self.cursor);
                let end = self.byte_offset(self.cursor + 1);
                self.value.replace_range(start..end, "");
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        self.validate();
        true
    }

    /// The input line without a border, `width` columns wide.
    pub fn view_line(&self, theme: &Theme) -> String {
        if self.value.is_empty() && !self.placeholder.is_empty() {
            let shown = text::truncate_right(&self.placeholder, self.width);
            let shown = text::pad_right(&shown, self.width);
            return text::styled(&shown, theme.dimmed());
        }

        let shown: Vec<String> = self
            .value
            .graphemes(true)
            .map(|g| if self.masked { MASK.to_string() } else { g.to_string() })
            .chain(std::iter::once(" ".to_string()))
            .collect();

        // keep the cursor in view
        let start = (self.cursor + 1).saturating_sub(self.width);
        let mut line = String::new();
        for (i, g) in shown.iter().enumerate().skip(start).take(self.width) {
            if self.focused && i == self.cursor {
                line.push_str(&text::styled(g, Style::default().add_modifier(Modifier::REVERSED)));
            } else {
                line.push_str(g);
            }
        }
        text::pad_right(&line, self.width)
    }

    /// The input inside a border, highlighted when focused.
    pub fn view(&self, theme: &Theme) -> String {
        let block = Block::bordered()
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(theme.border(self.focused));
        frame::boxed(&self.view_line(theme), block, self.width, 1)
    }
}
