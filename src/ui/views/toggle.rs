use crate::config::ToggleKeys;
use crate::text;
use crate::ui::theme::Theme;
use crossterm::event::KeyEvent;

/// A checkbox switched with the toggle key
#[derive(Debug, Clone)]
pub struct Toggle {
    value: bool,
    pub focused: bool,
    keys: ToggleKeys,
}

impl Toggle {
    pub fn new(value: bool, keys: ToggleKeys) -> Self {
        Self {
            value,
            focused: false,
            keys,
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.keys.toggle.matches(key) {
            self.value = !self.value;
            return true;
        }
        false
    }

    pub fn view(&self, theme: &Theme) -> String {
        let checkbox = if self.value { "[x]" } else { "[ ]" };
        if self.focused {
            text::styled(checkbox, theme.accent())
        } else {
            checkbox.to_string()
        }
    }
}
