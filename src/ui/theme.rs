use crate::config::ThemeConfig;
use crate::floating::SurfaceStyle;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Resolved UI colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub accent: Color,
    pub divider: Color,
    pub error: Color,
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from_config(&ThemeConfig::default())
    }
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            text: config.text,
            accent: config.accent,
            divider: config.divider,
            error: config.error,
            dimmed: config.dimmed,
        }
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Border of a panel or input, highlighted when focused
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.accent()
        } else {
            Style::default()
        }
    }

    pub fn table_header(&self) -> Style {
        Style::default()
            .fg(self.divider)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn table_selected(&self) -> Style {
        Style::default().fg(self.text).bg(self.accent)
    }

    pub fn popup(&self) -> SurfaceStyle {
        SurfaceStyle {
            border_type: BorderType::Rounded,
            border: self.accent(),
            text: Style::default().fg(self.text),
        }
    }

    pub fn notification(&self) -> SurfaceStyle {
        SurfaceStyle {
            border_type: BorderType::Rounded,
            border: self.error(),
            text: Style::default().fg(self.text),
        }
    }
}
