//! Bordered panel with an inline `[key]─Title` label on its top edge

use crate::compositor::{compose, Anchor};
use crate::frame;
use crate::text;
use crate::ui::theme::Theme;
use ratatui::widgets::{Block, BorderType};

/// Box `content` into a panel `width` x `height` cells large, borders
/// included.
pub fn titled(
    content: &str,
    title: &str,
    key: &str,
    focused: bool,
    width: u16,
    height: u16,
    theme: &Theme,
) -> String {
    let border = theme.border(focused);
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner_w = usize::from(width.saturating_sub(2)).max(1);
    let inner_h = usize::from(height.saturating_sub(2)).max(1);
    let panel = frame::boxed(content, block, inner_w, inner_h);

    let label = format!(
        "{}{}",
        text::styled(&format!("[{key}]─"), border),
        text::styled(title, theme.accent())
    );
    compose(&label, &panel, Anchor::Begin, Anchor::Begin, 2, 0)
}
