use crate::config::KeyBinding;
use crate::text;
use crate::ui::theme::Theme;

const SEPARATOR: &str = " • ";

/// Key hints on a single dimmed line, cut to `width` columns.
pub fn help_line(bindings: &[KeyBinding], width: usize, theme: &Theme) -> String {
    let line = bindings
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(SEPARATOR);
    let line = text::pad_right(&text::truncate_right(&line, width), width);
    text::styled(&line, theme.dimmed())
}
