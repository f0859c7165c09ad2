use super::anchor::{resolve_position, to_i32, Anchor};
use crate::text;

/// Composite `fg` onto `bg`.
///
/// The foreground is placed with [`resolve_position`] and clipped at all
/// four edges of the background. Partially covered background lines keep
/// their styling on both sides of the foreground.
///
/// The background is returned unchanged when the foreground would cover it
/// completely or when the placed foreground lies entirely outside it.
pub fn compose(
    fg: &str,
    bg: &str,
    x_anchor: Anchor,
    y_anchor: Anchor,
    x_offset: i32,
    y_offset: i32,
) -> String {
    let (fg_w, fg_h) = text::size(fg);
    let (bg_w, bg_h) = text::size(bg);

    let origin = resolve_position((fg_w, fg_h), (bg_w, bg_h), x_anchor, y_anchor, x_offset, y_offset);
    let (fg_w, fg_h, bg_w, bg_h) = (to_i32(fg_w), to_i32(fg_h), to_i32(bg_w), to_i32(bg_h));
    let (x_min, y_min) = (origin.x, origin.y);
    let (x_max, y_max) = (x_min.saturating_add(fg_w), y_min.saturating_add(fg_h));

    if (fg_w >= bg_w && fg_h >= bg_h) || x_min >= bg_w || y_min >= bg_h || x_max < 0 || y_max < 0 {
        tracing::trace!(x_min, y_min, fg_w, fg_h, bg_w, bg_h, "foreground suppressed");
        return bg.to_string();
    }

    let fg_lines: Vec<&str> = text::lines(fg).collect();
    let mut cursor = usize::try_from(y_min.saturating_neg()).unwrap_or(0);

    // Columns of the foreground left visible once both edges are clipped
    let visible = usize::try_from(x_max.min(bg_w) - x_min.max(0)).unwrap_or(0);
    let skip = usize::try_from(x_min.saturating_neg()).unwrap_or(0);
    let fg_cols = usize::try_from(fg_w).unwrap_or(0);

    let mut out = Vec::with_capacity(text::height(bg));
    for (row, bg_line) in text::lines(bg).enumerate() {
        let row = to_i32(row);
        if row < y_min || row >= y_max {
            out.push(bg_line.to_string());
            continue;
        }

        let mut line = String::new();
        if x_min > 0 {
            let left = usize::try_from(x_min).unwrap_or(0);
            line.push_str(&text::pad_right(&text::truncate_right(bg_line, left), left));
        }

        let mut piece = text::pad_right(fg_lines.get(cursor).copied().unwrap_or(""), fg_cols);
        if skip > 0 {
            piece = text::truncate_left(&piece, skip);
        }
        if x_max > bg_w {
            piece = text::truncate_right(&piece, visible);
        }
        line.push_str(&piece);

        if x_max <= bg_w {
            let right = usize::try_from(x_max).unwrap_or(0);
            line.push_str(&text::truncate_left(bg_line, right));
        }

        out.push(line);
        cursor += 1;
    }

    out.join("\n")
}
