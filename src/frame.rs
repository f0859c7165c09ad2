//! Bridge between ratatui buffers and string frames
//!
//! Views draw ordinary ratatui widgets into an off-screen [`Buffer`] and
//! serialize it with [`from_buffer`]. Frames are then composited as
//! strings, and the final root frame is written back into the terminal
//! buffer with [`blit`].

use crate::text::{self, sgr, Segment, RESET};
use ratatui::buffer::{Buffer, Cell};
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

/// Serialize a buffer into a frame, one line per buffer row.
pub fn from_buffer(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(usize::from(area.height));

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        let mut current = Style::default();
        let mut continuation = 0;

        for x in area.left()..area.right() {
            if continuation > 0 {
                continuation -= 1;
                continue;
            }
            let cell = &buf[(x, y)];
            let style = cell_style(cell);
            if style != current {
                if current != Style::default() {
                    line.push_str(RESET);
                }
                line.push_str(&sgr::encode(style));
                current = style;
            }

            let symbol = cell.symbol();
            match symbol.width() {
                0 => line.push(' '),
                w => {
                    line.push_str(symbol);
                    continuation = w - 1;
                }
            }
        }

        if current != Style::default() {
            line.push_str(RESET);
        }
        lines.push(line);
    }

    lines.join("\n")
}

fn cell_style(cell: &Cell) -> Style {
    let mut style = Style::default().add_modifier(cell.modifier);
    if cell.fg != Color::Reset {
        style = style.fg(cell.fg);
    }
    if cell.bg != Color::Reset {
        style = style.bg(cell.bg);
    }
    style
}

/// Write a frame into `buf` starting at the top-left of `area`, clipping at
/// its edges.
pub fn blit(frame: &str, area: Rect, buf: &mut Buffer) {
    let area = area.intersection(buf.area);

    for (dy, line) in text::lines(frame).enumerate() {
        let Ok(dy) = u16::try_from(dy) else { break };
        if dy >= area.height {
            break;
        }
        let y = area.y + dy;
        let mut x = area.x;

        for (segment, style) in text::styled_segments(line) {
            match segment {
                Segment::Escape(_) => {}
                Segment::Grapheme(g) => {
                    let w = u16::try_from(g.width()).unwrap_or(u16::MAX);
                    if w == 0 {
                        continue;
                    }
                    if x.saturating_add(w) > area.right() {
                        break;
                    }
                    // patch over whatever style the cell already has
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol(g).set_style(style);
                    }
                    for i in 1..w {
                        if let Some(cell) = buf.cell_mut((x + i, y)) {
                            cell.reset();
                        }
                    }
                    x += w;
                }
            }
        }
    }
}

/// Render a widget off-screen into a `width` x `height` frame.
pub fn render<W: Widget>(widget: W, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    from_buffer(&buf)
}

pub fn render_stateful<W: StatefulWidget>(
    widget: W,
    state: &mut W::State,
    width: u16,
    height: u16,
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf, state);
    from_buffer(&buf)
}

/// Draw `content` inside `block`.
///
/// The inner area is `width` x `height` when positive, otherwise the
/// content's natural size. Content is centered on both axes and clipped
/// when it does not fit.
pub fn boxed(content: &str, block: Block<'_>, width: usize, height: usize) -> String {
    let (natural_w, natural_h) = text::size(content);
    let inner_w = if width > 0 { width } else { natural_w };
    let inner_h = if height > 0 { height } else { natural_h };

    let outer_w = u16::try_from(inner_w + 2).unwrap_or(u16::MAX);
    let outer_h = u16::try_from(inner_h + 2).unwrap_or(u16::MAX);
    let area = Rect::new(0, 0, outer_w, outer_h);
    let mut buf = Buffer::empty(area);
    let inner = block.inner(area);
    block.render(area, &mut buf);

    let content_h = u16::try_from(natural_h).unwrap_or(u16::MAX);
    let top = inner.height.saturating_sub(content_h) / 2;

    for (i, line) in text::lines(content).enumerate() {
        let Ok(dy) = u16::try_from(i) else { break };
        let dy = dy.saturating_add(top);
        if dy >= inner.height {
            break;
        }
        let line_w = u16::try_from(text::width(line)).unwrap_or(u16::MAX);
        let indent = inner.width.saturating_sub(line_w) / 2;
        let row = Rect::new(inner.x + indent, inner.y + dy, inner.width - indent, 1);
        blit(line, row, &mut buf);
    }

    from_buffer(&buf)
}
