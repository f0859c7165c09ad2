//! ANSI-aware measurement and truncation of styled terminal lines
//!
//! A line is a mix of escape runs (zero columns) and printable grapheme
//! clusters. Widths are measured per grapheme so double-width code points
//! count as two columns.
//!
//! ## Truncation
//!
//! - `truncate_right` keeps a column prefix and closes any style that was
//!   still open at the cut with a reset.
//! - `truncate_left` drops a column prefix but keeps every escape run it
//!   passed, so the remainder renders with the style active at the cut.
//!
//! A wide grapheme straddling a cut is replaced by the spaces it covers on
//! the kept side, keeping column positions stable.

mod ansi;
pub mod sgr;

pub use sgr::{styled, RESET};

use ansi::RunKind;
use ratatui::style::Style;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// One piece of a styled line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A zero-width escape sequence or control character run
    Escape(&'a str),
    /// A single printable grapheme cluster
    Grapheme(&'a str),
}

/// Split a line into escape runs and grapheme clusters, in order.
pub fn segments(line: &str) -> Vec<Segment<'_>> {
    styled_segments(line)
        .into_iter()
        .map(|(segment, _)| segment)
        .collect()
}

/// Segments paired with the SGR style in effect after each one.
pub fn styled_segments(line: &str) -> Vec<(Segment<'_>, Style)> {
    let mut out = Vec::new();
    for run in ansi::runs(line) {
        let piece = &line[run.bytes];
        match run.kind {
            RunKind::Escape => out.push((Segment::Escape(piece), run.style)),
            RunKind::Text => out.extend(
                piece
                    .graphemes(true)
                    .map(|g| (Segment::Grapheme(g), run.style)),
            ),
        }
    }
    out
}

/// Visual width of a single line.
pub fn width(line: &str) -> usize {
    segments(line)
        .into_iter()
        .map(|segment| match segment {
            Segment::Grapheme(g) => g.width(),
            Segment::Escape(_) => 0,
        })
        .sum()
}

/// Lines of a frame, with CRLF treated as LF.
pub fn lines(frame: &str) -> impl Iterator<Item = &str> {
    frame
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

pub fn height(frame: &str) -> usize {
    lines(frame).count()
}

/// Visual `(width, height)` of a frame: widest line and line count.
pub fn size(frame: &str) -> (usize, usize) {
    lines(frame).fold((0, 0), |(w, h), line| (w.max(width(line)), h + 1))
}

/// Keep the first `max_cols` columns of `line`.
pub fn truncate_right(line: &str, max_cols: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut cols = 0;
    let mut open = false;

    for (segment, style) in styled_segments(line) {
        match segment {
            Segment::Escape(seq) => {
                open = style != Style::default();
                out.push_str(seq);
            }
            Segment::Grapheme(g) => {
                let w = g.width();
                if cols + w > max_cols {
                    out.extend(std::iter::repeat(' ').take(max_cols - cols));
                    break;
                }
                out.push_str(g);
                cols += w;
            }
        }
    }

    if open {
        out.push_str(RESET);
    }
    out
}

/// Drop the first `skip_cols` columns of `line`.
pub fn truncate_left(line: &str, skip_cols: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut skipped = 0;

    for segment in segments(line) {
        match segment {
            Segment::Escape(seq) => out.push_str(seq),
            Segment::Grapheme(g) if skipped >= skip_cols => out.push_str(g),
            Segment::Grapheme(g) => {
                skipped += g.width();
                if skipped > skip_cols {
                    out.extend(std::iter::repeat(' ').take(skipped - skip_cols));
                }
            }
        }
    }

    out
}

/// Pad `line` with trailing spaces up to `cols` columns.
pub fn pad_right(line: &str, cols: usize) -> String {
    let w = width(line);
    let mut out = line.to_string();
    if w < cols {
        out.extend(std::iter::repeat(' ').take(cols - w));
    }
    out
}

/// Place frames side by side, centering shorter ones vertically.
pub fn join_horizontal(parts: &[&str]) -> String {
    let blocks: Vec<(Vec<&str>, usize)> = parts
        .iter()
        .map(|part| (lines(part).collect(), size(part).0))
        .collect();
    let height = blocks.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    let mut rows = vec![String::new(); height];
    for (block, w) in &blocks {
        let top = (height - block.len()) / 2;
        for (i, row) in rows.iter_mut().enumerate() {
            let line = i
                .checked_sub(top)
                .and_then(|j| block.get(j))
                .copied()
                .unwrap_or("");
            row.push_str(&pad_right(line, *w));
        }
    }
    rows.join("\n")
}

/// Stack frames, padding every line to the widest one.
pub fn join_vertical(parts: &[&str]) -> String {
    let width = parts.iter().map(|p| size(p).0).max().unwrap_or(0);
    parts
        .iter()
        .flat_map(|part| lines(part))
        .map(|line| pad_right(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Greedy word wrap of plain text. Words wider than `cols` get a line of
/// their own.
pub fn wrap(plain: &str, cols: usize) -> String {
    if cols == 0 {
        return plain.to_string();
    }
    let mut out: Vec<String> = Vec::new();
    for paragraph in lines(plain) {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            if !line.is_empty() && width(&line) + 1 + width(word) > cols {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        out.push(line);
    }
    out.join("\n")
}
