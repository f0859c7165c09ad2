//! Escape-run tokenizer driven by `vte`
//!
//! The parser is fed one byte at a time so that every callback can be tied
//! back to the bytes that produced it. Printable characters come from
//! `print`; every other dispatch closes an escape run. SGR sequences update
//! the running style as they are dispatched.

use super::sgr;
use ratatui::style::Style;
use std::ops::Range;
use vte::{Params, Parser, Perform};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunKind {
    Text,
    Escape,
}

/// A byte range of a line and the style in effect once it has been read
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Run {
    pub kind: RunKind,
    pub bytes: Range<usize>,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dispatch {
    Pending,
    Print,
    Escape,
}

#[derive(Debug)]
struct Recorder {
    last: Dispatch,
    style: Style,
}

impl Perform for Recorder {
    fn print(&mut self, _c: char) {
        self.last = Dispatch::Print;
    }

    fn execute(&mut self, _byte: u8) {
        self.last = Dispatch::Escape;
    }

    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], ignore: bool, action: char) {
        if action == 'm' && intermediates.is_empty() && !ignore {
            self.style = sgr::apply(self.style, params);
        }
        self.last = Dispatch::Escape;
    }

    fn esc_dispatch(&mut self, _intermediates: &[u8], _ignore: bool, _byte: u8) {
        self.last = Dispatch::Escape;
    }

    // An ST-terminated string stays open until the `ESC \` that ends it
    fn osc_dispatch(&mut self, _params: &[&[u8]], bell_terminated: bool) {
        if bell_terminated {
            self.last = Dispatch::Escape;
        }
    }
}

/// Split `line` into text and escape runs. Adjacent printable characters
/// share one text run; bytes left over by an unfinished sequence at the end
/// become a trailing escape run.
pub(crate) fn runs(line: &str) -> Vec<Run> {
    let mut parser = Parser::new();
    let mut recorder = Recorder {
        last: Dispatch::Pending,
        style: Style::default(),
    };
    let mut out: Vec<Run> = Vec::new();
    let mut start = 0;

    for (i, byte) in line.bytes().enumerate() {
        parser.advance(&mut recorder, &[byte]);
        let end = i + 1;

        match std::mem::replace(&mut recorder.last, Dispatch::Pending) {
            Dispatch::Pending => {}
            Dispatch::Escape => {
                push(&mut out, RunKind::Escape, start..end, recorder.style);
                start = end;
            }
            Dispatch::Print => {
                let begin = line[..end]
                    .char_indices()
                    .next_back()
                    .map_or(start, |(pos, _)| pos.max(start));
                if begin > start {
                    push(&mut out, RunKind::Escape, start..begin, recorder.style);
                }
                push(&mut out, RunKind::Text, begin..end, recorder.style);
                start = end;
            }
        }
    }

    if start < line.len() {
        push(&mut out, RunKind::Escape, start..line.len(), recorder.style);
    }
    out
}

fn push(out: &mut Vec<Run>, kind: RunKind, bytes: Range<usize>, style: Style) {
    if let Some(last) = out.last_mut() {
        if kind == RunKind::Text && last.kind == RunKind::Text && last.bytes.end == bytes.start {
            last.bytes.end = bytes.end;
            return;
        }
    }
    out.push(Run { kind, bytes, style });
}
