//! SGR (Select Graphic Rendition) encoding and decoding for ratatui styles

use ratatui::style::{Color, Modifier, Style};
use vte::Params;

pub const RESET: &str = "\x1b[0m";

const MODIFIER_CODES: [(Modifier, u8); 9] = [
    (Modifier::BOLD, 1),
    (Modifier::DIM, 2),
    (Modifier::ITALIC, 3),
    (Modifier::UNDERLINED, 4),
    (Modifier::SLOW_BLINK, 5),
    (Modifier::RAPID_BLINK, 6),
    (Modifier::REVERSED, 7),
    (Modifier::HIDDEN, 8),
    (Modifier::CROSSED_OUT, 9),
];

const BASIC: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
];

const BRIGHT: [Color; 8] = [
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

/// Encode a style as a single SGR escape. Unset and `Reset` colors are
/// omitted; an empty style encodes to an empty string.
pub fn encode(style: Style) -> String {
    let mut codes: Vec<String> = Vec::new();

    for (modifier, code) in MODIFIER_CODES {
        if style.add_modifier.contains(modifier) {
            codes.push(code.to_string());
        }
    }
    if let Some(fg) = style.fg {
        push_color(&mut codes, fg, 30);
    }
    if let Some(bg) = style.bg {
        push_color(&mut codes, bg, 40);
    }

    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

fn push_color(codes: &mut Vec<String>, color: Color, base: u8) {
    if let Some(i) = BASIC.iter().position(|c| *c == color) {
        codes.push((base + i as u8).to_string());
    } else if let Some(i) = BRIGHT.iter().position(|c| *c == color) {
        codes.push((base + 60 + i as u8).to_string());
    } else {
        match color {
            Color::Indexed(n) => codes.push(format!("{};5;{}", base + 8, n)),
            Color::Rgb(r, g, b) => codes.push(format!("{};2;{};{};{}", base + 8, r, g, b)),
            _ => {}
        }
    }
}

/// Apply SGR parameters, as dispatched by `vte`, on top of `style`.
///
/// Extended colors are accepted in both the `38;5;n` and the `38:5:n`
/// forms. An empty parameter list resets.
pub fn apply(mut style: Style, params: &Params) -> Style {
    if params.is_empty() {
        return Style::default();
    }

    let mut iter = params.iter();
    while let Some(param) = iter.next() {
        match param {
            [0] => style = Style::default(),
            [code @ 1..=9] => {
                if let Some((modifier, _)) = MODIFIER_CODES.iter().find(|(_, c)| u16::from(*c) == *code) {
                    style = style.add_modifier(*modifier);
                }
            }
            [22] => style = style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            [23] => style = style.remove_modifier(Modifier::ITALIC),
            [24] => style = style.remove_modifier(Modifier::UNDERLINED),
            [25] => style = style.remove_modifier(Modifier::SLOW_BLINK | Modifier::RAPID_BLINK),
            [27] => style = style.remove_modifier(Modifier::REVERSED),
            [28] => style = style.remove_modifier(Modifier::HIDDEN),
            [29] => style = style.remove_modifier(Modifier::CROSSED_OUT),
            [code @ 30..=37] => style = style.fg(BASIC[usize::from(*code - 30)]),
            [code @ 40..=47] => style = style.bg(BASIC[usize::from(*code - 40)]),
            [code @ 90..=97] => style = style.fg(BRIGHT[usize::from(*code - 90)]),
            [code @ 100..=107] => style = style.bg(BRIGHT[usize::from(*code - 100)]),
            [39] => style = style.fg(Color::Reset),
            [49] => style = style.bg(Color::Reset),
            [code @ (38 | 48), sub @ ..] => {
                let color = if sub.is_empty() {
                    extended_color(&take_extended(&mut iter))
                } else {
                    extended_color(sub)
                };
                if let Some(color) = color {
                    style = if *code == 38 { style.fg(color) } else { style.bg(color) };
                }
            }
            _ => {}
        }
    }

    style
}

/// Pull `5;n` or `2;r;g;b` out of semicolon-separated parameters.
fn take_extended<'a>(iter: &mut impl Iterator<Item = &'a [u16]>) -> Vec<u16> {
    let mut values = Vec::with_capacity(4);
    let Some(&[kind, ..]) = iter.next() else {
        return values;
    };
    values.push(kind);
    let count = match kind {
        5 => 1,
        2 => 3,
        _ => 0,
    };
    values.extend(iter.by_ref().take(count).filter_map(|p| p.first().copied()));
    values
}

/// Decode `[5, n]`, `[2, r, g, b]` or `[2, colorspace, r, g, b]`.
fn extended_color(values: &[u16]) -> Option<Color> {
    let byte = |i: usize| values.get(i).and_then(|v| u8::try_from(*v).ok());
    match values.first()? {
        5 => byte(1).map(Color::Indexed),
        2 if values.len() >= 5 => Some(Color::Rgb(byte(2)?, byte(3)?, byte(4)?)),
        2 => Some(Color::Rgb(byte(1)?, byte(2)?, byte(3)?)),
        _ => None,
    }
}

/// Wrap every line of `text` in the SGR for `style`, resetting at line end.
pub fn styled(text: &str, style: Style) -> String {
    let open = encode(style);
    if open.is_empty() {
        return text.to_string();
    }
    super::lines(text)
        .map(|line| format!("{open}{line}{RESET}"))
        .collect::<Vec<_>>()
        .join("\n")
}
