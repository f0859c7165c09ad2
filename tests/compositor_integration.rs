use nmtui::compositor::{compose, resolve_position, Anchor};
use nmtui::config::KeyBinding;
use nmtui::floating::{FloatingSurface, SurfaceStyle};
use nmtui::text;
use nmtui::ui::views::TextContent;
use pretty_assertions::assert_eq;

fn dots(width: usize, height: usize) -> String {
    vec![".".repeat(width); height].join("\n")
}

#[test]
fn centered_block_in_dot_field() {
    let bg = dots(10, 5);
    let out = compose("ABC", &bg, Anchor::Center, Anchor::Center, 0, 0);
    assert_eq!(
        out,
        "..........\n..........\n...ABC....\n..........\n.........."
    );
}

#[test]
fn anchors_resolve_against_background() {
    let p = resolve_position((4, 2), (10, 6), Anchor::End, Anchor::Center, -1, 1);
    assert_eq!((p.x, p.y), (5, 3));
}

#[test]
fn stacked_overlays_keep_background_shape() {
    let bg = dots(30, 8);
    let mut popup = FloatingSurface::new(KeyBinding::new(&["esc"], "esc", "close"))
        .with_size(10, 2)
        .with_anchors(Anchor::Center, Anchor::Center);
    let _ = popup.open(Box::new(TextContent::new("hi")), "P");
    let mut note = FloatingSurface::new(KeyBinding::new(&[], "", ""))
        .with_anchors(Anchor::End, Anchor::Begin)
        .with_offsets(-1, 1);
    let _ = note.open(Box::new(TextContent::new("note")), "");

    let style = SurfaceStyle::default();
    let out = note.place(&popup.place(&bg, &style), &style);

    assert_eq!(text::size(&out), (30, 8));
    for line in text::lines(&out) {
        assert_eq!(text::width(line), 30);
    }
    let lines: Vec<&str> = text::lines(&out).collect();
    assert_eq!(lines[0], dots(30, 1));
    assert!(lines[1].ends_with("╭[  ]╮."));
    assert!(lines[2].ends_with("│note│."));
    assert!(lines[2].contains("╭──[ P ]───╮"));
}

#[test]
fn styled_background_survives_clipping() {
    let bg = format!("\x1b[31m{}\x1b[0m\n{}", "#".repeat(8), "#".repeat(8));
    let out = compose("XY", &bg, Anchor::Begin, Anchor::Begin, 3, 0);
    let first = text::lines(&out).next().unwrap_or_default();
    assert_eq!(text::width(first), 8);
    assert!(first.starts_with("\x1b[31m###"));
    assert!(first.contains("XY"));
}
