/// Alignment of a foreground along one axis of its background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Begin,
    Center,
    End,
}

impl Anchor {
    /// Origin of a span of length `fg` inside a span of length `bg`.
    pub fn resolve(self, fg: i32, bg: i32) -> i32 {
        match self {
            Anchor::Begin => 0,
            // integer division truncates toward zero, also for negative gaps
            Anchor::Center => (bg - fg) / 2,
            Anchor::End => bg - fg,
        }
    }
}

/// Top-left corner of a foreground in background coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
}

/// Resolve anchors plus offsets into a placement. No clamping is applied;
/// the result may lie partly or fully outside the background. Offsets
/// saturate at the `i32` range.
pub fn resolve_position(
    fg_size: (usize, usize),
    bg_size: (usize, usize),
    x_anchor: Anchor,
    y_anchor: Anchor,
    x_offset: i32,
    y_offset: i32,
) -> Placement {
    let (fg_w, fg_h) = (to_i32(fg_size.0), to_i32(fg_size.1));
    let (bg_w, bg_h) = (to_i32(bg_size.0), to_i32(bg_size.1));

    Placement {
        x: x_anchor.resolve(fg_w, bg_w).saturating_add(x_offset),
        y: y_anchor.resolve(fg_h, bg_h).saturating_add(y_offset),
    }
}

pub(crate) fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_is_origin() {
        let p = resolve_position((3, 1), (10, 5), Anchor::Begin, Anchor::Begin, 0, 0);
        assert_eq!(p, Placement { x: 0, y: 0 });
    }

    #[test]
    fn test_end_aligns_far_edges() {
        let p = resolve_position((3, 2), (10, 5), Anchor::End, Anchor::End, 0, 0);
        assert_eq!(p, Placement { x: 7, y: 3 });
    }

    #[test]
    fn test_center_truncates_odd_difference() {
        let p = resolve_position((3, 2), (10, 5), Anchor::Center, Anchor::Center, 0, 0);
        assert_eq!(p, Placement { x: 3, y: 1 });
    }

    #[test]
    fn test_center_even_difference() {
        let p = resolve_position((4, 1), (10, 5), Anchor::Center, Anchor::Center, 0, 0);
        assert_eq!(p, Placement { x: 3, y: 2 });
    }

    #[test]
    fn test_center_truncates_toward_zero_when_larger() {
        assert_eq!(Anchor::Center.resolve(13, 10), -1);
    }

    #[test]
    fn test_offsets_are_added_without_clamping() {
        let p = resolve_position((3, 1), (10, 5), Anchor::End, Anchor::Begin, -1, 1);
        assert_eq!(p, Placement { x: 6, y: 1 });

        let p = resolve_position((3, 1), (10, 5), Anchor::Begin, Anchor::Begin, -20, 40);
        assert_eq!(p, Placement { x: -20, y: 40 });
    }

    #[test]
    fn test_extreme_offsets_saturate() {
        let p = resolve_position((3, 1), (10, 5), Anchor::End, Anchor::End, i32::MAX, i32::MIN);
        assert_eq!(p, Placement { x: i32::MAX, y: i32::MIN + 4 });

        let p = resolve_position((3, 1), (10, 5), Anchor::Begin, Anchor::Begin, i32::MIN, i32::MAX);
        assert_eq!(p, Placement { x: i32::MIN, y: i32::MAX });
    }
}
