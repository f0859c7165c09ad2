//! Overlay one styled frame onto another at an anchored position
//!
//! Everything here is pure: frames go in as `&str` and a new `String`
//! comes out. The background's line count and per-line width are never
//! changed, only the columns the foreground covers.

pub mod anchor;
pub mod compose;

pub use anchor::{resolve_position, Anchor, Placement};
pub use compose::compose;
