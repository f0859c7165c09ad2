pub mod terminal;
pub mod terminal_guard;
pub mod theme;
pub mod views;

pub use terminal::TuiManager;
pub use terminal_guard::TerminalGuard;
pub use theme::Theme;
