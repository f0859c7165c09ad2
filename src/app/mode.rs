/// Where key presses currently go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Keys reach the tabs
    Normal,
    /// A popup is open and receives keys
    Popup,
    Quit,
}
