// Configuration for nm-tui layout, colors and key bindings
// Defaults mirror the stock look of the application; everything is passed
// explicitly into the components that need it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::Color;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("Empty key combination")]
    Empty,

    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

/// A single key with its modifiers, e.g. `ctrl+q`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    pub const fn key(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn char(c: char) -> Self {
        Self::key(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub const fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    /// Whether a key event is this combination.
    ///
    /// Shift is part of the character itself for printable keys (`Q` vs `q`),
    /// so it is only compared for non-character keys and for space.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        let mut want = self.modifiers & relevant;
        let mut got = event.modifiers & relevant;
        if shift_is_implicit(self.code) {
            want.remove(KeyModifiers::SHIFT);
            got.remove(KeyModifiers::SHIFT);
        }
        want == got
    }
}

fn shift_is_implicit(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char(c) if c != ' ') || code == KeyCode::BackTab
}

impl FromStr for KeyCombo {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(KeyParseError::Empty);
        }
        // a lone "+" is the plus key, not a separator
        let (mods, name) = match s.rfind('+') {
            Some(i) if i + 1 < s.len() => (&s[..i], &s[i + 1..]),
            _ => ("", s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in mods.split('+').filter(|p| !p.is_empty()) {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return Err(KeyParseError::UnknownModifier(part.to_string())),
            };
        }

        let code = match name.to_ascii_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "space" => KeyCode::Char(' '),
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            other => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => match other.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                        Some(n) if (1..=12).contains(&n) => KeyCode::F(n),
                        _ => return Err(KeyParseError::UnknownKey(name.to_string())),
                    },
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

/// A set of key combinations plus the text shown for them in the help line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub keys: Vec<KeyCombo>,
    pub help_key: String,
    pub help_desc: String,
}

impl KeyBinding {
    /// Build a binding from combination strings. Invalid combinations are
    /// skipped with a warning.
    pub fn new(keys: &[&str], help_key: &str, help_desc: &str) -> Self {
        let keys = keys
            .iter()
            .filter_map(|k| match k.parse() {
                Ok(combo) => Some(combo),
                Err(e) => {
                    tracing::warn!(key = k, error = %e, "ignoring key binding");
                    None
                }
            })
            .collect();
        Self {
            keys,
            help_key: help_key.to_string(),
            help_desc: help_desc.to_string(),
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| k.matches(event))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.help_key, self.help_desc)
    }
}

/// Global keys handled by the application root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainKeys {
    pub quit: KeyBinding,
}

impl Default for MainKeys {
    fn default() -> Self {
        Self {
            quit: KeyBinding::new(&["q", "ctrl+q", "esc", "ctrl+c"], "esc/q/^Q/^C", "quit"),
        }
    }
}

/// Keys of a floating surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceKeys {
    pub close: KeyBinding,
}

impl Default for SurfaceKeys {
    fn default() -> Self {
        Self {
            close: KeyBinding::new(&["ctrl+q", "esc", "ctrl+c"], "esc/^Q/^C", "close"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsKeys {
    pub next: KeyBinding,
    pub prev: KeyBinding,
}

impl Default for TabsKeys {
    fn default() -> Self {
        Self {
            next: KeyBinding::new(&["]"], "]", "next tab"),
            prev: KeyBinding::new(&["["], "[", "previous tab"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleKeys {
    pub toggle: KeyBinding,
}

impl Default for ToggleKeys {
    fn default() -> Self {
        Self {
            toggle: KeyBinding::new(&["space"], "space", "toggle"),
        }
    }
}

/// Row navigation shared by every table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableKeys {
    pub up: KeyBinding,
    pub down: KeyBinding,
}

impl Default for TableKeys {
    fn default() -> Self {
        Self {
            up: KeyBinding::new(&["up", "k"], "↑/k", "up"),
            down: KeyBinding::new(&["down", "j"], "↓/j", "down"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiKeys {
    pub next_window: KeyBinding,
    pub first_window: KeyBinding,
    pub second_window: KeyBinding,
    pub rescan: KeyBinding,
}

impl Default for WifiKeys {
    fn default() -> Self {
        Self {
            next_window: KeyBinding::new(&["tab"], "tab", "next window"),
            first_window: KeyBinding::new(&["1"], "1", "first window"),
            second_window: KeyBinding::new(&["2"], "2", "second window"),
            rescan: KeyBinding::new(&["ctrl+r"], "^R", "rescan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableKeys {
    pub rescan: KeyBinding,
    pub open_connector: KeyBinding,
}

impl Default for AvailableKeys {
    fn default() -> Self {
        Self {
            rescan: KeyBinding::new(&["r"], "r", "rescan"),
            open_connector: KeyBinding::new(&["enter"], "enter", "open connector"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredKeys {
    pub edit: KeyBinding,
    pub connect: KeyBinding,
    pub disconnect: KeyBinding,
    pub rescan: KeyBinding,
    pub delete: KeyBinding,
}

impl Default for StoredKeys {
    fn default() -> Self {
        Self {
            edit: KeyBinding::new(&["enter"], "enter", "edit"),
            connect: KeyBinding::new(&["space"], "space", "connect"),
            disconnect: KeyBinding::new(&["shift+space"], "shift+space", "disconnect"),
            rescan: KeyBinding::new(&["r"], "r", "rescan stored"),
            delete: KeyBinding::new(&["d"], "d", "delete"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredInfoKeys {
    pub toggle_password: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub submit: KeyBinding,
}

impl Default for StoredInfoKeys {
    fn default() -> Self {
        Self {
            toggle_password: KeyBinding::new(&["ctrl+r"], "^R", "toggle password visibility"),
            up: KeyBinding::new(&["ctrl+k", "up", "backtab"], "^K", "up"),
            down: KeyBinding::new(&["ctrl+j", "down", "tab"], "^J", "down"),
            submit: KeyBinding::new(&["enter"], "enter", "submit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorKeys {
    pub connect: KeyBinding,
    pub toggle_password: KeyBinding,
}

impl Default for ConnectorKeys {
    fn default() -> Self {
        Self {
            connect: KeyBinding::new(&["enter"], "enter", "connect"),
            toggle_password: KeyBinding::new(&["ctrl+r"], "^R", "toggle password visibility"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnKeys {
    pub connect: KeyBinding,
    pub disconnect: KeyBinding,
    pub rescan: KeyBinding,
}

impl Default for VpnKeys {
    fn default() -> Self {
        Self {
            connect: KeyBinding::new(&["space"], "space", "connect"),
            disconnect: KeyBinding::new(&["shift+space"], "shift+space", "disconnect"),
            rescan: KeyBinding::new(&["r"], "r", "rescan"),
        }
    }
}

/// Key bindings of every component
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyMapConfig {
    pub main: MainKeys,
    pub popup: SurfaceKeys,
    pub tabs: TabsKeys,
    pub toggle: ToggleKeys,
    pub table: TableKeys,
    pub wifi: WifiKeys,
    pub available: AvailableKeys,
    pub stored: StoredKeys,
    pub stored_info: StoredInfoKeys,
    pub connector: ConnectorKeys,
    pub vpn: VpnKeys,
}

/// Overlay sizes and timings
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Inner size of the popup box (default 100x10)
    pub popup_width: usize,
    pub popup_height: usize,

    /// Offset of the notification from the top-right corner (default -1, 1)
    pub notification_offset: (i32, i32),

    /// Notification text is wrapped to this many columns
    pub notification_width: usize,

    /// How long a notification stays up (default 5s)
    pub notification_timeout: Duration,

    /// Event poll timeout; also drives spinners
    pub tick_rate: Duration,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            popup_width: 100,
            popup_height: 10,
            notification_offset: (-1, 1),
            notification_width: 40,
            notification_timeout: Duration::from_secs(5),
            tick_rate: Duration::from_millis(100),
        }
    }
}

/// Colors used by the UI
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeConfig {
    /// Regular text (#ffffff)
    pub text: Color,

    /// Titles, focused borders and selection background (256-color 99)
    pub accent: Color,

    /// Table header divider (256-color 240)
    pub divider: Color,

    /// Validation marks and failures
    pub error: Color,

    /// Secondary text such as placeholders
    pub dimmed: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            text: Color::Rgb(255, 255, 255),
            accent: Color::Indexed(99),
            divider: Color::Indexed(240),
            error: Color::Indexed(160),
            dimmed: Color::Indexed(245),
        }
    }
}

/// Network backend selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Program invoked for every network operation
    pub program: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: "nmcli".to_string(),
        }
    }
}

/// Master configuration combining all nm-tui settings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub theme: ThemeConfig,
    pub keys: KeyMapConfig,
    pub backend: BackendConfig,
}
