//! Wi-Fi tab: available networks above stored profiles

use crate::app::{AppEvent, Effect, WifiEvent};
use crate::config::{KeyBinding, KeyMapConfig, WifiKeys};
use crate::network::NetworkManager;
use crate::ui::theme::Theme;
use crate::ui::views::available::AvailableTable;
use crate::ui::views::panel;
use crate::ui::views::stored::StoredTable;
use std::sync::Arc;

const BORDER: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Available,
    Stored,
}

#[derive(Debug)]
pub struct WifiPane {
    available: AvailableTable,
    stored: StoredTable,
    focus: Window,
    keys: WifiKeys,
    theme: Theme,
    width: u16,
    height: u16,
}

impl WifiPane {
    pub fn new(keys: &KeyMapConfig, theme: Theme, network: Arc<dyn NetworkManager>) -> Self {
        Self {
            available: AvailableTable::new(keys, theme, Arc::clone(&network)),
            stored: StoredTable::new(keys, theme, network),
            focus: Window::Available,
            keys: keys.wifi.clone(),
            theme,
            width: 0,
            height: 0,
        }
    }

    pub fn init(&mut self) -> Effect {
        Effect::batch([self.available.init(), self.stored.init()])
    }

    pub fn focus(&self) -> Window {
        self.focus
    }

    fn heights(&self) -> (u16, u16) {
        let stored = self.height / 2;
        (self.height - stored, stored)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let (available_h, stored_h) = self.heights();
        let inner_w = width.saturating_sub(BORDER);
        self.available.resize(inner_w, available_h.saturating_sub(BORDER));
        self.stored.resize(inner_w, stored_h.saturating_sub(BORDER));
    }

    pub fn update(&mut self, event: &AppEvent) -> Effect {
        let AppEvent::Key(key) = event else {
            return Effect::batch([self.available.update(event), self.stored.update(event)]);
        };

        if self.keys.next_window.matches(key) {
            self.focus = match self.focus {
                Window::Available => Window::Stored,
                Window::Stored => Window::Available,
            };
        } else if self.keys.first_window.matches(key) {
            self.focus = Window::Available;
        } else if self.keys.second_window.matches(key) {
            self.focus = Window::Stored;
        } else if self.keys.rescan.matches(key) {
            return Effect::Emit(AppEvent::Wifi(WifiEvent::Rescan));
        } else {
            return match self.focus {
                Window::Available => self.available.update(event),
                Window::Stored => self.stored.update(event),
            };
        }
        Effect::None
    }

    pub fn help(&self) -> Vec<KeyBinding> {
        let mut help = match self.focus {
            Window::Available => self.available.help(),
            Window::Stored => self.stored.help(),
        };
        help.extend([self.keys.next_window.clone(), self.keys.rescan.clone()]);
        help
    }

    pub fn view(&self) -> String {
        let (available_h, stored_h) = self.heights();
        let available = panel::titled(
            &self.available.view(),
            "Available",
            &self.keys.first_window.help_key,
            self.focus == Window::Available,
            self.width,
            available_h,
            &self.theme,
        );
        let stored = panel::titled(
            &self.stored.view(),
            "Stored",
            &self.keys.second_window.help_key,
            self.focus == Window::Stored,
            self.width,
            stored_h,
            &self.theme,
        );
        format!("{available}\n{stored}")
    }
}
