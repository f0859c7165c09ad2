//! Tab bar over the Wi-Fi and VPN views

use crate::app::{AppEvent, Effect};
use crate::config::{KeyBinding, KeyMapConfig, TabsKeys};
use crate::frame;
use crate::network::NetworkManager;
use crate::text;
use crate::ui::theme::Theme;
use crate::ui::views::vpn::VpnTable;
use crate::ui::views::wifi_pane::WifiPane;
use ratatui::widgets::{Block, BorderType};
use std::sync::Arc;

const TAB_BAR_HEIGHT: u16 = 3;
const BORDER: u16 = 2;
const TITLES: [&str; 2] = ["Wi-Fi", "VPN"];

#[derive(Debug)]
pub struct Tabs {
    wifi: WifiPane,
    vpn: VpnTable,
    active: usize,
    keys: TabsKeys,
    theme: Theme,
    width: u16,
    height: u16,
}

impl Tabs {
    pub fn new(keys: &KeyMapConfig, theme: Theme, network: Arc<dyn NetworkManager>) -> Self {
        Self {
            wifi: WifiPane::new(keys, theme, Arc::clone(&network)),
            vpn: VpnTable::new(keys, theme, network),
            active: 0,
            keys: keys.tabs.clone(),
            theme,
            width: 0,
            height: 0,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn init(&mut self) -> Effect {
        Effect::batch([self.wifi.init(), self.vpn.init()])
    }

    fn init_active(&mut self) -> Effect {
        match self.active {
            0 => self.wifi.init(),
            _ => self.vpn.init(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let body_w = width.saturating_sub(BORDER);
        let body_h = height.saturating_sub(TAB_BAR_HEIGHT + BORDER);
        self.wifi.resize(body_w, body_h);
        self.vpn.resize(body_w, body_h);
    }

    /// Keys go to the active tab, everything else to both.
    pub fn update(&mut self, event: &AppEvent) -> Effect {
        let AppEvent::Key(key) = event else {
            return Effect::batch([self.wifi.update(event), self.vpn.update(event)]);
        };

        let last = TITLES.len() - 1;
        let target = if self.keys.next.matches(key) {
            Some((self.active + 1).min(last))
        } else if self.keys.prev.matches(key) {
            Some(self.active.saturating_sub(1))
        } else {
            None
        };

        match target {
            Some(target) if target != self.active => {
                tracing::debug!(tab = TITLES[target], "switching tab");
                self.active = target;
                self.init_active()
            }
            Some(_) => Effect::None,
            None if self.active == 0 => self.wifi.update(event),
            None => self.vpn.update(event),
        }
    }

    pub fn help(&self) -> Vec<KeyBinding> {
        let mut help = match self.active {
            0 => self.wifi.help(),
            _ => self.vpn.help(),
        };
        help.extend([self.keys.prev.clone(), self.keys.next.clone()]);
        help
    }

    fn tab_bar(&self) -> String {
        let count = TITLES.len();
        let full = usize::from(self.width);
        let tab_w = (full / count).saturating_sub(usize::from(BORDER));
        let mut tail = full % count;

        let tabs: Vec<String> = TITLES
            .iter()
            .enumerate()
            .map(|(i, title)| {
                let active = i == self.active;
                let title = if active {
                    text::styled(title, self.theme.accent())
                } else {
                    title.to_string()
                };
                let block = Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(self.theme.border(active));
                let width = if tail > 0 {
                    tail -= 1;
                    tab_w + 1
                } else {
                    tab_w
                };
                frame::boxed(&title, block, width.max(1), 1)
            })
            .collect();
        let parts: Vec<&str> = tabs.iter().map(String::as_str).collect();
        text::join_horizontal(&parts)
    }

    pub fn view(&self) -> String {
        let body = match self.active {
            0 => self.wifi.view(),
            _ => self.vpn.view(),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border(false));
        let body = frame::boxed(
            &body,
            block,
            usize::from(self.width.saturating_sub(BORDER)).max(1),
            usize::from(self.height.saturating_sub(TAB_BAR_HEIGHT + BORDER)).max(1),
        );
        format!("{}\n{body}", self.tab_bar())
    }
}
