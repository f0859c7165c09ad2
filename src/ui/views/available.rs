//! Networks in range, with a connector popup for the selected one

use crate::app::{AppEvent, Effect, WifiEvent};
use crate::config::{AvailableKeys, ConnectorKeys, KeyBinding, KeyMapConfig};
use crate::network::{NetworkManager, WifiScanned};
use crate::ui::theme::Theme;
use crate::ui::views::connector::ConnectorForm;
use crate::ui::views::spinner::{Activity, StatusLine};
use crate::ui::views::table::DataTable;
use ratatui::layout::Constraint;
use std::sync::Arc;

pub const ACTIVE_FLAG: &str = "●";
const SSID_COLUMN: usize = 1;
const SIGNAL_WIDTH: u16 = 3;
const MIN_SECURITY_WIDTH: u16 = 8;

#[derive(Debug)]
pub struct AvailableTable {
    table: DataTable,
    status: StatusLine,
    keys: AvailableKeys,
    connector_keys: ConnectorKeys,
    theme: Theme,
    network: Arc<dyn NetworkManager>,
    width: u16,
    height: u16,
}

fn row(network: &WifiScanned) -> Vec<String> {
    let flag = if network.active { ACTIVE_FLAG } else { "" };
    vec![
        flag.to_string(),
        network.ssid.clone(),
        network.security.clone(),
        network.signal.to_string(),
    ]
}

impl AvailableTable {
    pub fn new(keys: &KeyMapConfig, theme: Theme, network: Arc<dyn NetworkManager>) -> Self {
        Self {
            table: DataTable::new(&["", "SSID", "Security", ""], keys.table.clone()),
            status: StatusLine::default(),
            keys: keys.available.clone(),
            connector_keys: keys.connector.clone(),
            theme,
            network,
            width: 0,
            height: 0,
        }
    }

    pub fn init(&mut self) -> Effect {
        self.rescan()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn activity(&self) -> Activity {
        self.status.activity()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        self.table.rows()
    }

    fn rescan(&mut self) -> Effect {
        self.status.set(Activity::Scanning);
        let network = Arc::clone(&self.network);
        Effect::task(move || AppEvent::Wifi(WifiEvent::AvailableLoaded(network.available_wifi())))
    }

    fn open_connector(&self) -> Effect {
        let Some(ssid) = self.table.selected_cell(SSID_COLUMN) else {
            return Effect::None;
        };
        let ssid = ssid.to_string();
        let network = Arc::clone(&self.network);
        Effect::task(move || {
            // a missing saved profile just means an empty password field
            let password = network.wifi_password(&ssid).ok();
            AppEvent::Wifi(WifiEvent::ConnectorReady { ssid, password })
        })
    }

    pub fn update(&mut self, event: &AppEvent) -> Effect {
        match event {
            AppEvent::Key(key) => {
                if self.keys.rescan.matches(key) {
                    if self.status.is_idle() {
                        return self.rescan();
                    }
                    return Effect::None;
                }
                if self.keys.open_connector.matches(key) {
                    return self.open_connector();
                }
                self.table.handle_key(key);
                Effect::None
            }
            AppEvent::Tick => {
                self.status.tick();
                Effect::None
            }
            AppEvent::Wifi(event) => self.update_wifi(event),
            _ => Effect::None,
        }
    }

    fn update_wifi(&mut self, event: &WifiEvent) -> Effect {
        match event {
            WifiEvent::Rescan if self.status.activity() != Activity::Scanning => self.rescan(),
            WifiEvent::AvailableLoaded(result) => {
                self.status.set(Activity::Idle);
                match result {
                    Ok(networks) => {
                        tracing::debug!(count = networks.len(), "available networks loaded");
                        self.table.set_rows(networks.iter().map(row).collect());
                        Effect::None
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "wifi scan failed");
                        Effect::Emit(AppEvent::Notify(e.to_string()))
                    }
                }
            }
            WifiEvent::ConnectorReady { ssid, password } => {
                let form = ConnectorForm::new(
                    ssid,
                    password.as_deref(),
                    self.connector_keys.clone(),
                    self.theme,
                    Arc::clone(&self.network),
                );
                Effect::Emit(AppEvent::OpenPopup {
                    content: Box::new(form),
                    title: "Wi-Fi Connector".to_string(),
                })
            }
            WifiEvent::Connecting { .. } => {
                self.status.set(Activity::Connecting);
                Effect::None
            }
            WifiEvent::Connected { ssid, result } => {
                self.status.set(Activity::Idle);
                match result {
                    Ok(()) => {
                        tracing::info!(%ssid, "connected");
                        Effect::Emit(AppEvent::Wifi(WifiEvent::Rescan))
                    }
                    Err(e) => {
                        tracing::warn!(%ssid, error = %e, "connect failed");
                        Effect::Emit(AppEvent::Notify(e.to_string()))
                    }
                }
            }
            _ => Effect::None,
        }
    }

    pub fn help(&self) -> Vec<KeyBinding> {
        let mut help = self.table.help();
        help.push(self.keys.open_connector.clone());
        help.push(self.keys.rescan.clone());
        help
    }

    /// Table plus status line, filling the size given to `resize`.
    pub fn view(&self) -> String {
        let security = ((f32::from(self.width) * 0.3) as u16).max(MIN_SECURITY_WIDTH);
        let widths = [
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(security),
            Constraint::Length(SIGNAL_WIDTH),
        ];
        let table_height = self.height.saturating_sub(1);
        let table = self.table.view(&widths, self.width, table_height, &self.theme);
        let status = self.status.view(usize::from(self.width));
        if table_height == 0 {
            return status;
        }
        format!("{table}\n{status}")
    }
}
