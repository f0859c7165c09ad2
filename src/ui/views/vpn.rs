use crate::app::{AppEvent, Effect, VpnEvent};
use crate::config::{KeyBinding, KeyMapConfig, VpnKeys};
use crate::network::{NetworkError, NetworkManager, VpnProfile};
use crate::ui::theme::Theme;
use crate::ui::views::available::ACTIVE_FLAG;
use crate::ui::views::spinner::{Activity, StatusLine};
use crate::ui::views::table::DataTable;
use ratatui::layout::Constraint;
use std::sync::Arc;

const NAME_COLUMN: usize = 1;
const KIND_WIDTH: u16 = 10;

/// VPN and WireGuard profiles
#[derive(Debug)]
pub struct VpnTable {
    table: DataTable,
    status: StatusLine,
    keys: VpnKeys,
    theme: Theme,
    network: Arc<dyn NetworkManager>,
    width: u16,
    height: u16,
}

fn row(profile: &VpnProfile) -> Vec<String> {
    let flag = if profile.active { ACTIVE_FLAG } else { "" };
    vec![flag.to_string(), profile.name.clone(), profile.kind.clone()]
}

impl VpnTable {
    pub fn new(keys: &KeyMapConfig, theme: Theme, network: Arc<dyn NetworkManager>) -> Self {
        Self {
            table: DataTable::new(&["", "Name", "Type"], keys.table.clone()),
            status: StatusLine::default(),
            keys: keys.vpn.clone(),
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

    pub fn rows(&self) -> &[Vec<String>] {
        self.table.rows()
    }

    fn rescan(&mut self) -> Effect {
        self.status.set(Activity::Scanning);
        let network = Arc::clone(&self.network);
        Effect::task(move || AppEvent::Vpn(VpnEvent::Loaded(network.vpn_profiles())))
    }

    fn toggle(&mut self, up: bool) -> Effect {
        let Some(name) = self.table.selected_cell(NAME_COLUMN).map(str::to_string) else {
            return Effect::None;
        };
        let network = Arc::clone(&self.network);
        if up {
            self.status.set(Activity::Connecting);
            Effect::task(move || {
                let result = network.connect_vpn(&name);
                AppEvent::Vpn(VpnEvent::Activated { name, result })
            })
        } else {
            self.status.set(Activity::Disconnecting);
            Effect::task(move || {
                let result = network.disconnect_vpn(&name);
                AppEvent::Vpn(VpnEvent::Deactivated { name, result })
            })
        }
    }

    fn finished(&mut self, name: &str, result: &Result<(), NetworkError>) -> Effect {
        self.status.set(Activity::Idle);
        match result {
            Ok(()) => self.rescan(),
            Err(e) => {
                tracing::warn!(%name, error = %e, "vpn change failed");
                Effect::Emit(AppEvent::Notify(e.to_string()))
            }
        }
    }

    pub fn update(&mut self, event: &AppEvent) -> Effect {
        match event {
            AppEvent::Key(key) if self.keys.connect.matches(key) => self.toggle(true),
            AppEvent::Key(key) if self.keys.disconnect.matches(key) => self.toggle(false),
            AppEvent::Key(key) if self.keys.rescan.matches(key) => {
                if self.status.is_idle() {
                    return self.rescan();
                }
                Effect::None
            }
            AppEvent::Key(key) => {
                self.table.handle_key(key);
                Effect::None
            }
            AppEvent::Tick => {
                self.status.tick();
                Effect::None
            }
            AppEvent::Vpn(VpnEvent::Loaded(result)) => {
                self.status.set(Activity::Idle);
                match result {
                    Ok(profiles) => {
                        self.table.set_rows(profiles.iter().map(row).collect());
                        Effect::None
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "listing vpn profiles failed");
                        Effect::Emit(AppEvent::Notify(e.to_string()))
                    }
                }
            }
            AppEvent::Vpn(VpnEvent::Activated { name, result })
            | AppEvent::Vpn(VpnEvent::Deactivated { name, result }) => self.finished(name, result),
            _ => Effect::None,
        }
    }

    pub fn help(&self) -> Vec<KeyBinding> {
        let mut help = self.table.help();
        help.extend([
            self.keys.connect.clone(),
            self.keys.disconnect.clone(),
            self.keys.rescan.clone(),
        ]);
        help
    }

    pub fn view(&self) -> String {
        let widths = [
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(KIND_WIDTH),
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
