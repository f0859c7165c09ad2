//! Saved Wi-Fi profiles

use crate::app::{AppEvent, Effect, WifiEvent};
use crate::config::{KeyBinding, KeyMapConfig, StoredInfoKeys, StoredKeys, ToggleKeys};
use crate::network::{NetworkError, NetworkManager, WifiStored};
use crate::ui::theme::Theme;
use crate::ui::views::available::ACTIVE_FLAG;
use crate::ui::views::spinner::{Activity, StatusLine};
use crate::ui::views::stored_info::StoredInfoForm;
use crate::ui::views::table::DataTable;
use ratatui::layout::Constraint;
use std::sync::Arc;

const NAME_COLUMN: usize = 2;

#[derive(Debug)]
pub struct StoredTable {
    table: DataTable,
    status: StatusLine,
    keys: StoredKeys,
    info_keys: StoredInfoKeys,
    toggle_keys: ToggleKeys,
    theme: Theme,
    network: Arc<dyn NetworkManager>,
    width: u16,
    height: u16,
}

fn row(stored: &WifiStored) -> Vec<String> {
    let flag = if stored.active { ACTIVE_FLAG } else { "" };
    vec![flag.to_string(), stored.ssid.clone(), stored.name.clone()]
}

/// Rescan after a successful change, notify otherwise.
fn finished(what: &str, name: &str, result: &Result<(), NetworkError>) -> Effect {
    match result {
        Ok(()) => {
            tracing::info!(%name, "{what}");
            Effect::Emit(AppEvent::Wifi(WifiEvent::Rescan))
        }
        Err(e) => {
            tracing::warn!(%name, error = %e, "{what} failed");
            Effect::Emit(AppEvent::Notify(e.to_string()))
        }
    }
}

impl StoredTable {
    pub fn new(keys: &KeyMapConfig, theme: Theme, network: Arc<dyn NetworkManager>) -> Self {
        Self {
            table: DataTable::new(&["", "SSID", "Name"], keys.table.clone()),
            status: StatusLine::default(),
            keys: keys.stored.clone(),
            info_keys: keys.stored_info.clone(),
            toggle_keys: keys.toggle.clone(),
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
        Effect::task(move || AppEvent::Wifi(WifiEvent::StoredLoaded(network.stored_wifi())))
    }

    fn selected_name(&self) -> Option<String> {
        self.table.selected_cell(NAME_COLUMN).map(str::to_string)
    }

    fn on_selected(
        &mut self,
        activity: Option<Activity>,
        call: impl FnOnce(Arc<dyn NetworkManager>, String) -> AppEvent + Send + 'static,
    ) -> Effect {
        let Some(name) = self.selected_name() else {
            return Effect::None;
        };
        if let Some(activity) = activity {
            self.status.set(activity);
        }
        let network = Arc::clone(&self.network);
        Effect::task(move || call(network, name))
    }

    fn handle_key(&mut self, key: &crossterm::event::KeyEvent) -> Effect {
        if self.keys.edit.matches(key) {
            return self.on_selected(None, |network, name| {
                let result = network.wifi_info(&name);
                AppEvent::Wifi(WifiEvent::InfoLoaded { name, result })
            });
        }
        if self.keys.connect.matches(key) {
            return self.on_selected(Some(Activity::Connecting), |network, name| {
                let result = network.connect_stored(&name);
                AppEvent::Wifi(WifiEvent::Activated { name, result })
            });
        }
        if self.keys.disconnect.matches(key) {
            return self.on_selected(Some(Activity::Disconnecting), |network, name| {
                let result = network.disconnect(&name);
                AppEvent::Wifi(WifiEvent::Deactivated { name, result })
            });
        }
        if self.keys.delete.matches(key) {
            return self.on_selected(None, |network, name| {
                let result = network.delete_connection(&name);
                AppEvent::Wifi(WifiEvent::Deleted { name, result })
            });
        }
        if self.keys.rescan.matches(key) {
            return self.rescan();
        }
        self.table.handle_key(key);
        Effect::None
    }

    pub fn update(&mut self, event: &AppEvent) -> Effect {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
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
            WifiEvent::StoredLoaded(result) => {
                self.status.set(Activity::Idle);
                match result {
                    Ok(stored) => {
                        tracing::debug!(count = stored.len(), "stored connections loaded");
                        self.table.set_rows(stored.iter().map(row).collect());
                        Effect::None
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "listing stored connections failed");
                        Effect::Emit(AppEvent::Notify(e.to_string()))
                    }
                }
            }
            WifiEvent::InfoLoaded { name, result } => match result {
                Ok(info) => {
                    let form = StoredInfoForm::new(
                        info.clone(),
                        self.info_keys.clone(),
                        self.toggle_keys.clone(),
                        self.theme,
                        Arc::clone(&self.network),
                    );
                    Effect::Emit(AppEvent::OpenPopup {
                        content: Box::new(form),
                        title: "Stored Wi-Fi info".to_string(),
                    })
                }
                Err(e) => {
                    tracing::warn!(%name, error = %e, "loading connection info failed");
                    Effect::Emit(AppEvent::Notify(e.to_string()))
                }
            },
            WifiEvent::Activated { name, result } => {
                self.status.set(Activity::Idle);
                finished("activated", name, result)
            }
            WifiEvent::Deactivated { name, result } => {
                self.status.set(Activity::Idle);
                finished("deactivated", name, result)
            }
            WifiEvent::Deleted { name, result } => finished("deleted", name, result),
            WifiEvent::InfoUpdated { name, result } => finished("updated", name, result),
            _ => Effect::None,
        }
    }

    pub fn help(&self) -> Vec<KeyBinding> {
        let mut help = self.table.help();
        help.extend([
            self.keys.edit.clone(),
            self.keys.connect.clone(),
            self.keys.disconnect.clone(),
            self.keys.delete.clone(),
            self.keys.rescan.clone(),
        ]);
        help
    }

    pub fn view(&self) -> String {
        let widths = [Constraint::Length(1), Constraint::Fill(1), Constraint::Fill(1)];
        let table_height = self.height.saturating_sub(1);
        let table = self.table.view(&widths, self.width, table_height, &self.theme);
        let status = self.status.view(usize::from(self.width));
        if table_height == 0 {
            return status;
        }
        format!("{table}\n{status}")
    }
}
