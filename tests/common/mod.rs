#![allow(dead_code)]

use nmtui::network::{
    Action, NetworkError, NetworkManager, VpnProfile, WifiInfo, WifiInfoUpdate, WifiScanned,
    WifiStored,
};
use std::sync::Mutex;

/// Backend with fixed data that logs every call
#[derive(Debug, Default)]
pub struct StubNetwork {
    pub available: Vec<WifiScanned>,
    pub stored: Vec<WifiStored>,
    pub info: WifiInfo,
    pub failing: Option<Action>,
    calls: Mutex<Vec<String>>,
}

impl StubNetwork {
    pub fn with_home() -> Self {
        Self {
            available: vec![
                WifiScanned {
                    ssid: "Home".to_string(),
                    active: true,
                    security: "WPA2".to_string(),
                    signal: 90,
                },
                WifiScanned {
                    ssid: "Cafe".to_string(),
                    active: false,
                    security: "".to_string(),
                    signal: 40,
                },
            ],
            stored: vec![WifiStored {
                name: "Home".to_string(),
                ssid: "Home".to_string(),
                active: true,
            }],
            info: WifiInfo {
                name: "Home".to_string(),
                ssid: "Home".to_string(),
                password: "secret".to_string(),
                active: true,
                autoconnect: true,
                autoconnect_priority: 0,
            },
            ..Default::default()
        }
    }

    /// Make every call for `action` fail.
    pub fn failing(mut self, action: Action) -> Self {
        self.failing = Some(action);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn call(&self, action: Action, entry: String) -> Result<(), NetworkError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(entry);
        }
        match self.failing {
            Some(failing) if failing == action => Err(NetworkError::Command {
                action,
                message: "refused".to_string(),
            }),
            _ => Ok(()),
        }
    }
}

impl NetworkManager for StubNetwork {
    fn available_wifi(&self) -> Result<Vec<WifiScanned>, NetworkError> {
        self.call(Action::ScanAvailable, "available".to_string())?;
        Ok(self.available.clone())
    }

    fn stored_wifi(&self) -> Result<Vec<WifiStored>, NetworkError> {
        self.call(Action::ScanStored, "stored".to_string())?;
        Ok(self.stored.clone())
    }

    fn connect_wifi(&self, ssid: &str, password: &str) -> Result<(), NetworkError> {
        self.call(Action::Connect, format!("connect {ssid} {password}"))
    }

    fn connect_stored(&self, name: &str) -> Result<(), NetworkError> {
        self.call(Action::ConnectStored, format!("up {name}"))
    }

    fn disconnect(&self, name: &str) -> Result<(), NetworkError> {
        self.call(Action::Disconnect, format!("down {name}"))
    }

    fn wifi_password(&self, name: &str) -> Result<String, NetworkError> {
        self.call(Action::GetPassword, format!("password {name}"))?;
        Ok(String::new())
    }

    fn wifi_info(&self, name: &str) -> Result<WifiInfo, NetworkError> {
        self.call(Action::GetInfo, format!("info {name}"))?;
        Ok(self.info.clone())
    }

    fn update_wifi_info(&self, name: &str, update: &WifiInfoUpdate) -> Result<(), NetworkError> {
        self.call(
            Action::UpdateInfoField,
            format!("modify {name} -> {} {}", update.name, update.autoconnect_priority),
        )
    }

    fn delete_connection(&self, name: &str) -> Result<(), NetworkError> {
        self.call(Action::Delete, format!("delete {name}"))
    }

    fn vpn_profiles(&self) -> Result<Vec<VpnProfile>, NetworkError> {
        self.call(Action::ScanVpn, "vpn".to_string())?;
        Ok(Vec::new())
    }

    fn connect_vpn(&self, name: &str) -> Result<(), NetworkError> {
        self.call(Action::ConnectVpn, format!("vpn up {name}"))
    }

    fn disconnect_vpn(&self, name: &str) -> Result<(), NetworkError> {
        self.call(Action::DisconnectVpn, format!("vpn down {name}"))
    }
}
