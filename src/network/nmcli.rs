//! `nmcli` backed implementation of [`NetworkManager`]
//!
//! All listing commands use terse output (`-t`), where fields are separated
//! by `:` and literal colons and backslashes are escaped with `\`.

use super::{
    Action, NetworkError, NetworkManager, VpnProfile, WifiInfo, WifiInfoUpdate, WifiScanned,
    WifiStored,
};
use std::process::Command;

const WIFI_TYPE: &str = "802-11-wireless";
const VPN_TYPES: [&str; 2] = ["vpn", "wireguard"];
const PSK_FIELD: &str = "802-11-wireless-security.psk";
const INFO_FIELDS: &str = "connection.id,802-11-wireless.ssid,802-11-wireless-security.psk,\
connection.autoconnect,connection.autoconnect-priority,GENERAL.STATE";

pub struct Nmcli {
    program: String,
}

impl Default for Nmcli {
    fn default() -> Self {
        Self::new("nmcli")
    }
}

impl Nmcli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run one command and return its stdout.
    fn run(&self, action: Action, args: &[&str]) -> Result<String, NetworkError> {
        let shown = redacted(args);
        tracing::debug!(program = %self.program, args = ?shown, "running");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| {
                tracing::error!(program = %self.program, error = %source, "failed to launch");
                NetworkError::Launch {
                    program: self.program.clone(),
                    source,
                }
            })?;

        if output.status.success() {
            tracing::info!(%action, args = ?shown, "done");
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = match stderr.trim() {
            "" => output.status.to_string(),
            text => text.strip_prefix("Error: ").unwrap_or(text).to_string(),
        };
        tracing::error!(%action, args = ?shown, %message, "command failed");
        Err(NetworkError::Command { action, message })
    }

    fn connections(&self, action: Action) -> Result<Vec<ConnectionRow>, NetworkError> {
        let out = self.run(action, &["-t", "-f", "NAME,TYPE,STATE", "connection", "show"])?;
        Ok(parse_connections(&out))
    }

    fn wifi_ssid(&self, name: &str) -> Result<String, NetworkError> {
        let out = self.run(
            Action::GetSsid,
            &["-s", "-m", "tabular", "-t", "-f", "802-11-wireless.ssid", "connection", "show", name],
        )?;
        Ok(out.trim().to_string())
    }

    fn modify(&self, name: &str, field: &str, value: &str) -> Result<(), NetworkError> {
        self.run(Action::UpdateInfoField, &["connection", "modify", name, field, value])
            .map(drop)
    }
}

impl NetworkManager for Nmcli {
    fn available_wifi(&self) -> Result<Vec<WifiScanned>, NetworkError> {
        let out = self.run(
            Action::ScanAvailable,
            &["-t", "-f", "SSID,IN-USE,SECURITY,SIGNAL", "dev", "wifi"],
        )?;
        Ok(parse_available(&out))
    }

    fn stored_wifi(&self) -> Result<Vec<WifiStored>, NetworkError> {
        let rows = self.connections(Action::ScanStored)?;
        let stored = rows
            .into_iter()
            .filter(|row| row.kind == WIFI_TYPE)
            .map(|row| {
                let ssid = self.wifi_ssid(&row.name).unwrap_or_default();
                WifiStored {
                    active: row.is_active(),
                    name: row.name,
                    ssid,
                }
            })
            .collect();
        Ok(stored)
    }

    fn connect_wifi(&self, ssid: &str, password: &str) -> Result<(), NetworkError> {
        // a saved profile with the same name makes nmcli reject the new password
        if let Err(e) = self.delete_connection(ssid) {
            tracing::debug!(ssid, error = %e, "no stale profile removed");
        }

        let mut args = vec!["device", "wifi", "connect", ssid];
        if !password.is_empty() {
            args.extend(["password", password]);
        }
        self.run(Action::Connect, &args).map(drop)
    }

    fn connect_stored(&self, name: &str) -> Result<(), NetworkError> {
        self.run(Action::ConnectStored, &["connection", "up", name])
            .map(drop)
    }

    fn disconnect(&self, name: &str) -> Result<(), NetworkError> {
        self.run(Action::Disconnect, &["connection", "down", name])
            .map(drop)
    }

    fn wifi_password(&self, name: &str) -> Result<String, NetworkError> {
        let out = self.run(
            Action::GetPassword,
            &["-s", "-m", "tabular", "-t", "-f", PSK_FIELD, "connection", "show", name],
        )?;
        Ok(out.trim().to_string())
    }

    fn wifi_info(&self, name: &str) -> Result<WifiInfo, NetworkError> {
        let out = self.run(
            Action::GetInfo,
            &["-s", "-m", "multiline", "-t", "-f", INFO_FIELDS, "connection", "show", name],
        )?;
        parse_info(&out)
    }

    fn update_wifi_info(&self, name: &str, update: &WifiInfoUpdate) -> Result<(), NetworkError> {
        self.modify(name, "connection.id", &update.name)?;
        // later fields address the profile by its new name
        let name = update.name.as_str();
        self.modify(name, PSK_FIELD, &update.password)?;
        self.modify(
            name,
            "connection.autoconnect",
            if update.autoconnect { "yes" } else { "no" },
        )?;
        self.modify(
            name,
            "connection.autoconnect-priority",
            &update.autoconnect_priority.to_string(),
        )
    }

    fn delete_connection(&self, name: &str) -> Result<(), NetworkError> {
        self.run(Action::Delete, &["connection", "delete", name])
            .map(drop)
    }

    fn vpn_profiles(&self) -> Result<Vec<VpnProfile>, NetworkError> {
        let rows = self.connections(Action::ScanVpn)?;
        Ok(rows
            .into_iter()
            .filter(|row| VPN_TYPES.contains(&row.kind.as_str()))
            .map(|row| VpnProfile {
                active: row.is_active(),
                name: row.name,
                kind: row.kind,
            })
            .collect())
    }

    fn connect_vpn(&self, name: &str) -> Result<(), NetworkError> {
        self.run(Action::ConnectVpn, &["connection", "up", "id", name])
            .map(drop)
    }

    fn disconnect_vpn(&self, name: &str) -> Result<(), NetworkError> {
        self.run(Action::DisconnectVpn, &["connection", "down", "id", name])
            .map(drop)
    }
}

/// Mask secrets before arguments reach the log.
fn redacted<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let mut out = Vec::with_capacity(args.len());
    let mut hide_next = false;
    for arg in args {
        out.push(if hide_next { "******" } else { *arg });
        hide_next = *arg == "password" || *arg == PSK_FIELD;
    }
    out
}

/// Split one line of terse output into unescaped fields.
pub(crate) fn split_terse(line: &str) -> Vec<String> {
    let mut fields = vec![String::new()];
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            ':' => fields.push(String::new()),
            _ => {
                let c = if c == '\\' { chars.next().unwrap_or(c) } else { c };
                if let Some(field) = fields.last_mut() {
                    field.push(c);
                }
            }
        }
    }
    fields
}

pub(crate) fn parse_available(out: &str) -> Vec<WifiScanned> {
    out.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let fields = split_terse(line);
            let [ssid, in_use, security, signal] = fields.as_slice() else {
                tracing::warn!(line, "skipping malformed scan line");
                return None;
            };
            // hidden networks have no name to connect by
            if ssid.is_empty() {
                return None;
            }
            Some(WifiScanned {
                ssid: ssid.clone(),
                active: in_use == "*",
                security: security.clone(),
                signal: signal.parse().unwrap_or(0),
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectionRow {
    pub name: String,
    pub kind: String,
    pub state: String,
}

impl ConnectionRow {
    fn is_active(&self) -> bool {
        self.state == "activated"
    }
}

pub(crate) fn parse_connections(out: &str) -> Vec<ConnectionRow> {
    out.lines()
        .filter(|line| !line.is_empty())
        .filter_map(|line| match split_terse(line).as_slice() {
            [name, kind, state] => Some(ConnectionRow {
                name: name.clone(),
                kind: kind.clone(),
                state: state.clone(),
            }),
            _ => {
                tracing::warn!(line, "skipping malformed connection line");
                None
            }
        })
        .collect()
}

/// Parse `field:value` lines of multiline terse output.
pub(crate) fn parse_info(out: &str) -> Result<WifiInfo, NetworkError> {
    let mut info = WifiInfo::default();
    for line in out.lines() {
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match field {
            "connection.id" => info.name = value.to_string(),
            "802-11-wireless.ssid" => info.ssid = value.to_string(),
            PSK_FIELD => info.password = value.to_string(),
            "connection.autoconnect" => info.autoconnect = value == "yes",
            "connection.autoconnect-priority" => {
                info.autoconnect_priority = value.parse().map_err(|_| NetworkError::Parse {
                    action: Action::GetInfo,
                    detail: format!("autoconnect priority {value:?}"),
                })?;
            }
            "GENERAL.STATE" => info.active = value == "activated",
            _ => {}
        }
    }

    if info.name.is_empty() {
        return Err(NetworkError::Parse {
            action: Action::GetInfo,
            detail: "missing connection.id".to_string(),
        });
    }
    Ok(info)
}
