use std::fmt;
use std::io;
use thiserror::Error;

/// Network operation that failed, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ScanAvailable,
    ScanStored,
    Connect,
    ConnectStored,
    Disconnect,
    GetPassword,
    GetSsid,
    GetInfo,
    UpdateInfoField,
    Delete,
    ScanVpn,
    ConnectVpn,
    DisconnectVpn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Action::ScanAvailable => "scanning wifi networks",
            Action::ScanStored => "retrieving stored wifi networks",
            Action::Connect => "connecting to wifi network",
            Action::ConnectStored => "connecting to stored wifi network",
            Action::Disconnect => "disconnecting from wifi network",
            Action::GetPassword => "retrieving wifi network password",
            Action::GetSsid => "retrieving wifi network ssid",
            Action::GetInfo => "retrieving wifi network information",
            Action::UpdateInfoField => "modifying wifi network information field",
            Action::Delete => "deleting wifi connection",
            Action::ScanVpn => "retrieving VPN profiles",
            Action::ConnectVpn => "connecting to VPN",
            Action::DisconnectVpn => "disconnecting from VPN",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed {action}: {message}")]
    Command { action: Action, message: String },

    #[error("Failed {action}: unexpected output ({detail})")]
    Parse { action: Action, detail: String },
}

impl NetworkError {
    pub fn action(&self) -> Option<Action> {
        match self {
            NetworkError::Launch { .. } => None,
            NetworkError::Command { action, .. } | NetworkError::Parse { action, .. } => {
                Some(*action)
            }
        }
    }
}
