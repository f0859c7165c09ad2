//! Network backend abstraction
//!
//! The UI only talks to [`NetworkManager`]. Every call blocks, so callers run
//! them on worker threads and report the outcome back as events.

pub mod error;
pub mod nmcli;

pub use error::{Action, NetworkError};
pub use nmcli::Nmcli;

/// A network seen by the latest scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiScanned {
    pub ssid: String,
    pub active: bool,
    pub security: String,
    pub signal: u8,
}

/// A saved Wi-Fi connection profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiStored {
    pub name: String,
    pub ssid: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VpnProfile {
    pub name: String,
    pub kind: String,
    pub active: bool,
}

/// Editable details of a saved Wi-Fi profile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WifiInfo {
    pub name: String,
    pub ssid: String,
    pub password: String,
    pub active: bool,
    pub autoconnect: bool,
    pub autoconnect_priority: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiInfoUpdate {
    pub name: String,
    pub password: String,
    pub autoconnect: bool,
    pub autoconnect_priority: i32,
}

pub trait NetworkManager: Send + Sync {
    /// Networks in range, the active one flagged.
    fn available_wifi(&self) -> Result<Vec<WifiScanned>, NetworkError>;

    /// Saved Wi-Fi profiles, the active one flagged.
    fn stored_wifi(&self) -> Result<Vec<WifiStored>, NetworkError>;

    /// Connect to `ssid`, replacing any saved profile of the same name.
    /// An empty password connects to an open network.
    fn connect_wifi(&self, ssid: &str, password: &str) -> Result<(), NetworkError>;

    /// Bring up a saved profile.
    fn connect_stored(&self, name: &str) -> Result<(), NetworkError>;

    fn disconnect(&self, name: &str) -> Result<(), NetworkError>;

    /// Stored pre-shared key of a saved profile.
    fn wifi_password(&self, name: &str) -> Result<String, NetworkError>;

    fn wifi_info(&self, name: &str) -> Result<WifiInfo, NetworkError>;

    /// Rename and reconfigure a saved profile. Not atomic: fields are
    /// written one after another and a failure leaves earlier ones applied.
    fn update_wifi_info(&self, name: &str, update: &WifiInfoUpdate) -> Result<(), NetworkError>;

    fn delete_connection(&self, name: &str) -> Result<(), NetworkError>;

    fn vpn_profiles(&self) -> Result<Vec<VpnProfile>, NetworkError>;

    fn connect_vpn(&self, name: &str) -> Result<(), NetworkError>;

    fn disconnect_vpn(&self, name: &str) -> Result<(), NetworkError>;
}

impl std::fmt::Debug for dyn NetworkManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NetworkManager")
    }
}
