use crate::floating::Content;
use crate::network::{NetworkError, VpnProfile, WifiInfo, WifiScanned, WifiStored};
use crossterm::event::KeyEvent;

/// Everything that can happen to the application, delivered to
/// `App::handle_event` and passed down to the views
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Tick,
    OpenPopup {
        content: Box<dyn Content>,
        title: String,
    },
    ClosePopup,
    Notify(String),
    /// Close the notification opened with this generation, if still shown
    CloseNotification(u64),
    Wifi(WifiEvent),
    Vpn(VpnEvent),
    Quit,
}

/// Results of Wi-Fi backend calls and Wi-Fi view requests
#[derive(Debug)]
pub enum WifiEvent {
    /// Rescan both the available and the stored list
    Rescan,
    AvailableLoaded(Result<Vec<WifiScanned>, NetworkError>),
    StoredLoaded(Result<Vec<WifiStored>, NetworkError>),
    /// Saved password looked up, the connector can be shown
    ConnectorReady {
        ssid: String,
        password: Option<String>,
    },
    /// A connect request was submitted
    Connecting {
        ssid: String,
    },
    Connected {
        ssid: String,
        result: Result<(), NetworkError>,
    },
    Activated {
        name: String,
        result: Result<(), NetworkError>,
    },
    Deactivated {
        name: String,
        result: Result<(), NetworkError>,
    },
    Deleted {
        name: String,
        result: Result<(), NetworkError>,
    },
    InfoLoaded {
        name: String,
        result: Result<WifiInfo, NetworkError>,
    },
    InfoUpdated {
        name: String,
        result: Result<(), NetworkError>,
    },
}

#[derive(Debug)]
pub enum VpnEvent {
    Loaded(Result<Vec<VpnProfile>, NetworkError>),
    Activated {
        name: String,
        result: Result<(), NetworkError>,
    },
    Deactivated {
        name: String,
        result: Result<(), NetworkError>,
    },
}

impl AppEvent {
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            AppEvent::Key(key) => Some(key),
            _ => None,
        }
    }
}
