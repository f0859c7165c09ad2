use crate::app::{AppEvent, Effect, WifiEvent};
use crate::config::{ConnectorKeys, KeyBinding};
use crate::floating::Content;
use crate::network::NetworkManager;
use crate::text;
use crate::ui::theme::Theme;
use crate::ui::views::text_input::TextInput;
use std::sync::Arc;

const PASSWORD_WIDTH: usize = 20;

/// Popup asking for the password of a scanned network
#[derive(Debug)]
pub struct ConnectorForm {
    ssid: String,
    password: TextInput,
    keys: ConnectorKeys,
    theme: Theme,
    network: Arc<dyn NetworkManager>,
}

impl ConnectorForm {
    /// `password` pre-fills the input, e.g. from a saved profile.
    pub fn new(
        ssid: &str,
        password: Option<&str>,
        keys: ConnectorKeys,
        theme: Theme,
        network: Arc<dyn NetworkManager>,
    ) -> Self {
        let mut input = TextInput::new(PASSWORD_WIDTH)
            .with_placeholder("Password")
            .with_mask();
        input.focused = true;
        if let Some(password) = password {
            input.set_value(password);
        }
        Self {
            ssid: ssid.to_string(),
            password: input,
            keys,
            theme,
            network,
        }
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    pub fn password(&self) -> &str {
        self.password.value()
    }

    fn connect(&self) -> Effect {
        let ssid = self.ssid.clone();
        let password = self.password.value().to_string();
        let network = Arc::clone(&self.network);
        tracing::info!(%ssid, "connecting");
        Effect::batch([
            Effect::Emit(AppEvent::ClosePopup),
            Effect::Emit(AppEvent::Wifi(WifiEvent::Connecting { ssid: ssid.clone() })),
            Effect::task(move || {
                let result = network.connect_wifi(&ssid, &password);
                AppEvent::Wifi(WifiEvent::Connected { ssid, result })
            }),
        ])
    }
}

impl Content for ConnectorForm {
    fn update(&mut self, event: &AppEvent) -> Effect {
        let Some(key) = event.key() else {
            return Effect::None;
        };
        if self.keys.connect.matches(key) {
            return self.connect();
        }
        if self.keys.toggle_password.matches(key) {
            self.password.toggle_mask();
            return Effect::None;
        }
        self.password.handle_key(key);
        Effect::None
    }

    fn view(&self) -> String {
        let ssid = format!("SSID      {}", self.ssid);
        let password = text::join_horizontal(&["Password ", &self.password.view(&self.theme)]);
        text::join_vertical(&[&ssid, &password])
    }

    fn help(&self) -> Vec<KeyBinding> {
        vec![self.keys.connect.clone(), self.keys.toggle_password.clone()]
    }
}
