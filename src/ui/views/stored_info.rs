use crate::app::{AppEvent, Effect, WifiEvent};
use crate::config::{KeyBinding, StoredInfoKeys, ToggleKeys};
use crate::floating::Content;
use crate::network::{NetworkManager, WifiInfo, WifiInfoUpdate};
use crate::text;
use crate::ui::theme::Theme;
use crate::ui::views::text_input::TextInput;
use crate::ui::views::toggle::Toggle;
use std::sync::Arc;

const INPUT_WIDTH: usize = 20;
const PRIORITY_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Password,
    Autoconnect,
    Priority,
}

impl Field {
    const ALL: [Field; 4] = [Field::Name, Field::Password, Field::Autoconnect, Field::Priority];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

fn validate_priority(value: &str) -> Result<(), String> {
    value
        .parse::<i32>()
        .map(|_| ())
        .map_err(|_| "priority must be a whole number".to_string())
}

/// Popup editing a saved Wi-Fi profile
#[derive(Debug)]
pub struct StoredInfoForm {
    info: WifiInfo,
    name: TextInput,
    password: TextInput,
    autoconnect: Toggle,
    priority: TextInput,
    focus: Field,
    keys: StoredInfoKeys,
    theme: Theme,
    network: Arc<dyn NetworkManager>,
}

impl StoredInfoForm {
    pub fn new(
        info: WifiInfo,
        keys: StoredInfoKeys,
        toggle_keys: ToggleKeys,
        theme: Theme,
        network: Arc<dyn NetworkManager>,
    ) -> Self {
        let mut name = TextInput::new(INPUT_WIDTH).with_placeholder("Name");
        name.set_value(&info.name);
        let mut password = TextInput::new(INPUT_WIDTH)
            .with_placeholder("Password")
            .with_mask();
        password.set_value(&info.password);
        let mut priority = TextInput::new(PRIORITY_WIDTH).with_validator(validate_priority);
        priority.set_value(&info.autoconnect_priority.to_string());

        let mut form = Self {
            autoconnect: Toggle::new(info.autoconnect, toggle_keys),
            info,
            name,
            password,
            priority,
            focus: Field::Name,
            keys,
            theme,
            network,
        };
        form.focus(Field::Name);
        form
    }

    fn focus(&mut self, field: Field) {
        self.focus = field;
        self.name.focused = field == Field::Name;
        self.password.focused = field == Field::Password;
        self.autoconnect.focused = field == Field::Autoconnect;
        self.priority.focused = field == Field::Priority;
    }

    fn submit(&self) -> Effect {
        let priority = match self.priority.value().parse::<i32>() {
            Ok(priority) => priority,
            Err(_) => {
                return Effect::Emit(AppEvent::Notify(format!(
                    "Invalid autoconnect priority: {}",
                    self.priority.value()
                )))
            }
        };
        let update = WifiInfoUpdate {
            name: self.name.value().to_string(),
            password: self.password.value().to_string(),
            autoconnect: self.autoconnect.value(),
            autoconnect_priority: priority,
        };
        let name = self.info.name.clone();
        let network = Arc::clone(&self.network);
        tracing::info!(%name, new_name = %update.name, "updating stored connection");
        Effect::batch([
            Effect::Emit(AppEvent::ClosePopup),
            Effect::task(move || {
                let result = network.update_wifi_info(&name, &update);
                AppEvent::Wifi(WifiEvent::InfoUpdated { name, result })
            }),
        ])
    }
}

impl Content for StoredInfoForm {
    fn update(&mut self, event: &AppEvent) -> Effect {
        let Some(key) = event.key() else {
            return Effect::None;
        };

        if self.keys.submit.matches(key) {
            return self.submit();
        }
        if self.keys.toggle_password.matches(key) {
            self.password.toggle_mask();
        } else if self.keys.down.matches(key) {
            self.focus(self.focus.next());
        } else if self.keys.up.matches(key) {
            self.focus(self.focus.prev());
        } else {
            match self.focus {
                Field::Name => self.name.handle_key(key),
                Field::Password => self.password.handle_key(key),
                Field::Autoconnect => self.autoconnect.handle_key(key),
                Field::Priority => self.priority.handle_key(key),
            };
        }
        Effect::None
    }

    fn view(&self) -> String {
        let theme = &self.theme;
        let mut ssid = format!("SSID: {}", self.info.ssid);
        if self.info.active {
            ssid.push_str(&text::styled(" (connected)", theme.accent()));
        }

        let name = text::join_horizontal(&["Name     ", &self.name.view(theme)]);
        let password = text::join_horizontal(&["Password ", &self.password.view(theme)]);
        let autoconnect = format!("Autoconnect          {}", self.autoconnect.view(theme));
        let marker = match self.priority.error() {
            Some(_) => text::styled(" ✗", theme.error()),
            None => String::new(),
        };
        let priority =
            text::join_horizontal(&["Autoconnect priority ", &self.priority.view(theme), &marker]);

        text::join_vertical(&[&ssid, &name, &password, &autoconnect, &priority])
    }

    fn help(&self) -> Vec<KeyBinding> {
        vec![
            self.keys.up.clone(),
            self.keys.down.clone(),
            self.keys.toggle_password.clone(),
            self.keys.submit.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::fake::FakeNetwork;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn info() -> WifiInfo {
        WifiInfo {
            name: "Home".to_string(),
            ssid: "HomeNet".to_string(),
            password: "secret".to_string(),
            active: true,
            autoconnect: true,
            autoconnect_priority: 5,
        }
    }

    fn form(network: Arc<FakeNetwork>) -> StoredInfoForm {
        StoredInfoForm::new(
            info(),
            StoredInfoKeys::default(),
            ToggleKeys::default(),
            Theme::default(),
            network,
        )
    }

    fn press(form: &mut StoredInfoForm, code: KeyCode, modifiers: KeyModifiers) -> Effect {
        form.update(&AppEvent::Key(KeyEvent::new(code, modifiers)))
    }

    fn type_str(form: &mut StoredInfoForm, s: &str) {
        for c in s.chars() {
            let _ = press(form, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_view_shows_fields() {
        let form = form(Arc::new(FakeNetwork::default()));
        let view = form.view();
        assert!(view.starts_with("SSID: HomeNet"));
        assert!(view.contains("(connected)"));
        assert!(view.contains("Home"));
        assert!(!view.contains("secret"));
        assert!(view.contains("[x]"));
    }

    #[test]
    fn test_focus_moves_and_wraps() {
        let mut form = form(Arc::new(FakeNetwork::default()));
        let _ = press(&mut form, KeyCode::Char('j'), KeyModifiers::CONTROL);
        assert_eq!(form.focus, Field::Password);
        let _ = press(&mut form, KeyCode::Char('k'), KeyModifiers::CONTROL);
        let _ = press(&mut form, KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert_eq!(form.focus, Field::Priority);
    }

    #[test]
    fn test_keys_go_to_focused_field() {
        let mut form = form(Arc::new(FakeNetwork::default()));
        type_str(&mut form, "2");
        assert_eq!(form.name.value(), "Home2");

        form.focus(Field::Autoconnect);
        let _ = press(&mut form, KeyCode::Char(' '), KeyModifiers::NONE);
        assert!(!form.autoconnect.value());
    }

    #[test]
    fn test_submit_updates_under_old_name() {
        let network = Arc::new(FakeNetwork::default());
        let mut form = form(Arc::clone(&network));
        type_str(&mut form, "2");
        form.focus(Field::Priority);
        type_str(&mut form, "0");

        let events = press(&mut form, KeyCode::Enter, KeyModifiers::NONE).run_inline();
        assert!(matches!(events[0], AppEvent::ClosePopup));
        assert!(matches!(
            events[1],
            AppEvent::Wifi(WifiEvent::InfoUpdated { ref name, result: Ok(()) }) if name == "Home"
        ));
        assert_eq!(network.calls(), vec!["modify Home Home2 secret true 50"]);
    }

    #[test]
    fn test_invalid_priority_notifies_instead_of_submitting() {
        let network = Arc::new(FakeNetwork::default());
        let mut form = form(Arc::clone(&network));
        form.focus(Field::Priority);
        type_str(&mut form, "x");
        assert!(form.priority.error().is_some());
        assert!(form.view().contains('✗'));

        let events = press(&mut form, KeyCode::Enter, KeyModifiers::NONE).run_inline();
        assert!(matches!(events[..], [AppEvent::Notify(_)]));
        assert!(network.calls().is_empty());
    }
}
