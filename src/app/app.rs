use super::mode::AppMode;
use super::{AppEvent, Effect};
use crate::compositor::Anchor;
use crate::config::{Config, KeyBinding, LayoutConfig, MainKeys};
use crate::floating::FloatingSurface;
use crate::network::NetworkManager;
use crate::ui::theme::Theme;
use crate::ui::views::help::help_line;
use crate::ui::views::{Tabs, TextContent};
use std::sync::Arc;
use std::time::Duration;

const HELP_HEIGHT: u16 = 1;
const NOTIFICATION_TITLE: &str = "Notification";

pub struct App {
    tabs: Tabs,
    popup: FloatingSurface,
    notification: FloatingSurface,
    /// Bumped on every notification so stale close timers are ignored
    notification_generation: u64,
    keys: MainKeys,
    layout: LayoutConfig,
    theme: Theme,
    quit: bool,
    width: u16,
    height: u16,
}

impl App {
    pub fn new(config: &Config, network: Arc<dyn NetworkManager>) -> Self {
        let theme = Theme::from_config(&config.theme);
        let layout = config.layout.clone();

        let popup = FloatingSurface::new(config.keys.popup.close.clone())
            .with_size(layout.popup_width, layout.popup_height)
            .with_anchors(Anchor::Center, Anchor::Center);
        let (x_offset, y_offset) = layout.notification_offset;
        let notification = FloatingSurface::new(KeyBinding::new(&[], "", ""))
            .with_size(layout.notification_width, 0)
            .with_anchors(Anchor::End, Anchor::Begin)
            .with_offsets(x_offset, y_offset);

        Self {
            tabs: Tabs::new(&config.keys, theme, network),
            popup,
            notification,
            notification_generation: 0,
            keys: config.keys.main.clone(),
            layout,
            theme,
            quit: false,
            width: 0,
            height: 0,
        }
    }

    /// Initial loads of every tab.
    pub fn init(&mut self) -> Effect {
        self.tabs.init()
    }

    pub fn mode(&self) -> AppMode {
        if self.quit {
            AppMode::Quit
        } else if self.popup.is_active() {
            AppMode::Popup
        } else {
            AppMode::Normal
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.layout.tick_rate
    }

    pub fn is_notification_active(&self) -> bool {
        self.notification.is_active()
    }

    pub fn notification_text(&self) -> Option<String> {
        self.notification
            .is_active()
            .then(|| self.notification.view())
    }

    pub fn popup_title(&self) -> Option<&str> {
        self.popup.is_active().then_some(self.popup.title.as_str())
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Effect {
        match event {
            AppEvent::Quit => {
                tracing::info!("quitting");
                self.quit = true;
                Effect::None
            }
            AppEvent::Resize { width, height } => {
                self.resize(width, height);
                Effect::None
            }
            AppEvent::OpenPopup { content, title } => {
                tracing::debug!(%title, "opening popup");
                self.popup.open(content, title)
            }
            AppEvent::ClosePopup => {
                self.popup.close();
                Effect::None
            }
            AppEvent::Notify(message) => self.notify(&message),
            AppEvent::CloseNotification(generation) => {
                if generation == self.notification_generation {
                    self.notification.close();
                }
                Effect::None
            }
            AppEvent::Key(_) => self.handle_key(&event),
            event => Effect::batch([self.tabs.update(&event), self.popup.update(&event)]),
        }
    }

    fn handle_key(&mut self, event: &AppEvent) -> Effect {
        if self.popup.is_active() {
            return self.popup.update(event);
        }
        if let AppEvent::Key(key) = event {
            if self.keys.quit.matches(key) {
                return Effect::Quit;
            }
        }
        self.tabs.update(event)
    }

    fn notify(&mut self, message: &str) -> Effect {
        self.notification_generation += 1;
        tracing::info!(generation = self.notification_generation, %message, "notification");

        let content = TextContent::wrapped(message, self.layout.notification_width);
        let init = self.notification.open(Box::new(content), NOTIFICATION_TITLE);
        Effect::batch([
            init,
            Effect::Delay(
                self.layout.notification_timeout,
                AppEvent::CloseNotification(self.notification_generation),
            ),
        ])
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.tabs.resize(width, height.saturating_sub(HELP_HEIGHT));
    }

    /// Bindings of whatever currently receives keys
    pub fn help(&self) -> Vec<KeyBinding> {
        if self.popup.is_active() {
            return self.popup.help();
        }
        let mut help = self.tabs.help();
        help.push(self.keys.quit.clone());
        help
    }

    /// The whole screen as one frame: tabs, overlays, then the help line.
    pub fn view(&self) -> String {
        let mut view = self.tabs.view();
        if self.popup.is_active() {
            view = self.popup.place(&view, &self.theme.popup());
        }
        if self.notification.is_active() {
            view = self.notification.place(&view, &self.theme.notification());
        }
        let help = help_line(&self.help(), usize::from(self.width), &self.theme);
        format!("{view}\n{help}")
    }
}
