//! Floating surfaces: popups and notifications drawn over another view
//!
//! A surface is inactive until opened with new content. While active it
//! receives events first: one of its close keys deactivates it and is
//! consumed, anything else goes to the content.

use crate::app::{AppEvent, Effect};
use crate::compositor::{compose, Anchor};
use crate::config::KeyBinding;
use crate::frame;
use crate::text;
use crossterm::event::KeyEvent;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType};
use std::fmt;

/// Something that can be shown inside a surface or as a view
pub trait Content: fmt::Debug + Send {
    fn init(&mut self) -> Effect {
        Effect::None
    }

    fn update(&mut self, event: &AppEvent) -> Effect;

    fn view(&self) -> String;

    /// Key bindings shown in the help line while this content has focus
    fn help(&self) -> Vec<KeyBinding> {
        Vec::new()
    }
}

/// Box drawn around surface content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    pub border_type: BorderType,
    /// Border and title color
    pub border: Style,
    pub text: Style,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            border_type: BorderType::Rounded,
            border: Style::default(),
            text: Style::default(),
        }
    }
}

#[derive(Debug)]
pub struct FloatingSurface {
    pub title: String,
    /// Inner width; 0 keeps the content's natural width
    pub width: usize,
    /// Inner height; 0 keeps the content's natural height
    pub height: usize,
    pub x_anchor: Anchor,
    pub y_anchor: Anchor,
    pub x_offset: i32,
    pub y_offset: i32,
    content: Option<Box<dyn Content>>,
    active: bool,
    close: KeyBinding,
}

impl FloatingSurface {
    pub fn new(close: KeyBinding) -> Self {
        Self {
            title: String::new(),
            width: 0,
            height: 0,
            x_anchor: Anchor::Begin,
            y_anchor: Anchor::Begin,
            x_offset: 0,
            y_offset: 0,
            content: None,
            active: false,
            close,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_anchors(mut self, x: Anchor, y: Anchor) -> Self {
        self.x_anchor = x;
        self.y_anchor = y;
        self
    }

    pub fn with_offsets(mut self, x: i32, y: i32) -> Self {
        self.x_offset = x;
        self.y_offset = y;
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replace the content and title, activate, and initialize the content.
    pub fn open(&mut self, mut content: Box<dyn Content>, title: impl Into<String>) -> Effect {
        let effect = content.init();
        self.content = Some(content);
        self.title = title.into();
        self.active = true;
        tracing::debug!(title = %self.title, "surface opened");
        effect
    }

    pub fn close(&mut self) {
        if self.active {
            tracing::debug!(title = %self.title, "surface closed");
        }
        self.active = false;
    }

    pub fn is_close_key(&self, key: &KeyEvent) -> bool {
        self.close.matches(key)
    }

    pub fn update(&mut self, event: &AppEvent) -> Effect {
        if !self.active {
            return Effect::None;
        }
        if let Some(key) = event.key() {
            if self.is_close_key(key) {
                self.close();
                return Effect::None;
            }
        }
        match self.content.as_mut() {
            Some(content) => content.update(event),
            None => Effect::None,
        }
    }

    pub fn view(&self) -> String {
        self.content.as_ref().map(|c| c.view()).unwrap_or_default()
    }

    /// Close binding followed by the content's own bindings
    pub fn help(&self) -> Vec<KeyBinding> {
        let mut help = vec![self.close.clone()];
        if let Some(content) = &self.content {
            help.extend(content.help());
        }
        help
    }

    /// Draw the surface over `background`.
    ///
    /// Only meaningful while active; the caller decides whether to call it.
    pub fn place(&self, background: &str, style: &SurfaceStyle) -> String {
        let block = Block::bordered()
            .border_type(style.border_type)
            .border_style(style.border)
            .style(style.text);
        let surface = frame::boxed(&self.view(), block, self.width, self.height);
        let title = text::styled(&format!("[ {} ]", self.title), style.border);
        let surface = compose(&title, &surface, Anchor::Center, Anchor::Begin, 0, 0);

        compose(
            &surface,
            background,
            self.x_anchor,
            self.y_anchor,
            self.x_offset,
            self.y_offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyCombo;
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    /// Content that records what reaches it
    #[derive(Debug, Clone)]
    struct Recorder {
        seen: Arc<Mutex<Vec<String>>>,
        text: String,
    }

    impl Recorder {
        fn new(text: &str) -> (Self, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let recorder = Self {
                seen: Arc::clone(&seen),
                text: text.to_string(),
            };
            (recorder, seen)
        }

        fn log(&self, entry: &str) {
            self.seen.lock().unwrap().push(entry.to_string());
        }
    }

    impl Content for Recorder {
        fn init(&mut self) -> Effect {
            self.log("init");
            Effect::Emit(AppEvent::Tick)
        }

        fn update(&mut self, event: &AppEvent) -> Effect {
            match event {
                AppEvent::Key(key) => self.log(&format!("key {:?}", key.code)),
                AppEvent::Tick => self.log("tick"),
                _ => self.log("other"),
            }
            Effect::None
        }

        fn view(&self) -> String {
            self.text.clone()
        }
    }

    fn surface() -> FloatingSurface {
        FloatingSurface::new(KeyBinding::new(&["esc", "ctrl+q"], "esc", "close"))
    }

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_starts_inactive() {
        assert!(!surface().is_active());
        assert_eq!(surface().view(), "");
    }

    #[test]
    fn test_inactive_ignores_close_key() {
        let (recorder, seen) = Recorder::new("x");
        let mut s = surface();
        let _ = s.open(Box::new(recorder), "t");
        s.close();
        seen.lock().unwrap().clear();

        assert!(s.update(&key(KeyCode::Esc)).is_none());
        assert!(!s.is_active());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_inactive_does_not_forward_other_events() {
        let (recorder, seen) = Recorder::new("x");
        let mut s = surface();
        let _ = s.open(Box::new(recorder), "t");
        s.close();
        seen.lock().unwrap().clear();

        let _ = s.update(&AppEvent::Tick);
        let _ = s.update(&key(KeyCode::Char('a')));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_open_initializes_content() {
        let (recorder, seen) = Recorder::new("x");
        let mut s = surface();
        let effect = s.open(Box::new(recorder), "Title");
        assert!(matches!(effect, Effect::Emit(AppEvent::Tick)));
        assert!(s.is_active());
        assert_eq!(s.title, "Title");
        assert_eq!(*seen.lock().unwrap(), vec!["init"]);
    }

    #[test]
    fn test_active_forwards_non_close_events() {
        let (recorder, seen) = Recorder::new("x");
        let mut s = surface();
        let _ = s.open(Box::new(recorder), "t");

        let _ = s.update(&key(KeyCode::Char('a')));
        let _ = s.update(&AppEvent::Tick);
        assert!(s.is_active());
        assert_eq!(*seen.lock().unwrap(), vec!["init", "key Char('a')", "tick"]);
    }

    #[test]
    fn test_close_key_deactivates_and_is_consumed() {
        let (recorder, seen) = Recorder::new("x");
        let mut s = surface();
        let _ = s.open(Box::new(recorder), "t");

        let effect = s.update(&AppEvent::Key(KeyEvent::new(
            KeyCode::Char('q'),
            KeyModifiers::CONTROL,
        )));
        assert!(effect.is_none());
        assert!(!s.is_active());
        assert_eq!(*seen.lock().unwrap(), vec!["init"]);
    }

    #[test]
    fn test_open_replaces_content() {
        let (first, _) = Recorder::new("first");
        let (second, _) = Recorder::new("second");
        let mut s = surface();
        let _ = s.open(Box::new(first), "a");
        let _ = s.open(Box::new(second), "b");
        assert_eq!(s.view(), "second");
        assert_eq!(s.title, "b");
    }

    #[test]
    fn test_help_lists_close_first() {
        let s = surface();
        let help = s.help();
        assert_eq!(help.len(), 1);
        assert_eq!(help[0].keys[0], KeyCombo::key(KeyCode::Esc));
    }

    #[test]
    fn test_place_centered_with_title() {
        let (recorder, _) = Recorder::new("hi");
        let mut s = surface()
            .with_size(9, 1)
            .with_anchors(Anchor::Center, Anchor::Center);
        let _ = s.open(Box::new(recorder), "T");

        let style = SurfaceStyle {
            border_type: BorderType::Plain,
            ..SurfaceStyle::default()
        };
        let bg = vec![".".repeat(20); 5].join("\n");
        let out = s.place(&bg, &style);
        assert_eq!(
            out,
            [
                "....................",
                "....┌──[ T ]──┐.....",
                "....│   hi    │.....",
                "....└─────────┘.....",
                "....................",
            ]
            .join("\n")
        );
    }

    #[test]
    fn test_place_top_right_with_offset_and_empty_title() {
        let (recorder, _) = Recorder::new("ok");
        let mut s = surface()
            .with_anchors(Anchor::End, Anchor::Begin)
            .with_offsets(-1, 1);
        let _ = s.open(Box::new(recorder), "");

        let style = SurfaceStyle {
            border_type: BorderType::Plain,
            ..SurfaceStyle::default()
        };
        let bg = vec![".".repeat(8); 5].join("\n");
        let out = s.place(&bg, &style);
        assert_eq!(
            out,
            ["........", "...[  ].", "...│ok│.", "...└──┘.", "........"].join("\n")
        );
    }

    #[test]
    fn test_place_keeps_background_shape() {
        let (recorder, _) = Recorder::new("a much longer line than fits");
        let mut s = surface().with_anchors(Anchor::Center, Anchor::Center);
        let _ = s.open(Box::new(recorder), "wide");
        let bg = vec![" ".repeat(12); 6].join("\n");
        let out = s.place(&bg, &SurfaceStyle::default());
        assert_eq!(text::height(&out), 6);
        assert!(text::lines(&out).all(|line| text::width(line) == 12));
    }
}
