use crate::app::mode::AppMode;
use crate::app::{App, AppEvent, Effect, WifiEvent};
use crate::config::Config;
use crate::network::fake::FakeNetwork;
use crate::network::{WifiScanned, WifiStored};
use crate::text;
use crate::ui::views::TextContent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::sync::Arc;

/// Handle `event` and everything it leads to, running tasks inline.
/// Delayed events are returned instead of delivered.
fn drive(app: &mut App, event: AppEvent) -> Vec<AppEvent> {
    let mut delayed = Vec::new();
    let mut queue = VecDeque::from([event]);
    while let Some(event) = queue.pop_front() {
        let effect = app.handle_event(event);
        collect(effect, &mut queue, &mut delayed);
    }
    delayed
}

fn collect(effect: Effect, queue: &mut VecDeque<AppEvent>, delayed: &mut Vec<AppEvent>) {
    match effect {
        Effect::None => {}
        Effect::Emit(event) => queue.push_back(event),
        Effect::Task(task) => queue.push_back(task()),
        Effect::Delay(_, event) => delayed.push(event),
        Effect::Batch(effects) => effects
            .into_iter()
            .for_each(|e| collect(e, queue, delayed)),
        Effect::Quit => queue.push_back(AppEvent::Quit),
    }
}

fn started(network: FakeNetwork) -> (App, Arc<FakeNetwork>) {
    let network = Arc::new(network);
    let mut app = App::new(&Config::default(), network.clone());
    drive(&mut app, AppEvent::Resize { width: 120, height: 30 });
    let init = app.init();
    let mut queue = VecDeque::new();
    let mut delayed = Vec::new();
    collect(init, &mut queue, &mut delayed);
    while let Some(event) = queue.pop_front() {
        drive(&mut app, event);
    }
    (app, network)
}

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn home_network() -> FakeNetwork {
    FakeNetwork {
        available: vec![WifiScanned {
            ssid: "Home".to_string(),
            active: false,
            security: "WPA2".to_string(),
            signal: 80,
        }],
        stored: vec![WifiStored {
            name: "Home".to_string(),
            ssid: "Home".to_string(),
            active: false,
        }],
        ..Default::default()
    }
}

#[test]
fn test_app_handle_event_quit() {
    let (mut app, _) = started(FakeNetwork::default());
    assert_eq!(app.mode(), AppMode::Normal);
    drive(&mut app, key(KeyCode::Char('q')));
    assert_eq!(app.mode(), AppMode::Quit);
}

#[test]
fn test_init_loads_every_list() {
    let (_, network) = started(FakeNetwork::default());
    let calls = network.calls();
    for expected in ["available", "stored", "vpn"] {
        assert!(calls.contains(&expected.to_string()), "missing {expected}: {calls:?}");
    }
}

#[test]
fn test_view_fills_terminal() {
    let (app, _) = started(home_network());
    let view = app.view();
    assert_eq!(text::size(&view), (120, 30));
    assert!(view.contains("Home"));
}

#[test]
fn test_popup_takes_keys_and_closes_on_esc() {
    let (mut app, _) = started(FakeNetwork::default());
    drive(
        &mut app,
        AppEvent::OpenPopup {
            content: Box::new(TextContent::new("hello")),
            title: "Greeting".to_string(),
        },
    );
    assert_eq!(app.mode(), AppMode::Popup);
    assert_eq!(app.popup_title(), Some("Greeting"));
    assert!(app.view().contains("[ Greeting ]"));

    // esc closes the popup instead of quitting
    drive(&mut app, key(KeyCode::Esc));
    assert_eq!(app.mode(), AppMode::Normal);
    assert_eq!(text::size(&app.view()), (120, 30));
}

#[test]
fn test_connect_flow_through_popup() {
    let (mut app, network) = started(FakeNetwork {
        password: Some("hunter2".to_string()),
        ..home_network()
    });

    drive(&mut app, key(KeyCode::Enter));
    assert_eq!(app.popup_title(), Some("Wi-Fi Connector"));

    drive(&mut app, key(KeyCode::Enter));
    assert_eq!(app.mode(), AppMode::Normal);
    assert!(network.calls().contains(&"connect Home hunter2".to_string()));
}

#[test]
fn test_notification_closes_only_for_its_generation() {
    let (mut app, _) = started(FakeNetwork::default());

    let first = drive(&mut app, AppEvent::Notify("first".to_string()));
    let second = drive(&mut app, AppEvent::Notify("second".to_string()));
    assert!(app.notification_text().is_some_and(|t| t.contains("second")));

    for event in first {
        drive(&mut app, event);
    }
    assert!(app.is_notification_active());

    for event in second {
        drive(&mut app, event);
    }
    assert!(!app.is_notification_active());
}

#[test]
fn test_notification_is_drawn_top_right() {
    let (mut app, _) = started(FakeNetwork::default());
    drive(&mut app, AppEvent::Notify("oops".to_string()));
    let view = app.view();
    let line = text::lines(&view).nth(2).unwrap_or_default();
    assert!(line.contains("oops"));
    assert_eq!(text::width(line), 120);
}

#[test]
fn test_backend_failure_becomes_notification() {
    let (app, _) = started(FakeNetwork {
        fail: true,
        ..Default::default()
    });
    assert!(app.is_notification_active());
}

#[test]
fn test_keys_with_notification_still_reach_tabs() {
    let (mut app, _) = started(home_network());
    drive(&mut app, AppEvent::Notify("note".to_string()));
    drive(&mut app, key(KeyCode::Char(']')));
    drive(&mut app, key(KeyCode::Char('q')));
    assert_eq!(app.mode(), AppMode::Quit);
}

#[test]
fn test_rescan_event_reaches_lists() {
    let (mut app, network) = started(FakeNetwork::default());
    drive(&mut app, AppEvent::Wifi(WifiEvent::Rescan));
    let scans = network.calls().iter().filter(|c| *c == "available").count();
    assert_eq!(scans, 2);
}
