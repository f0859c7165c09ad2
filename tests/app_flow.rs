mod common;

use common::StubNetwork;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use nmtui::app::{App, AppEvent, AppMode, Effect};
use nmtui::config::Config;
use nmtui::network::Action;
use nmtui::text;
use std::collections::VecDeque;
use std::sync::Arc;

/// Feed `effect` back into the app until nothing is left, running tasks on
/// this thread. Delayed events are dropped.
fn settle(app: &mut App, effect: Effect) {
    let mut queue: VecDeque<AppEvent> = effect
        .run_inline()
        .into_iter()
        .filter(|e| !matches!(e, AppEvent::CloseNotification(_)))
        .collect();
    while let Some(event) = queue.pop_front() {
        let next = app.handle_event(event);
        queue.extend(
            next.run_inline()
                .into_iter()
                .filter(|e| !matches!(e, AppEvent::CloseNotification(_))),
        );
    }
}

fn send(app: &mut App, event: AppEvent) {
    settle(app, Effect::Emit(event));
}

fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    send(app, AppEvent::Key(KeyEvent::new(code, modifiers)));
}

fn start(network: StubNetwork) -> (App, Arc<StubNetwork>) {
    let network = Arc::new(network);
    let mut app = App::new(&Config::default(), network.clone());
    send(
        &mut app,
        AppEvent::Resize {
            width: 100,
            height: 32,
        },
    );
    let init = app.init();
    settle(&mut app, init);
    (app, network)
}

#[test]
fn startup_renders_both_wifi_lists() {
    let (app, network) = start(StubNetwork::with_home());
    let view = app.view();

    assert_eq!(text::size(&view), (100, 32));
    assert!(view.contains("Available"));
    assert!(view.contains("Stored"));
    assert!(view.contains("Cafe"));
    assert_eq!(network.calls(), vec!["available", "stored", "vpn"]);
}

#[test]
fn edit_stored_connection_and_submit() {
    let (mut app, network) = start(StubNetwork::with_home());

    press(&mut app, KeyCode::Char('2'), KeyModifiers::NONE);
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(app.mode(), AppMode::Popup);
    assert_eq!(app.popup_title(), Some("Stored Wi-Fi info"));
    assert!(app.view().contains("SSID: Home"));

    // rename, then jump to the priority field
    press(&mut app, KeyCode::Char('X'), KeyModifiers::NONE);
    press(&mut app, KeyCode::Char('j'), KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Char('j'), KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Char('j'), KeyModifiers::CONTROL);
    press(&mut app, KeyCode::Char('7'), KeyModifiers::NONE);
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    assert_eq!(app.mode(), AppMode::Normal);
    assert!(network.calls().contains(&"modify Home -> HomeX 7".to_string()));
}

#[test]
fn failed_connect_shows_notification() {
    let (mut app, _) = start(StubNetwork::with_home().failing(Action::Connect));

    press(&mut app, KeyCode::Char('j'), KeyModifiers::NONE);
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(app.popup_title(), Some("Wi-Fi Connector"));
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    assert!(app.is_notification_active());
    assert!(app
        .notification_text()
        .is_some_and(|t| t.contains("refused")));
    assert!(app.view().contains("[ Notification ]"));
}

#[test]
fn popup_close_key_does_not_quit() {
    let (mut app, _) = start(StubNetwork::with_home());
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    assert_eq!(app.mode(), AppMode::Popup);

    press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(app.mode(), AppMode::Normal);

    press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(app.mode(), AppMode::Quit);
}

#[test]
fn vpn_tab_switch_reloads_profiles() {
    let (mut app, network) = start(StubNetwork::with_home());
    press(&mut app, KeyCode::Char(']'), KeyModifiers::NONE);
    let vpn_loads = network.calls().iter().filter(|c| *c == "vpn").count();
    assert_eq!(vpn_loads, 2);
    assert!(app.view().contains("Type"));
}
