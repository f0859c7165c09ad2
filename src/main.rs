use nmtui::app::App;
use nmtui::config::Config;
use nmtui::network::Nmcli;
use nmtui::ui::TuiManager;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = nmtui::logging::init();

    let config = Config::default();
    let network = Arc::new(Nmcli::new(&config.backend.program));
    let mut app = App::new(&config, network);

    let mut tui = TuiManager::new()?;
    tui.run_event_loop(&mut app)?;

    Ok(())
}
