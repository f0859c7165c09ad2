use crate::app::{App, AppEvent, AppMode, EffectRunner};
use crate::error::AppError;
use crate::ui::TerminalGuard;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc;
use std::time::Instant;

pub struct TuiManager {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    _guard: TerminalGuard,
}

impl TuiManager {
    pub fn new() -> Result<Self, AppError> {
        let guard = TerminalGuard::new()?;
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(TuiManager {
            terminal,
            _guard: guard,
        })
    }

    pub fn run_event_loop(&mut self, app: &mut App) -> Result<(), AppError> {
        let (sender, receiver) = mpsc::channel();
        let mut runner = EffectRunner::new(sender);

        let size = self.terminal.size()?;
        runner.dispatch(
            app,
            AppEvent::Resize {
                width: size.width,
                height: size.height,
            },
        );
        let init = app.init();
        runner.apply(app, init);

        let mut last_tick = Instant::now();
        loop {
            if app.mode() == AppMode::Quit {
                return Ok(());
            }
            self.render_frame(app)?;

            let timeout = app.tick_rate().saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        runner.dispatch(app, AppEvent::Key(key));
                    }
                    Event::Resize(width, height) => {
                        runner.dispatch(app, AppEvent::Resize { width, height });
                    }
                    _ => {}
                }
            }

            // results from worker threads
            while let Ok(event) = receiver.try_recv() {
                runner.dispatch(app, event);
            }

            if last_tick.elapsed() >= app.tick_rate() {
                runner.dispatch(app, AppEvent::Tick);
                last_tick = Instant::now();
            }
        }
    }

    pub fn render_frame(&mut self, app: &App) -> io::Result<()> {
        let view = app.view();
        self.terminal.draw(|frame| {
            let area = frame.area();
            crate::frame::blit(&view, area, frame.buffer_mut());
        })?;
        Ok(())
    }
}
