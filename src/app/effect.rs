//! Follow-up work returned from event handlers
//!
//! Handlers never block. Anything that talks to the backend or waits is
//! returned as an [`Effect`] and executed by the [`EffectRunner`], which
//! feeds the resulting events back through the same channel the terminal
//! loop drains.

use super::{App, AppEvent};
use std::collections::VecDeque;
use std::fmt;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

pub type Task = Box<dyn FnOnce() -> AppEvent + Send + 'static>;

pub enum Effect {
    None,
    /// Deliver an event right after the current one
    Emit(AppEvent),
    /// Run on a worker thread and deliver the returned event
    Task(Task),
    /// Deliver an event after a delay
    Delay(Duration, AppEvent),
    Batch(Vec<Effect>),
    Quit,
}

impl Effect {
    pub fn task(f: impl FnOnce() -> AppEvent + Send + 'static) -> Self {
        Effect::Task(Box::new(f))
    }

    pub fn batch(effects: impl IntoIterator<Item = Effect>) -> Self {
        let effects: Vec<Effect> = effects
            .into_iter()
            .filter(|e| !matches!(e, Effect::None))
            .collect();
        match effects.len() {
            0 => Effect::None,
            _ => Effect::Batch(effects),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Effect::None)
    }

    /// Execute on the current thread, skipping delays, and collect the
    /// events produced in order.
    pub fn run_inline(self) -> Vec<AppEvent> {
        match self {
            Effect::None => Vec::new(),
            Effect::Emit(event) | Effect::Delay(_, event) => vec![event],
            Effect::Task(task) => vec![task()],
            Effect::Batch(effects) => effects.into_iter().flat_map(Effect::run_inline).collect(),
            Effect::Quit => vec![AppEvent::Quit],
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::None => write!(f, "None"),
            Effect::Emit(event) => f.debug_tuple("Emit").field(event).finish(),
            Effect::Task(_) => write!(f, "Task(..)"),
            Effect::Delay(delay, event) => f.debug_tuple("Delay").field(delay).field(event).finish(),
            Effect::Batch(effects) => f.debug_tuple("Batch").field(effects).finish(),
            Effect::Quit => write!(f, "Quit"),
        }
    }
}

pub struct EffectRunner {
    sender: Sender<AppEvent>,
    pending: VecDeque<AppEvent>,
}

impl EffectRunner {
    pub fn new(sender: Sender<AppEvent>) -> Self {
        Self {
            sender,
            pending: VecDeque::new(),
        }
    }

    /// Handle `event` and every event it emits synchronously.
    pub fn dispatch(&mut self, app: &mut App, event: AppEvent) {
        self.pending.push_back(event);
        self.drain(app);
    }

    /// Run `effect`, then handle everything it emitted synchronously.
    pub fn apply(&mut self, app: &mut App, effect: Effect) {
        self.run(effect);
        self.drain(app);
    }

    fn drain(&mut self, app: &mut App) {
        while let Some(event) = self.pending.pop_front() {
            let effect = app.handle_event(event);
            self.run(effect);
        }
    }

    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Emit(event) => self.pending.push_back(event),
            Effect::Quit => self.pending.push_back(AppEvent::Quit),
            Effect::Batch(effects) => effects.into_iter().for_each(|e| self.run(e)),
            Effect::Task(task) => self.spawn("task", move || task()),
            Effect::Delay(delay, event) => self.spawn("delay", move || {
                thread::sleep(delay);
                event
            }),
        }
    }

    fn spawn(&self, name: &str, work: impl FnOnce() -> AppEvent + Send + 'static) {
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("nm-tui-{name}"))
            .spawn(move || {
                if sender.send(work()).is_err() {
                    tracing::debug!("event loop gone, dropping result");
                }
            });
        if let Err(e) = spawned {
            tracing::error!(error = %e, "failed to spawn worker thread");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_batch_drops_none() {
        assert!(Effect::batch([Effect::None, Effect::None]).is_none());
        let effect = Effect::batch([Effect::None, Effect::Quit]);
        assert!(matches!(effect, Effect::Batch(ref v) if v.len() == 1));
    }

    #[test]
    fn test_task_result_arrives_on_channel() {
        let (tx, rx) = mpsc::channel();
        let mut runner = EffectRunner::new(tx);
        runner.run(Effect::task(|| AppEvent::Notify("done".to_string())));
        let event = rx.recv_timeout(Duration::from_secs(5));
        assert!(matches!(event, Ok(AppEvent::Notify(ref m)) if m == "done"));
    }

    #[test]
    fn test_delay_waits_before_delivery() {
        let (tx, rx) = mpsc::channel();
        let mut runner = EffectRunner::new(tx);
        runner.run(Effect::Delay(Duration::from_millis(50), AppEvent::Tick));
        assert!(rx.try_recv().is_err());
        assert!(matches!(rx.recv_timeout(Duration::from_secs(5)), Ok(AppEvent::Tick)));
    }

    #[test]
    fn test_run_inline_flattens_in_order() {
        let effect = Effect::batch([
            Effect::Emit(AppEvent::ClosePopup),
            Effect::task(|| AppEvent::Tick),
            Effect::Delay(Duration::from_secs(60), AppEvent::CloseNotification(3)),
            Effect::Quit,
        ]);
        let events = effect.run_inline();
        assert!(matches!(
            events[..],
            [
                AppEvent::ClosePopup,
                AppEvent::Tick,
                AppEvent::CloseNotification(3),
                AppEvent::Quit
            ]
        ));
    }

    #[test]
    fn test_debug_does_not_require_debug_closure() {
        let effect = Effect::batch([Effect::task(|| AppEvent::Tick), Effect::Quit]);
        assert_eq!(format!("{effect:?}"), "Batch([Task(..), Quit])");
    }
}
