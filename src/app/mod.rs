pub mod app;
#[cfg(test)]
mod app_tests;
pub mod effect;
pub mod event;
pub mod mode;

pub use app::App;
pub use effect::{Effect, EffectRunner};
pub use event::{AppEvent, VpnEvent, WifiEvent};
pub use mode::AppMode;
