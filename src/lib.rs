pub mod app;
pub mod compositor;
pub mod config;
pub mod error;
pub mod floating;
pub mod frame;
pub mod logging;
pub mod network;
pub mod text;
pub mod ui;
