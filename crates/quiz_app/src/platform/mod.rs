mod app;
mod config;
mod effects;
mod input;
mod terminal;
mod ui;

pub use app::run_app;
