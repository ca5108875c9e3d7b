#[allow(clippy::module_inception)]
mod app;
pub mod analytics;
pub mod cards;
pub mod debounce;
pub mod error;
pub mod tmdb;
pub mod utils;

pub use app::{App, AppMessage, CurrentScreen, spawn_record_search};
