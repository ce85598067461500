//! Ratatui front-end: the numbered main menu, the add-book form, the
//! single-line prompts, and the list and detail screens that show results.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use screens::MenuChoice;
pub use terminal::run_app;
