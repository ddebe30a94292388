mod app;
pub mod theme;
mod ui;

pub use app::App;
