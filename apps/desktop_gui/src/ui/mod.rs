//! UI layer for the desktop GUI: the app shell and its widgets.

pub mod app;
pub mod widgets;

pub use app::NyayaApp;
