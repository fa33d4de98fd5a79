//! UI layer for the desktop GUI: app shell, panels, and themes.

pub mod app;
pub mod panels;
pub mod theme;

pub use app::CountingGuiApp;
