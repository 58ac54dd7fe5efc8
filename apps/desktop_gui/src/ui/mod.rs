//! UI layer for desktop GUI: app shell, panels, markdown rendering, and theme.

pub mod app;
pub mod markdown;
pub mod panels;
pub mod theme;

pub use app::DeckStudioApp;
