//! UI layer for the booking window: app shell and the shared page document.

pub mod app;
pub mod document;

pub use app::BookingGuiApp;
pub use document::SharedDocument;
