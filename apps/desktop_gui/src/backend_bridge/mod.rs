//! Bridge between the UI event queue and the booking worker thread.

pub mod runtime;
