//! Dispatch helpers from UI actions to the booking worker's event queue.

use client_core::PageEvent;
use crossbeam_channel::{Sender, TrySendError};

pub fn dispatch_page_event(cmd_tx: &Sender<PageEvent>, event: PageEvent, status: &mut String) {
    let event_name = match &event {
        PageEvent::SearchClicked => "search",
        PageEvent::BookClicked { .. } => "select_bus",
        PageEvent::FormSubmitted(_) => "submit_booking",
    };

    match cmd_tx.try_send(event) {
        Ok(()) => tracing::debug!(event = event_name, "queued page event"),
        Err(TrySendError::Full(_)) => {
            *status = "UI event queue is full; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status =
                "Booking worker disconnected (possible startup/runtime failure); restart the app"
                    .to_string();
        }
    }
}
