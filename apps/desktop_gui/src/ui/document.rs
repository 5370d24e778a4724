//! Booking page document shared between the egui frame loop and the booking
//! worker. The UI thread edits input values and reads rendered content; the
//! worker drives it through [`client_core::Page`].

use std::{
    collections::{HashMap, HashSet, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use client_core::{Fragment, Page, Slot};

const SEATS_DEFAULT: &str = "1";

#[derive(Debug)]
pub struct Document {
    values: HashMap<Slot, String>,
    contents: HashMap<Slot, Fragment>,
    hidden: HashSet<Slot>,
    scroll_request: Option<Slot>,
    alerts: VecDeque<String>,
}

impl Default for Document {
    fn default() -> Self {
        let mut document = Self {
            values: HashMap::new(),
            contents: HashMap::new(),
            hidden: HashSet::from([Slot::BookingForm, Slot::BookingResult]),
            scroll_request: None,
            alerts: VecDeque::new(),
        };
        document.reset_booking_fields();
        document
    }
}

impl Document {
    pub fn value(&self, slot: Slot) -> &str {
        self.values.get(&slot).map(String::as_str).unwrap_or_default()
    }

    pub fn value_mut(&mut self, slot: Slot) -> &mut String {
        self.values.entry(slot).or_default()
    }

    pub fn content(&self, slot: Slot) -> Option<&Fragment> {
        self.contents.get(&slot)
    }

    pub fn is_hidden(&self, slot: Slot) -> bool {
        self.hidden.contains(&slot)
    }

    /// Consumes a pending scroll request aimed at `slot`.
    pub fn take_scroll_request(&mut self, slot: Slot) -> bool {
        if self.scroll_request == Some(slot) {
            self.scroll_request = None;
            true
        } else {
            false
        }
    }

    pub fn pending_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    fn reset_booking_fields(&mut self) {
        self.values.insert(Slot::PassengerName, String::new());
        self.values.insert(Slot::Seats, SEATS_DEFAULT.to_string());
    }
}

#[derive(Clone, Default)]
pub struct SharedDocument {
    inner: Arc<Mutex<Document>>,
    repaint: Option<egui::Context>,
}

impl SharedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn lock(&self) -> MutexGuard<'_, Document> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, apply: impl FnOnce(&mut Document)) {
        apply(&mut self.lock());
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

impl Page for SharedDocument {
    type Handle = Slot;

    fn lookup(&self, slot: Slot) -> Option<Slot> {
        // Every slot is laid out by the booking window.
        Some(slot)
    }

    fn value(&self, handle: &Slot) -> String {
        self.lock().value(*handle).to_string()
    }

    fn set_value(&mut self, handle: &Slot, value: &str) {
        self.update(|doc| *doc.value_mut(*handle) = value.to_string());
    }

    fn set_content(&mut self, handle: &Slot, fragment: Fragment) {
        self.update(|doc| {
            doc.contents.insert(*handle, fragment);
        });
    }

    fn set_hidden(&mut self, handle: &Slot, hidden: bool) {
        self.update(|doc| {
            if hidden {
                doc.hidden.insert(*handle);
            } else {
                doc.hidden.remove(handle);
            }
        });
    }

    fn scroll_into_view(&mut self, handle: &Slot) {
        self.update(|doc| doc.scroll_request = Some(*handle));
    }

    fn reset_form(&mut self, handle: &Slot) {
        if *handle == Slot::BookForm {
            self.update(Document::reset_booking_fields);
        }
    }

    fn alert(&mut self, message: &str) {
        tracing::warn!("{message}");
        self.update(|doc| doc.alerts.push_back(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use client_core::{
        ApiCallError, BookingApi, BookingController, BusFilter, PageEvent, SubmitEvent,
    };
    use shared::{
        domain::{BookingId, BusId},
        protocol::{BookingConfirmation, BookingRequest, BookingSummary, Bus},
    };

    use super::*;

    struct FixedApi {
        bookings: StdMutex<Vec<BookingRequest>>,
    }

    #[async_trait]
    impl BookingApi for FixedApi {
        async fn list_buses(&self, _filter: &BusFilter) -> Result<Vec<Bus>, ApiCallError> {
            Ok(vec![Bus {
                id: BusId(3),
                from: "Boston".to_string(),
                to: "Albany".to_string(),
                departure: "09:15".to_string(),
                arrival: "12:40".to_string(),
                price: 27.5,
                available: 12,
                name: "Coastal".to_string(),
            }])
        }

        async fn book(
            &self,
            request: &BookingRequest,
        ) -> Result<BookingConfirmation, ApiCallError> {
            self.bookings.lock().unwrap().push(request.clone());
            Ok(BookingConfirmation {
                booking: BookingSummary {
                    id: BookingId(55),
                    passenger_name: request.passenger_name.clone(),
                    seats: request.seats,
                    total_price: 27.5 * request.seats as f64,
                },
                message: "See you on board".to_string(),
            })
        }
    }

    #[test]
    fn fresh_document_hides_form_and_result() {
        let doc = Document::default();
        assert!(doc.is_hidden(Slot::BookingForm));
        assert!(doc.is_hidden(Slot::BookingResult));
        assert!(!doc.is_hidden(Slot::BusesList));
        assert_eq!(doc.value(Slot::Seats), "1");
        assert_eq!(doc.value(Slot::FromInput), "");
    }

    #[test]
    fn scroll_request_is_consumed_once() {
        let mut page = SharedDocument::new();
        page.scroll_into_view(&Slot::BookingResult);

        let mut doc = page.lock();
        assert!(!doc.take_scroll_request(Slot::BookingForm));
        assert!(doc.take_scroll_request(Slot::BookingResult));
        assert!(!doc.take_scroll_request(Slot::BookingResult));
    }

    #[test]
    fn resetting_book_form_keeps_selected_bus() {
        let mut page = SharedDocument::new();
        page.set_value(&Slot::SelectedBusId, "3");
        page.set_value(&Slot::PassengerName, "Dana");
        page.set_value(&Slot::Seats, "4");

        page.reset_form(&Slot::BookForm);

        let doc = page.lock();
        assert_eq!(doc.value(Slot::PassengerName), "");
        assert_eq!(doc.value(Slot::Seats), "1");
        assert_eq!(doc.value(Slot::SelectedBusId), "3");
    }

    #[test]
    fn alerts_queue_until_dismissed() {
        let mut page = SharedDocument::new();
        page.alert("Error: first");
        page.alert("Error: second");

        let mut doc = page.lock();
        assert_eq!(doc.pending_alert(), Some("Error: first"));
        doc.dismiss_alert();
        assert_eq!(doc.pending_alert(), Some("Error: second"));
        doc.dismiss_alert();
        assert_eq!(doc.pending_alert(), None);
    }

    #[tokio::test]
    async fn controller_drives_shared_document_through_a_booking() {
        let document = SharedDocument::new();
        let api = FixedApi {
            bookings: StdMutex::new(Vec::new()),
        };
        let mut controller = BookingController::start(document.clone(), api).await;

        match document.lock().content(Slot::BusesList) {
            Some(Fragment::BusCards(cards)) => {
                assert_eq!(cards[0].route, "Boston → Albany");
                assert_eq!(cards[0].price, "$27.5");
            }
            other => panic!("unexpected list content: {other:?}"),
        }

        controller
            .handle_event(PageEvent::BookClicked { bus_id: BusId(3) })
            .await
            .expect("select");
        {
            let mut doc = document.lock();
            assert!(!doc.is_hidden(Slot::BookingForm));
            assert!(doc.take_scroll_request(Slot::BookingForm));
            *doc.value_mut(Slot::PassengerName) = " Dana ".to_string();
            *doc.value_mut(Slot::Seats) = "2".to_string();
        }

        controller
            .handle_event(PageEvent::FormSubmitted(SubmitEvent::new()))
            .await
            .expect("book");

        assert_eq!(controller.api().bookings.lock().unwrap()[0].passenger_name, "Dana");
        let doc = document.lock();
        let result = doc.content(Slot::BookingResult).expect("result rendered");
        let text = result.to_string();
        assert!(text.contains("Booking ID: 55"), "{text}");
        assert!(text.contains("Total Price: $55"), "{text}");
        assert!(!doc.is_hidden(Slot::BookingResult));
        assert_eq!(doc.value(Slot::PassengerName), "");
    }
}
