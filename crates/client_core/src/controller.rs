//! Booking page controller: owns the bus selection and turns page events into
//! booking API calls and re-renders.

use shared::{
    domain::{seats_within_limits, BusId},
    protocol::{BookingConfirmation, BookingRequest, Bus},
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    api::{ApiCallError, BookingApi, BusFilter},
    page::{BusCard, ConfirmationView, Fragment, Page, PageElements, PageEvent, SubmitEvent},
};

pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search buses";
pub const BOOKING_FAILED_MESSAGE: &str = "Booking failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill all fields")]
    MissingFields,
    #[error("Please enter passenger name")]
    EmptyPassengerName,
    #[error("Please select between 1-10 seats")]
    SeatsOutOfRange,
}

/// Failure of one user action. The `Display` text is what the page shows.
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Failed to load buses")]
    Load(#[source] ApiCallError),
    #[error("{message}")]
    Search {
        message: String,
        #[source]
        source: ApiCallError,
    },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    Booking {
        message: String,
        #[source]
        source: ApiCallError,
    },
}

/// Which page events the controller reacts to. A listener exists only when
/// the element it hangs off was found at mount time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    pub search: bool,
    pub submit: bool,
    pub card_clicks: bool,
}

/// Parses a seat count the way a browser `parseInt` reads a form field:
/// leading whitespace and sign are accepted and trailing garbage is ignored.
pub fn parse_seat_count(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

pub fn validate_booking(
    selected_bus: Option<BusId>,
    passenger_name: Option<&str>,
    seats: Option<&str>,
) -> Result<BookingRequest, ValidationError> {
    let (Some(bus_id), Some(passenger_name), Some(seats)) = (selected_bus, passenger_name, seats)
    else {
        return Err(ValidationError::MissingFields);
    };

    let passenger_name = passenger_name.trim();
    if passenger_name.is_empty() {
        return Err(ValidationError::EmptyPassengerName);
    }

    let seats = parse_seat_count(seats)
        .filter(|seats| seats_within_limits(*seats))
        .ok_or(ValidationError::SeatsOutOfRange)?;

    Ok(BookingRequest {
        bus_id,
        passenger_name: passenger_name.to_string(),
        seats,
    })
}

pub struct BookingController<P: Page, A: BookingApi> {
    page: P,
    api: A,
    elements: PageElements<P::Handle>,
    listeners: Listeners,
    selected_bus: Option<BusId>,
}

impl<P: Page, A: BookingApi> BookingController<P, A> {
    /// Resolves the page's element handles and attaches listeners without
    /// touching the network.
    pub fn mount(page: P, api: A) -> Self {
        let elements = PageElements::resolve(&page);
        let listeners = Listeners {
            search: elements.search_button.is_some(),
            submit: elements.book_form.is_some(),
            card_clicks: elements.buses_list.is_some(),
        };
        debug!(?listeners, "booking controller mounted");
        Self {
            page,
            api,
            elements,
            listeners,
            selected_bus: None,
        }
    }

    /// Mounts the controller and issues the initial unfiltered load.
    pub async fn start(page: P, api: A) -> Self {
        let mut controller = Self::mount(page, api);
        controller.init().await;
        controller
    }

    pub async fn init(&mut self) {
        // Failures are already on the page.
        let _ = self.load_all_buses().await;
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    pub fn selected_bus(&self) -> Option<BusId> {
        self.selected_bus
    }

    pub async fn handle_event(&mut self, event: PageEvent) -> Result<(), ControllerError> {
        match event {
            PageEvent::SearchClicked if self.listeners.search => {
                self.search_buses().await.map(|_| ())
            }
            PageEvent::BookClicked { bus_id } if self.listeners.card_clicks => {
                self.select_bus(bus_id);
                Ok(())
            }
            PageEvent::FormSubmitted(mut submit) if self.listeners.submit => self
                .handle_booking_submission(&mut submit)
                .await
                .map(|_| ()),
            other => {
                debug!(?other, "no listener attached for page event");
                Ok(())
            }
        }
    }

    pub async fn load_all_buses(&mut self) -> Result<usize, ControllerError> {
        match self.api.list_buses(&BusFilter::all()).await {
            Ok(buses) => {
                info!(count = buses.len(), "loaded bus list");
                self.render_buses(&buses);
                Ok(buses.len())
            }
            Err(err) => {
                error!("Error loading buses: {err}");
                let err = ControllerError::Load(err);
                self.show_error(&err.to_string());
                Err(err)
            }
        }
    }

    pub async fn search_buses(&mut self) -> Result<usize, ControllerError> {
        let from = self.input_value(self.elements.from_input.as_ref());
        let to = self.input_value(self.elements.to_input.as_ref());
        let filter = BusFilter::from_inputs(&from, &to);

        match self.api.list_buses(&filter).await {
            Ok(buses) => {
                info!(?filter, count = buses.len(), "bus search completed");
                self.render_buses(&buses);
                Ok(buses.len())
            }
            Err(err) => {
                warn!(?filter, "bus search failed: {err}");
                let message = err
                    .server_message()
                    .unwrap_or(SEARCH_FAILED_MESSAGE)
                    .to_string();
                self.show_error(&message);
                Err(ControllerError::Search {
                    message,
                    source: err,
                })
            }
        }
    }

    pub fn render_buses(&mut self, buses: &[Bus]) {
        let Some(list) = &self.elements.buses_list else {
            return;
        };
        let fragment = if buses.is_empty() {
            Fragment::NoBuses
        } else {
            Fragment::BusCards(buses.iter().map(BusCard::from).collect())
        };
        self.page.set_content(list, fragment);
    }

    pub fn select_bus(&mut self, bus_id: BusId) {
        self.selected_bus = Some(bus_id);

        if let (Some(form), Some(field)) =
            (&self.elements.booking_form, &self.elements.selected_bus_id)
        {
            self.page.set_value(field, &bus_id.to_string());
            self.page.set_hidden(form, false);
            self.page.scroll_into_view(form);
        }
    }

    pub async fn handle_booking_submission(
        &mut self,
        event: &mut SubmitEvent,
    ) -> Result<BookingConfirmation, ControllerError> {
        event.prevent_default();

        let name = self
            .elements
            .passenger_name
            .as_ref()
            .map(|handle| self.page.value(handle));
        let seats = self
            .elements
            .seats
            .as_ref()
            .map(|handle| self.page.value(handle));
        let request = match validate_booking(self.selected_bus, name.as_deref(), seats.as_deref())
        {
            Ok(request) => request,
            Err(invalid) => {
                debug!(%invalid, "booking rejected before submission");
                self.show_error(&invalid.to_string());
                return Err(invalid.into());
            }
        };

        match self.api.book(&request).await {
            Ok(confirmation) => {
                info!(
                    booking_id = %confirmation.booking.id,
                    bus_id = %request.bus_id,
                    seats = request.seats,
                    "booking confirmed"
                );
                self.show_booking_result(&confirmation);
                if let Some(form) = &self.elements.book_form {
                    self.page.reset_form(form);
                }
                // Refresh seat availability; a failed reload reports itself.
                let _ = self.load_all_buses().await;
                Ok(confirmation)
            }
            Err(err) => {
                warn!(bus_id = %request.bus_id, "booking failed: {err}");
                let message = err
                    .server_message()
                    .unwrap_or(BOOKING_FAILED_MESSAGE)
                    .to_string();
                self.show_error(&message);
                Err(ControllerError::Booking {
                    message,
                    source: err,
                })
            }
        }
    }

    pub fn show_booking_result(&mut self, confirmation: &BookingConfirmation) {
        if let Some(result) = &self.elements.booking_result {
            self.page.set_content(
                result,
                Fragment::Confirmation(ConfirmationView::from(confirmation)),
            );
            self.page.set_hidden(result, false);
            self.page.scroll_into_view(result);
        }
    }

    pub fn show_error(&mut self, message: &str) {
        match &self.elements.booking_result {
            Some(result) => {
                self.page
                    .set_content(result, Fragment::Error(message.to_string()));
                self.page.set_hidden(result, false);
                self.page.scroll_into_view(result);
            }
            None => self.page.alert(&format!("Error: {message}")),
        }
    }

    fn input_value(&self, handle: Option<&P::Handle>) -> String {
        handle
            .map(|handle| self.page.value(handle))
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
