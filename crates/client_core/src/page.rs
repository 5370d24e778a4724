//! Page surface the booking controller drives.
//!
//! A front end exposes its widgets as named [`Slot`]s. The controller looks
//! each slot up once, keeps whatever handle the page hands back, and renders
//! structured [`Fragment`]s into them. Clicks on bus cards reach the
//! controller through one delegated [`PageEvent::BookClicked`] carrying the
//! card's bus id.

use std::fmt;

use shared::{
    domain::{format_fare, BusId},
    protocol::{BookingConfirmation, Bus},
};

pub const NO_BUSES_PLACEHOLDER: &str = "No buses found matching your criteria.";
pub const CONFIRMATION_HEADING: &str = "Booking Confirmed!";
pub const BOOK_ACTION_LABEL: &str = "Book Now";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    SearchButton,
    FromInput,
    ToInput,
    BusesList,
    /// Container revealed once a bus is picked.
    BookingForm,
    /// The form element whose submission books the selected bus.
    BookForm,
    SelectedBusId,
    PassengerName,
    Seats,
    BookingResult,
}

impl Slot {
    pub const ALL: [Slot; 10] = [
        Slot::SearchButton,
        Slot::FromInput,
        Slot::ToInput,
        Slot::BusesList,
        Slot::BookingForm,
        Slot::BookForm,
        Slot::SelectedBusId,
        Slot::PassengerName,
        Slot::Seats,
        Slot::BookingResult,
    ];

    /// Element id the slot carries in the booking page markup.
    pub fn element_id(self) -> &'static str {
        match self {
            Slot::SearchButton => "searchBtn",
            Slot::FromInput => "fromInput",
            Slot::ToInput => "toInput",
            Slot::BusesList => "busesList",
            Slot::BookingForm => "bookingForm",
            Slot::BookForm => "bookForm",
            Slot::SelectedBusId => "selectedBusId",
            Slot::PassengerName => "passengerName",
            Slot::Seats => "seats",
            Slot::BookingResult => "bookingResult",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusCard {
    pub bus_id: BusId,
    pub route: String,
    pub price: String,
    pub departure: String,
    pub arrival: String,
    pub available_seats: String,
    pub vehicle: String,
}

impl From<&Bus> for BusCard {
    fn from(bus: &Bus) -> Self {
        Self {
            bus_id: bus.id,
            route: format!("{} → {}", bus.from, bus.to),
            price: format_fare(bus.price),
            departure: bus.departure.clone(),
            arrival: bus.arrival.clone(),
            available_seats: bus.available.to_string(),
            vehicle: bus.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    pub passenger_name: String,
    pub seats: String,
    pub total_price: String,
    pub booking_id: String,
    pub message: String,
}

impl From<&BookingConfirmation> for ConfirmationView {
    fn from(confirmation: &BookingConfirmation) -> Self {
        let booking = &confirmation.booking;
        Self {
            passenger_name: booking.passenger_name.clone(),
            seats: booking.seats.to_string(),
            total_price: format_fare(booking.total_price),
            booking_id: booking.id.to_string(),
            message: confirmation.message.clone(),
        }
    }
}

/// Structured content a slot can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    NoBuses,
    BusCards(Vec<BusCard>),
    Confirmation(ConfirmationView),
    Error(String),
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::NoBuses => write!(f, "{NO_BUSES_PLACEHOLDER}"),
            Fragment::BusCards(cards) => {
                for (idx, card) in cards.iter().enumerate() {
                    if idx > 0 {
                        writeln!(f)?;
                    }
                    writeln!(f, "[{}] {}  {}", card.bus_id, card.route, card.price)?;
                    writeln!(f, "    Departure: {}", card.departure)?;
                    writeln!(f, "    Arrival: {}", card.arrival)?;
                    writeln!(f, "    Available Seats: {}", card.available_seats)?;
                    write!(f, "    Bus: {}", card.vehicle)?;
                }
                Ok(())
            }
            Fragment::Confirmation(view) => {
                writeln!(f, "{CONFIRMATION_HEADING}")?;
                writeln!(f, "Passenger: {}", view.passenger_name)?;
                writeln!(f, "Seats: {}", view.seats)?;
                writeln!(f, "Total Price: {}", view.total_price)?;
                writeln!(f, "Booking ID: {}", view.booking_id)?;
                write!(f, "{}", view.message)
            }
            Fragment::Error(message) => write!(f, "Error: {message}"),
        }
    }
}

/// Form submission delivered to the controller.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    SearchClicked,
    /// Delegated click from a card inside the bus list.
    BookClicked { bus_id: BusId },
    FormSubmitted(SubmitEvent),
}

pub trait Page {
    type Handle: Clone;

    fn lookup(&self, slot: Slot) -> Option<Self::Handle>;
    fn value(&self, handle: &Self::Handle) -> String;
    fn set_value(&mut self, handle: &Self::Handle, value: &str);
    fn set_content(&mut self, handle: &Self::Handle, fragment: Fragment);
    fn set_hidden(&mut self, handle: &Self::Handle, hidden: bool);
    fn scroll_into_view(&mut self, handle: &Self::Handle);
    /// Restores every field of a form to its initial value.
    fn reset_form(&mut self, handle: &Self::Handle);
    /// Blocking notice used when no result area exists.
    fn alert(&mut self, message: &str);
}

/// Handles resolved once when the controller mounts.
#[derive(Debug, Clone)]
pub struct PageElements<H> {
    pub search_button: Option<H>,
    pub from_input: Option<H>,
    pub to_input: Option<H>,
    pub buses_list: Option<H>,
    pub booking_form: Option<H>,
    pub book_form: Option<H>,
    pub selected_bus_id: Option<H>,
    pub passenger_name: Option<H>,
    pub seats: Option<H>,
    pub booking_result: Option<H>,
}

impl<H: Clone> PageElements<H> {
    pub fn resolve<P>(page: &P) -> Self
    where
        P: Page<Handle = H>,
    {
        Self {
            search_button: page.lookup(Slot::SearchButton),
            from_input: page.lookup(Slot::FromInput),
            to_input: page.lookup(Slot::ToInput),
            buses_list: page.lookup(Slot::BusesList),
            booking_form: page.lookup(Slot::BookingForm),
            book_form: page.lookup(Slot::BookForm),
            selected_bus_id: page.lookup(Slot::SelectedBusId),
            passenger_name: page.lookup(Slot::PassengerName),
            seats: page.lookup(Slot::Seats),
            booking_result: page.lookup(Slot::BookingResult),
        }
    }
}
