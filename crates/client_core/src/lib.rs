//! Client side of the bus booking page: booking API access, the page
//! abstraction front ends implement, and the controller tying them together.

pub mod api;
pub mod controller;
pub mod page;
pub mod settings;

pub use api::{ApiCallError, BookingApi, BusFilter, HttpBookingApi};
pub use controller::{BookingController, ControllerError, Listeners, ValidationError};
pub use page::{Fragment, Page, PageEvent, Slot, SubmitEvent};
pub use settings::{load_settings, Settings, SettingsError};
