mod terminal;

use std::{io, process::ExitCode};

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, BookingApi, BookingController, ControllerError, HttpBookingApi, Page, Slot,
    SubmitEvent,
};
use shared::domain::BusId;
use tracing_subscriber::EnvFilter;

use crate::terminal::TerminalPage;

#[derive(Parser, Debug)]
#[command(name = "bus-booking", about = "List, search and book buses from the terminal")]
struct Args {
    /// Booking API base URL; overrides booking.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every scheduled bus.
    List,
    /// Filter buses by origin and/or destination.
    Search {
        #[arg(long, default_value = "")]
        from: String,
        #[arg(long, default_value = "")]
        to: String,
    },
    /// Book seats on a bus.
    Book {
        #[arg(long)]
        bus_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "1")]
        seats: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings().with_api_url_override(args.api_url);
    let api = HttpBookingApi::new(settings.api_base_url()?);
    let page = TerminalPage::new(io::stdout(), io::stderr());
    let mut controller = BookingController::mount(page, api);

    match run(&mut controller, args.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            // Already rendered on the page.
            tracing::debug!("command failed: {err:?}");
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run<P, A>(
    controller: &mut BookingController<P, A>,
    command: Command,
) -> Result<(), ControllerError>
where
    P: Page<Handle = Slot>,
    A: BookingApi,
{
    match command {
        Command::List => controller.load_all_buses().await.map(|_| ()),
        Command::Search { from, to } => {
            controller.page_mut().set_value(&Slot::FromInput, &from);
            controller.page_mut().set_value(&Slot::ToInput, &to);
            controller.search_buses().await.map(|_| ())
        }
        Command::Book {
            bus_id,
            name,
            seats,
        } => {
            controller.select_bus(BusId(bus_id));
            controller.page_mut().set_value(&Slot::PassengerName, &name);
            controller.page_mut().set_value(&Slot::Seats, &seats);
            controller
                .handle_booking_submission(&mut SubmitEvent::new())
                .await
                .map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use client_core::{ApiCallError, BusFilter};
    use shared::{
        domain::BookingId,
        protocol::{BookingConfirmation, BookingRequest, BookingSummary, Bus},
    };

    use super::*;

    #[derive(Default)]
    struct RecordingApi {
        filters: Mutex<Vec<BusFilter>>,
        bookings: Mutex<Vec<BookingRequest>>,
    }

    #[async_trait]
    impl BookingApi for RecordingApi {
        async fn list_buses(&self, filter: &BusFilter) -> Result<Vec<Bus>, ApiCallError> {
            self.filters.lock().unwrap().push(filter.clone());
            Ok(vec![Bus {
                id: BusId(1),
                from: "NY".to_string(),
                to: "LA".to_string(),
                departure: "08:00".to_string(),
                arrival: "14:00".to_string(),
                price: 50.0,
                available: 20,
                name: "Express1".to_string(),
            }])
        }

        async fn book(
            &self,
            request: &BookingRequest,
        ) -> Result<BookingConfirmation, ApiCallError> {
            self.bookings.lock().unwrap().push(request.clone());
            Ok(BookingConfirmation {
                booking: BookingSummary {
                    id: BookingId(101),
                    passenger_name: request.passenger_name.clone(),
                    seats: request.seats,
                    total_price: 50.0 * request.seats as f64,
                },
                message: "Confirmed".to_string(),
            })
        }
    }

    fn controller() -> BookingController<TerminalPage<Vec<u8>, Vec<u8>>, RecordingApi> {
        BookingController::mount(
            TerminalPage::new(Vec::new(), Vec::new()),
            RecordingApi::default(),
        )
    }

    fn output(
        controller: BookingController<TerminalPage<Vec<u8>, Vec<u8>>, RecordingApi>,
    ) -> (String, String) {
        let (out, err) = controller.into_page().into_output();
        (
            String::from_utf8(out).expect("utf8"),
            String::from_utf8(err).expect("utf8"),
        )
    }

    #[tokio::test]
    async fn list_prints_bus_cards() {
        let mut controller = controller();
        run(&mut controller, Command::List).await.expect("list");

        let (out, err) = output(controller);
        assert!(out.contains("NY → LA"), "{out}");
        assert!(out.contains("$50"), "{out}");
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn search_passes_only_given_filters() {
        let mut controller = controller();
        run(
            &mut controller,
            Command::Search {
                from: String::new(),
                to: "LA".to_string(),
            },
        )
        .await
        .expect("search");

        assert_eq!(
            *controller.api().filters.lock().unwrap(),
            vec![BusFilter {
                from: None,
                to: Some("LA".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn book_prints_confirmation_then_refreshed_list() {
        let mut controller = controller();
        run(
            &mut controller,
            Command::Book {
                bus_id: 1,
                name: "Alice".to_string(),
                seats: "2".to_string(),
            },
        )
        .await
        .expect("book");

        assert_eq!(controller.api().bookings.lock().unwrap().len(), 1);
        let (out, _err) = output(controller);
        let confirmation_at = out.find("Booking ID: 101").expect("confirmation printed");
        let list_at = out.rfind("NY → LA").expect("list reprinted");
        assert!(confirmation_at < list_at);
    }

    #[tokio::test]
    async fn invalid_seat_count_never_books() {
        let mut controller = controller();
        let err = run(
            &mut controller,
            Command::Book {
                bus_id: 1,
                name: "Alice".to_string(),
                seats: "11".to_string(),
            },
        )
        .await
        .expect_err("out of range");

        assert_eq!(err.to_string(), "Please select between 1-10 seats");
        assert!(controller.api().bookings.lock().unwrap().is_empty());
        let (out, _err) = output(controller);
        assert!(out.contains("Error: Please select between 1-10 seats"), "{out}");
    }
}
