use client_core::{
    page::{BusCard, ConfirmationView, BOOK_ACTION_LABEL, CONFIRMATION_HEADING},
    Fragment, PageEvent, Slot, SubmitEvent,
};
use crossbeam_channel::Sender;
use eframe::egui;

use crate::controller::orchestration::dispatch_page_event;
use crate::ui::document::{Document, SharedDocument};

const PRICE_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 167, 69);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(114, 28, 36);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(248, 215, 218);
const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(245, 198, 203);
const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(21, 87, 36);
const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(212, 237, 218);
const SUCCESS_STROKE: egui::Color32 = egui::Color32::from_rgb(195, 230, 203);

pub struct BookingGuiApp {
    cmd_tx: Sender<PageEvent>,
    document: SharedDocument,
    api_base_url: String,
    status: String,
}

impl BookingGuiApp {
    pub fn new(cmd_tx: Sender<PageEvent>, document: SharedDocument, api_base_url: String) -> Self {
        Self {
            cmd_tx,
            document,
            api_base_url,
            status: "Ready".to_string(),
        }
    }
}

impl eframe::App for BookingGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        {
            let mut doc = self.document.lock();
            let blocked = doc.pending_alert().is_some();

            egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.small(format!("API: {}", self.api_base_url));
                    ui.separator();
                    ui.small(&self.status);
                });
            });

            egui::CentralPanel::default().show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ui.heading("Bus Booking");
                            ui.add_space(8.0);
                            show_search_bar(ui, &mut doc, &mut actions);
                            ui.separator();
                            show_bus_list(ui, &mut doc, &mut actions);
                            show_booking_form(ui, &mut doc, &mut actions);
                            show_booking_result(ui, &mut doc);
                        });
                });
            });

            show_alert(ctx, &mut doc);
        }

        for action in actions {
            dispatch_page_event(&self.cmd_tx, action, &mut self.status);
        }
    }
}

fn show_search_bar(ui: &mut egui::Ui, doc: &mut Document, actions: &mut Vec<PageEvent>) {
    ui.horizontal(|ui| {
        ui.label("From");
        ui.add(
            egui::TextEdit::singleline(doc.value_mut(Slot::FromInput))
                .hint_text("Origin")
                .desired_width(160.0),
        );
        ui.label("To");
        ui.add(
            egui::TextEdit::singleline(doc.value_mut(Slot::ToInput))
                .hint_text("Destination")
                .desired_width(160.0),
        );
        if ui.button("Search").clicked() {
            actions.push(PageEvent::SearchClicked);
        }
    });
}

fn show_bus_list(ui: &mut egui::Ui, doc: &mut Document, actions: &mut Vec<PageEvent>) {
    let response = ui
        .scope(|ui| match doc.content(Slot::BusesList) {
            None => {
                ui.weak("Loading buses...");
            }
            Some(Fragment::BusCards(cards)) => {
                for card in cards {
                    show_bus_card(ui, card, actions);
                }
            }
            Some(other) => {
                ui.label(other.to_string());
            }
        })
        .response;

    if doc.take_scroll_request(Slot::BusesList) {
        response.scroll_to_me(Some(egui::Align::Min));
    }
}

fn show_bus_card(ui: &mut egui::Ui, card: &BusCard, actions: &mut Vec<PageEvent>) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&card.route).strong().size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&card.price)
                            .strong()
                            .size(16.0)
                            .color(PRICE_COLOR),
                    );
                });
            });
            egui::Grid::new(("bus_card", card.bus_id.0))
                .num_columns(4)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Departure:");
                    ui.label(&card.departure);
                    ui.strong("Arrival:");
                    ui.label(&card.arrival);
                    ui.end_row();
                    ui.strong("Available Seats:");
                    ui.label(&card.available_seats);
                    ui.strong("Bus:");
                    ui.label(&card.vehicle);
                    ui.end_row();
                });
            if ui.button(BOOK_ACTION_LABEL).clicked() {
                actions.push(PageEvent::BookClicked {
                    bus_id: card.bus_id,
                });
            }
        });
    ui.add_space(6.0);
}

fn show_booking_form(ui: &mut egui::Ui, doc: &mut Document, actions: &mut Vec<PageEvent>) {
    if doc.is_hidden(Slot::BookingForm) {
        return;
    }

    ui.separator();
    let response = ui
        .scope(|ui| {
            ui.heading("Book Your Seat");
            ui.label(format!("Selected bus: #{}", doc.value(Slot::SelectedBusId)));
            egui::Grid::new("book_form")
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    ui.label("Passenger name");
                    ui.text_edit_singleline(doc.value_mut(Slot::PassengerName));
                    ui.end_row();
                    ui.label("Seats (1-10)");
                    ui.add(
                        egui::TextEdit::singleline(doc.value_mut(Slot::Seats)).desired_width(60.0),
                    );
                    ui.end_row();
                });
            if ui.button("Confirm Booking").clicked() {
                actions.push(PageEvent::FormSubmitted(SubmitEvent::new()));
            }
        })
        .response;

    if doc.take_scroll_request(Slot::BookingForm) {
        response.scroll_to_me(Some(egui::Align::Min));
    }
}

fn show_booking_result(ui: &mut egui::Ui, doc: &mut Document) {
    if doc.is_hidden(Slot::BookingResult) {
        return;
    }
    let Some(fragment) = doc.content(Slot::BookingResult).cloned() else {
        return;
    };

    ui.separator();
    let response = match &fragment {
        Fragment::Error(message) => notice_frame(ERROR_FILL, ERROR_STROKE)
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new("Error:").strong().color(ERROR_TEXT));
                    ui.label(egui::RichText::new(message).color(ERROR_TEXT));
                });
            })
            .response,
        Fragment::Confirmation(view) => notice_frame(SUCCESS_FILL, SUCCESS_STROKE)
            .show(ui, |ui| show_confirmation(ui, view))
            .response,
        other => ui.label(other.to_string()),
    };

    if doc.take_scroll_request(Slot::BookingResult) {
        response.scroll_to_me(Some(egui::Align::Min));
    }
}

fn show_confirmation(ui: &mut egui::Ui, view: &ConfirmationView) {
    ui.label(
        egui::RichText::new(CONFIRMATION_HEADING)
            .strong()
            .size(18.0)
            .color(SUCCESS_TEXT),
    );
    for (label, value) in [
        ("Passenger:", &view.passenger_name),
        ("Seats:", &view.seats),
        ("Total Price:", &view.total_price),
        ("Booking ID:", &view.booking_id),
    ] {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(label).strong().color(SUCCESS_TEXT));
            ui.label(egui::RichText::new(value).color(SUCCESS_TEXT));
        });
    }
    ui.label(egui::RichText::new(&view.message).color(SUCCESS_TEXT));
}

fn notice_frame(fill: egui::Color32, stroke: egui::Color32) -> egui::Frame {
    egui::Frame::NONE
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::same(12))
}

fn show_alert(ctx: &egui::Context, doc: &mut Document) {
    let Some(message) = doc.pending_alert().map(str::to_string) else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Alert")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        doc.dismiss_alert();
    }
}
