mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, PageEvent};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::ui::{BookingGuiApp, SharedDocument};

#[derive(Parser, Debug)]
#[command(name = "bus-booking-gui", about = "Desktop bus booking page")]
struct Args {
    /// Booking API base URL; overrides booking.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = load_settings().with_api_url_override(args.api_url);
    let api_base_url = settings.api_base_url()?;

    let (cmd_tx, cmd_rx) = bounded::<PageEvent>(256);
    let document = SharedDocument::new();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Bus Booking")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Bus Booking",
        options,
        Box::new(move |cc| {
            let document = document.with_repaint(cc.egui_ctx.clone());
            backend_bridge::runtime::launch(cmd_rx, document.clone(), api_base_url.clone());
            Ok(Box::new(BookingGuiApp::new(
                cmd_tx,
                document,
                api_base_url.to_string(),
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("booking window failed: {err}"))
}
