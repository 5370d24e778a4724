//! Booking worker: owns the controller and replays page events against it.

use std::thread;

use client_core::{BookingController, HttpBookingApi, Page, PageEvent};
use crossbeam_channel::Receiver;
use url::Url;

use crate::ui::SharedDocument;

pub fn launch(
    cmd_rx: Receiver<PageEvent>,
    document: SharedDocument,
    api_base_url: Url,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut document = document;
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build booking worker runtime: {err}");
                document.alert(&format!(
                    "Error: booking worker startup failure: failed to build runtime: {err}"
                ));
                return;
            }
        };

        runtime.block_on(async move {
            let api = HttpBookingApi::new(api_base_url);
            tracing::info!(api = %api.base_url(), "booking worker starting");
            let mut controller = BookingController::start(document, api).await;

            // Events run one at a time; a later render overwrites an earlier one.
            while let Ok(event) = cmd_rx.recv() {
                if let Err(err) = controller.handle_event(event).await {
                    tracing::debug!("page event finished with error: {err}");
                }
            }
            tracing::info!("page event queue closed; booking worker stopping");
        });
    })
}
