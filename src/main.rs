//! Deckwright - slide deck composer
//!
//! Compose slides from text, image, AI prompt and document blocks, then export.

mod app;
mod core;
mod ui;

use app::DeckwrightApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Deckwright...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Deckwright"),
        ..Default::default()
    };

    eframe::run_native(
        "Deckwright",
        native_options,
        Box::new(|cc| Ok(Box::new(DeckwrightApp::new(cc)))),
    )
}
