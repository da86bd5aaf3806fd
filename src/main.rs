//! Deliverboard - Food Order Analytics Dashboard
//!
//! Interactive dashboard over a static CSV of food delivery orders.

mod charts;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::DeliverboardApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Deliverboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Deliverboard",
        options,
        Box::new(|cc| Ok(Box::new(DeliverboardApp::new(cc)))),
    )
}
