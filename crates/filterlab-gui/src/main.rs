//! FilterLab (Native Entry Point)
//!
//! An interactive application for inspecting the frequency response of
//! digital filters: phase (wrapped or unwrapped, in selectable units) and
//! magnitude, over a selectable part of the frequency axis.

use filterlab_gui::FilterLab;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("FilterLab - Digital Filter Response Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "FilterLab",
        native_options,
        Box::new(|cc| Ok(Box::new(FilterLab::new(cc)))),
    )
}
