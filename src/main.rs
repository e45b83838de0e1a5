mod app;
mod data;
mod digitize;
mod gui;

use app::DigitizerApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    log::info!("Starting pixelplotter v{}", env!("CARGO_PKG_VERSION"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 700.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("pixelplotter")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "pixelplotter",
        options,
        Box::new(|cc| Ok(Box::new(DigitizerApp::new(cc)))),
    )
}
