mod app;
mod config;
mod data;
mod forest;
mod state;
mod ui;
mod workflow;

use app::CancerWorkbenchApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 400.0])
            .with_min_inner_size([420.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Breast Cancer Detection and Prevention",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the bundled banner.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(CancerWorkbenchApp::default()))
        }),
    )
}
