use eframe::egui;

use crate::state::AppState;
use crate::ui::{notice, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct CancerWorkbenchApp {
    pub state: AppState,
}

impl eframe::App for CancerWorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.begin_frame();

        // ---- Central panel: instructions, buttons, banner ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::main_panel(ui, &mut self.state);
        });

        // ---- Modal notice on top ----
        notice::notice_window(ctx, &mut self.state);
    }
}
