use eframe::egui::{self, Button, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – instructions, actions, banner
// ---------------------------------------------------------------------------

/// Render the main panel. Controls are disabled while a notice is open.
pub fn main_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(8.0);
    ui.label(RichText::new(state.status_text()).size(16.0));
    if let Some(path) = state.workflow.selection() {
        ui.label(RichText::new(format!("Selected: {}", path.display())).weak());
    }
    ui.add_space(8.0);

    let enabled = !state.is_blocked();
    ui.add_enabled_ui(enabled, |ui: &mut Ui| {
        let full_width = [ui.available_width(), 28.0];

        if ui
            .add_sized(full_width, Button::new("Upload Medical Report"))
            .clicked()
        {
            open_file_dialog(state);
        }

        let detect = ui.add_enabled(
            state.can_detect(),
            Button::new("Detect Cancer").min_size(full_width.into()),
        );
        if detect.clicked() {
            state.detect();
        }
    });

    ui.add_space(12.0);

    // ---- Banner (centered) ----
    let banner = egui::include_image!("../../assets/banner.png");
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add(
            egui::Image::new(banner)
                .max_width(ui.available_width() * 0.9)
                .max_height(ui.available_height()),
        );
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Ask for a report file. Cancelling leaves everything as it was.
pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Dataset")
        .add_filter("CSV Files", &["csv"])
        .add_filter("All Files", &["*"])
        .pick_file();

    match file {
        Some(path) => {
            log::info!("Selected {}", path.display());
            state.load_selected(&path);
        }
        None => log::debug!("File dialog cancelled"),
    }
}
