use eframe::egui::{self, Align2, Context, Key, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Modal notice window
// ---------------------------------------------------------------------------

/// Show the pending notice, if any, centred over the main window.
/// OK, Enter or Escape dismisses it; keys only count once the notice has
/// survived a frame.
pub fn notice_window(ctx: &Context, state: &mut AppState) {
    let Some(notice) = state.notice() else {
        return;
    };

    let key_dismiss = ctx.input(|i| i.key_pressed(Key::Enter) || i.key_pressed(Key::Escape));
    let mut dismissed = false;

    egui::Window::new(notice.title.as_str())
        .id(egui::Id::new("notice_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(notice.message.as_str());
            ui.add_space(8.0);
            ui.vertical_centered(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        state.dismiss_notice();
    } else if key_dismiss {
        state.dismiss_by_key();
    }
}
