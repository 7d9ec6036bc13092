// PidLog - ui/panels/about.rs
//
// About dialog, rendered as a centred, non-resizable window. Also shows the
// active timestamp derivation so a misaligned slider can be diagnosed.

use crate::app::state::AppState;
use crate::util::constants;

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new(format!("About {}", constants::APP_NAME))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new(constants::APP_NAME).size(28.0).strong());
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("v{}", constants::APP_VERSION))
                        .size(14.0)
                        .weak(),
                );
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label("Time-window viewer for PID temperature-controller logs.");
            });

            ui.add_space(10.0);
            ui.strong("Timestamp derivation");
            egui::Grid::new("about_time_base")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Assumed year:");
                    ui.label(state.time_base.year.to_string());
                    ui.end_row();

                    ui.label("Conversion zone:");
                    ui.label(state.time_base.zone.to_string());
                    ui.end_row();

                    ui.label("Source offset:");
                    ui.label(format!("{} h", state.time_base.source_offset_secs / 3_600));
                    ui.end_row();

                    if state.debug_mode {
                        ui.label("Debug logging:");
                        ui.label("on");
                        ui.end_row();
                    }
                });

            ui.add_space(8.0);
            ui.separator();
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("MIT License").small().weak());
                ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
            });
            ui.add_space(8.0);
        });

    if !open {
        state.show_about = false;
    }
}
