// PidLog - gui.rs
//
// Top-level eframe::App implementation.
// Wires together all UI panels and drives the reload poll.

use crate::app::state::AppState;
use crate::ui;
use crate::util::constants;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// The PidLog application.
pub struct PidLogApp {
    pub state: AppState,
    last_poll: Instant,
    applied_style: Option<(bool, f32)>,
}

impl PidLogApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            last_poll: Instant::now(),
            applied_style: None,
        }
    }

    fn sync_style(&mut self, ctx: &egui::Context) {
        let wanted = (self.state.dark_mode, self.state.ui_font_size);
        if self.applied_style != Some(wanted) {
            ui::theme::apply(ctx, wanted.0, wanted.1);
            self.applied_style = Some(wanted);
        }
    }

    fn poll_source(&mut self, ctx: &egui::Context) {
        let Some(interval_ms) = self.state.reload_poll_ms else {
            return;
        };
        if self.state.source.is_none() {
            return;
        }
        let interval = Duration::from_millis(interval_ms);
        if self.last_poll.elapsed() >= interval {
            self.last_poll = Instant::now();
            if self.state.poll_source() {
                tracing::debug!("Log source changed on disk; view rebuilt");
            }
        }
        // Keep polling while nothing else is happening.
        ctx.request_repaint_after(interval);
    }

    fn export_csv(&mut self, dest: PathBuf) {
        let Some(ref view) = self.state.view else {
            return;
        };
        match std::fs::File::create(&dest) {
            Ok(f) => match crate::core::export::export_csv(&view.display_table, f, &dest) {
                Ok(n) => self.state.status_message = format!("Exported {n} rows to CSV."),
                Err(e) => self.state.status_message = format!("CSV export failed: {e}"),
            },
            Err(e) => self.state.status_message = format!("Cannot create file: {e}"),
        }
    }

    fn export_json(&mut self, dest: PathBuf) {
        let Some(ref view) = self.state.view else {
            return;
        };
        match std::fs::File::create(&dest) {
            Ok(f) => match crate::core::export::export_json(view, f, &dest) {
                Ok(n) => self.state.status_message = format!("Exported {n} rows to JSON."),
                Err(e) => self.state.status_message = format!("JSON export failed: {e}"),
            },
            Err(e) => self.state.status_message = format!("Cannot create file: {e}"),
        }
    }
}

impl eframe::App for PidLogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // pending_open: set by the CLI or a menu; handled before drawing.
        if let Some(path) = self.state.pending_open.take() {
            self.state.open(path);
            self.last_poll = Instant::now();
        }

        self.sync_style(ctx);
        self.poll_source(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open\u{2026}").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Controller logs", constants::LOG_FILE_EXTENSIONS)
                            .add_filter("All files", &["*"])
                            .pick_file()
                        {
                            self.state.pending_open = Some(path);
                        }
                        ui.close_menu();
                    }
                    let has_source = self.state.source.is_some();
                    if ui
                        .add_enabled(has_source, egui::Button::new("Reload"))
                        .clicked()
                    {
                        self.state.reload();
                        ui.close_menu();
                    }
                    ui.separator();
                    // Export sub-menu -- enabled only when there are rows to export
                    let has_rows = self.state.view.as_ref().is_some_and(|v| !v.is_empty());
                    ui.add_enabled_ui(has_rows, |ui| {
                        ui.menu_button("Export", |ui| {
                            if ui.button("Export CSV...").clicked() {
                                if let Some(dest) = rfd::FileDialog::new()
                                    .add_filter("CSV", &["csv"])
                                    .set_file_name("selection.csv")
                                    .save_file()
                                {
                                    self.export_csv(dest);
                                }
                                ui.close_menu();
                            }
                            if ui.button("Export JSON...").clicked() {
                                if let Some(dest) = rfd::FileDialog::new()
                                    .add_filter("JSON", &["json"])
                                    .set_file_name("selection.json")
                                    .save_file()
                                {
                                    self.export_json(dest);
                                }
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.state.dark_mode, "Dark mode");
                    ui.separator();
                    let warnings = self.state.warnings.len();
                    ui.add_enabled_ui(warnings > 0, |ui| {
                        if ui.button(format!("Warnings ({warnings})")).clicked() {
                            self.state.show_warnings = true;
                            ui.close_menu();
                        }
                    });
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.state.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let total = self.state.record_count();
                    if let Some(ref view) = self.state.view {
                        ui.label(format!("{}/{total} records", view.filtered.len()));
                    }
                });
            });
        });

        // Title and range selection
        egui::TopBottomPanel::top("range_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading(egui::RichText::new(constants::APP_TITLE).size(24.0).strong());
            if let Some(ref source) = self.state.source {
                ui.label(
                    egui::RichText::new(source.path().display().to_string())
                        .monospace()
                        .weak(),
                );
            }
            ui.add_space(4.0);
            ui::panels::range::render(ui, &mut self.state);
            ui.add_space(4.0);
        });

        // Central panel: readout, chart, table
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref err) = self.state.load_error {
                ui.colored_label(ui::theme::ERROR_TEXT, format!("Failed to load log: {err}"));
                ui.separator();
            }

            let Some(ref view) = self.state.view else {
                ui.centered_and_justified(|ui| {
                    if self.state.source.is_none() {
                        ui.label("No log loaded.\nOpen a controller log via File \u{2192} Open.");
                    } else {
                        ui.label("The log contains no records.");
                    }
                });
                return;
            };
            let time_base = self.state.time_base;
            let dark_mode = self.state.dark_mode;

            ui::panels::summary::render(ui, view, dark_mode);
            ui.separator();
            ui::panels::chart::render(ui, view, time_base);
            ui.separator();
            ui::panels::table::render(ui, view);
        });

        ui::panels::about::render(ctx, &mut self.state);
        render_warnings(ctx, &mut self.state);
    }
}

/// Window listing accumulated non-fatal warnings.
fn render_warnings(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_warnings {
        return;
    }
    let mut open = true;
    egui::Window::new(format!("Warnings ({})", state.warnings.len()))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("warnings")
                .max_height(240.0)
                .show(ui, |ui| {
                    for warn in &state.warnings {
                        ui.label(
                            egui::RichText::new(warn)
                                .color(ui::theme::WARNING_TEXT)
                                .size(11.5),
                        );
                    }
                });
            ui.separator();
            if ui.button("Clear").clicked() {
                state.warnings.clear();
                state.show_warnings = false;
            }
        });
    if !open {
        state.show_warnings = false;
    }
}
