// PidLog - ui/panels/table.rs
//
// Virtual-scrolling data table of the display rows (rounded, newest first).
//
// Uses egui's `ScrollArea::show_rows`, which renders only the rows currently
// visible in the viewport.

use crate::core::view::ViewModel;
use crate::ui::theme;

const COLUMNS: [&str; 5] = ["#Date", "time_t", "temperature", "SV", "MV"];

/// Render the data table.
pub fn render(ui: &mut egui::Ui, view: &ViewModel) {
    ui.heading("Table");

    let rows = &view.display_table;
    if rows.is_empty() {
        ui.label("No records in the selected range.");
        return;
    }

    let font = egui::FontId::monospace(12.0);
    let header: String = COLUMNS
        .iter()
        .map(|c| format!("{c:>width$}", width = column_chars(c)))
        .collect::<Vec<_>>()
        .join("  ");
    ui.label(egui::RichText::new(header).font(font.clone()).strong());
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("data_table")
        .auto_shrink([false; 2])
        .show_rows(ui, theme::ROW_HEIGHT, rows.len(), |ui, row_range| {
            for idx in row_range {
                let Some(r) = rows.get(idx) else {
                    continue;
                };
                let line = format!(
                    "{:>w0$}  {:>w1$}  {:>w2$.1}  {:>w3$.1}  {:>w4$.1}",
                    r.wall_clock,
                    r.epoch,
                    r.temperature,
                    r.sv,
                    r.mv,
                    w0 = column_chars(COLUMNS[0]),
                    w1 = column_chars(COLUMNS[1]),
                    w2 = column_chars(COLUMNS[2]),
                    w3 = column_chars(COLUMNS[3]),
                    w4 = column_chars(COLUMNS[4]),
                );
                ui.label(egui::RichText::new(line).font(font.clone()));
            }
        });
}

/// Fixed character width per column, wide enough for the header and values.
fn column_chars(column: &str) -> usize {
    match column {
        "#Date" => 14,
        "time_t" => 11,
        _ => (theme::TABLE_COLUMN_WIDTH / 10.0) as usize,
    }
}
