// PidLog - ui/panels/range.rs
//
// Range selection: a start and an end slider over the log's epoch bounds,
// with `MM/DD HH:MM` labels and the two-row selection table.
//
// egui has no two-handle slider, so the pair is two sliders that push each
// other: dragging start past end drags end along, and vice versa.

use crate::app::state::AppState;

/// Render the range controls. Calls `state.set_range` on any change.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let (Some(selector), Some(range)) = (state.selector, state.range) else {
        return;
    };
    let (t_min, t_max) = selector.bounds();
    let time_base = *selector.time_base();

    ui.label("Select unix time range to display");

    let mut start = range.start();
    let mut end = range.end();

    let width = ui.available_width() - 160.0;
    ui.spacing_mut().slider_width = width.max(120.0);

    let start_changed = ui
        .add(
            egui::Slider::new(&mut start, t_min..=t_max)
                .text("start")
                .custom_formatter(|v, _| time_base.label(v as i64)),
        )
        .changed();
    let end_changed = ui
        .add(
            egui::Slider::new(&mut end, t_min..=t_max)
                .text("end")
                .custom_formatter(|v, _| time_base.label(v as i64)),
        )
        .changed();

    if start_changed && start > end {
        end = start;
    }
    if end_changed && end < start {
        start = end;
    }
    if start_changed || end_changed {
        state.set_range(start, end);
    }

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(format!("{start} \u{2013} {end}")).monospace().weak());
        if ui
            .small_button("Full range")
            .on_hover_text("Reset the selection to the whole log")
            .clicked()
        {
            state.reset_range();
        }
    });

    ui.add_space(6.0);
    ui.heading("Selection time range to display log data");

    let Some(range) = state.range else {
        return;
    };
    egui::Grid::new("selection_table")
        .num_columns(2)
        .striped(true)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            ui.label("");
            ui.strong("Selected Date");
            ui.end_row();
            for row in selector.selection_table(range) {
                ui.strong(row.name);
                ui.monospace(row.label);
                ui.end_row();
            }
        });
}
