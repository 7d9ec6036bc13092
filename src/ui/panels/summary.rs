// PidLog - ui/panels/summary.rs
//
// Latest-temperature readout and selection statistics.

use crate::core::view::ViewModel;
use crate::ui::theme;

/// Render the latest temperature header and a compact statistics grid.
pub fn render(ui: &mut egui::Ui, view: &ViewModel, dark_mode: bool) {
    ui.horizontal(|ui| {
        ui.heading(egui::RichText::new("Latest Temperature:").color(theme::latest_colour(dark_mode)));
        ui.heading(view.latest_temperature_label());
    });

    let Some(ref summary) = view.summary else {
        ui.label(egui::RichText::new("No records in the selected range.").weak());
        return;
    };

    egui::Grid::new("selection_stats")
        .num_columns(6)
        .spacing([16.0, 2.0])
        .show(ui, |ui| {
            ui.label("Records:");
            ui.label(summary.count.to_string());
            ui.label("Span:");
            ui.label(format_span(summary.span_secs));
            ui.label("Mean temp:");
            ui.label(format!("{:.2}", summary.temperature_mean));
            ui.end_row();

            ui.label("Temp min/max:");
            ui.label(format!(
                "{:.1} / {:.1}",
                summary.temperature_min, summary.temperature_max
            ));
            ui.label("MV min/max:");
            ui.label(format!("{:.1} / {:.1}", summary.mv_min, summary.mv_max));
            ui.end_row();
        });
}

/// `1d 02:03:04` / `02:03:04`.
fn format_span(secs: i64) -> String {
    let secs = secs.max(0);
    let days = secs / 86_400;
    let h = (secs % 86_400) / 3_600;
    let m = (secs % 3_600) / 60;
    let s = secs % 60;
    if days > 0 {
        format!("{days}d {h:02}:{m:02}:{s:02}")
    } else {
        format!("{h:02}:{m:02}:{s:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_span;

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(0), "00:00:00");
        assert_eq!(format_span(3_725), "01:02:05");
        assert_eq!(format_span(90_061), "1d 01:01:01");
    }
}
