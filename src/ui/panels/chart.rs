// PidLog - ui/panels/chart.rs
//
// Dual-axis line chart of the filtered records.
//
// egui_plot has a single coordinate system, so MV is drawn through the
// view's `AxisMapping` into the temperature/SV coordinate range, and the
// right-hand axis labels invert that mapping to show MV units.

use crate::core::timebase::TimeBase;
use crate::core::view::ViewModel;
use crate::ui::theme;
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Line, Plot, PlotPoints};

/// Render the chart for `view`. `time_base` formats the x-axis ticks.
pub fn render(ui: &mut egui::Ui, view: &ViewModel, time_base: TimeBase) {
    let chart = &view.chart;
    let mapping = chart.secondary_axis();

    let y_axes = vec![
        AxisHints::new_y()
            .label("Temperature")
            .placement(HPlacement::Left),
        AxisHints::new_y()
            .label("MV")
            .placement(HPlacement::Right)
            .formatter(move |mark, _range| format!("{:.1}", mapping.inverse(mark.value))),
    ];

    let temperature = series(&chart.timestamps, chart.temperature.iter().copied());
    let sv = series(&chart.timestamps, chart.sv.iter().copied());
    let mv = series(
        &chart.timestamps,
        chart.mv.iter().map(|&v| mapping.forward(v)),
    );

    Plot::new("pid_chart")
        .height(theme::CHART_HEIGHT)
        .legend(Legend::default().position(Corner::RightBottom))
        .x_axis_label("Date")
        .x_axis_formatter(move |mark, _range| time_base.label(mark.value as i64))
        .custom_y_axes(y_axes)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new("Temperature", PlotPoints::from(temperature))
                    .color(theme::TEMPERATURE_COLOUR),
            );
            plot_ui.line(Line::new("SV", PlotPoints::from(sv)).color(theme::SV_COLOUR));
            plot_ui.line(Line::new("MV", PlotPoints::from(mv)).color(theme::MV_COLOUR));
        });
}

fn series(timestamps: &[i64], values: impl Iterator<Item = f64>) -> Vec<[f64; 2]> {
    timestamps
        .iter()
        .zip(values)
        .map(|(&t, y)| [t as f64, y])
        .collect()
}
