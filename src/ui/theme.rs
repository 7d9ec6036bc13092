// PidLog - ui/theme.rs
//
// Series colours, layout constants and style application.
// No dependencies on app state or business logic.

use egui::Color32;

/// Temperature line (left axis).
pub const TEMPERATURE_COLOUR: Color32 = Color32::from_rgb(34, 160, 60); // Green
/// Setpoint line (left axis).
pub const SV_COLOUR: Color32 = Color32::from_rgb(59, 110, 246); // Blue
/// Manipulated-variable line (right axis).
pub const MV_COLOUR: Color32 = Color32::from_rgb(220, 38, 38); // Red

/// Heading colour of the latest-temperature readout.
pub fn latest_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(96, 165, 250) // Blue 400
    } else {
        Color32::from_rgb(29, 78, 216) // Blue 700
    }
}

/// Error text colour.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400
/// Warning text colour.
pub const WARNING_TEXT: Color32 = Color32::from_rgb(253, 186, 116); // Orange 300

/// Layout constants.
pub const ROW_HEIGHT: f32 = 18.0;
pub const CHART_HEIGHT: f32 = 320.0;
pub const TABLE_COLUMN_WIDTH: f32 = 110.0;

/// Apply visuals and body/button/monospace font sizes to the context.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            match text_style {
                egui::TextStyle::Body | egui::TextStyle::Button | egui::TextStyle::Monospace => {
                    font_id.size = font_size;
                }
                egui::TextStyle::Small => font_id.size = (font_size - 4.0).max(8.0),
                _ => {}
            }
        }
    });
}
