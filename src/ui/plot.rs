use std::collections::BTreeMap;

use eframe::egui::{Color32, Frame, RichText, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::overlay::{self, Overlay};
use crate::present;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – prediction card and comparison plots
// ---------------------------------------------------------------------------

/// Render the result card and the two scatter overlays.
pub fn central_panel(ui: &mut Ui, state: &AppState) {
    result_card(ui, state);
    ui.separator();

    let dataset = state.store.dataset();
    let half = (ui.available_height() / 2.0 - 8.0).max(160.0);

    let mass_firmness = overlay::build_overlay(&state.input, dataset, overlay::MASS_FIRMNESS);
    overlay_plot(ui, "mass_firmness_plot", &mass_firmness, state, half);

    let sugar_skin = overlay::build_overlay(&state.input, dataset, overlay::SUGAR_SKIN);
    overlay_plot(ui, "sugar_skin_plot", &sugar_skin, state, half);
}

/// The grade badge with its confidence, or a hint before the first run.
fn result_card(ui: &mut Ui, state: &AppState) {
    let Some(result) = &state.prediction else {
        ui.label("Set the measurements and press Predict.");
        return;
    };

    let card = present::format(result);
    ui.horizontal(|ui: &mut Ui| {
        Frame::new()
            .fill(card.color)
            .corner_radius(6)
            .inner_margin(8)
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(&card.label).color(Color32::WHITE).strong());
            });
        ui.label(format!("Confidence: {}", card.confidence_percent));
    });
}

/// One scatter overlay: reference points grouped by grade plus the current
/// input as a black cross.
fn overlay_plot(ui: &mut Ui, id: &str, overlay: &Overlay, state: &AppState, height: f32) {
    // Group points into one series per grade so the legend stays compact.
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for point in &overlay.points {
        series
            .entry(point.grade.as_str())
            .or_default()
            .push([point.x, point.y]);
    }

    Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label(overlay.axes.x.label())
        .y_axis_label(overlay.axes.y.label())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (grade, coords) in series {
                let points: PlotPoints = coords.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(grade)
                        .color(state.palette.color_for(grade))
                        .radius(3.0),
                );
            }

            let marker: PlotPoints = vec![overlay.marker].into_iter().collect();
            plot_ui.points(
                Points::new(marker)
                    .name("Current input")
                    .color(Color32::BLACK)
                    .shape(MarkerShape::Cross)
                    .radius(6.0),
            );
        });
}
