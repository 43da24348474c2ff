use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::FeatureField;
use crate::present;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – measurement sliders and actions
// ---------------------------------------------------------------------------

/// Render the left input panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Measurements");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Sliders, bounded by the dataset's observed ranges ----
            for field in FeatureField::ALL {
                let stats = state.store.dataset().field_stats(field);
                ui.add(
                    egui::Slider::new(state.input.value_mut(field), stats.min..=stats.max)
                        .text(field.label()),
                );
                ui.add_space(4.0);
            }

            ui.separator();

            // ---- Actions ----
            ui.horizontal(|ui: &mut Ui| {
                if ui.button(RichText::new("Predict").strong()).clicked() {
                    state.run_prediction();
                }
                if ui.button("Reset").clicked() {
                    state.reset_input();
                }
            });

            if ui.button("Export result…").clicked() {
                save_result_dialog(state);
            }

            if state.store.classifier().is_none() {
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Classifier artifact not loaded – predictions unavailable.")
                        .color(Color32::YELLOW),
                );
            }

            ui.separator();

            // ---- Reference sample browser ----
            egui::CollapsingHeader::new("Dataset sample")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    sample_table(ui, state);
                });
        });
}

/// A small read-only table of the first reference records.
fn sample_table(ui: &mut Ui, state: &AppState) {
    let sample = state.store.dataset().sample(10);

    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), 5)
        .header(18.0, |mut header| {
            for field in FeatureField::ALL {
                header.col(|ui| {
                    ui.strong(field.column_name());
                });
            }
            header.col(|ui| {
                ui.strong("grade");
            });
        })
        .body(|mut body| {
            for record in sample {
                body.row(16.0, |mut row| {
                    for field in FeatureField::ALL {
                        let value = record.features().value(field);
                        row.col(|ui| {
                            ui.label(format!("{value:.2}"));
                        });
                    }
                    row.col(|ui| {
                        ui.label(
                            RichText::new(&record.grade)
                                .color(state.palette.color_for(&record.grade)),
                        );
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export result…").clicked() {
                save_result_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} reference records, {} grades",
            state.store.dataset().len(),
            state.store.dataset().grades().len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

/// Save the current input and last prediction as a single-row CSV.
pub fn save_result_dialog(state: &mut AppState) {
    let Some(row) = state.export_row() else {
        state.status_message = Some("Nothing to export yet – run a prediction first.".to_string());
        return;
    };

    let text = match present::export_csv(&row) {
        Ok(text) => text,
        Err(e) => {
            log::error!("failed to render export row: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            return;
        }
    };

    let file = rfd::FileDialog::new()
        .set_title("Save prediction result")
        .set_file_name("tomato_prediction.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match std::fs::write(&path, text) {
            Ok(()) => {
                log::info!("exported prediction to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("failed to write {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
