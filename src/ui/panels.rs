use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, View};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => Arc::clone(ds),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Year range ----
            ui.strong("Select Year Range");
            let (min, max) = dataset.year_bounds().unwrap_or(state.years);
            let (mut lo, mut hi) = state.years;
            let lo_changed = ui
                .add(egui::Slider::new(&mut lo, min..=max).text("From"))
                .changed();
            let hi_changed = ui
                .add(egui::Slider::new(&mut hi, min..=max).text("To"))
                .changed();
            if lo_changed || hi_changed {
                // Keep the range closed: the untouched end follows.
                if lo > hi {
                    if lo_changed {
                        hi = lo;
                    } else {
                        lo = hi;
                    }
                }
                state.set_years(lo, hi);
            }
            ui.separator();

            // ---- Genre selection (collapsible) ----
            let header_text = format!(
                "Select Genre(s)  ({}/{})",
                state.selected_genres.len(),
                dataset.genres.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("genres")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if ui.small_button("None").clicked() {
                        state.select_none();
                    }
                    if state.selected_genres.is_empty() {
                        ui.weak("No genre filter: all genres shown");
                    }

                    for genre in &dataset.genres {
                        let mut text = RichText::new(genre);
                        if let Some(colors) = &state.colors {
                            text = text.color(colors.color_for(genre));
                        }
                        let mut checked = state.selected_genres.contains(genre);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_genre(genre);
                        }
                    }
                });
            ui.separator();

            // ---- Cleaning summary ----
            let report = &dataset.report;
            egui::CollapsingHeader::new(RichText::new("Data").strong())
                .id_salt("data_report")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.label(format!("Rows read: {}", report.rows_read));
                    ui.label(format!("Rows kept: {}", report.rows_kept));
                    ui.label(format!("Dropped (no id): {}", report.dropped_unknown_id));
                    ui.label(format!(
                        "Dropped (no release date): {}",
                        report.dropped_unknown_date
                    ));
                    ui.label(format!("Unreadable records: {}", report.unreadable_records));
                    ui.label(format!("Genres defaulted: {}", report.genre_defaults));
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.selectable_value(&mut state.view, View::Table, "Table");
        ui.selectable_value(&mut state.view, View::Charts, "Charts");

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} movies loaded, {} matching",
                ds.len(),
                state.result.matches.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open movie metadata")
        .add_filter("Supported files", &["csv", "tsv", "tab"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.open(&path) {
            log::error!("Failed to load {}: {e}", path.display());
            state.status_message = Some(format!("Error: {e}"));
        }
    }
}
