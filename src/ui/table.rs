use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::{format_money, UNKNOWN};
use crate::state::AppState;

pub const NO_MATCHES: &str = "No movies found for the selected criteria. Please adjust your filters.";

// ---------------------------------------------------------------------------
// Movie table (central panel)
// ---------------------------------------------------------------------------

/// Render the matching movies as a table.
pub fn movie_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a movie table to get started  (File → Open…)");
        });
        return;
    };

    selection_summary(ui, state);

    if state.result.is_empty() {
        ui.label(RichText::new(NO_MATCHES).color(Color32::YELLOW));
        return;
    }

    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(260.0).at_least(120.0))
        .column(Column::initial(200.0).at_least(80.0))
        .columns(Column::auto(), 3)
        .column(Column::remainder())
        .header(22.0, |mut header| {
            for name in ["Title", "Genres", "Rating", "Budget", "Revenue", "Year"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, state.result.matches.len(), |mut row| {
                let movie = &dataset.movies[state.result.matches[row.index()]];
                row.col(|ui| {
                    ui.label(movie.title.as_str());
                });
                row.col(|ui| {
                    ui.label(movie.genres_clean.as_str());
                });
                row.col(|ui| {
                    ui.label(
                        movie
                            .vote_average
                            .known()
                            .map(|v| format!("{v:.1}"))
                            .unwrap_or_else(|| UNKNOWN.to_string()),
                    );
                });
                row.col(|ui| {
                    ui.label(format_money(movie.budget));
                });
                row.col(|ui| {
                    ui.label(format_money(movie.revenue));
                });
                row.col(|ui| {
                    ui.label(movie.year.to_string());
                });
            });
        });
}

/// The "Displaying movies from … to …" lines above the table and charts.
pub fn selection_summary(ui: &mut Ui, state: &AppState) {
    let (lo, hi) = state.years;
    ui.label(RichText::new(format!("Displaying movies from {lo} to {hi}")).strong());
    if !state.selected_genres.is_empty() {
        let genres: Vec<&str> = state.selected_genres.iter().map(String::as_str).collect();
        ui.label(format!("Filtered by genres: {}", genres.join(", ")));
    }
    ui.add_space(4.0);
}
