use eframe::egui::{Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

use crate::data::model::MovieDataset;
use crate::state::AppState;
use crate::ui::table::{selection_summary, NO_MATCHES};

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Charts (central panel)
// ---------------------------------------------------------------------------

/// Render the charts for the current selection.
pub fn charts(ui: &mut Ui, state: &AppState) {
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

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Visualizations for Selected Period");

            ui.strong(format!("Top {} Highest Rated Movies", state.config.top_n));
            top_rated_chart(ui, dataset, state);

            ui.strong("Number of Movies Released Per Year");
            per_year_chart(ui, &state.result.per_year);

            ui.strong(format!(
                "Distribution of Movie Ratings (at least {} votes)",
                state.config.min_votes
            ));
            rating_distribution_chart(ui, state);

            ui.strong("Budget vs Revenue (millions USD)");
            budget_revenue_chart(ui, state);
        });
}

/// Horizontal bars, best-rated movie on top.
fn top_rated_chart(ui: &mut Ui, dataset: &MovieDataset, state: &AppState) {
    let bars: Vec<Bar> = state
        .result
        .top_rated
        .iter()
        .enumerate()
        .map(|(rank, &idx)| {
            let movie = &dataset.movies[idx];
            let color = state
                .colors
                .as_ref()
                .map(|c| c.color_for_movie(&movie.genres_clean))
                .unwrap_or(Color32::LIGHT_BLUE);
            Bar::new(-(rank as f64), movie.vote_average.known().unwrap_or(0.0))
                .name(&movie.title)
                .fill(color)
        })
        .collect();

    Plot::new("top_rated")
        .height(CHART_HEIGHT)
        .x_axis_label("Average Rating (out of 10)")
        .show_axes([true, false])
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().name("Rating"));
        });

    for (rank, &idx) in state.result.top_rated.iter().enumerate() {
        let movie = &dataset.movies[idx];
        ui.label(format!("{}. {} ({})", rank + 1, movie.title, movie.vote_average));
    }
}

fn per_year_chart(ui: &mut Ui, per_year: &[(i32, usize)]) {
    let points: Vec<[f64; 2]> = per_year
        .iter()
        .map(|&(year, count)| [year as f64, count as f64])
        .collect();

    Plot::new("per_year")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Number of Movies Released")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(PlotPoints::from(points.clone())).name("Movies").width(1.5));
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(3.0));
        });
}

fn rating_distribution_chart(ui: &mut Ui, state: &AppState) {
    if state.rating_bins.is_empty() {
        ui.weak("Not enough rated movies in this selection.");
        return;
    }
    let bars: Vec<Bar> = state
        .rating_bins
        .iter()
        .map(|bin| {
            Bar::new((bin.start + bin.end) / 2.0, bin.count as f64)
                .width(bin.end - bin.start)
                .fill(Color32::from_rgb(65, 105, 225))
        })
        .collect();

    Plot::new("rating_distribution")
        .height(CHART_HEIGHT)
        .x_axis_label("Average Vote (out of 10)")
        .y_axis_label("Number of Movies")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Movies"));
        });
}

fn budget_revenue_chart(ui: &mut Ui, state: &AppState) {
    if state.budget_points.is_empty() {
        ui.weak("No movies with both budget and revenue recorded.");
        return;
    }
    Plot::new("budget_revenue")
        .height(CHART_HEIGHT)
        .x_axis_label("Budget (in Millions of USD)")
        .y_axis_label("Revenue (in Millions of USD)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(PlotPoints::from(state.budget_points.clone()))
                    .radius(2.0)
                    .name("Movies"),
            );
        });
}
