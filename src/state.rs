use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::color::GenreColors;
use crate::config::DashboardConfig;
use crate::data::analysis::{budget_vs_revenue, rating_histogram, HistogramBin};
use crate::data::cache::DatasetCache;
use crate::data::filter::{run_query, Query, QueryResult, YearRange};
use crate::data::loader::LoadError;
use crate::data::model::MovieDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which view the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Table,
    Charts,
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    pub config: DashboardConfig,

    /// Build-once store for the cleaned dataset.
    pub cache: DatasetCache,

    /// Loaded dataset (None until a file loads).
    pub dataset: Option<Arc<MovieDataset>>,

    /// Selected year range (inclusive).
    pub years: (i32, i32),

    /// Selected genres; empty means no genre filter.
    pub selected_genres: BTreeSet<String>,

    /// Result of the current selection (cached).
    pub result: QueryResult,

    /// Chart series derived from `result`.
    pub rating_bins: Vec<HistogramBin>,
    pub budget_points: Vec<[f64; 2]>,

    pub colors: Option<GenreColors>,

    pub view: View,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Load (or reuse) the dataset at `path` and reset the selection.
    pub fn open(&mut self, path: &Path) -> Result<(), LoadError> {
        let dataset = self.cache.load(path)?;
        log::info!(
            "Loaded {} movies from {} ({} genres)",
            dataset.len(),
            path.display(),
            dataset.genres.len()
        );
        self.set_dataset(dataset);
        Ok(())
    }

    /// Ingest a cleaned dataset, initialise the selection and colours.
    pub fn set_dataset(&mut self, dataset: Arc<MovieDataset>) {
        let (min, max) = dataset.year_bounds().unwrap_or(self.config.default_years);
        self.years = self.config.initial_years(min, max);

        self.selected_genres = self
            .config
            .default_genres
            .iter()
            .filter(|g| dataset.genres.binary_search(g).is_ok())
            .cloned()
            .collect();

        self.colors = Some(GenreColors::new(&dataset.genres));
        self.status_message = (dataset.report.rows_dropped() > 0)
            .then(|| format!("Cleaning: {}", dataset.report));
        self.dataset = Some(dataset);
        self.refilter();
    }

    /// Recompute the query result after a selection change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let (lo, hi) = self.years;
        let range = match YearRange::new(lo, hi) {
            Ok(range) => range,
            Err(e) => {
                log::warn!("{e}");
                self.result = QueryResult::default();
                return;
            }
        };
        let query = Query::new(range, self.selected_genres.clone()).with_top_n(self.config.top_n);
        self.result = run_query(ds, &query);
        self.rating_bins = rating_histogram(
            ds,
            &self.result.matches,
            self.config.min_votes,
            self.config.rating_bins,
        );
        self.budget_points =
            budget_vs_revenue(ds, &self.result.matches, self.config.scatter_min_amount);
    }

    /// Move one end of the year range, dragging the other along if needed.
    pub fn set_years(&mut self, lo: i32, hi: i32) {
        self.years = if lo <= hi { (lo, hi) } else { (hi, lo) };
        self.refilter();
    }

    /// Toggle a single genre in the selection.
    pub fn toggle_genre(&mut self, genre: &str) {
        if !self.selected_genres.remove(genre) {
            self.selected_genres.insert(genre.to_string());
        }
        self.refilter();
    }

    /// Clear the genre selection (no genre filter).
    pub fn select_none(&mut self) {
        self.selected_genres.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{test_movie, CleaningReport};

    fn state() -> AppState {
        let movies = vec![
            test_movie(1, "2005-01-01", "Action", 7.0),
            test_movie(2, "1999-01-01", "Comedy", 8.0),
            test_movie(3, "2008-01-01", "Drama", 6.0),
        ];
        let ds = MovieDataset::from_movies(movies, CleaningReport::default(), String::new());
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(Arc::new(ds));
        state
    }

    #[test]
    fn test_defaults_applied_on_load() {
        let state = state();
        assert_eq!(state.years, (2000, 2008));
        let expected: BTreeSet<String> = ["Action", "Comedy"].iter().map(|s| s.to_string()).collect();
        assert_eq!(state.selected_genres, expected);
        assert_eq!(state.result.matches, vec![0]);
    }

    #[test]
    fn test_empty_dataset_with_reversed_default_years() {
        let config = DashboardConfig {
            default_years: (2010, 2000),
            ..DashboardConfig::default()
        };
        let mut state = AppState::new(config);
        let empty = MovieDataset::from_movies(Vec::new(), CleaningReport::default(), String::new());
        state.set_dataset(Arc::new(empty));

        assert_eq!(state.years, (2000, 2010));
        assert!(state.selected_genres.is_empty());
        assert!(state.result.is_empty());
    }

    #[test]
    fn test_selection_changes_requery() {
        let mut state = state();
        state.select_none();
        assert_eq!(state.result.matches, vec![0, 2]);

        state.toggle_genre("Drama");
        assert_eq!(state.result.matches, vec![2]);
        state.toggle_genre("Drama");
        assert_eq!(state.result.matches, vec![0, 2]);

        state.set_years(2008, 1990);
        assert_eq!(state.years, (1990, 2008));
        assert_eq!(state.result.matches, vec![0, 1, 2]);
        assert_eq!(state.result.per_year, vec![(1999, 1), (2005, 1), (2008, 1)]);
    }
}
