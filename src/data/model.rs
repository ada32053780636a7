use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Coerced – a typed cell that may have failed to parse
// ---------------------------------------------------------------------------

/// Result of coercing one raw cell into a typed value.
///
/// `Unknown` means "could not be parsed" and is never the same thing as a
/// zero or an empty value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<T> {
    Known(T),
    Unknown,
}

impl<T> Coerced<T> {
    pub fn known(self) -> Option<T> {
        match self {
            Coerced::Known(v) => Some(v),
            Coerced::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Coerced<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Coerced::Known(v),
            None => Coerced::Unknown,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Coerced<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coerced::Known(v) => write!(f, "{v}"),
            Coerced::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// RawRow / NormalizedRow – the two pre-cleaning views of a record
// ---------------------------------------------------------------------------

/// One CSV record as text, keyed by header name.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub cells: BTreeMap<String, String>,
}

impl RawRow {
    /// The cell for `column`, or `""` when the record was too short.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RawRow {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A record after type normalization. Nothing has been dropped yet.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub id: Coerced<f64>,
    pub title: String,
    pub release_date: Coerced<NaiveDate>,
    pub budget: Coerced<f64>,
    pub revenue: Coerced<f64>,
    pub popularity: Coerced<f64>,
    pub vote_average: Coerced<f64>,
    pub vote_count: Coerced<f64>,
    /// Untouched `genres` cell; extraction happens in the record filter.
    pub genres_raw: String,
}

// ---------------------------------------------------------------------------
// Movie – one cleaned row
// ---------------------------------------------------------------------------

/// A cleaned movie record. `id` and `release_date` are always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
    pub year: i32,
    pub budget: Coerced<f64>,
    pub revenue: Coerced<f64>,
    pub popularity: Coerced<f64>,
    pub vote_average: Coerced<f64>,
    pub vote_count: Coerced<f64>,
    /// Genre labels joined by `", "`, in source order.
    pub genres_clean: String,
}

impl Movie {
    /// Individual genre labels of this movie.
    pub fn genre_labels(&self) -> impl Iterator<Item = &str> {
        split_labels(&self.genres_clean)
    }
}

/// Split a `genres_clean` value into its non-empty labels.
pub fn split_labels(genres_clean: &str) -> impl Iterator<Item = &str> {
    genres_clean
        .split(", ")
        .map(str::trim)
        .filter(|label| !label.is_empty())
}

// ---------------------------------------------------------------------------
// CleaningReport – aggregate counts for observability
// ---------------------------------------------------------------------------

/// What happened to the input rows during cleaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningReport {
    /// Records handed to the cleaner (after CSV parsing).
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Rows whose `id` was unknown (counted here even if the date was too).
    pub dropped_unknown_id: usize,
    pub dropped_unknown_date: usize,
    /// CSV records the reader could not parse at all.
    pub unreadable_records: usize,
    /// Rows whose `genres` cell fell back to an empty label string.
    pub genre_defaults: usize,
}

impl CleaningReport {
    pub fn rows_dropped(&self) -> usize {
        self.dropped_unknown_id + self.dropped_unknown_date
    }
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} rows kept ({} without id, {} without release date, {} unreadable)",
            self.rows_kept,
            self.rows_read,
            self.dropped_unknown_id,
            self.dropped_unknown_date,
            self.unreadable_records
        )
    }
}

// ---------------------------------------------------------------------------
// MovieDataset – the complete cleaned dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset with its pre-computed category index.
///
/// Built once, then shared read-only (usually behind an `Arc`).
#[derive(Debug, Clone)]
pub struct MovieDataset {
    /// All cleaned movies, in input order.
    pub movies: Vec<Movie>,
    /// Sorted distinct genre labels across all movies.
    pub genres: Vec<String>,
    pub report: CleaningReport,
    /// Hex SHA-256 of the source bytes.
    pub fingerprint: String,
}

impl MovieDataset {
    /// Build the dataset and its category index from cleaned movies.
    pub fn from_movies(movies: Vec<Movie>, report: CleaningReport, fingerprint: String) -> Self {
        let genres = super::index::category_index(&movies);
        MovieDataset {
            movies,
            genres,
            report,
            fingerprint,
        }
    }

    /// Smallest and largest `year`, or `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.movies.iter().map(|m| m.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }

    /// Number of movies.
    pub fn len(&self) -> usize {
        self.movies.len()
    }
}

/// Build a movie with only the fields a test cares about.
#[cfg(test)]
pub(crate) fn test_movie(id: i64, date: &str, genres: &str, vote_average: f64) -> Movie {
    use chrono::Datelike;

    let release_date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    Movie {
        id,
        title: format!("movie {id}"),
        release_date,
        year: release_date.year(),
        budget: Coerced::Unknown,
        revenue: Coerced::Unknown,
        popularity: Coerced::Unknown,
        vote_average: Coerced::Known(vote_average),
        vote_count: Coerced::Known(100.0),
        genres_clean: genres.to_string(),
    }
}
