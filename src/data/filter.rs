use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::model::{Coerced, MovieDataset};

// ---------------------------------------------------------------------------
// Filter predicate: year range + selected genres
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("year range is inverted: {lo} > {hi}")]
    InvertedRange { lo: i32, hi: i32 },
}

/// Closed year interval `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    lo: i32,
    hi: i32,
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Result<Self, QueryError> {
        if lo > hi {
            return Err(QueryError::InvertedRange { lo, hi });
        }
        Ok(YearRange { lo, hi })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.lo <= year && year <= self.hi
    }
}

/// One user selection: which years and genres to show.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub years: YearRange,
    /// Empty means "any genre".
    pub genres: BTreeSet<String>,
    /// Length of the top-rated ranking.
    pub top_n: usize,
}

impl Query {
    pub fn new(years: YearRange, genres: BTreeSet<String>) -> Self {
        Query {
            years,
            genres,
            top_n: 10,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Whether a movie with this `year` and `genres_clean` passes.
    ///
    /// Genres are OR-ed: containing any one selected label as a substring
    /// is enough.
    pub fn matches(&self, year: i32, genres_clean: &str) -> bool {
        self.years.contains(year)
            && (self.genres.is_empty()
                || self
                    .genres
                    .iter()
                    .any(|label| genres_clean.contains(label.as_str())))
    }
}

// ---------------------------------------------------------------------------
// Query result
// ---------------------------------------------------------------------------

/// Indices into [`MovieDataset::movies`] plus the two derived chart views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
    /// Matching movies, in dataset order.
    pub matches: Vec<usize>,
    /// Highest `vote_average` first, at most `top_n` entries.
    pub top_rated: Vec<usize>,
    /// `(year, count)` ascending by year.
    pub per_year: Vec<(i32, usize)>,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Evaluate a query against the cleaned dataset.
pub fn run_query(dataset: &MovieDataset, query: &Query) -> QueryResult {
    let matches = filtered_indices(dataset, query);
    let top_rated = top_rated(dataset, &matches, query.top_n);
    let per_year = per_year_counts(dataset, &matches);
    QueryResult {
        matches,
        top_rated,
        per_year,
    }
}

/// Return indices of movies that pass the query's predicate.
pub fn filtered_indices(dataset: &MovieDataset, query: &Query) -> Vec<usize> {
    dataset
        .movies
        .iter()
        .enumerate()
        .filter(|(_, m)| query.matches(m.year, &m.genres_clean))
        .map(|(i, _)| i)
        .collect()
}

/// The `n` best-rated of `indices`. Ties keep their relative order and
/// unknown ratings sort after every known one.
pub fn top_rated(dataset: &MovieDataset, indices: &[usize], n: usize) -> Vec<usize> {
    let mut ranked = indices.to_vec();
    // sort_by is stable, so equal scores stay in dataset order.
    ranked.sort_by(|&a, &b| {
        match (
            dataset.movies[a].vote_average,
            dataset.movies[b].vote_average,
        ) {
            (Coerced::Known(x), Coerced::Known(y)) => y.total_cmp(&x),
            (Coerced::Known(_), Coerced::Unknown) => std::cmp::Ordering::Less,
            (Coerced::Unknown, Coerced::Known(_)) => std::cmp::Ordering::Greater,
            (Coerced::Unknown, Coerced::Unknown) => std::cmp::Ordering::Equal,
        }
    });
    ranked.truncate(n);
    ranked
}

/// Number of movies per release year, ascending by year.
pub fn per_year_counts(dataset: &MovieDataset, indices: &[usize]) -> Vec<(i32, usize)> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for &i in indices {
        *counts.entry(dataset.movies[i].year).or_default() += 1;
    }
    counts.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

pub const NO_DATA: &str = "no data available";
pub const UNKNOWN: &str = "unknown";

/// Render a budget or revenue cell.
///
/// A literal zero means "not recorded" in the source data, so it is shown
/// as [`NO_DATA`]; an unparseable cell is shown as [`UNKNOWN`].
pub fn format_money(value: Coerced<f64>) -> String {
    match value {
        Coerced::Unknown => UNKNOWN.to_string(),
        Coerced::Known(v) if v == 0.0 => NO_DATA.to_string(),
        Coerced::Known(v) => {
            // Negative fractions truncate to -0.0, which prints as "-0".
            let whole = if v.trunc() == 0.0 { 0.0 } else { v.trunc() };
            group_thousands(&format!("{whole:.0}"))
        }
    }
}

/// `"1500000"` → `"1,500,000"`. Takes an optionally signed digit string so
/// amounts beyond the `i64` range keep every digit.
pub fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let mut out = String::with_capacity(number.len() + digits.len() / 3);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
