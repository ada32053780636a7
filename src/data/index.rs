use std::collections::BTreeSet;

use super::model::Movie;

/// Sorted, de-duplicated genre labels across all movies.
///
/// Each `genres_clean` value is split into its labels first, so
/// `"Action, Comedy"` contributes both `Action` and `Comedy`.
pub fn category_index(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .flat_map(Movie::genre_labels)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
