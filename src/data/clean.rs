use chrono::Datelike;

use super::extract::{extract_names, Extraction};
use super::model::{CleaningReport, Coerced, Movie, NormalizedRow};

// ---------------------------------------------------------------------------
// Record filter
// ---------------------------------------------------------------------------

/// Turn normalized rows into cleaned movies.
///
/// Rows without a usable `id` or `release_date` are dropped; the rest keep
/// their input order and gain `year` and `genres_clean`.
pub fn clean_rows(rows: Vec<NormalizedRow>) -> (Vec<Movie>, CleaningReport) {
    let mut report = CleaningReport {
        rows_read: rows.len(),
        ..CleaningReport::default()
    };
    let mut movies = Vec::with_capacity(rows.len());

    for row in rows {
        let Some(id) = row.id.known().and_then(to_integer_id) else {
            report.dropped_unknown_id += 1;
            continue;
        };
        let Coerced::Known(release_date) = row.release_date else {
            report.dropped_unknown_date += 1;
            continue;
        };

        let genres_clean = match extract_names(&row.genres_raw) {
            Extraction::Extracted(names) => names,
            Extraction::Defaulted(reason) => {
                log::debug!("movie {id}: genres defaulted to empty ({reason})");
                report.genre_defaults += 1;
                String::new()
            }
        };

        movies.push(Movie {
            id,
            title: row.title,
            release_date,
            year: release_date.year(),
            budget: row.budget,
            revenue: row.revenue,
            popularity: row.popularity,
            vote_average: row.vote_average,
            vote_count: row.vote_count,
            genres_clean,
        });
    }

    report.rows_kept = movies.len();
    if report.rows_dropped() > 0 {
        log::info!(
            "Dropped {} rows during cleaning ({} without id, {} without release date)",
            report.rows_dropped(),
            report.dropped_unknown_id,
            report.dropped_unknown_date
        );
    }
    (movies, report)
}

/// Truncate toward zero; values outside the `i64` range count as unknown.
fn to_integer_id(value: f64) -> Option<i64> {
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Some(truncated as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::RawRow;
    use crate::data::normalize::{normalize_row, GENRES, ID, RELEASE_DATE, TITLE};

    fn raw(id: &str, date: &str, genres: &str) -> NormalizedRow {
        let row: RawRow = [
            (ID, id),
            (TITLE, "t"),
            (RELEASE_DATE, date),
            (GENRES, genres),
        ]
        .into_iter()
        .collect();
        normalize_row(&row)
    }

    #[test]
    fn test_invalid_date_row_is_dropped() {
        let rows = vec![
            raw("1", "2005-01-01", "[]"),
            raw("2", "invalid", "[]"),
        ];
        assert_eq!(rows.len(), 2);
        let (movies, report) = clean_rows(rows);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].id, 1);
        assert!(movies.iter().all(|m| m.id != 2));
        assert_eq!(report.dropped_unknown_date, 1);
        assert_eq!(report.rows_kept, 1);
        assert_eq!(report.rows_read, 2);
    }

    #[test]
    fn test_unknown_id_is_dropped_and_counted_once() {
        let rows = vec![raw("abc", "nope", "[]"), raw("", "2001-02-03", "[]")];
        let (movies, report) = clean_rows(rows);
        assert!(movies.is_empty());
        assert_eq!(report.dropped_unknown_id, 2);
        assert_eq!(report.dropped_unknown_date, 0);
        assert_eq!(report.rows_dropped(), 2);
    }

    #[test]
    fn test_derives_year_genres_and_integer_id() {
        let rows = vec![raw(
            "862.0",
            "1995-10-30",
            "[{'id': 16, 'name': 'Animation'}, {'id': 35, 'name': 'Comedy'}]",
        )];
        let (movies, _) = clean_rows(rows);
        let m = &movies[0];
        assert_eq!(m.id, 862);
        assert_eq!(m.year, 1995);
        assert_eq!(m.year, m.release_date.year());
        assert_eq!(m.genres_clean, "Animation, Comedy");
    }

    #[test]
    fn test_bad_genres_do_not_drop_the_row() {
        let (movies, report) = clean_rows(vec![raw("5", "2010-06-01", "not valid data")]);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].genres_clean, "");
        assert_eq!(report.genre_defaults, 1);
    }

    #[test]
    fn test_preserves_input_order() {
        let rows = vec![
            raw("30", "2003-01-01", "[]"),
            raw("x", "2003-01-01", "[]"),
            raw("10", "2001-01-01", "[]"),
            raw("20", "2002-01-01", "[]"),
        ];
        let (movies, _) = clean_rows(rows);
        let ids: Vec<i64> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn test_to_integer_id_bounds() {
        assert_eq!(to_integer_id(-3.9), Some(-3));
        assert_eq!(to_integer_id(1e30), None);
    }
}
