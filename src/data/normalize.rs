use chrono::{NaiveDate, NaiveDateTime};

use super::model::{Coerced, NormalizedRow, RawRow};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const ID: &str = "id";
pub const TITLE: &str = "title";
pub const RELEASE_DATE: &str = "release_date";
pub const BUDGET: &str = "budget";
pub const REVENUE: &str = "revenue";
pub const POPULARITY: &str = "popularity";
pub const VOTE_AVERAGE: &str = "vote_average";
pub const VOTE_COUNT: &str = "vote_count";
pub const GENRES: &str = "genres";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    ID,
    TITLE,
    RELEASE_DATE,
    BUDGET,
    REVENUE,
    VOTE_AVERAGE,
    POPULARITY,
    GENRES,
    VOTE_COUNT,
];

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

/// Retype every column of a raw row. Never fails and never drops the row;
/// bad cells become [`Coerced::Unknown`].
pub fn normalize_row(raw: &RawRow) -> NormalizedRow {
    NormalizedRow {
        id: parse_number(raw.get(ID)),
        title: raw.get(TITLE).trim().to_string(),
        release_date: parse_date(raw.get(RELEASE_DATE)),
        budget: parse_number(raw.get(BUDGET)),
        revenue: parse_number(raw.get(REVENUE)),
        popularity: parse_number(raw.get(POPULARITY)),
        vote_average: parse_number(raw.get(VOTE_AVERAGE)),
        vote_count: parse_number(raw.get(VOTE_COUNT)),
        genres_raw: raw.get(GENRES).to_string(),
    }
}

/// Parse a numeric cell. Blank, unparseable, `NaN` and infinite values
/// are all unknown.
pub fn parse_number(s: &str) -> Coerced<f64> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .into()
}

// ---------------------------------------------------------------------------
// Tolerant date parsing
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a release date in any of the common shapes found in scraped
/// metadata. A bare year maps to January 1st and a year-month to the first
/// of that month.
pub fn parse_date(s: &str) -> Coerced<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return Coerced::Unknown;
    }

    if let Some(d) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Coerced::Known(d);
    }

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Coerced::Known(dt.date());
    }

    if s.len() == 7 && s.as_bytes()[4] == b'-' {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
            return Coerced::Known(d);
        }
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(d) = s
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1))
        {
            return Coerced::Known(d);
        }
    }

    Coerced::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Coerced<NaiveDate> {
        Coerced::Known(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("30000000"), Coerced::Known(30_000_000.0));
        assert_eq!(parse_number(" 7.7 "), Coerced::Known(7.7));
        assert_eq!(parse_number("0"), Coerced::Known(0.0));
        assert_eq!(parse_number(""), Coerced::Unknown);
        assert_eq!(parse_number("/ff9qCepilowshEtG2GYWwzt2bs4.jpg"), Coerced::Unknown);
        assert_eq!(parse_number("NaN"), Coerced::Unknown);
        assert_eq!(parse_number("inf"), Coerced::Unknown);
    }

    #[test]
    fn test_parse_date_shapes() {
        assert_eq!(parse_date("1995-10-30"), ymd(1995, 10, 30));
        assert_eq!(parse_date("1995/10/30"), ymd(1995, 10, 30));
        assert_eq!(parse_date("19951030"), ymd(1995, 10, 30));
        assert_eq!(parse_date("10/30/1995"), ymd(1995, 10, 30));
        assert_eq!(parse_date("30.10.1995"), ymd(1995, 10, 30));
        assert_eq!(parse_date("October 30, 1995"), ymd(1995, 10, 30));
        assert_eq!(parse_date("Oct 30, 1995"), ymd(1995, 10, 30));
        assert_eq!(parse_date("30 October 1995"), ymd(1995, 10, 30));
        assert_eq!(parse_date("1995-10-30T12:00:00"), ymd(1995, 10, 30));
        assert_eq!(parse_date("1995-10-30 08:15"), ymd(1995, 10, 30));
        assert_eq!(parse_date("1995-10"), ymd(1995, 10, 1));
        assert_eq!(parse_date("1995"), ymd(1995, 1, 1));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("invalid"), Coerced::Unknown);
        assert_eq!(parse_date(""), Coerced::Unknown);
        assert_eq!(parse_date("1995-13-01"), Coerced::Unknown);
        assert_eq!(parse_date("1"), Coerced::Unknown);
        assert_eq!(parse_date("0.065736"), Coerced::Unknown);
    }

    #[test]
    fn test_normalize_row_never_drops() {
        let raw: RawRow = [
            (ID, "tt0113"),
            (TITLE, " Heat "),
            (RELEASE_DATE, "invalid"),
            (BUDGET, "60000000"),
            (GENRES, "[{'id': 28, 'name': 'Action'}]"),
        ]
        .into_iter()
        .collect();
        let row = normalize_row(&raw);
        assert_eq!(row.id, Coerced::Unknown);
        assert_eq!(row.release_date, Coerced::Unknown);
        assert_eq!(row.title, "Heat");
        assert_eq!(row.budget, Coerced::Known(60_000_000.0));
        assert_eq!(row.revenue, Coerced::Unknown);
        assert_eq!(row.genres_raw, "[{'id': 28, 'name': 'Action'}]");
    }
}
