use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::clean::clean_rows;
use super::model::{MovieDataset, RawRow};
use super::normalize::{normalize_row, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that leave no dataset at all. Problems inside individual cells
/// or records never end up here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("cannot read header row: {0}")]
    Header(#[source] csv::Error),
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read a movie table's bytes and pick its delimiter by extension.
///
/// Supported formats:
/// * `.csv`         – comma separated, header row first
/// * `.tsv`, `.tab` – tab separated, header row first
pub fn read_source(path: &Path) -> Result<(Vec<u8>, u8), LoadError> {
    let delimiter = delimiter_for(path)?;
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((bytes, delimiter))
}

/// Field delimiter implied by the file extension.
pub fn delimiter_for(path: &Path) -> Result<u8, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => Ok(b','),
        "tsv" | "tab" => Ok(b'\t'),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

/// Run the whole pipeline over in-memory file contents.
pub fn load_bytes(bytes: &[u8], delimiter: u8) -> Result<MovieDataset, LoadError> {
    let (raw_rows, unreadable) = read_raw_rows(bytes, delimiter)?;
    let normalized: Vec<_> = raw_rows.iter().map(normalize_row).collect();
    let (movies, mut report) = clean_rows(normalized);
    report.unreadable_records = unreadable;

    let dataset = MovieDataset::from_movies(movies, report, fingerprint(bytes));
    log::info!(
        "Cleaned dataset: {}; {} genres",
        dataset.report,
        dataset.genres.len()
    );
    Ok(dataset)
}

/// Hex SHA-256 of the file contents; identifies a dataset version.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read every record into a [`RawRow`] holding the required columns.
///
/// Short records are accepted (missing cells read as blank). Records the
/// CSV parser rejects are skipped and counted.
fn read_raw_rows(bytes: &[u8], delimiter: u8) -> Result<(Vec<RawRow>, usize), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(LoadError::Header)?
        .iter()
        .map(|h| {
            String::from_utf8_lossy(h)
                .trim_start_matches('\u{feff}')
                .trim()
                .to_string()
        })
        .collect();

    let columns: Vec<(usize, &'static str)> = REQUIRED_COLUMNS
        .iter()
        .map(|&name| {
            headers
                .iter()
                .position(|h| h == name)
                .map(|idx| (idx, name))
                .ok_or(LoadError::MissingColumn(name))
        })
        .collect::<Result<_, _>>()?;

    let mut rows = Vec::new();
    let mut unreadable = 0;

    for (record_no, result) in reader.byte_records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Skipping unreadable record {record_no}: {e}");
                unreadable += 1;
                continue;
            }
        };

        let row: RawRow = columns
            .iter()
            .filter_map(|&(idx, name)| {
                record
                    .get(idx)
                    .map(|cell| (name, String::from_utf8_lossy(cell).into_owned()))
            })
            .collect();
        rows.push(row);
    }

    Ok((rows, unreadable))
}
