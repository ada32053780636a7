//! Write a movie table for trying out the dashboard.
//!
//! ```text
//! generate_sample [OUT] [--rows N]                 synthetic movies
//! generate_sample [OUT] --from INPUT [--rows N]    first N records of INPUT
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(
    name = "generate_sample",
    about = "Write a synthetic movie table, or the head of an existing one"
)]
struct Cli {
    /// File to write
    #[arg(default_value = "movies_sample.csv")]
    out: PathBuf,

    /// Copy records from this CSV instead of generating them
    #[arg(long, value_name = "INPUT")]
    from: Option<PathBuf>,

    /// Number of records to write
    #[arg(long, default_value_t = 5000)]
    rows: usize,
}

const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (18, "Drama"),
    (14, "Fantasy"),
    (27, "Horror"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (53, "Thriller"),
];

const TITLE_WORDS: &[&str] = &[
    "Night", "River", "Last", "Silent", "Golden", "City", "Storm", "Dream", "Shadow", "Return",
    "Winter", "Empire", "Lost", "Wild", "Heart", "Road",
];

#[derive(Debug, Serialize)]
struct MovieRow {
    id: String,
    title: String,
    release_date: String,
    budget: String,
    revenue: String,
    vote_average: String,
    popularity: String,
    genres: String,
    vote_count: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn synthetic_row(id: usize, rng: &mut SimpleRng) -> MovieRow {
    let year = 1950 + rng.below(70);
    let month = 1 + rng.below(12);
    let day = 1 + rng.below(28);

    let n_genres = rng.below(4);
    let mut picked: Vec<(u32, &str)> = Vec::new();
    for _ in 0..n_genres {
        let g = GENRES[rng.below(GENRES.len())];
        if !picked.contains(&g) {
            picked.push(g);
        }
    }
    let genres = format!(
        "[{}]",
        picked
            .iter()
            .map(|(gid, name)| format!("{{'id': {gid}, 'name': '{name}'}}"))
            .collect::<Vec<_>>()
            .join(", ")
    );

    // About a third of the budgets are not recorded, as in scraped data.
    let budget = if rng.next_f64() < 0.35 {
        0.0
    } else {
        (rng.gauss(25.0, 15.0).max(0.1) * 1_000_000.0).round()
    };
    let revenue = if budget == 0.0 || rng.next_f64() < 0.2 {
        0.0
    } else {
        (budget * rng.gauss(2.5, 1.2).max(0.0)).round()
    };

    let mut row = MovieRow {
        id: id.to_string(),
        title: format!(
            "{} {}",
            TITLE_WORDS[rng.below(TITLE_WORDS.len())],
            TITLE_WORDS[rng.below(TITLE_WORDS.len())]
        ),
        release_date: format!("{year}-{month:02}-{day:02}"),
        budget: format!("{budget}"),
        revenue: format!("{revenue}"),
        vote_average: format!("{:.1}", rng.gauss(6.2, 1.2).clamp(0.0, 10.0)),
        popularity: format!("{:.6}", rng.next_f64() * 30.0),
        genres,
        vote_count: format!("{}", rng.below(3000)),
    };

    // Sprinkle in the kinds of damage real exports carry.
    match rng.below(100) {
        0 => row.id = row.release_date.clone(),
        1 => row.release_date = String::new(),
        2 => row.genres = "not valid data".to_string(),
        3 => row.budget = "/poster.jpg".to_string(),
        _ => {}
    }
    row
}

/// Copy the header and the first `rows` records of `input`.
fn head(input: &Path, out: &Path, rows: usize) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(input)
        .with_context(|| format!("opening {}", input.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(out)
        .with_context(|| format!("creating {}", out.display()))?;

    writer.write_byte_record(reader.byte_headers().context("reading header")?)?;
    let mut written = 0;
    for record in reader.byte_records().take(rows) {
        writer.write_byte_record(&record.with_context(|| format!("record {written}"))?)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

fn main() -> Result<()> {
    let Cli { out, from, rows } = Cli::parse();

    let written = match &from {
        Some(input) => head(input, &out, rows)?,
        None => {
            let mut rng = SimpleRng::new(42);
            let mut writer = csv::Writer::from_path(&out)
                .with_context(|| format!("creating {}", out.display()))?;
            for id in 1..=rows {
                writer.serialize(synthetic_row(id, &mut rng))?;
            }
            writer.flush()?;
            rows
        }
    };

    println!("'{}' created successfully with {written} rows.", out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(cli.out, PathBuf::from("movies_sample.csv"));
        assert_eq!(cli.from, None);
        assert_eq!(cli.rows, 5000);
    }

    #[test]
    fn test_cli_options() {
        let cli =
            Cli::try_parse_from(["generate_sample", "out.csv", "--from", "full.csv", "--rows=10"])
                .unwrap();
        assert_eq!(cli.out, PathBuf::from("out.csv"));
        assert_eq!(cli.from, Some(PathBuf::from("full.csv")));
        assert_eq!(cli.rows, 10);

        let err = Cli::try_parse_from(["generate_sample", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        assert!(Cli::try_parse_from(["generate_sample", "--rows", "-3"]).is_err());
    }

    #[test]
    fn test_head_copies_first_records() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("full.csv");
        let out = dir.path().join("head.csv");
        std::fs::write(&input, "id,title\n1,a\n2,b\n3,c\n").unwrap();

        assert_eq!(head(&input, &out, 2).unwrap(), 2);
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "id,title\n1,a\n2,b\n");
    }
}
