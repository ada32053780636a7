//! Dashboard defaults, optionally overridden by a JSON file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "MOVIE_DASHBOARD_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "movie-dashboard.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Table loaded at startup.
    pub data_path: PathBuf,
    /// Initial year range, clamped to the data.
    pub default_years: (i32, i32),
    /// Initially selected genres; labels absent from the data are ignored.
    pub default_genres: Vec<String>,
    /// Length of the top-rated ranking.
    pub top_n: usize,
    /// Minimum vote count for the rating distribution.
    pub min_votes: f64,
    pub rating_bins: usize,
    /// Budget and revenue must both exceed this for the scatter plot.
    pub scatter_min_amount: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("movies_sample.csv"),
            default_years: (2000, 2010),
            default_genres: vec!["Action".to_string(), "Comedy".to_string()],
            top_n: 10,
            min_votes: 10.0,
            rating_bins: 20,
            scatter_min_amount: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Load from `$MOVIE_DASHBOARD_CONFIG`, else `./movie-dashboard.json`,
    /// else built-in defaults.
    ///
    /// # Errors
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return Self::from_file(local);
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The configured year range clamped into the bounds `(min, max)`.
    /// Either pair may be given in reverse order.
    pub fn initial_years(&self, min: i32, max: i32) -> (i32, i32) {
        let (a, b) = ordered(self.default_years);
        let (min, max) = ordered((min, max));
        (a.clamp(min, max), b.clamp(min, max))
    }
}

fn ordered((a, b): (i32, i32)) -> (i32, i32) {
    (a.min(b), a.max(b))
}
