mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::MovieDashboardApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

#[derive(Debug, Parser)]
#[command(name = "movie-dashboard", about = "Interactive movie metadata dashboard")]
struct Cli {
    /// CSV or TSV table to open; defaults to the configured `data_path`
    csv_path: Option<PathBuf>,
}

fn main() -> eframe::Result {
    let cli = Cli::parse();
    env_logger::init();

    let config = DashboardConfig::load().unwrap_or_else(|e| {
        log::error!("{e:#}; using default settings");
        DashboardConfig::default()
    });
    let data_path = cli.csv_path.unwrap_or_else(|| config.data_path.clone());

    let mut state = AppState::new(config);
    if let Err(e) = state.open(&data_path) {
        log::error!("Failed to load {}: {e}", data_path.display());
        state.status_message = Some(format!("Error: {e}"));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Interactive Movie Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(MovieDashboardApp::new(state)))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_path_is_optional() {
        assert_eq!(Cli::try_parse_from(["movie-dashboard"]).unwrap().csv_path, None);
        assert_eq!(
            Cli::try_parse_from(["movie-dashboard", "movies.tsv"])
                .unwrap()
                .csv_path,
            Some(PathBuf::from("movies.tsv"))
        );
        assert!(Cli::try_parse_from(["movie-dashboard", "--help"]).is_err());
    }
}
