// RetroCalc - full-screen terminal spreadsheet

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use retrocalc_cli::logging;
use retrocalc_cli::tui::{self, input::App, viewport::GridLayout};
use retrocalc_config::settings::Settings;
use retrocalc_engine::grid::Grid;
use retrocalc_io::{native, IoError};

use exit_codes::{EXIT_ERROR, EXIT_LOAD, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "retrocalc")]
#[command(about = "A VisiCalc-style spreadsheet for the terminal")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Sheet to open; a file that does not exist yet becomes the `/SS` target
    file: Option<PathBuf>,

    /// Skip the title screen
    #[arg(long)]
    no_welcome: bool,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

/// Grid to start with: the sheet at `path`, or an empty one when it does not exist.
fn open_sheet(path: &Path) -> Result<Grid, IoError> {
    match native::load(path) {
        Ok(grid) => Ok(grid),
        Err(IoError::NotFound(_)) => {
            tracing::info!(path = %path.display(), "new sheet");
            Ok(Grid::new())
        }
        Err(e) => Err(e),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = Settings::load();
    logging::init(&settings.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let grid = match &cli.file {
        Some(path) => match open_sheet(path) {
            Ok(grid) => grid,
            Err(e) => {
                tracing::error!("startup load failed: {}", e);
                eprintln!("error: {}", e);
                return ExitCode::from(EXIT_LOAD);
            }
        },
        None => Grid::new(),
    };

    let app = App::new(grid, cli.file);
    let layout = GridLayout::from_settings(&settings);
    let show_welcome = settings.show_welcome && !cli.no_welcome;

    // The terminal is restored by the time `run` returns
    match tui::run(app, layout, show_welcome) {
        Ok(_) => {
            println!("Goodbye!");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(message) => {
            tracing::error!("{}", message);
            eprintln!("error: {}", message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
