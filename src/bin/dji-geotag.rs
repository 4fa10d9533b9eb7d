use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use dji_geotag::{DjiSrtParser, GeotagError, GeotagOptions, extract_geotag};
use env_logger::Env;

const PROGRAM_NAME: &str = "dji-geotag";

/// The single argument is always the SRT path, even when it looks like a
/// flag, so there is no `--help` or `--version`.
#[derive(Debug, Parser)]
#[command(
    name = PROGRAM_NAME,
    about = "Print the first geotag of a DJI drone SRT telemetry file as JSON",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Path to the DJI SRT telemetry file.
    #[arg(allow_hyphen_values = true)]
    srt_file_path: PathBuf,
}

fn parse_arguments() -> Result<Cli, GeotagError> {
    Cli::try_parse().map_err(|error| {
        log::debug!("Rejected command line: {error}");
        GeotagError::Usage {
            program: PROGRAM_NAME.to_string(),
        }
    })
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_arguments()?;
    let path = cli.srt_file_path;

    let geotag = extract_geotag(&path, &DjiSrtParser, &GeotagOptions::new())?;
    log::info!("{} -> {geotag}", path.display());

    println!("{}", geotag.to_json()?);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}
