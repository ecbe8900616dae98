//! CLI runner for tilescan.
//!
//! Wires the command line and config file into the inventory analyzer and the
//! source bundler. The binary in `main.rs` is a thin wrapper around [`run`].

pub mod cli;
pub mod config;
pub mod logging;

use cli::{AnalyzeArgs, Cli, Command, OutputFormat};
use config::FileConfig;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tilescan_bundle::{BundleConfig, BundleError, BundleSummary};
use tilescan_inventory::{InventoryConfig, InventoryError, TileAnalyzer, TileReport};
use tracing::{error, info};

/// Errors that end a `tilescan` invocation with a failure exit code.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        /// Config file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for [`FileConfig`].
    #[error("Invalid config {}: {source}", path.display())]
    ConfigParse {
        /// Config file path.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Analysis failed before a report could be built.
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),

    /// Bundling failed.
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// The JSON report could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON shape of an `analyze --format json` report.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a TileReport,
    total_analyzed: usize,
    total_size_mib: f64,
    average_size: f64,
}

/// Render a report in the requested format.
pub fn render_report(report: &TileReport, format: OutputFormat) -> Result<String, RunnerError> {
    match format {
        OutputFormat::Text => Ok(report.to_string()),
        OutputFormat::Json => {
            let json = JsonReport {
                report,
                total_analyzed: report.total_analyzed(),
                total_size_mib: report.total_size_mib(),
                average_size: report.average_size(),
            };
            Ok(serde_json::to_string_pretty(&json)? + "\n")
        }
    }
}

/// Run an analysis.
///
/// Returns `Ok(None)` when the manifest is missing or unreadable: the problem
/// is logged and the run stops without a report, which is not a failure.
pub fn run_analyze(config: &InventoryConfig) -> Result<Option<TileReport>, RunnerError> {
    info!(
        "Analyzing {} (tiles in {}, region {})",
        config.manifest.display(),
        config.tiles_dir.display(),
        config.region
    );

    match TileAnalyzer::new(config.clone()).run() {
        Ok(report) => Ok(Some(report)),
        Err(e) if e.is_manifest_failure() => {
            error!("{}", e);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Build a bundle.
pub fn run_bundle(config: &BundleConfig) -> Result<BundleSummary, RunnerError> {
    info!("Bundling {} into {}", config.root.display(), config.output.display());
    Ok(tilescan_bundle::bundle(config)?)
}

/// Execute a parsed command line, writing results to stdout.
pub fn run(cli: Cli) -> Result<ExitCode, RunnerError> {
    let file_config = FileConfig::load_or_default(cli.config.as_deref())?;

    match cli.command.unwrap_or_else(|| Command::Analyze(AnalyzeArgs::default())) {
        Command::Analyze(args) => {
            let config = args.apply(file_config.inventory);
            if let Some(report) = run_analyze(&config)? {
                print!("{}", render_report(&report, args.format)?);
            }
        }
        Command::Bundle(args) => {
            let config = args.apply(file_config.bundle);
            let summary = run_bundle(&config)?;
            println!("Bundled {} files into {}", summary.files, summary.output.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilescan_inventory::RegionFilter;

    #[test]
    fn test_run_analyze_missing_manifest_is_not_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = InventoryConfig {
            manifest: dir.path().join("downloaded_tiles.json"),
            ..Default::default()
        };
        assert!(run_analyze(&config).unwrap().is_none());
    }

    #[test]
    fn test_run_analyze_invalid_region_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("m.json");
        std::fs::write(&manifest, "{}").unwrap();
        let config = InventoryConfig {
            manifest,
            region: RegionFilter {
                min_x: 2,
                max_x: 1,
                max_y: 0,
            },
            ..Default::default()
        };
        assert!(matches!(
            run_analyze(&config),
            Err(RunnerError::Inventory(InventoryError::InvalidRegion { .. }))
        ));
    }

    #[test]
    fn test_render_json() {
        let report = TileReport {
            tiles_in_range: 3,
            empty_tiles: 1,
            non_empty_tiles: 2,
            total_size_bytes: 1024,
            ..TileReport::new(RegionFilter::default())
        };
        let json = render_report(&report, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tiles_in_range"], 3);
        assert_eq!(value["total_analyzed"], 3);
        assert_eq!(value["average_size"], 512.0);
        assert_eq!(value["region"]["min_x"], 598);
        assert!(value["missing_paths"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_render_text_matches_display() {
        let report = TileReport::new(RegionFilter::default());
        assert_eq!(
            render_report(&report, OutputFormat::Text).unwrap(),
            report.to_string()
        );
    }
}
