//! Command-line interface definition.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tilescan_bundle::BundleConfig;
use tilescan_inventory::InventoryConfig;

/// Tile inventory analysis and project bundling.
#[derive(Debug, Parser)]
#[command(name = "tilescan", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML config file; flags given on the command line take precedence.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Command to run (defaults to `analyze`).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report empty/non-empty tile counts and image sizes for a region.
    Analyze(AnalyzeArgs),
    /// Concatenate matching source files into one text file.
    Bundle(BundleArgs),
}

/// Report format for `analyze`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// JSON object.
    Json,
}

/// Arguments for `analyze`.
#[derive(Debug, Default, Args)]
pub struct AnalyzeArgs {
    /// Download manifest [default: downloaded_tiles.json]
    #[arg(short, long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Root of the sharded tile tree [default: tiles]
    #[arg(short, long, value_name = "DIR")]
    pub tiles_dir: Option<PathBuf>,

    /// Inclusive lower x bound [default: 598]
    #[arg(long, allow_negative_numbers = true)]
    pub min_x: Option<i64>,

    /// Inclusive upper x bound [default: 606]
    #[arg(long, allow_negative_numbers = true)]
    pub max_x: Option<i64>,

    /// Exclusive upper y bound [default: 1450]
    #[arg(long, allow_negative_numbers = true)]
    pub max_y: Option<i64>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    /// Apply flags on top of a base configuration.
    pub fn apply(&self, mut config: InventoryConfig) -> InventoryConfig {
        if let Some(manifest) = &self.manifest {
            config.manifest = manifest.clone();
        }
        if let Some(tiles_dir) = &self.tiles_dir {
            config.tiles_dir = tiles_dir.clone();
        }
        if let Some(min_x) = self.min_x {
            config.region.min_x = min_x;
        }
        if let Some(max_x) = self.max_x {
            config.region.max_x = max_x;
        }
        if let Some(max_y) = self.max_y {
            config.region.max_y = max_y;
        }
        config
    }
}

/// Arguments for `bundle`.
#[derive(Debug, Default, Args)]
pub struct BundleArgs {
    /// Directory to walk [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Bundle file to write [default: project_bundle.txt]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// File extension to include; repeat for several. Replaces the defaults (.html, .js).
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Exact file name to include; repeat for several. Replaces the default (CMakeLists.txt).
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub file_names: Vec<String>,

    /// Directory name to skip; repeat for several. Replaces the defaults (build, out, dist, node_modules).
    #[arg(short, long = "skip-dir", value_name = "NAME")]
    pub skip_dirs: Vec<String>,
}

impl BundleArgs {
    /// Apply flags on top of a base configuration.
    pub fn apply(&self, mut config: BundleConfig) -> BundleConfig {
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.iter().map(|e| normalize_extension(e)).collect();
        }
        if !self.file_names.is_empty() {
            config.file_names = self.file_names.clone();
        }
        if !self.skip_dirs.is_empty() {
            config.skip_dirs = self.skip_dirs.clone();
        }
        config
    }
}

/// Accept `js` as shorthand for `.js`.
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}
