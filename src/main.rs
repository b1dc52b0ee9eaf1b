use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod assets;
mod error;
mod resize;
mod utils;

use assets::config::{AssetConfig, AssetConfigFile, Layout};
use assets::restore::restore_backups;
use assets::updater::AssetUpdater;
use error::AssetError;
use resize::ResizeMode;

/// Image resizing and release-asset URL rewriting for the project website
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print debug logs
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resize an image, or every image in a directory
    Resize {
        /// Input image path or directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output path (default: <input>_resized.<ext>, or <input>/resized with --dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target width
        #[arg(short, long, default_value_t = 768, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,

        /// Target height
        #[arg(short = 'H', long, default_value_t = 1024, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,

        /// Resize mode
        #[arg(short, long, value_enum, default_value_t = ResizeMode::Resize)]
        mode: ResizeMode,

        /// Process all images in the input directory
        #[arg(short, long, default_value_t = false)]
        dir: bool,
    },
    /// Point local asset paths in the site sources at GitHub release downloads
    Assets {
        /// Website root containing index.html and js/
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Preview changes without modifying files
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Restore files from .backup snapshots
        #[arg(long, default_value_t = false)]
        restore: bool,

        /// Override the release tag
        #[arg(long)]
        tag: Option<String>,

        /// Use flat file structure (files named with prefixes)
        #[arg(long, default_value_t = false, conflicts_with = "hierarchical")]
        flat: bool,

        /// Use hierarchical structure (files in subdirectories)
        #[arg(long, default_value_t = false)]
        hierarchical: bool,

        /// JSON file with host, repo, tag, layout and files
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Build the updater settings: defaults, then the optional JSON file, then flags
fn asset_config(
    config_file: Option<&Path>,
    tag: Option<String>,
    flat: bool,
    hierarchical: bool,
) -> Result<AssetConfig, AssetError> {
    let base = match config_file {
        Some(path) => AssetConfig::from_file(AssetConfigFile::load(path)?),
        None => AssetConfig::default(),
    };
    let layout = match (flat, hierarchical) {
        (true, _) => Some(Layout::Flat),
        (false, true) => Some(Layout::Hierarchical),
        (false, false) => None,
    };
    Ok(base.with_overrides(tag, layout))
}

/// Colour log output only when the stream is an interactive terminal
fn ansi_enabled(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(ansi_enabled(&io::stderr()))
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Commands::Resize {
            input,
            output,
            width,
            height,
            mode,
            dir,
        } => {
            if dir {
                let output_dir = output.unwrap_or_else(|| input.join("resized"));
                resize::batch::resize_directory(&input, &output_dir, width, height, mode)?;
            } else {
                resize::run_single(&input, output.as_deref(), width, height, mode)?;
            }
        }
        Commands::Assets {
            project_dir,
            dry_run,
            restore,
            tag,
            flat,
            hierarchical,
            config,
        } => {
            if restore {
                let report = restore_backups(&project_dir)?;
                debug!("{} backup(s) without an original were skipped", report.orphaned.len());
                return Ok(());
            }

            let config = asset_config(config.as_deref(), tag, flat, hierarchical)?;

            let summary = AssetUpdater::new(project_dir, config).update_all(dry_run)?;
            debug!(
                "{} updated, {} missing (dry run: {})",
                summary.updated.len(),
                summary.missing.len(),
                summary.dry_run
            );
        }
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
