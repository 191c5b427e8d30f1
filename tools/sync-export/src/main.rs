//! sync-export - Rocket sync track export tool
//!
//! Converts Rocket XML (.rocket) files into one binary .track file per track.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sync_track::{decode_track, track_name_from_path, DUMP_BASE, INSTALL_BASE};

use sync_export::{export_files, manifest, ExportOptions};

#[derive(Parser)]
#[command(name = "sync-export")]
#[command(about = "Convert Rocket XML files into track files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export tracks into a build directory
    Dump {
        /// Rocket XML files
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = ".")]
        outdir: PathBuf,

        /// Track filename prefix
        #[arg(long, default_value = DUMP_BASE)]
        base: String,

        /// File to touch once all tracks are written
        #[arg(long)]
        timestamp: Option<PathBuf>,
    },

    /// Export tracks into an installation root
    Install {
        /// Rocket XML files
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Installation root the track paths are placed under
        #[arg(long)]
        destdir: PathBuf,

        /// Track filename prefix
        #[arg(long, default_value = INSTALL_BASE)]
        base: String,
    },

    /// Export everything listed in a manifest
    Build {
        /// Path to sync.toml manifest
        #[arg(default_value = "sync.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a manifest and its inputs without writing
    Check {
        /// Path to sync.toml manifest
        #[arg(default_value = "sync.toml")]
        manifest: PathBuf,
    },

    /// Print the keyframes of a .track file
    Info {
        /// Input .track file
        input: PathBuf,

        /// Filename prefix used to recover the track name
        #[arg(long, default_value = DUMP_BASE)]
        base: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            files,
            outdir,
            base,
            timestamp,
        } => {
            let options = ExportOptions::dump(outdir)
                .with_base(base)
                .with_timestamp(timestamp);
            let exported = export_files(&files, &options)?;
            tracing::info!("Wrote {} track files to {:?}", exported.len(), options.outdir);
        }

        Commands::Install {
            files,
            destdir,
            base,
        } => {
            let options = ExportOptions::install(destdir).with_base(base);
            let exported = export_files(&files, &options)?;
            tracing::info!("Installed {} track files under {:?}", exported.len(), options.outdir);
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building tracks from {:?}", manifest);
            let exported = manifest::build_all(&manifest, output.as_deref())?;
            tracing::info!("Build complete! ({} tracks)", exported.len());
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::SyncManifest::load(&manifest)?;
            let tracks = config.validate(&manifest::manifest_root(&manifest))?;
            tracing::info!("Manifest is valid! ({} tracks)", tracks);
        }

        Commands::Info { input, base } => {
            let data = std::fs::read(&input)
                .with_context(|| format!("Failed to read track file: {:?}", input))?;
            let keyframes = decode_track(&data)
                .with_context(|| format!("Failed to decode {:?}", input))?;

            let name = track_name_from_path(&base, &input.to_string_lossy())
                .unwrap_or_else(|| "<unknown>".to_string());
            tracing::info!("Track '{}': {} keys", name, keyframes.len());
            for key in &keyframes {
                tracing::info!(
                    "  row {:>6}  {:>12}  {}",
                    key.row,
                    key.value,
                    key.interpolation_kind().name()
                );
            }
        }
    }

    Ok(())
}
