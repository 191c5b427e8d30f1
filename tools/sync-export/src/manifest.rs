//! sync.toml manifest parsing
//!
//! A manifest lists the Rocket files of a project and where their tracks go,
//! so a build system can run a single `sync-export build`.
//!
//! ```toml
//! [output]
//! dir = "build/sync"
//! base = "sync"
//! timestamp = "build/sync.stamp"
//!
//! [[inputs]]
//! path = "tracks/intro.rocket"
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use sync_track::DUMP_BASE;

use crate::export::{export_files, ExportOptions, ExportedTrack};
use crate::rocket::load_rocket;

/// sync.toml manifest structure
#[derive(Debug, Deserialize)]
pub struct SyncManifest {
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub inputs: Vec<InputEntry>,
}

/// Output configuration section
#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Output directory.
    /// Default: the manifest's directory
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Track filename prefix.
    /// Default: "sync"
    #[serde(default = "default_base")]
    pub base: String,

    /// Marker file touched after a successful build
    #[serde(default)]
    pub timestamp: Option<PathBuf>,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_base() -> String {
    DUMP_BASE.to_string()
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            base: default_base(),
            timestamp: None,
        }
    }
}

/// Single Rocket input
#[derive(Debug, Deserialize)]
pub struct InputEntry {
    pub path: PathBuf,
}

impl SyncManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid manifest: {}", path.display()))
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse sync.toml")
    }

    /// Input paths, resolved against `root`
    pub fn input_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.inputs.iter().map(|i| root.join(&i.path)).collect()
    }

    /// Export options, with paths resolved against `root`
    ///
    /// `outdir` overrides the manifest's output directory.
    pub fn export_options(&self, root: &Path, outdir: Option<&Path>) -> ExportOptions {
        let dir = match outdir {
            Some(dir) => dir.to_path_buf(),
            None => root.join(&self.output.dir),
        };
        ExportOptions::dump(dir)
            .with_base(self.output.base.clone())
            .with_timestamp(self.output.timestamp.as_ref().map(|t| root.join(t)))
    }

    /// Reject manifests that cannot produce any track file
    pub fn check_settings(&self) -> Result<()> {
        if self.inputs.is_empty() {
            anyhow::bail!("Manifest lists no inputs");
        }
        if self.output.base.is_empty() {
            anyhow::bail!("Output base must not be empty");
        }
        Ok(())
    }

    /// Check the manifest and parse every input without writing anything
    ///
    /// Returns the total number of tracks found.
    pub fn validate(&self, root: &Path) -> Result<usize> {
        self.check_settings()?;

        let mut total = 0;
        for input in self.input_paths(root) {
            let tracks = load_rocket(&input)?;
            for track in &tracks {
                track.encode()?;
            }
            tracing::info!("{:?}: {} tracks", input, tracks.len());
            total += tracks.len();
        }
        Ok(total)
    }
}

/// Directory manifest-relative paths resolve against
pub fn manifest_root(manifest: &Path) -> PathBuf {
    manifest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load a manifest and export every input it lists
pub fn build_all(manifest: &Path, outdir: Option<&Path>) -> Result<Vec<ExportedTrack>> {
    let config = SyncManifest::load(manifest)?;
    config
        .check_settings()
        .with_context(|| format!("Invalid manifest: {}", manifest.display()))?;
    let root = manifest_root(manifest);
    let options = config.export_options(&root, outdir);
    export_files(&config.input_paths(&root), &options)
}
