//! Track export (Rocket XML -> .track files)
//!
//! One file is written per track, named `<base>_<escaped name>.track` and
//! placed under the configured output directory. Each track is fully encoded
//! in memory before its file is created, so an encoding error never leaves a
//! half-written track behind.

use anyhow::{Context, Result};
use hashbrown::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use sync_track::{Track, TrackError, DUMP_BASE, INSTALL_BASE};

use crate::rocket::load_rocket;

/// Where and how tracks are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Directory the relative track paths are joined onto
    pub outdir: PathBuf,
    /// Filename prefix (may contain directories, e.g. `data/sync`)
    pub base: String,
    /// Marker file touched after every input was processed
    pub timestamp: Option<PathBuf>,
}

impl ExportOptions {
    /// Export into a staging directory (`sync_*.track`)
    pub fn dump(outdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: outdir.into(),
            base: DUMP_BASE.to_string(),
            timestamp: None,
        }
    }

    /// Export into an installation root (`data/sync_*.track`)
    pub fn install(destdir: impl Into<PathBuf>) -> Self {
        Self {
            outdir: destdir.into(),
            base: INSTALL_BASE.to_string(),
            timestamp: None,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<PathBuf>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Full output path for a track
    pub fn track_output(&self, track: &Track) -> PathBuf {
        self.outdir.join(track.file_name(&self.base))
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::dump(".")
    }
}

/// A track file that was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedTrack {
    pub name: String,
    pub path: PathBuf,
    pub keyframe_count: usize,
}

/// Write every track to its own file
pub fn export_tracks(tracks: &[Track], options: &ExportOptions) -> Result<Vec<ExportedTrack>, TrackError> {
    let mut seen = HashSet::with_capacity(tracks.len());
    let mut exported = Vec::with_capacity(tracks.len());

    for track in tracks {
        let data = track.encode()?;
        let path = options.track_output(track);

        if !seen.insert(path.clone()) {
            tracing::warn!(
                "Track '{}' overwrites an earlier track with the same file {:?}",
                track.name(),
                path
            );
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| TrackError::filesystem("create directory", parent, e))?;
        }
        std::fs::write(&path, &data).map_err(|e| TrackError::filesystem("write", &path, e))?;

        tracing::debug!(
            "Wrote track '{}' -> {:?} ({} keys, {} bytes)",
            track.name(),
            path,
            track.len(),
            data.len()
        );

        exported.push(ExportedTrack {
            name: track.name().to_string(),
            path,
            keyframe_count: track.len(),
        });
    }

    Ok(exported)
}

/// Convert one Rocket XML file
///
/// Does not touch the marker file; see [`export_files`].
pub fn export_file(input: &Path, options: &ExportOptions) -> Result<Vec<ExportedTrack>> {
    let tracks = load_rocket(input).inspect_err(|e| {
        if e.is_input_error() {
            tracing::error!("{:?} is not a usable Rocket file", input);
        } else {
            tracing::error!("Could not read {:?}", input);
        }
    })?;
    let exported = export_tracks(&tracks, options)
        .with_context(|| format!("Failed to export tracks from {:?}", input))?;

    tracing::info!("Exported {} tracks from {:?}", exported.len(), input);
    Ok(exported)
}

/// Convert Rocket XML files one after another, then touch the marker file
///
/// The first failing input aborts the run and the marker is left alone.
pub fn export_files(inputs: &[PathBuf], options: &ExportOptions) -> Result<Vec<ExportedTrack>> {
    let mut exported = Vec::new();
    for input in inputs {
        exported.extend(export_file(input, options)?);
    }

    if let Some(timestamp) = &options.timestamp {
        touch(timestamp)?;
        tracing::debug!("Touched {:?}", timestamp);
    }

    Ok(exported)
}

/// Create `path`, or truncate it and bump its modification time
pub fn touch(path: &Path) -> Result<(), TrackError> {
    File::create(path).map_err(|e| TrackError::filesystem("touch", path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sync_track::{decode_track, Keyframe};
    use tempfile::tempdir;

    fn sample_tracks() -> Vec<Track> {
        vec![
            Track::with_keyframes(
                "vol",
                vec![Keyframe::new(0, 0.0, 0), Keyframe::new(10, 1.0, 1)],
            ),
            Track::new("my track"),
        ]
    }

    #[test]
    fn test_options() {
        let dump = ExportOptions::default();
        assert_eq!(dump.outdir, PathBuf::from("."));
        assert_eq!(dump.base, "sync");

        let install = ExportOptions::install("/stage");
        assert_eq!(
            install.track_output(&Track::new("vol")),
            PathBuf::from("/stage/data/sync_vol.track")
        );
    }

    #[test]
    fn test_export_tracks_writes_one_file_each() {
        let dir = tempdir().expect("Failed to create temp dir");
        let options = ExportOptions::dump(dir.path());

        let exported = export_tracks(&sample_tracks(), &options).unwrap();
        assert_eq!(exported.len(), 2);

        let vol = std::fs::read(dir.path().join("sync_vol.track")).unwrap();
        assert_eq!(vol.len(), 22);
        assert_eq!(decode_track(&vol).unwrap(), sample_tracks()[0].keyframes());

        let empty = std::fs::read(dir.path().join("sync_my-20track.track")).unwrap();
        assert_eq!(empty, [0, 0, 0, 0]);
    }

    #[test]
    fn test_install_creates_data_dir() {
        let dir = tempdir().expect("Failed to create temp dir");
        let options = ExportOptions::install(dir.path());

        export_tracks(&sample_tracks(), &options).unwrap();
        assert!(dir.path().join("data/sync_vol.track").is_file());
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let dir = tempdir().expect("Failed to create temp dir");
        let tracks = vec![
            Track::with_keyframes("dup", vec![Keyframe::new(0, 1.0, 0)]),
            Track::new("dup"),
        ];

        let exported = export_tracks(&tracks, &ExportOptions::dump(dir.path())).unwrap();
        assert_eq!(exported.len(), 2);
        let data = std::fs::read(dir.path().join("sync_dup.track")).unwrap();
        assert_eq!(data, [0, 0, 0, 0]);
    }

    #[test]
    fn test_outdir_is_a_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"").unwrap();

        let err = export_tracks(&sample_tracks(), &ExportOptions::dump(&blocker)).unwrap_err();
        assert!(matches!(
            err,
            TrackError::Filesystem { action: "create directory", ref path, .. } if *path == blocker
        ));
    }

    #[test]
    fn test_output_file_not_writable() {
        let dir = tempdir().expect("Failed to create temp dir");
        // A directory squatting on the track's file name
        std::fs::create_dir(dir.path().join("sync_vol.track")).unwrap();

        let err = export_tracks(&sample_tracks(), &ExportOptions::dump(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            TrackError::Filesystem { action: "write", ref path, .. } if path.ends_with("sync_vol.track")
        ));
    }

    #[test]
    fn test_touch_creates_and_truncates() {
        let dir = tempdir().expect("Failed to create temp dir");
        let marker = dir.path().join("tracks.stamp");

        touch(&marker).unwrap();
        assert!(marker.is_file());

        std::fs::write(&marker, b"old").unwrap();
        touch(&marker).unwrap();
        assert_eq!(std::fs::metadata(&marker).unwrap().len(), 0);
    }

    #[test]
    fn test_touch_missing_directory() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = touch(&dir.path().join("missing/stamp")).unwrap_err();
        assert!(matches!(err, TrackError::Filesystem { action: "touch", .. }));
    }

    #[test]
    fn test_failed_input_skips_marker() {
        let dir = tempdir().expect("Failed to create temp dir");
        let bad = dir.path().join("bad.rocket");
        std::fs::write(&bad, "<rocket><tracks>").unwrap();
        let marker = dir.path().join("stamp");

        let options = ExportOptions::dump(dir.path()).with_timestamp(Some(marker.clone()));
        let err = export_files(&[bad], &options).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TrackError>(),
            Some(TrackError::InputParse { .. })
        ));
        assert!(!marker.exists());
    }
}
