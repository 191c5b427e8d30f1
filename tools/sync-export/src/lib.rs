//! sync-export library
//!
//! Provides Rocket track conversion for build scripts and the `sync-export` binary.

pub mod export;
pub mod manifest;
pub mod rocket;

pub use export::{export_file, export_files, export_tracks, touch, ExportOptions, ExportedTrack};
pub use manifest::{build_all, SyncManifest};
pub use rocket::{load_rocket, parse_rocket};

// Re-export the track format
pub use sync_track::{Keyframe, Track, TrackError};
