//! Sync-track: binary keyframe track format for Rocket sync data
//!
//! This crate owns the on-disk representation of a single sync track, as
//! produced at build time from Rocket XML and read back by the playback side.
//! It knows nothing about XML or the filesystem beyond the names it derives.
//!
//! # Track File Layout
//!
//! POD format - no magic bytes, no version, no padding.
//!
//! ```text
//! 0x00:          keyframe_count u32 LE
//! 0x04 + 9*i:    row            u32 LE
//! 0x08 + 9*i:    value          f32 LE
//! 0x0C + 9*i:    interpolation  i8
//! ```
//!
//! # Usage
//!
//! ```
//! use sync_track::{track_path, Keyframe, Track};
//!
//! let mut track = Track::new("camera:fov");
//! track.push(Keyframe::new(0, 60.0, 1));
//! track.push(Keyframe::new(128, 45.0, 0));
//!
//! let bytes = track.encode().unwrap();
//! assert_eq!(bytes.len(), 4 + 9 * 2);
//! assert_eq!(track_path("sync", track.name()), "sync_camera-3Afov.track");
//! ```

mod error;
mod format;
mod keyframe;
mod path;
mod track;

pub use error::TrackError;
pub use format::{FixedRecord, TrackHeader, decode_track, encode_track, encoded_len};
pub use keyframe::{Interpolation, Keyframe};
pub use path::{escape_track_name, track_name_from_path, track_path, unescape_track_name};
pub use track::Track;

// =============================================================================
// Constants
// =============================================================================

/// File extension of encoded track files (without the dot)
pub const TRACK_EXT: &str = "track";

/// Filename prefix for tracks exported into a build/staging directory
pub const DUMP_BASE: &str = "sync";

/// Filename prefix for tracks installed into a data directory
pub const INSTALL_BASE: &str = "data/sync";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(TRACK_EXT, "track");
        assert!(INSTALL_BASE.ends_with(DUMP_BASE));
    }
}
