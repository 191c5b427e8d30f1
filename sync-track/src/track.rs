//! Named keyframe track

use crate::error::TrackError;
use crate::format::encode_track;
use crate::keyframe::Keyframe;
use crate::path::track_path;

/// A named, ordered sequence of keyframes
///
/// The name only determines the output filename; it is not part of the
/// encoded data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Track {
    name: String,
    keyframes: Vec<Keyframe>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keyframes: Vec::new(),
        }
    }

    pub fn with_keyframes(name: impl Into<String>, keyframes: Vec<Keyframe>) -> Self {
        Self {
            name: name.into(),
            keyframes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Append a keyframe (order is kept, no sorting)
    pub fn push(&mut self, key: Keyframe) {
        self.keyframes.push(key);
    }

    /// Append a keyframe from unchecked source values
    ///
    /// Fails with [`TrackError::Encoding`] if `row` does not fit u32, if
    /// `interpolation` does not fit i8, or if a finite `value` overflows f32.
    pub fn push_raw(&mut self, row: i64, value: f64, interpolation: i64) -> Result<(), TrackError> {
        let row = u32::try_from(row).map_err(|_| self.overflow("row", row, "u32"))?;
        let interpolation = i8::try_from(interpolation)
            .map_err(|_| self.overflow("interpolation", interpolation, "i8"))?;

        let narrowed = value as f32;
        if value.is_finite() && narrowed.is_infinite() {
            return Err(self.overflow("value", value, "f32"));
        }

        self.push(Keyframe::new(row, narrowed, interpolation));
        Ok(())
    }

    fn overflow(&self, field: &'static str, value: impl ToString, width: &'static str) -> TrackError {
        TrackError::Encoding {
            track: self.name.clone(),
            field,
            value: value.to_string(),
            width,
        }
    }

    /// Relative output path of this track under `base`
    pub fn file_name(&self, base: &str) -> String {
        track_path(base, &self.name)
    }

    /// Encode into a complete track file
    pub fn encode(&self) -> Result<Vec<u8>, TrackError> {
        encode_track(&self.name, &self.keyframes)
    }
}
