//! Track file encoding and decoding
//!
//! A track file is a [`TrackHeader`] followed by `keyframe_count` packed
//! [`Keyframe`] records. The encoder writes keyframes in the order given and
//! never sorts them.

use crate::error::TrackError;
use crate::keyframe::Keyframe;

/// Track file header (4 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct TrackHeader {
    pub keyframe_count: u32,
}

impl TrackHeader {
    pub const SIZE: usize = 4;

    pub fn new(keyframe_count: u32) -> Self {
        Self { keyframe_count }
    }

    /// Size of the whole file this header describes
    pub fn file_size(&self) -> usize {
        Self::SIZE + self.keyframe_count as usize * Keyframe::SIZE
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.keyframe_count.to_le_bytes()
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            keyframe_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        })
    }
}

/// Fixed-size records that make up a track file.
///
/// Each record keeps its type-specific `to_bytes()`/`from_bytes()`; the
/// trait exists so the decoder can walk records generically.
pub trait FixedRecord: Sized {
    /// Size of the serialized record in bytes.
    const SIZE: usize;

    /// Returns `None` if the byte slice is too short.
    fn read(bytes: &[u8]) -> Option<Self>;
}

impl FixedRecord for TrackHeader {
    const SIZE: usize = Self::SIZE;

    fn read(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

impl FixedRecord for Keyframe {
    const SIZE: usize = Self::SIZE;

    fn read(bytes: &[u8]) -> Option<Self> {
        Self::from_bytes(bytes)
    }
}

/// Encoded size of a track with `keyframe_count` keyframes
pub fn encoded_len(keyframe_count: usize) -> usize {
    TrackHeader::SIZE + keyframe_count * Keyframe::SIZE
}

/// Encode keyframes into a complete track file
///
/// `track` names the track in error messages only.
pub fn encode_track(track: &str, keyframes: &[Keyframe]) -> Result<Vec<u8>, TrackError> {
    let count = u32::try_from(keyframes.len()).map_err(|_| TrackError::Encoding {
        track: track.to_string(),
        field: "keyframe count",
        value: keyframes.len().to_string(),
        width: "u32",
    })?;

    let mut data = Vec::with_capacity(encoded_len(keyframes.len()));
    data.extend_from_slice(&TrackHeader::new(count).to_bytes());
    for key in keyframes {
        data.extend_from_slice(&key.to_bytes());
    }

    Ok(data)
}

/// Decode a complete track file back into its keyframes
///
/// The data must hold exactly the number of keyframes the header declares.
pub fn decode_track(data: &[u8]) -> Result<Vec<Keyframe>, TrackError> {
    let header = read_record::<TrackHeader>(data, 0)?;

    let expected = header.file_size();
    if data.len() != expected {
        return Err(TrackError::Decode(format!(
            "header declares {} keyframes ({} bytes), found {} bytes",
            header.keyframe_count,
            expected,
            data.len()
        )));
    }

    (0..header.keyframe_count as usize)
        .map(|i| read_record::<Keyframe>(data, TrackHeader::SIZE + i * Keyframe::SIZE))
        .collect()
}

fn read_record<T: FixedRecord>(data: &[u8], offset: usize) -> Result<T, TrackError> {
    data.get(offset..)
        .and_then(T::read)
        .ok_or_else(|| {
            TrackError::Decode(format!(
                "truncated at offset {} (need {} bytes, have {})",
                offset,
                T::SIZE,
                data.len().saturating_sub(offset)
            ))
        })
}
