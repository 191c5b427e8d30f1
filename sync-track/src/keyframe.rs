//! Keyframe record (9 bytes on disk)

/// A single (row, value, interpolation) sample point within a track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Row (time-step) index
    pub row: u32,
    /// Value at this row
    pub value: f32,
    /// Interpolation code towards the next keyframe, opaque to the encoder
    pub interpolation: i8,
}

impl Keyframe {
    pub const SIZE: usize = 9;

    pub fn new(row: u32, value: f32, interpolation: i8) -> Self {
        Self {
            row,
            value,
            interpolation,
        }
    }

    /// Named view of the interpolation code
    pub fn interpolation_kind(&self) -> Interpolation {
        Interpolation::from_code(self.interpolation)
    }

    /// Write keyframe to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.row.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.value.to_le_bytes());
        bytes[8] = self.interpolation as u8;
        bytes
    }

    /// Read keyframe from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            row: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            value: f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            interpolation: bytes[8] as i8,
        })
    }
}

/// Interpolation modes understood by the Rocket player
///
/// Codes outside the known range are carried through as [`Interpolation::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Hold the value until the next key
    Step,
    Linear,
    /// Smoothstep between keys
    Smooth,
    /// Quadratic ease-in
    Ramp,
    Other(i8),
}

impl Interpolation {
    pub fn from_code(code: i8) -> Self {
        match code {
            0 => Self::Step,
            1 => Self::Linear,
            2 => Self::Smooth,
            3 => Self::Ramp,
            other => Self::Other(other),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::Linear => "linear",
            Self::Smooth => "smooth",
            Self::Ramp => "ramp",
            Self::Other(_) => "other",
        }
    }
}
