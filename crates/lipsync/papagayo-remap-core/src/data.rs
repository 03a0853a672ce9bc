//! Value types passed between the parser, compiler and host adapters.

use serde::{Deserialize, Serialize};

use crate::error::RemapError;
use crate::phoneme::ShapeIndex;

/// Frames per second, guaranteed finite and positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FrameRate(f64);

impl FrameRate {
    pub fn new(fps: f64) -> Result<Self, RemapError> {
        if fps.is_finite() && fps > 0.0 {
            Ok(Self(fps))
        } else {
            Err(RemapError::InvalidFrameRate { rate: fps })
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Seconds at which `frame` starts on a timeline running at this rate.
    #[inline]
    pub fn frame_to_seconds(self, frame: u32) -> f64 {
        f64::from(frame) / self.0
    }
}

impl TryFrom<f64> for FrameRate {
    type Error = RemapError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FrameRate> for f64 {
    fn from(rate: FrameRate) -> Self {
        rate.0
    }
}

/// One annotated frame from a phoneme frame line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhonemeEvent {
    pub frame: u32,
    pub phoneme: String,
}

impl PhonemeEvent {
    pub fn new(frame: u32, phoneme: impl Into<String>) -> Self {
        Self {
            frame,
            phoneme: phoneme.into(),
        }
    }
}

/// Fixed-position header facts of a `.pgo` file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    /// Audio file referenced on line index 1, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_path: Option<String>,
    pub frame_rate: FrameRate,
    pub total_frames: u32,
}

impl FileHeader {
    pub fn duration_seconds(&self) -> f64 {
        self.frame_rate.frame_to_seconds(self.total_frames)
    }
}

/// A hold keyframe on the time-remap curve.
///
/// `value` is `shape / target_frame_rate`, a time offset into the mouth strip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Source frame the key was produced from.
    pub frame: u32,
    pub time_seconds: f64,
    pub shape: ShapeIndex,
    pub value: f64,
}

/// A phoneme token that the table could not resolve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedPhoneme {
    pub frame: u32,
    pub phoneme: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_rate_rejects_bad_values() {
        assert!(FrameRate::new(0.0).is_err());
        assert!(FrameRate::new(-24.0).is_err());
        assert!(FrameRate::new(f64::NAN).is_err());
        assert!(FrameRate::new(f64::INFINITY).is_err());
        assert_eq!(FrameRate::new(29.97).unwrap().get(), 29.97);
    }

    #[test]
    fn frame_rate_deserialize_validates() {
        assert!(serde_json::from_str::<FrameRate>("0").is_err());
        let fps: FrameRate = serde_json::from_str("30").unwrap();
        assert_eq!(fps.frame_to_seconds(15), 0.5);
    }

    #[test]
    fn header_duration() {
        let header = FileHeader {
            sound_path: None,
            frame_rate: FrameRate::new(24.0).unwrap(),
            total_frames: 96,
        };
        assert_eq!(header.duration_seconds(), 4.0);
    }
}
