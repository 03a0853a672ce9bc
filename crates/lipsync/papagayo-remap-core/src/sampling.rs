//! Hold (step) sampling of compiled keyframes.
//!
//! The curve holds each key's value until the next key. Before the first key
//! the first key's value is held, matching how a host extrapolates a curve
//! whose leading key was removed.

use crate::data::Keyframe;

/// Active keyframe at `time_seconds` (hold left). `None` when `keys` is empty.
///
/// `keys` must be sorted by time, as produced by the compiler.
pub fn sample_at(keys: &[Keyframe], time_seconds: f64) -> Option<&Keyframe> {
    let idx = keys.partition_point(|k| k.time_seconds <= time_seconds);
    if idx == 0 {
        keys.first()
    } else {
        keys.get(idx - 1)
    }
}

/// Active keyframe at a source frame number.
pub fn sample_frame(keys: &[Keyframe], frame: u32) -> Option<&Keyframe> {
    let idx = keys.partition_point(|k| k.frame <= frame);
    if idx == 0 {
        keys.first()
    } else {
        keys.get(idx - 1)
    }
}
