//! Host adapter seam.
//!
//! Adapters own the host's layer object model; the core only tells them which
//! hold keys to set. Enabling time remap on a host layer is assumed to leave
//! exactly one implicit key at time 0.

use log::debug;

use crate::plan::RemapPlan;

/// A time-remap curve on some host layer.
pub trait TimeRemapTarget {
    type Error;

    /// Add (or overwrite) a key at `time_seconds` with hold interpolation.
    fn set_hold_key(&mut self, time_seconds: f64, value: f64) -> Result<(), Self::Error>;

    /// Remove the implicit key the host created at time 0.
    fn remove_initial_key(&mut self) -> Result<(), Self::Error>;
}

/// Apply every keyframe of `plan`, then drop the implicit initial key if no
/// keyframe overwrote it. Returns the number of keys set.
pub fn apply_plan<T: TimeRemapTarget>(plan: &RemapPlan, target: &mut T) -> Result<usize, T::Error> {
    for key in &plan.timeline.keyframes {
        target.set_hold_key(key.time_seconds, key.value)?;
    }
    if plan.timeline.needs_frame_zero_fixup {
        debug!("{}: removing implicit initial key", plan.name);
        target.remove_initial_key()?;
    }
    Ok(plan.timeline.keyframes.len())
}
