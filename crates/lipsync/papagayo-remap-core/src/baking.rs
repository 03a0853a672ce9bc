//! Baking API: expand a compiled plan into one shape index per source frame.

use serde::{Deserialize, Serialize};

use crate::data::FrameRate;
use crate::phoneme::{ShapeIndex, UNRESOLVED};
use crate::plan::RemapPlan;
use crate::sampling::sample_frame;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedShapes {
    pub frame_rate: FrameRate,
    /// Shape index for each frame in `0..total_frames`.
    pub shapes: Vec<ShapeIndex>,
}

/// Bake the hold curve of `plan` at every source frame.
///
/// Frames are sampled by frame number, so no float rounding is involved.
/// An empty plan bakes to all [`UNRESOLVED`].
pub fn bake_frames(plan: &RemapPlan) -> BakedShapes {
    let keys = &plan.timeline.keyframes;
    let shapes = (0..plan.total_frames)
        .map(|f| sample_frame(keys, f).map_or(UNRESOLVED, |k| k.shape))
        .collect();
    BakedShapes {
        frame_rate: plan.source_frame_rate,
        shapes,
    }
}

/// Export baked shapes as serde_json::Value.
pub fn export_baked_json(baked: &BakedShapes) -> serde_json::Value {
    serde_json::to_value(baked).unwrap_or(serde_json::Value::Null)
}
