//! Timeline compiler: phoneme events to hold keyframes on a time-remap curve.
//!
//! Model:
//! - Events are grouped by frame. Within a frame the last event wins.
//! - Each frame resolves to a shape index; `value = shape / target_fps` and
//!   `time = frame / source_fps`.
//! - A keyframe is emitted only when the shape differs from the previously
//!   emitted one, so adjacent keyframes never hold equal values.
//! - The host creates an implicit key at time 0. When no keyframe lands on
//!   frame 0 that key must be discarded (`needs_frame_zero_fixup`).

use std::borrow::Cow;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::{Fallback, UnresolvedPolicy};
use crate::data::{FrameRate, Keyframe, PhonemeEvent, UnresolvedPhoneme};
use crate::error::RemapError;
use crate::phoneme::{PhonemeTable, ShapeIndex, UNRESOLVED};

/// Output of the compiler.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledTimeline {
    pub keyframes: Vec<Keyframe>,
    #[serde(default)]
    pub warnings: Vec<UnresolvedPhoneme>,
    pub needs_frame_zero_fixup: bool,
}

impl CompiledTimeline {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}

/// Compile with unresolved tokens kept as the sentinel shape.
pub fn compile(
    events: &[PhonemeEvent],
    table: &PhonemeTable,
    source_frame_rate: FrameRate,
    target_frame_rate: FrameRate,
) -> CompiledTimeline {
    compile_with_fallback(
        events,
        table,
        source_frame_rate,
        target_frame_rate,
        Fallback::Keep,
    )
}

/// Compile applying `policy` to unresolved tokens.
///
/// Fails only when a substitute token is itself missing from `table`.
pub fn compile_with_policy(
    events: &[PhonemeEvent],
    table: &PhonemeTable,
    source_frame_rate: FrameRate,
    target_frame_rate: FrameRate,
    policy: &UnresolvedPolicy,
) -> Result<CompiledTimeline, RemapError> {
    let fallback = policy.resolve_against(table)?;
    Ok(compile_with_fallback(
        events,
        table,
        source_frame_rate,
        target_frame_rate,
        fallback,
    ))
}

/// Compile with an already-resolved fallback.
///
/// Events not in ascending frame order are stable-sorted first.
pub fn compile_with_fallback(
    events: &[PhonemeEvent],
    table: &PhonemeTable,
    source_frame_rate: FrameRate,
    target_frame_rate: FrameRate,
    fallback: Fallback,
) -> CompiledTimeline {
    let events: Cow<'_, [PhonemeEvent]> = if events.windows(2).all(|w| w[0].frame <= w[1].frame) {
        Cow::Borrowed(events)
    } else {
        let mut sorted = events.to_vec();
        sorted.sort_by_key(|e| e.frame);
        Cow::Owned(sorted)
    };

    let mut keyframes: Vec<Keyframe> = Vec::new();
    let mut warnings = Vec::new();
    let mut last_shape: Option<ShapeIndex> = None;

    for group in events.chunk_by(|a, b| a.frame == b.frame) {
        let frame = group[0].frame;
        let mut chosen: Option<ShapeIndex> = None;
        for event in group {
            match table.lookup(&event.phoneme) {
                UNRESOLVED => {
                    warn!("unresolved phoneme {:?} at frame {frame}", event.phoneme);
                    warnings.push(UnresolvedPhoneme {
                        frame,
                        phoneme: event.phoneme.clone(),
                    });
                    if let Some(shape) = fallback.shape() {
                        chosen = Some(shape);
                    }
                }
                shape => chosen = Some(shape),
            }
        }

        let Some(shape) = chosen else {
            continue;
        };
        if last_shape == Some(shape) {
            debug!("frame {frame}: shape {shape} unchanged, no key");
            continue;
        }
        keyframes.push(Keyframe {
            frame,
            time_seconds: source_frame_rate.frame_to_seconds(frame),
            shape,
            value: f64::from(shape) / target_frame_rate.get(),
        });
        last_shape = Some(shape);
    }

    let needs_frame_zero_fixup = keyframes.first().map_or(true, |k| k.frame != 0);
    if needs_frame_zero_fixup {
        debug!("no key at frame 0; initial host key must be discarded");
    }

    CompiledTimeline {
        keyframes,
        warnings,
        needs_frame_zero_fixup,
    }
}
