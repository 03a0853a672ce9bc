//! Papagayo Remap Core (engine-agnostic)
//!
//! Turns a Papagayo `.pgo` lip-sync file into hold keyframes for a
//! time-remapped mouth layer:
//! raw text -> [`pgo::parse_events`] -> [`timeline::compile`] -> [`Keyframe`]s.
//! Host mutation stays behind [`host::TimeRemapTarget`].

pub mod baking;
pub mod config;
pub mod data;
pub mod error;
pub mod host;
pub mod pgo;
pub mod phoneme;
pub mod plan;
pub mod sampling;
pub mod timeline;

// Re-exports for consumers (adapters)
pub use baking::{bake_frames, BakedShapes};
pub use config::{Config, Fallback, UnresolvedPolicy};
pub use data::{FileHeader, FrameRate, Keyframe, PhonemeEvent, UnresolvedPhoneme};
pub use error::RemapError;
pub use host::{apply_plan, TimeRemapTarget};
pub use pgo::{parse_document, parse_events, parse_frame_line, parse_header, PgoDocument};
pub use phoneme::{PhonemeSet, PhonemeTable, ShapeIndex, UNRESOLVED};
pub use plan::{build_plan, build_plan_with_table, export_plan_json, load_plan, RemapPlan};
pub use sampling::{sample_at, sample_frame};
pub use timeline::{compile, compile_with_fallback, compile_with_policy, CompiledTimeline};
