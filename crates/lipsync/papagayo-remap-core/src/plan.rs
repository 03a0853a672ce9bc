//! Remap plan: everything a host adapter needs to build the lip-sync layer.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::data::FrameRate;
use crate::error::RemapError;
use crate::pgo::parse_document;
use crate::phoneme::PhonemeTable;
use crate::timeline::{compile_with_policy, CompiledTimeline};

const DEFAULT_PLAN_NAME: &str = "lipsync";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemapPlan {
    /// Name for the container timeline, usually the file name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_path: Option<String>,
    /// Rate the frame numbers in the file are expressed against.
    pub source_frame_rate: FrameRate,
    /// Rate of the mouth strip the keyframe values index into.
    pub target_frame_rate: FrameRate,
    pub total_frames: u32,
    pub duration_seconds: f64,
    /// Phoneme tokens in strip order.
    pub strip: Vec<String>,
    #[serde(flatten)]
    pub timeline: CompiledTimeline,
}

/// Parse and compile raw `.pgo` text.
///
/// Header problems fail the whole plan; bad phoneme lines and unknown tokens
/// do not.
pub fn build_plan(name: &str, raw: &str, config: &Config) -> Result<RemapPlan, RemapError> {
    let table = config.phoneme_set.build()?;
    build_plan_with_table(name, raw, config, &table)
}

/// Like [`build_plan`], reusing a table already built from `config.phoneme_set`.
pub fn build_plan_with_table(
    name: &str,
    raw: &str,
    config: &Config,
    table: &PhonemeTable,
) -> Result<RemapPlan, RemapError> {
    let doc = parse_document(raw)?;
    let source_frame_rate = doc.header.frame_rate;
    let target_frame_rate = config.target_frame_rate.unwrap_or(source_frame_rate);

    let timeline = compile_with_policy(
        &doc.events,
        table,
        source_frame_rate,
        target_frame_rate,
        &config.unresolved,
    )?;
    info!(
        "{name}: {} events -> {} keyframes ({} unresolved)",
        doc.events.len(),
        timeline.keyframes.len(),
        timeline.warnings.len()
    );

    Ok(RemapPlan {
        name: name.to_string(),
        sound_path: doc.header.sound_path.clone(),
        source_frame_rate,
        target_frame_rate,
        total_frames: doc.header.total_frames,
        duration_seconds: doc.header.duration_seconds(),
        strip: table.tokens().to_vec(),
        timeline,
    })
}

/// Read `path` once and build its plan. The plan is named after the file stem.
pub fn load_plan(path: impl AsRef<Path>, config: &Config) -> Result<RemapPlan, RemapError> {
    let path = path.as_ref();
    let raw = read_pgo(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(DEFAULT_PLAN_NAME);
    build_plan(name, &raw, config)
}

fn read_pgo(path: &Path) -> Result<String, RemapError> {
    let with_path = |e: std::io::Error| RemapError::IoError {
        reason: format!("{}: {e}", path.display()),
    };
    let mut file = File::open(path).map_err(with_path)?;
    let mut raw = String::new();
    file.read_to_string(&mut raw).map_err(with_path)?;
    Ok(raw)
}

/// Export a plan as serde_json::Value (stable schema for FFI/serialization).
pub fn export_plan_json(plan: &RemapPlan) -> serde_json::Value {
    serde_json::to_value(plan).unwrap_or(serde_json::Value::Null)
}
