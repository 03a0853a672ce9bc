//! Remap configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::FrameRate;
use crate::error::RemapError;
use crate::phoneme::{PhonemeSet, PhonemeTable, ShapeIndex, UNRESOLVED};

/// What to do with an event whose phoneme the table does not know.
/// A warning is recorded in every case.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedPolicy {
    /// Emit the sentinel shape index.
    #[default]
    Keep,
    /// Drop the event.
    Skip,
    /// Use this token's shape instead.
    Substitute(String),
}

/// An [`UnresolvedPolicy`] checked against a concrete table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    Keep,
    Skip,
    Shape(ShapeIndex),
}

impl Fallback {
    /// Shape to use for an unresolved event, if any.
    #[inline]
    pub fn shape(self) -> Option<ShapeIndex> {
        match self {
            Fallback::Keep => Some(UNRESOLVED),
            Fallback::Skip => None,
            Fallback::Shape(s) => Some(s),
        }
    }
}

impl UnresolvedPolicy {
    pub fn resolve_against(&self, table: &PhonemeTable) -> Result<Fallback, RemapError> {
        match self {
            UnresolvedPolicy::Keep => Ok(Fallback::Keep),
            UnresolvedPolicy::Skip => Ok(Fallback::Skip),
            UnresolvedPolicy::Substitute(token) => match table.lookup(token) {
                UNRESOLVED => Err(RemapError::UnknownSubstitute {
                    token: token.clone(),
                }),
                shape => Ok(Fallback::Shape(shape)),
            },
        }
    }
}

impl FromStr for UnresolvedPolicy {
    type Err = String;

    /// `keep`, `skip` or `substitute:<token>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(Self::Keep),
            "skip" => Ok(Self::Skip),
            other => match other.strip_prefix("substitute:") {
                Some(token) if !token.is_empty() => Ok(Self::Substitute(token.to_string())),
                _ => Err(format!(
                    "unknown policy '{other}' (expected keep, skip or substitute:<token>)"
                )),
            },
        }
    }
}

/// Configuration for building a remap plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Phoneme table; also fixes the mouth strip order.
    pub phoneme_set: PhonemeSet,
    /// Frame rate of the mouth strip. Falls back to the file's frame rate.
    pub target_frame_rate: Option<FrameRate>,
    pub unresolved: UnresolvedPolicy,
}
