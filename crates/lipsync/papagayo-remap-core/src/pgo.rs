//! Papagayo (`.pgo`) text format parser.
//!
//! Layout of the parts this crate reads:
//! - line index 1: sound file path
//! - line index 2: frame rate
//! - line index 3: total frame count
//! - phoneme frame lines: exactly four leading tabs, then `<frame> <phoneme>`
//!
//! Voice, phrase and word lines sit at fewer tabs and are ignored.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::data::{FileHeader, FrameRate, PhonemeEvent};
use crate::error::RemapError;

const FRAME_LINE_PREFIX: &str = "\t\t\t\t";

const SOUND_PATH_LINE: usize = 1;
const FRAME_RATE_LINE: usize = 2;
const TOTAL_FRAMES_LINE: usize = 3;

/// Header plus ordered phoneme events of one file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PgoDocument {
    pub header: FileHeader,
    pub events: Vec<PhonemeEvent>,
}

/// Parse header and events. Fails only on a missing or invalid header.
pub fn parse_document(raw: &str) -> Result<PgoDocument, RemapError> {
    let header = parse_header(raw)?;
    let events = parse_events(raw);
    Ok(PgoDocument { header, events })
}

/// Read the fixed-position header lines.
pub fn parse_header(raw: &str) -> Result<FileHeader, RemapError> {
    let lines: Vec<&str> = raw.split('\n').take(TOTAL_FRAMES_LINE + 1).collect();

    let sound_path = lines
        .get(SOUND_PATH_LINE)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    let fps_raw = header_line(&lines, FRAME_RATE_LINE, "frame rate")?;
    let frame_rate = fps_raw
        .parse::<f64>()
        .ok()
        .and_then(|fps| FrameRate::new(fps).ok())
        .ok_or_else(|| RemapError::InvalidHeader {
            field: "frame rate".into(),
            line: FRAME_RATE_LINE,
            raw: fps_raw.to_string(),
        })?;

    let frames_raw = header_line(&lines, TOTAL_FRAMES_LINE, "total frames")?;
    let total_frames = frames_raw
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| RemapError::InvalidHeader {
            field: "total frames".into(),
            line: TOTAL_FRAMES_LINE,
            raw: frames_raw.to_string(),
        })?;

    Ok(FileHeader {
        sound_path,
        frame_rate,
        total_frames,
    })
}

fn header_line<'a>(lines: &[&'a str], line: usize, field: &str) -> Result<&'a str, RemapError> {
    match lines.get(line).map(|l| l.trim()) {
        Some(l) if !l.is_empty() => Ok(l),
        _ => Err(RemapError::MissingHeader {
            field: field.into(),
            line,
        }),
    }
}

/// Parse one line as a phoneme frame line.
///
/// Returns `None` for anything that is not exactly four tabs followed by
/// `<frame> <phoneme>` with a non-negative integer frame.
pub fn parse_frame_line(line: &str) -> Option<PhonemeEvent> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let content = line.strip_prefix(FRAME_LINE_PREFIX)?;
    if content.is_empty() || content.starts_with('\t') || content.contains(FRAME_LINE_PREFIX) {
        return None;
    }

    let mut parts = content.split(' ');
    let (frame, phoneme) = match (parts.next(), parts.next(), parts.next()) {
        (Some(frame), Some(phoneme), None) => (frame, phoneme),
        _ => {
            trace!("frame line without exactly two fields: {content:?}");
            return None;
        }
    };
    let frame = match frame.parse::<u32>() {
        Ok(f) => f,
        Err(_) => {
            trace!("frame line with unparseable frame number: {content:?}");
            return None;
        }
    };
    Some(PhonemeEvent::new(frame, phoneme))
}

/// Collect every phoneme frame line, stable-sorted by frame.
///
/// Duplicate frames are kept in file order.
pub fn parse_events(raw: &str) -> Vec<PhonemeEvent> {
    let mut events: Vec<PhonemeEvent> = raw.split('\n').filter_map(parse_frame_line).collect();
    // Papagayo sometimes writes frames out of order.
    events.sort_by_key(|e| e.frame);
    debug!("parsed {} phoneme events", events.len());
    events
}
