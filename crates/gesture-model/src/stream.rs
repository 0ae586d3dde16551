//! Recorded landmark streams.
//!
//! One frame per JSONL line. An optional first line carries the stream
//! header as a `#`-prefixed comment:
//!
//! ```text
//! # {"schema_version":"1.0","source":"simulate","frame_rate_hz":30}
//! {"t":0,"hands":[]}
//! {"t":33333333,"hands":[[{"x":0.5,"y":0.5}, ...21 points]]}
//! ```

use serde::{Deserialize, Serialize};

use crate::landmark::HandLandmarks;
use crate::pointer::TimestampNs;

pub const STREAM_SCHEMA_VERSION: &str = "1.0";

/// Metadata describing where a stream came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamHeader {
    pub schema_version: String,

    /// Free-form producer name (tracker model, "simulate", ...).
    pub source: String,

    /// Nominal capture rate of the frames.
    pub frame_rate_hz: u32,
}

impl StreamHeader {
    pub fn new(source: impl Into<String>, frame_rate_hz: u32) -> Self {
        Self {
            schema_version: STREAM_SCHEMA_VERSION.to_string(),
            source: source.into(),
            frame_rate_hz,
        }
    }
}

/// Hand observations reported for one camera frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// Detected hands in tracker order. Empty when no hand was seen.
    #[serde(default)]
    pub hands: Vec<HandLandmarks>,
}

impl LandmarkFrame {
    pub fn empty(timestamp_ns: TimestampNs) -> Self {
        Self {
            timestamp_ns,
            hands: Vec::new(),
        }
    }

    pub fn with_hand(timestamp_ns: TimestampNs, hand: HandLandmarks) -> Self {
        Self {
            timestamp_ns,
            hands: vec![hand],
        }
    }

    /// The hand that drives the pointer. Additional hands are ignored.
    pub fn primary_hand(&self) -> Option<&HandLandmarks> {
        self.hands.first()
    }
}

/// A line of a landmark stream that could not be parsed.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct StreamParseError {
    /// 1-based line number in the input.
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parse the `#` header line, if the stream has one.
pub fn parse_header(jsonl: &str) -> Option<StreamHeader> {
    let first = jsonl.lines().map(str::trim).find(|l| !l.is_empty())?;
    let body = first.strip_prefix('#')?;
    serde_json::from_str(body.trim()).ok()
}

/// Parse a single frame line. `line` is only used for error reporting.
pub fn parse_frame_line(content: &str, line: usize) -> Result<LandmarkFrame, StreamParseError> {
    serde_json::from_str(content).map_err(|source| StreamParseError { line, source })
}

/// Whether a raw line carries a frame (not blank, not a comment).
pub fn is_frame_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Parse frames from JSONL content, skipping blank and comment lines.
pub fn parse_frames(jsonl: &str) -> Result<Vec<LandmarkFrame>, StreamParseError> {
    jsonl
        .lines()
        .enumerate()
        .filter(|(_, line)| is_frame_line(line))
        .map(|(idx, line)| parse_frame_line(line.trim(), idx + 1))
        .collect()
}

/// Serialize a header and frames to JSONL.
pub fn serialize_frames(
    header: &StreamHeader,
    frames: &[LandmarkFrame],
) -> Result<String, serde_json::Error> {
    let mut output = format!("# {}\n", serde_json::to_string(header)?);
    for frame in frames {
        output.push_str(&serde_json::to_string(frame)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::NormalizedPoint;

    fn hand(index_x: f64) -> HandLandmarks {
        HandLandmarks::from_tips(
            NormalizedPoint::new(0.5, 0.9),
            NormalizedPoint::new(index_x - 0.1, 0.5),
            NormalizedPoint::new(index_x, 0.5),
        )
    }

    #[test]
    fn test_stream_parses_header_and_frames() {
        let frames = vec![
            LandmarkFrame::empty(0),
            LandmarkFrame::with_hand(33_000_000, hand(0.4)),
        ];
        let jsonl = serialize_frames(&StreamHeader::new("test", 30), &frames).unwrap();

        assert!(jsonl.starts_with("# "));
        let header = parse_header(&jsonl).unwrap();
        assert_eq!(header.schema_version, STREAM_SCHEMA_VERSION);
        assert_eq!(header.frame_rate_hz, 30);

        let parsed = parse_frames(&jsonl).unwrap();
        assert_eq!(parsed, frames);
        assert!(parsed[0].primary_hand().is_none());
        assert_eq!(parsed[1].primary_hand().unwrap().index_tip().x, 0.4);
    }

    #[test]
    fn test_missing_hands_field_means_no_hand() {
        let parsed = parse_frames("{\"t\":5}\n").unwrap();
        assert_eq!(parsed, vec![LandmarkFrame::empty(5)]);
    }

    #[test]
    fn test_header_is_optional() {
        assert!(parse_header("{\"t\":0,\"hands\":[]}").is_none());
    }

    #[test]
    fn test_bad_landmark_count_reports_line() {
        let jsonl = "# {}\n{\"t\":0,\"hands\":[]}\n\n{\"t\":1,\"hands\":[[{\"x\":0.1,\"y\":0.1}]]}\n";
        let err = parse_frames(jsonl).unwrap_err();
        assert_eq!(err.line, 4);
        assert!(err.to_string().contains("expected 21 hand landmarks"));
    }

    #[test]
    fn test_primary_hand_is_first() {
        let frame = LandmarkFrame {
            timestamp_ns: 0,
            hands: vec![hand(0.2), hand(0.8)],
        };
        assert_eq!(frame.primary_hand().unwrap().index_tip().x, 0.2);
    }
}
