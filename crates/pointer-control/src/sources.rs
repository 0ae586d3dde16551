//! Landmark source implementations.
//!
//! Hand detection runs outside this crate. Sources hand the controller
//! whatever the detector produced, one frame at a time.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pinchpoint_common::error::{PinchpointError, PinchpointResult};
use pinchpoint_gesture_model::stream::{is_frame_line, parse_frame_line, StreamHeader};
use pinchpoint_gesture_model::{parse_frames, LandmarkFrame};

use crate::LandmarkSource;

/// Replays a recorded JSONL landmark stream from disk, line by line.
pub struct ReplaySource {
    reader: BufReader<File>,
    name: String,
    header: Option<StreamHeader>,
    /// First line, when it turned out not to be a header.
    pending: Option<String>,
    line_no: usize,
    exhausted: bool,
}

impl ReplaySource {
    pub fn open(path: &Path) -> PinchpointResult<Self> {
        if !path.exists() {
            return Err(PinchpointError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut reader = BufReader::new(File::open(path)?);

        let mut first = String::new();
        reader.read_line(&mut first)?;
        let (header, pending) = match first.trim().strip_prefix('#') {
            Some(body) => (serde_json::from_str(body.trim()).ok(), None),
            None => (None, Some(first)),
        };
        if header.is_none() && pending.is_none() {
            tracing::debug!(path = %path.display(), "Stream comment line is not a header");
        }

        let name = format!(
            "replay:{}",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        );

        Ok(Self {
            reader,
            name,
            header,
            pending,
            line_no: 1,
            exhausted: false,
        })
    }

    /// Stream header, if the file has one.
    pub fn header(&self) -> Option<&StreamHeader> {
        self.header.as_ref()
    }

    fn next_line(&mut self) -> PinchpointResult<Option<(usize, String)>> {
        if let Some(first) = self.pending.take() {
            return Ok(Some((1, first)));
        }
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(|e| {
            self.exhausted = true;
            PinchpointError::source(format!("Failed reading {}: {e}", self.name))
        })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some((self.line_no, line)))
    }
}

impl LandmarkSource for ReplaySource {
    fn next_frame(&mut self) -> PinchpointResult<Option<LandmarkFrame>> {
        while !self.exhausted {
            let Some((line_no, line)) = self.next_line()? else {
                self.exhausted = true;
                break;
            };
            if !is_frame_line(&line) {
                continue;
            }
            return parse_frame_line(line.trim(), line_no)
                .map(Some)
                .map_err(|e| PinchpointError::stream(e.line, e.source.to_string()));
        }
        Ok(None)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory frames, for tests and generated sessions.
pub struct ScriptedSource {
    frames: VecDeque<LandmarkFrame>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<LandmarkFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// A source that never produces frames.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse a whole JSONL stream up front.
    pub fn from_jsonl(jsonl: &str) -> PinchpointResult<Self> {
        let frames =
            parse_frames(jsonl).map_err(|e| PinchpointError::stream(e.line, e.source.to_string()))?;
        Ok(Self::new(frames))
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for ScriptedSource {
    fn next_frame(&mut self) -> PinchpointResult<Option<LandmarkFrame>> {
        Ok(self.frames.pop_front())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
