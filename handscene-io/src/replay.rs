//! Recorded landmark frames in JSON Lines
//!
//! One JSON object per line:
//!
//! ```text
//! {"timestamp_ms": 0.0, "hands": [[{"x": 0.5, "y": 0.5, "z": 0.0}, ...21 landmarks], ...]}
//! ```
//!
//! Blank lines are skipped. A hand with other than 21 landmarks is rejected.

use crate::LandmarkTimeline;
use handscene_core::{Error, FrameLandmarks, Hand, Landmark, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Serialize, Deserialize)]
struct FrameRecord {
    timestamp_ms: f64,
    #[serde(default)]
    hands: Vec<Vec<Landmark>>,
}

/// One frame of a recording
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub timestamp_ms: f64,
    pub landmarks: FrameLandmarks,
}

impl RecordedFrame {
    pub fn new(timestamp_ms: f64, landmarks: FrameLandmarks) -> Self {
        Self { timestamp_ms, landmarks }
    }
}

/// A timestamp-ordered sequence of landmark frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    frames: Vec<RecordedFrame>,
}

impl Recording {
    /// Build from frames in any order; they are sorted by timestamp
    pub fn from_frames(mut frames: Vec<RecordedFrame>) -> Self {
        frames.sort_by(|a, b| {
            a.timestamp_ms
                .partial_cmp(&b.timestamp_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { frames }
    }

    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Time between the first and last frame
    pub fn duration_ms(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0.0,
        }
    }

    /// Read a recording from JSON Lines
    pub fn read<R: BufRead>(reader: R) -> Result<Self> {
        let mut frames = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: FrameRecord = serde_json::from_str(&line).map_err(|e| Error::Parse {
                line: line_number,
                message: e.to_string(),
            })?;

            let hands = record
                .hands
                .into_iter()
                .map(Hand::try_from)
                .collect::<Result<Vec<_>>>()
                .map_err(|e| Error::Parse {
                    line: line_number,
                    message: e.to_string(),
                })?;

            frames.push(RecordedFrame::new(record.timestamp_ms, FrameLandmarks::from_hands(hands)));
        }

        Ok(Self::from_frames(frames))
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let recording = Self::read(BufReader::new(file))?;
        info!(path = %path.display(), frames = recording.len(), "loaded landmark recording");
        Ok(recording)
    }

    /// Write the recording as JSON Lines
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        for frame in &self.frames {
            let record = FrameRecord {
                timestamp_ms: frame.timestamp_ms,
                hands: frame
                    .landmarks
                    .iter()
                    .map(|hand| hand.landmarks.to_vec())
                    .collect(),
            };
            let line = serde_json::to_string(&record).map_err(|e| Error::InvalidData(e.to_string()))?;
            writeln!(writer, "{}", line)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write(BufWriter::new(file))
    }

    /// Average spacing between consecutive frames
    fn frame_interval_ms(&self) -> f64 {
        if self.frames.len() < 2 {
            0.0
        } else {
            self.duration_ms() / (self.frames.len() - 1) as f64
        }
    }
}

impl LandmarkTimeline for Recording {
    /// Latest frame at or before `elapsed_ms` into playback, looping
    ///
    /// The last frame is held for one average frame interval before the
    /// recording wraps back to its first frame.
    fn frame_at(&self, elapsed_ms: f64) -> FrameLandmarks {
        let Some(first) = self.frames.first() else {
            return FrameLandmarks::empty();
        };

        let period = self.duration_ms() + self.frame_interval_ms();
        if period <= 0.0 {
            return first.landmarks.clone();
        }

        let position = first.timestamp_ms + elapsed_ms.max(0.0).rem_euclid(period);
        let index = self
            .frames
            .partition_point(|f| f.timestamp_ms <= position)
            .saturating_sub(1);
        self.frames[index].landmarks.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handscene_core::HandJoint;
    use std::io::Cursor;

    fn landmark_json(x: f32) -> String {
        let lm = format!(r#"{{"x": {}, "y": 0.5, "z": 0.0}}"#, x);
        vec![lm; 21].join(", ")
    }

    #[test]
    fn test_read_frames() {
        let input = format!(
            "{{\"timestamp_ms\": 33.0, \"hands\": [[{}]]}}\n\n{{\"timestamp_ms\": 0.0, \"hands\": []}}\n",
            landmark_json(0.25)
        );
        let recording = Recording::read(Cursor::new(input)).unwrap();

        assert_eq!(recording.len(), 2);
        // Sorted by timestamp
        assert!(recording.frames()[0].landmarks.is_empty());
        let hand = &recording.frames()[1].landmarks.hands()[0];
        assert_eq!(hand.get(HandJoint::IndexFingerTip).x, 0.25);
    }

    #[test]
    fn test_read_rejects_short_hand() {
        let lm = r#"{"x": 0.5, "y": 0.5, "z": 0.0}"#;
        let input = format!(
            "{{\"timestamp_ms\": 0.0, \"hands\": []}}\n{{\"timestamp_ms\": 1.0, \"hands\": [[{}]]}}\n",
            lm
        );
        match Recording::read(Cursor::new(input)) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_rejects_bad_json() {
        let result = Recording::read(Cursor::new("{\"timestamp_ms\": }\n"));
        assert!(matches!(result, Err(Error::Parse { line: 1, .. })));
    }

    #[test]
    fn test_write_then_read_preserves_frames() {
        let mut hand = Hand::default();
        hand[HandJoint::Wrist] = Landmark::new(0.1, 0.9, -0.05);
        let recording = Recording::from_frames(vec![
            RecordedFrame::new(0.0, FrameLandmarks::from_hands(vec![hand])),
            RecordedFrame::new(40.0, FrameLandmarks::empty()),
        ]);

        let mut buffer = Vec::new();
        recording.write(&mut buffer).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert_eq!(text.lines().count(), 2);

        let reread = Recording::read(Cursor::new(buffer)).unwrap();
        assert_eq!(reread, recording);
    }

    #[test]
    fn test_frame_at_picks_latest_and_loops() {
        let one = FrameLandmarks::from_hands(vec![Hand::default()]);
        let recording = Recording::from_frames(vec![
            RecordedFrame::new(100.0, FrameLandmarks::empty()),
            RecordedFrame::new(200.0, one.clone()),
        ]);

        assert!(recording.frame_at(0.0).is_empty());
        assert!(recording.frame_at(99.0).is_empty());
        assert_eq!(recording.frame_at(100.0), one);
        assert_eq!(recording.frame_at(150.0), one);
        // Period is 100 (span) + 100 (interval), so 200 wraps to the start
        assert!(recording.frame_at(200.0).is_empty());
        assert_eq!(recording.frame_at(310.0), one);
    }

    #[test]
    fn test_frame_at_empty_recording() {
        assert!(Recording::default().frame_at(10.0).is_empty());
    }
}
