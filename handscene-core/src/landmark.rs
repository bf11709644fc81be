//! Normalized hand landmarks as produced by a hand-tracking model

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Maximum number of hands tracked per frame
pub const MAX_HANDS: usize = 2;

/// Number of landmarks per hand
pub const JOINTS_PER_HAND: usize = 21;

/// A single normalized landmark
///
/// `x` and `y` are in `[0, 1]` relative to the image width and height,
/// `z` is depth relative to the wrist (smaller is closer to the camera).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Same landmark with its depth discarded
    pub fn flattened(&self) -> Self {
        Self { z: 0.0, ..*self }
    }
}

/// Hand landmark indices (MediaPipe hand landmark convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HandJoint {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexFingerMcp = 5,
    IndexFingerPip = 6,
    IndexFingerDip = 7,
    IndexFingerTip = 8,
    MiddleFingerMcp = 9,
    MiddleFingerPip = 10,
    MiddleFingerDip = 11,
    MiddleFingerTip = 12,
    RingFingerMcp = 13,
    RingFingerPip = 14,
    RingFingerDip = 15,
    RingFingerTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

impl HandJoint {
    pub const COUNT: usize = JOINTS_PER_HAND;

    pub const ALL: [HandJoint; JOINTS_PER_HAND] = [
        Self::Wrist,
        Self::ThumbCmc,
        Self::ThumbMcp,
        Self::ThumbIp,
        Self::ThumbTip,
        Self::IndexFingerMcp,
        Self::IndexFingerPip,
        Self::IndexFingerDip,
        Self::IndexFingerTip,
        Self::MiddleFingerMcp,
        Self::MiddleFingerPip,
        Self::MiddleFingerDip,
        Self::MiddleFingerTip,
        Self::RingFingerMcp,
        Self::RingFingerPip,
        Self::RingFingerDip,
        Self::RingFingerTip,
        Self::PinkyMcp,
        Self::PinkyPip,
        Self::PinkyDip,
        Self::PinkyTip,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// The 21 landmarks of one tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    pub landmarks: [Landmark; JOINTS_PER_HAND],
}

impl Hand {
    pub fn new(landmarks: [Landmark; JOINTS_PER_HAND]) -> Self {
        Self { landmarks }
    }

    pub fn get(&self, joint: HandJoint) -> &Landmark {
        &self.landmarks[joint.index()]
    }

    /// The index fingertip, the point used for touch interaction
    pub fn index_tip(&self) -> &Landmark {
        self.get(HandJoint::IndexFingerTip)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.landmarks.iter()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); JOINTS_PER_HAND],
        }
    }
}

impl Index<HandJoint> for Hand {
    type Output = Landmark;

    fn index(&self, joint: HandJoint) -> &Self::Output {
        &self.landmarks[joint.index()]
    }
}

impl IndexMut<HandJoint> for Hand {
    fn index_mut(&mut self, joint: HandJoint) -> &mut Self::Output {
        &mut self.landmarks[joint.index()]
    }
}

impl TryFrom<Vec<Landmark>> for Hand {
    type Error = Error;

    fn try_from(landmarks: Vec<Landmark>) -> Result<Self> {
        let count = landmarks.len();
        let landmarks: [Landmark; JOINTS_PER_HAND] = landmarks.try_into().map_err(|_| {
            Error::InvalidData(format!(
                "hand has {} landmarks, expected {}",
                count, JOINTS_PER_HAND
            ))
        })?;
        Ok(Self { landmarks })
    }
}

/// All hands detected in a single video frame
///
/// Holds at most [`MAX_HANDS`] hands; extra hands are dropped on construction,
/// including deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Hand>", into = "Vec<Hand>")]
pub struct FrameLandmarks {
    hands: Vec<Hand>,
}

impl FrameLandmarks {
    /// A frame with no hands
    pub fn empty() -> Self {
        Self { hands: Vec::new() }
    }

    pub fn from_hands(mut hands: Vec<Hand>) -> Self {
        hands.truncate(MAX_HANDS);
        Self { hands }
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hand> {
        self.hands.iter()
    }
}

impl From<Vec<Hand>> for FrameLandmarks {
    fn from(hands: Vec<Hand>) -> Self {
        Self::from_hands(hands)
    }
}

impl From<FrameLandmarks> for Vec<Hand> {
    fn from(frame: FrameLandmarks) -> Self {
        frame.hands
    }
}

impl<'a> IntoIterator for &'a FrameLandmarks {
    type Item = &'a Hand;
    type IntoIter = std::slice::Iter<'a, Hand>;

    fn into_iter(self) -> Self::IntoIter {
        self.hands.iter()
    }
}
